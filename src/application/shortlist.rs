// Dataset shortlist - Building datasets and putting them in display order
use crate::application::palette::SensorPalette;
use crate::domain::dataset::{Dataset, HeatPumpSeries};
use crate::domain::reading::{normalize_records, RawRecord};

pub const DEFAULT_PRIORITY: [&str; 12] = [
    "Room Setpoint",
    "Thermostat",
    "Kitchen",
    "Landing",
    "Hallway",
    "Living Room",
    "Tank Setpoint",
    "Hot Water",
    "Outdoor",
    "Plant Room",
    "Flow Temperature",
    "Return Temperature",
];

pub fn default_priority() -> Vec<String> {
    DEFAULT_PRIORITY.iter().map(|name| name.to_string()).collect()
}

/// Working collection of built datasets, before ordering.
#[derive(Debug)]
pub struct Shortlist<'a> {
    palette: &'a SensorPalette,
    datasets: Vec<Dataset>,
}

impl<'a> Shortlist<'a> {
    pub fn new(palette: &'a SensorPalette) -> Self {
        Self {
            palette,
            datasets: Vec::new(),
        }
    }

    /// Normalize `records` and append them as a dataset.
    ///
    /// Colour and visibility come from the palette unless given explicitly.
    pub fn add(
        &mut self,
        label: &str,
        records: &[RawRecord],
        color: Option<&str>,
        hidden: Option<bool>,
    ) -> &Dataset {
        let normalized = normalize_records(records);
        if normalized.dropped > 0 {
            tracing::warn!(
                dataset = label,
                dropped = normalized.dropped,
                kept = normalized.readings.len(),
                "dropped malformed sensor records"
            );
        }

        let palette = self.palette;
        let color = color.unwrap_or_else(|| palette.color_for(label));
        let hidden = hidden.unwrap_or_else(|| palette.is_hidden_by_default(label));

        self.datasets.push(Dataset::new(
            label.to_string(),
            normalized.readings,
            color.to_string(),
            hidden,
        ));
        &self.datasets[self.datasets.len() - 1]
    }

    pub fn add_heat_pump(&mut self, series: HeatPumpSeries, records: &[RawRecord]) -> &Dataset {
        self.add(
            series.label(),
            records,
            Some(series.color()),
            Some(series.hidden()),
        )
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn into_ordered(self, priority: &[String]) -> Vec<Dataset> {
        order_datasets(self.datasets, priority)
    }
}

/// Stable partial sort of `shortlist` by `priority`.
///
/// Each priority name pulls the earliest remaining dataset with that label;
/// names matching nothing are skipped. Whatever is left is appended in its
/// original order.
pub fn order_datasets(mut shortlist: Vec<Dataset>, priority: &[String]) -> Vec<Dataset> {
    let mut ordered = Vec::with_capacity(shortlist.len());

    for name in priority {
        if let Some(index) = shortlist.iter().position(|dataset| &dataset.label == name) {
            ordered.push(shortlist.remove(index));
        }
    }

    ordered.extend(shortlist);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(label: &str) -> Dataset {
        Dataset::new(label.to_string(), Vec::new(), "black".to_string(), false)
    }

    fn labels(datasets: &[Dataset]) -> Vec<&str> {
        datasets.iter().map(|d| d.label.as_str()).collect()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_priority_then_unmatched() {
        let input = vec![dataset("B"), dataset("C"), dataset("A")];
        let ordered = order_datasets(input, &names(&["A", "B"]));
        assert_eq!(labels(&ordered), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_unmatched_keep_relative_order() {
        let input = vec![
            dataset("Zeta"),
            dataset("Kitchen"),
            dataset("Alpha"),
            dataset("Room Setpoint"),
            dataset("Mid"),
        ];
        let ordered = order_datasets(input, &default_priority());
        assert_eq!(
            labels(&ordered),
            vec!["Room Setpoint", "Kitchen", "Zeta", "Alpha", "Mid"]
        );
    }

    #[test]
    fn test_duplicate_label_consumed_once_per_pass() {
        let mut first = dataset("Flow Temperature");
        first.color = "first".to_string();
        let mut second = dataset("Flow Temperature");
        second.color = "second".to_string();

        let input = vec![dataset("X"), first, second, dataset("Outdoor")];
        let ordered = order_datasets(input, &default_priority());

        assert_eq!(
            labels(&ordered),
            vec!["Outdoor", "Flow Temperature", "X", "Flow Temperature"]
        );
        assert_eq!(ordered[1].color, "first");
        assert_eq!(ordered[3].color, "second");
    }

    #[test]
    fn test_ordering_is_idempotent_and_preserves_labels() {
        let input = vec![
            dataset("Outdoor"),
            dataset("Spare Room"),
            dataset("Thermostat"),
            dataset("Thermostat"),
            dataset("Return Temperature"),
            dataset("Attic"),
        ];
        let priority = default_priority();

        let once = order_datasets(input.clone(), &priority);
        let twice = order_datasets(once.clone(), &priority);
        assert_eq!(once, twice);

        assert_eq!(once.len(), input.len());
        let mut before = labels(&input);
        let mut after = labels(&once);
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_empty_priority_is_identity() {
        let input = vec![dataset("B"), dataset("A")];
        let ordered = order_datasets(input.clone(), &[]);
        assert_eq!(ordered, input);
    }

    #[test]
    fn test_shortlist_applies_palette_and_overrides() {
        let palette = SensorPalette::default();
        let mut shortlist = Shortlist::new(&palette);
        let records = vec![
            RawRecord::new("2024-01-01T00:00:00Z", 45.0),
            RawRecord::new("2024-01-01T00:10:00Z", 46.0),
        ];

        let hot_water = shortlist.add("Hot Water", &records, None, None).clone();
        assert_eq!(hot_water.color, "cornflowerblue");
        assert!(hot_water.hidden);
        assert_eq!(hot_water.readings.len(), 2);
        assert!(hot_water.readings[0].timestamp < hot_water.readings[1].timestamp);

        let forced = shortlist.add("Hot Water", &records, Some("red"), Some(false)).clone();
        assert_eq!(forced.color, "red");
        assert!(!forced.hidden);

        let tank = shortlist
            .add_heat_pump(HeatPumpSeries::TankSetpoint, &records)
            .clone();
        assert_eq!(tank.label, "Tank Setpoint");
        assert_eq!(tank.color, "darkblue");
        assert!(tank.hidden);

        assert_eq!(shortlist.len(), 3);
        let ordered = shortlist.into_ordered(&default_priority());
        assert_eq!(
            labels(&ordered),
            vec!["Tank Setpoint", "Hot Water", "Hot Water"]
        );
    }
}
