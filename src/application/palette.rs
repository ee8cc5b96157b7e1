// Sensor palette - Colour and default visibility per sensor name
use crate::infrastructure::config::PaletteConfig;

pub const FALLBACK_COLOR: &str = "rgb(214, 111, 26, 0.3)";

const DEFAULT_COLORS: [(&str, &str); 4] = [
    ("Hot Water", "cornflowerblue"),
    ("Thermostat", "#D66F1A"),
    ("Outdoor", "#BAA9D2"),
    ("Plant Room", "rgb(225, 179, 198, 0.8)"),
];

const DEFAULT_HIDDEN: [&str; 1] = ["Hot Water"];

/// Colour table and hidden set, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorPalette {
    colors: Vec<(String, String)>,
    hidden: Vec<String>,
    fallback: String,
}

impl Default for SensorPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS
                .iter()
                .map(|(label, color)| (label.to_string(), color.to_string()))
                .collect(),
            hidden: DEFAULT_HIDDEN.iter().map(|label| label.to_string()).collect(),
            fallback: FALLBACK_COLOR.to_string(),
        }
    }
}

impl SensorPalette {
    /// Built-in tables with whatever the configuration overrides.
    pub fn from_config(config: &PaletteConfig) -> Self {
        let mut palette = Self::default();
        if let Some(colors) = &config.colors {
            palette.colors = colors
                .iter()
                .map(|entry| (entry.label.clone(), entry.color.clone()))
                .collect();
        }
        if let Some(hidden) = &config.hidden {
            palette.hidden = hidden.clone();
        }
        if let Some(fallback) = &config.fallback {
            palette.fallback = fallback.clone();
        }
        palette
    }

    /// First mapped colour for the label, or the fallback.
    pub fn color_for(&self, label: &str) -> &str {
        self.colors
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, color)| color.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    pub fn is_hidden_by_default(&self, label: &str) -> bool {
        self.hidden.iter().any(|name| name == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ColorEntry;

    #[test]
    fn test_mapped_colors() {
        let palette = SensorPalette::default();
        assert_eq!(palette.color_for("Thermostat"), "#D66F1A");
        assert_eq!(palette.color_for("Plant Room"), "rgb(225, 179, 198, 0.8)");
    }

    #[test]
    fn test_unmapped_sensor_uses_fallback() {
        let palette = SensorPalette::default();
        assert_eq!(palette.color_for("Spare Room"), FALLBACK_COLOR);
        assert!(!palette.is_hidden_by_default("Spare Room"));
    }

    #[test]
    fn test_hidden_set_membership() {
        let palette = SensorPalette::default();
        for label in DEFAULT_HIDDEN {
            assert!(palette.is_hidden_by_default(label));
        }
        for (label, _) in DEFAULT_COLORS.iter().filter(|(l, _)| !DEFAULT_HIDDEN.contains(l)) {
            assert!(!palette.is_hidden_by_default(label));
        }
        // Lookup is exact, not case-folded.
        assert!(!palette.is_hidden_by_default("hot water"));
    }

    #[test]
    fn test_config_overrides_replace_tables() {
        let config = PaletteConfig {
            colors: Some(vec![ColorEntry {
                label: "Kitchen".to_string(),
                color: "teal".to_string(),
            }]),
            hidden: Some(vec!["Kitchen".to_string()]),
            fallback: None,
        };
        let palette = SensorPalette::from_config(&config);

        assert_eq!(palette.color_for("Kitchen"), "teal");
        assert_eq!(palette.color_for("Thermostat"), FALLBACK_COLOR);
        assert!(palette.is_hidden_by_default("Kitchen"));
        assert!(!palette.is_hidden_by_default("Hot Water"));
    }
}
