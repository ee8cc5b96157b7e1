// Chart range domain models
use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "day")]
    Daily,
    #[serde(rename = "two_day")]
    TwoDaily,
    #[serde(rename = "week")]
    Weekly,
    #[serde(rename = "month")]
    Monthly,
    #[serde(rename = "year")]
    Yearly,
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown chart range {0:?}")]
pub struct UnknownRange(pub String);

impl ChartRange {
    pub const ALL: [ChartRange; 5] = [
        ChartRange::Daily,
        ChartRange::TwoDaily,
        ChartRange::Weekly,
        ChartRange::Monthly,
        ChartRange::Yearly,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartRange::Daily => "day",
            ChartRange::TwoDaily => "two_day",
            ChartRange::Weekly => "week",
            ChartRange::Monthly => "month",
            ChartRange::Yearly => "year",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartRange::Daily => "24 Hours",
            ChartRange::TwoDaily => "48 Hours",
            ChartRange::Weekly => "Week",
            ChartRange::Monthly => "Month",
            ChartRange::Yearly => "Year",
        }
    }

    /// Id of the tab panel holding this chart.
    pub fn tab_id(self) -> String {
        format!("{}_tab", self.id())
    }

    /// Id of the canvas the chart is drawn on.
    pub fn canvas_id(self) -> String {
        format!("{}_chart", self.id())
    }

    pub fn unit(self) -> TimeUnit {
        match self {
            ChartRange::Daily | ChartRange::TwoDaily => TimeUnit::Hour,
            ChartRange::Weekly | ChartRange::Monthly => TimeUnit::Day,
            ChartRange::Yearly => TimeUnit::Month,
        }
    }

    pub fn label_format(self) -> &'static str {
        match self {
            ChartRange::Daily | ChartRange::TwoDaily => "HH:mm",
            ChartRange::Weekly => "EEE d",
            ChartRange::Monthly => "d MMM",
            ChartRange::Yearly => "MMM yyyy",
        }
    }

    /// Longer ranges draw bare lines without point markers.
    pub fn show_points(self) -> bool {
        matches!(self, ChartRange::Daily | ChartRange::TwoDaily)
    }

    pub fn window_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ChartRange::Daily => now - Duration::days(1),
            ChartRange::TwoDaily => now - Duration::days(2),
            ChartRange::Weekly => now - Duration::weeks(1),
            ChartRange::Monthly => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(now - Duration::days(30)),
            ChartRange::Yearly => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(now - Duration::days(365)),
        }
    }

    pub fn window(self, now: DateTime<Utc>) -> TimeWindow {
        TimeWindow {
            start: self.window_start(now),
            end: now,
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartRange {
    type Err = UnknownRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ChartRange::ALL
            .into_iter()
            .find(|range| range.id() == wanted)
            .ok_or_else(|| UnknownRange(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    Day,
    Month,
}

impl TimeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Month => "month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Everything that differs between the charts of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub range: ChartRange,
    pub canvas_id: String,
    pub window: TimeWindow,
    pub unit: TimeUnit,
    pub label_format: String,
    pub point_radius: Option<f64>,
}

impl ChartSpec {
    pub fn for_range(range: ChartRange, now: DateTime<Utc>) -> Self {
        Self {
            range,
            canvas_id: range.canvas_id(),
            window: range.window(now),
            unit: range.unit(),
            label_format: range.label_format().to_string(),
            point_radius: if range.show_points() { None } else { Some(0.0) },
        }
    }
}
