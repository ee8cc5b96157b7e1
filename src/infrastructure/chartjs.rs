// Chart.js renderer - Builds the configuration handed to `new Chart(...)`
use crate::application::chart_loader::{ChartError, ChartRenderer};
use crate::domain::chart::{ChartSpec, TimeUnit};
use crate::domain::dataset::Dataset;
use crate::domain::reading::SensorReading;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

const Y_AXIS_TITLE: &str = "Temperature (ºC)";

#[derive(Debug, Serialize)]
pub struct ChartConfig<'a> {
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartData<'a>,
    pub options: ChartOptions,
}

#[derive(Debug, Serialize)]
pub struct ChartData<'a> {
    pub datasets: Vec<LineDataset<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset<'a> {
    pub label: &'a str,
    pub data: &'a [SensorReading],
    pub background_color: &'static str,
    pub border_color: &'a str,
    pub border_width: u32,
    pub tension: f64,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Serialize)]
pub struct Scales {
    pub x: TimeAxis,
    pub y: ValueAxis,
}

#[derive(Debug, Serialize)]
pub struct TimeAxis {
    #[serde(rename = "type")]
    pub axis_type: &'static str,
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
    pub time: TimeOptions,
    pub ticks: Ticks,
    pub title: AxisTitle,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub unit: TimeUnit,
    pub display_formats: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct Ticks {
    pub source: &'static str,
    pub major: MajorTicks,
}

/// Major ticks on every bucket boundary, so gaps in the data keep their ticks.
#[derive(Debug, Serialize)]
pub struct MajorTicks {
    pub unit: TimeUnit,
}

#[derive(Debug, Serialize)]
pub struct ValueAxis {
    #[serde(rename = "type")]
    pub axis_type: &'static str,
    pub title: AxisTitle,
}

#[derive(Debug, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Serialize)]
pub struct Legend {
    pub align: &'static str,
    pub labels: LegendLabels,
    pub title: LegendTitle,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub padding: u32,
    pub use_point_style: bool,
    pub point_style: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LegendTitle {
    pub display: bool,
    pub text: &'static str,
    pub font: Font,
}

#[derive(Debug, Serialize)]
pub struct Font {
    pub size: u32,
    pub weight: &'static str,
}

impl<'a> ChartConfig<'a> {
    pub fn line(spec: &ChartSpec, datasets: &'a [Dataset]) -> Self {
        let datasets = datasets
            .iter()
            .map(|dataset| LineDataset {
                label: &dataset.label,
                data: &dataset.readings,
                background_color: "transparent",
                border_color: &dataset.color,
                border_width: 2,
                tension: 0.5,
                hidden: dataset.hidden,
                point_radius: spec.point_radius,
            })
            .collect();

        let mut display_formats = Map::new();
        display_formats.insert(
            spec.unit.as_str().to_string(),
            Value::String(spec.label_format.clone()),
        );

        Self {
            chart_type: "line",
            data: ChartData { datasets },
            options: ChartOptions {
                scales: Scales {
                    x: TimeAxis {
                        axis_type: "time",
                        min: spec.window.start,
                        max: spec.window.end,
                        time: TimeOptions {
                            unit: spec.unit,
                            display_formats,
                        },
                        ticks: Ticks {
                            source: "linear",
                            major: MajorTicks { unit: spec.unit },
                        },
                        title: AxisTitle {
                            display: true,
                            text: "Time",
                        },
                    },
                    y: ValueAxis {
                        axis_type: "logarithmic",
                        title: AxisTitle {
                            display: true,
                            text: Y_AXIS_TITLE,
                        },
                    },
                },
                plugins: Plugins {
                    legend: Legend {
                        align: "center",
                        labels: LegendLabels {
                            padding: 15,
                            use_point_style: true,
                            point_style: "line",
                        },
                        title: LegendTitle {
                            display: true,
                            text: "Legend",
                            font: Font {
                                size: 14,
                                weight: "bold",
                            },
                        },
                    },
                },
            },
        }
    }
}

/// Produces Chart.js configurations for the canvases the page declares.
#[derive(Debug, Clone, Default)]
pub struct ChartJsRenderer {
    targets: BTreeSet<String>,
}

impl ChartJsRenderer {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_target(&self, canvas_id: &str) -> bool {
        self.targets.contains(canvas_id)
    }
}

impl ChartRenderer for ChartJsRenderer {
    type Chart = Value;

    fn construct(&mut self, spec: &ChartSpec, datasets: &[Dataset]) -> Result<Value, ChartError> {
        if !self.has_target(&spec.canvas_id) {
            return Err(ChartError::MissingTarget(spec.canvas_id.clone()));
        }
        Ok(serde_json::to_value(ChartConfig::line(spec, datasets))?)
    }
}
