use crate::application::view_registry::DEFAULT_MAX_VIEWS;
use crate::domain::chart::ChartRange;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub charts: ChartsSettings,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub ordering: OrderingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Rendered pages kept for tab activation
    #[serde(default = "default_max_views")]
    pub max_views: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_views: default_max_views(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

/// Ranges that get a canvas on the page.
#[derive(Debug, Deserialize, Clone)]
pub struct ChartsSettings {
    #[serde(default = "default_ranges")]
    pub ranges: Vec<ChartRange>,
}

impl Default for ChartsSettings {
    fn default() -> Self {
        Self {
            ranges: default_ranges(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PaletteConfig {
    pub colors: Option<Vec<ColorEntry>>,
    pub hidden: Option<Vec<String>>,
    pub fallback: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColorEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OrderingConfig {
    pub priority: Option<Vec<String>>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_views() -> usize {
    DEFAULT_MAX_VIEWS
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/snapshot.json")
}

fn default_ranges() -> Vec<ChartRange> {
    ChartRange::ALL.to_vec()
}

/// Load `config/heating.*` (optional) with `HEATING__*` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/heating")
}

pub fn load_app_config_from(base_name: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(base_name).required(false))
        .add_source(
            config::Environment::with_prefix("HEATING")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("charts.ranges")
                .with_list_parse_key("palette.hidden")
                .with_list_parse_key("ordering.priority")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
