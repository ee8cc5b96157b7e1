// Repository trait for sensor snapshot access
use crate::domain::reading::{deserialize_records, RawRecord};
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Raw records for one page render, as supplied by the data provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorSnapshot {
    #[serde(default, deserialize_with = "deserialize_records")]
    pub room_setpoint_records: Vec<RawRecord>,
    #[serde(default, deserialize_with = "deserialize_records")]
    pub tank_setpoint_records: Vec<RawRecord>,
    #[serde(default, deserialize_with = "deserialize_records")]
    pub flow_temperature_records: Vec<RawRecord>,
    #[serde(default, deserialize_with = "deserialize_records")]
    pub return_temperature_records: Vec<RawRecord>,
    /// Sensor name to records, in the order the provider listed them
    #[serde(default)]
    pub sensor_records: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SensorSnapshot {
    /// Per-sensor records in provider order.
    ///
    /// A sensor whose records are not a list is an error; bad entries inside
    /// a list are kept for normalization to drop.
    pub fn sensors(&self) -> Result<Vec<(String, Vec<RawRecord>)>, SnapshotError> {
        self.sensor_records
            .iter()
            .map(|(name, records)| {
                let records = deserialize_records(records)?;
                Ok((name.clone(), records))
            })
            .collect()
    }
}

#[async_trait]
pub trait SensorRepository: Send + Sync {
    /// Load the current snapshot of readings.
    async fn snapshot(&self) -> Result<SensorSnapshot, SnapshotError>;
}
