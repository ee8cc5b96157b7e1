// JSON snapshot repository implementation
use crate::application::sensor_repository::{SensorRepository, SensorSnapshot, SnapshotError};
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads the snapshot file the data provider drops next to the service.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    path: PathBuf,
}

impl SnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SensorRepository for SnapshotRepository {
    async fn snapshot(&self) -> Result<SensorSnapshot, SnapshotError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.path.display(),
                    "snapshot file missing, rendering empty charts"
                );
                return Ok(SensorSnapshot::default());
            }
            Err(source) => {
                return Err(SnapshotError::Io {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        let snapshot: SensorSnapshot = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            sensors = snapshot.sensor_records.len(),
            "loaded sensor snapshot"
        );
        Ok(snapshot)
    }
}
