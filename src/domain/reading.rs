// Sensor reading domain models and record normalization
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    #[serde(rename = "x")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "y")]
    pub value: f64,
}

impl SensorReading {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Timestamp as it arrives from the data provider: ISO text or epoch milliseconds.
///
/// Anything else is kept as `Other` so a single odd row is dropped during
/// normalization instead of failing the whole series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(f64),
    Text(String),
    Other(Value),
}

impl Default for RawTimestamp {
    fn default() -> Self {
        RawTimestamp::Other(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub x: RawTimestamp,
    #[serde(default, deserialize_with = "number_or_none")]
    pub y: Option<f64>,
}

impl RawRecord {
    pub fn new(x: impl Into<String>, y: f64) -> Self {
        Self {
            x: RawTimestamp::Text(x.into()),
            y: Some(y),
        }
    }

    /// Read one record, turning an entry of the wrong shape into one that
    /// normalization drops.
    pub fn from_value(value: Value) -> Self {
        match RawRecord::deserialize(&value) {
            Ok(record) => record,
            Err(_) => Self {
                x: RawTimestamp::Other(value),
                y: None,
            },
        }
    }
}

fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// Deserialize a list of records without letting one bad entry fail the list.
///
/// A missing or `null` list is empty.
pub fn deserialize_records<'de, D>(deserializer: D) -> Result<Vec<RawRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(RawRecord::from_value)
        .collect())
}

#[derive(Debug, Error, PartialEq)]
pub enum ReadingError {
    #[error("unparseable timestamp {0:?}")]
    Timestamp(String),
    #[error("epoch milliseconds out of range: {0}")]
    OutOfRange(f64),
    #[error("timestamp is neither text nor a number: {0}")]
    Unsupported(String),
}

/// Readings that survived normalization plus how many raw records were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub readings: Vec<SensorReading>,
    pub dropped: usize,
}

/// Parse a raw timestamp into an absolute instant.
///
/// Text is tried as RFC 3339 first, then as an offset-less ISO date-time
/// (read as UTC), then as a bare date (midnight UTC). Fractional epoch
/// milliseconds are truncated toward zero.
pub fn parse_timestamp(raw: &RawTimestamp) -> Result<DateTime<Utc>, ReadingError> {
    match raw {
        RawTimestamp::Millis(ms) => parse_millis(*ms),
        RawTimestamp::Text(text) => parse_text(text.trim()),
        RawTimestamp::Other(value) => Err(ReadingError::Unsupported(value.to_string())),
    }
}

fn parse_millis(ms: f64) -> Result<DateTime<Utc>, ReadingError> {
    let truncated = ms.trunc();
    if !truncated.is_finite() || truncated.abs() > i64::MAX as f64 {
        return Err(ReadingError::OutOfRange(ms));
    }
    Utc.timestamp_millis_opt(truncated as i64)
        .single()
        .ok_or(ReadingError::OutOfRange(ms))
}

fn parse_text(text: &str) -> Result<DateTime<Utc>, ReadingError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(ReadingError::Timestamp(text.to_string()))
}

/// Convert raw records into readings, keeping their order.
///
/// Records with an unusable timestamp or a missing or non-numeric value are
/// dropped and counted; nothing else is validated.
pub fn normalize_records(records: &[RawRecord]) -> Normalized {
    let mut normalized = Normalized {
        readings: Vec::with_capacity(records.len()),
        dropped: 0,
    };

    for record in records {
        match (parse_timestamp(&record.x), record.y) {
            (Ok(timestamp), Some(value)) => {
                normalized.readings.push(SensorReading::new(timestamp, value));
            }
            _ => normalized.dropped += 1,
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_utc_record() {
        let records = vec![RawRecord::new("2024-01-01T00:00:00Z", 21.5)];
        let normalized = normalize_records(&records);

        assert_eq!(normalized.dropped, 0);
        assert_eq!(normalized.readings.len(), 1);
        let reading = normalized.readings[0];
        assert_eq!(reading.value, 21.5);
        assert_eq!(
            reading.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 0).unwrap();

        let offset = RawTimestamp::Text("2024-03-05T13:30:00+01:00".to_string());
        assert_eq!(parse_timestamp(&offset), Ok(expected));

        let naive = RawTimestamp::Text("2024-03-05T12:30:00.000000".to_string());
        assert_eq!(parse_timestamp(&naive), Ok(expected));

        let millis = RawTimestamp::Millis(expected.timestamp_millis() as f64);
        assert_eq!(parse_timestamp(&millis), Ok(expected));

        let fractional = RawTimestamp::Millis(expected.timestamp_millis() as f64 + 0.75);
        assert_eq!(parse_timestamp(&fractional), Ok(expected));

        let date = RawTimestamp::Text("2024-03-05".to_string());
        assert_eq!(
            parse_timestamp(&date),
            Ok(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_malformed_and_null_records_are_dropped() {
        let json = r#"[
            {"x": "2024-01-01T00:00:00Z", "y": 20.0},
            {"x": "yesterday", "y": 19.0},
            {"x": "2024-01-01T01:00:00Z", "y": null},
            {"x": 1704074400000, "y": 18.5}
        ]"#;
        let records: Vec<RawRecord> = serde_json::from_str(json).unwrap();
        let normalized = normalize_records(&records);

        assert_eq!(normalized.dropped, 2);
        let values: Vec<f64> = normalized.readings.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![20.0, 18.5]);
        assert!(normalized.readings[0].timestamp < normalized.readings[1].timestamp);
    }

    #[test]
    fn test_records_of_the_wrong_type_are_dropped() {
        let json = r#"[
            {"x": null, "y": 19.0},
            {"x": 1704880800000.0, "y": 35.0},
            {"x": true, "y": 1.0},
            {"x": {"at": "noon"}, "y": 2.0},
            {"x": "2024-01-10T10:00:00Z", "y": "warm"},
            {"x": "2024-01-10T11:00:00Z"},
            {"y": 3.0},
            42,
            "2024-01-10T12:00:00Z",
            {"x": 1e300, "y": 4.0},
            {"x": "2024-01-10T13:00:00Z", "y": 21}
        ]"#;
        let values: Vec<Value> = serde_json::from_str(json).unwrap();
        let records: Vec<RawRecord> = values.into_iter().map(RawRecord::from_value).collect();
        let normalized = normalize_records(&records);

        assert_eq!(normalized.dropped, 9);
        assert_eq!(
            normalized.readings,
            vec![
                SensorReading::new(Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap(), 35.0),
                SensorReading::new(Utc.with_ymd_and_hms(2024, 1, 10, 13, 0, 0).unwrap(), 21.0),
            ]
        );
    }

    #[test]
    fn test_deserialize_records_tolerates_null_list() {
        #[derive(Deserialize)]
        struct Series {
            #[serde(default, deserialize_with = "deserialize_records")]
            records: Vec<RawRecord>,
        }

        let series: Series = serde_json::from_str(r#"{"records": null}"#).unwrap();
        assert!(series.records.is_empty());

        let series: Series = serde_json::from_str(r#"{"records": [{"x": false}]}"#).unwrap();
        assert_eq!(normalize_records(&series.records).dropped, 1);
    }

    #[test]
    fn test_reading_serializes_as_chart_point() {
        let reading = SensorReading::new(Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap(), 4.0);
        let value = serde_json::to_value(reading).unwrap();
        assert_eq!(value["x"], "2024-01-01T06:00:00Z");
        assert_eq!(value["y"], 4.0);
    }
}
