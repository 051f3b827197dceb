//! Checkpoint record and on-disk format constants
//!
//! A checkpoint is a full snapshot of a scan run: the configuration it was
//! launched with, the serialized agent state, and optional tracer metadata.
//! At most one checkpoint exists per run directory.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Schema version written into every checkpoint. A file carrying any other
/// version is never loaded.
pub const CHECKPOINT_VERSION: u32 = 1;

/// File name of the checkpoint inside a run directory
pub const CHECKPOINT_FILE: &str = "checkpoint.json";

/// Suffix appended to the checkpoint file name while a save is in flight
pub const TEMP_SUFFIX: &str = ".tmp";

/// Top-level fields that must be present for a checkpoint to be trusted
pub const REQUIRED_FIELDS: [&str; 2] = ["scan_config", "agent_state"];

/// Scan configuration as an opaque JSON object.
///
/// Only the `targets` array is interpreted, by [`target_count`].
pub type ScanConfig = Map<String, Value>;

/// A persisted snapshot of a scan run
///
/// File location: `{run_dir}/checkpoint.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Schema identifier, always [`CHECKPOINT_VERSION`] when written
    pub version: u32,
    /// When the checkpoint was taken (informational, never blocks loading)
    #[serde(default = "Utc::now", deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Configuration the scan was launched with
    pub scan_config: ScanConfig,
    /// Serialized agent state
    pub agent_state: Map<String, Value>,
    /// Auxiliary tracer metadata; `null` or a non-object reads as empty
    #[serde(default, deserialize_with = "lenient_object")]
    pub tracer_data: Map<String, Value>,
}

impl Checkpoint {
    pub fn new(agent_state: Map<String, Value>, scan_config: ScanConfig) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            created_at: Utc::now(),
            scan_config,
            agent_state,
            tracer_data: Map::new(),
        }
    }

    pub fn with_tracer_data(mut self, tracer_data: Option<Map<String, Value>>) -> Self {
        self.tracer_data = tracer_data.unwrap_or_default();
        self
    }

    /// Iteration counter recorded in the agent state
    pub fn iteration(&self) -> u64 {
        crate::checkpoints::snapshot_iteration(&self.agent_state)
    }

    /// Whether the agent state reports a finished scan
    pub fn is_completed(&self) -> bool {
        crate::checkpoints::snapshot_completed(&self.agent_state)
    }

    pub fn target_count(&self) -> usize {
        target_count(&self.scan_config)
    }
}

/// Number of entries in the `targets` array of a scan configuration.
///
/// A missing or non-array `targets` field counts as zero targets.
pub fn target_count(config: &ScanConfig) -> usize {
    config
        .get("targets")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Parse a checkpoint timestamp.
///
/// Accepts RFC 3339 and offset-less ISO-8601 (`2025-06-01T12:00:00.123456`),
/// the latter taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp) {
        Some(ts) => Ok(ts),
        None => {
            debug!(created_at = ?raw, "Unreadable checkpoint timestamp, using current time");
            Ok(Utc::now())
        }
    }
}

fn lenient_object<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Map<String, Value>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => Ok(map),
        _ => Ok(Map::new()),
    }
}
