//! Serialization contract between the agent state and the checkpoint store
//!
//! The store never inspects the agent's in-memory representation. The agent
//! state type turns itself into a JSON object and back; the store only ever
//! handles the already-serialized object.

use serde_json::{Map, Value};

use super::error::{CheckpointError, CheckpointResult};

/// Implemented by agent state types that can be checkpointed.
///
/// A snapshot must carry at least an `iteration` counter and a `completed`
/// flag at its top level.
pub trait AgentSnapshot: Sized {
    /// Serialize the full mutable state into a JSON object.
    fn to_snapshot(&self) -> CheckpointResult<Map<String, Value>>;

    /// Rebuild the state from a snapshot produced by [`to_snapshot`](Self::to_snapshot).
    fn from_snapshot(snapshot: &Map<String, Value>) -> CheckpointResult<Self>;
}

/// A raw JSON object is its own snapshot.
impl AgentSnapshot for Map<String, Value> {
    fn to_snapshot(&self) -> CheckpointResult<Map<String, Value>> {
        Ok(self.clone())
    }

    fn from_snapshot(snapshot: &Map<String, Value>) -> CheckpointResult<Self> {
        Ok(snapshot.clone())
    }
}

/// Serialize any serde-serializable state into a snapshot object.
///
/// Convenience for implementing [`AgentSnapshot::to_snapshot`]; fails if the
/// state does not serialize to a JSON object.
pub fn snapshot_from_serde<T: serde::Serialize>(state: &T) -> CheckpointResult<Map<String, Value>> {
    match serde_json::to_value(state) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CheckpointError::Snapshot(format!(
            "agent state must serialize to an object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(CheckpointError::Snapshot(e.to_string())),
    }
}

/// Counterpart of [`snapshot_from_serde`] for [`AgentSnapshot::from_snapshot`].
pub fn snapshot_into_serde<T: serde::de::DeserializeOwned>(
    snapshot: &Map<String, Value>,
) -> CheckpointResult<T> {
    serde_json::from_value(Value::Object(snapshot.clone()))
        .map_err(|e| CheckpointError::Snapshot(e.to_string()))
}

/// `iteration` counter of a serialized agent state; 0 when absent.
pub fn snapshot_iteration(snapshot: &Map<String, Value>) -> u64 {
    snapshot
        .get("iteration")
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

/// `completed` flag of a serialized agent state; false when absent.
pub fn snapshot_completed(snapshot: &Map<String, Value>) -> bool {
    snapshot
        .get("completed")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
