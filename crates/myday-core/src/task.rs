use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::{ContextV7, Timestamp, Uuid};

use crate::config::format_instant;

/// Opaque task identifier.
///
/// Freshly created ids are UUIDv7 strings, so they sort by creation time.
/// Ids read back from storage are kept verbatim, whatever their shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Builds a UUIDv7 for `now`. Ids drawn from the same `context` keep
    /// increasing even when `now` does not move.
    pub fn generate(context: &ContextV7, now: DateTime<Local>) -> Self {
        let secs = u64::try_from(now.timestamp()).unwrap_or(0);
        let ts = Timestamp::from_unix(context, secs, now.timestamp_subsec_nanos());
        Self(Uuid::new_v7(ts).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
    /// Creation date as it is shown in the list, captured once at creation.
    pub date: String,
}

impl Task {
    pub fn new_pending(id: TaskId, text: String, now: DateTime<Local>, date_format: &str) -> Self {
        Self {
            id,
            text,
            done: false,
            date: format_instant(now, date_format),
        }
    }
}
