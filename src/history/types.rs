use std::collections::BTreeMap;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Which operation produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecordKind {
    Generated,
    Optimized,
}

/// One persisted generation or optimization event.
///
/// The serialized form (a JSON object inside the store's single array blob)
/// is the compatibility contract: `id`, `type`, `title`, `content`, a numeric
/// `timestamp` in seconds, `formatted_date`, and a string-to-string
/// `metadata` map. Structured metadata values are delimiter-joined strings
/// (goals and scores on `,`, explanation on `|`); the restore path splits
/// them back with the same delimiters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub title: String,
    pub content: String,
    pub timestamp: f64,
    #[serde(default)]
    pub formatted_date: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl HistoryRecord {
    /// Fill in `formatted_date` from `timestamp` when an older entry lacks it.
    pub(crate) fn repair_formatted_date(&mut self) {
        if self.formatted_date.is_empty() {
            self.formatted_date = format_timestamp(self.timestamp);
        }
    }
}

/// Display form of a store timestamp, local time.
#[allow(clippy::cast_possible_truncation)]
pub fn format_timestamp(timestamp: f64) -> String {
    Local
        .timestamp_opt(timestamp as i64, 0)
        .single()
        .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
