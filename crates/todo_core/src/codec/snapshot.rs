//! JSON snapshot format.
//!
//! Wire shape per record:
//! `{id, text, completed, createdAt, status?, priority?}`.
//! `status` and `priority` are optional on read (legacy snapshots predate
//! them) and always written.

use crate::model::filter::TodoFilter;
use crate::model::todo::{Priority, Todo, TodoId, TodoStatus, TodoValidationError};
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot-level decode failure.
///
/// Raised only when the text is not a JSON array; individual bad records
/// are skipped instead (see [`RecordError`]).
#[derive(Debug)]
pub enum DecodeError {
    Malformed(serde_json::Error),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed todo snapshot: {err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Why one snapshot record was dropped during decode.
#[derive(Debug)]
pub enum RecordError {
    /// Array element is not a todo record object.
    Unreadable {
        index: usize,
        source: serde_json::Error,
    },
    /// `createdAt` could not be parsed.
    InvalidTimestamp { id: TodoId, value: String },
    /// Record fails model validation after default-filling.
    InvalidRecord {
        id: TodoId,
        source: TodoValidationError,
    },
    /// An earlier record already uses this id.
    DuplicateId(TodoId),
}

impl RecordError {
    fn reason(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } => "unreadable",
            Self::InvalidTimestamp { .. } => "invalid_timestamp",
            Self::InvalidRecord { .. } => "invalid_record",
            Self::DuplicateId(_) => "duplicate_id",
        }
    }
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { index, source } => {
                write!(f, "unreadable todo record at index {index}: {source}")
            }
            Self::InvalidTimestamp { id, value } => {
                write!(f, "invalid createdAt `{value}` on todo {id}")
            }
            Self::InvalidRecord { id, source } => write!(f, "invalid todo {id}: {source}"),
            Self::DuplicateId(id) => write!(f, "duplicate todo id in snapshot: {id}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::InvalidTimestamp { .. } | Self::DuplicateId(_) => None,
        }
    }
}

/// Decoded collection plus the records that had to be dropped.
#[derive(Debug, Default)]
pub struct DecodedSnapshot {
    pub todos: Vec<Todo>,
    pub skipped: Vec<RecordError>,
}

/// Persisted record shape.
///
/// `status`/`priority` stay raw strings so an unknown value written by a
/// newer schema degrades to the default instead of failing the snapshot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodoRecord {
    id: TodoId,
    text: String,
    completed: bool,
    created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<String>,
}

impl From<&Todo> for TodoRecord {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.clone(),
            text: todo.text.clone(),
            completed: todo.completed,
            created_at: format_timestamp(todo.created_at),
            status: Some(todo.status.as_str().to_string()),
            priority: Some(todo.priority.as_str().to_string()),
        }
    }
}

/// Default-fills optional fields and validates the result.
fn record_into_todo(record: TodoRecord) -> Result<Todo, RecordError> {
    let created_at =
        parse_timestamp(&record.created_at).ok_or_else(|| RecordError::InvalidTimestamp {
            id: record.id.clone(),
            value: record.created_at.clone(),
        })?;

    let status = fill_status(&record);
    let priority = fill_priority(&record);
    let todo = Todo {
        id: record.id,
        text: record.text,
        // Explicit status wins over a disagreeing completed flag.
        completed: status == TodoStatus::Done,
        created_at,
        status,
        priority,
    };
    todo.validate().map_err(|source| RecordError::InvalidRecord {
        id: todo.id.clone(),
        source,
    })?;
    Ok(todo)
}

fn fill_status(record: &TodoRecord) -> TodoStatus {
    let legacy = TodoStatus::from_completed(record.completed);
    let Some(raw) = record.status.as_deref() else {
        return legacy;
    };
    let Some(status) = TodoStatus::parse(raw) else {
        warn!(
            "event=snapshot_decode module=codec status=repaired field=status id={} reason=unknown_value",
            record.id
        );
        return legacy;
    };
    if (status == TodoStatus::Done) != record.completed {
        warn!(
            "event=snapshot_decode module=codec status=repaired field=completed id={} reason=status_mismatch",
            record.id
        );
    }
    status
}

fn fill_priority(record: &TodoRecord) -> Priority {
    match record.priority.as_deref() {
        None => Priority::default(),
        Some(raw) => Priority::parse(raw).unwrap_or_else(|| {
            warn!(
                "event=snapshot_decode module=codec status=repaired field=priority id={} reason=unknown_value",
                record.id
            );
            Priority::default()
        }),
    }
}

/// Serializes the collection, preserving order.
pub fn encode_todos(todos: &[Todo]) -> serde_json::Result<String> {
    let records: Vec<TodoRecord> = todos.iter().map(TodoRecord::from).collect();
    serde_json::to_string(&records)
}

/// Reconstructs a collection from snapshot text.
///
/// Blank text is an empty collection (nothing was ever stored). Records
/// that cannot be turned into a valid todo are dropped and logged; the
/// first record wins when ids repeat.
///
/// # Errors
/// - `Malformed` when the text is not a JSON array.
pub fn decode_snapshot(snapshot: &str) -> Result<DecodedSnapshot, DecodeError> {
    if snapshot.trim().is_empty() {
        return Ok(DecodedSnapshot::default());
    }

    let values: Vec<serde_json::Value> = serde_json::from_str(snapshot)?;
    let mut seen = HashSet::with_capacity(values.len());
    let mut decoded = DecodedSnapshot {
        todos: Vec::with_capacity(values.len()),
        skipped: Vec::new(),
    };
    for (index, value) in values.into_iter().enumerate() {
        let todo = serde_json::from_value::<TodoRecord>(value)
            .map_err(|source| RecordError::Unreadable { index, source })
            .and_then(record_into_todo)
            .and_then(|todo| {
                if seen.contains(&todo.id) {
                    Err(RecordError::DuplicateId(todo.id))
                } else {
                    Ok(todo)
                }
            });
        match todo {
            Ok(todo) => {
                seen.insert(todo.id.clone());
                decoded.todos.push(todo);
            }
            Err(err) => {
                warn!(
                    "event=snapshot_decode module=codec status=skipped index={index} reason={} error={err}",
                    err.reason()
                );
                decoded.skipped.push(err);
            }
        }
    }

    debug!(
        "event=snapshot_decode module=codec status=ok records={} skipped={}",
        decoded.todos.len(),
        decoded.skipped.len()
    );
    Ok(decoded)
}

/// [`decode_snapshot`] without the skipped-record report.
pub fn decode_todos(snapshot: &str) -> Result<Vec<Todo>, DecodeError> {
    decode_snapshot(snapshot).map(|decoded| decoded.todos)
}

/// Decodes a snapshot, substituting an empty collection on failure.
///
/// The failure is logged and otherwise swallowed; in-memory state starts
/// fresh for the session.
pub fn decode_todos_or_empty(snapshot: &str) -> Vec<Todo> {
    match decode_todos(snapshot) {
        Ok(todos) => todos,
        Err(err) => {
            error!(
                "event=snapshot_decode module=codec status=error bytes={} error={}",
                snapshot.len(),
                err
            );
            Vec::new()
        }
    }
}

pub fn encode_filter(filter: TodoFilter) -> &'static str {
    filter.as_str()
}

/// Parses a stored filter value; unknown values fall back to `all`.
pub fn decode_filter(value: &str) -> TodoFilter {
    TodoFilter::parse_or_default(value)
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses any RFC 3339 timestamp and normalizes it to UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{TimeZone, Utc};

    #[test]
    fn timestamp_format_uses_millis_and_z_suffix() {
        let value = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(value), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn parse_timestamp_normalizes_offsets_to_utc() {
        let parsed = parse_timestamp("2024-01-01T09:00:00+09:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
