//! Persistence codec for the todo collection and the filter preference.
//!
//! # Responsibility
//! - Encode/decode the collection to/from its JSON snapshot text.
//! - Default-fill optional fields written by older schema versions.
//!
//! # Invariants
//! - `createdAt` is written as `YYYY-MM-DDTHH:MM:SS.mmmZ` (UTC, millis).
//! - Decoded records always satisfy `Todo::validate()`.
//! - Decode never panics. Only a non-array snapshot is a `DecodeError`;
//!   bad records are dropped and reported as `RecordError`.

pub mod snapshot;

pub use snapshot::{
    decode_filter, decode_snapshot, decode_todos, decode_todos_or_empty, encode_filter,
    encode_todos, format_timestamp, parse_timestamp, DecodeError, DecodedSnapshot, RecordError,
};
