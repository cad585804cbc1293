//! Todo domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by mutations and projections.
//! - Keep the `completed`/`status` coupling inside model setters.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - A collection never holds two todos with the same id.

pub mod filter;
pub mod sample;
pub mod todo;
