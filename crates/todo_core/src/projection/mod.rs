//! View projection engine.
//!
//! # Responsibility
//! - Derive filtered, searched, sorted and grouped views of a collection.
//! - Compute aggregate counts over whatever slice a surface supplies.
//!
//! # Invariants
//! - Projections never mutate their input.
//! - Filters commute; sorting is applied last.

pub mod age;
pub mod filter;
pub mod kanban;
pub mod search;
pub mod stats;
