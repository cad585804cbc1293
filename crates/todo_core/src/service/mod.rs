//! Use-case layer consumed by presentation surfaces.
//!
//! # Responsibility
//! - Bind mutations and projections to one surface's in-memory snapshot.
//! - Write through to the injected repository after each applied mutation.

pub mod surface;
