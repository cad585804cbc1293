//! Host collaborators consumed by the core.
//!
//! # Responsibility
//! - Abstract the wall clock, id generation and confirmation prompts.
//! - Provide deterministic implementations for tests and scripted hosts.
//!
//! # Invariants
//! - `IdGenerator` implementations must never yield an id twice.

use crate::model::todo::TodoId;
use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;
use uuid::Uuid;

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that returns a caller-controlled instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Source of collection-unique todo ids.
pub trait IdGenerator {
    fn next_id(&self) -> TodoId;
}

/// Random v4 UUID ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> TodoId {
        TodoId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic `<prefix>-<n>` ids, starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> TodoId {
        let value = self.next.get();
        self.next.set(value + 1);
        TodoId::new(format!("{}-{value}", self.prefix))
    }
}

/// Blocking yes/no prompt used before destructive operations.
pub trait ConfirmationPrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Prompt that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmationPrompt for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Prompt that declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl ConfirmationPrompt for NeverConfirm {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

impl<F> ConfirmationPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
