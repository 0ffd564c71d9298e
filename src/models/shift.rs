//! Machine availability shifts.
//!
//! A machine can only process batches inside its shifts. Shifts are
//! absolute half-open intervals `[start, end)`; a machine lists them in
//! increasing, non-overlapping order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An availability interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Shift start (inclusive).
    pub start: DateTime<Utc>,
    /// Shift end (exclusive).
    pub end: DateTime<Utc>,
}

impl Shift {
    /// Creates a new shift.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether two shifts overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
