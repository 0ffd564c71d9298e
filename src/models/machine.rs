//! Machine (oven) model.
//!
//! A machine processes one batch at a time. The batch's total job size
//! must stay within `[min_cap, max_cap]` and the batch must run inside
//! one of the machine's shifts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MachineId, Shift};

/// A capacity-constrained machine with shift availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// Unique machine identifier.
    pub id: MachineId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Minimum total job size of a batch.
    pub min_cap: u32,
    /// Maximum total job size of a batch.
    pub max_cap: u32,
    /// Availability shifts, increasing and non-overlapping.
    pub shifts: Vec<Shift>,
}

impl Machine {
    /// Creates a machine with capacity `[0, 1]` and no shifts.
    pub fn new(id: impl Into<MachineId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            min_cap: 0,
            max_cap: 1,
            shifts: Vec::new(),
        }
    }

    /// Sets the machine name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the batch size bounds.
    pub fn with_capacity(mut self, min_cap: u32, max_cap: u32) -> Self {
        self.min_cap = min_cap;
        self.max_cap = max_cap;
        self
    }

    /// Appends an availability shift.
    pub fn with_shift(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.shifts.push(Shift::new(start, end));
        self
    }
}
