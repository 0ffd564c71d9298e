//! Job model.
//!
//! A job has a release date, a due date, a processing-time range and a
//! size. It may run on any of its eligible machines, and on each of them
//! it carries a machine-specific attribute which decides which other jobs
//! it can share a batch with and which setup time precedes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{AttributeId, JobId, MachineId};

/// A job to be scheduled in a batch.
///
/// Processing times are in seconds. A batch has to run at least as long
/// as the longest `min_time` of its jobs and at most as long as the
/// shortest `max_time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Release date: the job's batch may not start earlier.
    pub earliest_start: DateTime<Utc>,
    /// Due date: a batch ending later makes the job tardy.
    pub latest_end: DateTime<Utc>,
    /// Minimum processing time (s).
    pub min_time: i64,
    /// Maximum processing time (s).
    pub max_time: i64,
    /// Capacity units the job occupies in a batch.
    pub size: u32,
    /// Attribute of the job on each eligible machine.
    pub attribute_per_machine: BTreeMap<MachineId, AttributeId>,
    /// Machines permitted to process the job.
    pub eligible_machines: BTreeSet<MachineId>,
}

impl Job {
    /// Creates a job of size 1 with zero processing time and no machines.
    pub fn new(
        id: impl Into<JobId>,
        earliest_start: DateTime<Utc>,
        latest_end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            earliest_start,
            latest_end,
            min_time: 0,
            max_time: 0,
            size: 1,
            attribute_per_machine: BTreeMap::new(),
            eligible_machines: BTreeSet::new(),
        }
    }

    /// Sets the job name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the processing-time bounds (s).
    pub fn with_processing_time(mut self, min_time: i64, max_time: i64) -> Self {
        self.min_time = min_time;
        self.max_time = max_time;
        self
    }

    /// Sets the job size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Makes `machine` eligible and records the job's attribute on it.
    pub fn with_machine(
        mut self,
        machine: impl Into<MachineId>,
        attribute: impl Into<AttributeId>,
    ) -> Self {
        let machine = machine.into();
        self.eligible_machines.insert(machine);
        self.attribute_per_machine.insert(machine, attribute.into());
        self
    }

    /// Whether the job may run on `machine`.
    #[inline]
    pub fn is_eligible(&self, machine: MachineId) -> bool {
        self.eligible_machines.contains(&machine)
    }

    /// Attribute of the job on `machine`, if eligible.
    #[inline]
    pub fn attribute_on(&self, machine: MachineId) -> Option<AttributeId> {
        self.attribute_per_machine.get(&machine).copied()
    }
}
