//! Batches and batch assignments.
//!
//! A batch is a group of jobs processed together on one machine over one
//! contiguous interval. Batches live in the output's arena and are
//! referenced by id, so every assignment of a batch sees the same times.

use serde::{Deserialize, Serialize};

use super::{AttributeId, BatchId, JobId, MachineId};

/// A batch on a machine.
///
/// Times are seconds relative to the horizon start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Batch identifier (1-based).
    pub id: BatchId,
    /// Machine processing the batch.
    pub machine: MachineId,
    /// Start offset (s).
    pub start: i64,
    /// End offset (s).
    pub end: i64,
    /// Attribute shared by every job of the batch on `machine`.
    pub attribute: AttributeId,
}

impl Batch {
    /// Processing duration (s).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether two batches share any instant of processing time.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Placement of one job into one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAssignment {
    /// Assigned job.
    pub job: JobId,
    /// Batch the job is placed in.
    pub batch: BatchId,
}

impl BatchAssignment {
    /// Creates a new assignment.
    pub fn new(job: JobId, batch: BatchId) -> Self {
        Self { job, batch }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(id: u32, start: i64, end: i64) -> Batch {
        Batch {
            id: BatchId(id),
            machine: MachineId(1),
            start,
            end,
            attribute: AttributeId(1),
        }
    }

    #[test]
    fn test_batch_duration() {
        assert_eq!(batch(1, 60, 660).duration(), 600);
    }

    #[test]
    fn test_batch_overlap() {
        let a = batch(1, 0, 100);
        assert!(a.overlaps(&batch(2, 50, 150)));
        assert!(!a.overlaps(&batch(3, 100, 200))); // back to back
    }
}
