//! Schedule output.
//!
//! An output is the list of job-to-batch assignments produced by a
//! scheduler plus the batch arena they point into. Downstream checks
//! (objective components, solution checking) read batches through the
//! per-machine ordering of [`Output::batch_dictionary`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AttributeId, Batch, BatchAssignment, BatchId, JobId, MachineId};

/// How far a solution has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolutionType {
    /// Produced by a heuristic and not checked yet.
    #[default]
    UnvalidatedSolution,
    /// Checked, no hard violations.
    ValidSolution,
    /// Checked, at least one hard violation.
    InvalidSolution,
}

/// Assignments of jobs to batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    /// Job placements, in creation order.
    pub assignments: Vec<BatchAssignment>,
    /// Batch arena; batch `k` is stored at index `k - 1`.
    batches: Vec<Batch>,
    /// Checking status.
    pub solution_type: SolutionType,
    /// Horizon start the batch offsets are relative to.
    pub horizon_start: DateTime<Utc>,
}

/// A solution-check finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (job, machine or batch) as displayed id.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of solution violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two batches on one machine overlap, setup time included.
    Overlap,
    /// Batch load above the machine's maximum capacity.
    CapacityExceeded,
    /// Batch load below the machine's minimum capacity.
    BelowMinCapacity,
    /// A job's attribute on the machine differs from the batch attribute.
    AttributeMismatch,
    /// A job runs on a machine it is not eligible for.
    IneligibleMachine,
    /// A batch is not contained in a single shift.
    OutsideShift,
    /// A batch starts before one of its jobs is released.
    EarlyStart,
    /// Batch duration outside a job's processing-time range.
    ProcessingTime,
    /// A job finishes after its due date.
    DeadlineMiss,
    /// A job has no batch.
    Unscheduled,
    /// An assignment references an unknown job, batch, machine or attribute.
    UnknownReference,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.to_string(),
            message: message.into(),
        }
    }

    /// Whether the violation makes the schedule infeasible.
    ///
    /// Tardiness and unscheduled jobs are soft; everything else is hard.
    pub fn is_hard(&self) -> bool {
        !matches!(
            self.violation_type,
            ViolationType::DeadlineMiss | ViolationType::Unscheduled
        )
    }
}

impl Output {
    /// Creates an empty output.
    pub fn new(horizon_start: DateTime<Utc>) -> Self {
        Self {
            assignments: Vec::new(),
            batches: Vec::new(),
            solution_type: SolutionType::UnvalidatedSolution,
            horizon_start,
        }
    }

    /// Opens a new batch and returns its id.
    pub fn open_batch(
        &mut self,
        machine: MachineId,
        attribute: AttributeId,
        start: i64,
        end: i64,
    ) -> BatchId {
        let id = BatchId(self.batches.len() as u32 + 1);
        self.batches.push(Batch {
            id,
            machine,
            start,
            end,
            attribute,
        });
        id
    }

    /// Records that `job` runs in `batch`.
    pub fn assign(&mut self, job: JobId, batch: BatchId) {
        self.assignments.push(BatchAssignment::new(job, batch));
    }

    /// Looks up a batch.
    #[inline]
    pub fn batch(&self, id: BatchId) -> Option<&Batch> {
        (id.get() as usize)
            .checked_sub(1)
            .and_then(|i| self.batches.get(i))
    }

    #[inline]
    pub(crate) fn batch_mut(&mut self, id: BatchId) -> Option<&mut Batch> {
        (id.get() as usize)
            .checked_sub(1)
            .and_then(move |i| self.batches.get_mut(i))
    }

    /// All distinct batches, by id.
    #[inline]
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Number of batches.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Jobs placed in `batch`, in assignment order.
    pub fn jobs_in_batch(&self, batch: BatchId) -> Vec<JobId> {
        self.assignments
            .iter()
            .filter(|a| a.batch == batch)
            .map(|a| a.job)
            .collect()
    }

    /// Batch that holds `job`.
    pub fn batch_of_job(&self, job: JobId) -> Option<&Batch> {
        self.assignments
            .iter()
            .find(|a| a.job == job)
            .and_then(|a| self.batch(a.batch))
    }

    /// Whether `job` was scheduled.
    pub fn is_scheduled(&self, job: JobId) -> bool {
        self.assignments.iter().any(|a| a.job == job)
    }

    /// Batches of one machine ordered by start time, then id.
    pub fn batches_on_machine(&self, machine: MachineId) -> Vec<&Batch> {
        let mut batches: Vec<&Batch> = self
            .batches
            .iter()
            .filter(|b| b.machine == machine)
            .collect();
        batches.sort_by_key(|b| (b.start, b.id));
        batches
    }

    /// Batches keyed by `(machine, position on machine)`.
    ///
    /// Positions are 0-based and follow start time, ties by batch id.
    pub fn batch_dictionary(&self) -> BTreeMap<(MachineId, usize), BatchId> {
        let mut by_machine: BTreeMap<MachineId, Vec<&Batch>> = BTreeMap::new();
        for batch in &self.batches {
            by_machine.entry(batch.machine).or_default().push(batch);
        }

        let mut dictionary = BTreeMap::new();
        for (machine, mut batches) in by_machine {
            batches.sort_by_key(|b| (b.start, b.id));
            for (position, batch) in batches.into_iter().enumerate() {
                dictionary.insert((machine, position), batch.id);
            }
        }
        dictionary
    }

    /// Absolute start time of a batch.
    pub fn start_time(&self, batch: &Batch) -> DateTime<Utc> {
        self.horizon_start + Duration::seconds(batch.start)
    }

    /// Absolute end time of a batch.
    pub fn end_time(&self, batch: &Batch) -> DateTime<Utc> {
        self.horizon_start + Duration::seconds(batch.end)
    }

    /// Latest batch end (s from horizon start), 0 when empty.
    pub fn makespan(&self) -> i64 {
        self.batches.iter().map(|b| b.end).max().unwrap_or(0)
    }
}
