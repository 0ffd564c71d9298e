//! Scheduler errors.
//!
//! "Cannot schedule this job" is never an error: unscheduled jobs are
//! simply absent from the output. Errors are reserved for malformed
//! input and for misuse of the entry points.

use thiserror::Error;

use crate::models::{AttributeId, BatchId, JobId, MachineId};
use crate::validation::ValidationError;

/// Errors raised by the scheduling entry points.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The instance failed validation.
    #[error("invalid instance: {}", summarize(.0))]
    InvalidInstance(Vec<ValidationError>),
    /// The single-job probe was called on an instance without exactly one job.
    #[error("single-job probe expects exactly one job, got {0}")]
    ProbeJobCount(usize),
    /// A machine id has no machine.
    #[error("unknown machine {0}")]
    UnknownMachine(MachineId),
    /// An attribute id has no attribute or no setup row entry.
    #[error("unknown attribute {0}")]
    UnknownAttribute(AttributeId),
    /// A batch id is not in the output's arena.
    #[error("unknown batch {0}")]
    UnknownBatch(BatchId),
    /// A job is eligible for a machine but carries no attribute for it.
    #[error("job {job} has no attribute on machine {machine}")]
    MissingJobAttribute { job: JobId, machine: MachineId },
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Result alias for scheduler operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
