//! Best-machine selection.
//!
//! Among the machines that could take a job right now, prefer the one
//! with the smallest setup time whose current shift still leaves room
//! for the setup plus the job's minimum processing time.

use tracing::trace;

use super::setup::job_setup_time;
use crate::error::Result;
use crate::models::{AttributeId, Instance, Job, MachineId};

/// A machine that is free, on shift, eligible and large enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineCandidate {
    /// Candidate machine.
    pub machine: MachineId,
    /// Attribute the machine is currently set up for.
    pub previous: Option<AttributeId>,
    /// End offset of the machine's active shift (s).
    pub shift_end: i64,
}

/// Outcome of a successful selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineChoice {
    /// Chosen machine.
    pub machine: MachineId,
    /// Setup time before the batch (s).
    pub setup_time: i64,
    /// End offset of the machine's active shift (s).
    pub shift_end: i64,
}

/// Picks the candidate with minimal setup time that fits its shift.
///
/// Candidates are tried by `(setup time, machine id)`, so equal setups
/// resolve to the lowest machine id. Returns `None` when no candidate
/// can finish `job` within its shift; the caller then skips the job for
/// the current step only.
pub fn select_machine(
    instance: &Instance,
    job: &Job,
    now: i64,
    candidates: &[MachineCandidate],
) -> Result<Option<MachineChoice>> {
    let mut ranked = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let setup_time = job_setup_time(instance, candidate.previous, candidate.machine, job)?;
        ranked.push((setup_time, candidate));
    }
    ranked.sort_by_key(|(setup_time, c)| (*setup_time, c.machine));

    for (setup_time, candidate) in ranked {
        if now + setup_time + job.min_time <= candidate.shift_end {
            return Ok(Some(MachineChoice {
                machine: candidate.machine,
                setup_time,
                shift_end: candidate.shift_end,
            }));
        }
        trace!(
            job = %job.id,
            machine = %candidate.machine,
            setup_time,
            "job does not fit the remaining shift"
        );
    }

    Ok(None)
}
