//! Satisfiability check.
//!
//! Probes every job in isolation. A job the probe cannot place will never
//! be scheduled, whatever the other jobs do; a job whose earliest probe
//! placement already ends after its due date will always be tardy.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{GreedyConfig, GreedyScheduler};
use crate::error::{Result, ScheduleError};
use crate::models::{Instance, JobId};
use crate::validation::validate_instance;

/// Outcome of [`check_satisfiability`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfiabilityReport {
    /// Number of jobs probed.
    pub checked: usize,
    /// Jobs that cannot be placed on any machine within the horizon.
    pub unschedulable: Vec<JobId>,
    /// Jobs that can be placed but never before their due date.
    pub always_tardy: Vec<JobId>,
}

impl SatisfiabilityReport {
    /// Whether every job can be placed.
    pub fn is_satisfiable(&self) -> bool {
        self.unschedulable.is_empty()
    }
}

impl fmt::Display for SatisfiabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_satisfiable() {
            write!(f, "all {} jobs can be scheduled", self.checked)?;
        } else {
            write!(
                f,
                "{} of {} jobs cannot be scheduled: {}",
                self.unschedulable.len(),
                self.checked,
                join(&self.unschedulable)
            )?;
        }
        if !self.always_tardy.is_empty() {
            write!(
                f,
                "; {} always tardy: {}",
                self.always_tardy.len(),
                join(&self.always_tardy)
            )?;
        }
        Ok(())
    }
}

fn join(ids: &[JobId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Probes each job of `instance` on its own.
///
/// # Errors
/// `ScheduleError::InvalidInstance` when the full instance fails
/// validation.
pub fn check_satisfiability(instance: &Instance, config: GreedyConfig) -> Result<SatisfiabilityReport> {
    validate_instance(instance).map_err(ScheduleError::InvalidInstance)?;

    let scheduler = GreedyScheduler::new().with_config(config);
    let mut report = SatisfiabilityReport {
        checked: instance.jobs.len(),
        ..SatisfiabilityReport::default()
    };

    for job in &instance.jobs {
        let output = scheduler.probe(&instance.single_job(job))?;
        match output.batch_of_job(job.id) {
            None => {
                warn!(job = %job.id, "job cannot be scheduled");
                report.unschedulable.push(job.id);
            }
            Some(batch) if output.end_time(batch) > job.latest_end => {
                warn!(job = %job.id, "job is always tardy");
                report.always_tardy.push(job.id);
            }
            Some(_) => {}
        }
    }

    info!(
        checked = report.checked,
        unschedulable = report.unschedulable.len(),
        always_tardy = report.always_tardy.len(),
        "satisfiability check finished"
    );
    Ok(report)
}
