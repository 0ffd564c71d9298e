//! Schedule quality metrics (KPIs).
//!
//! Computes the raw objective components of a batch schedule. Weighting
//! them into a single objective is left to the caller.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest batch end, from horizon start |
//! | Processing time | Sum of batch durations |
//! | Setup time / cost | Sum over consecutive batches per machine |
//! | Total tardiness | Sum of max(0, batch end - due date) |
//! | Maximum tardiness | Largest single delay |
//! | On-time rate | Fraction of scheduled jobs meeting their due date |
//!
//! The first batch of a machine is charged the setup from the machine's
//! initial state, if it has one.

use serde::{Deserialize, Serialize};

use super::setup::{setup_cost, setup_time};
use crate::error::{Result, ScheduleError};
use crate::models::{Instance, Output};

/// Schedule performance indicators.
///
/// All time values are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Number of batches.
    pub batch_count: usize,
    /// Jobs with an assignment.
    pub scheduled_jobs: usize,
    /// Jobs without an assignment.
    pub unscheduled_jobs: usize,
    /// Latest batch end (s from horizon start).
    pub makespan: i64,
    /// Sum of batch durations (s).
    pub total_processing_time: i64,
    /// Sum of setup times between consecutive batches (s).
    pub total_setup_time: i64,
    /// Sum of setup costs between consecutive batches.
    pub total_setup_cost: i64,
    /// Sum of tardiness across scheduled jobs (s).
    pub total_tardiness: i64,
    /// Maximum tardiness of any single job (s).
    pub max_tardiness: i64,
    /// Scheduled jobs finishing after their due date.
    pub tardy_jobs: usize,
    /// Fraction of scheduled jobs finishing on time (0.0..1.0).
    pub on_time_rate: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from an output and its instance.
    ///
    /// # Errors
    /// `ScheduleError::UnknownAttribute` if a batch or initial state names
    /// an attribute missing from the instance.
    pub fn calculate(instance: &Instance, output: &Output) -> Result<Self> {
        let mut kpi = Self {
            batch_count: output.batch_count(),
            makespan: output.makespan(),
            total_processing_time: output.batches().iter().map(|b| b.duration()).sum(),
            ..Self::default()
        };

        let mut previous = None;
        let mut current_machine = None;
        for (&(machine, _), &id) in &output.batch_dictionary() {
            let batch = output.batch(id).ok_or(ScheduleError::UnknownBatch(id))?;
            if current_machine != Some(machine) {
                current_machine = Some(machine);
                previous = instance.initial_states.get(&machine).copied();
            }
            kpi.total_setup_time += setup_time(instance, previous, batch.attribute)?;
            kpi.total_setup_cost += setup_cost(instance, previous, batch.attribute)?;
            previous = Some(batch.attribute);
        }

        let mut on_time = 0usize;
        for job in &instance.jobs {
            let Some(batch) = output.batch_of_job(job.id) else {
                kpi.unscheduled_jobs += 1;
                continue;
            };
            kpi.scheduled_jobs += 1;

            let tardiness = (batch.end - instance.offset_of(job.latest_end)).max(0);
            if tardiness > 0 {
                kpi.tardy_jobs += 1;
                kpi.total_tardiness += tardiness;
                kpi.max_tardiness = kpi.max_tardiness.max(tardiness);
            } else {
                on_time += 1;
            }
        }

        kpi.on_time_rate = if kpi.scheduled_jobs == 0 {
            1.0
        } else {
            on_time as f64 / kpi.scheduled_jobs as f64
        };

        Ok(kpi)
    }

    /// Whether every job is scheduled and on time.
    pub fn is_perfect(&self) -> bool {
        self.unscheduled_jobs == 0 && self.tardy_jobs == 0
    }
}
