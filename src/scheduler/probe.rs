//! Single-job feasibility probe.
//!
//! A reduced driver that answers "can this job ever be placed?". It walks
//! the clock exactly like [`GreedyScheduler::run`] but has no competing
//! jobs, ignores setup times and never fills batches.

use std::collections::BTreeMap;

use tracing::debug;

use super::context::EngineContext;
use super::shift::ShiftState;
use super::GreedyScheduler;
use crate::error::{Result, ScheduleError};
use crate::models::{Instance, MachineId, Output};

impl GreedyScheduler {
    /// Places the only job of `instance` on the first machine that can
    /// hold it.
    ///
    /// At the first tick where the job is released, machines are tried in
    /// ascending id order; the first eligible, on-shift machine with enough
    /// capacity and room for `min_time` in its shift gets a batch
    /// `[now, now + min_time)`. Returns an empty output when no tick up to
    /// the horizon end works.
    ///
    /// # Errors
    /// `ScheduleError::ProbeJobCount` unless the instance has exactly one
    /// job, `ScheduleError::InvalidInstance` when validation fails.
    pub fn probe(&self, instance: &Instance) -> Result<Output> {
        if instance.jobs.len() != 1 {
            return Err(ScheduleError::ProbeJobCount(instance.jobs.len()));
        }

        let ctx = EngineContext::new(instance, *self.config())?;
        let view = ctx.jobs[0];
        let job = view.job;
        let mut output = Output::new(instance.horizon_start);
        let mut shifts: BTreeMap<MachineId, ShiftState> = instance
            .machines
            .keys()
            .map(|&m| (m, ShiftState::default()))
            .collect();

        let mut now = 0;
        while now <= instance.horizon_length() {
            for (machine, state) in shifts.iter_mut() {
                state.advance(ctx.windows(*machine), now);
            }

            if view.release <= now {
                for (&machine_id, state) in &shifts {
                    if !job.is_eligible(machine_id) {
                        continue;
                    }
                    let Some(shift_end) = state.shift_end(ctx.windows(machine_id)) else {
                        continue;
                    };
                    let machine = ctx.machine(machine_id)?;
                    if machine.max_cap < job.size || now + job.min_time > shift_end {
                        continue;
                    }

                    let attribute = ctx.attribute_of(0, machine_id)?;
                    let batch = output.open_batch(machine_id, attribute, now, now + job.min_time);
                    output.assign(job.id, batch);
                    debug!(job = %job.id, machine = %machine_id, start = now, "probe placed job");
                    return Ok(output);
                }
            }

            now += ctx.config.tick;
        }

        debug!(job = %job.id, "probe found no placement");
        Ok(output)
    }
}
