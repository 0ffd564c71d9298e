//! Time-stepped greedy batch scheduler.
//!
//! # Algorithm
//!
//! 1. Order jobs by due date, larger size first on ties, then id.
//! 2. Advance a horizon-relative clock tick by tick, refreshing each
//!    machine's shift state before looking at availability.
//! 3. At each tick, walk the released unscheduled jobs in priority order.
//!    For each job, collect the machines that are free, on shift, eligible
//!    and large enough, and let the selector pick the one with minimal
//!    setup time that still fits the shift.
//! 4. Open a batch on that machine starting after the setup, then let the
//!    filler pack further compatible jobs into it.
//! 5. Stop when every job is scheduled or the clock passes the horizon.
//!
//! A job without a feasible machine is only skipped for the current tick;
//! it is reconsidered at every later tick. Jobs never placed by the end of
//! the horizon are absent from the output.
//!
//! # Complexity
//! O(T * n * (m log m + n)) where T = ticks, n = jobs, m = machines.

use std::collections::BTreeMap;

use tracing::{debug, info, info_span};

use super::context::EngineContext;
use super::filler::fill_batch;
use super::selector::{select_machine, MachineCandidate};
use super::setup::previous_attribute;
use super::shift::ShiftState;
use super::GreedyConfig;
use crate::error::Result;
use crate::models::{BatchId, Instance, MachineId, Output};

/// Greedy batch scheduler.
///
/// Produces a feasible, not necessarily optimal schedule in a single
/// deterministic pass. Never backtracks and never reopens a batch.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use oven_batch::models::{Attribute, Instance, Job, Machine};
/// use oven_batch::scheduler::GreedyScheduler;
///
/// let t0 = Utc.timestamp_opt(0, 0).unwrap();
/// let t1 = Utc.timestamp_opt(86_400, 0).unwrap();
/// let instance = Instance::new(t0, t1)
///     .with_machine(Machine::new(1).with_capacity(0, 5).with_shift(t0, t1))
///     .with_attribute(Attribute::new(1).with_setup_times(vec![0]).with_setup_costs(vec![0]))
///     .with_job(Job::new(1, t0, t1).with_processing_time(600, 900).with_machine(1, 1));
///
/// let output = GreedyScheduler::new().run(&instance).unwrap();
/// assert_eq!(output.assignment_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    config: GreedyConfig,
}

/// Mutable state of one driver run.
#[derive(Debug)]
struct DriverState {
    /// Simulation clock (s from horizon start).
    now: i64,
    shifts: BTreeMap<MachineId, ShiftState>,
    last_batch: BTreeMap<MachineId, BatchId>,
    /// Unscheduled job indices in priority order.
    unscheduled: Vec<usize>,
}

impl DriverState {
    fn new(ctx: &EngineContext<'_>) -> Self {
        Self {
            now: 0,
            shifts: ctx
                .instance
                .machines
                .keys()
                .map(|&m| (m, ShiftState::default()))
                .collect(),
            last_batch: BTreeMap::new(),
            unscheduled: ctx.priority_order(),
        }
    }

    fn refresh_shifts(&mut self, ctx: &EngineContext<'_>) {
        for (machine, state) in self.shifts.iter_mut() {
            state.advance(ctx.windows(*machine), self.now);
        }
    }

    fn is_busy(&self, output: &Output, machine: MachineId) -> bool {
        self.last_batch
            .get(&machine)
            .and_then(|&id| output.batch(id))
            .is_some_and(|b| b.end > self.now)
    }

    fn is_unscheduled(&self, job: usize) -> bool {
        self.unscheduled.contains(&job)
    }

    /// Machines that could start `job` now.
    fn machine_candidates(
        &self,
        ctx: &EngineContext<'_>,
        output: &Output,
        job: usize,
    ) -> Result<Vec<MachineCandidate>> {
        let job = ctx.jobs[job].job;
        let mut candidates = Vec::new();

        for &machine_id in &job.eligible_machines {
            let machine = ctx.machine(machine_id)?;
            let state = self.shifts.get(&machine_id).copied().unwrap_or_default();
            let Some(shift_end) = state.shift_end(ctx.windows(machine_id)) else {
                continue;
            };
            if self.is_busy(output, machine_id) || machine.max_cap < job.size {
                continue;
            }

            candidates.push(MachineCandidate {
                machine: machine_id,
                previous: previous_attribute(
                    ctx.instance,
                    output,
                    self.last_batch.get(&machine_id).copied(),
                    machine_id,
                ),
                shift_end,
            });
        }

        Ok(candidates)
    }
}

impl GreedyScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: GreedyConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &GreedyConfig {
        &self.config
    }

    /// Schedules every job of `instance` it can.
    ///
    /// # Errors
    /// `ScheduleError::InvalidInstance` when the instance fails validation.
    /// Jobs that cannot be placed are not an error; they are missing from
    /// the returned output.
    pub fn run(&self, instance: &Instance) -> Result<Output> {
        let _span = info_span!("greedy", jobs = instance.jobs.len()).entered();

        let ctx = EngineContext::new(instance, self.config)?;
        let mut output = Output::new(instance.horizon_start);
        let mut state = DriverState::new(&ctx);
        let horizon = instance.horizon_length();

        while !state.unscheduled.is_empty() && state.now <= horizon {
            state.refresh_shifts(&ctx);

            let released: Vec<usize> = state
                .unscheduled
                .iter()
                .copied()
                .filter(|&j| ctx.jobs[j].release <= state.now)
                .collect();

            for job in released {
                // May have been packed into a batch earlier in this tick
                if !state.is_unscheduled(job) {
                    continue;
                }
                self.assign(&ctx, &mut state, &mut output, job)?;
            }

            state.now += ctx.config.tick;
        }

        info!(
            scheduled = instance.jobs.len() - state.unscheduled.len(),
            unscheduled = state.unscheduled.len(),
            batches = output.batch_count(),
            "greedy run finished"
        );
        Ok(output)
    }

    /// Tries to open a batch for `job` at the current tick.
    fn assign(
        &self,
        ctx: &EngineContext<'_>,
        state: &mut DriverState,
        output: &mut Output,
        job: usize,
    ) -> Result<()> {
        let candidates = state.machine_candidates(ctx, output, job)?;
        if candidates.is_empty() {
            return Ok(());
        }

        let view = ctx.jobs[job];
        let Some(choice) = select_machine(ctx.instance, view.job, state.now, &candidates)? else {
            return Ok(());
        };

        state.unscheduled.retain(|&j| j != job);

        let attribute = ctx.attribute_of(job, choice.machine)?;
        let start = state.now + choice.setup_time;
        let batch = output.open_batch(choice.machine, attribute, start, start + view.job.min_time);
        output.assign(view.job.id, batch);
        state.last_batch.insert(choice.machine, batch);

        let filled = fill_batch(ctx, output, batch, job, choice.shift_end, &mut state.unscheduled)?;

        if let Some(b) = output.batch(batch) {
            debug!(
                batch = %batch,
                machine = %choice.machine,
                setup = choice.setup_time,
                start = b.start,
                end = b.end,
                jobs = filled.len() + 1,
                "batch created"
            );
        }
        Ok(())
    }
}
