//! Read-only engine context.
//!
//! Converts an instance into horizon-relative offsets once per run so
//! the simulation loop never touches absolute timestamps.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::shift::{shift_windows, ShiftWindow};
use super::GreedyConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{AttributeId, Instance, Job, Machine, MachineId};
use crate::validation::validate_instance;

/// A job with its release and due dates as offsets.
#[derive(Debug, Clone, Copy)]
pub(crate) struct JobView<'a> {
    pub job: &'a Job,
    /// Release offset (s).
    pub release: i64,
    /// Due offset (s).
    pub due: i64,
}

/// Per-run data shared by the driver, selector and filler.
#[derive(Debug)]
pub(crate) struct EngineContext<'a> {
    pub instance: &'a Instance,
    pub config: GreedyConfig,
    /// Jobs in instance order; the engine refers to them by index.
    pub jobs: Vec<JobView<'a>>,
    windows: BTreeMap<MachineId, Vec<ShiftWindow>>,
    /// Smallest job size of the instance.
    pub min_job_size: u32,
}

impl<'a> EngineContext<'a> {
    /// Validates `instance` and precomputes offsets.
    ///
    /// A non-positive tick is raised to one second.
    pub fn new(instance: &'a Instance, config: GreedyConfig) -> Result<Self> {
        validate_instance(instance).map_err(ScheduleError::InvalidInstance)?;
        let config = config.with_tick(config.tick);

        let jobs = instance
            .jobs
            .iter()
            .map(|job| JobView {
                job,
                release: instance.offset_of(job.earliest_start),
                due: instance.offset_of(job.latest_end),
            })
            .collect();

        let windows = instance
            .machines
            .values()
            .map(|m| (m.id, shift_windows(instance, m)))
            .collect();

        Ok(Self {
            instance,
            config,
            jobs,
            windows,
            min_job_size: instance.min_job_size().unwrap_or(0),
        })
    }

    /// Shift offsets of a machine.
    pub fn windows(&self, machine: MachineId) -> &[ShiftWindow] {
        self.windows.get(&machine).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn machine(&self, id: MachineId) -> Result<&'a Machine> {
        self.instance
            .machine(id)
            .ok_or(ScheduleError::UnknownMachine(id))
    }

    /// Attribute of job `index` on `machine`.
    pub fn attribute_of(&self, index: usize, machine: MachineId) -> Result<AttributeId> {
        let job = self.jobs[index].job;
        job.attribute_on(machine)
            .ok_or(ScheduleError::MissingJobAttribute {
                job: job.id,
                machine,
            })
    }

    /// Job indices by `(due date, size descending, id)`.
    ///
    /// Earliest due date first; among equal due dates the larger job goes
    /// first; the id makes the order total.
    pub fn priority_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.jobs.len()).collect();
        order.sort_by_key(|&i| {
            let view = &self.jobs[i];
            (view.due, Reverse(view.job.size), view.job.id)
        });
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, JobId};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn instance() -> Instance {
        Instance::new(at(1_000), at(5_000))
            .with_machine(Machine::new(1).with_capacity(0, 10).with_shift(at(1_000), at(2_000)))
            .with_attribute(Attribute::new(1).with_setup_times(vec![0]).with_setup_costs(vec![0]))
            .with_job(Job::new(3, at(1_000), at(3_000)).with_size(1).with_machine(1, 1))
            .with_job(Job::new(1, at(1_500), at(3_000)).with_size(4).with_machine(1, 1))
            .with_job(Job::new(2, at(1_000), at(2_000)).with_size(1).with_machine(1, 1))
            .with_job(Job::new(4, at(1_000), at(3_000)).with_size(4).with_machine(1, 1))
    }

    #[test]
    fn test_offsets() {
        let inst = instance();
        let ctx = EngineContext::new(&inst, GreedyConfig::default()).unwrap();
        assert_eq!(ctx.jobs[1].release, 500);
        assert_eq!(ctx.jobs[1].due, 2_000);
        assert_eq!(ctx.windows(MachineId(1)), &[ShiftWindow { start: 0, end: 1_000 }]);
        assert!(ctx.windows(MachineId(9)).is_empty());
        assert_eq!(ctx.min_job_size, 1);
    }

    #[test]
    fn test_priority_order() {
        let inst = instance();
        let ctx = EngineContext::new(&inst, GreedyConfig::default()).unwrap();
        let ids: Vec<JobId> = ctx
            .priority_order()
            .into_iter()
            .map(|i| ctx.jobs[i].job.id)
            .collect();
        // J2 due first; J1 and J4 tie on due date and size, id decides; J3 smallest
        assert_eq!(ids, vec![JobId(2), JobId(1), JobId(4), JobId(3)]);
    }

    #[test]
    fn test_invalid_instance_rejected() {
        let inst = Instance::new(at(0), at(10));
        assert!(matches!(
            EngineContext::new(&inst, GreedyConfig::default()),
            Err(ScheduleError::InvalidInstance(_))
        ));
    }
}
