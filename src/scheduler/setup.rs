//! Setup-time resolution.
//!
//! A machine's previous attribute is the attribute of its last batch,
//! or its configured initial state before the first batch. Without
//! either the setup is free.

use crate::error::{Result, ScheduleError};
use crate::models::{AttributeId, BatchId, Instance, Job, MachineId, Output};

/// Attribute a machine is set up for before its next batch.
pub fn previous_attribute(
    instance: &Instance,
    output: &Output,
    last_batch: Option<BatchId>,
    machine: MachineId,
) -> Option<AttributeId> {
    last_batch
        .and_then(|id| output.batch(id))
        .map(|b| b.attribute)
        .or_else(|| instance.initial_states.get(&machine).copied())
}

/// Setup time (s) for switching from `previous` to `next`.
pub fn setup_time(
    instance: &Instance,
    previous: Option<AttributeId>,
    next: AttributeId,
) -> Result<i64> {
    lookup(instance, previous, next, Instance::setup_time_between)
}

/// Setup cost for switching from `previous` to `next`.
pub fn setup_cost(
    instance: &Instance,
    previous: Option<AttributeId>,
    next: AttributeId,
) -> Result<i64> {
    lookup(instance, previous, next, Instance::setup_cost_between)
}

/// Setup time `job` would incur on `machine` after `previous`.
///
/// Jobs carry a different attribute per machine, so this has to be
/// evaluated for each candidate machine separately.
pub fn job_setup_time(
    instance: &Instance,
    previous: Option<AttributeId>,
    machine: MachineId,
    job: &Job,
) -> Result<i64> {
    let next = job
        .attribute_on(machine)
        .ok_or(ScheduleError::MissingJobAttribute {
            job: job.id,
            machine,
        })?;
    setup_time(instance, previous, next)
}

fn lookup(
    instance: &Instance,
    previous: Option<AttributeId>,
    next: AttributeId,
    between: impl Fn(&Instance, AttributeId, AttributeId) -> Option<i64>,
) -> Result<i64> {
    let Some(previous) = previous else {
        return Ok(0);
    };
    between(instance, previous, next).ok_or_else(|| {
        if instance.attribute_position(next).is_none() {
            ScheduleError::UnknownAttribute(next)
        } else {
            ScheduleError::UnknownAttribute(previous)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, Machine};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn instance() -> Instance {
        Instance::new(at(0), at(10_000))
            .with_machine(Machine::new(1).with_capacity(0, 5))
            .with_machine(Machine::new(2).with_capacity(0, 5))
            .with_attribute(
                Attribute::new(1)
                    .with_setup_times(vec![0, 300])
                    .with_setup_costs(vec![0, 4]),
            )
            .with_attribute(
                Attribute::new(2)
                    .with_setup_times(vec![600, 0])
                    .with_setup_costs(vec![8, 0]),
            )
            .with_initial_state(2, 2)
    }

    #[test]
    fn test_no_history_is_free() {
        let inst = instance();
        let out = Output::new(inst.horizon_start);
        let prev = previous_attribute(&inst, &out, None, MachineId(1));
        assert_eq!(prev, None);
        assert_eq!(setup_time(&inst, prev, AttributeId(2)).unwrap(), 0);
    }

    #[test]
    fn test_initial_state_used_first() {
        let inst = instance();
        let out = Output::new(inst.horizon_start);
        let prev = previous_attribute(&inst, &out, None, MachineId(2));
        assert_eq!(prev, Some(AttributeId(2)));
        assert_eq!(setup_time(&inst, prev, AttributeId(1)).unwrap(), 600);
        assert_eq!(setup_cost(&inst, prev, AttributeId(1)).unwrap(), 8);
    }

    #[test]
    fn test_last_batch_overrides_initial_state() {
        let inst = instance();
        let mut out = Output::new(inst.horizon_start);
        let b = out.open_batch(MachineId(2), AttributeId(1), 0, 60);
        let prev = previous_attribute(&inst, &out, Some(b), MachineId(2));
        assert_eq!(prev, Some(AttributeId(1)));
        assert_eq!(setup_time(&inst, prev, AttributeId(2)).unwrap(), 300);
    }

    #[test]
    fn test_job_attribute_per_machine() {
        let inst = instance();
        let job = Job::new(1, at(0), at(100))
            .with_machine(1, 2)
            .with_machine(2, 1);
        let prev = Some(AttributeId(1));
        assert_eq!(job_setup_time(&inst, prev, MachineId(1), &job).unwrap(), 300);
        assert_eq!(job_setup_time(&inst, prev, MachineId(2), &job).unwrap(), 0);
        assert!(matches!(
            job_setup_time(&inst, prev, MachineId(3), &job),
            Err(ScheduleError::MissingJobAttribute { .. })
        ));
    }

    #[test]
    fn test_unknown_attribute() {
        let inst = instance();
        assert!(matches!(
            setup_time(&inst, Some(AttributeId(9)), AttributeId(1)),
            Err(ScheduleError::UnknownAttribute(AttributeId(9)))
        ));
        assert!(matches!(
            setup_time(&inst, Some(AttributeId(1)), AttributeId(9)),
            Err(ScheduleError::UnknownAttribute(AttributeId(9)))
        ));
    }
}
