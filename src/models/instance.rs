//! Problem instance.
//!
//! Bundles machines, jobs, attributes, initial machine states and the
//! scheduling horizon. The scheduler never mutates an instance.
//!
//! # Time Model
//! Jobs and shifts carry absolute UTC timestamps. The scheduler works on
//! integer seconds relative to `horizon_start`; `offset_of` is the only
//! conversion it uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Attribute, AttributeId, Job, JobId, Machine, MachineId};

/// A batch scheduling problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Machines by id.
    pub machines: BTreeMap<MachineId, Machine>,
    /// Jobs in input order.
    pub jobs: Vec<Job>,
    /// Attributes by id. Key order defines setup-row positions.
    pub attributes: BTreeMap<AttributeId, Attribute>,
    /// Attribute a machine is set up for before its first batch.
    #[serde(default)]
    pub initial_states: BTreeMap<MachineId, AttributeId>,
    /// Start of the scheduling horizon.
    pub horizon_start: DateTime<Utc>,
    /// End of the scheduling horizon.
    pub horizon_end: DateTime<Utc>,
}

impl Instance {
    /// Creates an empty instance over `[horizon_start, horizon_end]`.
    pub fn new(horizon_start: DateTime<Utc>, horizon_end: DateTime<Utc>) -> Self {
        Self {
            machines: BTreeMap::new(),
            jobs: Vec::new(),
            attributes: BTreeMap::new(),
            initial_states: BTreeMap::new(),
            horizon_start,
            horizon_end,
        }
    }

    /// Adds a machine.
    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machines.insert(machine.id, machine);
        self
    }

    /// Adds a job.
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute.id, attribute);
        self
    }

    /// Sets the initial attribute of a machine.
    pub fn with_initial_state(
        mut self,
        machine: impl Into<MachineId>,
        attribute: impl Into<AttributeId>,
    ) -> Self {
        self.initial_states.insert(machine.into(), attribute.into());
        self
    }

    /// Looks up a machine.
    #[inline]
    pub fn machine(&self, id: MachineId) -> Option<&Machine> {
        self.machines.get(&id)
    }

    /// Looks up an attribute.
    #[inline]
    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.get(&id)
    }

    /// Looks up a job by id.
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Position of an attribute in ascending id order (setup-row index).
    pub fn attribute_position(&self, id: AttributeId) -> Option<usize> {
        self.attributes.keys().position(|&k| k == id)
    }

    /// Setup time (s) for switching a machine from `from` to `to`.
    pub fn setup_time_between(&self, from: AttributeId, to: AttributeId) -> Option<i64> {
        let position = self.attribute_position(to)?;
        self.attribute(from)?.setup_time_to(position)
    }

    /// Setup cost for switching a machine from `from` to `to`.
    pub fn setup_cost_between(&self, from: AttributeId, to: AttributeId) -> Option<i64> {
        let position = self.attribute_position(to)?;
        self.attribute(from)?.setup_cost_to(position)
    }

    /// Seconds from the horizon start to `at`.
    #[inline]
    pub fn offset_of(&self, at: DateTime<Utc>) -> i64 {
        (at - self.horizon_start).num_seconds()
    }

    /// Length of the horizon in seconds.
    #[inline]
    pub fn horizon_length(&self) -> i64 {
        self.offset_of(self.horizon_end)
    }

    /// Smallest job size, or `None` without jobs.
    pub fn min_job_size(&self) -> Option<u32> {
        self.jobs.iter().map(|j| j.size).min()
    }

    /// Copy of this instance that contains only `job`.
    ///
    /// Used to probe each job in isolation.
    pub fn single_job(&self, job: &Job) -> Self {
        Self {
            machines: self.machines.clone(),
            jobs: vec![job.clone()],
            attributes: self.attributes.clone(),
            initial_states: self.initial_states.clone(),
            horizon_start: self.horizon_start,
            horizon_end: self.horizon_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn sample() -> Instance {
        Instance::new(at(1_000), at(10_000))
            .with_machine(Machine::new(1).with_capacity(0, 5))
            .with_attribute(Attribute::new(20).with_setup_times(vec![0, 120]).with_setup_costs(vec![0, 7]))
            .with_attribute(Attribute::new(10).with_setup_times(vec![0, 60]).with_setup_costs(vec![0, 3]))
            .with_job(Job::new(1, at(1_000), at(5_000)).with_size(4).with_machine(1, 10))
            .with_job(Job::new(2, at(2_000), at(5_000)).with_size(2).with_machine(1, 20))
            .with_initial_state(1, 10)
    }

    #[test]
    fn test_attribute_position_sorted() {
        let inst = sample();
        assert_eq!(inst.attribute_position(AttributeId(10)), Some(0));
        assert_eq!(inst.attribute_position(AttributeId(20)), Some(1));
        assert_eq!(inst.attribute_position(AttributeId(30)), None);
    }

    #[test]
    fn test_setup_lookup() {
        let inst = sample();
        assert_eq!(inst.setup_time_between(AttributeId(10), AttributeId(20)), Some(60));
        assert_eq!(inst.setup_time_between(AttributeId(20), AttributeId(20)), Some(120));
        assert_eq!(inst.setup_cost_between(AttributeId(10), AttributeId(20)), Some(3));
        assert_eq!(inst.setup_time_between(AttributeId(99), AttributeId(20)), None);
    }

    #[test]
    fn test_offsets() {
        let inst = sample();
        assert_eq!(inst.offset_of(at(1_000)), 0);
        assert_eq!(inst.offset_of(at(1_600)), 600);
        assert_eq!(inst.horizon_length(), 9_000);
    }

    #[test]
    fn test_min_job_size_and_single_job() {
        let inst = sample();
        assert_eq!(inst.min_job_size(), Some(2));

        let sub = inst.single_job(&inst.jobs[1]);
        assert_eq!(sub.jobs.len(), 1);
        assert_eq!(sub.jobs[0].id, JobId(2));
        assert_eq!(sub.machines.len(), 1);
        assert_eq!(sub.initial_states.get(&MachineId(1)), Some(&AttributeId(10)));
    }
}
