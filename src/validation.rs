//! Instance validation and solution checking.
//!
//! [`validate_instance`] checks structural integrity of an instance
//! before scheduling. It detects:
//! - An empty job list
//! - Duplicate job IDs
//! - Jobs without eligible machines
//! - Missing machine and attribute references
//! - Inconsistent processing-time ranges and time windows
//! - Unordered or overlapping shifts
//! - Setup rows whose length does not match the attribute count
//!
//! [`check_solution`] counts constraint violations of a finished output
//! against its instance. The scheduler never calls it.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use crate::models::{
    Batch, BatchId, Instance, Job, JobId, MachineId, Output, SolutionType, Violation,
    ViolationType,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no jobs.
    EmptyInstance,
    /// Two jobs share the same ID.
    DuplicateId,
    /// A job has no eligible machine.
    NoEligibleMachine,
    /// A job or initial state references a machine that doesn't exist.
    InvalidMachineReference,
    /// A job or initial state references an attribute that doesn't exist.
    InvalidAttributeReference,
    /// Eligible machines and per-machine attributes disagree.
    AttributeMapMismatch,
    /// `min_time > max_time` or a negative processing time.
    InvalidProcessingTime,
    /// `earliest_start > latest_end`.
    InvalidTimeWindow,
    /// `min_cap > max_cap`.
    InvalidCapacity,
    /// Shifts are empty intervals, unordered or overlapping.
    InvalidShifts,
    /// A setup row does not cover every attribute.
    SetupRowLength,
    /// The horizon ends before it starts.
    InvalidHorizon,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an instance before scheduling.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    if instance.horizon_end < instance.horizon_start {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHorizon,
            "Horizon ends before it starts",
        ));
    }

    if instance.jobs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no jobs",
        ));
    }

    let mut job_ids = HashSet::new();
    for job in &instance.jobs {
        if !job_ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }
        validate_job(instance, job, &mut errors);
    }

    for (id, machine) in &instance.machines {
        if machine.min_cap > machine.max_cap {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!(
                    "Machine {id} has min_cap {} above max_cap {}",
                    machine.min_cap, machine.max_cap
                ),
            ));
        }

        for shift in &machine.shifts {
            if shift.end < shift.start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidShifts,
                    format!("Machine {id} has a shift ending before it starts"),
                ));
            }
        }
        if machine
            .shifts
            .windows(2)
            .any(|w| w[1].start < w[0].start || w[0].overlaps(&w[1]))
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidShifts,
                format!("Machine {id} has unordered or overlapping shifts"),
            ));
        }
    }

    let attribute_count = instance.attributes.len();
    for (id, attribute) in &instance.attributes {
        if attribute.setup_times.len() != attribute_count
            || attribute.setup_costs.len() != attribute_count
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::SetupRowLength,
                format!(
                    "Attribute {id} has {} setup times and {} setup costs, expected {attribute_count}",
                    attribute.setup_times.len(),
                    attribute.setup_costs.len()
                ),
            ));
        }
    }

    for (machine, attribute) in &instance.initial_states {
        if !instance.machines.contains_key(machine) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMachineReference,
                format!("Initial state references unknown machine {machine}"),
            ));
        }
        if !instance.attributes.contains_key(attribute) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidAttributeReference,
                format!("Initial state of {machine} references unknown attribute {attribute}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_job(instance: &Instance, job: &Job, errors: &mut Vec<ValidationError>) {
    if job.eligible_machines.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoEligibleMachine,
            format!("Job {} has no eligible machine", job.id),
        ));
    }

    if job.min_time < 0 || job.min_time > job.max_time {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidProcessingTime,
            format!(
                "Job {} has processing time range [{}, {}]",
                job.id, job.min_time, job.max_time
            ),
        ));
    }

    if job.earliest_start > job.latest_end {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeWindow,
            format!("Job {} is due before its release", job.id),
        ));
    }

    for machine in &job.eligible_machines {
        if !instance.machines.contains_key(machine) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMachineReference,
                format!("Job {} references unknown machine {machine}", job.id),
            ));
        }
        if !job.attribute_per_machine.contains_key(machine) {
            errors.push(ValidationError::new(
                ValidationErrorKind::AttributeMapMismatch,
                format!("Job {} has no attribute on eligible machine {machine}", job.id),
            ));
        }
    }

    for (machine, attribute) in &job.attribute_per_machine {
        if !job.eligible_machines.contains(machine) {
            errors.push(ValidationError::new(
                ValidationErrorKind::AttributeMapMismatch,
                format!(
                    "Job {} has an attribute on machine {machine} it is not eligible for",
                    job.id
                ),
            ));
        }
        if !instance.attributes.contains_key(attribute) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidAttributeReference,
                format!("Job {} references unknown attribute {attribute}", job.id),
            ));
        }
    }
}

/// Checks a finished output against its instance.
///
/// Returns every violation found; an empty list means the schedule is
/// feasible and every job is on time.
pub fn check_solution(instance: &Instance, output: &Output) -> Vec<Violation> {
    let mut violations = Vec::new();
    let jobs: HashMap<JobId, &Job> = instance.jobs.iter().map(|j| (j.id, j)).collect();
    let mut loads: BTreeMap<BatchId, u32> = BTreeMap::new();

    for assignment in &output.assignments {
        let (Some(job), Some(batch)) = (jobs.get(&assignment.job), output.batch(assignment.batch))
        else {
            violations.push(Violation::new(
                ViolationType::UnknownReference,
                assignment.job,
                format!(
                    "Assignment of {} to {} references an unknown job or batch",
                    assignment.job, assignment.batch
                ),
            ));
            continue;
        };

        *loads.entry(batch.id).or_insert(0) += job.size;
        check_assignment(instance, job, batch, &mut violations);
    }

    for batch in output.batches() {
        let Some(machine) = instance.machine(batch.machine) else {
            violations.push(Violation::new(
                ViolationType::UnknownReference,
                batch.id,
                format!("Batch {} runs on unknown machine {}", batch.id, batch.machine),
            ));
            continue;
        };

        let load = loads.get(&batch.id).copied().unwrap_or(0);
        if load > machine.max_cap {
            violations.push(Violation::new(
                ViolationType::CapacityExceeded,
                batch.id,
                format!("Batch {} holds {load} units, capacity {}", batch.id, machine.max_cap),
            ));
        }
        if load < machine.min_cap {
            violations.push(Violation::new(
                ViolationType::BelowMinCapacity,
                batch.id,
                format!("Batch {} holds {load} units, minimum {}", batch.id, machine.min_cap),
            ));
        }

        let contained = machine.shifts.iter().any(|s| {
            instance.offset_of(s.start) <= batch.start && batch.end <= instance.offset_of(s.end)
        });
        if !contained {
            violations.push(Violation::new(
                ViolationType::OutsideShift,
                batch.id,
                format!(
                    "Batch {} [{}, {}) is not inside a shift of {}",
                    batch.id, batch.start, batch.end, machine.id
                ),
            ));
        }
    }

    for machine in instance.machines.keys() {
        check_machine_sequence(instance, output, *machine, &mut violations);
    }

    for job in &instance.jobs {
        if !output.is_scheduled(job.id) {
            violations.push(Violation::new(
                ViolationType::Unscheduled,
                job.id,
                format!("Job {} is not scheduled", job.id),
            ));
        }
    }

    violations
}

/// Checks `output` and records the verdict in its `solution_type`.
///
/// The output becomes `ValidSolution` when no hard violation is found
/// and `InvalidSolution` otherwise. Tardy or unscheduled jobs alone do
/// not invalidate a schedule. Returns the violations found.
pub fn classify_solution(instance: &Instance, output: &mut Output) -> Vec<Violation> {
    let violations = check_solution(instance, output);
    output.solution_type = if violations.iter().any(Violation::is_hard) {
        SolutionType::InvalidSolution
    } else {
        SolutionType::ValidSolution
    };
    violations
}

fn check_assignment(instance: &Instance, job: &Job, batch: &Batch, violations: &mut Vec<Violation>) {
    if !job.is_eligible(batch.machine) {
        violations.push(Violation::new(
            ViolationType::IneligibleMachine,
            job.id,
            format!("Job {} is not eligible for {}", job.id, batch.machine),
        ));
    }

    if job.attribute_on(batch.machine) != Some(batch.attribute) {
        violations.push(Violation::new(
            ViolationType::AttributeMismatch,
            job.id,
            format!(
                "Job {} does not carry attribute {} on {}",
                job.id, batch.attribute, batch.machine
            ),
        ));
    }

    if instance.offset_of(job.earliest_start) > batch.start {
        violations.push(Violation::new(
            ViolationType::EarlyStart,
            job.id,
            format!("Batch {} starts before job {} is released", batch.id, job.id),
        ));
    }

    let duration = batch.duration();
    if duration < job.min_time || duration > job.max_time {
        violations.push(Violation::new(
            ViolationType::ProcessingTime,
            job.id,
            format!(
                "Batch {} runs {duration}s, job {} needs [{}, {}]",
                batch.id, job.id, job.min_time, job.max_time
            ),
        ));
    }

    let due = instance.offset_of(job.latest_end);
    if batch.end > due {
        violations.push(Violation::new(
            ViolationType::DeadlineMiss,
            job.id,
            format!("Job {} finishes {}s late", job.id, batch.end - due),
        ));
    }
}

fn check_machine_sequence(
    instance: &Instance,
    output: &Output,
    machine: MachineId,
    violations: &mut Vec<Violation>,
) {
    let batches = output.batches_on_machine(machine);
    for pair in batches.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let setup = instance
            .setup_time_between(prev.attribute, next.attribute)
            .unwrap_or(0);
        if prev.overlaps(next) {
            violations.push(Violation::new(
                ViolationType::Overlap,
                machine,
                format!("Batches {} and {} overlap on {machine}", prev.id, next.id),
            ));
        } else if prev.end + setup > next.start {
            violations.push(Violation::new(
                ViolationType::Overlap,
                machine,
                format!(
                    "Batch {} starts {}s after {} on {machine}, setup needs {setup}s",
                    next.id,
                    next.start - prev.end,
                    prev.id
                ),
            ));
        }
    }
}
