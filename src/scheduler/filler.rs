//! Batch filling.
//!
//! Once the driver has opened a batch for a seed job, the filler pulls
//! further unscheduled jobs into it. A job qualifies when it carries the
//! batch attribute on the machine, fits the remaining capacity, has a
//! processing-time range overlapping the batch's, is released within the
//! look-ahead window, keeps the batch inside the machine's shift and does
//! not make the seed job late (unless the seed is late anyway).
//!
//! Each round admits the first qualifying job in priority order. When a
//! round finds nothing, the look-ahead window grows by one tick until it
//! reaches `GreedyConfig::max_time_window`. The window is measured from
//! the start the batch was opened with, so admissions cannot chain slips
//! past that bound.

use tracing::trace;

use super::context::EngineContext;
use crate::error::{Result, ScheduleError};
use crate::models::{AttributeId, BatchId, MachineId, Output};

/// Running state of the batch being filled.
#[derive(Debug, Clone, Copy)]
struct OpenBatch {
    machine: MachineId,
    attribute: AttributeId,
    /// Start the batch was opened with.
    origin: i64,
    start: i64,
    end: i64,
    /// Largest `min_time` of the member jobs.
    min_time: i64,
    /// Smallest `max_time` of the member jobs.
    max_time: i64,
    load: u32,
    max_cap: u32,
    shift_end: i64,
    /// Due date of the seed job.
    seed_due: i64,
}

impl OpenBatch {
    /// Batch bounds after admitting `candidate`, if it qualifies.
    fn admit(&self, ctx: &EngineContext<'_>, candidate: usize, window: u32) -> Option<(i64, i64, i64)> {
        let view = &ctx.jobs[candidate];
        let job = view.job;

        if !job.is_eligible(self.machine) || job.attribute_on(self.machine) != Some(self.attribute) {
            return None;
        }
        if self.load.saturating_add(job.size) > self.max_cap {
            return None;
        }
        if job.min_time > self.max_time || job.max_time < self.min_time {
            return None;
        }
        if view.release > self.origin + i64::from(window) * ctx.config.tick {
            return None;
        }

        let start = self.start.max(view.release);
        let min_time = self.min_time.max(job.min_time);
        let max_time = self.max_time.min(job.max_time);
        let end = start + min_time;

        if end > self.shift_end {
            return None;
        }
        let seed_late = self.end > self.seed_due;
        if !seed_late && end > self.seed_due {
            return None;
        }

        Some((start, min_time, max_time))
    }
}

/// Fills `batch` with jobs taken from `unscheduled`.
///
/// `seed` is the job the batch was opened for; it must already be
/// assigned and removed from `unscheduled`. Admitted jobs are assigned
/// in `output` and removed from `unscheduled`. Returns the admitted job
/// indices in admission order.
pub(crate) fn fill_batch(
    ctx: &EngineContext<'_>,
    output: &mut Output,
    batch: BatchId,
    seed: usize,
    shift_end: i64,
    unscheduled: &mut Vec<usize>,
) -> Result<Vec<usize>> {
    let current = output
        .batch(batch)
        .cloned()
        .ok_or(ScheduleError::UnknownBatch(batch))?;
    let machine = ctx.machine(current.machine)?;
    let seed_view = &ctx.jobs[seed];

    let mut open = OpenBatch {
        machine: current.machine,
        attribute: current.attribute,
        origin: current.start,
        start: current.start,
        end: current.end,
        min_time: seed_view.job.min_time,
        max_time: seed_view.job.max_time,
        load: seed_view.job.size,
        max_cap: machine.max_cap,
        shift_end,
        seed_due: seed_view.due,
    };

    let mut admitted = Vec::new();
    let mut window = 0u32;

    loop {
        if open.load.saturating_add(ctx.min_job_size) > open.max_cap {
            break;
        }

        let pick = unscheduled
            .iter()
            .enumerate()
            .find_map(|(pos, &candidate)| {
                open.admit(ctx, candidate, window).map(|bounds| (pos, bounds))
            });

        let Some((pos, (start, min_time, max_time))) = pick else {
            if window < ctx.config.max_time_window {
                window += 1;
                continue;
            }
            break;
        };

        let candidate = unscheduled.remove(pos);
        let job = ctx.jobs[candidate].job;

        open.start = start;
        open.min_time = min_time;
        open.max_time = max_time;
        open.end = start + min_time;
        open.load = open.load.saturating_add(job.size);

        let stored = output
            .batch_mut(batch)
            .ok_or(ScheduleError::UnknownBatch(batch))?;
        stored.start = open.start;
        stored.end = open.end;
        output.assign(job.id, batch);
        admitted.push(candidate);

        trace!(
            batch = %batch,
            job = %job.id,
            start = open.start,
            end = open.end,
            load = open.load,
            "job added to batch"
        );
    }

    Ok(admitted)
}
