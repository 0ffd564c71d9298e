//! Shift tracking.
//!
//! Answers "which shift is machine `m` in at time `t`, and is it on
//! shift?" on horizon-relative seconds. The driver keeps one
//! [`ShiftState`] per machine and only ever moves it forward in time,
//! so the shift index of a machine never decreases during a run.

use crate::models::{Instance, Machine};

/// A shift as horizon-relative offsets `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    /// Start offset (s, inclusive).
    pub start: i64,
    /// End offset (s, exclusive).
    pub end: i64,
}

/// Converts a machine's shifts to horizon offsets.
pub fn shift_windows(instance: &Instance, machine: &Machine) -> Vec<ShiftWindow> {
    machine
        .shifts
        .iter()
        .map(|s| ShiftWindow {
            start: instance.offset_of(s.start),
            end: instance.offset_of(s.end),
        })
        .collect()
}

/// Index of the last shift starting at or before `t`.
///
/// `None` if every shift starts after `t`.
pub fn current_shift(windows: &[ShiftWindow], t: i64) -> Option<usize> {
    windows.partition_point(|w| w.start <= t).checked_sub(1)
}

/// Whether shift `index` still covers `t`.
///
/// The end is inclusive here: a machine reaching the end of its shift is
/// still on it, but only a zero-length batch would fit.
pub fn is_on_shift(windows: &[ShiftWindow], index: Option<usize>, t: i64) -> bool {
    index
        .and_then(|i| windows.get(i))
        .is_some_and(|w| w.end >= t)
}

/// Cached shift position of one machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftState {
    /// Active shift index, `None` before the first shift.
    pub index: Option<usize>,
    /// Whether the machine is on shift.
    pub on_shift: bool,
}

impl ShiftState {
    /// State at time `t`, computed from scratch.
    pub fn at(windows: &[ShiftWindow], t: i64) -> Self {
        let index = current_shift(windows, t);
        Self {
            index,
            on_shift: is_on_shift(windows, index, t),
        }
    }

    /// Moves the state forward to time `t`.
    ///
    /// Only scans shifts after the cached one; `t` must not go backwards.
    pub fn advance(&mut self, windows: &[ShiftWindow], t: i64) {
        let mut next = self.index.map_or(0, |i| i + 1);
        while next < windows.len() && windows[next].start <= t {
            self.index = Some(next);
            next += 1;
        }
        self.on_shift = is_on_shift(windows, self.index, t);
    }

    /// End offset of the active shift, if on shift.
    pub fn shift_end(&self, windows: &[ShiftWindow]) -> Option<i64> {
        if !self.on_shift {
            return None;
        }
        self.index.and_then(|i| windows.get(i)).map(|w| w.end)
    }
}
