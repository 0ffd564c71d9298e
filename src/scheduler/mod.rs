//! Greedy batch scheduling, feasibility probing and KPI evaluation.
//!
//! # Algorithm
//!
//! [`GreedyScheduler::run`] is a time-stepped simulation: a horizon-relative
//! clock advances tick by tick, and at each tick released jobs are placed
//! on the free machine with the smallest setup time. Every new batch is
//! then packed with further compatible jobs. It is not optimal, but gives
//! a fast feasible baseline.
//!
//! [`GreedyScheduler::probe`] is the single-job variant used by
//! [`check_satisfiability`].
//!
//! # Components
//!
//! | Module | Role |
//! |--------|------|
//! | `shift` | Which shift is a machine in at time t |
//! | `setup` | Setup time between consecutive attributes |
//! | `selector` | Best machine for a job at time t |
//! | `filler` | Packs compatible jobs into an open batch |
//! | `greedy` | The time-advancing driver |
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! (batch processing)

mod config;
mod context;
mod filler;
mod greedy;
mod kpi;
mod probe;
mod satisfiability;
mod selector;
mod setup;
mod shift;

pub use config::GreedyConfig;
pub use greedy::GreedyScheduler;
pub use kpi::ScheduleKpi;
pub use satisfiability::{check_satisfiability, SatisfiabilityReport};
pub use selector::{select_machine, MachineCandidate, MachineChoice};
pub use setup::{previous_attribute, setup_cost, setup_time};
pub use shift::{current_shift, is_on_shift, shift_windows, ShiftState, ShiftWindow};

use crate::error::Result;
use crate::models::{Instance, Output};

/// Runs the greedy scheduler with the default configuration.
pub fn run_simple_greedy(instance: &Instance) -> Result<Output> {
    GreedyScheduler::new().run(instance)
}

/// Runs the single-job probe with the default configuration.
pub fn run_simple_greedy_single_job(instance: &Instance) -> Result<Output> {
    GreedyScheduler::new().probe(instance)
}
