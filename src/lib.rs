//! Greedy batch scheduling for capacity-constrained ovens.
//!
//! Jobs with release dates, due dates, sizes and machine-dependent
//! processing-time ranges are grouped into batches on machines that are
//! only available in discrete shifts and pay attribute-dependent setup
//! times between batches.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Instance`, `Machine`, `Job`, `Attribute`,
//!   `Shift`, `Batch`, `BatchAssignment`, `Output`
//! - **`scheduler`**: The greedy engine, the single-job probe, the
//!   satisfiability check and KPIs
//! - **`validation`**: Input integrity checks and solution checking
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use oven_batch::models::{Attribute, Instance, Job, Machine};
//! use oven_batch::scheduler::{GreedyScheduler, ScheduleKpi};
//!
//! let t0 = Utc.timestamp_opt(0, 0).unwrap();
//! let t1 = Utc.timestamp_opt(28_800, 0).unwrap();
//! let instance = Instance::new(t0, t1)
//!     .with_machine(Machine::new(1).with_capacity(0, 4).with_shift(t0, t1))
//!     .with_attribute(Attribute::new(1).with_setup_times(vec![0]).with_setup_costs(vec![0]))
//!     .with_job(Job::new(1, t0, t1).with_processing_time(600, 900).with_size(2).with_machine(1, 1))
//!     .with_job(Job::new(2, t0, t1).with_processing_time(700, 800).with_size(2).with_machine(1, 1));
//!
//! let output = GreedyScheduler::new().run(&instance).unwrap();
//! assert_eq!(output.batch_count(), 1);
//!
//! let kpi = ScheduleKpi::calculate(&instance, &output).unwrap();
//! assert_eq!(kpi.makespan, 700);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
