//! Batch scheduling domain models.
//!
//! Provides the problem description (instance, jobs, machines,
//! attributes) and the solution accumulator (batches, assignments,
//! output).
//!
//! # Domain Mappings
//!
//! | oven-batch | Heat treatment | Semiconductor | Food processing |
//! |------------|----------------|---------------|-----------------|
//! | Job | Part lot | Wafer lot | Tray |
//! | Machine | Furnace | Diffusion oven | Oven |
//! | Attribute | Temperature profile | Recipe | Product family |
//! | Batch | Furnace load | Oven run | Bake |

mod attribute;
mod batch;
mod ids;
mod instance;
mod job;
mod machine;
mod output;
mod shift;

pub use attribute::Attribute;
pub use batch::{Batch, BatchAssignment};
pub use ids::{AttributeId, BatchId, JobId, MachineId};
pub use instance::Instance;
pub use job::Job;
pub use machine::Machine;
pub use output::{Output, SolutionType, Violation, ViolationType};
pub use shift::Shift;
