//! Strongly typed identifiers.
//!
//! Jobs, machines, attributes and batches are all numbered with `u32`
//! ids in instance files. Wrapping them keeps a machine id from being
//! passed where an attribute id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the raw numeric id.
            #[inline]
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a job.
    JobId,
    "J"
);
define_id!(
    /// Identifier of a machine (oven).
    MachineId,
    "M"
);
define_id!(
    /// Identifier of a job attribute.
    AttributeId,
    "A"
);
define_id!(
    /// Identifier of a batch. Assigned from 1 upwards by the scheduler.
    BatchId,
    "B"
);
