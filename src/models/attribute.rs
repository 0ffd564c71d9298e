//! Job attributes and sequence-dependent setups.
//!
//! Every job carries an attribute on each machine it may run on. Switching
//! a machine from one attribute to another costs setup time and setup
//! cost. Each attribute stores one row of the transition matrix: the
//! time and cost of moving *from* it to every attribute of the instance.
//!
//! # Row layout
//! Row entries are indexed by the position of the *target* attribute in
//! the ascending attribute-id order of the instance, not by the id itself.
//! `Instance::attribute_position` maps ids to positions.

use serde::{Deserialize, Serialize};

use super::AttributeId;

/// A job attribute with its outgoing setup row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    /// Unique attribute identifier.
    pub id: AttributeId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Setup cost towards each attribute, by target position.
    pub setup_costs: Vec<i64>,
    /// Setup time (s) towards each attribute, by target position.
    pub setup_times: Vec<i64>,
}

impl Attribute {
    /// Creates an attribute with empty setup rows.
    pub fn new(id: impl Into<AttributeId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            setup_costs: Vec::new(),
            setup_times: Vec::new(),
        }
    }

    /// Sets the attribute name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the setup-time row.
    pub fn with_setup_times(mut self, times: Vec<i64>) -> Self {
        self.setup_times = times;
        self
    }

    /// Sets the setup-cost row.
    pub fn with_setup_costs(mut self, costs: Vec<i64>) -> Self {
        self.setup_costs = costs;
        self
    }

    /// Setup time towards the attribute at `position`.
    #[inline]
    pub fn setup_time_to(&self, position: usize) -> Option<i64> {
        self.setup_times.get(position).copied()
    }

    /// Setup cost towards the attribute at `position`.
    #[inline]
    pub fn setup_cost_to(&self, position: usize) -> Option<i64> {
        self.setup_costs.get(position).copied()
    }
}
