//! Solver configuration.

use nl_core::{EPSILON, Real};
use serde::{Deserialize, Serialize};

/// Cap applied to incoming capacities when none is configured, in pcu/h.
pub const DEFAULT_MAX_IN_CAPACITY_PCU_H: Real = 10_000.0;

/// Node model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeModelConfig {
    /// Flows at or below this are treated as absent.
    pub epsilon: Real,
    /// Upper bound for incoming capacities and default receiving flows (pcu/h).
    pub max_in_capacity_pcu_h: Real,
}

impl Default for NodeModelConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            max_in_capacity_pcu_h: DEFAULT_MAX_IN_CAPACITY_PCU_H,
        }
    }
}
