//! Single-node scenario files.

use std::path::Path;

use nalgebra::{DMatrix, DVector};
use nl_node_model::{FixedTopologyInput, NodeModelConfig, NodeModelError, NodeModelResultOf};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// One node and one set of sending flows, as read from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub incoming_capacities: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outgoing_receiving_flows: Option<Vec<f64>>,
    /// One row per incoming link, one column per outgoing link.
    pub turn_sending_flows: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiving_flows_override: Option<Vec<f64>>,
    #[serde(default)]
    pub config: NodeModelConfig,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, CliError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Outgoing link count, taken from the first vector that states it.
    pub fn outgoing_count(&self) -> usize {
        self.outgoing_receiving_flows
            .as_ref()
            .or(self.receiving_flows_override.as_ref())
            .map(Vec::len)
            .or_else(|| self.turn_sending_flows.first().map(Vec::len))
            .unwrap_or(0)
    }

    /// Fixed input with incoming capacities capped per the scenario config.
    pub fn fixed_input(&self) -> NodeModelResultOf<FixedTopologyInput> {
        let mut fixed = FixedTopologyInput::new(
            DVector::from_row_slice(&self.incoming_capacities),
            self.outgoing_count(),
            self.outgoing_receiving_flows
                .as_deref()
                .map(DVector::from_row_slice),
        )?;
        fixed.cap_in_capacities_to_maximum(self.config.max_in_capacity_pcu_h);
        Ok(fixed)
    }

    pub fn turn_matrix(&self) -> NodeModelResultOf<DMatrix<f64>> {
        let cols = self.outgoing_count();
        if let Some((row, values)) = self
            .turn_sending_flows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != cols)
        {
            return Err(NodeModelError::DimensionError {
                what: format!(
                    "turn sending flow row {row} has {} entries, expected {cols}",
                    values.len()
                ),
            });
        }
        let rows = self.turn_sending_flows.len();
        Ok(DMatrix::from_fn(rows, cols, |a, b| {
            self.turn_sending_flows[a][b]
        }))
    }

    pub fn receiving_override(&self) -> Option<DVector<f64>> {
        self.receiving_flows_override
            .as_deref()
            .map(DVector::from_row_slice)
    }
}
