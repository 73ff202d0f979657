//! Per-run input: turn sending flows and receiving flows for one invocation.

use nalgebra::{DMatrix, DVector};
use nl_core::{Real, approx_positive};

use crate::config::NodeModelConfig;
use crate::error::{NodeModelError, NodeModelResultOf, check_non_negative};
use crate::fixed_input::FixedTopologyInput;

/// Input for a single solver run.
///
/// Holds the turn sending flows `t_ab` (rows: incoming, columns: outgoing), the
/// receiving flows in effect for this run and the capacity scaling factors
/// `lambda_a = C_a / sum_b t_ab`. Created fresh per run; the solver only reads it.
///
/// The scaling factors depend on the flow tolerance, so build the input with
/// the same [`NodeModelConfig`] the solver runs with.
#[derive(Debug, Clone)]
pub struct VariableRunInput<'a> {
    fixed: &'a FixedTopologyInput,
    turn_sending_flows: DMatrix<Real>,
    receiving_flows: DVector<Real>,
    scaling_factors: DVector<Real>,
    epsilon: Real,
}

impl<'a> VariableRunInput<'a> {
    /// Build with [`NodeModelConfig::default`], for use with
    /// `NodeModelSolver::default()`.
    pub fn new(
        fixed: &'a FixedTopologyInput,
        turn_sending_flows: DMatrix<Real>,
        receiving_flows_override: Option<DVector<Real>>,
    ) -> NodeModelResultOf<Self> {
        Self::with_config(
            fixed,
            turn_sending_flows,
            receiving_flows_override,
            &NodeModelConfig::default(),
        )
    }

    /// Build, treating incoming rows whose total flow is at most
    /// `config.epsilon` as empty.
    pub fn with_config(
        fixed: &'a FixedTopologyInput,
        turn_sending_flows: DMatrix<Real>,
        receiving_flows_override: Option<DVector<Real>>,
        config: &NodeModelConfig,
    ) -> NodeModelResultOf<Self> {
        let epsilon = config.epsilon;
        let incoming = fixed.incoming_count();
        let outgoing = fixed.outgoing_count();

        if turn_sending_flows.shape() != (incoming, outgoing) {
            return Err(NodeModelError::DimensionMismatch {
                what: "turn sending flows",
                expected_rows: incoming,
                expected_cols: outgoing,
                rows: turn_sending_flows.nrows(),
                cols: turn_sending_flows.ncols(),
            });
        }
        check_non_negative(turn_sending_flows.iter(), "turn sending flow")?;

        let receiving_flows = match receiving_flows_override {
            Some(receiving) => {
                if receiving.len() != outgoing {
                    return Err(NodeModelError::DimensionMismatch {
                        what: "receiving flows override",
                        expected_rows: outgoing,
                        expected_cols: 1,
                        rows: receiving.len(),
                        cols: 1,
                    });
                }
                check_non_negative(receiving.iter(), "receiving flow")?;
                receiving
            }
            None => fixed
                .outgoing_receiving_flows()
                .cloned()
                .ok_or(NodeModelError::MissingReceivingFlows)?,
        };

        let scaling_factors =
            compute_scaling_factors(fixed.incoming_capacities(), &turn_sending_flows, epsilon);

        Ok(Self {
            fixed,
            turn_sending_flows,
            receiving_flows,
            scaling_factors,
            epsilon,
        })
    }

    pub fn fixed(&self) -> &FixedTopologyInput {
        self.fixed
    }

    pub fn incoming_count(&self) -> usize {
        self.turn_sending_flows.nrows()
    }

    pub fn outgoing_count(&self) -> usize {
        self.turn_sending_flows.ncols()
    }

    pub fn turn_sending_flows(&self) -> &DMatrix<Real> {
        &self.turn_sending_flows
    }

    pub fn receiving_flows(&self) -> &DVector<Real> {
        &self.receiving_flows
    }

    /// Flow tolerance the scaling factors were computed with.
    pub fn epsilon(&self) -> Real {
        self.epsilon
    }

    /// Capacity scaling factor per incoming link; `+inf` for links without flow.
    pub fn scaling_factors(&self) -> &DVector<Real> {
        &self.scaling_factors
    }
}

/// `lambda_a = C_a / sum_b t_ab`, or `+inf` when the row sum is negligible: such
/// a link can never be the binding constraint.
fn compute_scaling_factors(
    capacities: &DVector<Real>,
    turn_sending_flows: &DMatrix<Real>,
    epsilon: Real,
) -> DVector<Real> {
    DVector::from_iterator(
        capacities.len(),
        capacities.iter().enumerate().map(|(a, &capacity)| {
            let row_sum = turn_sending_flows.row(a).sum();
            if approx_positive(row_sum, epsilon) {
                capacity / row_sum
            } else {
                Real::INFINITY
            }
        }),
    )
}
