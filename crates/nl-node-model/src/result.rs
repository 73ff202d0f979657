//! Solver output.

use nalgebra::{DMatrix, DVector};
use nl_core::{Real, approx_equal, approx_greater};

use crate::variable_input::VariableRunInput;

/// Flow acceptance factors of one node model run.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeModelResult {
    pub(crate) acceptance: DVector<Real>,
    pub(crate) iterations: usize,
}

impl NodeModelResult {
    /// Acceptance factor per incoming link, each in `[0, 1]`.
    pub fn acceptance(&self) -> &DVector<Real> {
        &self.acceptance
    }

    pub fn acceptance_factor(&self, incoming: usize) -> Option<Real> {
        self.acceptance.get(incoming).copied()
    }

    /// Whether incoming link `incoming` passes its whole sending flow, to
    /// within `epsilon`.
    pub fn is_fully_accepted(&self, incoming: usize, epsilon: Real) -> bool {
        self.acceptance_factor(incoming)
            .is_some_and(|alpha| approx_equal(alpha, 1.0, epsilon))
    }

    /// Outer iterations the run needed; never more than the incoming link count.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Accepted turn flows `alpha_a * t_ab`. `input` must be the run input this
    /// result was computed from.
    pub fn accepted_turn_flows(&self, input: &VariableRunInput<'_>) -> DMatrix<Real> {
        let t = input.turn_sending_flows();
        debug_assert_eq!(t.nrows(), self.acceptance.len());
        let mut accepted = t.clone();
        for (a, &alpha) in self.acceptance.iter().enumerate() {
            accepted.row_mut(a).scale_mut(alpha);
        }
        accepted
    }

    /// Total accepted flow entering each outgoing link.
    pub fn accepted_outflows(&self, input: &VariableRunInput<'_>) -> DVector<Real> {
        let accepted = self.accepted_turn_flows(input);
        DVector::from_iterator(
            accepted.ncols(),
            (0..accepted.ncols()).map(|b| accepted.column(b).sum()),
        )
    }

    /// Total accepted flow leaving each incoming link.
    pub fn accepted_inflows(&self, input: &VariableRunInput<'_>) -> DVector<Real> {
        let accepted = self.accepted_turn_flows(input);
        DVector::from_iterator(
            accepted.nrows(),
            (0..accepted.nrows()).map(|a| accepted.row(a).sum()),
        )
    }

    /// Outgoing links whose accepted inflow exceeds their receiving flow by
    /// more than `epsilon`. Empty for every result the solver produces.
    pub fn overloaded_outgoing(&self, input: &VariableRunInput<'_>, epsilon: Real) -> Vec<usize> {
        let outflows = self.accepted_outflows(input);
        let receiving = input.receiving_flows();
        (0..outflows.len())
            .filter(|&b| approx_greater(outflows[b], receiving[b], epsilon))
            .collect()
    }
}
