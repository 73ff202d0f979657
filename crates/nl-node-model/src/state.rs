//! Mutable working state of one solver run.

use nalgebra::{DMatrix, DVector};
use nl_core::{Real, approx_greater, approx_positive};

use crate::restriction::Restriction;
use crate::variable_input::VariableRunInput;

/// Working state owned by a single run of the node model.
///
/// `scaled_remaining_sending` starts as `lambda_a * t_ab` and has a row zeroed as
/// soon as incoming link `a` is resolved, so resolved links drop out of every
/// later restriction sum. `remaining_receiving` starts as R_b and shrinks by the
/// flow each resolved link sends.
#[derive(Debug, Clone)]
pub struct SolverState {
    remaining_receiving: DVector<Real>,
    scaled_remaining_sending: DMatrix<Real>,
    processed: Vec<bool>,
    acceptance: DVector<Real>,
    processed_count: usize,
}

impl SolverState {
    pub fn initialise(input: &VariableRunInput<'_>) -> Self {
        let incoming = input.incoming_count();
        let outgoing = input.outgoing_count();
        let t = input.turn_sending_flows();
        let lambda = input.scaling_factors();

        let mut scaled = DMatrix::zeros(incoming, outgoing);
        for a in 0..incoming {
            // An infinite factor marks an empty row; keep it at zero rather than inf * 0.
            if lambda[a].is_finite() {
                for b in 0..outgoing {
                    scaled[(a, b)] = lambda[a] * t[(a, b)];
                }
            }
        }

        Self {
            remaining_receiving: input.receiving_flows().clone(),
            scaled_remaining_sending: scaled,
            processed: vec![false; incoming],
            acceptance: DVector::from_element(incoming, 1.0),
            processed_count: 0,
        }
    }

    fn is_processed(&self, incoming: usize) -> bool {
        self.processed[incoming]
    }

    pub fn processed_count(&self) -> usize {
        self.processed_count
    }

    pub fn is_complete(&self) -> bool {
        self.processed_count == self.processed.len()
    }

    pub fn into_acceptance(self) -> DVector<Real> {
        self.acceptance
    }

    fn unprocessed(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.processed.len()).filter(|&a| !self.is_processed(a))
    }

    /// Find the outgoing link with the smallest restriction factor
    /// `beta_b = remaining_receiving[b] / sum_a scaled[a][b]` over unresolved `a`.
    ///
    /// Links whose remaining scaled inflow is at most `epsilon` are skipped,
    /// unless the unscaled flow still offered to them exceeds what they can
    /// receive.
    pub fn find_most_restricting(
        &self,
        input: &VariableRunInput<'_>,
        epsilon: Real,
    ) -> Restriction {
        let t = input.turn_sending_flows();
        let mut restriction = Restriction::NoRestriction;
        for b in 0..self.scaled_remaining_sending.ncols() {
            let sending: Real = self
                .unprocessed()
                .map(|a| self.scaled_remaining_sending[(a, b)])
                .sum();
            let offered: Real = self.unprocessed().map(|a| t[(a, b)]).sum();
            let overloaded = approx_greater(offered, self.remaining_receiving[b], 0.0);
            if approx_positive(sending, epsilon) || (sending > 0.0 && overloaded) {
                // Subtraction noise may leave a tiny negative remainder.
                let factor = self.remaining_receiving[b].max(0.0) / sending;
                restriction = restriction.tighten(factor, b);
            }
        }
        restriction
    }

    /// Unresolved links whose scaled flow toward `index` exceeds `threshold`.
    fn contributors(&self, index: usize, threshold: Real) -> Vec<usize> {
        self.unprocessed()
            .filter(|&a| approx_positive(self.scaled_remaining_sending[(a, index)], threshold))
            .collect()
    }

    /// Resolve every link contributing more than `threshold` to the binding
    /// outgoing link `index` with `lambda_a * factor >= 1`; they keep an
    /// acceptance of 1. Returns the resolved indices.
    pub fn resolve_demand_constrained(
        &mut self,
        input: &VariableRunInput<'_>,
        factor: Real,
        index: usize,
        threshold: Real,
    ) -> Vec<usize> {
        let lambda = input.scaling_factors();
        let resolved: Vec<usize> = self
            .contributors(index, threshold)
            .into_iter()
            .filter(|&a| lambda[a] * factor >= 1.0)
            .collect();

        for &a in &resolved {
            self.resolve(input, a, 1.0);
        }
        resolved
    }

    /// Resolve every link contributing more than `threshold` to outgoing link
    /// `index` at acceptance `lambda_a * factor`. Only valid when no link is
    /// demand constrained for the same restriction and threshold.
    pub fn resolve_capacity_constrained(
        &mut self,
        input: &VariableRunInput<'_>,
        factor: Real,
        index: usize,
        threshold: Real,
    ) -> Vec<usize> {
        let lambda = input.scaling_factors();
        let resolved = self.contributors(index, threshold);

        for &a in &resolved {
            let alpha = lambda[a] * factor;
            self.acceptance[a] = alpha;
            self.resolve(input, a, alpha);
        }
        resolved
    }

    /// Resolve every remaining link once no outgoing link binds.
    ///
    /// What is left of the scaled flow no longer ranks the remaining links, so
    /// they are bounded only by their own capacity and by what the outgoing
    /// links can still take of their unscaled flow:
    /// `alpha_a = min(1, lambda_a, min_b share_b)` over the `b` with `t_ab > 0`,
    /// where `share_b` is the remaining receiving flow over the flow these links
    /// still offer to `b`. A link without flow, or one with `lambda_a = +inf`
    /// whose outgoing links have room, is accepted in full.
    pub fn resolve_unrestricted(&mut self, input: &VariableRunInput<'_>) -> Vec<usize> {
        let t = input.turn_sending_flows();
        let lambda = input.scaling_factors();
        let resolved: Vec<usize> = self.unprocessed().collect();

        let shares: Vec<Real> = (0..self.remaining_receiving.len())
            .map(|b| {
                let offered: Real = resolved.iter().map(|&a| t[(a, b)]).sum();
                if offered > 0.0 {
                    self.remaining_receiving[b].max(0.0) / offered
                } else {
                    Real::INFINITY
                }
            })
            .collect();

        for &a in &resolved {
            let alpha = (0..shares.len())
                .filter(|&b| t[(a, b)] > 0.0)
                .map(|b| shares[b])
                .fold(lambda[a].min(1.0), Real::min);
            self.acceptance[a] = alpha;
            self.resolve(input, a, alpha);
        }
        resolved
    }

    /// Mark `a` processed, take `multiplier * t_a*` from the receiving flows and
    /// drop a's row from the scaled sending flows.
    fn resolve(&mut self, input: &VariableRunInput<'_>, a: usize, multiplier: Real) {
        debug_assert!(!self.is_processed(a), "incoming link {a} resolved twice");
        self.processed[a] = true;
        self.processed_count += 1;

        let t = input.turn_sending_flows();
        for b in 0..self.remaining_receiving.len() {
            self.remaining_receiving[b] -= multiplier * t[(a, b)];
        }
        self.scaled_remaining_sending.row_mut(a).fill(0.0);
    }
}
