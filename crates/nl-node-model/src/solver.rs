//! The node model iteration.

use tracing::{debug, trace, warn};

use crate::config::NodeModelConfig;
use crate::error::{NodeModelError, NodeModelResultOf};
use crate::restriction::Restriction;
use crate::result::NodeModelResult;
use crate::state::SolverState;
use crate::variable_input::VariableRunInput;

/// First-order node model solver.
///
/// Each outer iteration finds the most restricting outgoing link, then resolves
/// either every demand constrained incoming link for it or, if there are none,
/// every capacity constrained one. Once no outgoing link binds, the remaining
/// incoming links are resolved together. Each iteration resolves at least one
/// incoming link, so a run takes at most `|A|` iterations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeModelSolver {
    config: NodeModelConfig,
}

impl NodeModelSolver {
    pub fn new(config: NodeModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NodeModelConfig {
        &self.config
    }

    /// Compute flow acceptance factors for `input`. Only a run-local
    /// [`SolverState`] is mutated.
    pub fn run(&self, input: &VariableRunInput<'_>) -> NodeModelResultOf<NodeModelResult> {
        let epsilon = self.config.epsilon;
        let incoming = input.incoming_count();
        let max_iterations = incoming;

        if input.epsilon() != epsilon {
            warn!(
                input_epsilon = input.epsilon(),
                solver_epsilon = epsilon,
                "run input scaled with a different flow tolerance than the solver uses"
            );
        }

        debug!(
            incoming,
            outgoing = input.outgoing_count(),
            "node model run started"
        );

        let mut state = SolverState::initialise(input);
        let mut iterations = 0;

        'outer: while !state.is_complete() {
            if iterations >= max_iterations {
                return Err(NodeModelError::NoProgress {
                    iterations,
                    resolved: state.processed_count(),
                    incoming,
                });
            }
            iterations += 1;

            let restriction = state.find_most_restricting(input, epsilon);
            let Restriction::Binding { factor, index } = restriction else {
                let resolved = state.resolve_unrestricted(input);
                trace!(iteration = iterations, resolved = ?resolved, "unrestricted");
                continue;
            };

            // Rows each within epsilon of b* can still add up to bind it; the
            // second pass takes every row with any scaled flow toward b*.
            for threshold in [epsilon, 0.0] {
                let demand = state.resolve_demand_constrained(input, factor, index, threshold);
                if !demand.is_empty() {
                    trace!(
                        iteration = iterations,
                        ?restriction,
                        threshold,
                        resolved = ?demand,
                        "demand constrained"
                    );
                    continue 'outer;
                }

                let capacity =
                    state.resolve_capacity_constrained(input, factor, index, threshold);
                if !capacity.is_empty() {
                    trace!(
                        iteration = iterations,
                        ?restriction,
                        threshold,
                        resolved = ?capacity,
                        "capacity constrained"
                    );
                    continue 'outer;
                }
            }
        }

        debug!(iterations, "node model run finished");
        Ok(NodeModelResult {
            acceptance: state.into_acceptance(),
            iterations,
        })
    }
}
