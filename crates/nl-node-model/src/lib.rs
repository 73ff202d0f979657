//! First-order node model for macroscopic network loading.
//!
//! Given, for a single node, the turn sending flows offered by every incoming
//! link segment toward every outgoing link segment, the incoming capacities and
//! the spare receiving flows of the outgoing segments, the solver computes a
//! flow acceptance factor per incoming segment: the fraction of its offered
//! flow that may pass the node this step. The algorithm is the generic
//! first-order node model of Tampere et al. (2011) as refined by Bliemer et
//! al. (2014).
//!
//! Inputs are split the way a loading loop uses them:
//! - [`FixedTopologyInput`] is built once per node and reused,
//! - [`VariableRunInput`] is built whenever new sending flows arrive,
//! - [`NodeModelSolver::run`] consumes the latter and returns a [`NodeModelResult`].
//!
//! # Example
//!
//! ```
//! use nalgebra::{DMatrix, DVector};
//! use nl_node_model::{FixedTopologyInput, NodeModelSolver, VariableRunInput};
//!
//! let fixed = FixedTopologyInput::new(
//!     DVector::from_vec(vec![1000.0]),
//!     1,
//!     Some(DVector::from_vec(vec![900.0])),
//! )
//! .unwrap();
//! let input = VariableRunInput::new(&fixed, DMatrix::from_row_slice(1, 1, &[1200.0]), None).unwrap();
//! let result = NodeModelSolver::default().run(&input).unwrap();
//!
//! assert!((result.acceptance()[0] - 0.75).abs() < 1e-9);
//! ```

pub mod config;
pub mod error;
pub mod fixed_input;
pub mod restriction;
pub mod result;
pub mod solver;
pub mod state;
pub mod variable_input;

pub use config::NodeModelConfig;
pub use error::{NodeModelError, NodeModelResultOf};
pub use fixed_input::FixedTopologyInput;
pub use restriction::Restriction;
pub use result::NodeModelResult;
pub use solver::NodeModelSolver;
pub use state::SolverState;
pub use variable_input::VariableRunInput;
