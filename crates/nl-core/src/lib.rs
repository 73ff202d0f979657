//! nl-core: shared foundation for nodeload.
//!
//! Contains:
//! - numeric (Real + epsilon-aware comparisons)
//! - ids (dense compact IDs for network objects)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

pub use error::{NlError, NlResult};
pub use ids::*;
pub use numeric::*;
