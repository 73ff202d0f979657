//! nl-network: the network layer the node model is built from.
//!
//! Provides:
//! - Core network data structures (Node, LinkSegment, Network)
//! - Incremental network builder with validation
//! - Per-node incoming/outgoing segment adjacency in order of discovery
//!
//! # Example
//!
//! ```
//! use nl_network::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new();
//! let a = builder.add_node("A");
//! let b = builder.add_node("B");
//! let s = builder.add_macroscopic_segment("A->B", a, b, 2, 1800.0);
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.outgoing_segments(a), &[s]);
//! assert_eq!(network.incoming_segments(b), &[s]);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

pub use builder::NetworkBuilder;
pub use error::NetworkError;
pub use graph::{LinkSegment, MacroscopicSegment, Network, Node, SegmentKind};
