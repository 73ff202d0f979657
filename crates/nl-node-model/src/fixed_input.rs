//! Per-node input that stays fixed across solver runs.

use nalgebra::DVector;
use nl_core::{LinkSegmentId, NodeId, Real};
use nl_network::Network;

use crate::config::NodeModelConfig;
use crate::error::{NodeModelError, NodeModelResultOf, check_non_negative};

/// Topology-derived input of one node: incoming capacities C_a and the default
/// receiving flows R_b of the outgoing segments.
///
/// Incoming segments form the set A and outgoing segments the set B. Both are
/// indexed densely (`0..|A|`, `0..|B|`) in order of discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTopologyInput {
    incoming_segments: Vec<LinkSegmentId>,
    outgoing_segments: Vec<LinkSegmentId>,
    incoming_capacities: DVector<Real>,
    outgoing_count: usize,
    outgoing_receiving_flows: Option<DVector<Real>>,
}

impl FixedTopologyInput {
    /// Build from raw arrays.
    ///
    /// `outgoing_receiving_flows` may be `None` when every run supplies its own
    /// receiving flows; when present its length must equal `outgoing_count`.
    pub fn new(
        incoming_capacities: DVector<Real>,
        outgoing_count: usize,
        outgoing_receiving_flows: Option<DVector<Real>>,
    ) -> NodeModelResultOf<Self> {
        check_non_negative(incoming_capacities.iter(), "incoming capacity")?;
        if let Some(receiving) = &outgoing_receiving_flows {
            if receiving.len() != outgoing_count {
                return Err(NodeModelError::DimensionError {
                    what: format!(
                        "{} receiving flows given for {} outgoing links",
                        receiving.len(),
                        outgoing_count
                    ),
                });
            }
            check_non_negative(receiving.iter(), "receiving flow")?;
        }

        Ok(Self {
            incoming_segments: Vec::new(),
            outgoing_segments: Vec::new(),
            incoming_capacities,
            outgoing_count,
            outgoing_receiving_flows,
        })
    }

    /// Build from a network node.
    ///
    /// Incoming capacities and default receiving flows (the outgoing capacities)
    /// are both capped at `config.max_in_capacity_pcu_h`. Every incident segment
    /// must be macroscopic.
    pub fn from_node(
        network: &Network,
        node: NodeId,
        config: &NodeModelConfig,
    ) -> NodeModelResultOf<Self> {
        network.require_node(node)?;

        let capacity_of = |segment: LinkSegmentId| -> NodeModelResultOf<Real> {
            let kind = network
                .segment(segment)
                .map(|s| &s.kind)
                .ok_or_else(|| NodeModelError::DimensionError {
                    what: format!("segment {segment} missing from network"),
                })?;
            let macroscopic = kind
                .as_macroscopic()
                .ok_or(NodeModelError::InvalidTopology {
                    node,
                    segment,
                    found: kind.type_name(),
                })?;
            Ok(macroscopic.capacity_pcu_h())
        };

        let incoming_segments = network.incoming_segments(node).to_vec();
        let outgoing_segments = network.outgoing_segments(node).to_vec();

        let capacities = incoming_segments
            .iter()
            .map(|&s| capacity_of(s))
            .collect::<NodeModelResultOf<Vec<_>>>()?;
        let receiving = outgoing_segments
            .iter()
            .map(|&s| capacity_of(s).map(|c| c.min(config.max_in_capacity_pcu_h)))
            .collect::<NodeModelResultOf<Vec<_>>>()?;

        let mut fixed = Self::new(
            DVector::from_vec(capacities),
            outgoing_segments.len(),
            Some(DVector::from_vec(receiving)),
        )?;
        fixed.cap_in_capacities_to_maximum(config.max_in_capacity_pcu_h);
        fixed.incoming_segments = incoming_segments;
        fixed.outgoing_segments = outgoing_segments;
        Ok(fixed)
    }

    /// Clamp every incoming capacity to at most `max`.
    pub fn cap_in_capacities_to_maximum(&mut self, max: Real) {
        for c in self.incoming_capacities.iter_mut() {
            *c = c.min(max);
        }
    }

    pub fn incoming_count(&self) -> usize {
        self.incoming_capacities.len()
    }

    pub fn outgoing_count(&self) -> usize {
        self.outgoing_count
    }

    pub fn incoming_capacities(&self) -> &DVector<Real> {
        &self.incoming_capacities
    }

    pub fn outgoing_receiving_flows(&self) -> Option<&DVector<Real>> {
        self.outgoing_receiving_flows.as_ref()
    }

    /// Incoming segments in index order. Empty when built from raw arrays.
    pub fn incoming_segments(&self) -> &[LinkSegmentId] {
        &self.incoming_segments
    }

    /// Outgoing segments in index order. Empty when built from raw arrays.
    pub fn outgoing_segments(&self) -> &[LinkSegmentId] {
        &self.outgoing_segments
    }

    pub fn incoming_index(&self, segment: LinkSegmentId) -> Option<usize> {
        self.incoming_segments.iter().position(|&s| s == segment)
    }

    pub fn outgoing_index(&self, segment: LinkSegmentId) -> Option<usize> {
        self.outgoing_segments.iter().position(|&s| s == segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nl_network::{NetworkBuilder, SegmentKind};

    #[test]
    fn new_checks_receiving_length() {
        let err = FixedTopologyInput::new(
            DVector::from_vec(vec![100.0]),
            2,
            Some(DVector::from_vec(vec![100.0])),
        )
        .unwrap_err();
        assert!(matches!(err, NodeModelError::DimensionError { .. }));
    }

    #[test]
    fn new_rejects_negative_capacity() {
        let err = FixedTopologyInput::new(DVector::from_vec(vec![100.0, -1.0]), 0, None)
            .unwrap_err();
        assert!(matches!(err, NodeModelError::InvalidValue { index: 1, .. }));
    }

    #[test]
    fn receiving_flows_are_optional() {
        let fixed = FixedTopologyInput::new(DVector::from_vec(vec![100.0]), 3, None).unwrap();
        assert_eq!(fixed.incoming_count(), 1);
        assert_eq!(fixed.outgoing_count(), 3);
        assert!(fixed.outgoing_receiving_flows().is_none());
    }

    #[test]
    fn capping_is_idempotent() {
        let mut fixed =
            FixedTopologyInput::new(DVector::from_vec(vec![500.0, 12_000.0, 8000.0]), 0, None)
                .unwrap();
        fixed.cap_in_capacities_to_maximum(8000.0);
        let once = fixed.clone();
        fixed.cap_in_capacities_to_maximum(8000.0);

        assert_eq!(fixed, once);
        assert_eq!(
            fixed.incoming_capacities().as_slice(),
            &[500.0, 8000.0, 8000.0]
        );
    }

    #[test]
    fn from_node_uses_segment_capacities() {
        let mut builder = NetworkBuilder::new();
        let centre = builder.add_node("centre");
        let west = builder.add_node("west");
        let east = builder.add_node("east");
        let in_west = builder.add_macroscopic_segment("w->c", west, centre, 2, 1800.0);
        let in_east = builder.add_macroscopic_segment("e->c", east, centre, 4, 3000.0);
        let out_east = builder.add_macroscopic_segment("c->e", centre, east, 1, 1500.0);
        let network = builder.build().unwrap();

        let fixed =
            FixedTopologyInput::from_node(&network, centre, &NodeModelConfig::default()).unwrap();

        assert_eq!(fixed.incoming_count(), 2);
        assert_eq!(fixed.outgoing_count(), 1);
        // 4 x 3000 exceeds the 10 000 pcu/h default cap.
        assert_eq!(fixed.incoming_capacities().as_slice(), &[3600.0, 10_000.0]);
        assert_eq!(
            fixed.outgoing_receiving_flows().unwrap().as_slice(),
            &[1500.0]
        );
        assert_eq!(fixed.incoming_index(in_west), Some(0));
        assert_eq!(fixed.incoming_index(in_east), Some(1));
        assert_eq!(fixed.outgoing_index(out_east), Some(0));
        assert_eq!(fixed.outgoing_index(in_west), None);
    }

    #[test]
    fn from_node_rejects_microscopic_segment() {
        let mut builder = NetworkBuilder::new();
        let centre = builder.add_node("centre");
        let other = builder.add_node("other");
        builder.add_macroscopic_segment("in", other, centre, 1, 1000.0);
        let micro = builder.add_segment("out", centre, other, SegmentKind::Microscopic);
        let network = builder.build().unwrap();

        let err = FixedTopologyInput::from_node(&network, centre, &NodeModelConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            NodeModelError::InvalidTopology {
                node: centre,
                segment: micro,
                found: "microscopic",
            }
        );
    }

    #[test]
    fn from_node_rejects_unknown_node() {
        let network = NetworkBuilder::new().build().unwrap();
        let err = FixedTopologyInput::from_node(
            &network,
            NodeId::from_index(3),
            &NodeModelConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, NodeModelError::Network(_)));
    }
}
