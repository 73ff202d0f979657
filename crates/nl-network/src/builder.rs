//! Incremental network builder.

use nl_core::{LinkSegmentId, NlResult, NodeId, Real};

use crate::graph::{LinkSegment, MacroscopicSegment, Network, Node, SegmentKind};
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_node` and `add_segment` to build up the network,
/// then call `build()` to validate and freeze it into an immutable `Network`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    segments: Vec<LinkSegment>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: name.into(),
        });
        id
    }

    /// Add a directed segment from `upstream` to `downstream`.
    pub fn add_segment(
        &mut self,
        name: impl Into<String>,
        upstream: NodeId,
        downstream: NodeId,
        kind: SegmentKind,
    ) -> LinkSegmentId {
        let id = LinkSegmentId::from_index(self.segments.len() as u32);
        self.segments.push(LinkSegment {
            id,
            name: name.into(),
            upstream,
            downstream,
            kind,
        });
        id
    }

    /// Shorthand for a macroscopic segment with `lanes` lanes of equal capacity.
    pub fn add_macroscopic_segment(
        &mut self,
        name: impl Into<String>,
        upstream: NodeId,
        downstream: NodeId,
        lanes: u32,
        capacity_per_lane_pcu_h: Real,
    ) -> LinkSegmentId {
        self.add_segment(
            name,
            upstream,
            downstream,
            SegmentKind::Macroscopic(MacroscopicSegment {
                lanes,
                capacity_per_lane_pcu_h,
            }),
        )
    }

    /// Validate and freeze the network, building per-node adjacency.
    pub fn build(self) -> NlResult<Network> {
        validate::validate_structure(&self.nodes, &self.segments)?;

        let (incoming_offsets, incoming) =
            Self::build_adjacency(&self.nodes, &self.segments, |s| s.downstream);
        let (outgoing_offsets, outgoing) =
            Self::build_adjacency(&self.nodes, &self.segments, |s| s.upstream);

        validate::validate_adjacency(
            &self.nodes,
            &self.segments,
            &incoming_offsets,
            &incoming,
            |s| s.downstream,
        )?;
        validate::validate_adjacency(
            &self.nodes,
            &self.segments,
            &outgoing_offsets,
            &outgoing,
            |s| s.upstream,
        )?;

        Ok(Network {
            nodes: self.nodes,
            segments: self.segments,
            incoming_offsets,
            incoming,
            outgoing_offsets,
            outgoing,
        })
    }

    /// Group segments by the node `endpoint` picks, keeping insertion order.
    fn build_adjacency(
        nodes: &[Node],
        segments: &[LinkSegment],
        endpoint: impl Fn(&LinkSegment) -> NodeId,
    ) -> (Vec<usize>, Vec<LinkSegmentId>) {
        let mut per_node: Vec<Vec<LinkSegmentId>> = vec![Vec::new(); nodes.len()];
        for segment in segments {
            per_node[endpoint(segment).slot()].push(segment.id);
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::with_capacity(segments.len());
        offsets.push(0);
        for list in per_node {
            flat.extend(list);
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}
