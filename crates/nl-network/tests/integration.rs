//! Integration tests for nl-network.

use nl_network::{NetworkBuilder, SegmentKind};

#[test]
fn build_minimal_network() {
    // A -> [S] -> B
    let mut builder = NetworkBuilder::new();
    let a = builder.add_node("A");
    let b = builder.add_node("B");
    let s = builder.add_macroscopic_segment("S", a, b, 2, 1500.0);

    let network = builder.build().unwrap();

    assert_eq!(network.nodes().len(), 2);
    assert_eq!(network.segments().len(), 1);

    assert!(network.incoming_segments(a).is_empty());
    assert_eq!(network.outgoing_segments(a), &[s]);
    assert_eq!(network.incoming_segments(b), &[s]);
    assert!(network.outgoing_segments(b).is_empty());

    let segment = network.segment(s).unwrap();
    assert_eq!(segment.upstream, a);
    assert_eq!(segment.downstream, b);
    let capacity = segment.kind.as_macroscopic().unwrap().capacity_pcu_h();
    assert_eq!(capacity, 3000.0);
}

#[test]
fn four_leg_intersection() {
    let mut builder = NetworkBuilder::new();
    let centre = builder.add_node("centre");
    let legs: Vec<_> = ["north", "east", "south", "west"]
        .iter()
        .map(|name| builder.add_node(*name))
        .collect();

    let mut inbound = Vec::new();
    let mut outbound = Vec::new();
    for &leg in &legs {
        inbound.push(builder.add_macroscopic_segment("in", leg, centre, 1, 1800.0));
        outbound.push(builder.add_macroscopic_segment("out", centre, leg, 1, 1800.0));
    }

    let network = builder.build().unwrap();
    assert_eq!(network.incoming_segments(centre), inbound.as_slice());
    assert_eq!(network.outgoing_segments(centre), outbound.as_slice());

    for (i, &leg) in legs.iter().enumerate() {
        assert_eq!(network.incoming_segments(leg), &[outbound[i]]);
        assert_eq!(network.outgoing_segments(leg), &[inbound[i]]);
    }
}

#[test]
fn mixed_segment_kinds_are_kept() {
    let mut builder = NetworkBuilder::new();
    let a = builder.add_node("A");
    let b = builder.add_node("B");
    let micro = builder.add_segment("micro", a, b, SegmentKind::Microscopic);

    let network = builder.build().unwrap();
    assert_eq!(
        network.segment(micro).unwrap().kind,
        SegmentKind::Microscopic
    );
}

#[test]
fn network_accessors_out_of_range() {
    let mut builder = NetworkBuilder::new();
    let a = builder.add_node("A");
    let network = builder.build().unwrap();

    assert_eq!(network.node(a).unwrap().name, "A");
    let missing = nl_core::NodeId::from_index(42);
    assert!(network.node(missing).is_none());
    assert!(network.incoming_segments(missing).is_empty());
    assert!(network.outgoing_segments(missing).is_empty());
}

#[test]
fn rejects_non_finite_capacity() {
    let mut builder = NetworkBuilder::new();
    let a = builder.add_node("A");
    let b = builder.add_node("B");
    builder.add_macroscopic_segment("S", a, b, 1, f64::NAN);

    let err = builder.build().unwrap_err();
    assert!(err.to_string().contains("invalid capacity"));
}

#[test]
fn require_node_reports_missing_node() {
    let network = NetworkBuilder::new().build().unwrap();
    let err = network
        .require_node(nl_core::NodeId::from_index(0))
        .unwrap_err();
    assert_eq!(
        err,
        nl_network::NetworkError::NodeNotFound {
            node: nl_core::NodeId::from_index(0)
        }
    );
}
