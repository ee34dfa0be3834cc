use std::{io::Write, sync::Arc, thread};

use crossramp_core::prelude::*;
use geo::Point;

const REGION: RegionId = RegionId(42);

fn seg(feature_id: u32, is_forward: bool) -> Segment {
    Segment::new(REGION, feature_id, 0, is_forward)
}

/// Two bidirectional transitions, the first entering forward, the second
/// entering backward; the pair enter(1) -> exit(2) has no route.
fn two_transition_ramp() -> Ramp {
    let mut builder = RampBuilder::new(REGION);
    builder.add_transition(1, 0, false, true, Point::new(0.0, 0.0), Point::new(0.0, 1.0));
    builder.add_transition(2, 0, false, false, Point::new(5.0, 0.0), Point::new(5.0, 1.0));

    let unreachable = (seg(1, true), seg(2, true));
    builder.fill_weights(move |enter, exit| {
        if (*enter, *exit) == unreachable {
            None
        } else {
            Some(10.4)
        }
    })
}

#[test]
fn end_to_end_constant_weights() {
    let ramp = two_transition_ramp();

    assert_eq!(ramp.enters(), &[seg(1, true), seg(2, false)]);
    assert_eq!(ramp.exits(), &[seg(1, false), seg(2, true)]);
    assert_eq!(ramp.weights().len(), 4);

    for weight in ramp.weights().iter().filter(|w| w.is_route()) {
        assert_eq!(weight.secs(), Some(11));
    }
    assert_eq!(ramp.stats().no_routes, 1);

    let enter_idx = ramp
        .transition(&Key::new(1, 0))
        .and_then(Transition::enter_index)
        .expect("transition 1 has an enter");
    let entry = ramp.enters()[enter_idx as usize];
    assert_eq!(ramp.outgoing_edges(&entry), vec![(seg(1, false), 11.0)]);
    assert_eq!(
        ramp.outgoing_edges(&seg(2, false)),
        vec![(seg(1, false), 11.0), (seg(2, true), 11.0)]
    );
    assert_eq!(ramp.ingoing_edges(&seg(2, true)), vec![(seg(2, false), 11.0)]);
}

#[test]
fn edge_lists_match_weight_matrix() {
    let mut builder = RampBuilder::new(REGION);
    for feature_id in 0..6 {
        builder.add_transition(
            feature_id,
            0,
            feature_id % 3 == 0,
            feature_id % 2 == 0,
            Point::new(f64::from(feature_id), 0.0),
            Point::new(f64::from(feature_id), 1.0),
        );
    }
    let ramp = builder.fill_weights(|enter, exit| {
        let cost = f64::from(enter.feature_id * 7 + exit.feature_id) / 3.0;
        ((enter.feature_id + exit.feature_id) % 4 != 1).then_some(cost)
    });

    let num_exits = ramp.exits().len();
    assert_eq!(ramp.weights().len(), ramp.enters().len() * num_exits);

    for (i, enter) in ramp.enters().iter().enumerate() {
        let edges = ramp.outgoing_edges(enter);
        assert!(edges.len() <= num_exits);

        let expected: Vec<_> = ramp
            .exits()
            .iter()
            .enumerate()
            .filter(|(j, _)| ramp.weights()[i * num_exits + j].is_route())
            .map(|(j, exit)| (*exit, ramp.weights()[i * num_exits + j].as_f64()))
            .collect();
        assert_eq!(edges, expected);
    }

    for (j, exit) in ramp.exits().iter().enumerate() {
        let edges = ramp.ingoing_edges(exit);
        let expected = (0..ramp.enters().len())
            .filter(|i| ramp.weight(*i, j).is_some())
            .count();
        assert_eq!(edges.len(), expected);
    }
}

#[test]
fn enters_are_incoming_and_exits_outgoing() {
    let ramp = two_transition_ramp();

    for enter in ramp.enters() {
        assert!(ramp.is_transition(enter, false));
        assert!(!ramp.is_transition(enter, true));
    }
    for exit in ramp.exits() {
        assert!(ramp.is_transition(exit, true));
        assert!(!ramp.is_transition(exit, false));
    }
}

#[test]
fn serde_round_trip_preserves_queries() {
    let ramp = two_transition_ramp();

    let json = serde_json::to_string(&ramp).unwrap();
    let restored: Ramp = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.to_parts(), ramp.to_parts());
    for segment in ramp.enters().iter().chain(ramp.exits()) {
        for is_outgoing in [false, true] {
            assert_eq!(
                restored.is_transition(segment, is_outgoing),
                ramp.is_transition(segment, is_outgoing)
            );
        }
        for want_front in [false, true] {
            assert_eq!(
                restored.point(segment, want_front),
                ramp.point(segment, want_front)
            );
        }
    }
    for enter in ramp.enters() {
        assert_eq!(restored.outgoing_edges(enter), ramp.outgoing_edges(enter));
    }
    for exit in ramp.exits() {
        assert_eq!(restored.ingoing_edges(exit), ramp.ingoing_edges(exit));
    }
}

#[test]
fn shared_cross_id_survives_round_trip() {
    let mut builder = RampBuilder::new(REGION);
    for feature_id in [5, 3] {
        builder.push(BoundaryTransition {
            cross_id: Some(100),
            feature_id,
            segment_index: 0,
            one_way: false,
            forward_is_enter: true,
            back_point: Point::new(0.0, 0.0),
            front_point: Point::new(1.0, 0.0),
        });
    }
    let ramp = builder.fill_weights(|_, _| Some(1.0));

    let json = serde_json::to_string(&ramp).unwrap();
    let restored: Ramp = serde_json::from_str(&json).unwrap();

    for is_enter in [true, false] {
        assert_eq!(
            restored.transition_segment(100, 0, is_enter),
            ramp.transition_segment(100, 0, is_enter)
        );
    }
    assert_eq!(ramp.transition_segment(100, 0, true), Some(seg(5, true)));
    assert_eq!(restored.cross_id(&seg(3, true)), None);
}

#[test]
fn corrupted_json_is_rejected() {
    let mut parts = two_transition_ramp().into_parts();
    parts.weights.push(Weight::from_secs(1));
    let json = serde_json::to_string(&parts).unwrap();

    assert!(serde_json::from_str::<Ramp>(&json).is_err());
}

#[test]
fn concurrent_readers_share_one_ramp() {
    let ramp = Arc::new(two_transition_ramp());
    let expected = ramp.outgoing_edges(&seg(2, false));

    thread::scope(|scope| {
        for _ in 0..4 {
            let ramp = Arc::clone(&ramp);
            let expected = expected.clone();
            scope.spawn(move || {
                for _ in 0..100 {
                    assert_eq!(ramp.outgoing_edges(&seg(2, false)), expected);
                    assert!(ramp.is_transition(&seg(1, true), false));
                }
            });
        }
    });
}

#[test]
fn region_file_to_ramp() {
    let region = r#"{
        "region": 42,
        "roads": [
            { "feature_id": 1, "segment_index": 0, "time": 4, "two_way": true },
            { "feature_id": 2, "segment_index": 0, "time": 6, "two_way": true },
            { "feature_id": 10, "segment_index": 0, "time": 20, "two_way": true }
        ],
        "connections": [
            { "from": { "feature_id": 1, "segment_index": 0 }, "to": { "feature_id": 10, "segment_index": 0 } },
            { "from": { "feature_id": 10, "segment_index": 0 }, "to": { "feature_id": 2, "segment_index": 0, "forward": false }, "turn_penalty": 5 }
        ],
        "boundary": [
            {
                "cross_id": 501, "feature_id": 1, "segment_index": 0,
                "road_mask": 15, "one_way_mask": 0, "forward_is_enter": true,
                "back_point": { "x": 0.0, "y": 0.0 }, "front_point": { "x": 1.0, "y": 0.0 }
            },
            {
                "cross_id": 502, "feature_id": 2, "segment_index": 0,
                "road_mask": 4, "one_way_mask": 0, "forward_is_enter": true,
                "back_point": { "x": 9.0, "y": 0.0 }, "front_point": { "x": 10.0, "y": 0.0 }
            }
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(region.as_bytes()).unwrap();

    let region = RegionFile::load(file.path()).unwrap();
    let car = build_ramp(&region, &BuildConfig::default()).unwrap();

    // 1+ (4s) -> 10+ (20s) -> 2- (6s + 5s turn penalty)
    assert_eq!(car.outgoing_edges(&seg(1, true)), vec![(seg(2, false), 35.0)]);
    assert_eq!(car.transition_segment(502, 0, false), Some(seg(2, false)));
    assert_eq!(car.cross_id(&seg(1, true)), Some(501));

    // Road 2 is closed to pedestrians.
    let config = BuildConfig {
        vehicle: VehicleType::Pedestrian,
        ..BuildConfig::default()
    };
    let foot = build_ramp(&region, &config).unwrap();
    assert_eq!(foot.transition_count(), 1);
    assert!(foot.outgoing_edges(&seg(1, true)).is_empty());
}
