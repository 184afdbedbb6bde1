//! Synthetic three-section lane network.
//!
//! A two-lane approach (section 10) feeding a stop-line section (11), plus a
//! bus-only slip lane (12) that has a center-line but no painted edges.
//! Coordinates are metres in a local projected frame.

use rn_core::{CenterLine, LaneAttributes, LaneEdge, LaneNetwork, LaneNetworkBuilder, Point, SectionId};

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

pub fn build_network() -> LaneNetwork {
    let mut b = LaneNetworkBuilder::with_capacity(6, 4);

    let approach  = SectionId(10);
    let stop_line = SectionId(11);
    let slip      = SectionId(12);

    // Edges are added out of canonical order on purpose; the exporter sorts.
    b.add_lane_edge(LaneEdge::new(approach, "solid",  1, pts(&[(0.0, 7.2), (120.4, 7.6)])))
        .add_lane_edge(LaneEdge::new(approach, "dashed", 0, pts(&[(0.0, 3.6), (60.2, 3.7), (120.5, 3.8)])))
        .add_lane_edge(LaneEdge::new(approach, "solid",  0, pts(&[(0.0, 0.0), (120.5, 0.1)])))
        .add_lane_edge(LaneEdge::new(stop_line, "solid", 0, pts(&[(120.5, 0.1), (135.0, 0.0)])))
        .add_lane_edge(LaneEdge::new(stop_line, "stop",  0, pts(&[(135.0, 0.0), (135.0, 7.5)])))
        .add_lane_edge(LaneEdge::new(stop_line, "solid", 1, pts(&[(120.4, 7.6), (135.0, 7.5)])));

    let through = LaneAttributes {
        can_go_straight:       true,
        can_change_lane_left:  true,
        can_change_lane_right: true,
        is_vehicle_lane:       true,
        ..Default::default()
    };
    let turning = LaneAttributes {
        can_turn_left:   true,
        can_stop_here:   true,
        is_vehicle_lane: true,
        ..Default::default()
    };
    let bus = LaneAttributes {
        can_turn_right:        true,
        is_whole_day_bus_lane: true,
        can_stop_here:         true,
        ..Default::default()
    };

    b.add_center_line(CenterLine::new(approach, "lane", 1, pts(&[(0.0, 5.4), (120.45, 5.7)]), turning))
        .add_center_line(CenterLine::new(approach, "lane", 0, pts(&[(0.0, 1.8), (120.5, 1.95)]), through))
        .add_center_line(CenterLine::new(slip, "bus", 0, pts(&[(110.0, -2.0), (130.5, -12.5)]), bus));

    b.build()
}
