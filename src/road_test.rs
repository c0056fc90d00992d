use std::f64::consts::FRAC_PI_2;

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn east_road() -> StraightRoad {
    StraightRoad {
        origin: Point::new(10.0, 20.0),
        heading: 0.0,
        length: 500.0,
        lanes: 2,
        lane_width: 3.5,
    }
}

#[test]
fn straight_road_position_along_heading() {
    let road = east_road();
    let p = road.position_at(100.0);
    assert!(approx_eq(p.x, 110.0));
    assert!(approx_eq(p.y, 20.0));
}

#[test]
fn straight_road_north_heading() {
    let road = StraightRoad { heading: FRAC_PI_2, ..east_road() };
    let p = road.position_at(50.0);
    assert!(approx_eq(p.x, 10.0));
    assert!(approx_eq(p.y, 70.0));
    assert!(approx_eq(road.heading_at(3.0), FRAC_PI_2));
}

#[test]
fn crossing_length_spans_all_lanes() {
    let road = StraightRoad { lanes: 3, ..east_road() };
    assert!(approx_eq(road.crossing_length(), 10.5));
}

#[test]
fn nearest_u_projects_and_clamps() {
    let road = east_road();
    assert!(approx_eq(road.nearest_u(Point::new(60.0, 35.0)), 50.0));
    assert!(approx_eq(road.nearest_u(Point::new(-100.0, 20.0)), 0.0));
    assert!(approx_eq(road.nearest_u(Point::new(9000.0, 20.0)), 500.0));
}

#[test]
fn road_map_lookup_and_remove() {
    let mut map = RoadMap::new();
    assert!(map.is_empty());
    map.insert(RoadId(7), east_road());
    assert_eq!(map.len(), 1);
    assert!(map.road(RoadId(7)).is_some());
    assert!(map.road(RoadId(8)).is_none());
    assert!(map.remove(RoadId(7)).is_some());
    assert!(map.road(RoadId(7)).is_none());
}
