#![allow(clippy::float_cmp)]

use super::*;

fn token_at_home(slot: Point) -> SignToken {
    let mut t = SignToken::new(SpeedCategory::initial_for(0));
    t.set_depot(slot);
    t
}

// =============================================================
// Derived flags
// =============================================================

#[test]
fn new_token_rests_in_depot() {
    let t = SignToken::new(SpeedCategory::initial_for(1));
    assert!(t.in_depot());
    assert!(!t.is_active());
    assert!(!t.is_picked());
    assert!(t.road().is_none());
    assert!(t.longitudinal_position() < 0.0);
}

#[test]
fn on_road_reports_road_and_u() {
    let mut t = token_at_home(Point::new(0.0, 0.0));
    t.state = TokenState::OnRoad { road: RoadId(3), u: 42.0 };
    assert!(t.is_active());
    assert!(!t.in_depot());
    assert_eq!(t.road(), Some(RoadId(3)));
    assert_eq!(t.longitudinal_position(), 42.0);
}

#[test]
fn picked_is_neither_active_nor_home() {
    let mut t = token_at_home(Point::new(0.0, 0.0));
    t.state = TokenState::Picked;
    assert!(t.is_picked());
    assert!(!t.is_active());
    assert!(!t.in_depot());
    assert_eq!(t.longitudinal_position(), OFF_ROAD_U);
}

#[test]
fn value_follows_category() {
    let mut t = SignToken::new(SpeedCategory::NO_LIMIT);
    assert!((t.value_mps() - 200.0 / 3.6).abs() < 1e-9);
    t.set_category(SpeedCategory::initial_for(4));
    assert!((t.value_mps() - 120.0 / 3.6).abs() < 1e-9);
    assert_eq!(t.asset(), SpeedCategory::initial_for(4).asset_key());
}

// =============================================================
// Slots
// =============================================================

#[test]
fn set_depot_moves_resting_token() {
    let t = token_at_home(Point::new(5.0, 6.0));
    assert_eq!(t.position(), Point::new(5.0, 6.0));
    assert_eq!(t.depot(), Point::new(5.0, 6.0));
}

#[test]
fn set_depot_leaves_travelling_token() {
    let mut t = token_at_home(Point::new(5.0, 6.0));
    t.state = TokenState::Returning;
    t.position = Point::new(100.0, 100.0);
    t.set_depot(Point::new(7.0, 8.0));
    assert_eq!(t.position(), Point::new(100.0, 100.0));
    assert_eq!(t.depot(), Point::new(7.0, 8.0));
}

// =============================================================
// Zoom-back step
// =============================================================

#[test]
fn step_home_moves_full_step() {
    let mut t = token_at_home(Point::new(0.0, 0.0));
    t.state = TokenState::Returning;
    t.position = Point::new(100.0, 0.0);
    t.step_home(10.0);
    assert!((t.position().x - 90.0).abs() < 1e-9);
    assert!(t.is_returning());
}

#[test]
fn step_home_snaps_within_one_step() {
    let mut t = token_at_home(Point::new(0.0, 0.0));
    t.state = TokenState::Returning;
    t.position = Point::new(6.0, 8.0);
    t.step_home(10.0);
    assert_eq!(t.position(), Point::new(0.0, 0.0));
    assert!(t.in_depot());
}

#[test]
fn step_home_snaps_at_exact_step() {
    let mut t = token_at_home(Point::new(0.0, 0.0));
    t.state = TokenState::Returning;
    t.position = Point::new(0.0, 10.0);
    t.step_home(10.0);
    assert!(t.in_depot());
}

#[test]
fn step_home_snaps_from_non_finite_position() {
    let mut t = token_at_home(Point::new(100.0, 100.0));
    t.state = TokenState::Returning;
    t.position = Point::new(f64::NAN, f64::NAN);
    t.step_home(12.0);
    assert!(t.in_depot());
    assert_eq!(t.position(), Point::new(100.0, 100.0));

    t.state = TokenState::Returning;
    t.position = Point::new(f64::INFINITY, 0.0);
    t.step_home(12.0);
    assert!(t.in_depot());
}

#[test]
fn step_home_ignores_other_states() {
    let mut t = token_at_home(Point::new(0.0, 0.0));
    t.state = TokenState::Picked;
    t.position = Point::new(50.0, 50.0);
    t.step_home(10.0);
    assert_eq!(t.position(), Point::new(50.0, 50.0));
    assert!(t.is_picked());
}

#[test]
fn state_serializes_tagged() {
    let json = serde_json::to_value(TokenState::OnRoad { road: RoadId(1), u: 2.5 }).unwrap();
    assert_eq!(json["state"], "on_road");
    assert_eq!(json["road"], 1);
    assert_eq!(json["u"], 2.5);
}

#[test]
fn token_serializes_with_tagged_state() {
    let mut t = token_at_home(Point::new(5.0, 6.0));
    t.state = TokenState::OnRoad { road: RoadId(2), u: 7.5 };
    let json = serde_json::to_value(&t).unwrap();
    assert_eq!(json["state"]["state"], "on_road");
    assert_eq!(json["depot"]["x"], 5.0);
    assert_eq!(json["category"], 6);
}
