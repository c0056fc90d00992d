#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_dist_pythagorean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!(approx_eq(a.dist2(b), 25.0));
    assert!(approx_eq(a.dist(b), 5.0));
}

#[test]
fn point_dist_is_symmetric() {
    let a = Point::new(-2.0, 7.5);
    let b = Point::new(11.0, -1.0);
    assert!(approx_eq(a.dist(b), b.dist(a)));
}

#[test]
fn point_dist_to_self_is_zero() {
    let p = Point::new(12.5, -3.0);
    assert_eq!(p.dist2(p), 0.0);
}

// --- Viewport ---

#[test]
fn viewport_min_side() {
    assert_eq!(Viewport::new(800.0, 600.0).min_side(), 600.0);
    assert_eq!(Viewport::new(300.0, 900.0).min_side(), 300.0);
}

#[test]
fn viewport_validity() {
    assert!(Viewport::new(1.0, 1.0).is_valid());
    assert!(!Viewport::new(0.0, 600.0).is_valid());
    assert!(!Viewport::new(800.0, -1.0).is_valid());
    assert!(!Viewport::new(f64::NAN, 600.0).is_valid());
    assert!(!Viewport::new(f64::INFINITY, 600.0).is_valid());
}

// --- WorldView ---

#[test]
fn world_view_default_scale_is_one() {
    assert_eq!(WorldView::default().scale, 1.0);
}

#[test]
fn world_to_pixel_flips_y() {
    let view = WorldView::new(2.0);
    let px = view.world_to_pixel(Point::new(10.0, 5.0));
    assert!(point_approx_eq(px, Point::new(20.0, -10.0)));
}

#[test]
fn pixel_to_world_inverts_world_to_pixel() {
    let view = WorldView::new(3.5);
    let world = Point::new(-4.0, 17.25);
    let back = view.pixel_to_world(view.world_to_pixel(world));
    assert!(point_approx_eq(back, world));
}

#[test]
fn len_to_pixels_scales() {
    let view = WorldView::new(4.0);
    assert!(approx_eq(view.len_to_pixels(2.5), 10.0));
}
