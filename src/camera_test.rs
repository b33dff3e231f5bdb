#![allow(clippy::clone_on_copy, clippy::float_cmp)]

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
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

#[test]
fn point_serde_roundtrip() {
    let p = Point::new(1.5, -2.5);
    let json = serde_json::to_string(&p).unwrap();
    let back: Point = serde_json::from_str(&json).unwrap();
    assert_eq!(p, back);
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

#[test]
fn identity_camera_converts_verbatim() {
    let cam = Camera::default();
    let p = Point::new(123.0, -45.0);
    assert!(point_approx_eq(cam.screen_to_world(p), p));
    assert!(point_approx_eq(cam.world_to_screen(p), p));
}

// --- Conversions ---

#[test]
fn pan_shifts_world_origin() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 1.0 };
    let world = cam.screen_to_world(Point::new(100.0, 50.0));
    assert!(point_approx_eq(world, Point::new(0.0, 0.0)));
}

#[test]
fn zoom_scales_distances() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(100.0, 100.0));
    assert!(point_approx_eq(world, Point::new(50.0, 50.0)));
    assert!(approx_eq(cam.screen_dist_to_world(10.0), 5.0));
}

#[test]
fn conversions_roundtrip() {
    let cam = Camera { pan_x: -37.5, pan_y: 12.0, zoom: 1.7 };
    let p = Point::new(86.6, -100.0);
    let back = cam.world_to_screen(cam.screen_to_world(p));
    assert!(point_approx_eq(back, p));
}

// --- Center / move_center ---

#[test]
fn default_center_is_viewport_midpoint() {
    let cam = Camera::default();
    let c = cam.center(800.0, 600.0);
    assert!(point_approx_eq(c, Point::new(400.0, 300.0)));
}

#[test]
fn move_center_recenters_viewport() {
    let mut cam = Camera::default();
    cam.move_center(Point::new(100.0, 100.0), 800.0, 600.0);
    let c = cam.center(800.0, 600.0);
    assert!(point_approx_eq(c, Point::new(100.0, 100.0)));
}

#[test]
fn move_center_respects_zoom() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 2.0 };
    cam.move_center(Point::new(10.0, 20.0), 800.0, 600.0);
    assert!(point_approx_eq(cam.center(800.0, 600.0), Point::new(10.0, 20.0)));
    assert_eq!(cam.zoom, 2.0);
}

// --- Zoom clamp ---

#[test]
fn set_zoom_clamps_to_upper_limit() {
    let mut cam = Camera::default();
    cam.set_zoom(10.0, 800.0, 600.0);
    assert_eq!(cam.zoom, MAX_ZOOM);
}

#[test]
fn set_zoom_clamps_to_lower_limit() {
    let mut cam = Camera::default();
    cam.set_zoom(0.01, 800.0, 600.0);
    assert_eq!(cam.zoom, MIN_ZOOM);
}

#[test]
fn set_zoom_preserves_center() {
    let mut cam = Camera::default();
    cam.move_center(Point::new(200.0, -50.0), 800.0, 600.0);
    cam.set_zoom(2.0, 800.0, 600.0);
    assert!(point_approx_eq(cam.center(800.0, 600.0), Point::new(200.0, -50.0)));
}
