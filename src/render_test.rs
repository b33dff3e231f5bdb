#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// --- CanvasConfig ---

#[test]
fn config_defaults() {
    let config = CanvasConfig::default();
    assert_eq!(config.grid_size, 80.0);
    assert_eq!(config.line_width, 5.0);
    assert_eq!(config.unit, "cm");
    assert!(!config.show_sub_grid);
}

// --- GraphicsCache ---

#[test]
fn cache_starts_empty() {
    let cache: GraphicsCache<u32> = GraphicsCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
}

#[test]
fn insert_and_get_handles() {
    let mut cache = GraphicsCache::new();
    cache.insert(ShapeId(1), vec![10, 11]);
    assert_eq!(cache.get(ShapeId(1)), Some([10, 11].as_slice()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn insert_appends_to_an_existing_entry() {
    let mut cache = GraphicsCache::new();
    cache.insert(ShapeId(1), vec![10]);
    cache.insert(ShapeId(1), vec![11]);
    assert_eq!(cache.get(ShapeId(1)), Some([10, 11].as_slice()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn remove_yields_the_handles_to_tear_down() {
    let mut cache = GraphicsCache::new();
    cache.insert(ShapeId(1), vec![10, 11]);
    cache.insert(ShapeId(2), vec![20]);
    assert_eq!(cache.remove(ShapeId(1)), vec![10, 11]);
    assert_eq!(cache.len(), 1);
    assert!(cache.get(ShapeId(1)).is_none());
}

#[test]
fn remove_of_an_unknown_shape_is_empty() {
    let mut cache: GraphicsCache<u32> = GraphicsCache::new();
    assert!(cache.remove(ShapeId(7)).is_empty());
}

#[test]
fn drain_all_empties_the_cache() {
    let mut cache = GraphicsCache::new();
    cache.insert(ShapeId(1), vec![10]);
    cache.insert(ShapeId(2), vec![20, 21]);
    let mut drained = cache.drain_all();
    drained.sort_unstable();
    assert_eq!(drained, vec![10, 20, 21]);
    assert!(cache.is_empty());
}

// --- Label placement ---

#[test]
fn horizontal_segment_label_sits_below_the_midpoint() {
    let pos = label_position(pt(0.0, 0.0), pt(100.0, 0.0), 20.0);
    assert_eq!(pos, pt(50.0, 20.0));
}

#[test]
fn vertical_segment_label_sits_beside_the_midpoint() {
    let pos = label_position(pt(0.0, 0.0), pt(0.0, 100.0), 20.0);
    assert_eq!(pos, pt(20.0, 50.0));
}

#[test]
fn slanted_segment_label_is_offset_by_the_gap() {
    let pos = label_position(pt(0.0, 0.0), pt(100.0, 100.0), 20.0);
    let mid = pt(50.0, 50.0);
    let d = ((pos.x - mid.x).powi(2) + (pos.y - mid.y).powi(2)).sqrt();
    assert!((d - 20.0).abs() < 1e-9);
}

// --- Angle arcs ---

#[test]
fn arc_gap_stays_inside_the_shorter_arm() {
    // grid^2 * 0.5 / degrees = 80*80*0.5/90 is about 35.6, so the arm
    // quarter wins.
    let gap = arc_gap(100.0, 200.0, 80.0, 90.0);
    assert_eq!(gap, 25.0);
}

#[test]
fn arc_gap_shrinks_for_wide_angles() {
    let gap = arc_gap(400.0, 400.0, 80.0, 160.0);
    assert_eq!(gap, 80.0 * 80.0 * 0.5 / 160.0);
}

#[test]
fn arc_anchors_sit_on_the_arms() {
    let (a, b) = arc_anchors(pt(0.0, 0.0), pt(100.0, 0.0), pt(0.0, 100.0), 10.0);
    assert_eq!(a, pt(10.0, 0.0));
    assert_eq!(b, pt(0.0, 10.0));
}
