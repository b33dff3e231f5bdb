#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Shape {
    Shape::Line(Segment::new(pt(x1, y1), pt(x2, y2)))
}

// --- Segment ---

#[test]
fn segment_same_as_ignores_direction() {
    let a = Segment::new(pt(0.0, 0.0), pt(100.0, 0.0));
    let b = Segment::new(pt(100.0, 0.0), pt(0.0, 0.0));
    assert!(a.same_as(&b));
    assert!(b.same_as(&a));
}

#[test]
fn segment_same_as_rejects_different_segments() {
    let a = Segment::new(pt(0.0, 0.0), pt(100.0, 0.0));
    let b = Segment::new(pt(0.0, 0.0), pt(0.0, 100.0));
    assert!(!a.same_as(&b));
}

#[test]
fn segment_length() {
    let s = Segment::new(pt(0.0, 0.0), pt(3.0, 4.0));
    assert_eq!(s.length(), 5.0);
}

#[test]
fn segment_touches_and_opposite() {
    let s = Segment::new(pt(0.0, 0.0), pt(100.0, 0.0));
    assert!(s.touches(pt(0.0, 0.0)));
    assert!(s.touches(pt(100.0, 0.0)));
    assert!(!s.touches(pt(50.0, 0.0)));
    assert_eq!(s.opposite(pt(0.0, 0.0)), pt(100.0, 0.0));
    assert_eq!(s.opposite(pt(100.0, 0.0)), pt(0.0, 0.0));
}

#[test]
fn circle_radius_from_rim_point() {
    let c = CircleShape::new(pt(0.0, 0.0), pt(3.0, 4.0));
    assert_eq!(c.radius(), 5.0);
}

// --- Commit / remove ---

#[test]
fn commit_assigns_increasing_ids() {
    let mut doc = DocStore::new();
    let id1 = doc.commit(line(0.0, 0.0, 100.0, 0.0)).id;
    let id2 = doc.commit(line(0.0, 0.0, 0.0, 100.0)).id;
    assert_eq!(id1, ShapeId(1));
    assert_eq!(id2, ShapeId(2));
}

#[test]
fn remove_returns_the_item() {
    let mut doc = DocStore::new();
    let id = doc.commit(line(0.0, 0.0, 100.0, 0.0)).id;
    let removed = doc.remove(id);
    assert!(removed.is_some_and(|item| item.id == id));
    assert!(doc.is_empty());
    assert!(doc.get(id).is_none());
}

#[test]
fn remove_unknown_id_is_none() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    assert!(doc.remove(ShapeId(99)).is_none());
    assert_eq!(doc.len(), 1);
}

#[test]
fn removed_ids_are_never_reused() {
    let mut doc = DocStore::new();
    let id = doc.commit(line(0.0, 0.0, 100.0, 0.0)).id;
    doc.remove(id);
    let next = doc.commit(line(0.0, 0.0, 0.0, 100.0)).id;
    assert_ne!(next, id);
}

// --- Undo / redo ---

#[test]
fn undo_moves_the_last_commit_aside() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    let id2 = doc.commit(line(0.0, 0.0, 0.0, 100.0)).id;
    assert_eq!(doc.undo(), Some(id2));
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.undone_len(), 1);
}

#[test]
fn redo_restores_lifo() {
    let mut doc = DocStore::new();
    let id1 = doc.commit(line(0.0, 0.0, 100.0, 0.0)).id;
    let id2 = doc.commit(line(0.0, 0.0, 0.0, 100.0)).id;
    doc.undo();
    doc.undo();
    assert_eq!(doc.redo().map(|item| item.id), Some(id1));
    assert_eq!(doc.redo().map(|item| item.id), Some(id2));
    assert_eq!(doc.len(), 2);
}

#[test]
fn n_undos_then_n_redos_restore_the_document() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    doc.commit(line(0.0, 0.0, 0.0, 100.0));
    doc.commit(line(100.0, 0.0, 0.0, 100.0));
    let before: Vec<DrawingItem> = doc.items().to_vec();
    for _ in 0..3 {
        assert!(doc.undo().is_some());
    }
    assert!(doc.is_empty());
    for _ in 0..3 {
        assert!(doc.redo().is_some());
    }
    assert_eq!(doc.items(), before.as_slice());
}

#[test]
fn undo_on_empty_document_is_none() {
    let mut doc = DocStore::new();
    assert!(doc.undo().is_none());
}

#[test]
fn redo_with_nothing_undone_is_none() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    assert!(doc.redo().is_none());
}

#[test]
fn commit_discards_the_undone_sequence() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    doc.commit(line(0.0, 0.0, 0.0, 100.0));
    doc.undo();
    doc.commit(line(100.0, 0.0, 0.0, 100.0));
    assert_eq!(doc.undone_len(), 0);
    assert!(doc.redo().is_none());
}

// --- Clear ---

#[test]
fn clear_resets_items_history_and_ids() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    doc.commit(line(0.0, 0.0, 0.0, 100.0));
    doc.undo();
    doc.clear();
    assert!(doc.is_empty());
    assert_eq!(doc.undone_len(), 0);
    assert_eq!(doc.commit(line(0.0, 0.0, 100.0, 0.0)).id, ShapeId(1));
}

// --- Accessors ---

#[test]
fn segments_and_circles_filter_by_kind() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    doc.commit(Shape::Circle(CircleShape::new(pt(0.0, 0.0), pt(50.0, 0.0))));
    doc.commit(Shape::Pencil(Stroke { points: vec![pt(0.0, 0.0), pt(1.0, 1.0)] }));
    assert_eq!(doc.segments().len(), 1);
    assert_eq!(doc.circles().len(), 1);
    assert_eq!(doc.len(), 3);
}

#[test]
fn segment_lookup_by_id() {
    let mut doc = DocStore::new();
    let line_id = doc.commit(line(0.0, 0.0, 100.0, 0.0)).id;
    let circle_id = doc.commit(Shape::Circle(CircleShape::new(pt(0.0, 0.0), pt(50.0, 0.0)))).id;
    assert!(doc.segment(line_id).is_some());
    assert!(doc.segment(circle_id).is_none());
}

#[test]
fn duplicate_detection_ignores_direction() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    let reversed = Segment::new(pt(100.0, 0.0), pt(0.0, 0.0));
    assert!(doc.has_duplicate_segment(&reversed));
    let other = Segment::new(pt(0.0, 0.0), pt(0.0, 100.0));
    assert!(!doc.has_duplicate_segment(&other));
}

// --- Snapshots ---

#[test]
fn snapshot_roundtrip_preserves_items() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    doc.commit(Shape::Circle(CircleShape::new(pt(10.0, 10.0), pt(60.0, 10.0))));
    let json = doc.to_snapshot().unwrap();

    let mut restored = DocStore::new();
    restored.load_snapshot(&json).unwrap();
    assert_eq!(restored.items(), doc.items());
}

#[test]
fn snapshot_load_resumes_id_progression() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    doc.commit(line(0.0, 0.0, 0.0, 100.0));
    let json = doc.to_snapshot().unwrap();

    let mut restored = DocStore::new();
    restored.load_snapshot(&json).unwrap();
    assert_eq!(restored.commit(line(100.0, 0.0, 0.0, 100.0)).id, ShapeId(3));
}

#[test]
fn snapshot_load_discards_undone_items() {
    let mut doc = DocStore::new();
    doc.commit(line(0.0, 0.0, 100.0, 0.0));
    doc.undo();
    doc.load_snapshot("[]").unwrap();
    assert!(doc.redo().is_none());
}

#[test]
fn snapshot_rejects_duplicate_ids() {
    let mut doc = DocStore::new();
    let json = r#"[
        {"id":1,"shape":{"type":"line","start":{"x":0.0,"y":0.0},"end":{"x":100.0,"y":0.0}}},
        {"id":1,"shape":{"type":"line","start":{"x":0.0,"y":0.0},"end":{"x":0.0,"y":100.0}}}
    ]"#;
    assert!(matches!(doc.load_snapshot(json), Err(SnapshotError::DuplicateId(ShapeId(1)))));
}

#[test]
fn snapshot_rejects_zero_length_segments() {
    let mut doc = DocStore::new();
    let json = r#"[
        {"id":1,"shape":{"type":"line","start":{"x":5.0,"y":5.0},"end":{"x":5.0,"y":5.0}}}
    ]"#;
    assert!(matches!(doc.load_snapshot(json), Err(SnapshotError::DegenerateSegment(ShapeId(1)))));
}

#[test]
fn snapshot_rejects_malformed_json() {
    let mut doc = DocStore::new();
    assert!(matches!(doc.load_snapshot("not json"), Err(SnapshotError::Json(_))));
}
