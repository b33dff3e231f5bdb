//! Document model: drawing items, the committed store, and undo history.
//!
//! This module defines the primitives a sketch is made of (`Segment`,
//! `CircleShape`, `Stroke`), the tagged union committed to the document
//! (`DrawingItem`), and the runtime store that owns all committed items
//! (`DocStore`). The store doubles as the history stack: undo moves the last
//! committed item onto the undone sequence, redo moves it back, and any new
//! commit discards the undone sequence (no branching history).
//!
//! Data flows into this layer from the input engine (commits) and from
//! snapshots (JSON deserialization). The decomposer reads the committed
//! segment set via [`DocStore::segments`].

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::camera::Point;
use crate::geom;

/// Unique identifier for a committed drawing item. Ids are assigned at
/// commit and increase monotonically within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A straight segment between two world-space points.
///
/// Undirected for comparison purposes: start and end are interchangeable.
/// Never zero-length once committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Whether this and `other` are the same undirected segment.
    #[must_use]
    pub fn same_as(&self, other: &Segment) -> bool {
        (geom::same_point(self.start, other.start) && geom::same_point(self.end, other.end))
            || (geom::same_point(self.start, other.end) && geom::same_point(self.end, other.start))
    }

    /// Segment length in world units.
    #[must_use]
    pub fn length(&self) -> f64 {
        geom::distance(self.start, self.end)
    }

    /// Whether either endpoint equals `p`.
    #[must_use]
    pub fn touches(&self, p: Point) -> bool {
        geom::same_point(self.start, p) || geom::same_point(self.end, p)
    }

    /// The endpoint opposite to `p`. Callers must pass one of the two
    /// endpoints; passing anything else returns `end`.
    #[must_use]
    pub fn opposite(&self, p: Point) -> Point {
        if geom::same_point(self.start, p) { self.end } else { self.start }
    }
}

/// A circle defined by its center and a point on its rim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Point,
    pub edge: Point,
}

impl CircleShape {
    #[must_use]
    pub fn new(center: Point, edge: Point) -> Self {
        Self { center, edge }
    }

    /// Radius in world units, derived from center and rim point.
    #[must_use]
    pub fn radius(&self) -> f64 {
        geom::distance(self.center, self.edge)
    }
}

/// A free-hand polyline recorded point by point while the pencil drags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
}

/// The geometric payload of a drawing item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Line(Segment),
    Circle(CircleShape),
    Pencil(Stroke),
}

/// A committed drawing item. Stored in commit order, which is also z-order
/// and undo order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingItem {
    pub id: ShapeId,
    pub shape: Shape,
}

/// Snapshot hydration failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate shape id {0}")]
    DuplicateId(ShapeId),
    #[error("shape {0} is a zero-length segment")]
    DegenerateSegment(ShapeId),
}

/// In-memory store of committed drawing items plus the undone sequence.
#[derive(Debug, Default)]
pub struct DocStore {
    committed: Vec<DrawingItem>,
    undone: Vec<DrawingItem>,
    next_id: u64,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a shape, assigning it the next id. Clears the undone sequence.
    pub fn commit(&mut self, shape: Shape) -> &DrawingItem {
        self.next_id += 1;
        let item = DrawingItem { id: ShapeId(self.next_id), shape };
        debug!(id = %item.id, "commit");
        self.undone.clear();
        self.committed.push(item);
        &self.committed[self.committed.len() - 1]
    }

    /// Remove a committed item by id, returning it if present.
    pub fn remove(&mut self, id: ShapeId) -> Option<DrawingItem> {
        let idx = self.committed.iter().position(|item| item.id == id)?;
        debug!(%id, "remove");
        Some(self.committed.remove(idx))
    }

    /// Look up a committed item by id.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&DrawingItem> {
        self.committed.iter().find(|item| item.id == id)
    }

    /// Move the most recent commit onto the undone sequence. Returns the id
    /// of the item taken off the document.
    pub fn undo(&mut self) -> Option<ShapeId> {
        let item = self.committed.pop()?;
        let id = item.id;
        debug!(%id, "undo");
        self.undone.push(item);
        Some(id)
    }

    /// Move the most recently undone item back onto the document, strictly
    /// LIFO.
    pub fn redo(&mut self) -> Option<&DrawingItem> {
        let item = self.undone.pop()?;
        debug!(id = %item.id, "redo");
        self.committed.push(item);
        Some(&self.committed[self.committed.len() - 1])
    }

    /// Drop everything: committed items, undone items, and id progression.
    pub fn clear(&mut self) {
        debug!(committed = self.committed.len(), "clear");
        self.committed.clear();
        self.undone.clear();
        self.next_id = 0;
    }

    /// Committed items in commit order.
    #[must_use]
    pub fn items(&self) -> &[DrawingItem] {
        &self.committed
    }

    /// All committed line segments, in commit order.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        self.committed
            .iter()
            .filter_map(|item| match &item.shape {
                Shape::Line(seg) => Some(*seg),
                _ => None,
            })
            .collect()
    }

    /// The committed line segment with the given id, if that item is a line.
    #[must_use]
    pub fn segment(&self, id: ShapeId) -> Option<Segment> {
        match self.get(id)?.shape {
            Shape::Line(seg) => Some(seg),
            _ => None,
        }
    }

    /// All committed circles, in commit order.
    #[must_use]
    pub fn circles(&self) -> Vec<CircleShape> {
        self.committed
            .iter()
            .filter_map(|item| match &item.shape {
                Shape::Circle(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Whether an undirected duplicate of `seg` is already committed.
    #[must_use]
    pub fn has_duplicate_segment(&self, seg: &Segment) -> bool {
        self.segments().iter().any(|existing| existing.same_as(seg))
    }

    /// Number of committed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Returns `true` if nothing is committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Number of undone items available for redo.
    #[must_use]
    pub fn undone_len(&self) -> usize {
        self.undone.len()
    }

    /// Serialize the committed items as a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&self.committed)?)
    }

    /// Replace the document with a JSON snapshot. The undone sequence is
    /// discarded and the id counter resumes past the highest loaded id.
    ///
    /// # Errors
    ///
    /// Rejects malformed JSON, duplicate ids, and zero-length segments.
    pub fn load_snapshot(&mut self, json: &str) -> Result<(), SnapshotError> {
        let items: Vec<DrawingItem> = serde_json::from_str(json)?;
        let mut seen = std::collections::HashSet::new();
        let mut max_id = 0;
        for item in &items {
            if !seen.insert(item.id) {
                return Err(SnapshotError::DuplicateId(item.id));
            }
            if let Shape::Line(seg) = &item.shape {
                if seg.length() == 0.0 {
                    return Err(SnapshotError::DegenerateSegment(item.id));
                }
            }
            max_id = max_id.max(item.id.0);
        }
        debug!(items = items.len(), "load snapshot");
        self.committed = items;
        self.undone.clear();
        self.next_id = max_id;
        Ok(())
    }
}
