//! Rendering boundary: the host-implemented renderer, the per-shape
//! graphics cache, and label placement helpers.
//!
//! The core never draws. It hands the host committed items, previews, and
//! angle labels; the host rasterizes them and keeps whatever handles its
//! graphics layer returns in a [`GraphicsCache`] keyed by [`ShapeId`], so
//! invalidation is an explicit `remove` when the engine reports an item
//! gone. The placement helpers here compute where measurement labels and
//! angle arcs go, consuming only angle values and per-segment anchor
//! distances.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;

use crate::camera::{Camera, Point};
use crate::doc::{DrawingItem, Segment, ShapeId};
use crate::geom;

/// Read-only canvas configuration supplied by the host.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Pixels per grid unit.
    pub grid_size: f64,
    /// Stroke width in pixels.
    pub line_width: f64,
    /// Unit label appended to measurements, e.g. `"cm"`.
    pub unit: String,
    /// Whether the fractional sub-grid is drawn.
    pub show_sub_grid: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { grid_size: 80.0, line_width: 5.0, unit: "cm".into(), show_sub_grid: false }
    }
}

/// Host-implemented drawing surface.
///
/// `Handle` is whatever the host's graphics layer uses to identify drawn
/// primitives so they can be removed again.
pub trait Renderer {
    type Handle;

    /// Draw a committed item plus its measurement label, returning the
    /// handles created for it.
    fn render_item(
        &mut self,
        item: &DrawingItem,
        camera: &Camera,
        config: &CanvasConfig,
        editable: bool,
    ) -> Vec<Self::Handle>;
}

/// Owned graphics handles per committed shape.
///
/// Keys are stable [`ShapeId`]s assigned at commit; removing a shape's
/// entry yields the handles the host must tear down.
#[derive(Debug)]
pub struct GraphicsCache<H> {
    handles: HashMap<ShapeId, Vec<H>>,
}

impl<H> Default for GraphicsCache<H> {
    fn default() -> Self {
        Self { handles: HashMap::new() }
    }
}

impl<H> GraphicsCache<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record handles drawn for a shape, appending to any existing entry.
    pub fn insert(&mut self, id: ShapeId, handles: Vec<H>) {
        self.handles.entry(id).or_default().extend(handles);
    }

    /// Remove a shape's entry, returning the handles to tear down.
    pub fn remove(&mut self, id: ShapeId) -> Vec<H> {
        self.handles.remove(&id).unwrap_or_default()
    }

    /// Drain every entry, returning all handles. Used on clear and full
    /// redraws.
    pub fn drain_all(&mut self) -> Vec<H> {
        self.handles.drain().flat_map(|(_, handles)| handles).collect()
    }

    /// Handles currently cached for a shape.
    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&[H]> {
        self.handles.get(&id).map(Vec::as_slice)
    }

    /// Number of shapes with cached handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Where a segment's distance label goes: offset perpendicular from the
/// midpoint by `gap`, on the side determined by the segment's incline so
/// labels do not overlap the stroke.
#[must_use]
pub fn label_position(p1: Point, p2: Point, gap: f64) -> Point {
    let mid = geom::midpoint(p1, p2);
    let angle = (p2.y - p1.y).atan2(p2.x - p1.x);
    let delta_x = p2.x - p1.x;
    let delta_y = p2.y - p1.y;
    let threshold = 2.0;

    if delta_y.abs() < threshold {
        return Point::new(mid.x, mid.y + gap);
    }
    if delta_x.abs() < threshold {
        return Point::new(mid.x + gap, mid.y);
    }
    let side = if delta_y < 0.0 {
        angle - std::f64::consts::FRAC_PI_2
    } else {
        angle + std::f64::consts::FRAC_PI_2
    };
    let offset = if delta_y < 0.0 { gap } else { -gap };
    Point::new(mid.x + offset * side.cos(), mid.y + offset * side.sin())
}

/// Anchor distance from the vertex for an angle's arc: close enough to stay
/// inside both arms, shrinking further for wide angles.
#[must_use]
pub fn arc_gap(arm1_len: f64, arm2_len: f64, grid_size: f64, degrees: f64) -> f64 {
    (arm1_len.min(arm2_len) / 4.0).min(grid_size * grid_size * 0.5 / degrees)
}

/// The two points where an angle's arc meets its arms, `gap` away from the
/// vertex along each.
#[must_use]
pub fn arc_anchors(vertex: Point, arm_a: Point, arm_b: Point, gap: f64) -> (Point, Point) {
    (
        geom::point_at_distance(&Segment::new(vertex, arm_a), gap),
        geom::point_at_distance(&Segment::new(vertex, arm_b), gap),
    )
}
