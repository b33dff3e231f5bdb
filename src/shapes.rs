//! Cycle decomposition: classify the committed segment graph into lines,
//! triangles, and polygons with measured edges and angles.
//!
//! The committed segments induce an undirected graph over their unique
//! endpoints. A depth-first search records one traversal stack per connected
//! component; a back-edge closes the stack into a cycle. Stacks that
//! overshot the true cycle start are rotated to begin at the first repeated
//! vertex, with the overshoot prefix split off as standalone lines. Any
//! segment covered by no recorded result is still reported as a measured
//! line — nothing the user drew is dropped.
//!
//! All distances are grid-normalized and rounded to one decimal; angles are
//! rounded to whole degrees. The final vertex of a triangle/polygon gets its
//! angle inferred from the interior-angle-sum identity rather than measured,
//! so the reported angles always sum to exactly `(n−2)·180°`.

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::camera::Point;
use crate::consts::{ANGLE_PRECISION, DISTANCE_PRECISION};
use crate::doc::{CircleShape, DocStore, Segment};
use crate::geom;

/// A segment restated with its measured length in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredLine {
    pub start: Point,
    pub end: Point,
    /// Length in grid units, rounded to one decimal.
    pub distance: f64,
}

/// One interior angle of a classified polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredAngle {
    /// Whole degrees.
    pub degrees: f64,
    pub vertex: Point,
}

/// Edges and interior angles of a closed figure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonMeasurements {
    pub edges: Vec<MeasuredLine>,
    pub angles: Vec<MeasuredAngle>,
}

/// A circle restated with its derived radius in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredCircle {
    pub center: Point,
    pub edge: Point,
    /// Radius in grid units, rounded to one decimal.
    pub radius: f64,
}

/// A classified shape extracted from the committed document.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeResult {
    Line(MeasuredLine),
    Triangle(PolygonMeasurements),
    Polygon(PolygonMeasurements),
    Circle(MeasuredCircle),
}

/// Exact-identity key for a snapped point.
fn point_key(p: Point) -> (u64, u64) {
    (p.x.to_bits(), p.y.to_bits())
}

/// The unique endpoints referenced by any segment, in first-seen order,
/// plus the adjacency list over their indices.
fn build_graph(segments: &[Segment]) -> (Vec<Point>, Vec<Vec<usize>>) {
    let mut points: Vec<Point> = Vec::new();
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    for p in geom::points_of_segments(segments) {
        if let std::collections::hash_map::Entry::Vacant(slot) = index.entry(point_key(p)) {
            slot.insert(points.len());
            points.push(p);
        }
    }
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
    for (i, p) in points.iter().enumerate() {
        for seg in segments {
            if geom::same_point(seg.start, *p) {
                adjacency[i].push(index[&point_key(seg.end)]);
            } else if geom::same_point(seg.end, *p) {
                adjacency[i].push(index[&point_key(seg.start)]);
            }
        }
    }
    (points, adjacency)
}

/// Depth-first frame: the vertex, its traversal parent, and a cursor into
/// its adjacency list.
struct Frame {
    vertex: usize,
    parent: Option<usize>,
    next: usize,
}

/// Walk one component from `root`, recording at most one traversal stack.
///
/// The walk stops the moment a stack is recorded: either a back-edge to a
/// visited non-parent vertex closes a cycle, or an exhausted child branch
/// ends the path. Both leave the recorded stack ending at the revisited or
/// exhausted vertex, matching what the rotation step expects.
fn record_component(
    root: usize,
    adjacency: &[Vec<usize>],
    visited: &mut [bool],
    stacks: &mut Vec<Vec<usize>>,
) {
    let mut path: Vec<usize> = vec![root];
    let mut frames = vec![Frame { vertex: root, parent: None, next: 0 }];
    visited[root] = true;

    while let Some(frame) = frames.last_mut() {
        let vertex = frame.vertex;
        let parent = frame.parent;
        if frame.next >= adjacency[vertex].len() {
            frames.pop();
            path.pop();
            if let Some(caller) = frames.last() {
                // A child branch came back empty: the caller re-examines the
                // child as a now-visited neighbor and closes the stack there.
                if Some(vertex) != caller.parent {
                    path.push(vertex);
                    stacks.push(path);
                    return;
                }
            }
            continue;
        }
        let neighbor = adjacency[vertex][frame.next];
        frame.next += 1;
        if !visited[neighbor] {
            visited[neighbor] = true;
            path.push(neighbor);
            frames.push(Frame { vertex: neighbor, parent: Some(vertex), next: 0 });
            continue;
        }
        if Some(neighbor) != parent {
            path.push(neighbor);
            stacks.push(path);
            return;
        }
    }
}

/// The first vertex that repeats in the recorded stack, scanning left to
/// right; `None` when every vertex is distinct.
fn first_repeated(stack: &[usize]) -> Option<usize> {
    let mut seen = HashSet::new();
    stack.iter().copied().find(|v| !seen.insert(*v))
}

/// Vertex-index sequences for each result: closed cycles rotated to begin
/// at the true cycle start, and 2-entry entries for every dangling edge.
fn split_stacks(stacks: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    for stack in stacks {
        match first_repeated(&stack) {
            None => {
                for pair in stack.windows(2) {
                    result.push(vec![pair[0], pair[1]]);
                }
            }
            Some(start) => {
                let start_idx = stack.iter().position(|&v| v == start).unwrap_or(0);
                result.push(stack[start_idx..].to_vec());
                for i in 1..=start_idx {
                    result.push(vec![stack[i - 1], stack[i]]);
                }
            }
        }
    }
    result
}

fn measured_line(start: Point, end: Point, grid_size: f64) -> MeasuredLine {
    MeasuredLine {
        start,
        end,
        distance: geom::round_to(geom::distance(start, end) / grid_size, DISTANCE_PRECISION),
    }
}

/// Measure a closed vertex sequence (first vertex repeated at the end) into
/// edges and interior angles. The final vertex's angle is inferred from the
/// interior-angle-sum identity so the total is exact despite float error.
#[allow(clippy::cast_precision_loss)]
fn measure_polygon(points: &[Point], cycle: &[usize], grid_size: f64) -> PolygonMeasurements {
    let n = cycle.len();
    let mut data = PolygonMeasurements::default();
    let mut angle_sum = 0.0;
    for i in 1..n {
        let prev = points[cycle[i - 1]];
        let here = points[cycle[i]];
        let next = points[cycle[(i + 1) % n]];
        data.edges.push(measured_line(prev, here, grid_size));

        let interior_count = n - 1;
        let degrees = if i == n - 1 {
            ((interior_count as f64) - 2.0) * 180.0 - angle_sum
        } else {
            let measured =
                geom::round_to(geom::angle_at_vertex(here, prev, next), ANGLE_PRECISION);
            angle_sum += measured;
            measured
        };
        data.angles.push(MeasuredAngle { degrees, vertex: here });
    }
    data
}

/// Decompose the committed segment set into classified line, triangle, and
/// polygon results.
///
/// Idempotent: the same segment set always yields the same results in the
/// same order.
#[must_use]
pub fn decompose(segments: &[Segment], grid_size: f64) -> Vec<ShapeResult> {
    let (points, adjacency) = build_graph(segments);
    let mut visited = vec![false; points.len()];
    let mut stacks = Vec::new();
    for root in 0..points.len() {
        if !visited[root] {
            record_component(root, &adjacency, &mut visited, &mut stacks);
        }
    }
    let entries = split_stacks(stacks);

    let mut covered: HashSet<(usize, usize)> = HashSet::new();
    let mut results = Vec::new();
    for entry in entries {
        for pair in entry.windows(2) {
            covered.insert((pair[0].min(pair[1]), pair[0].max(pair[1])));
        }
        match entry.len() {
            2 => results.push(ShapeResult::Line(measured_line(
                points[entry[0]],
                points[entry[1]],
                grid_size,
            ))),
            4 => results.push(ShapeResult::Triangle(measure_polygon(&points, &entry, grid_size))),
            _ => results.push(ShapeResult::Polygon(measure_polygon(&points, &entry, grid_size))),
        }
    }

    // Segments in no recorded stack (side branches of a tree-shaped
    // component) are still reported as standalone measured lines.
    let index: HashMap<(u64, u64), usize> =
        points.iter().enumerate().map(|(i, &p)| (point_key(p), i)).collect();
    for seg in segments {
        let a = index[&point_key(seg.start)];
        let b = index[&point_key(seg.end)];
        if covered.insert((a.min(b), a.max(b))) {
            results.push(ShapeResult::Line(measured_line(seg.start, seg.end, grid_size)));
        }
    }

    debug!(segments = segments.len(), results = results.len(), "decompose");
    results
}

fn measured_circle(circle: &CircleShape, grid_size: f64) -> MeasuredCircle {
    MeasuredCircle {
        center: circle.center,
        edge: circle.edge,
        radius: geom::round_to(circle.radius() / grid_size, DISTANCE_PRECISION),
    }
}

/// Classify the whole document: decomposed segment results first, then one
/// circle result per committed circle.
#[must_use]
pub fn classify_document(doc: &DocStore, grid_size: f64) -> Vec<ShapeResult> {
    let mut results = decompose(&doc.segments(), grid_size);
    for circle in doc.circles() {
        results.push(ShapeResult::Circle(measured_circle(&circle, grid_size)));
    }
    results
}
