//! Top-level engine: routes pointer events to the active tool and turns
//! gestures into committed drawing items.
//!
//! All geometry runs synchronously inline on the triggering event; the only
//! suspension point is the autopan loop, which the host drives through
//! [`Engine::autopan_tick`]. Handlers re-read the gesture state fresh at
//! entry, so a tick arriving after the drag ended sees the idle state and
//! does nothing.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::angle::{self, VertexAngle};
use crate::autopan::{self, AutoPan, PanToken};
use crate::camera::{Camera, Point};
use crate::consts::{
    AUTOPAN_OUTSIDE_TOLERANCE_PX, GRAB_RADIUS_PX, MIN_SEGMENT_RATIO, RESNAP_RATIO, SNAP_RATIO,
};
use crate::doc::{CircleShape, DocStore, DrawingItem, Segment, Shape, ShapeId, SnapshotError, Stroke};
use crate::geom;
use crate::hit;
use crate::input::{InputState, Tool, UiState};
use crate::render::CanvasConfig;
use crate::shapes::{self, ShapeResult};

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// A new item was committed; persist it and draw it.
    ItemCommitted(DrawingItem),
    /// A committed item is gone; remove its cached graphics by id.
    ItemRemoved { id: ShapeId },
    /// The in-progress preview changed; redraw it.
    PreviewChanged(Preview),
    /// The in-progress preview is gone; erase it.
    PreviewCleared,
    /// The pointer is dragging inside the edge band. The host should call
    /// [`Engine::autopan_tick`] with this token every
    /// [`crate::consts::AUTOPAN_INTERVAL_MS`] until the token goes stale.
    AutoPanPending(PanToken),
    /// Camera or document changed wholesale; redraw the scene.
    RenderNeeded,
}

/// Non-committed graphics for the gesture in progress, with live
/// measurements.
#[derive(Debug, Clone)]
pub enum Preview {
    Segment {
        segment: Segment,
        /// Length in grid units, rounded to one decimal.
        distance: f64,
        /// Angle labels at the pending start against segments already
        /// sharing it.
        angles: Vec<VertexAngle>,
    },
    Circle {
        circle: CircleShape,
        /// Radius in grid units, rounded to one decimal.
        radius: f64,
    },
    Stroke { points: Vec<Point> },
}

/// Mutable per-session drawing state, created at session start and reset on
/// clear. Every tool handler reads and writes this; nothing lives in module
/// or ambient state.
#[derive(Debug)]
pub struct DrawingSession {
    /// The gesture state machine.
    pub state: InputState,
    /// Screen-space position of the most recent pointer event, used to
    /// synthesize a pointer-up when the pointer leaves the container.
    pub last_screen: Point,
    /// Sequential counter backing vertex labels (A, B, C, …).
    next_point_label: usize,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self { state: InputState::Idle, last_screen: Point::new(0.0, 0.0), next_point_label: 0 }
    }
}

impl DrawingSession {
    /// Return to the idle state without touching the label counter.
    pub fn abort_gesture(&mut self) {
        self.state = InputState::Idle;
    }

    /// Full reset, as on clear.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The next vertex label, cycling A through Z.
    pub fn next_point_label(&mut self) -> char {
        let label = char::from(b'A' + u8::try_from(self.next_point_label % 26).unwrap_or(0));
        self.next_point_label += 1;
        label
    }
}

/// The sketching engine. Owns the document, camera, gesture state, and
/// autopan loop; the host owns rendering and the event source.
#[derive(Debug, Default)]
pub struct Engine {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub session: DrawingSession,
    pub autopan: AutoPan,
    pub config: CanvasConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Engine {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Update viewport dimensions.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Set the active tool, aborting any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.session.abort_gesture();
        self.autopan.cancel();
        self.ui.tool = tool;
        self.ui.selected_point = None;
    }

    /// Drop the whole document, history, and session state.
    pub fn clear(&mut self) -> Vec<Action> {
        self.doc.clear();
        self.session.reset();
        self.autopan.cancel();
        self.ui.selected_point = None;
        vec![Action::PreviewCleared, Action::RenderNeeded]
    }

    /// Undo the most recent commit.
    pub fn undo(&mut self) -> Vec<Action> {
        match self.doc.undo() {
            Some(id) => vec![Action::ItemRemoved { id }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Redo the most recently undone commit.
    pub fn redo(&mut self) -> Vec<Action> {
        match self.doc.redo() {
            Some(item) => {
                let item = item.clone();
                vec![Action::ItemCommitted(item), Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    /// Classify the committed document into structured shape results.
    #[must_use]
    pub fn submit(&self) -> Vec<ShapeResult> {
        shapes::classify_document(&self.doc, self.config.grid_size)
    }

    /// Hydrate the document from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// See [`DocStore::load_snapshot`].
    pub fn load_snapshot(&mut self, json: &str) -> Result<Vec<Action>, SnapshotError> {
        self.doc.load_snapshot(json)?;
        self.session.reset();
        Ok(vec![Action::RenderNeeded])
    }

    // --- Pointer events ---

    /// Dispatch a pointer-down to the active tool. Supersedes any pending
    /// autopan loop.
    pub fn on_pointer_down(&mut self, screen: Point) -> Vec<Action> {
        self.autopan.cancel();
        self.session.last_screen = screen;
        let world = self.camera.screen_to_world(screen);
        match self.ui.tool {
            Tool::Select => self.select_down(world),
            Tool::Line => self.line_down(world),
            Tool::Circle => self.circle_down(world),
            Tool::Pencil => self.pencil_down(world),
        }
    }

    /// Dispatch a pointer-move to the active tool. No-op while idle. Arms
    /// the autopan loop when the drag reaches the container's edge band.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        self.session.last_screen = screen;
        if !self.session.state.is_drawing() {
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen);
        let mut actions = match self.ui.tool {
            Tool::Select => self.select_move(world),
            Tool::Line => self.line_move(world),
            Tool::Circle => self.circle_move(world),
            Tool::Pencil => self.pencil_move(world),
        };
        if self.pan_wanted(screen) {
            if !self.autopan.is_active() {
                let token = self.autopan.begin();
                actions.push(Action::AutoPanPending(token));
            }
        } else {
            self.autopan.cancel();
        }
        actions
    }

    /// Dispatch a pointer-up to the active tool, committing or discarding
    /// the gesture. Supersedes any pending autopan loop.
    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Action> {
        self.autopan.cancel();
        self.session.last_screen = screen;
        let world = self.camera.screen_to_world(screen);
        match self.ui.tool {
            Tool::Select => self.select_up(world),
            Tool::Line => self.line_up(world),
            Tool::Circle => self.circle_up(world),
            Tool::Pencil => self.pencil_up(world),
        }
    }

    /// The pointer left the container mid-drag: synthesize a pointer-up at
    /// its last known position so drawing state never sticks.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        if self.session.state.is_drawing() {
            self.on_pointer_up(self.session.last_screen)
        } else {
            Vec::new()
        }
    }

    /// A zoom gesture interrupts any drawing in progress.
    pub fn on_zoom(&mut self, scale: f64) -> Vec<Action> {
        self.session.abort_gesture();
        self.autopan.cancel();
        self.ui.selected_point = None;
        self.camera.set_zoom(scale, self.viewport_width, self.viewport_height);
        vec![Action::PreviewCleared, Action::RenderNeeded]
    }

    // --- Autopan ---

    /// One iteration of the autopan loop, driven by the host every
    /// [`crate::consts::AUTOPAN_INTERVAL_MS`] while `token` stays current.
    ///
    /// Re-reads gesture state fresh: a stale token, or a gesture that ended
    /// in the meantime, makes this a no-op. A pointer beyond the outside
    /// tolerance force-commits the gesture instead of panning further.
    pub fn autopan_tick(&mut self, token: PanToken, screen: Point) -> Vec<Action> {
        if !self.autopan.is_current(token) {
            return Vec::new();
        }
        let Some(start) = self.pending_start() else {
            self.autopan.cancel();
            return Vec::new();
        };
        if autopan::outside(
            screen,
            self.viewport_width,
            self.viewport_height,
            AUTOPAN_OUTSIDE_TOLERANCE_PX,
        ) {
            self.autopan.cancel();
            return self.on_pointer_up(screen);
        }
        if !autopan::near_edge(
            screen,
            self.viewport_width,
            self.viewport_height,
            self.config.grid_size,
        ) {
            self.autopan.cancel();
            return Vec::new();
        }
        let world = self.camera.screen_to_world(screen);
        let (dx, dy) = autopan::pan_shift(start, world, self.config.grid_size);
        let center = self.camera.center(self.viewport_width, self.viewport_height);
        self.camera.move_center(
            Point::new(center.x + dx, center.y + dy),
            self.viewport_width,
            self.viewport_height,
        );
        let mut actions = vec![Action::RenderNeeded];
        actions.extend(self.on_pointer_move(screen));
        actions
    }

    /// Whether the current gesture should keep the autopan loop armed.
    fn pan_wanted(&self, screen: Point) -> bool {
        self.pending_start().is_some()
            && autopan::near_edge(
                screen,
                self.viewport_width,
                self.viewport_height,
                self.config.grid_size,
            )
            && !autopan::outside(
                screen,
                self.viewport_width,
                self.viewport_height,
                AUTOPAN_OUTSIDE_TOLERANCE_PX,
            )
    }

    /// The world-space anchor of the gesture in progress, if any.
    #[must_use]
    pub fn pending_start(&self) -> Option<Point> {
        match &self.session.state {
            InputState::Idle => None,
            InputState::DrawingLine { start } => Some(*start),
            InputState::DrawingCircle { center } => Some(*center),
            InputState::Sketching { points } => points.first().copied(),
            InputState::DraggingEndpoint { anchor, .. } => Some(*anchor),
        }
    }

    // --- Shared helpers ---

    fn snap_threshold(&self) -> f64 {
        self.config.grid_size * SNAP_RATIO
    }

    fn min_segment_length(&self) -> f64 {
        self.config.grid_size * MIN_SEGMENT_RATIO
    }

    fn grid_units(&self, world_dist: f64) -> f64 {
        geom::round_to(world_dist / self.config.grid_size, crate::consts::DISTANCE_PRECISION)
    }

    /// Angle labels at `vertex` over the committed segments touching it,
    /// optionally excluding one segment and including one extra arm for the
    /// preview candidate.
    fn angles_at(
        &self,
        vertex: Point,
        exclude: Option<&Segment>,
        extra: Option<Point>,
    ) -> Vec<VertexAngle> {
        let mut arms: Vec<Point> = self
            .doc
            .segments()
            .iter()
            .filter(|seg| exclude.is_none_or(|ex| !seg.same_as(ex)))
            .filter(|seg| seg.touches(vertex))
            .map(|seg| seg.opposite(vertex))
            .collect();
        if let Some(p) = extra {
            if !geom::same_point(p, vertex) {
                arms.push(p);
            }
        }
        angle::angles_around_vertex(vertex, arms)
    }

    fn segment_preview(&self, segment: Segment, angles: Vec<VertexAngle>) -> Action {
        let distance = self.grid_units(segment.length());
        Action::PreviewChanged(Preview::Segment { segment, distance, angles })
    }

    // --- Line tool ---

    fn line_down(&mut self, world: Point) -> Vec<Action> {
        let points = geom::points_of_segments(&self.doc.segments());
        let start = geom::closest_point(world, &points, self.snap_threshold());
        self.session.state = InputState::DrawingLine { start };
        Vec::new()
    }

    fn line_move(&mut self, world: Point) -> Vec<Action> {
        let InputState::DrawingLine { start } = self.session.state else {
            return Vec::new();
        };
        let segment = Segment::new(start, world);
        let angles = self.angles_at(start, None, Some(world));
        vec![self.segment_preview(segment, angles)]
    }

    fn line_up(&mut self, world: Point) -> Vec<Action> {
        let InputState::DrawingLine { start } = self.session.state else {
            return Vec::new();
        };
        self.session.abort_gesture();
        let points = geom::points_of_segments(&self.doc.segments());
        let end = geom::closest_point(world, &points, self.snap_threshold());
        let segment = Segment::new(start, end);
        let mut actions = vec![Action::PreviewCleared];
        if segment.length() > self.min_segment_length() && !self.doc.has_duplicate_segment(&segment)
        {
            let item = self.doc.commit(Shape::Line(segment)).clone();
            debug!(id = %item.id, "line committed");
            actions.push(Action::ItemCommitted(item));
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Circle tool ---

    /// Circle snapping considers only circle-owned points (centers and rim
    /// anchors), so circles chain to each other without grabbing segment
    /// endpoints.
    fn circle_points(&self) -> Vec<Point> {
        self.doc.circles().iter().flat_map(|c| [c.center, c.edge]).collect()
    }

    fn circle_down(&mut self, world: Point) -> Vec<Action> {
        let points = self.circle_points();
        let center = geom::closest_point(world, &points, self.snap_threshold());
        self.session.state = InputState::DrawingCircle { center };
        Vec::new()
    }

    fn circle_move(&mut self, world: Point) -> Vec<Action> {
        let InputState::DrawingCircle { center } = self.session.state else {
            return Vec::new();
        };
        let circle = CircleShape::new(center, world);
        let radius = self.grid_units(circle.radius());
        vec![Action::PreviewChanged(Preview::Circle { circle, radius })]
    }

    fn circle_up(&mut self, world: Point) -> Vec<Action> {
        let InputState::DrawingCircle { center } = self.session.state else {
            return Vec::new();
        };
        self.session.abort_gesture();
        let circle = CircleShape::new(center, world);
        let mut actions = vec![Action::PreviewCleared];
        if circle.radius() > self.min_segment_length() {
            let item = self.doc.commit(Shape::Circle(circle)).clone();
            debug!(id = %item.id, "circle committed");
            actions.push(Action::ItemCommitted(item));
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Pencil tool ---

    fn pencil_down(&mut self, world: Point) -> Vec<Action> {
        self.session.state = InputState::Sketching { points: vec![world] };
        Vec::new()
    }

    fn pencil_move(&mut self, world: Point) -> Vec<Action> {
        let InputState::Sketching { points } = &mut self.session.state else {
            return Vec::new();
        };
        points.push(world);
        let preview = points.clone();
        vec![Action::PreviewChanged(Preview::Stroke { points: preview })]
    }

    fn pencil_up(&mut self, world: Point) -> Vec<Action> {
        let state = std::mem::take(&mut self.session.state);
        let InputState::Sketching { mut points } = state else {
            return Vec::new();
        };
        points.push(world);
        let mut actions = vec![Action::PreviewCleared];
        let travelled: f64 =
            points.windows(2).map(|pair| geom::distance(pair[0], pair[1])).sum();
        if travelled > 0.0 {
            let item = self.doc.commit(Shape::Pencil(Stroke { points })).clone();
            debug!(id = %item.id, "stroke committed");
            actions.push(Action::ItemCommitted(item));
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Select tool ---

    fn select_down(&mut self, world: Point) -> Vec<Action> {
        let segments = self.doc.segments();
        let threshold = self.camera.screen_dist_to_world(GRAB_RADIUS_PX);
        let Some(grab) = hit::endpoint_hit(world, &segments, threshold) else {
            // Nothing close, or the point is shared by several segments:
            // the drag is refused.
            return Vec::new();
        };
        self.ui.selected_point = Some(grab.point);
        self.session.state = InputState::DraggingEndpoint {
            anchor: grab.anchor,
            original: segments[grab.segment_index],
        };
        Vec::new()
    }

    fn select_move(&mut self, world: Point) -> Vec<Action> {
        let InputState::DraggingEndpoint { anchor, original } = self.session.state else {
            return Vec::new();
        };
        let segment = Segment::new(anchor, world);
        let angles = self.angles_at(anchor, Some(&original), Some(world));
        vec![self.segment_preview(segment, angles)]
    }

    fn select_up(&mut self, world: Point) -> Vec<Action> {
        let InputState::DraggingEndpoint { anchor, original } = self.session.state else {
            return Vec::new();
        };
        self.session.abort_gesture();
        self.ui.selected_point = None;

        let remaining: Vec<Segment> = self
            .doc
            .segments()
            .into_iter()
            .filter(|seg| !seg.same_as(&original))
            .collect();
        let points = geom::points_of_segments(&remaining);
        let end =
            geom::closest_point(world, &points, self.config.grid_size * RESNAP_RATIO);
        let replacement = Segment::new(anchor, end);

        let old_id = self.doc.items().iter().find_map(|item| match &item.shape {
            Shape::Line(seg) if seg.same_as(&original) => Some(item.id),
            _ => None,
        });
        // The dragged segment must still be committed; anything else means
        // the store and the gesture state desynchronized.
        assert!(old_id.is_some(), "dragged segment missing from the store");

        let mut actions = vec![Action::PreviewCleared];
        if let Some(id) = old_id {
            self.doc.remove(id);
            actions.push(Action::ItemRemoved { id });
        }
        if replacement.length() > self.min_segment_length()
            && !self.doc.has_duplicate_segment(&replacement)
        {
            let item = self.doc.commit(Shape::Line(replacement)).clone();
            debug!(id = %item.id, "endpoint drag committed");
            actions.push(Action::ItemCommitted(item));
        }
        actions.push(Action::RenderNeeded);
        actions
    }
}
