//! Input model: tools and the gesture state machine.
//!
//! `Tool` captures the user's intent at the time of a pointer event.
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying the context needed to build previews on move and
//! commit on release. Handlers read this state fresh at every entry; nothing
//! is captured across an autopan delay.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::Segment;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Grab and drag a free segment endpoint (default).
    #[default]
    Select,
    /// Draw a straight segment.
    Line,
    /// Draw a circle from center to rim.
    Circle,
    /// Free-hand stroke.
    Pencil,
}

/// Internal state of the gesture state machine.
///
/// Each active variant carries the pending start recorded at pointer-down;
/// there is no separate drawing flag — being in a non-idle variant is the
/// flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Drawing a new segment from the (snapped) pending start.
    DrawingLine {
        /// World-space start, already snapped to existing geometry.
        start: Point,
    },
    /// Drawing a circle outward from its center.
    DrawingCircle {
        /// World-space center, already snapped to existing circle points.
        center: Point,
    },
    /// Recording a free-hand stroke point by point.
    Sketching {
        /// World-space points recorded so far, in order.
        points: Vec<Point>,
    },
    /// Re-positioning the free endpoint of an existing segment.
    DraggingEndpoint {
        /// The endpoint that stays fixed during the drag.
        anchor: Point,
        /// The segment being replaced, kept to exclude it from snapping and
        /// duplicate checks until the drag resolves.
        original: Segment,
    },
}

impl InputState {
    /// Whether a gesture is currently in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active drawing tool.
    pub tool: Tool,
    /// The endpoint grabbed by the select tool, if any.
    pub selected_point: Option<Point>,
}
