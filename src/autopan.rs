//! Viewport autopan while dragging near the container edge.
//!
//! While a gesture is in progress and the pointer sits inside the edge band,
//! the host repeatedly calls the engine's autopan tick at
//! [`crate::consts::AUTOPAN_INTERVAL_MS`]: each tick nudges the viewport
//! center a small step along the drag direction and redraws. The loop is
//! cooperative — every tick carries the [`PanToken`] handed out when the
//! loop started, and any pointer-down/up invalidates outstanding tokens, so
//! two loops can never run for the same drag and a stale tick after the drag
//! ended is a no-op.

#[cfg(test)]
#[path = "autopan_test.rs"]
mod autopan_test;

use tracing::trace;

use crate::camera::Point;
use crate::consts::AUTOPAN_SHIFT_RATIO;
use crate::doc::Segment;
use crate::geom;

/// Whether a screen-space pointer is inside the edge band of a
/// `viewport_width` × `viewport_height` container. Pointers slightly past
/// the edge still count as near it.
#[must_use]
pub fn near_edge(screen: Point, viewport_width: f64, viewport_height: f64, band: f64) -> bool {
    screen.x <= band
        || screen.y <= band
        || screen.x >= viewport_width - band
        || screen.y >= viewport_height - band
}

/// Whether a screen-space pointer is more than `tolerance` pixels beyond the
/// container on any side.
#[must_use]
pub fn outside(screen: Point, viewport_width: f64, viewport_height: f64, tolerance: f64) -> bool {
    screen.x < -tolerance
        || screen.y < -tolerance
        || screen.x > viewport_width + tolerance
        || screen.y > viewport_height + tolerance
}

/// World-space viewport-center delta for one autopan tick: a step of
/// `grid_size ×` [`AUTOPAN_SHIFT_RATIO`] along the direction from the
/// gesture's pending start toward the pointer.
#[must_use]
pub fn pan_shift(start: Point, pointer_world: Point, grid_size: f64) -> (f64, f64) {
    let travel = grid_size * AUTOPAN_SHIFT_RATIO;
    let shift = geom::point_at_distance(&Segment::new(start, pointer_world), travel);
    (shift.x - start.x, shift.y - start.y)
}

/// Proof that a particular autopan loop is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanToken(u64);

/// Token issuer for the autopan loop.
///
/// `begin` supersedes any earlier loop; `cancel` invalidates all outstanding
/// tokens. The engine cancels on every pointer-down and pointer-up, so a
/// fresh gesture always wins over an in-flight loop.
#[derive(Debug, Default)]
pub struct AutoPan {
    generation: u64,
    active: Option<u64>,
}

impl AutoPan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new loop, superseding any previous one.
    pub fn begin(&mut self) -> PanToken {
        self.generation += 1;
        self.active = Some(self.generation);
        trace!(generation = self.generation, "autopan begin");
        PanToken(self.generation)
    }

    /// Invalidate every outstanding token.
    pub fn cancel(&mut self) {
        if self.active.is_some() {
            trace!(generation = self.generation, "autopan cancel");
        }
        self.active = None;
    }

    /// Whether `token` belongs to the loop that is still current.
    #[must_use]
    pub fn is_current(&self, token: PanToken) -> bool {
        self.active == Some(token.0)
    }

    /// Whether any loop is current.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
