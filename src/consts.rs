//! Shared numeric constants for the sketching engine.

// ── Snapping ────────────────────────────────────────────────────

/// Snap threshold for new line/circle endpoints, as a fraction of one grid
/// unit.
pub const SNAP_RATIO: f64 = 0.5;

/// Screen-space grab radius in pixels for picking up an endpoint with the
/// select tool.
pub const GRAB_RADIUS_PX: f64 = 10.0;

/// Re-snap threshold when dropping a dragged endpoint, as a fraction of one
/// grid unit.
pub const RESNAP_RATIO: f64 = 0.1;

/// Minimum committed segment length, as a fraction of one grid unit.
/// Anything shorter is rejected at commit.
pub const MIN_SEGMENT_RATIO: f64 = 0.1;

// ── Angles ──────────────────────────────────────────────────────

/// Running-sum cutoff in degrees for emitting the wrap-around angle at a
/// vertex. At or below this only the open fan of n−1 angles is labeled.
pub const FULL_SURROUND_CUTOFF_DEG: f64 = 180.0;

/// Decimal places for reported distances (grid units).
pub const DISTANCE_PRECISION: i32 = 1;

/// Decimal places for reported angles (degrees).
pub const ANGLE_PRECISION: i32 = 0;

// ── Autopan ─────────────────────────────────────────────────────

/// Delay between autopan iterations in milliseconds. The host event loop
/// drives `autopan_tick` at this interval while a pan is pending.
pub const AUTOPAN_INTERVAL_MS: u64 = 100;

/// Viewport shift per autopan tick, as a fraction of one grid unit.
pub const AUTOPAN_SHIFT_RATIO: f64 = 0.01;

/// Slack in pixels beyond the container edge before a mid-drag pointer is
/// considered gone and the gesture is force-committed.
pub const AUTOPAN_OUTSIDE_TOLERANCE_PX: f64 = 5.0;

// ── Camera ──────────────────────────────────────────────────────

/// Lower zoom clamp.
pub const MIN_ZOOM: f64 = 0.5;

/// Upper zoom clamp.
pub const MAX_ZOOM: f64 = 4.0;
