#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are in screen pixels.
/// `zoom` is a scale factor (1.0 = no zoom), clamped to
/// [`MIN_ZOOM`]..=[`MAX_ZOOM`].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// The world-space point currently at the center of a viewport of the
    /// given size.
    #[must_use]
    pub fn center(&self, viewport_width: f64, viewport_height: f64) -> Point {
        self.screen_to_world(Point::new(viewport_width / 2.0, viewport_height / 2.0))
    }

    /// Re-center the viewport on the given world point.
    pub fn move_center(&mut self, world: Point, viewport_width: f64, viewport_height: f64) {
        self.pan_x = viewport_width / 2.0 - world.x * self.zoom;
        self.pan_y = viewport_height / 2.0 - world.y * self.zoom;
    }

    /// Set the zoom factor, clamped to the allowed range. The world point
    /// under the viewport center stays fixed.
    pub fn set_zoom(&mut self, zoom: f64, viewport_width: f64, viewport_height: f64) {
        let center = self.center(viewport_width, viewport_height);
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.move_center(center, viewport_width, viewport_height);
    }
}
