//! Pixel-space primitives and the world-to-pixel mapping.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use serde::{Deserialize, Serialize};

/// A point in either pixel or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn dist2(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn dist(self, other: Point) -> f64 {
        self.dist2(other).sqrt()
    }
}

/// Size of the drawing area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// The smaller of the two dimensions; all tray sizes are relative to it.
    #[must_use]
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }
}

/// Maps road coordinates (metres, y up) to pixels (y down).
///
/// `scale` is pixels per metre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldView {
    pub scale: f64,
}

impl Default for WorldView {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl WorldView {
    #[must_use]
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Convert a world-space point to pixel coordinates.
    #[must_use]
    pub fn world_to_pixel(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale,
            y: -world.y * self.scale,
        }
    }

    /// Convert a pixel-space point back to world coordinates.
    #[must_use]
    pub fn pixel_to_world(&self, pixel: Point) -> Point {
        Point {
            x: pixel.x / self.scale,
            y: -pixel.y / self.scale,
        }
    }

    /// Convert a world length in metres to pixels.
    #[must_use]
    pub fn len_to_pixels(&self, metres: f64) -> f64 {
        metres * self.scale
    }
}
