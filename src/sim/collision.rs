//! Collision detection for axis-aligned boxes
//!
//! Every entity in the game is a rectangle. Overlap tests are strict, so
//! boxes that only share an edge do not collide.

use glam::Vec2;

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Box from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.min.y < other.max.y && self.max.y > other.min.y
    }

    /// Strict overlap of the horizontal extents only
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }
}

/// Check whether a falling body landed on a surface during the last step
///
/// `prev_bottom` is the body's bottom edge before the step, `body` its box
/// after the step and `vy` its vertical velocity (positive is falling). The
/// body lands when its bottom edge crossed the surface's top edge and the
/// horizontal extents overlap.
pub fn landed_on(prev_bottom: f32, body: &Aabb, vy: f32, surface: &Aabb) -> bool {
    let top = surface.min.y;
    vy > 0.0 && prev_bottom <= top && body.max.y >= top && body.overlaps_x(surface)
}

/// Move a body horizontally and bounce it between `0` and `width`
///
/// Returns the new x and velocity. The reflection keeps the speed.
pub fn bounce_between_walls(x: f32, dx: f32, body_width: f32, width: f32) -> (f32, f32) {
    let x = x + dx;
    if x < 0.0 {
        (0.0, dx.abs())
    } else if x + body_width > width {
        (width - body_width, -dx.abs())
    } else {
        (x, dx)
    }
}
