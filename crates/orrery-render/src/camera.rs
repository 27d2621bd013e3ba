//! Pinhole camera for primary rays

use glam::{Vec2, Vec3};

/// Camera looking from `position` towards `target`.
///
/// The basis is derived on demand:
///
/// ```text
/// forward = normalize(target - position)
/// right   = normalize(up × forward)
/// up'     = forward × right
/// ```
///
/// Note the operand order of `right`: with a Y-up hint it points towards
/// screen-left, so the image is mirrored horizontally compared to a
/// conventional right-handed view. The reference renders look this way.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub target: Vec3,
    /// Up hint (usually Y-up)
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.0, 3.5, 7.5),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    /// Create a camera looking at a target from a position
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Default::default()
        }
    }

    /// Replace the up hint
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    /// Viewing direction, `-Z` when position and target coincide
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    /// Horizontal basis vector, `X` when looking along the up hint
    pub fn right(&self) -> Vec3 {
        self.up.cross(self.forward()).try_normalize().unwrap_or(Vec3::X)
    }

    /// Vertical basis vector, orthogonal to forward and right
    pub fn actual_up(&self) -> Vec3 {
        self.forward().cross(self.right())
    }

    /// Unit ray direction through screen coordinate `uv`.
    ///
    /// `uv` is aspect-corrected with `y` in `[-1, 1]`; the image plane sits at
    /// unit distance.
    pub fn ray_direction(&self, uv: Vec2) -> Vec3 {
        let dir = self.forward() + self.right() * uv.x + self.actual_up() * uv.y;
        dir.try_normalize().unwrap_or(self.forward())
    }
}
