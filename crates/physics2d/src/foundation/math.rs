//! Math utilities and types
//!
//! Provides fundamental math types for 2D collision detection and simulation.

pub use nalgebra::{Vector2, Matrix2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2x2 matrix type
pub type Mat2 = Matrix2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Transform representing position, rotation, and scale in the plane
///
/// Owned by the external object system; the engine reads it fresh each tick
/// and only ever writes position back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    /// Position in world space
    pub position: Vec2,

    /// Rotation angle in radians, counter-clockwise
    pub rotation: f32,

    /// Non-uniform scale factors
    pub scale: Vec2,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2 {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform from full position, rotation, and scale
    pub fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Map a local-space point to world space (scale, then rotate, then translate)
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let scaled = Vec2::new(local.x * self.scale.x, local.y * self.scale.y);
        let (sin, cos) = self.rotation.sin_cos();
        let rotated = Vec2::new(
            scaled.x * cos - scaled.y * sin,
            scaled.x * sin + scaled.y * cos,
        );
        self.position + rotated
    }
}

/// Axis-aligned extent box supplied by an external source (e.g. a sprite's
/// bounds) when a collider has no explicit size configured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent2 {
    /// Width of the box in local units
    pub width: f32,
    /// Height of the box in local units
    pub height: f32,
}

impl Extent2 {
    /// Create a new extent box
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Unit box fallback used when no extent source is available
    pub fn unit() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_transform_is_noop() {
        let t = Transform2::identity();
        let p = Vec2::new(3.0, -2.0);
        assert_relative_eq!(t.apply(p), p);
    }

    #[test]
    fn test_apply_scales_before_rotating() {
        // Quarter turn with non-uniform scale: (1, 0) scaled to (2, 0),
        // rotated onto +Y, then translated.
        let t = Transform2::new(
            Vec2::new(1.0, 1.0),
            std::f32::consts::FRAC_PI_2,
            Vec2::new(2.0, 3.0),
        );
        let p = t.apply(Vec2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-5);
    }
}
