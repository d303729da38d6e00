//! High-level collision shape abstractions
//!
//! Shapes are stored in model space and transformed to world space once per
//! tick, keeping shape geometry decoupled from the externally owned
//! transform.

use serde::{Deserialize, Serialize};

use super::polygon;
use crate::foundation::math::{Extent2, Transform2, Vec2};

/// Radius floor applied after every fallback so circle tests never degenerate
pub const MIN_CIRCLE_RADIUS: f32 = 1e-4;

/// Errors produced when validating shape geometry
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Polygon with fewer than three vertices
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Two consecutive vertices coincide
    #[error("polygon edge {0} has near-zero length")]
    DegenerateEdge(usize),

    /// The vertex loop is not convex
    #[error("polygon vertex loop is not convex")]
    NotConvex,

    /// A vertex coordinate is NaN or infinite
    #[error("polygon vertex {0} is not finite")]
    NonFiniteVertex(usize),
}

/// Collision shape attached to a collider, in model space
///
/// A collider keeps exactly one shape for its lifetime. Polygon vertices are
/// a convex loop stored counter-clockwise; the constructors re-wind
/// clockwise input rather than rejecting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// A circle. A radius of zero means "derive from the external extent
    /// box at world-shape rebuild time".
    Circle {
        /// Explicit world-space radius, or 0 to derive from extents
        radius: f32,
    },

    /// A convex polygon given by its local-space vertex loop (CCW)
    Polygon {
        /// Local-space vertices, counter-clockwise
        vertices: Vec<Vec2>,
    },
}

impl ColliderShape {
    /// Create a circle shape
    ///
    /// Pass 0.0 to size the circle from the collider's external extent box.
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    /// Create a convex polygon shape from a local-space vertex loop
    pub fn polygon(mut vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        if vertices.len() < 3 {
            return Err(ShapeError::TooFewVertices(vertices.len()));
        }
        for (i, v) in vertices.iter().enumerate() {
            if !v.x.is_finite() || !v.y.is_finite() {
                return Err(ShapeError::NonFiniteVertex(i));
            }
        }
        for i in 0..vertices.len() {
            let j = (i + 1) % vertices.len();
            if (vertices[j] - vertices[i]).norm_squared() < polygon::DEGENERATE_EDGE_SQ {
                return Err(ShapeError::DegenerateEdge(i));
            }
        }
        if polygon::signed_area(&vertices) < 0.0 {
            vertices.reverse();
        }
        if !is_convex(&vertices) {
            return Err(ShapeError::NotConvex);
        }
        Ok(Self::Polygon { vertices })
    }

    /// Create an axis-aligned rectangle polygon from its full width and height
    pub fn rectangle(width: f32, height: f32) -> Result<Self, ShapeError> {
        let hx = width * 0.5;
        let hy = height * 0.5;
        Self::polygon(vec![
            Vec2::new(-hx, -hy),
            Vec2::new(hx, -hy),
            Vec2::new(hx, hy),
            Vec2::new(-hx, hy),
        ])
    }

    /// Create a triangle polygon from three local-space vertices
    pub fn triangle(a: Vec2, b: Vec2, c: Vec2) -> Result<Self, ShapeError> {
        Self::polygon(vec![a, b, c])
    }

    /// Transform this shape to world space using the collider's transform
    ///
    /// `extent` is the externally supplied default size, consulted only for
    /// circles without an explicit radius; a missing source falls back to a
    /// unit box. Returns an error for geometry that cannot be tested this
    /// tick (the caller excludes the body, it is not fatal).
    pub fn to_world_space(
        &self,
        transform: &Transform2,
        extent: Option<Extent2>,
    ) -> Result<WorldShape, ShapeError> {
        match self {
            Self::Circle { radius } => {
                let radius = if *radius > 0.0 {
                    *radius
                } else {
                    let extent = extent.unwrap_or_else(Extent2::unit);
                    let rx = (extent.width * transform.scale.x).abs() * 0.5;
                    let ry = (extent.height * transform.scale.y).abs() * 0.5;
                    (rx + ry) * 0.5
                };
                Ok(WorldShape::Circle {
                    center: transform.position,
                    radius: radius.max(MIN_CIRCLE_RADIUS),
                })
            }
            Self::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(ShapeError::TooFewVertices(vertices.len()));
                }
                let mut world: Vec<Vec2> = vertices.iter().map(|v| transform.apply(*v)).collect();
                for (i, v) in world.iter().enumerate() {
                    if !v.x.is_finite() || !v.y.is_finite() {
                        return Err(ShapeError::NonFiniteVertex(i));
                    }
                }
                // A mirroring scale flips the winding; restore CCW.
                if polygon::signed_area(&world) < 0.0 {
                    world.reverse();
                }
                Ok(WorldShape::Polygon { vertices: world })
            }
        }
    }
}

/// World-space shape, rebuilt once per tick for collision testing
#[derive(Debug, Clone, PartialEq)]
pub enum WorldShape {
    /// World-space circle
    Circle {
        /// Center position
        center: Vec2,
        /// Radius, always positive
        radius: f32,
    },

    /// World-space convex polygon, counter-clockwise
    Polygon {
        /// Vertex loop in world coordinates
        vertices: Vec<Vec2>,
    },
}

impl WorldShape {
    /// Representative center of the shape
    pub fn center(&self) -> Vec2 {
        match self {
            Self::Circle { center, .. } => *center,
            Self::Polygon { vertices } => polygon::centroid(vertices),
        }
    }
}

fn is_convex(vertices: &[Vec2]) -> bool {
    // CCW loop: every turn must be left or straight.
    let n = vertices.len();
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let c = vertices[(i + 2) % n];
        let ab = b - a;
        let bc = c - b;
        if ab.x * bc.y - ab.y * bc.x < -1e-6 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polygon_rejects_too_few_vertices() {
        let result = ColliderShape::polygon(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]);
        assert_eq!(result, Err(ShapeError::TooFewVertices(2)));
    }

    #[test]
    fn test_polygon_rejects_degenerate_edge() {
        let result = ColliderShape::polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
        ]);
        assert_eq!(result, Err(ShapeError::DegenerateEdge(0)));
    }

    #[test]
    fn test_polygon_rejects_concave_loop() {
        let result = ColliderShape::polygon(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]);
        assert_eq!(result, Err(ShapeError::NotConvex));
    }

    #[test]
    fn test_polygon_rewinds_clockwise_input() {
        let shape = ColliderShape::polygon(vec![
            Vec2::new(-1.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(-1.0, -1.0),
        ])
        .unwrap();
        let ColliderShape::Polygon { vertices } = &shape else {
            panic!("expected polygon");
        };
        assert!(crate::physics::collision::polygon::signed_area(vertices) > 0.0);
    }

    #[test]
    fn test_explicit_circle_radius_ignores_scale() {
        let shape = ColliderShape::circle(2.0);
        let transform = Transform2::new(Vec2::new(5.0, 0.0), 0.0, Vec2::new(3.0, 3.0));
        let world = shape.to_world_space(&transform, None).unwrap();
        let WorldShape::Circle { center, radius } = world else {
            panic!("expected circle");
        };
        assert_relative_eq!(center, Vec2::new(5.0, 0.0));
        assert_relative_eq!(radius, 2.0);
    }

    #[test]
    fn test_zero_radius_derives_from_extent_and_scale() {
        let shape = ColliderShape::circle(0.0);
        let transform = Transform2::new(Vec2::zeros(), 0.0, Vec2::new(2.0, 4.0));
        let world = shape
            .to_world_space(&transform, Some(Extent2::new(1.0, 1.0)))
            .unwrap();
        let WorldShape::Circle { radius, .. } = world else {
            panic!("expected circle");
        };
        // ((1*2)/2 + (1*4)/2) / 2
        assert_relative_eq!(radius, 1.5);
    }

    #[test]
    fn test_missing_extent_falls_back_to_unit_box() {
        let shape = ColliderShape::circle(0.0);
        let world = shape
            .to_world_space(&Transform2::identity(), None)
            .unwrap();
        let WorldShape::Circle { radius, .. } = world else {
            panic!("expected circle");
        };
        assert_relative_eq!(radius, 0.5);
        assert!(radius >= MIN_CIRCLE_RADIUS);
    }

    #[test]
    fn test_mirror_scale_restores_ccw_winding() {
        let shape = ColliderShape::rectangle(2.0, 2.0).unwrap();
        let transform = Transform2::new(Vec2::zeros(), 0.0, Vec2::new(-1.0, 1.0));
        let world = shape.to_world_space(&transform, None).unwrap();
        let WorldShape::Polygon { vertices } = world else {
            panic!("expected polygon");
        };
        assert!(crate::physics::collision::polygon::signed_area(&vertices) > 0.0);
    }

    #[test]
    fn test_triangle_constructor_accepts_either_winding() {
        let ccw = ColliderShape::triangle(
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(0.0, 1.0),
        );
        let cw = ColliderShape::triangle(
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(-1.0, -1.0),
        );
        assert_eq!(ccw.unwrap(), cw.unwrap());
    }

    #[test]
    fn test_shape_serde_round_trip() {
        let shape = ColliderShape::rectangle(3.0, 1.0).unwrap();
        let text = ron::to_string(&shape).unwrap();
        let parsed: ColliderShape = ron::from_str(&text).unwrap();
        assert_eq!(parsed, shape);
    }

    #[test]
    fn test_rotated_rectangle_vertices() {
        let shape = ColliderShape::rectangle(2.0, 2.0).unwrap();
        let transform =
            Transform2::from_position_rotation(Vec2::new(1.0, 0.0), std::f32::consts::FRAC_PI_4);
        let world = shape.to_world_space(&transform, None).unwrap();
        let WorldShape::Polygon { vertices } = world else {
            panic!("expected polygon");
        };
        let diag = std::f32::consts::SQRT_2;
        assert_relative_eq!(vertices[0], Vec2::new(1.0, -diag), epsilon = 1e-5);
        assert_relative_eq!(vertices[1], Vec2::new(1.0 + diag, 0.0), epsilon = 1e-5);
    }
}
