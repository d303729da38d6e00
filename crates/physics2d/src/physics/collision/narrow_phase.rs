//! Narrow-phase collision tests for the three shape pairings
//!
//! Each entry point returns the contact geometry with the normal pointing
//! from shape A towards shape B. `test_pair(a, b)` and `test_pair(b, a)`
//! always yield negated normals and the same contact point, so callers may
//! test each unordered pair once and derive the reciprocal view.
//!
//! Circle tests use the distance/closest-edge formulation; the
//! polygon-polygon test is a separating-axis test over the edge normals of
//! both polygons.

use super::polygon;
use super::shape::WorldShape;
use crate::foundation::math::Vec2;

/// Distance threshold below which directions are considered degenerate
const EPSILON: f32 = 1e-6;

/// Geometric result of a narrow-phase test between two shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactGeometry {
    /// Contact point in world space
    pub point: Vec2,

    /// Unit collision normal, pointing from shape A towards shape B
    pub normal: Vec2,

    /// Penetration depth along the normal, always positive
    pub depth: f32,
}

impl ContactGeometry {
    /// The same contact seen from the other side: negated normal, same point
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Test two world-space shapes, routing by shape kind
///
/// Mixed pairs are evaluated once as circle-versus-polygon and flipped when
/// A is the polygon, which keeps the A-to-B normal convention exact under
/// argument swap. Geometry that cannot be tested (a polygon reduced below
/// three vertices) makes the pair silently non-colliding.
pub fn test_pair(a: &WorldShape, b: &WorldShape) -> Option<ContactGeometry> {
    match (a, b) {
        (
            WorldShape::Circle {
                center: ca,
                radius: ra,
            },
            WorldShape::Circle {
                center: cb,
                radius: rb,
            },
        ) => circle_circle(*ca, *ra, *cb, *rb),
        (WorldShape::Circle { center, radius }, WorldShape::Polygon { vertices }) => {
            circle_polygon(*center, *radius, vertices)
        }
        (WorldShape::Polygon { vertices }, WorldShape::Circle { center, radius }) => {
            circle_polygon(*center, *radius, vertices).map(ContactGeometry::flipped)
        }
        (WorldShape::Polygon { vertices: va }, WorldShape::Polygon { vertices: vb }) => {
            polygon_polygon(va, vb)
        }
    }
}

/// Circle-versus-circle contact
///
/// Collides iff the center distance is strictly below the radius sum. The
/// contact point sits on A's boundary along the normal towards B.
pub fn circle_circle(ca: Vec2, ra: f32, cb: Vec2, rb: f32) -> Option<ContactGeometry> {
    let delta = cb - ca;
    let dist = delta.norm();
    let radius_sum = ra + rb;

    if dist >= radius_sum {
        return None;
    }

    // Coincident centers get a stable fixed axis.
    let normal = if dist > EPSILON {
        delta / dist
    } else {
        Vec2::new(1.0, 0.0)
    };

    Some(ContactGeometry {
        point: ca + normal * ra.clamp(0.0, radius_sum),
        normal,
        depth: radius_sum - dist,
    })
}

/// Circle-versus-polygon contact (circle is shape A)
///
/// Scans every edge for the closest boundary point, then distinguishes the
/// shallow case (center outside, within one radius of the boundary) from
/// deep penetration (center inside the polygon), where the push-out depth
/// covers the full radius plus the distance back to the boundary.
pub fn circle_polygon(center: Vec2, radius: f32, poly: &[Vec2]) -> Option<ContactGeometry> {
    if poly.len() < 3 {
        return None;
    }

    let (closest, edge) = polygon::closest_point_on_boundary(center, poly);
    let to_center = center - closest;
    let dist = to_center.norm();

    if polygon::contains_point(poly, center) {
        // Deep penetration: escape through the nearest edge. The A-to-B
        // normal points from the boundary back into the polygon, so the
        // circle's correction (-normal) carries it outside.
        let outward = polygon::edge_normal(poly, edge)
            .map(|n| if n.dot(&to_center) > 0.0 { -n } else { n })
            .unwrap_or_else(|| escape_axis(center, poly));
        return Some(ContactGeometry {
            point: closest,
            normal: -outward,
            depth: radius + dist,
        });
    }

    if dist <= radius {
        let push_out = if dist > EPSILON {
            to_center / dist
        } else {
            escape_axis(center, poly)
        };
        return Some(ContactGeometry {
            point: closest,
            normal: -push_out,
            depth: radius - dist,
        });
    }

    None
}

/// Direction that carries the circle away from the polygon when the local
/// geometry is too degenerate to tell (center on the boundary, zero-length
/// nearest edge)
fn escape_axis(center: Vec2, poly: &[Vec2]) -> Vec2 {
    let away = center - polygon::centroid(poly);
    let dist = away.norm();
    if dist > EPSILON {
        away / dist
    } else {
        Vec2::new(1.0, 0.0)
    }
}

/// Polygon-versus-polygon contact via the separating axis theorem
///
/// Candidate axes are the edge normals of both polygons; degenerate edges
/// are skipped. Any axis with non-positive overlap separates the polygons.
/// The axis of minimum overlap becomes the contact normal, oriented from
/// A's centroid towards B's, and the contact point is approximated as the
/// midpoint of the two supporting vertices along that axis.
pub fn polygon_polygon(a: &[Vec2], b: &[Vec2]) -> Option<ContactGeometry> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }

    let mut best_depth = f32::INFINITY;
    let mut best_axis: Option<Vec2> = None;

    for poly in [a, b] {
        for i in 0..poly.len() {
            let Some(axis) = polygon::edge_normal(poly, i) else {
                continue;
            };
            let (min_a, max_a) = polygon::project(a, axis);
            let (min_b, max_b) = polygon::project(b, axis);
            let overlap = max_a.min(max_b) - min_a.max(min_b);
            if overlap <= 0.0 {
                return None;
            }
            if overlap < best_depth {
                best_depth = overlap;
                best_axis = Some(axis);
            }
        }
    }

    let mut normal = best_axis?;
    if normal.dot(&(polygon::centroid(b) - polygon::centroid(a))) < 0.0 {
        normal = -normal;
    }

    let support_a = support_vertex(a, normal);
    let support_b = support_vertex(b, -normal);

    Some(ContactGeometry {
        point: (support_a + support_b) * 0.5,
        normal,
        depth: best_depth,
    })
}

/// Vertex with the extreme projection along `axis`
fn support_vertex(poly: &[Vec2], axis: Vec2) -> Vec2 {
    let mut best = poly[0];
    let mut best_proj = best.dot(&axis);
    for v in &poly[1..] {
        let proj = v.dot(&axis);
        if proj > best_proj {
            best_proj = proj;
            best = *v;
        }
    }
    best
}
