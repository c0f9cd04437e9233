//! Probe rays and the collision oracle used for visibility tests.
//!
//! The projection pipeline only decides where to cast and how to read the
//! answer; the collision query itself sits behind [`RayCaster`]. A
//! triangle-mesh implementation is provided for hosts without a physics
//! engine of their own.

use crate::error::{MeshError, Result};
use crate::math::{Point3, Vector3};

/// Determinant below which a ray counts as parallel to a triangle.
const PARALLEL_TOL: f64 = 1e-12;

/// Slack on barycentric and ray parameters, so hits on shared triangle
/// edges and exactly at the ray's end are not lost.
const HIT_SLACK: f64 = 1e-9;

/// A bounded probe: only collisions between `origin` and `origin + direction` count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRay {
    /// Start of the probe.
    pub origin: Point3,
    /// Offset from the origin to the probe's target.
    pub direction: Vector3,
}

impl ProbeRay {
    /// Creates a probe from `origin` to `target`.
    #[must_use]
    pub fn towards(origin: Point3, target: &Point3) -> Self {
        Self {
            origin,
            direction: target - origin,
        }
    }
}

/// The nearest collision found along a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Collision point in world space.
    pub point: Point3,
    /// Distance from the probe origin to the collision point.
    pub distance: f64,
}

/// A collision oracle answering one probe at a time.
pub trait RayCaster {
    /// Returns the collision nearest to the probe origin, if any.
    fn cast(&self, ray: ProbeRay) -> Option<RayHit>;
}

impl<F> RayCaster for F
where
    F: Fn(ProbeRay) -> Option<RayHit>,
{
    fn cast(&self, ray: ProbeRay) -> Option<RayHit> {
        self(ray)
    }
}

/// Casts probes against the triangles of a mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshRayCaster {
    triangles: Vec<[Point3; 3]>,
}

impl MeshRayCaster {
    /// Creates a caster from positions and triangles indexing into them.
    ///
    /// # Errors
    ///
    /// Returns an error if a triangle references a position outside `positions`.
    pub fn from_triangles(positions: &[Point3], triangles: &[[usize; 3]]) -> Result<Self> {
        let count = positions.len();
        let mut resolved = Vec::with_capacity(triangles.len());
        for (triangle, corners) in triangles.iter().enumerate() {
            let mut points = [Point3::origin(); 3];
            for (slot, &vertex) in corners.iter().enumerate() {
                points[slot] = *positions.get(vertex).ok_or(MeshError::TriangleVertexOutOfRange {
                    triangle,
                    vertex,
                    count,
                })?;
            }
            resolved.push(points);
        }
        Ok(Self { triangles: resolved })
    }
}

impl RayCaster for MeshRayCaster {
    fn cast(&self, ray: ProbeRay) -> Option<RayHit> {
        let length = ray.direction.norm();
        if length < PARALLEL_TOL {
            return None;
        }

        let nearest = self
            .triangles
            .iter()
            .filter_map(|triangle| ray_triangle_param(&ray, triangle))
            .min_by(f64::total_cmp)?;

        let point = ray.origin + ray.direction * nearest;
        Some(RayHit {
            point,
            distance: nearest * length,
        })
    }
}

/// Möller-Trumbore ray-triangle intersection.
///
/// Returns the parameter `t` of the hit along `ray.direction`, restricted
/// to the probe's extent `(0, 1]`.
fn ray_triangle_param(ray: &ProbeRay, [v0, v1, v2]: &[Point3; 3]) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction.cross(&edge2);
    let det = edge1.dot(&h);
    if det.abs() < PARALLEL_TOL {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - v0;
    let u = inv_det * s.dot(&h);
    if !(-HIT_SLACK..=1.0 + HIT_SLACK).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv_det * ray.direction.dot(&q);
    if v < -HIT_SLACK || u + v > 1.0 + HIT_SLACK {
        return None;
    }

    let t = inv_det * edge2.dot(&q);
    (t > HIT_SLACK && t <= 1.0 + HIT_SLACK).then_some(t)
}
