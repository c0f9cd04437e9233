pub mod intersect_2d;
pub mod linear_solve;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Tolerance for pivot selection and solution classification in Gauss-Jordan elimination.
pub const SOLVER_TOLERANCE: f64 = 0.001;

/// Tolerance for treating two world-space points as the same point.
pub const WORLD_TOLERANCE: f64 = 0.01;

/// Tolerance for treating two projected points as the same point when intersecting edges.
///
/// Projected coordinates are scaled to pixel-like ranges, hence the large value.
pub const PLANE_TOLERANCE: f64 = 1.0;

/// Tolerance for treating two hidden-segment endpoints as the same point when merging.
pub const MERGE_TOLERANCE: f64 = 3.0;

/// Tolerance, in radians, for treating two segment directions as equal.
pub const ANGLE_TOLERANCE: f64 = 0.01;

/// The independent tolerance classes used by a projection pass.
///
/// Each class compares values of a different scale, so they must not be
/// collapsed into one another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Pivot and solution tolerance for the linear solver.
    pub solver: f64,
    /// World-space point coincidence; also bounds intersection parameters.
    pub world: f64,
    /// Projected-plane point coincidence during edge intersection.
    pub plane: f64,
    /// Projected-plane point coincidence during hidden-segment merging.
    pub merge: f64,
    /// Direction comparison during hidden-segment merging, in radians.
    pub angle: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            solver: SOLVER_TOLERANCE,
            world: WORLD_TOLERANCE,
            plane: PLANE_TOLERANCE,
            merge: MERGE_TOLERANCE,
            angle: ANGLE_TOLERANCE,
        }
    }
}

/// Returns `true` if `a` and `b` differ by less than `tolerance`.
#[must_use]
pub fn values_coincide(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

/// Returns `true` if every coordinate of `a` and `b` differs by less than `tolerance`.
#[must_use]
pub fn points_coincide_2d(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    values_coincide(a.x, b.x, tolerance) && values_coincide(a.y, b.y, tolerance)
}

/// Returns `true` if every coordinate of `a` and `b` differs by less than `tolerance`.
#[must_use]
pub fn points_coincide_3d(a: &Point3, b: &Point3, tolerance: f64) -> bool {
    values_coincide(a.x, b.x, tolerance)
        && values_coincide(a.y, b.y, tolerance)
        && values_coincide(a.z, b.z, tolerance)
}
