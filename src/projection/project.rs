use crate::geometry::PlaneFrame;
use crate::math::linear_solve::solve_3x4;
use crate::math::{Point2, Point3, Vector3};
use crate::params::{ProjectionMode, ProjectionParams};

/// Direction of the projecting ray through `point` for `mode`.
///
/// Perspective rays run from the eye to the point; orthographic rays always
/// run along the plane normal, wherever the eye is.
#[must_use]
pub fn ray_direction(point: &Point3, frame: &PlaneFrame, mode: ProjectionMode) -> Vector3 {
    match mode {
        ProjectionMode::Perspective => point - frame.eye(),
        ProjectionMode::Orthographic => *frame.normal(),
    }
}

/// Solves `point - corner = r * ray + s * x_axis + t * y_axis` for `(r, s, t)`.
///
/// Returns `None` unless the solution is unique and `r` is strictly
/// positive, that is, unless walking back along the ray from the point
/// reaches the plane.
#[must_use]
pub fn plane_coefficients(
    point: &Point3,
    ray: &Vector3,
    frame: &PlaneFrame,
    solver_tolerance: f64,
) -> Option<Vector3> {
    let constant = point - frame.corner();
    let solution = solve_3x4(ray, frame.x_axis(), frame.y_axis(), &constant, solver_tolerance)?;
    (solution.x > 0.0).then_some(solution)
}

/// Projects `point` along `ray` onto the plane, returning display coordinates.
///
/// Display coordinates are the plane coefficients scaled by the pixel
/// scale. `None` means the ray misses the plane or the point lies on the
/// wrong side of it; such points are simply not drawn. In perspective mode
/// `ray` runs from the eye to the point, and the point must also lie
/// beyond the plane rather than behind the eye (`r < 1`).
#[must_use]
pub fn project_point(
    point: &Point3,
    ray: &Vector3,
    frame: &PlaneFrame,
    params: &ProjectionParams,
) -> Option<Point2> {
    let solution = plane_coefficients(point, ray, frame, params.tolerances.solver)?;
    if params.mode == ProjectionMode::Perspective && solution.x >= 1.0 {
        return None;
    }
    Some(Point2::new(
        params.scale.x * solution.y,
        params.scale.y * solution.z,
    ))
}
