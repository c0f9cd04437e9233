use super::linear_solve::solve_2x3;
use super::{Point2, Vector2};

/// A crossing of two bounded 2D segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentCrossing {
    /// The crossing point, evaluated on the second segment.
    pub point: Point2,
    /// Parameter along the first segment (`a0 → a1`).
    pub s: f64,
    /// Parameter along the second segment (`b0 → b1`).
    pub t: f64,
}

/// Bounded segment-segment intersection in 2D.
///
/// Solves `a0 - b0 = s * (a0 - a1) + t * (b1 - b0)`; the first direction is
/// flipped so that `s` comes out as the forward parameter on `a`. The
/// crossing is accepted when the system has a unique solution and both
/// parameters lie in `[-slack, 1 + slack]`.
#[must_use]
pub fn segment_crossing_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    slack: f64,
    solver_tolerance: f64,
) -> Option<SegmentCrossing> {
    let flipped_a = a0 - a1;
    let db = b1 - b0;
    let constant = a0 - b0;

    let (s, t) = solve_2x3(&flipped_a, &db, &constant, solver_tolerance)?;

    let in_range = |value: f64| value >= -slack && value <= 1.0 + slack;
    if !in_range(s) || !in_range(t) {
        return None;
    }

    Some(SegmentCrossing {
        point: b0 + db * t,
        s,
        t,
    })
}

/// Angle of the direction `from → to`, measured from the positive X axis, in `(-π, π]`.
#[must_use]
pub fn direction_angle(from: &Point2, to: &Point2) -> f64 {
    let d: Vector2 = to - from;
    d.y.atan2(d.x)
}

/// Returns `true` if two angles are equal within `tolerance`, treating `-π` and `π` as equal.
#[must_use]
pub fn angles_coincide(a: f64, b: f64, tolerance: f64) -> bool {
    let diff = (a - b).rem_euclid(std::f64::consts::TAU);
    diff < tolerance || std::f64::consts::TAU - diff < tolerance
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::{SOLVER_TOLERANCE, WORLD_TOLERANCE};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_diagonals() {
        let hit = segment_crossing_2d(
            &p(0.0, 0.0),
            &p(200.0, 200.0),
            &p(0.0, 200.0),
            &p(200.0, 0.0),
            WORLD_TOLERANCE,
            SOLVER_TOLERANCE,
        )
        .unwrap();
        assert_abs_diff_eq!(hit.point, p(100.0, 100.0), epsilon = 1e-9);
        assert_abs_diff_eq!(hit.s, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.t, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn parameters_follow_segment_direction() {
        // Crossing at a quarter of the way along `a` and three quarters along `b`.
        let hit = segment_crossing_2d(
            &p(0.0, 0.0),
            &p(400.0, 0.0),
            &p(100.0, 300.0),
            &p(100.0, -100.0),
            WORLD_TOLERANCE,
            SOLVER_TOLERANCE,
        )
        .unwrap();
        assert_abs_diff_eq!(hit.s, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.t, 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(hit.point, p(100.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn lines_cross_outside_segments() {
        let hit = segment_crossing_2d(
            &p(0.0, 0.0),
            &p(100.0, 0.0),
            &p(200.0, -50.0),
            &p(200.0, 50.0),
            WORLD_TOLERANCE,
            SOLVER_TOLERANCE,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn parallel_segments_do_not_cross() {
        let hit = segment_crossing_2d(
            &p(0.0, 0.0),
            &p(100.0, 0.0),
            &p(0.0, 10.0),
            &p(100.0, 10.0),
            WORLD_TOLERANCE,
            SOLVER_TOLERANCE,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn touching_endpoint_is_within_slack() {
        let hit = segment_crossing_2d(
            &p(0.0, 0.0),
            &p(100.0, 0.0),
            &p(50.0, 0.0),
            &p(50.0, 80.0),
            WORLD_TOLERANCE,
            SOLVER_TOLERANCE,
        )
        .unwrap();
        assert_abs_diff_eq!(hit.t, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn angle_of_axes() {
        assert_abs_diff_eq!(direction_angle(&p(0.0, 0.0), &p(1.0, 0.0)), 0.0);
        assert_abs_diff_eq!(direction_angle(&p(0.0, 0.0), &p(0.0, 1.0)), PI / 2.0);
        assert_abs_diff_eq!(direction_angle(&p(0.0, 0.0), &p(-1.0, 0.0)), PI);
    }

    #[test]
    fn angles_wrap_around() {
        assert!(angles_coincide(PI, -PI + 0.001, 0.01));
        assert!(angles_coincide(0.3, 0.305, 0.01));
        assert!(!angles_coincide(0.0, PI, 0.01));
    }
}
