use tracing::trace;

use crate::math::intersect_2d::{angles_coincide, direction_angle};
use crate::math::{points_coincide_2d, Point2, Tolerances};

/// A drawn 2D line segment in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    /// First endpoint.
    pub start: Point2,
    /// Second endpoint.
    pub end: Point2,
}

impl Segment2 {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns `true` if both segments have the same endpoints, in either order.
    fn same_as(&self, other: &Self, tolerance: f64) -> bool {
        let eq = |a: &Point2, b: &Point2| points_coincide_2d(a, b, tolerance);
        (eq(&self.start, &other.start) && eq(&self.end, &other.end))
            || (eq(&self.start, &other.end) && eq(&self.end, &other.start))
    }
}

/// Collapses hidden segments into the fewest runs for dashed drawing.
///
/// Duplicates are removed first. Then two segments are joined while they
/// have the same direction (either orientation) and meet at one endpoint
/// from opposite sides. Segments meeting at an angle, or overlapping in the
/// same direction, are left alone.
pub struct MergeHidden {
    tolerances: Tolerances,
}

impl MergeHidden {
    /// Creates a new `MergeHidden` operation.
    #[must_use]
    pub fn new(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Executes the merge.
    #[must_use]
    pub fn execute(&self, segments: &[Segment2]) -> Vec<Segment2> {
        let merge_tol = self.tolerances.merge;

        let mut runs: Vec<Segment2> = Vec::with_capacity(segments.len());
        for segment in segments {
            if !runs.iter().any(|kept| kept.same_as(segment, merge_tol)) {
                runs.push(*segment);
            }
        }
        let unique = runs.len();

        'merge: loop {
            for i in 0..runs.len() {
                for j in (i + 1)..runs.len() {
                    if let Some(joined) = self.join(&runs[i], &runs[j]) {
                        runs.swap_remove(j);
                        runs[i] = joined;
                        continue 'merge;
                    }
                }
            }
            break;
        }

        trace!(
            input = segments.len(),
            unique,
            merged = runs.len(),
            "hidden segments merged"
        );
        runs
    }

    /// Joins two collinear segments that continue each other.
    fn join(&self, a: &Segment2, b: &Segment2) -> Option<Segment2> {
        let tol = &self.tolerances;

        let angle_a = direction_angle(&a.start, &a.end);
        let angle_b = direction_angle(&b.start, &b.end);
        let reversed_a = direction_angle(&a.end, &a.start);
        if !angles_coincide(angle_a, angle_b, tol.angle)
            && !angles_coincide(reversed_a, angle_b, tol.angle)
        {
            return None;
        }

        // (shared point on a, shared point on b, far end of a, far end of b)
        let eq = |p: &Point2, q: &Point2| points_coincide_2d(p, q, tol.merge);
        let (shared_a, shared_b, far_a, far_b) = if eq(&a.start, &b.start) {
            (a.start, b.start, a.end, b.end)
        } else if eq(&a.start, &b.end) {
            (a.start, b.end, a.end, b.start)
        } else if eq(&a.end, &b.start) {
            (a.end, b.start, a.start, b.end)
        } else if eq(&a.end, &b.end) {
            (a.end, b.end, a.start, b.start)
        } else {
            return None;
        };

        // Both far ends lie on the same side of the shared point: an overlap.
        let toward_a = direction_angle(&far_a, &shared_a);
        let toward_b = direction_angle(&far_b, &shared_b);
        if angles_coincide(toward_a, toward_b, tol.angle) {
            return None;
        }

        Some(Segment2::new(far_a, far_b))
    }
}
