use std::collections::VecDeque;

use slotmap::SlotMap;
use tracing::trace;

use crate::error::{MeshError, Result};
use crate::math::intersect_2d::{segment_crossing_2d, SegmentCrossing};
use crate::math::{points_coincide_2d, points_coincide_3d, Point2, Point3, Tolerances};

slotmap::new_key_type! {
    /// Identifier of a settled segment during edge intersection.
    struct SegmentId;
}

/// A piece of a projected edge, as indices into the combined point lists
/// of a [`SegmentedEdges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeSegment {
    /// Index of the first endpoint.
    pub start: usize,
    /// Index of the second endpoint.
    pub end: usize,
}

impl EdgeSegment {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Edges subdivided so that no two segments cross.
///
/// The display and world point lists are parallel: index `i` is the same
/// point in both. Projected vertices come first, followed by the points
/// synthesized at crossings. Only [`IntersectEdges::execute`] builds a
/// non-empty value, so every segment indexes into both lists.
#[derive(Debug, Clone, Default)]
pub struct SegmentedEdges {
    points_2d: Vec<Point2>,
    points_3d: Vec<Point3>,
    segments: Vec<EdgeSegment>,
}

impl SegmentedEdges {
    /// Returns the display coordinates of every point.
    #[must_use]
    pub fn points_2d(&self) -> &[Point2] {
        &self.points_2d
    }

    /// Returns the world coordinates of every point.
    #[must_use]
    pub fn points_3d(&self) -> &[Point3] {
        &self.points_3d
    }

    /// Returns the segments.
    #[must_use]
    pub fn segments(&self) -> &[EdgeSegment] {
        &self.segments
    }

    /// Returns the display endpoints of `segment`, or `None` if it indexes
    /// outside the point lists.
    #[must_use]
    pub fn endpoints_2d(&self, segment: EdgeSegment) -> Option<(Point2, Point2)> {
        Some((*self.points_2d.get(segment.start)?, *self.points_2d.get(segment.end)?))
    }

    /// Returns the world endpoints of `segment`, or `None` if it indexes
    /// outside the point lists.
    #[must_use]
    pub fn endpoints_3d(&self, segment: EdgeSegment) -> Option<(Point3, Point3)> {
        Some((*self.points_3d.get(segment.start)?, *self.points_3d.get(segment.end)?))
    }

    /// Display endpoints of one of this value's own segments.
    pub(crate) fn segment_2d(&self, segment: EdgeSegment) -> (Point2, Point2) {
        (self.points_2d[segment.start], self.points_2d[segment.end])
    }

    /// World endpoints of one of this value's own segments.
    pub(crate) fn segment_3d(&self, segment: EdgeSegment) -> (Point3, Point3) {
        (self.points_3d[segment.start], self.points_3d[segment.end])
    }

    fn push_point(&mut self, display: Point2, world: Point3) -> usize {
        self.points_2d.push(display);
        self.points_3d.push(world);
        self.points_2d.len() - 1
    }

    fn share_endpoint(&self, a: EdgeSegment, b: EdgeSegment, tolerance: f64) -> bool {
        [(a.start, b.start), (a.start, b.end), (a.end, b.start), (a.end, b.end)]
            .iter()
            .any(|&(i, j)| points_coincide_2d(&self.points_2d[i], &self.points_2d[j], tolerance))
    }

    /// World point at parameter `t` along `segment`.
    fn world_at(&self, segment: EdgeSegment, t: f64) -> Point3 {
        let (start, end) = self.segment_3d(segment);
        start + (end - start) * t
    }

    /// Returns `true` if `point` is within `tolerance` of either endpoint of `segment`.
    fn touches_endpoint(&self, segment: EdgeSegment, point: &Point3, tolerance: f64) -> bool {
        let (start, end) = self.segment_3d(segment);
        points_coincide_3d(point, &start, tolerance) || points_coincide_3d(point, &end, tolerance)
    }
}

/// Subdivides projected edges at their crossings.
///
/// Every segment of the result meets any other segment, if at all, only at
/// an endpoint, so visibility is constant along each one.
pub struct IntersectEdges {
    tolerances: Tolerances,
}

impl IntersectEdges {
    /// Creates a new `IntersectEdges` operation.
    #[must_use]
    pub fn new(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    /// Executes the subdivision.
    ///
    /// `points_2d` and `points_3d` are the projected vertices and their world
    /// positions; `edges` index into both and must only reference vertices
    /// that projected. Edges seen end-on, whose endpoints coincide on the
    /// plane, are dropped.
    ///
    /// Pending edges are tested one at a time against the settled ones. At a
    /// crossing the settled segment is split first, then the pending one; a
    /// split pending edge goes back to the front of the queue as two halves,
    /// so every half is tested against everything settled so far. A crossing
    /// that lands on an edge's own endpoint in world space does not split
    /// that edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the two point lists differ in length or an edge
    /// references a point outside them.
    pub fn execute(
        &self,
        points_2d: Vec<Point2>,
        points_3d: Vec<Point3>,
        edges: &[EdgeSegment],
    ) -> Result<SegmentedEdges> {
        if points_2d.len() != points_3d.len() {
            return Err(MeshError::PointCountMismatch {
                display: points_2d.len(),
                world: points_3d.len(),
            }
            .into());
        }
        let count = points_2d.len();
        for (edge, segment) in edges.iter().enumerate() {
            if let Some(vertex) = [segment.start, segment.end].into_iter().find(|&v| v >= count) {
                return Err(MeshError::VertexOutOfRange {
                    edge,
                    vertex,
                    count,
                }
                .into());
            }
        }

        let tol = self.tolerances;
        let mut result = SegmentedEdges {
            points_2d,
            points_3d,
            segments: Vec::new(),
        };

        let mut pending: VecDeque<EdgeSegment> = edges
            .iter()
            .copied()
            .filter(|edge| {
                let (a, b) = result.segment_2d(*edge);
                let end_on = points_coincide_2d(&a, &b, tol.plane);
                if end_on {
                    trace!(start = edge.start, end = edge.end, "dropping end-on edge");
                }
                !end_on
            })
            .collect();

        let mut settled: SlotMap<SegmentId, EdgeSegment> = SlotMap::with_key();
        let mut splits = 0usize;

        'pending: while let Some(segment) = pending.pop_front() {
            let ids: Vec<SegmentId> = settled.keys().collect();
            for id in ids {
                let other = settled[id];
                if result.share_endpoint(segment, other, tol.plane) {
                    continue;
                }

                let (a0, a1) = result.segment_2d(segment);
                let (b0, b1) = result.segment_2d(other);
                let Some(SegmentCrossing { point, s, t }) =
                    segment_crossing_2d(&a0, &a1, &b0, &b1, tol.world, tol.solver)
                else {
                    continue;
                };

                let on_segment = result.world_at(segment, s);
                let on_other = result.world_at(other, t);

                if !result.touches_endpoint(other, &on_other, tol.world) {
                    let index = result.push_point(point, on_other);
                    settled.remove(id);
                    settled.insert(EdgeSegment::new(other.start, index));
                    settled.insert(EdgeSegment::new(other.end, index));
                    splits += 1;
                }

                if !result.touches_endpoint(segment, &on_segment, tol.world) {
                    let index = result.push_point(point, on_segment);
                    pending.push_front(EdgeSegment::new(segment.end, index));
                    pending.push_front(EdgeSegment::new(segment.start, index));
                    splits += 1;
                    continue 'pending;
                }
            }
            settled.insert(segment);
        }

        trace!(splits, segments = settled.len(), "edges subdivided");
        result.segments = settled.into_iter().map(|(_, segment)| segment).collect();
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::HidlineError;

    fn p2(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn p3(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn run(points_2d: Vec<Point2>, points_3d: Vec<Point3>, edges: &[(usize, usize)]) -> SegmentedEdges {
        let edges: Vec<EdgeSegment> = edges.iter().map(|&(a, b)| EdgeSegment::new(a, b)).collect();
        IntersectEdges::new(Tolerances::default())
            .execute(points_2d, points_3d, &edges)
            .unwrap()
    }

    /// Segments as sorted pairs of display endpoints, rounded for comparison.
    fn display_pairs(result: &SegmentedEdges) -> Vec<[(i64, i64); 2]> {
        #[allow(clippy::cast_possible_truncation)]
        let key = |p: Point2| (p.x.round() as i64, p.y.round() as i64);
        let mut pairs: Vec<[(i64, i64); 2]> = result
            .segments()
            .iter()
            .map(|&s| {
                let (a, b) = result.segment_2d(s);
                let mut pair = [key(a), key(b)];
                pair.sort_unstable();
                pair
            })
            .collect();
        pairs.sort_unstable();
        pairs
    }

    #[test]
    fn crossing_segments_become_four() {
        // An X in the plane; the two strokes sit at different depths.
        let points_2d = vec![p2(0.0, 0.0), p2(200.0, 200.0), p2(0.0, 200.0), p2(200.0, 0.0)];
        let points_3d = vec![
            p3(0.0, 0.0, 1.0),
            p3(2.0, 2.0, 1.0),
            p3(0.0, 2.0, 3.0),
            p3(2.0, 0.0, 3.0),
        ];
        let result = run(points_2d, points_3d, &[(0, 1), (2, 3)]);

        assert_eq!(result.segments().len(), 4);
        assert!(!result.segments().contains(&EdgeSegment::new(0, 1)));
        assert!(!result.segments().contains(&EdgeSegment::new(2, 3)));

        // One synthesized point per edge: same display position, own depth.
        assert_eq!(result.points_2d().len(), 6);
        assert_abs_diff_eq!(result.points_2d()[4], p2(100.0, 100.0), epsilon = 1e-9);
        assert_abs_diff_eq!(result.points_2d()[5], p2(100.0, 100.0), epsilon = 1e-9);
        let depths = [result.points_3d()[4].z, result.points_3d()[5].z];
        assert!(depths.contains(&1.0) && depths.contains(&3.0));

        // Each half keeps to its own edge's depth.
        for &segment in result.segments() {
            let (a, b) = result.segment_3d(segment);
            assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        // Both edges start at the same display point; their lines cross there.
        let points_2d = vec![p2(0.0, 0.0), p2(100.0, 0.0), p2(0.5, 0.5), p2(0.0, 100.0)];
        let points_3d = vec![
            p3(0.0, 0.0, 0.0),
            p3(1.0, 0.0, 0.0),
            p3(0.0, 0.0, 5.0),
            p3(0.0, 1.0, 5.0),
        ];
        let result = run(points_2d, points_3d, &[(0, 1), (2, 3)]);
        assert_eq!(result.segments().len(), 2);
        assert_eq!(result.points_2d().len(), 4);
    }

    #[test]
    fn t_junction_splits_only_the_crossed_edge() {
        // Edge 2-3 ends on the interior of edge 0-1, in 3D as well as in 2D.
        let points_2d = vec![p2(0.0, 0.0), p2(200.0, 0.0), p2(100.0, 100.0), p2(100.0, 0.0)];
        let points_3d = vec![
            p3(0.0, 0.0, 0.0),
            p3(2.0, 0.0, 0.0),
            p3(1.0, 1.0, 0.0),
            p3(1.0, 0.0, 0.0),
        ];
        let result = run(points_2d, points_3d, &[(0, 1), (2, 3)]);

        assert_eq!(result.segments().len(), 3);
        assert!(result.segments().contains(&EdgeSegment::new(2, 3)));
        assert_eq!(result.points_2d().len(), 5);
    }

    #[test]
    fn end_on_edges_are_dropped() {
        let points_2d = vec![p2(10.0, 10.0), p2(10.2, 9.9), p2(50.0, 50.0)];
        let points_3d = vec![p3(0.0, 0.0, 0.0), p3(0.0, 0.0, 1.0), p3(1.0, 1.0, 0.0)];
        let result = run(points_2d, points_3d, &[(0, 1), (0, 2)]);
        assert_eq!(result.segments(), vec![EdgeSegment::new(0, 2)]);
    }

    #[test]
    fn three_edges_through_one_region() {
        // A horizontal edge crossed by two verticals at different depths.
        let points_2d = vec![
            p2(0.0, 100.0),
            p2(400.0, 100.0),
            p2(100.0, 0.0),
            p2(100.0, 400.0),
            p2(300.0, 0.0),
            p2(300.0, 400.0),
        ];
        let points_3d = vec![
            p3(0.0, 1.0, 1.0),
            p3(4.0, 1.0, 1.0),
            p3(1.0, 0.0, 2.0),
            p3(1.0, 4.0, 2.0),
            p3(3.0, 0.0, 3.0),
            p3(3.0, 4.0, 3.0),
        ];
        let result = run(points_2d, points_3d, &[(0, 1), (2, 3), (4, 5)]);

        // The horizontal is cut twice into three pieces; each vertical once.
        assert_eq!(result.segments().len(), 7);
        assert_eq!(
            display_pairs(&result),
            vec![
                [(0, 100), (100, 100)],
                [(100, 0), (100, 100)],
                [(100, 100), (100, 400)],
                [(100, 100), (300, 100)],
                [(300, 0), (300, 100)],
                [(300, 100), (300, 400)],
                [(300, 100), (400, 100)],
            ]
        );
    }

    #[test]
    fn no_two_result_segments_cross() {
        // A star of four long edges over a square.
        let points_2d = vec![
            p2(0.0, 0.0),
            p2(400.0, 0.0),
            p2(400.0, 400.0),
            p2(0.0, 400.0),
            p2(200.0, -50.0),
            p2(200.0, 450.0),
            p2(-50.0, 200.0),
            p2(450.0, 200.0),
        ];
        let points_3d: Vec<Point3> = points_2d
            .iter()
            .enumerate()
            .map(|(i, p)| {
                #[allow(clippy::cast_precision_loss)]
                let depth = i as f64;
                p3(p.x / 100.0, p.y / 100.0, depth)
            })
            .collect();
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0), (4, 5), (6, 7), (0, 2), (1, 3)];
        let result = run(points_2d, points_3d, &edges);

        let tol = Tolerances::default();
        for (i, &a) in result.segments().iter().enumerate() {
            for &b in &result.segments()[i + 1..] {
                if result.share_endpoint(a, b, tol.plane) {
                    continue;
                }
                let (a0, a1) = result.segment_2d(a);
                let (b0, b1) = result.segment_2d(b);
                let crossing = segment_crossing_2d(&a0, &a1, &b0, &b1, tol.world, tol.solver);
                assert!(crossing.is_none(), "{a:?} crosses {b:?}");
            }
        }
    }

    #[test]
    fn edge_index_out_of_range_is_rejected() {
        let points_2d = vec![p2(0.0, 0.0), p2(100.0, 0.0)];
        let points_3d = vec![p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0)];
        let edges = [EdgeSegment::new(0, 1), EdgeSegment::new(0, 5)];
        let result = IntersectEdges::new(Tolerances::default()).execute(points_2d, points_3d, &edges);
        assert!(matches!(
            result,
            Err(HidlineError::Mesh(MeshError::VertexOutOfRange {
                edge: 1,
                vertex: 5,
                count: 2
            }))
        ));
    }

    #[test]
    fn mismatched_point_lists_are_rejected() {
        // Four display points forming an X, but world points for only one stroke.
        let points_2d = vec![p2(0.0, 0.0), p2(200.0, 200.0), p2(0.0, 200.0), p2(200.0, 0.0)];
        let points_3d = vec![p3(0.0, 0.0, 1.0), p3(2.0, 2.0, 1.0)];
        let edges = [EdgeSegment::new(0, 1), EdgeSegment::new(2, 3)];
        let result = IntersectEdges::new(Tolerances::default()).execute(points_2d, points_3d, &edges);
        assert!(matches!(
            result,
            Err(HidlineError::Mesh(MeshError::PointCountMismatch {
                display: 4,
                world: 2
            }))
        ));
    }

    #[test]
    fn foreign_segment_has_no_endpoints() {
        let result = run(
            vec![p2(0.0, 0.0), p2(100.0, 0.0)],
            vec![p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0)],
            &[(0, 1)],
        );
        assert!(result.endpoints_2d(EdgeSegment::new(0, 1)).is_some());
        assert!(result.endpoints_2d(EdgeSegment::new(0, 5)).is_none());
        assert!(result.endpoints_3d(EdgeSegment::new(7, 1)).is_none());
    }
}
