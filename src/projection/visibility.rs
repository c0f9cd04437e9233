use tracing::{debug, trace};

use crate::geometry::{PlaneFrame, ProbeRay, RayCaster};
use crate::math::{points_coincide_3d, Point3};
use crate::params::{ProjectionMode, ProjectionParams};

use super::intersect_edges::{EdgeSegment, SegmentedEdges};
use super::project::project_point;

/// Whether a segment is drawn solid or dashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Nothing lies between the viewer and the segment.
    Shown,
    /// The solid blocks the view of the segment.
    Hidden,
}

impl Visibility {
    /// Returns `true` for [`Visibility::Shown`].
    #[must_use]
    pub fn is_shown(self) -> bool {
        self == Self::Shown
    }
}

/// Classifies each subdivided segment by probing at its midpoint.
///
/// Segments never cross each other, so visibility is constant along each
/// one and a single probe decides it. The probe runs from the eye
/// (perspective) or from the midpoint's foot on the plane (orthographic)
/// to the midpoint. A segment is hidden when the probe collides with
/// something that is not the midpoint itself.
pub struct ClassifyVisibility {
    params: ProjectionParams,
}

impl ClassifyVisibility {
    /// Creates a new `ClassifyVisibility` operation.
    #[must_use]
    pub fn new(params: ProjectionParams) -> Self {
        Self { params }
    }

    /// Executes the classification, one entry per segment of `edges`.
    #[must_use]
    pub fn execute<C>(&self, edges: &SegmentedEdges, frame: &PlaneFrame, caster: &C) -> Vec<Visibility>
    where
        C: RayCaster + ?Sized,
    {
        edges
            .segments()
            .iter()
            .map(|&segment| self.classify(edges, segment, frame, caster))
            .collect()
    }

    fn classify<C>(
        &self,
        edges: &SegmentedEdges,
        segment: EdgeSegment,
        frame: &PlaneFrame,
        caster: &C,
    ) -> Visibility
    where
        C: RayCaster + ?Sized,
    {
        let (start, end) = edges.segment_3d(segment);
        let midpoint = nalgebra::center(&start, &end);

        let Some(origin) = self.probe_origin(&midpoint, frame) else {
            debug!(?midpoint, "midpoint has no foot on the plane, treating as shown");
            return Visibility::Shown;
        };

        let visibility = match caster.cast(ProbeRay::towards(origin, &midpoint)) {
            None => Visibility::Shown,
            Some(hit) if points_coincide_3d(&hit.point, &midpoint, self.params.tolerances.world) => {
                Visibility::Shown
            }
            Some(_) => Visibility::Hidden,
        };
        trace!(start = segment.start, end = segment.end, ?visibility, "segment classified");
        visibility
    }

    fn probe_origin(&self, midpoint: &Point3, frame: &PlaneFrame) -> Option<Point3> {
        match self.params.mode {
            ProjectionMode::Perspective => Some(*frame.eye()),
            ProjectionMode::Orthographic => {
                let display = project_point(midpoint, frame.normal(), frame, &self.params)?;
                Some(frame.plane_point(&display, &self.params.scale))
            }
        }
    }
}
