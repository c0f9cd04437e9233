use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::{EdgeMesh, PlaneFrame, RayCaster};
use crate::math::{Point2, Point3};
use crate::params::ProjectionParams;

use super::dash::dash_segments;
use super::intersect_edges::{EdgeSegment, IntersectEdges, SegmentedEdges};
use super::merge_hidden::{MergeHidden, Segment2};
use super::project::{project_point, ray_direction};
use super::visibility::{ClassifyVisibility, Visibility};

/// The line drawing produced by one projection pass.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    /// Segments drawn solid.
    pub shown: Vec<Segment2>,
    /// Hidden segments, already merged into runs.
    pub hidden: Vec<Segment2>,
    /// The subdivided edges the drawing was built from.
    pub edges: SegmentedEdges,
    /// Visibility of each entry of `edges.segments()`.
    pub visibility: Vec<Visibility>,
}

impl Drawing {
    /// Iterates over every subdivided segment with its visibility.
    pub fn classified(&self) -> impl Iterator<Item = (EdgeSegment, Visibility)> + '_ {
        self.edges
            .segments()
            .iter()
            .copied()
            .zip(self.visibility.iter().copied())
    }

    /// Lays out the dashes of every hidden run.
    ///
    /// # Errors
    ///
    /// Returns an error if the dash layout is invalid (see [`dash_segments`]).
    pub fn hidden_dashes(&self, dash_length: f64, period: usize) -> Result<Vec<Segment2>> {
        let mut dashes = Vec::new();
        for run in &self.hidden {
            dashes.extend(dash_segments(run.start, run.end, dash_length, period)?);
        }
        Ok(dashes)
    }
}

/// Runs a full projection pass over an edge mesh.
///
/// Vertices are projected onto the plane; those that do not project are
/// left out together with their edges. The remaining edges are subdivided
/// at their crossings, each piece is classified by a probe into the solid,
/// and the hidden pieces are merged into runs.
pub struct ProjectionPass {
    params: ProjectionParams,
}

impl ProjectionPass {
    /// Creates a new `ProjectionPass` operation.
    #[must_use]
    pub fn new(params: ProjectionParams) -> Self {
        Self { params }
    }

    /// Executes the pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the projection parameters are invalid or the
    /// mesh's edges reference missing vertices.
    pub fn execute<C>(&self, mesh: &EdgeMesh, frame: &PlaneFrame, caster: &C) -> Result<Drawing>
    where
        C: RayCaster + ?Sized,
    {
        self.params.validate()?;

        let (points_2d, points_3d, remap) = self.project_vertices(mesh.vertices(), frame);
        let edges: Vec<EdgeSegment> = mesh
            .edges()
            .iter()
            .filter_map(|&(a, b)| Some(EdgeSegment::new(remap[a]?, remap[b]?)))
            .collect();
        debug!(
            vertices = mesh.vertices().len(),
            projected = points_2d.len(),
            edges = edges.len(),
            "vertices projected"
        );

        let tolerances = self.params.tolerances;
        let segmented = IntersectEdges::new(tolerances).execute(points_2d, points_3d, &edges)?;
        let visibility = ClassifyVisibility::new(self.params).execute(&segmented, frame, caster);

        let mut shown = Vec::new();
        let mut hidden = Vec::new();
        for (&segment, &state) in segmented.segments().iter().zip(&visibility) {
            let (start, end) = segmented.segment_2d(segment);
            match state {
                Visibility::Shown => shown.push(Segment2::new(start, end)),
                Visibility::Hidden => hidden.push(Segment2::new(start, end)),
            }
        }
        let hidden = MergeHidden::new(tolerances).execute(&hidden);

        debug!(
            segments = segmented.segments().len(),
            shown = shown.len(),
            hidden = hidden.len(),
            "projection pass complete"
        );

        Ok(Drawing {
            shown,
            hidden,
            edges: segmented,
            visibility,
        })
    }

    /// Projects every vertex, returning the projected points, their world
    /// positions, and each vertex's index among the projected points.
    fn project_vertices(
        &self,
        vertices: &[Point3],
        frame: &PlaneFrame,
    ) -> (Vec<Point2>, Vec<Point3>, Vec<Option<usize>>) {
        let mut points_2d = Vec::with_capacity(vertices.len());
        let mut points_3d = Vec::with_capacity(vertices.len());
        let remap = vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| {
                let ray = ray_direction(vertex, frame, self.params.mode);
                let Some(display) = project_point(vertex, &ray, frame, &self.params) else {
                    trace!(index, "vertex does not project");
                    return None;
                };
                points_2d.push(display);
                points_3d.push(*vertex);
                Some(points_2d.len() - 1)
            })
            .collect();
        (points_2d, points_3d, remap)
    }
}
