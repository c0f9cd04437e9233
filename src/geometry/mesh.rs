use std::collections::BTreeMap;

use crate::error::{MeshError, Result};
use crate::math::{points_coincide_3d, Point3, Vector3};

/// Tolerance for treating the normals of two adjacent triangles as equal.
const COPLANAR_NORMAL_TOL: f64 = 1e-6;

/// Minimum doubled area for a triangle to contribute a normal.
const DEGENERATE_AREA_TOL: f64 = 1e-12;

/// A polyhedron reduced to what a line drawing needs: distinct vertices and
/// the edges between them.
#[derive(Debug, Clone, Default)]
pub struct EdgeMesh {
    vertices: Vec<Point3>,
    edges: Vec<(usize, usize)>,
}

impl EdgeMesh {
    /// Creates an edge mesh from a vertex list and edges given as vertex index pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge references a vertex outside the list or
    /// connects a vertex to itself.
    pub fn new(vertices: Vec<Point3>, edges: Vec<(usize, usize)>) -> Result<Self> {
        let count = vertices.len();
        for (edge, &(a, b)) in edges.iter().enumerate() {
            for vertex in [a, b] {
                if vertex >= count {
                    return Err(MeshError::VertexOutOfRange {
                        edge,
                        vertex,
                        count,
                    }
                    .into());
                }
            }
            if a == b {
                return Err(MeshError::SelfLoop(edge).into());
            }
        }
        Ok(Self { vertices, edges })
    }

    /// Builds an edge mesh from a triangle soup.
    ///
    /// Positions closer than `weld_tolerance` in every coordinate are welded
    /// into one vertex. Each undirected triangle edge is kept once, except
    /// edges between two coplanar triangles, which are triangulation
    /// diagonals rather than edges of the solid.
    ///
    /// # Errors
    ///
    /// Returns an error if a triangle references a position outside `positions`.
    pub fn from_triangles(
        positions: &[Point3],
        triangles: &[[usize; 3]],
        weld_tolerance: f64,
    ) -> Result<Self> {
        let count = positions.len();
        let mut vertices: Vec<Point3> = Vec::new();
        let mut remap = Vec::with_capacity(count);
        for position in positions {
            let index = vertices
                .iter()
                .position(|v| points_coincide_3d(v, position, weld_tolerance))
                .unwrap_or_else(|| {
                    vertices.push(*position);
                    vertices.len() - 1
                });
            remap.push(index);
        }

        // Undirected edge -> normals of the triangles using it.
        let mut adjacency: BTreeMap<(usize, usize), Vec<Vector3>> = BTreeMap::new();
        for (triangle, corners) in triangles.iter().enumerate() {
            let mut welded = [0; 3];
            for (slot, &vertex) in corners.iter().enumerate() {
                let Some(&index) = remap.get(vertex) else {
                    return Err(MeshError::TriangleVertexOutOfRange {
                        triangle,
                        vertex,
                        count,
                    }
                    .into());
                };
                welded[slot] = index;
            }

            let [a, b, c] = welded;
            if a == b || b == c || a == c {
                continue;
            }
            let normal = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
            let area = normal.norm();
            if area < DEGENERATE_AREA_TOL {
                continue;
            }
            let normal = normal / area;

            for (u, v) in [(a, b), (b, c), (c, a)] {
                adjacency
                    .entry((u.min(v), u.max(v)))
                    .or_default()
                    .push(normal);
            }
        }

        let edges = adjacency
            .into_iter()
            .filter(|(_, normals)| !is_flat_edge(normals))
            .map(|(edge, _)| edge)
            .collect();

        Ok(Self { vertices, edges })
    }

    /// Returns the vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Returns the edges as vertex index pairs.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

/// An edge shared by exactly two triangles facing the same way lies inside a flat face.
fn is_flat_edge(normals: &[Vector3]) -> bool {
    match normals {
        [n1, n2] => n1.dot(n2) > 1.0 - COPLANAR_NORMAL_TOL,
        _ => false,
    }
}

/// Axis-aligned unit cube `[0, 1]³` as positions and outward-wound triangles.
#[cfg(test)]
pub(crate) fn unit_cube() -> (Vec<Point3>, Vec<[usize; 3]>) {
    let positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    #[rustfmt::skip]
    let triangles = vec![
        [0, 2, 1], [0, 3, 2], // z = 0
        [4, 5, 6], [4, 6, 7], // z = 1
        [0, 1, 5], [0, 5, 4], // y = 0
        [2, 3, 7], [2, 7, 6], // y = 1
        [0, 4, 7], [0, 7, 3], // x = 0
        [1, 2, 6], [1, 6, 5], // x = 1
    ];
    (positions, triangles)
}
