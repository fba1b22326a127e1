mod normals;

use std::collections::BTreeSet;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Transform, Vector3};

pub use normals::vertex_normals;

/// An undirected edge between two vertex indices.
pub type Edge = (usize, usize);

/// An immutable polygon mesh in local space.
///
/// Polygons are ordered vertex index tuples (triangles or n-gons). Every
/// index stored in polygons and edges is a valid vertex index.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point3>,
    polygons: Vec<Vec<usize>>,
    edges: Vec<Edge>,
    normals: Vec<Vector3>,
}

impl Mesh {
    /// Creates a mesh, deriving its edge list and vertex normals.
    ///
    /// Edges are the deduplicated polygon boundary edges, stored with the
    /// smaller index first. Normals are area-weighted polygon normals.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::IndexOutOfRange`] if a polygon references a
    /// vertex that does not exist.
    pub fn new(vertices: Vec<Point3>, polygons: Vec<Vec<usize>>) -> Result<Self> {
        check_indices("polygon", &vertices, polygons.iter().map(Vec::as_slice))?;

        let edges = polygon_edges(&polygons);
        let normals = vertex_normals(&vertices, &polygons);
        Ok(Self {
            vertices,
            polygons,
            edges,
            normals,
        })
    }

    /// Replaces the derived vertex normals with host-supplied ones.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NormalCountMismatch`] if the buffer length
    /// differs from the vertex count.
    pub fn with_normals(mut self, normals: Vec<Vector3>) -> Result<Self> {
        if normals.len() != self.vertices.len() {
            return Err(GeometryError::NormalCountMismatch {
                expected: self.vertices.len(),
                actual: normals.len(),
            }
            .into());
        }
        self.normals = normals;
        Ok(self)
    }

    /// Replaces the derived edge list with a host-supplied one.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::IndexOutOfRange`] if an edge references a
    /// vertex that does not exist.
    pub fn with_edges(mut self, edges: Vec<Edge>) -> Result<Self> {
        let pairs: Vec<[usize; 2]> = edges.iter().map(|&(a, b)| [a, b]).collect();
        check_indices("edge", &self.vertices, pairs.iter().map(<[usize; 2]>::as_slice))?;
        self.edges = edges;
        Ok(self)
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    #[must_use]
    pub fn polygons(&self) -> &[Vec<usize>] {
        &self.polygons
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// A mesh placed in the world by a transform.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub mesh: Mesh,
    pub transform: Transform,
}

impl MeshInstance {
    #[must_use]
    pub fn new(mesh: Mesh, transform: Transform) -> Self {
        Self { mesh, transform }
    }

    /// Vertex positions mapped to world space.
    #[must_use]
    pub fn world_vertices(&self) -> Vec<Point3> {
        self.mesh
            .vertices()
            .iter()
            .map(|v| self.transform.to_world(v))
            .collect()
    }

    /// Unit vertex normals mapped to world space.
    #[must_use]
    pub fn world_normals(&self) -> Vec<Vector3> {
        self.mesh
            .normals()
            .iter()
            .map(|n| self.transform.normal_to_world(n))
            .collect()
    }
}

fn check_indices<'a>(
    element: &'static str,
    vertices: &[Point3],
    tuples: impl Iterator<Item = &'a [usize]>,
) -> Result<()> {
    for (index, tuple) in tuples.enumerate() {
        if let Some(&vertex) = tuple.iter().find(|&&v| v >= vertices.len()) {
            return Err(GeometryError::IndexOutOfRange {
                element,
                index,
                vertex,
                vertex_count: vertices.len(),
            }
            .into());
        }
    }
    Ok(())
}

/// Collects the unique boundary edges of all polygons.
fn polygon_edges(polygons: &[Vec<usize>]) -> Vec<Edge> {
    let mut edges = BTreeSet::new();
    for polygon in polygons {
        let n = polygon.len();
        for i in 0..n {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            if a != b {
                edges.insert((a.min(b), a.max(b)));
            }
        }
    }
    edges.into_iter().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DentError;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn quad() -> Mesh {
        Mesh::new(
            vec![
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2], vec![0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn edges_are_deduplicated_and_ordered() {
        let mesh = quad();
        assert_eq!(mesh.edges(), &[(0, 1), (0, 2), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn derived_normals_face_up() {
        let mesh = quad();
        for normal in mesh.normals() {
            assert!((normal - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn out_of_range_polygon_is_rejected() {
        let err = Mesh::new(vec![p(0.0, 0.0, 0.0)], vec![vec![0, 1, 2]]).unwrap_err();
        assert!(matches!(
            err,
            DentError::Geometry(GeometryError::IndexOutOfRange {
                element: "polygon",
                index: 0,
                vertex: 1,
                vertex_count: 1,
            })
        ));
    }

    #[test]
    fn out_of_range_edge_is_rejected() {
        let err = quad().with_edges(vec![(0, 1), (2, 9)]).unwrap_err();
        assert!(matches!(
            err,
            DentError::Geometry(GeometryError::IndexOutOfRange {
                element: "edge",
                index: 1,
                ..
            })
        ));
    }

    #[test]
    fn wrong_normal_count_is_rejected() {
        let err = quad().with_normals(vec![Vector3::z()]).unwrap_err();
        assert!(matches!(
            err,
            DentError::Geometry(GeometryError::NormalCountMismatch {
                expected: 4,
                actual: 1
            })
        ));
    }

    #[test]
    fn instance_maps_vertices_to_world() {
        let instance = MeshInstance::new(
            quad(),
            Transform::from_translation(Vector3::new(0.0, 0.0, 2.0)),
        );
        let world = instance.world_vertices();
        assert_eq!(world[2], p(1.0, 1.0, 2.0));
        assert!((instance.world_normals()[0] - Vector3::z()).norm() < 1e-12);
    }
}
