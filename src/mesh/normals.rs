//! Vertex normal derivation from polygon data.

use crate::math::intersect_3d::triangle_normal;
use crate::math::{Point3, Vector3, TOLERANCE};

/// Computes area-weighted unit vertex normals.
///
/// Each polygon is fan-triangulated from its first vertex; every triangle's
/// unnormalised normal (magnitude = twice its area) is accumulated at the
/// polygon's vertices. Vertices with no adjacent area get a zero normal.
#[must_use]
pub fn vertex_normals(vertices: &[Point3], polygons: &[Vec<usize>]) -> Vec<Vector3> {
    let mut normals = vec![Vector3::zeros(); vertices.len()];

    for polygon in polygons {
        let Some((&first, rest)) = polygon.split_first() else {
            continue;
        };
        let mut polygon_normal = Vector3::zeros();
        for pair in rest.windows(2) {
            polygon_normal +=
                triangle_normal(&vertices[first], &vertices[pair[0]], &vertices[pair[1]]);
        }
        for &vertex in polygon {
            normals[vertex] += polygon_normal;
        }
    }

    for normal in &mut normals {
        let len = normal.norm();
        *normal = if len < TOLERANCE {
            Vector3::zeros()
        } else {
            *normal / len
        };
    }
    normals
}
