mod bvh;

use std::collections::BTreeSet;

use crate::error::{GeometryError, Result};
use crate::math::intersect_3d::{ray_triangle_intersect, triangle_normal, triangles_intersect};
use crate::math::{Aabb, Point3, Vector3, TOLERANCE};

use bvh::BvhNode;

/// Result of a ray cast against a [`SpatialIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Intersection point.
    pub location: Point3,
    /// Unit geometric normal of the hit triangle, following its winding.
    pub normal: Vector3,
    /// Index of the source polygon.
    pub polygon: usize,
    /// Ray parameter of the hit (distance when the direction is unit length).
    pub t: f64,
}

#[derive(Debug, Clone, Copy)]
struct Triangle {
    corners: [Point3; 3],
    normal: Vector3,
    polygon: usize,
}

/// A bounding volume hierarchy over a triangle soup.
///
/// Polygons with more than three vertices are fan-triangulated from their
/// first vertex; every triangle remembers the polygon it came from. The
/// index is read-only after construction.
#[derive(Debug)]
pub struct SpatialIndex {
    triangles: Vec<Triangle>,
    bounds: Vec<Aabb>,
    root: Option<BvhNode>,
    polygon_count: usize,
}

impl SpatialIndex {
    /// Builds the index from vertex positions and polygon index tuples.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegeneratePolygon`] if a polygon references
    /// fewer than 3 distinct vertices, or [`GeometryError::IndexOutOfRange`]
    /// if it references a missing vertex.
    pub fn build(vertices: &[Point3], polygons: &[Vec<usize>]) -> Result<Self> {
        let mut triangles = Vec::with_capacity(polygons.len());

        for (polygon_index, polygon) in polygons.iter().enumerate() {
            if let Some(&vertex) = polygon.iter().find(|&&v| v >= vertices.len()) {
                return Err(GeometryError::IndexOutOfRange {
                    element: "polygon",
                    index: polygon_index,
                    vertex,
                    vertex_count: vertices.len(),
                }
                .into());
            }

            let distinct = polygon.iter().collect::<BTreeSet<_>>().len();
            if distinct < 3 {
                return Err(GeometryError::DegeneratePolygon {
                    polygon: polygon_index,
                    distinct,
                }
                .into());
            }

            let first = vertices[polygon[0]];
            for pair in polygon[1..].windows(2) {
                let corners = [first, vertices[pair[0]], vertices[pair[1]]];
                let normal = triangle_normal(&corners[0], &corners[1], &corners[2]);
                let len = normal.norm();
                if len < TOLERANCE {
                    // Zero-area sliver inside a valid n-gon: nothing to hit.
                    continue;
                }
                triangles.push(Triangle {
                    corners,
                    normal: normal / len,
                    polygon: polygon_index,
                });
            }
        }

        let bounds: Vec<Aabb> = triangles
            .iter()
            .map(|tri| Aabb::from_points(&tri.corners))
            .collect();
        let root = (!triangles.is_empty())
            .then(|| BvhNode::build(&bounds, (0..triangles.len()).collect()));

        Ok(Self {
            triangles,
            bounds,
            root,
            polygon_count: polygons.len(),
        })
    }

    /// Number of polygons the index was built from.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygon_count
    }

    /// Bounding box of all indexed geometry (empty for an empty index).
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.root.as_ref().map_or_else(Aabb::empty, |root| *root.bbox())
    }

    /// Returns the nearest forward intersection of the ray, if any.
    #[must_use]
    pub fn ray_cast(&self, origin: &Point3, direction: &Vector3) -> Option<RayHit> {
        let root = self.root.as_ref()?;
        if direction.norm() < TOLERANCE {
            return None;
        }

        let hit_test =
            |triangle: usize| ray_triangle_intersect(origin, direction, &self.triangles[triangle].corners);
        let mut best = None;
        root.ray_query(origin, direction, &hit_test, &mut best);

        best.map(|(triangle, t)| {
            let tri = &self.triangles[triangle];
            RayHit {
                location: origin + direction * t,
                normal: tri.normal,
                polygon: tri.polygon,
                t,
            }
        })
    }

    /// Enumerates polygon pairs `(self, other)` whose geometry intersects.
    ///
    /// Candidates come from overlapping bounding volumes; each candidate
    /// triangle pair is then confirmed with an exact crossing test. The
    /// result is sorted and free of duplicates.
    #[must_use]
    pub fn overlap_pairs(&self, other: &SpatialIndex) -> Vec<(usize, usize)> {
        let (Some(mine), Some(theirs)) = (&self.root, &other.root) else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        mine.overlap_query(theirs, &mut candidates);

        let pairs: BTreeSet<(usize, usize)> = candidates
            .into_iter()
            .filter(|&(a, b)| self.bounds[a].intersects(&other.bounds[b], TOLERANCE))
            .filter(|&(a, b)| {
                triangles_intersect(&self.triangles[a].corners, &other.triangles[b].corners)
            })
            .map(|(a, b)| (self.triangles[a].polygon, other.triangles[b].polygon))
            .collect();
        pairs.into_iter().collect()
    }
}
