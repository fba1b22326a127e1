use std::collections::BTreeSet;

use crate::math::{principal_axes, Point3, Vector3};
use crate::spatial::SpatialIndex;

/// Distance a re-cast ray starts past the previous hit.
pub const RAY_STEP: f64 = 1e-5;

/// Upper bound on surface crossings counted along one axis.
pub const MAX_CROSSINGS: usize = 10_000;

/// Classification of a point relative to a closed mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
}

/// Classifies a point against the solid bounded by the indexed mesh.
///
/// Casts a ray along each principal axis and counts every surface crossing
/// by re-casting from just past the previous hit. An even count on any axis
/// classifies the point as outside immediately; the point is inside only
/// if all three counts are odd. Coincident hits (a ray through a shared
/// edge) are counted once because each re-cast starts past the last hit.
///
/// The point must be expressed in the same frame the index was built in.
#[must_use]
pub fn classify_point(point: &Point3, index: &SpatialIndex) -> PointClassification {
    for axis in principal_axes() {
        match count_crossings(point, &axis, index) {
            Some(count) if count % 2 == 1 => {}
            _ => return PointClassification::Outside,
        }
    }
    PointClassification::Inside
}

/// Returns `true` if the point lies inside the indexed solid.
#[must_use]
pub fn is_inside(point: &Point3, index: &SpatialIndex) -> bool {
    classify_point(point, index) == PointClassification::Inside
}

/// Indices of all `points` that lie inside the indexed solid.
#[must_use]
pub fn classify_vertices(points: &[Point3], index: &SpatialIndex) -> BTreeSet<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| is_inside(point, index))
        .map(|(i, _)| i)
        .collect()
}

/// Counts crossings along `axis`, or `None` if the count hit [`MAX_CROSSINGS`].
fn count_crossings(point: &Point3, axis: &Vector3, index: &SpatialIndex) -> Option<usize> {
    let mut origin = *point;
    for count in 0..MAX_CROSSINGS {
        match index.ray_cast(&origin, axis) {
            Some(hit) => origin = hit.location + axis * RAY_STEP,
            None => return Some(count),
        }
    }
    tracing::trace!(?point, ?axis, "crossing limit reached, treating as outside");
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn cuboid_index(min: Point3, max: Point3) -> SpatialIndex {
        let vertices: Vec<Point3> = (0..8)
            .map(|i| {
                p(
                    if i & 1 == 0 { min.x } else { max.x },
                    if i & 2 == 0 { min.y } else { max.y },
                    if i & 4 == 0 { min.z } else { max.z },
                )
            })
            .collect();
        let polygons = vec![
            vec![0, 2, 3, 1],
            vec![4, 5, 7, 6],
            vec![0, 1, 5, 4],
            vec![2, 6, 7, 3],
            vec![0, 4, 6, 2],
            vec![1, 3, 7, 5],
        ];
        SpatialIndex::build(&vertices, &polygons).unwrap()
    }

    /// Regular octahedron with unit radius around `center`.
    fn octahedron_index(center: Point3) -> SpatialIndex {
        let offsets = [
            Vector3::x(),
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
        ];
        let vertices: Vec<Point3> = offsets.iter().map(|o| center + o).collect();
        let polygons = vec![
            vec![0, 2, 4],
            vec![2, 1, 4],
            vec![1, 3, 4],
            vec![3, 0, 4],
            vec![2, 0, 5],
            vec![1, 2, 5],
            vec![3, 1, 5],
            vec![0, 3, 5],
        ];
        SpatialIndex::build(&vertices, &polygons).unwrap()
    }

    /// The deprecated closest-point/plane-side test, kept as a differential
    /// reference only. Takes the closest vertex's normal as the surface side.
    fn closest_point_inside(point: &Point3, vertices: &[Point3], normals: &[Vector3]) -> bool {
        let closest = vertices
            .iter()
            .zip(normals)
            .min_by(|(a, _), (b, _)| {
                (*a - point)
                    .norm()
                    .partial_cmp(&(*b - point).norm())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap();
        (closest.0 - point).dot(closest.1) >= 0.0
    }

    #[test]
    fn center_is_inside() {
        let index = cuboid_index(p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0));
        assert!(is_inside(&p(1.0, 1.0, 1.0), &index));
    }

    #[test]
    fn far_point_is_outside() {
        let index = cuboid_index(p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0));
        assert_eq!(
            classify_point(&p(10.0, 10.0, 10.0), &index),
            PointClassification::Outside
        );
    }

    #[test]
    fn point_just_inside() {
        let index = cuboid_index(p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0));
        assert!(is_inside(&p(0.001, 0.001, 0.001), &index));
    }

    #[test]
    fn point_below_face_is_outside() {
        // +Z ray crosses the box twice, so the Z vote is even.
        let index = cuboid_index(p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0));
        assert!(!is_inside(&p(1.0, 1.0, -1.0), &index));
    }

    #[test]
    fn points_outside_bounding_box_are_outside() {
        let index = octahedron_index(p(0.0, 0.0, 0.0));
        let bounds = index.bounds();
        for x in [-3.0, -1.5, 0.0, 1.5, 3.0] {
            for y in [-3.0, -1.5, 0.0, 1.5, 3.0] {
                for z in [-3.0, -1.5, 0.0, 1.5, 3.0] {
                    let point = p(x, y, z);
                    if bounds.contains(&point) {
                        continue;
                    }
                    assert!(!is_inside(&point, &index), "{point:?} classified inside");
                }
            }
        }
    }

    #[test]
    fn centroid_of_convex_meshes_is_inside() {
        let center = p(0.31, -0.17, 0.23);
        assert!(is_inside(&center, &octahedron_index(center)));
        let index = cuboid_index(p(-1.0, 2.0, 3.0), p(4.0, 3.0, 3.5));
        assert!(is_inside(&index.bounds().center(), &index));
    }

    #[test]
    fn point_inside_box_but_outside_octahedron() {
        // Near a bounding-box corner: every axis ray misses or crosses twice.
        let index = octahedron_index(p(0.0, 0.0, 0.0));
        assert!(!is_inside(&p(0.8, 0.8, 0.8), &index));
    }

    #[test]
    fn open_surface_is_never_inside() {
        // A single floor quad: the X and Y rays never cross it.
        let vertices = vec![
            p(-5.0, -5.0, 0.0),
            p(5.0, -5.0, 0.0),
            p(5.0, 5.0, 0.0),
            p(-5.0, 5.0, 0.0),
        ];
        let index = SpatialIndex::build(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
        assert!(!is_inside(&p(0.3, 0.2, -1.0), &index));
    }

    #[test]
    fn batch_classification_returns_inside_indices() {
        let index = cuboid_index(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let points = vec![
            p(0.5, 0.5, 0.5),
            p(2.0, 0.5, 0.5),
            p(0.2, 0.7, 0.4),
            p(-0.1, 0.5, 0.5),
        ];
        let inside = classify_vertices(&points, &index);
        assert_eq!(inside.into_iter().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn agrees_with_closest_point_test_on_clear_cases() {
        let vertices: Vec<Point3> = (0..8)
            .map(|i| {
                p(
                    if i & 1 == 0 { 0.0 } else { 1.0 },
                    if i & 2 == 0 { 0.0 } else { 1.0 },
                    if i & 4 == 0 { 0.0 } else { 1.0 },
                )
            })
            .collect();
        let center = p(0.5, 0.5, 0.5);
        let normals: Vec<Vector3> = vertices.iter().map(|v| (v - center).normalize()).collect();
        let index = cuboid_index(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));

        for point in [p(0.5, 0.5, 0.5), p(0.9, 0.9, 0.9), p(1.5, 1.5, 1.5), p(-0.5, -0.5, -0.5)] {
            assert_eq!(
                is_inside(&point, &index),
                closest_point_inside(&point, &vertices, &normals),
                "classifiers disagree at {point:?}"
            );
        }
    }
}
