use super::{Point3, Vector3, TOLERANCE};

/// Barycentric slack so that rays through a shared edge still register a hit.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Unnormalised geometric normal of a triangle following its winding.
///
/// The magnitude is twice the triangle's area.
#[must_use]
pub fn triangle_normal(a: &Point3, b: &Point3, c: &Point3) -> Vector3 {
    (b - a).cross(&(c - a))
}

/// Intersects the ray `origin + t * dir` with a triangle (Möller–Trumbore).
///
/// Returns the ray parameter `t` of the hit. Only forward hits with
/// `t > TOLERANCE` count; rays parallel to the triangle plane never hit.
#[must_use]
pub fn ray_triangle_intersect(origin: &Point3, dir: &Vector3, tri: &[Point3; 3]) -> Option<f64> {
    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];
    let pvec = dir.cross(&edge2);
    let det = edge1.dot(&pvec);

    // Scale-aware parallel check.
    if det.abs() < TOLERANCE * edge1.norm() * edge2.norm() * dir.norm() {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = origin - tri[0];
    let u = tvec.dot(&pvec) * inv_det;
    if !(-EDGE_TOLERANCE..=1.0 + EDGE_TOLERANCE).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(&edge1);
    let v = dir.dot(&qvec) * inv_det;
    if v < -EDGE_TOLERANCE || u + v > 1.0 + EDGE_TOLERANCE {
        return None;
    }

    let t = edge2.dot(&qvec) * inv_det;
    (t > TOLERANCE).then_some(t)
}

/// Returns `true` if the closed segment `start..end` crosses the triangle.
#[must_use]
pub fn segment_crosses_triangle(start: &Point3, end: &Point3, tri: &[Point3; 3]) -> bool {
    let dir = end - start;
    if dir.norm() < TOLERANCE {
        return false;
    }
    // With an unnormalised direction, t = 1 is the segment end.
    ray_triangle_intersect(start, &dir, tri).is_some_and(|t| t <= 1.0 + EDGE_TOLERANCE)
}

/// Geometric intersection test between two triangles.
///
/// Two non-coplanar triangles intersect iff an edge of one crosses the
/// other. Coplanar contact is not reported.
#[must_use]
pub fn triangles_intersect(a: &[Point3; 3], b: &[Point3; 3]) -> bool {
    let edges_cross = |from: &[Point3; 3], into: &[Point3; 3]| {
        (0..3).any(|i| segment_crosses_triangle(&from[i], &from[(i + 1) % 3], into))
    };
    edges_cross(a, b) || edges_cross(b, a)
}
