use crate::error::{GeometryError, Result};

use super::{Matrix4, Point3, Vector3, TOLERANCE};

/// An invertible affine map from a mesh's local space to world space.
///
/// The inverse is computed once on construction so that points can be moved
/// between the frames of two meshes without re-inverting per query.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    local_to_world: Matrix4,
    world_to_local: Matrix4,
}

impl Transform {
    /// Creates a transform from a local-to-world matrix.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonInvertibleTransform`] if the matrix is
    /// singular or contains non-finite entries.
    pub fn new(local_to_world: Matrix4) -> Result<Self> {
        if local_to_world.iter().any(|value| !value.is_finite()) {
            return Err(GeometryError::NonInvertibleTransform.into());
        }
        let world_to_local = local_to_world
            .try_inverse()
            .filter(|inverse| inverse.iter().all(|value| value.is_finite()))
            .ok_or(GeometryError::NonInvertibleTransform)?;
        Ok(Self {
            local_to_world,
            world_to_local,
        })
    }

    /// The identity transform (local space is world space).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            local_to_world: Matrix4::identity(),
            world_to_local: Matrix4::identity(),
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn from_translation(offset: Vector3) -> Self {
        Self {
            local_to_world: Matrix4::new_translation(&offset),
            world_to_local: Matrix4::new_translation(&-offset),
        }
    }

    #[must_use]
    pub fn matrix(&self) -> &Matrix4 {
        &self.local_to_world
    }

    /// Maps a local-space point to world space.
    #[must_use]
    pub fn to_world(&self, point: &Point3) -> Point3 {
        transform_point(&self.local_to_world, point)
    }

    /// Maps a world-space point to local space.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point3 {
        transform_point(&self.world_to_local, point)
    }

    /// Maps a local-space normal to a unit world-space normal.
    ///
    /// Uses the inverse-transpose of the linear part so normals stay
    /// perpendicular under non-uniform scale. A zero normal stays zero.
    #[must_use]
    pub fn normal_to_world(&self, normal: &Vector3) -> Vector3 {
        let linear_inverse = self.world_to_local.fixed_view::<3, 3>(0, 0);
        let mapped = linear_inverse.transpose() * normal;
        let len = mapped.norm();
        if len < TOLERANCE {
            Vector3::zeros()
        } else {
            mapped / len
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    if (v.w - 1.0).abs() > TOLERANCE && v.w.abs() > TOLERANCE {
        Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
    } else {
        Point3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn v(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z)
    }

    #[test]
    fn identity_leaves_points_unchanged() {
        let transform = Transform::identity();
        assert_eq!(transform.to_world(&p(1.0, 2.0, 3.0)), p(1.0, 2.0, 3.0));
        assert_eq!(transform.to_local(&p(1.0, 2.0, 3.0)), p(1.0, 2.0, 3.0));
    }

    #[test]
    fn translation_round_trips() {
        let transform = Transform::from_translation(v(5.0, -1.0, 2.0));
        let world = transform.to_world(&p(1.0, 1.0, 1.0));
        assert_relative_eq!(world, p(6.0, 0.0, 3.0));
        assert_relative_eq!(transform.to_local(&world), p(1.0, 1.0, 1.0));
    }

    #[test]
    fn general_matrix_round_trips() {
        let matrix = Matrix4::new_rotation(v(0.0, 0.0, std::f64::consts::FRAC_PI_2))
            .append_nonuniform_scaling(&v(2.0, 1.0, 3.0))
            .append_translation(&v(1.0, 2.0, 3.0));
        let transform = Transform::new(matrix).unwrap();
        let point = p(0.3, -0.7, 1.1);
        assert_relative_eq!(
            transform.to_local(&transform.to_world(&point)),
            point,
            epsilon = 1e-12
        );
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let matrix = Matrix4::new_nonuniform_scaling(&v(1.0, 0.0, 1.0));
        let err = Transform::new(matrix).unwrap_err();
        assert!(matches!(
            err,
            crate::error::DentError::Geometry(GeometryError::NonInvertibleTransform)
        ));
    }

    #[test]
    fn normals_ignore_translation() {
        let transform = Transform::from_translation(v(10.0, 10.0, 10.0));
        assert_relative_eq!(transform.normal_to_world(&v(0.0, 0.0, 1.0)), v(0.0, 0.0, 1.0));
    }

    #[test]
    fn normals_stay_perpendicular_under_nonuniform_scale() {
        // A 45° plane squashed along X: the normal must tilt toward X.
        let transform = Transform::new(Matrix4::new_nonuniform_scaling(&v(0.5, 1.0, 1.0))).unwrap();
        let normal = transform.normal_to_world(&v(1.0, 0.0, 1.0).normalize());
        let tangent = v(0.5, 0.0, -1.0); // (1, 0, -1) scaled by the transform
        assert!(normal.dot(&tangent).abs() < 1e-12);
        assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-12);
    }
}
