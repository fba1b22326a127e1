pub mod aabb;
pub mod intersect_3d;
pub mod transform;

pub use aabb::Aabb;
pub use transform::Transform;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// The three principal axes, in +X, +Y, +Z order.
#[must_use]
pub fn principal_axes() -> [Vector3; 3] {
    [Vector3::x(), Vector3::y(), Vector3::z()]
}
