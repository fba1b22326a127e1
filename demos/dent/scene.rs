//! Demo meshes.

use dentkit::math::{Point3, Transform, Vector3};
use dentkit::{Mesh, MeshInstance, Result};

/// A UV sphere of radius `radius`, poles on the Z axis.
pub fn uv_sphere(radius: f64, stacks: usize, segments: usize) -> Result<Mesh> {
    let mut vertices = vec![Point3::new(0.0, 0.0, -radius)];
    for stack in 1..stacks {
        #[allow(clippy::cast_precision_loss)]
        let polar = std::f64::consts::PI * stack as f64 / stacks as f64;
        for segment in 0..segments {
            #[allow(clippy::cast_precision_loss)]
            let azimuth = std::f64::consts::TAU * segment as f64 / segments as f64;
            vertices.push(Point3::new(
                radius * polar.sin() * azimuth.cos(),
                radius * polar.sin() * azimuth.sin(),
                -radius * polar.cos(),
            ));
        }
    }
    let north = vertices.len();
    vertices.push(Point3::new(0.0, 0.0, radius));

    let ring = |stack: usize, segment: usize| 1 + (stack - 1) * segments + segment % segments;
    let mut polygons = Vec::new();
    for segment in 0..segments {
        polygons.push(vec![0, ring(1, segment + 1), ring(1, segment)]);
        polygons.push(vec![north, ring(stacks - 1, segment), ring(stacks - 1, segment + 1)]);
    }
    for stack in 1..stacks - 1 {
        for segment in 0..segments {
            polygons.push(vec![
                ring(stack, segment),
                ring(stack, segment + 1),
                ring(stack + 1, segment + 1),
                ring(stack + 1, segment),
            ]);
        }
    }
    Mesh::new(vertices, polygons)
}

/// Closed slab `[-half, half]² × [-1, 0]` whose top is a fan around `apex`.
pub fn slab(half: f64, apex: Point3) -> Result<Mesh> {
    let vertices = vec![
        Point3::new(-half, -half, 0.0),
        Point3::new(half, -half, 0.0),
        Point3::new(half, half, 0.0),
        Point3::new(-half, half, 0.0),
        Point3::new(-half, -half, -1.0),
        Point3::new(half, -half, -1.0),
        Point3::new(half, half, -1.0),
        Point3::new(-half, half, -1.0),
        apex,
    ];
    let polygons = vec![
        vec![4, 7, 6, 5],
        vec![4, 5, 1, 0],
        vec![5, 6, 2, 1],
        vec![6, 7, 3, 2],
        vec![7, 4, 0, 3],
        vec![8, 0, 1],
        vec![8, 1, 2],
        vec![8, 2, 3],
        vec![8, 3, 0],
    ];
    Mesh::new(vertices, polygons)
}

/// A unit ball sunk `depth` into a floor slab.
pub fn ball_on_floor(depth: f64) -> Result<(MeshInstance, MeshInstance)> {
    let ball = MeshInstance::new(
        uv_sphere(1.0, 16, 24)?,
        Transform::from_translation(Vector3::new(0.0, 0.0, 1.0 - depth)),
    );
    let floor = MeshInstance::new(
        slab(5.0, Point3::new(0.013, 0.021, 0.0))?,
        Transform::identity(),
    );
    Ok((ball, floor))
}
