use std::collections::BTreeSet;

use crate::error::VertexFailure;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::mesh::MeshInstance;
use crate::spatial::SpatialIndex;
use crate::target::DeformationTarget;

/// Adaptive radius used to find hard vertices near a penetrating soft vertex.
///
/// The search starts at `initial` and grows by `step` until at least one
/// candidate is found. Once the radius exceeds `ceiling` the search gives
/// up, so every search ends after at most [`RadiusSearch::max_growth_steps`]
/// growth steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSearch {
    pub initial: f64,
    pub step: f64,
    pub ceiling: f64,
}

/// Outcome of a successful radius search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalSample {
    /// Arithmetic mean of the sampled normals (not renormalised).
    pub direction: Vector3,
    /// Number of hard vertices that contributed.
    pub samples: usize,
    /// Radius at which the samples were found.
    pub radius: f64,
    /// Number of times the radius was grown.
    pub growth_steps: usize,
}

impl RadiusSearch {
    /// Upper bound on growth steps: `ceil((ceiling - initial) / step)`.
    ///
    /// `step` must be positive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_growth_steps(&self) -> usize {
        let span = (self.ceiling - self.initial).max(0.0);
        (span / self.step).ceil() as usize
    }

    /// Averages the normals of the `candidates` closest to `center`.
    ///
    /// `positions` and `normals` are indexed by candidate index. Returns
    /// `None` once the radius passes the ceiling without finding any
    /// candidate closer than the current radius.
    #[must_use]
    pub fn sample_normals(
        &self,
        center: &Point3,
        candidates: &BTreeSet<usize>,
        positions: &[Point3],
        normals: &[Vector3],
    ) -> Option<NormalSample> {
        let mut radius = self.initial;
        // One extra pass for the initial radius before any growth.
        for growth_steps in 0..=self.max_growth_steps() {
            if radius > self.ceiling {
                break;
            }

            let mut sum = Vector3::zeros();
            let mut samples = 0usize;
            for &candidate in candidates {
                if (positions[candidate] - center).norm() < radius {
                    sum += normals[candidate];
                    samples += 1;
                }
            }

            if samples > 0 {
                #[allow(clippy::cast_precision_loss)]
                let direction = sum / samples as f64;
                return Some(NormalSample {
                    direction,
                    samples,
                    radius,
                    growth_steps,
                });
            }
            radius += self.step;
        }
        None
    }
}

/// Result of pushing penetrating vertices back to the hard surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplacementOutcome {
    /// Sum of distances moved by all displaced vertices (soft local space).
    pub total_distance: f64,
    /// Vertices written to the target.
    pub displaced: BTreeSet<usize>,
    /// Vertices that were skipped, with the reason.
    pub failures: Vec<VertexFailure>,
}

/// Projects penetrating soft vertices onto the hard surface.
///
/// For each inside soft vertex, the normals of nearby reciprocal-inside hard
/// vertices are averaged (see [`RadiusSearch`]) and a ray is cast from the
/// vertex along that mean into the hard mesh. The hit, nudged outward by
/// `offset_epsilon` along the hit normal, becomes the vertex's new position.
/// Per-vertex failures are recorded and skipped.
pub struct Depress<'a> {
    inside_soft: &'a BTreeSet<usize>,
    soft: &'a MeshInstance,
    inside_hard: &'a BTreeSet<usize>,
    hard: &'a MeshInstance,
    hard_index: &'a SpatialIndex,
    search: RadiusSearch,
    offset_epsilon: f64,
}

impl<'a> Depress<'a> {
    /// Creates a new `Depress` operation.
    ///
    /// `hard_index` must be built from the hard mesh in world space.
    #[must_use]
    pub fn new(
        inside_soft: &'a BTreeSet<usize>,
        soft: &'a MeshInstance,
        inside_hard: &'a BTreeSet<usize>,
        hard: &'a MeshInstance,
        hard_index: &'a SpatialIndex,
        search: RadiusSearch,
    ) -> Self {
        Self {
            inside_soft,
            soft,
            inside_hard,
            hard,
            hard_index,
            search,
            offset_epsilon: 0.0,
        }
    }

    /// Sets how far past the hard surface displaced vertices are placed.
    #[must_use]
    pub fn with_offset(mut self, offset_epsilon: f64) -> Self {
        self.offset_epsilon = offset_epsilon;
        self
    }

    /// Executes the displacement, writing into `target`.
    ///
    /// The base mesh is never modified. An empty inside set leaves the
    /// target untouched.
    pub fn execute(&self, target: &mut DeformationTarget) -> DisplacementOutcome {
        let mut outcome = DisplacementOutcome::default();
        if self.inside_soft.is_empty() {
            return outcome;
        }

        let soft_world = self.soft.world_vertices();
        let hard_world = self.hard.world_vertices();
        let hard_normals = self.hard.world_normals();

        for &vertex in self.inside_soft {
            match self.depress_vertex(vertex, &soft_world[vertex], &hard_world, &hard_normals) {
                Ok(new_position) => {
                    outcome.total_distance += (new_position - target.position(vertex)).norm();
                    target.set_position(vertex, new_position);
                    outcome.displaced.insert(vertex);
                }
                Err(failure) => {
                    tracing::trace!(%failure, "skipping vertex");
                    outcome.failures.push(failure);
                }
            }
        }

        tracing::debug!(
            displaced = outcome.displaced.len(),
            skipped = outcome.failures.len(),
            total_distance = outcome.total_distance,
            "displacement finished"
        );
        outcome
    }

    /// Computes the new soft-local position of one vertex.
    fn depress_vertex(
        &self,
        vertex: usize,
        world_position: &Point3,
        hard_world: &[Point3],
        hard_normals: &[Vector3],
    ) -> Result<Point3, VertexFailure> {
        let sample = self
            .search
            .sample_normals(world_position, self.inside_hard, hard_world, hard_normals)
            .ok_or(VertexFailure::NoOverlap {
                vertex,
                radius: self.search.ceiling,
            })?;

        if sample.direction.norm() < TOLERANCE {
            return Err(VertexFailure::NoSurfaceHit { vertex });
        }

        let hit = self
            .hard_index
            .ray_cast(world_position, &sample.direction)
            .ok_or(VertexFailure::NoSurfaceHit { vertex })?;

        let world = hit.location + hit.normal * self.offset_epsilon;
        Ok(self.soft.transform.to_local(&world))
    }
}
