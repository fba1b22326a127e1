use std::collections::BTreeSet;

use crate::config::DentConfig;
use crate::error::Result;
use crate::mesh::MeshInstance;
use crate::operations::boundary::boundary_of;
use crate::operations::classify::classify_vertices;
use crate::operations::displace::Depress;
use crate::operations::redistribute::Redistribute;
use crate::report::DentReport;
use crate::spatial::SpatialIndex;
use crate::target::DeformationTarget;

/// The finished output of a denting run.
#[derive(Debug, Clone, PartialEq)]
pub struct Deformation {
    /// Deformed soft-mesh positions, parallel to the base vertices.
    pub target: DeformationTarget,
    /// Diagnostics for the run.
    pub report: DentReport,
}

/// Dents a soft mesh against a hard mesh.
///
/// Stages run strictly in order: build world-space indices, classify
/// penetration in both directions, extract the rim, push penetrating
/// vertices onto the hard surface, then restore the lost volume around the
/// rim. Neither input mesh is modified; the result is a fresh
/// [`DeformationTarget`].
pub struct DeformPipeline {
    soft: MeshInstance,
    hard: MeshInstance,
    config: DentConfig,
}

impl DeformPipeline {
    /// Creates a pipeline with the default [`DentConfig`].
    #[must_use]
    pub fn new(soft: MeshInstance, hard: MeshInstance) -> Self {
        Self {
            soft,
            hard,
            config: DentConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DentConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &DentConfig {
        &self.config
    }

    /// Executes the pipeline.
    ///
    /// Vertices that cannot be displaced are skipped and listed in the
    /// report. When no soft vertex penetrates the hard mesh the base
    /// positions are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or either mesh has
    /// degenerate polygons.
    pub fn execute(&self) -> Result<Deformation> {
        self.config.validate()?;

        let soft_world = self.soft.world_vertices();
        let hard_world = self.hard.world_vertices();
        let soft_index = SpatialIndex::build(&soft_world, self.soft.mesh.polygons())?;
        let hard_index = SpatialIndex::build(&hard_world, self.hard.mesh.polygons())?;

        let mut inside = classify_vertices(&soft_world, &hard_index);
        let inside_hard = classify_vertices(&hard_world, &soft_index);

        let mut report = DentReport {
            reciprocal_inside_count: inside_hard.len(),
            ..DentReport::default()
        };

        if self.config.add_overlap {
            let before = inside.len();
            let polygons = self.soft.mesh.polygons();
            for (polygon, _) in soft_index.overlap_pairs(&hard_index) {
                inside.extend(polygons[polygon].iter().copied());
            }
            report.overlap_seeded_count = inside.len() - before;
        }
        report.inside_count = inside.len();

        let mut target = DeformationTarget::from_base(self.soft.mesh.vertices());
        if inside.is_empty() {
            tracing::info!("no penetrating vertices, returning base positions");
            return Ok(Deformation { target, report });
        }

        let outside: BTreeSet<usize> = (0..self.soft.mesh.vertex_count())
            .filter(|v| !inside.contains(v))
            .collect();
        let boundary = boundary_of(&inside, &outside, self.soft.mesh.edges());
        report.boundary_count = boundary.len();
        tracing::debug!(
            inside = inside.len(),
            reciprocal = inside_hard.len(),
            boundary = boundary.len(),
            "classification finished"
        );

        let displacement = Depress::new(
            &inside,
            &self.soft,
            &inside_hard,
            &self.hard,
            &hard_index,
            self.config.radius_search(),
        )
        .with_offset(self.config.displace_increase)
        .execute(&mut target);

        let redistribution = Redistribute::new(
            inside.len(),
            &outside,
            &boundary,
            self.soft.mesh.vertices(),
            displacement.total_distance,
        )
        .with_range(self.config.indent_range_mode())
        .with_volume_preservation(self.config.volume_preservation)
        .execute(&mut target);

        report.displaced_count = displacement.displaced.len();
        report.total_displaced_distance = displacement.total_distance;
        report.indent_depth = redistribution.indent_depth;
        report.indent_range = redistribution.indent_range;
        report.redistributed_count = redistribution.adjusted.len();
        report.failures = displacement.failures;

        if !report.failures.is_empty() {
            tracing::warn!(
                no_overlap = report.skipped_no_overlap(),
                no_surface_hit = report.skipped_no_surface_hit(),
                "some penetrating vertices were left in place"
            );
        }
        tracing::info!(
            displaced = report.displaced_count,
            redistributed = report.redistributed_count,
            indent_depth = report.indent_depth,
            "dent applied"
        );

        Ok(Deformation { target, report })
    }
}
