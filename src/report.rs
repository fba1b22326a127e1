use crate::error::VertexFailure;

/// Diagnostic summary of one denting run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DentReport {
    /// Soft vertices found inside the hard solid.
    pub inside_count: usize,
    /// Hard vertices found inside the soft solid.
    pub reciprocal_inside_count: usize,
    /// Soft vertices added to the inside set from polygon overlap.
    pub overlap_seeded_count: usize,
    /// Rim vertices of the dent.
    pub boundary_count: usize,
    /// Soft vertices moved onto the hard surface.
    pub displaced_count: usize,
    /// Sum of distances moved by displaced vertices (soft local space).
    pub total_displaced_distance: f64,
    /// Average displacement per penetrating vertex.
    pub indent_depth: f64,
    /// Effective radius of the shoulder.
    pub indent_range: f64,
    /// Outside vertices offset to restore volume.
    pub redistributed_count: usize,
    /// Per-vertex failures, in vertex order.
    pub failures: Vec<VertexFailure>,
}

impl DentReport {
    /// Returns `true` if no collision was detected and nothing changed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.inside_count == 0
    }

    /// Vertices skipped because the radius search found no hard vertex.
    #[must_use]
    pub fn skipped_no_overlap(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| matches!(f, VertexFailure::NoOverlap { .. }))
            .count()
    }

    /// Vertices skipped because the projection ray missed the hard surface.
    #[must_use]
    pub fn skipped_no_surface_hit(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| matches!(f, VertexFailure::NoSurfaceHit { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_counted_by_reason() {
        let report = DentReport {
            inside_count: 3,
            failures: vec![
                VertexFailure::NoOverlap {
                    vertex: 1,
                    radius: 100.0,
                },
                VertexFailure::NoSurfaceHit { vertex: 4 },
                VertexFailure::NoOverlap {
                    vertex: 7,
                    radius: 100.0,
                },
            ],
            ..DentReport::default()
        };
        assert!(!report.is_noop());
        assert_eq!(report.skipped_no_overlap(), 2);
        assert_eq!(report.skipped_no_surface_hit(), 1);
        assert_eq!(report.failures[1].vertex(), 4);
    }

    #[test]
    fn default_report_is_noop() {
        assert!(DentReport::default().is_noop());
    }
}
