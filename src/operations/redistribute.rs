use std::collections::{BTreeMap, BTreeSet};

use crate::math::Point3;
use crate::operations::falloff::Distribution;
use crate::target::DeformationTarget;

/// Distance from an outside vertex to its nearest rim vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimDistance {
    pub distance: f64,
    pub nearest: usize,
}

/// For each vertex in `from`, the nearest vertex in `to` and its distance.
///
/// Ties go to the lowest index. Returns an empty map when `to` is empty.
#[must_use]
pub fn minimum_distances(
    from: &BTreeSet<usize>,
    to: &BTreeSet<usize>,
    positions: &[Point3],
) -> BTreeMap<usize, RimDistance> {
    if to.is_empty() {
        return BTreeMap::new();
    }
    from.iter()
        .map(|&vertex| {
            let mut best = RimDistance {
                distance: f64::INFINITY,
                nearest: vertex,
            };
            for &other in to {
                let distance = (positions[vertex] - positions[other]).norm();
                if distance < best.distance {
                    best = RimDistance {
                        distance,
                        nearest: other,
                    };
                }
            }
            (vertex, best)
        })
        .collect()
}

/// Largest pairwise distance between any two positions (O(n²)).
#[must_use]
pub fn maximum_distance(positions: &[Point3]) -> f64 {
    let mut max = 0.0_f64;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            max = max.max((a - b).norm());
        }
    }
    max
}

/// How the influence radius of the shoulder is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndentRange {
    /// A caller-supplied radius.
    Fixed(f64),
    /// `sqrt(indent_depth)`.
    FromDepth,
}

/// Result of restoring displaced volume around the rim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RedistributionOutcome {
    /// Average displacement per penetrating vertex.
    pub indent_depth: f64,
    /// Effective radius of the shoulder.
    pub indent_range: f64,
    /// Mesh diameter used to normalise the distribution.
    pub diameter: f64,
    /// Solved distribution, `None` if the run did nothing or was singular.
    pub distribution: Option<Distribution>,
    /// Outside vertices that received an offset.
    pub adjusted: BTreeSet<usize>,
}

/// Pushes the volume lost in the dent back into a ring around the rim.
///
/// Every outside vertex within the indent range of its nearest rim vertex is
/// offset by that rim vertex's displacement vector, `base - deformed`,
/// scaled by the [`Distribution`] weight at its distance. Only the single nearest rim
/// vertex is consulted; the rim's displacement is not interpolated.
pub struct Redistribute<'a> {
    inside_count: usize,
    outside: &'a BTreeSet<usize>,
    boundary: &'a BTreeSet<usize>,
    base: &'a [Point3],
    total_distance: f64,
    range: IndentRange,
    volume_preservation: f64,
}

impl<'a> Redistribute<'a> {
    /// Creates a new `Redistribute` operation.
    ///
    /// `base` holds the soft mesh's local-space base positions;
    /// `total_distance` is the displacement total over `inside_count`
    /// penetrating vertices.
    #[must_use]
    pub fn new(
        inside_count: usize,
        outside: &'a BTreeSet<usize>,
        boundary: &'a BTreeSet<usize>,
        base: &'a [Point3],
        total_distance: f64,
    ) -> Self {
        Self {
            inside_count,
            outside,
            boundary,
            base,
            total_distance,
            range: IndentRange::FromDepth,
            volume_preservation: 1.0,
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: IndentRange) -> Self {
        self.range = range;
        self
    }

    /// Scales every redistribution offset; `1.0` keeps the closed form as-is.
    #[must_use]
    pub fn with_volume_preservation(mut self, factor: f64) -> Self {
        self.volume_preservation = factor;
        self
    }

    /// Executes the redistribution, writing into `target`.
    pub fn execute(&self, target: &mut DeformationTarget) -> RedistributionOutcome {
        let mut outcome = RedistributionOutcome::default();
        if self.inside_count == 0 {
            return outcome;
        }

        #[allow(clippy::cast_precision_loss)]
        let indent_depth = self.total_distance / self.inside_count as f64;
        let indent_range = match self.range {
            IndentRange::Fixed(range) => range,
            IndentRange::FromDepth => indent_depth.sqrt(),
        };
        outcome.indent_depth = indent_depth;
        outcome.indent_range = indent_range;

        // Every soft vertex penetrates: no rim, no shoulder.
        if self.boundary.is_empty() {
            return outcome;
        }

        let rim = minimum_distances(self.outside, self.boundary, self.base);
        outcome.diameter = maximum_distance(self.base);

        let Some(distribution) = Distribution::solve(
            self.total_distance,
            outcome.diameter,
            indent_range,
            indent_depth,
        ) else {
            tracing::warn!(
                indent_range,
                diameter = outcome.diameter,
                "distribution is singular, volume not redistributed"
            );
            return outcome;
        };
        outcome.distribution = Some(distribution);

        for (&vertex, rim_distance) in &rim {
            if rim_distance.distance > indent_range {
                continue;
            }
            let weight = distribution.weight(rim_distance.distance) * self.volume_preservation;
            let rim_offset = -target.displacement(rim_distance.nearest, self.base);
            target.set_position(vertex, target.position(vertex) + rim_offset * weight);
            outcome.adjusted.insert(vertex);
        }

        tracing::debug!(
            indent_depth,
            indent_range,
            adjusted = outcome.adjusted.len(),
            "redistribution finished"
        );
        outcome
    }
}
