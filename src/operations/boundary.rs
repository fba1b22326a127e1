use std::collections::BTreeSet;

use crate::mesh::Edge;

/// Returns the members of `inside` that share an edge with a member of `outside`.
///
/// Only edges touching `inside` are considered. For each such edge with one
/// endpoint in `outside`, the other endpoint is kept when it belongs to
/// `inside`. The result is always a subset of `inside`.
#[must_use]
pub fn boundary_of(
    inside: &BTreeSet<usize>,
    outside: &BTreeSet<usize>,
    edges: &[Edge],
) -> BTreeSet<usize> {
    edges
        .iter()
        .filter(|(a, b)| inside.contains(a) || inside.contains(b))
        .filter_map(|&(a, b)| {
            if outside.contains(&a) {
                Some(b)
            } else if outside.contains(&b) {
                Some(a)
            } else {
                None
            }
        })
        .filter(|v| inside.contains(v))
        .collect()
}
