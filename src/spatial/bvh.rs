use crate::math::{Aabb, Point3, Vector3};

/// Maximum number of triangles stored in a leaf.
const MAX_LEAF_SIZE: usize = 4;

/// BVH node over triangle indices.
#[derive(Debug)]
pub(super) enum BvhNode {
    Leaf {
        bbox: Aabb,
        triangles: Vec<usize>,
    },
    Internal {
        bbox: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    pub(super) fn bbox(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { bbox, .. } | BvhNode::Internal { bbox, .. } => bbox,
        }
    }

    /// Builds a subtree over `indices` by median split along the longest axis.
    pub(super) fn build(bounds: &[Aabb], mut indices: Vec<usize>) -> Self {
        let mut bbox = Aabb::empty();
        for &i in &indices {
            bbox.expand(&bounds[i]);
        }

        if indices.len() <= MAX_LEAF_SIZE {
            return BvhNode::Leaf {
                bbox,
                triangles: indices,
            };
        }

        let axis = bbox.longest_axis();
        indices.sort_by(|&a, &b| {
            let ca = bounds[a].center()[axis];
            let cb = bounds[b].center()[axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let right_indices = indices.split_off(indices.len() / 2);
        let left = Self::build(bounds, indices);
        let right = Self::build(bounds, right_indices);

        BvhNode::Internal {
            bbox,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Visits every leaf triangle whose box the ray can reach before `best_t`.
    ///
    /// `hit_test` returns the ray parameter of a hit on the given triangle;
    /// the closest hit so far is kept in `best`.
    pub(super) fn ray_query<F>(
        &self,
        origin: &Point3,
        dir: &Vector3,
        hit_test: &F,
        best: &mut Option<(usize, f64)>,
    ) where
        F: Fn(usize) -> Option<f64>,
    {
        let Some(entry) = self.bbox().ray_entry(origin, dir) else {
            return;
        };
        if best.is_some_and(|(_, t)| entry > t) {
            return;
        }

        match self {
            BvhNode::Leaf { triangles, .. } => {
                for &triangle in triangles {
                    if let Some(t) = hit_test(triangle) {
                        if best.is_none_or(|(_, best_t)| t < best_t) {
                            *best = Some((triangle, t));
                        }
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                left.ray_query(origin, dir, hit_test, best);
                right.ray_query(origin, dir, hit_test, best);
            }
        }
    }

    /// Collects pairs of leaf triangles from two trees whose boxes overlap.
    pub(super) fn overlap_query(&self, other: &BvhNode, out: &mut Vec<(usize, usize)>) {
        if !self.bbox().intersects(other.bbox(), 0.0) {
            return;
        }

        match (self, other) {
            (BvhNode::Leaf { triangles: mine, .. }, BvhNode::Leaf { triangles: theirs, .. }) => {
                for &a in mine {
                    for &b in theirs {
                        out.push((a, b));
                    }
                }
            }
            (BvhNode::Internal { left, right, .. }, BvhNode::Leaf { .. }) => {
                left.overlap_query(other, out);
                right.overlap_query(other, out);
            }
            (_, BvhNode::Internal { left, right, .. }) => {
                self.overlap_query(left, out);
                self.overlap_query(right, out);
            }
        }
    }
}
