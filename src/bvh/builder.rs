//! BVH construction by midpoint splits over the longest axis

use serde::Serialize;

use crate::core::BvhConfig;
use crate::math::{Aabb, Triangle};
use super::node::BvhNode;

/// Shape of a finished tree, gathered during construction
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub triangle_count: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub internal_count: usize,
    /// Depth of the deepest node, root = 0
    pub max_depth: u32,
    /// Splits abandoned because every triangle fell on one side
    pub degenerate_splits: usize,
    /// Triangle count of the fullest leaf
    pub largest_leaf: u32,
}

/// Output of [`build`]: node arena, permuted index array and statistics
#[derive(Clone, Debug)]
pub struct BuiltTree {
    pub nodes: Vec<BvhNode>,
    pub indices: Vec<u32>,
    pub stats: BuildStats,
}

/// Build a BVH over `triangles`.
///
/// The triangle slice is never reordered; only the returned index array is.
/// An empty slice yields an empty arena with no root.
pub fn build(triangles: &[Triangle], config: &BvhConfig) -> BuiltTree {
    BvhBuilder::new(triangles, config.leaf_size).run()
}

/// Recursive builder state. Node ranges are threaded through as
/// `(left_first, triangle_count)` pairs stored on the nodes themselves.
struct BvhBuilder<'a> {
    triangles: &'a [Triangle],
    /// Nodes with this many triangles or fewer stay leaves
    leaf_size: u32,
    nodes: Vec<BvhNode>,
    indices: Vec<u32>,
    stats: BuildStats,
}

impl<'a> BvhBuilder<'a> {
    fn new(triangles: &'a [Triangle], leaf_size: u32) -> Self {
        let count = triangles.len();
        Self {
            triangles,
            leaf_size: leaf_size.max(1),
            // A binary tree over n leaves-worth of triangles never needs more
            nodes: Vec::with_capacity(count * 2),
            indices: (0..count as u32).collect(),
            stats: BuildStats {
                triangle_count: count,
                ..Default::default()
            },
        }
    }

    fn run(mut self) -> BuiltTree {
        let count = self.triangles.len();
        if count > 0 {
            let bounds = self.range_bounds(0, count);
            self.nodes.push(BvhNode::leaf(bounds, 0, count as u32));
            self.subdivide(0, 0);
        }

        self.stats.node_count = self.nodes.len();
        for node in &self.nodes {
            if node.is_leaf() {
                self.stats.leaf_count += 1;
                self.stats.largest_leaf = self.stats.largest_leaf.max(node.triangle_count);
            } else {
                self.stats.internal_count += 1;
            }
        }

        log::debug!(
            "Built BVH: {} triangles, {} nodes ({} leaves), depth {}, {} degenerate splits",
            self.stats.triangle_count,
            self.stats.node_count,
            self.stats.leaf_count,
            self.stats.max_depth,
            self.stats.degenerate_splits
        );

        BuiltTree {
            nodes: self.nodes,
            indices: self.indices,
            stats: self.stats,
        }
    }

    /// Union of the triangle boxes referenced by `indices[first..first + count]`
    fn range_bounds(&self, first: usize, count: usize) -> Aabb {
        self.indices[first..first + count]
            .iter()
            .fold(Aabb::empty(), |bounds, &i| bounds.merged(&self.triangles[i as usize].aabb))
    }

    fn subdivide(&mut self, node_index: usize, depth: u32) {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let node = self.nodes[node_index];
        if node.triangle_count <= self.leaf_size {
            return;
        }

        let axis = node.aabb.longest_axis();
        let split = node.aabb.min[axis] + node.aabb.extent()[axis] * 0.5;

        let first = node.left_first as usize;
        let count = node.triangle_count as usize;
        let left_count = partition(
            &mut self.indices[first..first + count],
            self.triangles,
            axis,
            split,
        );

        if left_count == 0 || left_count == count {
            self.stats.degenerate_splits += 1;
            log::trace!(
                "Keeping node {} as a {}-triangle leaf: split at {} on axis {} is one-sided",
                node_index, count, split, axis
            );
            return;
        }

        let left = self.nodes.len();
        let right_first = first + left_count;
        let right_count = count - left_count;
        let left_bounds = self.range_bounds(first, left_count);
        let right_bounds = self.range_bounds(right_first, right_count);
        debug_assert!(node.aabb.contains(&left_bounds) && node.aabb.contains(&right_bounds));
        self.nodes.push(BvhNode::leaf(left_bounds, first as u32, left_count as u32));
        self.nodes.push(BvhNode::leaf(right_bounds, right_first as u32, right_count as u32));

        let parent = &mut self.nodes[node_index];
        parent.left_first = left as u32;
        parent.triangle_count = 0;

        self.subdivide(left, depth + 1);
        self.subdivide(left + 1, depth + 1);
    }
}

/// Two-cursor in-place partition of `indices` by triangle centroid.
///
/// Entries whose centroid on `axis` is below `split` end up first. Returns the
/// number of such entries.
fn partition(indices: &mut [u32], triangles: &[Triangle], axis: usize, split: f32) -> usize {
    let mut left = 0;
    let mut right = indices.len();

    while left < right {
        let centroid = triangles[indices[left] as usize].centroid;
        if centroid[axis] < split {
            left += 1;
        } else {
            right -= 1;
            indices.swap(left, right);
        }
    }

    left
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Vec2, Vec3};

    /// Small triangle in the XZ plane at (x, 0, z)
    fn tri_at(x: f32, z: f32) -> Triangle {
        Triangle::new(
            Vec3::new(x, 0.0, z),
            Vec3::new(x + 0.5, 0.0, z),
            Vec3::new(x, 0.0, z + 0.5),
            [Vec2::ZERO, Vec2::X, Vec2::Y],
        )
    }

    #[test]
    fn test_partition_splits_by_centroid() {
        let triangles: Vec<Triangle> = (0..6).map(|i| tri_at(i as f32 * 2.0, 0.0)).collect();
        let mut indices: Vec<u32> = (0..6).collect();

        let left = partition(&mut indices, &triangles, 0, 5.0);
        assert_eq!(left, 3);
        for &i in &indices[..left] {
            assert!(triangles[i as usize].centroid.x < 5.0);
        }
        for &i in &indices[left..] {
            assert!(triangles[i as usize].centroid.x >= 5.0);
        }
    }

    #[test]
    fn test_empty_input_has_no_root() {
        let tree = build(&[], &BvhConfig::default());
        assert!(tree.nodes.is_empty());
        assert!(tree.indices.is_empty());
        assert_eq!(tree.stats.node_count, 0);
    }

    #[test]
    fn test_small_inputs_stay_single_leaf() {
        for n in 1..=2 {
            let triangles: Vec<Triangle> = (0..n).map(|i| tri_at(i as f32 * 4.0, 0.0)).collect();
            let tree = build(&triangles, &BvhConfig::default());
            assert_eq!(tree.nodes.len(), 1);
            assert!(tree.nodes[0].is_leaf());
            assert_eq!(tree.nodes[0].triangle_count, n as u32);
            assert_eq!(tree.stats.internal_count, 0);
        }
    }

    #[test]
    fn test_row_splits_along_x() {
        let triangles: Vec<Triangle> = (0..4).map(|i| tri_at(i as f32 * 2.0, 0.0)).collect();
        let tree = build(&triangles, &BvhConfig::default());

        // Root splits once; both halves hold two triangles
        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.nodes[0].children(), Some((1, 2)));
        assert_eq!(tree.nodes[1].triangle_count, 2);
        assert_eq!(tree.nodes[2].triangle_count, 2);
        assert!(tree.nodes[1].aabb.max.x < tree.nodes[2].aabb.min.x);
        assert_eq!(tree.stats.max_depth, 1);
    }

    #[test]
    fn test_children_bounds_are_recomputed_tight() {
        let triangles: Vec<Triangle> = (0..4).map(|i| tri_at(i as f32 * 2.0, 0.0)).collect();
        let tree = build(&triangles, &BvhConfig::default());

        let left = tree.nodes[1];
        assert_eq!(left.aabb.min, Vec3::ZERO);
        assert_eq!(left.aabb.max, Vec3::new(2.5, 0.0, 0.5));
    }

    #[test]
    fn test_coincident_centroids_abort_split() {
        let triangles = vec![tri_at(1.0, 1.0); 5];
        let tree = build(&triangles, &BvhConfig::default());

        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.nodes[0].triangle_count, 5);
        assert_eq!(tree.stats.degenerate_splits, 1);
        assert_eq!(tree.stats.largest_leaf, 5);
    }

    #[test]
    fn test_leaf_size_config() {
        let triangles: Vec<Triangle> = (0..8).map(|i| tri_at(i as f32 * 2.0, 0.0)).collect();
        let config = BvhConfig { leaf_size: 4, ..Default::default() };
        let tree = build(&triangles, &config);

        assert_eq!(tree.stats.leaf_count, 2);
        assert!(tree.nodes.iter().filter(|n| n.is_leaf()).all(|n| n.triangle_count == 4));
    }
}
