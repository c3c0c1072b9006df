//! BVH node layout

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::math::Aabb;

/// A node in the flat BVH arena (32 bytes).
///
/// The meaning of `left_first` depends on `triangle_count`:
/// - `triangle_count > 0`: leaf, `left_first` is the offset of its first
///   triangle in the index array.
/// - `triangle_count == 0`: internal, `left_first` is the arena index of the
///   left child; the right child is always at `left_first + 1`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BvhNode {
    pub aabb: Aabb,
    pub left_first: u32,
    pub triangle_count: u32,
}

impl BvhNode {
    /// Leaf over `count` index entries starting at `first`
    pub fn leaf(aabb: Aabb, first: u32, count: u32) -> Self {
        Self {
            aabb,
            left_first: first,
            triangle_count: count,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.triangle_count > 0
    }

    /// Index-array range covered by a leaf. Empty for internal nodes.
    pub fn range(&self) -> Range<usize> {
        let first = self.left_first as usize;
        if self.is_leaf() {
            first..first + self.triangle_count as usize
        } else {
            first..first
        }
    }

    /// Arena indices of (left, right) children, `None` for leaves
    pub fn children(&self) -> Option<(usize, usize)> {
        if self.is_leaf() {
            None
        } else {
            let left = self.left_first as usize;
            Some((left, left + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_size() {
        assert_eq!(std::mem::size_of::<BvhNode>(), 32);
    }

    #[test]
    fn test_leaf_range() {
        let node = BvhNode::leaf(Aabb::default(), 4, 3);
        assert!(node.is_leaf());
        assert_eq!(node.range(), 4..7);
        assert_eq!(node.children(), None);
    }

    #[test]
    fn test_internal_children() {
        let node = BvhNode { aabb: Aabb::default(), left_first: 5, triangle_count: 0 };
        assert!(!node.is_leaf());
        assert_eq!(node.children(), Some((5, 6)));
        assert!(node.range().is_empty());
    }
}
