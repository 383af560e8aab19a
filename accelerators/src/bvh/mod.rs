//! Bounding Volume Hierarchy.

mod intersector;

// Re-export
pub use intersector::*;

use helios_core::geometry::{Bounds3f, Ray, RayInfo};
use helios_core::math::Float;

/// A node of a prebuilt BVH tree. Nodes are stored in a flat array and refer
/// to each other by index; the root is node 0.
#[derive(Clone, Debug)]
pub enum BvhNode {
    /// An internal node holding one bounding box per child.
    Interior {
        /// Indices of the two child nodes.
        children: [u32; 2],

        /// Bounding box of each child's subtree.
        bboxes: [Bounds3f; 2],
    },

    /// A leaf node covering a non-empty item range.
    Leaf {
        /// Index of the first item in the leaf.
        begin: u32,

        /// Index one past the last item in the leaf.
        end: u32,
    },
}

/// A prebuilt BVH tree over an array of opaque items. The tree is read-only
/// after construction and can be traversed concurrently from many threads.
pub struct BvhTree<I> {
    /// Flat array of nodes; node 0 is the root.
    nodes: Vec<BvhNode>,

    /// The items referenced by the leaves.
    items: Vec<I>,

    /// Bounding box of each item, parallel to `items`.
    item_bboxes: Vec<Bounds3f>,

    /// Bounding box of the whole tree.
    bbox: Bounds3f,
}

impl<I> BvhTree<I> {
    /// Wraps a prebuilt node array and its items. The root bounding box is
    /// derived from node 0.
    ///
    /// * `nodes`       - Flat node array, root first.
    /// * `items`       - Items referenced by the leaves.
    /// * `item_bboxes` - Bounding box of each item.
    pub fn new(nodes: Vec<BvhNode>, items: Vec<I>, item_bboxes: Vec<Bounds3f>) -> Self {
        debug_assert_eq!(items.len(), item_bboxes.len());
        debug_assert!(Self::validate(&nodes, items.len()));

        let bbox = match nodes.first() {
            Some(BvhNode::Interior { bboxes, .. }) => bboxes[0].union(&bboxes[1]),
            Some(BvhNode::Leaf { begin, end }) => item_bboxes[*begin as usize..*end as usize]
                .iter()
                .fold(Bounds3f::EMPTY, |acc, b| acc.union(b)),
            None => Bounds3f::EMPTY,
        };

        debug!(
            "BVH tree wrapped with {} nodes over {} items",
            nodes.len(),
            items.len()
        );

        Self {
            nodes,
            items,
            item_bboxes,
            bbox,
        }
    }

    /// Returns the number of items in the tree.
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns the bounding box of the whole tree.
    pub fn bbox(&self) -> &Bounds3f {
        &self.bbox
    }

    /// Returns the node at the given index.
    pub(crate) fn node(&self, index: usize) -> &BvhNode {
        &self.nodes[index]
    }

    /// Returns the items of the tree.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Returns the item bounding boxes of the tree.
    pub fn item_bboxes(&self) -> &[Bounds3f] {
        &self.item_bboxes
    }

    /// Checks that children stay in bounds and leaf ranges are non-empty.
    fn validate(nodes: &[BvhNode], item_count: usize) -> bool {
        nodes.iter().all(|node| match node {
            BvhNode::Interior { children, .. } => children
                .iter()
                .all(|child| (*child as usize) < nodes.len()),
            BvhNode::Leaf { begin, end } => begin < end && (*end as usize) <= item_count,
        })
    }
}

/// Visitor invoked once per leaf whose bounding box is possibly intersected.
pub trait Visitor<I> {
    /// Performs the primitive-ray tests for one leaf. Returns whether
    /// traversal should continue; `distance` must be set to the distance to
    /// the closest hit so far before returning true.
    ///
    /// * `items`    - The items of the visited leaf.
    /// * `bboxes`   - The bounding boxes of the visited leaf's items.
    /// * `ray`      - The ray.
    /// * `ray_info` - Precomputed reciprocal-direction data for `ray`.
    /// * `t_min`    - Entry distance of the ray into the leaf's box.
    /// * `t_max`    - Exit distance of the ray out of the leaf's box.
    /// * `distance` - Distance to the closest hit so far.
    #[allow(clippy::too_many_arguments)]
    fn visit(
        &mut self,
        items: &[I],
        bboxes: &[Bounds3f],
        ray: &Ray,
        ray_info: &RayInfo,
        t_min: Float,
        t_max: Float,
        distance: &mut Float,
    ) -> bool;
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use helios_core::geometry::Point3f;

    fn unit_box(center: Point3f) -> Bounds3f {
        let half = helios_core::geometry::Vector3f::new(0.5, 0.5, 0.5);
        Bounds3f::new(center - half, center + half)
    }

    #[test]
    fn root_bbox_of_leaf_tree_covers_items() {
        let items = vec![0_usize, 1];
        let bboxes = vec![
            unit_box(Point3f::new(0.0, 0.0, 0.0)),
            unit_box(Point3f::new(2.0, 0.0, 0.0)),
        ];
        let tree = BvhTree::new(vec![BvhNode::Leaf { begin: 0, end: 2 }], items, bboxes);
        assert_eq!(tree.bbox().p_min, Point3f::new(-0.5, -0.5, -0.5));
        assert_eq!(tree.bbox().p_max, Point3f::new(2.5, 0.5, 0.5));
    }

    #[test]
    fn root_bbox_of_interior_tree_unions_children() {
        let left = unit_box(Point3f::new(-2.0, 0.0, 0.0));
        let right = unit_box(Point3f::new(2.0, 0.0, 0.0));
        let nodes = vec![
            BvhNode::Interior {
                children: [1, 2],
                bboxes: [left, right],
            },
            BvhNode::Leaf { begin: 0, end: 1 },
            BvhNode::Leaf { begin: 1, end: 2 },
        ];
        let tree = BvhTree::new(nodes, vec![0_usize, 1], vec![left, right]);
        assert_eq!(tree.bbox().p_min, Point3f::new(-2.5, -0.5, -0.5));
        assert_eq!(tree.bbox().p_max, Point3f::new(2.5, 0.5, 0.5));
    }

    #[test]
    fn empty_tree_has_empty_bbox() {
        let tree: BvhTree<usize> = BvhTree::new(vec![], vec![], vec![]);
        assert_eq!(tree.size(), 0);
        assert_eq!(*tree.bbox(), Bounds3f::EMPTY);
    }
}
