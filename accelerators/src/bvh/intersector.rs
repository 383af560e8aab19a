//! BVH traversal.

use super::{BvhNode, BvhTree, Visitor};
use helios_core::geometry::{Ray, RayInfo};
use helios_core::math::{min, Float};

/// Capacity of the traversal stack. Trees deeper than this violate the
/// construction contract and abort traversal.
pub const STACK_SIZE: usize = 64;

/// Number of stack entries inspected when moving the closest node to the
/// top of the stack. A bounded window, not a full priority queue.
pub const SORT_SIZE: usize = 2;

/// Entry of the node stack.
#[derive(Copy, Clone, Default)]
struct NodeEntry {
    t_min: Float,
    t_max: Float,
    index: usize,
}

/// Stack-based nearest-first traversal over a prebuilt BVH tree.
pub struct Intersector;

impl Intersector {
    /// Intersects a ray with a given BVH, invoking the visitor once per leaf
    /// whose bounding box is possibly intersected within the current
    /// nearest-hit bound.
    ///
    /// * `tree`     - The tree to traverse.
    /// * `ray`      - The ray.
    /// * `ray_info` - Precomputed reciprocal-direction data for `ray`.
    /// * `visitor`  - The leaf visitor.
    pub fn intersect<I, V: Visitor<I>>(
        &self,
        tree: &BvhTree<I>,
        ray: &Ray,
        ray_info: &RayInfo,
        visitor: &mut V,
    ) {
        // Handle empty trees now so that no leaf is ever empty.
        if tree.size() == 0 {
            return;
        }

        // Check the intersection between the ray and the bounding box of
        // the tree.
        let (t_min, t_max) = match tree.bbox().intersect_ray(ray, ray_info) {
            Some(interval) => interval,
            None => return,
        };

        // Initialize the node stack and push the root node.
        let mut stack = [NodeEntry::default(); STACK_SIZE];
        stack[0] = NodeEntry {
            t_min,
            t_max,
            index: 0,
        };
        let mut stack_size = 1;

        // Traverse the tree and intersect leaf nodes.
        let mut t_far = ray.t_max;
        while stack_size > 0 {
            // Pop a node from the stack.
            stack_size -= 1;

            // Cull nodes that are farther than the closest intersection so
            // far.
            if stack[stack_size].t_min >= t_far {
                continue;
            }

            // Move the closest node to the top of the stack.
            if stack_size > 0 {
                let n = min(stack_size, SORT_SIZE);
                for i in (stack_size - n)..stack_size {
                    if stack[i].t_min < stack[stack_size].t_min {
                        stack.swap(i, stack_size);
                    }
                }
            }

            let entry = stack[stack_size];
            match tree.node(entry.index) {
                BvhNode::Leaf { begin, end } => {
                    let begin = *begin as usize;
                    let end = *end as usize;
                    debug_assert!(begin < end);

                    // Visit the leaf.
                    let mut distance = ray.t_max;
                    let proceed = visitor.visit(
                        &tree.items()[begin..end],
                        &tree.item_bboxes()[begin..end],
                        ray,
                        ray_info,
                        entry.t_min,
                        entry.t_max,
                        &mut distance,
                    );
                    debug_assert!(!proceed || distance >= 0.0);

                    // Terminate traversal if the visitor decided so.
                    if !proceed {
                        break;
                    }

                    // Keep track of the distance to the closest intersection.
                    if t_far > distance {
                        t_far = distance;
                    }
                }
                BvhNode::Interior { children, bboxes } => {
                    // Push child nodes to the stack.
                    for i in 0..2 {
                        // Discard the child node if it isn't intersected by
                        // the ray, or if it is farther than the closest
                        // intersection so far.
                        if let Some((t_min, t_max)) = bboxes[i].intersect_ray(ray, ray_info) {
                            if t_min < t_far {
                                debug_assert!(
                                    stack_size < STACK_SIZE,
                                    "node stack overflow: tree deeper than {}",
                                    STACK_SIZE
                                );
                                stack[stack_size] = NodeEntry {
                                    t_min,
                                    t_max,
                                    index: children[i] as usize,
                                };
                                stack_size += 1;
                            }
                        }
                    }
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
