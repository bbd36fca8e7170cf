//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree built by median split: sort the primitives by the minimum
//! corner of their boxes along one axis, cut the sequence in half, recurse.
//! Traversal returns exactly the hit a linear scan would, it only skips
//! subtrees whose boxes the ray misses.

use crate::{HitRecord, Hittable, HittableList, Ray};
use glint_math::{Aabb, Interval};
use rand::{Rng, RngCore};
use std::cmp::Ordering;

/// How the split axis is picked at each interior node.
pub enum SplitAxis<'r> {
    /// Axis of greatest extent of the node's combined box.
    Longest,
    /// Uniformly random axis per node, drawn from the given generator.
    Random(&'r mut dyn RngCore),
}

impl SplitAxis<'_> {
    fn choose(&mut self, bounds: &Aabb) -> usize {
        match self {
            SplitAxis::Longest => bounds.longest_axis(),
            SplitAxis::Random(rng) => rng.gen_range(0..3),
        }
    }
}

/// BVH node - either a branch with two children or a leaf with one primitive.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// A single primitive.
    Leaf {
        object: Box<dyn Hittable>,
        bbox: Aabb,
    },
    /// Empty node (for edge cases).
    Empty,
}

impl BvhNode {
    /// Build a BVH splitting each node along its longest axis.
    pub fn new(objects: Vec<Box<dyn Hittable>>) -> Self {
        Self::with_split(objects, SplitAxis::Longest)
    }

    /// Build a BVH with an explicit axis strategy.
    pub fn with_split(objects: Vec<Box<dyn Hittable>>, mut split: SplitAxis<'_>) -> Self {
        if objects.is_empty() {
            log::warn!("Building BVH over an empty scene");
            return BvhNode::Empty;
        }

        let count = objects.len();
        let node = Self::build(objects, &mut split);
        log::info!(
            "Built BVH: {} primitives, {} nodes, depth {}",
            count,
            node.node_count(),
            node.depth()
        );
        node
    }

    fn leaf(object: Box<dyn Hittable>) -> Self {
        let bbox = object.bounding_box();
        BvhNode::Leaf { object, bbox }
    }

    fn branch(left: BvhNode, right: BvhNode) -> Self {
        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    /// Recursive construction. `objects` is never empty here.
    fn build(mut objects: Vec<Box<dyn Hittable>>, split: &mut SplitAxis<'_>) -> Self {
        if objects.len() == 1 {
            return match objects.pop() {
                Some(object) => Self::leaf(object),
                None => BvhNode::Empty,
            };
        }

        let bounds = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));
        let axis = split.choose(&bounds);

        // Stable sort keeps insertion order among equal keys
        objects.sort_by(|a, b| {
            let a_min = a.bounding_box().min[axis];
            let b_min = b.bounding_box().min[axis];
            a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
        });

        // Split at midpoint; a pair becomes two leaves in comparator order
        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);
        let left = Self::build(objects, split);
        let right = Self::build(right_objects, split);

        Self::branch(left, right)
    }

    /// Levels from this node down to its deepest leaf.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Total number of nodes, leaves included.
    pub fn node_count(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }
}

impl From<HittableList> for BvhNode {
    fn from(list: HittableList) -> Self {
        BvhNode::new(list.into_objects())
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { object, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }
                object.hit(ray, ray_t)
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.hit(ray, ray_t);

                // Only check right up to closest hit
                let right_t = match &hit_left {
                    Some(rec) => ray_t.with_max(rec.t),
                    None => ray_t,
                };
                right.hit(ray, right_t).or(hit_left)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
