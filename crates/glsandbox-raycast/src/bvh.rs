//! Bounding Volume Hierarchy for accelerated mesh picking.
//!
//! Uses binned Surface Area Heuristic (SAH) construction. Traversal keeps
//! the exact result of [`raycast_mesh`](crate::raycast_mesh): the nearest
//! hit, and on equal `t` the lowest triangle index.

use std::cmp::Ordering;

use glsandbox_bounds::Aabb;
use glsandbox_math::{Point3, Vec3};

use crate::mesh::MeshView;
use crate::triangle::ray_triangle;
use crate::{Ray, RayHit};

const NUM_BUCKETS: usize = 12;
const MAX_LEAF_TRIANGLES: usize = 4;
const TRAVERSAL_COST: f32 = 0.125;

/// A BVH node - either a leaf holding triangles or an internal node with
/// two children.
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// Leaf node.
    Leaf {
        /// Bounds of the leaf's triangles, inflated by the tree margin.
        aabb: Aabb,
        /// Triangle indices into the source mesh.
        triangles: Vec<usize>,
    },
    /// Internal node with two children.
    Internal {
        /// Bounds of both children.
        aabb: Aabb,
        /// Left child node.
        left: Box<BvhNode>,
        /// Right child node.
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    /// Bounds of this node.
    pub fn aabb(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { aabb, .. } | BvhNode::Internal { aabb, .. } => aabb,
        }
    }

    fn count(&self) -> usize {
        match self {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Internal { left, right, .. } => 1 + left.count() + right.count(),
        }
    }
}

/// Per-triangle data used during construction.
struct BuildTriangle {
    index: usize,
    aabb: Aabb,
    centroid: Point3,
}

/// Bounding volume hierarchy over the triangles of a mesh.
///
/// The tree owns a copy of the triangle corners, so it does not borrow the
/// buffers it was built from.
#[derive(Debug, Clone)]
pub struct MeshBvh {
    root: Option<BvhNode>,
    triangles: Vec<[Point3; 3]>,
}

impl MeshBvh {
    /// Build a BVH over every triangle of `mesh`.
    pub fn build(mesh: &MeshView<'_>) -> Self {
        let triangles: Vec<[Point3; 3]> =
            (0..mesh.triangle_count()).map(|i| mesh.triangle(i)).collect();

        let mut build_data: Vec<BuildTriangle> = triangles
            .iter()
            .enumerate()
            .map(|(index, corners)| {
                let aabb = Aabb::from_points(corners);
                BuildTriangle {
                    index,
                    aabb,
                    centroid: aabb.center(),
                }
            })
            .collect();

        let root = if build_data.is_empty() {
            None
        } else {
            let margin = tree_margin(&build_data);
            Some(build_node(&mut build_data, margin))
        };

        if let Some(root) = &root {
            log::debug!(
                "built mesh BVH: {} triangles, {} nodes",
                triangles.len(),
                root.count()
            );
        }

        Self { root, triangles }
    }

    /// Root node, `None` for a mesh without triangles.
    pub fn root(&self) -> Option<&BvhNode> {
        self.root.as_ref()
    }

    /// Number of triangles in the tree.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, BvhNode::count)
    }

    /// Nearest hit in front of `ray`; identical to a linear scan with
    /// [`raycast_mesh`](crate::raycast_mesh) over the same mesh.
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;
        if let Some(root) = &self.root {
            self.raycast_node(ray, root, &mut closest);
        }
        closest
    }

    fn raycast_node(&self, ray: &Ray, node: &BvhNode, closest: &mut Option<RayHit>) {
        let Some((t_min, _)) = ray.intersect_aabb(node.aabb()) else {
            return;
        };
        // a node entered at exactly the best t may still hold a lower index
        if closest.is_some_and(|c| t_min > c.t) {
            return;
        }

        match node {
            BvhNode::Leaf { triangles, .. } => {
                for &index in triangles {
                    let [v0, v1, v2] = &self.triangles[index];
                    if let Some(hit) = ray_triangle(ray, v0, v1, v2) {
                        let candidate = RayHit {
                            t: hit.t,
                            u: hit.u,
                            v: hit.v,
                            tri_index: index,
                        };
                        if closest.map_or(true, |c| is_closer(&candidate, &c)) {
                            *closest = Some(candidate);
                        }
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                // Visit children in order of AABB distance
                let left_t = ray.intersect_aabb(left.aabb()).map(|(t, _)| t);
                let right_t = ray.intersect_aabb(right.aabb()).map(|(t, _)| t);

                match (left_t, right_t) {
                    (Some(lt), Some(rt)) => {
                        if lt <= rt {
                            self.raycast_node(ray, left, closest);
                            self.raycast_node(ray, right, closest);
                        } else {
                            self.raycast_node(ray, right, closest);
                            self.raycast_node(ray, left, closest);
                        }
                    }
                    (Some(_), None) => self.raycast_node(ray, left, closest),
                    (None, Some(_)) => self.raycast_node(ray, right, closest),
                    (None, None) => {}
                }
            }
        }
    }
}

/// Order hits by `t`, then by triangle index.
fn is_closer(a: &RayHit, b: &RayHit) -> bool {
    match a.t.partial_cmp(&b.t) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => a.tri_index < b.tri_index,
        _ => false,
    }
}

/// Inflation applied to every node so rounding in the slab test never
/// rejects a hit the triangle test accepts.
fn tree_margin(build_data: &[BuildTriangle]) -> f32 {
    let scale = build_data
        .iter()
        .flat_map(|t| [t.aabb.min, t.aabb.max])
        .flat_map(|p| [p.x.abs(), p.y.abs(), p.z.abs()])
        .fold(1.0f32, f32::max);
    scale * 1e-5
}

fn bounds_of(build_data: &[BuildTriangle]) -> Aabb {
    build_data
        .iter()
        .fold(Aabb::empty(), |acc, t| acc.merge(&t.aabb))
}

/// Build a BVH node recursively using SAH.
fn build_node(build_data: &mut [BuildTriangle], margin: f32) -> BvhNode {
    let bounds = bounds_of(build_data);
    let mut node_aabb = bounds;
    node_aabb.expand(margin);

    if build_data.len() <= MAX_LEAF_TRIANGLES {
        return BvhNode::Leaf {
            aabb: node_aabb,
            triangles: build_data.iter().map(|t| t.index).collect(),
        };
    }

    let mid = match find_best_split(build_data, &bounds) {
        Some((axis, pos)) => partition_triangles(build_data, axis, pos),
        None => 0,
    };

    // Fall back to a median split when SAH finds nothing useful
    let mid = if mid == 0 || mid == build_data.len() {
        build_data.len() / 2
    } else {
        mid
    };

    let (left_data, right_data) = build_data.split_at_mut(mid);
    BvhNode::Internal {
        aabb: node_aabb,
        left: Box::new(build_node(left_data, margin)),
        right: Box::new(build_node(right_data, margin)),
    }
}

fn axis_value(v: &Vec3, axis: usize) -> f32 {
    match axis {
        0 => v.x,
        1 => v.y,
        _ => v.z,
    }
}

/// Find the best split axis and position using SAH over centroid buckets.
fn find_best_split(build_data: &[BuildTriangle], bounds: &Aabb) -> Option<(usize, f32)> {
    let extent = bounds.extents();
    let total_area = bounds.surface_area();
    if total_area <= 0.0 {
        return None;
    }

    let mut best: Option<(usize, f32)> = None;
    let mut best_cost = f32::INFINITY;

    for axis in 0..3 {
        let axis_extent = axis_value(&extent, axis);
        if axis_extent < 1e-10 {
            continue;
        }
        let axis_min = axis_value(&bounds.min.coords, axis);

        let mut bucket_counts = [0usize; NUM_BUCKETS];
        let mut bucket_bounds = [Aabb::empty(); NUM_BUCKETS];

        for tri in build_data {
            let c = axis_value(&tri.centroid.coords, axis);
            let b = ((c - axis_min) / axis_extent * NUM_BUCKETS as f32) as usize;
            let b = b.min(NUM_BUCKETS - 1);
            bucket_counts[b] += 1;
            bucket_bounds[b] = bucket_bounds[b].merge(&tri.aabb);
        }

        for split in 1..NUM_BUCKETS {
            let (left_count, left_bounds) = (0..split).fold((0, Aabb::empty()), |(n, b), i| {
                (n + bucket_counts[i], b.merge(&bucket_bounds[i]))
            });
            let (right_count, right_bounds) =
                (split..NUM_BUCKETS).fold((0, Aabb::empty()), |(n, b), i| {
                    (n + bucket_counts[i], b.merge(&bucket_bounds[i]))
                });

            if left_count == 0 || right_count == 0 {
                continue;
            }

            let cost = TRAVERSAL_COST
                + left_bounds.surface_area() / total_area * left_count as f32
                + right_bounds.surface_area() / total_area * right_count as f32;

            if cost < best_cost {
                best_cost = cost;
                best = Some((
                    axis,
                    axis_min + (split as f32 / NUM_BUCKETS as f32) * axis_extent,
                ));
            }
        }
    }

    best
}

/// Partition triangles by centroid along an axis.
fn partition_triangles(build_data: &mut [BuildTriangle], axis: usize, pos: f32) -> usize {
    let mut left = 0;
    let mut right = build_data.len();

    while left < right {
        if axis_value(&build_data[left].centroid.coords, axis) < pos {
            left += 1;
        } else {
            right -= 1;
            build_data.swap(left, right);
        }
    }

    left
}
