//! Radius-bounded neighbor search over a position snapshot.
//!
//! A [`SpatialIndex`] is rebuilt from a particle set's positions at the start
//! of every tick, queried by the collision and smoothing passes, and
//! discarded. Both passes read the same snapshot even though positions
//! mutate between them; the snapshot is captured explicitly at build time so
//! the staleness is a documented property of the index, not an artifact of
//! shared arrays.
//!
//! Two interchangeable strategies sit behind one query interface: a
//! brute-force scan and a balanced k-d tree with pruned range descent.

use bevy::prelude::*;

/// Neighbor-search strategy, chosen per particle set at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum SpatialStrategy {
    /// Scan the whole snapshot per query; O(N) but allocation-free to build.
    BruteForce,
    /// Balanced k-d tree; O(N log N) build, O(log N + k) queries.
    #[default]
    KdTree,
}

/// One k-d tree node. The splitting axis is implied by depth (round-robin
/// x, y, z), so only the point and the child links are stored.
#[derive(Clone, Copy, Debug)]
struct KdNode {
    position: Vec3,
    id: u32,
    left: Option<u32>,
    right: Option<u32>,
}

/// An immutable radius-query structure over one tick's positions.
pub struct SpatialIndex {
    snapshot: Vec<Vec3>,
    nodes: Vec<KdNode>,
    root: Option<u32>,
    strategy: SpatialStrategy,
}

impl SpatialIndex {
    /// Builds an index over `positions`. Point ids are the slice indices.
    pub fn build(strategy: SpatialStrategy, positions: &[Vec3]) -> Self {
        let snapshot = positions.to_vec();
        let mut nodes = Vec::new();
        let root = match strategy {
            SpatialStrategy::BruteForce => None,
            SpatialStrategy::KdTree => {
                let mut points: Vec<(Vec3, u32)> = snapshot
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| (p, i as u32))
                    .collect();
                nodes.reserve_exact(points.len());
                build_subtree(&mut points, 0, &mut nodes)
            }
        };
        Self {
            snapshot,
            nodes,
            root,
            strategy,
        }
    }

    /// Number of points in the snapshot.
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Whether the snapshot is empty. Queries on an empty index return
    /// nothing.
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Returns the ids of all points with squared distance to `center`
    /// strictly less than `radius_sq`, in unspecified order.
    ///
    /// A point can match itself (distance zero); callers filter self-pairs.
    pub fn query(&self, center: Vec3, radius_sq: f32) -> Vec<usize> {
        let mut out = Vec::new();
        self.query_into(center, radius_sq, &mut out);
        out
    }

    /// Like [`query`](Self::query), but collects into `out`, reusing its
    /// allocation across calls.
    pub fn query_into(&self, center: Vec3, radius_sq: f32, out: &mut Vec<usize>) {
        out.clear();
        match self.strategy {
            SpatialStrategy::BruteForce => {
                for (i, &p) in self.snapshot.iter().enumerate() {
                    if p.distance_squared(center) < radius_sq {
                        out.push(i);
                    }
                }
            }
            SpatialStrategy::KdTree => self.descend(self.root, center, radius_sq, 0, out),
        }
    }

    fn descend(
        &self,
        node: Option<u32>,
        center: Vec3,
        radius_sq: f32,
        depth: usize,
        out: &mut Vec<usize>,
    ) {
        let Some(slot) = node else { return };
        let node = &self.nodes[slot as usize];

        if node.position.distance_squared(center) < radius_sq {
            out.push(node.id as usize);
        }

        let axis = depth % 3;
        let diff = center[axis] - node.position[axis];
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.descend(near, center, radius_sq, depth + 1, out);
        // The far side can only hold matches if the splitting plane lies
        // within the query radius.
        if diff * diff < radius_sq {
            self.descend(far, center, radius_sq, depth + 1, out);
        }
    }
}

/// Recursively builds a balanced subtree by median-splitting `points` on the
/// axis for `depth`, returning the subtree root's slot in `nodes`.
///
/// Ties on the median coordinate land on either side depending on how the
/// selection partitions; the split is consistent within one build pass.
fn build_subtree(points: &mut [(Vec3, u32)], depth: usize, nodes: &mut Vec<KdNode>) -> Option<u32> {
    if points.is_empty() {
        return None;
    }
    let axis = depth % 3;
    let mid = points.len() / 2;
    points.select_nth_unstable_by(mid, |a, b| a.0[axis].total_cmp(&b.0[axis]));

    let (position, id) = points[mid];
    let slot = nodes.len() as u32;
    nodes.push(KdNode {
        position,
        id,
        left: None,
        right: None,
    });

    let (below, rest) = points.split_at_mut(mid);
    let left = build_subtree(below, depth + 1, nodes);
    let right = build_subtree(&mut rest[1..], depth + 1, nodes);
    nodes[slot as usize].left = left;
    nodes[slot as usize].right = right;
    Some(slot)
}
