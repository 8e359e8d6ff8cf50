//! K-D tree over points lifted onto the unit sphere
//!
//! Points are stored as 3D unit vectors, where straight-line (chord) distance
//! grows monotonically with great-circle distance. The tree prunes by chord
//! length, then every candidate is confirmed with `angular_distance`, so range
//! queries return exactly what a brute-force scan would.

use super::distance::{angular_distance, chord_length, to_unit_vector};
use super::point::Point;

/// Absorbs rounding in the unit vectors so that no point lying exactly on the
/// eps boundary is pruned before the haversine check
const CHORD_SLACK: f64 = 1e-9;

/// K-D tree for spherical range queries
///
/// Nodes hold only indices into the points slice.
pub struct SphereTree<'a> {
    points: &'a [Point],
    coords: Vec<[f64; 3]>,
    root: Option<Box<SphereTreeNode>>,
}

struct SphereTreeNode {
    point_id: usize,
    axis: usize,
    left: Option<Box<SphereTreeNode>>,
    right: Option<Box<SphereTreeNode>>,
}

impl<'a> SphereTree<'a> {
    /// Builds a balanced tree by splitting on the median along x, y, z in turn
    pub fn new(points: &'a [Point]) -> Self {
        let coords: Vec<[f64; 3]> = points.iter().map(to_unit_vector).collect();
        let mut ids: Vec<usize> = (0..points.len()).collect();
        let root = build_tree(&coords, &mut ids, 0);

        SphereTree {
            points,
            coords,
            root,
        }
    }

    /// Finds all points within `eps` radians of `pt`
    ///
    /// Indices appended to `nodes` are sorted in ascending order.
    pub fn in_range(&self, pt: &Point, eps: f64, mut nodes: Vec<usize>) -> Vec<usize> {
        if eps.is_nan() || eps < 0.0 {
            return nodes;
        }

        let start = nodes.len();
        let query = to_unit_vector(pt);
        let r = chord_length(eps) + CHORD_SLACK;
        self.in_range_recursive(self.root.as_deref(), pt, &query, eps, r, &mut nodes);
        nodes[start..].sort_unstable();
        nodes
    }

    fn in_range_recursive(
        &self,
        t: Option<&SphereTreeNode>,
        pt: &Point,
        query: &[f64; 3],
        eps: f64,
        r: f64,
        nodes: &mut Vec<usize>,
    ) {
        let t = match t {
            None => return,
            Some(t) => t,
        };

        let node = &self.coords[t.point_id];
        if sq_dist(node, query) <= r * r && angular_distance(pt, &self.points[t.point_id]) <= eps {
            nodes.push(t.point_id);
        }

        // equal coordinates may sit on either side of the split
        let diff = query[t.axis] - node[t.axis];
        if diff <= r {
            self.in_range_recursive(t.left.as_deref(), pt, query, eps, r, nodes);
        }
        if diff >= -r {
            self.in_range_recursive(t.right.as_deref(), pt, query, eps, r, nodes);
        }
    }

    /// Returns the height of the tree
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.height())
    }
}

impl SphereTreeNode {
    fn height(&self) -> usize {
        let lht = self.left.as_ref().map_or(0, |l| l.height());
        let rht = self.right.as_ref().map_or(0, |r| r.height());
        lht.max(rht) + 1
    }
}

fn build_tree(coords: &[[f64; 3]], ids: &mut [usize], depth: usize) -> Option<Box<SphereTreeNode>> {
    if ids.is_empty() {
        return None;
    }

    let axis = depth % 3;
    // tie-break on index keeps the layout independent of the sort algorithm
    ids.sort_unstable_by(|&a, &b| coords[a][axis].total_cmp(&coords[b][axis]).then(a.cmp(&b)));

    let m = ids.len() / 2;
    let (left, rest) = ids.split_at_mut(m);
    let point_id = rest[0];
    let right = &mut rest[1..];

    Some(Box::new(SphereTreeNode {
        point_id,
        axis,
        left: build_tree(coords, left, depth + 1),
        right: build_tree(coords, right, depth + 1),
    }))
}

fn sq_dist(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (0..3).map(|i| (a[i] - b[i]).powi(2)).sum()
}
