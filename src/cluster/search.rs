use super::distance::angular_distance;
use super::point::Point;
use super::tree::SphereTree;

/// Point count from which `IndexStrategy::Auto` builds a tree
pub const AUTO_TREE_THRESHOLD: usize = 64;

/// Finds all points within an angular radius of a given point
///
/// Implementations must agree exactly: a point is a neighbour iff
/// `angular_distance(pt, point) <= eps`.
pub trait NeighborSearch {
    /// Appends to `nodes` the indices of all points within `eps` radians of `pt`
    ///
    /// To avoid allocation, `nodes` can be re-used across calls.
    fn neighbors(&self, pt: &Point, eps: f64, nodes: Vec<usize>) -> Vec<usize>;
}

/// How DBSCAN looks up eps-neighbourhoods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexStrategy {
    /// Brute force for small inputs, tree otherwise
    #[default]
    Auto,
    BruteForce,
    Tree,
}

impl IndexStrategy {
    /// Resolves `Auto` for an input of `len` points
    pub fn resolve(self, len: usize) -> IndexStrategy {
        match self {
            IndexStrategy::Auto if len < AUTO_TREE_THRESHOLD => IndexStrategy::BruteForce,
            IndexStrategy::Auto => IndexStrategy::Tree,
            other => other,
        }
    }
}

/// Simple O(N) way to find points in neighbourhood
pub struct BruteForce<'a> {
    points: &'a [Point],
}

impl<'a> BruteForce<'a> {
    pub fn new(points: &'a [Point]) -> Self {
        BruteForce { points }
    }
}

impl NeighborSearch for BruteForce<'_> {
    fn neighbors(&self, pt: &Point, eps: f64, mut nodes: Vec<usize>) -> Vec<usize> {
        for (i, point) in self.points.iter().enumerate() {
            if angular_distance(pt, point) <= eps {
                nodes.push(i);
            }
        }
        nodes
    }
}

impl NeighborSearch for SphereTree<'_> {
    fn neighbors(&self, pt: &Point, eps: f64, nodes: Vec<usize>) -> Vec<usize> {
        self.in_range(pt, eps, nodes)
    }
}
