use super::error::InvalidParameter;
use super::point::{Label, Point};
use super::search::{BruteForce, IndexStrategy, NeighborSearch};
use super::tree::SphereTree;
use bitvec::prelude::*;
use log::{debug, trace};

// DBSCAN algorithm pseudocode (from <http://en.wikipedia.org/wiki/DBSCAN>):
//
// DBSCAN(D, eps, MinPts)
//    C = 0
//    for each unvisited point P in dataset D
//       mark P as visited
//       NeighborPts = regionQuery(P, eps)
//       if sizeof(NeighborPts) < MinPts
//          mark P as NOISE
//       else
//          C = next cluster
//          expandCluster(P, NeighborPts, C, eps, MinPts)
//
// expandCluster(P, NeighborPts, C, eps, MinPts)
//    add P to cluster C
//    for each point P' in NeighborPts
//       if P' is not visited
//          mark P' as visited
//          NeighborPts' = regionQuery(P', eps)
//          if sizeof(NeighborPts') >= MinPts
//             NeighborPts = NeighborPts joined with NeighborPts'
//       if P' is not yet member of any cluster
//          add P' to cluster C
//
// regionQuery(P, eps)
//    return all points within P's eps-neighborhood (including P)

/// Clusters points using DBSCAN with haversine distance
///
/// Picks the neighbourhood search with `IndexStrategy::Auto`.
///
/// # Arguments
///
/// * `points` - Points to cluster, visited in the given order
/// * `eps` - Clustering radius in radians, see `epsilon_from_km`
/// * `min_points` - Minimum number of points in eps-neighbourhood, the point itself included
///
/// # Returns
///
/// One label per input point, in input order. Cluster ids start at 0 and are
/// handed out in the order their first core point is visited.
///
/// # Errors
///
/// Fails without labelling anything if `eps` is not a positive finite number,
/// `min_points` is 0 or any coordinate is not finite
pub fn db_scan(points: &[Point], eps: f64, min_points: usize) -> Result<Vec<Label>, InvalidParameter> {
    db_scan_with(points, eps, min_points, IndexStrategy::Auto)
}

/// Same as `db_scan`, with an explicit neighbourhood search strategy
///
/// The strategy only affects running time, never the labels.
pub fn db_scan_with(
    points: &[Point],
    eps: f64,
    min_points: usize,
    strategy: IndexStrategy,
) -> Result<Vec<Label>, InvalidParameter> {
    validate(points, eps, min_points)?;

    let labels = match strategy.resolve(points.len()) {
        IndexStrategy::Tree => {
            debug!("Building sphere tree over {} points", points.len());
            expand_all(points, &SphereTree::new(points), eps, min_points)
        }
        _ => expand_all(points, &BruteForce::new(points), eps, min_points),
    };

    Ok(labels)
}

fn validate(points: &[Point], eps: f64, min_points: usize) -> Result<(), InvalidParameter> {
    if !(eps.is_finite() && eps > 0.0) {
        return Err(InvalidParameter::Epsilon(eps));
    }
    if min_points < 1 {
        return Err(InvalidParameter::MinPoints(min_points));
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(InvalidParameter::NonFiniteCoordinate { index });
    }
    Ok(())
}

/// Runs DBSCAN over already validated input
pub fn expand_all<S: NeighborSearch>(
    points: &[Point],
    search: &S,
    eps: f64,
    min_points: usize,
) -> Vec<Label> {
    let mut visited = bitvec![0; points.len()];
    let mut labels = vec![Label::Noise; points.len()];
    let mut neighbor_unique = bitvec![0; points.len()];
    let mut c = 0;

    for i in 0..points.len() {
        if visited[i] {
            continue;
        }
        visited.set(i, true);

        let neighbor_pts = search.neighbors(&points[i], eps, Vec::new());
        if neighbor_pts.len() < min_points {
            trace!("Point {} is noise for now ({} neighbours)", i, neighbor_pts.len());
            continue;
        }

        let id = c;
        c += 1;
        labels[i] = Label::Cluster(id);
        debug!("Cluster {} seeded at point {} with {} neighbours", id, i, neighbor_pts.len());

        // expandCluster goes here inline
        neighbor_unique.fill(false);
        for &j in &neighbor_pts {
            neighbor_unique.set(j, true);
        }

        let mut neighbor_pts = neighbor_pts;
        let mut j = 0;
        // neighbor_pts grows while we walk it
        while j < neighbor_pts.len() {
            let k = neighbor_pts[j];
            if !visited[k] {
                visited.set(k, true);
                let more_neighbors = search.neighbors(&points[k], eps, Vec::new());
                if more_neighbors.len() >= min_points {
                    for &p in &more_neighbors {
                        if !neighbor_unique[p] {
                            neighbor_pts.push(p);
                            neighbor_unique.set(p, true);
                        }
                    }
                }
            }

            // border points keep the first cluster that reached them
            if labels[k].is_noise() {
                labels[k] = Label::Cluster(id);
            }
            j += 1;
        }
    }

    debug!(
        "DBSCAN finished: {} clusters, {} noise points",
        c,
        labels.iter().filter(|l| l.is_noise()).count()
    );

    labels
}
