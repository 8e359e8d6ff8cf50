//! DBSCAN clustering on (lat, lon) with great-circle distance
pub mod dbscan;
pub mod distance;
pub mod error;
pub mod point;
pub mod search;
pub mod tree;


pub use dbscan::{db_scan, db_scan_with};
pub use distance::{EARTH_RADIUS_KM, angular_distance, epsilon_from_km};
pub use error::InvalidParameter;
pub use point::{Cluster, Label, Point, PointList, clusters_from_labels};
pub use search::{BruteForce, IndexStrategy, NeighborSearch};
pub use tree::SphereTree;
