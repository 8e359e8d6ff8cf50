//! Hotspot clustering of geographic points
//!
//! Groups latitude/longitude observations with DBSCAN over great-circle
//! distance, then writes the labelled points as records and as an HTML map.

pub mod cluster;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod report;

#[cfg(test)]
mod input_test;

pub use cluster::{Label, Point};
pub use config::{ClusterConfig, MapStyle, Palette};
pub use error::Error;

use cluster::{InvalidParameter, db_scan_with};

/// Labels `points` with the radius, density threshold and search strategy in `config`
pub fn cluster_points(points: &[Point], config: &ClusterConfig) -> Result<Vec<Label>, InvalidParameter> {
    let eps = config.epsilon()?;
    db_scan_with(points, eps, config.min_points, config.strategy)
}
