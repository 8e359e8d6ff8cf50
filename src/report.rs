//! Serializing labelled points as JSON or CSV records

use std::io::Write;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::cluster::{Label, Point, clusters_from_labels};
use crate::error::Result;

/// One input point with its cluster, `-1` for noise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub cluster: Label,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub cluster: usize,
    pub size: usize,
    pub centroid: Point,
}

/// Result of one clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    pub message: String,
    /// Number of clusters, noise not counted
    pub clusters_count: usize,
    pub noise_count: usize,
    /// Input points in input order
    pub clusters: Vec<ClusterRecord>,
    pub summary: Vec<ClusterSummary>,
    pub map_file: Option<String>,
}

impl ClusterReport {
    /// Pairs points with their labels
    ///
    /// # Panics
    ///
    /// Panics if `points` and `labels` differ in length
    pub fn new(points: &[Point], labels: &[Label]) -> Self {
        assert_eq!(points.len(), labels.len(), "one label per point");

        let clusters = points
            .iter()
            .zip(labels)
            .map(|(p, &cluster)| ClusterRecord {
                longitude: p.longitude,
                latitude: p.latitude,
                cluster,
            })
            .collect();

        let summary: Vec<ClusterSummary> = clusters_from_labels(labels)
            .into_iter()
            .filter_map(|c| {
                c.centroid(points).map(|centroid| ClusterSummary {
                    cluster: c.id,
                    size: c.points.len(),
                    centroid,
                })
            })
            .collect();

        ClusterReport {
            message: "Clustering complete".to_string(),
            clusters_count: summary.len(),
            noise_count: labels.iter().filter(|l| l.is_noise()).count(),
            clusters,
            summary,
            map_file: None,
        }
    }

    pub fn with_map_file(mut self, map_file: Option<String>) -> Self {
        self.map_file = map_file;
        self
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Writes a `latitude,longitude,cluster` row per point
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(writer);

        writer.write_record(["latitude", "longitude", "cluster"])?;
        for record in &self.clusters {
            writer.write_record([
                record.latitude.to_string(),
                record.longitude.to_string(),
                record.cluster.as_i64().to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
