use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::distance::to_unit_vector;

/// Point represents a geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

/// PointList is an ordered collection of Points
pub type PointList = Vec<Point>;

impl Point {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Point {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Result of DBSCAN for a single point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Member of the cluster with the given id
    Cluster(usize),
    /// Neither core nor reachable from a core point
    Noise,
}

impl Label {
    /// Integer used for this label in serialized records, `-1` for noise
    pub fn as_i64(self) -> i64 {
        match self {
            Label::Cluster(id) => id as i64,
            Label::Noise => -1,
        }
    }

    pub fn from_i64(value: i64) -> Option<Label> {
        match value {
            -1 => Some(Label::Noise),
            v if v >= 0 => Some(Label::Cluster(v as usize)),
            _ => None,
        }
    }

    pub fn cluster_id(self) -> Option<usize> {
        match self {
            Label::Cluster(id) => Some(id),
            Label::Noise => None,
        }
    }

    pub fn is_noise(self) -> bool {
        self == Label::Noise
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Cluster(id) => write!(f, "Cluster {}", id),
            Label::Noise => f.write_str("Noise"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Label::from_i64(value)
            .ok_or_else(|| de::Error::custom(format!("invalid cluster label {}", value)))
    }
}

/// Cluster is a view over the points sharing one cluster label
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Cluster ID
    pub id: usize,
    /// Indices of points belonging to this cluster, in input order
    pub points: Vec<usize>,
}

impl Cluster {
    /// Calculates the spherical centroid of the cluster
    ///
    /// Averages unit vectors rather than degrees, so clusters straddling the
    /// antimeridian get a centroid on the right side of the globe.
    ///
    /// Returns `None` for an empty cluster.
    pub fn centroid(&self, points: &[Point]) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }

        let mut sum = [0.0; 3];
        for &i in &self.points {
            let v = to_unit_vector(&points[i]);
            for j in 0..3 {
                sum[j] += v[j];
            }
        }

        let [x, y, z] = sum;
        let latitude = z.atan2((x * x + y * y).sqrt()).to_degrees();
        let longitude = y.atan2(x).to_degrees();

        Some(Point::new(latitude, longitude))
    }
}

/// Groups labels into clusters ordered by id
///
/// Noise labels are skipped.
pub fn clusters_from_labels(labels: &[Label]) -> Vec<Cluster> {
    let count = labels
        .iter()
        .filter_map(|label| label.cluster_id())
        .max()
        .map_or(0, |max| max + 1);

    let mut clusters: Vec<Cluster> = (0..count)
        .map(|id| Cluster {
            id,
            points: Vec::new(),
        })
        .collect();

    for (i, label) in labels.iter().enumerate() {
        if let Label::Cluster(id) = label {
            clusters[*id].points.push(i);
        }
    }

    // ids handed in from outside the engine may have gaps
    clusters.retain(|c| !c.points.is_empty());
    clusters
}
