//! Explicit parameters for one clustering run and one rendered map

use crate::cluster::{EARTH_RADIUS_KM, IndexStrategy, InvalidParameter, Label, Point, epsilon_from_km};

/// Parameters of one DBSCAN run
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Neighbourhood radius in kilometers
    pub distance_km: f64,
    /// Minimum neighbourhood size, the point itself included
    pub min_points: usize,
    pub earth_radius_km: f64,
    pub strategy: IndexStrategy,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            distance_km: 50.0,
            min_points: 2,
            earth_radius_km: EARTH_RADIUS_KM,
            strategy: IndexStrategy::Auto,
        }
    }
}

impl ClusterConfig {
    /// Angular neighbourhood radius in radians
    pub fn epsilon(&self) -> Result<f64, InvalidParameter> {
        epsilon_from_km(self.distance_km, self.earth_radius_km)
    }
}

/// Colors assigned to cluster labels on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
    noise: String,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = ["red", "blue", "green", "purple", "orange", "darkred", "cadetblue"];
        Palette {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            noise: "black".to_string(),
        }
    }
}

impl Palette {
    /// Creates a palette cycling through `colors`, with a separate noise color
    pub fn new(colors: Vec<String>, noise: String) -> Result<Self, InvalidParameter> {
        if colors.is_empty() {
            return Err(InvalidParameter::EmptyPalette);
        }
        Ok(Palette { colors, noise })
    }

    pub fn with_noise_color(mut self, noise: String) -> Self {
        self.noise = noise;
        self
    }

    pub fn color(&self, label: Label) -> &str {
        match label {
            Label::Cluster(id) => &self.colors[id % self.colors.len()],
            Label::Noise => &self.noise,
        }
    }
}

/// Map viewport and colors
#[derive(Debug, Clone, PartialEq)]
pub struct MapStyle {
    pub center: Point,
    pub zoom: u8,
    pub palette: Palette,
    pub marker_radius: u32,
    pub fill_opacity: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        MapStyle {
            center: Point::new(20.5937, 78.9629),
            zoom: 5,
            palette: Palette::default(),
            marker_radius: 8,
            fill_opacity: 0.7,
        }
    }
}
