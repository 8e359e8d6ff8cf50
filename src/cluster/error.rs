use thiserror::Error;

/// A clustering parameter or input value the engine refuses to work with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameter {
    #[error("distance must be a positive number of kilometers, got {0}")]
    Distance(f64),

    #[error("earth radius must be a positive number of kilometers, got {0}")]
    EarthRadius(f64),

    #[error("epsilon must be a positive angle in radians, got {0}")]
    Epsilon(f64),

    #[error("min_points must be at least 1, got {0}")]
    MinPoints(usize),

    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("color palette must contain at least one color")]
    EmptyPalette,

    #[error("map center must be LAT,LON with latitude in [-90, 90] and longitude in [-180, 180], got {0:?}")]
    MapCenter(Vec<f64>),
}
