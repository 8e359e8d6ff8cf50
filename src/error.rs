use crate::cluster::InvalidParameter;

/// Everything that can go wrong between reading points and writing results
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),

    #[error("malformed input at record {record}: {reason}")]
    MalformedInput { record: usize, reason: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
