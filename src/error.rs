use thiserror::Error;

/// Failures while materializing a [`crate::Dataset`] from its JSON source.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed dataset document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of an aggregate query. Lookups that find nothing are not errors
/// (they return empty collections or `None`); only aggregates over zero
/// qualifying records end up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("dataset contains no movies")]
    EmptyDataset,
    #[error("movie {movie_id} has no ratings")]
    NoRatings { movie_id: i32 },
}
