//! Error types for the flight delay prediction service

use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Closed set of failures the service can surface.
///
/// Validation variants carry field-specific guidance and are mapped to 400
/// responses at the HTTP boundary; everything else collapses to a generic
/// 500 so internal detail never reaches the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Request or dataset rows do not match the expected shape
    #[error("invalid input data: {0}")]
    MalformedInput(String),

    /// MES outside the [1, 12] domain
    #[error("MES must be between 1 and 12, got {0}")]
    InvalidMonthValue(i32),

    /// TIPOVUELO outside the {"N", "I"} domain
    #[error("TIPOVUELO must be 'N' or 'I', got {0:?}")]
    InvalidTipoVuelo(String),

    /// Timestamp missing or not in `YYYY-MM-DD HH:MM:SS` form
    #[error("malformed timestamp {0:?}")]
    MalformedTimestamp(String),

    /// Predict called before the classifier was fit
    #[error("model has not been trained")]
    ModelNotTrained,

    /// Training set has no positive (or no negative) examples, so the
    /// class-balance scale cannot be formed
    #[error("degenerate training set: {0}")]
    DegenerateTrainingSet(String),

    /// Saving or loading the persisted model artifact failed
    #[error("model artifact error: {0}")]
    ModelStore(String),

    /// Anything unanticipated
    #[error("error processing request: {0}")]
    Processing(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Processing(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::MalformedInput(e.to_string())
    }
}
