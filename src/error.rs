use std::path::PathBuf;
use thiserror::Error;

use crate::geocoder::ServiceError;

/// Every way a geocoding run can fail. All variants are fatal to the run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input CSV must contain the '{column}' column")]
    MissingColumn { column: &'static str },

    #[error("Malformed input row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Failed to read input {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Geocoding failed for batch {batch} (records {first_record} to {last_record}): {cause}")]
    GeocodingService {
        batch: usize,
        first_record: usize,
        last_record: usize,
        #[source]
        cause: BatchFailure,
    },

    #[error("Failed to write output {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single dispatched batch was rejected.
#[derive(Error, Debug)]
pub enum BatchFailure {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("service returned {received} results for {expected} addresses")]
    CountMismatch { expected: usize, received: usize },
}
