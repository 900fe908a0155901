// Public API exports
pub mod cli;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod runlog;

// Re-export main types for convenience
pub use config::RunConfig;
pub use error::{BatchFailure, PipelineError};

pub use records::{GeocodeResult, InputRecord, OutputRecord, REQUIRED_COLUMNS};

pub use geocoder::{
    Batch, Batcher, CensusField, GeocodingService, GeocodioClient, MAX_BATCH_SIZE, ServiceError,
};

pub use pipeline::{Pipeline, PipelineStage, RunSummary};

pub use output::AtomicJsonWriter;
pub use runlog::{FileSink, LogEntry, LogLevel, LogSink, MemorySink, RunLog};
