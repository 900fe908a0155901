mod merger;


pub use merger::merge_batch;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{BatchFailure, PipelineError};
use crate::geocoder::{Batch, Batcher, CensusField, GeocodingService, MAX_BATCH_SIZE};
use crate::output::AtomicJsonWriter;
use crate::records::{GeocodeResult, InputRecord, OutputRecord, read_records_from_path};
use crate::runlog::RunLog;

/// Where a run currently is. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Validating,
    Composing,
    Dispatching { batch: usize, of: usize },
    Merging,
    Serializing,
    Done,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Idle => write!(f, "idle"),
            PipelineStage::Validating => write!(f, "validating"),
            PipelineStage::Composing => write!(f, "composing"),
            PipelineStage::Dispatching { batch, of } => write!(f, "dispatching {}/{}", batch, of),
            PipelineStage::Merging => write!(f, "merging"),
            PipelineStage::Serializing => write!(f, "serializing"),
            PipelineStage::Done => write!(f, "done"),
            PipelineStage::Failed => write!(f, "failed"),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub records: usize,
    pub batches: usize,
    pub unmatched: usize,
    pub output: PathBuf,
}

/// Batch geocoding pipeline: read, validate, dispatch in order, merge, write once.
pub struct Pipeline<S> {
    service: S,
    log: RunLog,
    batcher: Batcher,
    stage: PipelineStage,
}

impl<S: GeocodingService> Pipeline<S> {
    pub fn new(service: S, log: RunLog) -> Self {
        Self {
            service,
            log,
            batcher: Batcher::new(MAX_BATCH_SIZE),
            stage: PipelineStage::Idle,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Geocode `input` and write the enriched records to `output`.
    ///
    /// Nothing is written unless every batch succeeds.
    pub fn run(&mut self, input: &Path, output: &Path) -> Result<RunSummary, PipelineError> {
        self.log
            .info(format!("Starting geocoding for file: {}", input.display()));

        match self.execute(input, output) {
            Ok(summary) => {
                self.stage = PipelineStage::Done;
                self.log.info(format!(
                    "Geocoding complete. {} records in {} batches ({} unmatched). Results saved to {}",
                    summary.records,
                    summary.batches,
                    summary.unmatched,
                    summary.output.display()
                ));
                Ok(summary)
            }
            Err(e) => {
                self.stage = PipelineStage::Failed;
                self.log.error(format!("Failed to process geocoding: {}", e));
                Err(e)
            }
        }
    }

    fn execute(&mut self, input: &Path, output: &Path) -> Result<RunSummary, PipelineError> {
        self.stage = PipelineStage::Validating;
        let records = read_records_from_path(input).inspect_err(|e| {
            if let PipelineError::MissingColumn { column } = e {
                self.log.error(format!("Missing column: {}", column));
            }
        })?;
        self.log.info(format!("Read {} records", records.len()));

        let enriched = self.geocode(&records)?;
        let unmatched = enriched.iter().filter(|r| r.latitude.is_none()).count();

        self.stage = PipelineStage::Serializing;
        let path = AtomicJsonWriter::new(output)
            .and_then(|writer| writer.commit(&enriched))
            .map_err(|source| PipelineError::Serialization {
                path: output.to_path_buf(),
                source,
            })?;

        Ok(RunSummary {
            records: enriched.len(),
            batches: self.batcher.batch_count(records.len()),
            unmatched,
            output: path,
        })
    }

    /// Resolve already-validated records, returning one output per input in order.
    ///
    /// Stops at the first failing batch; later batches are never sent and the
    /// stage becomes `Failed`.
    pub fn geocode(&mut self, records: &[InputRecord]) -> Result<Vec<OutputRecord>, PipelineError> {
        let result = self.geocode_batches(records);
        if result.is_err() {
            self.stage = PipelineStage::Failed;
        }
        result
    }

    fn geocode_batches(
        &mut self,
        records: &[InputRecord],
    ) -> Result<Vec<OutputRecord>, PipelineError> {
        self.stage = PipelineStage::Composing;
        let addresses: Vec<String> = records.iter().map(InputRecord::composite_address).collect();

        let total = self.batcher.batch_count(addresses.len());
        let mut resolved = Vec::with_capacity(total);
        for batch in self.batcher.batches(&addresses) {
            self.stage = PipelineStage::Dispatching {
                batch: batch.number,
                of: total,
            };
            resolved.push(self.dispatch(&batch)?);
        }

        self.stage = PipelineStage::Merging;
        let mut merged = Vec::with_capacity(records.len());
        for (batch, results) in self.batcher.batches(records).zip(resolved) {
            let outputs = merge_batch(batch.items, results)
                .map_err(|cause| batch_error(&batch, cause))?;
            merged.extend(outputs);
        }

        Ok(merged)
    }

    fn dispatch(&mut self, batch: &Batch<'_, String>) -> Result<Vec<GeocodeResult>, PipelineError> {
        let range = format!(
            "batch {} (records {} to {})",
            batch.number,
            batch.first_record(),
            batch.last_record()
        );
        self.log.info(format!("Processing {}", range));

        let outcome = self
            .service
            .resolve(batch.items, &CensusField::ALL)
            .map_err(BatchFailure::from)
            .and_then(|results| {
                if results.len() == batch.len() {
                    Ok(results)
                } else {
                    Err(BatchFailure::CountMismatch {
                        expected: batch.len(),
                        received: results.len(),
                    })
                }
            });

        match outcome {
            Ok(results) => {
                let unmatched = results.iter().filter(|r| !r.is_match()).count();
                if unmatched > 0 {
                    self.log
                        .warn(format!("{} addresses in {} had no match", unmatched, range));
                }
                self.log.info(format!("Successfully geocoded {}", range));
                Ok(results)
            }
            Err(cause) => {
                self.log
                    .error(format!("Error during geocoding {}: {}", range, cause));
                Err(batch_error(batch, cause))
            }
        }
    }
}

fn batch_error<T>(batch: &Batch<'_, T>, cause: BatchFailure) -> PipelineError {
    PipelineError::GeocodingService {
        batch: batch.number,
        first_record: batch.first_record(),
        last_record: batch.last_record(),
        cause,
    }
}
