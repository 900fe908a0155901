mod sink;


pub use sink::{FileSink, LogSink, MemorySink};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// One timestamped line of the run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub run_id: Uuid,
    pub message: String,
}

/// Append-only log of a single geocoding run.
///
/// Handed to the pipeline at construction; every entry goes to the sink and
/// is mirrored to `tracing`. Sink failures are reported but never abort a run.
pub struct RunLog {
    run_id: Uuid,
    sink: Box<dyn LogSink>,
}

impl RunLog {
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            sink: Box::new(sink),
        }
    }

    /// Log appended to a JSON-lines file, created if missing.
    pub fn to_file(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(FileSink::open(path)?))
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(LogLevel::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(LogLevel::Warn, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(LogLevel::Error, message.into());
    }

    fn record(&mut self, level: LogLevel, message: String) {
        match level {
            LogLevel::Info => tracing::info!(run_id = %self.run_id, "{}", message),
            LogLevel::Warn => tracing::warn!(run_id = %self.run_id, "{}", message),
            LogLevel::Error => tracing::error!(run_id = %self.run_id, "{}", message),
        }

        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            run_id: self.run_id,
            message,
        };
        if let Err(e) = self.sink.append(&entry) {
            tracing::warn!(error = %e, "failed to write run log entry");
        }
    }
}
