use std::fmt;
use std::path::PathBuf;

use crate::geocoder::DEFAULT_ENDPOINT;

pub const DEFAULT_LOG_FILE: &str = "geocoding_log.log";

/// Everything a run needs. Built once by the binary and handed down.
#[derive(Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub api_key: String,
    pub api_url: String,
    pub log_file: PathBuf,
}

impl RunConfig {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            api_key: api_key.into(),
            api_url: DEFAULT_ENDPOINT.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

// The API key never reaches logs or panic messages.
impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("log_file", &self.log_file)
            .finish()
    }
}
