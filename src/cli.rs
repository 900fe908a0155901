use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_LOG_FILE, RunConfig};
use crate::geocoder::DEFAULT_ENDPOINT;

#[derive(Parser, Debug)]
#[command(
    name = "geobatch",
    version,
    about = "Batch geocode a CSV of addresses with census data"
)]
pub struct Cli {
    #[arg(help = "CSV with FID, ID, address, city, state and zip columns")]
    pub input: PathBuf,
    #[arg(help = "Where to write the JSON results")]
    pub output: PathBuf,
    #[arg(long, env = "GEOCODIO_API_KEY", hide_env_values = true)]
    pub api_key: String,
    #[arg(long, env = "GEOCODIO_API_URL", default_value = DEFAULT_ENDPOINT)]
    pub api_url: String,
    #[arg(long, env = "GEOBATCH_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            input: self.input,
            output: self.output,
            api_key: self.api_key,
            api_url: self.api_url,
            log_file: self.log_file,
        }
    }
}
