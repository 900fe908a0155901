use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoding service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from geocoding service: {0}")]
    Decode(String),
}
