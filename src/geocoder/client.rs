// client.rs - the Geocodio HTTP geocoder
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{ApiErrorBody, BatchResponse, CensusField};
use super::{GeocodingService, ServiceError};
use crate::records::GeocodeResult;

pub const DEFAULT_ENDPOINT: &str = "https://api.geocod.io/v1.7";

pub struct GeocodioClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl GeocodioClient {
    /// Client against the public Geocodio API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key)
    }

    /// Client against any Geocodio-compatible base URL.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        // Batches of 10k addresses can take minutes; no timeout unless asked for.
        let http = Client::builder().timeout(None).build()?;
        Ok(Self::from_parts(http, endpoint.into(), api_key.into()))
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::from_parts(http, endpoint.into(), api_key.into()))
    }

    fn from_parts(http: Client, endpoint: String, api_key: String) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GeocodingService for GeocodioClient {
    fn resolve(
        &self,
        addresses: &[String],
        fields: &[CensusField],
    ) -> Result<Vec<GeocodeResult>, ServiceError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        let fields = fields
            .iter()
            .map(CensusField::as_str)
            .collect::<Vec<_>>()
            .join(",");

        debug!(count = addresses.len(), %fields, "submitting batch");
        let response = self
            .http
            .post(format!("{}/geocode", self.endpoint))
            .query(&[("api_key", self.api_key.as_str()), ("fields", fields.as_str())])
            .json(addresses)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: BatchResponse = response
            .json()
            .map_err(|e| ServiceError::Decode(e.to_string()))?;

        Ok(body
            .results
            .into_iter()
            .map(|item| {
                if let Some(error) = &item.response.error {
                    warn!(query = item.query.as_deref().unwrap_or(""), %error, "address not geocoded");
                }
                item.response.into_result()
            })
            .collect())
    }
}
