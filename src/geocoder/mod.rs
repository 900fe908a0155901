pub mod batcher;
pub mod client;
pub mod error;
pub mod types;


pub use batcher::{Batch, Batcher};
pub use client::{DEFAULT_ENDPOINT, GeocodioClient};
pub use error::ServiceError;
pub use types::CensusField;

use crate::records::GeocodeResult;

/// Per-request address limit of the Geocodio batch endpoint.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Anything that can resolve a batch of single-line addresses.
///
/// Implementations must return one result per address, in submission order.
/// Callers verify the count; order is trusted.
pub trait GeocodingService {
    fn resolve(
        &self,
        addresses: &[String],
        fields: &[CensusField],
    ) -> Result<Vec<GeocodeResult>, ServiceError>;
}

impl<S: GeocodingService + ?Sized> GeocodingService for &S {
    fn resolve(
        &self,
        addresses: &[String],
        fields: &[CensusField],
    ) -> Result<Vec<GeocodeResult>, ServiceError> {
        (**self).resolve(addresses, fields)
    }
}
