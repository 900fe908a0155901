// the Geocodio batch contract
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::records::GeocodeResult;

/// Optional census field groups requested alongside each lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CensusField {
    Census2000,
    Census2010,
    Census2020,
}

impl CensusField {
    pub const ALL: [CensusField; 3] = [
        CensusField::Census2000,
        CensusField::Census2010,
        CensusField::Census2020,
    ];

    /// Name used in the `fields` query parameter and in the output document.
    pub fn as_str(&self) -> &'static str {
        match self {
            CensusField::Census2000 => "census2000",
            CensusField::Census2010 => "census2010",
            CensusField::Census2020 => "census2020",
        }
    }

    pub fn year(&self) -> &'static str {
        match self {
            CensusField::Census2000 => "2000",
            CensusField::Census2010 => "2010",
            CensusField::Census2020 => "2020",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Deserialize)]
pub struct BatchItem {
    #[serde(default)]
    pub query: Option<String>,
    pub response: ItemResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemResponse {
    #[serde(default)]
    pub results: Vec<Candidate>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub formatted_address: String,
    pub location: Location,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ItemResponse {
    /// Take the best-ranked candidate; an item with none becomes an unmatched result.
    pub fn into_result(self) -> GeocodeResult {
        let Some(best) = self.results.into_iter().next() else {
            return GeocodeResult::default();
        };

        GeocodeResult {
            census2000: census_block(&best.fields, CensusField::Census2000),
            census2010: census_block(&best.fields, CensusField::Census2010),
            census2020: census_block(&best.fields, CensusField::Census2020),
            formatted_address: Some(best.formatted_address),
            latitude: Some(best.location.lat),
            longitude: Some(best.location.lng),
            accuracy: best.accuracy,
        }
    }
}

/// Census data is keyed `censusYYYY` in older API versions and nested under
/// `census.YYYY` in newer ones. Anything else yields an empty block.
fn census_block(fields: &Map<String, Value>, field: CensusField) -> Map<String, Value> {
    fields
        .get(field.as_str())
        .or_else(|| fields.get("census").and_then(|c| c.get(field.year())))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
