use serde::Serialize;
use serde_json::{Map, Value};

/// One row of the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    /// Pass-through identifier; numeric cells stay numeric.
    pub fid: Value,
    pub id: Value,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Kept verbatim so leading zeros survive.
    pub zip: String,
}

impl InputRecord {
    /// The single-line query sent to the geocoder: `"{address}, {city}, {state} {zip}"`.
    pub fn composite_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip
        )
    }
}

/// Best match for one submitted address, or an unmatched placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub census2000: Map<String, Value>,
    pub census2010: Map<String, Value>,
    pub census2020: Map<String, Value>,
}

impl GeocodeResult {
    pub fn is_match(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// One element of the output array. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "FID")]
    pub fid: Value,
    #[serde(rename = "ID")]
    pub id: Value,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub geocoded_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub census2000: Map<String, Value>,
    pub census2010: Map<String, Value>,
    pub census2020: Map<String, Value>,
}

impl OutputRecord {
    /// Merge an input row with the result correlated to it.
    pub fn merge(input: &InputRecord, result: GeocodeResult) -> Self {
        Self {
            fid: input.fid.clone(),
            id: input.id.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            zip: input.zip.clone(),
            geocoded_address: result.formatted_address,
            latitude: result.latitude,
            longitude: result.longitude,
            accuracy: result.accuracy,
            census2000: result.census2000,
            census2010: result.census2010,
            census2020: result.census2020,
        }
    }
}
