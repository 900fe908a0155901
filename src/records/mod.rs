mod reader;
mod types;

#[cfg(test)]
mod tests;

pub use reader::{
    ColumnMap, identifier_number, read_records, read_records_from_path, validate_headers,
};
pub use types::{GeocodeResult, InputRecord, OutputRecord};

/// Columns every input file must carry, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 6] = ["FID", "ID", "address", "city", "state", "zip"];
