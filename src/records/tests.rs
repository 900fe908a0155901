use super::*;
use crate::error::PipelineError;
use csv::StringRecord;
use serde_json::{Value, json};

fn make_record(address: &str, city: &str, state: &str, zip: &str) -> InputRecord {
    InputRecord {
        fid: json!(1),
        id: json!("A-1"),
        address: address.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip: zip.to_string(),
    }
}

#[test]
fn test_composite_address_format() {
    let record = make_record("1 Main St", "Springfield", "IL", "62701");
    assert_eq!(
        record.composite_address(),
        "1 Main St, Springfield, IL 62701"
    );
}

#[test]
fn test_composite_address_no_trimming() {
    let record = make_record(" 5 Elm ", "boston", "ma", "02134");
    assert_eq!(record.composite_address(), " 5 Elm , boston, ma 02134");
}

#[test]
fn test_validate_headers_maps_positions() {
    let headers = StringRecord::from(vec!["zip", "extra", "state", "city", "address", "ID", "FID"]);
    let columns = validate_headers(&headers).unwrap();
    assert_eq!(columns.fid, 6);
    assert_eq!(columns.id, 5);
    assert_eq!(columns.address, 4);
    assert_eq!(columns.city, 3);
    assert_eq!(columns.state, 2);
    assert_eq!(columns.zip, 0);
}

#[test]
fn test_validate_headers_each_missing_column() {
    for missing in REQUIRED_COLUMNS {
        let headers: StringRecord = REQUIRED_COLUMNS
            .iter()
            .filter(|c| **c != missing)
            .collect();

        match validate_headers(&headers) {
            Err(PipelineError::MissingColumn { column }) => assert_eq!(column, missing),
            other => panic!("expected MissingColumn({}), got {:?}", missing, other),
        }
    }
}

#[test]
fn test_validate_headers_reports_first_in_declared_order() {
    // Both `zip` and `address` are absent; `address` is declared first.
    let headers = StringRecord::from(vec!["FID", "ID", "city", "state"]);
    match validate_headers(&headers) {
        Err(PipelineError::MissingColumn { column }) => assert_eq!(column, "address"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_validate_headers_is_case_sensitive() {
    let headers = StringRecord::from(vec!["fid", "ID", "address", "city", "state", "zip"]);
    assert!(matches!(
        validate_headers(&headers),
        Err(PipelineError::MissingColumn { column: "FID" })
    ));
}

#[test]
fn test_read_records_preserves_order_and_values() {
    let csv = "FID,ID,address,city,state,zip,notes\n\
               1,100,1 Main St,Springfield,IL,62701,first\n\
               2,X-7,9 Oak Ave,Boston,MA,02134,second\n";

    let records = read_records(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].fid, json!(1));
    assert_eq!(records[0].id, json!("100"), "ID column mixes numbers and text");
    assert_eq!(records[0].zip, "62701");

    assert_eq!(records[1].fid, json!(2));
    assert_eq!(records[1].id, json!("X-7"));
    assert_eq!(records[1].address, "9 Oak Ave");
    assert_eq!(records[1].zip, "02134", "leading zero must survive");
}

#[test]
fn test_read_records_quoted_address_with_comma() {
    let csv = "FID,ID,address,city,state,zip\n\
               1,1,\"Apt 4, 12 High St\",Albany,NY,12207\n";

    let records = read_records(csv.as_bytes()).unwrap();
    assert_eq!(
        records[0].composite_address(),
        "Apt 4, 12 High St, Albany, NY 12207"
    );
}

#[test]
fn test_read_records_missing_column_fails() {
    let csv = "FID,ID,address,city,zip\n1,1,1 Main St,Springfield,62701\n";
    assert!(matches!(
        read_records(csv.as_bytes()),
        Err(PipelineError::MissingColumn { column: "state" })
    ));
}

#[test]
fn test_read_records_empty_cell_is_malformed() {
    let csv = "FID,ID,address,city,state,zip\n\
               1,1,1 Main St,Springfield,IL,62701\n\
               2,2,2 Main St,Springfield,IL,\n";

    match read_records(csv.as_bytes()) {
        Err(PipelineError::MalformedRow { row, reason }) => {
            assert_eq!(row, 2);
            assert!(reason.contains("zip"));
        }
        other => panic!("expected MalformedRow, got {:?}", other),
    }
}

#[test]
fn test_read_records_ragged_row_is_malformed() {
    let csv = "FID,ID,address,city,state,zip\n1,1,1 Main St,Springfield\n";
    assert!(matches!(
        read_records(csv.as_bytes()),
        Err(PipelineError::MalformedRow { row: 1, .. })
    ));
}

#[test]
fn test_read_records_header_only() {
    let csv = "FID,ID,address,city,state,zip\n";
    assert!(read_records(csv.as_bytes()).unwrap().is_empty());
}

#[test]
fn test_read_records_from_missing_path() {
    let result = read_records_from_path(std::path::Path::new("/nonexistent/input.csv"));
    assert!(matches!(result, Err(PipelineError::InputRead { .. })));
}

#[test]
fn test_identifier_number_requires_exact_rendering() {
    assert_eq!(identifier_number("42"), Some(json!(42)));
    assert_eq!(identifier_number("-3"), Some(json!(-3)));
    assert_eq!(identifier_number("2.5"), Some(json!(2.5)));
    assert_eq!(
        identifier_number("12345678901234567891"),
        Some(json!(12345678901234567891u64))
    );
    assert_eq!(identifier_number("99999999999999999999"), None);
    assert_eq!(identifier_number("007"), None);
    assert_eq!(identifier_number("1e5"), None);
    assert_eq!(identifier_number("2.50"), None);
    assert_eq!(identifier_number("abc"), None);
    assert_eq!(identifier_number("NaN"), None);
}

#[test]
fn test_read_records_keeps_large_identifier_digits() {
    let csv = "FID,ID,address,city,state,zip\n\
               12345678901234567891,99999999999999999999,1 Main St,Springfield,IL,62701\n";

    let records = read_records(csv.as_bytes()).unwrap();
    let out = OutputRecord::merge(&records[0], GeocodeResult::default());
    let json = serde_json::to_string(&out).unwrap();

    assert!(json.starts_with(r#"{"FID":12345678901234567891,"ID":"99999999999999999999","#));
}

#[test]
fn test_identifier_columns_have_one_type() {
    let csv = "FID,ID,address,city,state,zip\n\
               1,100,1 Main St,Springfield,IL,62701\n\
               2,X-7,9 Oak Ave,Boston,MA,02134\n\
               3,007,4 Elm St,Boston,MA,02134\n";

    let records = read_records(csv.as_bytes()).unwrap();
    let fids: Vec<&Value> = records.iter().map(|r| &r.fid).collect();
    let ids: Vec<&Value> = records.iter().map(|r| &r.id).collect();

    assert_eq!(fids, vec![&json!(1), &json!(2), &json!(3)]);
    assert_eq!(ids, vec![&json!("100"), &json!("X-7"), &json!("007")]);
}

#[test]
fn test_merge_copies_input_and_result() {
    let input = make_record("1 Main St", "Springfield", "IL", "62701");
    let result = GeocodeResult {
        formatted_address: Some("1 Main St, Springfield, IL 62701".into()),
        latitude: Some(39.8),
        longitude: Some(-89.6),
        accuracy: Some(0.9),
        ..Default::default()
    };

    let out = OutputRecord::merge(&input, result);
    assert_eq!(out.fid, input.fid);
    assert_eq!(out.zip, "62701");
    assert_eq!(out.latitude, Some(39.8));
    assert_eq!(out.longitude, Some(-89.6));
    assert!(out.census2010.is_empty());
}

#[test]
fn test_output_record_serializes_all_keys() {
    let input = make_record("1 Main St", "Springfield", "IL", "62701");
    let out = OutputRecord::merge(&input, GeocodeResult::default());
    let value = serde_json::to_value(&out).unwrap();
    let object = value.as_object().unwrap();

    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "FID",
            "ID",
            "address",
            "city",
            "state",
            "zip",
            "geocoded_address",
            "latitude",
            "longitude",
            "accuracy",
            "census2000",
            "census2010",
            "census2020",
        ]
    );
    assert_eq!(object["accuracy"], Value::Null);
    assert_eq!(object["census2020"], json!({}));
}
