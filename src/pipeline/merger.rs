use crate::error::BatchFailure;
use crate::records::{GeocodeResult, InputRecord, OutputRecord};

/// Pair each input row of a batch with the result at the same position.
///
/// Fails without merging anything if the counts differ, since positional
/// correlation would otherwise attach coordinates to the wrong rows.
pub fn merge_batch(
    inputs: &[InputRecord],
    results: Vec<GeocodeResult>,
) -> Result<Vec<OutputRecord>, BatchFailure> {
    if inputs.len() != results.len() {
        return Err(BatchFailure::CountMismatch {
            expected: inputs.len(),
            received: results.len(),
        });
    }

    Ok(inputs
        .iter()
        .zip(results)
        .map(|(input, result)| OutputRecord::merge(input, result))
        .collect())
}
