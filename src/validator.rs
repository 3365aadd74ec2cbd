//! Input validation for inference batches.
//!
//! Categorical domains are checked before encoding so a bad code is
//! rejected with field-specific guidance instead of silently encoding to
//! an all-zero indicator. Rows from the trusted training dataset are not
//! re-validated here.

use crate::error::{Error, Result};
use crate::types::FlightRecord;

const VALID_TIPOVUELO: [&str; 2] = ["N", "I"];

/// Validate a caller-supplied batch before it reaches the encoder.
pub fn validate_batch(records: &[FlightRecord]) -> Result<()> {
    for record in records {
        validate_record(record)?;
    }
    Ok(())
}

fn validate_record(record: &FlightRecord) -> Result<()> {
    if !(1..=12).contains(&record.mes) {
        return Err(Error::InvalidMonthValue(record.mes));
    }

    if !VALID_TIPOVUELO.contains(&record.tipovuelo.as_str()) {
        return Err(Error::InvalidTipoVuelo(record.tipovuelo.clone()));
    }

    Ok(())
}
