//! Time and season feature derivation for the training path.
//!
//! Pure functions over the raw departure timestamps: day-period bucketing,
//! the high-season flag, and the scheduled-vs-actual delay in minutes. The
//! delay label is derived from `get_min_diff` against [`DELAY_THRESHOLD_MINUTES`].

use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Timestamp format used across the dataset and the API
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A flight departing more than this many minutes late counts as delayed
pub const DELAY_THRESHOLD_MINUTES: f64 = 15.0;

/// Day period of a scheduled departure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodDay {
    Manana,
    Tarde,
    Noche,
}

impl PeriodDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodDay::Manana => "mañana",
            PeriodDay::Tarde => "tarde",
            PeriodDay::Noche => "noche",
        }
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| Error::MalformedTimestamp(value.to_string()))
}

/// Bucket a scheduled departure into morning, afternoon or night.
///
/// All bucket edges compare strictly, so a timestamp equal to an edge
/// (05:00:00, 12:00:00, 00:00:00, ...) falls into no bucket and returns
/// `None`. That mirrors the historical pipeline and is covered by tests;
/// widening the buckets would silently shift the derived training columns.
pub fn get_period_day(timestamp: &str) -> Result<Option<PeriodDay>> {
    let time = parse_timestamp(timestamp)?.time();

    let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).expect("static time");

    let period = if time > t(5, 0) && time < t(11, 59) {
        Some(PeriodDay::Manana)
    } else if time > t(12, 0) && time < t(18, 59) {
        Some(PeriodDay::Tarde)
    } else if (time > t(19, 0) && time < t(23, 59)) || (time > t(0, 0) && time < t(4, 59)) {
        Some(PeriodDay::Noche)
    } else {
        None
    };

    Ok(period)
}

/// Whether the departure date falls in a peak-travel range.
///
/// Ranges are closed on both ends, per calendar date of the record's own
/// year: Dec 15-31, Jan 1 - Mar 3, Jul 15-31, Sep 11-30.
pub fn is_high_season(timestamp: &str) -> Result<bool> {
    let date = parse_timestamp(timestamp)?.date();
    let year = date.year();

    let d = |m, day| NaiveDate::from_ymd_opt(year, m, day).expect("static date");

    let ranges = [
        (d(12, 15), d(12, 31)),
        (d(1, 1), d(3, 3)),
        (d(7, 15), d(7, 31)),
        (d(9, 11), d(9, 30)),
    ];

    Ok(ranges.iter().any(|(start, end)| date >= *start && date <= *end))
}

/// Difference between actual and scheduled departure in minutes, signed
/// (negative means the flight left early).
pub fn get_min_diff(scheduled: &str, actual: &str) -> Result<f64> {
    let scheduled = parse_timestamp(scheduled)?;
    let actual = parse_timestamp(actual)?;

    Ok((actual - scheduled).num_seconds() as f64 / 60.0)
}
