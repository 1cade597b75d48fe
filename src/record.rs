//! Field-level parsing shared by every record type.

use crate::error::StoreError;

use chrono::{Datelike, NaiveDate};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A fixed-width row in one of the bundled reference files.
pub trait CsvRecord: Sized {
    /// Number of columns the header row must carry.
    const COLUMNS: usize;

    fn from_record(record: &StringRecord) -> Result<Self, StoreError>;
}

pub(crate) fn field<'a>(
    record: &'a StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, StoreError> {
    record
        .get(index)
        .ok_or_else(|| StoreError::parse(format!("missing {} column", name)))
}

/// Empty optional fields count as absent.
pub(crate) fn optional_field(record: &StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn parse_decimal(value: &str, name: &str) -> Result<Decimal, StoreError> {
    let value = value.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|e| StoreError::parse(format!("{} '{}' is not a number: {}", name, value, e)))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, StoreError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| StoreError::parse(format!("date '{}' is not ISO-8601: {}", value, e)))
}

/// Accepts `YYYY-MM` and full dates; the result is the first day of that month.
pub(crate) fn parse_year_month(value: &str) -> Result<NaiveDate, StoreError> {
    let value = value.trim();
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.with_day(1).unwrap_or(d))
        })
        .map_err(|e| StoreError::parse(format!("month '{}' is not YYYY-MM: {}", value, e)))
}

pub(crate) fn parse_bool(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
