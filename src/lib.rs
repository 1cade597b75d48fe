pub mod account;
pub mod config;
pub mod error;
pub mod record;
pub mod spending;
pub mod store;
pub mod transaction;

use crate::error::StoreError;
use crate::record::{optional_field, CsvRecord};
use crate::transaction::{Transaction, ID_FIELDS, MIN_FIELDS};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::io::Read;
use tracing::warn;

/// Parses a transaction file, header included.
///
/// Rows shorter than six fields are dropped without comment; rows that fail
/// to parse are logged and dropped. Neither stops the rows after them.
pub fn parse_transactions<R: Read>(reader: R) -> Vec<Transaction> {
    let rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    rdr.into_records()
        .filter_map(|result| match result {
            Ok(record) if record.len() < MIN_FIELDS => None,
            Ok(record) => match Transaction::try_from(&record) {
                Ok(tx) => Some(tx),
                Err(e) => {
                    warn!(line = line_of(&record), "Skipping invalid transaction row: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Skipping unreadable transaction row: {}", e);
                None
            }
        })
        .collect()
}

/// Parses a bundled reference file.
///
/// The header must carry exactly `T::COLUMNS` columns, otherwise nothing is
/// parsed. Past the header, bad rows are logged and skipped.
pub fn parse_snapshots<T: CsvRecord, R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<T>, StoreError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let found = rdr.headers()?.len();
    if found != T::COLUMNS {
        return Err(StoreError::SchemaMismatch {
            file: source.to_string(),
            expected: T::COLUMNS,
            found,
        });
    }

    Ok(rdr
        .into_records()
        .filter_map(|result| {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(file = source, "Skipping unreadable row: {}", e);
                    return None;
                }
            };
            match T::from_record(&record) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(file = source, line = line_of(&record), "Skipping invalid row: {}", e);
                    None
                }
            }
        })
        .collect())
}

/// Encodes one row with every field quoted and inner quotes doubled.
pub fn encode_row(record: &StringRecord) -> Result<Vec<u8>, StoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(record)?;
    writer
        .into_inner()
        .map_err(|e| StoreError::parse(format!("failed to encode row: {}", e)))
}

/// The id column of a single stored line, read the same way `parse_transactions` reads it.
/// Lines too short to carry an id, or with a blank id, have none.
pub fn row_id(line: &str) -> Option<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let record = rdr.records().next()?.ok()?;
    optional_field(&record, ID_FIELDS - 1)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}
