//! Reading badge entries from delimited text files.
//!
//! Each row is one badge: the first field is the name, the optional second
//! field the company. There is no header row, and fields past the second are
//! ignored.

use crate::config::DataConfig;
use crate::BadgeError;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// One attendee to make a badge for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub company: Option<String>,
}

impl Entry {
    pub fn new(name: impl Into<String>, company: Option<&str>) -> Entry {
        Entry {
            name: name.into(),
            company: company.map(str::to_string),
        }
    }

    fn from_record(record: &StringRecord) -> Option<Entry> {
        let name = record.get(0).map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return None;
        }
        let company = record
            .get(1)
            .map(str::trim)
            .filter(|company| !company.is_empty());
        Some(Entry::new(name, company))
    }
}

fn reader_builder(config: &DataConfig) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(config.delimiter as u8)
        .quote(config.quote as u8);
    builder
}

/// Read every usable entry from a file. A file that can't be opened is an error;
/// rows without a name, or that can't be decoded, are skipped with a warning.
pub fn read_entries<P: AsRef<Path>>(path: P, config: &DataConfig) -> Result<Vec<Entry>, BadgeError> {
    let path = path.as_ref();
    let reader = reader_builder(config)
        .from_path(path)
        .map_err(|source| BadgeError::DataSource {
            path: path.to_path_buf(),
            source,
        })?;
    let entries = collect_entries(reader)?;
    debug!("read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Read every usable entry from an already open source
pub fn read_entries_from_reader<R: Read>(reader: R, config: &DataConfig) -> Result<Vec<Entry>, BadgeError> {
    collect_entries(reader_builder(config).from_reader(reader))
}

fn collect_entries<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Entry>, BadgeError> {
    let mut entries = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!("skipping row {}: {e}", row + 1);
                continue;
            }
        };
        match Entry::from_record(&record) {
            Some(entry) => entries.push(entry),
            None => warn!("skipping row {}: no name", row + 1),
        }
    }
    Ok(entries)
}
