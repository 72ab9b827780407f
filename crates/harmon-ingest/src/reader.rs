//! Streaming CSV row reader.
//!
//! Reads one row at a time so peak memory stays O(1) rows regardless of
//! input size; the NYCHA export alone runs to millions of rows, so the
//! pipeline never materializes a whole file.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{IngestError, Result};

/// One source row: the 1-based data line number and the column-to-value map
/// exactly as read. Short rows leave trailing columns absent rather than
/// blank-filled.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub line: u64,
    pub fields: BTreeMap<String, String>,
}

/// Reader options. The portals all ship comma-delimited exports, but the
/// delimiter is configurable for local re-exports.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub delimiter: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// A lazy iterator over the rows of one delimited file.
pub struct RowStream {
    path: PathBuf,
    headers: Vec<String>,
    reader: Reader<File>,
    line: u64,
}

impl RowStream {
    /// Open a delimited file for streaming.
    ///
    /// Fails with [`IngestError::Open`] when the file is missing or
    /// unreadable, and [`IngestError::EmptyHeader`] when the header row is
    /// absent.
    pub fn open(path: impl AsRef<Path>, options: &ReaderOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| IngestError::Open {
            path: path.clone(),
            source,
        })?;
        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .from_reader(file);
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(IngestError::EmptyHeader { path });
        }
        debug!(path = %path.display(), columns = headers.len(), "opened input");
        Ok(Self {
            path,
            headers,
            reader,
            line: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn row_from_record(&self, record: &StringRecord) -> RawRow {
        let mut fields = BTreeMap::new();
        for (idx, header) in self.headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = record.get(idx) {
                fields.insert(header.clone(), value.to_string());
            }
        }
        RawRow {
            line: self.line,
            fields,
        }
    }
}

impl Iterator for RowStream {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => {
                self.line += 1;
                Some(Ok(self.row_from_record(&record)))
            }
            Ok(false) => None,
            Err(error) => Some(Err(IngestError::Csv(error))),
        }
    }
}
