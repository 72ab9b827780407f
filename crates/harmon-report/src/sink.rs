//! Output sinks for canonical records.
//!
//! Sinks are streaming: each record is written as it arrives and nothing is
//! buffered beyond the underlying writer, so emitting a multi-million-row
//! source never materializes the dataset. Writes are idempotent per record
//! id against immediate retries; a retried row is skipped, giving
//! at-least-once delivery without double emission.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use harmon_model::{CanonicalRecord, RecordId};

use crate::error::Result;

/// Output column order. Matches the canonical record field order, with the
/// verbatim source row as compact JSON in the final column.
pub const OUTPUT_COLUMNS: &[&str] = &[
    "record_id",
    "category",
    "source_name",
    "timestamp",
    "amount",
    "duration_days",
    "text_payload",
    "status_code",
    "quality",
    "raw_fields",
];

/// A streaming destination for canonical records.
pub trait RecordSink {
    /// Write one record. Returns `false` when the record was recognized as
    /// an immediate retry of the previous write and skipped.
    fn write(&mut self, record: &CanonicalRecord) -> Result<bool>;

    /// Flush and finalize. Must be called once after the last record.
    fn finish(&mut self) -> Result<()>;
}

/// Delimited output, one record per row.
pub struct CsvSink {
    writer: csv::Writer<BufWriter<File>>,
    last_id: Option<RecordId>,
}

impl CsvSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        writer.write_record(OUTPUT_COLUMNS)?;
        Ok(Self {
            writer,
            last_id: None,
        })
    }
}

impl RecordSink for CsvSink {
    fn write(&mut self, record: &CanonicalRecord) -> Result<bool> {
        if self.last_id == Some(record.record_id) {
            return Ok(false);
        }
        let raw_json = serde_json::to_string(&record.raw_fields)?;
        self.writer.write_record([
            record.record_id.to_hex().as_str(),
            record.category.as_str(),
            record.source_name.as_str(),
            &record
                .timestamp
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            &record.amount.map(format_amount).unwrap_or_default(),
            &record
                .duration_days
                .map(|d| d.to_string())
                .unwrap_or_default(),
            record.text_payload.as_deref().unwrap_or_default(),
            record.status_code.as_deref().unwrap_or_default(),
            record.quality.as_str(),
            &raw_json,
        ])?;
        self.last_id = Some(record.record_id);
        Ok(true)
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// JSON Lines output, one record object per line.
pub struct JsonlSink {
    writer: BufWriter<File>,
    last_id: Option<RecordId>,
}

impl JsonlSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            last_id: None,
        })
    }
}

impl RecordSink for JsonlSink {
    fn write(&mut self, record: &CanonicalRecord) -> Result<bool> {
        if self.last_id == Some(record.record_id) {
            return Ok(false);
        }
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.last_id = Some(record.record_id);
        Ok(true)
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Amounts render without trailing zeros so `74.50` and `74.5` compare
/// equal across re-exports.
fn format_amount(value: f64) -> String {
    let s = format!("{value}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
