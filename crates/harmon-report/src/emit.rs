use tracing::info;

use harmon_model::CanonicalRecord;

use crate::error::Result;
use crate::sink::RecordSink;

/// Stream a lazy sequence of records into a sink.
///
/// Consumes the iterator one record at a time and returns the count the
/// sink actually wrote; retried records the sink skipped are not counted.
/// The sink is finalized even when the sequence is empty.
pub fn emit<I, S>(records: I, sink: &mut S) -> Result<usize>
where
    I: Iterator<Item = CanonicalRecord>,
    S: RecordSink + ?Sized,
{
    let mut written = 0usize;
    for record in records {
        if sink.write(&record)? {
            written += 1;
        }
    }
    sink.finish()?;
    info!(written, "emission complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use harmon_model::{Category, Quality, RecordId, SourceName};

    use super::*;
    use crate::sink::JsonlSink;

    #[test]
    fn emit_counts_written_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.jsonl");
        let mut sink = JsonlSink::create(&path).expect("create sink");
        let records = (0..3).map(|i| CanonicalRecord {
            record_id: RecordId::from_natural_key(SourceName::GsaCalc, &[&i.to_string(), "c"]),
            category: Category::ScheduleLineItem,
            source_name: SourceName::GsaCalc,
            timestamp: None,
            amount: Some(50.0),
            duration_days: None,
            text_payload: None,
            status_code: None,
            quality: Quality::Complete,
            raw_fields: BTreeMap::new(),
        });
        let written = emit(records, &mut sink).expect("emit");
        assert_eq!(written, 3);
    }

    #[test]
    fn skipped_retries_are_not_counted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.jsonl");
        let mut sink = JsonlSink::create(&path).expect("create sink");
        let rec = CanonicalRecord {
            record_id: RecordId::from_natural_key(SourceName::Nycha, &["123"]),
            category: Category::LaborLog,
            source_name: SourceName::Nycha,
            timestamp: None,
            amount: None,
            duration_days: None,
            text_payload: None,
            status_code: None,
            quality: Quality::Incomplete,
            raw_fields: BTreeMap::new(),
        };
        let written = emit([rec.clone(), rec].into_iter(), &mut sink).expect("emit");
        assert_eq!(written, 1);
        let content = std::fs::read_to_string(&path).expect("read output");
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn empty_sequence_still_finalizes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.jsonl");
        let mut sink = JsonlSink::create(&path).expect("create sink");
        let written = emit(std::iter::empty(), &mut sink).expect("emit");
        assert_eq!(written, 0);
        assert!(path.exists());
    }
}
