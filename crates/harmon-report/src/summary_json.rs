use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use harmon_model::RunSummary;

use crate::error::Result;

/// Write the machine-readable run summary.
///
/// Produced unconditionally when requested, including after partial
/// failure, so operators can always account for every row read.
pub fn write_summary_json(path: impl AsRef<Path>, summary: &RunSummary) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use harmon_model::SourceName;

    use super::*;

    #[test]
    fn summary_json_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("summary.json");
        let mut summary = RunSummary::for_source(SourceName::Nycha);
        summary.rows_read = 100;
        summary.rows_emitted = 95;
        summary.malformed = 3;
        summary.duplicates = 2;
        write_summary_json(&path, &summary).expect("write summary");
        let content = std::fs::read_to_string(&path).expect("read summary");
        let round: RunSummary = serde_json::from_str(&content).expect("parse summary");
        assert_eq!(round.rows_read, 100);
        assert_eq!(round.rows_emitted, 95);
    }
}
