pub mod emit;
pub mod error;
pub mod sink;
pub mod summary_json;

pub use emit::emit;
pub use error::{ReportError, Result};
pub use sink::{CsvSink, JsonlSink, OUTPUT_COLUMNS, RecordSink};
pub use summary_json::write_summary_json;
