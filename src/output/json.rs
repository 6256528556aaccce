use crate::output::traits::{OutputResult, RecordWriter, Report};
use std::io::Write;

/// Writes the records of a report as a pretty-printed JSON array
///
/// Only the records are emitted, keyed by their column names, so the file
/// can be loaded straight into a table.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl RecordWriter for JsonWriter {
    fn write_report(&self, report: &Report, out: &mut dyn Write) -> OutputResult<()> {
        serde_json::to_writer_pretty(&mut *out, &report.records)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
