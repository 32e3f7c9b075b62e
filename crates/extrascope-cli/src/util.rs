use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use extrascope_survey::{normalize, source, table::CleanedTable};

/// Where a command writes its result: stdout, or the file given by `--output`.
pub struct Sink {
    writer: Box<dyn io::Write>,
    target: String,
}

impl Sink {
    pub fn open(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                writer: Box::new(io::stdout().lock()),
                target: "stdout".to_owned(),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            target: path.display().to_string(),
        })
    }

    /// Human-readable name of the destination, used in logs and errors.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Runs `render` against the destination, then flushes it.
    ///
    /// `what` names the written content in the error message.
    pub fn emit<F>(&mut self, what: &str, render: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut dyn io::Write) -> io::Result<()>,
    {
        render(&mut *self.writer)
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to write {what} to {}", self.target))
    }

    /// Writes `value` as pretty-printed JSON followed by a newline.
    pub fn emit_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        self.emit("JSON", |out| {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)
        })
    }
}

/// Reads and normalizes a survey CSV file.
///
/// # Errors
///
/// Returns error if the file cannot be read or a row does not have 22 fields.
pub fn load_survey<P>(path: P) -> anyhow::Result<CleanedTable>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let rows = source::read_raw_records_from_path(path)
        .with_context(|| format!("Failed to load survey file: {}", path.display()))?;
    let (table, report) = normalize::normalize_with_report(rows);

    tracing::info!(
        path = %path.display(),
        rows = report.rows_read,
        duplicates = report.duplicates_removed,
        records = table.len(),
        "loaded survey"
    );
    for (column, count) in &report.filled {
        tracing::debug!(%column, count, "filled unresolved cells");
    }
    if table.is_empty() {
        tracing::warn!(path = %path.display(), "survey has no answer");
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_writes_json_file() {
        let path =
            std::env::temp_dir().join(format!("extrascope-sink-{}.json", std::process::id()));
        let mut sink = Sink::open(Some(path.as_path())).unwrap();
        assert_eq!(sink.target(), path.display().to_string());
        sink.emit_json(&[1, 2]).unwrap();
        drop(sink);
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text, "[\n  1,\n  2\n]\n");
    }

    #[test]
    fn test_sink_reports_destination_on_failure() {
        let mut sink = Sink {
            writer: Box::new(BrokenPipe),
            target: "pipe".to_owned(),
        };
        let err = sink.emit("report", |out| writeln!(out, "hello")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to write report to pipe");
    }

    #[test]
    fn test_sink_rejects_missing_directory() {
        let path = Path::new("/nonexistent-extrascope-dir/out.json");
        let err = Sink::open(Some(path)).err().unwrap();
        assert!(err.to_string().starts_with("Failed to create output file"));
    }
}
