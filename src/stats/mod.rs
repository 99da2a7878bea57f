//! Processing statistics
//!
//! [`ProcessingStats`] is a passive collector owned by the driver for the
//! whole run and threaded by mutable reference into every pipeline stage.
//! It holds the simple counters, one record per `#include` directive in
//! resolution order, and one [`Finding`] per invalid identifier in
//! encounter order.  It performs no validation of its own.

use std::fmt;
use std::io::{self, Write};

/// Byte size and line count of a file, taken before include resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetrics {
    pub bytes: u64,
    pub lines: usize,
}

/// One record per processed file.
///
/// `metrics` is `None` for a file that could not be opened: an unreadable
/// include is recorded, never silently dropped, and the sentinel keeps the
/// size/line pair invalid together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub name: String,
    pub metrics: Option<FileMetrics>,
}

impl FileRecord {
    pub fn readable(name: &str, metrics: FileMetrics) -> Self {
        Self {
            name: name.to_string(),
            metrics: Some(metrics),
        }
    }

    pub fn unreadable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metrics: None,
        }
    }
}

/// One invalid identifier, attributed to the file and 1-based line it came
/// from (pre-flattening coordinates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub file: String,
    pub line: usize,
    pub name: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid identifier '{}' in '{}' at line {}",
            self.name, self.file, self.line
        )
    }
}

/// Aggregate counters and records for one pipeline run.
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub identifiers_checked: usize,
    pub invalid_identifiers: usize,
    pub comments_removed: usize,
    pub includes_processed: usize,

    pub root: Option<FileRecord>,
    pub included: Vec<FileRecord>,
    pub findings: Vec<Finding>,

    /// Totals of the flattened, post-include-resolution buffer.
    pub input_bytes: u64,
    pub input_lines: usize,

    /// Totals of what was actually written out.
    pub output_bytes: u64,
    pub output_lines: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_root(&mut self, record: FileRecord) {
        self.root = Some(record);
    }

    /// Append one include record; order is resolution order (depth-first,
    /// first encountered first).
    pub fn record_include(&mut self, record: FileRecord) {
        self.included.push(record);
    }

    /// Append one invalid-identifier finding in encounter order.
    pub fn record_finding(&mut self, finding: Finding) {
        self.invalid_identifiers += 1;
        self.findings.push(finding);
    }

    pub fn note_identifier_checked(&mut self) {
        self.identifiers_checked += 1;
    }

    pub fn note_include_processed(&mut self) {
        self.includes_processed += 1;
    }

    pub fn note_comments_removed(&mut self, units: usize) {
        self.comments_removed += units;
    }

    pub fn set_input_totals(&mut self, bytes: u64, lines: usize) {
        self.input_bytes = bytes;
        self.input_lines = lines;
    }

    pub fn finalize(&mut self, output_bytes: u64, output_lines: usize) {
        self.output_bytes = output_bytes;
        self.output_lines = output_lines;
    }

    /// Dump the full report to the given writer (the driver points this at
    /// stderr in verbose mode).
    pub fn report<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "--- processing statistics ---")?;

        match &self.root {
            Some(rec) => writeln!(w, "input file: {}", format_record(rec))?,
            None => writeln!(w, "input file: (not recorded)")?,
        }

        writeln!(w, "included files ({}):", self.includes_processed)?;
        for rec in &self.included {
            writeln!(w, "  - {}", format_record(rec))?;
        }

        writeln!(w, "identifiers checked: {}", self.identifiers_checked)?;
        writeln!(w, "invalid identifiers: {}", self.invalid_identifiers)?;
        for finding in &self.findings {
            writeln!(w, "  - {}", finding)?;
        }

        writeln!(w, "comment units removed: {}", self.comments_removed)?;
        writeln!(
            w,
            "resolved input: {} bytes, {} lines",
            self.input_bytes, self.input_lines
        )?;
        writeln!(
            w,
            "output: {} bytes, {} lines",
            self.output_bytes, self.output_lines
        )?;
        writeln!(w, "--- end of statistics ---")?;
        Ok(())
    }
}

fn format_record(rec: &FileRecord) -> String {
    match rec.metrics {
        Some(m) => format!("'{}', {} bytes, {} lines", rec.name, m.bytes, m.lines),
        None => format!("'{}', unreadable", rec.name),
    }
}
