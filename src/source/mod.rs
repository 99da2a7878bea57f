//! Whole-file loading and final output emission
//!
//! [`load`] reads a named file fully into memory as a [`SourceText`];
//! [`write_output`] writes the transformed text to a file or stdout and
//! finalizes the output totals in the stats.  Both sit at the pipeline's
//! I/O boundary: everything in between operates on owned in-memory buffers.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::errors::PrecompileError;
use crate::stats::{FileMetrics, ProcessingStats};

/// An owned source buffer produced by the loader and by each pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub text: String,
}

impl SourceText {
    pub fn byte_len(&self) -> u64 {
        self.text.len() as u64
    }

    pub fn line_count(&self) -> usize {
        count_lines(&self.text)
    }

    pub fn metrics(&self) -> FileMetrics {
        FileMetrics {
            bytes: self.byte_len(),
            lines: self.line_count(),
        }
    }
}

/// Count lines the way the stats report them: number of `\n` characters,
/// plus one if the buffer is non-empty and does not end in `\n` (a trailing
/// unterminated line still counts).
pub fn count_lines(text: &str) -> usize {
    let newlines = text.bytes().filter(|&b| b == b'\n').count();
    if !text.is_empty() && !text.ends_with('\n') {
        newlines + 1
    } else {
        newlines
    }
}

/// Read an entire file into a [`SourceText`].
///
/// Invalid UTF-8 is replaced rather than rejected; the transformer is
/// byte-preserving only for well-formed text.  The caller decides whether a
/// failure is fatal (top-level input) or recoverable (included file).
pub fn load(path: &str) -> Result<SourceText, PrecompileError> {
    match fs::read(path) {
        Ok(bytes) => Ok(SourceText {
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(PrecompileError::NotFound {
            path: path.to_string(),
        }),
        Err(e) => Err(PrecompileError::Io {
            path: path.to_string(),
            source: e,
        }),
    }
}

/// Write the transformed text to `dest` (stdout when `None`), eliding
/// whitespace-only lines, and finalize the output totals.
///
/// Line policy: a line that is blank after comment removal (or was blank to
/// begin with) is not written.  Comment stripping keeps such lines in its
/// own output so that line numbering stays intact for the scanner; they are
/// dropped only here, at the very end.
pub fn write_output(
    text: &str,
    dest: Option<&Path>,
    stats: &mut ProcessingStats,
) -> Result<(), PrecompileError> {
    let mut body = String::with_capacity(text.len());
    let mut lines_written = 0usize;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        body.push_str(line);
        body.push('\n');
        lines_written += 1;
    }

    match dest {
        Some(path) => {
            fs::write(path, &body).map_err(|e| PrecompileError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(body.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(|e| PrecompileError::Io {
                    path: "<stdout>".to_string(),
                    source: e,
                })?;
        }
    }

    stats.finalize(body.len() as u64, lines_written);
    Ok(())
}
