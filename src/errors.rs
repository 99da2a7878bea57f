//! Error and warning types for the precompiler pipeline
//!
//! Fatal conditions (unreadable top-level input, output write failure,
//! include depth overflow) abort the whole run and are represented by
//! [`PrecompileError`].  Everything else is recovered in place and surfaces
//! as a [`Warning`] on the diagnostic stream: an unreadable *included* file
//! drops the directive, a malformed directive is treated as ordinary code,
//! and an unterminated block comment still produces output.
//!
//! Every I/O operation is attempted exactly once; there is no retry logic.

use std::fmt;
use std::io;

/// Fatal errors that abort the pipeline
#[derive(Debug)]
pub enum PrecompileError {
    /// A file that had to exist could not be found
    NotFound { path: String },

    /// Read or write failure on a file that had to succeed
    Io { path: String, source: io::Error },

    /// Include recursion exceeded the fixed depth limit (probable cycle)
    TooDeep { path: String, depth: usize },
}

impl fmt::Display for PrecompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecompileError::NotFound { path } => {
                write!(f, "file not found: '{}'", path)
            }
            PrecompileError::Io { path, source } => {
                write!(f, "i/o failure on '{}': {}", path, source)
            }
            PrecompileError::TooDeep { path, depth } => {
                write!(
                    f,
                    "include depth {} exceeded while including '{}' (possible include cycle)",
                    depth, path
                )
            }
        }
    }
}

impl std::error::Error for PrecompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrecompileError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Recoverable conditions reported on the diagnostic stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A quoted include named a file that could not be read; the directive
    /// was dropped and a sentinel record kept in the stats
    UnreadableInclude {
        name: String,
        file: String,
        line: usize,
    },

    /// An `#include` line with no extractable file name; treated as code
    MalformedDirective { file: String, line: usize },

    /// Input ended inside a `/* ... */` comment
    UnterminatedBlockComment { file: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnreadableInclude { name, file, line } => {
                write!(
                    f,
                    "cannot read included file '{}' ('{}' line {}); directive dropped",
                    name, file, line
                )
            }
            Warning::MalformedDirective { file, line } => {
                write!(
                    f,
                    "malformed #include directive in '{}' line {}; treated as code",
                    file, line
                )
            }
            Warning::UnterminatedBlockComment { file } => {
                write!(f, "unterminated block comment at end of '{}'", file)
            }
        }
    }
}
