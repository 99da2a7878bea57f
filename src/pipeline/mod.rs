//! The text-transformation pipeline
//!
//! This module coordinates the three in-memory stages and owns nothing but
//! the glue between them:
//! - [`includes`]: recursive `#include` flattening with a depth guard
//! - [`comments`]: comment removal that preserves string/char literals
//! - [`scanner`]: heuristic declaration recognition and identifier checks
//!   (validation itself lives in [`ident`])
//!
//! # Stage order
//!
//! Stages run strictly sequentially and each consumes its input buffer
//! before the next one starts.  Comments are removed *before* declaration
//! scanning, so the scanner can never classify a line inside a multi-line
//! comment as a declaration.  Both stages preserve the flattened buffer's
//! line count, which keeps the resolver's per-line origin map valid all the
//! way through; blank lines are elided only at output emission.

pub mod comments;
pub mod ident;
pub mod includes;
pub mod scanner;

use crate::errors::{PrecompileError, Warning};
use crate::source::count_lines;
use crate::stats::ProcessingStats;

/// The transformed text plus every recoverable condition met on the way.
pub struct PipelineOutput {
    pub text: String,
    pub warnings: Vec<Warning>,
}

/// Run the full pipeline on the named top-level file.
///
/// Fatal errors (unreadable input, depth overflow) abort immediately;
/// everything recoverable is returned as a [`Warning`] and reflected in
/// `stats`.  The returned text still contains blanked-out comment lines;
/// the output emitter decides what to write.
pub fn run(
    input_path: &str,
    stats: &mut ProcessingStats,
) -> Result<PipelineOutput, PrecompileError> {
    let resolved = includes::resolve(input_path, stats)?;
    stats.set_input_totals(resolved.text.len() as u64, count_lines(&resolved.text));

    let mut warnings = resolved.warnings;

    let stripped = comments::strip(&resolved.text);
    stats.note_comments_removed(stripped.units_removed);
    if stripped.unterminated {
        warnings.push(Warning::UnterminatedBlockComment {
            file: input_path.to_string(),
        });
    }

    scanner::scan(&stripped.text, &resolved.files, &resolved.origins, stats);

    Ok(PipelineOutput {
        text: stripped.text,
        warnings,
    })
}
