//! Declaration scanning
//!
//! A phase machine over the comment-free, flattened text that approximates
//! C89 structure well enough to find declaration lines: global declarations
//! run until the entry point's signature, and local declarations run from
//! the entry point's `{` until the first statement.  Each declaration
//! candidate is tokenized, the first token is discarded as the type, and
//! every later token is checked as an identifier.
//!
//! This is a heuristic, not a grammar: a candidate is simply a segment
//! ending in `;`, and the entry point is simply a segment containing the
//! word `main` and a `(`.  Keeping the approximation is deliberate.

use super::ident::is_valid_identifier;
use super::includes::LineOrigin;
use crate::stats::{Finding, ProcessingStats};

/// Where the scanner believes it is within the translation unit.
///
/// `PostEntry` is terminal: once the entry point's closing brace is seen,
/// no further declaration analysis happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    PreEntry,
    GlobalDecl,
    SeekEntryBrace,
    EntryLocalDecl,
    EntryCode,
    PostEntry,
}

/// Characters that separate candidate identifiers within a declaration.
const TOKEN_DELIMITERS: &[char] = &[' ', '\t', ',', ';', '*', '(', ')', '[', ']', '='];

/// First tokens that mark a segment as a statement rather than a
/// declaration; inside the entry point they end the local-declaration run.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "if", "else", "while", "for", "do", "switch", "case", "default", "break",
    "continue", "goto",
];

/// Scan the comment-free text for declaration candidates, validating every
/// candidate identifier and recording findings in `stats`.
///
/// `origins` maps each line of `text` back to its pre-flattening file and
/// line; comment stripping preserves line count, so the map built by the
/// resolver still applies here.
pub fn scan(text: &str, files: &[String], origins: &[LineOrigin], stats: &mut ProcessingStats) {
    let mut phase = Phase::PreEntry;

    for (idx, line) in text.lines().enumerate() {
        let (file, line_no) = match origins.get(idx) {
            Some(origin) => (
                files.get(origin.file).map(String::as_str).unwrap_or("?"),
                origin.line,
            ),
            None => (files.first().map(String::as_str).unwrap_or("?"), idx + 1),
        };

        for segment in segments(line) {
            process_segment(segment, file, line_no, &mut phase, stats);
        }
    }
}

/// Cut one physical line into scan segments: `{` and `}` stand alone and a
/// `;` closes the segment it ends.  This makes `int main(){int z;return 0;}`
/// behave like its multi-line spelling.
fn segments(line: &str) -> Vec<&str> {
    let mut segs = Vec::new();
    let mut start = 0;
    for (i, c) in line.char_indices() {
        match c {
            '{' | '}' => {
                if i > start {
                    segs.push(&line[start..i]);
                }
                segs.push(&line[i..i + 1]);
                start = i + 1;
            }
            ';' => {
                segs.push(&line[start..=i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < line.len() {
        segs.push(&line[start..]);
    }
    segs
}

fn process_segment(
    segment: &str,
    file: &str,
    line_no: usize,
    phase: &mut Phase,
    stats: &mut ProcessingStats,
) {
    let segment = segment.trim();
    if segment.is_empty() {
        return;
    }

    // Surviving preprocessor lines (system includes) carry no declarations
    // and do not start the global-declaration block.
    if segment.starts_with('#') {
        return;
    }

    if segment.starts_with('{') {
        if *phase == Phase::SeekEntryBrace {
            *phase = Phase::EntryLocalDecl;
        }
        return;
    }

    if segment.starts_with('}') {
        if matches!(*phase, Phase::EntryLocalDecl | Phase::EntryCode) {
            *phase = Phase::PostEntry;
        }
        return;
    }

    if matches!(*phase, Phase::PreEntry | Phase::GlobalDecl) {
        if is_entry_signature(segment) {
            *phase = Phase::SeekEntryBrace;
            return;
        }
        // First non-trivial segment: global declarations have begun, and
        // this segment is itself subject to the declaration check below.
        if *phase == Phase::PreEntry {
            *phase = Phase::GlobalDecl;
        }
    }

    if *phase == Phase::SeekEntryBrace {
        return;
    }

    if matches!(*phase, Phase::GlobalDecl | Phase::EntryLocalDecl) {
        if segment.ends_with(';') {
            let mut tokens = segment.split(TOKEN_DELIMITERS).filter(|t| !t.is_empty());

            // The first token is the type; a statement keyword instead
            // means this is code, which inside the entry point ends the
            // contiguous local-declaration block.
            match tokens.next() {
                Some(first) if STATEMENT_KEYWORDS.contains(&first) => {
                    if *phase == Phase::EntryLocalDecl {
                        *phase = Phase::EntryCode;
                    }
                    return;
                }
                Some(_) => {}
                None => return,
            }

            for token in tokens {
                stats.note_identifier_checked();
                if !is_valid_identifier(token) {
                    stats.record_finding(Finding {
                        file: file.to_string(),
                        line: line_no,
                        name: token.to_string(),
                    });
                }
            }
        } else if *phase == Phase::EntryLocalDecl {
            // Non-blank, not ';'-terminated: the contiguous local
            // declarations are over.
            *phase = Phase::EntryCode;
        }
    }
}

/// Heuristic entry-point recognition: the word `main` plus an open paren.
fn is_entry_signature(segment: &str) -> bool {
    segment.contains('(')
        && segment
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .any(|word| word == "main")
}
