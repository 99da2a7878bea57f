//! Recursive `#include` resolution
//!
//! Walks the source line by line and splices quoted includes in place,
//! depth-first, producing one flattened buffer.  Alongside the text it
//! builds a per-line origin map so that later stages can attribute findings
//! to the file and line they originally came from; the flattening step is
//! the only place where that information still exists.
//!
//! Only the `#include "name"` form is resolved, relative to the process
//! working directory.  `#include <name>` is a system include and passes
//! through verbatim.  An unreadable included file is a warning, not an
//! error: the directive is dropped and a sentinel record is kept in the
//! stats.  Exceeding [`MAX_INCLUDE_DEPTH`] is fatal, since it almost always
//! means an include cycle.

use rustc_hash::FxHashMap;

use crate::errors::{PrecompileError, Warning};
use crate::source::{self, SourceText};
use crate::stats::{FileRecord, ProcessingStats};

/// Nesting levels of quoted includes allowed below the top-level file.
pub const MAX_INCLUDE_DEPTH: usize = 10;

/// Index into [`ResolvedSource::files`].
pub type FileId = usize;

/// Where one line of the flattened buffer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOrigin {
    pub file: FileId,
    /// 1-based line number within the original file.
    pub line: usize,
}

/// The flattened translation unit.
#[derive(Debug)]
pub struct ResolvedSource {
    pub text: String,
    /// Every file that contributed lines, top-level file first.
    pub files: Vec<String>,
    /// One entry per line of `text`, in order.
    pub origins: Vec<LineOrigin>,
    pub warnings: Vec<Warning>,
}

/// What an `#include` line turned out to be.
enum Directive {
    Quoted(String),
    System,
    Malformed,
}

struct Resolver<'a> {
    stats: &'a mut ProcessingStats,
    out: String,
    files: Vec<String>,
    origins: Vec<LineOrigin>,
    warnings: Vec<Warning>,
    /// Per-run cache of file bodies; `None` caches a failed load so the
    /// stats stay consistent when the same bad include appears twice.
    cache: FxHashMap<String, Option<SourceText>>,
}

/// Resolve all quoted includes reachable from `root_path`.
///
/// A failure to read the top-level file is fatal; so is include recursion
/// past [`MAX_INCLUDE_DEPTH`].
pub fn resolve(
    root_path: &str,
    stats: &mut ProcessingStats,
) -> Result<ResolvedSource, PrecompileError> {
    let root = source::load(root_path)?;
    stats.set_root(FileRecord::readable(root_path, root.metrics()));

    let mut resolver = Resolver {
        stats,
        out: String::with_capacity(root.text.len()),
        files: Vec::new(),
        origins: Vec::new(),
        warnings: Vec::new(),
        cache: FxHashMap::default(),
    };

    let root_id = resolver.intern(root_path);
    resolver.expand(&root.text, root_id, 0)?;

    Ok(ResolvedSource {
        text: resolver.out,
        files: resolver.files,
        origins: resolver.origins,
        warnings: resolver.warnings,
    })
}

impl Resolver<'_> {
    fn expand(&mut self, text: &str, file: FileId, depth: usize) -> Result<(), PrecompileError> {
        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim_start();

            if !trimmed.starts_with("#include") {
                self.copy_line(line, file, line_no);
                continue;
            }

            match classify_directive(&trimmed["#include".len()..]) {
                Directive::Quoted(name) => {
                    self.stats.note_include_processed();
                    if depth + 1 > MAX_INCLUDE_DEPTH {
                        return Err(PrecompileError::TooDeep {
                            path: name,
                            depth: depth + 1,
                        });
                    }
                    match self.load_cached(&name) {
                        Some(included) => {
                            self.stats
                                .record_include(FileRecord::readable(&name, included.metrics()));
                            let id = self.intern(&name);
                            self.expand(&included.text, id, depth + 1)?;
                        }
                        None => {
                            self.warnings.push(Warning::UnreadableInclude {
                                name: name.clone(),
                                file: self.files[file].clone(),
                                line: line_no,
                            });
                            self.stats.record_include(FileRecord::unreadable(&name));
                            // Directive dropped; processing continues.
                        }
                    }
                }
                Directive::System => {
                    self.copy_line(line, file, line_no);
                }
                Directive::Malformed => {
                    self.warnings.push(Warning::MalformedDirective {
                        file: self.files[file].clone(),
                        line: line_no,
                    });
                    self.copy_line(line, file, line_no);
                }
            }
        }
        Ok(())
    }

    /// Copy one source line with a single normalized `\n` terminator.
    fn copy_line(&mut self, line: &str, file: FileId, line_no: usize) {
        self.out.push_str(line);
        self.out.push('\n');
        self.origins.push(LineOrigin { file, line: line_no });
    }

    fn intern(&mut self, name: &str) -> FileId {
        match self.files.iter().position(|f| f == name) {
            Some(id) => id,
            None => {
                self.files.push(name.to_string());
                self.files.len() - 1
            }
        }
    }

    fn load_cached(&mut self, name: &str) -> Option<SourceText> {
        if let Some(hit) = self.cache.get(name) {
            return hit.clone();
        }
        let loaded = source::load(name).ok();
        self.cache.insert(name.to_string(), loaded.clone());
        loaded
    }
}

/// Classify the remainder of an `#include` line.
///
/// The file name sits between the first two `"`; the angle-bracket form is
/// recognized but never resolved.  Unbalanced quotes or an empty name make
/// the directive malformed, and the line is treated as ordinary code.
fn classify_directive(rest: &str) -> Directive {
    if let Some(q1) = rest.find('"') {
        let after = &rest[q1 + 1..];
        if let Some(q2) = after.find('"') {
            if q2 > 0 {
                return Directive::Quoted(after[..q2].to_string());
            }
        }
        return Directive::Malformed;
    }
    if let (Some(lt), Some(gt)) = (rest.find('<'), rest.find('>')) {
        if gt > lt + 1 {
            return Directive::System;
        }
    }
    Directive::Malformed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_quoted() {
        assert!(matches!(
            classify_directive(" \"header.h\""),
            Directive::Quoted(name) if name == "header.h"
        ));
    }

    #[test]
    fn test_classify_system() {
        assert!(matches!(classify_directive(" <stdio.h>"), Directive::System));
    }

    #[test]
    fn test_classify_unbalanced_quote() {
        assert!(matches!(classify_directive(" \"broken"), Directive::Malformed));
    }

    #[test]
    fn test_classify_empty_name() {
        assert!(matches!(classify_directive(" \"\""), Directive::Malformed));
    }

    #[test]
    fn test_classify_no_name_at_all() {
        assert!(matches!(classify_directive(" junk"), Directive::Malformed));
    }
}
