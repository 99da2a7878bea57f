//! # Introduction
//!
//! cpre is a small source-to-source transformer for a single C-like
//! translation unit.  It inlines local `#include "..."` directives, strips
//! `//` and `/* */` comments without touching string or character literals,
//! flags lexically invalid identifiers found in declaration lines, and
//! accumulates processing statistics along the way.
//!
//! ## Processing pipeline
//!
//! ```text
//! Source → IncludeResolver → CommentStripper → DeclarationScanner → Output
//!                 │                  │                  │
//!                 └──────────────────┴──────────────────┴──→ ProcessingStats
//! ```
//!
//! 1. [`source`] — whole-file loading and final output emission.
//! 2. [`pipeline::includes`] — recursive, depth-limited `#include` expansion
//!    producing one flattened buffer plus a per-line origin map.
//! 3. [`pipeline::comments`] — character-level comment removal automaton
//!    that honours string/character literals and backslash escapes.
//! 4. [`pipeline::scanner`] — heuristic declaration recognition (global and
//!    `main`-local scopes) feeding [`pipeline::ident`] for validation.
//! 5. [`stats`] — the passive [`stats::ProcessingStats`] collector owned by
//!    the driver and threaded through every stage.
//!
//! ## Scope
//!
//! The transformer is deliberately approximate: it is a naming-convention
//! linter and include flattener, not a compiler front end.  There is no
//! macro expansion, no grammar, and no reserved-word checking.

pub mod errors;
pub mod pipeline;
pub mod source;
pub mod stats;
