//! Comment removal
//!
//! A character-level automaton that removes `//` and `/* */` comments while
//! leaving string and character literals byte-identical.  Newlines inside
//! comments are re-emitted so the output has exactly the same line count as
//! the input; later stages rely on that to keep per-line origins valid.
//!
//! One comment unit is counted per `//` or `/*` opening, not per line
//! touched.  Stripping already comment-free text returns it unchanged.

/// Automaton states.  `SawSlash` withholds a `/` that may turn out to be a
/// division operator; `BlockCommentStar` handles `*` runs so `**/` still
/// closes the comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    SawSlash,
    LineComment,
    BlockComment,
    BlockCommentStar,
    InString,
    InChar,
}

/// Result of one stripping pass.
#[derive(Debug)]
pub struct StripOutcome {
    pub text: String,
    /// Comment units removed, one per `//` or `/*` opening.
    pub units_removed: usize,
    /// Input ended while still inside a block comment.
    pub unterminated: bool,
}

/// Dispatch one character from plain code, returning the next state.
fn code_step(c: char, out: &mut String) -> State {
    match c {
        '"' => {
            out.push(c);
            State::InString
        }
        '\'' => {
            out.push(c);
            State::InChar
        }
        '/' => State::SawSlash,
        _ => {
            out.push(c);
            State::Code
        }
    }
}

/// Remove comments from `source`.
pub fn strip(source: &str) -> StripOutcome {
    let mut out = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut units_removed = 0usize;
    let mut chars = source.chars();

    while let Some(c) = chars.next() {
        match state {
            State::Code => {
                state = code_step(c, &mut out);
            }
            State::SawSlash => match c {
                '/' => {
                    state = State::LineComment;
                    units_removed += 1;
                }
                '*' => {
                    state = State::BlockComment;
                    units_removed += 1;
                }
                _ => {
                    // An ordinary division operator: emit the withheld
                    // slash, then treat the current character as code.
                    out.push('/');
                    state = code_step(c, &mut out);
                }
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => match c {
                '*' => state = State::BlockCommentStar,
                '\n' => out.push('\n'),
                _ => {}
            },
            State::BlockCommentStar => match c {
                '/' => state = State::Code,
                '*' => {}
                '\n' => {
                    out.push('\n');
                    state = State::BlockComment;
                }
                _ => state = State::BlockComment,
            },
            State::InString => {
                out.push(c);
                if c == '\\' {
                    // Escape pair: the next character is emitted verbatim,
                    // even if it is the closing quote.
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == '"' {
                    state = State::Code;
                }
            }
            State::InChar => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == '\'' {
                    state = State::Code;
                }
            }
        }
    }

    // A withheld slash at end of input was a real slash.
    if state == State::SawSlash {
        out.push('/');
    }

    let unterminated = matches!(state, State::BlockComment | State::BlockCommentStar);

    StripOutcome {
        text: out,
        units_removed,
        unterminated,
    }
}
