//! Line cursor shared by the library and schematic parsers.
//!
//! Nested block parsers borrow the same cursor mutably, so "how many lines are
//! left" is a single number no matter how deep the parse is. Error lines are
//! derived from it.

use thiserror::Error;

use super::token::Token;

/// A contextual parse failure.
///
/// While the error travels up through nested block parsers it only knows how
/// many lines were left when it was raised (counting the offending line);
/// the outermost parser turns that into a 1-based line number with
/// [`ParseError::annotate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}")]
pub struct ParseError {
    pub message: String,
    /// 1-based line in the original input; 0 until annotated.
    pub line: usize,
    /// Raw text of the offending line.
    pub source_line: String,
    remaining: usize,
}

impl ParseError {
    pub fn annotate(mut self, total_lines: usize) -> Self {
        self.line = total_lines - self.remaining + 1;
        self
    }
}

pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(content: &'a str) -> Self {
        let lines = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Self { lines, pos: 0 }
    }

    pub fn total(&self) -> usize {
        self.lines.len()
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    /// 1-based number of the line most recently taken.
    pub fn line_number(&self) -> usize {
        self.pos
    }

    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }

    pub fn peek_line(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Take the next line and split it into tokens.
    pub fn next_tokens(&mut self) -> Option<(&'a str, Vec<Token>)> {
        let line = self.next_line()?;
        Some((line, tokenize_line(line, self.pos)))
    }

    /// Error about the line most recently taken.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        let source_line = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .copied()
            .unwrap_or_default();
        ParseError {
            message: message.into(),
            line: 0,
            source_line: source_line.to_string(),
            remaining: self.remaining() + 1,
        }
    }

    /// Error for input that ended while `terminator` was still expected.
    pub fn unterminated(&self, terminator: &str) -> ParseError {
        ParseError {
            message: format!("unexpected end of file, expecting {}", terminator),
            line: 0,
            source_line: self.lines.last().copied().unwrap_or_default().to_string(),
            remaining: 1,
        }
    }
}

/// Split a line on whitespace runs. A token opening with `"` extends to the
/// matching close quote so quoted text may contain spaces; `\"` does not
/// close it.
pub fn tokenize_line(line: &str, line_number: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let mut end = line.len();
        if ch == '"' {
            chars.next();
            let mut escaped = false;
            for (i, c) in chars.by_ref() {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    end = i + c.len_utf8();
                    break;
                }
            }
            // Glued trailing characters stay with the quoted token.
            while let Some(&(i, c)) = chars.peek() {
                if c.is_whitespace() {
                    end = i;
                    break;
                }
                chars.next();
                end = i + c.len_utf8();
            }
        } else {
            while let Some(&(i, c)) = chars.peek() {
                if c.is_whitespace() {
                    end = i;
                    break;
                }
                chars.next();
            }
        }

        tokens.push(Token::new(&line[start..end], line_number));
    }

    tokens
}
