//! Symbolic-expression lexer for board files.
//!
//! Produces a flat token stream: `(` and `)` as singleton tokens, quoted
//! strings, and maximal runs of other non-blank characters. Runs are looked
//! up in the keyword table and fall back to plain symbols; numeric runs are
//! tagged as numbers without changing their text.

use thiserror::Error;

use super::keywords::Keyword;
use super::token::Token;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unterminated string starting at line {0}")]
    UnterminatedString(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeKind {
    Left,
    Right,
    Keyword(Keyword),
    Number,
    Symbol,
    /// Double-quoted text; the token holds the unescaped contents.
    String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub token: Token,
}

impl Lexeme {
    pub fn text(&self) -> &str {
        self.token.text()
    }

    pub fn line(&self) -> usize {
        self.token.line()
    }

    pub fn is_left(&self) -> bool {
        self.kind == LexemeKind::Left
    }

    pub fn is_right(&self) -> bool {
        self.kind == LexemeKind::Right
    }

    /// Anything that can stand as an atom value (not a paren).
    pub fn is_atom(&self) -> bool {
        !self.is_left() && !self.is_right()
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            LexemeKind::Keyword(k) => Some(k),
            _ => None,
        }
    }
}

pub struct SexpLexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
}

impl SexpLexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    /// Lex the whole input.
    pub fn tokenize(input: &str) -> Result<Vec<Lexeme>, LexError> {
        let mut lexer = SexpLexer::new(input);
        let mut out = Vec::new();
        while let Some(lexeme) = lexer.next_lexeme()? {
            out.push(lexeme);
        }
        Ok(out)
    }

    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>, LexError> {
        self.skip_whitespace();
        if self.is_eof() {
            return Ok(None);
        }

        let line = self.line;
        let lexeme = match self.peek() {
            '(' => {
                self.advance();
                Lexeme {
                    kind: LexemeKind::Left,
                    token: Token::new("(", line),
                }
            }
            ')' => {
                self.advance();
                Lexeme {
                    kind: LexemeKind::Right,
                    token: Token::new(")", line),
                }
            }
            '"' => Lexeme {
                kind: LexemeKind::String,
                token: Token::new(self.scan_string()?, line),
            },
            _ => {
                let token = Token::new(self.scan_atom(), line);
                let kind = if token.is_number() {
                    LexemeKind::Number
                } else if let Some(k) = Keyword::lookup(token.text()) {
                    LexemeKind::Keyword(k)
                } else {
                    LexemeKind::Symbol
                };
                Lexeme { kind, token }
            }
        };
        Ok(Some(lexeme))
    }

    fn scan_string(&mut self) -> Result<String, LexError> {
        let start_line = self.line;
        self.advance(); // opening quote
        let mut s = String::new();
        let mut escaped = false;

        while !self.is_eof() {
            let ch = self.peek();
            self.advance();

            if escaped {
                match ch {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    'r' => s.push('\r'),
                    _ => s.push(ch),
                }
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                return Ok(s);
            } else {
                s.push(ch);
            }
        }

        Err(LexError::UnterminatedString(start_line))
    }

    fn scan_atom(&mut self) -> String {
        let mut s = String::new();
        while !self.is_eof() {
            let ch = self.peek();
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            s.push(ch);
            self.advance();
        }
        s
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> char {
        if self.pos < self.input.len() {
            self.input[self.pos]
        } else {
            '\0'
        }
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == '\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
