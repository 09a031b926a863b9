//! Enumerations and argument helpers shared by the library and schematic
//! parsers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cursor::{LineCursor, ParseError};
use super::token::Token;
use crate::geometry::Point;

/// Largest coordinate or length magnitude accepted from a file. Keeps every
/// transform product and bounding-box sum inside `i64`.
pub const MAX_COORD: i64 = 1 << 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fill {
    #[default]
    NoFill,
    /// Filled with the pen color (`F`).
    FilledShape,
    /// Filled with the body background color (`f`).
    FilledWithBgBodyColor,
}

impl Fill {
    pub fn parse(s: Option<&str>) -> Fill {
        match s {
            Some("F") => Fill::FilledShape,
            Some("f") => Fill::FilledWithBgBodyColor,
            _ => Fill::NoFill,
        }
    }

    pub fn is_filled(&self) -> bool {
        !matches!(self, Fill::NoFill)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHJustify {
    Left,
    #[default]
    Center,
    Right,
}

impl TextHJustify {
    pub fn parse(s: &str) -> TextHJustify {
        match s.chars().next() {
            Some('L') => TextHJustify::Left,
            Some('R') => TextHJustify::Right,
            _ => TextHJustify::Center,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextVJustify {
    Top,
    #[default]
    Center,
    Bottom,
}

impl TextVJustify {
    pub fn parse(c: Option<char>) -> TextVJustify {
        match c {
            Some('T') => TextVJustify::Top,
            Some('B') => TextVJustify::Bottom,
            _ => TextVJustify::Center,
        }
    }
}

/// Field text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextOrientation {
    #[default]
    Horiz,
    Vert,
}

impl TextOrientation {
    pub fn parse(s: &str) -> TextOrientation {
        if s == "H" {
            TextOrientation::Horiz
        } else {
            TextOrientation::Vert
        }
    }

    /// Angle in tenths of a degree.
    pub fn angle(&self) -> i32 {
        match self {
            TextOrientation::Horiz => 0,
            TextOrientation::Vert => 900,
        }
    }
}

/// Direction a pin points from its connection point toward the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinOrientation {
    Up,
    Down,
    Left,
    Right,
}

impl PinOrientation {
    pub fn parse(s: &str) -> Option<PinOrientation> {
        match s {
            "U" => Some(PinOrientation::Up),
            "D" => Some(PinOrientation::Down),
            "L" => Some(PinOrientation::Left),
            "R" => Some(PinOrientation::Right),
            _ => None,
        }
    }

    /// Unit vector (library coordinates, y up).
    pub fn direction(&self) -> Point {
        match self {
            PinOrientation::Up => Point::new(0, 1),
            PinOrientation::Down => Point::new(0, -1),
            PinOrientation::Left => Point::new(-1, 0),
            PinOrientation::Right => Point::new(1, 0),
        }
    }
}

/// Electrical type of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinType {
    Input,
    Output,
    Bidirectional,
    TriState,
    Passive,
    Unspecified,
    PowerIn,
    PowerOut,
    OpenCollector,
    OpenEmitter,
    NotConnected,
}

impl PinType {
    pub fn parse(s: &str) -> Option<PinType> {
        Some(match s {
            "I" => PinType::Input,
            "O" => PinType::Output,
            "B" => PinType::Bidirectional,
            "T" => PinType::TriState,
            "P" => PinType::Passive,
            "U" => PinType::Unspecified,
            "W" => PinType::PowerIn,
            "w" => PinType::PowerOut,
            "C" => PinType::OpenCollector,
            "E" => PinType::OpenEmitter,
            "N" => PinType::NotConnected,
            _ => return None,
        })
    }
}

/// One flag of a pin's shape/attribute string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinAttribute {
    Invisible,
    Inverted,
    Clock,
    LowIn,
    LowOut,
    FallingEdge,
    NonLogic,
    Other(char),
}

impl PinAttribute {
    pub fn from_char(c: char) -> PinAttribute {
        match c {
            'N' => PinAttribute::Invisible,
            'I' => PinAttribute::Inverted,
            'C' => PinAttribute::Clock,
            'L' => PinAttribute::LowIn,
            'V' => PinAttribute::LowOut,
            'F' => PinAttribute::FallingEdge,
            'X' => PinAttribute::NonLogic,
            other => PinAttribute::Other(other),
        }
    }
}

/// Decode a field value written between double quotes.
///
/// `\"` and `\\` are unescaped; text that does not start with a quote is
/// returned unchanged.
pub fn read_delimited_text(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('"') else {
        return raw.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '"' => break,
            c => out.push(c),
        }
    }
    out
}

/// Decode a `T` (body text) argument: quoted text uses `''` for an embedded
/// `"`, unquoted text uses `~` for a space.
pub fn read_body_text(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].replace("''", "\"")
    } else {
        raw.replace('~', " ")
    }
}

/// Positional argument access with errors attributed to the current line.
pub(crate) struct Args<'t, 'c, 'a> {
    tokens: &'t [Token],
    cursor: &'c LineCursor<'a>,
    keyword: &'t str,
}

impl<'t, 'c, 'a> Args<'t, 'c, 'a> {
    pub fn new(keyword: &'t str, tokens: &'t [Token], cursor: &'c LineCursor<'a>) -> Self {
        Self {
            tokens,
            cursor,
            keyword,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn opt(&self, i: usize) -> Option<&'t str> {
        self.tokens.get(i).map(Token::text)
    }

    pub fn str(&self, i: usize) -> Result<&'t str, ParseError> {
        self.opt(i).ok_or_else(|| {
            self.cursor.error(format!(
                "{}: missing argument {} (found {})",
                self.keyword,
                i + 1,
                self.tokens.len()
            ))
        })
    }

    pub fn num<T: FromStr>(&self, i: usize) -> Result<T, ParseError> {
        let s = self.str(i)?;
        s.parse::<T>().map_err(|_| {
            self.cursor
                .error(format!("{}: invalid number '{}' in argument {}", self.keyword, s, i + 1))
        })
    }

    /// A coordinate or length, bounded by [`MAX_COORD`].
    pub fn coord(&self, i: usize) -> Result<i64, ParseError> {
        let value: i64 = self.num(i)?;
        if value.abs() > MAX_COORD {
            return Err(self.error(format!(
                "coordinate {} out of range in argument {}",
                value,
                i + 1
            )));
        }
        Ok(value)
    }

    pub fn point(&self, i: usize) -> Result<Point, ParseError> {
        Ok(Point::new(self.coord(i)?, self.coord(i + 1)?))
    }

    pub fn flag(&self, i: usize, yes: &str) -> Result<bool, ParseError> {
        Ok(self.str(i)? == yes)
    }

    pub fn error(&self, message: impl Into<String>) -> ParseError {
        self.cursor.error(format!("{}: {}", self.keyword, message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_delimited_text() {
        assert_eq!(read_delimited_text(r#""R""#), "R");
        assert_eq!(read_delimited_text(r#""a \"b\" c\\""#), r#"a "b" c\"#);
        assert_eq!(read_delimited_text("~"), "~");
    }

    #[test]
    fn test_read_body_text() {
        assert_eq!(read_body_text("hello~world"), "hello world");
        assert_eq!(read_body_text(r#""say ''hi''""#), r#"say "hi""#);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(Fill::parse(Some("f")), Fill::FilledWithBgBodyColor);
        assert_eq!(Fill::parse(None), Fill::NoFill);
        assert_eq!(PinType::parse("w"), Some(PinType::PowerOut));
        assert_eq!(PinType::parse("W"), Some(PinType::PowerIn));
        assert_eq!(PinOrientation::parse("Q"), None);
        assert_eq!(TextVJustify::parse("BIB".chars().next()), TextVJustify::Bottom);
        assert_eq!(PinAttribute::from_char('N'), PinAttribute::Invisible);
    }
}
