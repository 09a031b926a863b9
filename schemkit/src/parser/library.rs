//! KiCad component library parser (`EESchema-LIBRARY Version 2.x`).
//!
//! Libraries are line oriented: a header line, then `DEF` ... `ENDDEF`
//! blocks, each holding field records, an optional alias list, an optional
//! footprint filter block and the body graphics (`DRAW` ... `ENDDRAW`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{read_delimited_text, Args, TextHJustify, TextOrientation, TextVJustify};
use super::cursor::{LineCursor, ParseError};
use super::draw::Draw;
use super::token::Token;
use crate::geometry::{Point, Rect, Transform};

pub const LIBRARY_HEADER: &str = "EESchema-LIBRARY Version ";
/// Newest library format this parser understands.
pub const SUPPORTED_LIBRARY_VERSION: f64 = 2.4;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("unknown library format: {0}")]
    Format(String),
    #[error("library format version is greater than supported version: {found} > {supported}")]
    Version { found: f64, supported: f64 },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub version: f64,
    pub components: Vec<LibComponent>,
}

/// Keywords valid at library top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LibraryKeyword {
    Def,
    Unknown,
}

impl LibraryKeyword {
    fn resolve(keyword: &str) -> LibraryKeyword {
        match keyword {
            "DEF" => LibraryKeyword::Def,
            _ => LibraryKeyword::Unknown,
        }
    }
}

/// Keywords valid inside a `DEF` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComponentKeyword {
    EndDef,
    Draw,
    Alias,
    Field0,
    FieldN(u32),
    FpList,
    Unknown,
}

impl ComponentKeyword {
    fn resolve(keyword: &str) -> ComponentKeyword {
        match keyword {
            "ENDDEF" => ComponentKeyword::EndDef,
            "DRAW" => ComponentKeyword::Draw,
            "ALIAS" => ComponentKeyword::Alias,
            "F0" => ComponentKeyword::Field0,
            "$FPLIST" => ComponentKeyword::FpList,
            other => match other.strip_prefix('F').map(str::parse::<u32>) {
                Some(Ok(n)) if n > 0 => ComponentKeyword::FieldN(n),
                _ => ComponentKeyword::Unknown,
            },
        }
    }
}

impl Library {
    /// Parse a whole library file.
    pub fn load(content: &str) -> Result<Library, LibraryError> {
        let mut cursor = LineCursor::new(content);
        let total = cursor.total();

        let header = cursor.next_line().unwrap_or_default();
        let version_text = header
            .strip_prefix(LIBRARY_HEADER)
            .ok_or_else(|| LibraryError::Format(header.to_string()))?;
        // Older headers append a date after the version number.
        let version: f64 = version_text
            .split_whitespace()
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| LibraryError::Format(header.to_string()))?;
        if version > SUPPORTED_LIBRARY_VERSION {
            return Err(LibraryError::Version {
                found: version,
                supported: SUPPORTED_LIBRARY_VERSION,
            });
        }

        let mut library = Library {
            version,
            components: Vec::new(),
        };
        library
            .parse_body(&mut cursor)
            .map_err(|e| LibraryError::Parse(e.annotate(total)))?;

        tracing::debug!(
            "Parsed library version {} with {} components",
            library.version,
            library.components.len()
        );
        Ok(library)
    }

    fn parse_body(&mut self, cursor: &mut LineCursor<'_>) -> Result<(), ParseError> {
        while let Some((line, tokens)) = cursor.next_tokens() {
            if line.starts_with('#') || tokens.is_empty() {
                continue;
            }
            match LibraryKeyword::resolve(tokens[0].text()) {
                LibraryKeyword::Def => {
                    let component = LibComponent::parse(&tokens[1..], cursor)?;
                    self.components.push(component);
                }
                LibraryKeyword::Unknown => {
                    return Err(cursor.error(format!("unknown token {}", tokens[0])));
                }
            }
        }
        Ok(())
    }

    /// First component whose name matches.
    pub fn find_by_name(&self, name: &str) -> Option<&LibComponent> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Like [`Library::find_by_name`] but also matches aliases.
    pub fn find_by_name_or_alias(&self, name: &str) -> Option<&LibComponent> {
        self.find_by_name(name).or_else(|| {
            self.components.iter().find(|c| {
                c.aliases
                    .as_ref()
                    .is_some_and(|aliases| aliases.iter().any(|a| a == name))
            })
        })
    }
}

/// Text field record shared by `F0` and `Fn`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldText {
    pub text: String,
    pub pos: Point,
    pub text_size: i64,
    pub text_orientation: TextOrientation,
    pub visibility: bool,
    pub hjustify: TextHJustify,
    pub vjustify: TextVJustify,
    pub italic: bool,
    pub bold: bool,
}

impl FieldText {
    fn parse(args: &Args<'_, '_, '_>) -> Result<FieldText, ParseError> {
        // "CNN": vertical justify, italic flag, bold flag
        let style: Vec<char> = args.opt(7).unwrap_or("C").chars().collect();
        Ok(FieldText {
            text: read_delimited_text(args.str(0)?),
            pos: args.point(1)?,
            text_size: args.coord(3)?,
            text_orientation: TextOrientation::parse(args.str(4)?),
            visibility: args.opt(5) == Some("V"),
            hjustify: args.opt(6).map(TextHJustify::parse).unwrap_or_default(),
            vjustify: TextVJustify::parse(style.first().copied()),
            italic: style.get(1) == Some(&'I'),
            bold: style.get(2) == Some(&'B'),
        })
    }
}

/// Primary field (`F0`): the reference designator.
pub type Field0 = FieldText;

/// Field `n >= 1`: value, footprint, datasheet and user fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldN {
    pub index: u32,
    #[serde(flatten)]
    pub field: FieldText,
    /// User-assigned field name (only present for user fields).
    pub field_name: String,
}

impl FieldN {
    fn parse(index: u32, args: &Args<'_, '_, '_>) -> Result<FieldN, ParseError> {
        let mut field = FieldText::parse(args)?;
        if field.text == "~" {
            field.text.clear();
        }
        Ok(FieldN {
            index,
            field,
            field_name: args.opt(8).map(read_delimited_text).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibComponent {
    pub name: String,
    pub reference: String,
    pub text_offset: i64,
    pub draw_pinnumber: bool,
    pub draw_pinname: bool,
    pub unit_count: u32,
    pub units_locked: bool,
    /// `N` for a normal symbol, `P` for a power symbol.
    pub option_flag: String,
    pub draw: Option<Draw>,
    pub aliases: Option<Vec<String>>,
    pub field: Field0,
    pub fields: Vec<FieldN>,
    pub fplist: Option<Vec<String>>,
}

impl LibComponent {
    /// Parse a `DEF` header (arguments after the keyword) and the block body
    /// up to `ENDDEF`.
    pub(crate) fn parse(
        header: &[Token],
        cursor: &mut LineCursor<'_>,
    ) -> Result<LibComponent, ParseError> {
        let args = Args::new("DEF", header, cursor);
        let mut component = LibComponent {
            name: args.str(0)?.to_string(),
            reference: args.str(1)?.to_string(),
            text_offset: args.coord(3)?,
            draw_pinnumber: args.flag(4, "Y")?,
            draw_pinname: args.flag(5, "Y")?,
            unit_count: args.num(6)?,
            units_locked: args.flag(7, "Y")?,
            option_flag: args.opt(8).unwrap_or("N").to_string(),
            ..Default::default()
        };

        component.parse_body(cursor)?;

        // A tilde-prefixed name hides the reference field.
        if let Some(stripped) = component.name.strip_prefix('~') {
            component.name = stripped.to_string();
            component.field.visibility = false;
        }
        Ok(component)
    }

    fn parse_body(&mut self, cursor: &mut LineCursor<'_>) -> Result<(), ParseError> {
        while let Some((_, tokens)) = cursor.next_tokens() {
            let Some((head, rest)) = tokens.split_first() else {
                continue;
            };

            match ComponentKeyword::resolve(head.text()) {
                ComponentKeyword::EndDef => return Ok(()),
                ComponentKeyword::Draw => {
                    self.draw = Some(Draw::parse(cursor)?);
                }
                ComponentKeyword::Alias => {
                    self.aliases = Some(rest.iter().map(|t| t.text().to_string()).collect());
                }
                ComponentKeyword::Field0 => {
                    self.field = FieldText::parse(&Args::new("F0", rest, cursor))?;
                }
                ComponentKeyword::FieldN(n) => {
                    let field = FieldN::parse(n, &Args::new(head.text(), rest, cursor))?;
                    self.fields.push(field);
                }
                ComponentKeyword::FpList => {
                    self.fplist = Some(parse_fplist(cursor)?);
                }
                ComponentKeyword::Unknown => {
                    let line: Vec<&str> = tokens.iter().map(Token::text).collect();
                    return Err(cursor.error(format!("unknown token {}", line.join(" "))));
                }
            }
        }
        Err(cursor.unterminated("ENDDEF"))
    }

    /// Value field (`F1`) text, if present.
    pub fn value(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.index == 1)
            .map(|f| f.field.text.as_str())
    }

    pub fn is_power(&self) -> bool {
        self.option_flag == "P"
    }

    pub fn bounding_rect(&self, transform: &Transform) -> Option<Rect> {
        self.draw.as_ref().and_then(|d| d.bounding_rect(transform))
    }
}

fn parse_fplist(cursor: &mut LineCursor<'_>) -> Result<Vec<String>, ParseError> {
    let mut filters = Vec::new();
    while let Some((_, tokens)) = cursor.next_tokens() {
        match tokens.first().map(Token::text) {
            Some("$ENDFPLIST") => return Ok(filters),
            Some(filter) => filters.push(filter.to_string()),
            None => {}
        }
    }
    Err(cursor.unterminated("$ENDFPLIST"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::draw::DrawObject;

    const RESISTOR: &str = "EESchema-LIBRARY Version 2.3
#encoding utf-8
#
# R
#
DEF R R 0 0 N Y 1 F N
F0 \"R\" 80 0 50 V V C CNN
F1 \"R\" 0 0 50 V V C CNN
F2 \"\" -70 0 50 V I C CNN
F3 \"~\" 0 0 50 H I C CNN
$FPLIST
 R_*
 R_0402
$ENDFPLIST
DRAW
S -40 -100 40 100 0 1 10 N
X ~ 1 0 150 50 D 50 50 1 1 P
X ~ 2 0 -150 50 U 50 50 1 1 P
ENDDRAW
ENDDEF
#
#End Library
";

    #[test]
    fn test_parse_resistor() {
        let lib = Library::load(RESISTOR).expect("library should parse");
        assert_eq!(lib.version, 2.3);
        assert_eq!(lib.components.len(), 1);

        let r = lib.find_by_name("R").unwrap();
        assert_eq!(r.reference, "R");
        assert!(!r.draw_pinnumber);
        assert!(r.draw_pinname);
        assert_eq!(r.unit_count, 1);
        assert!(!r.units_locked);
        assert_eq!(r.field.text, "R");
        assert_eq!(r.field.text_orientation, TextOrientation::Vert);
        assert_eq!(r.fields.len(), 3);
        assert_eq!(r.fields[2].field.text, "");
        assert!(!r.fields[1].field.visibility);
        assert_eq!(r.fplist, Some(vec!["R_*".to_string(), "R_0402".to_string()]));

        let draw = r.draw.as_ref().unwrap();
        assert_eq!(draw.objects.len(), 3);
        assert!(matches!(draw.objects[0], DrawObject::Rectangle(_)));
        assert_eq!(draw.pins().count(), 2);
    }

    #[test]
    fn test_keyword_resolution() {
        assert_eq!(ComponentKeyword::resolve("F0"), ComponentKeyword::Field0);
        assert_eq!(ComponentKeyword::resolve("F12"), ComponentKeyword::FieldN(12));
        assert_eq!(ComponentKeyword::resolve("Fx"), ComponentKeyword::Unknown);
        assert_eq!(ComponentKeyword::resolve("F"), ComponentKeyword::Unknown);
        assert_eq!(LibraryKeyword::resolve("DEF"), LibraryKeyword::Def);
        assert_eq!(LibraryKeyword::resolve("ENDDEF"), LibraryKeyword::Unknown);
    }

    #[test]
    fn test_bounding_rect_merges_objects() {
        let lib = Library::load(RESISTOR).unwrap();
        let r = lib.find_by_name("R").unwrap();
        let rect = r.bounding_rect(&Transform::IDENTITY).unwrap();
        assert_eq!(rect, Rect::new(-50, -200, 50, 200));
    }
}
