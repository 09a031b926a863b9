//! KiCad legacy schematic parser (`EESchema Schematic File Version n`).
//!
//! Uses the same line cursor and error annotation as the library parser.
//! Block records (`$Descr`, `$Comp`, `$Sheet`, `$Bitmap`) are parsed by
//! nested functions that consume lines up to their own terminator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{read_delimited_text, Args, TextHJustify, TextOrientation, TextVJustify};
use super::cursor::{LineCursor, ParseError};
use super::token::Token;
use crate::geometry::{Point, Transform};

pub const SCHEMATIC_HEADER: &str = "EESchema Schematic File Version ";
/// Newest schematic format this parser understands.
pub const SUPPORTED_SCHEMATIC_VERSION: u32 = 4;

#[derive(Debug, Error)]
pub enum SchematicError {
    #[error("unknown schematic format: {0}")]
    Format(String),
    #[error("schematic format version is greater than supported version: {found} > {supported}")]
    Version { found: u32, supported: u32 },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    pub version: u32,
    /// Library names from `LIBS:` lines, in file order.
    pub libs: Vec<String>,
    pub descr: Option<SheetDescr>,
    pub items: Vec<SchItem>,
}

/// Page settings and title block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetDescr {
    pub paper: String,
    pub width: i64,
    pub height: i64,
    pub encoding: Option<String>,
    pub sheet_number: u32,
    pub sheet_count: u32,
    pub title: String,
    pub date: String,
    pub rev: String,
    pub company: String,
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchItem {
    Component(SchComponent),
    Line(SchLine),
    BusEntry(BusEntry),
    Junction { pos: Point },
    NoConnect { pos: Point },
    Text(SchText),
    Sheet(SheetSymbol),
}

/// A placed library symbol unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchComponent {
    pub lib_name: String,
    pub reference: String,
    pub unit: u32,
    pub convert: u32,
    pub timestamp: String,
    pub pos: Point,
    pub transform: Transform,
    pub fields: Vec<SchField>,
}

impl SchComponent {
    pub fn field(&self, index: u32) -> Option<&SchField> {
        self.fields.iter().find(|f| f.index == index)
    }

    pub fn value(&self) -> Option<&str> {
        self.field(1).map(|f| f.text.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchField {
    pub index: u32,
    pub text: String,
    pub orientation: TextOrientation,
    pub pos: Point,
    pub size: i64,
    pub visible: bool,
    pub hjustify: TextHJustify,
    pub vjustify: TextVJustify,
    pub italic: bool,
    pub bold: bool,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Wire,
    Bus,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchLine {
    pub line_kind: LineKind,
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusEntry {
    /// `true` for bus-to-bus entries, `false` for wire-to-bus.
    pub bus_to_bus: bool,
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextKind {
    Notes,
    Label,
    GlobalLabel,
    HierLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchText {
    pub text_kind: TextKind,
    pub pos: Point,
    /// Spin style 0..=3, counter-clockwise quarter turns.
    pub orientation: i32,
    pub size: i64,
    /// Electrical shape of global/hierarchical labels (`Input`, `Output`, ...).
    pub shape: Option<String>,
    pub italic: bool,
    pub bold: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetSymbol {
    pub pos: Point,
    pub size: Point,
    pub timestamp: String,
    pub name: String,
    pub name_size: i64,
    pub file_name: String,
    pub file_name_size: i64,
    pub pins: Vec<SheetPin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPin {
    pub number: u32,
    pub name: String,
    /// `I`, `O`, `B`, `T` or `U`.
    pub shape: String,
    /// `L`, `R`, `T` or `B`.
    pub side: String,
    pub pos: Point,
    pub size: i64,
}

/// Top-level record keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchKeyword {
    Libs,
    EeLayer,
    Descr,
    Comp,
    Wire,
    Entry,
    Connection,
    NoConn,
    Text,
    Sheet,
    Bitmap,
    End,
    Unknown,
}

impl SchKeyword {
    fn resolve(keyword: &str) -> SchKeyword {
        if keyword.starts_with("LIBS:") {
            return SchKeyword::Libs;
        }
        match keyword {
            "EELAYER" => SchKeyword::EeLayer,
            "$Descr" => SchKeyword::Descr,
            "$Comp" => SchKeyword::Comp,
            "Wire" => SchKeyword::Wire,
            "Entry" => SchKeyword::Entry,
            "Connection" => SchKeyword::Connection,
            "NoConn" => SchKeyword::NoConn,
            "Text" => SchKeyword::Text,
            "$Sheet" => SchKeyword::Sheet,
            "$Bitmap" => SchKeyword::Bitmap,
            "$EndSCHEMATC" => SchKeyword::End,
            _ => SchKeyword::Unknown,
        }
    }
}

impl Schematic {
    pub fn load(content: &str) -> Result<Schematic, SchematicError> {
        let mut cursor = LineCursor::new(content);
        let total = cursor.total();

        let header = cursor.next_line().unwrap_or_default();
        let version = header
            .strip_prefix(SCHEMATIC_HEADER)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .ok_or_else(|| SchematicError::Format(header.to_string()))?;
        if version > SUPPORTED_SCHEMATIC_VERSION {
            return Err(SchematicError::Version {
                found: version,
                supported: SUPPORTED_SCHEMATIC_VERSION,
            });
        }

        let mut schematic = Schematic {
            version,
            ..Default::default()
        };
        schematic
            .parse_body(&mut cursor)
            .map_err(|e| SchematicError::Parse(e.annotate(total)))?;

        tracing::debug!(
            "Parsed schematic version {} with {} items",
            schematic.version,
            schematic.items.len()
        );
        Ok(schematic)
    }

    fn parse_body(&mut self, cursor: &mut LineCursor<'_>) -> Result<(), ParseError> {
        while let Some((line, tokens)) = cursor.next_tokens() {
            if line.starts_with('#') {
                continue;
            }
            let Some((head, rest)) = tokens.split_first() else {
                continue;
            };

            match SchKeyword::resolve(head.text()) {
                SchKeyword::Libs => {
                    let name = line.trim().trim_start_matches("LIBS:");
                    self.libs.push(name.to_string());
                }
                SchKeyword::EeLayer => {}
                SchKeyword::Descr => {
                    let args = Args::new("$Descr", rest, cursor);
                    let descr = SheetDescr {
                        paper: args.str(0)?.to_string(),
                        width: args.num(1)?,
                        height: args.num(2)?,
                        ..Default::default()
                    };
                    self.descr = Some(parse_descr(descr, cursor)?);
                }
                SchKeyword::Comp => {
                    self.items.push(SchItem::Component(parse_component(cursor)?));
                }
                SchKeyword::Wire => {
                    let line_kind = match rest.first().map(Token::text) {
                        Some("Wire") => LineKind::Wire,
                        Some("Bus") => LineKind::Bus,
                        Some("Notes") => LineKind::Notes,
                        other => {
                            return Err(cursor.error(format!(
                                "unknown wire kind {}",
                                other.unwrap_or_default()
                            )))
                        }
                    };
                    let (start, end) = parse_segment(cursor)?;
                    self.items.push(SchItem::Line(SchLine {
                        line_kind,
                        start,
                        end,
                    }));
                }
                SchKeyword::Entry => {
                    let bus_to_bus = rest.first().map(Token::text) == Some("Bus");
                    let (start, end) = parse_segment(cursor)?;
                    self.items.push(SchItem::BusEntry(BusEntry {
                        bus_to_bus,
                        start,
                        end,
                    }));
                }
                SchKeyword::Connection => {
                    let pos = Args::new("Connection", rest, cursor).point(1)?;
                    self.items.push(SchItem::Junction { pos });
                }
                SchKeyword::NoConn => {
                    let pos = Args::new("NoConn", rest, cursor).point(1)?;
                    self.items.push(SchItem::NoConnect { pos });
                }
                SchKeyword::Text => {
                    self.items.push(SchItem::Text(parse_text(rest, cursor)?));
                }
                SchKeyword::Sheet => {
                    self.items.push(SchItem::Sheet(parse_sheet(cursor)?));
                }
                SchKeyword::Bitmap => skip_block(cursor, "$EndBitmap")?,
                SchKeyword::End => return Ok(()),
                SchKeyword::Unknown => {
                    return Err(cursor.error(format!("unknown token {}", head)));
                }
            }
        }
        Ok(())
    }

    pub fn components(&self) -> impl Iterator<Item = &SchComponent> {
        self.items.iter().filter_map(|item| match item {
            SchItem::Component(c) => Some(c),
            _ => None,
        })
    }

    pub fn find_component(&self, reference: &str) -> Option<&SchComponent> {
        self.components().find(|c| c.reference == reference)
    }
}

fn skip_block(cursor: &mut LineCursor<'_>, terminator: &str) -> Result<(), ParseError> {
    while let Some(line) = cursor.next_line() {
        if line.trim() == terminator {
            return Ok(());
        }
    }
    Err(cursor.unterminated(terminator))
}

/// Coordinate line following `Wire ...` and `Entry ...` headers.
fn parse_segment(cursor: &mut LineCursor<'_>) -> Result<(Point, Point), ParseError> {
    let Some((_, tokens)) = cursor.next_tokens() else {
        return Err(cursor.unterminated("segment coordinates"));
    };
    let args = Args::new("segment", &tokens, cursor);
    Ok((args.point(0)?, args.point(2)?))
}

fn parse_descr(
    mut descr: SheetDescr,
    cursor: &mut LineCursor<'_>,
) -> Result<SheetDescr, ParseError> {
    while let Some((_, tokens)) = cursor.next_tokens() {
        let Some((head, rest)) = tokens.split_first() else {
            continue;
        };
        let value = || rest.first().map(|t| read_delimited_text(t.text())).unwrap_or_default();

        match head.text() {
            "$EndDescr" => return Ok(descr),
            "encoding" => descr.encoding = Some(value()),
            "Sheet" => {
                let args = Args::new("Sheet", rest, cursor);
                descr.sheet_number = args.num(0)?;
                descr.sheet_count = args.num(1)?;
            }
            "Title" => descr.title = value(),
            "Date" => descr.date = value(),
            "Rev" => descr.rev = value(),
            "Comp" => descr.company = value(),
            other if other.starts_with("Comment") => descr.comments.push(value()),
            other => return Err(cursor.error(format!("unknown token {} in $Descr", other))),
        }
    }
    Err(cursor.unterminated("$EndDescr"))
}

fn parse_component(cursor: &mut LineCursor<'_>) -> Result<SchComponent, ParseError> {
    let mut component = SchComponent {
        convert: 1,
        unit: 1,
        transform: Transform::LIBRARY_DEFAULT,
        ..Default::default()
    };

    while let Some((_, tokens)) = cursor.next_tokens() {
        let Some((head, rest)) = tokens.split_first() else {
            continue;
        };
        let args = Args::new(head.text(), rest, cursor);

        match head.text() {
            "$EndComp" => return Ok(component),
            "L" => {
                component.lib_name = args.str(0)?.to_string();
                component.reference = args.str(1)?.to_string();
            }
            "U" => {
                component.unit = args.num(0)?;
                component.convert = args.num(1)?;
                component.timestamp = args.opt(2).unwrap_or_default().to_string();
            }
            "P" => component.pos = args.point(0)?,
            "AR" => {}
            "F" => component.fields.push(parse_component_field(&args)?),
            _ if head.is_number() => {
                // "unit x y" repeats the placement; four numbers are the
                // orientation matrix.
                let all = Args::new("orientation", &tokens, cursor);
                if tokens.len() == 4 {
                    let mut m = [0i32; 4];
                    for (i, slot) in m.iter_mut().enumerate() {
                        *slot = all.num(i)?;
                        if !(-1..=1).contains(&*slot) {
                            return Err(all.error(format!("invalid matrix entry {}", slot)));
                        }
                    }
                    component.transform = Transform::new(m[0], m[1], m[2], m[3]);
                } else if tokens.len() != 3 {
                    return Err(cursor.error("malformed component placement line"));
                }
            }
            other => {
                return Err(cursor.error(format!("unknown token {} in $Comp", other)));
            }
        }
    }
    Err(cursor.unterminated("$EndComp"))
}

fn parse_component_field(args: &Args<'_, '_, '_>) -> Result<SchField, ParseError> {
    // F n "text" orient x y size flags hjust vjust+style ["name"]
    let flags = args.str(6)?;
    let visible = u32::from_str_radix(flags, 16)
        .map(|f| f & 1 == 0)
        .map_err(|_| args.error(format!("invalid field flags '{}'", flags)))?;
    let style: Vec<char> = args.opt(8).unwrap_or("C").chars().collect();

    Ok(SchField {
        index: args.num(0)?,
        text: read_delimited_text(args.str(1)?),
        orientation: TextOrientation::parse(args.str(2)?),
        pos: args.point(3)?,
        size: args.num(5)?,
        visible,
        hjustify: args.opt(7).map(TextHJustify::parse).unwrap_or_default(),
        vjustify: TextVJustify::parse(style.first().copied()),
        italic: style.get(1) == Some(&'I'),
        bold: style.get(2) == Some(&'B'),
        name: args.opt(9).map(read_delimited_text),
    })
}

fn parse_text(rest: &[Token], cursor: &mut LineCursor<'_>) -> Result<SchText, ParseError> {
    let args = Args::new("Text", rest, cursor);
    let text_kind = match args.str(0)? {
        "Notes" => TextKind::Notes,
        "Label" => TextKind::Label,
        "GLabel" => TextKind::GlobalLabel,
        "HLabel" => TextKind::HierLabel,
        other => return Err(args.error(format!("unknown text kind {}", other))),
    };

    let pos = args.point(1)?;
    let orientation = args.num(3)?;
    let size = args.num(4)?;
    // Global and hierarchical labels carry an extra shape argument.
    let (shape, style_at) = match text_kind {
        TextKind::GlobalLabel | TextKind::HierLabel => (args.opt(5).map(str::to_string), 6),
        _ => (None, 5),
    };
    let italic = args.opt(style_at) == Some("Italic");
    let bold = args
        .opt(style_at + 1)
        .and_then(|s| s.parse::<i32>().ok())
        .is_some_and(|b| b != 0);

    let Some(body) = cursor.next_line() else {
        return Err(cursor.unterminated("text body"));
    };

    Ok(SchText {
        text_kind,
        pos,
        orientation,
        size,
        shape,
        italic,
        bold,
        text: body.replace("\\n", "\n"),
    })
}

fn parse_sheet(cursor: &mut LineCursor<'_>) -> Result<SheetSymbol, ParseError> {
    let mut sheet = SheetSymbol::default();

    while let Some((_, tokens)) = cursor.next_tokens() {
        let Some((head, rest)) = tokens.split_first() else {
            continue;
        };
        let args = Args::new(head.text(), rest, cursor);

        match head.text() {
            "$EndSheet" => return Ok(sheet),
            "S" => {
                sheet.pos = args.point(0)?;
                sheet.size = args.point(2)?;
            }
            "U" => sheet.timestamp = args.str(0)?.to_string(),
            "F0" => {
                sheet.name = read_delimited_text(args.str(0)?);
                sheet.name_size = args.num(1)?;
            }
            "F1" => {
                sheet.file_name = read_delimited_text(args.str(0)?);
                sheet.file_name_size = args.num(1)?;
            }
            other => match other.strip_prefix('F').and_then(|n| n.parse::<u32>().ok()) {
                Some(number) => sheet.pins.push(SheetPin {
                    number,
                    name: read_delimited_text(args.str(0)?),
                    shape: args.str(1)?.to_string(),
                    side: args.str(2)?.to_string(),
                    pos: args.point(3)?,
                    size: args.num(5)?,
                }),
                None => {
                    return Err(cursor.error(format!("unknown token {} in $Sheet", other)));
                }
            },
        }
    }
    Err(cursor.unterminated("$EndSheet"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_resolution() {
        assert_eq!(SchKeyword::resolve("LIBS:device"), SchKeyword::Libs);
        assert_eq!(SchKeyword::resolve("$Comp"), SchKeyword::Comp);
        assert_eq!(SchKeyword::resolve("Kmarq"), SchKeyword::Unknown);
    }

    #[test]
    fn test_component_field_visibility_flags() {
        let content = "EESchema Schematic File Version 2
$Comp
L R R1
U 1 1 5A1B2C3D
P 5000 3000
F 0 \"R1\" V 5080 3000 50  0000 C CNN
F 2 \"\" V 4930 3000 50  0001 C CNN
\t1    5000 3000
\t0    1    1    0
$EndComp
$EndSCHEMATC
";
        let sch = Schematic::load(content).unwrap();
        let r1 = sch.find_component("R1").unwrap();
        assert_eq!(r1.lib_name, "R");
        assert_eq!(r1.timestamp, "5A1B2C3D");
        assert_eq!(r1.transform, Transform::new(0, 1, 1, 0));
        assert!(r1.field(0).unwrap().visible);
        assert!(!r1.field(2).unwrap().visible);
    }

    #[test]
    fn test_orientation_matrix_entries_are_unit() {
        let content = "EESchema Schematic File Version 4
$Comp
L R R1
	1    5000 3000
	2    0    0    -1
$EndComp
$EndSCHEMATC
";
        match Schematic::load(content).unwrap_err() {
            SchematicError::Parse(e) => assert_eq!(e.line, 5),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_component() {
        let content = "EESchema Schematic File Version 2\n$Comp\nL R R1";
        let err = Schematic::load(content).unwrap_err();
        match err {
            SchematicError::Parse(e) => assert_eq!(e.line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
