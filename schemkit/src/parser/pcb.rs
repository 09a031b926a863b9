//! KiCad board parser (`.kicad_pcb`).
//!
//! Recursive descent over the lexeme stream produced by [`SexpLexer`].
//! Every `parse_*` section routine is entered just after the list head has
//! been consumed and returns after consuming the matching `)`.
//!
//! Format details:
//! - All values are in millimeters
//! - Layers are identified by ordinal number and canonical name
//! - Traces are stored as `(segment ...)` elements
//! - Footprint children are relative to the footprint's `at`

use thiserror::Error;
use tracing::debug;

use crate::parser::pcb_schema::*;
use crate::parser::sexp::{LexError, Lexeme, LexemeKind, SexpLexer};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("Expecting {expected} at line {line}, found '{found}'")]
    Expecting {
        expected: String,
        found: String,
        line: usize,
    },
    #[error("Unexpected end of file, expecting {0}")]
    UnexpectedEof(String),
}

impl Board {
    /// Parse the text of a `.kicad_pcb` file.
    pub fn load(input: &str) -> Result<Board, BoardError> {
        let lexemes = SexpLexer::tokenize(input)?;
        let mut parser = BoardParser::new(lexemes);
        let board = parser.parse_board()?;
        debug!(
            modules = board.modules.len(),
            nets = board.nets.len(),
            segments = board.segments.len(),
            "parsed board"
        );
        Ok(board)
    }
}

/// One element inside a list: either a sub-list (head already consumed)
/// or a bare atom.
enum Item {
    List(String),
    Atom(Lexeme),
}

struct BoardParser {
    lexemes: Vec<Lexeme>,
    pos: usize,
}

impl BoardParser {
    fn new(lexemes: Vec<Lexeme>) -> Self {
        Self { lexemes, pos: 0 }
    }

    fn parse_board(&mut self) -> Result<Board, BoardError> {
        self.need_left()?;
        let head = self.need_atom("kicad_pcb")?;
        if head.text() != "kicad_pcb" {
            return Err(expecting("kicad_pcb", &head));
        }

        let mut board = Board::default();
        while let Some(item) = self.next_item()? {
            let tag = match item {
                Item::List(tag) => tag,
                Item::Atom(lexeme) => return Err(expecting("(", &lexeme)),
            };
            match tag.as_str() {
                "version" => {
                    board.version = Some(self.need_text("version")?);
                    self.skip_rest()?;
                }
                "host" => board.host = Some(self.parse_host()?),
                "general" => board.general = self.parse_general()?,
                "page" => {
                    board.page = Some(self.need_text("page size")?);
                    self.skip_rest()?;
                }
                "layers" => board.layers = self.parse_layers()?,
                "net" => board.nets.push(self.parse_net()?),
                "net_class" => board.net_classes.push(self.parse_net_class()?),
                "module" | "footprint" => board.modules.push(self.parse_module()?),
                "gr_line" | "gr_arc" | "gr_circle" | "gr_poly" | "gr_curve" | "gr_text" => {
                    board.drawings.push(self.parse_graphic(&tag)?)
                }
                "segment" => board.segments.push(self.parse_segment()?),
                "via" => board.vias.push(self.parse_via()?),
                "zone" => board.zones.push(self.parse_zone()?),
                _ => {
                    debug!(section = %tag, "skipping board section");
                    self.skip_rest()?;
                }
            }
        }
        Ok(board)
    }

    fn parse_host(&mut self) -> Result<BoardHost, BoardError> {
        let name = self.need_text("host name")?;
        let version = match self.peek() {
            Some(l) if l.is_atom() => self.need_text("host version")?,
            _ => String::new(),
        };
        self.skip_rest()?;
        Ok(BoardHost { name, version })
    }

    fn parse_general(&mut self) -> Result<BoardGeneral, BoardError> {
        let mut general = BoardGeneral::default();
        while let Some(item) = self.next_item()? {
            let Item::List(tag) = item else { continue };
            match tag.as_str() {
                "thickness" => general.thickness = self.number_rest("thickness")?,
                "links" => general.links = self.int_rest("links")?,
                "no_connects" => general.no_connects = self.int_rest("no_connects")?,
                "drawings" => general.drawings = self.int_rest("drawings")?,
                "tracks" => general.tracks = self.int_rest("tracks")?,
                "zones" => general.zones = self.int_rest("zones")?,
                "modules" | "footprints" => general.modules = self.int_rest("modules")?,
                "nets" => general.nets = self.int_rest("nets")?,
                _ => self.skip_rest()?,
            }
        }
        Ok(general)
    }

    fn parse_layers(&mut self) -> Result<Vec<BoardLayer>, BoardError> {
        let mut layers = Vec::new();
        while let Some(item) = self.next_item()? {
            let Item::List(ordinal) = item else { continue };
            let ordinal = ordinal.parse::<u32>().map_err(|_| BoardError::Expecting {
                expected: "layer number".to_string(),
                found: ordinal.clone(),
                line: self.line(),
            })?;
            let name = self.need_text("layer name")?;
            let layer_type = match self.need_text("layer type")?.as_str() {
                "power" => LayerType::Power,
                "mixed" => LayerType::Mixed,
                "jumper" => LayerType::Jumper,
                "user" => LayerType::User,
                _ => LayerType::Signal,
            };
            let user_name = match self.peek() {
                Some(l) if l.is_atom() => Some(self.need_text("layer user name")?),
                _ => None,
            };
            self.skip_rest()?;
            layers.push(BoardLayer {
                ordinal,
                name,
                layer_type,
                user_name,
            });
        }
        Ok(layers)
    }

    fn parse_net(&mut self) -> Result<BoardNet, BoardError> {
        let id = self.need_int("net number")?;
        let name = match self.peek() {
            Some(l) if l.is_atom() => self.need_text("net name")?,
            _ => String::new(),
        };
        self.skip_rest()?;
        Ok(BoardNet { id, name })
    }

    fn parse_net_class(&mut self) -> Result<NetClass, BoardError> {
        let mut class = NetClass {
            name: self.need_text("net class name")?,
            ..Default::default()
        };
        while let Some(item) = self.next_item()? {
            match item {
                Item::Atom(lexeme) => class.description = lexeme.text().to_string(),
                Item::List(tag) => match tag.as_str() {
                    "clearance" => class.clearance = Some(self.number_rest("clearance")?),
                    "trace_width" => class.trace_width = Some(self.number_rest("trace_width")?),
                    "via_dia" => class.via_dia = Some(self.number_rest("via_dia")?),
                    "via_drill" => class.via_drill = Some(self.number_rest("via_drill")?),
                    "uvia_dia" => class.uvia_dia = Some(self.number_rest("uvia_dia")?),
                    "uvia_drill" => class.uvia_drill = Some(self.number_rest("uvia_drill")?),
                    "add_net" => {
                        class.nets.push(self.need_text("net name")?);
                        self.skip_rest()?;
                    }
                    _ => self.skip_rest()?,
                },
            }
        }
        Ok(class)
    }

    fn parse_module(&mut self) -> Result<Module, BoardError> {
        let mut module = Module {
            name: self.need_text("footprint name")?,
            ..Default::default()
        };
        while let Some(item) = self.next_item()? {
            match item {
                Item::Atom(lexeme) => {
                    if lexeme.text() == "locked" {
                        module.locked = true;
                    }
                }
                Item::List(tag) => match tag.as_str() {
                    "layer" => module.layer = self.text_rest("layer")?,
                    "at" => (module.at, module.angle) = self.at_rest()?,
                    "descr" => module.descr = Some(self.text_rest("description")?),
                    "fp_text" => {
                        let text = self.parse_text(true)?;
                        match text.text_kind.as_deref() {
                            Some("reference") => module.reference = text.text.clone(),
                            Some("value") => module.value = text.text.clone(),
                            _ => {}
                        }
                        module.texts.push(text);
                    }
                    "property" => {
                        let key = self.need_text("property name")?;
                        let value = self.need_text("property value")?;
                        match key.as_str() {
                            "Reference" => module.reference = value,
                            "Value" => module.value = value,
                            _ => {}
                        }
                        self.skip_rest()?;
                    }
                    "fp_line" | "fp_arc" | "fp_circle" | "fp_poly" | "fp_curve" => {
                        module.graphics.push(self.parse_graphic(&tag)?)
                    }
                    "pad" => module.pads.push(self.parse_pad()?),
                    _ => self.skip_rest()?,
                },
            }
        }
        Ok(module)
    }

    /// `fp_text` carries a kind before the text; `gr_text` does not.
    fn parse_text(&mut self, with_kind: bool) -> Result<BoardText, BoardError> {
        let mut text = BoardText {
            size: BoardPoint::new(1.0, 1.0),
            ..Default::default()
        };
        if with_kind {
            text.text_kind = Some(self.need_text("text type")?);
        }
        text.text = self.need_text("text")?;

        while let Some(item) = self.next_item()? {
            match item {
                Item::Atom(lexeme) => {
                    if lexeme.text() == "hide" {
                        text.hidden = true;
                    }
                }
                Item::List(tag) => match tag.as_str() {
                    "at" => (text.at, text.angle) = self.at_rest()?,
                    "layer" => text.layer = self.text_rest("layer")?,
                    "effects" => self.parse_effects(&mut text)?,
                    _ => self.skip_rest()?,
                },
            }
        }
        Ok(text)
    }

    fn parse_effects(&mut self, text: &mut BoardText) -> Result<(), BoardError> {
        while let Some(item) = self.next_item()? {
            match item {
                Item::Atom(lexeme) => {
                    if lexeme.text() == "hide" {
                        text.hidden = true;
                    }
                }
                Item::List(tag) => match tag.as_str() {
                    "font" => {
                        while let Some(item) = self.next_item()? {
                            match item {
                                Item::Atom(lexeme) => {
                                    if lexeme.text() == "italic" {
                                        text.italic = true;
                                    }
                                }
                                Item::List(tag) => match tag.as_str() {
                                    "size" => text.size = self.xy_rest()?,
                                    "thickness" => text.thickness = self.number_rest("thickness")?,
                                    _ => self.skip_rest()?,
                                },
                            }
                        }
                    }
                    "justify" => {
                        while let Some(item) = self.next_item()? {
                            if let Item::Atom(lexeme) = item {
                                text.justify.push(lexeme.text().to_string());
                            } else {
                                self.skip_rest()?;
                            }
                        }
                    }
                    _ => self.skip_rest()?,
                },
            }
        }
        Ok(())
    }

    fn parse_graphic(&mut self, tag: &str) -> Result<BoardGraphic, BoardError> {
        let kind = tag.trim_start_matches("gr_").trim_start_matches("fp_");
        if kind == "text" {
            let text = self.parse_text(false)?;
            let layer = text.layer.clone();
            return Ok(BoardGraphic {
                shape: GraphicShape::Text(text),
                layer,
                width: 0.0,
            });
        }

        let mut start = BoardPoint::default();
        let mut end = BoardPoint::default();
        let mut angle = 0.0;
        let mut points = Vec::new();
        let mut layer = String::new();
        let mut width = 0.0;

        while let Some(item) = self.next_item()? {
            let Item::List(tag) = item else { continue };
            match tag.as_str() {
                "start" | "center" => start = self.xy_rest()?,
                "end" => end = self.xy_rest()?,
                "angle" => angle = self.number_rest("angle")?,
                "pts" => points = self.pts_rest()?,
                "layer" => layer = self.text_rest("layer")?,
                "width" => width = self.number_rest("width")?,
                _ => self.skip_rest()?,
            }
        }

        let shape = match kind {
            "circle" => GraphicShape::Circle { center: start, end },
            "arc" => GraphicShape::Arc {
                center: start,
                start: end,
                angle,
            },
            "poly" => GraphicShape::Poly { points },
            "curve" => GraphicShape::Curve { points },
            _ => GraphicShape::Line { start, end },
        };
        Ok(BoardGraphic {
            shape,
            layer,
            width,
        })
    }

    fn parse_pad(&mut self) -> Result<Pad, BoardError> {
        let mut pad = Pad {
            number: self.need_text("pad number")?,
            ..Default::default()
        };
        pad.pad_type = match self.need_text("pad type")?.as_str() {
            "thru_hole" => PadType::ThruHole,
            "smd" => PadType::Smd,
            "connect" => PadType::Connect,
            "np_thru_hole" => PadType::NpThruHole,
            _ => PadType::Smd,
        };
        pad.shape = match self.need_text("pad shape")?.as_str() {
            "rect" => PadShape::Rect,
            "oval" => PadShape::Oval,
            "trapezoid" => PadShape::Trapezoid,
            "roundrect" => PadShape::RoundRect,
            "custom" => PadShape::Custom,
            _ => PadShape::Circle,
        };

        while let Some(item) = self.next_item()? {
            let Item::List(tag) = item else { continue };
            match tag.as_str() {
                "at" => (pad.at, pad.angle) = self.at_rest()?,
                "size" => pad.size = self.xy_rest()?,
                "drill" => pad.drill = self.drill_rest()?,
                "layers" => pad.layers = self.texts_rest()?,
                "net" => pad.net = Some(self.parse_net()?),
                _ => self.skip_rest()?,
            }
        }
        Ok(pad)
    }

    fn parse_segment(&mut self) -> Result<Segment, BoardError> {
        let mut segment = Segment::default();
        while let Some(item) = self.next_item()? {
            let Item::List(tag) = item else { continue };
            match tag.as_str() {
                "start" => segment.start = self.xy_rest()?,
                "end" => segment.end = self.xy_rest()?,
                "width" => segment.width = self.number_rest("width")?,
                "layer" => segment.layer = self.text_rest("layer")?,
                "net" => segment.net = self.int_rest("net")?,
                _ => self.skip_rest()?,
            }
        }
        Ok(segment)
    }

    fn parse_via(&mut self) -> Result<Via, BoardError> {
        let mut via = Via::default();
        while let Some(item) = self.next_item()? {
            let Item::List(tag) = item else { continue };
            match tag.as_str() {
                "at" => via.at = self.at_rest()?.0,
                "size" => via.size = self.number_rest("size")?,
                "drill" => via.drill = Some(self.number_rest("drill")?),
                "layers" => via.layers = self.texts_rest()?,
                "net" => via.net = self.int_rest("net")?,
                _ => self.skip_rest()?,
            }
        }
        Ok(via)
    }

    fn parse_zone(&mut self) -> Result<Zone, BoardError> {
        let mut zone = Zone::default();
        while let Some(item) = self.next_item()? {
            let Item::List(tag) = item else { continue };
            match tag.as_str() {
                "net" => zone.net = self.int_rest("net")?,
                "net_name" => zone.net_name = self.text_rest("net name")?,
                "layer" => zone.layer = self.text_rest("layer")?,
                "layers" => {
                    let layers = self.texts_rest()?;
                    if let Some(first) = layers.into_iter().next() {
                        zone.layer = first;
                    }
                }
                "min_thickness" => zone.min_thickness = Some(self.number_rest("min_thickness")?),
                "polygon" => zone.outline = self.polygon_rest()?,
                "filled_polygon" => {
                    let points = self.polygon_rest()?;
                    zone.filled_polygons.push(points);
                }
                _ => self.skip_rest()?,
            }
        }
        Ok(zone)
    }

    // ---- list value helpers; each consumes through the closing `)` ----

    fn number_rest(&mut self, what: &str) -> Result<f64, BoardError> {
        let value = self.need_number(what)?;
        self.skip_rest()?;
        Ok(value)
    }

    fn int_rest(&mut self, what: &str) -> Result<u32, BoardError> {
        let value = self.need_int(what)?;
        self.skip_rest()?;
        Ok(value)
    }

    fn text_rest(&mut self, what: &str) -> Result<String, BoardError> {
        let value = self.need_text(what)?;
        self.skip_rest()?;
        Ok(value)
    }

    fn texts_rest(&mut self) -> Result<Vec<String>, BoardError> {
        let mut out = Vec::new();
        while let Some(item) = self.next_item()? {
            match item {
                Item::Atom(lexeme) => out.push(lexeme.token.into_text()),
                Item::List(_) => self.skip_rest()?,
            }
        }
        Ok(out)
    }

    fn xy_rest(&mut self) -> Result<BoardPoint, BoardError> {
        let x = self.need_number("x")?;
        let y = self.need_number("y")?;
        self.skip_rest()?;
        Ok(BoardPoint::new(x, y))
    }

    /// `(at x y [angle])`
    fn at_rest(&mut self) -> Result<(BoardPoint, f64), BoardError> {
        let x = self.need_number("x")?;
        let y = self.need_number("y")?;
        let angle = match self.peek() {
            Some(l) if l.kind == LexemeKind::Number => self.need_number("angle")?,
            _ => 0.0,
        };
        self.skip_rest()?;
        Ok((BoardPoint::new(x, y), angle))
    }

    /// `(drill d)`, `(drill oval w h)`, `(drill d (offset x y))`
    fn drill_rest(&mut self) -> Result<Option<f64>, BoardError> {
        let mut diameter = None;
        while let Some(item) = self.next_item()? {
            match item {
                Item::Atom(lexeme) if lexeme.kind == LexemeKind::Number => {
                    if diameter.is_none() {
                        diameter = Some(parse_f64(&lexeme)?);
                    }
                }
                Item::Atom(_) => {}
                Item::List(_) => self.skip_rest()?,
            }
        }
        Ok(diameter)
    }

    /// `(pts (xy x y) ...)`
    fn pts_rest(&mut self) -> Result<Vec<BoardPoint>, BoardError> {
        let mut points = Vec::new();
        while let Some(item) = self.next_item()? {
            match item {
                Item::List(tag) if tag == "xy" => points.push(self.xy_rest()?),
                Item::List(_) => self.skip_rest()?,
                Item::Atom(_) => {}
            }
        }
        Ok(points)
    }

    /// `(polygon (pts ...))` and `(filled_polygon (layer ..) (pts ...))`
    fn polygon_rest(&mut self) -> Result<Vec<BoardPoint>, BoardError> {
        let mut points = Vec::new();
        while let Some(item) = self.next_item()? {
            match item {
                Item::List(tag) if tag == "pts" => points = self.pts_rest()?,
                Item::List(_) => self.skip_rest()?,
                Item::Atom(_) => {}
            }
        }
        Ok(points)
    }

    // ---- token level ----

    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn line(&self) -> usize {
        self.lexemes
            .get(self.pos.saturating_sub(1))
            .map(Lexeme::line)
            .unwrap_or(1)
    }

    fn next(&mut self, expected: &str) -> Result<Lexeme, BoardError> {
        let lexeme = self
            .lexemes
            .get(self.pos)
            .cloned()
            .ok_or_else(|| BoardError::UnexpectedEof(expected.to_string()))?;
        self.pos += 1;
        Ok(lexeme)
    }

    /// Next element of the current list, or `None` after consuming its `)`.
    fn next_item(&mut self) -> Result<Option<Item>, BoardError> {
        let lexeme = self.next(")")?;
        match lexeme.kind {
            LexemeKind::Right => Ok(None),
            LexemeKind::Left => {
                let head = self.need_atom("list name")?;
                Ok(Some(Item::List(head.token.into_text())))
            }
            _ => Ok(Some(Item::Atom(lexeme))),
        }
    }

    fn need_left(&mut self) -> Result<(), BoardError> {
        let lexeme = self.next("(")?;
        if lexeme.is_left() {
            Ok(())
        } else {
            Err(expecting("(", &lexeme))
        }
    }

    fn need_atom(&mut self, what: &str) -> Result<Lexeme, BoardError> {
        let lexeme = self.next(what)?;
        if lexeme.is_atom() {
            Ok(lexeme)
        } else {
            Err(expecting(what, &lexeme))
        }
    }

    fn need_text(&mut self, what: &str) -> Result<String, BoardError> {
        Ok(self.need_atom(what)?.token.into_text())
    }

    fn need_number(&mut self, what: &str) -> Result<f64, BoardError> {
        let lexeme = self.next(what)?;
        if lexeme.kind != LexemeKind::Number {
            return Err(expecting(what, &lexeme));
        }
        parse_f64(&lexeme)
    }

    fn need_int(&mut self, what: &str) -> Result<u32, BoardError> {
        let lexeme = self.next(what)?;
        lexeme
            .text()
            .parse::<u32>()
            .map_err(|_| expecting(what, &lexeme))
    }

    /// Consume up to and including the `)` closing the current list,
    /// skipping nested lists.
    fn skip_rest(&mut self) -> Result<(), BoardError> {
        let mut depth = 1usize;
        while depth > 0 {
            let lexeme = self.next(")")?;
            match lexeme.kind {
                LexemeKind::Left => depth += 1,
                LexemeKind::Right => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }
}

fn expecting(expected: &str, found: &Lexeme) -> BoardError {
    BoardError::Expecting {
        expected: expected.to_string(),
        found: found.text().to_string(),
        line: found.line(),
    }
}

fn parse_f64(lexeme: &Lexeme) -> Result<f64, BoardError> {
    lexeme
        .text()
        .parse::<f64>()
        .map_err(|_| expecting("number", lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"(kicad_pcb (version 20171130) (host pcbnew 5.1.9)
  (general (thickness 1.6) (drawings 1) (tracks 1) (zones 0) (modules 1) (nets 2))
  (page A4)
  (layers
    (0 F.Cu signal)
    (31 B.Cu signal)
    (44 Edge.Cuts user)
  )
  (setup (last_trace_width 0.25) (pcbplotparams (layerselection 0x010fc_ffffffff)))
  (net 0 "")
  (net 1 GND)
  (module Resistor_SMD:R_0603 (layer F.Cu) (tedit 5B301BBD) (at 100 50 90)
    (fp_text reference R1 (at 0 -1.43 90) (layer F.SilkS)
      (effects (font (size 1 1) (thickness 0.15)))
    )
    (fp_text value 10k (at 0 1.43 90) (layer F.Fab) hide
      (effects (font (size 1 1) (thickness 0.15)) (justify left))
    )
    (fp_line (start -0.8 0.4) (end 0.8 0.4) (layer F.Fab) (width 0.1))
    (pad 1 smd roundrect (at -0.7875 0 90) (size 0.875 0.95) (layers F.Cu F.Paste F.Mask)
      (roundrect_rratio 0.25) (net 1 GND))
    (pad 2 thru_hole circle (at 0.7875 0 90) (size 1.5 1.5) (drill 0.8) (layers *.Cu *.Mask))
  )
  (gr_line (start 0 0) (end 10 0) (layer Edge.Cuts) (width 0.05) (tstamp 5C1))
  (segment (start 99 50) (end 90 50) (width 0.25) (layer F.Cu) (net 1) (tstamp 5C2))
  (via (at 90 50) (size 0.8) (drill 0.4) (layers F.Cu B.Cu) (net 1))
)
"#;

    #[test]
    fn test_parse_small_board() {
        let board = Board::load(SMALL).unwrap();
        assert_eq!(board.version.as_deref(), Some("20171130"));
        assert_eq!(board.host.as_ref().unwrap().version, "5.1.9");
        assert_eq!(board.general.thickness, 1.6);
        assert_eq!(board.page.as_deref(), Some("A4"));
        assert_eq!(board.layers.len(), 3);
        assert_eq!(board.layers[2].layer_type, LayerType::User);
        assert_eq!(board.nets.len(), 2);
        assert_eq!(board.net_name(1), Some("GND"));
        assert_eq!(board.net_name(0), Some(""));

        let module = &board.modules[0];
        assert_eq!(module.name, "Resistor_SMD:R_0603");
        assert_eq!(module.angle, 90.0);
        assert_eq!(module.reference, "R1");
        assert_eq!(module.value, "10k");
        assert!(module.texts[1].hidden);
        assert_eq!(module.texts[1].justify, vec!["left".to_string()]);
        assert_eq!(module.graphics.len(), 1);
        assert_eq!(module.pads.len(), 2);
        assert_eq!(module.pads[0].shape, PadShape::RoundRect);
        assert_eq!(module.pads[0].net.as_ref().unwrap().name, "GND");
        assert_eq!(module.pads[1].drill, Some(0.8));

        assert_eq!(board.drawings.len(), 1);
        assert_eq!(board.segments[0].net, 1);
        assert_eq!(board.vias[0].layers, vec!["F.Cu", "B.Cu"]);
    }

    #[test]
    fn test_wrong_root() {
        let err = Board::load("(kicad_sch (version 1))").unwrap_err();
        assert!(matches!(err, BoardError::Expecting { ref expected, .. } if expected == "kicad_pcb"));
    }

    #[test]
    fn test_unbalanced_eof() {
        let err = Board::load("(kicad_pcb (version 4)").unwrap_err();
        assert!(matches!(err, BoardError::UnexpectedEof(_)));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let err = Board::load("(kicad_pcb\n(segment (start a 0))\n)").unwrap_err();
        match err {
            BoardError::Expecting { found, line, .. } => {
                assert_eq!(found, "a");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
