//! Stroked text.
//!
//! Glyphs are pen strokes in a unit em box: x grows to the right from the
//! glyph origin, y grows downward with the baseline at 0, so the body of a
//! capital letter sits at negative y. Text is emitted only as
//! `move_to`/`line_to` paths.

use std::collections::HashMap;

use super::commands::{PlotPoint, Plotter};
use crate::parser::common::{TextHJustify, TextVJustify};

/// Horizontal shear applied to italic text, per unit of height.
pub const ITALIC_TILT: f64 = 1.0 / 8.0;
/// Distance between baselines of multi-line text, in text heights.
pub const LINE_PITCH: f64 = 1.6;
/// Advance of characters the font has no glyph for, in text heights.
pub const MISSING_GLYPH_ADVANCE: f64 = 0.6;

/// Scale of the Hershey coordinate grid.
const HERSHEY_SCALE: f64 = 1.0 / 21.0;
/// Baseline shift of the Hershey grid.
const HERSHEY_OFFSET: i32 = -10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    /// Pen-down polylines.
    pub strokes: Vec<Vec<(f64, f64)>>,
    pub advance: f64,
}

impl Glyph {
    /// Decode a glyph in KiCad's Hershey string encoding.
    ///
    /// The first two characters are the left and right bounds, then each
    /// pair is a coordinate relative to `R`; the pair `" R"` lifts the pen.
    pub fn from_hershey(data: &str) -> Option<Glyph> {
        let bytes = data.as_bytes();
        if bytes.len() < 2 {
            return None;
        }
        let coord = |b: u8| (b as i32) - (b'R' as i32);
        let start_x = coord(bytes[0]) as f64 * HERSHEY_SCALE;
        let end_x = coord(bytes[1]) as f64 * HERSHEY_SCALE;

        let mut strokes = Vec::new();
        let mut stroke: Vec<(f64, f64)> = Vec::new();
        for pair in bytes[2..].chunks_exact(2) {
            if pair == b" R" {
                if stroke.len() > 1 {
                    strokes.push(std::mem::take(&mut stroke));
                } else {
                    stroke.clear();
                }
                continue;
            }
            let x = coord(pair[0]) as f64 * HERSHEY_SCALE - start_x;
            let y = (coord(pair[1]) + HERSHEY_OFFSET) as f64 * HERSHEY_SCALE;
            stroke.push((x, y));
        }
        if stroke.len() > 1 {
            strokes.push(stroke);
        }

        Some(Glyph {
            strokes,
            advance: end_x - start_x,
        })
    }
}

/// Source of glyphs for stroked text.
pub trait StrokeFont {
    fn glyph(&self, c: char) -> Option<&Glyph>;
}

/// Character-to-glyph map.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from consecutive Hershey strings, the first one
    /// describing `first`. Undecodable entries are left out.
    pub fn from_hershey(first: char, data: &[&str]) -> Self {
        let mut table = GlyphTable::new();
        for (offset, s) in data.iter().enumerate() {
            let Some(c) = char::from_u32(first as u32 + offset as u32) else {
                continue;
            };
            if let Some(glyph) = Glyph::from_hershey(s) {
                table.insert(c, glyph);
            }
        }
        table
    }

    pub fn insert(&mut self, c: char, glyph: Glyph) {
        self.glyphs.insert(c, glyph);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl StrokeFont for GlyphTable {
    fn glyph(&self, c: char) -> Option<&Glyph> {
        self.glyphs.get(&c)
    }
}

/// How a run of text is laid out around its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Glyph height in output units.
    pub size: f64,
    /// Degrees, counter-clockwise as seen on the plot.
    pub angle: f64,
    pub hjustify: TextHJustify,
    pub vjustify: TextVJustify,
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 50.0,
            angle: 0.0,
            hjustify: TextHJustify::Left,
            vjustify: TextVJustify::Bottom,
            italic: false,
        }
    }
}

/// Width of one line of text at `size`.
pub fn text_width(font: &dyn StrokeFont, line: &str, size: f64) -> f64 {
    line.chars()
        .map(|c| {
            font.glyph(c)
                .map(|g| g.advance)
                .unwrap_or(MISSING_GLYPH_ADVANCE)
        })
        .sum::<f64>()
        * size
}

/// Emit `text` as strokes anchored at `anchor`.
///
/// Lines are split on `'\n'`. The caller sets the pen width beforehand.
pub fn plot_text<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    text: &str,
    anchor: PlotPoint,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }

    let size = style.size;
    let lines: Vec<&str> = text.split('\n').collect();
    let block = (lines.len() - 1) as f64 * size * LINE_PITCH;
    let first_baseline = match style.vjustify {
        TextVJustify::Top => size,
        TextVJustify::Center => size / 2.0 - block / 2.0,
        TextVJustify::Bottom => -block,
    };
    let (sin, cos) = style.angle.to_radians().sin_cos();
    let place = |x: f64, y: f64| {
        PlotPoint::new(anchor.x + x * cos + y * sin, anchor.y - x * sin + y * cos)
    };

    for (row, line) in lines.iter().enumerate() {
        let baseline = first_baseline + row as f64 * size * LINE_PITCH;
        let width = text_width(font, line, size);
        let mut pen = match style.hjustify {
            TextHJustify::Left => 0.0,
            TextHJustify::Center => -width / 2.0,
            TextHJustify::Right => -width,
        };

        for c in line.chars() {
            let Some(glyph) = font.glyph(c) else {
                pen += MISSING_GLYPH_ADVANCE * size;
                continue;
            };
            for stroke in &glyph.strokes {
                for (i, &(gx, gy)) in stroke.iter().enumerate() {
                    let mut x = pen + gx * size;
                    let y = baseline + gy * size;
                    if style.italic {
                        x -= gy * size * ITALIC_TILT;
                    }
                    let p = place(x, y);
                    if i == 0 {
                        plotter.move_to(p);
                    } else {
                        plotter.line_to(p);
                    }
                }
            }
            pen += glyph.advance * size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::commands::{CommandRecorder, PlotCommand};

    /// A one-stroke vertical bar of advance 16/21.
    const BAR: &str = "JZRFRY";

    fn bar_font() -> GlyphTable {
        GlyphTable::from_hershey('|', &[BAR])
    }

    #[test]
    fn test_hershey_decode() {
        let glyph = Glyph::from_hershey(BAR).unwrap();
        assert!((glyph.advance - 16.0 / 21.0).abs() < 1e-12);
        assert_eq!(glyph.strokes.len(), 1);
        let stroke = &glyph.strokes[0];
        assert_eq!(stroke.len(), 2);
        assert!((stroke[0].0 - 8.0 / 21.0).abs() < 1e-12);
        assert!((stroke[0].1 + 22.0 / 21.0).abs() < 1e-12);
        assert!((stroke[1].1 + 3.0 / 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_hershey_pen_up() {
        let glyph = Glyph::from_hershey("JZRFRY RNFNY").unwrap();
        assert_eq!(glyph.strokes.len(), 2);
        assert!(Glyph::from_hershey("J").is_none());
    }

    #[test]
    fn test_text_emits_only_paths() {
        let font = bar_font();
        let mut rec = CommandRecorder::new();
        plot_text(
            &mut rec,
            &font,
            "||",
            PlotPoint::new(100.0, 100.0),
            &TextStyle::default(),
        );
        assert_eq!(rec.len(), 4);
        assert!(rec
            .commands()
            .iter()
            .all(|c| matches!(c, PlotCommand::MoveTo { .. } | PlotCommand::LineTo { .. })));
    }

    #[test]
    fn test_unknown_char_advances() {
        let font = bar_font();
        let mut rec = CommandRecorder::new();
        let style = TextStyle {
            size: 21.0,
            ..Default::default()
        };
        plot_text(&mut rec, &font, "?|", PlotPoint::new(0.0, 0.0), &style);
        assert_eq!(rec.len(), 2);
        match rec.commands()[0] {
            PlotCommand::MoveTo { to } => {
                let expected = MISSING_GLYPH_ADVANCE * 21.0 + 8.0;
                assert!((to.x - expected).abs() < 1e-9);
                assert!((to.y + 22.0).abs() < 1e-9);
            }
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_right_justify_and_rotation() {
        let font = bar_font();
        let mut rec = CommandRecorder::new();
        let style = TextStyle {
            size: 21.0,
            angle: 90.0,
            hjustify: TextHJustify::Right,
            ..Default::default()
        };
        plot_text(&mut rec, &font, "|", PlotPoint::new(0.0, 0.0), &style);
        // Local (8 - 16, -22) rotated a quarter turn counter-clockwise.
        match rec.commands()[0] {
            PlotCommand::MoveTo { to } => {
                assert!((to.x + 22.0).abs() < 1e-9);
                assert!((to.y - 8.0).abs() < 1e-9);
            }
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_text_width() {
        let font = bar_font();
        assert!((text_width(&font, "||", 21.0) - 32.0).abs() < 1e-9);
        assert_eq!(text_width(&font, "", 21.0), 0.0);
    }
}
