//! Plotting of boards.
//!
//! Items are emitted by category: graphic drawings, footprints (graphics,
//! pads, texts), track segments, vias, then zones. Inside a category the
//! file order is kept.

use super::commands::{PlotPoint, Plotter};
use super::stroke_font::{plot_text, StrokeFont, TextStyle};
use super::PlotOptions;
use crate::parser::common::{TextHJustify, TextVJustify};
use crate::parser::pcb_schema::*;

/// Pen width for texts that do not specify a thickness, in millimetres.
const DEFAULT_TEXT_THICKNESS: f64 = 0.15;
/// Segments used to flatten a Bezier curve.
const CURVE_STEPS: usize = 16;

pub fn plot_board<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    board: &Board,
    options: &PlotOptions,
) {
    let board_space = |p: BoardPoint| p;
    for graphic in &board.drawings {
        plot_graphic(plotter, font, graphic, &board_space, options);
    }

    for module in &board.modules {
        plot_module(plotter, font, module, options);
    }

    for segment in board
        .segments
        .iter()
        .filter(|s| options.layer_enabled(&s.layer))
    {
        plotter.set_line_width(segment.width);
        plotter.segment(segment.start.into(), segment.end.into());
    }

    for via in board
        .vias
        .iter()
        .filter(|v| options.any_layer_enabled(&v.layers))
    {
        plotter.circle(via.at.into(), via.size / 2.0, true, 0.0);
    }

    for zone in board.zones.iter().filter(|z| options.layer_enabled(&z.layer)) {
        if zone.filled_polygons.is_empty() {
            let outline = closed(zone.outline.iter().copied().map(PlotPoint::from).collect());
            plotter.polygon(&outline, true, zone.min_thickness.unwrap_or(0.0));
        } else {
            for polygon in &zone.filled_polygons {
                let points: Vec<PlotPoint> = polygon.iter().copied().map(PlotPoint::from).collect();
                plotter.polygon(&points, true, 0.0);
            }
        }
    }
}

fn plot_module<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    module: &Module,
    options: &PlotOptions,
) {
    let to_board = |p: BoardPoint| module.to_board(p);

    for graphic in &module.graphics {
        plot_graphic(plotter, font, graphic, &to_board, options);
    }

    for pad in module
        .pads
        .iter()
        .filter(|p| options.any_layer_enabled(&p.layers))
    {
        plot_pad(plotter, pad, module.to_board(pad.at));
    }

    for text in &module.texts {
        plot_board_text(plotter, font, text, &to_board, options);
    }
}

fn plot_pad<P: Plotter + ?Sized>(plotter: &mut P, pad: &Pad, center: BoardPoint) {
    let (w, h) = (pad.size.x, pad.size.y);
    let place = |x: f64, y: f64| {
        PlotPoint::from(BoardPoint::new(x, y).rotate(pad.angle).offset(center))
    };

    match pad.shape {
        PadShape::Circle => plotter.circle(center.into(), w / 2.0, true, 0.0),
        PadShape::Oval if w == h => plotter.circle(center.into(), w / 2.0, true, 0.0),
        PadShape::Oval => {
            // A stroke as wide as the minor axis with round caps.
            let (half, minor) = if w > h {
                ((w - h) / 2.0, h)
            } else {
                ((h - w) / 2.0, w)
            };
            let (a, b) = if w > h {
                (place(-half, 0.0), place(half, 0.0))
            } else {
                (place(0.0, -half), place(0.0, half))
            };
            plotter.set_line_width(minor);
            plotter.segment(a, b);
        }
        _ => {
            let (hw, hh) = (w / 2.0, h / 2.0);
            let corners = vec![
                place(-hw, -hh),
                place(hw, -hh),
                place(hw, hh),
                place(-hw, hh),
            ];
            plotter.polygon(&closed(corners), true, 0.0);
        }
    }
}

fn plot_graphic<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    graphic: &BoardGraphic,
    map: &dyn Fn(BoardPoint) -> BoardPoint,
    options: &PlotOptions,
) {
    if let GraphicShape::Text(text) = &graphic.shape {
        plot_board_text(plotter, font, text, map, options);
        return;
    }
    if !options.layer_enabled(&graphic.layer) {
        return;
    }

    let point = |p: BoardPoint| PlotPoint::from(map(p));
    match &graphic.shape {
        GraphicShape::Line { start, end } => {
            plotter.set_line_width(graphic.width);
            plotter.segment(point(*start), point(*end));
        }
        GraphicShape::Circle { center, end } => {
            let c = point(*center);
            plotter.circle(c, c.distance(point(*end)), false, graphic.width);
        }
        GraphicShape::Arc {
            center,
            start,
            angle,
        } => {
            let c = point(*center);
            let s = point(*start);
            let a0 = (-(s.y - c.y)).atan2(s.x - c.x).to_degrees();
            // A positive sweep turns clockwise on the board.
            let (from, to) = if *angle >= 0.0 {
                (a0 - angle, a0)
            } else {
                (a0, a0 - angle)
            };
            plotter.arc(c, c.distance(s), from * 10.0, to * 10.0, false, graphic.width);
        }
        GraphicShape::Poly { points } => {
            let points: Vec<PlotPoint> = points.iter().map(|&p| point(p)).collect();
            plotter.polygon(&closed(points), true, graphic.width);
        }
        GraphicShape::Curve { points } => {
            let points: Vec<PlotPoint> = points.iter().map(|&p| point(p)).collect();
            plotter.polygon(&flatten_bezier(&points), false, graphic.width);
        }
        GraphicShape::Text(_) => {}
    }
}

fn plot_board_text<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    text: &BoardText,
    map: &dyn Fn(BoardPoint) -> BoardPoint,
    options: &PlotOptions,
) {
    if (text.hidden && !options.plot_hidden) || !options.layer_enabled(&text.layer) {
        return;
    }
    let has = |word: &str| text.justify.iter().any(|j| j == word);
    let style = TextStyle {
        size: text.size.y,
        // Stored angles are absolute, even inside footprints.
        angle: text.angle,
        hjustify: if has("left") {
            TextHJustify::Left
        } else if has("right") {
            TextHJustify::Right
        } else {
            TextHJustify::Center
        },
        vjustify: if has("top") {
            TextVJustify::Top
        } else if has("bottom") {
            TextVJustify::Bottom
        } else {
            TextVJustify::Center
        },
        italic: text.italic,
    };
    let thickness = if text.thickness > 0.0 {
        text.thickness
    } else {
        DEFAULT_TEXT_THICKNESS
    };
    plotter.set_line_width(thickness);
    plot_text(plotter, font, &text.text, map(text.at).into(), &style);
}

/// Repeat the first point at the end unless already closed.
fn closed(mut points: Vec<PlotPoint>) -> Vec<PlotPoint> {
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last {
            points.push(first);
        }
    }
    points
}

/// Sample a cubic Bezier; other point counts pass through unchanged.
fn flatten_bezier(points: &[PlotPoint]) -> Vec<PlotPoint> {
    let [p0, p1, p2, p3] = match points {
        [a, b, c, d] => [*a, *b, *c, *d],
        _ => return points.to_vec(),
    };
    (0..=CURVE_STEPS)
        .map(|i| {
            let t = i as f64 / CURVE_STEPS as f64;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            PlotPoint::new(
                a * p0.x + b * p1.x + c * p2.x + d * p3.x,
                a * p0.y + b * p1.y + c * p2.y + d * p3.y,
            )
        })
        .collect()
}
