//! Plotting of library components.

use super::commands::{PlotPoint, Plotter};
use super::stroke_font::{plot_text, StrokeFont, TextStyle};
use super::PlotOptions;
use crate::geometry::{normalize_angle_pos, Point, Transform};
use crate::parser::common::{TextHJustify, TextVJustify};
use crate::parser::draw::{DrawObject, DrawPin};
use crate::parser::library::{FieldText, LibComponent};

/// Gap between a pin and its number, in output units.
pub const PIN_TEXT_MARGIN: f64 = 4.0;

/// Where and how a component unit is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub unit: u32,
    pub convert: u32,
    pub transform: Transform,
    pub offset: Point,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            unit: 1,
            convert: 1,
            transform: Transform::LIBRARY_DEFAULT,
            offset: Point::ZERO,
        }
    }
}

impl Placement {
    /// Library coordinate to plot coordinate.
    pub fn map(&self, p: Point) -> PlotPoint {
        (self.transform.transform_coordinate(p) + self.offset).into()
    }

    /// Plot angle in degrees of text written at `angle` tenths in library
    /// space. Text stays readable, so only horizontal/vertical survives.
    pub fn text_angle(&self, angle: i32) -> f64 {
        let vertical = normalize_angle_pos(angle) % 1800 == 900;
        if vertical != (self.transform.x1 == 0) {
            90.0
        } else {
            0.0
        }
    }
}

/// Plot one unit of `component`: its body graphics then its visible fields.
pub fn plot_component<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    component: &LibComponent,
    placement: &Placement,
    options: &PlotOptions,
) {
    plot_body(plotter, font, component, placement, options);

    let fields =
        std::iter::once(&component.field).chain(component.fields.iter().map(|f| &f.field));
    for field in fields {
        plot_field(plotter, font, field, placement, options);
    }
}

/// Body graphics only, in draw order.
pub(crate) fn plot_body<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    component: &LibComponent,
    placement: &Placement,
    options: &PlotOptions,
) {
    let Some(draw) = &component.draw else {
        return;
    };
    let pen = |w: i64| if w > 0 { w as f64 } else { options.line_width };

    for object in draw
        .objects
        .iter()
        .filter(|o| o.common().applies_to(placement.unit, placement.convert))
    {
        match object {
            DrawObject::Rectangle(rect) => {
                let corners = [
                    rect.start,
                    Point::new(rect.end.x, rect.start.y),
                    rect.end,
                    Point::new(rect.start.x, rect.end.y),
                    rect.start,
                ];
                let points: Vec<PlotPoint> = corners.iter().map(|&p| placement.map(p)).collect();
                plotter.polygon(&points, rect.common.fill.is_filled(), pen(rect.line_width));
            }
            DrawObject::Polyline(poly) => {
                let points: Vec<PlotPoint> =
                    poly.points.iter().map(|&p| placement.map(p)).collect();
                plotter.polygon(&points, poly.common.fill.is_filled(), pen(poly.line_width));
            }
            DrawObject::Arc(arc) => {
                let (t1, t2, _) = placement
                    .transform
                    .map_angles(arc.start_angle, arc.end_angle);
                plotter.arc(
                    placement.map(arc.pos),
                    arc.radius as f64,
                    -t2 as f64,
                    -t1 as f64,
                    arc.common.fill.is_filled(),
                    pen(arc.line_width),
                );
            }
            DrawObject::Circle(circle) => {
                plotter.circle(
                    placement.map(circle.pos),
                    circle.radius as f64,
                    circle.common.fill.is_filled(),
                    pen(circle.line_width),
                );
            }
            DrawObject::Text(text) => {
                if text.text_type != 0 && !options.plot_hidden {
                    continue;
                }
                let style = TextStyle {
                    size: text.text_size as f64,
                    angle: placement.text_angle(text.angle),
                    hjustify: text.hjustify,
                    vjustify: text.vjustify,
                    italic: text.italic,
                };
                plotter.set_line_width(options.line_width);
                plot_text(plotter, font, &text.text, placement.map(text.pos), &style);
            }
            DrawObject::Pin(pin) => {
                if !pin.visibility && !options.plot_hidden {
                    continue;
                }
                plotter.set_line_width(options.line_width);
                plotter.segment(placement.map(pin.pos), placement.map(pin.tip()));
                if options.plot_pin_text {
                    plot_pin_text(plotter, font, component, pin, placement);
                }
            }
        }
    }
}

fn plot_pin_text<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    component: &LibComponent,
    pin: &DrawPin,
    placement: &Placement,
) {
    let dir = pin.orientation.direction();
    let angle = placement.text_angle(if dir.y == 0 { 0 } else { 900 });
    let root = placement.map(pin.pos);
    let tip = placement.map(pin.tip());
    let middle = PlotPoint::new((root.x + tip.x) / 2.0, (root.y + tip.y) / 2.0);
    let above = |d: f64| {
        let (sin, cos) = angle.to_radians().sin_cos();
        PlotPoint::new(middle.x - d * sin, middle.y - d * cos)
    };

    let show_name = component.draw_pinname && !pin.name.is_empty() && pin.name != "~";
    if show_name {
        let mut style = TextStyle {
            size: pin.name_text_size as f64,
            angle,
            ..Default::default()
        };
        let anchor = if component.text_offset > 0 {
            // Inside the body, reading away from the pin.
            let out = placement.transform.transform_coordinate(dir);
            let forward = if angle == 0.0 { out.x > 0 } else { out.y < 0 };
            style.hjustify = if forward {
                TextHJustify::Left
            } else {
                TextHJustify::Right
            };
            style.vjustify = TextVJustify::Center;
            let offset = component.text_offset;
            let inside = pin.tip() + Point::new(dir.x * offset, dir.y * offset);
            placement.map(inside)
        } else {
            style.hjustify = TextHJustify::Center;
            style.vjustify = TextVJustify::Bottom;
            above(PIN_TEXT_MARGIN)
        };
        plot_text(plotter, font, &pin.name, anchor, &style);
    }

    if component.draw_pinnumber && !pin.num.is_empty() {
        let below_name = show_name && component.text_offset == 0;
        let style = TextStyle {
            size: pin.num_text_size as f64,
            angle,
            hjustify: TextHJustify::Center,
            vjustify: if below_name {
                TextVJustify::Top
            } else {
                TextVJustify::Bottom
            },
            italic: false,
        };
        let anchor = if below_name {
            above(-PIN_TEXT_MARGIN)
        } else {
            above(PIN_TEXT_MARGIN)
        };
        plot_text(plotter, font, &pin.num, anchor, &style);
    }
}

fn plot_field<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    field: &FieldText,
    placement: &Placement,
    options: &PlotOptions,
) {
    if field.text.is_empty() || (!field.visibility && !options.plot_hidden) {
        return;
    }
    let style = TextStyle {
        size: field.text_size as f64,
        angle: placement.text_angle(field.text_orientation.angle()),
        hjustify: field.hjustify,
        vjustify: field.vjustify,
        italic: field.italic,
    };
    plotter.set_line_width(options.line_width);
    plot_text(plotter, font, &field.text, placement.map(field.pos), &style);
}
