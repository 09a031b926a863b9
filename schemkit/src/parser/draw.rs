//! Body graphics of a library component (`DRAW` ... `ENDDRAW`).
//!
//! Every graphic item is one variant of [`DrawObject`]; bounding boxes are
//! computed by a single match so each variant is guaranteed to have one.

use serde::{Deserialize, Serialize};

use super::common::{
    read_body_text, Args, Fill, PinAttribute, PinOrientation, PinType, TextHJustify,
    TextVJustify,
};
use super::cursor::{LineCursor, ParseError};
use crate::geometry::{normalize_angle_pos, Point, Rect, Transform};

/// Fields every graphic item carries.
///
/// `unit == 0` means the item belongs to every unit of a multi-unit part and
/// `convert == 0` means it belongs to every body style. Zero is a real value
/// here, not "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawCommon {
    pub unit: u32,
    pub convert: u32,
    pub fill: Fill,
}

impl DrawCommon {
    /// Whether the item is drawn for the given unit and body style.
    pub fn applies_to(&self, unit: u32, convert: u32) -> bool {
        (self.unit == 0 || self.unit == unit) && (self.convert == 0 || self.convert == convert)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawArc {
    pub common: DrawCommon,
    pub pos: Point,
    pub radius: i64,
    /// First radius angle in tenths of a degree.
    pub start_angle: i32,
    /// Second radius angle in tenths of a degree.
    pub end_angle: i32,
    pub line_width: i64,
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCircle {
    pub common: DrawCommon,
    pub pos: Point,
    pub radius: i64,
    pub line_width: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawPolyline {
    pub common: DrawCommon,
    pub line_width: i64,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRectangle {
    pub common: DrawCommon,
    pub start: Point,
    pub end: Point,
    pub line_width: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawText {
    pub common: DrawCommon,
    /// Tenths of a degree.
    pub angle: i32,
    pub pos: Point,
    pub text_size: i64,
    /// Non-zero when the text is hidden.
    pub text_type: i32,
    pub text: String,
    pub italic: bool,
    pub bold: bool,
    pub hjustify: TextHJustify,
    pub vjustify: TextVJustify,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawPin {
    pub common: DrawCommon,
    pub name: String,
    pub num: String,
    pub pos: Point,
    pub length: i64,
    pub orientation: PinOrientation,
    pub name_text_size: i64,
    pub num_text_size: i64,
    pub pin_type: PinType,
    pub attributes: Vec<PinAttribute>,
    pub visibility: bool,
}

impl DrawPin {
    /// End of the pin that touches the component body.
    pub fn tip(&self) -> Point {
        let dir = self.orientation.direction();
        Point::new(self.pos.x + dir.x * self.length, self.pos.y + dir.y * self.length)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawObject {
    Arc(DrawArc),
    Circle(DrawCircle),
    Polyline(DrawPolyline),
    Rectangle(DrawRectangle),
    Text(DrawText),
    Pin(DrawPin),
}

/// Keywords valid inside a `DRAW` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawKeyword {
    Arc,
    Circle,
    Polyline,
    Rectangle,
    Text,
    Pin,
    EndDraw,
    Unknown,
}

impl DrawKeyword {
    fn resolve(keyword: &str) -> DrawKeyword {
        match keyword {
            "A" => DrawKeyword::Arc,
            "C" => DrawKeyword::Circle,
            "P" => DrawKeyword::Polyline,
            "S" => DrawKeyword::Rectangle,
            "T" => DrawKeyword::Text,
            "X" => DrawKeyword::Pin,
            "ENDDRAW" => DrawKeyword::EndDraw,
            _ => DrawKeyword::Unknown,
        }
    }
}

/// Ordered list of a component's graphic items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    pub objects: Vec<DrawObject>,
}

impl Draw {
    /// Consume lines up to and including `ENDDRAW`.
    pub(crate) fn parse(cursor: &mut LineCursor<'_>) -> Result<Draw, ParseError> {
        let mut draw = Draw::default();

        while let Some((_, tokens)) = cursor.next_tokens() {
            let Some((head, rest)) = tokens.split_first() else {
                continue;
            };
            let keyword = head.text();
            let args = Args::new(keyword, rest, cursor);

            let object = match DrawKeyword::resolve(keyword) {
                DrawKeyword::EndDraw => return Ok(draw),
                DrawKeyword::Arc => DrawObject::Arc(parse_arc(&args)?),
                DrawKeyword::Circle => DrawObject::Circle(parse_circle(&args)?),
                DrawKeyword::Polyline => DrawObject::Polyline(parse_polyline(&args)?),
                DrawKeyword::Rectangle => DrawObject::Rectangle(parse_rectangle(&args)?),
                DrawKeyword::Text => DrawObject::Text(parse_text(&args)?),
                DrawKeyword::Pin => DrawObject::Pin(parse_pin(&args)?),
                DrawKeyword::Unknown => {
                    return Err(cursor.error(format!("unknown token {} in DRAW", keyword)))
                }
            };
            draw.objects.push(object);
        }

        Err(cursor.unterminated("ENDDRAW"))
    }

    /// Union of every item's bounding box, `None` for an empty drawing.
    pub fn bounding_rect(&self, transform: &Transform) -> Option<Rect> {
        self.objects
            .iter()
            .map(|o| o.bounding_box(transform))
            .reduce(|acc, b| acc.merge(&b))
    }

    pub fn pins(&self) -> impl Iterator<Item = &DrawPin> {
        self.objects.iter().filter_map(|o| match o {
            DrawObject::Pin(pin) => Some(pin),
            _ => None,
        })
    }
}

fn parse_arc(args: &Args<'_, '_, '_>) -> Result<DrawArc, ParseError> {
    let pos = args.point(0)?;
    let radius = args.coord(2)?;
    let start_angle = normalize_angle_pos(args.num(3)?);
    let end_angle = normalize_angle_pos(args.num(4)?);
    let common = DrawCommon {
        unit: args.num(5)?,
        convert: args.num(6)?,
        fill: Fill::parse(args.opt(8)),
    };
    let line_width = args.num(7)?;

    // Older files omit the end points; derive them from the angles.
    let (start, end) = if args.len() >= 13 {
        (args.point(9)?, args.point(11)?)
    } else {
        (
            point_on_circle(pos, radius, start_angle),
            point_on_circle(pos, radius, end_angle),
        )
    };

    Ok(DrawArc {
        common,
        pos,
        radius,
        start_angle,
        end_angle,
        line_width,
        start,
        end,
    })
}

fn point_on_circle(center: Point, radius: i64, angle: i32) -> Point {
    let rad = (angle as f64 / 10.0).to_radians();
    Point::new(
        center.x + (radius as f64 * rad.cos()).round() as i64,
        center.y + (radius as f64 * rad.sin()).round() as i64,
    )
}

fn parse_circle(args: &Args<'_, '_, '_>) -> Result<DrawCircle, ParseError> {
    Ok(DrawCircle {
        pos: args.point(0)?,
        radius: args.coord(2)?,
        common: DrawCommon {
            unit: args.num(3)?,
            convert: args.num(4)?,
            fill: Fill::parse(args.opt(6)),
        },
        line_width: args.num(5)?,
    })
}

fn parse_polyline(args: &Args<'_, '_, '_>) -> Result<DrawPolyline, ParseError> {
    let count: usize = args.num(0)?;
    let needed = count
        .checked_mul(2)
        .and_then(|n| n.checked_add(4))
        .ok_or_else(|| args.error("point count too large"))?;
    if args.len() < needed {
        return Err(args.error(format!(
            "expected {} coordinates, found {}",
            count * 2,
            args.len().saturating_sub(4)
        )));
    }

    let points = (0..count)
        .map(|i| args.point(4 + i * 2))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DrawPolyline {
        common: DrawCommon {
            unit: args.num(1)?,
            convert: args.num(2)?,
            fill: Fill::parse(args.opt(needed)),
        },
        line_width: args.num(3)?,
        points,
    })
}

fn parse_rectangle(args: &Args<'_, '_, '_>) -> Result<DrawRectangle, ParseError> {
    Ok(DrawRectangle {
        start: args.point(0)?,
        end: args.point(2)?,
        common: DrawCommon {
            unit: args.num(4)?,
            convert: args.num(5)?,
            fill: Fill::parse(args.opt(7)),
        },
        line_width: args.num(6)?,
    })
}

fn parse_text(args: &Args<'_, '_, '_>) -> Result<DrawText, ParseError> {
    Ok(DrawText {
        angle: args.num(0)?,
        pos: args.point(1)?,
        text_size: args.coord(3)?,
        text_type: args.num(4)?,
        common: DrawCommon {
            unit: args.num(5)?,
            convert: args.num(6)?,
            fill: Fill::NoFill,
        },
        text: read_body_text(args.str(7)?),
        italic: args.opt(8) == Some("Italic"),
        bold: args
            .opt(9)
            .and_then(|s| s.parse::<i32>().ok())
            .is_some_and(|b| b > 0),
        hjustify: args.opt(10).map(TextHJustify::parse).unwrap_or_default(),
        vjustify: TextVJustify::parse(args.opt(11).and_then(|s| s.chars().next())),
    })
}

fn parse_pin(args: &Args<'_, '_, '_>) -> Result<DrawPin, ParseError> {
    let orientation_str = args.str(5)?;
    let orientation = PinOrientation::parse(orientation_str)
        .ok_or_else(|| args.error(format!("invalid pin orientation '{}'", orientation_str)))?;
    let type_str = args.str(10)?;
    let pin_type = PinType::parse(type_str)
        .ok_or_else(|| args.error(format!("invalid pin type '{}'", type_str)))?;

    let attributes: Vec<PinAttribute> = args
        .opt(11)
        .unwrap_or("")
        .chars()
        .map(PinAttribute::from_char)
        .collect();
    let visibility = !attributes.contains(&PinAttribute::Invisible);

    Ok(DrawPin {
        name: args.str(0)?.to_string(),
        num: args.str(1)?.to_string(),
        pos: args.point(2)?,
        length: args.coord(4)?,
        orientation,
        name_text_size: args.coord(6)?,
        num_text_size: args.coord(7)?,
        common: DrawCommon {
            unit: args.num(8)?,
            convert: args.num(9)?,
            fill: Fill::NoFill,
        },
        pin_type,
        attributes,
        visibility,
    })
}

impl DrawObject {
    pub fn common(&self) -> &DrawCommon {
        match self {
            DrawObject::Arc(o) => &o.common,
            DrawObject::Circle(o) => &o.common,
            DrawObject::Polyline(o) => &o.common,
            DrawObject::Rectangle(o) => &o.common,
            DrawObject::Text(o) => &o.common,
            DrawObject::Pin(o) => &o.common,
        }
    }

    pub fn bounding_box(&self, transform: &Transform) -> Rect {
        match self {
            DrawObject::Arc(arc) => arc_bounding_box(arc, transform),
            DrawObject::Circle(c) => transformed_box(
                Point::new(c.pos.x - c.radius, c.pos.y - c.radius),
                Point::new(c.pos.x + c.radius, c.pos.y + c.radius),
                transform,
            ),
            DrawObject::Polyline(p) => match points_extent(&p.points) {
                Some((min, max)) => transformed_box(min, max, transform),
                None => Rect::default(),
            },
            DrawObject::Rectangle(r) => transformed_box(r.start, r.end, transform),
            DrawObject::Text(t) => {
                let anchor = transform.transform_coordinate(t.pos);
                let extent = t.text.chars().count() as i64 * t.text_size;
                let (dx, dy) = if t.angle == 0 { (extent, 0) } else { (0, extent) };
                Rect::new(anchor.x - dx, anchor.y - dy, anchor.x + dx, anchor.y + dy)
            }
            DrawObject::Pin(pin) => {
                let anchor = transform.transform_coordinate(pin.pos);
                Rect::new(
                    anchor.x - pin.length,
                    anchor.y - pin.length,
                    anchor.x + pin.length,
                    anchor.y + pin.length,
                )
            }
        }
    }
}

fn points_extent(points: &[Point]) -> Option<(Point, Point)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}

fn transformed_box(a: Point, b: Point, transform: &Transform) -> Rect {
    Rect::enclosing(
        transform.transform_coordinate(a),
        transform.transform_coordinate(b),
    )
}

/// Bounding box of an arc with quadrant snapping.
///
/// The box is seeded from the (transformed) end points; each cardinal angle
/// swept by the arc then pushes the matching edge out to the circle.
fn arc_bounding_box(arc: &DrawArc, transform: &Transform) -> Rect {
    let norm_start = arc.start - arc.pos;
    let norm_end = arc.end - arc.pos;

    if norm_start.is_zero() || norm_end.is_zero() || arc.radius == 0 {
        return Rect::default();
    }

    let mut start_pos = transform.transform_coordinate(arc.start);
    let mut end_pos = transform.transform_coordinate(arc.end);
    let center = transform.transform_coordinate(arc.pos);

    let (_, _, swap) = transform.map_angles(arc.start_angle, arc.end_angle);
    if swap {
        std::mem::swap(&mut start_pos, &mut end_pos);
    }

    let mut min_x = start_pos.x.min(end_pos.x);
    let mut min_y = start_pos.y.min(end_pos.y);
    let mut max_x = start_pos.x.max(end_pos.x);
    let mut max_y = start_pos.y.max(end_pos.y);

    let start_angle = arc.start_angle;
    let mut end_angle = arc.end_angle;

    if start_angle == 0 {
        max_x = center.x + arc.radius;
    }

    // End angle wrapped past 360 degrees.
    if start_angle > end_angle {
        end_angle += 3600;
    }

    if start_angle <= 900 && end_angle >= 900 {
        max_y = center.y + arc.radius;
    }
    if start_angle <= 1800 && end_angle >= 1800 {
        min_x = center.x - arc.radius;
    }
    if start_angle <= 2700 && end_angle >= 2700 {
        min_y = center.y - arc.radius;
    }
    if start_angle <= 3600 && end_angle >= 3600 {
        max_x = center.x + arc.radius;
    }

    Rect::new(min_x, min_y, max_x, max_y)
}
