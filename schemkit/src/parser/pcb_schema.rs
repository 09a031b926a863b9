//! Board document types.
//!
//! Board files store decimal millimetres, so coordinates here are `f64`.

use serde::{Deserialize, Serialize};

/// 2D position in millimetres (y down).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct BoardPoint {
    pub x: f64,
    pub y: f64,
}

impl BoardPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate around the origin by `angle` degrees, counter-clockwise as seen
    /// on a y-down board.
    pub fn rotate(&self, angle: f64) -> BoardPoint {
        if angle == 0.0 {
            return *self;
        }
        let (sin, cos) = angle.to_radians().sin_cos();
        BoardPoint::new(self.y * sin + self.x * cos, self.y * cos - self.x * sin)
    }

    pub fn offset(&self, by: BoardPoint) -> BoardPoint {
        BoardPoint::new(self.x + by.x, self.y + by.y)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub version: Option<String>,
    pub host: Option<BoardHost>,
    pub general: BoardGeneral,
    pub page: Option<String>,
    pub layers: Vec<BoardLayer>,
    pub nets: Vec<BoardNet>,
    pub net_classes: Vec<NetClass>,
    pub modules: Vec<Module>,
    pub drawings: Vec<BoardGraphic>,
    pub segments: Vec<Segment>,
    pub vias: Vec<Via>,
    pub zones: Vec<Zone>,
}

impl Board {
    pub fn net_name(&self, id: u32) -> Option<&str> {
        self.nets
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.name.as_str())
    }

    pub fn find_module(&self, reference: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.reference == reference)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardHost {
    pub name: String,
    pub version: String,
}

/// Counts and thickness from the `general` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardGeneral {
    pub thickness: f64,
    pub links: u32,
    pub no_connects: u32,
    pub drawings: u32,
    pub tracks: u32,
    pub zones: u32,
    pub modules: u32,
    pub nets: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LayerType {
    #[default]
    Signal,
    Power,
    Mixed,
    Jumper,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardLayer {
    pub ordinal: u32,
    pub name: String,
    pub layer_type: LayerType,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardNet {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NetClass {
    pub name: String,
    pub description: String,
    pub clearance: Option<f64>,
    pub trace_width: Option<f64>,
    pub via_dia: Option<f64>,
    pub via_drill: Option<f64>,
    pub uvia_dia: Option<f64>,
    pub uvia_drill: Option<f64>,
    pub nets: Vec<String>,
}

/// A placed footprint. Child coordinates are relative to `at`/`angle`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub name: String,
    pub layer: String,
    pub locked: bool,
    pub at: BoardPoint,
    /// Degrees.
    pub angle: f64,
    pub descr: Option<String>,
    pub reference: String,
    pub value: String,
    pub texts: Vec<BoardText>,
    pub graphics: Vec<BoardGraphic>,
    pub pads: Vec<Pad>,
}

impl Module {
    /// Board position of a module-relative point.
    pub fn to_board(&self, local: BoardPoint) -> BoardPoint {
        local.rotate(self.angle).offset(self.at)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardText {
    /// `reference`, `value` or `user` for footprint texts; `None` for `gr_text`.
    pub text_kind: Option<String>,
    pub text: String,
    pub at: BoardPoint,
    pub angle: f64,
    pub layer: String,
    pub size: BoardPoint,
    pub thickness: f64,
    pub italic: bool,
    pub justify: Vec<String>,
    pub hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GraphicShape {
    Line { start: BoardPoint, end: BoardPoint },
    Circle { center: BoardPoint, end: BoardPoint },
    /// `start` is the arc start point, `angle` the sweep in degrees.
    Arc { center: BoardPoint, start: BoardPoint, angle: f64 },
    Poly { points: Vec<BoardPoint> },
    Curve { points: Vec<BoardPoint> },
    Text(BoardText),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardGraphic {
    pub shape: GraphicShape,
    pub layer: String,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PadType {
    #[default]
    ThruHole,
    Smd,
    Connect,
    NpThruHole,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PadShape {
    #[default]
    Circle,
    Rect,
    Oval,
    Trapezoid,
    RoundRect,
    Custom,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pad {
    pub number: String,
    pub pad_type: PadType,
    pub shape: PadShape,
    pub at: BoardPoint,
    pub angle: f64,
    pub size: BoardPoint,
    pub drill: Option<f64>,
    pub layers: Vec<String>,
    pub net: Option<BoardNet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub start: BoardPoint,
    pub end: BoardPoint,
    pub width: f64,
    pub layer: String,
    pub net: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Via {
    pub at: BoardPoint,
    pub size: f64,
    pub drill: Option<f64>,
    pub layers: Vec<String>,
    pub net: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Zone {
    pub net: u32,
    pub net_name: String,
    pub layer: String,
    pub min_thickness: Option<f64>,
    pub outline: Vec<BoardPoint>,
    pub filled_polygons: Vec<Vec<BoardPoint>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_quarter_turn() {
        let p = BoardPoint::new(1.0, 0.0).rotate(90.0);
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_module_to_board() {
        let m = Module {
            at: BoardPoint::new(10.0, 5.0),
            ..Default::default()
        };
        assert_eq!(m.to_board(BoardPoint::new(1.0, 2.0)), BoardPoint::new(11.0, 7.0));
    }
}
