//! Device-independent plot commands and the backend trait that consumes them.
//!
//! # Conventions
//!
//! - Coordinates are in output units (mils for sheets, millimetres for
//!   boards) with y increasing downward.
//! - Arc angles are tenths of a degree, counter-clockwise as seen on the
//!   plot, sweeping from `start_angle` to `end_angle`.
//! - `move_to`/`line_to` paths use the width set by the last
//!   `set_line_width`; shape commands carry their own width.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::parser::pcb_schema::BoardPoint;

/// Position on the plot surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: PlotPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<Point> for PlotPoint {
    fn from(p: Point) -> Self {
        PlotPoint::new(p.x as f64, p.y as f64)
    }
}

impl From<BoardPoint> for PlotPoint {
    fn from(p: BoardPoint) -> Self {
        PlotPoint::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlotCommand {
    SetLineWidth {
        width: f64,
    },
    MoveTo {
        to: PlotPoint,
    },
    LineTo {
        to: PlotPoint,
    },
    Arc {
        center: PlotPoint,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: bool,
        width: f64,
    },
    Circle {
        center: PlotPoint,
        radius: f64,
        fill: bool,
        width: f64,
    },
    /// Open path through `points` unless `fill`; closed outlines repeat
    /// their first point.
    Polygon {
        points: Vec<PlotPoint>,
        fill: bool,
        width: f64,
    },
}

/// Backend collaborator receiving plot output.
///
/// Implement this for a concrete surface (SVG, canvas, PDF, ...). The
/// crate ships [`CommandRecorder`], which just stores what it receives.
pub trait Plotter {
    fn set_line_width(&mut self, width: f64);

    /// Lift the pen and move it.
    fn move_to(&mut self, to: PlotPoint);

    /// Draw from the current pen position.
    fn line_to(&mut self, to: PlotPoint);

    fn arc(
        &mut self,
        center: PlotPoint,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: bool,
        width: f64,
    );

    fn circle(&mut self, center: PlotPoint, radius: f64, fill: bool, width: f64);

    fn polygon(&mut self, points: &[PlotPoint], fill: bool, width: f64);

    /// A single straight stroke.
    fn segment(&mut self, from: PlotPoint, to: PlotPoint) {
        self.move_to(from);
        self.line_to(to);
    }
}

/// Plotter that records every command in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandRecorder {
    commands: Vec<PlotCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PlotCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<PlotCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.commands)
    }
}

impl Plotter for CommandRecorder {
    fn set_line_width(&mut self, width: f64) {
        self.commands.push(PlotCommand::SetLineWidth { width });
    }

    fn move_to(&mut self, to: PlotPoint) {
        self.commands.push(PlotCommand::MoveTo { to });
    }

    fn line_to(&mut self, to: PlotPoint) {
        self.commands.push(PlotCommand::LineTo { to });
    }

    fn arc(
        &mut self,
        center: PlotPoint,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: bool,
        width: f64,
    ) {
        self.commands.push(PlotCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            fill,
            width,
        });
    }

    fn circle(&mut self, center: PlotPoint, radius: f64, fill: bool, width: f64) {
        self.commands.push(PlotCommand::Circle {
            center,
            radius,
            fill,
            width,
        });
    }

    fn polygon(&mut self, points: &[PlotPoint], fill: bool, width: f64) {
        self.commands.push(PlotCommand::Polygon {
            points: points.to_vec(),
            fill,
            width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order() {
        let mut rec = CommandRecorder::new();
        rec.set_line_width(2.0);
        rec.segment(PlotPoint::new(0.0, 0.0), PlotPoint::new(1.0, 1.0));
        rec.circle(PlotPoint::new(5.0, 5.0), 1.0, true, 0.0);

        assert_eq!(rec.len(), 4);
        assert_eq!(rec.commands()[0], PlotCommand::SetLineWidth { width: 2.0 });
        assert!(matches!(rec.commands()[1], PlotCommand::MoveTo { .. }));
        assert!(matches!(rec.commands()[2], PlotCommand::LineTo { .. }));
        assert!(matches!(rec.commands()[3], PlotCommand::Circle { fill: true, .. }));
    }

    #[test]
    fn test_recorder_json() {
        let mut rec = CommandRecorder::new();
        rec.move_to(PlotPoint::new(1.0, 2.0));
        let json = rec.to_json().unwrap();
        assert!(json.contains("\"op\": \"move_to\""));
        assert!(json.contains("\"x\": 1.0"));
    }
}
