//! Integer points and axis-aligned rectangles.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// 2D point in internal units (mils for library and schematic files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle given by two corners.
///
/// Rectangles produced by bounding-box computations are always normalized
/// (`pos1` is the min corner, `pos2` the max corner). [`Rect::from_corners`]
/// keeps the corners as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos1: Point,
    pub pos2: Point,
}

impl Rect {
    pub const fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self {
            pos1: Point::new(x1, y1),
            pos2: Point::new(x2, y2),
        }
    }

    /// Build from raw corners without reordering them.
    pub const fn from_corners(pos1: Point, pos2: Point) -> Self {
        Self { pos1, pos2 }
    }

    /// Smallest normalized rectangle containing both points.
    pub fn enclosing(a: Point, b: Point) -> Self {
        Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Reorder corners so that `pos1 <= pos2` component-wise.
    pub fn normalize(&self) -> Rect {
        Rect::enclosing(self.pos1, self.pos2)
    }

    /// Minimal rectangle enclosing both `self` and `other`.
    pub fn merge(&self, other: &Rect) -> Rect {
        let a = self.normalize();
        let b = other.normalize();
        Rect::new(
            a.pos1.x.min(b.pos1.x),
            a.pos1.y.min(b.pos1.y),
            a.pos2.x.max(b.pos2.x),
            a.pos2.y.max(b.pos2.y),
        )
    }

    pub fn width(&self) -> i64 {
        (self.pos2.x - self.pos1.x).abs()
    }

    pub fn height(&self) -> i64 {
        (self.pos2.y - self.pos1.y).abs()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, p: Point) -> bool {
        let r = self.normalize();
        p.x >= r.pos1.x && p.x <= r.pos2.x && p.y >= r.pos1.y && p.y <= r.pos2.y
    }
}
