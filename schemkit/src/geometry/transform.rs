//! Placement transforms and angle arithmetic.
//!
//! A [`Transform`] is the 2x2 integer matrix KiCad stores for every placed
//! symbol unit. Only the eight orthogonal rotation/mirror combinations occur
//! in practice, but the math below works for any integer matrix.

use serde::{Deserialize, Serialize};

use super::types::Point;

/// Full turn in tenths of a degree.
pub const FULL_TURN: i32 = 3600;
/// Half turn in tenths of a degree.
pub const HALF_TURN: i32 = 1800;

/// Bring an angle in tenths of a degree into `[0, 3600)`.
pub fn normalize_angle_pos(angle: i32) -> i32 {
    angle.rem_euclid(FULL_TURN)
}

fn decideg_to_rad(angle: f64) -> f64 {
    (angle / 10.0).to_radians()
}

fn rad_to_decideg(angle: f64) -> f64 {
    angle.to_degrees() * 10.0
}

/// Linear map `(x, y) -> (x1*x + y1*y, x2*x + y2*y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transform {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform::new(1, 0, 0, 1);

    /// Library symbols are drawn y-up; sheets are y-down.
    pub const LIBRARY_DEFAULT: Transform = Transform::new(1, 0, 0, -1);

    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Counter-clockwise rotation by a multiple of 90 degrees (tenths).
    pub fn rotation(angle: i32) -> Transform {
        match normalize_angle_pos(angle) {
            900 => Transform::new(0, -1, 1, 0),
            1800 => Transform::new(-1, 0, 0, -1),
            2700 => Transform::new(0, 1, -1, 0),
            _ => Transform::IDENTITY,
        }
    }

    pub fn transform_coordinate(&self, p: Point) -> Point {
        Point::new(
            self.x1 as i64 * p.x + self.y1 as i64 * p.y,
            self.x2 as i64 * p.x + self.y2 as i64 * p.y,
        )
    }

    /// Same map over floating point coordinates, used by the plotters.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.x1 as f64 * x + self.y1 as f64 * y,
            self.x2 as f64 * x + self.y2 as f64 * y,
        )
    }

    /// `self` applied after `inner`.
    pub fn compose(&self, inner: &Transform) -> Transform {
        Transform::new(
            self.x1 * inner.x1 + self.y1 * inner.x2,
            self.x1 * inner.y1 + self.y1 * inner.y2,
            self.x2 * inner.x1 + self.y2 * inner.x2,
            self.x2 * inner.y1 + self.y2 * inner.y2,
        )
    }

    /// True when the transform flips orientation (negative determinant).
    pub fn is_mirroring(&self) -> bool {
        (self.x1 as i64 * self.y2 as i64 - self.y1 as i64 * self.x2 as i64) < 0
    }

    fn map_angle(&self, angle: i32) -> i32 {
        let rad = decideg_to_rad(angle as f64);
        let (x, y) = (rad.cos(), rad.sin());
        let t = x * self.x1 as f64 + y * self.y1 as f64;
        let y = x * self.x2 as f64 + y * self.y2 as f64;
        rad_to_decideg(y.atan2(t)).round() as i32
    }

    /// Map an arc's start/end angle pair through the transform.
    ///
    /// Returns the mapped pair and whether start and end had to be
    /// exchanged to keep the arc counter-clockwise; callers holding arc end
    /// points must swap them too when the flag is set.
    pub fn map_angles(&self, start: i32, end: i32) -> (i32, i32, bool) {
        let delta = end - start;
        let (mut a1, mut a2) = (start, end);
        let mut swap = false;

        // Keep half-turn arcs from collapsing after rounding.
        if delta >= HALF_TURN {
            a1 -= 1;
            a2 += 1;
        }

        a1 = normalize_angle_pos(self.map_angle(a1));
        a2 = normalize_angle_pos(self.map_angle(a2));
        if a2 < a1 {
            a2 += FULL_TURN;
        }

        if a2 - a1 > HALF_TURN {
            std::mem::swap(&mut a1, &mut a2);
            a1 = normalize_angle_pos(a1);
            a2 = normalize_angle_pos(a2);
            if a2 < a1 {
                a2 += FULL_TURN;
            }
            swap = true;
        }

        if delta >= HALF_TURN {
            a1 += 1;
            a2 -= 1;
        }

        (a1, a2, swap)
    }
}
