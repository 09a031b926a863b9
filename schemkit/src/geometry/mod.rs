//! Geometry primitives shared by the parsers and the plotters.
//!
//! Library and schematic coordinates are integer mils; angles are stored in
//! tenths of a degree, the same convention the file formats use.

pub mod transform;
pub mod types;

pub use transform::{normalize_angle_pos, Transform};
pub use types::{Point, Rect};
