//! schemkit - KiCad library, schematic and board parsing and plotting
//!
//! This library turns the text of KiCad documents into typed document
//! trees and walks those trees to produce a device-independent stream of
//! plot commands.
//!
//! # Quick Start
//!
//! ```no_run
//! use schemkit::prelude::*;
//!
//! let text = std::fs::read_to_string("device.lib").unwrap();
//! let library = Library::load(&text).unwrap();
//!
//! let font = GlyphTable::new();
//! let mut recorder = CommandRecorder::new();
//! for component in &library.components {
//!     plot_component(
//!         &mut recorder,
//!         &font,
//!         component,
//!         &Placement::default(),
//!         &PlotOptions::default(),
//!     );
//! }
//! println!("{}", recorder.to_json().unwrap());
//! ```
//!
//! # Features
//!
//! - **Symbol libraries**: `EESchema-LIBRARY` components, fields and body graphics
//! - **Schematics**: legacy `EESchema Schematic File` sheets
//! - **Boards**: `.kicad_pcb` symbolic expressions
//! - **Geometry**: bounding boxes under KiCad placement transforms
//! - **Plotting**: stroked text and shape commands for any backend

pub mod core;
pub mod geometry;
pub mod parser;
pub mod plot;

// Re-export main types
pub use crate::core::{load_document, Document, SchemkitError};
pub use geometry::{Point, Rect, Transform};
pub use parser::format_detector::{detect_format, DocumentFormat};
pub use parser::library::Library;
pub use parser::pcb_schema::Board;
pub use parser::schematic::Schematic;
pub use parser::sexp::SexpLexer;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::plot::board::plot_board;
    pub use crate::plot::schematic::plot_schematic;
    pub use crate::plot::{
        plot_component, CommandRecorder, GlyphTable, Placement, PlotCommand, PlotOptions,
        Plotter, StrokeFont,
    };
    pub use crate::{
        load_document, Board, Document, Library, Point, Rect, Schematic, SchemkitError,
        Transform,
    };
}
