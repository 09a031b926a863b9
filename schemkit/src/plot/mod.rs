//! Plot emission: walk a parsed document and drive a [`Plotter`].
//!
//! Emission only reads the document tree. Commands come out in the order
//! the corresponding elements were parsed.

pub mod board;
pub mod commands;
pub mod library;
pub mod schematic;
pub mod stroke_font;

pub use commands::{CommandRecorder, PlotCommand, PlotPoint, Plotter};
pub use library::{plot_component, Placement};
pub use stroke_font::{plot_text, Glyph, GlyphTable, StrokeFont, TextStyle};

/// Plot options
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    /// Pen width for items that do not specify one.
    pub line_width: f64,
    pub bus_width: f64,
    pub junction_radius: f64,
    /// Arm length of a no-connect cross, end to end.
    pub no_connect_size: f64,
    /// Draw pin names and numbers.
    pub plot_pin_text: bool,
    /// Draw fields and pins marked invisible.
    pub plot_hidden: bool,
    /// Board layers to plot; empty plots every layer.
    pub layers: Vec<String>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            line_width: 6.0,
            bus_width: 12.0,
            junction_radius: 20.0,
            no_connect_size: 48.0,
            plot_pin_text: true,
            plot_hidden: false,
            layers: Vec::new(),
        }
    }
}

impl PlotOptions {
    /// Whether an item on `layer` passes the layer filter.
    ///
    /// Understands KiCad's `*.Cu` style wildcards and `F&B.Cu` on either
    /// side of the comparison.
    pub fn layer_enabled(&self, layer: &str) -> bool {
        self.layers.is_empty() || self.layers.iter().any(|l| layers_match(l, layer))
    }

    pub fn any_layer_enabled<S: AsRef<str>>(&self, layers: &[S]) -> bool {
        self.layers.is_empty() || layers.iter().any(|l| self.layer_enabled(l.as_ref()))
    }
}

fn layers_match(a: &str, b: &str) -> bool {
    fn expand(name: &str) -> Vec<(String, String)> {
        let (side, suffix) = name.split_once('.').unwrap_or((name, ""));
        let sides: Vec<&str> = match side {
            "*" => vec!["*"],
            "F&B" => vec!["F", "B"],
            other => vec![other],
        };
        sides
            .into_iter()
            .map(|s| (s.to_string(), suffix.to_string()))
            .collect()
    }

    if a == b {
        return true;
    }
    expand(a).iter().any(|(sa, xa)| {
        expand(b)
            .iter()
            .any(|(sb, xb)| xa == xb && (sa == "*" || sb == "*" || sa == sb))
    })
}
