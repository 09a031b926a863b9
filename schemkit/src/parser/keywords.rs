//! Board-file keyword vocabulary.
//!
//! The names are KiCad's `pcb.keywords` list. A keyword's identity is its
//! index in [`KEYWORD_NAMES`]; the name-to-identity map is built once on
//! first use and never changes.
//!
//! The table only classifies lexemes. The board parser dispatches on list
//! names, so a name missing here still parses, it just lexes as a symbol.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

pub static KEYWORD_NAMES: &[&str] = &[
    "add_net", "allowed", "angle", "arc", "arc_segments", "area", "arrow1a", "arrow1b",
    "arrow2a", "arrow2b", "at", "attr", "autoplace_cost90", "autoplace_cost180",
    "aux_axis_origin", "blind", "blind_buried_vias_allowed", "bold", "bottom", "center",
    "chamfer", "circle", "clearance", "comment", "company", "connect", "connect_pads",
    "copperpour", "crossbar", "date", "descr", "die_length", "dimension", "diff_pair_width",
    "diff_pair_gap", "drawings", "drill", "edge", "edge_width", "effects", "end",
    "feature1", "feature2", "fill", "fill_segments", "filled_polygon", "fillet", "font",
    "fp_arc", "fp_circle", "fp_curve", "fp_line", "fp_poly", "fp_text", "full", "general",
    "grid_origin", "gr_arc", "gr_circle", "gr_curve", "gr_line", "gr_poly", "gr_text",
    "hatch", "hide", "italic", "justify", "keepout", "kicad_pcb", "last_trace_width",
    "layer", "layers", "left", "links", "locked", "micro", "min_thickness", "mirror",
    "mod_edge_width", "mod_text_size", "mod_text_width", "mode", "model", "module", "net",
    "net_class", "net_name", "nets", "no", "no_connects", "none", "not_allowed",
    "np_thru_hole", "offset", "oval", "pad", "pads", "pad_drill", "pad_size",
    "pad_to_mask_clearance", "solder_mask_min_width", "pad_to_paste_clearance",
    "pad_to_paste_clearance_ratio", "page", "path", "pcb_text_size", "pcb_text_width",
    "pcbplotparams", "placed", "plus", "polygon", "portrait", "priority", "pts", "radius",
    "rev", "rect", "rect_delta", "reference", "right", "rotate", "roundrect",
    "roundrect_rratio", "scale", "segment", "segment_width", "setup", "size", "smd",
    "smoothing", "solder_mask_margin", "solder_paste_margin", "solder_paste_margin_ratio",
    "solder_paste_ratio", "start", "status", "tags", "target", "title", "title_block",
    "tedit", "thermal_width", "thermal_gap", "thermal_bridge_width", "thickness", "top",
    "trace_width", "tracks", "trace_min", "trace_clearance", "trapezoid", "thru",
    "thru_hole", "thru_hole_only", "tstamp", "user", "user_trace_width", "user_via",
    "uvia_dia", "uvia_drill", "uvia_min_drill", "uvia_min_size", "uvia_size",
    "uvias_allowed", "value", "version", "via", "vias", "via_dia", "via_drill",
    "via_min_drill", "via_min_size", "via_size", "virtual", "visible_elements", "width",
    "x", "xy", "xyz", "yes", "zone", "zone_45_only", "zone_clearance", "zone_connect",
    "zone_type", "zones", "host", "footprint", "uuid", "type", "signal", "power", "mixed",
    "jumper", "custom", "property",
];

static KEYWORDS: LazyLock<HashMap<&'static str, Keyword>> = LazyLock::new(|| {
    KEYWORD_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, Keyword(i as u16)))
        .collect()
});

/// Stable identity of a board keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword(u16);

impl Keyword {
    pub fn lookup(name: &str) -> Option<Keyword> {
        KEYWORDS.get(name).copied()
    }

    pub fn name(&self) -> &'static str {
        KEYWORD_NAMES[self.0 as usize]
    }

    pub fn id(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
