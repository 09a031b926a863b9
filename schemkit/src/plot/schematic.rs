//! Plotting of legacy schematic sheets.

use tracing::warn;

use super::commands::{PlotPoint, Plotter};
use super::library::{plot_body, Placement};
use super::stroke_font::{plot_text, StrokeFont, TextStyle};
use super::PlotOptions;
use crate::geometry::Point;
use crate::parser::common::{TextHJustify, TextVJustify};
use crate::parser::library::{LibComponent, Library};
use crate::parser::schematic::{
    LineKind, SchComponent, SchItem, SchText, Schematic, SheetSymbol,
};

/// Gap between a sheet outline and its labels, in mils.
const SHEET_LABEL_GAP: i64 = 8;

/// Plot every item of `schematic` in file order.
///
/// Component bodies are looked up in `libraries`, in order; a symbol that
/// cannot be found is logged and only its fields are drawn.
pub fn plot_schematic<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    schematic: &Schematic,
    libraries: &[Library],
    options: &PlotOptions,
) {
    for item in &schematic.items {
        match item {
            SchItem::Component(component) => {
                plot_sch_component(plotter, font, component, libraries, options)
            }
            SchItem::Line(line) => {
                let width = match line.line_kind {
                    LineKind::Bus => options.bus_width,
                    LineKind::Wire | LineKind::Notes => options.line_width,
                };
                plotter.set_line_width(width);
                plotter.segment(line.start.into(), line.end.into());
            }
            SchItem::BusEntry(entry) => {
                let width = if entry.bus_to_bus {
                    options.bus_width
                } else {
                    options.line_width
                };
                plotter.set_line_width(width);
                plotter.segment(entry.start.into(), entry.end.into());
            }
            SchItem::Junction { pos } => {
                plotter.circle((*pos).into(), options.junction_radius, true, 0.0);
            }
            SchItem::NoConnect { pos } => {
                let c = PlotPoint::from(*pos);
                let h = options.no_connect_size / 2.0;
                plotter.set_line_width(options.line_width);
                plotter.segment(PlotPoint::new(c.x - h, c.y - h), PlotPoint::new(c.x + h, c.y + h));
                plotter.segment(PlotPoint::new(c.x + h, c.y - h), PlotPoint::new(c.x - h, c.y + h));
            }
            SchItem::Text(text) => plot_sch_text(plotter, font, text, options),
            SchItem::Sheet(sheet) => plot_sheet(plotter, font, sheet, options),
        }
    }
}

/// Find a symbol by name or alias, also trying the part after a
/// `library:` prefix.
pub fn resolve_symbol<'l>(libraries: &'l [Library], name: &str) -> Option<&'l LibComponent> {
    let bare = name.rsplit_once(':').map(|(_, n)| n);
    libraries.iter().find_map(|lib| {
        lib.find_by_name_or_alias(name)
            .or_else(|| bare.and_then(|n| lib.find_by_name_or_alias(n)))
    })
}

fn plot_sch_component<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    component: &SchComponent,
    libraries: &[Library],
    options: &PlotOptions,
) {
    let placement = Placement {
        unit: component.unit,
        convert: component.convert,
        transform: component.transform,
        offset: component.pos,
    };

    match resolve_symbol(libraries, &component.lib_name) {
        Some(symbol) => plot_body(plotter, font, symbol, &placement, options),
        None => warn!(
            symbol = %component.lib_name,
            reference = %component.reference,
            "library symbol not found, plotting fields only"
        ),
    }

    for field in &component.fields {
        if field.text.is_empty() || field.text == "~" || (!field.visible && !options.plot_hidden) {
            continue;
        }
        let style = TextStyle {
            size: field.size as f64,
            angle: placement.text_angle(field.orientation.angle()),
            hjustify: field.hjustify,
            vjustify: field.vjustify,
            italic: field.italic,
        };
        plotter.set_line_width(options.line_width);
        plot_text(plotter, font, &field.text, field.pos.into(), &style);
    }
}

fn plot_sch_text<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    text: &SchText,
    options: &PlotOptions,
) {
    // Spin style: 0 right, 1 up, 2 left, 3 down.
    let (angle, hjustify) = match text.orientation.rem_euclid(4) {
        1 => (90.0, TextHJustify::Left),
        2 => (0.0, TextHJustify::Right),
        3 => (90.0, TextHJustify::Right),
        _ => (0.0, TextHJustify::Left),
    };
    let style = TextStyle {
        size: text.size as f64,
        angle,
        hjustify,
        vjustify: TextVJustify::Bottom,
        italic: text.italic,
    };
    plotter.set_line_width(options.line_width);
    plot_text(plotter, font, &text.text, text.pos.into(), &style);
}

fn plot_sheet<P: Plotter + ?Sized>(
    plotter: &mut P,
    font: &dyn StrokeFont,
    sheet: &SheetSymbol,
    options: &PlotOptions,
) {
    let (p, s) = (sheet.pos, sheet.size);
    let outline: Vec<PlotPoint> = [
        p,
        Point::new(p.x + s.x, p.y),
        p + s,
        Point::new(p.x, p.y + s.y),
        p,
    ]
    .into_iter()
    .map(PlotPoint::from)
    .collect();
    plotter.polygon(&outline, false, options.line_width);

    plotter.set_line_width(options.line_width);
    let name = TextStyle {
        size: sheet.name_size as f64,
        hjustify: TextHJustify::Left,
        vjustify: TextVJustify::Bottom,
        ..Default::default()
    };
    plot_text(
        plotter,
        font,
        &format!("Sheet: {}", sheet.name),
        Point::new(p.x, p.y - SHEET_LABEL_GAP).into(),
        &name,
    );
    let file = TextStyle {
        size: sheet.file_name_size as f64,
        hjustify: TextHJustify::Left,
        vjustify: TextVJustify::Top,
        ..Default::default()
    };
    plot_text(
        plotter,
        font,
        &format!("File: {}", sheet.file_name),
        Point::new(p.x, p.y + s.y + SHEET_LABEL_GAP).into(),
        &file,
    );

    for pin in &sheet.pins {
        // Pin labels read inward from the edge they sit on.
        let (angle, hjustify) = match pin.side.as_str() {
            "R" => (0.0, TextHJustify::Right),
            "T" => (90.0, TextHJustify::Right),
            "B" => (90.0, TextHJustify::Left),
            _ => (0.0, TextHJustify::Left),
        };
        let style = TextStyle {
            size: pin.size as f64,
            angle,
            hjustify,
            vjustify: TextVJustify::Center,
            italic: false,
        };
        plot_text(plotter, font, &pin.name, pin.pos.into(), &style);
    }
}
