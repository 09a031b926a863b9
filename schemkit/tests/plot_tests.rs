//! Tests for plot command emission

use schemkit::plot::board::plot_board;
use schemkit::plot::schematic::plot_schematic;
use schemkit::plot::stroke_font::{plot_text, TextStyle};
use schemkit::plot::{
    plot_component, CommandRecorder, GlyphTable, Placement, PlotCommand, PlotOptions, PlotPoint,
};
use schemkit::{Board, Library, Schematic};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("Should read fixture")
}

/// Command names without pen width changes.
fn shapes(recorder: &CommandRecorder) -> Vec<&'static str> {
    recorder
        .commands()
        .iter()
        .filter_map(|c| match c {
            PlotCommand::SetLineWidth { .. } => None,
            PlotCommand::MoveTo { .. } => Some("move"),
            PlotCommand::LineTo { .. } => Some("line"),
            PlotCommand::Arc { .. } => Some("arc"),
            PlotCommand::Circle { .. } => Some("circle"),
            PlotCommand::Polygon { .. } => Some("polygon"),
        })
        .collect()
}

#[test]
fn test_component_plot_follows_draw_order() {
    let library = Library::load(&read_fixture("device.lib")).expect("Should parse");
    let logo = library.find_by_name("LOGO").unwrap();
    let mut recorder = CommandRecorder::new();

    plot_component(
        &mut recorder,
        &GlyphTable::new(),
        logo,
        &Placement::default(),
        &PlotOptions::default(),
    );
    // Arc, text (no glyphs available), circle.
    assert_eq!(shapes(&recorder), vec!["arc", "circle"]);
}

#[test]
fn test_unit_selection() {
    let library = Library::load(&read_fixture("device.lib")).expect("Should parse");
    let opamp = library.find_by_name("LM358").unwrap();
    let options = PlotOptions {
        plot_pin_text: false,
        ..Default::default()
    };

    let pin_strokes = |unit: u32| {
        let mut recorder = CommandRecorder::new();
        let placement = Placement {
            unit,
            ..Default::default()
        };
        plot_component(&mut recorder, &GlyphTable::new(), opamp, &placement, &options);
        let shapes = shapes(&recorder);
        assert_eq!(shapes[0], "polygon", "Shared body comes first");
        shapes.iter().filter(|s| **s == "move").count()
    };

    // Three own pins plus the two shared supply pins.
    assert_eq!(pin_strokes(1), 5);
    assert_eq!(pin_strokes(2), 5);
    assert_eq!(pin_strokes(3), 2);
}

#[test]
fn test_hidden_pins_need_plot_hidden() {
    let library = Library::load(&read_fixture("device.lib")).expect("Should parse");
    let gnd = library.find_by_name("GND").unwrap();
    let font = GlyphTable::new();

    let mut recorder = CommandRecorder::new();
    plot_component(&mut recorder, &font, gnd, &Placement::default(), &PlotOptions::default());
    assert_eq!(shapes(&recorder), vec!["polygon"]);

    let mut recorder = CommandRecorder::new();
    let options = PlotOptions {
        plot_hidden: true,
        ..Default::default()
    };
    plot_component(&mut recorder, &font, gnd, &Placement::default(), &options);
    assert_eq!(shapes(&recorder), vec!["polygon", "move", "line"]);
}

#[test]
fn test_schematic_uses_library_bodies() {
    let libraries = vec![Library::load(&read_fixture("device.lib")).expect("Should parse")];
    let schematic = Schematic::load(&read_fixture("filter.sch")).expect("Should parse");
    let options = PlotOptions {
        plot_pin_text: false,
        ..Default::default()
    };

    let mut with_libs = CommandRecorder::new();
    plot_schematic(&mut with_libs, &GlyphTable::new(), &schematic, &libraries, &options);
    let mut without_libs = CommandRecorder::new();
    plot_schematic(&mut without_libs, &GlyphTable::new(), &schematic, &[], &options);

    assert!(with_libs.len() > without_libs.len());
    // The capacitor plates are the first thing drawn.
    assert_eq!(
        with_libs
            .commands()
            .iter()
            .find(|c| !matches!(c, PlotCommand::SetLineWidth { .. })),
        Some(&PlotCommand::Polygon {
            points: vec![PlotPoint::new(2920.0, 2030.0), PlotPoint::new(3080.0, 2030.0)],
            fill: false,
            width: 20.0,
        })
    );
}

#[test]
fn test_board_categories_in_order() {
    let board = Board::load(&read_fixture("blinky.kicad_pcb")).expect("Should parse");
    let mut recorder = CommandRecorder::new();
    plot_board(&mut recorder, &GlyphTable::new(), &board, &PlotOptions::default());

    let shapes = shapes(&recorder);
    // Board outline line and arc lead, the zone fill closes the stream.
    assert_eq!(&shapes[..3], &["move", "line", "arc"]);
    match recorder.commands().last() {
        Some(PlotCommand::Polygon { points, fill, .. }) => {
            assert!(fill);
            assert_eq!(points[0], PlotPoint::new(100.5, 60.5));
        }
        other => panic!("Expected zone fill, got {other:?}"),
    }
}

#[test]
fn test_board_layer_filter() {
    let board = Board::load(&read_fixture("blinky.kicad_pcb")).expect("Should parse");
    let options = PlotOptions {
        layers: vec!["B.Cu".to_string()],
        ..Default::default()
    };
    let mut recorder = CommandRecorder::new();
    plot_board(&mut recorder, &GlyphTable::new(), &board, &options);
    // One back-side track, the via and the zone.
    assert_eq!(shapes(&recorder), vec!["move", "line", "circle", "polygon"]);
}

#[test]
fn test_stroked_text_is_lines_only() {
    // '|' as a single vertical bar.
    let font = GlyphTable::from_hershey('|', &["JZRFRY"]);
    let mut recorder = CommandRecorder::new();
    let style = TextStyle {
        size: 21.0,
        italic: true,
        ..Default::default()
    };
    plot_text(&mut recorder, &font, "||\n|", PlotPoint::new(0.0, 0.0), &style);

    assert_eq!(
        shapes(&recorder),
        vec!["move", "line", "move", "line", "move", "line"]
    );
    assert!(recorder
        .commands()
        .iter()
        .all(|c| matches!(c, PlotCommand::MoveTo { .. } | PlotCommand::LineTo { .. })));
}
