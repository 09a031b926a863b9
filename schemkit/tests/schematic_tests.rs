//! Tests for legacy schematic parsing

use schemkit::geometry::{Point, Transform};
use schemkit::parser::schematic::{LineKind, SchItem, SchematicError, TextKind};
use schemkit::Schematic;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_filter() -> Schematic {
    let content = std::fs::read_to_string(fixture_path("filter.sch")).expect("Should read fixture");
    Schematic::load(&content).expect("Should parse")
}

#[test]
fn test_parse_header_and_descr() {
    let schematic = load_filter();
    assert_eq!(schematic.version, 4);
    assert_eq!(schematic.libs, vec!["device".to_string()]);

    let descr = schematic.descr.as_ref().expect("Should have a title block");
    assert_eq!(descr.paper, "A4");
    assert_eq!((descr.width, descr.height), (11693, 8268));
    assert_eq!(descr.title, "Filter");
    assert_eq!(descr.company, "Acme");
    assert_eq!(descr.comments[0], "first");
}

#[test]
fn test_items_keep_file_order() {
    let schematic = load_filter();
    let kinds: Vec<&str> = schematic
        .items
        .iter()
        .map(|item| match item {
            SchItem::Component(_) => "component",
            SchItem::Line(_) => "line",
            SchItem::BusEntry(_) => "entry",
            SchItem::Junction { .. } => "junction",
            SchItem::NoConnect { .. } => "no_connect",
            SchItem::Text(_) => "text",
            SchItem::Sheet(_) => "sheet",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "component",
            "component",
            "line",
            "line",
            "entry",
            "junction",
            "no_connect",
            "text",
            "text",
            "sheet"
        ]
    );
}

#[test]
fn test_component_fields() {
    let schematic = load_filter();
    let cap = schematic.find_component("C1").expect("Should find C1");

    assert_eq!(cap.lib_name, "device:C");
    assert_eq!(cap.unit, 1);
    assert_eq!(cap.timestamp, "5C0A1B2C");
    assert_eq!(cap.pos, Point::new(3000, 2000));
    assert_eq!(cap.transform, Transform::LIBRARY_DEFAULT);
    assert_eq!(cap.value(), Some("100n"));

    let footprint = cap.field(2).expect("Should have a footprint field");
    assert_eq!(footprint.text, "Capacitor_SMD:C_0603");
    assert!(!footprint.visible);
}

#[test]
fn test_wires_and_markers() {
    let schematic = load_filter();
    let lines: Vec<_> = schematic
        .items
        .iter()
        .filter_map(|item| match item {
            SchItem::Line(line) => Some(line),
            _ => None,
        })
        .collect();
    assert_eq!(lines[0].line_kind, LineKind::Wire);
    assert_eq!(lines[0].start, Point::new(3000, 2150));
    assert_eq!(lines[0].end, Point::new(3000, 2300));
    assert_eq!(lines[1].line_kind, LineKind::Bus);

    assert!(schematic
        .items
        .contains(&SchItem::Junction { pos: Point::new(3000, 2300) }));
    assert!(schematic
        .items
        .contains(&SchItem::NoConnect { pos: Point::new(4000, 4000) }));
}

#[test]
fn test_texts_and_labels() {
    let schematic = load_filter();
    let texts: Vec<_> = schematic
        .items
        .iter()
        .filter_map(|item| match item {
            SchItem::Text(text) => Some(text),
            _ => None,
        })
        .collect();

    assert_eq!(texts[0].text_kind, TextKind::Notes);
    assert_eq!(texts[0].text, "Filter stage");
    assert_eq!(texts[0].size, 60);

    assert_eq!(texts[1].text_kind, TextKind::GlobalLabel);
    assert_eq!(texts[1].shape.as_deref(), Some("Input"));
    assert_eq!(texts[1].orientation, 1);
    assert_eq!(texts[1].text, "VIN");
}

#[test]
fn test_sheet_symbol() {
    let schematic = load_filter();
    let sheet = schematic
        .items
        .iter()
        .find_map(|item| match item {
            SchItem::Sheet(sheet) => Some(sheet),
            _ => None,
        })
        .expect("Should have a sheet");

    assert_eq!(sheet.pos, Point::new(5000, 1000));
    assert_eq!(sheet.size, Point::new(1000, 800));
    assert_eq!(sheet.name, "Power");
    assert_eq!(sheet.file_name, "power.sch");
    assert_eq!(sheet.pins.len(), 1);
    assert_eq!(sheet.pins[0].name, "VOUT");
    assert_eq!(sheet.pins[0].side, "R");
    assert_eq!(sheet.pins[0].pos, Point::new(6000, 1200));
}

#[test]
fn test_newer_version_rejected() {
    let err = Schematic::load("EESchema Schematic File Version 5\n").unwrap_err();
    assert!(matches!(err, SchematicError::Version { found: 5, .. }));
}

#[test]
fn test_unknown_line_reports_line() {
    let content =
        "EESchema Schematic File Version 4\nConnection ~ 10 10\nBogus 1 2\n$EndSCHEMATC\n";
    match Schematic::load(content).unwrap_err() {
        SchematicError::Parse(err) => assert_eq!(err.line, 3),
        other => panic!("Expected parse error, got {other:?}"),
    }
}
