//! Tests for symbol library parsing

use schemkit::geometry::{Rect, Transform};
use schemkit::parser::draw::DrawObject;
use schemkit::parser::library::LibraryError;
use schemkit::parser::common::PinType;
use schemkit::Library;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_device_lib() -> Library {
    let content = std::fs::read_to_string(fixture_path("device.lib")).expect("Should read fixture");
    Library::load(&content).expect("Should parse")
}

#[test]
fn test_parse_device_library() {
    let library = load_device_lib();
    assert_eq!(library.version, 2.4);

    let names: Vec<&str> = library.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["C", "GND", "LM358", "LOGO"]);
}

#[test]
fn test_component_header_and_fields() {
    let library = load_device_lib();
    let cap = library.find_by_name("C").expect("Should find C");

    assert_eq!(cap.reference, "C");
    assert_eq!(cap.text_offset, 10);
    assert!(!cap.draw_pinnumber);
    assert!(cap.draw_pinname);
    assert_eq!(cap.unit_count, 1);
    assert!(!cap.units_locked);
    assert_eq!(cap.value(), Some("C"));
    assert_eq!(cap.fplist.as_deref(), Some(&["C_*".to_string()][..]));

    // F2 and F3 are hidden
    assert!(cap.field.visibility);
    assert!(!cap.fields[1].field.visibility);
    assert!(!cap.fields[2].field.visibility);
}

#[test]
fn test_power_symbol_hidden_pin() {
    let library = load_device_lib();
    let gnd = library.find_by_name("GND").expect("Should find GND");
    assert!(gnd.is_power());

    let pin = gnd.draw.as_ref().unwrap().pins().next().expect("Should have a pin");
    assert_eq!(pin.pin_type, PinType::PowerIn);
    assert!(!pin.visibility, "Pin flagged N should be invisible");
}

#[test]
fn test_aliases_resolve() {
    let library = load_device_lib();
    let by_alias = library.find_by_name_or_alias("MC1458").expect("Should resolve alias");
    assert_eq!(by_alias.name, "LM358");
    assert!(library.find_by_name("LM2904").is_none());
    assert_eq!(by_alias.unit_count, 2);
}

#[test]
fn test_tilde_name_hides_reference() {
    let library = load_device_lib();
    let logo = library.find_by_name("LOGO").expect("Should strip the tilde");
    assert!(!logo.field.visibility);

    let draw = logo.draw.as_ref().unwrap();
    match &draw.objects[1] {
        DrawObject::Text(text) => assert_eq!(text.text, "Hello World"),
        other => panic!("Expected text, got {other:?}"),
    }
}

#[test]
fn test_arc_bounding_box() {
    let library = load_device_lib();
    let logo = library.find_by_name("LOGO").unwrap();
    let arc = &logo.draw.as_ref().unwrap().objects[0];

    assert_eq!(
        arc.bounding_box(&Transform::IDENTITY),
        Rect::new(-100, 0, 100, 100)
    );
    let mirrored = arc.bounding_box(&Transform::LIBRARY_DEFAULT);
    assert_eq!(mirrored.width(), 200);
    assert_eq!(mirrored.height(), 100);
}

#[test]
fn test_header_with_date() {
    let header = "EESchema-LIBRARY Version 2.3  Date: 01/02/2013 10:00:00";
    let library = Library::load(&format!("{header}\n#End Library\n"))
        .expect("Should accept a trailing date");
    assert_eq!(library.version, 2.3);
    assert!(library.components.is_empty());
}

#[test]
fn test_newer_version_rejected() {
    let err = Library::load("EESchema-LIBRARY Version 2.5\n").unwrap_err();
    assert!(matches!(err, LibraryError::Version { found, .. } if found == 2.5));
}

#[test]
fn test_not_a_library() {
    let err = Library::load("EESchema Schematic File Version 4\n").unwrap_err();
    assert!(matches!(err, LibraryError::Format(_)));
}

#[test]
fn test_malformed_number_reports_line() {
    let content = "EESchema-LIBRARY Version 2.4
DEF R R 0 0 N Y 1 F N
F0 \"R\" 80 0 50 V V C CNN
DRAW
S -40 -100 4x0 100 0 1 10 N
ENDDRAW
ENDDEF
";
    match Library::load(content).unwrap_err() {
        LibraryError::Parse(err) => {
            assert_eq!(err.line, 5);
            assert!(err.source_line.starts_with("S -40"));
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_eof_inside_draw() {
    let content = "EESchema-LIBRARY Version 2.4
DEF R R 0 0 N Y 1 F N
DRAW
P 2 0 1 0 0 0 10 10 N
";
    match Library::load(content).unwrap_err() {
        LibraryError::Parse(err) => {
            assert!(err.message.contains("ENDDRAW"));
            assert_eq!(err.line, 5);
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_unknown_draw_item_reports_line() {
    let content = "EESchema-LIBRARY Version 2.4
#
# R
DEF R R 0 0 N Y 1 F N
F0 \"R\" 0 0 50 H V C CNN
DRAW
Q 1 2 3
ENDDRAW
ENDDEF
";
    match Library::load(content).unwrap_err() {
        LibraryError::Parse(err) => {
            assert_eq!(err.line, 7);
            assert_eq!(err.source_line, "Q 1 2 3");
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_polyline_count_overflow_is_an_error() {
    let content = "EESchema-LIBRARY Version 2.4
DEF R R 0 0 N Y 1 F N
DRAW
P 9223372036854775807 0 1 0
ENDDRAW
ENDDEF
";
    match Library::load(content).unwrap_err() {
        LibraryError::Parse(err) => assert_eq!(err.line, 4),
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_coordinate_out_of_range_is_an_error() {
    let content = "EESchema-LIBRARY Version 2.4
DEF R R 0 0 N Y 1 F N
DRAW
A -9223372036854775808 0 100 0 900 0 1 0 N 9223372036854775807 0 0 100
ENDDRAW
ENDDEF
";
    match Library::load(content).unwrap_err() {
        LibraryError::Parse(err) => {
            assert_eq!(err.line, 4);
            assert!(err.message.contains("out of range"));
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_polyline_bounding_box() {
    let library = load_device_lib();
    let opamp = library.find_by_name("LM358").unwrap();
    let body = &opamp.draw.as_ref().unwrap().objects[0];
    assert!(matches!(body, DrawObject::Polyline(p) if p.points.len() == 4));
    assert_eq!(
        body.bounding_box(&Transform::IDENTITY),
        Rect::new(-200, -200, 200, 200)
    );
}

#[test]
fn test_pin_without_attributes_is_visible() {
    let library = load_device_lib();
    let cap = library.find_by_name("C").unwrap();
    let pin = cap.draw.as_ref().unwrap().pins().next().unwrap();
    assert_eq!(pin.num, "1");
    assert!(pin.attributes.is_empty());
    assert!(pin.visibility);
}
