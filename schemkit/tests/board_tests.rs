//! Tests for board (.kicad_pcb) parsing

use schemkit::parser::pcb_schema::{GraphicShape, LayerType, PadShape};
use schemkit::parser::{BoardError, LexemeKind};
use schemkit::{Board, SexpLexer};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_blinky() -> Board {
    let content =
        std::fs::read_to_string(fixture_path("blinky.kicad_pcb")).expect("Should read fixture");
    Board::load(&content).expect("Should parse")
}

#[test]
fn test_lexer_splits_net() {
    let lexemes = SexpLexer::tokenize("(net 1 GND)").expect("Should lex");
    let kinds: Vec<&LexemeKind> = lexemes.iter().map(|l| &l.kind).collect();
    assert_eq!(lexemes.len(), 5);
    assert!(lexemes[0].is_left());
    assert_eq!(lexemes[1].text(), "net");
    assert_eq!(*kinds[2], LexemeKind::Number);
    assert_eq!(lexemes[3].text(), "GND");
    assert!(lexemes[4].is_right());
}

#[test]
fn test_header_sections() {
    let board = load_blinky();
    assert_eq!(board.version.as_deref(), Some("20171130"));
    let host = board.host.as_ref().expect("Should have host");
    assert_eq!(host.name, "pcbnew");
    assert_eq!(host.version, "(5.1.9)-1");
    assert_eq!(board.general.thickness, 1.6);
    assert_eq!(board.general.modules, 1);
    assert_eq!(board.layers.len(), 5);
    assert_eq!(board.layers[0].layer_type, LayerType::Signal);
    assert_eq!(board.layers[4].name, "Edge.Cuts");
}

#[test]
fn test_nets_and_classes() {
    let board = load_blinky();
    assert_eq!(board.nets.len(), 3);
    assert_eq!(board.net_name(1), Some("GND"));
    assert_eq!(board.net_name(2), Some("Net-(D1-Pad2)"));
    assert_eq!(board.net_name(7), None);

    let class = &board.net_classes[0];
    assert_eq!(class.name, "Default");
    assert_eq!(class.trace_width, Some(0.25));
    assert_eq!(class.nets, vec!["GND", "Net-(D1-Pad2)"]);
}

#[test]
fn test_footprint() {
    let board = load_blinky();
    let module = board.find_module("D1").expect("Should find D1");

    assert_eq!(module.name, "LED_SMD:LED_0805");
    assert_eq!(module.value, "LED");
    assert_eq!(module.angle, 180.0);
    assert_eq!(module.texts.len(), 2);
    assert_eq!(module.graphics.len(), 2);
    assert_eq!(module.pads.len(), 2);

    let pad = &module.pads[0];
    assert_eq!(pad.shape, PadShape::RoundRect);
    assert_eq!(pad.net.as_ref().map(|n| n.name.as_str()), Some("GND"));

    // Rotated half a turn around the footprint origin.
    let placed = module.to_board(pad.at);
    assert!((placed.x - 120.9375).abs() < 1e-9);
    assert!((placed.y - 80.0).abs() < 1e-9);
}

#[test]
fn test_drawings_tracks_and_zones() {
    let board = load_blinky();
    assert_eq!(board.drawings.len(), 4);
    assert!(matches!(board.drawings[0].shape, GraphicShape::Line { .. }));
    assert!(matches!(
        board.drawings[1].shape,
        GraphicShape::Arc { angle, .. } if angle == -90.0
    ));
    match &board.drawings[3].shape {
        GraphicShape::Text(text) => {
            assert_eq!(text.text, "Blinky rev 1");
            assert!(text.italic);
            assert_eq!(text.thickness, 0.3);
        }
        other => panic!("Expected text, got {other:?}"),
    }

    assert_eq!(board.segments.len(), 2);
    assert_eq!(board.segments[1].layer, "B.Cu");
    assert_eq!(board.segments[1].net, 2);
    assert_eq!(board.vias[0].drill, Some(0.4));

    let zone = &board.zones[0];
    assert_eq!(zone.net_name, "GND");
    assert_eq!(zone.outline.len(), 4);
    assert_eq!(zone.filled_polygons.len(), 1);
    assert_eq!(zone.min_thickness, Some(0.254));
}

#[test]
fn test_unknown_sections_skipped() {
    let board = Board::load("(kicad_pcb (version 3) (gizmo (a (b c)) d) (net 1 GND))")
        .expect("Should skip unknown sections");
    assert_eq!(board.nets.len(), 1);
}

#[test]
fn test_truncated_board() {
    let err = Board::load("(kicad_pcb (version 3) (net 1 GND)").unwrap_err();
    assert!(matches!(err, BoardError::UnexpectedEof(_)));
}
