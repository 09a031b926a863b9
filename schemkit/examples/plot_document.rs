//! Plot example: load any supported KiCad document and dump its plot commands.

use schemkit::prelude::*;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/device.lib".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example plot_document [path/to/file]");
        std::process::exit(1);
    }

    let content = std::fs::read_to_string(path)?;
    let document = load_document(&content)?;
    let font = GlyphTable::new();
    let options = PlotOptions::default();
    let mut recorder = CommandRecorder::new();

    match &document {
        Document::Library(library) => {
            println!("Library version {}", library.version);
            for component in &library.components {
                println!("  {} ({} units)", component.name, component.unit_count);
                plot_component(&mut recorder, &font, component, &Placement::default(), &options);
            }
        }
        Document::Schematic(schematic) => {
            println!("Schematic with {} items", schematic.items.len());
            plot_schematic(&mut recorder, &font, schematic, &[], &options);
        }
        Document::Board(board) => {
            println!(
                "Board with {} footprints and {} nets",
                board.modules.len(),
                board.nets.len()
            );
            plot_board(&mut recorder, &font, board, &options);
        }
    }

    println!("{} plot commands", recorder.len());
    if std::env::args().any(|a| a == "--json") {
        println!("{}", recorder.to_json()?);
    }
    Ok(())
}
