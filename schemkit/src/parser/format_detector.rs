//! Content sniffing for KiCad documents.
//!
//! Looks at the first non-blank text of a file and decides which parser
//! understands it.

use crate::parser::library::LIBRARY_HEADER;
use crate::parser::schematic::SCHEMATIC_HEADER;

/// Kind of KiCad document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `EESchema-LIBRARY` symbol library
    Library,
    /// `EESchema Schematic File` legacy schematic
    Schematic,
    /// `(kicad_pcb ...)` board
    Board,
}

impl DocumentFormat {
    /// Get format name for display
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Library => "symbol library",
            DocumentFormat::Schematic => "schematic",
            DocumentFormat::Board => "board",
        }
    }
}

/// Detect the document format from file content
pub fn detect_format(content: &str) -> Option<DocumentFormat> {
    let trimmed = content.trim_start();

    if trimmed.starts_with(LIBRARY_HEADER.trim_end()) {
        return Some(DocumentFormat::Library);
    }
    if trimmed.starts_with(SCHEMATIC_HEADER.trim_end()) {
        return Some(DocumentFormat::Schematic);
    }
    if let Some(rest) = trimmed.strip_prefix('(') {
        if rest.trim_start().starts_with("kicad_pcb") {
            return Some(DocumentFormat::Board);
        }
    }
    None
}

/// The `(version N)` stamp of a board file, if present near the top.
pub fn board_file_version(content: &str) -> Option<u32> {
    let start = content.find("(version ")? + "(version ".len();
    let section = &content[start..];
    let end = section.find(')')?;
    section[..end].trim().parse().ok()
}
