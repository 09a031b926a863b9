//! Format-independent entry points.
//! No file-system access: callers hand in file contents.

use serde::Serialize;

use crate::parser::format_detector::{detect_format, DocumentFormat};
use crate::parser::library::{Library, LibraryError};
use crate::parser::pcb::BoardError;
use crate::parser::pcb_schema::Board;
use crate::parser::schematic::{Schematic, SchematicError};
use crate::parser::sexp::LexError;

#[derive(Debug, thiserror::Error)]
pub enum SchemkitError {
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),
    #[error("Schematic error: {0}")]
    Schematic(#[from] SchematicError),
    #[error("Board error: {0}")]
    Board(#[from] BoardError),
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unrecognized document format")]
    UnknownFormat,
}

/// Any parsed KiCad document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "document", rename_all = "snake_case")]
pub enum Document {
    Library(Library),
    Schematic(Schematic),
    Board(Board),
}

impl Document {
    pub fn format(&self) -> DocumentFormat {
        match self {
            Document::Library(_) => DocumentFormat::Library,
            Document::Schematic(_) => DocumentFormat::Schematic,
            Document::Board(_) => DocumentFormat::Board,
        }
    }

    pub fn as_library(&self) -> Option<&Library> {
        match self {
            Document::Library(lib) => Some(lib),
            _ => None,
        }
    }

    pub fn as_schematic(&self) -> Option<&Schematic> {
        match self {
            Document::Schematic(sch) => Some(sch),
            _ => None,
        }
    }

    pub fn as_board(&self) -> Option<&Board> {
        match self {
            Document::Board(board) => Some(board),
            _ => None,
        }
    }

    /// Pretty-printed JSON dump of the parsed tree, for inspection.
    pub fn to_json(&self) -> Result<String, SchemkitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sniff the format of `content` and parse it with the matching parser.
pub fn load_document(content: &str) -> Result<Document, SchemkitError> {
    let format = detect_format(content).ok_or(SchemkitError::UnknownFormat)?;
    tracing::debug!("Loading {}", format.as_str());

    let document = match format {
        DocumentFormat::Library => Document::Library(Library::load(content)?),
        DocumentFormat::Schematic => Document::Schematic(Schematic::load(content)?),
        DocumentFormat::Board => Document::Board(Board::load(content)?),
    };
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_unknown() {
        assert!(matches!(
            load_document("hello"),
            Err(SchemkitError::UnknownFormat)
        ));
    }

    #[test]
    fn test_load_board_and_dump() {
        let doc = load_document("(kicad_pcb (version 4) (net 1 GND))").unwrap();
        assert_eq!(doc.format(), DocumentFormat::Board);
        assert_eq!(doc.as_board().unwrap().nets.len(), 1);
        assert!(doc.as_library().is_none());

        let json = doc.to_json().unwrap();
        assert!(json.contains("\"format\": \"board\""));
        assert!(json.contains("\"GND\""));
    }

    #[test]
    fn test_errors_convert() {
        let err = load_document("EESchema-LIBRARY Version 9.0\n").unwrap_err();
        assert!(matches!(err, SchemkitError::Library(LibraryError::Version { .. })));
        assert!(err.to_string().starts_with("Library error"));
    }
}
