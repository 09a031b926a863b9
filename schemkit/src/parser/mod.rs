pub mod common;
pub mod cursor;
pub mod draw;
pub mod format_detector;
pub mod keywords;
pub mod library;
pub mod pcb;
pub mod pcb_schema;
pub mod schematic;
pub mod sexp;
pub mod token;

// Re-export for convenience
pub use cursor::{tokenize_line, LineCursor, ParseError};
pub use draw::{Draw, DrawObject};
pub use format_detector::{detect_format, DocumentFormat};
pub use keywords::Keyword;
pub use library::{LibComponent, Library, LibraryError};
pub use pcb::BoardError;
pub use pcb_schema::*;
pub use schematic::{Schematic, SchematicError};
pub use sexp::{LexError, Lexeme, LexemeKind, SexpLexer};
pub use token::Token;
