//! Streaming tokenizer for SVG/XML documents
//!
//! Turns a raw document into a flat sequence of [`Token`]s, each annotated
//! with the nesting depth the renderer should indent it at.

mod scan;
pub mod token;

pub use scan::tokenize;
pub use token::{Token, TokenKind};
