//! Token types produced by the tokenizer

use std::collections::BTreeMap;

/// One parsed unit of XML structure, annotated with nesting depth.
///
/// Tokens are created once by [`tokenize`](crate::tokenizer::tokenize) and
/// never mutated; the renderer only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Number of open, non-self-closing ancestor elements at the point the
    /// token was emitted. Open tags report the depth before entering their
    /// element, close tags the depth after leaving it, so both carry the
    /// indent level of the element itself.
    pub depth: usize,
}

/// The syntactic construct a [`Token`] represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<?xml ...?>` declaration; `body` is everything after the `xml` name.
    XmlDecl { body: String },
    /// `<!DOCTYPE ...>`; `body` starts at the root element name.
    Doctype { body: String },
    /// `<![CDATA[...]]>` inner content, verbatim.
    Cdata { body: String },
    /// `<!--...-->` inner content, verbatim.
    Comment { body: String },
    /// A processing instruction other than the XML declaration; `body` is
    /// the target name plus its content.
    ProcessingInstruction { body: String },
    /// An opening tag. Attribute values keep their source escaping; the map
    /// is ordered by attribute name, which is also the rendering order.
    OpenTag {
        name: String,
        attributes: BTreeMap<String, String>,
        self_closing: bool,
    },
    /// A closing tag. Never emitted for self-closing elements.
    CloseTag { name: String },
    /// A text run, with source escaping intact.
    Text { body: String },
}

impl Token {
    pub fn new(kind: TokenKind, depth: usize) -> Self {
        Self { kind, depth }
    }
}
