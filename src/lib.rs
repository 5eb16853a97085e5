//! svgfmt - reformat SVG/XML into a diff-friendly layout
//!
//! This library tokenizes an XML document into a flat, depth-annotated
//! stream and re-renders it with one logical unit per line, so SVG files
//! produce readable diffs in version control.
//!
//! # Example
//!
//! ```rust
//! use svgfmt::{format, FormatOptions};
//!
//! let out = format("<svg><g></g></svg>", &FormatOptions::default()).unwrap();
//! assert_eq!(out, "<svg>\n  <g>\n  </g>\n</svg>\n");
//! ```

pub mod error;
pub mod renderer;
pub mod tokenizer;

pub use error::{ConfigError, ParseError};
pub use renderer::{render, FormatOptions, IndentSpec};
pub use tokenizer::{tokenize, Token, TokenKind};

use thiserror::Error;

/// Errors that can occur during the format pipeline
#[derive(Debug, Error)]
pub enum FormatError {
    /// Malformed XML input
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid formatting options
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Format an XML document into the final output string.
///
/// Runs the tokenizer and renderer, drops blank lines, joins with newlines,
/// and appends exactly one trailing newline. Formatting is idempotent: the
/// output formats to itself under the same options.
///
/// # Errors
///
/// Returns [`FormatError`] for malformed XML or invalid options; no partial
/// output is produced.
pub fn format(xml: &str, options: &FormatOptions) -> Result<String, FormatError> {
    let lines = format_lines(xml, options)?;
    let kept: Vec<String> = lines.into_iter().filter(|line| !is_blank(line)).collect();
    Ok(kept.join("\n") + "\n")
}

/// Format an XML document into its output lines.
///
/// Same pipeline as [`format`] but exposes the line sequence directly,
/// without blank-line filtering or the trailing-newline join.
pub fn format_lines(xml: &str, options: &FormatOptions) -> Result<Vec<String>, FormatError> {
    let tokens = tokenize(xml)?;
    Ok(render(&tokens, options)?)
}

/// True when a line has no non-whitespace content.
fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}
