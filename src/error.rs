//! Error types for parsing and option validation

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Malformed XML input. Carries the scanner's diagnostic message and the
/// byte offset it stopped at.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML error at {span:?}: {message}")]
    Syntax { span: Span, message: String },
}

impl ParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let ParseError::Syntax { span, message } = self;

        // Clamp to the source and widen empty spans so the label is visible.
        let end = span.end.min(source.len());
        let start = span.start.min(end);
        let span = if start == end && end < source.len() {
            start..end + 1
        } else {
            start..end
        };

        let mut buf = Vec::new();
        Report::build(ReportKind::Error, filename, span.start)
            .with_message(message)
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }
}

/// Invalid formatting options: a bad indent value, or a failure loading an
/// options file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("`{option}` must be a non-negative integer or a string of only spaces or only tabs")]
    InvalidIndent { option: &'static str },
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse options TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
