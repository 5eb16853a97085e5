//! Line rendering: mapping the token stream to indented output lines

use crate::error::ConfigError;
use crate::renderer::FormatOptions;
use crate::tokenizer::{Token, TokenKind};

/// Elements whose rendered text continues the previous line instead of
/// starting a new one, so text flow is not broken by spurious newlines.
const INLINE_ELEMENTS: &[&str] = &["br"];

/// Elements whose closing tag always gets a line of its own.
const NEWLINE_END_ELEMENTS: &[&str] = &["g", "defs", "svg"];

/// Render a token sequence into output lines.
///
/// Each token contributes one or more lines: simple tokens are wrapped in
/// kind-specific delimiters and split on embedded newlines; open tags get
/// one line for the tag plus one per attribute, attributes in lexicographic
/// order, with the closing delimiter appended to the last line.
///
/// # Errors
///
/// Returns [`ConfigError`] when an indent option fails to normalize; no
/// lines are produced in that case.
pub fn render(tokens: &[Token], options: &FormatOptions) -> Result<Vec<String>, ConfigError> {
    let shiftwidth = options.shiftwidth.resolve("shiftwidth")?;
    let attr_extra = options.attr_extra_indent.resolve("attr-extra-indent")?;
    let attr_indent = format!("{shiftwidth}{attr_extra}");

    let mut out = Vec::new();
    for token in tokens {
        let raw = raw_lines(token, &shiftwidth, &attr_indent);
        push_lines(&mut out, token, raw, &shiftwidth);
    }
    Ok(out)
}

/// The lines a single token produces, before placement and outer indent.
fn raw_lines(token: &Token, shiftwidth: &str, attr_indent: &str) -> Vec<String> {
    match &token.kind {
        TokenKind::OpenTag { name, attributes, self_closing } => {
            let mut lines = vec![format!("<{name}")];

            let full_attr_indent = format!("{}{attr_indent}", shiftwidth.repeat(token.depth));
            for (key, value) in attributes {
                lines.push(format!("{full_attr_indent}{key}=\"{value}\""));
            }

            let closer = if *self_closing { " />" } else { ">" };
            if let Some(last) = lines.last_mut() {
                last.push_str(closer);
            }
            lines
        }
        TokenKind::CloseTag { name } => vec![format!("</{name}>")],
        TokenKind::XmlDecl { body } => wrap("<?xml ", body, "?>"),
        TokenKind::Doctype { body } => wrap("<!DOCTYPE ", body, ">"),
        TokenKind::Cdata { body } => wrap("<![CDATA[", body, "]]>"),
        TokenKind::Comment { body } => wrap("<!--", body, "-->"),
        TokenKind::ProcessingInstruction { body } => wrap("<?", body, "?>"),
        TokenKind::Text { body } => wrap("", body, ""),
    }
}

/// Wrap a body in its delimiters and split on embedded newlines, so a
/// multi-line construct stays verbatim across several output lines.
fn wrap(open: &str, body: &str, close: &str) -> Vec<String> {
    format!("{open}{body}{close}")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Whether a token's first line is glued onto the previous output line.
fn starts_inline(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Cdata { .. } | TokenKind::Text { .. } => true,
        TokenKind::OpenTag { name, .. } => INLINE_ELEMENTS.contains(&name.as_str()),
        TokenKind::CloseTag { name } => !NEWLINE_END_ELEMENTS.contains(&name.as_str()),
        _ => false,
    }
}

/// Merge one token's raw lines into the output: the first line either
/// continues the current line or starts a new indented one; the rest are
/// appended verbatim.
fn push_lines(out: &mut Vec<String>, token: &Token, raw: Vec<String>, shiftwidth: &str) {
    let mut lines = raw.into_iter();
    let Some(first) = lines.next() else { return };

    match out.last_mut() {
        Some(last) if starts_inline(token) => last.push_str(&first),
        _ => out.push(format!("{}{first}", shiftwidth.repeat(token.depth))),
    }
    out.extend(lines);
}
