//! Streaming tokenization of SVG/XML input using quick-xml

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;
use crate::tokenizer::{Token, TokenKind};

/// Tokenize a full XML document into a flat, depth-annotated sequence.
///
/// Whitespace-only text runs are dropped unless the enclosing element is
/// `<text>`, where whitespace is significant in SVG. Self-closing tags
/// produce a single open-tag token and no close-tag token. An empty input
/// yields an empty sequence.
///
/// # Errors
///
/// Returns [`ParseError`] for malformed XML: mismatched or unclosed tags,
/// invalid syntax, or duplicate attributes. No tokens are produced once an
/// error is hit.
pub fn tokenize(xml: &str) -> Result<Vec<Token>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut tokens = Vec::new();
    let mut stack: Vec<String> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| syntax_error(&reader, e.to_string()))?;

        match event {
            Event::Decl(e) => {
                let raw = String::from_utf8_lossy(&e).into_owned();
                // The raw content is `xml version="1.0" ...`; the rendered
                // delimiter re-supplies the `<?xml ` prefix.
                let body = match raw.strip_prefix("xml") {
                    Some(rest) => rest.trim_start().to_string(),
                    None => raw,
                };
                tokens.push(Token::new(TokenKind::XmlDecl { body }, stack.len()));
            }
            Event::DocType(e) => {
                let body = String::from_utf8_lossy(&e).into_owned();
                tokens.push(Token::new(TokenKind::Doctype { body }, stack.len()));
            }
            Event::PI(e) => {
                let body = String::from_utf8_lossy(&e).into_owned();
                tokens.push(Token::new(
                    TokenKind::ProcessingInstruction { body },
                    stack.len(),
                ));
            }
            Event::CData(e) => {
                let body = String::from_utf8_lossy(&e).into_owned();
                tokens.push(Token::new(TokenKind::Cdata { body }, stack.len()));
            }
            Event::Comment(e) => {
                let body = String::from_utf8_lossy(&e).into_owned();
                tokens.push(Token::new(TokenKind::Comment { body }, stack.len()));
            }
            Event::Start(e) => {
                let name = tag_name(&e);
                let attributes = collect_attributes(&e, &reader)?;
                tokens.push(Token::new(
                    TokenKind::OpenTag {
                        name: name.clone(),
                        attributes,
                        self_closing: false,
                    },
                    stack.len(),
                ));
                stack.push(name);
            }
            Event::Empty(e) => {
                // A single event covers the whole element, so no close-tag
                // token exists to suppress.
                let name = tag_name(&e);
                let attributes = collect_attributes(&e, &reader)?;
                tokens.push(Token::new(
                    TokenKind::OpenTag {
                        name,
                        attributes,
                        self_closing: true,
                    },
                    stack.len(),
                ));
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if stack.pop().is_none() {
                    return Err(syntax_error(
                        &reader,
                        format!("unmatched closing tag </{name}>"),
                    ));
                }
                tokens.push(Token::new(TokenKind::CloseTag { name }, stack.len()));
            }
            Event::Text(e) => {
                let body = String::from_utf8_lossy(&e).into_owned();
                let is_whitespace = body.chars().all(char::is_whitespace);
                let inside_text_element = stack.last().is_some_and(|name| name == "text");
                if !is_whitespace || inside_text_element {
                    tokens.push(Token::new(TokenKind::Text { body }, stack.len()));
                }
            }
            Event::Eof => {
                // quick-xml treats a truncated document as a normal end of
                // input; the tag stack catches what it let through.
                if let Some(name) = stack.last() {
                    return Err(syntax_error(&reader, format!("unclosed tag <{name}>")));
                }
                return Ok(tokens);
            }
        }
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn collect_attributes(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<BTreeMap<String, String>, ParseError> {
    let mut attributes = BTreeMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| syntax_error(reader, err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

fn syntax_error(reader: &Reader<&[u8]>, message: String) -> ParseError {
    let at = reader.buffer_position();
    ParseError::Syntax { span: at..at, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_text_token(tokens: &[Token]) -> bool {
        tokens
            .iter()
            .any(|t| matches!(t.kind, TokenKind::Text { .. }))
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_xml_declaration_keeps_embedded_newlines() {
        let tokens =
            tokenize("<?xml version=\"1.0\"\n    encoding=\"UTF-8\" standalone=\"no\"?>").unwrap();
        assert_eq!(
            tokens,
            vec![Token::new(
                TokenKind::XmlDecl {
                    body: "version=\"1.0\"\n    encoding=\"UTF-8\" standalone=\"no\"".to_string()
                },
                0
            )]
        );
    }

    #[test]
    fn test_nested_tags_track_depth() {
        let tokens = tokenize("<g><g></g></g>").unwrap();
        let depths: Vec<usize> = tokens.iter().map(|t| t.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 0]);
        assert!(matches!(tokens[0].kind, TokenKind::OpenTag { .. }));
        assert!(matches!(tokens[2].kind, TokenKind::CloseTag { .. }));
    }

    #[test]
    fn test_attributes_are_collected() {
        let tokens = tokenize(r#"<g id="test-id" madeup="still works"></g>"#).unwrap();
        match &tokens[0].kind {
            TokenKind::OpenTag { name, attributes, self_closing } => {
                assert_eq!(name, "g");
                assert!(!self_closing);
                assert_eq!(attributes.get("id").map(String::as_str), Some("test-id"));
                assert_eq!(
                    attributes.get("madeup").map(String::as_str),
                    Some("still works")
                );
            }
            other => panic!("expected open tag, got {other:?}"),
        }
    }

    #[test]
    fn test_self_closing_tag_has_no_close_token() {
        let tokens = tokenize(r#"<g><path d="M0 0"/></g>"#).unwrap();
        assert_eq!(tokens.len(), 3);
        match &tokens[1].kind {
            TokenKind::OpenTag { name, self_closing, .. } => {
                assert_eq!(name, "path");
                assert!(self_closing);
            }
            other => panic!("expected open tag, got {other:?}"),
        }
        assert_eq!(tokens[1].depth, 1);
        assert_eq!(tokens[2].kind, TokenKind::CloseTag { name: "g".to_string() });
    }

    #[test]
    fn test_whitespace_only_text_is_dropped_outside_text_element() {
        let tokens = tokenize("<g>  </g>").unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(!has_text_token(&tokens));
    }

    #[test]
    fn test_whitespace_is_kept_directly_inside_text_element() {
        let tokens = tokenize("<text>  </text>").unwrap();
        assert_eq!(
            tokens[1],
            Token::new(TokenKind::Text { body: "  ".to_string() }, 1)
        );
    }

    #[test]
    fn test_whitespace_in_nested_child_of_text_is_dropped() {
        let tokens = tokenize("<text><tspan> </tspan></text>").unwrap();
        assert!(!has_text_token(&tokens));
    }

    #[test]
    fn test_non_whitespace_text_is_kept_anywhere() {
        let tokens = tokenize("<g>hi</g>").unwrap();
        assert_eq!(
            tokens[1],
            Token::new(TokenKind::Text { body: "hi".to_string() }, 1)
        );
    }

    #[test]
    fn test_cdata_and_comment_bodies_are_verbatim() {
        let tokens = tokenize("<text><![CDATA[x < y]]></text>").unwrap();
        assert_eq!(
            tokens[1],
            Token::new(TokenKind::Cdata { body: "x < y".to_string() }, 1)
        );

        let tokens = tokenize("<!-- engaging commentary --><g></g>").unwrap();
        assert_eq!(
            tokens[0],
            Token::new(
                TokenKind::Comment { body: " engaging commentary ".to_string() },
                0
            )
        );
    }

    #[test]
    fn test_doctype() {
        let tokens = tokenize("<!DOCTYPE svg SYSTEM \"svg.dtd\"><svg></svg>").unwrap();
        assert_eq!(
            tokens[0],
            Token::new(
                TokenKind::Doctype { body: "svg SYSTEM \"svg.dtd\"".to_string() },
                0
            )
        );
    }

    #[test]
    fn test_processing_instruction() {
        let tokens = tokenize("<?foo bar?><g></g>").unwrap();
        assert_eq!(
            tokens[0],
            Token::new(
                TokenKind::ProcessingInstruction { body: "foo bar".to_string() },
                0
            )
        );
    }

    #[test]
    fn test_entities_pass_through_unresolved() {
        let tokens = tokenize(r#"<g id="a&amp;b">x &lt; y</g>"#).unwrap();
        match &tokens[0].kind {
            TokenKind::OpenTag { attributes, .. } => {
                assert_eq!(attributes.get("id").map(String::as_str), Some("a&amp;b"));
            }
            other => panic!("expected open tag, got {other:?}"),
        }
        assert_eq!(
            tokens[1].kind,
            TokenKind::Text { body: "x &lt; y".to_string() }
        );
    }

    #[test]
    fn test_unmatched_opening_tag_is_an_error() {
        assert!(tokenize("<g>").is_err());
    }

    #[test]
    fn test_unmatched_closing_tag_is_an_error() {
        assert!(tokenize("</g>").is_err());
    }

    #[test]
    fn test_improperly_nested_tags_are_an_error() {
        assert!(tokenize("<text><tspan></text></tspan>").is_err());
    }

    #[test]
    fn test_properly_nested_tags_are_not_an_error() {
        assert!(tokenize("<text><tspan></tspan></text>").is_ok());
    }
}
