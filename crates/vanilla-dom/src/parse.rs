/*
 * parse.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lenient markup parser that builds detached node trees.
//!
//! Built on [`quick_xml`] with end-name checks switched off, plus the handful of
//! HTML rules the engine relies on:
//!
//! - element and attribute names are lower-cased
//! - void elements never receive children, with or without a trailing `/`
//! - attributes may be unquoted or valueless
//! - a stray end tag closes the nearest open element of that name, or is ignored
//! - unclosed elements are closed at end of input
//!
//! Parsing never fails. Reader errors are logged and the tree built up to that
//! point is returned.

use crate::node::{NodeRef, is_void_element};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

/// Parse `markup` into a fragment holding the top-level nodes.
///
/// # Example
///
/// ```rust
/// use vanilla_dom::parse_fragment;
///
/// let fragment = parse_fragment("<p>one</p><p>two<br>three</p>");
/// assert_eq!(fragment.child_count(), 2);
/// assert_eq!(fragment.text_content(), "onetwothree");
/// ```
pub fn parse_fragment(markup: &str) -> NodeRef {
    let mut builder = TreeBuilder::new();

    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text_start = false;
    config.trim_text_end = false;
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.expand_empty_elements = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => builder.open(&e),
            Ok(Event::Empty(e)) => builder.empty(&e),
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                builder.close(&name);
            }
            Ok(Event::Text(e)) => builder.text(decode_entities(&String::from_utf8_lossy(&e))),
            Ok(Event::CData(e)) => builder.text(String::from_utf8_lossy(&e).into_owned()),
            Ok(Event::Comment(e)) => builder.comment(String::from_utf8_lossy(&e).into_owned()),
            Ok(Event::Eof) => break,
            // Declarations, processing instructions and doctypes carry no content.
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    position = reader.error_position(),
                    error = %err,
                    "Malformed markup; keeping the tree parsed so far"
                );
                break;
            }
        }
    }

    builder.finish()
}

/// Stack-based tree construction state.
struct TreeBuilder {
    /// The fragment receiving top-level nodes.
    root: NodeRef,

    /// Elements that are open, innermost last.
    open: Vec<NodeRef>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            root: NodeRef::fragment(),
            open: Vec::new(),
        }
    }

    fn current(&self) -> &NodeRef {
        self.open.last().unwrap_or(&self.root)
    }

    fn attach(&self, node: &NodeRef) {
        if let Err(err) = self.current().append_child(node) {
            tracing::warn!(error = %err, "Dropping node that could not be attached");
        }
    }

    fn open(&mut self, start: &BytesStart<'_>) {
        let element = make_element(start);
        self.attach(&element);
        let is_void = element.tag_name().is_some_and(|name| is_void_element(&name));
        if !is_void {
            self.open.push(element);
        }
    }

    fn empty(&mut self, start: &BytesStart<'_>) {
        let element = make_element(start);
        self.attach(&element);
    }

    fn close(&mut self, name: &str) {
        if is_void_element(name) {
            return;
        }
        let position = self
            .open
            .iter()
            .rposition(|el| el.tag_name().as_deref() == Some(name));
        match position {
            Some(index) => self.open.truncate(index),
            None => tracing::trace!(name, "Ignoring end tag with no open element"),
        }
    }

    fn text(&mut self, text: String) {
        if !text.is_empty() {
            self.attach(&NodeRef::text(text));
        }
    }

    fn comment(&mut self, data: String) {
        self.attach(&NodeRef::comment(data));
    }

    fn finish(self) -> NodeRef {
        self.root
    }
}

fn make_element(start: &BytesStart<'_>) -> NodeRef {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let element = NodeRef::element(name);

    let mut attributes = start.html_attributes();
    attributes.with_checks(false);
    for attribute in attributes {
        match attribute {
            Ok(attribute) => {
                let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                let value = decode_entities(&String::from_utf8_lossy(&attribute.value));
                element.set_attribute(&key, value);
            }
            Err(err) => tracing::warn!(error = %err, "Skipping malformed attribute"),
        }
    }
    element
}

/// Decode character and HTML entity references one at a time. A reference
/// that does not resolve is kept as written.
fn decode_entities(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let end = candidate[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace() || c == '<')
            .map(|offset| offset + 1)
            .filter(|&offset| candidate[offset..].starts_with(';'));
        match end {
            Some(end) => {
                let reference = &candidate[..=end];
                match unescape(reference) {
                    Ok(text) => decoded.push_str(&text),
                    Err(_) => decoded.push_str(reference),
                }
                rest = &candidate[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &candidate[1..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::inner_html;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested_elements() {
        let fragment = parse_fragment("<div><p>Hello</p><p>World</p></div>");
        assert_eq!(fragment.child_count(), 1);
        let div = fragment.first_child().unwrap();
        assert_eq!(div.tag_name().as_deref(), Some("div"));
        assert_eq!(div.child_count(), 2);
        assert_eq!(div.text_content(), "HelloWorld");
    }

    #[test]
    fn test_parse_multiple_top_level_nodes() {
        let fragment = parse_fragment("<b>a</b>text<i>c</i>");
        assert_eq!(fragment.child_count(), 3);
        assert!(fragment.children()[1].is_text());
    }

    #[test]
    fn test_names_are_lowercased() {
        let fragment = parse_fragment(r#"<DIV Class="x"></DIV>"#);
        let div = fragment.first_child().unwrap();
        assert_eq!(div.tag_name().as_deref(), Some("div"));
        assert_eq!(div.attribute("class").as_deref(), Some("x"));
    }

    #[test]
    fn test_void_elements_without_slash() {
        let fragment = parse_fragment("<p>a<br>b<input disabled>c</p>");
        let p = fragment.first_child().unwrap();
        assert_eq!(p.child_count(), 5);
        let input = &p.children()[3];
        assert_eq!(input.tag_name().as_deref(), Some("input"));
        assert_eq!(input.child_count(), 0);
        assert_eq!(input.attribute("disabled").as_deref(), Some(""));
    }

    #[test]
    fn test_unquoted_attribute() {
        let fragment = parse_fragment("<a href=home>x</a>");
        let a = fragment.first_child().unwrap();
        assert_eq!(a.attribute("href").as_deref(), Some("home"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let fragment = parse_fragment(r#"<p title="a &amp; b">1 &lt; 2</p>"#);
        let p = fragment.first_child().unwrap();
        assert_eq!(p.attribute("title").as_deref(), Some("a & b"));
        assert_eq!(p.text_content(), "1 < 2");
    }

    #[test]
    fn test_each_entity_is_decoded_on_its_own() {
        let fragment = parse_fragment("<p>a &amp; b&nbsp;c &copy; &foo; &#x41;&#66; & d</p>");
        let p = fragment.first_child().unwrap();
        assert_eq!(p.text_content(), "a & b\u{a0}c \u{a9} &foo; AB & d");
    }

    #[test]
    fn test_html_entities_in_attribute_values() {
        let fragment = parse_fragment(r#"<p title="&copy; &amp; &bogus;"></p>"#);
        let p = fragment.first_child().unwrap();
        assert_eq!(p.attribute("title").as_deref(), Some("\u{a9} & &bogus;"));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("no refs"), "no refs");
        assert_eq!(decode_entities("&lt;&gt;"), "<>");
        assert_eq!(decode_entities("tail &amp"), "tail &amp");
        assert_eq!(decode_entities("&&amp;"), "&&");
    }

    #[test]
    fn test_comments_are_kept() {
        let fragment = parse_fragment("<p><!--note--></p>");
        let comment = fragment.first_child().unwrap().first_child().unwrap();
        assert!(comment.is_comment());
        assert_eq!(comment.data().as_deref(), Some("note"));
    }

    #[test]
    fn test_self_closing_custom_element_is_childless() {
        let fragment = parse_fragment(r#"<my-widget foo="1"/><p>after</p>"#);
        assert_eq!(fragment.child_count(), 2);
        assert_eq!(fragment.first_child().unwrap().child_count(), 0);
    }

    #[test]
    fn test_unclosed_elements_are_closed_at_eof() {
        let fragment = parse_fragment("<div><span>open");
        assert_eq!(inner_html(&fragment), "<div><span>open</span></div>");
    }

    #[test]
    fn test_stray_end_tag_is_ignored() {
        let fragment = parse_fragment("<p>a</span>b</p>");
        assert_eq!(inner_html(&fragment), "<p>ab</p>");
    }

    #[test]
    fn test_end_tag_closes_nearest_matching_element() {
        let fragment = parse_fragment("<div><b>bold</div>after");
        assert_eq!(inner_html(&fragment), "<div><b>bold</b></div>after");
    }

    #[test]
    fn test_empty_input() {
        let fragment = parse_fragment("");
        assert!(fragment.is_fragment());
        assert_eq!(fragment.child_count(), 0);
    }
}
