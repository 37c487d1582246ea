/*
 * serialize.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Markup serialization of node trees.

use crate::node::{NodeRef, NodeType, is_void_element};

/// Serialize a node including its own tags.
pub fn outer_html(node: &NodeRef) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize the children of a node.
pub fn inner_html(node: &NodeRef) -> String {
    let mut out = String::new();
    for child in node.children() {
        write_node(&child, &mut out);
    }
    out
}

fn write_node(node: &NodeRef, out: &mut String) {
    match node.node_type() {
        NodeType::Element => {
            let name = node.tag_name().unwrap_or_default();
            out.push('<');
            out.push_str(&name);
            for attribute in node.attributes() {
                out.push(' ');
                out.push_str(&attribute.name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(&attribute.value));
                out.push('"');
            }
            out.push('>');
            if is_void_element(&name) {
                return;
            }
            for child in node.children() {
                write_node(&child, out);
            }
            out.push_str("</");
            out.push_str(&name);
            out.push('>');
        }
        NodeType::Text => out.push_str(&escape_text(&node.data().unwrap_or_default())),
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(&node.data().unwrap_or_default());
            out.push_str("-->");
        }
        NodeType::Fragment => {
            for child in node.children() {
                write_node(&child, out);
            }
        }
    }
}

/// Escape text for use as element content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for use inside a quoted attribute value (either quote style).
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_fragment;
    use insta::assert_snapshot;

    #[test]
    fn test_serialize_element_tree() {
        let div = NodeRef::element("div");
        div.set_attribute("class", "card");
        let p = NodeRef::element("p");
        p.append_child(&NodeRef::text("a < b")).unwrap();
        div.append_child(&p).unwrap();
        div.append_child(&NodeRef::element("br")).unwrap();
        div.append_child(&NodeRef::comment("c")).unwrap();

        assert_snapshot!(outer_html(&div), @r#"<div class="card"><p>a &lt; b</p><br><!--c--></div>"#);
        assert_snapshot!(inner_html(&div), @"<p>a &lt; b</p><br><!--c-->");
    }

    #[test]
    fn test_attribute_escaping() {
        let a = NodeRef::element("a");
        a.set_attribute("title", r#"say "hi" & 'bye'"#);
        assert_eq!(
            outer_html(&a),
            r#"<a title="say &quot;hi&quot; &amp; &apos;bye&apos;"></a>"#
        );
    }

    #[test]
    fn test_parse_serialize_is_stable() {
        let markup = r#"<ul id="list"><li>1</li><li>2</li></ul><input type="text">"#;
        let fragment = parse_fragment(markup);
        assert_eq!(inner_html(&fragment), markup);
    }
}
