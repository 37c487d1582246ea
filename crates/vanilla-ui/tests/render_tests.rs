/*
 * render_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * End-to-end tests: build a template, render it, inspect the mounted tree.
 */

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use vanilla_dom::{NodeRef, inner_html, select, select_all};
use vanilla_ui::diagnostics::{ATTRIBUTE_MARKER_NOT_FOUND, VALUE_IN_ATTRIBUTE_VALUE};
use vanilla_ui::{
    Directive, DirectiveContext, RenderConfig, RenderContext, TemplateResult, Value, html, render,
    render_with,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn paragraph(value: Value) -> TemplateResult {
    html(&["<p>", "</p>"], vec![value])
}

#[test]
fn test_primitive_text_matches_string_form() {
    init_tracing();
    let cases = vec![
        (Value::from("plain"), "plain"),
        (Value::from("a < b && c > \"d\" 'e'"), "a < b && c > \"d\" 'e'"),
        (Value::from("  padded  "), "  padded  "),
        (Value::from(" "), " "),
        (Value::from("<!-- not a comment -->"), "<!-- not a comment -->"),
        (Value::Int(-12), "-12"),
        (Value::Float(2.5), "2.5"),
        (Value::Float(4.0), "4"),
        (Value::Float(1e21), "1e+21"),
        (Value::Float(1e-7), "1e-7"),
        (Value::Bool(false), "false"),
        (Value::Null, ""),
    ];
    for (value, expected) in cases {
        let result = render(paragraph(value), None);
        let node = result.single().expect("one paragraph");
        assert_eq!(node.tag_name().as_deref(), Some("p"));
        assert_eq!(node.text_content(), expected);
    }
}

#[test]
fn test_null_and_empty_render_the_same() {
    let null = render(Value::Null, None);
    let empty = render("", None);
    assert!(null.is_empty());
    assert!(empty.is_empty());
    assert_eq!(null.text_content(), empty.text_content());
}

#[test]
fn test_nesting_matches_inlined_markup() {
    let inner = |x: Value| html(&["<span class=\"inner\">", "</span>"], vec![x]);
    let values = vec![
        Value::from("text"),
        Value::Int(3),
        Value::from(vec![Value::from("a"), Value::from("b")]),
        Value::from(NodeRef::element("hr")),
    ];

    for x in values {
        let nested = render(html!(["<div>", "</div>"], inner(x.clone())), None);
        let inlined = render(
            html(&["<div><span class=\"inner\">", "</span></div>"], vec![x]),
            None,
        );
        assert_eq!(nested.to_html(), inlined.to_html());
    }
}

#[test]
fn test_custom_self_closing_element_has_no_children() {
    let container = NodeRef::element("div");
    render(
        html!(["<my-widget foo=\"1\"/><input/><p>after</p>"]),
        Some(&container),
    );

    let widget = select(&container, "my-widget").unwrap();
    assert_eq!(widget.attribute("foo").as_deref(), Some("1"));
    assert_eq!(widget.child_count(), 0);
    assert_eq!(container.child_count(), 3);
    assert_snapshot!(inner_html(&container), @r#"<my-widget foo="1"></my-widget><input><p>after</p>"#);
}

#[test]
fn test_list_of_templates_keeps_order() {
    let items: Vec<TemplateResult> = (1..=3_i32).map(|i| html!(["<li>", "</li>"], i)).collect();
    let result = render(html!(["<ul>", "</ul>"], items), None);

    let ul = result.single().unwrap();
    let texts: Vec<String> = ul.children().iter().map(NodeRef::text_content).collect();
    assert_eq!(texts, vec!["1", "2", "3"]);
}

#[test]
fn test_rerender_is_idempotent() {
    let container = NodeRef::element("div");
    let build = || {
        let items: Vec<TemplateResult> = ["x", "y"]
            .iter()
            .map(|s| html!(["<b>", "</b>"], *s))
            .collect();
        html!(["<section><h2>", "</h2>", "</section>"], "Title", items)
    };

    let first = render(build(), Some(&container));
    let first_html = inner_html(&container);
    let second = render(build(), Some(&container));

    assert_eq!(inner_html(&container), first_html);
    assert!(!first.single().unwrap().ptr_eq(second.single().unwrap()));
    assert!(first.single().unwrap().parent().is_none());
}

#[test]
fn test_attribute_directive_runs_once_after_mount() {
    let container = NodeRef::element("div");
    let calls = Rc::new(Cell::new(0));
    let was_connected = Rc::new(Cell::new(false));

    let directive = {
        let calls = calls.clone();
        let was_connected = was_connected.clone();
        let container = container.clone();
        Directive::new(move |ctx| {
            if let DirectiveContext::Attribute { element, node } = ctx {
                calls.set(calls.get() + 1);
                was_connected.set(container.contains(element) && element.ptr_eq(node));
            }
            Value::Null
        })
    };

    render(html!(["<button ", ">Go</button>"], directive), Some(&container));

    assert_eq!(calls.get(), 1);
    assert!(was_connected.get());
    let button = container.first_child().unwrap();
    assert!(button.attributes().is_empty());
}

#[test]
fn test_attribute_directives_in_nested_templates() {
    let tags = Rc::new(RefCell::new(Vec::new()));
    let record = |tags: &Rc<RefCell<Vec<String>>>| {
        let tags = tags.clone();
        Directive::on_attach(move |el| tags.borrow_mut().push(el.tag_name().unwrap_or_default()))
    };

    let inner = html!(["<input ", ">"], record(&tags));
    let outer = html!(["<form ", ">", "</form>"], record(&tags), inner);
    let container = NodeRef::element("div");
    let mut ctx = RenderContext::new();
    render_with(outer, Some(&container), &mut ctx);

    assert_eq!(*tags.borrow(), vec!["form".to_string(), "input".to_string()]);
    assert!(ctx.diagnostics.is_empty());
    assert_snapshot!(inner_html(&container), @"<form><input></form>");
}

#[test]
fn test_single_and_multiple_roots() {
    let container = NodeRef::element("div");
    let single = render(html!(["<article>", "</article>"], "x"), Some(&container));
    assert!(
        single
            .single()
            .unwrap()
            .ptr_eq(&container.first_child().unwrap())
    );

    let many = render(html!(["<h1>a</h1>\n<h2>b</h2>\n<h3>c</h3>"]), Some(&container));
    let tags: Vec<String> = many
        .nodes()
        .iter()
        .filter_map(NodeRef::tag_name)
        .collect();
    assert_eq!(tags, vec!["h1", "h2", "h3"]);
}

#[test]
fn test_listeners_survive_detached_render() {
    let seen = Rc::new(RefCell::new(None));
    let store = seen.clone();
    let directive = Directive::on_attach(move |el| *store.borrow_mut() = Some(el.clone()));

    let result = render(html!(["<dialog ", "></dialog>"], directive), None);
    let dialog = result.single().unwrap();
    assert!(seen.borrow().as_ref().unwrap().ptr_eq(dialog));
}

#[test]
fn test_content_directive_sees_context() {
    let container = NodeRef::element("main");
    let observed = Rc::new(RefCell::new(None));
    let out = observed.clone();
    let root = container.clone();
    let directive = Directive::new(move |ctx| {
        if let DirectiveContext::Content {
            marker,
            parent,
            root_container,
            fragment,
            ..
        } = ctx
        {
            *out.borrow_mut() = Some((
                marker.is_comment(),
                parent.tag_name(),
                root_container.ptr_eq(&root),
                fragment.is_fragment(),
            ));
        }
        Value::from(vec!["a", "b"])
    });

    render(html!(["<nav>", "</nav>"], directive), Some(&container));

    assert_snapshot!(inner_html(&container), @"<nav>ab</nav>");
    assert_eq!(
        observed.take(),
        Some((true, Some("nav".to_string()), true, true))
    );
}

#[test]
fn test_tag_like_text_inside_attribute_value() {
    let directive = Directive::on_attach(|el| el.set_attribute("data-ready", "yes"));
    let template = html!(
        ["<a title=\"1 > 0 <b\" ", ">", "</a>"],
        directive,
        html!(["<i>icon</i>"])
    );
    let result = render(template, None);
    let link = result.single().unwrap();

    assert_eq!(link.attribute("title").as_deref(), Some("1 > 0 <b"));
    assert_eq!(link.attribute("data-ready").as_deref(), Some("yes"));
    assert_eq!(inner_html(link), "<i>icon</i>");
}

#[test]
fn test_structured_value_in_attribute_value_is_reported() {
    let mut ctx = RenderContext::with_config(RenderConfig {
        log_diagnostics: false,
        ..RenderConfig::default()
    });
    let result = render_with(
        html!(["<img alt=\"", "\">"], html!(["<b></b>"])),
        None,
        &mut ctx,
    );
    assert_snapshot!(result.to_html(), @r#"<img alt="">"#);
    assert!(ctx.diagnostics.has_code(VALUE_IN_ATTRIBUTE_VALUE));
}

#[test]
fn test_unbalanced_markup_does_not_fail() {
    let mut ctx = RenderContext::new();
    let template = html!(
        ["<div><span ", ">x</div></p>"],
        Directive::new(|_| Value::Null)
    );
    let result = render_with(template, None, &mut ctx);
    assert_eq!(result.text_content(), "x");
    assert!(!ctx.diagnostics.has_code(ATTRIBUTE_MARKER_NOT_FOUND));
}

#[test]
fn test_deep_nesting() {
    init_tracing();
    let depth = 200;
    let mut template = html!(["<b>leaf</b>"]);
    for _ in 0..depth {
        template = html!(["<div>", "</div>"], template);
    }
    let result = render(template, None);
    let root = result.single().unwrap();

    assert_eq!(select_all(root, "div").len(), depth - 1);
    assert_eq!(root.text_content(), "leaf");
}

#[test]
fn test_node_reused_in_two_positions_is_copied() {
    let badge = NodeRef::element("em");
    badge.append_child(&NodeRef::text("new")).unwrap();

    let result = render(html!(["<p>", "</p><p>", "</p>"], &badge, &badge), None);
    let copies: Vec<NodeRef> = result
        .nodes()
        .iter()
        .filter_map(NodeRef::first_child)
        .collect();

    assert_eq!(copies.len(), 2);
    assert!(!copies[0].ptr_eq(&copies[1]));
    assert!(!copies[0].ptr_eq(&badge));
    assert!(badge.parent().is_none());
}

#[test]
fn test_html_entities_in_literal_markup() {
    let result = render(html!(["<p>a &amp; b&nbsp;c &copy; &nope;</p>"]), None);
    assert_eq!(result.text_content(), "a & b\u{a0}c \u{a9} &nope;");
    assert_eq!(
        result.to_html(),
        "<p>a &amp; b\u{a0}c \u{a9} &amp;nope;</p>"
    );
}

#[test]
fn test_bare_lt_in_literal_text() {
    let result = render(html!(["<p>1 < 2</p><p>after</p>"]), None);
    assert_eq!(result.len(), 2);
    assert_eq!(result.nodes()[0].text_content(), "1 < 2");
    assert_snapshot!(result.to_html(), @"<p>1 &lt; 2</p><p>after</p>");
}
