//! End to end rendering
//!
//! Parsed documents go through the TOC pass and the element pass, and the result is checked as
//! HTML snapshots and as element trees.

use orgview::config::RenderSettings;
use orgview::render::{attributes, to_html, ElementFactory, OutputElement, OutputNode};
use orgview::{
    render, render_document, render_with_toc, Document, DocumentNode, FormatRegistry,
    RenderConfig, TocEntry,
};

const OUTLINE: &str = include_str!("fixtures/outline.json");

/// Default settings with a short badge class instead of the inline style.
fn plain_badges() -> RenderConfig {
    let mut settings = RenderSettings::default();
    settings.tag_badge.attributes = attributes([("class", "tag")]);
    RenderConfig::with_settings(settings)
}

fn scenario() -> Document {
    Document::new(vec![
        DocumentNode::header_text(1, "A"),
        DocumentNode::header_text(2, "B"),
        DocumentNode::header_text(3, "C"),
        DocumentNode::header_text(2, "D :x:"),
        DocumentNode::header_text(1, "E"),
    ])
}

#[test]
fn test_scenario_html() {
    let elements = render(&scenario(), &plain_badges()).unwrap();
    insta::assert_snapshot!(to_html(&elements), @r###"
    <h1 id="section-1">A</h1>
    <h2 id="section-1.1">B</h2>
    <h3 id="section-1.1.1">C</h3>
    <h2 id="section-1.2">D<span class="tag">x</span></h2>
    <h1 id="section-2">E</h1>
    "###);
}

#[test]
fn test_scenario_toc_callback() {
    let mut forest: Vec<TocEntry> = Vec::new();
    render_with_toc(&scenario(), &RenderConfig::default(), |entries| {
        forest = entries.to_vec();
    })
    .unwrap();

    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].index, "1");
    assert_eq!(forest[0].children[1].title, "D");
    assert_eq!(forest[0].children[1].tags, vec!["x"]);
    assert_eq!(forest[1].index, "2");

    let json = serde_json::to_value(&forest).unwrap();
    assert_eq!(json[0]["children"][0]["children"][0]["index"], "1.1.1");
}

#[test]
fn test_fixture_html() {
    let document = Document::from_json(OUTLINE).unwrap();
    let elements = render(&document, &plain_badges()).unwrap();
    insta::assert_snapshot!(to_html(&elements), @r###"
    <h1 id="section-1">Getting started<span class="tag">intro</span></h1>
    <p>Read the <a href="https://orgmode.org" target="_blank">manual</a> &amp; <strong>enjoy</strong></p>
    <h2 id="section-1.1">Code</h2>
    <div><pre class="rust"><code class="language-rust">fn main() {}</code></pre></div>
    <ul><li>one</li><li>two</li></ul>
    <hr />
    <h1 id="section-2">Glossary</h1>
    <dl><dt>TOC</dt><dd>table of contents</dd></dl>
    "###);
}

#[test]
fn test_fixture_toc_format() {
    let document = Document::from_json(OUTLINE).unwrap();
    let rendered = render_document(&document, &RenderConfig::default()).unwrap();
    let toc = FormatRegistry::default().serialize(&rendered, "toc").unwrap();

    let value: serde_json::Value = serde_json::from_str(&toc).unwrap();
    assert_eq!(value[0]["title"], "Getting started");
    assert_eq!(value[0]["tags"], serde_json::json!(["intro"]));
    assert_eq!(value[0]["children"][0]["index"], "1.1");
    assert_eq!(value[1]["title"], "Glossary");
    assert_eq!(value[1]["index"], "2");
}

#[test]
fn test_unknown_type_renders_nothing() {
    let document = Document::from_json(r#"[{"type": "frobnicate"}]"#).unwrap();
    let elements = render(&document, &RenderConfig::default()).unwrap();
    assert!(elements.is_empty());
}

#[test]
fn test_inline_container_collapse() {
    let config = RenderConfig::default();
    let single = render(
        &Document::new(vec![DocumentNode::inline(vec![DocumentNode::text("solo")])]),
        &config,
    )
    .unwrap();
    assert_eq!(single, vec![OutputNode::from("solo")]);

    let pair = render(
        &Document::new(vec![DocumentNode::inline(vec![
            DocumentNode::text("a"),
            DocumentNode::text("b"),
        ])]),
        &config,
    )
    .unwrap();
    insta::assert_snapshot!(to_html(&pair), @"<span>ab</span>");
}

#[test]
fn test_custom_strategies() {
    let config = RenderConfig::builder()
        .link_renderer(|target: &str, content: ElementFactory| {
            content.build("router-link", attributes([("to", target)]))
        })
        .source_block_renderer(|language: Option<&str>, content: &str| {
            OutputElement::new("highlight")
                .with_attribute("lang", language.unwrap_or("text"))
                .with_child(content)
        })
        .source_block_wrapper_attribute("class", "code")
        .build();

    let document = Document::new(vec![
        DocumentNode::paragraph(vec![DocumentNode::link(
            "/home",
            vec![DocumentNode::text("home")],
        )]),
        DocumentNode::source_block("sh", "ls"),
    ]);
    let elements = render(&document, &config).unwrap();
    insta::assert_snapshot!(to_html(&elements), @r###"
    <p><router-link to="/home">home</router-link></p>
    <div class="code"><highlight lang="sh">ls</highlight></div>
    "###);
}

#[test]
fn test_html_format_with_document_wrapper() {
    let mut settings = RenderSettings::default();
    settings.tag_badge.attributes = attributes([("class", "tag")]);
    settings.document.attributes = attributes([("class", "markdown-body")]);
    let config = RenderConfig::with_settings(settings);

    let document = Document::new(vec![DocumentNode::header_text(1, "Title")]);
    let rendered = render_document(&document, &config).unwrap();
    let html = FormatRegistry::default().serialize(&rendered, "html").unwrap();
    insta::assert_snapshot!(html, @r###"
    <div class="markdown-body">
    <h1 id="section-1">Title</h1>
    </div>
    "###);
}

#[test]
fn test_missing_block_content_aborts() {
    let document = Document::from_json(
        r#"[{"type": "directive", "directiveName": "src", "directiveRawValue": "c"}]"#,
    )
    .unwrap();
    assert!(render(&document, &RenderConfig::default()).is_err());
}
