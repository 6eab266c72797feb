//! Wiki markup to HTML preview transform.
//!
//! The transform is a fixed sequence of text-rewriting passes over one
//! `String`. Each pass sees the output of the previous one, so later passes
//! must tolerate the HTML produced earlier (links inside template params,
//! inline markup inside table cells, and so on).

use log::{debug, trace};
use serde::{Deserialize, Serialize};

pub mod citations;
pub mod headings;
pub mod images;
pub mod inline;
pub mod links;
pub mod lists;
pub mod paragraphs;
pub mod references;
pub mod short_description;
pub mod table;
pub mod templates;
pub mod util;

pub use headings::{HeadingRecord, anchor_headings, extract_headings, render_toc, slugify};
pub use references::Reference;
pub use short_description::extract_short_description;
pub use templates::TemplateInvocation;

/// URL prefixes used when rendering links and images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for internal `[[Page]]` links.
    pub article_base: String,
    /// Prefix for `[[File:...]]` image sources.
    pub media_base: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            article_base: "/articles/".to_string(),
            media_base: "/media/".to_string(),
        }
    }
}

/// Result of one transform call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub html: String,
    pub short_description: Option<String>,
}

/// Transform with the default `/articles/` and `/media/` prefixes.
pub fn transform(markup: &str) -> TransformOutput {
    transform_with_options(markup, &RenderOptions::default())
}

/// Run the full pass pipeline.
///
/// Never fails; malformed markup passes through partially converted.
pub fn transform_with_options(markup: &str, opts: &RenderOptions) -> TransformOutput {
    let normalized = markup.replace("\r\n", "\n");

    let (text, short_description) = extract_short_description(&normalized);
    debug!("short description: {:?}", short_description);

    let text = inline::convert_inline_formatting(&text);
    trace!("after inline pass: {} bytes", text.len());

    let text = headings::convert_headings(&text);
    trace!("after heading pass: {} bytes", text.len());

    let text = links::convert_links(&text, opts);
    trace!("after link pass: {} bytes", text.len());

    let text = lists::convert_lists(&text);
    trace!("after list pass: {} bytes", text.len());

    let text = table::convert_tables(&text);
    trace!("after table pass: {} bytes", text.len());

    let text = images::convert_images(&text, opts);
    trace!("after image pass: {} bytes", text.len());

    let (text, refs) = references::convert_references(&text);
    debug!("collected {} references", refs.len());

    let text = templates::expand_templates(&text, opts);
    trace!("after template pass: {} bytes", text.len());

    let html = paragraphs::wrap_paragraphs(&text);
    debug!("rendered {} bytes of html", html.len());

    TransformOutput {
        html,
        short_description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_serializes_with_camel_case_keys() {
        let out = TransformOutput {
            html: "<p>x</p>".to_string(),
            short_description: Some("Foo".to_string()),
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["html"], "<p>x</p>");
        assert_eq!(json["shortDescription"], "Foo");

        let none = TransformOutput {
            html: String::new(),
            short_description: None,
        };
        let json = serde_json::to_value(&none).unwrap();
        assert!(json["shortDescription"].is_null());
    }

    #[test]
    fn short_description_is_removed_from_html() {
        let out = transform("{{Short description|Foo}}\nBar");
        assert_eq!(out.short_description.as_deref(), Some("Foo"));
        assert!(!out.html.contains("Short description"), "{}", out.html);
        assert!(out.html.contains("Bar"), "{}", out.html);
    }

    #[test]
    fn full_document() {
        let src = "== Intro ==\n'''Deep Blue''' was a [[chess]] computer.<ref>IBM</ref>\n\n\
                   * one\n* two\n\n<references/>";
        let out = transform(src);
        assert_eq!(
            out.html,
            "<h2>Intro</h2>\n<strong>Deep Blue</strong> was a <a href=\"/articles/chess\">chess</a> computer.\
             <sup class=\"wiki-reference\">[<a href=\"#ref-1\">1</a>]</sup>\n\n\
             <ul>\n<li>one</li>\n<li>two</li>\n</ul>\n\n\
             <div class=\"wiki-references\"><h2>References</h2><ol>\n<li id=\"ref-1\">IBM</li>\n</ol></div>"
        );
        assert_eq!(out.short_description, None);
    }

    #[test]
    fn crlf_input_is_normalized() {
        assert_eq!(transform("a\r\n\r\nb").html, "<p>a</p>\n\n<p>b</p>");
    }

    #[test]
    fn custom_bases_flow_through() {
        let opts = RenderOptions {
            article_base: "/wiki/".to_string(),
            media_base: "https://cdn.example/".to_string(),
        };
        let html = transform_with_options("[[A]] [[File:b.png]]", &opts).html;
        assert!(html.contains("href=\"/wiki/A\""), "{html}");
        assert!(html.contains("src=\"https://cdn.example/b.png\""), "{html}");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let src = "X<ref>footnote</ref>Y<references/>";
        assert_eq!(transform(src), transform(src));
    }

    #[test]
    fn links_inside_template_params_survive() {
        let html = transform("{{quote|text=See [[Page|the page]]|author=Me}}").html;
        assert!(
            html.contains("<p>See <a href=\"/articles/Page\">the page</a></p><footer>Me</footer>"),
            "{html}"
        );
    }
}
