use lazy_regex::{Captures, regex};

use super::util::{find_attr, parse_html_attrs};

/// A footnote collected from a `<ref>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// 1-based, dense, in first-occurrence order.
    pub id: usize,
    pub name: Option<String>,
    pub content: String,
}

/// Replace `<ref>` tags with footnote markers and expand `<references/>`.
///
/// Every `<ref>` gets a fresh id, even when its `name` repeats. Only the
/// first `<references/>` receives the list; any later ones are removed.
/// Self-closing `<ref name="x"/>` markers are not touched.
pub fn convert_references(input: &str) -> (String, Vec<Reference>) {
    let mut refs: Vec<Reference> = Vec::new();

    // attributes may hold `/` (URLs, dates) but must not end with it.
    let text = regex!(r"(?is)<ref(\s[^>]*[^>/]|\s*)>(.*?)</ref\s*>")
        .replace_all(input, |caps: &Captures| {
            let id = refs.len() + 1;
            let attrs = parse_html_attrs(&caps[1]);
            refs.push(Reference {
                id,
                name: find_attr(&attrs, "name").map(str::to_string),
                content: caps[2].trim().to_string(),
            });
            format!(r##"<sup class="wiki-reference">[<a href="#ref-{id}">{id}</a>]</sup>"##)
        })
        .into_owned();

    let list = render_reference_list(&refs);
    let mut expanded = false;
    let text = regex!(r"(?i)<references\s*/>|<references\s*>\s*</references\s*>")
        .replace_all(&text, |_: &Captures| {
            if expanded {
                return String::new();
            }
            expanded = true;
            list.clone()
        })
        .into_owned();

    (text, refs)
}

fn render_reference_list(refs: &[Reference]) -> String {
    if refs.is_empty() {
        return String::new();
    }
    let mut out = String::from("<div class=\"wiki-references\"><h2>References</h2><ol>\n");
    for r in refs {
        out.push_str(&format!("<li id=\"ref-{}\">{}</li>\n", r.id, r.content));
    }
    out.push_str("</ol></div>");
    out
}
