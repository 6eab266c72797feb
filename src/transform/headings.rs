//! `=`-delimited headings and the table-of-contents helper built on them.

use lazy_regex::{Captures, regex};
use serde::{Deserialize, Serialize};

use super::util::attr;

/// A heading found in raw markup, as used by the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Heading level (1..=6).
    pub level: u8,
    pub text: String,
    /// Anchor slug, unique within one document.
    pub id: String,
}

/// Returns `(level, inner)` when the whole trimmed line is wrapped in the
/// same number (1..=6) of `=` on both sides.
fn parse_heading_line(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim();
    let open = trimmed.bytes().take_while(|b| *b == b'=').count();
    if open == 0 || open > 6 {
        return None;
    }
    let close = trimmed.bytes().rev().take_while(|b| *b == b'=').count();
    if close != open || trimmed.len() <= open * 2 {
        return None;
    }
    let inner = trimmed[open..trimmed.len() - close].trim();
    if inner.is_empty() || inner.starts_with('=') || inner.ends_with('=') {
        return None;
    }
    Some((open as u8, inner))
}

/// Convert heading lines to `<h1>`..`<h6>`.
///
/// Counting the full marker run on both sides means a `======` line is
/// never read as a level-1 heading wrapping stray `=`.
pub fn convert_headings(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for chunk in input.split_inclusive('\n') {
        let (line, ending) = match chunk.strip_suffix('\n') {
            Some(line) => (line, "\n"),
            None => (chunk, ""),
        };
        match parse_heading_line(line) {
            Some((level, inner)) => {
                out.push_str(&format!("<h{level}>{inner}</h{level}>"));
                out.push_str(ending);
            }
            None => out.push_str(chunk),
        }
    }
    out
}

/// Scan raw markup for heading lines.
pub fn extract_headings(markup: &str) -> Vec<HeadingRecord> {
    let mut used: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for line in markup.lines() {
        let Some((level, inner)) = parse_heading_line(line) else {
            continue;
        };
        let text = plain_text(inner);
        let id = unique_slug(&slugify(&text), &mut used);
        out.push(HeadingRecord { level, text, id });
    }
    out
}

/// Lower-case ASCII slug with non-word runs collapsed to `-`.
///
/// Non-ASCII letters are transliterated first so `Gödel` becomes `godel`.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text).to_ascii_lowercase();
    let slug = regex!(r"[^a-z0-9_]+").replace_all(&ascii, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

fn unique_slug(base: &str, used: &mut Vec<String>) -> String {
    let mut candidate = base.to_string();
    let mut n = 2;
    while used.iter().any(|u| u == &candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    used.push(candidate.clone());
    candidate
}

/// Strip quote markup, link brackets and tags from heading text.
fn plain_text(inner: &str) -> String {
    let text = regex!(r"\[\[[^\[\]|]*\|([^\[\]]*)\]\]").replace_all(inner, "$1");
    let text = regex!(r"\[\[([^\[\]]*)\]\]").replace_all(&text, "$1");
    let text = regex!(r"'{2,}").replace_all(&text, "");
    let text = regex!(r"<[^>]*>").replace_all(&text, "");
    text.trim().to_string()
}

/// Render a nested-by-class list of heading anchors.
pub fn render_toc(headings: &[HeadingRecord]) -> String {
    if headings.is_empty() {
        return String::new();
    }
    let mut out = String::from("<nav class=\"wiki-toc\"><h2>Contents</h2><ul>\n");
    for h in headings {
        out.push_str(&format!(
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
            h.level,
            attr(&h.id),
            html_escape::encode_text(&h.text)
        ));
    }
    out.push_str("</ul></nav>");
    out
}

/// Give rendered headings the ids of matching `headings` records.
///
/// Only `<hN>` lines at the start of a line are considered, which is where
/// the heading pass puts them. Each takes the first unused record with the
/// same level and plain text, so a heading that ended up inside a reference
/// or template does not shift the ones after it. Returns the html and the
/// anchored records in document order.
pub fn anchor_headings(html: &str, headings: &[HeadingRecord]) -> (String, Vec<HeadingRecord>) {
    let mut used = vec![false; headings.len()];
    let mut anchored = Vec::new();
    let html = regex!(r"(?m)^<h([1-6])>(.*?)</h([1-6])>")
        .replace_all(html, |caps: &Captures| {
            let level: u8 = caps[1].parse().unwrap_or_default();
            let text = html_escape::decode_html_entities(&plain_text(&caps[2])).into_owned();
            let found = headings
                .iter()
                .enumerate()
                .find(|(i, h)| !used[*i] && h.level == level && h.text == text);
            match found {
                Some((i, h)) => {
                    used[i] = true;
                    anchored.push(h.clone());
                    format!(
                        "<h{level} id=\"{}\">{}</h{}>",
                        attr(&h.id),
                        &caps[2],
                        &caps[3]
                    )
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned();
    (html, anchored)
}
