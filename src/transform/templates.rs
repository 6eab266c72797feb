//! `{{Name|params}}` expansion.
//!
//! Invocations are parsed into a [`TemplateInvocation`] and dispatched by
//! lower-cased name to one of a few canned renderings. Anything unknown
//! falls back to a generic listing of its parameters.

use super::RenderOptions;
use super::citations;
use super::util::attr;

/// Upper bound on innermost-first expansion rounds.
const MAX_EXPANSION_ROUNDS: usize = 16;

/// A parsed `{{Name|...}}` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateInvocation {
    pub name: String,
    /// Params without `=`, addressed as `"1"`, `"2"`, ...
    pub positional: Vec<String>,
    /// `key=value` params in encounter order.
    pub named: Vec<(String, String)>,
}

impl TemplateInvocation {
    /// Parse the text between `{{` and `}}`.
    pub fn parse(body: &str) -> Self {
        let mut parts = split_top_level_pipes(body).into_iter();
        let name = parts.next().unwrap_or_default().trim().to_string();
        let mut inv = TemplateInvocation {
            name,
            ..TemplateInvocation::default()
        };
        for part in parts {
            match split_named(part) {
                Some((key, value)) => inv.named.push((key.to_string(), value.to_string())),
                None => inv.positional.push(part.trim().to_string()),
            }
        }
        inv
    }

    /// Look a parameter up by key; numeric keys also address positional params.
    /// A repeated named key resolves to its last occurrence.
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some((_, v)) = self.named.iter().rev().find(|(k, _)| k == key) {
            return Some(v.as_str());
        }
        key.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.positional.get(i))
            .map(String::as_str)
    }

    /// First non-empty value among `keys`.
    pub fn param(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.is_empty())
    }

    /// Lower-cased name with underscores read as spaces and runs of
    /// whitespace collapsed.
    pub fn normalized_name(&self) -> String {
        self.name
            .replace('_', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

/// Split on `|` outside of `[[...]]`.
fn split_top_level_pipes(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'[' if bytes.get(i + 1) == Some(&b'[') => {
                depth += 1;
                i += 2;
                continue;
            }
            b']' if bytes.get(i + 1) == Some(&b']') && depth > 0 => {
                depth -= 1;
                i += 2;
                continue;
            }
            b'|' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&body[start..]);
    parts
}

/// `key=value` when the left side looks like a parameter name. Earlier passes
/// leave HTML such as `<a href="...">` in values, whose `=` must not count.
fn split_named(part: &str) -> Option<(&str, &str)> {
    let (key, value) = part.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(['<', '>', '"']) {
        return None;
    }
    Some((key, value.trim()))
}

/// Byte ranges of every `{{...}}` pair that contains no other pair.
///
/// `}}` closes the most recent open `{{`; lone braces are plain text.
fn innermost_spans(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    // (start of `{{`, whether a nested pair closed inside it)
    let mut open: Vec<(usize, bool)> = Vec::new();
    let mut spans = Vec::new();
    let mut i = 0usize;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'{', b'{') => {
                open.push((i, false));
                i += 2;
            }
            (b'}', b'}') if !open.is_empty() => {
                if let Some((start, has_child)) = open.pop()
                    && !has_child
                {
                    spans.push((start, i + 2));
                }
                if let Some(parent) = open.last_mut() {
                    parent.1 = true;
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    spans
}

fn expand_innermost(text: &str, opts: &RenderOptions) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0usize;
    for (start, end) in innermost_spans(text) {
        out.push_str(&text[last..start]);
        let inv = TemplateInvocation::parse(&text[start + 2..end - 2]);
        if inv.name.is_empty() {
            out.push_str(&text[start..end]);
        } else {
            out.push_str(&render_template(&inv, opts));
        }
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// Expand templates, innermost first.
pub fn expand_templates(input: &str, opts: &RenderOptions) -> String {
    let mut text = input.to_string();
    for _ in 0..MAX_EXPANSION_ROUNDS {
        let next = expand_innermost(&text, opts);
        if next == text {
            break;
        }
        text = next;
    }
    text
}

/// Dispatch one invocation to its renderer.
pub fn render_template(inv: &TemplateInvocation, opts: &RenderOptions) -> String {
    let name = inv.normalized_name();
    match name.as_str() {
        "short description" | "shortdescription" => String::new(),
        "quote" => render_quote(inv),
        n if n == "infobox" || n.starts_with("infobox ") => render_infobox(inv, opts),
        n if n == "cite" || n == "citation" || n.starts_with("cite ") => {
            citations::render_citation(n, inv)
        }
        _ => render_generic(inv),
    }
}

fn render_infobox(inv: &TemplateInvocation, opts: &RenderOptions) -> String {
    let mut out = String::from("<table class=\"wiki-infobox\">\n");
    let title = inv.param(&["title", "name"]);

    if let Some(title) = title {
        out.push_str(&format!(
            "<tr><th colspan=\"2\" class=\"infobox-title\">{title}</th></tr>\n"
        ));
    }

    if let Some(image) = inv.param(&["image"]) {
        out.push_str("<tr><td colspan=\"2\" class=\"infobox-image\">");
        if image.starts_with('<') {
            // already rendered by the image pass.
            out.push_str(image);
        } else {
            let file = strip_file_prefix(image);
            out.push_str(&format!(
                r#"<img src="{}" alt="{}">"#,
                attr(&format!("{}{}", opts.media_base, file)),
                attr(title.unwrap_or(file))
            ));
        }
        if let Some(caption) = inv.param(&["caption"]) {
            out.push_str(&format!("<div class=\"infobox-caption\">{caption}</div>"));
        }
        out.push_str("</td></tr>\n");
    }

    let mut n = 1;
    while let Some(label) = inv.get(&format!("label{n}")) {
        let data = inv.get(&format!("data{n}")).unwrap_or_default();
        out.push_str(&format!(
            "<tr><th scope=\"row\">{label}</th><td>{data}</td></tr>\n"
        ));
        n += 1;
    }

    out.push_str("</table>");
    out
}

fn strip_file_prefix(image: &str) -> &str {
    let lower = image.to_ascii_lowercase();
    for prefix in ["file:", "image:"] {
        if lower.starts_with(prefix) {
            return image[prefix.len()..].trim();
        }
    }
    image
}

fn render_quote(inv: &TemplateInvocation) -> String {
    let text = inv.param(&["text", "quote", "1"]).unwrap_or_default();
    let author = inv.param(&["author", "2"]);
    let source = inv.param(&["source", "3"]);
    let year = inv.param(&["year"]);

    let mut attribution = match (author, source) {
        (Some(a), Some(s)) => format!("{a}, {s}"),
        (Some(a), None) => a.to_string(),
        (None, Some(s)) => s.to_string(),
        (None, None) => String::new(),
    };
    if let Some(y) = year {
        if !attribution.is_empty() {
            attribution.push(' ');
        }
        attribution.push_str(&format!("({y})"));
    }

    let mut out = format!("<blockquote class=\"wiki-quote\"><p>{text}</p>");
    if !attribution.is_empty() {
        out.push_str(&format!("<footer>{attribution}</footer>"));
    }
    out.push_str("</blockquote>");
    out
}

fn render_generic(inv: &TemplateInvocation) -> String {
    let mut out = format!(
        "<div class=\"wiki-template\"><span class=\"wiki-template-name\">{}</span>",
        html_escape::encode_text(&inv.name)
    );
    let mut pairs: Vec<(String, &str)> = inv
        .positional
        .iter()
        .enumerate()
        .map(|(i, v)| ((i + 1).to_string(), v.as_str()))
        .collect();
    pairs.extend(inv.named.iter().map(|(k, v)| (k.clone(), v.as_str())));

    if !pairs.is_empty() {
        out.push_str("<ul class=\"wiki-template-params\">");
        for (k, v) in pairs {
            out.push_str(&format!("<li>{}: {v}</li>", html_escape::encode_text(&k)));
        }
        out.push_str("</ul>");
    }
    out.push_str("</div>");
    out
}
