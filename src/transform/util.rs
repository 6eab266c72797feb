/// A parsed `name="value"` pair from an opening tag or table line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlAttr {
    pub name: String,
    pub value: Option<String>,
}

/// Parse a sequence of HTML-like attributes (small subset).
///
/// Example: `class="wikitable sortable" style="width:100%"`.
pub fn parse_html_attrs(mut s: &str) -> Vec<HtmlAttr> {
    let mut attrs = Vec::new();
    while !s.is_empty() {
        s = s.trim_start();
        if s.is_empty() {
            break;
        }

        // parse name.
        let name_end = s
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace() || *ch == '=')
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        if name_end == 0 {
            // stray '=' with no name; skip it.
            s = &s[1..];
            continue;
        }
        let name = &s[..name_end];
        s = s[name_end..].trim_start();

        // optional value.
        let mut value: Option<String> = None;
        if let Some(rest) = s.strip_prefix('=') {
            s = rest.trim_start();
            match s.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    s = &s[q.len_utf8()..];
                    if let Some(end_q) = s.find(q) {
                        value = Some(s[..end_q].to_string());
                        s = &s[end_q + q.len_utf8()..];
                    } else {
                        // unterminated quote; take rest.
                        value = Some(s.to_string());
                        s = "";
                    }
                }
                Some(_) => {
                    let end = s.find(char::is_whitespace).unwrap_or(s.len());
                    value = Some(s[..end].to_string());
                    s = &s[end..];
                }
                None => {}
            }
        }

        attrs.push(HtmlAttr {
            name: name.to_string(),
            value,
        });
    }
    attrs
}

/// Render attributes back into ` name="value"` form with escaped values.
pub fn render_attrs(attrs: &[HtmlAttr]) -> String {
    let mut out = String::new();
    for a in attrs {
        out.push(' ');
        out.push_str(&a.name);
        if let Some(v) = &a.value {
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(v));
            out.push('"');
        }
    }
    out
}

pub fn find_attr<'a>(attrs: &'a [HtmlAttr], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(name))
        .and_then(|a| a.value.as_deref())
}

/// Escape a value for use inside a double-quoted attribute.
pub fn attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

/// Split on the first unquoted `needle`.
pub fn split_once_unquoted(s: &str, needle: char) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    for (i, ch) in s.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == needle && !in_quotes => {
                return Some((&s[..i], &s[i + needle.len_utf8()..]));
            }
            _ => {}
        }
    }
    None
}

/// Split `segment` into `(attrs, content)` for the `attrs | content` cell form.
///
/// The left side only counts as attributes when it contains `=`, so content
/// that merely contains a pipe is left alone.
pub fn split_attrs_and_content(segment: &str) -> (&str, &str) {
    if let Some((left, right)) = split_once_unquoted(segment, '|')
        && left.contains('=')
    {
        return (left.trim(), right.trim());
    }
    ("", segment.trim())
}
