use lazy_regex::{Captures, regex};

/// MediaWiki bold/italic:
/// - ''italic''
/// - '''bold'''
/// - '''''bold+italic'''''
///
/// The longer quote runs go first, otherwise `'''` is split into `''` + `'`.
/// None of the patterns cross a line break.
pub fn convert_inline_formatting(input: &str) -> String {
    let mut text = regex!(r"'''''(.+?)'''''")
        .replace_all(input, "<strong><em>$1</em></strong>")
        .into_owned();
    text = regex!(r"'''(.+?)'''")
        .replace_all(&text, "<strong>$1</strong>")
        .into_owned();
    text = regex!(r"''(.+?)''")
        .replace_all(&text, "<em>$1</em>")
        .into_owned();
    normalize_simple_tags(&text)
}

/// `<U>`, `< sup >`, `</ S>` and friends -> canonical lower-case tags.
fn normalize_simple_tags(input: &str) -> String {
    regex!(r"(?i)<\s*(/?)\s*(u|s|sup|sub)\s*>")
        .replace_all(input, |caps: &Captures| {
            format!("<{}{}>", &caps[1], caps[2].to_ascii_lowercase())
        })
        .into_owned()
}
