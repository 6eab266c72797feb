use lazy_regex::{Captures, regex};

use super::RenderOptions;
use super::util::attr;

/// Converts internal `[[target|label]]` / `[[target]]` and external
/// `[url label]` / `[url]` links to anchors.
///
/// Piped forms are converted first so the bare form never sees a pipe.
/// `File:`/`Image:` targets are left for the image pass.
pub fn convert_links(input: &str, opts: &RenderOptions) -> String {
    let text = convert_internal_links(input, opts);
    convert_external_links(&text)
}

fn convert_internal_links(input: &str, opts: &RenderOptions) -> String {
    let text = regex!(r"\[\[([^\[\]|\n]+)\|([^\[\]\n]+)\]\]")
        .replace_all(input, |caps: &Captures| {
            let target = caps[1].trim();
            if is_file_target(target) {
                return caps[0].to_string();
            }
            internal_anchor(opts, target, caps[2].trim())
        })
        .into_owned();

    regex!(r"\[\[([^\[\]|\n]+)\]\]")
        .replace_all(&text, |caps: &Captures| {
            let target = caps[1].trim();
            if is_file_target(target) {
                return caps[0].to_string();
            }
            internal_anchor(opts, target, target)
        })
        .into_owned()
}

fn convert_external_links(input: &str) -> String {
    let text = regex!(r"\[(https?://[^\s\[\]]+)[ \t]+([^\]\n]+)\]")
        .replace_all(input, |caps: &Captures| {
            format!(r#"<a href="{}">{}</a>"#, attr(&caps[1]), caps[2].trim())
        })
        .into_owned();

    regex!(r"\[(https?://[^\s\[\]]+)\]")
        .replace_all(&text, |caps: &Captures| {
            format!(r#"<a href="{}">{}</a>"#, attr(&caps[1]), &caps[1])
        })
        .into_owned()
}

fn internal_anchor(opts: &RenderOptions, target: &str, label: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        attr(&format!("{}{}", opts.article_base, target)),
        label
    )
}

pub(crate) fn is_file_target(target: &str) -> bool {
    let lower = target.trim_start().to_ascii_lowercase();
    lower.starts_with("file:") || lower.starts_with("image:")
}
