use lazy_regex::regex;

/// Wrap blank-line separated chunks in `<p>`, leaving block-level HTML alone.
pub fn wrap_paragraphs(input: &str) -> String {
    regex!(r"\n[ \t]*\n(?:[ \t]*\n)*")
        .split(input)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            if is_block(chunk) {
                chunk.to_string()
            } else {
                format!("<p>{chunk}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn is_block(chunk: &str) -> bool {
    regex!(r"(?i)^<(?:h[1-6]|div|table|ul|ol|blockquote|figure|pre)[\s>]").is_match(chunk)
}
