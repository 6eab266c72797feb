use lazy_regex::regex;

/// Pull the first `{{Short description|...}}` out of `markup`.
///
/// Returns the remaining markup and the trimmed description. When no such
/// template exists the markup is returned unaltered.
pub fn extract_short_description(markup: &str) -> (String, Option<String>) {
    let re = regex!(r"(?is)\{\{\s*short\s?description\s*\|(.*?)\}\}");
    let Some(caps) = re.captures(markup) else {
        return (markup.to_string(), None);
    };
    let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
        return (markup.to_string(), None);
    };

    let mut rest = String::with_capacity(markup.len() - whole.len());
    rest.push_str(&markup[..whole.start()]);
    rest.push_str(&markup[whole.end()..]);

    (rest, Some(inner.as_str().trim().to_string()))
}
