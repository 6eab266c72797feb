use lazy_regex::{Captures, regex};

use super::RenderOptions;
use super::util::attr;

/// Options collected from the pipe-separated parameters after the file name.
#[derive(Debug, Default, PartialEq, Eq)]
struct ImageOptions {
    thumb: bool,
    align: Option<&'static str>,
    width: Option<String>,
    alt: Option<String>,
    caption: Option<String>,
}

fn parse_image_options<'a>(params: impl Iterator<Item = &'a str>) -> ImageOptions {
    let mut opts = ImageOptions::default();
    for raw in params {
        let param = raw.trim();
        if param.is_empty() {
            continue;
        }
        let lower = param.to_ascii_lowercase();
        match lower.as_str() {
            "thumb" | "thumbnail" => opts.thumb = true,
            "left" => opts.align = Some("left"),
            "center" => opts.align = Some("center"),
            "right" => opts.align = Some("right"),
            // recognized, no effect on the preview.
            "frameless" | "frame" | "framed" | "border" | "none" | "upright" => {}
            _ => {
                if let Some(v) = lower.strip_prefix("width=") {
                    opts.width = Some(v.trim().trim_end_matches("px").to_string());
                } else if let Some(px) = lower.strip_suffix("px")
                    && !px.is_empty()
                    && px.bytes().all(|b| b.is_ascii_digit())
                {
                    opts.width = Some(px.to_string());
                } else if lower.starts_with("alt=") {
                    opts.alt = Some(param["alt=".len()..].trim().to_string());
                } else if lower.starts_with("link=") || lower.starts_with("upright=") {
                    // ignored.
                } else {
                    // last unrecognized token wins.
                    opts.caption = Some(param.to_string());
                }
            }
        }
    }
    opts
}

/// Convert `[[File:name|opt|...]]` (and `Image:`) to `<figure>`.
pub fn convert_images(input: &str, render: &RenderOptions) -> String {
    regex!(r"(?i)\[\[\s*(?:file|image)\s*:([^|\]]+)((?:\|[^\]]*)?)\]\]")
        .replace_all(input, |caps: &Captures| {
            let name = caps[1].trim();
            let opts = parse_image_options(caps[2].split('|').skip(1));
            render_figure(name, &opts, render)
        })
        .into_owned()
}

fn render_figure(name: &str, opts: &ImageOptions, render: &RenderOptions) -> String {
    let mut classes = vec!["wiki-image"];
    if opts.thumb {
        classes.push("thumb");
    }
    if let Some(align) = opts.align {
        classes.push(align);
    }

    let mut out = format!(r#"<figure class="{}">"#, classes.join(" "));
    out.push_str(&format!(
        r#"<img src="{}" alt="{}""#,
        attr(&format!("{}{}", render.media_base, name)),
        attr(opts.alt.as_deref().unwrap_or(name))
    ));
    if let Some(width) = &opts.width {
        out.push_str(&format!(r#" width="{}""#, attr(width)));
    }
    out.push('>');
    if let Some(caption) = &opts.caption {
        out.push_str(&format!("<figcaption>{caption}</figcaption>"));
    }
    out.push_str("</figure>");
    out
}
