pub mod config;
pub mod error;
pub mod remote;
pub mod transform;

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::info;
use walkdir::WalkDir;

pub use config::PreviewConfig;
pub use error::{PreviewError, Result};
pub use transform::{
    HeadingRecord, RenderOptions, TransformOutput, anchor_headings, extract_headings, render_toc,
    transform, transform_with_options,
};

/// Render one document according to `cfg`: remote or local, with an optional
/// table of contents in front.
pub fn render_markup(markup: &str, cfg: &PreviewConfig) -> TransformOutput {
    let render_opts = cfg.render_options();
    let mut out = match cfg.remote_options() {
        Some(remote_opts) => remote::preview(markup, &remote_opts, &render_opts),
        None => transform_with_options(markup, &render_opts),
    };

    if cfg.toc {
        let (html, anchored) = anchor_headings(&out.html, &extract_headings(markup));
        if !anchored.is_empty() {
            out.html = format!("{}\n\n{html}", render_toc(&anchored));
        }
    }
    out
}

/// Single file mode: read a `.wiki` file and render it.
pub fn render_file(path: &Path, cfg: &PreviewConfig) -> Result<TransformOutput> {
    let markup = read_markup(path)?;
    Ok(render_markup(&markup, cfg))
}

/// Bulk mode: render every `.wiki` file under `wiki_root` to the same
/// relative path under `out_root`, with an `.html` extension.
///
/// Returns the number of files written.
pub fn render_all_in_dirs(wiki_root: &Path, out_root: &Path, cfg: &PreviewConfig) -> Result<usize> {
    let start_time = Instant::now();

    if !wiki_root.is_dir() {
        return Err(PreviewError::MissingDirectory(wiki_root.to_path_buf()));
    }

    let mut entries: Vec<_> = WalkDir::new(wiki_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "wiki")
        })
        .collect();

    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let total = entries.len();
    let mut count = 0;

    for entry in entries {
        let path = entry.path();
        // keep the same directory structure under the output root.
        let relative = path.strip_prefix(wiki_root)?;

        let mut html_path = out_root.join(relative);
        html_path.set_extension("html");

        if let Some(parent) = html_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let out = render_file(path, cfg)?;
        fs::write(&html_path, &out.html)?;

        count += 1;

        let total_ms = start_time.elapsed().as_millis();
        let mins = total_ms / 60_000;
        let secs = (total_ms % 60_000) / 1_000;
        let ms = total_ms % 1_000;
        info!(
            "[{:>4}/{:>4}] [{:02}:{:02}.{:03}] Rendered: {}",
            count,
            total,
            mins,
            secs,
            ms,
            html_path.display()
        );
    }

    let total_secs = start_time.elapsed().as_secs_f64();
    let avg_str = if count > 0 {
        format!("{:.3}s", total_secs / count as f64)
    } else {
        "-".to_string()
    };
    info!("Done. Rendered {count} files in {total_secs:.3}s (avg {avg_str}/doc).");

    Ok(count)
}

fn read_markup(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;

    // wiki exports should be UTF-8; fall back to lossy conversion if not.
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toc_is_prepended_when_enabled() {
        let cfg = PreviewConfig {
            toc: true,
            ..PreviewConfig::default()
        };
        let out = render_markup("== A ==\ntext\n== B ==", &cfg);
        assert!(out.html.starts_with("<nav class=\"wiki-toc\">"), "{}", out.html);
        assert!(out.html.contains("<a href=\"#a\">A</a>"), "{}", out.html);
        assert!(out.html.contains("<h2 id=\"a\">A</h2>"), "{}", out.html);
    }

    #[test]
    fn toc_skips_headings_moved_into_references() {
        let cfg = PreviewConfig {
            toc: true,
            ..PreviewConfig::default()
        };
        let src = "X<ref>\n== Hidden ==\n</ref>\n\n== B ==\ntext\n\n== C ==\n\n<references/>";
        let html = render_markup(src, &cfg).html;
        assert!(html.contains("<h2 id=\"b\">B</h2>"), "{html}");
        assert!(html.contains("<h2 id=\"c\">C</h2>"), "{html}");
        assert!(html.contains("<a href=\"#b\">B</a>"), "{html}");
        assert!(!html.contains("#hidden"), "{html}");
    }

    #[test]
    fn toc_is_skipped_without_headings() {
        let cfg = PreviewConfig {
            toc: true,
            ..PreviewConfig::default()
        };
        assert_eq!(render_markup("plain", &cfg).html, "<p>plain</p>");
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.wiki");
        fs::write(&path, b"caf\xe9 ''x''").unwrap();

        let out = render_file(&path, &PreviewConfig::default()).unwrap();
        assert_eq!(out.html, "<p>caf\u{fffd} <em>x</em></p>");
    }

    #[test]
    fn missing_wiki_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_all_in_dirs(
            &dir.path().join("nope"),
            &dir.path().join("out"),
            &PreviewConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PreviewError::MissingDirectory(_)), "{err}");
    }

    #[test]
    fn bulk_mode_mirrors_directory_layout() {
        let dir = tempfile::tempdir().unwrap();
        let wiki_root = dir.path().join("wiki");
        let out_root = dir.path().join("html");
        fs::create_dir_all(wiki_root.join("b")).unwrap();
        fs::write(wiki_root.join("a.wiki"), "== A ==").unwrap();
        fs::write(wiki_root.join("b").join("Bee.wiki"), "'''bee'''").unwrap();
        fs::write(wiki_root.join("b").join("notes.txt"), "ignored").unwrap();

        let n = render_all_in_dirs(&wiki_root, &out_root, &PreviewConfig::default()).unwrap();
        assert_eq!(n, 2);
        assert_eq!(fs::read_to_string(out_root.join("a.html")).unwrap(), "<h2>A</h2>");
        assert_eq!(
            fs::read_to_string(out_root.join("b").join("Bee.html")).unwrap(),
            "<p><strong>bee</strong></p>"
        );
        assert!(!out_root.join("b").join("notes.html").exists());
    }
}
