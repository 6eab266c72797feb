//! Citation templates: `{{cite web}}`, `{{cite book}}`, `{{cite journal}}`
//! and a generic fallback for `{{cite}}`, `{{citation}}` and other
//! `{{cite <x>}}` variants.

use super::templates::TemplateInvocation;
use super::util::attr;

/// Render one citation as a single `<span class="wiki-citation">`.
///
/// `name` is the normalized template name.
pub fn render_citation(name: &str, inv: &TemplateInvocation) -> String {
    let segments = match name {
        "cite web" => cite_web(inv),
        "cite book" => cite_book(inv),
        "cite journal" => cite_journal(inv),
        _ => cite_generic(inv),
    };
    format!(
        "<span class=\"wiki-citation\">{}</span>",
        segments.join(" ")
    )
}

fn cite_web(inv: &TemplateInvocation) -> Vec<String> {
    let mut out = Vec::new();
    out.extend(author(inv).map(sentence));
    out.extend(linked_title(inv, TitleStyle::Quoted).map(sentence));
    out.extend(bare_url(inv).map(sentence));
    out.extend(inv.param(&["website", "work"]).map(|w| sentence(format!("<i>{w}</i>"))));
    out.extend(inv.param(&["publisher"]).map(sentence));
    out.extend(inv.param(&["date", "year"]).map(sentence));
    out.extend(access_date(inv));
    out
}

fn cite_book(inv: &TemplateInvocation) -> Vec<String> {
    let mut out = Vec::new();
    out.extend(author(inv).map(sentence));
    out.extend(inv.param(&["date", "year"]).map(|d| sentence(format!("({d})"))));
    out.extend(linked_title(inv, TitleStyle::Italic).map(sentence));
    out.extend(inv.param(&["publisher"]).map(sentence));
    out.extend(pages(inv));
    out.extend(inv.param(&["isbn", "ISBN"]).map(|i| sentence(format!("ISBN {i}"))));
    out
}

fn cite_journal(inv: &TemplateInvocation) -> Vec<String> {
    let mut out = Vec::new();
    match (author(inv), inv.param(&["date", "year"])) {
        (Some(a), Some(d)) => out.push(sentence(format!("{a} ({d})"))),
        (Some(a), None) => out.push(sentence(a)),
        (None, Some(d)) => out.push(sentence(format!("({d})"))),
        (None, None) => {}
    }
    out.extend(linked_title(inv, TitleStyle::Quoted).map(sentence));

    // journal. volume (issue): pages.
    let mut venue = String::new();
    if let Some(j) = inv.param(&["journal"]) {
        venue.push_str(&format!("<i>{j}</i>"));
    }
    if let Some(v) = inv.param(&["volume"]) {
        push_spaced(&mut venue, &format!("<b>{v}</b>"));
    }
    if let Some(i) = inv.param(&["issue"]) {
        push_spaced(&mut venue, &format!("({i})"));
    }
    if let Some(p) = inv.param(&["pages", "page"]) {
        if venue.is_empty() {
            venue.push_str(p);
        } else {
            venue.push_str(&format!(": {p}"));
        }
    }
    if !venue.is_empty() {
        out.push(sentence(venue));
    }

    if let Some(doi) = inv.param(&["doi", "DOI"]) {
        out.push(format!(
            "doi:<a href=\"https://doi.org/{}\" class=\"external\">{doi}</a>",
            attr(doi)
        ));
    }
    out
}

fn cite_generic(inv: &TemplateInvocation) -> Vec<String> {
    let mut out = Vec::new();
    out.extend(author(inv).map(sentence));
    out.extend(linked_title(inv, TitleStyle::Plain).map(sentence));
    out.extend(
        inv.param(&["website", "work", "journal"])
            .map(|w| sentence(format!("<i>{w}</i>"))),
    );
    out.extend(inv.param(&["publisher"]).map(sentence));
    out.extend(inv.param(&["date", "year"]).map(sentence));
    out.extend(pages(inv));
    out.extend(bare_url(inv));
    out.extend(access_date(inv));
    out
}

#[derive(Clone, Copy)]
enum TitleStyle {
    Plain,
    Quoted,
    Italic,
}

/// Title, linked to `url` when one is given.
fn linked_title(inv: &TemplateInvocation, style: TitleStyle) -> Option<String> {
    let title = inv.param(&["title"])?;
    let text = match style {
        TitleStyle::Plain => title.to_string(),
        TitleStyle::Quoted => format!("&quot;{title}&quot;"),
        TitleStyle::Italic => format!("<i>{title}</i>"),
    };
    Some(match inv.param(&["url"]) {
        Some(url) => external_link(url, &text),
        None => text,
    })
}

/// The url linked as its own text, for citations without a title.
fn bare_url(inv: &TemplateInvocation) -> Option<String> {
    if inv.param(&["title"]).is_some() {
        return None;
    }
    inv.param(&["url"]).map(|url| external_link(url, url))
}

fn external_link(url: &str, text: &str) -> String {
    format!("<a href=\"{}\" class=\"external\">{text}</a>", attr(url))
}

/// `author`, or `last, first` from the split fields.
fn author(inv: &TemplateInvocation) -> Option<String> {
    if let Some(a) = inv.param(&["author", "authors", "author1"]) {
        return Some(a.to_string());
    }
    let last = inv.param(&["last", "last1", "surname"]);
    let first = inv.param(&["first", "first1", "given"]);
    match (last, first) {
        (Some(l), Some(f)) => Some(format!("{l}, {f}")),
        (Some(l), None) => Some(l.to_string()),
        (None, Some(f)) => Some(f.to_string()),
        (None, None) => None,
    }
}

fn pages(inv: &TemplateInvocation) -> Option<String> {
    if let Some(p) = inv.param(&["pages"]) {
        return Some(sentence(format!("pp. {p}")));
    }
    inv.param(&["page"]).map(|p| sentence(format!("p. {p}")))
}

fn access_date(inv: &TemplateInvocation) -> Option<String> {
    inv.param(&["access-date", "accessdate"])
        .map(|d| sentence(format!("Retrieved {d}")))
}

fn push_spaced(buf: &mut String, s: &str) {
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(s);
}

/// Terminate with a period unless the text already ends a sentence.
fn sentence(s: impl Into<String>) -> String {
    let mut s = s.into();
    if !s.ends_with(['.', '!', '?']) {
        s.push('.');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cite(body: &str) -> String {
        let inv = TemplateInvocation::parse(body);
        render_citation(&inv.normalized_name(), &inv)
    }

    #[test]
    fn web_citation_with_all_fields() {
        assert_eq!(
            cite(
                "cite web|url=https://ex.org/a|title=Alpha|last=Doe|first=Jane|website=Ex|date=2020-01-02|access-date=2021-03-04"
            ),
            "<span class=\"wiki-citation\">Doe, Jane. \
             <a href=\"https://ex.org/a\" class=\"external\">&quot;Alpha&quot;</a>. \
             <i>Ex</i>. 2020-01-02. Retrieved 2021-03-04.</span>"
        );
    }

    #[test]
    fn book_citation_orders_year_before_title() {
        assert_eq!(
            cite("Cite book|author=A. Writer|title=Book|publisher=Pub|year=1999|pages=10-12|isbn=123"),
            "<span class=\"wiki-citation\">A. Writer. (1999). <i>Book</i>. Pub. pp. 10-12. ISBN 123.</span>"
        );
    }

    #[test]
    fn journal_citation_with_volume_issue_and_doi() {
        let html = cite(
            "cite journal|last=Smith|title=Paper|journal=Nature|volume=5|issue=2|pages=1-9|year=2001|doi=10.1/x",
        );
        assert!(html.starts_with("<span class=\"wiki-citation\">Smith (2001). &quot;Paper&quot;."), "{html}");
        assert!(html.contains("<i>Nature</i> <b>5</b> (2): 1-9."), "{html}");
        assert!(
            html.ends_with("doi:<a href=\"https://doi.org/10.1/x\" class=\"external\">10.1/x</a></span>"),
            "{html}"
        );
    }

    #[test]
    fn missing_fields_are_omitted() {
        assert_eq!(
            cite("cite web|title=Only"),
            "<span class=\"wiki-citation\">&quot;Only&quot;.</span>"
        );
        assert_eq!(cite("cite"), "<span class=\"wiki-citation\"></span>");
    }

    #[test]
    fn generic_citation_links_bare_url() {
        assert_eq!(
            cite("citation|url=https://ex.org|publisher=P"),
            "<span class=\"wiki-citation\">P. <a href=\"https://ex.org\" class=\"external\">https://ex.org</a></span>"
        );
    }

    #[test]
    fn web_citation_without_title_keeps_url() {
        assert_eq!(
            cite("cite web|url=https://ex.org/a"),
            "<span class=\"wiki-citation\"><a href=\"https://ex.org/a\" class=\"external\">https://ex.org/a</a>.</span>"
        );
        assert_eq!(
            cite("cite web|url=https://ex.org/a|website=Ex|date=2020"),
            "<span class=\"wiki-citation\"><a href=\"https://ex.org/a\" class=\"external\">https://ex.org/a</a>. <i>Ex</i>. 2020.</span>"
        );
    }

    #[test]
    fn existing_terminal_punctuation_is_kept() {
        assert_eq!(sentence("Who?"), "Who?");
        assert_eq!(sentence("Inc."), "Inc.");
        assert_eq!(sentence("x"), "x.");
    }
}
