use scraper::{Html, Selector};
use wikipreview::transform;

fn fragment(html: &str) -> Html {
    Html::parse_fragment(html)
}

fn count(doc: &Html, css: &str) -> usize {
    let sel = Selector::parse(css).unwrap();
    doc.select(&sel).count()
}

fn texts(doc: &Html, css: &str) -> Vec<String> {
    let sel = Selector::parse(css).unwrap();
    doc.select(&sel)
        .map(|e| e.text().collect::<String>())
        .collect()
}

#[test]
fn no_short_description_leaves_markup_to_the_other_passes() {
    let out = transform("Just text");
    assert_eq!(out.short_description, None);
    assert_eq!(out.html, "<p>Just text</p>");
}

#[test]
fn short_description_is_extracted_and_removed() {
    let out = transform("{{Short description|Foo}}\nBar");
    assert_eq!(out.short_description.as_deref(), Some("Foo"));
    assert!(!out.html.contains("Short description"));
    assert!(!out.html.contains("Foo"));
    assert_eq!(texts(&fragment(&out.html), "p"), vec!["Bar"]);
}

#[test]
fn bold_and_italic() {
    let doc = fragment(&transform("'''bold''' and ''italic''").html);
    assert_eq!(texts(&doc, "strong"), vec!["bold"]);
    assert_eq!(texts(&doc, "em"), vec!["italic"]);
}

#[test]
fn heading_levels() {
    assert_eq!(transform("== Title ==").html, "<h2>Title</h2>");
    assert_eq!(transform("====== Deep ======").html, "<h6>Deep</h6>");
}

#[test]
fn internal_links() {
    let doc = fragment(&transform("[[Page]] and [[Page|Show]]").html);
    let sel = Selector::parse("a").unwrap();
    let links: Vec<(String, String)> = doc
        .select(&sel)
        .map(|a| {
            (
                a.value().attr("href").unwrap_or_default().to_string(),
                a.text().collect(),
            )
        })
        .collect();
    assert_eq!(
        links,
        vec![
            ("/articles/Page".to_string(), "Page".to_string()),
            ("/articles/Page".to_string(), "Show".to_string()),
        ]
    );
}

#[test]
fn lists_switch_type() {
    let doc = fragment(&transform("* a\n* b\n# c").html);
    assert_eq!(count(&doc, "ul"), 1);
    assert_eq!(count(&doc, "ul > li"), 2);
    assert_eq!(count(&doc, "ol"), 1);
    assert_eq!(count(&doc, "ol > li"), 1);
}

#[test]
fn references_collected_and_listed() {
    let src = "X<ref>footnote</ref>Y<references/>";
    let out = transform(src);
    let doc = fragment(&out.html);
    assert_eq!(count(&doc, "sup.wiki-reference"), 1);
    assert_eq!(texts(&doc, "sup.wiki-reference a"), vec!["1"]);
    assert_eq!(texts(&doc, "li#ref-1"), vec!["footnote"]);

    // counters are per call.
    assert_eq!(transform(src), out);
}

#[test]
fn table_structure() {
    let src = "{| class=\"wikitable\"\n|+ Cap\n|-\n! H1 !! H2\n|-\n| A || B\n|}";
    let doc = fragment(&transform(src).html);
    assert_eq!(texts(&doc, "caption"), vec!["Cap"]);
    assert_eq!(texts(&doc, "th"), vec!["H1", "H2"]);
    assert_eq!(texts(&doc, "td"), vec!["A", "B"]);
    assert_eq!(count(&doc, "table.wikitable"), 1);
}

#[test]
fn unknown_template_is_generic() {
    let html = transform("{{Flarb|x=1}}").html;
    assert!(html.contains("<div class=\"wiki-template\">"), "{html}");
    let doc = fragment(&html);
    assert_eq!(texts(&doc, ".wiki-template-name"), vec!["Flarb"]);
    assert_eq!(texts(&doc, ".wiki-template-params li"), vec!["x: 1"]);
}

#[test]
fn paragraphs_and_block_chunks() {
    let doc = fragment(&transform("Hello\n\nWorld").html);
    assert_eq!(texts(&doc, "p"), vec!["Hello", "World"]);

    let html = transform("== T ==\n\nBody").html;
    assert_eq!(html, "<h2>T</h2>\n\n<p>Body</p>");
}

#[test]
fn images_and_captions() {
    let doc = fragment(&transform("[[File:Board.png|thumb|left|A [[Chess]] board]]").html);
    let sel = Selector::parse("figure.wiki-image.thumb.left img").unwrap();
    let img = doc.select(&sel).next().unwrap();
    assert_eq!(img.value().attr("src"), Some("/media/Board.png"));
    assert_eq!(texts(&doc, "figcaption"), vec!["A Chess board"]);
    assert_eq!(count(&doc, "figcaption a[href='/articles/Chess']"), 1);
}

#[test]
fn infobox_and_citation_inside_reference() {
    let src = "{{Infobox software\n| name = Stockfish\n| label1 = License | data1 = GPL\n}}\n\
               Strong.<ref>{{cite web|url=https://ex.org|title=Ratings}}</ref>\n\n<references/>";
    let doc = fragment(&transform(src).html);
    assert_eq!(texts(&doc, "table.wiki-infobox .infobox-title"), vec!["Stockfish"]);
    assert_eq!(texts(&doc, "table.wiki-infobox td"), vec!["GPL"]);
    assert_eq!(count(&doc, "li#ref-1 span.wiki-citation a[href='https://ex.org']"), 1);
}
