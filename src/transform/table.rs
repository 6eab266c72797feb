use lazy_regex::{Captures, regex};

use super::util::{find_attr, parse_html_attrs, render_attrs, split_attrs_and_content};

// a small subset of the MediaWiki table grammar: the first `|}` at the
// start of a line closes the block, so nested tables are not supported.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Header,
    Data,
}

#[derive(Debug, Clone)]
struct Cell {
    kind: CellKind,
    attrs: String,
    text: String,
}

#[derive(Debug, Default)]
struct TableModel {
    class: Option<String>,
    caption: Option<String>,
    rows: Vec<Vec<Cell>>,
}

/// Convert every closed `{| ... |}` block into a `<table>`.
///
/// Unclosed blocks never match and stay as literal text.
pub fn convert_tables(input: &str) -> String {
    regex!(r"(?ms)^[ \t]*\{\|([^\n]*)\n(.*?)^[ \t]*\|\}")
        .replace_all(input, |caps: &Captures| {
            let model = parse_table(&caps[1], &caps[2]);
            render_table(&model)
        })
        .into_owned()
}

fn flush_row(current_row: &mut Vec<Cell>, rows: &mut Vec<Vec<Cell>>) {
    if !current_row.is_empty() {
        rows.push(std::mem::take(current_row));
    }
}

/// Split on `sep` outside `{{ }}` and `[[ ]]`, so pipes belonging to a
/// template or link stay in their cell.
fn split_cells<'a>(line: &'a str, sep: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < line.len() {
        let rest = &line[i..];
        if rest.starts_with("{{") || rest.starts_with("[[") {
            depth += 1;
            i += 2;
        } else if depth > 0 && (rest.starts_with("}}") || rest.starts_with("]]")) {
            depth -= 1;
            i += 2;
        } else if depth == 0 && rest.starts_with(sep) {
            parts.push(&line[start..i]);
            i += sep.len();
            start = i;
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    parts.push(&line[start..]);
    parts
}

fn push_cells(line: &str, sep: &str, kind: CellKind, row: &mut Vec<Cell>) {
    for part in split_cells(line, sep) {
        let (attrs, content) = split_attrs_and_content(part);
        if content.is_empty() {
            continue;
        }
        row.push(Cell {
            kind,
            attrs: render_attrs(&parse_html_attrs(attrs)),
            text: content.to_string(),
        });
    }
}

fn parse_table(attrs_line: &str, body: &str) -> TableModel {
    let attrs = parse_html_attrs(attrs_line.trim());
    let mut model = TableModel {
        class: find_attr(&attrs, "class").map(str::to_string),
        ..TableModel::default()
    };
    let mut current_row: Vec<Cell> = Vec::new();

    for raw_line in body.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        // caption
        if let Some(after) = trimmed.strip_prefix("|+") {
            let (_attrs, text) = split_attrs_and_content(after);
            if !text.is_empty() {
                model.caption = Some(text.to_string());
            }
            continue;
        }

        // row separator
        if trimmed.starts_with("|-") {
            flush_row(&mut current_row, &mut model.rows);
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('!') {
            push_cells(rest, "!!", CellKind::Header, &mut current_row);
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('|') {
            push_cells(rest, "||", CellKind::Data, &mut current_row);
            continue;
        }

        // continuation line for the last cell.
        if let Some(cell) = current_row.last_mut() {
            cell.text.push('\n');
            cell.text.push_str(trimmed);
        }
    }
    flush_row(&mut current_row, &mut model.rows);

    model
}

fn render_table(model: &TableModel) -> String {
    let mut out = String::from("<table");
    if let Some(class) = &model.class {
        out.push_str(&format!(" class=\"{}\"", super::util::attr(class)));
    }
    out.push_str(">\n");

    if let Some(caption) = &model.caption {
        out.push_str(&format!("<caption>{caption}</caption>\n"));
    }

    for row in &model.rows {
        out.push_str("<tr>");
        for cell in row {
            let tag = match cell.kind {
                CellKind::Header => "th",
                CellKind::Data => "td",
            };
            out.push_str(&format!("<{tag}{}>{}</{tag}>", cell.attrs, cell.text));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</table>");
    out
}
