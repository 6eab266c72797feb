#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    /// `* ` bullet list.
    Unordered,
    /// `# ` numbered list.
    Ordered,
}

impl ListKind {
    fn open(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(rest) = line.strip_prefix("* ") {
        return Some((ListKind::Unordered, rest));
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return Some((ListKind::Ordered, rest));
    }
    None
}

/// Group runs of `* ` / `# ` lines into `<ul>` / `<ol>` blocks.
///
/// Single level only: deeper markers (`** `) are not list items. Switching
/// marker type or hitting any other line closes the open list.
pub fn convert_lists(input: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut open: Option<ListKind> = None;

    for line in input.split('\n') {
        match list_item(line) {
            Some((kind, item)) => {
                if open != Some(kind) {
                    if let Some(prev) = open {
                        out.push(prev.close().to_string());
                    }
                    out.push(kind.open().to_string());
                    open = Some(kind);
                }
                out.push(format!("<li>{}</li>", item.trim()));
            }
            None => {
                if let Some(prev) = open.take() {
                    out.push(prev.close().to_string());
                }
                out.push(line.to_string());
            }
        }
    }

    if let Some(prev) = open {
        out.push(prev.close().to_string());
    }

    out.join("\n")
}
