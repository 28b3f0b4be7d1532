//! HTML table extraction.
//!
//! Case-insensitive tag slicing over raw page text, no DOM. Good enough for
//! the simple `<table>/<tr>/<td>` markup of the reference pages; nested tables
//! and `colspan` are not handled.

/// A table as rows of cell text.
pub type RawTable = Vec<Vec<String>>;

/// Every `<table>` on the page in document order, as rows of cell text.
///
/// Rows without any cells are skipped.
pub fn extract_tables(html: &str) -> Vec<RawTable> {
    elements(html, &["table"])
        .into_iter()
        .map(|table| {
            elements(table, &["tr"])
                .into_iter()
                .map(|row| {
                    elements(row, &["td", "th"])
                        .into_iter()
                        .map(cell_text)
                        .collect::<Vec<_>>()
                })
                .filter(|cells| !cells.is_empty())
                .collect()
        })
        .collect()
}

/// Inner markup of each element named in `names`.
///
/// An element ends at its closing tag or at the next opening tag of any of
/// `names`, whichever comes first, so omitted `</tr>`/`</td>` are tolerated.
fn elements<'a>(html: &'a str, names: &[&str]) -> Vec<&'a str> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lc = html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(start) = next_open(&lc, names, pos) {
        let Some(gt) = lc[start..].find('>') else { break };
        let content_start = start + gt + 1;

        let content_end = names
            .iter()
            .filter_map(|n| lc[content_start..].find(&format!("</{}", n)))
            .chain(next_open(&lc, names, content_start).map(|p| p - content_start))
            .min()
            .map(|rel| content_start + rel)
            .unwrap_or(html.len());

        out.push(&html[content_start..content_end]);
        pos = content_end;
    }
    out
}

/// Position of the next opening tag among `names` at or after `from`.
fn next_open(lc: &str, names: &[&str], from: usize) -> Option<usize> {
    names.iter().filter_map(|n| find_open_tag(lc, n, from)).min()
}

/// Find `<name` followed by a tag boundary, so `<th` does not match `<thead>`.
fn find_open_tag(lc: &str, name: &str, from: usize) -> Option<usize> {
    let pat = format!("<{}", name);
    let mut pos = from;

    while let Some(rel) = lc.get(pos..)?.find(&pat) {
        let start = pos + rel;
        let after = start + pat.len();
        match lc.as_bytes().get(after) {
            Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r') => return Some(start),
            None => return None,
            Some(_) => pos = after,
        }
    }
    None
}

/// Visible text of a cell: tags stripped, entities decoded, whitespace collapsed.
fn cell_text(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut in_tag = false;

    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    decoded
        .split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
