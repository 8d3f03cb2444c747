use crate::engine::DuplicateRecord;

/// Escape special characters in a table cell so that pipes, backslashes,
/// and newlines do not break table structure.
fn escape_cell(content: &str) -> String {
    content
        .replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
        .replace('\r', "")
}

/// Build a pipe-delimited table from headers and rows.
///
/// Each row is padded or truncated to match the header count.
/// Special characters in headers and cells are escaped via `escape_cell`.
pub fn build_table(headers: &[&str], rows: &[Vec<&str>]) -> String {
    let col_count = headers.len();
    if col_count == 0 {
        return String::new();
    }

    let mut out = String::new();

    // Header row
    out.push('|');
    for h in headers {
        out.push(' ');
        out.push_str(&escape_cell(h));
        out.push_str(" |");
    }
    out.push('\n');

    // Separator row
    out.push('|');
    for _ in 0..col_count {
        out.push_str("---|");
    }
    out.push('\n');

    // Data rows
    for row in rows {
        out.push('|');
        for i in 0..col_count {
            out.push(' ');
            if let Some(cell) = row.get(i) {
                out.push_str(&escape_cell(cell));
            }
            out.push_str(" |");
        }
        out.push('\n');
    }

    out
}

/// Render duplicate records as a human-readable table, or a placeholder line
/// when the list is clean.
pub fn render_table(records: &[DuplicateRecord]) -> String {
    if records.is_empty() {
        return "No duplicates found.\n".to_string();
    }

    let counts: Vec<String> = records.iter().map(|r| r.count.to_string()).collect();
    let rows: Vec<Vec<&str>> = records
        .iter()
        .zip(&counts)
        .map(|(r, c)| vec![r.display_name.as_str(), c.as_str()])
        .collect();
    build_table(&["Name", "Count"], &rows)
}

/// Render duplicate records as the JSON result shape consumed by callers:
/// `{"data": [{"name", "count"}]}`.
pub fn render_json(records: &[DuplicateRecord]) -> String {
    let data: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "name": r.display_name,
                "count": r.count,
            })
        })
        .collect();
    serde_json::json!({ "data": data }).to_string()
}

/// Render a failure as the JSON error shape: `{"error": "..."}`.
pub fn render_json_error(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
