//! Plain-text rendering of tables.

use serde_json::Value;
use vecpeek_core::Table;

const MAX_CELL_WIDTH: usize = 48;

/// Renders a table as aligned text columns followed by a row count.
///
/// Null cells are blank; long cells are cut with an ellipsis.
pub fn render_human(table: &Table) -> String {
    let header: Vec<String> = table.columns().to_vec();
    let body: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| {
            header
                .iter()
                .map(|column| cell(row.get(column).unwrap_or(&Value::Null)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }

    let noun = if table.len() == 1 { "row" } else { "rows" };
    out.push_str(&format!("({} {})\n", table.len(), noun));
    for collision in table.collisions() {
        out.push_str(&format!(
            "warning: row {} has a metadata key named '{}'\n",
            collision.row, collision.column
        ));
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

fn cell(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let flat = text.replace(['\n', '\r', '\t'], " ");

    if flat.chars().count() > MAX_CELL_WIDTH {
        let cut: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}…", cut)
    } else {
        flat
    }
}
