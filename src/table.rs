use serde::Deserialize;

/// How rows whose cell count differs from the first row are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaggedRows {
    /// Pad short rows with empty cells and truncate long ones
    #[default]
    Pad,
    /// Drop mismatched rows entirely
    Skip,
}

/// Result of scanning a contiguous run of pipe-delimited lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableScan {
    /// Rectangular cell matrix; empty when only separator rows were found
    pub rows: Vec<Vec<String>>,
    /// Index of the first line after the table
    pub next: usize,
}

pub(crate) fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Alignment rows like `|---|:---:|` carry no cell content.
fn is_separator_row(line: &str) -> bool {
    line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Consume the table starting at `start` and return its cells.
///
/// The first retained row fixes the column count. Later rows are padded,
/// truncated or dropped according to `ragged`, with a warning either way.
pub fn scan(lines: &[&str], start: usize, ragged: RaggedRows) -> TableScan {
    let mut next = start;
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut columns = 0;

    while next < lines.len() && is_table_line(lines[next]) {
        let line = lines[next];
        next += 1;

        if is_separator_row(line) {
            continue;
        }

        let mut cells = split_cells(line);
        if rows.is_empty() {
            columns = cells.len();
            rows.push(cells);
            continue;
        }

        if cells.len() != columns {
            tracing::warn!(
                line = next,
                expected = columns,
                found = cells.len(),
                "table row has a different cell count than the header"
            );
            match ragged {
                RaggedRows::Pad => cells.resize(columns, String::new()),
                RaggedRows::Skip => continue,
            }
        }
        rows.push(cells);
    }

    TableScan { rows, next }
}
