//! Text output formatting: aligned tables with optional colors.

use pageviews_core::Table;
use serde_json::Value;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// Gap between columns.
const COLUMN_GAP: &str = "  ";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a table, printing at most `limit` rows.
    pub fn format_table(&self, table: &Table, limit: Option<usize>) -> String {
        if table.is_empty() {
            return self.dim("No rows");
        }

        let shown = limit.unwrap_or(table.len()).min(table.len());
        let columns = table.columns();
        let cells: Vec<Vec<(String, bool)>> = table.rows()[..shown]
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|c| format_cell(row.get(c).unwrap_or(&Value::Null)))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|r| r[i].0.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(shown + 3);

        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(name, width)| self.bold(&pad(name, *width, false)))
            .collect();
        lines.push(header.join(COLUMN_GAP).trim_end().to_string());

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        lines.push(self.dim(&rule.join(COLUMN_GAP)));

        for row in &cells {
            let rendered: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|((text, numeric), width)| {
                    let padded = pad(text, *width, *numeric);
                    if *numeric { self.cyan(&padded) } else { padded }
                })
                .collect();
            lines.push(rendered.join(COLUMN_GAP).trim_end().to_string());
        }

        let footer = if shown < table.len() {
            format!("{shown} of {} rows", table.len())
        } else {
            format!("{} rows", table.len())
        };
        lines.push(self.dim(&footer));

        lines.join("\n")
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn cyan(&self, text: &str) -> String {
        if self.use_colors {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Renders a cell and reports whether it is numeric.
pub(crate) fn format_cell(value: &Value) -> (String, bool) {
    match value {
        Value::Null => ("-".to_string(), false),
        Value::String(s) => (s.clone(), false),
        Value::Number(n) => match n.as_i64() {
            Some(i) => (group_thousands(i), true),
            None => (n.to_string(), true),
        },
        other => (other.to_string(), false),
    }
}

/// Formats an integer with comma thousands separators.
pub(crate) fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}
