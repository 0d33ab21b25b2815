use colored::Colorize;

use crate::domain::entities::stack::{Stack, StackStatus};

const HEADERS: [&str; 4] = ["ORDER", "STACK", "STATUS", "PATH"];
const COLUMN_GAP: usize = 3;

/// Render the `list` table.
///
/// Columns are padded to the widest cell plus a fixed gap; the last column
/// is not padded. Status cells are coloured after padding so escape codes
/// do not disturb the alignment.
pub fn format_stack_table(stacks: &[Stack], color: bool) -> String {
    let rows: Vec<[String; 4]> = stacks
        .iter()
        .map(|stack| {
            [
                stack.order(),
                stack.name.clone(),
                stack.status.unwrap_or(StackStatus::Down).to_string(),
                stack.directory.display().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(char_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(char_width(cell));
        }
    }

    let header = HEADERS.map(str::to_string);
    let separator = HEADERS.map(|h| "-".repeat(h.len()));

    let mut lines = vec![
        render_row(&header, &widths, None),
        render_row(&separator, &widths, None),
    ];
    for (row, stack) in rows.iter().zip(stacks) {
        let status = color.then(|| stack.status.unwrap_or(StackStatus::Down));
        lines.push(render_row(row, &widths, status));
    }

    lines.join("\n")
}

fn render_row(cells: &[String; 4], widths: &[usize; 4], status: Option<StackStatus>) -> String {
    let last = cells.len() - 1;
    let mut line = String::new();

    for (i, cell) in cells.iter().enumerate() {
        let padded = if i == last {
            cell.clone()
        } else {
            pad(cell, widths[i] + COLUMN_GAP)
        };

        match (i, status) {
            (2, Some(status)) => line.push_str(&colorize(&padded, status)),
            _ => line.push_str(&padded),
        }
    }

    line
}

fn char_width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(char_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn colorize(text: &str, status: StackStatus) -> String {
    match status {
        StackStatus::Running => text.green().to_string(),
        StackStatus::Stopped => text.yellow().to_string(),
        StackStatus::Down => text.red().to_string(),
    }
}
