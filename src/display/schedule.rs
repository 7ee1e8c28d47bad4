//! Upcoming recurring item display

use super::format::{relative_days, separator, truncate, width};
use crate::models::RecurringKind;
use crate::services::upcoming::UpcomingItem;

const DESCRIPTION_MAX: usize = 30;

/// Format upcoming recurring items as an aligned list
pub fn format_upcoming(items: &[UpcomingItem], date_format: &str) -> String {
    if items.is_empty() {
        return "Nothing due in this window.".to_string();
    }

    let rows: Vec<[String; 4]> = items
        .iter()
        .map(|item| {
            let sign = match item.kind {
                RecurringKind::Income => "+",
                RecurringKind::Expense => "-",
            };
            [
                item.due.format(date_format).to_string(),
                truncate(&item.description, DESCRIPTION_MAX),
                format!("{}{}", sign, item.currency.format(item.amount)),
                relative_days(item.days_until),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..4)
        .map(|col| {
            let header = ["Due", "Description", "Amount", "When"][col];
            rows.iter()
                .map(|r| width(&r[col]))
                .max()
                .unwrap_or(0)
                .max(width(header))
        })
        .collect();

    let mut output = String::new();
    output.push_str(&format_row(&["Due", "Description", "Amount", "When"], &widths));
    output.push_str(&separator(widths.iter().sum::<usize>() + 6));
    output.push('\n');
    for row in &rows {
        let cells = [row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()];
        output.push_str(&format_row(&cells, &widths));
    }
    output
}

fn format_row(cells: &[&str; 4], widths: &[usize]) -> String {
    // Amount is right-aligned; padding counts chars so accents line up
    let pad = |s: &str, w: usize| " ".repeat(w.saturating_sub(width(s)));
    format!(
        "{}{}  {}{}  {}{}  {}\n",
        cells[0],
        pad(cells[0], widths[0]),
        cells[1],
        pad(cells[1], widths[1]),
        pad(cells[2], widths[2]),
        cells[2],
        cells[3],
    )
}
