//! Plain-text tables for terminal output.

use rust_decimal::Decimal;
use salary_core::{FEATURE_NAMES, FeatureVector, PlayerComparison};
use salary_data::{BattingTable, COMPARISON_HEADERS, ColumnSummary, ComparisonRow};

use crate::utils::{format_currency, format_stat};

fn render_line<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Left-aligned columns separated by two spaces, with a rule under the header.
pub fn render_table<H: AsRef<str>>(
    headers: &[H],
    rows: &[Vec<String>],
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = render_line(headers.iter().map(|h| h.as_ref()), &widths);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&render_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

pub fn render_features(features: &FeatureVector) -> String {
    let row: Vec<String> = features
        .named()
        .map(|(name, value)| match name {
            "Salary Difference" => {
                format_currency(Decimal::from_f64_retain(value).unwrap_or_default())
            }
            _ => format_stat(value),
        })
        .collect();
    render_table(&FEATURE_NAMES, &[row])
}

pub fn render_comparisons(comparisons: &[&PlayerComparison]) -> String {
    let rows: Vec<Vec<String>> = comparisons
        .iter()
        .map(|c| {
            let r = ComparisonRow::from(*c);
            vec![
                r.name,
                format_currency(r.salary),
                format_currency(r.predicted_salary),
                r.value.to_string(),
                format_stat(r.salary_difference),
                format_stat(r.age),
                format_stat(r.hits),
                format_stat(r.runs),
                format_stat(r.rbi),
                format_stat(r.walks),
                format_stat(r.strikeouts),
                format_stat(r.stolen_bases),
                format_stat(r.ops),
            ]
        })
        .collect();
    render_table(&COMPARISON_HEADERS, &rows)
}

/// The first `limit` rows of the batting table, or all of them.
pub fn render_batting(
    table: &BattingTable,
    limit: Option<usize>,
) -> String {
    let shown = limit.unwrap_or(table.len()).min(table.len());
    render_table(table.headers(), &table.rows()[..shown])
}

pub fn render_summary(summaries: &[ColumnSummary]) -> String {
    let headers = ["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"];
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                s.column.clone(),
                s.count.to_string(),
                format!("{:.3}", s.mean),
                s.std.map_or_else(|| "NaN".to_string(), |v| format!("{v:.3}")),
                format!("{:.3}", s.min),
                format!("{:.3}", s.q25),
                format!("{:.3}", s.median),
                format!("{:.3}", s.q75),
                format!("{:.3}", s.max),
            ]
        })
        .collect();
    render_table(&headers, &rows)
}
