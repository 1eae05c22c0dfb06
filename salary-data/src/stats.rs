//! Per-column descriptive statistics for a [`BattingTable`].
//!
//! A column is summarised when it has at least one non-empty cell and every
//! non-empty cell parses as a number. Quantiles interpolate linearly between
//! the two closest ranks.

use serde::Serialize;

use crate::batting::BattingTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent for a single observation.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

pub fn describe(table: &BattingTable) -> Vec<ColumnSummary> {
    table
        .headers()
        .iter()
        .enumerate()
        .filter_map(|(idx, header)| {
            numeric_values(table, idx).map(|values| summarise(header, values))
        })
        .collect()
}

fn numeric_values(
    table: &BattingTable,
    idx: usize,
) -> Option<Vec<f64>> {
    let mut values = Vec::new();
    for cell in table.column(idx).filter(|c| !c.is_empty()) {
        values.push(cell.parse::<f64>().ok()?);
    }

    if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
        None
    } else {
        Some(values)
    }
}

fn summarise(
    column: &str,
    mut values: Vec<f64>,
) -> ColumnSummary {
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    }
}

/// `sorted` must be non-empty and ascending.
fn quantile(
    sorted: &[f64],
    q: f64,
) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
