//! CSV export of comparison results and of the batting dataset.
//!
//! Comparisons are written through [`ComparisonRow`], the flat projection of
//! a [`PlayerComparison`] used for display and download:
//!
//! `Name, 2022 Salary, Predicted Salary, Value?, Avg Career Salary Difference,
//! Age, H, R, RBI, BB, SO, SB, OPS`
//!
//! Salaries are whole dollars. Output is UTF-8 with a header row.

use std::io::{Read, Write};

use rust_decimal::Decimal;
use salary_core::{PlayerComparison, ValueFlag};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::batting::BattingTable;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "2022 Salary")]
    pub salary: Decimal,
    #[serde(rename = "Predicted Salary")]
    pub predicted_salary: Decimal,
    #[serde(rename = "Value?")]
    pub value: ValueFlag,
    #[serde(rename = "Avg Career Salary Difference")]
    pub salary_difference: f64,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "H")]
    pub hits: f64,
    #[serde(rename = "R")]
    pub runs: f64,
    #[serde(rename = "RBI")]
    pub rbi: f64,
    #[serde(rename = "BB")]
    pub walks: f64,
    #[serde(rename = "SO")]
    pub strikeouts: f64,
    #[serde(rename = "SB")]
    pub stolen_bases: f64,
    #[serde(rename = "OPS")]
    pub ops: f64,
}

impl From<&PlayerComparison> for ComparisonRow {
    fn from(c: &PlayerComparison) -> Self {
        let f = &c.player.features;
        Self {
            name: c.player.name.clone(),
            salary: c.player.salary,
            predicted_salary: c.predicted_salary.amount(),
            value: c.value,
            salary_difference: f.salary_difference,
            age: f.age,
            hits: f.hits,
            runs: f.runs,
            rbi: f.rbi,
            walks: f.walks,
            strikeouts: f.strikeouts,
            stolen_bases: f.stolen_bases,
            ops: f.ops,
        }
    }
}

/// Write comparisons with a header row; returns the number of data rows.
pub fn export_comparisons<'a, W, I>(
    comparisons: I,
    writer: W,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a PlayerComparison>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut count = 0;

    for comparison in comparisons {
        csv_writer.serialize(ComparisonRow::from(comparison))?;
        count += 1;
    }

    // A header is still expected when nothing matched.
    if count == 0 {
        csv_writer.write_record(COMPARISON_HEADERS)?;
    }

    csv_writer.flush()?;
    debug!(rows = count, "exported comparisons");
    Ok(count)
}

/// Column names of a comparison export, in file order.
pub const COMPARISON_HEADERS: [&str; 13] = [
    "Name",
    "2022 Salary",
    "Predicted Salary",
    "Value?",
    "Avg Career Salary Difference",
    "Age",
    "H",
    "R",
    "RBI",
    "BB",
    "SO",
    "SB",
    "OPS",
];

/// Read back a file written by [`export_comparisons`].
pub fn load_comparisons<R: Read>(reader: R) -> Result<Vec<ComparisonRow>, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    Ok(csv_reader
        .deserialize::<ComparisonRow>()
        .collect::<Result<Vec<_>, _>>()?)
}

/// Write a batting table unchanged, header first.
pub fn export_table<W: Write>(
    table: &BattingTable,
    writer: W,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if !table.headers().is_empty() {
        csv_writer.write_record(table.headers())?;
    }
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }

    csv_writer.flush()?;
    debug!(rows = table.len(), "exported batting table");
    Ok(table.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use salary_core::{FeatureVector, PlayerRecord, SalaryEstimate};

    use super::*;

    fn kwan() -> PlayerComparison {
        PlayerComparison::new(
            PlayerRecord {
                name: "Steven Kwan".to_string(),
                salary: dec!(700000),
                features: FeatureVector {
                    salary_difference: 0.0,
                    age: 24.0,
                    hits: 168.0,
                    runs: 89.0,
                    rbi: 52.0,
                    walks: 62.0,
                    strikeouts: 60.0,
                    stolen_bases: 19.0,
                    ops: 0.772,
                },
            },
            SalaryEstimate::new(dec!(7787263)),
        )
    }

    #[test]
    fn export_writes_header_in_presentation_order() {
        let mut buf = Vec::new();
        let count = export_comparisons([&kwan()], &mut buf).expect("should export");
        assert_eq!(count, 1);

        let output = String::from_utf8(buf).unwrap();
        let header = output.lines().next().unwrap();
        assert_eq!(header, COMPARISON_HEADERS.join(","));
        assert!(output.contains("Steven Kwan,700000,7787263,Under-valued,"));
    }

    #[test]
    fn export_then_load_round_trips() {
        let comparison = kwan();
        let mut buf = Vec::new();
        export_comparisons([&comparison], &mut buf).unwrap();

        let rows = load_comparisons(buf.as_slice()).expect("should read back");

        assert_eq!(rows, vec![ComparisonRow::from(&comparison)]);
    }

    #[test]
    fn export_of_nothing_still_has_header() {
        let mut buf = Vec::new();
        let count = export_comparisons(std::iter::empty::<&PlayerComparison>(), &mut buf).unwrap();

        assert_eq!(count, 0);
        assert_eq!(
            String::from_utf8(buf).unwrap().trim_end(),
            COMPARISON_HEADERS.join(",")
        );
    }

    #[test]
    fn export_table_writes_cells_verbatim() {
        let table = BattingTable::new(
            vec!["Name".to_string(), "BA".to_string()],
            vec![vec!["Kwan, Steven".to_string(), ".298".to_string()]],
        );
        let mut buf = Vec::new();

        let count = export_table(&table, &mut buf).expect("should export");

        assert_eq!(count, 1);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Name,BA\n\"Kwan, Steven\",.298\n"
        );
    }
}
