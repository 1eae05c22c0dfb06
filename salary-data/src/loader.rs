//! Season dataset loader.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does **not** matter and
//! unknown columns (such as an unnamed index column written by a dataframe
//! export) are ignored.
//!
//! | Column                         | Alias               | Type    |
//! |--------------------------------|---------------------|---------|
//! | `Name`                         |                     | string  |
//! | `2022 Salary`                  | `Salary`            | decimal |
//! | `Avg Career Salary Difference` | `Salary Difference` | number  |
//! | `Age`                          |                     | number  |
//! | `H`                            |                     | number  |
//! | `R`                            |                     | number  |
//! | `RBI`                          |                     | number  |
//! | `BB`                           |                     | number  |
//! | `SO`                           |                     | number  |
//! | `SB`                           |                     | number  |
//! | `OPS`                          |                     | number  |
//!
//! ```csv
//! ,Name,2022 Salary,Avg Career Salary Difference,Age,H,R,RBI,BB,SO,SB,OPS
//! 0,Aaron Judge,19000000.0,3500000.0,30,177,133,131,111,175,16,1.111
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use salary_core::{FeatureVector, PlayerRecord};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeasonLoaderError {
    #[error("cannot open season dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    /// `row` is 1-based; the header is row 0.
    #[error("player '{name}' appears more than once (row {row})")]
    DuplicatePlayer { name: String, row: usize },

    #[error("empty player name on row {0}")]
    EmptyName(usize),
}

#[derive(Debug, Deserialize)]
struct SeasonRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "2022 Salary", alias = "Salary")]
    salary: Decimal,
    #[serde(rename = "Avg Career Salary Difference", alias = "Salary Difference")]
    salary_difference: f64,
    #[serde(rename = "Age")]
    age: f64,
    #[serde(rename = "H")]
    hits: f64,
    #[serde(rename = "R")]
    runs: f64,
    #[serde(rename = "RBI")]
    rbi: f64,
    #[serde(rename = "BB")]
    walks: f64,
    #[serde(rename = "SO")]
    strikeouts: f64,
    #[serde(rename = "SB")]
    stolen_bases: f64,
    #[serde(rename = "OPS")]
    ops: f64,
}

impl From<SeasonRow> for PlayerRecord {
    fn from(row: SeasonRow) -> Self {
        PlayerRecord {
            name: row.name,
            salary: row.salary,
            features: FeatureVector {
                salary_difference: row.salary_difference,
                age: row.age,
                hits: row.hits,
                runs: row.runs,
                rbi: row.rbi,
                walks: row.walks,
                strikeouts: row.strikeouts,
                stolen_bases: row.stolen_bases,
                ops: row.ops,
            },
        }
    }
}

/// Loader for a season's batting statistics merged with actual salaries.
pub struct SeasonLoader;

impl SeasonLoader {
    /// Parse player records from any reader. Rows are returned in file order.
    ///
    /// # Errors
    ///
    /// * [`SeasonLoaderError::CsvParse`] – a required column is missing or a
    ///   cell cannot be parsed.
    /// * [`SeasonLoaderError::DuplicatePlayer`] – a name occurs twice.
    /// * [`SeasonLoaderError::EmptyName`] – a row has a blank name.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PlayerRecord>, SeasonLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut records = Vec::new();

        for (idx, result) in csv_reader.deserialize::<SeasonRow>().enumerate() {
            let row = result?;
            let row_number = idx + 1;

            if row.name.is_empty() {
                return Err(SeasonLoaderError::EmptyName(row_number));
            }
            if seen.insert(row.name.clone(), row_number).is_some() {
                return Err(SeasonLoaderError::DuplicatePlayer {
                    name: row.name,
                    row: row_number,
                });
            }

            records.push(PlayerRecord::from(row));
        }

        Ok(records)
    }

    /// Read and parse a season file from disk.
    pub fn load_file(path: &Path) -> Result<Vec<PlayerRecord>, SeasonLoaderError> {
        let file = File::open(path).map_err(|source| SeasonLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let records = Self::parse(file)?;

        info!(path = %path.display(), players = records.len(), "loaded season dataset");
        Ok(records)
    }
}
