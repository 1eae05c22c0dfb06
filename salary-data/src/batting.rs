//! The basic batting dataset, kept as untyped text cells.
//!
//! The exploration view shows whatever columns the file has, so nothing is
//! parsed up front; [`crate::stats::describe`] decides per column whether
//! it is numeric.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum BattingTableError {
    #[error("cannot open batting dataset '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),
}

/// A header row and its data rows, every row the same width as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattingTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl BattingTable {
    pub fn new(
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self { headers, rows }
    }

    /// Parse a CSV with a header row. Rows with a different number of
    /// fields than the header are an error.
    pub fn parse<R: Read>(reader: R) -> Result<Self, BattingTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let headers = csv_reader.headers()?.iter().map(str::to_string).collect();
        let rows = csv_reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn load_file(path: &Path) -> Result<Self, BattingTableError> {
        let file = File::open(path).map_err(|source| BattingTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::parse(file)?;

        info!(
            path = %path.display(),
            columns = table.headers.len(),
            rows = table.rows.len(),
            "loaded batting dataset"
        );
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of column `idx`, top to bottom.
    pub fn column(
        &self,
        idx: usize,
    ) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(idx).map(String::as_str))
    }
}
