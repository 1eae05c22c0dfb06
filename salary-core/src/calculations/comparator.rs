//! Predicted-versus-actual salary comparison for a whole season roster.

use regex::RegexBuilder;
use thiserror::Error;
use tracing::{debug, info};

use super::estimator::{EstimateError, SalaryEstimator};
use crate::models::{PlayerComparison, PlayerRecord};

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("cannot estimate salary for '{name}': {source}")]
    Estimate {
        name: String,
        #[source]
        source: EstimateError,
    },

    #[error("player '{0}' not found")]
    NotFound(String),

    #[error("player '{0}' appears more than once")]
    DuplicatePlayer(String),

    #[error("invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Runs a [`SalaryEstimator`] over every player of a season.
#[derive(Debug, Clone, Copy)]
pub struct BatchComparator<'a> {
    estimator: &'a SalaryEstimator,
}

impl<'a> BatchComparator<'a> {
    pub fn new(estimator: &'a SalaryEstimator) -> Self {
        Self { estimator }
    }

    /// Estimate and classify every record.
    ///
    /// The first estimation failure aborts the pass; no partial table is
    /// returned. Names must be unique so that lookup is unambiguous.
    pub fn compare(
        &self,
        dataset: &[PlayerRecord],
    ) -> Result<ComparisonTable, CompareError> {
        let rows = dataset
            .iter()
            .map(|player| self.compare_one(player))
            .collect::<Result<Vec<_>, _>>()?;

        let table = ComparisonTable::new(rows);
        if let Some(pair) = table.rows.windows(2).find(|w| w[0].name() == w[1].name()) {
            return Err(CompareError::DuplicatePlayer(pair[0].name().to_string()));
        }
        info!(players = table.len(), "compared predicted and actual salaries");
        Ok(table)
    }

    fn compare_one(
        &self,
        player: &PlayerRecord,
    ) -> Result<PlayerComparison, CompareError> {
        let predicted = self
            .estimator
            .estimate(&player.features)
            .map_err(|source| CompareError::Estimate {
                name: player.name.clone(),
                source,
            })?;

        Ok(PlayerComparison::new(player.clone(), predicted))
    }
}

/// Comparison rows ordered by unique player name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonTable {
    rows: Vec<PlayerComparison>,
}

impl ComparisonTable {
    pub(crate) fn new(mut rows: Vec<PlayerComparison>) -> Self {
        rows.sort_by(|a, b| a.name().cmp(b.name()));
        Self { rows }
    }

    pub fn rows(&self) -> &[PlayerComparison] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<PlayerComparison> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(PlayerComparison::name)
    }

    /// Exact, case-sensitive name match.
    pub fn lookup(
        &self,
        name: &str,
    ) -> Result<&PlayerComparison, CompareError> {
        self.rows
            .binary_search_by(|row| row.name().cmp(name))
            .map(|idx| &self.rows[idx])
            .map_err(|_| CompareError::NotFound(name.to_string()))
    }

    /// Rows whose name matches `pattern`, ignoring case.
    pub fn filter(
        &self,
        pattern: &str,
    ) -> Result<Vec<&PlayerComparison>, CompareError> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        let matched: Vec<_> = self.rows.iter().filter(|row| re.is_match(row.name())).collect();

        debug!(pattern, matched = matched.len(), "filtered comparisons");
        Ok(matched)
    }
}
