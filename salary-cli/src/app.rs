//! Command handlers.
//!
//! Each handler writes its output to the given writer so the same code
//! serves the terminal and the tests.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use salary_core::{
    BatchComparator, CompareError, ComparisonTable, FeatureVector, ModelRegistry,
    PlayerComparison, SalaryEstimator,
};
use salary_data::{BattingTable, SeasonLoader, describe, export_comparisons, export_table};
use tracing::{debug, info};

use crate::cli::{Command, CompareArgs, DatasetCommand};
use crate::config::AppConfig;
use crate::utils::format_currency;
use crate::views;

/// Configuration plus the loaded model, passed to every model-backed handler.
#[derive(Debug)]
pub struct Session {
    config: AppConfig,
    estimator: SalaryEstimator,
}

impl Session {
    /// Load the model named by `config`.
    pub fn open(config: AppConfig) -> Result<Self> {
        let registry = ModelRegistry::with_builtin_kinds();
        let estimator = SalaryEstimator::from_artifact_path(&registry, &config.model_path)
            .with_context(|| {
                format!("salary model unavailable: '{}'", config.model_path.display())
            })?;
        Ok(Self::with_estimator(config, estimator))
    }

    pub fn with_estimator(
        config: AppConfig,
        estimator: SalaryEstimator,
    ) -> Self {
        Self { config, estimator }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn estimator(&self) -> &SalaryEstimator {
        &self.estimator
    }

    /// Predicted against actual salary for every player in the season file.
    pub fn comparisons(&self) -> Result<ComparisonTable> {
        let path = &self.config.season_path;
        let players = SeasonLoader::load_file(path)
            .with_context(|| format!("cannot load season dataset '{}'", path.display()))?;
        BatchComparator::new(&self.estimator)
            .compare(&players)
            .context("salary comparison failed")
    }
}

/// Which rows of the comparison table to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareQuery {
    All,
    Player(String),
    Filter(String),
}

impl From<&CompareArgs> for CompareQuery {
    fn from(args: &CompareArgs) -> Self {
        match (&args.player, &args.filter) {
            (Some(name), _) => Self::Player(name.clone()),
            (None, Some(pattern)) => Self::Filter(pattern.clone()),
            (None, None) => Self::All,
        }
    }
}

pub fn run_estimate<W: Write>(
    session: &Session,
    features: &FeatureVector,
    out: &mut W,
) -> Result<()> {
    let (log_salary, estimate) = session.estimator.estimate_with_log(features)?;

    writeln!(out, "{}", views::render_features(features))?;
    writeln!(out, "Log-salary prediction: {log_salary:.4}")?;
    writeln!(out, "Predicted Player Salary: {}", format_currency(estimate.amount()))?;
    Ok(())
}

/// Print the selected comparisons and optionally export them.
///
/// Returns the number of rows shown. An unknown player name shows nothing
/// and is not an error.
pub fn run_compare<W: Write>(
    session: &Session,
    query: &CompareQuery,
    export: Option<&Path>,
    out: &mut W,
) -> Result<usize> {
    let table = session.comparisons()?;

    let selected: Vec<&PlayerComparison> = match query {
        CompareQuery::All => table.rows().iter().collect(),
        CompareQuery::Player(name) => match table.lookup(name) {
            Ok(row) => vec![row],
            Err(CompareError::NotFound(name)) => {
                writeln!(out, "No player named '{name}' in the season dataset.")?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        },
        CompareQuery::Filter(pattern) => table
            .filter(pattern)
            .with_context(|| format!("invalid player filter '{pattern}'"))?,
    };

    if !selected.is_empty() {
        write!(out, "{}", views::render_comparisons(&selected))?;
    }

    if let Some(path) = export {
        let file = File::create(path)
            .with_context(|| format!("cannot create export file '{}'", path.display()))?;
        let written = export_comparisons(selected.iter().copied(), BufWriter::new(file))
            .with_context(|| format!("cannot write export file '{}'", path.display()))?;
        info!(path = %path.display(), rows = written, "exported comparisons");
        writeln!(out, "Exported {written} rows to {}", path.display())?;
    }

    Ok(selected.len())
}

pub fn run_players<W: Write>(
    session: &Session,
    out: &mut W,
) -> Result<()> {
    let table = session.comparisons()?;
    for name in table.names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

/// Dataset exploration needs no model, only the batting file.
pub fn run_dataset<W: Write>(
    config: &AppConfig,
    action: &DatasetCommand,
    out: &mut W,
) -> Result<()> {
    let path = &config.batting_path;
    let table = BattingTable::load_file(path)
        .with_context(|| format!("cannot load batting dataset '{}'", path.display()))?;

    match action {
        DatasetCommand::View { limit } => {
            write!(out, "{}", views::render_batting(&table, *limit))?;
        }
        DatasetCommand::Describe => {
            write!(out, "{}", views::render_summary(&describe(&table)))?;
        }
        DatasetCommand::Export { output } => {
            let file = File::create(output)
                .with_context(|| format!("cannot create '{}'", output.display()))?;
            let rows = export_table(&table, BufWriter::new(file))
                .with_context(|| format!("cannot write '{}'", output.display()))?;
            writeln!(out, "Exported {rows} rows to {}", output.display())?;
        }
    }
    Ok(())
}

/// Route a parsed command to its handler.
pub fn dispatch<W: Write>(
    config: AppConfig,
    command: &Command,
    out: &mut W,
) -> Result<()> {
    if let Command::Dataset { action } = command {
        return run_dataset(&config, action, out);
    }

    let session = Session::open(config)?;
    debug!(kind = session.estimator().model().kind(), "session ready");

    match command {
        Command::Estimate(args) => run_estimate(&session, &args.to_features(), out),
        Command::Compare(args) => {
            run_compare(&session, &CompareQuery::from(args), args.export.as_deref(), out)
                .map(|_| ())
        }
        Command::Players => run_players(&session, out),
        Command::Dataset { action } => run_dataset(session.config(), action, out),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use salary_core::{FEATURE_COUNT, FEATURE_NAMES, SalaryModel};

    use super::*;

    /// Constant log salary that counts how often it is evaluated.
    #[derive(Debug)]
    struct CountingModel {
        features: Vec<String>,
        calls: Arc<AtomicUsize>,
    }

    impl SalaryModel for CountingModel {
        fn kind(&self) -> &'static str {
            "counting"
        }

        fn features(&self) -> &[String] {
            &self.features
        }

        fn predict_log(
            &self,
            _row: &[f64; FEATURE_COUNT],
        ) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            13.0
        }
    }

    #[test]
    fn run_estimate_evaluates_model_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = CountingModel {
            features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            calls: Arc::clone(&calls),
        };
        let estimator = SalaryEstimator::new(Box::new(model)).unwrap();
        let session = Session::with_estimator(AppConfig::default(), estimator);
        let features = FeatureVector {
            salary_difference: 0.0,
            age: 0.0,
            hits: 0.0,
            runs: 0.0,
            rbi: 0.0,
            walks: 0.0,
            strikeouts: 0.0,
            stolen_bases: 0.0,
            ops: 0.0,
        };
        let mut out = Vec::new();

        run_estimate(&session, &features, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(text.contains("Log-salary prediction: 13.0000"), "{text}");
        assert!(text.contains("Predicted Player Salary: $442,413"), "{text}");
    }

    #[test]
    fn player_takes_precedence_in_query() {
        let args = CompareArgs {
            player: Some("Aaron Judge".to_string()),
            filter: None,
            export: None,
        };

        assert_eq!(CompareQuery::from(&args), CompareQuery::Player("Aaron Judge".to_string()));
    }

    #[test]
    fn no_selection_means_all_rows() {
        let args = CompareArgs {
            player: None,
            filter: None,
            export: None,
        };

        assert_eq!(CompareQuery::from(&args), CompareQuery::All);
    }

    #[test]
    fn missing_model_is_reported_with_path() {
        let config = AppConfig {
            model_path: "/no/such/model.json".into(),
            ..AppConfig::default()
        };

        let err = Session::open(config).expect_err("missing model must fail");

        assert!(err.to_string().contains("/no/such/model.json"), "{err}");
    }
}
