use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use salary_core::FeatureVector;

use crate::config::ConfigOverrides;

/// Estimate what an MLB hitter should be paid from their batting line.
///
/// Loads a pre-fitted log-salary regression model and a season dataset,
/// then predicts single salaries, compares predictions with actual
/// salaries, or explores the basic batting dataset.
#[derive(Debug, Parser)]
#[command(name = "salary-estimator", version)]
pub struct Cli {
    /// Configuration file (defaults to `salary.toml` when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model artifact (JSON).
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Season dataset with actual salaries (CSV).
    #[arg(long, global = true)]
    pub season: Option<PathBuf>,

    /// Basic batting dataset for exploration (CSV).
    #[arg(long, global = true)]
    pub batting: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `info,salary_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model_path: self.model.clone(),
            season_path: self.season.clone(),
            batting_path: self.batting.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict one player's salary from their statistics.
    Estimate(EstimateArgs),

    /// Compare predicted and actual salaries for the season.
    Compare(CompareArgs),

    /// List the players in the season dataset.
    Players,

    /// Explore the basic batting dataset.
    Dataset {
        #[command(subcommand)]
        action: DatasetCommand,
    },
}

/// Defaults and bounds follow the input ranges the model was built for.
#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    /// Average increase/decrease of salary across the player's career, in dollars.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub salary_difference: f64,

    #[arg(long, default_value_t = 27, value_parser = clap::value_parser!(u32).range(18..=50))]
    pub age: u32,

    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(0..=250))]
    pub hits: u32,

    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(0..=200))]
    pub runs: u32,

    /// Runs batted in.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(0..=200))]
    pub rbi: u32,

    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(0..=250))]
    pub walks: u32,

    #[arg(long, default_value_t = 75, value_parser = clap::value_parser!(u32).range(0..=250))]
    pub strikeouts: u32,

    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub stolen_bases: u32,

    /// On-base plus slugging.
    #[arg(long, default_value_t = 0.0)]
    pub ops: f64,
}

impl EstimateArgs {
    pub fn to_features(&self) -> FeatureVector {
        FeatureVector {
            salary_difference: self.salary_difference,
            age: f64::from(self.age),
            hits: f64::from(self.hits),
            runs: f64::from(self.runs),
            rbi: f64::from(self.rbi),
            walks: f64::from(self.walks),
            strikeouts: f64::from(self.strikeouts),
            stolen_bases: f64::from(self.stolen_bases),
            ops: self.ops,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    /// Show a single player by exact name.
    #[arg(long, conflicts_with = "filter")]
    pub player: Option<String>,

    /// Show players whose name matches this case-insensitive regex.
    #[arg(long)]
    pub filter: Option<String>,

    /// Also write the shown rows to this CSV file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DatasetCommand {
    /// Print the dataset.
    View {
        /// Print at most this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Count, mean, std, min, quartiles and max of every numeric column.
    Describe,

    /// Write the dataset to a CSV file.
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn estimate_args(args: &[&str]) -> Result<EstimateArgs, clap::Error> {
        let cli = Cli::try_parse_from(["salary-estimator", "estimate"].iter().chain(args))?;
        match cli.command {
            Command::Estimate(args) => Ok(args),
            other => panic!("expected estimate, got {other:?}"),
        }
    }

    #[test]
    fn estimate_defaults_match_input_form() {
        let features = estimate_args(&[]).unwrap().to_features();

        assert_eq!(
            features,
            FeatureVector {
                salary_difference: 0.0,
                age: 27.0,
                hits: 100.0,
                runs: 50.0,
                rbi: 60.0,
                walks: 60.0,
                strikeouts: 75.0,
                stolen_bases: 12.0,
                ops: 0.0,
            }
        );
    }

    #[test]
    fn estimate_accepts_negative_salary_difference() {
        let args = estimate_args(&["--salary-difference", "-1500000", "--ops", "0.8"]).unwrap();

        assert_eq!(args.salary_difference, -1_500_000.0);
        assert_eq!(args.ops, 0.8);
    }

    #[test]
    fn estimate_rejects_age_outside_bounds() {
        assert!(estimate_args(&["--age", "17"]).is_err());
        assert!(estimate_args(&["--age", "51"]).is_err());
        assert!(estimate_args(&["--age", "50"]).is_ok());
    }

    #[test]
    fn estimate_rejects_stolen_bases_above_bound() {
        assert!(estimate_args(&["--stolen-bases", "101"]).is_err());
    }

    #[test]
    fn estimate_rejects_non_numeric_input() {
        assert!(estimate_args(&["--hits", "lots"]).is_err());
    }

    #[test]
    fn compare_player_conflicts_with_filter() {
        let result = Cli::try_parse_from([
            "salary-estimator",
            "compare",
            "--player",
            "Aaron Judge",
            "--filter",
            "judge",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn global_paths_override_config() {
        let cli = Cli::try_parse_from([
            "salary-estimator",
            "players",
            "--season",
            "2023.csv",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.season_path, Some(PathBuf::from("2023.csv")));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(overrides.model_path, None);
    }

    #[test]
    fn dataset_export_requires_output() {
        assert!(Cli::try_parse_from(["salary-estimator", "dataset", "export"]).is_err());
    }
}
