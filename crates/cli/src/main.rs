// ChurnLens CLI - churn-risk scoring, headless

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use churnlens_cli::commands;
use churnlens_cli::exit_codes::EXIT_SUCCESS;
use churnlens_cli::profile::Preset;
use churnlens_cli::CliError;

#[derive(Parser)]
#[command(name = "churnlens")]
#[command(about = "Churn-risk scoring for partial customer profiles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single customer profile
    #[command(after_help = "\
Examples:
  churnlens predict --model churn_model.json --profile customer.toml
  churnlens predict --model churn_model.json --preset high-risk --json
  churnlens predict --model churn_model.json --profile customer.toml --output report.json
  churnlens predict --model churn_model.json --profile customer.toml --policy custom.policy.toml")]
    Predict {
        /// Path to the model artifact JSON
        #[arg(long)]
        model: PathBuf,

        /// Customer profile TOML
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Use a canned profile instead of --profile
        #[arg(long, value_enum)]
        preset: Option<Preset>,

        /// Reconciliation policy TOML (defaults to the built-in policy)
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Output the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// How many top churn predictors to include
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Score customer profiles from a CSV file
    #[command(after_help = "\
Headers are feature names; blank cells fall to the policy defaults; a
customer_id column labels rows.

Examples:
  churnlens batch --model churn_model.json --input customers.csv
  churnlens batch --model churn_model.json --input customers.csv --json
  churnlens batch --model churn_model.json --input customers.csv --output scored.json")]
    Batch {
        /// Path to the model artifact JSON
        #[arg(long)]
        model: PathBuf,

        /// CSV of customer profiles
        #[arg(long)]
        input: PathBuf,

        /// Reconciliation policy TOML (defaults to the built-in policy)
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Output the JSON report to stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON report to file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a reconciliation policy without scoring
    #[command(after_help = "\
Examples:
  churnlens validate --policy retention.policy.toml")]
    Validate {
        /// Path to the policy TOML file
        #[arg(long)]
        policy: PathBuf,
    },

    /// Show a model artifact's schema, classes, and top predictors
    #[command(after_help = "\
Examples:
  churnlens inspect --model churn_model.json
  churnlens inspect --model churn_model.json --top 5")]
    Inspect {
        /// Path to the model artifact JSON
        #[arg(long)]
        model: PathBuf,

        /// How many top churn predictors to show
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Predict { model, profile, preset, policy, json, output, top } => {
            commands::cmd_predict(model, profile, preset, policy, json, output, top)
        }
        Commands::Batch { model, input, policy, json, output } => {
            commands::cmd_batch(model, input, policy, json, output)
        }
        Commands::Validate { policy } => commands::cmd_validate(policy),
        Commands::Inspect { model, top } => commands::cmd_inspect(model, top),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
