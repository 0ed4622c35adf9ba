// scoremerge CLI - headless workbook score reconciliation.
//
// The binary is the "surrounding service": it owns files, argument checks
// and exit codes, and hands pre-loaded workbook values to the engine.

mod exit_codes;
mod merge;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

/// Error carrying an exit code from the registry plus an optional hint.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Parser)]
#[command(name = "scoremerge")]
#[command(about = "Reconcile batched attendance with extracted test scores")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge extracted scores into the overwrite workbook's scores sheet
    #[command(after_help = "\
Examples:
  scoremerge run roster.xlsx results.xlsx --column D
  scoremerge run roster.xlsx results.xlsx --column AB -o merged.xlsx --json
  scoremerge run roster.xlsx results.xlsx -c D --config merge.toml --report report.json")]
    Run {
        /// Workbook holding the attendance and test-scores sheets
        overwrite: PathBuf,

        /// Workbook holding the test-takers sheet with scores
        extract: PathBuf,

        /// Column letters to overwrite on the scores sheet (e.g. D)
        #[arg(long, short = 'c')]
        column: String,

        /// Where to write the merged workbook
        #[arg(long, short = 'o', default_value = "merged.xlsx")]
        output: PathBuf,

        /// Layout config (TOML); omit to use the standard layout
        #[arg(long, env = "SCOREMERGE_CONFIG")]
        config: Option<PathBuf>,

        /// Print the merge report as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the merge report JSON to a file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Validate a layout config without running
    #[command(after_help = "\
Examples:
  scoremerge validate merge.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            overwrite,
            extract,
            column,
            output,
            config,
            json,
            report,
        } => merge::cmd_run(overwrite, extract, column, output, config, json, report),
        Commands::Validate { config } => merge::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}
