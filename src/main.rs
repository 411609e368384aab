//! A/B calculator CLI - main entry point
//!
//! Loads a scenario file, runs the engine, and renders the result as a
//! text report, JSON, or CSV.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ab_calculator::{analyze, report, validation, EngineConfig, Scenario};

#[derive(Parser)]
#[command(name = "ab_calculator")]
#[command(about = "A/B Test ROI Calculator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a scenario file and render the result
    Analyze {
        /// Scenario file (YAML or JSON)
        scenario: PathBuf,

        /// Output format: table | json | csv
        #[arg(long, default_value = "table")]
        format: String,

        /// Optional output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sample size a test should reach before a confident call
        #[arg(long, env = "AB_REQUIRED_SAMPLE_SIZE")]
        required_sample_size: Option<u64>,
    },

    /// Validate a scenario file without computing results
    Validate {
        /// Scenario file (YAML or JSON)
        scenario: PathBuf,
    },

    /// Print a starter scenario in YAML
    Template {
        /// Optional output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Load .env for local development
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("ab_calculator=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            scenario,
            format,
            output,
            required_sample_size,
        } => {
            let scenario = Scenario::load_from_file(&scenario)
                .with_context(|| format!("failed to load {}", scenario.display()))?;

            let mut config = EngineConfig::from_env();
            if let Some(required) = required_sample_size {
                config = config.with_required_sample_size(required);
            }

            let analysis = analyze(&scenario.metrics, &scenario.variants, &config)?;

            let rendered = match format.as_str() {
                "table" => report::render_report(&analysis),
                "json" => report::to_json(&analysis)?,
                "csv" => {
                    let mut buffer = Vec::new();
                    report::write_csv(&analysis, &mut buffer)?;
                    String::from_utf8(buffer).context("CSV output was not valid UTF-8")?
                }
                other => anyhow::bail!("unknown format: {} (use table, json or csv)", other),
            };

            write_output(&rendered, output.as_deref())?;
        }

        Commands::Validate { scenario } => {
            let scenario = Scenario::load_from_file(&scenario)
                .with_context(|| format!("failed to load {}", scenario.display()))?;

            let errors = validation::validate(&scenario.metrics, &scenario.variants);
            if errors.is_empty() {
                println!("Scenario is valid ({} variants)", scenario.variants.len());
            } else {
                for error in &errors {
                    eprintln!("{}", error);
                }
                anyhow::bail!("scenario failed validation with {} error(s)", errors.len());
            }
        }

        Commands::Template { output } => {
            let yaml = Scenario::template().to_yaml()?;
            write_output(&yaml, output.as_deref())?;
        }
    }

    Ok(())
}

fn write_output(content: &str, output: Option<&std::path::Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Written to {}", path.display());
        }
        None => {
            use io::Write;
            io::stdout().write_all(content.as_bytes())?;
        }
    }
    Ok(())
}
