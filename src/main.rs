use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use selective_predictor::config::{InputMarkMode, JobConfig};
use selective_predictor::data::loader;
use selective_predictor::job;
use selective_predictor::sheet::CsvSheet;

#[derive(Parser)]
#[command(name = "selective-predictor")]
#[command(about = "Weighted marks and selective score predictions for a student sheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correlations, weights, weighted marks and a prediction, written back to the sheet
    Run {
        /// Sheet CSV file (row 1 is the header)
        #[arg(long)]
        sheet: PathBuf,

        /// JSON job config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Which input marks feed the prediction: "corrected" or "literal"
        #[arg(long)]
        input_mode: Option<InputMarkMode>,

        /// Compute everything but leave the sheet file untouched
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Fit the Mark column alone and write to fixed cells
    Simple {
        /// Sheet CSV file (row 1 is the header)
        #[arg(long)]
        sheet: PathBuf,

        /// JSON job config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Compute everything but leave the sheet file untouched
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Print the weighted report for a records file as JSON
    Stats {
        /// Records file (.csv or .json)
        #[arg(long)]
        records: PathBuf,

        /// New student's English, Math and GA marks
        #[arg(long, num_args = 3, value_names = ["ENGLISH", "MATH", "GA"])]
        input: Option<Vec<f64>>,

        /// Which input marks feed the prediction: "corrected" or "literal"
        #[arg(long, default_value = "corrected")]
        input_mode: InputMarkMode,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            sheet,
            config,
            input_mode,
            dry_run,
        } => {
            let mut config = JobConfig::load(config.as_deref())?;
            if let Some(mode) = input_mode {
                config.input_mode = mode;
            }

            let mut store = CsvSheet::open(&sheet)?;
            let report = job::run_weighted(&mut store, &config)?;
            finish(&store, &sheet, dry_run)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Simple {
            sheet,
            config,
            dry_run,
        } => {
            let config = JobConfig::load(config.as_deref())?;

            let mut store = CsvSheet::open(&sheet)?;
            let report = job::run_simple(&mut store, &config)?;
            finish(&store, &sheet, dry_run)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Stats {
            records,
            input,
            input_mode,
        } => {
            let dataset = loader::load_file(&records)?;
            let input = input
                .map(|marks| <[f64; 3]>::try_from(marks.as_slice()))
                .transpose()
                .context("--input takes exactly three marks")?;

            let report = job::compute_report(&dataset, input, input_mode)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Persist the sheet only once the whole run has succeeded.
fn finish(store: &CsvSheet, path: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        info!("dry run: {} left unchanged", path.display());
        return Ok(());
    }
    store.save()
}
