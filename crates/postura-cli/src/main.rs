//! postura - Yoga practice risk prediction CLI
//!
//! Usage:
//!   postura train data.csv                      # Train and report accuracy
//!   postura predict data.csv -i Age=25 ...      # Train, then classify one record
//!   postura poses                               # List poses with precaution text

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod output;

use commands::{poses, predict, train};

/// postura - yoga practice risk prediction
///
/// Train a risk classifier on a practitioner dataset and classify new
/// records from the command line.
#[derive(Parser)]
#[command(name = "postura")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on a CSV dataset and report held-out accuracy
    Train {
        /// Path to the CSV dataset
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of trees in the forest
        #[arg(long, default_value = "100")]
        trees: usize,

        /// Random seed for the split and the forest
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Preview rows to print
        #[arg(long, default_value = "5")]
        preview: usize,
    },

    /// Train, then classify a single record given as KEY=VALUE fields
    Predict {
        /// Path to the CSV dataset
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field value, e.g. -i "Age=25" -i "Pose=Tree Pose" (repeatable)
        #[arg(short, long = "input", value_name = "KEY=VALUE")]
        inputs: Vec<String>,

        /// Number of trees in the forest
        #[arg(long, default_value = "100")]
        trees: usize,

        /// Random seed for the split and the forest
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// List the poses in the precaution table
    Poses,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(cli: Cli) -> error::Result<()> {
    match cli.command {
        Commands::Train {
            file,
            trees,
            seed,
            preview,
        } => train::run(&file, trees, seed, preview),
        Commands::Predict {
            file,
            inputs,
            trees,
            seed,
        } => predict::run(&file, &inputs, trees, seed),
        Commands::Poses => poses::run(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
