//
// cli.rs
// dicom-anonymizer
//
// Defines the CLI surface with Clap and drives the anonymization
// pipeline from the parsed flags.
//

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use crate::anonymizer::{self, AnonymizerConfig};

/// Command-line interface glue code: flags are resolved into an explicit
/// configuration before any work starts.
#[derive(Parser)]
#[command(name = "dicom-anonymizer")]
#[command(about = "Anonimizador de árvores DICOM em Rust", long_about = None)]
pub struct Cli {
    /// Directory containing the patient tree to anonymize
    #[arg(short = 'i', long = "input_directory", default_value = ".")]
    pub input_directory: PathBuf,

    /// Destination for the anonymized tree (defaults to the input directory)
    #[arg(short = 'o', long = "output_directory")]
    pub output_directory: Option<PathBuf>,

    /// Disable all pooling and process everything on the current thread
    #[arg(short = 's', long = "single_thread")]
    pub single_thread: bool,
}

pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let output_directory = cli
        .output_directory
        .unwrap_or_else(|| cli.input_directory.clone());
    let config = AnonymizerConfig::new(cli.input_directory, output_directory, !cli.single_thread);

    let start = Instant::now();
    anonymizer::anonymize(&config)?;
    println!("Concluído em {:.2?}", start.elapsed());

    Ok(())
}
