//
// anonymizer.rs
// dicom-anonymizer
//
// Top-level pipeline: discover leaf directories, group them into
// patients, assign surrogate ids, scrub/relocate every image, then write
// the conversion table last so it reflects the final patient set.
//

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::engine::{self, EngineOptions};
use crate::pool::{choose_pool_kind, run_units, DEFAULT_POOL_THRESHOLD};
use crate::{catalog, grouping, ids, table};

/// Built once at the top level and passed down; the pipeline never reads
/// ambient working-directory state itself.
#[derive(Debug, Clone)]
pub struct AnonymizerConfig {
    pub input_directory: PathBuf,
    pub output_directory: PathBuf,
    pub parallel: bool,
    pub pool_threshold: usize,
    pub only_rename_destination: bool,
}

impl AnonymizerConfig {
    pub fn new(input_directory: PathBuf, output_directory: PathBuf, parallel: bool) -> Self {
        AnonymizerConfig {
            input_directory,
            output_directory,
            parallel,
            pool_threshold: DEFAULT_POOL_THRESHOLD,
            only_rename_destination: false,
        }
    }
}

/// Run the whole anonymization pipeline. Per-file and per-directory
/// failures are logged and skipped (best-effort batch semantics); only
/// failing to create the output root aborts the run.
pub fn anonymize(config: &AnonymizerConfig) -> Result<()> {
    fs::create_dir_all(&config.output_directory).with_context(|| {
        format!(
            "Falha ao criar diretório de saída {}",
            config.output_directory.display()
        )
    })?;

    let leaves = catalog::discover(&config.input_directory);
    let mut patients = grouping::group(&leaves);
    ids::assign(&mut patients);
    info!(
        "{} patients across {} directories",
        patients.len(),
        leaves.len()
    );

    let options = EngineOptions {
        parallel: config.parallel,
        pool_threshold: config.pool_threshold,
        only_rename_destination: config.only_rename_destination,
    };
    let kind = choose_pool_kind(patients.len(), config.parallel, config.pool_threshold);
    run_units(kind, &patients, |patient| {
        if let Err(err) = engine::anonymize_patient(&config.output_directory, patient, &options) {
            warn!(
                "patient {} finished with errors: {:#}",
                patient.anonymized_id, err
            );
        }
    });

    // The table is written last and is the only reversible record; a name
    // collision aborts the table write but never rolls back the scrub.
    match table::write_conversion_table(&config.output_directory, &patients) {
        Ok(path) => info!("conversion table written to {}", path.display()),
        Err(err) => error!("{}", err),
    }

    Ok(())
}
