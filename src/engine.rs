use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dicom::object::open_file;
use tracing::warn;

use crate::dicom_access::{overwrite_if_present, IdentifyingField};
use crate::grouping::imaging_files;
use crate::model::Patient;
use crate::pool::{choose_pool_kind, run_units};
use crate::rename::SegmentRewriter;

/// Per-call knobs for one anonymization run, threaded through both the
/// patient level and the image level.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub parallel: bool,
    pub pool_threshold: usize,
    /// Relocate files under rewritten directory names without touching
    /// the identifying fields inside them.
    pub only_rename_destination: bool,
}

/// Scrub and relocate every image of one patient. Each source directory
/// is listed, its images are rewritten in place (field values replaced
/// with the surrogate id) and saved under the rewritten destination
/// directory. One bad file is logged and skipped, never aborting the
/// patient's run.
pub fn anonymize_patient(
    output_root: &Path,
    patient: &Patient,
    options: &EngineOptions,
) -> Result<()> {
    let rewriter = SegmentRewriter::new(&patient.identity, &patient.anonymized_id)?;

    for (index, source_directory) in patient.source_directories.iter().enumerate() {
        let images = imaging_files(source_directory);
        let target_directory =
            rewriter.rewrite_destination(output_root, &patient.destination_directories[index]);

        let kind = choose_pool_kind(images.len(), options.parallel, options.pool_threshold);
        run_units(kind, &images, |image| {
            if let Err(err) = anonymize_image(image, &target_directory, patient, options) {
                warn!("skipping {}: {:#}", image.display(), err);
            }
        });
    }

    Ok(())
}

fn anonymize_image(
    image: &Path,
    target_directory: &Path,
    patient: &Patient,
    options: &EngineOptions,
) -> Result<()> {
    let mut obj = open_file(image).context("Falha ao abrir arquivo DICOM")?;

    if !options.only_rename_destination {
        for field in IdentifyingField::ALL {
            overwrite_if_present(&mut obj, field, &patient.anonymized_id);
        }
    }

    let file_name = image
        .file_name()
        .context("image path has no file name")?;
    // Concurrent units may race on overlapping parents; create_dir_all is
    // idempotent and must not fail when the directory already exists.
    fs::create_dir_all(target_directory)
        .with_context(|| format!("could not create {}", target_directory.display()))?;
    let output_path = target_directory.join(file_name);
    obj.write_to_file(&output_path)
        .with_context(|| format!("could not write {}", output_path.display()))?;

    Ok(())
}
