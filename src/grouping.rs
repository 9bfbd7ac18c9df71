//
// grouping.rs
// dicom-anonymizer
//
// Merges leaf directories into per-patient records by reading one
// representative image per directory and comparing its PatientID.
//

use std::path::{Path, PathBuf};

use dicom::object::open_file;
use tracing::warn;
use walkdir::WalkDir;

use crate::catalog::is_imaging_file;
use crate::dicom_access::{ElementAccess, IdentifyingField};
use crate::model::{Patient, PatientIdentity};

/// List the imaging files directly inside `directory`, raw listing order.
pub fn imaging_files(directory: &Path) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| is_imaging_file(p))
        .collect()
}

/// Group leaf directories into patients. The first image of each directory
/// is taken as representative; directories sharing a PatientID merge into
/// one patient, and the first occurrence of a key wins (identifying fields
/// are not re-read for later directories). Unreadable directories or files
/// are skipped with a warning and contribute no patient.
pub fn group(leaf_directories: &[PathBuf]) -> Vec<Patient> {
    let mut patients: Vec<Patient> = Vec::new();

    for directory in leaf_directories {
        let files = imaging_files(directory);
        let Some(representative) = files.first() else {
            warn!("no imaging files in {}, skipping", directory.display());
            continue;
        };

        let obj = match open_file(representative) {
            Ok(obj) => obj,
            Err(err) => {
                warn!("could not open {}: {}", representative.display(), err);
                continue;
            }
        };

        let key = obj.element_str(IdentifyingField::PatientId.tag());
        match patients
            .iter_mut()
            .find(|p| p.identity.patient_id.as_deref() == key.as_deref())
        {
            Some(existing) => existing.add_directory(directory.clone()),
            None => patients.push(Patient::new(
                PatientIdentity::from_object(&obj),
                directory.clone(),
            )),
        }
    }

    patients
}
