//
// table.rs
// dicom-anonymizer
//
// Writes the reversible conversion table: one CSV row per patient mapping
// the surrogate id back to the original identifying fields. Never
// overwrites an existing table.
//

use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::dicom_access::IdentifyingField;
use crate::model::Patient;

pub const CONVERSION_TABLE_BASENAME: &str = "Anonymization";

#[derive(Debug, Error)]
pub enum TableWriteError {
    /// Both the base name and the timestamp-suffixed name already exist.
    #[error("cannot find a unique name for the conversion table in {0}")]
    NameCollision(PathBuf),
    #[error("could not write conversion table: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not write conversion table: {0}")]
    Io(#[from] std::io::Error),
}

/// Pick a table path that does not clobber a previous run's table:
/// the fixed base name if free, otherwise a second-granularity timestamp
/// suffix; if that also exists the write is aborted.
fn resolve_table_path(output_directory: &Path) -> Result<PathBuf, TableWriteError> {
    let base = output_directory.join(format!("{CONVERSION_TABLE_BASENAME}.csv"));
    if !base.exists() {
        return Ok(base);
    }
    let stamped = output_directory.join(format!(
        "{CONVERSION_TABLE_BASENAME}-{}.csv",
        Local::now().format("%Y%m%d%H%M%S")
    ));
    if stamped.exists() {
        return Err(TableWriteError::NameCollision(output_directory.to_path_buf()));
    }
    Ok(stamped)
}

/// Serialize the surrogate-id mapping for all patients, in patient-list
/// order. Header is `anonymized_id` followed by the identifying-field
/// keywords in their fixed order; absent values serialize empty.
pub fn write_conversion_table(
    output_directory: &Path,
    patients: &[Patient],
) -> Result<PathBuf, TableWriteError> {
    let path = resolve_table_path(output_directory)?;
    let mut writer = csv::Writer::from_path(&path)?;

    let mut header = vec!["anonymized_id"];
    header.extend(IdentifyingField::ALL.iter().map(|f| f.keyword()));
    writer.write_record(&header)?;

    for patient in patients {
        let mut row = vec![patient.anonymized_id.clone()];
        row.extend(
            IdentifyingField::ALL
                .iter()
                .map(|f| patient.identity.get(*f).unwrap_or_default().to_string()),
        );
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(path)
}
