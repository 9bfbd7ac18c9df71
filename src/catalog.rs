//
// catalog.rs
// dicom-anonymizer
//
// Walks the input tree and returns every leaf directory that directly
// contains DICOM files. Directories without images one level below the
// root are treated as study containers and searched one level deeper.
//

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Recognized imaging-file suffix. Recognition is by extension only,
/// never by content sniffing.
pub const IMAGING_EXTENSION: &str = "dcm";

pub fn is_imaging_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == IMAGING_EXTENSION)
}

/// List the entries of a directory, warning and returning `None` when it
/// cannot be read (not a directory, permission denied, ...).
fn list_entries(path: &Path) -> Option<Vec<PathBuf>> {
    match fs::read_dir(path) {
        Ok(entries) => Some(entries.filter_map(|e| e.ok()).map(|e| e.path()).collect()),
        Err(err) => {
            warn!("skipping {}: {}", path.display(), err);
            None
        }
    }
}

fn contains_imaging_files(entries: &[PathBuf]) -> bool {
    entries.iter().any(|p| is_imaging_file(p))
}

/// Discover every leaf directory under `root` that directly contains
/// imaging files. A child of the root holding images is a leaf itself;
/// otherwise it is taken as a study container and each of its own
/// subdirectories holding images is a leaf. Ordering follows the raw
/// directory-listing order and is unspecified.
pub fn discover(root: &Path) -> Vec<PathBuf> {
    let mut leaves = Vec::new();
    let Some(children) = list_entries(root) else {
        return leaves;
    };

    for child in children {
        let Some(grandchildren) = list_entries(&child) else {
            continue;
        };
        if contains_imaging_files(&grandchildren) {
            leaves.push(child);
        } else {
            for candidate in grandchildren {
                if let Some(files) = list_entries(&candidate) {
                    if contains_imaging_files(&files) {
                        leaves.push(candidate);
                    }
                }
            }
        }
    }

    leaves
}
