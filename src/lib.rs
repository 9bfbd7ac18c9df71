//
// lib.rs
// dicom-anonymizer
//
// Exposes the crate's modules and re-exports the pipeline entry points
// for both binary and library consumers.
//

pub mod anonymizer;
pub mod catalog;
pub mod cli;
pub mod dicom_access;
pub mod engine;
pub mod grouping;
pub mod ids;
pub mod model;
pub mod pool;
pub mod rename;
pub mod table;

pub use anonymizer::{anonymize, AnonymizerConfig};
pub use cli::{run as run_cli, Cli};
