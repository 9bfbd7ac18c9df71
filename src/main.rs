//
// main.rs
// dicom-anonymizer
//
// Entry point that hands off execution to the CLI layer.
//

use dicom_anonymizer::cli;

fn main() -> anyhow::Result<()> {
    cli::run()
}
