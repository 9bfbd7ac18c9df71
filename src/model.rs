//
// model.rs
// dicom-anonymizer
//
// Data structures shared across the pipeline: the typed identifying-field
// record read from a representative image, and the per-patient bookkeeping
// that drives scrubbing and the conversion table.
//

use std::path::PathBuf;

use dicom::object::DefaultDicomObject;

use crate::dicom_access::{ElementAccess, IdentifyingField};

/// The identifying attributes of one patient, read once from the first
/// image of the first directory encountered for that patient. Any field
/// may be absent from the source file.
#[derive(Debug, Clone, Default)]
pub struct PatientIdentity {
    pub patient_name: Option<String>,
    pub patient_id: Option<String>,
    pub patient_birth_date: Option<String>,
    pub patient_sex: Option<String>,
    pub patient_age: Option<String>,
    pub acquisition_date: Option<String>,
    pub series_date: Option<String>,
    pub study_date: Option<String>,
    pub content_date: Option<String>,
    pub study_time: Option<String>,
    pub series_time: Option<String>,
    pub acquisition_time: Option<String>,
    pub content_time: Option<String>,
    pub accession_number: Option<String>,
    pub referring_physician_name: Option<String>,
}

impl PatientIdentity {
    pub fn from_object(obj: &DefaultDicomObject) -> Self {
        let read = |field: IdentifyingField| obj.element_str(field.tag());
        PatientIdentity {
            patient_name: read(IdentifyingField::PatientName),
            patient_id: read(IdentifyingField::PatientId),
            patient_birth_date: read(IdentifyingField::PatientBirthDate),
            patient_sex: read(IdentifyingField::PatientSex),
            patient_age: read(IdentifyingField::PatientAge),
            acquisition_date: read(IdentifyingField::AcquisitionDate),
            series_date: read(IdentifyingField::SeriesDate),
            study_date: read(IdentifyingField::StudyDate),
            content_date: read(IdentifyingField::ContentDate),
            study_time: read(IdentifyingField::StudyTime),
            series_time: read(IdentifyingField::SeriesTime),
            acquisition_time: read(IdentifyingField::AcquisitionTime),
            content_time: read(IdentifyingField::ContentTime),
            accession_number: read(IdentifyingField::AccessionNumber),
            referring_physician_name: read(IdentifyingField::ReferringPhysicianName),
        }
    }

    pub fn get(&self, field: IdentifyingField) -> Option<&str> {
        match field {
            IdentifyingField::PatientName => self.patient_name.as_deref(),
            IdentifyingField::PatientId => self.patient_id.as_deref(),
            IdentifyingField::PatientBirthDate => self.patient_birth_date.as_deref(),
            IdentifyingField::PatientSex => self.patient_sex.as_deref(),
            IdentifyingField::PatientAge => self.patient_age.as_deref(),
            IdentifyingField::AcquisitionDate => self.acquisition_date.as_deref(),
            IdentifyingField::SeriesDate => self.series_date.as_deref(),
            IdentifyingField::StudyDate => self.study_date.as_deref(),
            IdentifyingField::ContentDate => self.content_date.as_deref(),
            IdentifyingField::StudyTime => self.study_time.as_deref(),
            IdentifyingField::SeriesTime => self.series_time.as_deref(),
            IdentifyingField::AcquisitionTime => self.acquisition_time.as_deref(),
            IdentifyingField::ContentTime => self.content_time.as_deref(),
            IdentifyingField::AccessionNumber => self.accession_number.as_deref(),
            IdentifyingField::ReferringPhysicianName => self.referring_physician_name.as_deref(),
        }
    }

    /// Family-name component of the Person Name value ("Family^Given^...").
    pub fn family_name(&self) -> Option<&str> {
        self.patient_name
            .as_deref()
            .and_then(|name| name.split('^').next())
            .filter(|part| !part.is_empty())
    }

    /// Given-name component of the Person Name value.
    pub fn given_name(&self) -> Option<&str> {
        self.patient_name
            .as_deref()
            .and_then(|name| name.split('^').nth(1))
            .filter(|part| !part.is_empty())
    }
}

/// One real-world patient: identity plus the leaf directories that hold
/// their images. `source_directories` and `destination_directories` are
/// always the same length and positionally correspond.
#[derive(Debug, Clone)]
pub struct Patient {
    pub identity: PatientIdentity,
    pub source_directories: Vec<PathBuf>,
    pub destination_directories: Vec<PathBuf>,
    /// Surrogate id as a decimal string; empty until assignment.
    pub anonymized_id: String,
}

impl Patient {
    pub fn new(identity: PatientIdentity, directory: PathBuf) -> Self {
        Patient {
            identity,
            source_directories: vec![directory.clone()],
            destination_directories: vec![directory],
            anonymized_id: String::new(),
        }
    }

    /// Attach one more leaf directory to this patient, keeping the
    /// source/destination sequences parallel.
    pub fn add_directory(&mut self, directory: PathBuf) {
        self.source_directories.push(directory.clone());
        self.destination_directories.push(directory);
    }
}
