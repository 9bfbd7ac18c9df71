use dicom::core::value::PrimitiveValue;
use dicom::core::{DataElement, Tag};
use dicom::object::DefaultDicomObject;

/// The fixed set of identifying attributes that get scrubbed from every
/// image and recorded in the conversion table, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifyingField {
    PatientName,
    PatientId,
    PatientBirthDate,
    PatientSex,
    PatientAge,
    AcquisitionDate,
    SeriesDate,
    StudyDate,
    ContentDate,
    StudyTime,
    SeriesTime,
    AcquisitionTime,
    ContentTime,
    AccessionNumber,
    ReferringPhysicianName,
}

impl IdentifyingField {
    pub const ALL: [IdentifyingField; 15] = [
        IdentifyingField::PatientName,
        IdentifyingField::PatientId,
        IdentifyingField::PatientBirthDate,
        IdentifyingField::PatientSex,
        IdentifyingField::PatientAge,
        IdentifyingField::AcquisitionDate,
        IdentifyingField::SeriesDate,
        IdentifyingField::StudyDate,
        IdentifyingField::ContentDate,
        IdentifyingField::StudyTime,
        IdentifyingField::SeriesTime,
        IdentifyingField::AcquisitionTime,
        IdentifyingField::ContentTime,
        IdentifyingField::AccessionNumber,
        IdentifyingField::ReferringPhysicianName,
    ];

    pub fn tag(self) -> Tag {
        match self {
            IdentifyingField::PatientName => Tag(0x0010, 0x0010),
            IdentifyingField::PatientId => Tag(0x0010, 0x0020),
            IdentifyingField::PatientBirthDate => Tag(0x0010, 0x0030),
            IdentifyingField::PatientSex => Tag(0x0010, 0x0040),
            IdentifyingField::PatientAge => Tag(0x0010, 0x1010),
            IdentifyingField::AcquisitionDate => Tag(0x0008, 0x0022),
            IdentifyingField::SeriesDate => Tag(0x0008, 0x0021),
            IdentifyingField::StudyDate => Tag(0x0008, 0x0020),
            IdentifyingField::ContentDate => Tag(0x0008, 0x0023),
            IdentifyingField::StudyTime => Tag(0x0008, 0x0030),
            IdentifyingField::SeriesTime => Tag(0x0008, 0x0031),
            IdentifyingField::AcquisitionTime => Tag(0x0008, 0x0032),
            IdentifyingField::ContentTime => Tag(0x0008, 0x0033),
            IdentifyingField::AccessionNumber => Tag(0x0008, 0x0050),
            IdentifyingField::ReferringPhysicianName => Tag(0x0008, 0x0090),
        }
    }

    /// The DICOM keyword, also used as the conversion-table column header.
    pub fn keyword(self) -> &'static str {
        match self {
            IdentifyingField::PatientName => "PatientName",
            IdentifyingField::PatientId => "PatientID",
            IdentifyingField::PatientBirthDate => "PatientBirthDate",
            IdentifyingField::PatientSex => "PatientSex",
            IdentifyingField::PatientAge => "PatientAge",
            IdentifyingField::AcquisitionDate => "AcquisitionDate",
            IdentifyingField::SeriesDate => "SeriesDate",
            IdentifyingField::StudyDate => "StudyDate",
            IdentifyingField::ContentDate => "ContentDate",
            IdentifyingField::StudyTime => "StudyTime",
            IdentifyingField::SeriesTime => "SeriesTime",
            IdentifyingField::AcquisitionTime => "AcquisitionTime",
            IdentifyingField::ContentTime => "ContentTime",
            IdentifyingField::AccessionNumber => "AccessionNumber",
            IdentifyingField::ReferringPhysicianName => "ReferringPhysicianName",
        }
    }
}

/// Small helper trait to pull string values out of a DICOM object.
pub trait ElementAccess {
    fn element_str(&self, tag: Tag) -> Option<String>;
    fn has_element(&self, tag: Tag) -> bool;
}

impl ElementAccess for DefaultDicomObject {
    fn element_str(&self, tag: Tag) -> Option<String> {
        self.element(tag)
            .ok()
            .and_then(|e| e.to_str().ok())
            .map(|s| s.trim().to_string())
    }

    fn has_element(&self, tag: Tag) -> bool {
        self.element(tag).is_ok()
    }
}

/// Overwrite one identifying field with the given value, keeping the
/// element's original VR. A field absent from this particular file is
/// skipped: not every file in a series carries every attribute.
pub fn overwrite_if_present(
    obj: &mut DefaultDicomObject,
    field: IdentifyingField,
    value: &str,
) -> bool {
    let tag = field.tag();
    let vr = match obj.element(tag) {
        Ok(element) => element.vr(),
        Err(_) => return false,
    };
    obj.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
    true
}
