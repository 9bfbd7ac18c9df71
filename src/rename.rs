//
// rename.rs
// dicom-anonymizer
//
// Directory-name rewriting. The input hierarchy encodes identity in
// human-readable folder names at two nesting levels (a patient-named
// folder and a study subfolder), so the substitution runs per segment
// with different rules rather than as a whole-path replace.
//

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;

use crate::model::PatientIdentity;

/// Date-shaped token as it appears in study folder names.
fn date_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("_[0-9]{4}-[0-9]{2}-[0-9]{2}_").expect("valid date pattern"))
}

/// Rewrites the two trailing path segments of a patient's directory so
/// that folder names no longer carry the patient's name or study date.
/// Segments are lower-cased before substitution, so rewritten segments
/// come out lower-cased.
pub struct SegmentRewriter {
    family: Option<String>,
    given: Option<String>,
    anonymized_id: String,
    /// Name components anchored to a `^` separator or end-of-segment, so
    /// a match never eats the head of a longer unrelated token.
    anchored_family: Option<Regex>,
    anchored_given: Option<Regex>,
}

fn anchored(name: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"{}(\^|$)", regex::escape(name)))?)
}

impl SegmentRewriter {
    pub fn new(identity: &PatientIdentity, anonymized_id: &str) -> Result<Self> {
        let family = identity.family_name().map(|s| s.to_lowercase());
        let given = identity.given_name().map(|s| s.to_lowercase());
        let anchored_family = family.as_deref().map(anchored).transpose()?;
        let anchored_given = given.as_deref().map(anchored).transpose()?;
        Ok(SegmentRewriter {
            family,
            given,
            anonymized_id: anonymized_id.to_string(),
            anchored_family,
            anchored_given,
        })
    }

    /// Last segment (the image directory): unanchored family and given
    /// name replacement, then the `_YYYY-MM-DD_` date token.
    pub fn rewrite_image_segment(&self, segment: &str) -> String {
        let mut out = segment.to_lowercase();
        if let Some(family) = &self.family {
            out = out.replace(family.as_str(), &self.anonymized_id);
        }
        if let Some(given) = &self.given {
            out = out.replace(given.as_str(), &self.anonymized_id);
        }
        date_token()
            .replace_all(&out, format!("_{}_", self.anonymized_id).as_str())
            .into_owned()
    }

    /// Second-to-last segment (the patient directory): name components
    /// replaced only where anchored, keeping the `^` separator.
    pub fn rewrite_study_segment(&self, segment: &str) -> String {
        let mut out = segment.to_lowercase();
        let replacement = format!("{}${{1}}", self.anonymized_id);
        for re in [&self.anchored_family, &self.anchored_given].into_iter().flatten() {
            out = re.replace_all(&out, replacement.as_str()).into_owned();
        }
        out
    }

    /// Recompose the destination directory for one source leaf under the
    /// output root: rewritten patient segment / rewritten image segment.
    pub fn rewrite_destination(&self, output_root: &Path, destination: &Path) -> PathBuf {
        let image_segment = destination
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let study_segment = destination
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let mut out = output_root.to_path_buf();
        if !study_segment.is_empty() {
            out.push(self.rewrite_study_segment(study_segment));
        }
        out.push(self.rewrite_image_segment(image_segment));
        out
    }
}
