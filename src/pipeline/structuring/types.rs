use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StructuringError;
use crate::config::SIGNATURE_PLACEHOLDER;

/// The four canonical note shapes a payload can be normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteFormat {
    Standard,
    Soap,
    Consultation,
    Prescription,
}

impl NoteFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Soap => "soap",
            Self::Consultation => "consultation",
            Self::Prescription => "prescription",
        }
    }
}

impl fmt::Display for NoteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteFormat {
    type Err = StructuringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "h&p" | "hp" | "history_and_physical" | "history and physical" => {
                Ok(Self::Standard)
            }
            "soap" => Ok(Self::Soap),
            "consultation" => Ok(Self::Consultation),
            "prescription" | "rx" => Ok(Self::Prescription),
            _ => Err(StructuringError::InvalidFormat(s.to_string())),
        }
    }
}

/// Canonical medication entry. Every field is always present as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicationRecord {
    pub generic_name: String,
    pub brand_name: String,
    pub strength: String,
    pub dosage_form: String,
    pub sig_instructions: String,
    pub quantity: String,
    pub refills: String,
    pub special_instructions: String,
}

/// History & physical note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardNote {
    pub chief_complaint: String,
    pub history_of_present_illness: String,
    pub past_medical_history: String,
    pub medications: String,
    pub allergies: String,
    pub physical_examination: String,
    pub assessment: String,
    pub plan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoapNote {
    pub subjective: String,
    pub objective: String,
    pub assessment: String,
    pub plan: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationNote {
    pub reason_for_consultation: String,
    pub history: String,
    pub findings: String,
    pub impression: String,
    pub recommendations: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInformation {
    pub name: String,
    pub sex: String,
    pub age: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriberInformation {
    pub name: String,
    pub license_number: String,
    pub signature: String,
}

impl Default for PrescriberInformation {
    fn default() -> Self {
        Self {
            name: String::new(),
            license_number: String::new(),
            signature: SIGNATURE_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionNote {
    pub patient_information: PatientInformation,
    pub medications: Vec<MedicationRecord>,
    pub prescriber_information: PrescriberInformation,
}

/// A normalized note in one of the canonical shapes.
///
/// Serializes as the bare note object (no tag), which is what gets stored
/// as the note's JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StructuredNote {
    Standard(StandardNote),
    Soap(SoapNote),
    Consultation(ConsultationNote),
    Prescription(PrescriptionNote),
}

impl StructuredNote {
    pub fn format(&self) -> NoteFormat {
        match self {
            Self::Standard(_) => NoteFormat::Standard,
            Self::Soap(_) => NoteFormat::Soap,
            Self::Consultation(_) => NoteFormat::Consultation,
            Self::Prescription(_) => NoteFormat::Prescription,
        }
    }

    /// Number of medication records carried by the note (prescriptions only).
    pub fn medication_count(&self) -> usize {
        match self {
            Self::Prescription(rx) => rx.medications.len(),
            _ => 0,
        }
    }
}

/// The part of a text template that drives format detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    pub sections: Vec<String>,
}

impl TemplateDescriptor {
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-insensitive, whitespace-tolerant section lookup.
    pub fn has_section(&self, title: &str) -> bool {
        self.sections
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_format_parses_aliases() {
        assert_eq!("SOAP".parse::<NoteFormat>().unwrap(), NoteFormat::Soap);
        assert_eq!("h&p".parse::<NoteFormat>().unwrap(), NoteFormat::Standard);
        assert_eq!(
            " Prescription ".parse::<NoteFormat>().unwrap(),
            NoteFormat::Prescription
        );
        assert_eq!(
            "consultation".parse::<NoteFormat>().unwrap(),
            NoteFormat::Consultation
        );
    }

    #[test]
    fn note_format_rejects_unknown() {
        let err = "discharge".parse::<NoteFormat>().unwrap_err();
        assert!(matches!(err, StructuringError::InvalidFormat(ref v) if v == "discharge"));
    }

    #[test]
    fn note_format_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&NoteFormat::Soap).unwrap(), "\"soap\"");
        assert_eq!(NoteFormat::Prescription.to_string(), "prescription");
    }

    #[test]
    fn medication_record_uses_camel_case_keys() {
        let json = serde_json::to_value(MedicationRecord::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        for key in [
            "genericName",
            "brandName",
            "strength",
            "dosageForm",
            "sigInstructions",
            "quantity",
            "refills",
            "specialInstructions",
        ] {
            assert_eq!(obj[key], "", "{key} should default to empty");
        }
    }

    #[test]
    fn prescriber_defaults_to_signature_placeholder() {
        assert_eq!(PrescriberInformation::default().signature, "[SIGNATURE]");
    }

    #[test]
    fn structured_note_serializes_untagged() {
        let note = StructuredNote::Soap(SoapNote {
            subjective: "Cough".into(),
            ..Default::default()
        });
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["subjective"], "Cough");
        assert_eq!(json.as_object().unwrap().len(), 4);
        assert_eq!(note.format(), NoteFormat::Soap);
    }

    #[test]
    fn template_section_lookup_ignores_case_and_padding() {
        let t = TemplateDescriptor::new(["  subjective ", "Objective"]);
        assert!(t.has_section("Subjective"));
        assert!(!t.has_section("Plan"));
    }
}
