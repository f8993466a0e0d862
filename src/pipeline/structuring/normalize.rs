// Note shape normalization: one canonical object per note format.
// Missing or mistyped fields degrade to "" (or [] for medications); nothing
// in here fails for JSON input.

use std::sync::LazyLock;

use serde_json::{Map, Value};

use super::coerce::field_string;
use super::medication::normalize_medication_value;
use super::types::{
    ConsultationNote, NoteFormat, PatientInformation, PrescriberInformation, PrescriptionNote,
    SoapNote, StandardNote, StructuredNote,
};
use crate::config::SIGNATURE_PLACEHOLDER;

/// A model payload tagged with the format it will be read as.
#[derive(Debug, Clone, Copy)]
pub enum RawNotePayload<'a> {
    Standard(&'a Map<String, Value>),
    Soap(&'a Map<String, Value>),
    Consultation(&'a Map<String, Value>),
    Prescription(&'a Map<String, Value>),
}

/// Stand-in for payloads that are not JSON objects.
static EMPTY_OBJECT: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

impl<'a> RawNotePayload<'a> {
    pub fn new(payload: &'a Value, format: NoteFormat) -> Self {
        let obj = payload.as_object().unwrap_or(&EMPTY_OBJECT);
        match format {
            NoteFormat::Standard => Self::Standard(obj),
            NoteFormat::Soap => Self::Soap(obj),
            NoteFormat::Consultation => Self::Consultation(obj),
            NoteFormat::Prescription => Self::Prescription(obj),
        }
    }

    pub fn normalize(self) -> StructuredNote {
        match self {
            Self::Standard(obj) => StructuredNote::Standard(StandardNote {
                chief_complaint: field_string(obj, "chiefComplaint"),
                history_of_present_illness: field_string(obj, "historyOfPresentIllness"),
                past_medical_history: field_string(obj, "pastMedicalHistory"),
                medications: field_string(obj, "medications"),
                allergies: field_string(obj, "allergies"),
                physical_examination: field_string(obj, "physicalExamination"),
                assessment: field_string(obj, "assessment"),
                plan: field_string(obj, "plan"),
            }),
            Self::Soap(obj) => StructuredNote::Soap(SoapNote {
                subjective: field_string(obj, "subjective"),
                objective: field_string(obj, "objective"),
                assessment: field_string(obj, "assessment"),
                plan: field_string(obj, "plan"),
            }),
            Self::Consultation(obj) => StructuredNote::Consultation(ConsultationNote {
                reason_for_consultation: field_string(obj, "reasonForConsultation"),
                history: field_string(obj, "history"),
                findings: field_string(obj, "findings"),
                impression: field_string(obj, "impression"),
                recommendations: field_string(obj, "recommendations"),
            }),
            Self::Prescription(obj) => StructuredNote::Prescription(normalize_prescription(obj)),
        }
    }
}

/// Normalize `payload` into the canonical shape for `format`.
pub fn normalize_note(payload: &Value, format: NoteFormat) -> StructuredNote {
    RawNotePayload::new(payload, format).normalize()
}

fn normalize_prescription(obj: &Map<String, Value>) -> PrescriptionNote {
    let patient_information = match obj.get("patientInformation") {
        Some(Value::Object(p)) => PatientInformation {
            name: field_string(p, "name"),
            sex: field_string(p, "sex"),
            age: field_string(p, "age"),
            date: field_string(p, "date"),
        },
        _ => PatientInformation::default(),
    };

    let medications = obj
        .get("medications")
        .map(normalize_medication_value)
        .unwrap_or_default();

    let prescriber_information = match obj.get("prescriberInformation") {
        Some(Value::Object(p)) => {
            let signature = field_string(p, "signature");
            PrescriberInformation {
                name: field_string(p, "name"),
                license_number: field_string(p, "licenseNumber"),
                signature: if signature.is_empty() {
                    SIGNATURE_PLACEHOLDER.to_string()
                } else {
                    signature
                },
            }
        }
        _ => PrescriberInformation::default(),
    };

    PrescriptionNote {
        patient_information,
        medications,
        prescriber_information,
    }
}
