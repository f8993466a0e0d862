use serde_json::Value;

use super::types::{NoteFormat, TemplateDescriptor};
use crate::config::sections;

/// Resolution order when a payload or template matches several formats.
pub const FORMAT_PRIORITY: [NoteFormat; 4] = [
    NoteFormat::Soap,
    NoteFormat::Consultation,
    NoteFormat::Prescription,
    NoteFormat::Standard,
];

/// Decide which canonical shape a payload should be normalized into.
///
/// A template, when given, decides alone: its section titles are checked for
/// "Subjective", then "Reason for Consultation", then "Prescription".
/// Without a template the payload keys are inspected in the same priority
/// order (see [`FORMAT_PRIORITY`]). Anything unrecognized is Standard.
///
/// Template titles are compared after trimming and ignoring ASCII case, so
/// `" subjective "` selects SOAP just like `"Subjective"`. Payload keys are
/// matched exactly.
pub fn detect_format(payload: &Value, template: Option<&TemplateDescriptor>) -> NoteFormat {
    match template {
        Some(template) => classify_from_template(template),
        None => classify_from_payload(payload),
    }
}

/// Classify by template section titles.
pub fn classify_from_template(template: &TemplateDescriptor) -> NoteFormat {
    FORMAT_PRIORITY
        .into_iter()
        .find(|format| template_signals(template, *format))
        .unwrap_or(NoteFormat::Standard)
}

/// Classify by the keys present in the payload object.
pub fn classify_from_payload(payload: &Value) -> NoteFormat {
    let Some(obj) = payload.as_object() else {
        return NoteFormat::Standard;
    };
    let has = |key: &str| obj.contains_key(key);

    FORMAT_PRIORITY
        .into_iter()
        .find(|format| match format {
            NoteFormat::Soap => has("subjective") && has("objective"),
            NoteFormat::Consultation => has("reasonForConsultation"),
            NoteFormat::Prescription => has("patientInformation") || has("medications"),
            NoteFormat::Standard => true,
        })
        .unwrap_or(NoteFormat::Standard)
}

fn template_signals(template: &TemplateDescriptor, format: NoteFormat) -> bool {
    match format {
        NoteFormat::Soap => template.has_section(sections::SUBJECTIVE),
        NoteFormat::Consultation => template.has_section(sections::REASON_FOR_CONSULTATION),
        NoteFormat::Prescription => template.has_section(sections::PRESCRIPTION),
        NoteFormat::Standard => true,
    }
}
