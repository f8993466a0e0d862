use serde::{Deserialize, Serialize};

use super::classify::classify_from_template;
use super::types::{NoteFormat, StructuredNote, TemplateDescriptor};
use crate::config::sections;

/// A named, ordered list of note sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTemplate {
    pub title: String,
    pub description: String,
    pub sections: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl TextTemplate {
    fn builtin(title: &str, description: &str, sections: &[&str], is_default: bool) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            sections: sections.iter().map(|s| s.to_string()).collect(),
            is_default,
        }
    }

    pub fn descriptor(&self) -> TemplateDescriptor {
        TemplateDescriptor::new(self.sections.iter().cloned())
    }
}

impl From<&TextTemplate> for TemplateDescriptor {
    fn from(template: &TextTemplate) -> Self {
        template.descriptor()
    }
}

/// Built-in templates, one per note format. History & Physical is the default.
pub fn default_templates() -> Vec<TextTemplate> {
    vec![
        TextTemplate::builtin(
            "History & Physical",
            "Comprehensive admission or new-patient note",
            &[
                "Chief Complaint",
                "History of Present Illness",
                "Past Medical History",
                "Medications",
                "Allergies",
                "Physical Examination",
                "Assessment",
                "Plan",
            ],
            true,
        ),
        TextTemplate::builtin(
            "SOAP Note",
            "Problem-focused follow-up note",
            &[sections::SUBJECTIVE, "Objective", "Assessment", "Plan"],
            false,
        ),
        TextTemplate::builtin(
            "Consultation Note",
            "Specialist consultation requested by another provider",
            &[
                sections::REASON_FOR_CONSULTATION,
                "History",
                "Findings",
                "Impression",
                "Recommendations",
            ],
            false,
        ),
        TextTemplate::builtin(
            "Prescription",
            "Medication order with patient and prescriber details",
            &["Patient Information", sections::PRESCRIPTION, "Prescriber Information"],
            false,
        ),
    ]
}

/// The built-in template matching `format`.
pub fn template_for(format: NoteFormat) -> Option<TextTemplate> {
    default_templates()
        .into_iter()
        .find(|t| classify_from_template(&t.descriptor()) == format)
}

impl StructuredNote {
    /// Ordered `(section title, display text)` pairs for section-keyed rendering.
    pub fn sections(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Standard(n) => vec![
                ("Chief Complaint", n.chief_complaint.clone()),
                ("History of Present Illness", n.history_of_present_illness.clone()),
                ("Past Medical History", n.past_medical_history.clone()),
                ("Medications", n.medications.clone()),
                ("Allergies", n.allergies.clone()),
                ("Physical Examination", n.physical_examination.clone()),
                ("Assessment", n.assessment.clone()),
                ("Plan", n.plan.clone()),
            ],
            Self::Soap(n) => vec![
                (sections::SUBJECTIVE, n.subjective.clone()),
                ("Objective", n.objective.clone()),
                ("Assessment", n.assessment.clone()),
                ("Plan", n.plan.clone()),
            ],
            Self::Consultation(n) => vec![
                (sections::REASON_FOR_CONSULTATION, n.reason_for_consultation.clone()),
                ("History", n.history.clone()),
                ("Findings", n.findings.clone()),
                ("Impression", n.impression.clone()),
                ("Recommendations", n.recommendations.clone()),
            ],
            Self::Prescription(rx) => {
                let patient = &rx.patient_information;
                let prescriber = &rx.prescriber_information;
                vec![
                    (
                        "Patient Information",
                        labeled_lines(&[
                            ("Name", &patient.name),
                            ("Sex", &patient.sex),
                            ("Age", &patient.age),
                            ("Date", &patient.date),
                        ]),
                    ),
                    (
                        sections::PRESCRIPTION,
                        rx.medications
                            .iter()
                            .map(|m| m.display_line())
                            .filter(|line| !line.is_empty())
                            .enumerate()
                            .map(|(i, line)| format!("{}. {line}", i + 1))
                            .collect::<Vec<_>>()
                            .join("\n"),
                    ),
                    (
                        "Prescriber Information",
                        labeled_lines(&[
                            ("Name", &prescriber.name),
                            ("License No.", &prescriber.license_number),
                            ("Signature", &prescriber.signature),
                        ]),
                    ),
                ]
            }
        }
    }

    /// Render as Markdown with one `##` header per non-empty section.
    pub fn to_markdown(&self) -> String {
        self.sections()
            .into_iter()
            .filter(|(_, body)| !body.trim().is_empty())
            .map(|(title, body)| format!("## {title}\n{}\n", body.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn labeled_lines(fields: &[(&str, &String)]) -> String {
    fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
