use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::classify::detect_format;
use super::normalize::normalize_note;
use super::parser::parse_note_payload;
use super::types::{NoteFormat, StructuredNote, TemplateDescriptor};
use super::StructuringError;

/// Outcome of structuring one transcription.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuringResult {
    pub transcription_id: Uuid,
    pub format: NoteFormat,
    pub note: StructuredNote,
    pub structured_at: DateTime<Utc>,
}

/// Runs LLM output through parse → detect → normalize.
///
/// Stateless apart from an optional forced format, so one instance can be
/// shared across request handlers.
#[derive(Debug, Clone, Default)]
pub struct NoteStructurer {
    forced_format: Option<NoteFormat>,
}

impl NoteStructurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip detection and always normalize into `format`.
    pub fn with_format(format: NoteFormat) -> Self {
        Self {
            forced_format: Some(format),
        }
    }

    /// Normalize an already-parsed payload.
    pub fn structure_payload(
        &self,
        transcription_id: Uuid,
        payload: &Value,
        template: Option<&TemplateDescriptor>,
    ) -> StructuringResult {
        let format = self
            .forced_format
            .unwrap_or_else(|| detect_format(payload, template));
        let note = normalize_note(payload, format);

        // Content is PHI: log shape only.
        tracing::debug!(
            transcription_id = %transcription_id,
            format = %format,
            forced = self.forced_format.is_some(),
            from_template = template.is_some(),
            medications = note.medication_count(),
            "Structured note normalized"
        );

        StructuringResult {
            transcription_id,
            format,
            note,
            structured_at: Utc::now(),
        }
    }

    /// Parse a raw LLM completion and normalize it.
    pub fn structure_response(
        &self,
        transcription_id: Uuid,
        response: &str,
        template: Option<&TemplateDescriptor>,
    ) -> Result<StructuringResult, StructuringError> {
        let payload = parse_note_payload(response).inspect_err(|e| {
            tracing::warn!(
                transcription_id = %transcription_id,
                response_len = response.len(),
                error = %e,
                "LLM response could not be parsed"
            );
        })?;
        Ok(self.structure_payload(transcription_id, &payload, template))
    }

    /// Read a saved LLM completion from disk and normalize it.
    pub fn structure_file(
        &self,
        transcription_id: Uuid,
        path: &Path,
        template: Option<&TemplateDescriptor>,
    ) -> Result<StructuringResult, StructuringError> {
        let response = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), bytes = response.len(), "Loaded LLM response");
        self.structure_response(transcription_id, &response, template)
    }
}
