pub mod config;
pub mod pipeline;

use tracing_subscriber::EnvFilter;

pub use pipeline::structuring::{
    detect_format, normalize_medication, normalize_medication_list, normalize_note,
    parse_complex_medication_string, MedicationRecord, NoteFormat, NoteStructurer,
    StructuredNote, StructuringError, StructuringResult, TemplateDescriptor,
};

/// Install the global tracing subscriber, honouring `RUST_LOG` when set.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(config::LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
