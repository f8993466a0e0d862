/// Application-level constants
pub const APP_NAME: &str = "medscribe";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable read for the tracing filter before falling back to the default.
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Written into `prescriberInformation.signature` when the model leaves it blank.
pub const SIGNATURE_PLACEHOLDER: &str = "[SIGNATURE]";

/// Template section titles that select a note format.
pub mod sections {
    pub const SUBJECTIVE: &str = "Subjective";
    pub const REASON_FOR_CONSULTATION: &str = "Reason for Consultation";
    pub const PRESCRIPTION: &str = "Prescription";
}

/// Default tracing filter: chatty in debug builds, quiet in release.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "medscribe=debug,medscribe_lib=debug,info"
    } else {
        "medscribe=info,medscribe_lib=info,warn"
    }
}
