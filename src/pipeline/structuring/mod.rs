pub mod types;
pub mod coerce;
pub mod medication;
pub mod classify;
pub mod normalize;
pub mod parser;
pub mod templates;
pub mod orchestrator;

#[cfg(test)]
mod scenario_tests;

pub use types::*;
pub use coerce::*;
pub use medication::*;
pub use classify::*;
pub use normalize::*;
pub use parser::*;
pub use templates::*;
pub use orchestrator::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructuringError {
    #[error("Value could not be serialized: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("Unknown note format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
