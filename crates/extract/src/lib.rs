pub mod extractor;
pub mod llm;
pub mod prompt;
pub mod schema;

use thiserror::Error;

pub use extractor::ShipmentExtractor;
pub use llm::{ChatCompletionsClient, LlmClient, GROQ_BASE_URL};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("llm request failed: {0}")]
    Llm(String),
    #[error("llm returned unparseable extraction: {0}")]
    Parse(String),
    #[error("extraction incomplete: {0}")]
    Incomplete(String),
}
