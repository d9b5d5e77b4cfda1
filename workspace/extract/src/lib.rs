pub mod error;
pub mod llm;
pub mod text;

pub use error::{ExtractError, Result};
pub use llm::{LlmSettings, PlanAnalyst, RigAnalyst};
pub use text::document_text;
