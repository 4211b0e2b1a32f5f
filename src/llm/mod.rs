pub mod client;
pub mod structured;
pub mod types;

pub use client::{ChatCompletion, GroqClient, LlmError};
pub use structured::{
    JsonShape, ListItem, Structured, StructuredOutput, complete_lines, complete_structured,
    complete_text,
};
pub use types::{ChatMessage, Prompt, Role};
