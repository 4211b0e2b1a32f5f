use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::llm::{ChatMessage, Role};

/// Longest single message forwarded upstream, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatRequest {
    pub messages: Option<Vec<IncomingMessage>>,
    pub context: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IncomingMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub used_fallback: bool,
}

/// Converts client turns into gateway messages. Clients may only speak as
/// `user` or `assistant`; the system turn is always ours.
pub fn into_history(messages: Option<Vec<IncomingMessage>>) -> Result<Vec<ChatMessage>, AppError> {
    let messages = match messages {
        Some(messages) if !messages.is_empty() => messages,
        _ => return Err(AppError::missing_field("messages")),
    };

    messages
        .into_iter()
        .enumerate()
        .map(|(i, message)| {
            let role = match message.role.trim().to_ascii_lowercase().as_str() {
                "user" => Role::User,
                "assistant" => Role::Assistant,
                other => {
                    return Err(AppError::Validation(format!(
                        "messages[{i}].role must be 'user' or 'assistant', got '{other}'"
                    )));
                }
            };
            let content = message.content.trim();
            if content.is_empty() {
                return Err(AppError::Validation(format!(
                    "messages[{i}].content is empty"
                )));
            }
            Ok(ChatMessage {
                role,
                content: content.chars().take(MAX_MESSAGE_CHARS).collect(),
            })
        })
        .collect()
}

pub fn fallback_reply() -> String {
    "Sorry, I couldn't come up with an answer just now. Could you try rephrasing your question?"
        .to_string()
}
