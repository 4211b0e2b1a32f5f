use crate::llm::{ChatMessage, Prompt};

use super::clip;

/// Older turns beyond this are dropped before the call.
pub const MAX_HISTORY: usize = 20;

const PERSONA: &str = "You are a friendly, practical assistant for content creators. \
     You help with ideas, titles, scripts, hooks, growth strategy and analytics questions. \
     Keep answers concise and concrete, and use short lists when they help.";

pub fn conversation(history: Vec<ChatMessage>, context: Option<&str>) -> Prompt {
    let mut system = PERSONA.to_string();
    if let Some(context) = context {
        system.push_str(&format!(
            "\nThe user is currently working on: {}",
            clip(context)
        ));
    }

    let skip = history.len().saturating_sub(MAX_HISTORY);
    let history = history.into_iter().skip(skip).collect();
    Prompt::conversation(system, history).with_sampling(0.7, 1024)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn history_is_capped_to_latest_turns() {
        let history: Vec<ChatMessage> = (0..30)
            .map(|i| ChatMessage::user(format!("message {i}")))
            .collect();
        let prompt = conversation(history, None);
        assert_eq!(prompt.messages.len(), MAX_HISTORY + 1);
        assert_eq!(prompt.messages[0].role, Role::System);
        assert_eq!(prompt.messages[1].content, "message 10");
        assert_eq!(prompt.user(), "message 29");
    }

    #[test]
    fn context_is_added_to_system_message() {
        let prompt = conversation(vec![ChatMessage::user("hi")], Some("title generator"));
        assert!(prompt.system().contains("working on: title generator"));
    }
}
