use axum::{Json, extract::State};

use crate::{
    AppState,
    error::AppError,
    extract::{LenientJson, optional},
    llm::complete_text,
    prompts,
};

use super::model::{ChatRequest, ChatResponse, fallback_reply, into_history};

#[axum::debug_handler]
pub async fn chat(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let history = into_history(req.messages)?;
    let turns = history.len();

    let prompt = prompts::chat::conversation(history, optional(&req.context));
    let result = complete_text(state.llm.as_ref(), &prompt, fallback_reply).await?;

    tracing::debug!("Answered chat with {} turns", turns);
    Ok(Json(ChatResponse {
        reply: result.value,
        used_fallback: result.used_fallback,
    }))
}
