use axum::{Json, extract::State};

use crate::{
    AppState,
    error::AppError,
    extract::{LenientJson, optional, required},
    llm::{Structured, complete_lines, complete_structured, complete_text},
    prompts::{self, clamp_count, styles},
};

use super::model::{
    DescriptionRequest, DescriptionResponse, HashtagsRequest, HashtagsResponse, HooksRequest,
    HooksResponse, ScriptRequest, ScriptResponse, TitlesRequest, TitlesResponse,
    fallback_description, fallback_hashtags, fallback_hooks, fallback_script, fallback_titles,
    normalize_hashtags,
};

#[axum::debug_handler]
pub async fn generate_titles(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<TitlesRequest>,
) -> Result<Json<TitlesResponse>, AppError> {
    let topic = required(&req.topic, "topic")?;
    let platform = styles::platform(optional(&req.platform));
    let count = clamp_count(req.count, 10, 20);

    let prompt = prompts::content::titles(topic, platform, optional(&req.style), count);
    let result = complete_lines(state.llm.as_ref(), &prompt, count as usize, || {
        fallback_titles(topic, count)
    })
    .await?;

    tracing::info!("Generated {} titles for {}", result.value.len(), platform.key);
    Ok(Json(TitlesResponse {
        titles: result.value,
        used_fallback: result.used_fallback,
    }))
}

#[axum::debug_handler]
pub async fn generate_hooks(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<HooksRequest>,
) -> Result<Json<HooksResponse>, AppError> {
    let topic = required(&req.topic, "topic")?;
    let platform = styles::platform(optional(&req.platform));
    let count = clamp_count(req.count, 5, 10);

    let prompt = prompts::content::hooks(topic, platform, optional(&req.style), count);
    let result = complete_lines(state.llm.as_ref(), &prompt, count as usize, || {
        fallback_hooks(topic, count)
    })
    .await?;

    Ok(Json(HooksResponse {
        hooks: result.value,
        used_fallback: result.used_fallback,
    }))
}

#[axum::debug_handler]
pub async fn generate_hashtags(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<HashtagsRequest>,
) -> Result<Json<HashtagsResponse>, AppError> {
    let topic = required(&req.topic, "topic")?;
    let platform = styles::platform(optional(&req.platform));
    let count = clamp_count(req.count, 15, 30);

    let prompt = prompts::content::hashtags(topic, platform, count);
    let result = complete_structured::<Vec<String>, _>(state.llm.as_ref(), &prompt, || {
        fallback_hashtags(count)
    })
    .await?
    .map(|tags| normalize_hashtags(tags, count));

    // every tag may normalize away, e.g. a reply of ["#", " "]
    let result = if result.value.is_empty() {
        tracing::warn!("Serving fallback content: no usable hashtags after normalization");
        Structured::fallback(fallback_hashtags(count))
    } else {
        result
    };

    Ok(Json(HashtagsResponse {
        hashtags: result.value,
        used_fallback: result.used_fallback,
    }))
}

#[axum::debug_handler]
pub async fn generate_script(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<ScriptRequest>,
) -> Result<Json<ScriptResponse>, AppError> {
    let topic = required(&req.topic, "topic")?;
    let platform = styles::platform(optional(&req.platform));
    let length = styles::script_length(optional(&req.script_length));

    let prompt = prompts::content::script(
        topic,
        optional(&req.niche),
        platform,
        length,
        optional(&req.tone),
    );
    let result = complete_text(state.llm.as_ref(), &prompt, || fallback_script(topic)).await?;

    tracing::info!("Generated {} script for {}", length.key, platform.key);
    Ok(Json(ScriptResponse {
        script: result.value,
        used_fallback: result.used_fallback,
    }))
}

#[axum::debug_handler]
pub async fn generate_description(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>, AppError> {
    let topic = required(&req.topic, "topic")?;
    let platform = styles::platform(optional(&req.platform));
    let keywords: Vec<String> = req
        .keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    let prompt =
        prompts::content::description(topic, platform, &keywords, optional(&req.tone));
    let result = complete_text(state.llm.as_ref(), &prompt, || {
        fallback_description(topic, &keywords)
    })
    .await?;

    Ok(Json(DescriptionResponse {
        description: result.value,
        used_fallback: result.used_fallback,
    }))
}
