use axum::{Json, extract::State};

use crate::{
    AppState,
    error::AppError,
    extract::{LenientJson, optional, required},
    llm::complete_structured,
    prompts::{self, styles},
    youtube::ChannelStats,
};

use super::model::{
    CompetitorAnalysis, CompetitorRequest, CompetitorResponse, ThumbnailCritique,
    ThumbnailRequest, ThumbnailResponse, fallback_analysis, fallback_critique,
};

#[axum::debug_handler]
pub async fn analyze_competitor(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<CompetitorRequest>,
) -> Result<Json<CompetitorResponse>, AppError> {
    let channel = required(&req.channel, "channel")?;
    let platform = styles::platform(optional(&req.platform));
    state.llm.ready()?;

    let stats = channel_stats(&state, channel).await;
    let prompt =
        prompts::analysis::competitor(channel, optional(&req.niche), platform, stats.as_ref());
    let result = complete_structured::<CompetitorAnalysis, _>(state.llm.as_ref(), &prompt, || {
        fallback_analysis(channel)
    })
    .await?;

    Ok(Json(CompetitorResponse {
        analysis: result.value,
        channel: stats,
        used_fallback: result.used_fallback,
    }))
}

/// Best-effort lookup; failures only cost the enrichment.
async fn channel_stats(state: &AppState, channel: &str) -> Option<ChannelStats> {
    let youtube = state.youtube.as_ref()?;
    match youtube.channel_stats(channel).await {
        Ok(stats) => {
            tracing::debug!("Resolved channel {} to {}", channel, stats.id);
            Some(stats)
        }
        Err(e) => {
            tracing::warn!("Channel lookup failed for {}: {}", channel, e);
            None
        }
    }
}

#[axum::debug_handler]
pub async fn analyze_thumbnail(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<ThumbnailRequest>,
) -> Result<Json<ThumbnailResponse>, AppError> {
    let description = required(&req.description, "description")?;

    let prompt = prompts::analysis::thumbnail(
        description,
        optional(&req.title),
        optional(&req.niche),
    );
    let result =
        complete_structured::<ThumbnailCritique, _>(state.llm.as_ref(), &prompt, fallback_critique)
            .await?;

    Ok(Json(ThumbnailResponse {
        critique: result.value,
        used_fallback: result.used_fallback,
    }))
}
