use axum::{Json, extract::State};
use chrono::NaiveDate;

use crate::{
    AppState,
    error::AppError,
    extract::{LenientJson, optional, required},
    llm::complete_structured,
    prompts::{self, clamp_count, styles},
};

use super::model::{
    CalendarEntry, CalendarRequest, CalendarResponse, Niche, NichesRequest, NichesResponse,
    Trend, TrendsRequest, TrendsResponse, fallback_calendar, fallback_niches, fallback_trends,
    schedule_calendar,
};

#[axum::debug_handler]
pub async fn generate_calendar(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<CalendarRequest>,
) -> Result<Json<CalendarResponse>, AppError> {
    let niche = required(&req.niche, "niche")?;
    let platform = styles::platform(optional(&req.platform));
    let days = clamp_count(req.days, 7, 31);
    let posts_per_day = clamp_count(req.posts_per_day, 1, 3);
    let start = optional(&req.start_date)
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                AppError::Validation(format!("Invalid startDate (expected YYYY-MM-DD): {raw}"))
            })
        })
        .transpose()?;

    let prompt = prompts::planning::calendar(niche, platform, days, posts_per_day);
    let result = complete_structured::<Vec<CalendarEntry>, _>(state.llm.as_ref(), &prompt, || {
        fallback_calendar(niche, days, posts_per_day)
    })
    .await?
    .map(|entries| schedule_calendar(entries, days, posts_per_day, start));

    tracing::info!(
        "Planned {} calendar entries over {} days",
        result.value.len(),
        days
    );
    Ok(Json(CalendarResponse {
        calendar: result.value,
        used_fallback: result.used_fallback,
    }))
}

#[axum::debug_handler]
pub async fn find_niches(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<NichesRequest>,
) -> Result<Json<NichesResponse>, AppError> {
    let interests = required(&req.interests, "interests")?;
    let platform = styles::platform(optional(&req.platform));

    let prompt = prompts::planning::niches(interests, platform, optional(&req.experience));
    let result = complete_structured::<Vec<Niche>, _>(state.llm.as_ref(), &prompt, || {
        fallback_niches(interests)
    })
    .await?;

    Ok(Json(NichesResponse {
        niches: result.value,
        used_fallback: result.used_fallback,
    }))
}

#[axum::debug_handler]
pub async fn find_trends(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<TrendsRequest>,
) -> Result<Json<TrendsResponse>, AppError> {
    let niche = required(&req.niche, "niche")?;
    let platform = styles::platform(optional(&req.platform));

    let prompt = prompts::planning::trends(niche, platform, optional(&req.region));
    let result = complete_structured::<Vec<Trend>, _>(state.llm.as_ref(), &prompt, || {
        fallback_trends(niche)
    })
    .await?;

    Ok(Json(TrendsResponse {
        trends: result.value,
        used_fallback: result.used_fallback,
    }))
}
