use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::dates;
use crate::error::http_error;
use crate::state::AppState;

use super::aggregate;
use super::dto::{DayResponse, FoodDto, SaveDayRequest};
use super::repo;

// --- public routers ---

pub fn read_router() -> Router<AppState> {
    Router::new()
        .route("/days/:date", get(get_day))
        .route("/foods", get(list_foods))
}

pub fn write_router() -> Router<AppState> {
    Router::new().route("/days/:date", post(save_day))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayResponse>, (StatusCode, String)> {
    let day = dates::parse_iso(&date).map_err(http_error)?;
    let key = dates::format_iso(day);
    let record = repo::get(&state.db, state.config.user_id, &key)
        .await
        .map_err(http_error)?;
    let limit_mg = *state.limit_mg.read().await;
    Ok(Json(DayResponse {
        date: key,
        limit_mg,
        record: record.map(Into::into),
    }))
}

#[instrument(skip(state, body))]
pub async fn save_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<SaveDayRequest>,
) -> Result<Json<DayResponse>, (StatusCode, String)> {
    let day = dates::parse_iso(&date).map_err(http_error)?;
    let key = dates::format_iso(day);

    let record = aggregate::compute_record(&state.reference, &body.entries, body.limit_mg)
        .map_err(http_error)?;
    repo::upsert(&state.db, state.config.user_id, &key, &record)
        .await
        .map_err(http_error)?;
    *state.limit_mg.write().await = body.limit_mg;

    tracing::debug!(
        date = %key,
        total_iron_mg = record.total_iron_mg,
        percentage = record.percentage_of_limit,
        "day saved"
    );
    Ok(Json(DayResponse {
        date: key,
        limit_mg: body.limit_mg,
        record: Some(record.into()),
    }))
}

#[instrument(skip(state))]
pub async fn list_foods(State(state): State<AppState>) -> Json<Vec<FoodDto>> {
    let foods = state
        .reference
        .iter()
        .map(|(name, iron_per_100g)| FoodDto {
            name: name.to_string(),
            iron_per_100g,
        })
        .collect();
    Json(foods)
}
