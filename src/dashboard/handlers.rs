use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::instrument;

use crate::error::http_error;
use crate::state::AppState;

use super::dto::DashboardResponse;
use super::summary::{self, DEFAULT_WINDOW_DAYS};

pub fn read_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard_view))
}

#[instrument(skip(state))]
pub async fn dashboard_view(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let today = OffsetDateTime::now_utc().date();
    let summary = summary::build_summary(
        &state.db,
        state.config.user_id,
        today,
        DEFAULT_WINDOW_DAYS,
    )
    .await
    .map_err(http_error)?;
    Ok(Json(summary.into()))
}
