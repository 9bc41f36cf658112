use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::dates;
use crate::error::http_error;
use crate::records::repo;
use crate::state::AppState;

use super::dto::{CalendarQuery, CalendarResponse, MonthRef};
use super::grid;

pub fn read_router() -> Router<AppState> {
    Router::new().route("/calendar", get(month_view))
}

/// Month view; both query params default to the current UTC date.
#[instrument(skip(state))]
pub async fn month_view(
    State(state): State<AppState>,
    Query(q): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, (StatusCode, String)> {
    let today = OffsetDateTime::now_utc().date();
    let year = q.year.unwrap_or_else(|| today.year());
    let month = q.month.unwrap_or(u8::from(today.month()));

    let (start, end) = grid::grid_span(year, month).map_err(http_error)?;
    let percentages = repo::percentages_between(
        &state.db,
        state.config.user_id,
        &dates::format_iso(start),
        &dates::format_iso(end),
    )
    .await
    .map_err(http_error)?;
    let weeks = grid::build_grid(year, month, &percentages).map_err(http_error)?;

    let (prev_year, prev_month) = grid::previous(year, month);
    let (next_year, next_month) = grid::next(year, month);
    Ok(Json(CalendarResponse {
        year,
        month,
        weeks: weeks
            .into_iter()
            .map(|week| week.into_iter().map(Into::into).collect())
            .collect(),
        previous: MonthRef {
            year: prev_year,
            month: prev_month,
        },
        next: MonthRef {
            year: next_year,
            month: next_month,
        },
    }))
}
