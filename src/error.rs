use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

/// Failures produced by the tracking core. Validation variants are detected
/// at component boundaries before any state is mutated; storage variants are
/// fatal to the current request.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("daily limit must be a positive number of mg, got {0}")]
    InvalidLimit(f64),

    #[error("grams for {food:?} is not a finite number")]
    MalformedEntry { food: String },

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("calendar month {year}-{month:02} is out of range")]
    MonthOutOfRange { year: i32, month: u8 },

    #[error("items payload for {date} failed to (de)serialize")]
    ItemsJson {
        date: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl TrackerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidLimit(_) | Self::MalformedEntry { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidDate(_) | Self::MonthOutOfRange { .. } => StatusCode::BAD_REQUEST,
            Self::ItemsJson { .. } | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn http_error(e: TrackerError) -> (StatusCode, String) {
    let status = e.status();
    if status.is_server_error() {
        error!(error = %e, "request failed");
    }
    (status, e.to_string())
}
