use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::operations::{dashboard, study_sessions};
use crate::response::{json_error, AppError};
use crate::state::AppState;

pub async fn last_study_session(State(state): State<AppState>) -> Response {
    match study_sessions::last_study_session(state.db()).await {
        Ok(session) => Json(session).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn study_progress(State(state): State<AppState>) -> Response {
    match dashboard::study_progress(state.db()).await {
        Ok(progress) => Json(progress).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "study progress query failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
            .into_response()
        }
    }
}

pub async fn quick_stats(State(state): State<AppState>) -> Response {
    match dashboard::quick_stats(state.db()).await {
        Ok(stats) => Json(stats).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "quick stats query failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
            .into_response()
        }
    }
}
