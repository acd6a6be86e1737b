use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::operations::{reviews, study_sessions};
use crate::response::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateStudySessionRequest {
    pub group_id: i64,
    pub study_activity_id: i64,
}

#[derive(Serialize)]
struct CreateStudySessionResponse {
    id: i64,
    group_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RecordReviewRequest {
    pub correct: bool,
}

#[derive(Serialize)]
struct RecordReviewResponse {
    word_id: i64,
    study_session_id: i64,
    correct: bool,
}

pub async fn create_study_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateStudySessionRequest>,
) -> Response {
    match study_sessions::create_study_session(
        state.db(),
        payload.group_id,
        payload.study_activity_id,
    )
    .await
    {
        Ok(id) => (
            StatusCode::CREATED,
            Json(CreateStudySessionResponse {
                id,
                group_id: payload.group_id,
            }),
        )
            .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn record_review(
    State(state): State<AppState>,
    Path((session_id, word_id)): Path<(i64, i64)>,
    Json(payload): Json<RecordReviewRequest>,
) -> Response {
    match reviews::record_review(state.db(), word_id, session_id, payload.correct).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(RecordReviewResponse {
                word_id,
                study_session_id: session_id,
                correct: payload.correct,
            }),
        )
            .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
