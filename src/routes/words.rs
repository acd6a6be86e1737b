use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::operations::groups::Group;
use crate::db::operations::reviews::WordStats;
use crate::db::operations::words::{self, NewWord};
use crate::pagination::{PageParams, PageQuery, Paginated};
use crate::response::{json_error, AppError};
use crate::state::AppState;

#[derive(Serialize)]
struct WordDetailResponse {
    id: i64,
    original_text: String,
    pronunciation: String,
    translated_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parts: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    part_of_speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example: Option<String>,
    stats: WordStats,
    groups: Vec<Group>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWordRequest {
    pub original_text: String,
    pub pronunciation: String,
    pub translated_text: String,
    pub parts: Option<serde_json::Value>,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
    #[serde(default)]
    pub group_ids: Vec<i64>,
}

#[derive(Serialize)]
struct CreateWordResponse {
    id: i64,
}

pub async fn list_words(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let Some(params) = PageParams::new(query.page) else {
        return json_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "page must be >= 1")
            .into_response();
    };

    match words::list_words(state.db(), &params).await {
        Ok((items, total_items)) => Json(Paginated::new(items, &params, total_items)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "words list query failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
            .into_response()
        }
    }
}

pub async fn get_word(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match words::get_word(state.db(), id).await {
        Ok((word, stats, groups)) => Json(WordDetailResponse {
            id: word.id,
            original_text: word.original_text,
            pronunciation: word.pronunciation,
            translated_text: word.translated_text,
            parts: word.parts,
            part_of_speech: word.part_of_speech,
            example: word.example,
            stats,
            groups,
        })
        .into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn create_word(
    State(state): State<AppState>,
    Json(payload): Json<CreateWordRequest>,
) -> Response {
    if payload.original_text.trim().is_empty() || payload.translated_text.trim().is_empty() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "original_text and translated_text are required",
        )
        .into_response();
    }

    let word = NewWord {
        original_text: payload.original_text.trim().to_string(),
        pronunciation: payload.pronunciation.trim().to_string(),
        translated_text: payload.translated_text.trim().to_string(),
        parts: payload.parts,
        part_of_speech: payload.part_of_speech,
        example: payload.example,
    };

    match words::create_word(state.db(), &word, &payload.group_ids).await {
        Ok(id) => (StatusCode::CREATED, Json(CreateWordResponse { id })).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
