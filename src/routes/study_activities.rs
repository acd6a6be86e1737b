use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::operations::{study_activities, study_sessions};
use crate::pagination::{PageParams, PageQuery, Paginated};
use crate::response::json_error;
use crate::state::AppState;

/// A lookup miss resolves to a placeholder activity, not a 404.
pub async fn get_study_activity(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match study_activities::get_study_activity(state.db(), id).await {
        Ok(activity) => Json(activity).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "study activity lookup failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
            .into_response()
        }
    }
}

pub async fn list_study_sessions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Response {
    let Some(params) = PageParams::new(query.page) else {
        return json_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "page must be >= 1")
            .into_response();
    };

    match study_sessions::list_sessions_for_activity(state.db(), id, &params).await {
        Ok((items, total_items)) => Json(Paginated::new(items, &params, total_items)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "study sessions list query failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
            .into_response()
        }
    }
}
