use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::db::operations::groups;
use crate::pagination::{PageParams, PageQuery, Paginated};
use crate::response::{json_error, AppError};
use crate::state::AppState;

pub async fn list_groups(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let Some(params) = PageParams::new(query.page) else {
        return json_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "page must be >= 1")
            .into_response();
    };

    match groups::list_groups(state.db(), &params).await {
        Ok((items, total_items)) => Json(Paginated::new(items, &params, total_items)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "groups list query failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
            .into_response()
        }
    }
}

pub async fn get_group(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match groups::get_group(state.db(), id).await {
        Ok(group) => Json(group).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
