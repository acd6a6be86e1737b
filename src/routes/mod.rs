mod dashboard;
mod groups;
mod health;
mod study_activities;
mod study_sessions;
mod words;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/dashboard/last_study_session",
            get(dashboard::last_study_session),
        )
        .route(
            "/api/dashboard/study_progress",
            get(dashboard::study_progress),
        )
        .route("/api/dashboard/quick-stats", get(dashboard::quick_stats))
        .route(
            "/api/study_activities/:id",
            get(study_activities::get_study_activity),
        )
        .route(
            "/api/study_activities/:id/study_sessions",
            get(study_activities::list_study_sessions),
        )
        .route(
            "/api/study_sessions",
            post(study_sessions::create_study_session),
        )
        .route(
            "/api/study_sessions/:id/words/:word_id/review",
            post(study_sessions::record_review),
        )
        .route("/api/words", get(words::list_words).post(words::create_word))
        .route("/api/words/:id", get(words::get_word))
        .route("/api/groups", get(groups::list_groups))
        .route("/api/groups/:id", get(groups::get_group))
        .with_state(state)
}
