pub mod config;
pub mod db;
pub mod logging;
pub mod pagination;
pub mod response;
pub mod routes;
pub mod seed;
pub mod state;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn create_app(db: db::Database) -> axum::Router {
    routes::router(AppState::new(db))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
