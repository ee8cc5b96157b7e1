// Presentation layer - HTTP routes, handlers and the page
pub mod api_error;
pub mod app_state;
pub mod handlers;
pub mod page;

use crate::presentation::app_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/", get(handlers::heating_page))
        .route("/heating", get(handlers::heating_page))
        .route("/heating/views/:view/datasets", get(handlers::list_datasets))
        .route("/heating/views/:view/tabs/:range", post(handlers::activate_tab))
        .route(
            "/heating/views/:view/sections/:prefix/toggle",
            post(handlers::toggle_section),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
