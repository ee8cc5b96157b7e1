// HTTP request handlers
use crate::application::heating_service::TabActivation;
use crate::application::tabs::SectionVisibility;
use crate::application::view_registry::ViewId;
use crate::domain::chart::ChartRange;
use crate::domain::dataset::Dataset;
use crate::presentation::api_error::{ApiError, ApiResult};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_heating_page;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::Utc;
use std::sync::Arc;

fn unknown_view(id: ViewId) -> ApiError {
    ApiError::NotFound(format!("no heating view {id}"))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the heating page from a fresh snapshot, registering a new view
pub async fn heating_page(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let view = state.heating_service.build_view(Utc::now()).await?;

    let mut views = state.views.lock().await;
    let (id, view) = views.insert(view);
    let html = render_heating_page(id, view)?;

    tracing::info!(view = id, datasets = view.datasets().len(), "rendered heating page");
    Ok(Html(html))
}

/// Activate a chart tab of one view, building its chart on first use
pub async fn activate_tab(
    Path((id, range)): Path<(ViewId, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TabActivation>> {
    let range: ChartRange = range.parse()?;

    let mut views = state.views.lock().await;
    let view = views.get_mut(id).ok_or_else(|| unknown_view(id))?;

    Ok(Json(view.activate(range)?))
}

pub async fn toggle_section(
    Path((id, prefix)): Path<(ViewId, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SectionVisibility>> {
    let mut views = state.views.lock().await;
    let view = views.get_mut(id).ok_or_else(|| unknown_view(id))?;

    view.toggle_section(&prefix)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no section {prefix:?}")))
}

/// Ordered datasets of one view
pub async fn list_datasets(
    Path(id): Path<ViewId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Dataset>>> {
    let views = state.views.lock().await;
    let view = views.get(id).ok_or_else(|| unknown_view(id))?;

    Ok(Json(view.datasets().to_vec()))
}
