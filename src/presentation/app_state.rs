// Application state for HTTP handlers
use crate::application::heating_service::HeatingService;
use crate::application::view_registry::ViewRegistry;
use tokio::sync::Mutex;

pub struct AppState {
    pub heating_service: HeatingService,
    /// Views of the rendered pages, one per page load
    pub views: Mutex<ViewRegistry>,
}

impl AppState {
    pub fn new(heating_service: HeatingService, max_views: usize) -> Self {
        Self {
            heating_service,
            views: Mutex::new(ViewRegistry::new(max_views)),
        }
    }
}
