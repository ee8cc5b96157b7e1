pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use presentation::app_state::AppState;
pub use presentation::router;
