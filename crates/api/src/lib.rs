//! ghcard Web API
//!
//! Axum service that fetches a GitHub profile and answers with a PNG stats card.

mod handlers;
mod routes;

pub use routes::create_router;

use ghcard_card::CardRenderer;
use ghcard_collector::GithubCollector;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub collector: GithubCollector,
    pub renderer: Arc<dyn CardRenderer>,
    /// Answer failures with a rendered error card instead of plain text
    pub error_image: bool,
}

impl AppState {
    pub fn new(collector: GithubCollector, renderer: Arc<dyn CardRenderer>) -> Self {
        Self {
            collector,
            renderer,
            error_image: false,
        }
    }

    pub fn with_error_image(mut self, enabled: bool) -> Self {
        self.error_image = enabled;
        self
    }
}

pub type SharedState = Arc<AppState>;
