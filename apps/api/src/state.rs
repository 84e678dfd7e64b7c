use std::sync::Arc;

use crate::config::Config;
use crate::document::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable document decoder. Default: `DocumentTextExtractor`.
    pub documents: Arc<dyn TextExtractor>,
}
