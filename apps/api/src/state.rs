use crate::builder::SessionStore;
use crate::export::ExportTrigger;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Hands standalone documents to the configured print surface.
    pub exporter: ExportTrigger,
}
