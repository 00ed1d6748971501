use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Exports share nothing mutable; each request builds its own layout state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
