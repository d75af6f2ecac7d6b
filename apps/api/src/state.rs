use std::sync::Arc;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::generation::policy::GenerationPolicy;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only corpus. SQLite-backed or a preloaded in-memory snapshot.
    pub corpus: Arc<dyn Corpus>,
    pub policy: GenerationPolicy,
    pub sessions: SessionStore,
    pub config: Config,
}
