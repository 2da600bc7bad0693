use std::sync::Arc;

use crate::config::Config;
use crate::interview::generator::QuestionGenerator;
use crate::persistence::SessionPersistence;
use crate::session::registry::SessionRegistry;

/// Shared application state handed to every session driver.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<QuestionGenerator>,
    /// Privacy adapter over the configured sink (JSONL by default, Postgres if configured).
    pub persistence: Arc<dyn SessionPersistence>,
    pub sessions: SessionRegistry,
    pub config: Config,
}
