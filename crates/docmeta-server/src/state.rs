//! Shared application state.

use std::sync::Arc;

use docmeta_core::{DocMetaConfig, ToolCapabilities};
use docmeta_ingest::Ingester;

/// Shared application state accessible from all route handlers.
///
/// Everything here is read-only after startup.
pub struct AppState {
    pub config: DocMetaConfig,
    pub ingester: Arc<Ingester>,
    pub tools: ToolCapabilities,
}

impl AppState {
    pub fn new(config: DocMetaConfig, ingester: Ingester, tools: ToolCapabilities) -> Self {
        Self {
            config,
            ingester: Arc::new(ingester),
            tools,
        }
    }
}
