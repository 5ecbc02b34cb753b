//! Server state management.

use std::sync::Arc;

use quotescan_core::extraction::TableSource;
use quotescan_core::ExtractOptions;

/// Shared application state. Read-only after startup; every upload gets
/// its own bytes and its own document.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TableSource>,
    pub options: ExtractOptions,
}

impl AppState {
    pub fn new(source: Arc<dyn TableSource>, options: ExtractOptions) -> Self {
        Self { source, options }
    }

    pub fn backend_name(&self) -> &str {
        self.source.backend_name()
    }
}
