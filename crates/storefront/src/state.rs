//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::controller::StorefrontController;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the page controller.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    controller: StorefrontController,
}

impl AppState {
    /// Create a new application state with a fresh controller.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let controller = StorefrontController::new(&config.backend);
        Self::with_controller(config, controller)
    }

    /// Create application state around an existing controller.
    #[must_use]
    pub fn with_controller(config: StorefrontConfig, controller: StorefrontController) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, controller }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the page controller.
    #[must_use]
    pub fn controller(&self) -> &StorefrontController {
        &self.inner.controller
    }
}
