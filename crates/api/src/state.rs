use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vuement_core::context::RequestContext;
use vuement_core::service::ComponentService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (timeouts, JWT settings).
    pub config: Arc<ServerConfig>,
    /// Component service with its store, rules and write policy.
    pub components: Arc<ComponentService>,
    /// Cancelled once the shutdown grace period runs out; every request
    /// context is a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: ServerConfig, components: ComponentService) -> Self {
        Self {
            config: Arc::new(config),
            components: Arc::new(components),
            shutdown: CancellationToken::new(),
        }
    }

    /// Context for one request's store calls: bounded by the store timeout
    /// and cancelled on forced shutdown.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(self.shutdown.child_token())
            .with_timeout(Duration::from_secs(self.config.store_timeout_secs))
    }
}
