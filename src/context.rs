//! Application context
//!
//! The one object every view receives: configuration, the session and an
//! API client that reads that same session.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::render::Renderer;
use crate::session::{FileTokenStore, Session, TokenStore};

#[derive(Clone, Debug)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub session: Arc<Session>,
    pub api: ApiClient,
}

impl AppContext {
    /// Open the durable session named in the configuration
    pub fn bootstrap(config: Config) -> Result<Self, ApiError> {
        let store = FileTokenStore::boxed(config.session.token_path.clone());
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let session = Arc::new(Session::open(store));
        let api = ApiClient::new(&config.api, session.clone())?;

        tracing::debug!(
            backend = %api.base_url(),
            authenticated = session.is_authenticated(),
            "Context ready"
        );

        Ok(Self {
            config: Arc::new(config),
            session,
            api,
        })
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(&self.config.render)
    }

    pub fn admin_path(&self) -> &str {
        &self.config.site.admin_path
    }
}
