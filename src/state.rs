/**
 * Application State
 * Shared, cheaply clonable handles passed to every handler
 */
use std::sync::Arc;

use crate::config::Config;
use crate::content::SiteContext;
use crate::routes::auth::AuthStore;

#[derive(Clone)]
pub struct AppState {
    /// Content loaded once at startup; read-only afterwards.
    pub site: Arc<SiteContext>,
    pub config: Arc<Config>,
    pub auth: Arc<AuthStore>,
}

impl AppState {
    pub fn new(site: Arc<SiteContext>, config: Arc<Config>) -> Self {
        Self {
            site,
            config,
            auth: Arc::new(AuthStore::default()),
        }
    }
}
