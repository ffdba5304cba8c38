use std::sync::Arc;

use crate::auth::AdminSessions;
use crate::config::AppConfig;
use crate::database::SettingsStore;
use crate::gate::RouteTable;
use crate::settings::SettingsService;

/// Everything the router and middleware need, built once in `main` (or
/// directly in tests, with an in-memory store and a known secret).
#[derive(Clone)]
pub struct AppState {
    pub settings: SettingsService,
    pub sessions: Arc<AdminSessions>,
    pub routes: Arc<RouteTable>,
    pub admin_secret: Arc<str>,
    pub token_secret: Arc<str>,
    pub token_expiry_hours: u64,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings: SettingsService::new(
                store,
                config.gate.settings_read_timeout_ms,
                config.gate.cache_ttl_secs,
            ),
            sessions: Arc::new(AdminSessions::new()),
            routes: Arc::new(
                RouteTable::new()
                    .with_extra_bypass_prefixes(config.gate.extra_bypass_prefixes.clone()),
            ),
            admin_secret: config.security.admin_secret.as_str().into(),
            token_secret: config.security.token_secret.as_str().into(),
            token_expiry_hours: config.security.token_expiry_hours,
        }
    }
}
