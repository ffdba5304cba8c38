use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::warn;

use crate::database::{Settings, SettingsStore, StoreError};

/// Read/write access to the settings record with the gating contract applied:
/// reads never fail (missing record, store error, and timeout all degrade to
/// the default), writes surface their errors to the caller.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    read_timeout: Duration,
    cache_ttl: Duration,
    cached: Arc<RwLock<Option<CachedFlag>>>,
}

#[derive(Clone, Copy)]
struct CachedFlag {
    settings: Settings,
    fetched_at: Instant,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>, read_timeout_ms: u64, cache_ttl_secs: u64) -> Self {
        Self {
            store,
            read_timeout: Duration::from_millis(read_timeout_ms),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Current settings, fail-open. Used by the request gate and by
    /// `GET /api/settings`, both of which must answer even when the store
    /// is down or slow.
    pub async fn current(&self) -> Settings {
        if !self.cache_ttl.is_zero() {
            if let Some(cached) = *self.cached.read().await {
                if cached.fetched_at.elapsed() < self.cache_ttl {
                    return cached.settings;
                }
            }
        }

        let settings = match tokio::time::timeout(self.read_timeout, self.store.read()).await {
            Ok(Ok(Some(settings))) => settings,
            Ok(Ok(None)) => Settings::default(),
            Ok(Err(err)) => {
                warn!("Settings read failed, falling back to defaults: {}", err);
                Settings::default()
            }
            Err(_) => {
                warn!(
                    "Settings read timed out after {:?}, falling back to defaults",
                    self.read_timeout
                );
                Settings::default()
            }
        };

        if !self.cache_ttl.is_zero() {
            *self.cached.write().await =
                Some(CachedFlag { settings, fetched_at: Instant::now() });
        }

        settings
    }

    /// Convenience for the gate's branching decision.
    pub async fn maintenance_mode(&self) -> bool {
        self.current().await.maintenance_mode
    }

    /// Upsert the flag. Errors are surfaced: a failed toggle must be
    /// reported to the operator, never claimed as success.
    pub async fn set_maintenance_mode(&self, maintenance_mode: bool) -> Result<Settings, StoreError> {
        let stored = self.store.write(maintenance_mode).await?;
        if !self.cache_ttl.is_zero() {
            // A successful write from this process refreshes the cache so the
            // operator's own toggle is visible here immediately.
            *self.cached.write().await =
                Some(CachedFlag { settings: stored, fetched_at: Instant::now() });
        }
        Ok(stored)
    }

    /// Store reachability for the health endpoint. Reads through the raw
    /// store on purpose so degradation is reported instead of absorbed.
    pub async fn probe(&self) -> Result<(), StoreError> {
        match tokio::time::timeout(self.read_timeout, self.store.read()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(StoreError::Unavailable("settings read timed out".to_string())),
        }
    }
}
