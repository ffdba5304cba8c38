use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// The singleton site settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub maintenance_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { maintenance_mode: false }
    }
}

/// Errors from the settings store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Storage seam for the settings record. One durable implementation
/// (Postgres) and one in-memory implementation used by tests and by
/// deployments without a DATABASE_URL.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the settings record. `Ok(None)` means no record has been
    /// written yet; callers apply the default.
    async fn read(&self) -> Result<Option<Settings>, StoreError>;

    /// Upsert the singleton record and return what was stored.
    async fn write(&self, maintenance_mode: bool) -> Result<Settings, StoreError>;
}

/// Fixed primary key of the singleton row.
const SETTINGS_ROW_ID: i32 = 1;

/// Postgres-backed store. The settings table holds at most one row,
/// enforced by a CHECK constraint on the fixed id.
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    /// Connect using DATABASE_URL and make sure the settings table exists.
    pub async fn connect() -> Result<Self, StoreError> {
        let url = Self::database_url()?;
        let pool = PgPoolOptions::new().connect(&url).await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        info!("Connected settings store: {}", redact_url(&url));
        Ok(store)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn database_url() -> Result<String, StoreError> {
        let base = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;
        // Validate early so a malformed URL fails at startup, not per request
        url::Url::parse(&base).map_err(|_| StoreError::InvalidDatabaseUrl)?;
        Ok(base)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                maintenance_mode BOOLEAN NOT NULL DEFAULT FALSE,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn read(&self) -> Result<Option<Settings>, StoreError> {
        let row = sqlx::query("SELECT maintenance_mode FROM settings WHERE id = $1")
            .bind(SETTINGS_ROW_ID)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Settings { maintenance_mode: r.get::<bool, _>("maintenance_mode") }))
    }

    async fn write(&self, maintenance_mode: bool) -> Result<Settings, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO settings (id, maintenance_mode, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (id) DO UPDATE
                SET maintenance_mode = EXCLUDED.maintenance_mode,
                    updated_at = now()
            RETURNING maintenance_mode
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(maintenance_mode)
        .fetch_one(&self.pool)
        .await?;

        Ok(Settings { maintenance_mode: row.get::<bool, _>("maintenance_mode") })
    }
}

/// In-memory store with the same upsert semantics. Backs the test suite and
/// DB-less development runs; state does not survive a restart.
#[derive(Default)]
pub struct MemorySettingsStore {
    record: RwLock<Option<Settings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn read(&self) -> Result<Option<Settings>, StoreError> {
        Ok(*self.record.read().await)
    }

    async fn write(&self, maintenance_mode: bool) -> Result<Settings, StoreError> {
        let settings = Settings { maintenance_mode };
        *self.record.write().await = Some(settings);
        Ok(settings)
    }
}

fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("****"));
            }
            url.to_string()
        }
        Err(_) => "<unparseable url>".to_string(),
    }
}
