use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub gate: GateConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Upper bound on the settings read performed per gated request.
    /// A timed-out read counts as a failed read (fail-open).
    pub settings_read_timeout_ms: u64,
    /// TTL for the cached flag value in seconds. 0 disables caching, so a
    /// toggle takes effect on the very next request.
    pub cache_ttl_secs: u64,
    /// Extra bypass prefixes appended to the built-in classification table.
    pub extra_bypass_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub admin_secret: String,
    pub token_secret: String,
    pub token_expiry_hours: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SITEGATE_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }

        // Gate overrides
        if let Ok(v) = env::var("GATE_SETTINGS_READ_TIMEOUT_MS") {
            self.gate.settings_read_timeout_ms =
                v.parse().unwrap_or(self.gate.settings_read_timeout_ms);
        }
        if let Ok(v) = env::var("GATE_CACHE_TTL_SECS") {
            self.gate.cache_ttl_secs = v.parse().unwrap_or(self.gate.cache_ttl_secs);
        }
        if let Ok(v) = env::var("GATE_BYPASS_PREFIXES") {
            self.gate.extra_bypass_prefixes = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Security overrides
        if let Ok(v) = env::var("ADMIN_SECRET") {
            self.security.admin_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_SECRET") {
            self.security.token_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_EXPIRY_HOURS") {
            self.security.token_expiry_hours =
                v.parse().unwrap_or(self.security.token_expiry_hours);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000, enable_cors: true },
            gate: GateConfig {
                settings_read_timeout_ms: 2000,
                cache_ttl_secs: 0,
                extra_bypass_prefixes: Vec::new(),
            },
            security: SecurityConfig {
                admin_secret: String::new(),
                token_secret: "dev-only-token-secret".to_string(),
                token_expiry_hours: 24,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000, enable_cors: true },
            gate: GateConfig {
                settings_read_timeout_ms: 1000,
                cache_ttl_secs: 1,
                extra_bypass_prefixes: Vec::new(),
            },
            security: SecurityConfig {
                admin_secret: String::new(),
                token_secret: String::new(),
                token_expiry_hours: 12,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000, enable_cors: false },
            gate: GateConfig {
                settings_read_timeout_ms: 500,
                cache_ttl_secs: 2,
                extra_bypass_prefixes: Vec::new(),
            },
            security: SecurityConfig {
                admin_secret: String::new(),
                token_secret: String::new(),
                token_expiry_hours: 4,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.gate.cache_ttl_secs, 0);
        assert_eq!(config.gate.settings_read_timeout_ms, 2000);
        assert!(config.server.enable_cors);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.gate.cache_ttl_secs, 2);
        assert_eq!(config.gate.settings_read_timeout_ms, 500);
        assert!(!config.server.enable_cors);
    }
}
