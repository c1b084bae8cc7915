//! Server configuration for the Unstra site.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `UNSTRA_*` environment variables.

use std::net::SocketAddr;

use unstra_core::progress::{
    DEFAULT_BASE_PERCENT, DEFAULT_CAP_PERCENT, DEFAULT_COHORT_LIMIT, DEFAULT_SIGNUPS_PER_POINT,
};
use unstra_core::{CohortMeter, ProgressError};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SITE_URL: &str = "https://unstra.com";
const DEFAULT_CONTACT_EMAIL: &str = "hello@unstra.com";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The progress meter settings are inconsistent.
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Storage backend type.
    pub storage_backend: StorageBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Public-facing site settings.
    pub site: SiteConfig,
    /// Founding-cohort progress meter.
    pub meter: CohortMeter,
}

/// Settings that show up in rendered pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Canonical site URL without a trailing slash (e.g., `https://unstra.com`).
    pub site_url: String,
    /// Address for the footer's email link.
    pub contact_email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_owned(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_owned(),
        }
    }
}

impl SiteConfig {
    /// LinkedIn share link for the site.
    #[must_use]
    pub fn linkedin_share_url(&self) -> String {
        format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}",
            urlencoding::encode(&self.site_url)
        )
    }
}

/// Supported storage backend types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendType {
    /// In-memory (development only, signups lost on restart).
    Memory,
    /// Embedded redb file.
    Redb { path: String },
    /// `PostgreSQL` table (recommended for hosted deployments).
    Postgres { url: String },
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `UNSTRA_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `UNSTRA_STORAGE` — `memory`, `redb`, or `postgres` (default: `memory`)
    /// - `UNSTRA_STORAGE_PATH` — redb file path (default: `./data/waitlist.redb`)
    /// - `DATABASE_URL` — `PostgreSQL` connection string (used when `UNSTRA_STORAGE=postgres`)
    /// - `UNSTRA_LOG_LEVEL` — log filter (default: `info`)
    /// - `UNSTRA_SITE_URL` — canonical site URL (default: `https://unstra.com`)
    /// - `UNSTRA_CONTACT_EMAIL` — footer contact address (default: `hello@unstra.com`)
    /// - `UNSTRA_PROGRESS_BASE` — starting fill percentage (default: `88`)
    /// - `UNSTRA_PROGRESS_PER_POINT` — signups per extra percentage point (default: `50`)
    /// - `UNSTRA_PROGRESS_CAP` — maximum fill percentage (default: `98`)
    /// - `UNSTRA_COHORT_LIMIT` — founding cohort size shown under the bar (default: `500`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Progress`] if the progress settings are inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Progress`] if the progress settings are inconsistent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Priority: UNSTRA_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = lookup("UNSTRA_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
        };

        let storage_backend = match lookup("UNSTRA_STORAGE")
            .unwrap_or_else(|| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "redb" => StorageBackendType::Redb {
                path: lookup("UNSTRA_STORAGE_PATH")
                    .unwrap_or_else(|| "./data/waitlist.redb".to_owned()),
            },
            "postgres" | "postgresql" => StorageBackendType::Postgres {
                url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| "postgres://localhost/unstra".to_owned()),
            },
            _ => StorageBackendType::Memory,
        };

        let log_level = lookup("UNSTRA_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let site = SiteConfig {
            site_url: lookup("UNSTRA_SITE_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_owned()),
            contact_email: lookup("UNSTRA_CONTACT_EMAIL")
                .unwrap_or_else(|| DEFAULT_CONTACT_EMAIL.to_owned()),
        };

        let number = |key: &str, default: f64| -> f64 {
            lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
        };
        let meter = CohortMeter::new(
            number("UNSTRA_PROGRESS_BASE", DEFAULT_BASE_PERCENT),
            number("UNSTRA_PROGRESS_PER_POINT", DEFAULT_SIGNUPS_PER_POINT),
            number("UNSTRA_PROGRESS_CAP", DEFAULT_CAP_PERCENT),
            lookup("UNSTRA_COHORT_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_COHORT_LIMIT),
        )?;

        Ok(Self {
            bind_addr,
            storage_backend,
            log_level,
            site,
            meter,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.storage_backend, StorageBackendType::Memory);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.site, SiteConfig::default());
        assert_eq!(config.meter, CohortMeter::default());
    }

    #[test]
    fn port_binds_all_interfaces() {
        let config = load(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_overrides_port() {
        let config = load(&[("PORT", "8080"), ("UNSTRA_BIND_ADDR", "127.0.0.1:9000")]).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn storage_selection() {
        let config = load(&[("UNSTRA_STORAGE", "Postgres"), ("DATABASE_URL", "postgres://db/x")])
            .unwrap();
        assert_eq!(
            config.storage_backend,
            StorageBackendType::Postgres {
                url: "postgres://db/x".to_owned()
            }
        );

        let config = load(&[("UNSTRA_STORAGE", "redb")]).unwrap();
        assert_eq!(
            config.storage_backend,
            StorageBackendType::Redb {
                path: "./data/waitlist.redb".to_owned()
            }
        );

        let config = load(&[("UNSTRA_STORAGE", "carrier-pigeon")]).unwrap();
        assert_eq!(config.storage_backend, StorageBackendType::Memory);
    }

    #[test]
    fn site_url_trailing_slash_is_trimmed() {
        let config = load(&[("UNSTRA_SITE_URL", "https://staging.unstra.com/")]).unwrap();
        assert_eq!(config.site.site_url, "https://staging.unstra.com");
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = load(&[("UNSTRA_PROGRESS_BASE", "lots"), ("PORT", "http")]).unwrap();
        assert_eq!(config.meter, CohortMeter::default());
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn inconsistent_meter_is_rejected() {
        let result = load(&[("UNSTRA_PROGRESS_BASE", "99"), ("UNSTRA_PROGRESS_CAP", "90")]);
        assert!(matches!(result, Err(ConfigError::Progress(_))));
    }

    #[test]
    fn linkedin_share_url_is_encoded() {
        let site = SiteConfig::default();
        assert_eq!(
            site.linkedin_share_url(),
            "https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2Funstra.com"
        );
    }
}
