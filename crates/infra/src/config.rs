//! Configuration loading and representation.
//!
//! Values come from the process environment with defaults for local
//! development:
//!
//! | variable | default |
//! |---|---|
//! | `STOCKROOM_PAGE_SIZE` | `200` (capped at 500) |
//! | `STOCKROOM_LOG` | `info` |

use thiserror::Error;

use crate::record_store::query::MAX_PER_PAGE;

pub const DEFAULT_PAGE_SIZE: u32 = 200;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for reading from the record store and for process logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Records fetched per `list` call when loading whole collections.
    pub page_size: u32,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests inject a map here).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("STOCKROOM_PAGE_SIZE") {
            let page_size: u32 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key: "STOCKROOM_PAGE_SIZE",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
            if page_size == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "STOCKROOM_PAGE_SIZE",
                    value: raw,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.page_size = page_size.min(MAX_PER_PAGE);
        }

        if let Some(filter) = lookup("STOCKROOM_LOG").filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter.trim().to_string();
        }

        Ok(config)
    }

    /// Install process-wide tracing with `log_filter` as the default filter.
    ///
    /// `RUST_LOG` still takes precedence. Later calls are no-ops.
    pub fn init_tracing(&self) {
        stockroom_observability::init_with_filter(&self.log_filter);
    }
}
