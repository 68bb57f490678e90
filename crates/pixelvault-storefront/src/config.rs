// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pixelvault_model::DEFAULT_TAX_RATE;
use pixelvault_query::{QueryLimits, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StorefrontError, StorefrontErrorCode};

pub const ENV_PIXELVAULT_TAX_RATE: &str = "PIXELVAULT_TAX_RATE";
pub const ENV_PIXELVAULT_PAGE_SIZE: &str = "PIXELVAULT_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StorefrontConfig {
    pub tax_rate: f64,
    pub page_size: usize,
    pub max_page_size: usize,
    pub order_processing_delay_ms: u64,
    pub notification_ttl_ms: u64,
    pub countdown_duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: QueryLimits::default().max_page_size,
            order_processing_delay_ms: 2_000,
            notification_ttl_ms: 3_000,
            countdown_duration_ms: 24 * 60 * 60 * 1_000,
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Reads `path` when it exists. A missing file means defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self, StorefrontError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(StorefrontError::new(
                    StorefrontErrorCode::Config,
                    format!("read {}: {e}", path.display()),
                ))
            }
        };
        Self::from_json(&raw).map_err(|e| {
            StorefrontError::new(e.code, format!("{}: {}", path.display(), e.message))
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, StorefrontError> {
        serde_json::from_str(raw)
            .map_err(|e| StorefrontError::new(StorefrontErrorCode::Config, e.to_string()))
    }

    /// Applies `PIXELVAULT_TAX_RATE` and `PIXELVAULT_PAGE_SIZE` from the
    /// process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), StorefrontError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), StorefrontError> {
        if let Some(raw) = lookup(ENV_PIXELVAULT_TAX_RATE) {
            self.tax_rate = raw.trim().parse().map_err(|_| {
                StorefrontError::new(
                    StorefrontErrorCode::Config,
                    format!("{ENV_PIXELVAULT_TAX_RATE} must be a number, got `{raw}`"),
                )
            })?;
        }
        if let Some(raw) = lookup(ENV_PIXELVAULT_PAGE_SIZE) {
            self.page_size = raw.trim().parse().map_err(|_| {
                StorefrontError::new(
                    StorefrontErrorCode::Config,
                    format!("{ENV_PIXELVAULT_PAGE_SIZE} must be a positive integer, got `{raw}`"),
                )
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), StorefrontError> {
        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            return Err(StorefrontError::new(
                StorefrontErrorCode::Config,
                format!("tax_rate must be a non-negative number, got {}", self.tax_rate),
            ));
        }
        if self.page_size == 0 || self.page_size > self.max_page_size {
            return Err(StorefrontError::new(
                StorefrontErrorCode::Config,
                format!(
                    "page_size must be within 1..={}, got {}",
                    self.max_page_size, self.page_size
                ),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits::with_max_page_size(self.max_page_size)
    }

    #[must_use]
    pub fn order_processing_delay(&self) -> Duration {
        Duration::from_millis(self.order_processing_delay_ms)
    }

    #[must_use]
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    #[must_use]
    pub fn countdown_duration(&self) -> Duration {
        Duration::from_millis(self.countdown_duration_ms)
    }
}
