// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use pixelvault_core::{
    resolve_config_path, resolve_data_dir, ConfigPathScope, ENV_PIXELVAULT_LOG_LEVEL,
};
use pixelvault_store::{FileCatalogSource, LocalFsStorage};
use pixelvault_storefront::StorefrontConfig;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::errors::CliError;

const DEFAULT_CATALOG_FILE: &str = "catalog.json";

#[derive(Clone, Copy)]
pub(crate) struct LogFlags {
    pub quiet: bool,
    pub verbose: u8,
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub json: bool,
}

impl OutputMode {
    /// Prints `payload` as one compact JSON line, or the rendered text.
    pub(crate) fn emit(
        self,
        payload: &Value,
        text: impl FnOnce() -> String,
    ) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string(payload)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

/// Logs go to stderr so stdout stays parseable in `--json` mode.
pub(crate) fn init_tracing(flags: LogFlags) {
    let level = match (flags.verbose, flags.quiet) {
        (0, true) => "error".to_string(),
        (0, false) => std::env::var(ENV_PIXELVAULT_LOG_LEVEL)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "warn".to_string()),
        (1, _) => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(crate) struct GlobalPaths {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

/// Everything a command needs, resolved once per invocation.
pub(crate) struct AppContext {
    pub config: StorefrontConfig,
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub storage: LocalFsStorage,
    pub output: OutputMode,
}

impl AppContext {
    pub(crate) fn resolve(paths: GlobalPaths, output: OutputMode) -> Result<Self, CliError> {
        let config_path = paths
            .config
            .unwrap_or_else(|| resolve_config_path(ConfigPathScope::User));
        let mut config = StorefrontConfig::load(&config_path)?;
        config.apply_env_overrides()?;
        config.validate()?;

        let data_dir = resolve_data_dir(paths.data_dir.as_deref());
        let catalog_path = paths
            .catalog
            .or_else(|| config.catalog_path.clone())
            .unwrap_or_else(|| data_dir.join(DEFAULT_CATALOG_FILE));
        debug!(
            config = %config_path.display(),
            data_dir = %data_dir.display(),
            catalog = %catalog_path.display(),
            "resolved storefront paths"
        );

        Ok(Self {
            storage: LocalFsStorage::new(data_dir.clone()),
            config,
            config_path,
            data_dir,
            catalog_path,
            output,
        })
    }

    #[must_use]
    pub(crate) fn catalog_source(&self) -> FileCatalogSource {
        FileCatalogSource::new(self.catalog_path.clone())
    }
}
