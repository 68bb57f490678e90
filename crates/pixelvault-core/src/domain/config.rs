// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

/// Which config file `resolve_config_path` looks for: the shopper's own,
/// or one checked in next to the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigPathScope {
    User,
    Workspace,
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Directory backing the storefront's persisted keys.
///
/// Resolution order: explicit path, `PIXELVAULT_DATA_DIR`, `XDG_DATA_HOME`,
/// `$HOME/.local/share`, then a relative `.pixelvault/data`.
#[must_use]
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(dir) = non_empty_env(crate::ENV_PIXELVAULT_DATA_DIR) {
        return PathBuf::from(dir);
    }

    if let Some(xdg_data_home) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("pixelvault");
    }

    if let Some(home) = non_empty_env("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("pixelvault");
    }

    PathBuf::from(".pixelvault").join("data")
}

#[must_use]
pub fn resolve_config_path(scope: ConfigPathScope) -> PathBuf {
    match scope {
        ConfigPathScope::User => {
            if let Some(explicit) = non_empty_env(crate::ENV_PIXELVAULT_CONFIG) {
                return PathBuf::from(explicit);
            }
            if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg_config_home)
                    .join("pixelvault")
                    .join("config.json");
            }
            if let Some(home) = non_empty_env("HOME") {
                return PathBuf::from(home)
                    .join(".config")
                    .join("pixelvault")
                    .join("config.json");
            }
            PathBuf::from(".pixelvault").join("config.json")
        }
        ConfigPathScope::Workspace => PathBuf::from(".pixelvault").join("config.json"),
    }
}
