// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Shared foundations for the PixelVault storefront crates.
//!
//! Nothing in here knows about products or carts. It holds the error model,
//! validated identifiers, canonical JSON hashing, path resolution and the
//! clock port that the scheduling code is written against.

pub mod canonical;
mod domain;
mod errors;
mod ports;
mod types;

pub use domain::config::{resolve_config_path, resolve_data_dir, ConfigPathScope};
pub use errors::{Error, ErrorContext, ExitCode, MachineError, Result, ResultExt};
pub use ports::clock::{Clock, ManualClock, SystemClock};
pub use types::ids::{OrderId, ProductId, ID_MAX_LEN};

pub const CRATE_NAME: &str = "pixelvault-core";

pub const ENV_PIXELVAULT_LOG_LEVEL: &str = "PIXELVAULT_LOG_LEVEL";
pub const ENV_PIXELVAULT_DATA_DIR: &str = "PIXELVAULT_DATA_DIR";
pub const ENV_PIXELVAULT_CONFIG: &str = "PIXELVAULT_CONFIG";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    canonical::stable_hash_hex(bytes)
}
