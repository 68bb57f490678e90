// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const ID_MAX_LEN: usize = 128;
const ORDER_ID_PREFIX: &str = "OGFL-";

/// Opaque catalog identifier, stable for the lifetime of the dataset.
/// Any non-empty text without control characters is accepted, spaces included.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_opaque_id("product_id", &value)?;
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl OrderId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_opaque_id("order_id", &value)?;
        let Some(rest) = value.strip_prefix(ORDER_ID_PREFIX) else {
            return Err(Error::InvalidIdentifier {
                kind: "order_id",
                value,
                reason: "must start with OGFL-",
            });
        };
        if rest.is_empty()
            || !rest
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(Error::InvalidIdentifier {
                kind: "order_id",
                value,
                reason: "must contain only [A-Z0-9-] after the prefix",
            });
        }
        Ok(Self(value))
    }

    /// Builds `OGFL-<timestamp>-<suffix>` from base36 parts, uppercased.
    pub fn from_parts(timestamp_base36: &str, suffix_base36: &str) -> Result<Self> {
        Self::new(format!("{ORDER_ID_PREFIX}{timestamp_base36}-{suffix_base36}").to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_opaque_id(kind: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidIdentifier {
            kind,
            value: value.to_owned(),
            reason: "must not be empty",
        });
    }

    if value.len() > ID_MAX_LEN {
        return Err(Error::InvalidIdentifier {
            kind,
            value: value.to_owned(),
            reason: "must be at most 128 bytes",
        });
    }

    if value.chars().any(char::is_control) {
        return Err(Error::InvalidIdentifier {
            kind,
            value: value.to_owned(),
            reason: "must not contain control characters",
        });
    }

    Ok(())
}

macro_rules! impl_id_traits {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }
    };
}

impl_id_traits!(ProductId);
impl_id_traits!(OrderId);
