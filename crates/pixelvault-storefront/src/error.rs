// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use pixelvault_query::QueryError;
use pixelvault_store::{StoreError, StoreErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorefrontErrorCode {
    Config,
    Validation,
    NotFound,
    Storage,
    Catalog,
}

impl StorefrontErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config_error",
            Self::Validation => "validation_error",
            Self::NotFound => "not_found",
            Self::Storage => "storage_error",
            Self::Catalog => "catalog_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontError {
    pub code: StorefrontErrorCode,
    pub message: String,
}

impl StorefrontError {
    #[must_use]
    pub fn new(code: StorefrontErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StorefrontError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StorefrontError {}

impl From<StoreError> for StorefrontError {
    fn from(value: StoreError) -> Self {
        let code = match value.code {
            StoreErrorCode::NotFound => StorefrontErrorCode::NotFound,
            StoreErrorCode::Validation => StorefrontErrorCode::Validation,
            _ => StorefrontErrorCode::Storage,
        };
        Self::new(code, value.message)
    }
}

impl From<QueryError> for StorefrontError {
    fn from(value: QueryError) -> Self {
        Self::new(StorefrontErrorCode::Validation, value.message)
    }
}
