// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use pixelvault_core::{ErrorContext, ExitCode, MachineError};
use pixelvault_model::ValidationError;
use pixelvault_query::QueryError;
use pixelvault_store::{StoreError, StoreErrorCode};
use pixelvault_storefront::{StorefrontError, StorefrontErrorCode};

#[derive(Debug)]
pub(crate) struct CliError {
    pub(crate) exit_code: ExitCode,
    pub(crate) machine: MachineError,
}

impl CliError {
    pub(crate) fn new(exit_code: ExitCode, code: &str, message: &str) -> Self {
        Self {
            exit_code,
            machine: MachineError::new(code, message),
        }
    }

    pub(crate) fn usage(message: &str) -> Self {
        Self::new(ExitCode::Usage, "usage_error", message)
    }

    pub(crate) fn validation(code: &str, message: &str) -> Self {
        Self::new(ExitCode::Validation, code, message)
    }

    pub(crate) fn dependency(code: &str, message: &str) -> Self {
        Self::new(ExitCode::DependencyFailure, code, message)
    }

    pub(crate) fn internal(message: &str) -> Self {
        Self::new(ExitCode::Internal, "internal_error", message)
    }

    #[must_use]
    pub(crate) fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.machine = self.machine.with_detail(key, value);
        self
    }
}

impl From<StorefrontError> for CliError {
    fn from(value: StorefrontError) -> Self {
        let exit_code = match value.code {
            StorefrontErrorCode::Config
            | StorefrontErrorCode::Validation
            | StorefrontErrorCode::NotFound => ExitCode::Validation,
            StorefrontErrorCode::Storage | StorefrontErrorCode::Catalog => {
                ExitCode::DependencyFailure
            }
            _ => ExitCode::Internal,
        };
        Self::new(exit_code, value.code.as_str(), &value.message)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        let exit_code = match value.code {
            StoreErrorCode::Validation => ExitCode::Validation,
            StoreErrorCode::Internal => ExitCode::Internal,
            _ => ExitCode::DependencyFailure,
        };
        Self::new(exit_code, value.code.as_str(), &value.message)
    }
}

impl From<QueryError> for CliError {
    fn from(value: QueryError) -> Self {
        Self::validation(value.code.as_str(), &value.message)
    }
}

impl From<ValidationError> for CliError {
    fn from(value: ValidationError) -> Self {
        Self::validation("validation_error", &value.0)
    }
}

impl From<pixelvault_core::Error> for CliError {
    fn from(value: pixelvault_core::Error) -> Self {
        Self::validation("invalid_input", &value.to_string())
    }
}

impl<E: Display> From<ErrorContext<E>> for CliError {
    fn from(value: ErrorContext<E>) -> Self {
        Self::dependency("io_error", &value.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::internal(&format!("failed to encode output: {value}"))
    }
}

pub(crate) fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        eprintln!("{}", error.machine.to_json_line());
    } else {
        eprintln!("{}", error.machine.message);
    }
}
