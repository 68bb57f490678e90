// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use pixelvault_model::{parse_catalog_json, CatalogDocument};
use tracing::{debug, warn};

use crate::backend::{StoreError, StoreErrorCode};

/// Where the static product dataset comes from. Fetch failures are
/// reported, never retried here.
pub trait CatalogSource {
    fn fetch_catalog(&self) -> Result<CatalogDocument, StoreError>;
}

impl<C: CatalogSource + ?Sized> CatalogSource for &C {
    fn fetch_catalog(&self) -> Result<CatalogDocument, StoreError> {
        (**self).fetch_catalog()
    }
}

#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    pub path: PathBuf,
}

impl FileCatalogSource {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CatalogSource for FileCatalogSource {
    fn fetch_catalog(&self) -> Result<CatalogDocument, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            let code = if e.kind() == std::io::ErrorKind::NotFound {
                StoreErrorCode::NotFound
            } else {
                StoreErrorCode::Io
            };
            StoreError::new(code, format!("read {}: {e}", self.path.display()))
        })?;
        let doc = parse_catalog_json(&raw)
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        for issue in doc.issues() {
            warn!(path = %self.path.display(), issue = %issue, "inconsistent catalog record kept");
        }
        debug!(path = %self.path.display(), products = doc.products().len(), "catalog loaded");
        Ok(doc)
    }
}

/// In-memory dataset, or a canned failure for exercising error views.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    result: Result<CatalogDocument, StoreError>,
}

impl StaticCatalogSource {
    #[must_use]
    pub fn new(doc: CatalogDocument) -> Self {
        Self { result: Ok(doc) }
    }

    #[must_use]
    pub fn failing(error: StoreError) -> Self {
        Self { result: Err(error) }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn fetch_catalog(&self) -> Result<CatalogDocument, StoreError> {
        self.result.clone()
    }
}
