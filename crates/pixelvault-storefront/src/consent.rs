// SPDX-License-Identifier: Apache-2.0

use pixelvault_store::{ConsentStore, KeyValueStorage, StoreError};

/// Cookie bar: visible until the visitor accepts.
pub struct ConsentBanner<S> {
    store: ConsentStore<S>,
}

impl<S: KeyValueStorage> ConsentBanner<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            store: ConsentStore::new(storage),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.store.has_consented()
    }

    pub fn accept(&self) -> Result<(), StoreError> {
        self.store.accept()
    }
}
