// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use pixelvault_core::Clock;
use pixelvault_store::{KeyValueStorage, NewsletterStore, SubscribeOutcome};
use tracing::{debug, warn};

use crate::forms::is_valid_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsletterState {
    Idle,
    Subscribed,
}

/// Signup box. Invalid input is ignored without feedback; a valid address
/// locks the widget into the subscribed state even if logging it fails.
pub struct NewsletterWidget<S, C> {
    store: NewsletterStore<S>,
    clock: C,
    state: NewsletterState,
}

impl<S: KeyValueStorage, C: Clock> NewsletterWidget<S, C> {
    #[must_use]
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            store: NewsletterStore::new(storage),
            clock,
            state: NewsletterState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> NewsletterState {
        self.state
    }

    pub fn submit(&mut self, email: &str) -> NewsletterState {
        let email = email.trim();
        if self.state == NewsletterState::Subscribed {
            return self.state;
        }
        if !is_valid_email(email) {
            debug!("newsletter submission ignored");
            return self.state;
        }
        let now = millis_to_utc(self.clock.now_millis());
        match self.store.subscribe(email, now) {
            Ok(SubscribeOutcome::Subscribed | SubscribeOutcome::AlreadySubscribed) => {}
            Err(err) => warn!(error = %err, "newsletter subscription not saved"),
        }
        self.state = NewsletterState::Subscribed;
        self.state
    }
}

pub(crate) fn millis_to_utc(millis: u64) -> DateTime<Utc> {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default()
}
