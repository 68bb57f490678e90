// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Subscribed,
    Unsubscribed,
}

/// One entry of the write-only subscription log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub email: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: SubscriptionStatus,
}

impl NewsletterSubscription {
    #[must_use]
    pub fn subscribed(email: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            date,
            status: SubscriptionStatus::Subscribed,
        }
    }

    #[must_use]
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}
