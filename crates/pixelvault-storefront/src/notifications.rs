// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use pixelvault_core::Clock;
use pixelvault_store::MutationOutcome;
use serde::Serialize;
use tracing::warn;

use crate::scheduler::{Scheduler, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(skip)]
    pub id: TaskId,
    pub message: String,
    pub kind: NotificationKind,
}

pub const CART_NOT_SAVED: &str = "Your cart could not be saved. Changes may be lost on reload.";

/// Toast queue. Each toast carries its own auto-dismiss task; dismissing a
/// toast early cancels that task.
#[derive(Debug)]
pub struct Notifications<C> {
    scheduler: Scheduler<C, ()>,
    ttl: Duration,
    active: Vec<Notification>,
}

impl<C: Clock> Notifications<C> {
    #[must_use]
    pub fn new(clock: C, ttl: Duration) -> Self {
        Self {
            scheduler: Scheduler::new(clock),
            ttl,
            active: Vec::new(),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind) -> TaskId {
        let id = self.scheduler.schedule_after(self.ttl, ());
        self.active.push(Notification {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Success toast for a cart change, or a warning when the change could
    /// not be written back to storage.
    pub fn push_cart_outcome(
        &mut self,
        outcome: &MutationOutcome,
        success: impl Into<String>,
    ) -> TaskId {
        if outcome.persisted {
            return self.push(success, NotificationKind::Success);
        }
        warn!(change = ?outcome.change, "cart change was not saved");
        self.push(CART_NOT_SAVED, NotificationKind::Warning)
    }

    pub fn dismiss(&mut self, id: TaskId) -> bool {
        self.scheduler.cancel(id);
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    /// Drops every toast whose time is up and returns them.
    pub fn expire(&mut self) -> Vec<Notification> {
        let due: Vec<TaskId> = self.scheduler.due().into_iter().map(|(id, ())| id).collect();
        let (expired, kept): (Vec<_>, Vec<_>) = self
            .active
            .drain(..)
            .partition(|n| due.contains(&n.id));
        self.active = kept;
        expired
    }

    #[must_use]
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    #[must_use]
    pub fn now_millis(&self) -> u64 {
        self.scheduler.now_millis()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }
}
