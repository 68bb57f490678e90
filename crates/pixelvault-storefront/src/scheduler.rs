// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::time::Duration;

use pixelvault_core::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Pending<T> {
    due_at: u64,
    task: T,
}

/// Deadline-ordered queue of cancellable tasks. Nothing runs on its own:
/// callers drain [`Scheduler::due`] whenever they want time to pass.
#[derive(Debug)]
pub struct Scheduler<C, T> {
    clock: C,
    next_id: u64,
    pending: BTreeMap<TaskId, Pending<T>>,
}

impl<C: Clock, T> Scheduler<C, T> {
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            next_id: 1,
            pending: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn schedule_after(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let due_at = self.clock.now_millis().saturating_add(delay_ms);
        self.pending.insert(id, Pending { due_at, task });
        id
    }

    /// Returns the task if it had not fired yet.
    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        self.pending.remove(&id).map(|p| p.task)
    }

    #[must_use]
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.contains_key(&id)
    }

    #[must_use]
    pub fn deadline(&self, id: TaskId) -> Option<u64> {
        self.pending.get(&id).map(|p| p.due_at)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.values().map(|p| p.due_at).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every task whose deadline has passed, earliest
    /// first; equal deadlines fire in scheduling order.
    pub fn due(&mut self) -> Vec<(TaskId, T)> {
        let now = self.clock.now_millis();
        let mut ready: Vec<(u64, TaskId)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due_at <= now)
            .map(|(id, p)| (p.due_at, *id))
            .collect();
        ready.sort_unstable();
        ready
            .into_iter()
            .filter_map(|(_, id)| self.pending.remove(&id).map(|p| (id, p.task)))
            .collect()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}
