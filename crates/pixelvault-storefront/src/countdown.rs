// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::time::Duration;

use serde::Serialize;

const URGENT_MINUTES: u64 = 10;

/// Flash-deal timer with a fixed end instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    ends_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownTick {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub urgent: bool,
    pub expired: bool,
}

impl Countdown {
    #[must_use]
    pub fn starting_at(now_millis: u64, duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self {
            ends_at: now_millis.saturating_add(millis),
        }
    }

    #[must_use]
    pub fn ends_at(&self) -> u64 {
        self.ends_at
    }

    /// Restarts the timer; used when expired deals are refreshed.
    pub fn reset(&mut self, now_millis: u64, duration: Duration) {
        *self = Self::starting_at(now_millis, duration);
    }

    #[must_use]
    pub fn tick(&self, now_millis: u64) -> CountdownTick {
        if now_millis >= self.ends_at {
            return CountdownTick {
                hours: 0,
                minutes: 0,
                seconds: 0,
                urgent: false,
                expired: true,
            };
        }
        let left = self.ends_at - now_millis;
        let hours = left / 3_600_000;
        let minutes = (left % 3_600_000) / 60_000;
        let seconds = (left % 60_000) / 1_000;
        CountdownTick {
            hours,
            minutes,
            seconds,
            urgent: hours == 0 && minutes < URGENT_MINUTES,
            expired: false,
        }
    }
}

impl fmt::Display for CountdownTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    #[test]
    fn full_day_reads_24_hours() {
        let timer = Countdown::starting_at(0, DAY);
        let tick = timer.tick(0);
        assert_eq!(tick.to_string(), "24:00:00");
        assert!(!tick.urgent);
    }

    #[test]
    fn last_ten_minutes_are_urgent() {
        let timer = Countdown::starting_at(0, DAY);
        let end = timer.ends_at();
        let tick = timer.tick(end - 9 * 60_000 - 59_000);
        assert_eq!((tick.hours, tick.minutes, tick.seconds), (0, 9, 59));
        assert!(tick.urgent);
        assert!(!timer.tick(end - 10 * 60_000).urgent);
    }

    #[test]
    fn expiry_and_reset() {
        let mut timer = Countdown::starting_at(0, Duration::from_secs(5));
        let tick = timer.tick(5_000);
        assert!(tick.expired);
        assert_eq!(tick.to_string(), "00:00:00");
        timer.reset(5_000, Duration::from_secs(5));
        assert!(!timer.tick(5_000).expired);
    }
}
