// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use pixelvault_core::{Clock, ManualClock, SystemClock};

#[test]
fn manual_clock_clones_share_time() {
    let clock = ManualClock::starting_at(1_000);
    let handle = clock.clone();
    handle.advance(Duration::from_millis(2_500));
    assert_eq!(clock.now_millis(), 3_500);
    handle.set(10);
    assert_eq!(clock.now_millis(), 10);
}

#[test]
fn system_clock_is_past_2020() {
    assert!(SystemClock.now_millis() > 1_577_836_800_000);
}
