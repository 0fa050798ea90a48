use std::time::{SystemTime, UNIX_EPOCH};

use crate::time::TimeSource;

/// The host's wall clock.
///
/// Each call reads [`SystemTime::now`]. The reading follows every adjustment
/// made to the system clock, including NTP steps backwards; generators detect
/// those and report [`Error::ClockRolledBack`] rather than hiding them.
///
/// A system time earlier than the Unix epoch reads as `0`.
///
/// [`Error::ClockRolledBack`]: crate::Error::ClockRolledBack
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EPOCH;

    #[test]
    fn system_clock_is_past_default_epoch() {
        let now = SystemClock.current_millis();
        assert!(now > DEFAULT_EPOCH);
    }

    #[test]
    fn system_clock_tracks_wall_time() {
        let a = SystemClock.current_millis();
        std::thread::sleep(std::time::Duration::from_millis(3));
        let b = SystemClock.current_millis();
        assert!(b >= a + 2, "expected at least 2ms to pass ({a} -> {b})");
    }
}
