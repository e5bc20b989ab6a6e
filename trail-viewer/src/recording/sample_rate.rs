use std::time::Duration;

use constants::recording::{DEFAULT_SAMPLE_RATE_MS, SAMPLE_RATE_MAX_MS, SAMPLE_RATE_MIN_MS};

/// Interval between two recorded samples, in milliseconds.
/// Every constructor clamps, so a `SampleRate` is always inside the allowed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleRate(u32);

impl SampleRate {
    pub const MIN: SampleRate = SampleRate(SAMPLE_RATE_MIN_MS);
    pub const MAX: SampleRate = SampleRate(SAMPLE_RATE_MAX_MS);

    pub fn new(millis: u32) -> Self {
        Self(millis.clamp(SAMPLE_RATE_MIN_MS, SAMPLE_RATE_MAX_MS))
    }

    pub fn millis(self) -> u32 {
        self.0
    }

    pub fn duration(self) -> Duration {
        Duration::from_millis(self.0 as u64)
    }

    /// Move one step in the direction of `direction`'s sign.
    /// Returns `None` when the clamped result equals the current rate.
    pub fn step(self, direction: i32, step_ms: u32) -> Option<Self> {
        let delta = direction.signum() as i64 * step_ms as i64;
        let target = (self.0 as i64 + delta)
            .clamp(SAMPLE_RATE_MIN_MS as i64, SAMPLE_RATE_MAX_MS as i64) as u32;

        (target != self.0).then_some(Self(target))
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_RATE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_into_range() {
        assert_eq!(SampleRate::new(0).millis(), 50);
        assert_eq!(SampleRate::new(49).millis(), 50);
        assert_eq!(SampleRate::new(250).millis(), 250);
        assert_eq!(SampleRate::new(1001).millis(), 1000);
        assert_eq!(SampleRate::new(u32::MAX).millis(), 1000);
    }

    #[test]
    fn default_is_one_hundred_millis() {
        assert_eq!(SampleRate::default().duration(), Duration::from_millis(100));
    }

    #[test]
    fn step_moves_by_step_size() {
        let rate = SampleRate::new(100);
        assert_eq!(rate.step(1, 50), Some(SampleRate::new(150)));
        assert_eq!(rate.step(-3, 50), Some(SampleRate::new(50)));
    }

    #[test]
    fn step_at_bounds_reports_no_change() {
        assert_eq!(SampleRate::MIN.step(-1, 50), None);
        assert_eq!(SampleRate::MAX.step(1, 50), None);
        assert_eq!(SampleRate::new(100).step(0, 50), None);
    }

    #[test]
    fn step_clamps_partial_moves() {
        assert_eq!(SampleRate::new(980).step(1, 50), Some(SampleRate::MAX));
        assert_eq!(SampleRate::new(60).step(-1, 50), Some(SampleRate::MIN));
    }
}
