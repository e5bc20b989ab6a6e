/// Lower bound for the interval between two position samples.
pub const SAMPLE_RATE_MIN_MS: u32 = 50;

/// Upper bound for the interval between two position samples.
pub const SAMPLE_RATE_MAX_MS: u32 = 1000;

pub const DEFAULT_SAMPLE_RATE_MS: u32 = 100;

/// Amount a single wheel notch moves the sample rate.
pub const SAMPLE_RATE_STEP_MS: u32 = 50;

/// A path needs at least this many points before it can be drawn as a line.
pub const MIN_PATH_POINTS: usize = 2;

pub const TOAST_DURATION_MS: u64 = 1500;
pub const RATE_TOAST_DURATION_MS: u64 = 1200;
