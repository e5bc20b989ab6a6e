/// Horizontal acceleration applied while a movement key is held (m/s²).
pub const MOVE_ACCELERATION: f32 = 15.0;

/// Exponential velocity decay per second.
pub const MOVE_DAMPING: f32 = 10.0;

/// Radians of rotation per pixel of mouse motion.
pub const LOOK_SENSITIVITY: f32 = 0.002;

/// Pitch stays just short of straight up/down.
pub const PITCH_LIMIT: f32 = 1.55;
