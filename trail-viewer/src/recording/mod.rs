//! Position recording and path trails.
//!
//! While recording, the player camera's position is sampled on a fixed interval
//! and flattened onto the ground plane. Stopping freezes the samples into
//! `RecordedPaths` and spawns a gradient-coloured line trail.
//!
//! ```text
//! R key / trigger / RPC
//!   └─> RecordToggleEvent
//!       └─> apply_record_toggles()
//!           ├─> PathRecorder::start / stop
//!           ├─> HudState indicator + toast
//!           └─> PathSavedEvent ──> spawn_path_trails()
//! ```

/// Recorder resource, input handling and sampling systems.
pub mod recorder;

/// Stored paths from finished recordings.
pub mod path_store;

/// Clamped sample interval.
pub mod sample_rate;

/// Gradient palette and line mesh for rendered paths.
pub mod trail;
