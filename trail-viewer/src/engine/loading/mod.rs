//! Startup loading of the viewer configuration.
//!
//! The app stays in `AppState::Loading` until the config asset resolves,
//! either loaded or failed, then moves to `AppState::Running`.

/// Config asset request, resolution and application.
pub mod config_loader;
