//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, the config-loading
//! state transition and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset loading, recording, camera and HUD systems,
/// plus platform-specific overlays.
pub mod app_setup;

/// Application state machine.
pub mod app_state;

/// Fatal-error page shown in place of the canvas on WASM builds.
#[cfg(target_arch = "wasm32")]
pub mod error_page;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
