//! Bevy engine layer: scene, camera, loading and runtime systems.

/// Asset types loaded from JSON.
pub mod assets;

/// First-person camera controller.
pub mod camera;

/// Application setup, state and window configuration.
pub mod core;

/// Config loading and the transition into the running state.
pub mod loading;

/// Static scene spawning.
pub mod scene;

/// Runtime diagnostics systems.
pub mod systems;

/// WebXR support probe and control-mode selection.
pub mod xr_probe;
