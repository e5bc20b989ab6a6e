//! Static scene: ground plane, marker cube, lighting and the player camera.

/// Startup spawning of scene entities and the player camera.
pub mod scene_setup;
