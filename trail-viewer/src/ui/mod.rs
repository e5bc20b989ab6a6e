//! Status overlay for recording feedback.
//!
//! `HudState` holds what the user should see; native builds draw it with Bevy UI
//! nodes, WASM builds write it into the host page's DOM elements.

/// Overlay state: record indicator, sample rate, toast and instructions.
pub mod hud;

/// HTML escaping helpers for DOM text.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub mod html;

/// Bevy UI rendering of the overlay for native windows.
#[cfg(not(target_arch = "wasm32"))]
pub mod native_overlay;

/// DOM rendering of the overlay through `web-sys` (WASM only).
#[cfg(target_arch = "wasm32")]
pub mod dom_overlay;
