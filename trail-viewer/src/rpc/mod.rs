//! JSON-RPC 2.0 communication layer for embedding the viewer in a host page.
//!
//! Implements bidirectional messaging between the Bevy app and a parent window
//! via iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Host (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({ "data": "value" }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//!
//! ## Existing Methods
//!
//! ### Recording
//! - `toggle_recording`: Start or stop a recording session
//! - `set_sample_rate`: Set the sampling interval, clamped to 50..=1000 ms
//! - `get_recorder_state`: Recording flag, sample rate, buffered and stored counts
//! - `get_recorded_paths`: Every stored path with its points and trail colours
//!
//! ### Diagnostics
//! - `get_fps`: Retrieve current frame rate
//!
//! ## Notifications
//! - `recording_started`, `recording_stopped`, `path_saved`, `sample_rate_changed`
//! - `fps_update`: every 0.5 s
//! - `debug_message`: echo of received messages and parse errors

/// JSON-RPC 2.0 bidirectional communication system.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
