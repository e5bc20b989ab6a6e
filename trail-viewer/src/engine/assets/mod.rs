//! Asset types loaded through the asset server.

/// Viewer tuning loaded from JSON, with validation and defaults.
pub mod viewer_config;
