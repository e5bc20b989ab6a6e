pub mod controls;
pub mod recording;
pub mod render_settings;
pub mod scene;
