use std::time::Duration;

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use constants::recording::DEFAULT_SAMPLE_RATE_MS;
use constants::render_settings::{INDICATOR_IDLE_COLOUR, INDICATOR_RECORDING_COLOUR};

pub const DESKTOP_INSTRUCTIONS: &str =
    "Click to look around\nWASD to move\nR to Record\nWheel to change rate";
pub const XR_INSTRUCTIONS: &str = "Enter VR\nTrigger to Record\nR key fallback";

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    timer: Timer,
}

/// Contents of the status overlay: record indicator, sample rate, toast and instructions.
/// Native UI nodes and the web page's DOM elements both render from this.
#[derive(Resource, Debug, Clone)]
pub struct HudState {
    pub recording: bool,
    pub sample_rate_ms: u32,
    pub toast: Option<Toast>,
    pub instructions: String,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            recording: false,
            sample_rate_ms: DEFAULT_SAMPLE_RATE_MS,
            toast: None,
            instructions: String::new(),
        }
    }
}

impl HudState {
    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    pub fn set_sample_rate(&mut self, millis: u32) {
        self.sample_rate_ms = millis;
    }

    /// Replace any visible toast with `message` for `duration`.
    pub fn show_toast(&mut self, message: impl Into<String>, duration: Duration) {
        self.toast = Some(Toast {
            message: message.into(),
            timer: Timer::new(duration, TimerMode::Once),
        });
    }

    pub fn set_instructions(&mut self, text: impl Into<String>) {
        self.instructions = text.into();
    }

    pub fn indicator_label(&self) -> &'static str {
        if self.recording {
            "R — Recording..."
        } else {
            "R — Record"
        }
    }

    pub fn indicator_border(&self) -> Color {
        if self.recording {
            INDICATOR_RECORDING_COLOUR
        } else {
            INDICATOR_IDLE_COLOUR
        }
    }

    pub fn sample_rate_label(&self) -> String {
        format!("Sample Rate: {}ms", self.sample_rate_ms)
    }

    pub fn visible_toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|toast| toast.message.as_str())
    }

    /// Advance the toast timer. Returns `true` when the toast just expired.
    pub fn tick_toast(&mut self, delta: Duration) -> bool {
        let Some(toast) = self.toast.as_mut() else {
            return false;
        };

        if toast.timer.tick(delta).finished() {
            self.toast = None;
            return true;
        }
        false
    }
}

/// Ticks toast lifetimes without flagging the HUD as changed every frame.
pub fn expire_toasts(time: Res<Time>, mut hud: ResMut<HudState>) {
    if hud.bypass_change_detection().tick_toast(time.delta()) {
        hud.set_changed();
    }
}

/// Crosshair cursor while recording.
pub fn sync_cursor_icon(
    mut commands: Commands,
    hud: Res<HudState>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    if !hud.is_changed() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };

    let icon = if hud.recording {
        SystemCursorIcon::Crosshair
    } else {
        SystemCursorIcon::Default
    };
    commands.entity(window).insert(CursorIcon::System(icon));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_follows_recording_state() {
        let mut hud = HudState::default();
        assert_eq!(hud.indicator_label(), "R — Record");
        assert_eq!(hud.indicator_border(), Color::WHITE);

        hud.set_recording(true);
        assert_eq!(hud.indicator_label(), "R — Recording...");
        assert_eq!(hud.indicator_border(), INDICATOR_RECORDING_COLOUR);
    }

    #[test]
    fn sample_rate_label_formats_millis() {
        let mut hud = HudState::default();
        assert_eq!(hud.sample_rate_label(), "Sample Rate: 100ms");
        hud.set_sample_rate(350);
        assert_eq!(hud.sample_rate_label(), "Sample Rate: 350ms");
    }

    #[test]
    fn toast_expires_after_its_duration() {
        let mut hud = HudState::default();
        hud.show_toast("Recording started...", Duration::from_millis(1500));

        assert!(!hud.tick_toast(Duration::from_millis(1000)));
        assert_eq!(hud.visible_toast(), Some("Recording started..."));

        assert!(hud.tick_toast(Duration::from_millis(500)));
        assert_eq!(hud.visible_toast(), None);
        assert!(!hud.tick_toast(Duration::from_millis(500)));
    }

    #[test]
    fn new_toast_replaces_the_old_one() {
        let mut hud = HudState::default();
        hud.show_toast("first", Duration::from_millis(1500));
        hud.tick_toast(Duration::from_millis(1400));
        hud.show_toast("second", Duration::from_millis(1200));

        assert!(!hud.tick_toast(Duration::from_millis(200)));
        assert_eq!(hud.visible_toast(), Some("second"));
    }
}
