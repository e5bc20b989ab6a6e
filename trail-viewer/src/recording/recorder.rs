use std::time::Duration;

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use constants::recording::MIN_PATH_POINTS;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::path_store::RecordedPaths;
use super::sample_rate::SampleRate;
use super::trail::TrailPalette;
use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::scene::scene_setup::PlayerCamera;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::ui::hud::HudState;

/// Result of stopping an active recording.
#[derive(Debug, Clone, PartialEq)]
pub enum StopOutcome {
    /// Enough points were buffered; the frozen path is handed back.
    Saved(Vec<Vec3>),
    /// Fewer than two points; nothing can be drawn.
    NotEnoughPoints(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    Started,
    Stopped(StopOutcome),
}

/// Samples the camera's ground position on a fixed interval while active.
#[derive(Resource, Debug)]
pub struct PathRecorder {
    recording: bool,
    sample_rate: SampleRate,
    timer: Timer,
    buffer: Vec<Vec3>,
}

impl Default for PathRecorder {
    fn default() -> Self {
        Self::new(SampleRate::default())
    }
}

impl PathRecorder {
    pub fn new(sample_rate: SampleRate) -> Self {
        Self {
            recording: false,
            sample_rate,
            timer: Timer::new(sample_rate.duration(), TimerMode::Repeating),
            buffer: Vec::new(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    pub fn buffered(&self) -> &[Vec3] {
        &self.buffer
    }

    /// Begin a fresh session. Returns `false` if one was already running.
    pub fn start(&mut self) -> bool {
        if self.recording {
            return false;
        }

        self.recording = true;
        self.buffer.clear();
        self.timer = Timer::new(self.sample_rate.duration(), TimerMode::Repeating);
        true
    }

    /// End the session and freeze the buffer. `None` when idle.
    pub fn stop(&mut self) -> Option<StopOutcome> {
        if !self.recording {
            return None;
        }

        self.recording = false;
        self.timer.pause();

        let points = std::mem::take(&mut self.buffer);
        if points.len() >= MIN_PATH_POINTS {
            Some(StopOutcome::Saved(points))
        } else {
            Some(StopOutcome::NotEnoughPoints(points.len()))
        }
    }

    pub fn toggle(&mut self) -> ToggleOutcome {
        match self.stop() {
            Some(outcome) => ToggleOutcome::Stopped(outcome),
            None => {
                self.start();
                ToggleOutcome::Started
            }
        }
    }

    /// Advance the sampling clock; each elapsed interval records `position` on the ground plane.
    pub fn tick(&mut self, delta: Duration, position: Vec3) -> u32 {
        if !self.recording {
            return 0;
        }

        self.timer.tick(delta);
        let samples = self.timer.times_finished_this_tick();
        let flattened = Vec3::new(position.x, 0.0, position.z);
        self.buffer
            .extend(std::iter::repeat_n(flattened, samples as usize));
        samples
    }

    /// Store a new rate. An active session restarts at the new rate with an
    /// empty buffer; nothing is saved from the discarded samples.
    pub fn set_sample_rate(&mut self, rate: SampleRate) -> bool {
        if rate == self.sample_rate {
            return false;
        }

        self.sample_rate = rate;
        self.timer = Timer::new(rate.duration(), TimerMode::Repeating);
        if self.recording {
            self.buffer.clear();
        } else {
            self.timer.pause();
        }
        true
    }
}

/// Randomness for trail palettes.
#[derive(Resource)]
pub struct TrailRng(pub StdRng);

impl Default for TrailRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Gamepad,
    Wheel,
    Rpc,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct RecordToggleEvent {
    pub source: InputSource,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SetSampleRateEvent {
    pub rate: SampleRate,
    pub source: InputSource,
}

/// Fired once a frozen path has been stored in `RecordedPaths`.
#[derive(Event, Debug, Clone, Copy)]
pub struct PathSavedEvent {
    pub id: u32,
}

pub fn handle_record_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut toggles: EventWriter<RecordToggleEvent>,
) {
    // just_pressed ignores key repeat.
    if keyboard.just_pressed(KeyCode::KeyR) {
        toggles.write(RecordToggleEvent {
            source: InputSource::Keyboard,
        });
    }

    for gamepad in &gamepads {
        if gamepad.just_pressed(GamepadButton::RightTrigger2) {
            toggles.write(RecordToggleEvent {
                source: InputSource::Gamepad,
            });
        }
    }
}

/// Each wheel notch moves the sample rate one step. Scrolling down slows sampling.
/// Ctrl/Super + wheel is left to the host (browser zoom).
pub fn handle_sample_rate_wheel(
    mut wheel: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    recorder: Res<PathRecorder>,
    config: Res<ViewerConfig>,
    mut rate_events: EventWriter<SetSampleRateEvent>,
) {
    if keyboard.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ]) {
        wheel.clear();
        return;
    }

    let mut rate = recorder.sample_rate();
    for event in wheel.read() {
        if event.y == 0.0 {
            continue;
        }
        let direction = if event.y > 0.0 { -1 } else { 1 };

        if let Some(next) = rate.step(direction, config.sample_rate_step_ms) {
            rate = next;
            rate_events.write(SetSampleRateEvent {
                rate,
                source: InputSource::Wheel,
            });
        }
    }
}

pub fn apply_sample_rate_changes(
    mut events: EventReader<SetSampleRateEvent>,
    mut recorder: ResMut<PathRecorder>,
    mut hud: ResMut<HudState>,
    config: Res<ViewerConfig>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        if !recorder.set_sample_rate(event.rate) {
            continue;
        }

        let millis = event.rate.millis();
        hud.set_sample_rate(millis);
        hud.show_toast(
            format!("Sample Rate: {millis}ms"),
            Duration::from_millis(config.rate_toast_duration_ms),
        );

        if recorder.is_recording() {
            info!("Sample rate changed to {} ms, active recording restarted", millis);
        } else {
            info!("Sample rate changed to {} ms via {:?}", millis, event.source);
        }

        rpc_interface.send_notification(
            "sample_rate_changed",
            serde_json::json!({
                "sample_rate_ms": millis,
                "recording": recorder.is_recording(),
            }),
        );
    }
}

pub fn apply_record_toggles(
    mut events: EventReader<RecordToggleEvent>,
    mut recorder: ResMut<PathRecorder>,
    mut paths: ResMut<RecordedPaths>,
    mut rng: ResMut<TrailRng>,
    mut hud: ResMut<HudState>,
    config: Res<ViewerConfig>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut saved: EventWriter<PathSavedEvent>,
) {
    let toast_duration = Duration::from_millis(config.toast_duration_ms);

    for event in events.read() {
        match recorder.toggle() {
            ToggleOutcome::Started => {
                hud.set_recording(true);
                hud.show_toast("Recording started...", toast_duration);
                info!(
                    "Recording started via {:?}. Sample rate: {} ms",
                    event.source,
                    recorder.sample_rate().millis()
                );

                rpc_interface.send_notification(
                    "recording_started",
                    serde_json::json!({
                        "sample_rate_ms": recorder.sample_rate().millis()
                    }),
                );
            }
            ToggleOutcome::Stopped(StopOutcome::Saved(points)) => {
                hud.set_recording(false);
                hud.show_toast("Recording stopped. Path saved.", toast_duration);

                let point_count = points.len();
                let palette = TrailPalette::random(&mut rng.0);
                let id = paths.push(points, recorder.sample_rate(), palette);
                saved.write(PathSavedEvent { id });

                info!(
                    "Recording stopped. Points recorded: {}. Total paths: {}",
                    point_count,
                    paths.len()
                );

                rpc_interface.send_notification(
                    "recording_stopped",
                    serde_json::json!({
                        "saved": true,
                        "point_count": point_count
                    }),
                );
                rpc_interface.send_notification(
                    "path_saved",
                    serde_json::json!({
                        "id": id,
                        "point_count": point_count,
                        "total_paths": paths.len()
                    }),
                );
            }
            ToggleOutcome::Stopped(StopOutcome::NotEnoughPoints(point_count)) => {
                hud.set_recording(false);
                hud.show_toast(
                    "Recording stopped. Not enough points to draw path.",
                    toast_duration,
                );
                warn!(
                    "Recording stopped with {} point(s); not enough to draw a path",
                    point_count
                );

                rpc_interface.send_notification(
                    "recording_stopped",
                    serde_json::json!({
                        "saved": false,
                        "point_count": point_count
                    }),
                );
            }
        }
    }
}

pub fn sample_camera_position(
    time: Res<Time>,
    mut recorder: ResMut<PathRecorder>,
    camera: Query<&GlobalTransform, With<PlayerCamera>>,
) {
    if !recorder.is_recording() {
        return;
    }
    let Ok(camera_transform) = camera.single() else {
        return;
    };

    recorder.tick(time.delta(), camera_transform.translation());
}
