use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::camera::first_person::FirstPersonController;
use crate::engine::core::app_state::AppState;
use crate::recording::recorder::PathRecorder;
use crate::recording::sample_rate::SampleRate;
use crate::ui::hud::HudState;

const VIEWER_CONFIG_PATH: &str = "viewer_config.json";

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<ViewerConfig>>,
}

pub fn start_config_loading(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    println!("Loading viewer config from: {}", VIEWER_CONFIG_PATH);
    loader.handle = Some(asset_server.load(VIEWER_CONFIG_PATH));
}

/// Wait for the config asset; a failed load keeps the built-in defaults.
pub fn load_config_system(
    mut commands: Commands,
    loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<ViewerConfig>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = &loader.handle else {
        return;
    };

    if let Some(config) = configs.get(handle) {
        let (config, errors) = config.clone().validated();
        for error in &errors {
            warn!("Viewer config: {}", error);
        }
        println!("✓ Viewer config loaded");
        commands.insert_resource(config);
        next_state.set(AppState::Running);
        return;
    }

    if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle) {
        warn!("Viewer config failed to load ({}), using defaults", error);
        commands.insert_resource(ViewerConfig::default());
        next_state.set(AppState::Running);
    }
}

/// Push config values into the resources that consume them.
pub fn apply_viewer_config(
    config: Res<ViewerConfig>,
    mut recorder: ResMut<PathRecorder>,
    mut hud: ResMut<HudState>,
    mut controller: ResMut<FirstPersonController>,
) {
    let rate = SampleRate::new(config.default_sample_rate_ms);
    recorder.set_sample_rate(rate);
    hud.set_sample_rate(rate.millis());

    controller.move_acceleration = config.move_acceleration;
    controller.move_damping = config.move_damping;
    controller.look_sensitivity = config.look_sensitivity;

    info!(
        "Viewer config applied: sample rate {} ms, control mode {:?}",
        rate.millis(),
        config.control_mode
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_values_reach_recorder_hud_and_controller() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(ViewerConfig {
                default_sample_rate_ms: 300,
                move_acceleration: 20.0,
                look_sensitivity: 0.004,
                ..default()
            })
            .init_resource::<PathRecorder>()
            .init_resource::<HudState>()
            .init_resource::<FirstPersonController>()
            .add_systems(Update, apply_viewer_config);
        app.update();

        let world = app.world();
        assert_eq!(world.resource::<PathRecorder>().sample_rate().millis(), 300);
        assert_eq!(
            world.resource::<HudState>().sample_rate_label(),
            "Sample Rate: 300ms"
        );
        let controller = world.resource::<FirstPersonController>();
        assert_eq!(controller.move_acceleration, 20.0);
        assert_eq!(controller.look_sensitivity, 0.004);
    }
}
