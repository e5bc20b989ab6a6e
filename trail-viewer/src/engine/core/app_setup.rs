// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::assets::viewer_config::ViewerConfig;
use crate::engine::camera::first_person::{
    FirstPersonController, first_person_controller, pointer_lock_system,
};
use crate::engine::core::app_state::AppState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::config_loader::{
    ConfigLoader, apply_viewer_config, load_config_system, start_config_loading,
};
use crate::engine::scene::scene_setup::setup_scene;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::xr_probe::{
    ControlModeState, XrProbe, desktop_controls_active, resolve_control_mode, start_xr_probe,
};

// Recording
use crate::recording::path_store::RecordedPaths;
use crate::recording::recorder::{
    PathRecorder, PathSavedEvent, RecordToggleEvent, SetSampleRateEvent, TrailRng,
    apply_record_toggles, apply_sample_rate_changes, handle_record_input,
    handle_sample_rate_wheel, sample_camera_position,
};
use crate::recording::trail::spawn_path_trails;

// Overlay
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::ui::hud::{HudState, expire_toasts, sync_cursor_icon};

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::ui::native_overlay::{spawn_native_overlay, sync_native_overlay};

#[cfg(target_arch = "wasm32")]
use crate::engine::camera::first_person::sync_browser_pointer_lock;
#[cfg(target_arch = "wasm32")]
use crate::ui::dom_overlay::{setup_dom_overlay, sync_dom_overlay};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers ViewerConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ViewerConfig>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    // Initialise resources early
    app.init_resource::<ViewerConfig>()
        .init_resource::<ConfigLoader>()
        .init_resource::<PathRecorder>()
        .init_resource::<RecordedPaths>()
        .init_resource::<TrailRng>()
        .init_resource::<HudState>()
        .init_resource::<FirstPersonController>()
        .init_resource::<XrProbe>()
        .init_resource::<ControlModeState>()
        .add_event::<RecordToggleEvent>()
        .add_event::<SetSampleRateEvent>()
        .add_event::<PathSavedEvent>();

    app.add_systems(
        Startup,
        (setup_scene, start_config_loading, start_xr_probe),
    )
    .add_systems(
        Update,
        load_config_system.run_if(in_state(AppState::Loading)),
    )
    .add_systems(OnEnter(AppState::Running), apply_viewer_config);

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_native_overlay);
    }

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(Startup, setup_dom_overlay);
    }

    // Input, state changes, sampling, trails.
    let recording_systems = (
        handle_record_input,
        handle_sample_rate_wheel,
        apply_sample_rate_changes,
        apply_record_toggles,
        sample_camera_position,
        spawn_path_trails,
    )
        .chain();

    let runtime_systems = (
        resolve_control_mode,
        (pointer_lock_system, first_person_controller)
            .chain()
            .run_if(desktop_controls_active),
        recording_systems,
        expire_toasts,
        sync_cursor_icon,
        fps_notification_system,
    )
        .chain();

    app.add_systems(Update, runtime_systems.run_if(in_state(AppState::Running)));

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(
            Update,
            sync_browser_pointer_lock
                .before(pointer_lock_system)
                .run_if(in_state(AppState::Running)),
        );
    }

    // Overlay sync after all HUD writes.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            PostUpdate,
            (sync_native_overlay, fps_text_update_system)
                .run_if(in_state(AppState::Running)),
        );
    }

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(
            PostUpdate,
            sync_dom_overlay.run_if(in_state(AppState::Running)),
        );
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
