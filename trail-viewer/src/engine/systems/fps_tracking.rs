use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::rpc::web_rpc::WebRpcInterface;

const FPS_NOTIFICATION_INTERVAL_SECS: f32 = 0.5;

#[derive(Component)]
pub struct FpsText;

pub fn smoothed_fps(diagnostics: &DiagnosticsStore) -> Option<f64> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
}

pub fn fps_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();

    if current_time - *last_send_time < FPS_NOTIFICATION_INTERVAL_SECS {
        return;
    }

    if let Some(value) = smoothed_fps(&diagnostics) {
        rpc_interface.send_notification(
            "fps_update",
            serde_json::json!({
                "fps": value as f32
            }),
        );
        *last_send_time = current_time;
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    let Some(value) = smoothed_fps(&diagnostics) else {
        return;
    };
    for mut text in &mut query {
        text.0 = format!("FPS: {value:.1}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_measurement_sends_nothing() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<DiagnosticsStore>()
            .init_resource::<WebRpcInterface>()
            .add_systems(Update, fps_notification_system);
        app.update();
        app.update();

        assert!(
            app.world()
                .resource::<WebRpcInterface>()
                .pending_notifications()
                .is_empty()
        );
    }

    #[test]
    fn text_is_untouched_without_measurement() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<DiagnosticsStore>()
            .add_systems(Update, fps_text_update_system);
        let entity = app.world_mut().spawn((Text::new("FPS: "), FpsText)).id();
        app.update();

        assert_eq!(app.world().get::<Text>(entity).unwrap().0, "FPS: ");
    }
}
