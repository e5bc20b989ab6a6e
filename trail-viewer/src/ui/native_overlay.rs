use bevy::prelude::*;
use constants::render_settings::HUD_FONT_SIZE;

use super::hud::HudState;
use crate::engine::systems::fps_tracking::FpsText;

/// Which status element a UI text node shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudElement {
    RecordIndicator,
    SampleRate,
    Toast,
    Instructions,
}

pub fn spawn_native_overlay(mut commands: Commands, hud: Res<HudState>) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(hud.indicator_label()),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BorderColor(hud.indicator_border()),
                HudElement::RecordIndicator,
            ));

            parent.spawn((
                Text::new(hud.sample_rate_label()),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(48.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                HudElement::SampleRate,
            ));

            parent.spawn((
                Text::new(hud.instructions.clone()),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                HudElement::Instructions,
            ));

            parent
                .spawn(Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(48.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: HUD_FONT_SIZE + 4.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                        Node {
                            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                            ..default()
                        },
                        Visibility::Hidden,
                        HudElement::Toast,
                    ));
                });

            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

/// Push `HudState` into the overlay nodes whenever it changes.
pub fn sync_native_overlay(
    hud: Res<HudState>,
    mut elements: Query<(
        &HudElement,
        &mut Text,
        &mut Visibility,
        Option<&mut BorderColor>,
    )>,
) {
    if !hud.is_changed() {
        return;
    }

    for (element, mut text, mut visibility, border) in &mut elements {
        match element {
            HudElement::RecordIndicator => {
                text.0 = hud.indicator_label().to_string();
                if let Some(mut border) = border {
                    border.0 = hud.indicator_border();
                }
            }
            HudElement::SampleRate => text.0 = hud.sample_rate_label(),
            HudElement::Instructions => text.0 = hud.instructions.clone(),
            HudElement::Toast => match hud.visible_toast() {
                Some(message) => {
                    text.0 = message.to_string();
                    *visibility = Visibility::Inherited;
                }
                None => *visibility = Visibility::Hidden,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn overlay_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<HudState>()
            .add_systems(Startup, spawn_native_overlay)
            .add_systems(Update, sync_native_overlay);
        app
    }

    fn text_of(app: &mut App, wanted: HudElement) -> (String, Visibility) {
        let mut query = app
            .world_mut()
            .query::<(&HudElement, &Text, &Visibility)>();
        query
            .iter(app.world())
            .find(|(element, _, _)| **element == wanted)
            .map(|(_, text, visibility)| (text.0.clone(), *visibility))
            .unwrap()
    }

    #[test]
    fn overlay_reflects_hud_changes() {
        let mut app = overlay_app();
        app.update();

        {
            let mut hud = app.world_mut().resource_mut::<HudState>();
            hud.set_recording(true);
            hud.set_sample_rate(250);
            hud.show_toast("Recording started...", Duration::from_secs(1));
        }
        app.update();

        assert_eq!(
            text_of(&mut app, HudElement::RecordIndicator).0,
            "R — Recording..."
        );
        assert_eq!(
            text_of(&mut app, HudElement::SampleRate).0,
            "Sample Rate: 250ms"
        );
        assert_eq!(
            text_of(&mut app, HudElement::Toast),
            ("Recording started...".to_string(), Visibility::Inherited)
        );
    }

    #[test]
    fn toast_node_hides_when_toast_clears() {
        let mut app = overlay_app();
        app.world_mut()
            .resource_mut::<HudState>()
            .show_toast("hello", Duration::from_secs(1));
        app.update();

        app.world_mut().resource_mut::<HudState>().toast = None;
        app.update();

        assert_eq!(text_of(&mut app, HudElement::Toast).1, Visibility::Hidden);
    }

    #[test]
    fn toast_sits_in_a_centred_full_width_row() {
        let mut app = overlay_app();
        app.update();

        let mut toasts = app.world_mut().query::<(&HudElement, &ChildOf)>();
        let row = toasts
            .iter(app.world())
            .find(|(element, _)| **element == HudElement::Toast)
            .map(|(_, child_of)| child_of.parent())
            .unwrap();

        let node = app.world().get::<Node>(row).unwrap();
        assert_eq!(node.width, Val::Percent(100.0));
        assert_eq!(node.justify_content, JustifyContent::Center);
        assert_eq!(node.position_type, PositionType::Absolute);
    }
}
