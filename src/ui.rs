// Overlay UI: title header, the scatter/assemble toggle and the one-shot
// chime. The UI only ever consumes the boolean scene state; everything
// continuous stays inside the progress controller.

use bevy::prelude::*;

use crate::constants::{GOLD_BRIGHT, GOLD_METALLIC, VOLUME_TOGGLE_SFX, WHITE_GLOW};
use crate::progress::MorphProgress;
use crate::types::{SceneAudio, ToggleEvent, TreeState};

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_overlay).add_systems(
            Update,
            (keyboard_toggle, toggle_button_system, update_toggle_label, play_toggle_sfx),
        );
    }
}

#[derive(Component)]
pub struct ToggleButton;

#[derive(Component)]
pub struct ToggleButtonLabel;

fn spawn_overlay(mut commands: Commands) {
    // Header
    commands.spawn((
        Text::new("MERRY CHRISTMAS"),
        TextFont {
            font_size: 42.0,
            ..default()
        },
        TextColor(GOLD_METALLIC),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(30.0),
            justify_self: JustifySelf::Center,
            ..default()
        },
    ));
    commands.spawn((
        Text::new("INTERACTIVE HOLIDAY EXPERIENCE"),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgb(0.55, 0.85, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(84.0),
            justify_self: JustifySelf::Center,
            ..default()
        },
    ));

    // Toggle button
    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(60.0),
                justify_self: JustifySelf::Center,
                padding: UiRect::axes(Val::Px(32.0), Val::Px(16.0)),
                border: UiRect::all(Val::Px(1.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BorderColor(GOLD_METALLIC.with_alpha(0.5)),
            BackgroundColor(Color::srgba(0.0, 0.15, 0.1, 0.4)),
            ToggleButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("SCATTER FRAGMENTS"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(WHITE_GLOW),
                ToggleButtonLabel,
            ));
        });

    // Controls hint
    commands.spawn((
        Text::new("SCROLL TO ZOOM | DRAG TO ROTATE | SPACE TO TOGGLE"),
        TextFont {
            font_size: 10.0,
            ..default()
        },
        TextColor(Color::srgba(0.3, 0.6, 0.45, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            justify_self: JustifySelf::Center,
            ..default()
        },
    ));
}

fn keyboard_toggle(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut toggle_events: EventWriter<ToggleEvent>,
) {
    if keyboard_input.just_pressed(KeyCode::Space) {
        toggle_events.write(ToggleEvent);
    }
}

fn toggle_button_system(
    mut interactions: Query<
        (&Interaction, &mut BorderColor),
        (Changed<Interaction>, With<ToggleButton>),
    >,
    mut toggle_events: EventWriter<ToggleEvent>,
) {
    for (interaction, mut border) in interactions.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                toggle_events.write(ToggleEvent);
            }
            Interaction::Hovered => {
                *border = BorderColor(GOLD_BRIGHT);
            }
            Interaction::None => {
                *border = BorderColor(GOLD_METALLIC.with_alpha(0.5));
            }
        }
    }
}

/// Keep the button label in sync with the direction a click would trigger.
fn update_toggle_label(
    progress: Res<MorphProgress>,
    mut labels: Query<&mut Text, With<ToggleButtonLabel>>,
) {
    if !progress.is_changed() {
        return;
    }
    for mut text in labels.iter_mut() {
        *text = Text::new(match progress.state {
            TreeState::Assembled => "SCATTER FRAGMENTS",
            TreeState::Scattered => "ASSEMBLE TREE",
        });
    }
}

fn play_toggle_sfx(
    mut commands: Commands,
    mut toggle_events: EventReader<ToggleEvent>,
    audio: Option<Res<SceneAudio>>,
) {
    for _ in toggle_events.read() {
        let Some(audio) = audio.as_ref() else {
            continue;
        };
        commands.spawn((
            AudioPlayer::new(audio.toggle_sfx.clone()),
            PlaybackSettings::DESPAWN
                .with_volume(bevy::audio::Volume::Linear(VOLUME_TOGGLE_SFX)),
        ));
    }
}
