//! Restart control: a key and a UI button, both only live once the run has ended.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::session::{Feedback, SessionOps};

#[derive(Component, Debug)]
pub struct RestartButton;

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RestartRequested;

pub fn plugin(app: &mut App) {
    app.add_message::<RestartRequested>()
        .add_systems(OnEnter(GameState::InGame), spawn_restart_button)
        .add_systems(
            Update,
            (
                request_restart_from_key,
                request_restart_from_button,
                apply_restart
                    .after(request_restart_from_key)
                    .after(request_restart_from_button),
                sync_restart_visibility.after(apply_restart),
            )
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_restart_button(mut commands: Commands) {
    commands.spawn((
        Name::new("RestartButton"),
        RestartButton,
        Button,
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(48.0),
            left: Val::Percent(50.0),
            padding: UiRect::axes(Val::Px(24.0), Val::Px(12.0)),
            ..default()
        },
        BackgroundColor(Color::srgb(0.15, 0.35, 0.2)),
        Visibility::Hidden,
        DespawnOnExit(GameState::InGame),
        children![(Text::new("Restart"), TextColor(Color::WHITE))],
    ));
}

fn request_restart_from_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut writer: MessageWriter<RestartRequested>,
) {
    if keys.is_some_and(|k| k.just_pressed(KeyCode::KeyR)) {
        writer.write(RestartRequested);
    }
}

fn request_restart_from_button(
    q: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
    mut writer: MessageWriter<RestartRequested>,
) {
    if q.iter().any(|i| *i == Interaction::Pressed) {
        writer.write(RestartRequested);
    }
}

/// Restart is a reaction to the end screen; requests during a live run are dropped.
pub fn apply_restart(mut reader: MessageReader<RestartRequested>, mut ops: SessionOps) {
    if reader.read().count() == 0 {
        return;
    }
    if !ops.session.game_over {
        debug!("restart ignored: run still in progress");
        return;
    }
    ops.restart();
}

pub fn sync_restart_visibility(
    mut reader: MessageReader<Feedback>,
    mut q: Query<&mut Visibility, With<RestartButton>>,
) {
    let Some(visible) = reader
        .read()
        .filter_map(|fb| match fb {
            Feedback::RestartVisible(v) => Some(*v),
            _ => None,
        })
        .last()
    else {
        return;
    };

    for mut vis in &mut q {
        *vis = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
