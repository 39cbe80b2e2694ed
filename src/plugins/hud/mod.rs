//! HUD plugin: status line and kill counter, driven only by `Feedback`.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::session::Feedback;

/// Wave progress / banner / final summary.
#[derive(Component, Debug)]
pub struct StatusText;

#[derive(Component, Debug)]
pub struct CounterText;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(
            Update,
            apply_feedback_to_hud.run_if(in_state(GameState::InGame)),
        );
}

pub fn counter_text(score: u32) -> String {
    format!("Score: {score}")
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("Hud"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
        children![
            (
                StatusText,
                Text::new(""),
                TextFont::from_font_size(28.0),
                TextColor(Color::WHITE),
            ),
            (
                CounterText,
                Text::new(counter_text(0)),
                TextFont::from_font_size(22.0),
                TextColor(Color::srgb(0.85, 0.85, 0.6)),
            ),
        ],
    ));
}

pub fn apply_feedback_to_hud(
    mut reader: MessageReader<Feedback>,
    mut q_status: Query<&mut Text, (With<StatusText>, Without<CounterText>)>,
    mut q_counter: Query<&mut Text, (With<CounterText>, Without<StatusText>)>,
) {
    for fb in reader.read() {
        match fb {
            Feedback::ScoreText(s) => {
                for mut text in &mut q_status {
                    text.0.clone_from(s);
                }
            }
            Feedback::Counter { score } => {
                for mut text in &mut q_counter {
                    text.0 = counter_text(*score);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::*;
    use crate::common::test_utils::run_system_once;

    #[test]
    fn status_and_counter_follow_feedback() {
        let mut world = World::new();
        world.init_resource::<Messages<Feedback>>();
        let status = world.spawn((StatusText, Text::new(""))).id();
        let counter = world.spawn((CounterText, Text::new(counter_text(0)))).id();

        world.write_message(Feedback::ScoreText("Wave 2".into()));
        world.write_message(Feedback::Counter { score: 10 });
        world.write_message(Feedback::Audio(crate::plugins::session::AudioCue::Hit));

        run_system_once(&mut world, apply_feedback_to_hud);

        assert_eq!(world.get::<Text>(status).unwrap().0, "Wave 2");
        assert_eq!(world.get::<Text>(counter).unwrap().0, "Score: 10");
    }

    #[test]
    fn latest_status_wins_within_a_frame() {
        let mut world = World::new();
        world.init_resource::<Messages<Feedback>>();
        let status = world.spawn((StatusText, Text::new(""))).id();

        world.write_message(Feedback::ScoreText("Wave 1 - 1 zombies left".into()));
        world.write_message(Feedback::ScoreText("Wave 2".into()));

        run_system_once(&mut world, apply_feedback_to_hud);

        assert_eq!(world.get::<Text>(status).unwrap().0, "Wave 2");
    }
}
