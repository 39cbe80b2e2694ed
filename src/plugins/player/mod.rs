//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, write PlayerInput resource
//! - Update: apply capped movement bursts to the rig, emit fire requests
//!
//! The player rig sits on the floor plane; bullets leave from `eye_height` above it.
//! Locomotion comes in bursts: a fresh move press grants `MoveTempo::duration` seconds
//! of movement, and the duration shrinks as waves get faster.
//!
//! Input resources are optional (`Option<Res<ButtonInput<_>>>`) so these systems are
//! no-ops in headless apps without an input plugin.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::FireBullet;
use crate::plugins::session::{Feedback, GameSession};

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub turn_axis: f32,
    /// A move key went down this frame.
    pub move_started: bool,
}

/// Movement burst budget, recomputed from the wave speed.
#[derive(Resource, Debug, Clone, Copy)]
pub struct MoveTempo {
    pub duration: f32,
    pub burst_remaining: f32,
}

impl MoveTempo {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            burst_remaining: 0.0,
        }
    }

    /// Faster waves leave less time per burst, never below `min`.
    pub fn recalculate(&mut self, base: f32, min: f32, base_speed: f32, wave_speed: f32) {
        let ratio = if wave_speed > 0.0 { base_speed / wave_speed } else { 1.0 };
        self.duration = (base * ratio).clamp(min.min(base), base);
        self.burst_remaining = self.burst_remaining.min(self.duration);
    }
}

const TURN_SPEED: f32 = 2.0;

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Startup, init_move_tempo)
        .add_systems(
            Update,
            (
                gather_input,
                toggle_pause,
                update_move_tempo,
                apply_movement.after(gather_input),
                request_fire.after(apply_movement),
            )
                .run_if(in_state(GameState::InGame)),
        );
}

fn init_move_tempo(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(MoveTempo::new(tunables.player.base_move_duration));
}

fn spawn(mut commands: Commands) {
    commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Visibility::default(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    let mut turn = 0.0;
    if keys.pressed(KeyCode::KeyQ) {
        turn += 1.0;
    }
    if keys.pressed(KeyCode::KeyE) {
        turn -= 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    input.turn_axis = turn;
    input.move_started = keys.any_just_pressed([
        KeyCode::KeyW,
        KeyCode::KeyA,
        KeyCode::KeyS,
        KeyCode::KeyD,
    ]);
}

fn toggle_pause(keys: Option<Res<ButtonInput<KeyCode>>>, mut session: ResMut<GameSession>) {
    let Some(keys) = keys else {
        return;
    };
    if session.game_over || !keys.any_just_pressed([KeyCode::KeyP, KeyCode::Escape]) {
        return;
    }
    session.paused = !session.paused;
    info!("paused: {}", session.paused);
}

pub fn update_move_tempo(
    mut reader: MessageReader<Feedback>,
    tunables: Res<Tunables>,
    tempo: Option<ResMut<MoveTempo>>,
) {
    let Some(mut tempo) = tempo else {
        return;
    };
    for fb in reader.read() {
        if let Feedback::MoveDuration { wave_speed } = fb {
            tempo.recalculate(
                tunables.player.base_move_duration,
                tunables.player.min_move_duration,
                tunables.waves.base_speed,
                *wave_speed,
            );
            debug!("move duration now {:.2}s", tempo.duration);
        }
    }
}

pub fn apply_movement(
    time: Res<Time>,
    tunables: Res<Tunables>,
    session: Res<GameSession>,
    input: Res<PlayerInput>,
    tempo: Option<ResMut<MoveTempo>>,
    mut q_player: Query<&mut Transform, With<Player>>,
) {
    let Some(mut tempo) = tempo else {
        return;
    };
    if !session.is_running() {
        return;
    }
    let Some(dt) = crate::common::frame::frame_delta(&time, "apply_movement") else {
        return;
    };
    let Ok(mut tf) = q_player.single_mut() else {
        return;
    };

    tf.rotate_y(input.turn_axis * TURN_SPEED * dt);

    if input.move_started {
        tempo.burst_remaining = tempo.duration;
    }
    if input.move_axis == Vec2::ZERO || tempo.burst_remaining <= 0.0 {
        return;
    }

    let step = dt.min(tempo.burst_remaining);
    tempo.burst_remaining -= step;

    // Local axes flattened onto the floor plane.
    let forward = Vec3::new(tf.forward().x, 0.0, tf.forward().z).normalize_or_zero();
    let right = Vec3::new(tf.right().x, 0.0, tf.right().z).normalize_or_zero();
    let dir = forward * input.move_axis.y + right * input.move_axis.x;

    tf.translation += dir * tunables.player.move_speed * step;
    tf.translation.y = tunables.pursuit.floor_height;
}

pub fn request_fire(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    tunables: Res<Tunables>,
    session: Res<GameSession>,
    q_player: Query<&Transform, With<Player>>,
    mut writer: MessageWriter<FireBullet>,
) {
    let fired = keys.is_some_and(|k| k.just_pressed(KeyCode::Space))
        || buttons.is_some_and(|b| b.just_pressed(MouseButton::Left));
    if !fired || !session.is_running() {
        return;
    }

    let Ok(tf) = q_player.single() else {
        debug!("request_fire: no single Player");
        return;
    };

    writer.write(FireBullet {
        origin: tf.translation + Vec3::Y * tunables.player.eye_height,
        direction: tf.forward().as_vec3(),
    });
}
