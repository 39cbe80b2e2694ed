//! Enemies plugin: zombie bodies and the pursuit agent.
//!
//! Each zombie is two entities:
//! - the body (`Enemy`): visual representation, moved on the floor plane toward the player,
//! - a child hurtbox (`ScoreTrigger`), raised `hurtbox_height` above the body, which carries
//!   the sensor collider and the hit arbitration (see `plugins::score`).
//!
//! Speed is not per-enemy state. Every body moves at `waveSpeed(currentWave)`, read from
//! the session each frame, so a wave transition speeds up zombies already on the field.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::hurtbox_layers;
use crate::common::state::GameState;
use crate::common::tunables::{PursuitConfig, SpawnerConfig};
use crate::plugins::player::Player;
use crate::plugins::score::ScoreTrigger;
use crate::plugins::session::SessionOps;
use crate::plugins::spawner::{Side, SpawnPlan};

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        pursue_player
            .after(crate::plugins::spawner::spawn_enemies)
            .run_if(in_state(GameState::InGame)),
    );
}

// -----------------------------------------------------------------------------
// Components / resources
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub side: Side,
    /// Write-once: set by the score trigger on the kill that removes this enemy.
    pub scored: bool,
}

impl Enemy {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            scored: false,
        }
    }
}

/// Render handles for zombie bodies.
///
/// Only inserted by the render-side world plugin; headless apps spawn bodies without a mesh.
#[derive(Resource, Debug, Clone)]
pub struct EnemyAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

/// Create a zombie body with its hurtbox child. Returns the body entity.
pub fn spawn_enemy(
    commands: &mut Commands,
    plan: SpawnPlan,
    cfg: &SpawnerConfig,
    assets: Option<&EnemyAssets>,
) -> Entity {
    let mut body = commands.spawn((
        Name::new("Zombie"),
        Enemy::new(plan.side),
        Transform::from_translation(plan.position),
        Visibility::default(),
        RigidBody::Kinematic,
        DespawnOnExit(GameState::InGame),
        children![(
            Name::new("ZombieHurtbox"),
            ScoreTrigger,
            Transform::from_xyz(0.0, cfg.hurtbox_height, 0.0),
            Collider::sphere(cfg.hurtbox_radius),
            Sensor,
            hurtbox_layers(),
            CollidingEntities::default(),
        )],
    ));

    if let Some(assets) = assets {
        body.insert((
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
        ));
    }

    body.id()
}

// -----------------------------------------------------------------------------
// Pursuit
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PursuitStep {
    /// Within capture range: the run is lost.
    Captured,
    Advance {
        translation: Vec3,
        /// Yaw-only facing; `None` when there is no planar direction to face.
        facing: Option<Quat>,
    },
}

/// One frame of planar pursuit. Vertical offset between enemy and player is ignored.
pub fn pursuit_step(
    enemy: Vec3,
    player: Vec3,
    speed: f32,
    dt: f32,
    cfg: &PursuitConfig,
) -> PursuitStep {
    let mut to_player = player - enemy;
    to_player.y = 0.0;

    let dist = to_player.length();
    if dist < cfg.capture_radius {
        return PursuitStep::Captured;
    }

    // Near-zero distance: leave the vector as-is instead of dividing by ~0.
    let dir = if dist >= cfg.min_step_distance {
        to_player / dist
    } else {
        to_player
    };

    let mut translation = enemy + dir * speed * dt;
    translation.y = cfg.floor_height;

    // Bevy forward is -Z: rotate so that -Z points along `dir`.
    let facing = (dir.length_squared() > 0.0)
        .then(|| Quat::from_rotation_y(f32::atan2(-dir.x, -dir.z)));

    PursuitStep::Advance { translation, facing }
}

pub fn pursue_player(
    time: Res<Time>,
    q_player: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut q_enemies: Query<(&mut Transform, &Enemy), Without<Player>>,
    mut ops: SessionOps,
) {
    if !ops.session.is_running() {
        return;
    }
    let Some(dt) = crate::common::frame::frame_delta(&time, "pursue_player") else {
        return;
    };
    let Ok(player_tf) = q_player.single() else {
        debug!("pursue_player: no single Player");
        return;
    };

    let player = player_tf.translation;
    let speed = ops.session.wave_speed();
    let cfg = ops.tunables.pursuit;

    for (mut tf, enemy) in &mut q_enemies {
        if enemy.scored {
            continue;
        }

        match pursuit_step(tf.translation, player, speed, dt, &cfg) {
            PursuitStep::Captured => {
                ops.lose_game();
                return;
            }
            PursuitStep::Advance {
                translation,
                facing,
            } => {
                tf.translation = translation;
                if let Some(rot) = facing {
                    tf.rotation = rot;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
