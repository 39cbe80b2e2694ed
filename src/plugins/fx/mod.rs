//! Burst effect on kills.
//!
//! The burst is a short-lived entity that expands from the kill position and is then
//! handed to the `DespawnQueue`. Meshes are attached only when `FxAssets` exists.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::despawn::DespawnQueue;
use crate::common::state::GameState;
use crate::plugins::session::Feedback;

const BURST_SECONDS: f32 = 0.35;
const BURST_MAX_SCALE: f32 = 2.5;

#[derive(Component, Debug)]
pub struct Burst {
    timer: Timer,
}

#[derive(Resource, Debug, Clone)]
pub struct FxAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (spawn_bursts, animate_bursts.after(spawn_bursts)).run_if(in_state(GameState::InGame)),
    );
}

pub fn spawn_bursts(
    mut reader: MessageReader<Feedback>,
    assets: Option<Res<FxAssets>>,
    mut commands: Commands,
) {
    for fb in reader.read() {
        let Feedback::Burst(at) = fb else {
            continue;
        };

        let mut e = commands.spawn((
            Name::new("Burst"),
            Burst {
                timer: Timer::from_seconds(BURST_SECONDS, TimerMode::Once),
            },
            Transform::from_translation(*at).with_scale(Vec3::splat(0.1)),
            Visibility::Visible,
            DespawnOnExit(GameState::InGame),
        ));
        if let Some(assets) = assets.as_deref() {
            e.insert((
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
            ));
        }
    }
}

pub fn animate_bursts(
    time: Res<Time>,
    mut queue: ResMut<DespawnQueue>,
    mut q: Query<(Entity, &mut Burst, &mut Transform, &mut Visibility)>,
) {
    for (e, mut burst, mut tf, mut vis) in &mut q {
        if burst.timer.is_finished() {
            continue;
        }
        burst.timer.tick(time.delta());

        let t = burst.timer.fraction();
        tf.scale = Vec3::splat(0.1 + (BURST_MAX_SCALE - 0.1) * t);

        if burst.timer.is_finished() {
            *vis = Visibility::Hidden;
            queue.schedule(e, 0.0);
        }
    }
}
