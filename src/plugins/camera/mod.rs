//! Camera plugin (render-only): first-person view from the player rig.
//!
//! A system cannot hold `Query<&Transform>` and `Query<&mut Transform>` at the same time
//! unless Bevy can prove they are disjoint, so both queries carry `Without<...>` filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      follow_player copies the rig pose + eye height before propagation
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera,
        Transform::from_xyz(0.0, tunables.player.eye_height, 0.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    tunables: Res<Tunables>,
    // Disjointness proof: Player entities are not MainCamera entities.
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_cam) = q_cam.single_mut() else {
        return;
    };

    tf_cam.translation = tf_player.translation + Vec3::Y * tunables.player.eye_height;
    tf_cam.rotation = tf_player.rotation;
}
