//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::despawn::{drain_despawn_queue, DespawnQueue};
use crate::common::tunables::{Tunables, DEFAULT_TUNABLES_PATH};
use crate::plugins::session::GameSession;
use crate::plugins::spawner::{SpawnRng, Spawner};

pub fn plugin(app: &mut App) {
    // Tests and embedders may insert their own tunables before the plugins run.
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::load_or_default(DEFAULT_TUNABLES_PATH));
    }
    if !app.world().contains_resource::<SpawnRng>() {
        app.insert_resource(SpawnRng::default());
    }

    let tunables = app.world().resource::<Tunables>().clone();
    let spawner = {
        let mut rng = app.world_mut().resource_mut::<SpawnRng>();
        Spawner::new(&tunables).with_random_side(&mut rng)
    };

    app.insert_resource(GameSession::new(tunables.waves))
        .insert_resource(spawner)
        .insert_resource(DespawnQueue::default())
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)))
        .add_systems(PostUpdate, drain_despawn_queue);
}

#[cfg(test)]
mod tests;
