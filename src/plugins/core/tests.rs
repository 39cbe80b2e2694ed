use bevy::prelude::*;

use crate::common::despawn::DespawnQueue;
use crate::common::tunables::Tunables;
use crate::plugins::core;
use crate::plugins::session::GameSession;
use crate::plugins::spawner::{SpawnRng, Spawner};

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
    assert!(app.world().get_resource::<SpawnRng>().is_some());
    assert!(app.world().get_resource::<DespawnQueue>().is_some());

    let session = app.world().resource::<GameSession>();
    assert_eq!(session.current_wave, 1);
    assert_eq!(session.score, 0);
}

#[test]
fn keeps_preinserted_tunables() {
    let mut tunables = Tunables::default();
    tunables.waves.base_count = 3;

    let mut app = App::new();
    app.insert_resource(tunables);
    core::plugin(&mut app);

    assert_eq!(app.world().resource::<Tunables>().waves.base_count, 3);
    assert_eq!(app.world().resource::<Spawner>().wave_target(), 3);
    assert_eq!(app.world().resource::<GameSession>().wave_zombie_count(), 3);
}
