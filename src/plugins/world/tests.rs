use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;

#[test]
fn floor_sits_below_floor_height() {
    let mut world = World::new();
    let mut tunables = Tunables::default();
    tunables.pursuit.floor_height = 2.0;
    world.insert_resource(tunables);

    run_system_once(&mut world, super::spawn_floor);

    let (tf, _) = world
        .query::<(&Transform, &RigidBody)>()
        .single(&world)
        .unwrap();
    assert!(tf.translation.y < 2.0);
}
