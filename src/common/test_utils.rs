//! Test helpers.
//!
//! `World::run_system_once` (via the `RunSystemOnce` trait) executes a system without a
//! schedule. Systems that use `Commands` only enqueue structural changes, so we call
//! `world.flush()` afterwards to apply them before assertions.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::ecs::world::CommandQueue;
use bevy::prelude::*;

use crate::common::despawn::DespawnQueue;
use crate::common::tunables::Tunables;
use crate::plugins::session::{Feedback, GameSession};
use crate::plugins::spawner::{SpawnRng, Spawner};

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Run `f(commands)` against the world and apply the queued commands.
pub fn with_commands<T>(world: &mut World, f: impl FnOnce(&mut Commands) -> T) -> T {
    let mut queue = CommandQueue::default();
    let result = {
        let mut commands = Commands::new(&mut queue, world);
        f(&mut commands)
    };
    queue.apply(world);
    result
}

/// A world with every resource the gameplay systems read, using `tunables`.
pub fn gameplay_world(tunables: Tunables) -> World {
    let mut world = World::new();
    world.insert_resource(GameSession::new(tunables.waves));
    world.insert_resource(Spawner::new(&tunables));
    world.insert_resource(SpawnRng::seeded(7));
    world.insert_resource(DespawnQueue::default());
    world.insert_resource(tunables);
    world.init_resource::<Messages<Feedback>>();
    world
}

/// Insert a `Time` resource that reports `dt` as the last frame delta.
pub fn set_frame_delta(world: &mut World, dt: f32) {
    let mut t = Time::<()>::default();
    t.advance_by(std::time::Duration::from_secs_f32(dt));
    world.insert_resource(t);
}

/// Every `Feedback` written since the last drain.
pub fn drain_feedback(world: &mut World) -> Vec<Feedback> {
    world.resource_mut::<Messages<Feedback>>().drain().collect()
}
