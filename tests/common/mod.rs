//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime and time.
//! - `configure_headless` installs gameplay plugins without physics or rendering.
//!
//! Overlaps are injected into `CollidingEntities` by hand since no physics step runs.

#![allow(dead_code)]

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use zombie_whack::common::tunables::Tunables;
use zombie_whack::plugins::enemies::Enemy;
use zombie_whack::plugins::hud::{CounterText, StatusText};
use zombie_whack::plugins::projectiles::{Bullet, BulletState};
use zombie_whack::plugins::score::ScoreTrigger;
use zombie_whack::plugins::spawner::{Side, Spawner};

/// Headless app with tunables that keep the spawner quiet, booted into `InGame`.
pub fn app_headless() -> App {
    let mut tunables = Tunables::default();
    tunables.spawner.initial_spawn_interval = 10_000.0;
    app_headless_with(tunables)
}

pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(tunables);

    zombie_whack::game::configure_headless(&mut app);

    // Startup + OnEnter(InGame), then one frame for the HUD to pick up the first feedback.
    app.update();
    app.update();
    app
}

/// Zombie body with a hurtbox child, tracked by the spawner. Returns `(body, hurtbox)`.
pub fn spawn_zombie(app: &mut App, at: Vec3) -> (Entity, Entity) {
    let world = app.world_mut();
    let body = world
        .spawn((
            Enemy::new(Side::NegZ),
            Transform::from_translation(at),
            children![(ScoreTrigger, CollidingEntities::default())],
        ))
        .id();
    world.resource_mut::<Spawner>().track(body);
    let hurtbox = world.get::<Children>(body).unwrap()[0];
    (body, hurtbox)
}

pub fn spawn_striking_bullet(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((Bullet::new(Vec3::NEG_Z, 60.0), BulletState::Striking))
        .id()
}

pub fn status_text(app: &mut App) -> String {
    let world = app.world_mut();
    let mut q = world.query_filtered::<&Text, With<StatusText>>();
    q.single(world).map(|t| t.0.clone()).unwrap_or_default()
}

pub fn counter_text(app: &mut App) -> String {
    let world = app.world_mut();
    let mut q = world.query_filtered::<&Text, With<CounterText>>();
    q.single(world).map(|t| t.0.clone()).unwrap_or_default()
}
