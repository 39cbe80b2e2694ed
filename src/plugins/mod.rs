//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod enemies;
pub mod fx;
pub mod hud;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod restart;
pub mod score;
pub mod session;
pub mod spawner;
pub mod world;

// Render-only
pub mod audio;
pub mod camera;

/// Register gameplay plugins that work in headless tests.
///
/// Physics is not included: headless apps inject overlaps instead of simulating them.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    session::plugin(app);
    world::plugin(app);
    player::plugin(app);
    spawner::plugin(app);
    enemies::plugin(app);
    projectiles::plugin(app);
    score::plugin(app);
    restart::plugin(app);
    hud::plugin(app);
    fx::plugin(app);
}

/// Register the physics backend that fills `CollidingEntities`.
pub fn register_physics(app: &mut App) {
    physics::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    world::render_plugin(app);
    camera::plugin(app);
    audio::plugin(app);
}
