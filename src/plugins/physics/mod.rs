//! Physics plugin: Avian3d for sensor overlaps only.
//!
//! Every body is kinematic and moved by gameplay systems, so gravity is off. Headless
//! test apps leave this plugin out and write `CollidingEntities` directly.

use avian3d::prelude::*;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::ZERO));
}
