//! Collision layers.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    PlayerBullet,
}

/// Hurtbox intent: only player bullets can overlap it.
#[inline]
pub fn hurtbox_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::PlayerBullet])
}

#[inline]
pub fn active_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [Layer::Enemy])
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerBullet, [] as [Layer; 0])
}
