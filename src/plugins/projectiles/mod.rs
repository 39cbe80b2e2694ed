//! Projectiles plugin: bullet spawn consumer + per-frame bullet agent.
//!
//! # Data flow
//! ```text
//!   Update
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ (A) player::request_fire        writes FireBullet                    │
//!   │ (B) spawn_fired_bullets         FireBullet -> Bullet entity (Flying) │
//!   │ (C) bullet_flight               floor/range cutoff, advance, overlap │
//!   │                                 writes TriggerHit, Flying->Striking  │
//!   │ (D) score::resolve_score_hits   TriggerHit + hurtbox overlaps        │
//!   └──────────────────────────────────────────────────────────────────────┘
//!   PostUpdate
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ (E) drain_despawn_queue         removes deactivated bullets          │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Lifecycle
//! - `Flying`: moves and is hit-tested.
//! - `Striking`: overlapped a hurtbox this frame; inert, waiting for the score trigger.
//! - `Spent`: inert, will never score (floor, range, or already scored). Floor and range
//!   are checked on both the start-of-frame and the advanced position.
//!
//! Deactivation hides the bullet and clears its collision filters *before* it is queued
//! for removal, so a shell kept around by `despawn_delay` cannot be hit-tested again.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::despawn::DespawnQueue;
use crate::common::layers::{active_bullet_layers, inactive_bullet_layers};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::score::{ScoreTrigger, TriggerHit};

pub fn plugin(app: &mut App) {
    app.add_message::<FireBullet>();

    app.add_systems(
        Update,
        (
            spawn_fired_bullets.after(crate::plugins::player::request_fire),
            bullet_flight.after(spawn_fired_bullets),
        )
            .run_if(in_state(GameState::InGame)),
    );
}

// -----------------------------------------------------------------------------
// Components / messages
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone)]
pub struct Bullet {
    /// Unit vector.
    pub direction: Vec3,
    pub speed: f32,
    /// Set by the score trigger. A scored bullet can never score again.
    pub scored: bool,
}

impl Bullet {
    pub fn new(direction: Vec3, speed: f32) -> Self {
        Self {
            direction: direction.normalize_or(Vec3::NEG_Z),
            speed,
            scored: false,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Flying,
    Striking,
    Spent,
}

/// Fire intent from the player rig.
#[derive(Message, Clone, Copy, Debug)]
pub struct FireBullet {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Render handles for bullets. Absent in headless apps.
#[derive(Resource, Debug, Clone)]
pub struct BulletAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Make a bullet inert: invisible, colliding with nothing.
#[inline]
pub fn deactivate(vis: &mut Visibility, layers: &mut CollisionLayers) {
    *vis = Visibility::Hidden;
    *layers = inactive_bullet_layers();
}

// -----------------------------------------------------------------------------
// Spawn consumer
// -----------------------------------------------------------------------------

pub fn spawn_fired_bullets(
    mut reader: MessageReader<FireBullet>,
    tunables: Res<Tunables>,
    assets: Option<Res<BulletAssets>>,
    mut commands: Commands,
) {
    let cfg = tunables.projectiles;

    for req in reader.read() {
        let bullet = Bullet::new(req.direction, cfg.bullet_speed);
        let pos = req.origin + bullet.direction * cfg.muzzle_offset;

        let mut e = commands.spawn((
            Name::new("Bullet"),
            bullet,
            BulletState::Flying,
            Transform::from_translation(pos),
            Visibility::Visible,
            RigidBody::Kinematic,
            Collider::sphere(cfg.bullet_radius),
            Sensor,
            active_bullet_layers(),
            CollidingEntities::default(),
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

// -----------------------------------------------------------------------------
// Bullet agent
// -----------------------------------------------------------------------------

pub fn bullet_flight(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut queue: ResMut<DespawnQueue>,
    mut hits: MessageWriter<TriggerHit>,
    q_triggers: Query<(), With<ScoreTrigger>>,
    mut q_bullets: Query<(
        Entity,
        &Bullet,
        &mut BulletState,
        &mut Transform,
        &mut Visibility,
        &mut CollisionLayers,
        Option<&CollidingEntities>,
    )>,
) {
    let Some(dt) = crate::common::frame::frame_delta(&time, "bullet_flight") else {
        return;
    };

    let cfg = tunables.projectiles;
    let floor = tunables.pursuit.floor_height;

    for (e, bullet, mut state, mut tf, mut vis, mut layers, colliding) in &mut q_bullets {
        if bullet.scored || *state != BulletState::Flying {
            continue;
        }

        // Non-hit despawns, checked before and after the step: a bullet leaving the
        // arena this frame never reaches the overlap query.
        let out_of_bounds = |p: Vec3| p.y <= floor || p.length() > cfg.max_range;
        if out_of_bounds(tf.translation) {
            deactivate(&mut vis, &mut layers);
            *state = BulletState::Spent;
            queue.schedule(e, cfg.despawn_delay);
            continue;
        }

        tf.translation += bullet.direction * cfg.speed_fraction(bullet.speed) * dt;

        if out_of_bounds(tf.translation) {
            deactivate(&mut vis, &mut layers);
            *state = BulletState::Spent;
            queue.schedule(e, cfg.despawn_delay);
            continue;
        }

        // First trigger wins; iteration order is whatever the overlap set yields.
        let Some(colliding) = colliding else {
            continue;
        };
        let Some(&trigger) = colliding.iter().find(|&&other| q_triggers.contains(other)) else {
            continue;
        };

        hits.write(TriggerHit { trigger, bullet: e });
        deactivate(&mut vis, &mut layers);
        *state = BulletState::Striking;
        queue.schedule(e, cfg.despawn_delay);
    }
}
