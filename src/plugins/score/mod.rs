//! Score plugin: per-enemy hit arbitration.
//!
//! Hits reach the arbiter from two directions in the same frame:
//! - `TriggerHit` messages written by `bullet_flight` (the bullet saw the hurtbox),
//! - the hurtbox's own `CollidingEntities` (the hurtbox sees the bullet).
//!
//! Both funnel into `arbitrate`, which is the only place that turns an overlap into a
//! kill. The `scored` flags on `Bullet` and `Enemy` make repeated candidates for the
//! same pair (or the same bullet against two hurtboxes) resolve to `Ignored`.
//!
//! Faults inside arbitration are logged and dropped here. They affect only that
//! candidate; the remaining candidates and every other system keep running.

use avian3d::prelude::*;
use bevy::prelude::*;
use thiserror::Error;

use crate::common::state::GameState;
use crate::plugins::enemies::Enemy;
use crate::plugins::projectiles::{Bullet, BulletState};
use crate::plugins::session::{AudioCue, Feedback, SessionOps};

pub fn plugin(app: &mut App) {
    app.add_message::<TriggerHit>();

    app.add_systems(
        Update,
        (
            warn_hurtboxes_without_volume,
            resolve_score_hits.after(crate::plugins::projectiles::bullet_flight),
        )
            .run_if(in_state(GameState::InGame)),
    );
}

/// Marker for a hurtbox: a child of an `Enemy` body carrying a sensor collider.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ScoreTrigger;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerHit {
    pub trigger: Entity,
    pub bullet: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Killed { enemy: Entity },
    /// Bullet or enemy already scored, or the bullet is spent.
    Ignored,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HitError {
    #[error("overlapping entity {0:?} is not a bullet")]
    BulletMissing(Entity),
    #[error("hurtbox {0:?} has no parent body")]
    OrphanHurtbox(Entity),
    #[error("hurtbox {hurtbox:?} is attached to {parent:?}, which is not an enemy")]
    EnemyMissing { hurtbox: Entity, parent: Entity },
}

/// Initialization check: a hurtbox without a collider can never be hit.
pub fn warn_hurtboxes_without_volume(
    q: Query<Entity, (Added<ScoreTrigger>, Without<Collider>)>,
) {
    for e in &q {
        warn!("hurtbox {e:?} has no collision volume; it will never register hits");
    }
}

pub fn resolve_score_hits(
    mut reader: MessageReader<TriggerHit>,
    q_hurtboxes: Query<(Entity, &CollidingEntities), With<ScoreTrigger>>,
    q_parents: Query<&ChildOf, With<ScoreTrigger>>,
    mut q_bullets: Query<(&mut Bullet, &mut BulletState)>,
    mut q_enemies: Query<(&mut Enemy, &Transform)>,
    mut ops: SessionOps,
) {
    let mut candidates: Vec<TriggerHit> = reader.read().copied().collect();

    if ops.session.game_over {
        return;
    }

    for (hurtbox, colliding) in &q_hurtboxes {
        for &other in colliding.iter() {
            if q_bullets.contains(other) {
                candidates.push(TriggerHit {
                    trigger: hurtbox,
                    bullet: other,
                });
            }
        }
    }

    for hit in candidates {
        // A win on an earlier candidate ends the run; the rest are dropped.
        if ops.session.game_over {
            break;
        }
        match arbitrate(hit, &q_parents, &mut q_bullets, &mut q_enemies, &mut ops) {
            Ok(HitOutcome::Killed { enemy }) => debug!("{:?} killed {enemy:?}", hit.bullet),
            Ok(HitOutcome::Ignored) => {}
            Err(e) => warn!("score trigger {:?}: {e}", hit.trigger),
        }
    }
}

fn arbitrate(
    hit: TriggerHit,
    q_parents: &Query<&ChildOf, With<ScoreTrigger>>,
    q_bullets: &mut Query<(&mut Bullet, &mut BulletState)>,
    q_enemies: &mut Query<(&mut Enemy, &Transform)>,
    ops: &mut SessionOps,
) -> Result<HitOutcome, HitError> {
    let (mut bullet, mut state) = q_bullets
        .get_mut(hit.bullet)
        .map_err(|_| HitError::BulletMissing(hit.bullet))?;
    if bullet.scored || *state == BulletState::Spent {
        return Ok(HitOutcome::Ignored);
    }

    let parent = q_parents
        .get(hit.trigger)
        .map_err(|_| HitError::OrphanHurtbox(hit.trigger))?
        .parent();
    let (mut enemy, enemy_tf) =
        q_enemies
            .get_mut(parent)
            .map_err(|_| HitError::EnemyMissing {
                hurtbox: hit.trigger,
                parent,
            })?;
    if enemy.scored {
        return Ok(HitOutcome::Ignored);
    }

    bullet.scored = true;
    *state = BulletState::Spent;
    enemy.scored = true;
    let at = enemy_tf.translation;

    ops.notify(Feedback::Burst(at));
    ops.notify(Feedback::Audio(AudioCue::Hit));
    ops.destroy_enemy(parent);
    ops.despawn(hit.bullet);

    ops.zombie_killed();
    let score = ops.session.score;
    ops.notify(Feedback::Counter { score });
    ops.check_win();
    let wave_speed = ops.session.wave_speed();
    ops.notify(Feedback::MoveDuration { wave_speed });

    Ok(HitOutcome::Killed { enemy: parent })
}
