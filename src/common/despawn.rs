//! Deferred destruction.
//!
//! Gameplay systems never despawn "later" with fire-and-forget timers. They push the
//! entity here and `drain_despawn_queue` removes it once the delay has elapsed,
//! at the PostUpdate frame boundary.
//!
//! Callers must make the entity inert (hidden, empty collision filters) before queueing
//! it. The queue only owns *removal*, not deactivation.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy)]
struct ScheduledDespawn {
    entity: Entity,
    remaining: f32,
}

#[derive(Resource, Debug, Default)]
pub struct DespawnQueue {
    pending: Vec<ScheduledDespawn>,
}

impl DespawnQueue {
    /// Schedule `entity` for removal after `delay` seconds.
    ///
    /// A delay of zero removes it at the next frame boundary.
    pub fn schedule(&mut self, entity: Entity, delay: f32) {
        if self.pending.iter().any(|s| s.entity == entity) {
            return;
        }
        self.pending.push(ScheduledDespawn {
            entity,
            remaining: delay.max(0.0),
        });
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.pending.iter().any(|s| s.entity == entity)
    }

    /// Advance every entry by `dt` and return the entities that are due.
    pub fn tick(&mut self, dt: f32) -> Vec<Entity> {
        let mut due = Vec::new();
        self.pending.retain_mut(|s| {
            s.remaining -= dt;
            if s.remaining <= 0.0 {
                due.push(s.entity);
                false
            } else {
                true
            }
        });
        due
    }
}

/// Structural cleanup at the frame boundary.
///
/// Entries may already be gone (e.g. a spent bullet that the score trigger removed
/// directly), so removal is fallible and silent.
pub fn drain_despawn_queue(
    time: Res<Time>,
    mut queue: ResMut<DespawnQueue>,
    mut commands: Commands,
) {
    let Some(dt) = crate::common::frame::frame_delta(&time, "drain_despawn_queue") else {
        return;
    };

    for e in queue.tick(dt) {
        debug!("despawning {e:?} from queue");
        commands.entity(e).try_despawn();
    }
}
