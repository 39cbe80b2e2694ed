//! Spawner plugin: wave-driven enemy creation.
//!
//! ```text
//!   Idle ──first due tick──▶ Spawning(side) ──batch_per_side spawns──▶ SideExhausted
//!                                 ▲                                        │
//!                                 └──────── next due tick, random side ────┘
//! ```
//!
//! The cadence ramps exponentially: after every spawn the interval is multiplied by
//! `spawn_interval_decrease_rate`, floored at `min_spawn_interval`.
//!
//! Placement is a band on one side of the arena, not a ring: the axis matching the
//! active side is drawn from `[spawn_radius_min, spawn_radius_max]`, the perpendicular
//! axis from `[-spawn_radius_max, spawn_radius_max]`.
//!
//! The live set is owned here. Entries are removed only through `forget` (kill) or
//! `reset` (run ended / restart), both of which also despawn the entity.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::state::GameState;
use crate::common::tunables::{SpawnerConfig, Tunables, WaveProperties};
use crate::plugins::enemies::{self, EnemyAssets};
use crate::plugins::session::GameSession;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        spawn_enemies.run_if(in_state(GameState::InGame)),
    );
}

// -----------------------------------------------------------------------------
// Randomness
// -----------------------------------------------------------------------------

/// Source of all spawn randomness. Seeded in tests for determinism.
#[derive(Resource, Deref, DerefMut)]
pub struct SpawnRng(pub StdRng);

impl SpawnRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SpawnRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

// -----------------------------------------------------------------------------
// Sides
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::PosX, Side::NegX, Side::PosZ, Side::NegZ];

    /// Uniform over all four sides. May return the previous side again.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Planar offset with `primary` along this side's axis and `lateral` across it.
    #[inline]
    pub fn offset(self, primary: f32, lateral: f32) -> Vec3 {
        match self {
            Side::PosX => Vec3::new(primary, 0.0, lateral),
            Side::NegX => Vec3::new(-primary, 0.0, lateral),
            Side::PosZ => Vec3::new(lateral, 0.0, primary),
            Side::NegZ => Vec3::new(lateral, 0.0, -primary),
        }
    }
}

fn random_offset(side: Side, cfg: &SpawnerConfig, rng: &mut impl Rng) -> Vec3 {
    let primary = rng.gen_range(cfg.spawn_radius_min..=cfg.spawn_radius_max);
    let lateral = rng.gen_range(-cfg.spawn_radius_max..=cfg.spawn_radius_max);
    side.offset(primary, lateral)
}

// -----------------------------------------------------------------------------
// State machine
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPhase {
    Idle,
    Spawning,
    SideExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub side: Side,
    pub position: Vec3,
}

#[derive(Resource, Debug)]
pub struct Spawner {
    /// World position the spawn band is measured from.
    pub origin: Vec3,
    config: SpawnerConfig,
    waves: WaveProperties,
    live: Vec<Entity>,
    phase: SpawnPhase,
    side: Side,
    side_count: u32,
    interval: f32,
    timer: Timer,
    wave_target: u32,
}

impl Spawner {
    pub fn new(tunables: &Tunables) -> Self {
        let config = tunables.spawner;
        Self {
            origin: Vec3::new(0.0, tunables.pursuit.floor_height, 0.0),
            config,
            waves: tunables.waves,
            live: Vec::new(),
            phase: SpawnPhase::Idle,
            side: Side::PosX,
            side_count: 0,
            interval: config.initial_spawn_interval,
            timer: Timer::from_seconds(config.initial_spawn_interval, TimerMode::Once),
            wave_target: tunables.waves.zombie_count(1),
        }
    }

    pub fn with_random_side(mut self, rng: &mut SpawnRng) -> Self {
        self.side = Side::random(&mut rng.0);
        self
    }

    pub fn phase(&self) -> SpawnPhase {
        self.phase
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn side_count(&self) -> u32 {
        self.side_count
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn wave_target(&self) -> u32 {
        self.wave_target
    }

    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    pub fn set_wave_target(&mut self, target: u32) {
        self.wave_target = target;
    }

    pub fn track(&mut self, enemy: Entity) {
        self.live.push(enemy);
    }

    /// Drop `enemy` from the live set. Returns `false` if it was not tracked.
    pub fn forget(&mut self, enemy: Entity) -> bool {
        let Some(i) = self.live.iter().position(|&e| e == enemy) else {
            return false;
        };
        self.live.swap_remove(i);
        true
    }

    /// Advance the cadence timer and return where to spawn, if a spawn is due.
    ///
    /// While the live set is at `wave_target` the timer stays elapsed, so the next
    /// spawn happens as soon as a slot frees up.
    pub fn advance(&mut self, dt: f32, rng: &mut SpawnRng) -> Option<SpawnPlan> {
        self.timer
            .tick(std::time::Duration::from_secs_f32(dt.max(0.0)));
        if !self.timer.is_finished() {
            return None;
        }
        if self.live.len() as u32 >= self.wave_target {
            return None;
        }

        if self.phase == SpawnPhase::SideExhausted {
            self.side = Side::random(&mut rng.0);
            self.side_count = 0;
        }

        let position = self.origin + random_offset(self.side, &self.config, &mut rng.0);
        self.side_count += 1;
        self.phase = if self.side_count >= self.config.batch_per_side {
            SpawnPhase::SideExhausted
        } else {
            SpawnPhase::Spawning
        };

        self.interval = (self.interval * self.config.spawn_interval_decrease_rate)
            .max(self.config.min_spawn_interval);
        self.timer = Timer::from_seconds(self.interval, TimerMode::Once);

        Some(SpawnPlan {
            side: self.side,
            position,
        })
    }

    /// Destroy every live enemy and re-arm the state machine from scratch.
    pub fn reset(&mut self, commands: &mut Commands, rng: &mut SpawnRng) {
        for e in self.live.drain(..) {
            commands.entity(e).try_despawn();
        }
        self.phase = SpawnPhase::Idle;
        self.side = Side::random(&mut rng.0);
        self.side_count = 0;
        self.interval = self.config.initial_spawn_interval;
        self.timer = Timer::from_seconds(self.interval, TimerMode::Once);
        self.wave_target = self.waves.zombie_count(1);
    }
}

// -----------------------------------------------------------------------------
// System
// -----------------------------------------------------------------------------

pub fn spawn_enemies(
    time: Res<Time>,
    session: Res<GameSession>,
    tunables: Res<Tunables>,
    assets: Option<Res<EnemyAssets>>,
    mut spawner: ResMut<Spawner>,
    mut rng: ResMut<SpawnRng>,
    mut commands: Commands,
) {
    if !session.is_running() {
        return;
    }
    let Some(dt) = crate::common::frame::frame_delta(&time, "spawn_enemies") else {
        return;
    };

    let Some(plan) = spawner.advance(dt, &mut rng) else {
        return;
    };

    let e = enemies::spawn_enemy(&mut commands, plan, &tunables.spawner, assets.as_deref());
    spawner.track(e);
    debug!(
        "spawned {e:?} on {:?} at {:?}, next in {:.2}s",
        plan.side,
        plan.position,
        spawner.interval()
    );
}
