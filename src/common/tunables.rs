//! Tunable gameplay constants.
//!
//! Every section uses `#[serde(default)]`, so a TOML file only needs to name the
//! keys it overrides:
//!
//! ```toml
//! [waves]
//! base_count = 6
//!
//! [spawner]
//! min_spawn_interval = 0.5
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TUNABLES_PATH: &str = "assets/tunables.toml";

#[derive(Resource, Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tunables {
    pub waves: WaveProperties,
    pub spawner: SpawnerConfig,
    pub projectiles: ProjectileConfig,
    pub pursuit: PursuitConfig,
    pub goal: GoalConfig,
    pub player: PlayerConfig,
}

/// Difficulty curve. Immutable for the lifetime of a session.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaveProperties {
    pub base_count: u32,
    pub count_increase_per_wave: u32,
    pub base_speed: f32,
    pub speed_increase_percent_per_wave: f32,
}

impl Default for WaveProperties {
    fn default() -> Self {
        Self {
            base_count: 10,
            count_increase_per_wave: 5,
            base_speed: 1.5,
            speed_increase_percent_per_wave: 20.0,
        }
    }
}

impl WaveProperties {
    /// Kills required to clear `wave` (1-based).
    #[inline]
    pub fn zombie_count(&self, wave: u32) -> u32 {
        self.base_count + wave.saturating_sub(1) * self.count_increase_per_wave
    }

    /// Planar speed shared by every enemy of `wave`.
    #[inline]
    pub fn speed(&self, wave: u32) -> f32 {
        let steps = wave.saturating_sub(1) as f32;
        self.base_speed * (1.0 + steps * self.speed_increase_percent_per_wave / 100.0)
    }

    #[inline]
    pub fn remaining(&self, wave: u32, killed: u32) -> u32 {
        self.zombie_count(wave).saturating_sub(killed)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnerConfig {
    pub initial_spawn_interval: f32,
    /// Multiplier applied after each spawn. Must be < 1.
    pub spawn_interval_decrease_rate: f32,
    pub min_spawn_interval: f32,
    pub spawn_radius_min: f32,
    pub spawn_radius_max: f32,
    /// Spawns on one side before a new side is picked.
    pub batch_per_side: u32,
    /// Vertical offset of the hurtbox child above the enemy body.
    pub hurtbox_height: f32,
    pub hurtbox_radius: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            initial_spawn_interval: 3.0,
            spawn_interval_decrease_rate: 0.95,
            min_spawn_interval: 0.8,
            spawn_radius_min: 8.0,
            spawn_radius_max: 12.0,
            batch_per_side: 6,
            hurtbox_height: 1.0,
            hurtbox_radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectileConfig {
    pub bullet_speed: f32,
    /// Fixed calibration divisor: the bullet advances `speed / speed_divisor` per second.
    pub speed_divisor: f32,
    pub max_range: f32,
    /// Delay between deactivation and removal of a non-hit bullet.
    pub despawn_delay: f32,
    pub bullet_radius: f32,
    pub muzzle_offset: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            bullet_speed: 60.0,
            speed_divisor: 6.0,
            max_range: 175.0,
            despawn_delay: 0.5,
            bullet_radius: 0.1,
            muzzle_offset: 0.5,
        }
    }
}

impl ProjectileConfig {
    #[inline]
    pub fn speed_fraction(&self, speed: f32) -> f32 {
        speed / self.speed_divisor
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct PursuitConfig {
    pub capture_radius: f32,
    /// Below this planar distance the direction is not normalized.
    pub min_step_distance: f32,
    pub floor_height: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            capture_radius: 0.5,
            min_step_distance: 0.01,
            floor_height: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalConfig {
    pub target_score: u32,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self { target_score: 100 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f32,
    pub base_move_duration: f32,
    pub min_move_duration: f32,
    /// Height above the rig origin that bullets leave from.
    pub eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            base_move_duration: 1.0,
            min_move_duration: 0.25,
            eye_height: 1.2,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid tunables in {path}: `{field}` {reason}")]
    Invalid {
        path: String,
        field: &'static str,
        reason: &'static str,
    },
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl Tunables {
    /// Parse and validate. `path` is only used in error messages.
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let tunables: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        tunables.validate(path)?;
        Ok(tunables)
    }

    /// Reject values the spawner, timers and bullet step cannot work with.
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let Some((field, reason)) = self.first_invalid() else {
            return Ok(());
        };
        Err(ConfigError::Invalid {
            path: path.to_owned(),
            field,
            reason,
        })
    }

    fn first_invalid(&self) -> Option<(&'static str, &'static str)> {
        let w = &self.waves;
        let s = &self.spawner;
        let p = &self.projectiles;
        let pl = &self.player;

        let checks: [(bool, &'static str, &'static str); 16] = [
            (w.base_count >= 1, "waves.base_count", "must be at least 1"),
            (non_negative(w.base_speed), "waves.base_speed", "must be finite and >= 0"),
            (
                non_negative(w.speed_increase_percent_per_wave),
                "waves.speed_increase_percent_per_wave",
                "must be finite and >= 0",
            ),
            (
                non_negative(s.initial_spawn_interval),
                "spawner.initial_spawn_interval",
                "must be finite and >= 0",
            ),
            (
                non_negative(s.min_spawn_interval),
                "spawner.min_spawn_interval",
                "must be finite and >= 0",
            ),
            (
                s.spawn_interval_decrease_rate > 0.0 && s.spawn_interval_decrease_rate < 1.0,
                "spawner.spawn_interval_decrease_rate",
                "must be in (0, 1)",
            ),
            (
                non_negative(s.spawn_radius_min),
                "spawner.spawn_radius_min",
                "must be finite and >= 0",
            ),
            (
                s.spawn_radius_max.is_finite() && s.spawn_radius_max >= s.spawn_radius_min,
                "spawner.spawn_radius_max",
                "must be finite and >= spawn_radius_min",
            ),
            (s.batch_per_side >= 1, "spawner.batch_per_side", "must be at least 1"),
            (positive(s.hurtbox_radius), "spawner.hurtbox_radius", "must be finite and > 0"),
            (positive(p.speed_divisor), "projectiles.speed_divisor", "must be finite and > 0"),
            (positive(p.max_range), "projectiles.max_range", "must be finite and > 0"),
            (
                non_negative(p.despawn_delay),
                "projectiles.despawn_delay",
                "must be finite and >= 0",
            ),
            (positive(p.bullet_radius), "projectiles.bullet_radius", "must be finite and > 0"),
            (
                non_negative(pl.base_move_duration),
                "player.base_move_duration",
                "must be finite and >= 0",
            ),
            (
                non_negative(pl.min_move_duration),
                "player.min_move_duration",
                "must be finite and >= 0",
            ),
        ];

        checks
            .into_iter()
            .find(|(ok, _, _)| !ok)
            .map(|(_, field, reason)| (field, reason))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&content, &display)
    }

    /// Load overrides from `path`; a missing, broken or invalid file falls back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no tunables file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(t) => {
                info!("loaded tunables from {}", path.display());
                t
            }
            Err(e) => {
                warn!("{e}; using default tunables");
                Self::default()
            }
        }
    }
}
