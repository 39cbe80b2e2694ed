//! Session plugin: the shared score/wave record and the operations that mutate it.
//!
//! `GameSession` is plain data with pure transitions (`record_kill`, `mark_lost`,
//! `reset`). `SessionOps` is the system param every gameplay system goes through to
//! apply those transitions together with their side effects:
//! - the spawner's live set and wave target,
//! - `Feedback` messages for the HUD and audio collaborators.
//!
//! Nothing outside this module writes `GameSession` fields directly, except the pause
//! toggle in the player plugin.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::{Tunables, WaveProperties};
use crate::plugins::spawner::{SpawnRng, Spawner};

pub fn plugin(app: &mut App) {
    app.add_message::<Feedback>()
        .add_systems(OnEnter(GameState::InGame), announce_session_start);
}

/// Prime the collaborators with the state of a fresh run.
fn announce_session_start(session: Res<GameSession>, mut feedback: MessageWriter<Feedback>) {
    feedback.write(Feedback::Audio(AudioCue::StartAmbient));
    feedback.write(Feedback::ScoreText(session.wave_status_text()));
    feedback.write(Feedback::Counter {
        score: session.score,
    });
    feedback.write(Feedback::MoveDuration {
        wave_speed: session.wave_speed(),
    });
}

// -----------------------------------------------------------------------------
// Collaborator hooks
// -----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    StartAmbient,
    StopAmbient,
    Hit,
    Victory,
    Defeat,
}

/// Outbound notifications for UI/audio.
///
/// This is the only observable output of session operations.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum Feedback {
    /// Main status line (wave progress, wave banner, final summary).
    ScoreText(String),
    /// On-screen kill counter.
    Counter { score: u32 },
    /// Movement tempo should be recomputed for the current wave speed.
    MoveDuration { wave_speed: f32 },
    RestartVisible(bool),
    Audio(AudioCue),
    /// Burst effect at a world position.
    Burst(Vec3),
}

// -----------------------------------------------------------------------------
// Shared record
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// Kill counted, wave continues with `remaining` kills to go.
    Counted { remaining: u32 },
    /// Kill completed the wave; `wave` is the new current wave.
    WaveAdvanced { wave: u32 },
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    pub score: u32,
    pub current_wave: u32,
    pub zombies_killed_in_wave: u32,
    pub game_over: bool,
    pub paused: bool,
    waves: WaveProperties,
}

impl GameSession {
    pub fn new(waves: WaveProperties) -> Self {
        Self {
            score: 0,
            current_wave: 1,
            zombies_killed_in_wave: 0,
            game_over: false,
            paused: false,
            waves,
        }
    }

    #[inline]
    pub fn waves(&self) -> &WaveProperties {
        &self.waves
    }

    #[inline]
    pub fn wave_zombie_count(&self) -> u32 {
        self.waves.zombie_count(self.current_wave)
    }

    #[inline]
    pub fn wave_speed(&self) -> f32 {
        self.waves.speed(self.current_wave)
    }

    #[inline]
    pub fn remaining_zombies(&self) -> u32 {
        self.waves.remaining(self.current_wave, self.zombies_killed_in_wave)
    }

    /// Spawner and pursuit are frozen while this is false.
    #[inline]
    pub fn is_running(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Count one confirmed kill.
    ///
    /// The wave transition happens inside this call, so `zombies_killed_in_wave` never
    /// equals the wave target once it returns.
    pub fn record_kill(&mut self) -> KillOutcome {
        self.score += 1;
        self.zombies_killed_in_wave += 1;

        if self.zombies_killed_in_wave >= self.wave_zombie_count() {
            self.current_wave += 1;
            self.zombies_killed_in_wave = 0;
            KillOutcome::WaveAdvanced {
                wave: self.current_wave,
            }
        } else {
            KillOutcome::Counted {
                remaining: self.remaining_zombies(),
            }
        }
    }

    /// Returns `false` if the run was already over.
    pub fn mark_lost(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.waves);
    }

    pub fn waves_survived(&self) -> u32 {
        self.current_wave.saturating_sub(1)
    }

    pub fn wave_status_text(&self) -> String {
        format!(
            "Wave {} - {} zombies left",
            self.current_wave,
            self.remaining_zombies()
        )
    }

    pub fn wave_banner_text(&self) -> String {
        format!("Wave {}", self.current_wave)
    }

    pub fn summary_text(&self) -> String {
        format!(
            "Game Over! You survived {} waves and killed {} zombies",
            self.waves_survived(),
            self.score
        )
    }

    pub fn victory_text(&self) -> String {
        format!("You win! {} zombies defeated", self.score)
    }
}

// -----------------------------------------------------------------------------
// Operations
// -----------------------------------------------------------------------------

#[derive(SystemParam)]
pub struct SessionOps<'w, 's> {
    pub session: ResMut<'w, GameSession>,
    pub spawner: ResMut<'w, Spawner>,
    pub tunables: Res<'w, Tunables>,
    rng: ResMut<'w, SpawnRng>,
    commands: Commands<'w, 's>,
    feedback: MessageWriter<'w, Feedback>,
}

impl SessionOps<'_, '_> {
    #[inline]
    pub fn notify(&mut self, fb: Feedback) {
        self.feedback.write(fb);
    }

    /// Count a confirmed kill. Callers guarantee this runs once per kill.
    pub fn zombie_killed(&mut self) {
        match self.session.record_kill() {
            KillOutcome::WaveAdvanced { wave } => {
                let target = self.session.wave_zombie_count();
                self.spawner.set_wave_target(target);
                info!(
                    "wave {wave} begins: {target} zombies at speed {:.2}",
                    self.session.wave_speed()
                );
                let text = self.session.wave_banner_text();
                self.notify(Feedback::ScoreText(text));
            }
            KillOutcome::Counted { .. } => {
                let text = self.session.wave_status_text();
                self.notify(Feedback::ScoreText(text));
            }
        }
    }

    /// End the run. Idempotent: returns `false` if it was already over.
    pub fn lose_game(&mut self) -> bool {
        if !self.session.mark_lost() {
            return false;
        }

        info!(
            "game over after {} waves, {} kills",
            self.session.waves_survived(),
            self.session.score
        );

        self.notify(Feedback::Audio(AudioCue::StopAmbient));
        self.notify(Feedback::Audio(AudioCue::Defeat));
        self.spawner.reset(&mut self.commands, &mut self.rng);
        self.notify(Feedback::RestartVisible(true));
        let text = self.session.summary_text();
        self.notify(Feedback::ScoreText(text));
        true
    }

    /// Ends the run as a win once the score reaches the goal.
    pub fn check_win(&mut self) -> bool {
        if self.session.game_over || self.session.score < self.tunables.goal.target_score {
            return false;
        }

        info!("victory with {} kills", self.session.score);
        self.notify(Feedback::Audio(AudioCue::StopAmbient));
        self.notify(Feedback::Audio(AudioCue::Victory));
        self.notify(Feedback::RestartVisible(true));
        self.session.game_over = true;
        let text = self.session.victory_text();
        self.notify(Feedback::ScoreText(text));
        true
    }

    pub fn restart(&mut self) {
        self.session.reset();
        self.spawner.reset(&mut self.commands, &mut self.rng);
        info!("restarted");

        self.notify(Feedback::RestartVisible(false));
        self.notify(Feedback::Audio(AudioCue::StartAmbient));
        let text = self.session.wave_status_text();
        self.notify(Feedback::ScoreText(text));
        self.notify(Feedback::Counter { score: 0 });
        let wave_speed = self.session.wave_speed();
        self.notify(Feedback::MoveDuration { wave_speed });
    }

    /// Remove an enemy from the live set and the scene in one step.
    pub fn destroy_enemy(&mut self, enemy: Entity) {
        self.spawner.forget(enemy);
        self.commands.entity(enemy).try_despawn();
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.commands.entity(entity).try_despawn();
    }
}
