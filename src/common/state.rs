//! Global state machine.
//!
//! Only scopes per-run entities. Win/lose/pause live on
//! [`GameSession`](crate::plugins::session::GameSession), because a lost run keeps
//! the scene (HUD, restart button) alive until the player restarts.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
