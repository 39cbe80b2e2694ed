//! Zombie Whack: wave-based zombie shooter on Bevy + Avian3d.
//!
//! The binary only calls [`game::run`]. Integration tests build headless apps from
//! [`game::configure_headless`] and reach into `plugins` for components.

pub mod common;
pub mod game;
pub mod plugins;
