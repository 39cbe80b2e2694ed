//! Common, shared types.

pub mod despawn;
pub mod frame;
pub mod layers;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
