//! Frame delta validation.

use bevy::prelude::*;

/// Elapsed seconds for this frame, or `None` if the clock produced garbage.
///
/// A rejected delta skips the caller's update for this frame only.
pub fn frame_delta(time: &Time, system: &str) -> Option<f32> {
    checked_delta(time.delta_secs(), system)
}

pub fn checked_delta(dt: f32, system: &str) -> Option<f32> {
    if dt.is_finite() && dt >= 0.0 {
        Some(dt)
    } else {
        warn!("{system}: invalid frame delta {dt}, skipping update");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_and_negative() {
        assert_eq!(checked_delta(f32::NAN, "test"), None);
        assert_eq!(checked_delta(f32::INFINITY, "test"), None);
        assert_eq!(checked_delta(-0.1, "test"), None);
        assert_eq!(checked_delta(0.016, "test"), Some(0.016));
        assert_eq!(checked_delta(0.0, "test"), Some(0.0));
    }
}
