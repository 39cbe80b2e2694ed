//! Unit tests for the enemies module.
//!
//! Submodule tests so they can reach `pursuit_step` and the system directly.

use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{drain_feedback, gameplay_world, run_system_once, set_frame_delta};
use crate::common::tunables::Tunables;
use crate::plugins::session::{Feedback, GameSession};
use crate::plugins::spawner::Spawner;

fn cfg() -> PursuitConfig {
    PursuitConfig::default()
}

// -----------------------------------------------------------------------------
// Pure pursuit step
// -----------------------------------------------------------------------------

#[test]
fn step_moves_toward_player_on_the_floor() {
    let step = pursuit_step(Vec3::new(10.0, 0.7, 0.0), Vec3::new(0.0, 1.6, 0.0), 2.0, 0.5, &cfg());

    let PursuitStep::Advance { translation, facing } = step else {
        panic!("expected Advance, got {step:?}");
    };
    assert!((translation - Vec3::new(9.0, 0.0, 0.0)).length() < 1e-5);

    // -Z of the facing rotation points along -X, toward the player.
    let forward = facing.unwrap() * Vec3::NEG_Z;
    assert!((forward - Vec3::NEG_X).length() < 1e-5);
}

#[test]
fn vertical_offset_does_not_count_toward_capture() {
    // 0.3 planar, 5.0 vertical: still captured.
    let step = pursuit_step(Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.0, 5.0, 0.0), 1.0, 0.016, &cfg());
    assert_eq!(step, PursuitStep::Captured);

    let step = pursuit_step(Vec3::new(0.6, 0.0, 0.0), Vec3::ZERO, 1.0, 0.016, &cfg());
    assert!(matches!(step, PursuitStep::Advance { .. }));
}

#[test]
fn near_zero_distance_is_not_normalized() {
    let c = PursuitConfig {
        capture_radius: 0.0,
        ..cfg()
    };
    let step = pursuit_step(Vec3::new(0.004, 0.0, 0.0), Vec3::ZERO, 1.0, 1.0, &c);

    let PursuitStep::Advance { translation, .. } = step else {
        panic!("expected Advance");
    };
    // Raw (unnormalized) vector applied: no overshoot far past the player.
    assert!(translation.length() < 0.01);
    assert!(translation.is_finite());
}

#[test]
fn step_is_scaled_by_speed_and_dt() {
    let slow = pursuit_step(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 1.5, 0.1, &cfg());
    let fast = pursuit_step(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, 2.1, 0.1, &cfg());

    let (PursuitStep::Advance { translation: a, .. }, PursuitStep::Advance { translation: b, .. }) =
        (slow, fast)
    else {
        panic!("expected Advance");
    };
    assert!((20.0 - a.z - 0.15).abs() < 1e-5);
    assert!((20.0 - b.z - 0.21).abs() < 1e-5);
}

// -----------------------------------------------------------------------------
// ECS/system tests
// -----------------------------------------------------------------------------

fn world_with_player() -> World {
    let mut world = gameplay_world(Tunables::default());
    set_frame_delta(&mut world, 0.1);
    world.spawn((Player, Transform::from_xyz(0.0, 0.0, 0.0)));
    world
}

#[test]
fn pursuit_uses_current_wave_speed() {
    let mut world = world_with_player();
    world.resource_mut::<GameSession>().current_wave = 3;
    let e = world
        .spawn((Enemy::new(Side::PosX), Transform::from_xyz(10.0, 0.0, 0.0)))
        .id();

    run_system_once(&mut world, pursue_player);

    let x = world.get::<Transform>(e).unwrap().translation.x;
    assert!((x - (10.0 - 2.1 * 0.1)).abs() < 1e-4);
}

#[test]
fn capture_ends_the_run_exactly_once() {
    let mut world = world_with_player();

    // Two enemies inside capture range in the same frame.
    let a = world
        .spawn((Enemy::new(Side::PosX), Transform::from_xyz(0.2, 0.0, 0.0)))
        .id();
    let b = world
        .spawn((Enemy::new(Side::NegX), Transform::from_xyz(-0.2, 0.0, 0.0)))
        .id();
    {
        let mut spawner = world.resource_mut::<Spawner>();
        spawner.track(a);
        spawner.track(b);
    }

    run_system_once(&mut world, pursue_player);
    run_system_once(&mut world, pursue_player);

    assert!(world.resource::<GameSession>().game_over);
    assert!(world.get_entity(a).is_err());
    assert!(world.get_entity(b).is_err());

    let summaries = drain_feedback(&mut world)
        .into_iter()
        .filter(|f| matches!(f, Feedback::ScoreText(s) if s.starts_with("Game Over!")))
        .count();
    assert_eq!(summaries, 1);
}

#[test]
fn pursuit_is_frozen_while_paused() {
    let mut world = world_with_player();
    world.resource_mut::<GameSession>().paused = true;
    let e = world
        .spawn((Enemy::new(Side::PosZ), Transform::from_xyz(0.0, 0.0, 5.0)))
        .id();

    run_system_once(&mut world, pursue_player);

    assert_eq!(world.get::<Transform>(e).unwrap().translation.z, 5.0);
}

#[test]
fn scored_enemies_stop_moving() {
    let mut world = world_with_player();
    let mut enemy = Enemy::new(Side::PosZ);
    enemy.scored = true;
    let e = world.spawn((enemy, Transform::from_xyz(0.0, 0.0, 5.0))).id();

    run_system_once(&mut world, pursue_player);

    assert_eq!(world.get::<Transform>(e).unwrap().translation.z, 5.0);
}

#[test]
fn missing_player_is_a_noop() {
    let mut world = gameplay_world(Tunables::default());
    set_frame_delta(&mut world, 0.1);
    let e = world
        .spawn((Enemy::new(Side::PosZ), Transform::from_xyz(0.0, 0.0, 5.0)))
        .id();

    run_system_once(&mut world, pursue_player);

    assert_eq!(world.get::<Transform>(e).unwrap().translation.z, 5.0);
    assert!(!world.resource::<GameSession>().game_over);
}
