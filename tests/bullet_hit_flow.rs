//! Fire -> flight -> overlap -> kill, through the real schedule.

mod common;

use avian3d::prelude::*;
use bevy::prelude::*;
use zombie_whack::plugins::projectiles::{Bullet, FireBullet};
use zombie_whack::plugins::session::GameSession;
use zombie_whack::plugins::spawner::Spawner;

#[test]
fn fired_bullet_kills_the_zombie_it_overlaps() {
    let mut app = common::app_headless();
    let (body, hurtbox) = common::spawn_zombie(&mut app, Vec3::new(0.0, 0.0, -10.0));

    app.world_mut().write_message(FireBullet {
        origin: Vec3::new(0.0, 1.2, 0.0),
        direction: Vec3::NEG_Z,
    });
    app.update();

    let bullet = {
        let world = app.world_mut();
        let mut q = world.query_filtered::<Entity, With<Bullet>>();
        q.single(world).expect("one bullet in flight")
    };

    // Stand-in for the physics step reporting the overlap.
    app.world_mut()
        .get_mut::<CollidingEntities>(bullet)
        .unwrap()
        .insert(hurtbox);
    app.update();
    app.update();

    assert!(app.world().get_entity(body).is_err());
    assert!(app.world().get_entity(bullet).is_err());
    assert!(app.world().resource::<Spawner>().live().is_empty());
    assert_eq!(app.world().resource::<GameSession>().score, 1);
    assert_eq!(common::counter_text(&mut app), "Score: 1");
    assert_eq!(common::status_text(&mut app), "Wave 1 - 9 zombies left");
}

#[test]
fn ten_kills_show_the_wave_two_banner() {
    let mut app = common::app_headless();

    for _ in 0..10 {
        let (_, hurtbox) = common::spawn_zombie(&mut app, Vec3::new(0.0, 0.0, -10.0));
        let bullet = common::spawn_striking_bullet(&mut app);
        app.world_mut()
            .get_mut::<CollidingEntities>(hurtbox)
            .unwrap()
            .insert(bullet);
        app.update();
    }
    app.update();

    let session = app.world().resource::<GameSession>();
    assert_eq!(session.score, 10);
    assert_eq!(session.current_wave, 2);
    assert_eq!(session.zombies_killed_in_wave, 0);
    assert_eq!(app.world().resource::<Spawner>().wave_target(), 15);
    assert_eq!(common::status_text(&mut app), "Wave 2");
}
