//! Behavioural tests: a full draw, release, flight and score cycle.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/archery_fixture.rs"]
mod archery_fixture;

use approx::assert_relative_eq;
use archery_fixture::ArcheryFixture;
use bevy::prelude::*;
use quiver::{
    ArcherySettings, Band, Collider, GameState, ImpactPoint, Phase, PropKind, PropSlot,
    PropSlots, StuckArrow,
};
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use test_utils::{
    arrows, camera_entity, depth, draw_and_release, parent_of, prop, run_frames, run_until,
    ShotLog,
};

/// Frames allowed for an arrow to cross the range.
const FLIGHT_LIMIT: usize = 200;

fn score(app: &App) -> u32 {
    app.world().resource::<GameState>().score.total()
}

fn shoot_and_land(fixture: &ArcheryFixture) -> Entity {
    fixture.with_app(|app| {
        let first = prop(app, PropKind::Arrow).expect("arrow should be loaded");
        draw_and_release(app, 20);
        run_until(app, FLIGHT_LIMIT, |app| {
            app.world().resource::<GameState>().flight.is_none()
        })
        .expect("arrow should land");
        run_frames(app, 2);
        first
    })
}

#[test]
fn a_released_arrow_scores_and_is_replaced() {
    let fixture = ArcheryFixture::new(ArcherySettings::default());

    run_serial(&rspec::given(
        "the player aims at the centre of the target",
        fixture,
        |scenario: &mut Scenario<ArcheryFixture>| {
            scenario.before_each(|state| state.reset());

            scenario.when("the button is released", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    state.with_app(|app| draw_and_release(app, 20));
                });

                ctx.then("the arrow leaves the camera from below the eye", |state| {
                    state.with_app(|app| {
                        let game = app.world().resource::<GameState>();
                        let flight = game.flight.expect("arrow should be in flight");
                        assert_eq!(game.phase(), Phase::Shooting);
                        assert_eq!(parent_of(app, flight.arrow), None);
                        assert_relative_eq!(flight.impact.z, -29.9, epsilon = 1e-4);

                        let arrow = app
                            .world()
                            .get::<Transform>(flight.arrow)
                            .expect("arrow should have a transform");
                        assert!(arrow.translation.y < 5.0);
                        assert!(arrow.translation.z < 0.0);
                    });
                });

                ctx.then("the impact point is consumed", |state| {
                    state.with_app(|app| {
                        assert_eq!(*app.world().resource::<ImpactPoint>(), ImpactPoint(None));
                    });
                });

                ctx.then("the other props spring back to rest", |state| {
                    state.with_app(|app| {
                        let springs = [
                            (PropKind::Bow, 4.0),
                            (PropKind::Sight, 8.0),
                            (PropKind::Crosshair, 5.0),
                        ];
                        for (kind, rest) in springs {
                            let entity = prop(app, kind).expect("prop should be loaded");
                            let drawn = depth(app, entity).expect("prop should have a transform");
                            assert_relative_eq!(drawn, rest, epsilon = 1e-5);
                        }
                    });
                });

                ctx.then("pressing again mid-flight does nothing", |state| {
                    state.with_app(|app| {
                        test_utils::send_pointer(app, quiver::PointerAction::Down);
                        app.update();
                        let game = app.world().resource::<GameState>();
                        assert!(!game.aiming);
                        assert!(game.flight.is_some());
                    });
                });
            });

            scenario.when("the arrow has landed", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    shoot_and_land(state);
                });

                ctx.then("a bullseye is scored", |state| {
                    state.with_app(|app| {
                        assert_eq!(score(app), 10);
                        let log = &app.world().resource::<ShotLog>().0;
                        assert_eq!(log.len(), 1);
                        assert_eq!(log[0].band, Band::Bullseye);
                        assert_eq!(log[0].total, 10);
                    });
                });

                ctx.then("exactly one fresh arrow hangs off the camera", |state| {
                    state.with_app(|app| {
                        let camera = camera_entity(app).expect("camera should exist");
                        let attached: Vec<Entity> = arrows(app)
                            .into_iter()
                            .filter(|arrow| parent_of(app, *arrow) == Some(camera))
                            .collect();
                        assert_eq!(attached.len(), 1);
                        assert_eq!(prop(app, PropKind::Arrow), Some(attached[0]));
                        let rest = depth(app, attached[0]).expect("arrow should have a transform");
                        assert_relative_eq!(rest, 3.5, epsilon = 1e-5);
                    });
                });

                ctx.then("the spent arrow stays stuck and unpickable", |state| {
                    state.with_app(|app| {
                        let world = app.world_mut();
                        let mut stuck = world.query_filtered::<&Collider, With<StuckArrow>>();
                        let colliders: Vec<Collider> = stuck.iter(world).copied().collect();
                        assert_eq!(colliders.len(), 1);
                        assert!(!colliders[0].pickable);
                    });
                });

                ctx.then("the controller is idle again", |state| {
                    state.with_app(|app| {
                        let game = app.world().resource::<GameState>();
                        assert_eq!(game.phase(), Phase::Idle);
                        assert!(game.flight.is_none());
                    });
                });
            });

            scenario.when("two arrows are shot", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    let first = shoot_and_land(state);
                    let second = shoot_and_land(state);
                    assert_ne!(first, second);
                });

                ctx.then("the score keeps accumulating", |state| {
                    state.with_app(|app| {
                        assert_eq!(score(app), 20);
                        assert_eq!(app.world().resource::<ShotLog>().0.len(), 2);
                    });
                });

                ctx.then("both spent arrows remain in the range", |state| {
                    state.with_app(|app| {
                        let world = app.world_mut();
                        let mut stuck = world.query_filtered::<Entity, With<StuckArrow>>();
                        assert_eq!(stuck.iter(world).count(), 2);
                    });
                });
            });

            scenario.when("the arrow lands but its replacement has not loaded", |ctx| {
                ctx.before_each(|state| {
                    state.reset();
                    state.with_app(|app| {
                        draw_and_release(app, 20);
                        run_until(app, FLIGHT_LIMIT, |app| {
                            app.world().resource::<PropSlots>().arrow == PropSlot::Pending
                        })
                        .expect("arrow should land");
                    });
                });

                ctx.then("the arrow slot is pending until the loader answers", |state| {
                    state.with_app(|app| {
                        assert!(prop(app, PropKind::Arrow).is_none());
                        app.update();
                        assert!(prop(app, PropKind::Arrow).is_some());
                    });
                });
            });
        },
    ));
}

#[test]
fn a_click_within_one_frame_still_shoots() {
    let fixture = ArcheryFixture::new(ArcherySettings::default());
    fixture.reset();
    fixture.with_app(|app| {
        test_utils::send_pointer(app, quiver::PointerAction::Down);
        test_utils::send_pointer(app, quiver::PointerAction::Up);
        app.update();

        let game = app.world().resource::<GameState>();
        let flight = game.flight.expect("a quick click should loose the arrow");
        assert_relative_eq!(flight.impact.z, -29.9, epsilon = 1e-4);
        assert_eq!(app.world().resource::<ShotLog>().0.len(), 0);
    });
}
