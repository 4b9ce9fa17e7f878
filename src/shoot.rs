//! The shoot step: releasing the arrow, flying it home and scoring the hit.
//!
//! A shot has two halves. [`release_arrow`] runs once per shot: it takes the
//! impact point recorded while aiming, lifts the arrow off the camera and
//! launches it from just below the eye. [`fly_arrow`] then closes a fixed
//! fraction of the remaining distance every second until the arrow's box
//! contains the impact point, at which point the hit is scored, the arrow is
//! left stuck in the scene and a fresh one is requested.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use log::{info, warn};

use crate::camera::PlayerCamera;
use crate::config::ArcherySettings;
use crate::props::{
    DrawBack, PropKind, PropLoadRequest, PropSlot, PropSlots, StuckArrow, TargetBoard,
};
use crate::raycast::Collider;
use crate::scoring::classify_impact;
use crate::state::{Flight, GameState, ImpactPoint, ShotScored};

/// Everything the release entry transition reads or writes.
#[derive(SystemParam)]
pub struct ReleaseContext<'w, 's> {
    commands: Commands<'w, 's>,
    state: ResMut<'w, GameState>,
    impact: ResMut<'w, ImpactPoint>,
    slots: Res<'w, PropSlots>,
    settings: Res<'w, ArcherySettings>,
    cameras: Query<'w, 's, &'static Transform, With<PlayerCamera>>,
    drawn: Query<
        'w,
        's,
        (Entity, &'static mut Transform, &'static DrawBack),
        (With<ChildOf>, Without<PlayerCamera>),
    >,
}

/// Launches the nocked arrow toward the recorded impact point.
///
/// Runs once per shot, after the button is released. Without a recorded
/// impact or a loaded arrow the shot is abandoned and the controller goes
/// back to idle. Either way the drawn props spring back to rest.
pub fn release_arrow(mut ctx: ReleaseContext) {
    if !ctx.state.ready_to_release() {
        return;
    }
    let Ok(eye) = ctx.cameras.single().copied() else {
        return;
    };

    let launched = match (ctx.slots.arrow.ready(), ctx.impact.0.take()) {
        (Some(arrow), Some(point)) => launch(&mut ctx, &eye, arrow, point),
        (None, _) => {
            warn!("released before an arrow was nocked; shot abandoned");
            None
        }
        (Some(_), None) => {
            warn!("released while aiming at nothing; shot abandoned");
            None
        }
    };

    if launched.is_none() {
        ctx.state.finish_shot();
    }

    for (entity, mut transform, draw) in &mut ctx.drawn {
        if Some(entity) != launched {
            transform.translation = draw.rest;
        }
    }
}

fn launch(
    ctx: &mut ReleaseContext,
    eye: &Transform,
    arrow: Entity,
    impact: Vec3,
) -> Option<Entity> {
    let Ok((_, mut transform, _)) = ctx.drawn.get_mut(arrow) else {
        warn!("nocked arrow {arrow} is not on the bow; shot abandoned");
        return None;
    };
    transform.translation = eye.translation - Vec3::Y * ctx.settings.release_drop;
    transform.rotation = eye.rotation;
    ctx.commands.entity(arrow).remove::<ChildOf>();
    ctx.state.flight = Some(Flight { arrow, impact });
    info!("arrow loosed toward {impact}");
    Some(arrow)
}

/// Everything the flight update reads or writes.
#[derive(SystemParam)]
pub struct FlightContext<'w, 's> {
    commands: Commands<'w, 's>,
    state: ResMut<'w, GameState>,
    slots: ResMut<'w, PropSlots>,
    settings: Res<'w, ArcherySettings>,
    time: Res<'w, Time>,
    arrows: Query<
        'w,
        's,
        (&'static mut Transform, &'static mut Collider),
        (Without<PlayerCamera>, Without<TargetBoard>),
    >,
    targets: Query<'w, 's, &'static Transform, With<TargetBoard>>,
    reloads: MessageWriter<'w, PropLoadRequest>,
    scored: MessageWriter<'w, ShotScored>,
}

/// Moves the in-flight arrow toward its impact point and scores on arrival.
pub fn fly_arrow(mut ctx: FlightContext) {
    let Some(Flight { arrow, impact }) = ctx.state.flight else {
        return;
    };
    let Ok((mut transform, mut collider)) = ctx.arrows.get_mut(arrow) else {
        warn!("arrow {arrow} vanished mid-flight");
        ctx.state.finish_shot();
        return;
    };

    let step = (ctx.settings.closing_rate * ctx.settings.frame_delta(&ctx.time)).min(1.0);
    let remaining = impact - transform.translation;
    transform.translation += remaining * step;

    if !collider.contains(transform.translation, impact) {
        return;
    }

    collider.pickable = false;
    ctx.commands
        .entity(arrow)
        .remove::<DrawBack>()
        .insert(StuckArrow);

    score_landing(&mut ctx, impact);

    ctx.slots.arrow = PropSlot::Pending;
    ctx.reloads.write(PropLoadRequest {
        kind: PropKind::Arrow,
    });
    ctx.state.finish_shot();
}

fn score_landing(ctx: &mut FlightContext, impact: Vec3) {
    let centre = ctx
        .slots
        .target
        .ready()
        .and_then(|target| ctx.targets.get(target).ok())
        .map(|target| target.translation);
    let Some(centre) = centre else {
        warn!("arrow landed before the target loaded; not scored");
        return;
    };

    let band = classify_impact(impact, centre);
    let total = ctx.state.score.award(band);
    info!(
        "{} at {impact}: +{} points, score {total}",
        band.label(),
        band.points()
    );
    ctx.scored.write(ShotScored {
        impact,
        band,
        points: band.points(),
        total,
    });
}
