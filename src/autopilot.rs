//! Demo autopilot
//!
//! Plays a session without a human: dodge the most threatening meteor,
//! otherwise drift toward the nearest planet still above the avatar.
//! Only reads the session; the host feeds the returned intent into `tick`.

use glam::Vec2;

use crate::consts::MAX_SUBSTEPS;
use crate::sim::{FixedTimestep, GameEvent, MovementIntent, Phase, Session, TickInput, tick};

/// Meteors closer than this (center to center, beyond both radii) are dodged
const DANGER_MARGIN: f32 = 60.0;
/// Dead zone so the avatar doesn't jitter over a target
const CHASE_DEAD_ZONE: f32 = 4.0;

/// Pick this frame's movement, or `None` when not playing
pub fn plan(session: &Session) -> Option<MovementIntent> {
    if !session.is_playing() {
        return None;
    }
    let me = session.avatar.bounds();

    // Flee: nearest meteor that is still above or level with us
    let threat = session
        .pool
        .meteors
        .iter()
        .map(|m| m.bounds())
        .filter(|m| m.center.y <= me.center.y + me.radius)
        .filter(|m| m.center.distance(me.center) < me.radius + m.radius + DANGER_MARGIN)
        .min_by(|a, b| {
            a.center
                .distance_squared(me.center)
                .total_cmp(&b.center.distance_squared(me.center))
        });
    if let Some(threat) = threat {
        let mut away = me.center - threat.center;
        if away.length_squared() < f32::EPSILON {
            away = Vec2::X;
        }
        // Mostly sideways: meteors only fall, so lateral escape is enough
        let dir = Vec2::new(away.x.signum(), away.y.signum() * 0.5);
        return Some(MovementIntent::Steer {
            dx: dir.x,
            dy: dir.y,
        });
    }

    // Chase: nearest planet that hasn't passed us yet
    let target = session
        .pool
        .planets
        .iter()
        .map(|p| p.bounds())
        .filter(|p| p.center.y >= 0.0 && p.center.y <= me.center.y)
        .min_by(|a, b| {
            a.center
                .distance_squared(me.center)
                .total_cmp(&b.center.distance_squared(me.center))
        });
    let target = target?;

    let to = target.center - me.center;
    let axis = |d: f32| {
        if d.abs() <= CHASE_DEAD_ZONE {
            0.0
        } else {
            d.signum()
        }
    };
    Some(MovementIntent::Steer {
        dx: axis(to.x),
        dy: axis(to.y),
    })
}

/// Play `session` from the title screen until a meteor ends the run or
/// `max_secs` of simulated time pass, feeding fixed steps of `sim_dt` from
/// host frames of `frame_dt`. Returns the simulated seconds.
pub fn run(
    session: &mut Session,
    sim_dt: f32,
    frame_dt: f32,
    max_secs: f32,
    mut on_event: impl FnMut(GameEvent),
) -> f32 {
    let mut timestep = FixedTimestep::new(sim_dt, MAX_SUBSTEPS);
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };

    let mut simulated = 0.0;
    while simulated < max_secs && session.phase != Phase::GameOver {
        for _ in 0..timestep.accumulate(frame_dt) {
            input.movement = plan(session);
            tick(session, &input, timestep.dt());
            simulated += timestep.dt();

            // Clear one-shot inputs after processing
            input.start = false;
        }
        session.drain_events().into_iter().for_each(&mut on_event);
    }
    simulated
}
