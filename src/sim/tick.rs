//! Per-frame simulation step
//!
//! Order within a step: signals, avatar movement, entity fall, planet
//! catches, meteor hits, then spawn cadences. Outside `Playing` the step
//! touches nothing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::state::{GameEvent, Phase, Session};
use crate::consts::MAX_STEP_DT;

/// How the player wants the avatar to move this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementIntent {
    /// Key-state direction, each axis in [-1, 1], scaled by avatar speed and dt
    Steer { dx: f32, dy: f32 },
    /// Pointer/touch drag delta in playfield pixels, applied as-is
    Drag { dx: f32, dy: f32 },
}

impl MovementIntent {
    /// Pixel offset for a frame of `dt` seconds at `speed` pixels/second
    pub fn displacement(&self, speed: f32, dt: f32) -> Vec2 {
        match *self {
            MovementIntent::Steer { dx, dy } => {
                let dir = Vec2::new(dx, dy).clamp(Vec2::NEG_ONE, Vec2::ONE);
                dir * speed * dt
            }
            MovementIntent::Drag { dx, dy } => Vec2::new(dx, dy),
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub movement: Option<MovementIntent>,
    /// Start signal (click/tap on the title screen)
    pub start: bool,
    /// Retry signal after game over
    pub retry: bool,
}

/// Advance the session by one step of `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    match session.phase {
        Phase::Idle if input.start => {
            session.start_session();
        }
        Phase::GameOver if input.retry => {
            session.reset_session();
            return;
        }
        _ => {}
    }

    if session.phase != Phase::Playing {
        return;
    }
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_STEP_DT)
    } else {
        0.0
    };

    session.time_ticks += 1;

    // Avatar
    if let Some(movement) = input.movement {
        let delta = movement.displacement(session.avatar.speed, dt);
        session.avatar.translate(delta, &session.playfield);
    }

    // Fall + recycle off-screen
    session
        .pool
        .tick(dt, &mut session.rng, &session.playfield);

    // Planet catches
    for index in 0..session.pool.planets.len() {
        if !overlaps(&session.avatar, &session.pool.planets[index]) {
            continue;
        }
        let Some(archetype) = session.pool.planets[index].kind.archetype() else {
            continue;
        };
        let level_up = session.score.on_collectible_collected(archetype);
        session.push_event(GameEvent::Collected {
            archetype,
            score: session.score.score,
        });
        if let Some(level) = level_up {
            log::info!("Level up! Now level {} at score {}", level, session.score.score);
            session.push_event(GameEvent::LevelUp { level });
        }
        session
            .pool
            .recycle_planet(index, &mut session.rng, &session.playfield);
    }

    // Meteor hits: the first one ends the run
    let hit = session
        .pool
        .meteors
        .iter()
        .find(|meteor| overlaps(&session.avatar, meteor))
        .map(|meteor| meteor.id);
    if let Some(entity_id) = hit {
        session.end_run(entity_id);
        return;
    }

    // Population maintenance, stopping once a pool is at its cap
    let level = session.score.level;
    for _ in 0..session.planet_clock.advance(dt) {
        let spawned = session
            .pool
            .maintain_planets(level, &mut session.rng, &session.tuning, &session.playfield);
        if spawned.is_none() {
            break;
        }
    }
    for _ in 0..session.meteor_clock.advance(dt) {
        let spawned = session
            .pool
            .maintain_meteors(level, &mut session.rng, &session.tuning, &session.playfield);
        if spawned.is_none() {
            break;
        }
    }
}

impl Session {
    /// Run one frame with only a movement intent (no start/retry signals)
    pub fn step_frame(&mut self, movement: Option<MovementIntent>, dt: f32) {
        let input = TickInput {
            movement,
            ..Default::default()
        };
        tick(self, &input, dt);
    }
}
