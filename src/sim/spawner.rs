//! Planet and meteor spawners
//!
//! Planets pick their genre from the rarity table; meteors are all alike.
//! Both enter just above the top edge at a random column with a random fall
//! speed from their tuning range.

use glam::Vec2;
use rand::Rng;

use super::entity::{EntityKind, FallingEntity, Playfield};
use crate::tuning::{SpeedRange, Tuning};

/// Random top-left column for a body of `size`
pub fn random_column<R: Rng + ?Sized>(rng: &mut R, playfield: &Playfield, size: f32) -> f32 {
    let max_x = playfield.max_x(size);
    if max_x > 0.0 {
        rng.random_range(0.0..max_x)
    } else {
        0.0
    }
}

fn random_speed<R: Rng + ?Sized>(rng: &mut R, range: SpeedRange) -> f32 {
    if range.max > range.min {
        rng.random_range(range.min..range.max)
    } else {
        range.min.max(0.0)
    }
}

fn spawn<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    kind: EntityKind,
    size: f32,
    speed: SpeedRange,
    playfield: &Playfield,
) -> FallingEntity {
    let x = random_column(rng, playfield, size);
    FallingEntity {
        id,
        kind,
        pos: Vec2::new(x, -size),
        size,
        speed: random_speed(rng, speed),
    }
}

/// Spawn a planet whose genre is drawn from the tuning's rarity table
pub fn spawn_collectible<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    tuning: &Tuning,
    playfield: &Playfield,
) -> FallingEntity {
    let archetype = tuning.rarity.sample(rng);
    spawn(
        rng,
        id,
        EntityKind::Collectible { archetype },
        tuning.planet_size,
        tuning.planet_speed,
        playfield,
    )
}

/// Spawn a meteor
pub fn spawn_hazard<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    tuning: &Tuning,
    playfield: &Playfield,
) -> FallingEntity {
    spawn(
        rng,
        id,
        EntityKind::Hazard,
        tuning.meteor_size,
        tuning.meteor_speed,
        playfield,
    )
}
