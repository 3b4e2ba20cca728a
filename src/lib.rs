//! Planet Catcher - an arcade planet-catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, scoring, game state)
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Demo controller that plays a session on its own
//!
//! Rendering, input binding and audio live outside this crate. Hosts feed
//! [`sim::TickInput`] into [`sim::tick`] once per frame and draw from
//! [`sim::Session::snapshot`].

pub mod autopilot;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the pace the game was balanced at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest step a single tick will simulate (seconds)
    pub const MAX_STEP_DT: f32 = 0.1;

    /// Default playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Avatar defaults
    pub const AVATAR_SIZE: f32 = 50.0;
    /// Avatar speed in pixels/second (5 px per 60 Hz frame)
    pub const AVATAR_SPEED: f32 = 300.0;

    /// Planet (collectible) defaults
    pub const PLANET_SIZE: f32 = 40.0;
    pub const PLANET_MIN_SPEED: f32 = 90.0;
    pub const PLANET_MAX_SPEED: f32 = 210.0;

    /// Meteor (hazard) defaults
    pub const METEOR_SIZE: f32 = 30.0;
    pub const METEOR_MIN_SPEED: f32 = 120.0;
    pub const METEOR_MAX_SPEED: f32 = 240.0;

    /// Population caps before the level bonus is added
    pub const BASE_PLANET_CAP: u32 = 5;
    pub const BASE_METEOR_CAP: u32 = 3;

    /// Spawn cadences (seconds)
    pub const PLANET_SPAWN_PERIOD: f32 = 2.0;
    pub const METEOR_SPAWN_PERIOD: f32 = 3.0;
    /// Shortest spawn cadence a tuning may ask for (seconds)
    pub const MIN_SPAWN_PERIOD: f32 = 0.01;

    /// Points needed per level
    pub const POINTS_PER_LEVEL: u64 = 10;
}
