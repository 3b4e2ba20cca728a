//! Session state and the game state machine
//!
//! One `Session` owns everything a run needs: avatar, entity pool, score,
//! spawn cadences and the seeded RNG. Nothing is global, so any number of
//! sessions can run side by side.
//!
//! Transitions:
//! - `Idle --start--> Playing`
//! - `Playing --hazard hit--> GameOver`
//! - `any --reset--> Idle`

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Cadence;
use super::entity::{Avatar, EntityKind, FallingEntity, Playfield};
use super::pool::EntityPool;
use super::rarity::Archetype;
use super::score::{CollectedCounts, ScoreState};
use crate::tuning::{Tuning, TuningError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the start signal
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended by a meteor; frozen until reset
    GameOver,
}

/// Things that happened during a step, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Collected { archetype: Archetype, score: u64 },
    LevelUp { level: u32 },
    HazardHit { entity_id: u32 },
    Reset,
}

/// A complete single-player session
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the current run was started from
    pub seed: u64,
    pub tuning: Tuning,
    pub playfield: Playfield,
    pub phase: Phase,
    pub avatar: Avatar,
    pub pool: EntityPool,
    pub score: ScoreState,
    pub planet_clock: Cadence,
    pub meteor_clock: Cadence,
    /// Simulation tick counter for the current run
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Session {
    /// Create an idle session from an already validated `tuning`
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        debug_assert!(
            tuning.validate().is_ok(),
            "session built from invalid tuning: {:?}",
            tuning.validate()
        );
        let playfield = Playfield::new(tuning.playfield_width, tuning.playfield_height);
        let avatar = Avatar::centered(&playfield, tuning.avatar_size, tuning.avatar_speed);
        Self {
            seed,
            playfield,
            phase: Phase::Idle,
            avatar,
            pool: EntityPool::new(),
            score: ScoreState::new(tuning.points_per_level),
            planet_clock: Cadence::new(tuning.planet_spawn_period),
            meteor_clock: Cadence::new(tuning.meteor_spawn_period),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            tuning,
        }
    }

    /// Validate `tuning`, then create an idle session
    pub fn try_new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::new(tuning, seed))
    }

    /// Put every piece of run state back to its starting value
    fn reinitialize(&mut self) {
        self.avatar = Avatar::centered(
            &self.playfield,
            self.tuning.avatar_size,
            self.tuning.avatar_speed,
        );
        self.pool.clear();
        self.score = ScoreState::new(self.tuning.points_per_level);
        self.planet_clock.reset();
        self.meteor_clock.reset();
        self.time_ticks = 0;
    }

    /// Idle -> Playing. Ignored in any other phase. Returns whether play began.
    pub fn start_session(&mut self) -> bool {
        if self.phase != Phase::Idle {
            log::debug!("start ignored in {:?}", self.phase);
            return false;
        }
        self.reinitialize();
        self.phase = Phase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Session started (seed {})", self.seed);
        true
    }

    /// Any phase -> Idle. Always succeeds and can be repeated.
    pub fn reset_session(&mut self) {
        self.reinitialize();
        self.phase = Phase::Idle;
        self.events.push(GameEvent::Reset);
        log::info!("Session reset");
    }

    /// Reset and reseed, so the next run differs from the last
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset_session();
    }

    /// Playing -> GameOver after a meteor hit
    pub(crate) fn end_run(&mut self, entity_id: u32) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::HazardHit { entity_id });
        log::info!(
            "Game over: score {}, level {} after {} ticks",
            self.score.score,
            self.score.level,
            self.time_ticks
        );
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            playfield: self.playfield,
            avatar: AvatarView {
                x: self.avatar.pos.x,
                y: self.avatar.pos.y,
                size: self.avatar.size,
            },
            entities: self.pool.iter().map(EntityView::from).collect(),
            score: self.score.score,
            level: self.score.level,
            counts: self.score.counts,
        }
    }
}

/// Avatar as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Falling entity as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub kind: EntityKind,
    pub color: String,
    pub label: Option<String>,
}

impl From<&FallingEntity> for EntityView {
    fn from(entity: &FallingEntity) -> Self {
        Self {
            id: entity.id,
            x: entity.pos.x,
            y: entity.pos.y,
            size: entity.size,
            kind: entity.kind,
            color: entity.kind.color().to_string(),
            label: entity.kind.label().map(str::to_string),
        }
    }
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub playfield: Playfield,
    pub avatar: AvatarView,
    pub entities: Vec<EntityView>,
    pub score: u64,
    pub level: u32,
    pub counts: CollectedCounts,
}
