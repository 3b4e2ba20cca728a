//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, input or audio dependencies

pub mod clock;
pub mod collision;
pub mod entity;
pub mod pool;
pub mod rarity;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{Cadence, FixedTimestep};
pub use collision::{circles_overlap, overlaps};
pub use entity::{Avatar, Circle, EntityKind, FallingEntity, Playfield};
pub use pool::{EntityPool, population_cap};
pub use rarity::{Archetype, RarityEntry, RarityTable};
pub use score::{CollectedCounts, ScoreState, level_for_score};
pub use spawner::{spawn_collectible, spawn_hazard};
pub use state::{AvatarView, EntityView, GameEvent, Phase, Session, Snapshot};
pub use tick::{MovementIntent, TickInput, tick};
