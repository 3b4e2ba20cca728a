//! Data-driven game balance
//!
//! Every gameplay number lives here so a session can be re-balanced from a
//! JSON file without touching the simulation. Values are validated once up
//! front; the simulation relies on them afterwards.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Archetype, RarityTable};

/// Inclusive-exclusive speed range in pixels/second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    pub avatar_size: f32,
    /// Avatar speed for steer input (pixels/second)
    pub avatar_speed: f32,

    pub planet_size: f32,
    pub planet_speed: SpeedRange,
    pub meteor_size: f32,
    pub meteor_speed: SpeedRange,

    /// Planet cap is `base_planet_cap + level`
    pub base_planet_cap: u32,
    /// Meteor cap is `base_meteor_cap + level`
    pub base_meteor_cap: u32,

    /// Seconds between planet population checks
    pub planet_spawn_period: f32,
    /// Seconds between meteor population checks
    pub meteor_spawn_period: f32,

    pub points_per_level: u64,

    pub rarity: RarityTable,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            avatar_size: AVATAR_SIZE,
            avatar_speed: AVATAR_SPEED,
            planet_size: PLANET_SIZE,
            planet_speed: SpeedRange::new(PLANET_MIN_SPEED, PLANET_MAX_SPEED),
            meteor_size: METEOR_SIZE,
            meteor_speed: SpeedRange::new(METEOR_MIN_SPEED, METEOR_MAX_SPEED),
            base_planet_cap: BASE_PLANET_CAP,
            base_meteor_cap: BASE_METEOR_CAP,
            planet_spawn_period: PLANET_SPAWN_PERIOD,
            meteor_spawn_period: METEOR_SPAWN_PERIOD,
            points_per_level: POINTS_PER_LEVEL,
            rarity: RarityTable::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that sizes, speeds and periods are usable
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("avatar_size", self.avatar_size),
            ("planet_size", self.planet_size),
            ("meteor_size", self.meteor_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NonPositiveSize { field, value });
            }
        }

        if !(self.avatar_speed.is_finite() && self.avatar_speed >= 0.0) {
            return Err(TuningError::InvalidSpeedRange {
                field: "avatar_speed",
                min: self.avatar_speed,
                max: self.avatar_speed,
            });
        }
        for (field, range) in [
            ("planet_speed", self.planet_speed),
            ("meteor_speed", self.meteor_speed),
        ] {
            let ok = range.min.is_finite()
                && range.max.is_finite()
                && range.min >= 0.0
                && range.min <= range.max;
            if !ok {
                return Err(TuningError::InvalidSpeedRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }

        for (field, value) in [
            ("planet_spawn_period", self.planet_spawn_period),
            ("meteor_spawn_period", self.meteor_spawn_period),
        ] {
            if !(value.is_finite() && value >= MIN_SPAWN_PERIOD) {
                return Err(TuningError::PeriodTooShort { field, value });
            }
        }

        if self.points_per_level == 0 {
            return Err(TuningError::ZeroPointsPerLevel);
        }

        let largest = self
            .avatar_size
            .max(self.planet_size)
            .max(self.meteor_size);
        let fits = |side: f32| side.is_finite() && side >= largest;
        if !(fits(self.playfield_width) && fits(self.playfield_height)) {
            return Err(TuningError::PlayfieldTooSmall {
                width: self.playfield_width,
                height: self.playfield_height,
                largest_entity: largest,
            });
        }

        Ok(())
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Json(serde_json::Error),
    EmptyRarityTable,
    ZeroTotalWeight,
    WeightOverflow,
    DuplicateArchetype(Archetype),
    NonPositiveSize { field: &'static str, value: f32 },
    InvalidSpeedRange { field: &'static str, min: f32, max: f32 },
    PeriodTooShort { field: &'static str, value: f32 },
    ZeroPointsPerLevel,
    PlayfieldTooSmall { width: f32, height: f32, largest_entity: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read tuning file: {err}"),
            Self::Json(err) => write!(f, "malformed tuning json: {err}"),
            Self::EmptyRarityTable => write!(f, "rarity table has no entries"),
            Self::ZeroTotalWeight => write!(f, "rarity table weights sum to zero"),
            Self::WeightOverflow => write!(f, "rarity table weights overflow u32"),
            Self::DuplicateArchetype(archetype) => {
                write!(f, "archetype '{}' listed more than once", archetype.as_str())
            }
            Self::NonPositiveSize { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::InvalidSpeedRange { field, min, max } => {
                write!(f, "{field} range is invalid: min={min}, max={max}")
            }
            Self::PeriodTooShort { field, value } => {
                write!(f, "{field} must be at least {MIN_SPAWN_PERIOD}s, got {value}")
            }
            Self::ZeroPointsPerLevel => write!(f, "points_per_level must be at least 1"),
            Self::PlayfieldTooSmall {
                width,
                height,
                largest_entity,
            } => write!(
                f,
                "playfield {width}x{height} cannot fit an entity of size {largest_entity}"
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
