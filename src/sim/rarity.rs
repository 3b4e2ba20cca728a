//! Planet archetypes and the weighted rarity table
//!
//! The table is walked rarest-first. A draw in `[0, total)` lands in the
//! first band whose cumulative weight it is `<=`, so a value sitting exactly
//! on a boundary always belongs to the rarer band.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::TuningError;

/// Planet genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Rock,
    Pop,
    Jazz,
    Funk,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Rock,
        Archetype::Pop,
        Archetype::Jazz,
        Archetype::Funk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Rock => "rock",
            Archetype::Pop => "pop",
            Archetype::Jazz => "jazz",
            Archetype::Funk => "funk",
        }
    }

    /// Fill color name for the renderer
    pub fn color(&self) -> &'static str {
        match self {
            Archetype::Rock => "red",
            Archetype::Pop => "pink",
            Archetype::Jazz => "blue",
            Archetype::Funk => "purple",
        }
    }

    /// Glyph drawn on top of the planet
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Rock => "🎸",
            Archetype::Pop => "🎶",
            Archetype::Jazz => "🎷",
            Archetype::Funk => "🎹",
        }
    }
}

/// One row of the rarity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityEntry {
    pub archetype: Archetype,
    pub weight: u32,
}

/// Ordered `(archetype, weight)` pairs, rarest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RarityEntry>", into = "Vec<RarityEntry>")]
pub struct RarityTable {
    entries: Vec<RarityEntry>,
    total: u32,
}

impl Default for RarityTable {
    fn default() -> Self {
        let entries = vec![
            RarityEntry { archetype: Archetype::Funk, weight: 1 },
            RarityEntry { archetype: Archetype::Jazz, weight: 10 },
            RarityEntry { archetype: Archetype::Pop, weight: 50 },
            RarityEntry { archetype: Archetype::Rock, weight: 90 },
        ];
        Self { entries, total: 151 }
    }
}

impl RarityTable {
    /// Build a table. Entries are sorted rarest-first (ties keep input order).
    pub fn new(mut entries: Vec<RarityEntry>) -> Result<Self, TuningError> {
        if entries.is_empty() {
            return Err(TuningError::EmptyRarityTable);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.archetype == entry.archetype) {
                return Err(TuningError::DuplicateArchetype(entry.archetype));
            }
        }
        let total = entries
            .iter()
            .try_fold(0u32, |acc, e| acc.checked_add(e.weight))
            .ok_or(TuningError::WeightOverflow)?;
        if total == 0 {
            return Err(TuningError::ZeroTotalWeight);
        }
        entries.sort_by_key(|e| e.weight);
        Ok(Self { entries, total })
    }

    pub fn entries(&self) -> &[RarityEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.total
    }

    /// Weight of an archetype (0 if absent)
    pub fn weight_of(&self, archetype: Archetype) -> u32 {
        self.entries
            .iter()
            .find(|e| e.archetype == archetype)
            .map_or(0, |e| e.weight)
    }

    /// Map a draw in `[0, total)` onto an archetype.
    ///
    /// Zero-weight rows are skipped so they can never win, even on a draw
    /// of exactly 0. Out-of-range draws fall through to the last non-empty band.
    pub fn resolve(&self, draw: f64) -> Archetype {
        let mut cumulative = 0.0;
        let mut last = self.entries[0].archetype;
        for entry in self.entries.iter().filter(|e| e.weight > 0) {
            cumulative += f64::from(entry.weight);
            last = entry.archetype;
            if draw <= cumulative {
                return entry.archetype;
            }
        }
        last
    }

    /// Draw a uniform value from the RNG and resolve it
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Archetype {
        let draw = rng.random_range(0.0..f64::from(self.total));
        self.resolve(draw)
    }
}

impl TryFrom<Vec<RarityEntry>> for RarityTable {
    type Error = TuningError;

    fn try_from(entries: Vec<RarityEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<RarityTable> for Vec<RarityEntry> {
    fn from(table: RarityTable) -> Self {
        table.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_table_is_rarest_first() {
        let table = RarityTable::default();
        let order: Vec<_> = table.entries().iter().map(|e| e.archetype).collect();
        assert_eq!(
            order,
            vec![Archetype::Funk, Archetype::Jazz, Archetype::Pop, Archetype::Rock]
        );
        assert_eq!(table.total_weight(), 151);
        assert_eq!(table, RarityTable::new(table.entries().to_vec()).unwrap());
    }

    #[test]
    fn test_resolve_boundaries_belong_to_rarer_band() {
        let table = RarityTable::default();
        assert_eq!(table.resolve(0.0), Archetype::Funk);
        assert_eq!(table.resolve(1.0), Archetype::Funk);
        assert_eq!(table.resolve(1.0001), Archetype::Jazz);
        assert_eq!(table.resolve(11.0), Archetype::Jazz);
        assert_eq!(table.resolve(61.0), Archetype::Pop);
        assert_eq!(table.resolve(61.5), Archetype::Rock);
        assert_eq!(table.resolve(150.999), Archetype::Rock);

        // Same draw, same answer
        for _ in 0..10 {
            assert_eq!(table.resolve(11.0), Archetype::Jazz);
        }
    }

    #[test]
    fn test_distribution_matches_weights() {
        let table = RarityTable::default();
        let mut rng = Pcg32::seed_from_u64(151);
        let draws = 100_000;
        let mut hits = [0u32; 4];

        for _ in 0..draws {
            let idx = match table.sample(&mut rng) {
                Archetype::Funk => 0,
                Archetype::Jazz => 1,
                Archetype::Pop => 2,
                Archetype::Rock => 3,
            };
            hits[idx] += 1;
        }

        let expected = [1.0 / 151.0, 10.0 / 151.0, 50.0 / 151.0, 90.0 / 151.0];
        for (observed, expected) in hits.iter().zip(expected) {
            let freq = *observed as f64 / draws as f64;
            assert!(
                (freq - expected).abs() < 0.01,
                "observed {freq}, expected {expected}"
            );
        }
        assert!(hits.iter().all(|&h| h > 0), "every archetype must be reachable");
    }

    #[test]
    fn test_zero_weight_never_wins() {
        let table = RarityTable::new(vec![
            RarityEntry { archetype: Archetype::Funk, weight: 0 },
            RarityEntry { archetype: Archetype::Rock, weight: 5 },
        ])
        .unwrap();
        assert_eq!(table.resolve(0.0), Archetype::Rock);
        assert_eq!(table.weight_of(Archetype::Funk), 0);
    }

    #[test]
    fn test_new_sorts_and_rejects_bad_tables() {
        let table = RarityTable::new(vec![
            RarityEntry { archetype: Archetype::Rock, weight: 90 },
            RarityEntry { archetype: Archetype::Funk, weight: 1 },
        ])
        .unwrap();
        assert_eq!(table.entries()[0].archetype, Archetype::Funk);

        assert!(matches!(
            RarityTable::new(Vec::new()),
            Err(TuningError::EmptyRarityTable)
        ));
        assert!(matches!(
            RarityTable::new(vec![RarityEntry { archetype: Archetype::Pop, weight: 0 }]),
            Err(TuningError::ZeroTotalWeight)
        ));
        assert!(matches!(
            RarityTable::new(vec![
                RarityEntry { archetype: Archetype::Pop, weight: 1 },
                RarityEntry { archetype: Archetype::Pop, weight: 2 },
            ]),
            Err(TuningError::DuplicateArchetype(Archetype::Pop))
        ));
    }

    #[test]
    fn test_table_json_is_a_plain_list() {
        let json = serde_json::to_string(&RarityTable::default()).unwrap();
        assert!(json.starts_with("[{\"archetype\":\"funk\",\"weight\":1}"));
        let back: RarityTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RarityTable::default());

        let bad = serde_json::from_str::<RarityTable>("[]");
        assert!(bad.is_err());
    }
}
