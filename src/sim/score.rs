//! Score, per-genre counters and level progression

use serde::{Deserialize, Serialize};

use super::rarity::Archetype;

/// How many planets of each genre were caught
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectedCounts {
    pub rock: u32,
    pub pop: u32,
    pub jazz: u32,
    pub funk: u32,
}

impl CollectedCounts {
    pub fn get(&self, archetype: Archetype) -> u32 {
        match archetype {
            Archetype::Rock => self.rock,
            Archetype::Pop => self.pop,
            Archetype::Jazz => self.jazz,
            Archetype::Funk => self.funk,
        }
    }

    fn slot_mut(&mut self, archetype: Archetype) -> &mut u32 {
        match archetype {
            Archetype::Rock => &mut self.rock,
            Archetype::Pop => &mut self.pop,
            Archetype::Jazz => &mut self.jazz,
            Archetype::Funk => &mut self.funk,
        }
    }

    pub fn total(&self) -> u64 {
        Archetype::ALL.iter().map(|&a| u64::from(self.get(a))).sum()
    }
}

/// Level reached at a given score: one level per `points_per_level` points
#[inline]
pub fn level_for_score(score: u64, points_per_level: u64) -> u32 {
    let level = 1 + score / points_per_level.max(1);
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Running score for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub counts: CollectedCounts,
    pub score: u64,
    pub level: u32,
    points_per_level: u64,
}

impl ScoreState {
    pub fn new(points_per_level: u64) -> Self {
        Self {
            counts: CollectedCounts::default(),
            score: 0,
            level: 1,
            points_per_level: points_per_level.max(1),
        }
    }

    /// Count a caught planet. Returns the new level if this catch leveled up.
    pub fn on_collectible_collected(&mut self, archetype: Archetype) -> Option<u32> {
        let slot = self.counts.slot_mut(archetype);
        *slot = slot.saturating_add(1);
        self.score += 1;

        let leveled = self.score.is_multiple_of(self.points_per_level);
        if leveled {
            self.level = self.level.saturating_add(1);
        }
        debug_assert_eq!(
            self.level,
            level_for_score(self.score, self.points_per_level)
        );
        leveled.then_some(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_catch() {
        let mut score = ScoreState::new(10);
        assert_eq!(score.on_collectible_collected(Archetype::Pop), None);
        assert_eq!(score.score, 1);
        assert_eq!(score.counts.pop, 1);
        assert_eq!(score.counts.get(Archetype::Rock), 0);
        assert_eq!(score.level, 1);
    }

    #[test]
    fn test_level_steps_every_ten_points() {
        let mut score = ScoreState::new(10);
        for _ in 0..9 {
            score.on_collectible_collected(Archetype::Rock);
        }
        assert_eq!(score.level, 1);

        assert_eq!(score.on_collectible_collected(Archetype::Rock), Some(2));
        assert_eq!(score.score, 10);

        for _ in 0..9 {
            assert_eq!(score.on_collectible_collected(Archetype::Jazz), None);
        }
        assert_eq!(score.score, 19);
        assert_eq!(score.level, 2);

        assert_eq!(score.on_collectible_collected(Archetype::Funk), Some(3));
        assert_eq!(score.score, 20);
        assert_eq!(score.counts.total(), 20);
    }

    #[test]
    fn test_zero_interval_is_treated_as_one() {
        let mut score = ScoreState::new(0);
        assert_eq!(score.on_collectible_collected(Archetype::Pop), Some(2));
        assert_eq!(level_for_score(5, 0), 6);
    }

    proptest! {
        #[test]
        fn prop_level_tracks_score(catches in prop::collection::vec(0usize..4, 0..200)) {
            let mut score = ScoreState::new(10);
            let mut last_level = score.level;
            for idx in catches {
                score.on_collectible_collected(Archetype::ALL[idx]);
                prop_assert!(score.level >= last_level);
                prop_assert!(score.level - last_level <= 1);
                prop_assert_eq!(score.level, level_for_score(score.score, 10));
                prop_assert!(score.counts.total() <= score.score);
                last_level = score.level;
            }
        }
    }
}
