//! Live planets and meteors
//!
//! The pool only grows, up to a level-scaled cap. Entities that fall off the
//! bottom or get caught are recycled back above the top edge instead of being
//! removed, so steady-state population is the cap.

use rand::Rng;

use super::entity::{FallingEntity, Playfield};
use super::spawner::{random_column, spawn_collectible, spawn_hazard};
use crate::tuning::Tuning;

/// Population cap for a class of entity at `level`
#[inline]
pub fn population_cap(base: u32, level: u32) -> usize {
    base.saturating_add(level) as usize
}

/// Send an entity back above the top edge at a fresh random column
pub fn recycle<R: Rng + ?Sized>(entity: &mut FallingEntity, rng: &mut R, playfield: &Playfield) {
    let x = random_column(rng, playfield, entity.size);
    entity.respawn_at(x, playfield);
    log::trace!("recycled entity {} to x={:.1}", entity.id, entity.pos.x);
}

/// Owner of every falling entity in a session
#[derive(Debug, Clone)]
pub struct EntityPool {
    /// Collectibles (sorted by id)
    pub planets: Vec<FallingEntity>,
    /// Hazards (sorted by id)
    pub meteors: Vec<FallingEntity>,
    next_id: u32,
}

impl Default for EntityPool {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityPool {
    pub fn new() -> Self {
        Self {
            planets: Vec::new(),
            meteors: Vec::new(),
            next_id: 1,
        }
    }

    /// Drop every entity and restart id allocation
    pub fn clear(&mut self) {
        self.planets.clear();
        self.meteors.clear();
        self.next_id = 1;
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.planets.len() + self.meteors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty() && self.meteors.is_empty()
    }

    /// All entities, planets first
    pub fn iter(&self) -> impl Iterator<Item = &FallingEntity> {
        self.planets.iter().chain(self.meteors.iter())
    }

    /// Advance every entity by `dt` seconds, recycling any that left the bottom.
    /// Returns how many were recycled.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R, playfield: &Playfield) -> u32 {
        let mut recycled = 0;
        for entity in self.planets.iter_mut().chain(self.meteors.iter_mut()) {
            if entity.fall(dt, playfield) {
                recycle(entity, rng, playfield);
                recycled += 1;
            }
        }
        recycled
    }

    /// Relocate a caught planet; population is unchanged
    pub fn recycle_planet<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
        playfield: &Playfield,
    ) {
        if let Some(planet) = self.planets.get_mut(index) {
            recycle(planet, rng, playfield);
        }
    }

    /// Spawn one planet if below the cap for `level`. Returns the new id.
    pub fn maintain_planets<R: Rng + ?Sized>(
        &mut self,
        level: u32,
        rng: &mut R,
        tuning: &Tuning,
        playfield: &Playfield,
    ) -> Option<u32> {
        if self.planets.len() >= population_cap(tuning.base_planet_cap, level) {
            return None;
        }
        let id = self.next_entity_id();
        let planet = spawn_collectible(rng, id, tuning, playfield);
        log::debug!(
            "spawned planet {} ({:?}) at x={:.1}, speed={:.1}",
            id,
            planet.kind,
            planet.pos.x,
            planet.speed
        );
        self.planets.push(planet);
        Some(id)
    }

    /// Spawn one meteor if below the cap for `level`. Returns the new id.
    pub fn maintain_meteors<R: Rng + ?Sized>(
        &mut self,
        level: u32,
        rng: &mut R,
        tuning: &Tuning,
        playfield: &Playfield,
    ) -> Option<u32> {
        if self.meteors.len() >= population_cap(tuning.base_meteor_cap, level) {
            return None;
        }
        let id = self.next_entity_id();
        let meteor = spawn_hazard(rng, id, tuning, playfield);
        log::debug!(
            "spawned meteor {} at x={:.1}, speed={:.1}",
            id,
            meteor.pos.x,
            meteor.speed
        );
        self.meteors.push(meteor);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::sim::entity::EntityKind;
    use crate::sim::rarity::Archetype;

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0)
    }

    #[test]
    fn test_caps_scale_with_level() {
        let tuning = Tuning::default();
        let mut pool = EntityPool::new();
        let mut rng = Pcg32::seed_from_u64(5);

        for _ in 0..20 {
            pool.maintain_planets(1, &mut rng, &tuning, &field());
            pool.maintain_meteors(1, &mut rng, &tuning, &field());
        }
        assert_eq!(pool.planets.len(), 6);
        assert_eq!(pool.meteors.len(), 4);

        assert!(pool.maintain_planets(2, &mut rng, &tuning, &field()).is_some());
        assert!(pool.maintain_planets(2, &mut rng, &tuning, &field()).is_none());
        assert_eq!(pool.planets.len(), 7);
        assert_eq!(pool.len(), 11);
    }

    #[test]
    fn test_ids_are_unique_and_reset_on_clear() {
        let tuning = Tuning::default();
        let mut pool = EntityPool::new();
        let mut rng = Pcg32::seed_from_u64(6);

        let a = pool.maintain_planets(1, &mut rng, &tuning, &field()).unwrap();
        let b = pool.maintain_meteors(1, &mut rng, &tuning, &field()).unwrap();
        assert_ne!(a, b);

        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.maintain_planets(1, &mut rng, &tuning, &field()), Some(1));
    }

    #[test]
    fn test_tick_moves_everything_down() {
        let mut pool = EntityPool::new();
        pool.planets.push(FallingEntity {
            id: 1,
            kind: EntityKind::Collectible { archetype: Archetype::Rock },
            pos: Vec2::new(100.0, 10.0),
            size: 40.0,
            speed: 120.0,
        });
        pool.meteors.push(FallingEntity {
            id: 2,
            kind: EntityKind::Hazard,
            pos: Vec2::new(200.0, 20.0),
            size: 30.0,
            speed: 60.0,
        });
        let mut rng = Pcg32::seed_from_u64(7);

        assert_eq!(pool.tick(0.5, &mut rng, &field()), 0);
        assert_eq!(pool.planets[0].pos, Vec2::new(100.0, 70.0));
        assert_eq!(pool.meteors[0].pos, Vec2::new(200.0, 50.0));
    }

    #[test]
    fn test_recycle_planet_keeps_population() {
        let tuning = Tuning::default();
        let mut pool = EntityPool::new();
        let mut rng = Pcg32::seed_from_u64(8);
        pool.maintain_planets(1, &mut rng, &tuning, &field());
        pool.planets[0].pos = Vec2::new(300.0, 300.0);

        pool.recycle_planet(0, &mut rng, &field());
        assert_eq!(pool.planets.len(), 1);
        assert!(pool.planets[0].pos.y < 0.0);

        // Out of range index is ignored
        pool.recycle_planet(42, &mut rng, &field());
    }

    proptest! {
        #[test]
        fn prop_fallen_entities_recycle_into_bounds(
            seed in any::<u64>(),
            x in 0.0f32..760.0,
            y in 500.0f32..600.0,
            speed in 0.0f32..6000.0,
            size in 1.0f32..100.0,
        ) {
            let field = field();
            let mut pool = EntityPool::new();
            pool.meteors.push(FallingEntity {
                id: 1,
                kind: EntityKind::Hazard,
                pos: Vec2::new(x, y),
                size,
                speed,
            });
            let mut rng = Pcg32::seed_from_u64(seed);

            let recycled = pool.tick(1.0 / 60.0, &mut rng, &field);
            let meteor = &pool.meteors[0];
            if recycled == 1 {
                prop_assert!(meteor.pos.y < 0.0);
                prop_assert!(meteor.pos.x >= 0.0);
                prop_assert!(meteor.pos.x <= field.width - meteor.size);
            } else {
                prop_assert!(meteor.pos.y <= field.height);
                prop_assert!(meteor.pos.y >= y);
            }
        }
    }
}
