//! Avatar and falling entities
//!
//! Positions are top-left corners in playfield pixels (y grows downward).
//! Every body is drawn and collided as a circle inscribed in its square.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rarity::Archetype;

/// Circular bounds used for collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Rectangular playfield, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Largest top-left x a body of `size` can have
    #[inline]
    pub fn max_x(&self, size: f32) -> f32 {
        (self.width - size).max(0.0)
    }

    /// Largest top-left y a body of `size` can have
    #[inline]
    pub fn max_y(&self, size: f32) -> f32 {
        (self.height - size).max(0.0)
    }
}

/// The player-controlled catcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub size: f32,
    /// Pixels/second for steer input
    pub speed: f32,
}

impl Avatar {
    /// Avatar centered in the playfield
    pub fn centered(playfield: &Playfield, size: f32, speed: f32) -> Self {
        let pos = playfield.center() - Vec2::splat(size / 2.0);
        let mut avatar = Self { pos, size, speed };
        avatar.clamp_to(playfield);
        avatar
    }

    pub fn bounds(&self) -> Circle {
        Circle {
            center: self.pos + Vec2::splat(self.size / 2.0),
            radius: self.size / 2.0,
        }
    }

    /// Move by a raw pixel offset, staying inside the playfield
    pub fn translate(&mut self, delta: Vec2, playfield: &Playfield) {
        if delta.is_finite() {
            self.pos += delta;
        }
        self.clamp_to(playfield);
    }

    pub fn clamp_to(&mut self, playfield: &Playfield) {
        self.pos.x = self.pos.x.clamp(0.0, playfield.max_x(self.size));
        self.pos.y = self.pos.y.clamp(0.0, playfield.max_y(self.size));
    }
}

/// What a falling entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityKind {
    /// A planet worth one point
    Collectible { archetype: Archetype },
    /// A meteor that ends the run
    Hazard,
}

impl EntityKind {
    pub fn color(&self) -> &'static str {
        match self {
            EntityKind::Collectible { archetype } => archetype.color(),
            EntityKind::Hazard => "orange",
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            EntityKind::Collectible { archetype } => Some(archetype.label()),
            EntityKind::Hazard => None,
        }
    }

    pub fn archetype(&self) -> Option<Archetype> {
        match self {
            EntityKind::Collectible { archetype } => Some(*archetype),
            EntityKind::Hazard => None,
        }
    }
}

/// A planet or meteor falling down the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed in pixels/second
    pub speed: f32,
}

impl FallingEntity {
    pub fn bounds(&self) -> Circle {
        Circle {
            center: self.pos + Vec2::splat(self.size / 2.0),
            radius: self.size / 2.0,
        }
    }

    /// Fall for `dt` seconds. Returns true once the entity has left the bottom.
    pub fn fall(&mut self, dt: f32, playfield: &Playfield) -> bool {
        self.pos.y += self.speed * dt;
        self.pos.y > playfield.height
    }

    /// Move back above the top edge at column `x`
    pub fn respawn_at(&mut self, x: f32, playfield: &Playfield) {
        self.pos = Vec2::new(x.clamp(0.0, playfield.max_x(self.size)), -self.size);
    }

    pub fn is_collectible(&self) -> bool {
        matches!(self.kind, EntityKind::Collectible { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_starts_centered() {
        let field = Playfield::new(800.0, 600.0);
        let avatar = Avatar::centered(&field, 50.0, 300.0);
        assert_eq!(avatar.pos, Vec2::new(375.0, 275.0));
        assert_eq!(avatar.bounds().center, Vec2::new(400.0, 300.0));
        assert_eq!(avatar.bounds().radius, 25.0);
    }

    #[test]
    fn test_avatar_translate_clamps() {
        let field = Playfield::new(800.0, 600.0);
        let mut avatar = Avatar::centered(&field, 50.0, 300.0);

        avatar.translate(Vec2::new(-1000.0, 1000.0), &field);
        assert_eq!(avatar.pos, Vec2::new(0.0, 550.0));

        avatar.translate(Vec2::new(5000.0, -5000.0), &field);
        assert_eq!(avatar.pos, Vec2::new(750.0, 0.0));

        avatar.translate(Vec2::new(f32::NAN, 3.0), &field);
        assert_eq!(avatar.pos, Vec2::new(750.0, 0.0));
    }

    #[test]
    fn test_fall_reports_exit_only_past_bottom() {
        let field = Playfield::new(800.0, 600.0);
        let mut meteor = FallingEntity {
            id: 1,
            kind: EntityKind::Hazard,
            pos: Vec2::new(10.0, 590.0),
            size: 30.0,
            speed: 20.0,
        };
        assert!(!meteor.fall(0.5, &field)); // exactly 600
        assert!(meteor.fall(0.5, &field));

        meteor.respawn_at(900.0, &field);
        assert_eq!(meteor.pos, Vec2::new(770.0, -30.0));
    }

    #[test]
    fn test_kind_visuals() {
        let pop = EntityKind::Collectible { archetype: Archetype::Pop };
        assert_eq!(pop.color(), "pink");
        assert_eq!(pop.label(), Some("🎶"));
        assert_eq!(EntityKind::Hazard.color(), "orange");
        assert_eq!(EntityKind::Hazard.archetype(), None);
    }
}
