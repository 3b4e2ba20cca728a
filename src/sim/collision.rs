//! Avatar-vs-entity overlap test
//!
//! Circle-circle: two bodies touch when the distance between their centers is
//! strictly less than the sum of their radii. Exact tangency is a miss, so an
//! entity grazing the avatar on its approach frame does not register.
//! No state is kept between calls; the same pair can hit on consecutive frames.

use super::entity::{Avatar, Circle, FallingEntity};

/// Strict circle-circle overlap, compared in squared space
#[inline]
pub fn circles_overlap(a: Circle, b: Circle) -> bool {
    let reach = a.radius + b.radius;
    a.center.distance_squared(b.center) < reach * reach
}

/// Whether the avatar currently touches a falling entity
#[inline]
pub fn overlaps(avatar: &Avatar, entity: &FallingEntity) -> bool {
    circles_overlap(avatar.bounds(), entity.bounds())
}
