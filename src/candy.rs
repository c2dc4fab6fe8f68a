use crate::config::*;
use crate::geometry::{Separators, radius};
use crate::rng::RandomSource;
use bevy::math::{Rect, Vec2};

/// Stable identity of a candy. Ids grow monotonically, so a smaller id is
/// an older candy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandyId(pub u64);

/// A stationary piece of food
#[derive(Debug, Clone, PartialEq)]
pub struct Candy {
    pub id: CandyId,
    pub size: f32,
    pub position: Vec2,
    /// Seconds left of shelf life. Counts down but nothing removes a candy
    /// when it runs out.
    pub time_to_perish: f32,
}

impl Candy {
    pub fn new(id: CandyId, size: f32, position: Vec2) -> Self {
        Self {
            id,
            size,
            position,
            time_to_perish: CANDY_SHELF_LIFE,
        }
    }

    /// Draw a candy inside `region`. The size is drawn first; if the region
    /// cannot fit a candy of that size, `None` is returned.
    pub fn random(
        id: CandyId,
        rng: &mut RandomSource,
        mean_size: f32,
        sdv: f32,
        region: Rect,
        separators: &Separators,
    ) -> Option<Self> {
        let size = rng.normal(mean_size, sdv).max(CANDY_MIN_SIZE);
        let r = radius(size);

        if region.width() < 2.0 * r || region.height() < 2.0 * r {
            return None;
        }

        let x = rng.uniform(region.min.x + r, region.max.x - r);
        let y = rng.uniform(region.min.y + r, region.max.y - r);
        let position = separators.bound_position(Vec2::new(x, y), r);

        Some(Self::new(id, size, position))
    }

    pub fn radius(&self) -> f32 {
        radius(self.size)
    }

    pub fn age_by(&mut self, dt: f32) {
        self.time_to_perish -= dt;
    }
}
