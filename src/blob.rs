use crate::config::*;
use crate::geometry::{Separators, radius};
use crate::rng::RandomSource;
use bevy::math::Vec2;

/// Stable identity of a blob for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlobId(pub u64);

/// Heritable phenotype of a blob, fixed at birth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traits {
    pub size: f32,
    pub speed: f32,
}

impl Traits {
    pub fn new(size: f32, speed: f32) -> Self {
        Self { size, speed }
    }

    /// Draw traits around `mean`, floored at the minimum size and speed.
    /// Size is drawn before speed.
    pub fn sample(rng: &mut RandomSource, mean: Traits, sdvs: MutationSdvs) -> Self {
        let size = rng.normal(mean.size, sdvs.size_sdv).max(MIN_SIZE);
        let speed = rng.normal(mean.speed, sdvs.speed_sdv).max(SPEED_FLOOR);
        Self { size, speed }
    }

    pub fn radius(&self) -> f32 {
        radius(self.size)
    }

    pub fn max_energy(&self) -> f32 {
        ENERGY_SIZE_RATIO * self.size
    }
}

impl From<TraitMeans> for Traits {
    fn from(means: TraitMeans) -> Self {
        Self::new(means.size, means.speed)
    }
}

/// A mobile organism that steers towards candy and lives off stored energy
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub id: BlobId,
    pub traits: Traits,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub energy: f32,
    pub age: f32,
    /// Display hue in degrees
    pub hue: f32,
}

impl Blob {
    /// A newborn blob at rest with half of its energy capacity
    pub fn new(id: BlobId, traits: Traits, position: Vec2, hue: f32) -> Self {
        Self {
            id,
            traits,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            energy: traits.max_energy() / 2.0,
            age: 0.0,
            hue,
        }
    }

    /// Draw a blob around `mean` traits. Without `position_fn` the blob is
    /// placed uniformly in the arena. Draw order: traits, position, hue.
    pub fn random(
        id: BlobId,
        rng: &mut RandomSource,
        mean: Traits,
        sdvs: MutationSdvs,
        separators: &Separators,
        position_fn: Option<&dyn Fn(&mut RandomSource) -> Vec2>,
    ) -> Self {
        let traits = Traits::sample(rng, mean, sdvs);
        let r = traits.radius();
        let position = match position_fn {
            Some(f) => f(rng),
            None => {
                let x = rng.uniform(r, SIM_WIDTH - r);
                let y = rng.uniform(r, SIM_HEIGHT - r);
                Vec2::new(x, y)
            }
        };
        let hue = rng.uniform(0.0, 360.0);

        Self::new(id, traits, separators.bound_position(position, r), hue)
    }

    pub fn radius(&self) -> f32 {
        self.traits.radius()
    }

    pub fn max_energy(&self) -> f32 {
        self.traits.max_energy()
    }

    pub fn energy_fraction(&self) -> f32 {
        self.energy / self.max_energy()
    }

    pub fn age_by(&mut self, dt: f32) {
        self.age += dt;
    }

    pub fn consume_energy(&mut self, amount: f32) {
        self.energy -= amount;
    }

    /// Add energy, capped at the blob's capacity.
    pub fn add_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(self.max_energy());
    }
}
