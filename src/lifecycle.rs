use crate::blob::{Blob, BlobId};
use crate::config::*;
use crate::geometry::{Separators, radius};
use crate::rng::RandomSource;
use bevy::math::Vec2;
use std::f32::consts::TAU;

/// Outcome of a blob's end-of-tick lifecycle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    /// Ran out of energy, or reached the lifespan without enough energy
    Dies,
    /// Reached the lifespan with enough energy: leaves offspring, then dies
    Reproduces,
}

impl Fate {
    pub fn is_dead(self) -> bool {
        !matches!(self, Fate::Alive)
    }
}

/// Decide what happens to an already aged blob this tick.
pub fn evaluate(blob: &Blob) -> Fate {
    if blob.energy <= 0.0 {
        Fate::Dies
    } else if blob.age >= LIFESPAN {
        if blob.energy_fraction() >= REPRODUCTION_THRESHOLD {
            Fate::Reproduces
        } else {
            Fate::Dies
        }
    } else {
        Fate::Alive
    }
}

/// Uniform point in a disk of `area` around the parent's bounded position.
fn offspring_position(
    rng: &mut RandomSource,
    parent_position: Vec2,
    area: f32,
    separators: &Separators,
) -> Vec2 {
    let angle = rng.uniform(0.0, TAU);
    let r = (rng.uniform(0.0, area * SIZE_SCALE) / TAU).sqrt();
    let center = separators.bound_position(parent_position, radius(area));
    center + r * Vec2::new(angle.cos(), angle.sin())
}

/// Offspring of `parent`, with traits mutated around the parent's own.
pub fn offspring(
    parent: &Blob,
    rng: &mut RandomSource,
    mutation: MutationSdvs,
    separators: &Separators,
    mut next_id: impl FnMut() -> BlobId,
) -> Vec<Blob> {
    let parent_position = parent.position;
    let place = move |rng: &mut RandomSource| {
        offspring_position(rng, parent_position, OFFSPRING_AREA, separators)
    };

    (0..OFFSPRING_COUNT)
        .map(|_| {
            Blob::random(
                next_id(),
                rng,
                parent.traits,
                mutation,
                separators,
                Some(&place),
            )
        })
        .collect()
}
