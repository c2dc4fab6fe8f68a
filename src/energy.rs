use crate::blob::Blob;
use crate::candy::Candy;
use crate::config::*;

/// Charge the cost of having moved by `distance` at the blob's current
/// velocity.
pub fn charge_movement(blob: &mut Blob, distance: f32) {
    let cost = ENERGY_EXP_SIZE_RATIO
        * blob.traits.size
        * distance
        * (1.0 + VEL_ENERGY_MULT * blob.velocity.length());
    blob.consume_energy(cost);
}

/// Charge the upkeep of staying alive for `dt` seconds.
pub fn charge_passive(blob: &mut Blob, dt: f32) {
    blob.consume_energy(dt * PASSIVE_ENERGY_LOSS * blob.traits.size);
}

/// How far `candy` lies beyond the blob's reach; at most `EAT_EPSILON`
/// means the blob can eat it.
pub fn reach_margin(blob: &Blob, candy: &Candy) -> f32 {
    blob.position.distance(candy.position) + candy.radius() - blob.radius()
}

pub fn can_eat(blob: &Blob, candy: &Candy) -> bool {
    reach_margin(blob, candy) <= EAT_EPSILON
}

/// Credit the blob for eating `candy`.
pub fn feed(blob: &mut Blob, candy: &Candy, energy_density: f32) {
    blob.add_energy(energy_density * candy.size);
}
