use crate::blob::Blob;
use crate::candy::Candy;
use crate::config::*;
use crate::geometry::{Separators, Visibility};
use bevy::math::Vec2;

/// Closest candy the observer can see. Ties keep the first candy found.
pub fn nearest_visible_candy<'a>(
    observer: Vec2,
    candies: impl IntoIterator<Item = &'a Candy>,
    visibility: &dyn Visibility,
) -> Option<&'a Candy> {
    let mut closest: Option<(&Candy, f32)> = None;

    for candy in candies {
        let distance = observer.distance(candy.position);
        let closer = match closest {
            None => true,
            Some((_, best)) => distance < best,
        };
        if closer && visibility.visible(observer, candy.position) {
            closest = Some((candy, distance));
        }
    }

    closest.map(|(candy, _)| candy)
}

/// Scale `v` down to `limit` if it is longer.
fn clamp_speed(v: Vec2, limit: f32) -> Vec2 {
    let len = v.length();
    if len > limit { v * (limit / len) } else { v }
}

/// Steer `blob` one tick towards the nearest visible candy and move it.
///
/// Returns the movement actually made after bounding, or `None` when no
/// candy is visible, in which case the blob is left untouched.
pub fn steer<'a>(
    blob: &mut Blob,
    candies: impl IntoIterator<Item = &'a Candy>,
    visibility: &dyn Visibility,
    separators: &Separators,
    dt: f32,
) -> Option<Vec2> {
    let target = nearest_visible_candy(blob.position, candies, visibility)?;

    let displacement = target.position - blob.position;
    blob.acceleration = ACC_MULTIPLIER * displacement.normalize_or_zero();
    blob.velocity = clamp_speed(blob.velocity + blob.acceleration * dt, blob.traits.speed);

    // look ahead along the acceleration
    let final_velocity = clamp_speed(
        blob.velocity + LOOKAHEAD_BLEND * blob.acceleration,
        blob.traits.speed,
    );

    let old_position = blob.position;
    blob.position = separators.bound_position(old_position + final_velocity * dt, blob.radius());

    Some(blob.position - old_position)
}
