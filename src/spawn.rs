//! Random placement helpers for new particles.
//!
//! All helpers take the RNG explicitly so a simulation can be driven by a
//! seeded generator in tests.

use glam::Vec3;
use rand::Rng;

/// Random point inside a cube of given half-size, centered at origin.
///
/// A non-positive half-size yields the origin.
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, half_size: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * half_size,
        (rng.gen::<f32>() - 0.5) * 2.0 * half_size,
        (rng.gen::<f32>() - 0.5) * 2.0 * half_size,
    )
    .max(Vec3::splat(-half_size.abs()))
    .min(Vec3::splat(half_size.abs()))
}

/// `center` displaced by up to `scale / 2` along each axis.
pub fn random_offset<R: Rng + ?Sized>(rng: &mut R, center: Vec3, scale: f32) -> Vec3 {
    center
        + Vec3::new(
            (rng.gen::<f32>() - 0.5) * scale,
            (rng.gen::<f32>() - 0.5) * scale,
            (rng.gen::<f32>() - 0.5) * scale,
        )
}

/// Rejection attempts before a short sample is stretched to the floor.
const MAX_VELOCITY_ATTEMPTS: usize = 16;

/// Random velocity with components in `[-scale/2, scale/2)` and a speed of at
/// least `scale * min_fraction`.
///
/// Uses rejection sampling for a bounded number of attempts. If every sample
/// is too slow (only likely when `min_fraction` approaches or exceeds the
/// cube's reach) the last one is rescaled to the minimum speed, so the
/// components may then exceed `scale / 2`.
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, scale: f32, min_fraction: f32) -> Vec3 {
    let min_speed = (scale * min_fraction).abs();
    let mut v = Vec3::ZERO;
    for _ in 0..MAX_VELOCITY_ATTEMPTS {
        v = Vec3::new(
            (rng.gen::<f32>() - 0.5) * scale,
            (rng.gen::<f32>() - 0.5) * scale,
            (rng.gen::<f32>() - 0.5) * scale,
        );
        if v.length_squared() >= min_speed * min_speed {
            return v;
        }
    }
    v.try_normalize().unwrap_or(Vec3::X) * min_speed
}
