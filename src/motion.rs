//! Ballistic motion inside the reaction box.

use crate::config::MotionConfig;
use crate::particle::Particle;

/// Clamp a raw frame delta to `[0, config.max_delta]`.
#[inline]
pub fn clamp_delta(dt: f32, config: &MotionConfig) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, config.max_delta)
}

/// Move every particle by `velocity * speed_factor` over `dt`.
///
/// Particles that cross `±(half_box - radius)` on an axis are clamped to the
/// wall and that velocity component is reversed and damped by the
/// restitution factor. The stored velocity is never scaled by `speed_factor`.
pub fn integrate(
    particles: &mut [Particle],
    speed_factor: f32,
    half_box: f32,
    dt: f32,
    config: &MotionConfig,
) {
    let dt = clamp_delta(dt, config);
    let step = speed_factor * dt * config.frame_rate_normalization;
    let limit = (half_box - config.particle_radius).max(0.0);

    for p in particles.iter_mut() {
        let mut position = p.position + p.velocity * step;
        for axis in 0..3 {
            if position[axis] > limit || position[axis] < -limit {
                position[axis] = position[axis].clamp(-limit, limit);
                p.velocity[axis] *= -config.restitution;
            }
        }
        p.position = position;
    }
}
