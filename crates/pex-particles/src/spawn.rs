//! Particle initialisation from descriptor parameters

use glam::{Vec2, Vec4};
use pex_descriptor::{Color, EmitterDescriptor};
use rand::Rng;

use crate::emitter::EmitterConfig;
use crate::particle::Particle;
use crate::pool::ParticlePool;

/// Lifetime used for per-second deltas when a particle spawns with no life
/// left. The particle still retires on the next step.
pub const MIN_LIFETIME: f32 = 1.0e-6;

/// Uniform draw in `[-1, 1]`
#[inline]
fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-1.0f32..=1.0)
}

/// `base + variance * U(-1, 1)`
#[inline]
fn vary<R: Rng + ?Sized>(rng: &mut R, base: f32, variance: f32) -> f32 {
    base + variance * signed_unit(rng)
}

/// Per-channel varied color, clamped to `[0, 1]`
fn vary_color<R: Rng + ?Sized>(rng: &mut R, base: Color, variance: Color) -> Vec4 {
    Vec4::new(
        vary(rng, base.r, variance.r),
        vary(rng, base.g, variance.g),
        vary(rng, base.b, variance.b),
        vary(rng, base.a, variance.a),
    )
    .clamp(Vec4::ZERO, Vec4::ONE)
}

/// Build a new particle around `source`.
///
/// Every variance term takes its own draw, in a fixed order, so a seeded
/// generator always reproduces the same particle.
pub fn emit_particle<R: Rng + ?Sized>(
    descriptor: &EmitterDescriptor,
    source: Vec2,
    rng: &mut R,
) -> Particle {
    let variance = descriptor.source_position_variance;
    let position = Vec2::new(
        source.x + variance.x * signed_unit(rng),
        source.y + variance.y * signed_unit(rng),
    );

    let heading = vary(rng, descriptor.angle, descriptor.angle_variance);
    let speed = vary(rng, descriptor.speed, descriptor.speed_variance);
    let direction = Vec2::from_angle(heading) * speed;

    let time_to_live = vary(rng, descriptor.life_span, descriptor.life_span_variance).max(0.0);
    let lifetime = if time_to_live > 0.0 {
        time_to_live
    } else {
        log::trace!("particle spawned with no lifetime, retiring next step");
        MIN_LIFETIME
    };

    let start_radius = vary(rng, descriptor.max_radius, descriptor.max_radius_variance);
    let end_radius = vary(rng, descriptor.min_radius, descriptor.min_radius_variance);
    let angle = vary(rng, descriptor.angle, descriptor.angle_variance);
    let degrees_per_second = vary(
        rng,
        descriptor.rotate_per_second,
        descriptor.rotate_per_second_variance,
    )
    .to_radians();

    let radial_acceleration = vary(
        rng,
        descriptor.radial_acceleration,
        descriptor.radial_acceleration_variance,
    );
    let tangential_acceleration = vary(
        rng,
        descriptor.tangential_acceleration,
        descriptor.tangential_acceleration_variance,
    );

    let start_size = vary(
        rng,
        descriptor.start_particle_size,
        descriptor.start_particle_size_variance,
    );
    let finish_size = vary(
        rng,
        descriptor.finish_particle_size,
        descriptor.finish_particle_size_variance,
    );

    let start_color = vary_color(rng, descriptor.start_color, descriptor.start_color_variance);
    let finish_color = vary_color(rng, descriptor.finish_color, descriptor.finish_color_variance);

    let rotation_start = vary(
        rng,
        descriptor.rotation_start,
        descriptor.rotation_start_variance,
    );
    let rotation_end = vary(rng, descriptor.rotation_end, descriptor.rotation_end_variance);

    Particle {
        position,
        direction,
        start_pos: source,
        color: start_color,
        delta_color: (finish_color - start_color) / lifetime,
        rotation: rotation_start,
        rotation_delta: (rotation_end - rotation_start) / lifetime,
        radial_acceleration,
        tangential_acceleration,
        radius: start_radius,
        radius_delta: (end_radius - start_radius) / lifetime,
        angle,
        degrees_per_second,
        particle_size: start_size.max(0.0),
        particle_size_delta: (finish_size - start_size) / lifetime,
        time_to_live,
    }
}

/// Spawn one particle into `pool`.
///
/// The emitter source becomes `origin / render_scale`, or the local origin
/// when the host gives none. Returns `false` without touching the generator
/// when the pool is full.
pub fn spawn_particle<R: Rng + ?Sized>(
    config: &mut EmitterConfig,
    pool: &mut ParticlePool,
    rng: &mut R,
    origin: Option<Vec2>,
    render_scale: f32,
) -> bool {
    config.source_position = match origin {
        Some(offset) if render_scale != 0.0 => offset / render_scale,
        _ => Vec2::ZERO,
    };

    if pool.is_full() {
        return false;
    }

    let particle = emit_particle(&config.descriptor, config.source_position, rng);
    match pool.spawn() {
        Some(slot) => {
            *slot = particle;
            log::trace!("spawned particle {} at {}", pool.len() - 1, particle.position);
            true
        }
        None => false,
    }
}
