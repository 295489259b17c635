//! Per-emitter simulation: emission, integration and lifecycle

use glam::Vec2;
use pex_descriptor::EmitterType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emitter::{EmitterConfig, EmitterState};
use crate::particle::Particle;
use crate::pool::ParticlePool;
use crate::settings::EmitterSettings;
use crate::spawn::spawn_particle;

/// What one call to [`SimulationEngine::advance`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles spawned this step
    pub spawned: usize,
    /// Particles retired this step
    pub retired: usize,
    /// The emitter's duration ran out this step; particles were not stepped
    pub expired: bool,
    /// The emitter restarted at the end of this step
    pub looped: bool,
}

/// Drives one emitter: owns its config, its pool and its random source.
///
/// The generator is injectable so runs can be replayed from a seed.
#[derive(Debug)]
pub struct SimulationEngine<R: Rng = StdRng> {
    config: Option<EmitterConfig>,
    pool: ParticlePool,
    rng: R,
    running: bool,
    auto_loop: bool,
    render_scale: f32,
}

impl SimulationEngine<StdRng> {
    /// Create an engine seeded from `settings.seed`, or from OS entropy
    pub fn new(settings: &EmitterSettings) -> Self {
        let rng = settings
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::with_rng(settings, rng)
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// Create an engine drawing from `rng`
    pub fn with_rng(settings: &EmitterSettings, rng: R) -> Self {
        Self {
            config: None,
            pool: ParticlePool::default(),
            rng,
            running: settings.running,
            auto_loop: settings.auto_loop,
            render_scale: settings.render_scale,
        }
    }

    /// Install a config, replacing any previous one and its particles.
    ///
    /// The running flag is left as the host set it.
    pub fn load(&mut self, config: EmitterConfig) {
        log::debug!(
            "loading emitter: {} particles at {:.2}/s, {:?}",
            config.max_particles(),
            config.emission_rate(),
            config.descriptor.emitter_type
        );
        self.pool = ParticlePool::new(config.max_particles());
        self.config = Some(config);
    }

    /// Drop the config and every particle
    pub fn unload(&mut self) -> Option<EmitterConfig> {
        self.pool = ParticlePool::default();
        self.config.take()
    }

    /// Step the emitter by `dt` seconds.
    ///
    /// `origin` is the emitter offset in host units; new particles spawn at
    /// `origin / render_scale`. Does nothing while no config is loaded.
    pub fn advance(&mut self, dt: f32, origin: Option<Vec2>) -> StepReport {
        let mut report = StepReport::default();
        let Some(config) = self.config.as_mut() else {
            return report;
        };

        if self.running && config.emission_rate() > 0.0 {
            let interval = 1.0 / config.emission_rate();
            if !self.pool.is_full() {
                config.emit_counter += dt;
            }
            while !self.pool.is_full() && config.emit_counter > interval {
                if spawn_particle(
                    config,
                    &mut self.pool,
                    &mut self.rng,
                    origin,
                    self.render_scale,
                ) {
                    report.spawned += 1;
                }
                config.emit_counter -= interval;
            }

            config.elapsed_time += dt;
            if config.duration_elapsed() {
                log::info!(
                    "emitter expired after {:.2}s with {} live particles",
                    config.elapsed_time,
                    self.pool.len()
                );
                self.running = false;
                report.expired = true;
                return report;
            }
        }

        let source = config.source_position;
        let gravity = config.descriptor.gravity;
        let emitter_type = config.descriptor.emitter_type;

        let mut index = 0;
        while index < self.pool.len() {
            let particle = &mut self.pool.live_mut()[index];
            particle.time_to_live -= dt;
            if !particle.is_alive() {
                // The last live particle moves into `index`; visit it next.
                self.pool.retire(index);
                report.retired += 1;
                continue;
            }

            match emitter_type {
                EmitterType::Radial => step_radial(particle, source, dt),
                EmitterType::Gravity => step_gravity(particle, gravity, dt),
            }
            step_appearance(particle, dt);
            index += 1;
        }

        if report.retired > 0 {
            log::trace!("retired {} particles, {} live", report.retired, self.pool.len());
        }

        if self.auto_loop && self.pool.is_empty() && (report.retired > 0 || !self.running) {
            log::info!("all particles gone, restarting emitter");
            self.reset();
            report.looped = true;
        }

        report
    }

    /// Spawn a single particle outside the emission schedule.
    ///
    /// Returns `false` when nothing is loaded or the pool is full.
    pub fn spawn_one(&mut self, origin: Option<Vec2>) -> bool {
        match self.config.as_mut() {
            Some(config) => spawn_particle(
                config,
                &mut self.pool,
                &mut self.rng,
                origin,
                self.render_scale,
            ),
            None => false,
        }
    }

    /// Restart emission from scratch.
    ///
    /// Live particles are marked dead and retire on the next step.
    pub fn reset(&mut self) {
        self.running = true;
        if let Some(config) = self.config.as_mut() {
            config.elapsed_time = 0.0;
            config.emit_counter = 0.0;
        }
        self.pool.reset();
    }

    pub fn state(&self) -> EmitterState {
        match (&self.config, self.running) {
            (None, _) => EmitterState::Idle,
            (Some(_), true) => EmitterState::Active,
            (Some(_), false) => EmitterState::Expired,
        }
    }

    pub fn config(&self) -> Option<&EmitterConfig> {
        self.config.as_ref()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Mutable access to the live particles.
    ///
    /// Replacing the pool outright desynchronises it from the loaded config;
    /// use [`load`](Self::load) to change capacity.
    #[doc(hidden)]
    pub fn pool_mut(&mut self) -> &mut ParticlePool {
        &mut self.pool
    }

    /// Number of live particles
    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn auto_loop(&self) -> bool {
        self.auto_loop
    }

    pub fn set_auto_loop(&mut self, auto_loop: bool) {
        self.auto_loop = auto_loop;
    }

    pub fn render_scale(&self) -> f32 {
        self.render_scale
    }

    pub fn set_render_scale(&mut self, render_scale: f32) {
        self.render_scale = render_scale;
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

/// Orbit around the emitter source
fn step_radial(particle: &mut Particle, source: Vec2, dt: f32) {
    particle.angle += particle.degrees_per_second * dt;
    particle.radius += particle.radius_delta * dt;
    let (sin, cos) = particle.angle.sin_cos();
    particle.position = source - Vec2::new(cos, sin) * particle.radius;
}

/// Accelerate relative to the spawn point, then move
fn step_gravity(particle: &mut Particle, gravity: Vec2, dt: f32) {
    let local = particle.position - particle.start_pos;
    let radial = local.normalize_or_zero();
    let tangential = radial.perp() * particle.tangential_acceleration;
    let radial = radial * particle.radial_acceleration;

    particle.direction += (radial + tangential + gravity) * dt;
    particle.position = local + particle.direction * dt + particle.start_pos;
}

fn step_appearance(particle: &mut Particle, dt: f32) {
    particle.color += particle.delta_color * dt;
    particle.particle_size = (particle.particle_size + particle.particle_size_delta * dt).max(0.0);
    particle.rotation += particle.rotation_delta * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_step_gravity_without_acceleration() {
        let mut p = Particle {
            direction: Vec2::new(100.0, 0.0),
            ..Default::default()
        };
        step_gravity(&mut p, Vec2::new(0.0, -98.0), 0.5);
        assert_eq!(p.direction, Vec2::new(100.0, -49.0));
        assert_eq!(p.position, Vec2::new(50.0, -24.5));
    }

    #[test]
    fn test_step_gravity_radial_and_tangential() {
        let mut p = Particle {
            position: Vec2::new(11.0, 0.0),
            start_pos: Vec2::new(10.0, 0.0),
            radial_acceleration: 2.0,
            tangential_acceleration: 3.0,
            ..Default::default()
        };
        step_gravity(&mut p, Vec2::ZERO, 1.0);
        // radial (1, 0) * 2, tangential (0, 1) * 3
        assert_eq!(p.direction, Vec2::new(2.0, 3.0));
        assert_eq!(p.position, Vec2::new(13.0, 3.0));
    }

    #[test]
    fn test_step_gravity_at_spawn_point() {
        let mut p = Particle {
            position: Vec2::new(5.0, 5.0),
            start_pos: Vec2::new(5.0, 5.0),
            radial_acceleration: 100.0,
            tangential_acceleration: 100.0,
            ..Default::default()
        };
        step_gravity(&mut p, Vec2::ZERO, 1.0);
        assert_eq!(p.direction, Vec2::ZERO);
        assert_eq!(p.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_step_radial() {
        let mut p = Particle {
            radius: 10.0,
            radius_delta: -2.0,
            degrees_per_second: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };
        step_radial(&mut p, Vec2::new(1.0, 1.0), 1.0);
        assert_eq!(p.radius, 8.0);
        assert!((p.position - Vec2::new(1.0, -7.0)).length() < 1e-5);
    }

    #[test]
    fn test_step_appearance() {
        let mut p = Particle {
            color: Vec4::ONE,
            delta_color: Vec4::splat(-4.0),
            particle_size: 1.0,
            particle_size_delta: -10.0,
            rotation: 10.0,
            rotation_delta: 20.0,
            ..Default::default()
        };
        step_appearance(&mut p, 0.5);
        // Colors are not clamped while stepping
        assert_eq!(p.color, Vec4::splat(-1.0));
        assert_eq!(p.particle_size, 0.0);
        assert_eq!(p.rotation, 20.0);
    }

    #[test]
    fn test_idle_engine_does_nothing() {
        let mut engine = SimulationEngine::new(&EmitterSettings::default().with_seed(1));
        assert_eq!(engine.state(), EmitterState::Idle);
        assert_eq!(engine.advance(1.0, None), StepReport::default());
        assert!(!engine.spawn_one(None));
    }
}
