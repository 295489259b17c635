//! Emitter configuration and runtime accumulators

use glam::Vec2;
use pex_descriptor::{DescriptorParser, EmitterDescriptor, validate_descriptor};

use crate::error::{ParticleError, Result};

/// Lifecycle of one emitter as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    /// No descriptor loaded
    Idle,
    /// Emitting and stepping particles
    Active,
    /// No longer emitting, either because its duration elapsed or the host
    /// stopped it. Live particles still age out.
    Expired,
}

/// Descriptor parameters plus the mutable state one emitter accumulates
/// while it runs.
///
/// A config is built once per load and swapped as a whole on reload. Only
/// the engine that owns it mutates the runtime fields.
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// Static parameters from the descriptor file
    pub descriptor: EmitterDescriptor,
    /// Particles per second, fixed at load
    emission_rate: f32,
    /// Seconds of emission credit not yet spent on spawns
    pub(crate) emit_counter: f32,
    /// Seconds spent running since load or the last reset
    pub(crate) elapsed_time: f32,
    /// Source position used by the latest spawn, in descriptor units
    pub(crate) source_position: Vec2,
}

impl EmitterConfig {
    /// Build a config from a descriptor.
    ///
    /// The descriptor is validated first, so hand-built descriptors get the
    /// same capacity and finiteness checks as decoded ones.
    pub fn new(descriptor: EmitterDescriptor) -> Result<Self> {
        validate_descriptor(&descriptor)?;
        Ok(Self::from_validated(descriptor))
    }

    /// Decode descriptor bytes into a fresh config
    pub fn parse(data: &[u8]) -> Result<Self> {
        let descriptor = DescriptorParser::new().parse(data)?;
        Ok(Self::from_validated(descriptor))
    }

    fn from_validated(descriptor: EmitterDescriptor) -> Self {
        let emission_rate = descriptor.emission_rate();
        let source_position = descriptor.source_position;
        Self {
            descriptor,
            emission_rate,
            emit_counter: 0.0,
            elapsed_time: 0.0,
            source_position,
        }
    }

    /// Particles per second while running and under capacity
    pub fn emission_rate(&self) -> f32 {
        self.emission_rate
    }

    /// Seconds of unspent emission credit
    pub fn emit_counter(&self) -> f32 {
        self.emit_counter
    }

    /// Seconds spent running
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Source position of the most recent spawn
    pub fn source_position(&self) -> Vec2 {
        self.source_position
    }

    /// Pool capacity the descriptor asks for
    pub fn max_particles(&self) -> usize {
        self.descriptor.max_particles as usize
    }

    /// True once a bounded emitter has run longer than its duration
    pub fn duration_elapsed(&self) -> bool {
        !self.descriptor.is_unbounded() && self.descriptor.duration < self.elapsed_time
    }
}

impl TryFrom<EmitterDescriptor> for EmitterConfig {
    type Error = ParticleError;

    fn try_from(descriptor: EmitterDescriptor) -> Result<Self> {
        Self::new(descriptor)
    }
}
