//! Fixed-capacity 2D particle simulation driven by binary emitter
//! descriptors.
//!
//! [`SimulationEngine`] steps one emitter: it spawns particles at the rate
//! its descriptor implies, moves them under gravity or around an orbit, and
//! retires them when their lifetime runs out. [`VertexBufferBuilder`] turns
//! the live set into a quad mesh, and [`ParticleSystem`] ties both to a host
//! renderer.
//!
//! # Examples
//!
//! ```
//! use pex_descriptor::presets;
//! use pex_particles::{EmitterConfig, EmitterSettings, SimulationEngine, VertexBufferBuilder};
//!
//! let settings = EmitterSettings::default().with_seed(7);
//! let mut engine = SimulationEngine::new(&settings);
//! engine.load(EmitterConfig::new(presets::fire())?);
//!
//! let mut mesh = VertexBufferBuilder::new(200);
//! for _ in 0..30 {
//!     engine.advance(1.0 / 60.0, None);
//! }
//! let buffers = mesh.build(engine.pool(), settings.render_scale);
//! assert!(engine.particle_count() > 0);
//! assert_eq!(buffers.vertices.len(), 800);
//! # Ok::<(), pex_particles::ParticleError>(())
//! ```

#![forbid(unsafe_code)]

pub mod emitter;
pub mod engine;
pub mod error;
pub mod particle;
pub mod pool;
pub mod render;
pub mod settings;
pub mod spawn;
pub mod system;
pub mod vertex;

pub use emitter::{EmitterConfig, EmitterState};
pub use engine::{SimulationEngine, StepReport};
pub use error::{ParticleError, Result};
pub use particle::Particle;
pub use pool::ParticlePool;
pub use render::{BlendFunc, BlendOverride, RenderState, RenderStateTracker, TextureSource};
pub use settings::{DEFAULT_RENDER_SCALE, EmitterSettings};
pub use system::{FrameSink, ParticleSystem};
pub use vertex::{VertexBufferBuilder, VertexBuffers};
