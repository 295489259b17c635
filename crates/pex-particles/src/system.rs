//! Host-facing particle system

use bytes::Bytes;
use glam::Vec2;
use pex_descriptor::EmitterDescriptor;
use rand::Rng;
use rand::rngs::StdRng;

use crate::emitter::{EmitterConfig, EmitterState};
use crate::engine::{SimulationEngine, StepReport};
use crate::error::{ParticleError, Result};
use crate::render::{BlendOverride, RenderState, RenderStateTracker, TextureSource};
use crate::settings::EmitterSettings;
use crate::vertex::{VertexBufferBuilder, VertexBuffers};

/// Receives the output of each frame.
///
/// Calls arrive in order: render state and texture only when they changed,
/// then the mesh every frame.
pub trait FrameSink {
    /// Update the material's blend factors and premultiplication flag
    fn apply_render_state(&mut self, state: &RenderState);

    /// Bind a new particle texture
    fn upload_texture(&mut self, texture: TextureSource<'_>);

    /// Draw the mesh. Only the first `live_quads` quads are visible; the
    /// rest are collapsed and transparent.
    fn submit(&mut self, buffers: &VertexBuffers, live_quads: usize);
}

/// One emitter with its mesh and render state, driven once per host frame
#[derive(Debug)]
pub struct ParticleSystem<R: Rng = StdRng> {
    engine: SimulationEngine<R>,
    mesh: VertexBufferBuilder,
    render_state: RenderStateTracker,
    settings: EmitterSettings,
    texture_override: Option<Bytes>,
    texture_dirty: bool,
}

impl ParticleSystem<StdRng> {
    pub fn new(settings: EmitterSettings) -> Self {
        let engine = SimulationEngine::new(&settings);
        Self::from_engine(engine, settings)
    }
}

impl<R: Rng> ParticleSystem<R> {
    /// Create a system drawing particles from `rng`
    pub fn with_rng(settings: EmitterSettings, rng: R) -> Self {
        let engine = SimulationEngine::with_rng(&settings, rng);
        Self::from_engine(engine, settings)
    }

    fn from_engine(engine: SimulationEngine<R>, settings: EmitterSettings) -> Self {
        Self {
            engine,
            mesh: VertexBufferBuilder::default(),
            render_state: RenderStateTracker::new(),
            settings,
            texture_override: None,
            texture_dirty: false,
        }
    }

    /// Decode a descriptor and start simulating it.
    ///
    /// On error the current emitter, if any, is left untouched.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let config = EmitterConfig::parse(data)?;
        self.install(config);
        Ok(())
    }

    /// Start simulating an already decoded descriptor.
    ///
    /// The descriptor is validated as if it had been decoded; on error the
    /// current emitter, if any, is left untouched.
    pub fn load_descriptor(&mut self, descriptor: EmitterDescriptor) -> Result<()> {
        let config = EmitterConfig::new(descriptor)?;
        self.install(config);
        Ok(())
    }

    /// Swap in a new descriptor, dropping every live particle
    pub fn reload(&mut self, data: &[u8]) -> Result<()> {
        log::debug!("reloading emitter from {} bytes", data.len());
        self.load(data)
    }

    fn install(&mut self, config: EmitterConfig) {
        self.mesh.resize(config.max_particles());
        self.engine.load(config);
        self.engine.set_running(self.settings.running);
        self.render_state.invalidate();
        self.texture_dirty = true;
    }

    /// Unload the emitter and release the mesh
    pub fn clear(&mut self) {
        self.engine.unload();
        self.mesh.resize(0);
        self.render_state.invalidate();
        self.texture_dirty = false;
    }

    /// Run one frame and push its output to `sink`.
    ///
    /// Returns `None` without calling the sink while nothing is loaded.
    pub fn update(
        &mut self,
        dt: f32,
        origin: Option<Vec2>,
        sink: &mut dyn FrameSink,
    ) -> Option<StepReport> {
        let descriptor = &self.engine.config()?.descriptor;

        let state = RenderState::resolve(
            descriptor,
            self.settings.blend_source,
            self.settings.blend_destination,
        );
        if let Some(state) = self.render_state.update(state) {
            sink.apply_render_state(&state);
        }

        if self.texture_dirty {
            if let Some(texture) = self.texture_source() {
                sink.upload_texture(texture);
            }
            self.texture_dirty = false;
        }

        let report = self.engine.advance(dt, origin);

        // The engine may have been reloaded directly through `engine_mut`
        let capacity = self.engine.pool().capacity();
        if self.mesh.buffers().quad_capacity() != capacity {
            self.mesh.resize(capacity);
        }
        self.mesh
            .build(self.engine.pool(), self.engine.render_scale());
        sink.submit(self.mesh.buffers(), self.mesh.drawn());
        Some(report)
    }

    /// Re-arm the emitter as if it had just been loaded
    pub fn restart(&mut self) -> Result<()> {
        if self.engine.config().is_none() {
            return Err(ParticleError::NotLoaded);
        }
        self.engine.reset();
        Ok(())
    }

    /// Texture the host should bind, if a descriptor is loaded
    pub fn texture_source(&self) -> Option<TextureSource<'_>> {
        let config = self.engine.config()?;
        Some(TextureSource::select(
            &config.descriptor,
            self.texture_override.as_deref(),
        ))
    }

    /// Replace the descriptor's texture with host image bytes, or go back to
    /// it with `None`
    pub fn set_texture_override(&mut self, texture: Option<Bytes>) {
        self.texture_override = texture;
        self.texture_dirty = self.engine.config().is_some();
    }

    pub fn set_blend(&mut self, source: BlendOverride, destination: BlendOverride) {
        self.settings.blend_source = source;
        self.settings.blend_destination = destination;
    }

    pub fn set_running(&mut self, running: bool) {
        self.settings.running = running;
        self.engine.set_running(running);
    }

    pub fn set_auto_loop(&mut self, auto_loop: bool) {
        self.settings.auto_loop = auto_loop;
        self.engine.set_auto_loop(auto_loop);
    }

    pub fn set_render_scale(&mut self, render_scale: f32) {
        self.settings.render_scale = render_scale;
        self.engine.set_render_scale(render_scale);
    }

    pub fn state(&self) -> EmitterState {
        self.engine.state()
    }

    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    pub fn engine(&self) -> &SimulationEngine<R> {
        &self.engine
    }

    /// Direct access to the engine. A config loaded through it gets a
    /// matching mesh on the next update.
    pub fn engine_mut(&mut self) -> &mut SimulationEngine<R> {
        &mut self.engine
    }

    /// Mesh from the last update
    pub fn buffers(&self) -> &VertexBuffers {
        self.mesh.buffers()
    }
}
