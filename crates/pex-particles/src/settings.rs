//! Host-side emitter settings

use crate::render::BlendOverride;

/// Scale from descriptor units to host units
pub const DEFAULT_RENDER_SCALE: f32 = 0.04;

/// Knobs the host sets on an emitter independently of its descriptor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmitterSettings {
    /// Emit as soon as a descriptor loads
    pub running: bool,
    /// Restart once every particle has died
    pub auto_loop: bool,
    /// Multiplier applied to every vertex coordinate
    pub render_scale: f32,
    pub blend_source: BlendOverride,
    pub blend_destination: BlendOverride,
    /// Seed for the particle generator; entropy when unset
    pub seed: Option<u64>,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            running: true,
            auto_loop: true,
            render_scale: DEFAULT_RENDER_SCALE,
            blend_source: BlendOverride::Inherit,
            blend_destination: BlendOverride::Inherit,
            seed: None,
        }
    }
}

impl EmitterSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    #[must_use]
    pub fn with_auto_loop(mut self, auto_loop: bool) -> Self {
        self.auto_loop = auto_loop;
        self
    }

    #[must_use]
    pub fn with_render_scale(mut self, render_scale: f32) -> Self {
        self.render_scale = render_scale;
        self
    }

    #[must_use]
    pub fn with_blend(mut self, source: BlendOverride, destination: BlendOverride) -> Self {
        self.blend_source = source;
        self.blend_destination = destination;
        self
    }

    /// Make the run reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pex_descriptor::BlendFactor;

    #[test]
    fn test_defaults() {
        let settings = EmitterSettings::default();
        assert!(settings.running);
        assert!(settings.auto_loop);
        assert_eq!(settings.render_scale, 0.04);
        assert_eq!(settings.blend_source, BlendOverride::Inherit);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_builders() {
        let settings = EmitterSettings::new()
            .with_running(false)
            .with_auto_loop(false)
            .with_render_scale(1.0)
            .with_blend(
                BlendOverride::Factor(BlendFactor::One),
                BlendOverride::Inherit,
            )
            .with_seed(42);
        assert!(!settings.running);
        assert!(!settings.auto_loop);
        assert_eq!(settings.render_scale, 1.0);
        assert_eq!(settings.blend_source, BlendOverride::Factor(BlendFactor::One));
        assert_eq!(settings.seed, Some(42));
    }
}
