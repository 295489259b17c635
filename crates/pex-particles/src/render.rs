//! Blend state and texture selection handed to the host renderer

use pex_descriptor::{BlendFactor, EmitterDescriptor};

/// Host-side replacement for one of the descriptor's blend factors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendOverride {
    /// Use the factor the descriptor specifies
    #[default]
    Inherit,
    /// Use this factor regardless of the descriptor
    Factor(BlendFactor),
}

impl BlendOverride {
    /// Decode an inspector index: 0 inherits, `n` selects factor `n - 1`.
    ///
    /// Indices past the last factor inherit.
    pub fn from_index(index: u8) -> Self {
        index
            .checked_sub(1)
            .and_then(BlendFactor::from_index)
            .map_or(Self::Inherit, Self::Factor)
    }

    /// Inverse of [`from_index`](Self::from_index)
    pub fn to_index(self) -> u8 {
        match self {
            Self::Inherit => 0,
            Self::Factor(factor) => factor.index() + 1,
        }
    }

    /// The factor to render with, given the descriptor's own factor
    pub fn resolve(self, inherited: BlendFactor) -> BlendFactor {
        match self {
            Self::Inherit => inherited,
            Self::Factor(factor) => factor,
        }
    }
}

/// Source and destination blend factors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlendFunc {
    pub source: BlendFactor,
    pub destination: BlendFactor,
}

/// Material state the host applies before drawing the particle mesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    pub blend: BlendFunc,
    /// Colors are premultiplied by alpha before blending
    pub opacity_modify_rgb: bool,
}

impl RenderState {
    /// Combine descriptor blend settings with host overrides
    pub fn resolve(
        descriptor: &EmitterDescriptor,
        source: BlendOverride,
        destination: BlendOverride,
    ) -> Self {
        Self {
            blend: BlendFunc {
                source: source.resolve(descriptor.blend_func_source),
                destination: destination.resolve(descriptor.blend_func_destination),
            },
            opacity_modify_rgb: descriptor.opacity_modify_rgb,
        }
    }
}

/// Remembers the last render state handed out so the host only touches its
/// material when something changed.
#[derive(Debug, Clone, Default)]
pub struct RenderStateTracker {
    current: Option<RenderState>,
}

impl RenderStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `state` if it differs from the last one seen
    pub fn update(&mut self, state: RenderState) -> Option<RenderState> {
        if self.current == Some(state) {
            return None;
        }
        log::debug!(
            "render state changed: {} / {}",
            state.blend.source,
            state.blend.destination
        );
        self.current = Some(state);
        Some(state)
    }

    /// The last state handed out
    pub fn current(&self) -> Option<RenderState> {
        self.current
    }

    /// Forget the last state; the next update always reports
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}

/// Where the particle texture should come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSource<'a> {
    /// Image bytes supplied by the host
    Override(&'a [u8]),
    /// Image bytes embedded in the descriptor
    Embedded { name: &'a str, data: &'a [u8] },
    /// Only a file name; the host resolves it
    Named(&'a str),
}

impl<'a> TextureSource<'a> {
    /// Host override first, then embedded data, then the bare name
    pub fn select(descriptor: &'a EmitterDescriptor, host_override: Option<&'a [u8]>) -> Self {
        if let Some(data) = host_override {
            return Self::Override(data);
        }
        match &descriptor.texture_data {
            Some(data) => Self::Embedded {
                name: &descriptor.texture_name,
                data,
            },
            None => Self::Named(&descriptor.texture_name),
        }
    }
}
