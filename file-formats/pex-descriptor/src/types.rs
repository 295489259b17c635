//! Decoded emitter descriptor types

use bytes::Bytes;
use custom_debug::Debug;
use glam::{Vec2, Vec4};
use pex_utils::debug;

use crate::blend::BlendFactor;

/// Sentinel duration meaning "emit forever"
pub const UNBOUNDED_DURATION: f32 = -1.0;

/// RGBA color with channels nominally in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from its channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as `[r, g, b, a]`
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

/// How particles move once spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmitterType {
    /// Speed, gravity and radial/tangential acceleration
    #[default]
    Gravity = 0,
    /// Orbit around the source at a shrinking or growing radius
    Radial = 1,
}

impl EmitterType {
    /// Parse from the stored integer value
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Gravity),
            1 => Some(Self::Radial),
            _ => None,
        }
    }
}

/// Static emitter parameters decoded from a descriptor file.
///
/// Angles (`angle`, `angle_variance`) are in radians. `rotate_per_second`
/// and the `rotation_*` fields stay in degrees, as authored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmitterDescriptor {
    /// Name of the texture the emitter was authored with
    pub texture_name: String,
    /// Embedded image file, handed to the host's image decoder untouched
    #[debug(with = debug::trimmed_bytes_fmt)]
    pub texture_data: Option<Bytes>,

    /// Whether the renderer should premultiply color by alpha
    pub opacity_modify_rgb: bool,
    /// Source blend factor
    pub blend_func_source: BlendFactor,
    /// Destination blend factor
    pub blend_func_destination: BlendFactor,

    /// Opaque position type value, passed through for the host
    pub position_type: i32,
    /// Opaque y-axis scale value, passed through for the host
    pub y_scale: i32,

    /// Emitter source position; always the origin after loading
    pub source_position: Vec2,
    pub source_position_variance: Vec2,
    pub speed: f32,
    pub speed_variance: f32,
    /// Particle lifetime in seconds
    pub life_span: f32,
    pub life_span_variance: f32,
    /// Emission direction in radians
    pub angle: f32,
    pub angle_variance: f32,
    pub gravity: Vec2,

    pub radial_acceleration: f32,
    pub tangential_acceleration: f32,
    pub radial_acceleration_variance: f32,
    pub tangential_acceleration_variance: f32,

    pub start_color: Color,
    pub start_color_variance: Color,
    pub finish_color: Color,
    pub finish_color_variance: Color,

    /// Capacity of the particle pool
    pub max_particles: u32,

    pub start_particle_size: f32,
    pub start_particle_size_variance: f32,
    pub finish_particle_size: f32,
    pub finish_particle_size_variance: f32,

    /// Emission duration in seconds, or [`UNBOUNDED_DURATION`]
    pub duration: f32,
    pub emitter_type: EmitterType,

    pub max_radius: f32,
    pub max_radius_variance: f32,
    pub min_radius: f32,
    pub min_radius_variance: f32,

    /// Orbit speed in degrees per second (radial emitters)
    pub rotate_per_second: f32,
    pub rotate_per_second_variance: f32,
    /// Sprite rotation at birth, in degrees
    pub rotation_start: f32,
    pub rotation_start_variance: f32,
    /// Sprite rotation at death, in degrees
    pub rotation_end: f32,
    pub rotation_end_variance: f32,
}

impl Default for EmitterDescriptor {
    fn default() -> Self {
        Self {
            texture_name: String::new(),
            texture_data: None,
            opacity_modify_rgb: false,
            blend_func_source: BlendFactor::Zero,
            blend_func_destination: BlendFactor::Zero,
            position_type: 0,
            y_scale: 0,
            source_position: Vec2::ZERO,
            source_position_variance: Vec2::ZERO,
            speed: 0.0,
            speed_variance: 0.0,
            life_span: 0.0,
            life_span_variance: 0.0,
            angle: 0.0,
            angle_variance: 0.0,
            gravity: Vec2::ZERO,
            radial_acceleration: 0.0,
            tangential_acceleration: 0.0,
            radial_acceleration_variance: 0.0,
            tangential_acceleration_variance: 0.0,
            start_color: Color::TRANSPARENT,
            start_color_variance: Color::TRANSPARENT,
            finish_color: Color::TRANSPARENT,
            finish_color_variance: Color::TRANSPARENT,
            max_particles: 0,
            start_particle_size: 0.0,
            start_particle_size_variance: 0.0,
            finish_particle_size: 0.0,
            finish_particle_size_variance: 0.0,
            duration: UNBOUNDED_DURATION,
            emitter_type: EmitterType::Gravity,
            max_radius: 0.0,
            max_radius_variance: 0.0,
            min_radius: 0.0,
            min_radius_variance: 0.0,
            rotate_per_second: 0.0,
            rotate_per_second_variance: 0.0,
            rotation_start: 0.0,
            rotation_start_variance: 0.0,
            rotation_end: 0.0,
            rotation_end_variance: 0.0,
        }
    }
}

impl EmitterDescriptor {
    /// Particles per second needed to keep the pool full: capacity over
    /// lifetime.
    pub fn emission_rate(&self) -> f32 {
        self.max_particles as f32 / self.life_span
    }

    /// True when the emitter never stops on its own
    pub fn is_unbounded(&self) -> bool {
        self.duration == UNBOUNDED_DURATION
    }

    /// True when an image file is embedded in the descriptor
    pub fn has_embedded_texture(&self) -> bool {
        self.texture_data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_rate() {
        let descriptor = EmitterDescriptor {
            max_particles: 100,
            life_span: 2.0,
            ..Default::default()
        };
        assert_eq!(descriptor.emission_rate(), 50.0);
    }

    #[test]
    fn test_default_is_unbounded_and_empty() {
        let descriptor = EmitterDescriptor::default();
        assert!(descriptor.is_unbounded());
        assert!(!descriptor.has_embedded_texture());
        assert_eq!(descriptor.max_particles, 0);
    }

    #[test]
    fn test_debug_trims_texture() {
        let descriptor = EmitterDescriptor {
            texture_data: Some(Bytes::from(vec![0u8; 64])),
            ..Default::default()
        };
        let out = format!("{:?}", descriptor);
        assert!(out.contains("+ 56 bytes"));
    }

    #[test]
    fn test_emitter_type_values() {
        assert_eq!(EmitterType::from_i32(0), Some(EmitterType::Gravity));
        assert_eq!(EmitterType::from_i32(1), Some(EmitterType::Radial));
        assert_eq!(EmitterType::from_i32(2), None);
    }

    #[test]
    fn test_color_vec4_conversion() {
        let c = Color::new(0.1, 0.2, 0.3, 0.4);
        let v: Vec4 = c.into();
        assert_eq!(Color::from(v), c);
    }
}
