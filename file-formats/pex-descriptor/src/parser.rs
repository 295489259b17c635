//! Decoder for binary emitter descriptors
//!
//! The format is a flat sequence of little-endian fields with no chunk
//! headers or offsets. Every section has to be read in order, so a short
//! read anywhere fails the whole file with the offset of the missing field.

use std::fs;
use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use glam::Vec2;
use log::{debug, trace, warn};

use crate::blend::BlendFactor;
use crate::error::{DescriptorError, Result};
use crate::reader::{ByteReader, Cursor};
use crate::types::{Color, EmitterDescriptor, EmitterType};
use crate::validation::validate_descriptor;
use crate::version::DescriptorVersion;

/// Value of the embedded-texture flag when a texture blob follows
const EMBEDDED_TEXTURE_PRESENT: i32 = 1;

/// Parser for emitter descriptor files
///
/// # Examples
///
/// ```
/// use pex_descriptor::DescriptorParser;
///
/// let err = DescriptorParser::new().parse(&[2, 0, 0, 0]).unwrap_err();
/// assert!(err.to_string().contains("Unsupported descriptor version"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptorParser;

impl DescriptorParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a descriptor held in memory
    pub fn parse(&self, data: &[u8]) -> Result<EmitterDescriptor> {
        let mut cursor = Cursor::new(data);

        let tag = cursor
            .read_u32_le()
            .map_err(|e| e.with_context("version"))?;
        let version =
            DescriptorVersion::from_tag(tag).ok_or(DescriptorError::UnsupportedVersion(tag))?;
        debug!("Descriptor version: {}", version);

        let descriptor = match version {
            DescriptorVersion::V1 => parse_v1(&mut cursor)?,
        };

        if cursor.remaining() > 0 {
            warn!(
                "Ignoring {} trailing bytes after descriptor",
                cursor.remaining()
            );
        }

        validate_descriptor(&descriptor)?;

        debug!(
            "Loaded {:?} emitter: {} particles, life span {}s, duration {}s",
            descriptor.emitter_type,
            descriptor.max_particles,
            descriptor.life_span,
            descriptor.duration
        );

        Ok(descriptor)
    }

    /// Read a whole stream and parse it
    pub fn parse_reader<R: Read>(&self, reader: &mut R) -> Result<EmitterDescriptor> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.parse(&data)
    }

    /// Read and parse a descriptor file from disk
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<EmitterDescriptor> {
        let data = fs::read(path.as_ref())?;
        debug!(
            "Read {} bytes from {}",
            data.len(),
            path.as_ref().display()
        );
        self.parse(&data)
    }
}

fn parse_v1(r: &mut Cursor<'_>) -> Result<EmitterDescriptor> {
    let mut d = EmitterDescriptor::default();

    read_texture(r, &mut d).map_err(|e| e.with_context("texture"))?;
    read_blending(r, &mut d).map_err(|e| e.with_context("blending"))?;
    read_motion(r, &mut d).map_err(|e| e.with_context("motion"))?;
    read_colors(r, &mut d).map_err(|e| e.with_context("colors"))?;
    read_lifecycle(r, &mut d).map_err(|e| e.with_context("lifecycle"))?;
    read_radial(r, &mut d).map_err(|e| e.with_context("radial"))?;

    Ok(d)
}

fn read_texture(r: &mut Cursor<'_>, d: &mut EmitterDescriptor) -> Result<()> {
    let name = r.read_length_prefixed()?;
    d.texture_name = String::from_utf8(name)?;

    if r.read_i32_le()? == EMBEDDED_TEXTURE_PRESENT {
        let data = r.read_length_prefixed()?;
        trace!("Embedded texture: {} bytes", data.len());
        d.texture_data = Some(Bytes::from(data));
    }
    Ok(())
}

fn read_blending(r: &mut Cursor<'_>, d: &mut EmitterDescriptor) -> Result<()> {
    d.opacity_modify_rgb = r.read_i32_le()? != 0;
    d.blend_func_source = BlendFactor::from_gl(r.read_i32_le()?);
    d.blend_func_destination = BlendFactor::from_gl(r.read_i32_le()?);
    d.position_type = r.read_i32_le()?;
    d.y_scale = r.read_i32_le()?;
    Ok(())
}

fn read_motion(r: &mut Cursor<'_>, d: &mut EmitterDescriptor) -> Result<()> {
    // The stored source position is authoring data; emitters always start
    // at their own origin
    let _authored_source = r.read_vec2()?;
    d.source_position = Vec2::ZERO;
    d.source_position_variance = r.read_vec2()?;

    d.speed = r.read_narrowed_f32()?;
    d.speed_variance = r.read_narrowed_f32()?;
    d.life_span = r.read_narrowed_f32()?;
    d.life_span_variance = r.read_narrowed_f32()?;
    d.angle = r.read_narrowed_f32()?.to_radians();
    d.angle_variance = r.read_narrowed_f32()?.to_radians();
    d.gravity = r.read_vec2()?;

    d.radial_acceleration = r.read_narrowed_f32()?;
    d.tangential_acceleration = r.read_narrowed_f32()?;
    d.radial_acceleration_variance = r.read_narrowed_f32()?;
    d.tangential_acceleration_variance = r.read_narrowed_f32()?;
    Ok(())
}

fn read_color(r: &mut Cursor<'_>) -> Result<Color> {
    Ok(Color::new(
        r.read_narrowed_f32()?,
        r.read_narrowed_f32()?,
        r.read_narrowed_f32()?,
        r.read_narrowed_f32()?,
    ))
}

fn read_colors(r: &mut Cursor<'_>, d: &mut EmitterDescriptor) -> Result<()> {
    d.start_color = read_color(r)?;
    d.start_color_variance = read_color(r)?;
    d.finish_color = read_color(r)?;
    d.finish_color_variance = read_color(r)?;
    Ok(())
}

fn read_lifecycle(r: &mut Cursor<'_>, d: &mut EmitterDescriptor) -> Result<()> {
    let max_particles = r.read_i32_le()?;
    d.max_particles = u32::try_from(max_particles).map_err(|_| {
        DescriptorError::InvalidDescriptor(format!(
            "negative particle capacity: {max_particles}"
        ))
    })?;

    d.start_particle_size = r.read_narrowed_f32()?;
    d.start_particle_size_variance = r.read_narrowed_f32()?;
    d.finish_particle_size = r.read_narrowed_f32()?;
    d.finish_particle_size_variance = r.read_narrowed_f32()?;

    d.duration = r.read_narrowed_f32()?;

    let emitter_type = r.read_i32_le()?;
    d.emitter_type = EmitterType::from_i32(emitter_type).unwrap_or_else(|| {
        warn!("Unknown emitter type {emitter_type}, treating as gravity");
        EmitterType::Gravity
    });
    Ok(())
}

fn read_radial(r: &mut Cursor<'_>, d: &mut EmitterDescriptor) -> Result<()> {
    d.max_radius = r.read_narrowed_f32()?;
    d.max_radius_variance = r.read_narrowed_f32()?;
    d.min_radius = r.read_narrowed_f32()?;
    d.min_radius_variance = r.read_narrowed_f32()?;

    d.rotate_per_second = r.read_narrowed_f32()?;
    d.rotate_per_second_variance = r.read_narrowed_f32()?;
    d.rotation_start = r.read_narrowed_f32()?;
    d.rotation_start_variance = r.read_narrowed_f32()?;
    d.rotation_end = r.read_narrowed_f32()?;
    d.rotation_end_variance = r.read_narrowed_f32()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_eof() {
        let err = DescriptorParser::new().parse(&[]).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            DescriptorError::UnexpectedEof {
                offset: 0,
                needed: 4
            }
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let err = DescriptorParser::new().parse(&[0, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, DescriptorError::UnsupportedVersion(0)));
    }

    #[test]
    fn test_truncated_body_names_section() {
        // Version 1, then a texture name length pointing past the end
        let data = [1, 0, 0, 0, 10, 0, 0, 0, b'a'];
        let err = DescriptorParser::new().parse(&data).unwrap_err();
        assert!(err.to_string().starts_with("texture:"));
        assert!(matches!(
            err.root_cause(),
            DescriptorError::UnexpectedEof { offset: 8, .. }
        ));
    }

    #[test]
    fn test_invalid_utf8_name() {
        let data = [1, 0, 0, 0, 2, 0, 0, 0, 0xc3, 0x28];
        let err = DescriptorParser::new().parse(&data).unwrap_err();
        assert!(matches!(err.root_cause(), DescriptorError::InvalidUtf8(_)));
    }
}
