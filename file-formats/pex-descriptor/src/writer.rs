//! Encoder producing version 1 descriptor files

use std::io::Write;

use glam::Vec2;

use crate::error::{DescriptorError, Result};
use crate::types::{Color, EmitterDescriptor};
use crate::version::DescriptorVersion;

/// Helper trait for writing little-endian descriptor primitives
trait WriteDescriptorExt: Write {
    fn write_u32_le(&mut self, value: u32) -> Result<()> {
        self.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn write_i32_le(&mut self, value: i32) -> Result<()> {
        self.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    /// Floats are always widened to doubles on disk
    fn write_widened_f32(&mut self, value: f32) -> Result<()> {
        self.write_all(&f64::from(value).to_le_bytes())?;
        Ok(())
    }

    fn write_vec2(&mut self, value: Vec2) -> Result<()> {
        self.write_widened_f32(value.x)?;
        self.write_widened_f32(value.y)
    }

    fn write_color(&mut self, value: Color) -> Result<()> {
        for channel in value.to_array() {
            self.write_widened_f32(channel)?;
        }
        Ok(())
    }

    fn write_length_prefixed(&mut self, data: &[u8]) -> Result<()> {
        let len = u32::try_from(data.len()).map_err(|_| {
            DescriptorError::InvalidDescriptor(format!(
                "blob of {} bytes does not fit a u32 length",
                data.len()
            ))
        })?;
        self.write_u32_le(len)?;
        self.write_all(data)?;
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteDescriptorExt for W {}

/// Writer for emitter descriptor files
///
/// Narrowed values widen back to the exact doubles they were read from, so
/// parsing the output reproduces the descriptor. Angles go back to degrees,
/// which may differ from the source file in the last bit.
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptorWriter {
    version: DescriptorVersion,
}

impl DescriptorWriter {
    /// Create a writer for the latest format version
    pub fn new() -> Self {
        Self::default()
    }

    /// Version this writer produces
    pub fn version(&self) -> DescriptorVersion {
        self.version
    }

    /// Encode a descriptor into a new buffer
    pub fn to_bytes(&self, descriptor: &EmitterDescriptor) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out, descriptor)?;
        Ok(out)
    }

    /// Encode a descriptor into a writer
    pub fn write<W: Write>(&self, w: &mut W, d: &EmitterDescriptor) -> Result<()> {
        w.write_u32_le(self.version.tag())?;

        w.write_length_prefixed(d.texture_name.as_bytes())?;
        match &d.texture_data {
            Some(data) => {
                w.write_i32_le(1)?;
                w.write_length_prefixed(data)?;
            }
            None => w.write_i32_le(0)?,
        }

        w.write_i32_le(i32::from(d.opacity_modify_rgb))?;
        w.write_i32_le(d.blend_func_source.to_gl())?;
        w.write_i32_le(d.blend_func_destination.to_gl())?;
        w.write_i32_le(d.position_type)?;
        w.write_i32_le(d.y_scale)?;

        w.write_vec2(d.source_position)?;
        w.write_vec2(d.source_position_variance)?;
        w.write_widened_f32(d.speed)?;
        w.write_widened_f32(d.speed_variance)?;
        w.write_widened_f32(d.life_span)?;
        w.write_widened_f32(d.life_span_variance)?;
        w.write_widened_f32(d.angle.to_degrees())?;
        w.write_widened_f32(d.angle_variance.to_degrees())?;
        w.write_vec2(d.gravity)?;

        w.write_widened_f32(d.radial_acceleration)?;
        w.write_widened_f32(d.tangential_acceleration)?;
        w.write_widened_f32(d.radial_acceleration_variance)?;
        w.write_widened_f32(d.tangential_acceleration_variance)?;

        w.write_color(d.start_color)?;
        w.write_color(d.start_color_variance)?;
        w.write_color(d.finish_color)?;
        w.write_color(d.finish_color_variance)?;

        let max_particles = i32::try_from(d.max_particles).map_err(|_| {
            DescriptorError::InvalidDescriptor(format!(
                "particle capacity {} does not fit the file format",
                d.max_particles
            ))
        })?;
        w.write_i32_le(max_particles)?;

        w.write_widened_f32(d.start_particle_size)?;
        w.write_widened_f32(d.start_particle_size_variance)?;
        w.write_widened_f32(d.finish_particle_size)?;
        w.write_widened_f32(d.finish_particle_size_variance)?;
        w.write_widened_f32(d.duration)?;
        w.write_i32_le(d.emitter_type as i32)?;

        w.write_widened_f32(d.max_radius)?;
        w.write_widened_f32(d.max_radius_variance)?;
        w.write_widened_f32(d.min_radius)?;
        w.write_widened_f32(d.min_radius_variance)?;

        w.write_widened_f32(d.rotate_per_second)?;
        w.write_widened_f32(d.rotate_per_second_variance)?;
        w.write_widened_f32(d.rotation_start)?;
        w.write_widened_f32(d.rotation_start_variance)?;
        w.write_widened_f32(d.rotation_end)?;
        w.write_widened_f32(d.rotation_end_variance)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_layout_size() {
        let descriptor = EmitterDescriptor {
            texture_name: "spark.png".to_string(),
            ..Default::default()
        };
        let bytes = DescriptorWriter::new().to_bytes(&descriptor).unwrap();

        // version + name + flag + 5 ints + 2 vec2 + 6 floats + vec2
        // + 4 floats + 4 colors + int + 5 floats + int + 10 floats
        let expected = 4
            + (4 + 9)
            + 4
            + 5 * 4
            + 4 * 8
            + 6 * 8
            + 2 * 8
            + 4 * 8
            + 16 * 8
            + 4
            + 5 * 8
            + 4
            + 10 * 8;
        assert_eq!(bytes.len(), expected);
        assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
    }

    #[test]
    fn test_embedded_texture_flag() {
        let descriptor = EmitterDescriptor {
            texture_data: Some(bytes::Bytes::from_static(b"PNG")),
            ..Default::default()
        };
        let bytes = DescriptorWriter::new().to_bytes(&descriptor).unwrap();
        // empty name, then flag = 1, then length 3 and payload
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[1, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &[3, 0, 0, 0]);
        assert_eq!(&bytes[16..19], b"PNG");
    }
}
