//! Checks that a decoded descriptor can drive a simulation

use glam::Vec2;

use crate::error::{DescriptorError, Result};
use crate::types::{Color, EmitterDescriptor};

/// Largest particle capacity a descriptor may ask for.
///
/// Pools and meshes are allocated up front at the descriptor's capacity, so
/// this bounds what a single file can make the host allocate. It also keeps
/// every mesh index (`4 * capacity`) within `u32`.
pub const MAX_PARTICLES: u32 = 100_000;

/// Validate a decoded descriptor.
///
/// Rejects capacities past [`MAX_PARTICLES`] and any value that would turn
/// into infinite or NaN state downstream. Per-particle zero lifetimes are a
/// runtime condition and are not checked here.
pub fn validate_descriptor(descriptor: &EmitterDescriptor) -> Result<()> {
    validate_capacity(descriptor)?;
    validate_life_span(descriptor)?;
    validate_finite(descriptor)?;
    Ok(())
}

fn validate_capacity(descriptor: &EmitterDescriptor) -> Result<()> {
    if descriptor.max_particles > MAX_PARTICLES {
        return Err(DescriptorError::InvalidDescriptor(format!(
            "particle capacity {} exceeds the limit of {MAX_PARTICLES}",
            descriptor.max_particles
        )));
    }
    Ok(())
}

fn validate_life_span(descriptor: &EmitterDescriptor) -> Result<()> {
    if descriptor.life_span == 0.0 {
        return Err(DescriptorError::InvalidDescriptor(
            "life span is zero, emission rate would be infinite".to_string(),
        ));
    }
    Ok(())
}

fn vec2_fields(name: &'static str, v: Vec2) -> [(&'static str, &'static str, f32); 2] {
    [(name, "x", v.x), (name, "y", v.y)]
}

fn color_fields(name: &'static str, c: Color) -> [(&'static str, &'static str, f32); 4] {
    [(name, "r", c.r), (name, "g", c.g), (name, "b", c.b), (name, "a", c.a)]
}

/// Every float field of the descriptor, with its name and component
fn float_fields(d: &EmitterDescriptor) -> Vec<(&'static str, &'static str, f32)> {
    let scalars = [
        ("speed", d.speed),
        ("speed variance", d.speed_variance),
        ("life span", d.life_span),
        ("life span variance", d.life_span_variance),
        ("angle", d.angle),
        ("angle variance", d.angle_variance),
        ("radial acceleration", d.radial_acceleration),
        ("tangential acceleration", d.tangential_acceleration),
        ("radial acceleration variance", d.radial_acceleration_variance),
        (
            "tangential acceleration variance",
            d.tangential_acceleration_variance,
        ),
        ("start size", d.start_particle_size),
        ("start size variance", d.start_particle_size_variance),
        ("finish size", d.finish_particle_size),
        ("finish size variance", d.finish_particle_size_variance),
        ("duration", d.duration),
        ("max radius", d.max_radius),
        ("max radius variance", d.max_radius_variance),
        ("min radius", d.min_radius),
        ("min radius variance", d.min_radius_variance),
        ("rotate per second", d.rotate_per_second),
        ("rotate per second variance", d.rotate_per_second_variance),
        ("rotation start", d.rotation_start),
        ("rotation start variance", d.rotation_start_variance),
        ("rotation end", d.rotation_end),
        ("rotation end variance", d.rotation_end_variance),
    ];

    let mut fields: Vec<_> = scalars
        .into_iter()
        .map(|(name, value)| (name, "", value))
        .collect();
    fields.extend(vec2_fields("source position", d.source_position));
    fields.extend(vec2_fields("source position variance", d.source_position_variance));
    fields.extend(vec2_fields("gravity", d.gravity));
    fields.extend(color_fields("start color", d.start_color));
    fields.extend(color_fields("start color variance", d.start_color_variance));
    fields.extend(color_fields("finish color", d.finish_color));
    fields.extend(color_fields("finish color variance", d.finish_color_variance));
    fields
}

fn validate_finite(descriptor: &EmitterDescriptor) -> Result<()> {
    for (name, component, value) in float_fields(descriptor) {
        if !value.is_finite() {
            let field = if component.is_empty() {
                name.to_string()
            } else {
                format!("{name}.{component}")
            };
            return Err(DescriptorError::InvalidDescriptor(format!(
                "{field} is not a finite number: {value}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> EmitterDescriptor {
        EmitterDescriptor {
            max_particles: 10,
            life_span: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_descriptor_passes() {
        assert!(validate_descriptor(&valid()).is_ok());
    }

    #[test]
    fn test_zero_life_span_rejected() {
        let descriptor = EmitterDescriptor {
            life_span: 0.0,
            ..valid()
        };
        assert!(matches!(
            validate_descriptor(&descriptor),
            Err(DescriptorError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_nan_speed_rejected() {
        let descriptor = EmitterDescriptor {
            speed: f32::NAN,
            ..valid()
        };
        let err = validate_descriptor(&descriptor).unwrap_err();
        assert!(err.to_string().contains("speed"));
    }

    #[test]
    fn test_capacity_limit() {
        let at_limit = EmitterDescriptor {
            max_particles: MAX_PARTICLES,
            ..valid()
        };
        assert!(validate_descriptor(&at_limit).is_ok());

        let over = EmitterDescriptor {
            max_particles: MAX_PARTICLES + 1,
            ..valid()
        };
        let err = validate_descriptor(&over).unwrap_err();
        assert!(err.to_string().contains("exceeds the limit"));
    }

    #[test]
    fn test_non_finite_components_rejected() {
        let cases = [
            (
                EmitterDescriptor {
                    gravity: Vec2::new(f32::NAN, 0.0),
                    ..valid()
                },
                "gravity.x",
            ),
            (
                EmitterDescriptor {
                    start_particle_size: f32::INFINITY,
                    ..valid()
                },
                "start size",
            ),
            (
                EmitterDescriptor {
                    finish_color_variance: Color::new(0.0, 0.0, f32::NEG_INFINITY, 0.0),
                    ..valid()
                },
                "finish color variance.b",
            ),
            (
                EmitterDescriptor {
                    rotation_end: f32::NAN,
                    ..valid()
                },
                "rotation end",
            ),
        ];

        for (descriptor, field) in cases {
            let err = validate_descriptor(&descriptor).unwrap_err();
            assert!(err.to_string().contains(field), "{err} should name {field}");
        }
    }
}
