//! Ready-made descriptors for authoring and smoke tests.

use glam::Vec2;

use crate::blend::BlendFactor;
use crate::types::{Color, EmitterDescriptor, EmitterType, UNBOUNDED_DURATION};

/// Names of the built-in presets, in the order [`preset`] accepts them
pub const PRESET_NAMES: [&str; 2] = ["fire", "galaxy"];

/// Look a built-in preset up by name
pub fn preset(name: &str) -> Option<EmitterDescriptor> {
    match name.to_ascii_lowercase().as_str() {
        "fire" => Some(fire()),
        "galaxy" => Some(galaxy()),
        _ => None,
    }
}

/// Upward additive flame using the gravity emitter
pub fn fire() -> EmitterDescriptor {
    EmitterDescriptor {
        texture_name: "fire.png".to_string(),
        blend_func_source: BlendFactor::SrcAlpha,
        blend_func_destination: BlendFactor::One,
        source_position_variance: Vec2::new(7.0, 7.0),
        speed: 60.0,
        speed_variance: 20.0,
        life_span: 0.9,
        life_span_variance: 0.3,
        angle: 90f32.to_radians(),
        angle_variance: 10f32.to_radians(),
        gravity: Vec2::new(0.0, 30.0),
        start_color: Color::new(1.0, 0.55, 0.12, 0.9),
        start_color_variance: Color::new(0.0, 0.1, 0.05, 0.1),
        finish_color: Color::new(0.9, 0.1, 0.0, 0.0),
        max_particles: 200,
        start_particle_size: 40.0,
        start_particle_size_variance: 10.0,
        finish_particle_size: 10.0,
        finish_particle_size_variance: 4.0,
        duration: UNBOUNDED_DURATION,
        emitter_type: EmitterType::Gravity,
        rotation_end: 90.0,
        rotation_end_variance: 45.0,
        ..Default::default()
    }
}

/// Spiral collapsing inward using the radial emitter
pub fn galaxy() -> EmitterDescriptor {
    EmitterDescriptor {
        texture_name: "star.png".to_string(),
        blend_func_source: BlendFactor::SrcAlpha,
        blend_func_destination: BlendFactor::OneMinusSrcAlpha,
        life_span: 4.0,
        life_span_variance: 1.0,
        angle: 0.0,
        angle_variance: 360f32.to_radians(),
        start_color: Color::new(0.12, 0.25, 0.75, 1.0),
        start_color_variance: Color::new(0.0, 0.0, 0.2, 0.1),
        finish_color: Color::new(0.0, 0.0, 0.0, 0.0),
        max_particles: 300,
        start_particle_size: 24.0,
        start_particle_size_variance: 8.0,
        finish_particle_size: 4.0,
        duration: UNBOUNDED_DURATION,
        emitter_type: EmitterType::Radial,
        max_radius: 180.0,
        max_radius_variance: 20.0,
        min_radius: 0.0,
        rotate_per_second: 45.0,
        rotate_per_second_variance: 10.0,
        ..Default::default()
    }
}
