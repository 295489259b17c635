//! Descriptor inspection

use anyhow::{Context, Result};
use std::path::Path;

use pex_descriptor::{Color, DescriptorParser, EmitterDescriptor, EmitterType};

use crate::utils::{add_table_row, create_table};

fn color(c: Color) -> String {
    format!("({:.2}, {:.2}, {:.2}, {:.2})", c.r, c.g, c.b, c.a)
}

fn varied(value: f32, variance: f32) -> String {
    if variance == 0.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.2} ± {variance:.2}")
    }
}

/// Rows shown by `info`, grouped the way the file lays them out
fn field_rows(d: &EmitterDescriptor) -> Vec<[String; 2]> {
    let texture = match &d.texture_data {
        Some(data) => format!("{} (embedded, {} bytes)", d.texture_name, data.len()),
        None => d.texture_name.clone(),
    };
    let duration = if d.is_unbounded() {
        "unbounded".to_string()
    } else {
        format!("{:.2}s", d.duration)
    };

    let mut rows = vec![
        ["Texture".to_string(), texture],
        [
            "Blend".to_string(),
            format!("{} / {}", d.blend_func_source, d.blend_func_destination),
        ],
        ["Opacity modifies RGB".to_string(), d.opacity_modify_rgb.to_string()],
        ["Emitter type".to_string(), format!("{:?}", d.emitter_type)],
        ["Max particles".to_string(), d.max_particles.to_string()],
        ["Emission rate".to_string(), format!("{:.2}/s", d.emission_rate())],
        ["Duration".to_string(), duration],
        ["Life span".to_string(), varied(d.life_span, d.life_span_variance)],
        [
            "Position variance".to_string(),
            format!("{}", d.source_position_variance),
        ],
        [
            "Angle (deg)".to_string(),
            varied(d.angle.to_degrees(), d.angle_variance.to_degrees()),
        ],
    ];

    match d.emitter_type {
        EmitterType::Gravity => rows.extend([
            ["Speed".to_string(), varied(d.speed, d.speed_variance)],
            ["Gravity".to_string(), format!("{}", d.gravity)],
            [
                "Radial accel".to_string(),
                varied(d.radial_acceleration, d.radial_acceleration_variance),
            ],
            [
                "Tangential accel".to_string(),
                varied(
                    d.tangential_acceleration,
                    d.tangential_acceleration_variance,
                ),
            ],
        ]),
        EmitterType::Radial => rows.extend([
            ["Max radius".to_string(), varied(d.max_radius, d.max_radius_variance)],
            ["Min radius".to_string(), varied(d.min_radius, d.min_radius_variance)],
            [
                "Rotate/s (deg)".to_string(),
                varied(d.rotate_per_second, d.rotate_per_second_variance),
            ],
        ]),
    }

    rows.extend([
        ["Start color".to_string(), color(d.start_color)],
        ["Start color var".to_string(), color(d.start_color_variance)],
        ["Finish color".to_string(), color(d.finish_color)],
        ["Finish color var".to_string(), color(d.finish_color_variance)],
        [
            "Start size".to_string(),
            varied(d.start_particle_size, d.start_particle_size_variance),
        ],
        [
            "Finish size".to_string(),
            varied(d.finish_particle_size, d.finish_particle_size_variance),
        ],
        [
            "Rotation start".to_string(),
            varied(d.rotation_start, d.rotation_start_variance),
        ],
        [
            "Rotation end".to_string(),
            varied(d.rotation_end, d.rotation_end_variance),
        ],
    ]);
    rows
}

pub fn execute(path: &Path) -> Result<()> {
    use console::style;

    let descriptor = DescriptorParser::new()
        .parse_file(path)
        .with_context(|| format!("Failed to parse descriptor: {}", path.display()))?;

    println!("\n{}", style("Emitter Descriptor").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!(
        "Type: {}  Capacity: {}",
        style(format!("{:?}", descriptor.emitter_type)).yellow(),
        style(descriptor.max_particles).green()
    );
    println!();

    let mut table = create_table(&["Field", "Value"]);
    for row in field_rows(&descriptor) {
        add_table_row(&mut table, &row);
    }
    table.printstd();

    Ok(())
}
