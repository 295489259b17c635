//! Headless emitter simulation

use anyhow::{Context, Result};
use clap::Args;
use glam::Vec2;
use std::path::{Path, PathBuf};

use pex_particles::{
    DEFAULT_RENDER_SCALE, EmitterSettings, FrameSink, ParticleSystem, RenderState, StepReport,
    TextureSource, VertexBuffers,
};

use crate::utils::{add_table_row, create_table};

#[derive(Args)]
pub struct SimulateArgs {
    /// Path to the descriptor file
    pub file: PathBuf,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 120)]
    pub frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Render scale applied to the mesh
    #[arg(long, default_value_t = DEFAULT_RENDER_SCALE)]
    pub scale: f32,

    /// Stop for good once the emitter expires
    #[arg(long)]
    pub no_loop: bool,

    /// Print one row every N frames
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub every: u32,
}

/// Collects what a renderer would have been handed
#[derive(Debug, Default)]
struct HeadlessSink {
    render_state: Option<RenderState>,
    texture: Option<String>,
    live_quads: usize,
    /// Extent of the live quads in the last submitted mesh
    bounds: Option<(Vec2, Vec2)>,
}

impl FrameSink for HeadlessSink {
    fn apply_render_state(&mut self, state: &RenderState) {
        self.render_state = Some(*state);
    }

    fn upload_texture(&mut self, texture: TextureSource<'_>) {
        self.texture = Some(match texture {
            TextureSource::Override(data) => format!("host override ({} bytes)", data.len()),
            TextureSource::Embedded { name, data } => {
                format!("{name} (embedded, {} bytes)", data.len())
            }
            TextureSource::Named(name) => name.to_string(),
        });
    }

    fn submit(&mut self, buffers: &VertexBuffers, live_quads: usize) {
        self.live_quads = live_quads;
        self.bounds = buffers.vertices[..live_quads * 4]
            .iter()
            .fold(None, |bounds, &v| match bounds {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            });
    }
}

#[derive(Debug, Default)]
struct Totals {
    spawned: usize,
    retired: usize,
    peak: usize,
    loops: usize,
    expired_at: Option<u32>,
}

impl Totals {
    fn record(&mut self, frame: u32, report: StepReport, live: usize) {
        self.spawned += report.spawned;
        self.retired += report.retired;
        self.peak = self.peak.max(live);
        if report.looped {
            self.loops += 1;
        }
        if report.expired && self.expired_at.is_none() {
            self.expired_at = Some(frame);
        }
    }
}

fn load(path: &Path, settings: EmitterSettings) -> Result<ParticleSystem> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read descriptor: {}", path.display()))?;
    let mut system = ParticleSystem::new(settings);
    system
        .load(&data)
        .with_context(|| format!("Failed to parse descriptor: {}", path.display()))?;
    Ok(system)
}

pub fn execute(args: &SimulateArgs) -> Result<()> {
    use console::style;

    if !(args.dt.is_finite() && args.dt > 0.0) {
        anyhow::bail!("Frame time must be a positive number of seconds, got {}", args.dt);
    }

    let mut settings = EmitterSettings::default()
        .with_render_scale(args.scale)
        .with_auto_loop(!args.no_loop);
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }

    let mut system = load(&args.file, settings)?;
    let mut sink = HeadlessSink::default();
    let mut totals = Totals::default();

    let mut table = create_table(&["Frame", "Time", "Live", "Spawned", "Retired", "State"]);
    for frame in 1..=args.frames {
        let Some(report) = system.update(args.dt, None, &mut sink) else {
            break;
        };
        totals.record(frame, report, sink.live_quads);

        if frame % args.every == 0 || frame == args.frames {
            add_table_row(
                &mut table,
                &[
                    frame.to_string(),
                    format!("{:.3}", frame as f32 * args.dt),
                    sink.live_quads.to_string(),
                    report.spawned.to_string(),
                    report.retired.to_string(),
                    format!("{:?}", system.state()),
                ],
            );
        }
    }

    println!("\n{}", style("Simulation").bold().underlined());
    println!("File: {}", style(args.file.display()).cyan());
    if let Some(texture) = &sink.texture {
        println!("Texture: {}", style(texture).yellow());
    }
    if let Some(state) = sink.render_state {
        println!(
            "Blend: {} / {}{}",
            state.blend.source,
            state.blend.destination,
            if state.opacity_modify_rgb {
                " (premultiplied)"
            } else {
                ""
            }
        );
    }
    println!();
    table.printstd();

    println!("\n{}", style("Summary").bold());
    println!("Frames: {}", style(args.frames).green());
    println!("Spawned: {}", style(totals.spawned).green());
    println!("Retired: {}", style(totals.retired).green());
    println!("Peak live: {}", style(totals.peak).green());
    println!("Final live: {}", style(sink.live_quads).green());
    println!("Loops: {}", style(totals.loops).green());
    if let Some(frame) = totals.expired_at {
        println!("Expired at frame: {}", style(frame).yellow());
    }
    if let Some((min, max)) = sink.bounds {
        println!("Mesh bounds: {} .. {}", style(min).dim(), style(max).dim());
    }

    Ok(())
}
