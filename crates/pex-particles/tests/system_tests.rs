//! Integration tests for the host-facing particle system

use bytes::Bytes;
use glam::Vec2;
use pex_descriptor::{BlendFactor, DescriptorWriter, presets};
use pex_particles::{
    BlendOverride, EmitterConfig, EmitterSettings, EmitterState, FrameSink, ParticleError, ParticleSystem,
    RenderState, TextureSource, VertexBuffers,
};
use pretty_assertions::assert_eq;

#[derive(Debug, PartialEq)]
enum Call {
    RenderState(BlendFactor, BlendFactor, bool),
    Texture(String),
    Submit { live: usize, vertices: usize },
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<Call>,
}

impl RecordingSink {
    fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl FrameSink for RecordingSink {
    fn apply_render_state(&mut self, state: &RenderState) {
        self.calls.push(Call::RenderState(
            state.blend.source,
            state.blend.destination,
            state.opacity_modify_rgb,
        ));
    }

    fn upload_texture(&mut self, texture: TextureSource<'_>) {
        let label = match texture {
            TextureSource::Override(data) => format!("override:{}", data.len()),
            TextureSource::Embedded { name, data } => format!("embedded:{name}:{}", data.len()),
            TextureSource::Named(name) => format!("named:{name}"),
        };
        self.calls.push(Call::Texture(label));
    }

    fn submit(&mut self, buffers: &VertexBuffers, live_quads: usize) {
        self.calls.push(Call::Submit {
            live: live_quads,
            vertices: buffers.vertices.len(),
        });
    }
}

fn fire_bytes() -> Vec<u8> {
    DescriptorWriter::new().to_bytes(&presets::fire()).unwrap()
}

fn system() -> ParticleSystem {
    ParticleSystem::new(EmitterSettings::default().with_seed(11))
}

#[test]
fn test_update_without_descriptor_is_a_no_op() {
    let mut system = system();
    let mut sink = RecordingSink::default();
    assert!(system.update(0.1, None, &mut sink).is_none());
    assert!(sink.calls.is_empty());
    assert_eq!(system.state(), EmitterState::Idle);
}

#[test]
fn test_first_frame_sets_material_and_texture() {
    let mut system = system();
    let mut sink = RecordingSink::default();
    system.load(&fire_bytes()).unwrap();

    let report = system.update(0.1, None, &mut sink).unwrap();
    assert_eq!(
        sink.take(),
        vec![
            Call::RenderState(BlendFactor::SrcAlpha, BlendFactor::One, false),
            Call::Texture("named:fire.png".to_string()),
            Call::Submit {
                live: report.spawned,
                vertices: 800
            },
        ]
    );

    let report = system.update(0.1, None, &mut sink).unwrap();
    assert_eq!(
        sink.take(),
        vec![Call::Submit {
            live: system.engine().particle_count(),
            vertices: 800
        }]
    );
    assert!(report.spawned > 0);
}

#[test]
fn test_blend_override_reapplies_material() {
    let mut system = system();
    let mut sink = RecordingSink::default();
    system.load(&fire_bytes()).unwrap();
    system.update(0.1, None, &mut sink);
    sink.take();

    system.set_blend(
        BlendOverride::Inherit,
        BlendOverride::from_index(11),
    );
    system.update(0.1, None, &mut sink);
    assert_eq!(
        sink.take()[0],
        Call::RenderState(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha, false)
    );
}

#[test]
fn test_texture_override_wins() {
    let mut system = system();
    let mut sink = RecordingSink::default();
    let mut descriptor = presets::fire();
    descriptor.texture_data = Some(Bytes::from_static(&[1, 2, 3, 4]));
    system.load_descriptor(descriptor).unwrap();

    assert_eq!(
        system.texture_source(),
        Some(TextureSource::Embedded {
            name: "fire.png",
            data: &[1, 2, 3, 4]
        })
    );

    system.set_texture_override(Some(Bytes::from_static(&[9; 16])));
    system.update(0.1, None, &mut sink);
    assert!(sink.take().contains(&Call::Texture("override:16".to_string())));

    system.set_texture_override(None);
    system.update(0.1, None, &mut sink);
    assert!(sink.take().contains(&Call::Texture("embedded:fire.png:4".to_string())));
}

#[test]
fn test_failed_reload_keeps_current_emitter() {
    let mut system = system();
    system.load(&fire_bytes()).unwrap();

    let mut truncated = fire_bytes();
    truncated.truncate(40);
    let err = system.reload(&truncated).unwrap_err();
    assert!(matches!(err, ParticleError::Descriptor(_)));
    assert_eq!(system.engine().config().unwrap().max_particles(), 200);
}

#[test]
fn test_reload_swaps_capacity() {
    let mut system = system();
    let mut sink = RecordingSink::default();
    system.load(&fire_bytes()).unwrap();
    system.update(0.2, None, &mut sink);

    let galaxy = DescriptorWriter::new().to_bytes(&presets::galaxy()).unwrap();
    system.reload(&galaxy).unwrap();
    assert_eq!(system.engine().particle_count(), 0);
    assert_eq!(system.buffers().quad_capacity(), 300);

    system.update(0.1, None, &mut sink);
    assert_eq!(
        sink.take()[1],
        Call::Texture("named:star.png".to_string())
    );
}

#[test]
fn test_clear_and_restart() {
    let mut system = system();
    let mut sink = RecordingSink::default();
    system.load(&fire_bytes()).unwrap();
    system.update(0.1, None, &mut sink);
    assert!(system.restart().is_ok());

    system.clear();
    assert_eq!(system.state(), EmitterState::Idle);
    assert_eq!(system.buffers().quad_capacity(), 0);
    assert!(matches!(system.restart(), Err(ParticleError::NotLoaded)));
    assert!(system.texture_source().is_none());
}

#[test]
fn test_mesh_is_scaled_by_render_scale() {
    let mut system = ParticleSystem::new(
        EmitterSettings::default()
            .with_seed(3)
            .with_render_scale(2.0),
    );
    let mut sink = RecordingSink::default();
    let mut descriptor = presets::fire();
    descriptor.source_position_variance = Vec2::ZERO;
    descriptor.speed = 0.0;
    descriptor.speed_variance = 0.0;
    descriptor.gravity = Vec2::ZERO;
    descriptor.radial_acceleration = 0.0;
    descriptor.radial_acceleration_variance = 0.0;
    descriptor.tangential_acceleration = 0.0;
    descriptor.tangential_acceleration_variance = 0.0;
    system.load_descriptor(descriptor).unwrap();

    system.update(0.05, Some(Vec2::new(4.0, 6.0)), &mut sink);
    let first = system.engine().pool().live()[0];
    let centre = system.buffers().vertices[..4].iter().copied().sum::<Vec2>() / 4.0;
    // Spawned at origin / scale, drawn at position * scale
    assert_eq!(first.start_pos, Vec2::new(2.0, 3.0));
    assert!((centre - Vec2::new(4.0, 6.0)).length() < 1e-3);
}

#[test]
fn test_stopped_system_still_ages_particles() {
    let mut system = system();
    let mut sink = RecordingSink::default();
    system.set_auto_loop(false);
    system.load(&fire_bytes()).unwrap();
    system.update(0.2, None, &mut sink);
    assert!(system.engine().particle_count() > 0);

    system.set_running(false);
    for _ in 0..20 {
        let report = system.update(0.1, None, &mut sink).unwrap();
        assert_eq!(report.spawned, 0);
    }
    assert_eq!(system.engine().particle_count(), 0);
    assert_eq!(system.state(), EmitterState::Expired);
}

#[test]
fn test_oversized_descriptor_rejected_without_allocating() {
    let mut system = system();
    system.load(&fire_bytes()).unwrap();

    let mut huge = presets::fire();
    huge.max_particles = i32::MAX as u32;
    let err = system.load_descriptor(huge).unwrap_err();
    assert!(matches!(err, ParticleError::Descriptor(_)));
    assert_eq!(system.engine().config().unwrap().max_particles(), 200);
    assert_eq!(system.buffers().quad_capacity(), 200);
}

#[test]
fn test_engine_reload_resizes_mesh() {
    let mut system = system();
    let mut sink = RecordingSink::default();
    system.load(&fire_bytes()).unwrap();
    system.update(0.1, None, &mut sink);

    let galaxy = EmitterConfig::new(presets::galaxy()).unwrap();
    system.engine_mut().load(galaxy);
    for _ in 0..120 {
        system.update(1.0 / 30.0, None, &mut sink);
    }

    assert_eq!(system.buffers().quad_capacity(), 300);
    let live = system.engine().particle_count();
    assert!(live > 0);
    assert_eq!(
        sink.take().last(),
        Some(&Call::Submit {
            live,
            vertices: 1200
        })
    );
}
