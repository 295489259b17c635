//! Quad mesh generation for the live particle set

use glam::{Vec2, Vec4};

use crate::particle::Particle;
use crate::pool::ParticlePool;

/// Texture coordinates of one quad, in corner order
pub const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
];

/// Two triangles per quad, relative to its first vertex
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Mesh arrays sized for a full pool: 4 vertices and 6 indices per slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffers {
    pub vertices: Vec<Vec2>,
    /// 8-bit RGBA, one per vertex
    pub colors: Vec<[u8; 4]>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl VertexBuffers {
    /// Allocate buffers for `capacity` quads with the static topology filled
    /// in and every vertex at the origin, transparent.
    pub fn with_capacity(capacity: usize) -> Self {
        let vertex_count = capacity * 4;
        let uvs = QUAD_UVS.iter().copied().cycle().take(vertex_count).collect();
        let indices = (0..capacity)
            .flat_map(|quad| {
                let base = (quad * 4) as u32;
                QUAD_INDICES.map(|i| base + i)
            })
            .collect();

        Self {
            vertices: vec![Vec2::ZERO; vertex_count],
            colors: vec![[0; 4]; vertex_count],
            uvs,
            indices,
        }
    }

    /// Number of quads the buffers hold
    pub fn quad_capacity(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// Corners of a particle's quad in descriptor units.
///
/// The corner order matches [`QUAD_UVS`]. Non-zero rotations (degrees)
/// rotate the corners about the particle position.
pub fn quad_corners(particle: &Particle) -> [Vec2; 4] {
    let half = particle.particle_size * 0.5;
    let offsets = [
        Vec2::new(-half, -half),
        Vec2::new(-half, half),
        Vec2::new(half, half),
        Vec2::new(half, -half),
    ];

    if particle.rotation == 0.0 {
        offsets.map(|offset| particle.position + offset)
    } else {
        let rotation = Vec2::from_angle(particle.rotation.to_radians());
        offsets.map(|offset| particle.position + rotation.rotate(offset))
    }
}

/// Pack a color into 8-bit RGBA, clamping each channel to `[0, 1]`
pub fn pack_color(color: Vec4) -> [u8; 4] {
    let scaled = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [
        scaled.x as u8,
        scaled.y as u8,
        scaled.z as u8,
        scaled.w as u8,
    ]
}

/// Rebuilds [`VertexBuffers`] from a pool after each step.
///
/// Only the live range and the range that was live on the previous build are
/// touched, so slots past both stay zeroed.
#[derive(Debug, Clone, Default)]
pub struct VertexBufferBuilder {
    buffers: VertexBuffers,
    drawn: usize,
}

impl VertexBufferBuilder {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: VertexBuffers::with_capacity(capacity),
            drawn: 0,
        }
    }

    /// Reallocate for a new capacity, regenerating the static topology
    pub fn resize(&mut self, capacity: usize) {
        log::debug!("resizing particle mesh to {capacity} quads");
        self.buffers = VertexBuffers::with_capacity(capacity);
        self.drawn = 0;
    }

    /// Write one quad per live particle, scaled to host units.
    ///
    /// Quads that were live on the previous build but are not any more are
    /// collapsed to the origin and made transparent.
    pub fn build(&mut self, pool: &ParticlePool, render_scale: f32) -> &VertexBuffers {
        let capacity = self.buffers.quad_capacity();
        let live = pool.live();
        if live.len() > capacity {
            log::warn!(
                "pool holds {} particles but the mesh has room for {capacity}",
                live.len()
            );
        }
        let count = live.len().min(capacity);

        for (quad, particle) in live.iter().take(count).enumerate() {
            let base = quad * 4;
            let corners = quad_corners(particle).map(|corner| corner * render_scale);
            self.buffers.vertices[base..base + 4].copy_from_slice(&corners);
            self.buffers.colors[base..base + 4].fill(pack_color(particle.color));
        }

        if self.drawn > count {
            let stale = count * 4..self.drawn * 4;
            self.buffers.vertices[stale.clone()].fill(Vec2::ZERO);
            self.buffers.colors[stale].fill([0; 4]);
        }
        self.drawn = count;

        &self.buffers
    }

    /// Quads written by the last build
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn buffers(&self) -> &VertexBuffers {
        &self.buffers
    }
}
