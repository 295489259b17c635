//! Individual particle representation

use glam::{Vec2, Vec4};

/// A single particle in the pool.
///
/// All per-frame changes are stored as rates (`*_delta`, per second) worked
/// out once at spawn, so stepping is a handful of multiply-adds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[deny(missing_docs)]
pub struct Particle {
    /// Current position in descriptor units
    pub position: Vec2,
    /// Velocity (gravity emitters)
    pub direction: Vec2,
    /// Source position at spawn; gravity motion is relative to it
    pub start_pos: Vec2,
    /// Current RGBA color, not clamped while stepping
    pub color: Vec4,
    /// Color change per second
    pub delta_color: Vec4,
    /// Sprite rotation in degrees
    pub rotation: f32,
    /// Rotation change per second, in degrees
    pub rotation_delta: f32,
    /// Acceleration away from the spawn point (gravity emitters)
    pub radial_acceleration: f32,
    /// Acceleration perpendicular to the radial one (gravity emitters)
    pub tangential_acceleration: f32,
    /// Orbit radius (radial emitters)
    pub radius: f32,
    /// Radius change per second
    pub radius_delta: f32,
    /// Orbit angle in radians (radial emitters)
    pub angle: f32,
    /// Orbit speed in radians per second, despite the name
    pub degrees_per_second: f32,
    /// Quad edge length
    pub particle_size: f32,
    /// Size change per second
    pub particle_size_delta: f32,
    /// Seconds left before the particle is retired
    pub time_to_live: f32,
}

impl Particle {
    /// A particle is alive while it has strictly positive time left.
    /// NaN lifetimes count as dead.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.time_to_live > 0.0
    }
}
