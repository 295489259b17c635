//! Fixed-capacity particle storage

use crate::particle::Particle;

/// Densely packed particle storage.
///
/// The first [`len`](Self::len) slots are the live set, in no particular
/// order. Slots past it hold stale data and are never handed out as live.
/// The backing storage is allocated once at the descriptor's capacity.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    live: usize,
}

impl ParticlePool {
    /// Create a pool with room for `capacity` particles
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            live: 0,
        }
    }

    /// Maximum number of live particles
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.live
    }

    /// True when no particle is live
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// True when every slot is live
    pub fn is_full(&self) -> bool {
        self.live >= self.slots.len()
    }

    /// The live particles
    pub fn live(&self) -> &[Particle] {
        &self.slots[..self.live]
    }

    /// The live particles, mutably
    pub fn live_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.live]
    }

    /// Claim the next free slot.
    ///
    /// The slot is cleared and counted as live; the caller fills it in.
    /// Returns `None` when the pool is full.
    pub fn spawn(&mut self) -> Option<&mut Particle> {
        if self.is_full() {
            return None;
        }
        let slot = &mut self.slots[self.live];
        *slot = Particle::default();
        self.live += 1;
        Some(slot)
    }

    /// Remove the live particle at `index` by moving the last live particle
    /// into its slot.
    ///
    /// Callers iterating the live set must not advance their cursor after a
    /// retirement: the slot now holds a particle that has not been visited.
    pub fn retire(&mut self, index: usize) {
        debug_assert!(index < self.live, "retiring a slot outside the live set");
        if index >= self.live {
            return;
        }
        let last = self.live - 1;
        if index != last {
            self.slots.swap(index, last);
        }
        self.live = last;
    }

    /// Mark every live particle for death on the next step.
    ///
    /// Slots are not freed here; the next step retires them.
    pub fn reset(&mut self) {
        for particle in self.live_mut() {
            particle.time_to_live = 0.0;
        }
    }
}
