//! Short-lived visual effect entities (nitro flames, drift smoke)
//!
//! A fixed-capacity arena with free-list recycling: spawning never
//! allocates after construction, and holding nitro forever cannot grow the
//! pool. When every slot is live the oldest particle is evicted first.

use glam::Vec3;

use crate::consts::{PARTICLE_DECAY, PARTICLE_SHRINK};

/// One live particle. Expired particles are removed from the pool the same
/// frame their life reaches zero; nothing outside the pool may keep a slot
/// index across frames.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: [f32; 3],
    pub scale: f32,
    /// Render opacity, tracks life
    pub opacity: f32,
    /// 1.0 at spawn, decremented by a fixed amount per frame
    pub life: f32,
    /// Spawn order, used for oldest-first eviction
    seq: u64,
}

/// Fixed-capacity particle arena
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Option<Particle>>,
    free: Vec<usize>,
    next_seq: u64,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            free: (0..capacity).rev().collect(),
            next_seq: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Add one particle with full life. If the pool is saturated the oldest
    /// live particle is recycled in place.
    pub fn spawn(&mut self, position: Vec3, color: [f32; 3], scale: f32, velocity: Vec3) {
        if self.slots.is_empty() {
            return;
        }
        let slot = match self.free.pop() {
            Some(idx) => idx,
            None => {
                // Saturated: evict the oldest live particle
                self.slots
                    .iter()
                    .enumerate()
                    .filter_map(|(i, s)| s.as_ref().map(|p| (i, p.seq)))
                    .min_by_key(|&(_, seq)| seq)
                    .map(|(i, _)| i)
                    .unwrap_or(0)
            }
        };
        self.slots[slot] = Some(Particle {
            position,
            velocity,
            color,
            scale,
            opacity: 1.0,
            life: 1.0,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Advance every live particle by one frame: decay life, track opacity,
    /// integrate velocity, shrink, and free any slot whose life has run out.
    /// Removal happens within this same pass; the slot index goes straight
    /// back on the free list.
    pub fn advance(&mut self) {
        for idx in 0..self.slots.len() {
            if let Some(p) = &mut self.slots[idx] {
                p.life -= PARTICLE_DECAY;
                p.opacity = p.life;
                p.position += p.velocity;
                p.scale *= PARTICLE_SHRINK;
                if p.life <= 0.0 {
                    self.slots[idx] = None;
                    self.free.push(idx);
                }
            }
        }
    }

    /// Live particles, in slot order
    pub fn iter_live(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }
}
