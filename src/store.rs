//! Particle storage and global simulation parameters.
//!
//! The store is plain data plus mutation primitives. It does not clamp or
//! validate; [`Simulation`](crate::Simulation) normalizes inputs before they
//! reach it.

use crate::particle::{Particle, ParticleKind, TypeCounts};
use crate::reaction::ReactionPatch;
use glam::Vec3;
use std::collections::HashSet;
use std::ops::Range;

/// The live particle set and the parameters the simulation reads each frame.
#[derive(Clone, Debug)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    next_id: u64,
    temperature_c: f32,
    pressure_factor: f32,
    catalyst_active: bool,
    running: bool,
    box_size: f32,
}

impl ParticleStore {
    /// Create an empty, paused store.
    pub fn new(temperature_c: f32, pressure_factor: f32, catalyst_active: bool, box_size: f32) -> Self {
        Self {
            particles: Vec::new(),
            next_id: 0,
            temperature_c,
            pressure_factor,
            catalyst_active,
            running: false,
            box_size,
        }
    }

    // ========== Particles ==========

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn counts(&self) -> TypeCounts {
        TypeCounts::from_particles(&self.particles)
    }

    /// The id the next created particle will receive.
    #[inline]
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    fn issue_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a new particle with a fresh id and return that id.
    pub fn insert(&mut self, kind: ParticleKind, position: Vec3, velocity: Vec3) -> u64 {
        let id = self.issue_id();
        self.particles.push(Particle {
            id,
            kind,
            position,
            velocity,
        });
        id
    }

    /// Remove every particle whose id is in `ids`, keeping the order of the rest.
    pub fn remove_ids(&mut self, ids: &HashSet<u64>) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !ids.contains(&p.id));
        before - self.particles.len()
    }

    /// Remove the first `n` particles of `kind`, in store order.
    pub fn remove_first_of_kind(&mut self, kind: ParticleKind, n: usize) -> usize {
        let ids: HashSet<u64> = self
            .particles
            .iter()
            .filter(|p| p.kind == kind)
            .take(n)
            .map(|p| p.id)
            .collect();
        self.remove_ids(&ids)
    }

    /// Commit a reaction patch in one update: drop consumed particles, then
    /// append the spawned ones. Returns the range of ids issued.
    pub fn apply(&mut self, patch: &ReactionPatch) -> Range<u64> {
        if !patch.consumed.is_empty() {
            self.remove_ids(&patch.consumed_set());
        }
        let first = self.next_id;
        self.particles.reserve(patch.spawned.len());
        for spawn in &patch.spawned {
            self.insert(spawn.kind, spawn.position, spawn.velocity);
        }
        first..self.next_id
    }

    /// Drop all particles. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    // ========== Parameters ==========

    #[inline]
    pub fn temperature_c(&self) -> f32 {
        self.temperature_c
    }

    pub fn set_temperature_c(&mut self, temperature_c: f32) {
        self.temperature_c = temperature_c;
    }

    #[inline]
    pub fn pressure_factor(&self) -> f32 {
        self.pressure_factor
    }

    #[inline]
    pub fn catalyst_active(&self) -> bool {
        self.catalyst_active
    }

    pub fn set_catalyst_active(&mut self, active: bool) {
        self.catalyst_active = active;
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Side length of the cubic box.
    #[inline]
    pub fn box_size(&self) -> f32 {
        self.box_size
    }

    #[inline]
    pub fn half_box(&self) -> f32 {
        self.box_size * 0.5
    }

    /// Change the pressure and box size together, scaling every position by
    /// `new_size / old_size` about the origin. Velocities are untouched.
    pub fn set_pressure(&mut self, pressure_factor: f32, box_size: f32) {
        let scale = if self.box_size > 1e-6 {
            box_size / self.box_size
        } else {
            1.0
        };
        for p in &mut self.particles {
            p.position *= scale;
        }
        self.pressure_factor = pressure_factor;
        self.box_size = box_size;
    }
}
