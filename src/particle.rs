//! Particle records and per-kind bookkeeping.
//!
//! | Kind | Stands in for | Color |
//! |------|---------------|-------|
//! | [`ParticleKind::ReactantA`] | SO2 | yellow |
//! | [`ParticleKind::ReactantB`] | O2 | red |
//! | [`ParticleKind::Product`] | SO3 | blue |

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three roles a particle can play in `2 A + B <=> 2 C`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// First reactant, consumed two at a time (SO2).
    ReactantA,
    /// Second reactant, consumed one at a time (O2).
    ReactantB,
    /// Product of the forward reaction (SO3).
    Product,
}

impl ParticleKind {
    /// All kinds, in the order used for counts and instance buffers.
    pub const ALL: [ParticleKind; 3] = [
        ParticleKind::ReactantA,
        ParticleKind::ReactantB,
        ParticleKind::Product,
    ];

    /// Stable numeric tag, also written to [`ParticleInstance::kind`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ParticleKind::ReactantA => 0,
            ParticleKind::ReactantB => 1,
            ParticleKind::Product => 2,
        }
    }

    /// Chemical formula of the modeled species.
    pub fn formula(self) -> &'static str {
        match self {
            ParticleKind::ReactantA => "SO2",
            ParticleKind::ReactantB => "O2",
            ParticleKind::Product => "SO3",
        }
    }

    /// Display color (RGB, 0.0-1.0).
    pub fn color(self) -> Vec3 {
        match self {
            ParticleKind::ReactantA => Vec3::new(1.0, 1.0, 0.0),
            ParticleKind::ReactantB => Vec3::new(1.0, 0.0, 0.0),
            ParticleKind::Product => Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula())
    }
}

/// A single point particle.
///
/// `id` is issued by the [`ParticleStore`](crate::store::ParticleStore) and
/// `kind` never changes; reactions replace particles instead of mutating them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: u64,
    pub kind: ParticleKind,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Particle counts per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeCounts {
    pub reactant_a: usize,
    pub reactant_b: usize,
    pub product: usize,
}

impl TypeCounts {
    pub fn from_particles(particles: &[Particle]) -> Self {
        let mut counts = Self::default();
        for p in particles {
            *counts.get_mut(p.kind) += 1;
        }
        counts
    }

    #[inline]
    pub fn get(&self, kind: ParticleKind) -> usize {
        match kind {
            ParticleKind::ReactantA => self.reactant_a,
            ParticleKind::ReactantB => self.reactant_b,
            ParticleKind::Product => self.product,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, kind: ParticleKind) -> &mut usize {
        match kind {
            ParticleKind::ReactantA => &mut self.reactant_a,
            ParticleKind::ReactantB => &mut self.reactant_b,
            ParticleKind::Product => &mut self.product,
        }
    }

    pub fn total(&self) -> usize {
        self.reactant_a + self.reactant_b + self.product
    }
}

impl fmt::Display for TypeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SO2={} O2={} SO3={}",
            self.reactant_a, self.reactant_b, self.product
        )
    }
}

/// Render-ready particle record.
///
/// Laid out for direct upload as a vertex/instance buffer: two 16-byte rows,
/// position + kind tag, then color + padding.
///
/// ```ignore
/// let instances = sim.instances();
/// queue.write_buffer(&buffer, 0, bytemuck::cast_slice(&instances));
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub kind: u32,
    pub color: [f32; 3],
    pub _pad: u32,
}

impl From<&Particle> for ParticleInstance {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            kind: p.kind.index() as u32,
            color: p.kind.color().to_array(),
            _pad: 0,
        }
    }
}
