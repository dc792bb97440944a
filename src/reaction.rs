//! Reaction pass: `2 A + B -> 2 C` and `2 C -> 2 A + B`.
//!
//! [`react`] reads an immutable snapshot of the particles and returns a
//! [`ReactionPatch`] describing what to remove and what to spawn. Nothing is
//! mutated until the store applies the patch, so observers never see a
//! half-applied frame.
//!
//! # Forward
//!
//! For every `B` (store order), the unconsumed `A` particles closer than the
//! forward distance are sorted by distance and the two nearest are taken. If
//! those two are also within the forward distance of each other, the triple
//! reacts with `forward_probability` and becomes two `C` at its centroid.
//!
//! # Reverse
//!
//! Every unordered pair of unconsumed `C` closer than the reverse distance
//! reacts with `reverse_probability` and becomes `2 A + B` at its midpoint.
//! A `C` takes part in at most one reverse reaction per frame.

use crate::config::{ReactionConfig, SpawnConfig};
use crate::kinetics::Rates;
use crate::particle::{Particle, ParticleKind, TypeCounts};
use crate::spawn::{random_offset, random_velocity};
use glam::Vec3;
use rand::Rng;
use std::collections::HashSet;

/// A particle to be created when a patch is applied. Ids are assigned by the
/// store at that point.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawn {
    pub kind: ParticleKind,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// The outcome of one reaction pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReactionPatch {
    /// Ids of consumed particles, in the order they were consumed.
    pub consumed: Vec<u64>,
    /// Particles created by the reactions that fired.
    pub spawned: Vec<Spawn>,
    /// Number of forward reactions that fired.
    pub forward_fired: usize,
    /// Number of reverse reactions that fired.
    pub reverse_fired: usize,
}

impl ReactionPatch {
    pub fn is_empty(&self) -> bool {
        self.consumed.is_empty() && self.spawned.is_empty()
    }

    pub fn consumed_set(&self) -> HashSet<u64> {
        self.consumed.iter().copied().collect()
    }

    /// Counts of spawned particles per kind.
    pub fn spawned_counts(&self) -> TypeCounts {
        let mut counts = TypeCounts::default();
        for s in &self.spawned {
            *counts.get_mut(s.kind) += 1;
        }
        counts
    }

    fn spawn_group<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        kinds: &[ParticleKind],
        center: Vec3,
        config: &ReactionConfig,
        min_speed_fraction: f32,
    ) {
        for &kind in kinds {
            self.spawned.push(Spawn {
                kind,
                position: random_offset(rng, center, config.spawn_offset_scale),
                velocity: random_velocity(rng, config.velocity_kick_scale, min_speed_fraction),
            });
        }
    }
}

const FORWARD_PRODUCTS: [ParticleKind; 2] = [ParticleKind::Product, ParticleKind::Product];
const REVERSE_PRODUCTS: [ParticleKind; 3] = [
    ParticleKind::ReactantA,
    ParticleKind::ReactantA,
    ParticleKind::ReactantB,
];

/// Run the forward pass, then the reverse pass, over `particles`.
pub fn react<R: Rng + ?Sized>(
    particles: &[Particle],
    rates: &Rates,
    config: &ReactionConfig,
    spawn: &SpawnConfig,
    rng: &mut R,
) -> ReactionPatch {
    let mut patch = ReactionPatch::default();
    let mut consumed: HashSet<u64> = HashSet::new();

    forward_pass(particles, rates, config, spawn, rng, &mut patch, &mut consumed);
    reverse_pass(particles, rates, config, spawn, rng, &mut patch, &mut consumed);

    patch
}

fn forward_pass<R: Rng + ?Sized>(
    particles: &[Particle],
    rates: &Rates,
    config: &ReactionConfig,
    spawn: &SpawnConfig,
    rng: &mut R,
    patch: &mut ReactionPatch,
    consumed: &mut HashSet<u64>,
) {
    let threshold = config.forward_distance_sq();
    let reactant_a: Vec<&Particle> = particles
        .iter()
        .filter(|p| p.kind == ParticleKind::ReactantA)
        .collect();
    if reactant_a.len() < 2 {
        return;
    }

    for b in particles.iter().filter(|p| p.kind == ParticleKind::ReactantB) {
        if consumed.contains(&b.id) {
            continue;
        }

        let mut nearby: Vec<(f32, &Particle)> = reactant_a
            .iter()
            .filter(|a| !consumed.contains(&a.id))
            .map(|a| (b.position.distance_squared(a.position), *a))
            .filter(|(d, _)| *d < threshold)
            .collect();
        if nearby.len() < 2 {
            continue;
        }

        // Stable sort: equal distances keep store order.
        nearby.sort_by(|x, y| x.0.total_cmp(&y.0));
        let (a1, a2) = (nearby[0].1, nearby[1].1);
        if a1.position.distance_squared(a2.position) >= threshold {
            continue;
        }

        if rng.gen::<f32>() < rates.forward_probability {
            consumed.insert(b.id);
            consumed.insert(a1.id);
            consumed.insert(a2.id);
            patch.consumed.extend([b.id, a1.id, a2.id]);

            let center = (b.position + a1.position + a2.position) / 3.0;
            patch.spawn_group(rng, &FORWARD_PRODUCTS, center, config, spawn.min_speed_fraction);
            patch.forward_fired += 1;
        }
    }
}

fn reverse_pass<R: Rng + ?Sized>(
    particles: &[Particle],
    rates: &Rates,
    config: &ReactionConfig,
    spawn: &SpawnConfig,
    rng: &mut R,
    patch: &mut ReactionPatch,
    consumed: &mut HashSet<u64>,
) {
    let threshold = config.reverse_distance_sq();
    let products: Vec<&Particle> = particles
        .iter()
        .filter(|p| p.kind == ParticleKind::Product)
        .collect();

    for (i, p1) in products.iter().enumerate() {
        if consumed.contains(&p1.id) {
            continue;
        }
        for p2 in &products[i + 1..] {
            if consumed.contains(&p2.id) {
                continue;
            }
            if p1.position.distance_squared(p2.position) >= threshold {
                continue;
            }
            if rng.gen::<f32>() < rates.reverse_probability {
                consumed.insert(p1.id);
                consumed.insert(p2.id);
                patch.consumed.extend([p1.id, p2.id]);

                let center = (p1.position + p2.position) * 0.5;
                patch.spawn_group(rng, &REVERSE_PRODUCTS, center, config, spawn.min_speed_fraction);
                patch.reverse_fired += 1;
                break;
            }
        }
    }
}
