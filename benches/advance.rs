//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use contact_sim::config::SimConfig;
use contact_sim::reaction;
use contact_sim::{Particle, ParticleKind, Simulation, Vec3};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_particles(count: usize, half: f32, seed: u64) -> Vec<Particle> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|i| Particle {
            id: i as u64,
            kind: ParticleKind::ALL[i % 3],
            position: Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ),
            velocity: Vec3::ZERO,
        })
        .collect()
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for amount in [50usize, 100, 200] {
        group.bench_with_input(BenchmarkId::new("per_kind", amount), &amount, |b, &amount| {
            let mut config = SimConfig::default();
            config.initial.reactant_a = amount;
            config.initial.reactant_b = amount;
            config.initial.product = amount;
            config.catalyst = true;
            let mut sim = Simulation::seeded(config, 1);
            sim.set_running(true);
            b.iter(|| black_box(sim.advance(1.0 / 60.0)))
        });
    }

    group.finish();
}

fn bench_react(c: &mut Criterion) {
    let mut group = c.benchmark_group("react");
    let config = SimConfig::default();
    let rates = contact_sim::Rates::compute(450.0, true, &config.kinetics);

    for count in [150usize, 300, 600] {
        let particles = random_particles(count, 5.0, 7);
        group.bench_with_input(BenchmarkId::new("particles", count), &particles, |b, particles| {
            let mut rng = SmallRng::seed_from_u64(3);
            b.iter(|| {
                black_box(reaction::react(
                    particles,
                    &rates,
                    &config.reaction,
                    &config.spawn,
                    &mut rng,
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_react);
criterion_main!(benches);
