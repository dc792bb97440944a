//! The simulation controller.
//!
//! [`Simulation`] owns the particle store, the equilibrium detector, the
//! clock and the random source. UI controls call its setters; the render
//! loop calls [`Simulation::advance`] once per frame and reads the particles
//! back between frames.
//!
//! ```ignore
//! let mut sim = Simulation::new(SimConfig::default());
//! sim.set_temperature(500.0);
//! sim.set_running(true);
//!
//! // In the frame loop:
//! if let Some(report) = sim.advance(delta) {
//!     draw(sim.instances());
//! }
//! ```

use crate::config::SimConfig;
use crate::equilibrium::EquilibriumDetector;
use crate::error::Result;
use crate::kinetics::Rates;
use crate::motion;
use crate::particle::{Particle, ParticleInstance, ParticleKind, TypeCounts};
use crate::reaction;
use crate::spawn::{random_in_cube, random_velocity};
use crate::store::ParticleStore;
use crate::time::Time;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// What happened during one processed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Frame number since the last reset (1-based).
    pub frame: u64,
    /// Delta actually simulated, after clamping.
    pub dt: f32,
    pub forward_fired: usize,
    pub reverse_fired: usize,
    /// Counts after the reaction pass was committed.
    pub counts: TypeCounts,
    pub equilibrium: bool,
}

/// Serializable view of the live state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub name: String,
    pub frame: u64,
    pub elapsed: f64,
    pub temperature_c: f32,
    pub pressure_factor: f32,
    pub catalyst_active: bool,
    pub running: bool,
    pub equilibrium_reached: bool,
    pub box_size: f32,
    pub counts: TypeCounts,
    pub particles: Vec<Particle>,
}

/// A Contact Process simulation.
///
/// Generic over the random source so tests can drive it with a seeded or
/// mock generator.
pub struct Simulation<R: Rng = SmallRng> {
    config: SimConfig,
    store: ParticleStore,
    detector: EquilibriumDetector,
    initial: TypeCounts,
    time: Time,
    rng: R,
}

impl Simulation<SmallRng> {
    /// Create a simulation seeded from system entropy and populate it.
    ///
    /// The config is used as given; see [`Simulation::try_new`] to validate it.
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Validate the config, then create the simulation.
    pub fn try_new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a reproducible simulation.
    pub fn seeded(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation driven by `rng` and populate it with the
    /// configured initial amounts.
    pub fn with_rng(config: SimConfig, rng: R) -> Self {
        let pressure = config.clamp_pressure(config.pressure_factor);
        let store = ParticleStore::new(
            config.clamp_temperature(config.temperature_c),
            pressure,
            config.catalyst,
            config.box_size_for(pressure),
        );
        let max = config.limits.max_initial_amount;
        let initial = TypeCounts {
            reactant_a: config.initial.reactant_a.min(max),
            reactant_b: config.initial.reactant_b.min(max),
            product: config.initial.product.min(max),
        };

        let mut sim = Self {
            detector: EquilibriumDetector::new(config.equilibrium.clone()),
            time: Time::new(config.motion.max_delta),
            config,
            store,
            initial,
            rng,
        };
        sim.reset();
        sim
    }

    // ========== Frame loop ==========

    /// Run one frame: motion, reactions, equilibrium check.
    ///
    /// Returns `None` without touching any state while paused or when there
    /// are no particles.
    pub fn advance(&mut self, dt: f32) -> Option<FrameReport> {
        if !self.store.running() || self.store.is_empty() {
            return None;
        }

        let dt = self.time.tick(dt);
        let rates = self.rates();
        let half_box = self.store.half_box();

        motion::integrate(
            self.store.particles_mut(),
            rates.speed_factor,
            half_box,
            dt,
            &self.config.motion,
        );

        let patch = reaction::react(
            self.store.particles(),
            &rates,
            &self.config.reaction,
            &self.config.spawn,
            &mut self.rng,
        );
        if !patch.is_empty() {
            let ids = self.store.apply(&patch);
            log::debug!(
                "frame {}: {} forward, {} reverse, ids {:?}",
                self.time.frame(),
                patch.forward_fired,
                patch.reverse_fired,
                ids
            );
        }

        let counts = self.store.counts();
        let equilibrium = self.detector.observe(counts);

        Some(FrameReport {
            frame: self.time.frame(),
            dt,
            forward_fired: patch.forward_fired,
            reverse_fired: patch.reverse_fired,
            counts,
            equilibrium,
        })
    }

    // ========== Setters ==========

    /// Discard all particles and spawn the configured initial amounts.
    ///
    /// Leaves the simulation paused with an empty history.
    pub fn reset(&mut self) {
        self.store.clear();
        self.store.set_running(false);
        self.detector.clear();
        self.time.reset();

        let scale = self.config.spawn.initial_velocity_scale;
        for kind in ParticleKind::ALL {
            self.spawn_random(kind, self.initial.get(kind), scale);
        }
        log::info!(
            "reset {:?}: {} in a box of {:.2}",
            self.config.name,
            self.store.counts(),
            self.store.box_size()
        );
    }

    /// Set how many particles of `kind` a reset creates (clamped to the
    /// configured maximum).
    ///
    /// While paused the live particles follow immediately: missing ones are
    /// added at random positions with a small velocity, surplus ones are
    /// removed in store order. While running only the setting changes.
    pub fn set_initial_amount(&mut self, kind: ParticleKind, amount: usize) {
        let amount = amount.min(self.config.limits.max_initial_amount);
        *self.initial.get_mut(kind) = amount;
        log::trace!("initial {kind} = {amount}");

        if self.store.running() {
            return;
        }
        let current = self.store.counts().get(kind);
        if amount > current {
            let scale = self.config.spawn.paused_velocity_scale;
            self.spawn_random(kind, amount - current, scale);
        } else if amount < current {
            self.store.remove_first_of_kind(kind, current - amount);
        }
    }

    /// Set the temperature in degrees Celsius (clamped to the configured range).
    pub fn set_temperature(&mut self, temperature_c: f32) {
        let t = self.config.clamp_temperature(temperature_c);
        self.store.set_temperature_c(t);
        log::trace!("temperature = {t} C");
    }

    /// Set the pressure factor (floored at the configured minimum).
    ///
    /// The box shrinks or grows to `base_box_size / pressure`, every position
    /// is scaled with it, and equilibrium detection starts over.
    pub fn set_pressure_factor(&mut self, pressure_factor: f32) {
        let p = self.config.clamp_pressure(pressure_factor);
        let size = self.config.box_size_for(p);
        self.store.set_pressure(p, size);
        self.detector.clear();
        log::trace!("pressure = {p}, box = {size}");
    }

    pub fn set_catalyst(&mut self, active: bool) {
        self.store.set_catalyst_active(active);
        log::trace!("catalyst = {active}");
    }

    /// Start or pause. Any change of state restarts equilibrium detection.
    pub fn set_running(&mut self, running: bool) {
        if self.store.running() == running {
            return;
        }
        self.store.set_running(running);
        self.detector.clear();
        log::debug!("{}", if running { "running" } else { "paused" });
    }

    /// Flip between running and paused. Returns the new state.
    pub fn toggle_running(&mut self) -> bool {
        let running = !self.store.running();
        self.set_running(running);
        running
    }

    fn spawn_random(&mut self, kind: ParticleKind, n: usize, velocity_scale: f32) {
        let half = self.store.box_size() * self.config.spawn.fill_fraction * 0.5;
        let min_fraction = self.config.spawn.min_speed_fraction;
        for _ in 0..n {
            let position = random_in_cube(&mut self.rng, half);
            let velocity = random_velocity(&mut self.rng, velocity_scale, min_fraction);
            self.store.insert(kind, position, velocity);
        }
    }

    // ========== Accessors ==========

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    #[inline]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.store.running()
    }

    #[inline]
    pub fn equilibrium_reached(&self) -> bool {
        self.detector.at_equilibrium()
    }

    /// Side length of the cubic box.
    #[inline]
    pub fn box_size(&self) -> f32 {
        self.store.box_size()
    }

    #[inline]
    pub fn half_box(&self) -> f32 {
        self.store.half_box()
    }

    pub fn counts(&self) -> TypeCounts {
        self.store.counts()
    }

    /// Rates for the current temperature and catalyst state.
    pub fn rates(&self) -> Rates {
        Rates::compute(
            self.store.temperature_c(),
            self.store.catalyst_active(),
            &self.config.kinetics,
        )
    }

    #[inline]
    pub fn temperature(&self) -> f32 {
        self.store.temperature_c()
    }

    #[inline]
    pub fn pressure_factor(&self) -> f32 {
        self.store.pressure_factor()
    }

    #[inline]
    pub fn catalyst_active(&self) -> bool {
        self.store.catalyst_active()
    }

    /// Amounts the next reset will create.
    #[inline]
    pub fn initial_amounts(&self) -> TypeCounts {
        self.initial
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn detector(&self) -> &EquilibriumDetector {
        &self.detector
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Frames processed since the last reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.time.frame()
    }

    /// Render-ready records for every live particle, in store order.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.store.particles().iter().map(ParticleInstance::from).collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.config.name.clone(),
            frame: self.time.frame(),
            elapsed: self.time.elapsed(),
            temperature_c: self.store.temperature_c(),
            pressure_factor: self.store.pressure_factor(),
            catalyst_active: self.store.catalyst_active(),
            running: self.store.running(),
            equilibrium_reached: self.detector.at_equilibrium(),
            box_size: self.store.box_size(),
            counts: self.store.counts(),
            particles: self.store.particles().to_vec(),
        }
    }
}
