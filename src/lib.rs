//! # contact-sim - Contact Process particle simulation
//!
//! A toy stochastic reaction-diffusion model of the reversible reaction
//! `2 SO2 + O2 <=> 2 SO3` used in sulfuric acid manufacture.
//!
//! Point particles fly around a cubic box. When two SO2 and one O2 come close
//! together they may combine into two SO3; two SO3 that meet may split back.
//! Temperature, pressure, and a catalyst change how fast that happens and
//! where the balance settles, and a heuristic detector reports when the
//! particle counts have stopped drifting.
//!
//! The model is qualitative. It is meant for teaching, not for kinetics.
//!
//! ## Quick Start
//!
//! ```ignore
//! use contact_sim::prelude::*;
//!
//! let mut sim = Simulation::new(SimConfig::default());
//! sim.set_temperature(400.0);
//! sim.set_catalyst(true);
//! sim.set_running(true);
//!
//! loop {
//!     if let Some(report) = sim.advance(1.0 / 60.0) {
//!         if report.equilibrium {
//!             println!("settled at {}", report.counts);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! ## Frame Pipeline
//!
//! Each [`Simulation::advance`] call runs, in order:
//!
//! 1. [`Rates::compute`] - probabilities and speed from temperature and catalyst
//! 2. [`motion::integrate`] - move particles, bounce off the walls
//! 3. [`reaction::react`] - find reacting groups against a snapshot
//! 4. [`ParticleStore::apply`] - commit the reaction patch in one update
//! 5. [`EquilibriumDetector::observe`] - record counts, update the verdict
//!
//! ## Parameters
//!
//! | Setter | Effect |
//! |--------|--------|
//! | [`Simulation::set_temperature`] | faster particles, balance shifts to SO2 + O2 when hot |
//! | [`Simulation::set_pressure_factor`] | smaller box, positions rescaled, detection restarts |
//! | [`Simulation::set_catalyst`] | both directions faster by the same factor |
//! | [`Simulation::set_initial_amount`] | amounts for the next reset; live while paused |
//! | [`Simulation::set_running`] | start/pause, detection restarts |
//! | [`Simulation::reset`] | respawn the initial amounts, paused |

pub mod config;
pub mod equilibrium;
pub mod error;
pub mod kinetics;
pub mod motion;
pub mod particle;
pub mod reaction;
mod simulation;
pub mod spawn;
pub mod store;
pub mod time;

pub use bytemuck;
pub use config::SimConfig;
pub use equilibrium::{EquilibriumDetector, KindStats};
pub use error::{Error, Result};
pub use glam::Vec3;
pub use kinetics::Rates;
pub use particle::{Particle, ParticleInstance, ParticleKind, TypeCounts};
pub use reaction::{ReactionPatch, Spawn};
pub use simulation::{FrameReport, Simulation, Snapshot};
pub use store::ParticleStore;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use contact_sim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::kinetics::Rates;
    pub use crate::particle::{Particle, ParticleInstance, ParticleKind, TypeCounts};
    pub use crate::simulation::{FrameReport, Simulation, Snapshot};
    pub use crate::time::Time;
    pub use crate::Vec3;
}
