//! Simulation configuration.
//!
//! Every tuning constant of the model lives in [`SimConfig`]. The defaults
//! reproduce the reference tuning; any subset can be overridden from JSON,
//! missing fields fall back to their defaults.
//!
//! ```ignore
//! let config = SimConfig::load("contact.json")?;
//! let mut sim = Simulation::try_new(config)?;
//! ```

use crate::error::{Error, Result};
use crate::particle::TypeCounts;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Temperature, in degrees Celsius, at which the model is calibrated.
pub const REFERENCE_TEMPERATURE_C: f32 = 450.0;

/// Offset between Celsius and Kelvin.
pub const KELVIN_OFFSET: f32 = 273.15;

/// Box side length at a pressure factor of 1.
pub const BASE_BOX_SIZE: f32 = 10.0;

/// Reaction rate constants and their temperature dependence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KineticsConfig {
    /// Temperature (Celsius) where speed and rate factors equal 1.
    pub reference_temperature_c: f32,
    /// Chance that an eligible group reacts, before any scaling.
    pub base_probability: f32,
    /// Multiplier applied to both directions while the catalyst is active.
    pub catalyst_factor: f32,
    /// Lower clamp for the temperature rate factor.
    pub min_rate_factor: f32,
    /// How strongly temperature pushes the balance towards the reactants.
    pub shift_strength: f32,
}

impl Default for KineticsConfig {
    fn default() -> Self {
        Self {
            reference_temperature_c: REFERENCE_TEMPERATURE_C,
            base_probability: 0.04,
            catalyst_factor: 10.0,
            min_rate_factor: 0.1,
            shift_strength: 6.0,
        }
    }
}

/// Particle integration settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Collision radius against the box walls.
    pub particle_radius: f32,
    /// Upper bound for a single frame's delta time, in seconds.
    pub max_delta: f32,
    /// Velocities are expressed per frame at this frame rate.
    pub frame_rate_normalization: f32,
    /// Fraction of the normal velocity kept after a wall bounce.
    pub restitution: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            particle_radius: 0.15,
            max_delta: 1.0 / 20.0,
            frame_rate_normalization: 60.0,
            restitution: 0.95,
        }
    }
}

/// Proximity thresholds and product placement for reactions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReactionConfig {
    /// Maximum distance between members of a forward triple.
    pub forward_distance: f32,
    /// Maximum distance between two products for the reverse reaction.
    pub reverse_distance: f32,
    /// Per-axis spread of spawned particles around the reaction centre.
    pub spawn_offset_scale: f32,
    /// Velocity scale of spawned particles.
    pub velocity_kick_scale: f32,
}

impl ReactionConfig {
    #[inline]
    pub fn forward_distance_sq(&self) -> f32 {
        self.forward_distance * self.forward_distance
    }

    #[inline]
    pub fn reverse_distance_sq(&self) -> f32 {
        self.reverse_distance * self.reverse_distance
    }
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            forward_distance: 0.8,
            reverse_distance: 0.6,
            spawn_offset_scale: 0.3,
            velocity_kick_scale: 0.25,
        }
    }
}

/// Equilibrium heuristic settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EquilibriumConfig {
    /// Running frames that must pass before counts are recorded.
    pub min_warmup_frames: u64,
    /// Number of most recent history entries evaluated.
    pub window: usize,
    /// Maximum number of history entries kept.
    pub history_capacity: usize,
    /// Relative dispersion (stddev / mean) above which a kind may fluctuate.
    pub relative_threshold: f64,
    /// Absolute standard deviation above which a kind may fluctuate.
    pub absolute_threshold: f64,
}

impl Default for EquilibriumConfig {
    fn default() -> Self {
        Self {
            min_warmup_frames: 250,
            window: 300,
            history_capacity: 300,
            relative_threshold: 0.25,
            absolute_threshold: 15.0,
        }
    }
}

/// Placement of particles created outside of reactions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    /// Box side length at a pressure factor of 1.
    pub base_box_size: f32,
    /// Fraction of the box (per axis) used for random placement.
    pub fill_fraction: f32,
    /// Velocity scale of particles created by a reset.
    pub initial_velocity_scale: f32,
    /// Velocity scale of particles added while paused.
    pub paused_velocity_scale: f32,
    /// Minimum speed, as a fraction of the velocity scale.
    pub min_speed_fraction: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            base_box_size: BASE_BOX_SIZE,
            fill_fraction: 0.9,
            initial_velocity_scale: 0.1,
            paused_velocity_scale: 0.01,
            min_speed_fraction: 0.1,
        }
    }
}

/// Input ranges enforced by the parameter setters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    pub min_temperature_c: f32,
    pub max_temperature_c: f32,
    /// Smallest accepted pressure factor.
    pub pressure_floor: f32,
    /// Largest accepted initial amount per particle kind.
    pub max_initial_amount: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_temperature_c: 200.0,
            max_temperature_c: 700.0,
            pressure_floor: 0.1,
            max_initial_amount: 200,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub name: String,
    /// Particles of each kind created by a reset.
    pub initial: TypeCounts,
    pub temperature_c: f32,
    pub pressure_factor: f32,
    pub catalyst: bool,
    pub kinetics: KineticsConfig,
    pub motion: MotionConfig,
    pub reaction: ReactionConfig,
    pub equilibrium: EquilibriumConfig,
    pub spawn: SpawnConfig,
    pub limits: LimitsConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            name: "Contact Process".into(),
            initial: TypeCounts {
                reactant_a: 50,
                reactant_b: 25,
                product: 10,
            },
            temperature_c: REFERENCE_TEMPERATURE_C,
            pressure_factor: 1.0,
            catalyst: false,
            kinetics: KineticsConfig::default(),
            motion: MotionConfig::default(),
            reaction: ReactionConfig::default(),
            equilibrium: EquilibriumConfig::default(),
            spawn: SpawnConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

fn require(ok: bool, msg: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidConfig(msg.to_string()))
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

impl SimConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tuning values the simulation cannot work with.
    ///
    /// Runtime parameters (temperature, pressure, initial amounts) are not
    /// checked here; the setters clamp them.
    pub fn validate(&self) -> Result<()> {
        let k = &self.kinetics;
        require(
            (k.reference_temperature_c + KELVIN_OFFSET).is_finite()
                && k.reference_temperature_c + KELVIN_OFFSET > 0.0,
            "kinetics.reference_temperature_c must be above absolute zero",
        )?;
        require(
            k.base_probability.is_finite() && k.base_probability >= 0.0,
            "kinetics.base_probability must be >= 0",
        )?;
        require(positive(k.catalyst_factor), "kinetics.catalyst_factor must be > 0")?;
        require(positive(k.min_rate_factor), "kinetics.min_rate_factor must be > 0")?;
        require(
            k.shift_strength.is_finite() && k.shift_strength >= 0.0,
            "kinetics.shift_strength must be >= 0",
        )?;

        let m = &self.motion;
        require(
            m.particle_radius.is_finite() && m.particle_radius >= 0.0,
            "motion.particle_radius must be >= 0",
        )?;
        require(positive(m.max_delta), "motion.max_delta must be > 0")?;
        require(
            positive(m.frame_rate_normalization),
            "motion.frame_rate_normalization must be > 0",
        )?;
        require(
            (0.0..=1.0).contains(&m.restitution),
            "motion.restitution must be within [0, 1]",
        )?;

        let r = &self.reaction;
        require(positive(r.forward_distance), "reaction.forward_distance must be > 0")?;
        require(positive(r.reverse_distance), "reaction.reverse_distance must be > 0")?;
        require(
            r.spawn_offset_scale.is_finite() && r.spawn_offset_scale >= 0.0,
            "reaction.spawn_offset_scale must be >= 0",
        )?;
        require(positive(r.velocity_kick_scale), "reaction.velocity_kick_scale must be > 0")?;

        let e = &self.equilibrium;
        require(e.window > 0, "equilibrium.window must be > 0")?;
        require(
            e.history_capacity >= e.window,
            "equilibrium.history_capacity must be >= equilibrium.window",
        )?;
        require(
            e.relative_threshold.is_finite() && e.relative_threshold >= 0.0,
            "equilibrium.relative_threshold must be >= 0",
        )?;
        require(
            e.absolute_threshold.is_finite() && e.absolute_threshold >= 0.0,
            "equilibrium.absolute_threshold must be >= 0",
        )?;

        let s = &self.spawn;
        require(positive(s.base_box_size), "spawn.base_box_size must be > 0")?;
        require(
            s.fill_fraction > 0.0 && s.fill_fraction <= 1.0,
            "spawn.fill_fraction must be within (0, 1]",
        )?;
        require(
            positive(s.initial_velocity_scale),
            "spawn.initial_velocity_scale must be > 0",
        )?;
        require(
            positive(s.paused_velocity_scale),
            "spawn.paused_velocity_scale must be > 0",
        )?;
        require(
            s.min_speed_fraction.is_finite() && (0.0..0.5).contains(&s.min_speed_fraction),
            "spawn.min_speed_fraction must be within [0, 0.5)",
        )?;

        let l = &self.limits;
        require(
            l.min_temperature_c.is_finite()
                && l.max_temperature_c.is_finite()
                && l.min_temperature_c <= l.max_temperature_c
                && l.min_temperature_c + KELVIN_OFFSET > 0.0,
            "limits temperature range must be ordered and above absolute zero",
        )?;
        require(positive(l.pressure_floor), "limits.pressure_floor must be > 0")?;
        Ok(())
    }

    /// Clamp a temperature to the configured range.
    pub fn clamp_temperature(&self, temperature_c: f32) -> f32 {
        if temperature_c.is_nan() {
            return self.limits.min_temperature_c;
        }
        temperature_c.clamp(self.limits.min_temperature_c, self.limits.max_temperature_c)
    }

    /// Floor a pressure factor at the configured minimum.
    pub fn clamp_pressure(&self, pressure_factor: f32) -> f32 {
        if pressure_factor.is_nan() {
            return self.limits.pressure_floor;
        }
        pressure_factor.max(self.limits.pressure_floor)
    }

    /// Box side length produced by a pressure factor.
    pub fn box_size_for(&self, pressure_factor: f32) -> f32 {
        self.spawn.base_box_size / self.clamp_pressure(pressure_factor)
    }
}
