//! Temperature and catalyst dependence of the reaction.
//!
//! The forward reaction is exothermic: heating speeds everything up but
//! shifts the balance towards the reactants. The catalyst multiplies both
//! directions by the same factor, so it changes how fast the balance is
//! reached but not where it lies.

use crate::config::{KineticsConfig, KELVIN_OFFSET};

/// Per-frame reaction probabilities and particle speed scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rates {
    /// Chance that an eligible `2 A + B` triple reacts this frame.
    pub forward_probability: f32,
    /// Chance that an eligible `C + C` pair reacts this frame.
    pub reverse_probability: f32,
    /// Multiplier applied to every particle velocity.
    pub speed_factor: f32,
}

impl Rates {
    /// Compute rates for a temperature in degrees Celsius.
    pub fn compute(temperature_c: f32, catalyst_active: bool, config: &KineticsConfig) -> Self {
        let t_ratio = (temperature_c + KELVIN_OFFSET).max(0.0)
            / (config.reference_temperature_c + KELVIN_OFFSET);

        let speed_factor = t_ratio.sqrt();
        let rate_factor = t_ratio.max(config.min_rate_factor);
        let equilibrium_shift = (-config.shift_strength * (t_ratio - 1.0)).exp();
        let catalyst = if catalyst_active {
            config.catalyst_factor
        } else {
            1.0
        };

        let base = config.base_probability * catalyst * rate_factor;
        Self {
            forward_probability: (base * equilibrium_shift).clamp(0.0, 1.0),
            reverse_probability: (base / equilibrium_shift).clamp(0.0, 1.0),
            speed_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_temperature() {
        let config = KineticsConfig::default();
        let rates = Rates::compute(config.reference_temperature_c, false, &config);
        assert_relative_eq!(rates.speed_factor, 1.0);
        assert_relative_eq!(rates.forward_probability, 0.04);
        assert_relative_eq!(rates.reverse_probability, 0.04);
    }

    #[test]
    fn test_heating_favors_reverse() {
        let config = KineticsConfig::default();
        let cold = Rates::compute(300.0, false, &config);
        let hot = Rates::compute(650.0, false, &config);

        assert!(hot.speed_factor > cold.speed_factor);
        assert!(hot.reverse_probability > hot.forward_probability);
        assert!(cold.forward_probability > cold.reverse_probability);
    }

    #[test]
    fn test_catalyst_scales_both_directions_equally() {
        let config = KineticsConfig::default();
        for t in [400.0, 450.0, 480.0] {
            let off = Rates::compute(t, false, &config);
            let on = Rates::compute(t, true, &config);
            let fwd_ratio = on.forward_probability / off.forward_probability;
            let rev_ratio = on.reverse_probability / off.reverse_probability;
            assert_relative_eq!(fwd_ratio, rev_ratio, max_relative = 1e-5);
            assert_relative_eq!(fwd_ratio, config.catalyst_factor, max_relative = 1e-5);
            assert_eq!(on.speed_factor, off.speed_factor);
        }
    }

    #[test]
    fn test_catalyst_ratio_breaks_once_reverse_saturates() {
        // With the default tuning the boosted reverse probability reaches 1
        // somewhere between 545 and 550 C. Each direction is clamped on its
        // own, so above that the catalyst no longer scales both equally.
        let config = KineticsConfig::default();

        let below = Rates::compute(530.0, true, &config);
        assert!(below.reverse_probability < 1.0);

        for t in [600.0, 700.0] {
            let off = Rates::compute(t, false, &config);
            let on = Rates::compute(t, true, &config);
            assert_eq!(on.reverse_probability, 1.0);
            assert_relative_eq!(
                on.forward_probability / off.forward_probability,
                config.catalyst_factor,
                max_relative = 1e-5
            );
            assert!(on.reverse_probability / off.reverse_probability < config.catalyst_factor);
        }

        let top = Rates::compute(700.0, false, &config);
        assert_relative_eq!(1.0 / top.reverse_probability, 2.33, max_relative = 0.01);
    }

    #[test]
    fn test_probabilities_clamped() {
        let config = KineticsConfig {
            base_probability: 5.0,
            ..KineticsConfig::default()
        };
        let rates = Rates::compute(700.0, true, &config);
        assert_eq!(rates.reverse_probability, 1.0);
        assert!((0.0..=1.0).contains(&rates.forward_probability));
    }

    #[test]
    fn test_rate_factor_floor() {
        // Near absolute zero the rate factor is held at the floor, so the
        // reverse probability cannot reach zero.
        let config = KineticsConfig::default();
        let rates = Rates::compute(-270.0, false, &config);
        assert!(rates.reverse_probability > 0.0);
    }
}
