//! Heuristic equilibrium detection over recent particle counts.
//!
//! After a warm-up period, the per-kind counts of every processed frame are
//! pushed into a bounded history. Once the history holds a full window, each
//! kind's mean and population standard deviation over that window are
//! computed. A kind is *fluctuating* when its relative dispersion
//! (`stddev / mean`) and its absolute standard deviation both exceed their
//! thresholds. Small counts can be noisy in relative terms without ever
//! breaching the absolute threshold. The system is at equilibrium when no
//! kind fluctuates.

use crate::config::EquilibriumConfig;
use crate::particle::{ParticleKind, TypeCounts};
use std::collections::VecDeque;

/// Means below this are treated as zero and cannot destabilize the verdict.
const ZERO_MEAN: f64 = 1e-9;

/// Mean and population standard deviation of one kind over a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl KindStats {
    pub fn compute(samples: impl Iterator<Item = usize> + Clone) -> Self {
        let n = samples.clone().count();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0 };
        }
        let mean = samples.clone().map(|c| c as f64).sum::<f64>() / n as f64;
        let variance = samples
            .map(|c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Whether these statistics breach both fluctuation thresholds.
    pub fn is_fluctuating(&self, config: &EquilibriumConfig) -> bool {
        if self.mean.abs() < ZERO_MEAN {
            return false;
        }
        self.std_dev / self.mean > config.relative_threshold
            && self.std_dev > config.absolute_threshold
    }
}

/// Stability verdict over a slice of count snapshots.
pub fn is_stable<'a, I>(window: I, config: &EquilibriumConfig) -> bool
where
    I: Iterator<Item = &'a TypeCounts> + Clone,
{
    ParticleKind::ALL.iter().all(|&kind| {
        !KindStats::compute(window.clone().map(move |c| c.get(kind))).is_fluctuating(config)
    })
}

/// Tracks warm-up, the counts history, and the equilibrium flag.
#[derive(Clone, Debug)]
pub struct EquilibriumDetector {
    config: EquilibriumConfig,
    frames: u64,
    history: VecDeque<TypeCounts>,
    at_equilibrium: bool,
}

impl EquilibriumDetector {
    pub fn new(config: EquilibriumConfig) -> Self {
        let capacity = config.history_capacity.max(config.window);
        Self {
            history: VecDeque::with_capacity(capacity),
            config,
            frames: 0,
            at_equilibrium: false,
        }
    }

    /// Record one processed frame and return the updated verdict.
    pub fn observe(&mut self, counts: TypeCounts) -> bool {
        self.frames += 1;
        let was = self.at_equilibrium;

        self.at_equilibrium = if self.frames <= self.config.min_warmup_frames {
            false
        } else {
            self.push(counts);
            self.history.len() >= self.config.window && is_stable(self.window(), &self.config)
        };

        if self.at_equilibrium != was {
            log::info!(
                "equilibrium {} at frame {} ({})",
                if self.at_equilibrium { "reached" } else { "lost" },
                self.frames,
                counts
            );
        }
        self.at_equilibrium
    }

    fn push(&mut self, counts: TypeCounts) {
        self.history.push_back(counts);
        let capacity = self.config.history_capacity.max(self.config.window);
        while self.history.len() > capacity {
            self.history.pop_front();
        }
    }

    /// The most recent `window` entries (fewer if the history is short).
    pub fn window(&self) -> impl Iterator<Item = &TypeCounts> + Clone {
        let skip = self.history.len().saturating_sub(self.config.window);
        self.history.iter().skip(skip)
    }

    /// Per-kind statistics over the current window, in [`ParticleKind::ALL`] order.
    pub fn window_stats(&self) -> [KindStats; 3] {
        ParticleKind::ALL.map(|kind| KindStats::compute(self.window().map(move |c| c.get(kind))))
    }

    /// Forget everything: history, warm-up progress, and the verdict.
    pub fn clear(&mut self) {
        self.frames = 0;
        self.history.clear();
        self.at_equilibrium = false;
    }

    #[inline]
    pub fn at_equilibrium(&self) -> bool {
        self.at_equilibrium
    }

    /// Frames observed since the last clear.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn history(&self) -> &VecDeque<TypeCounts> {
        &self.history
    }

    #[inline]
    pub fn config(&self) -> &EquilibriumConfig {
        &self.config
    }
}
