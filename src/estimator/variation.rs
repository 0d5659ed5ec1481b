//! Random perturbation sources
//!
//! The estimator applies one multiplicative draw per prediction. Production
//! uses a normal distribution around 1.0; tests inject fixed or scripted
//! sequences.

use crate::config::EstimatorConfig;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Mean of every production perturbation
pub const VARIATION_MEAN: f64 = 1.0;

/// Supplies the multiplicative perturbation for one prediction
#[cfg_attr(test, mockall::automock)]
pub trait VariationSource {
    fn draw(&mut self) -> f64;
}

/// Normally distributed perturbation around 1.0
#[derive(Debug, Clone)]
pub struct NormalVariation<R = StdRng> {
    normal: Normal<f64>,
    rng: R,
}

impl NormalVariation<StdRng> {
    /// Seeded from OS entropy
    pub fn new(std_dev: f64) -> Result<Self> {
        Self::with_rng(std_dev, StdRng::from_os_rng())
    }

    /// Reproducible sequence of draws
    pub fn seeded(std_dev: f64, seed: u64) -> Result<Self> {
        Self::with_rng(std_dev, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &EstimatorConfig) -> Result<Self> {
        match config.seed {
            Some(seed) => {
                tracing::info!(seed, "using seeded revenue variation");
                Self::seeded(config.variation_std_dev, seed)
            }
            None => Self::new(config.variation_std_dev),
        }
    }
}

impl<R: Rng> NormalVariation<R> {
    /// σ must be finite and non-negative; zero yields a constant 1.0
    pub fn with_rng(std_dev: f64, rng: R) -> Result<Self> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(Error::Distribution(format!("std_dev {} must be finite and non-negative", std_dev)));
        }
        let normal = Normal::new(VARIATION_MEAN, std_dev)
            .map_err(|e| Error::Distribution(format!("std_dev {}: {}", std_dev, e)))?;
        Ok(Self { normal, rng })
    }

    pub fn std_dev(&self) -> f64 {
        self.normal.std_dev()
    }
}

impl<R: Rng> VariationSource for NormalVariation<R> {
    fn draw(&mut self) -> f64 {
        self.normal.sample(&mut self.rng)
    }
}

/// Always returns the same value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedVariation(pub f64);

impl FixedVariation {
    /// No perturbation at all
    pub fn neutral() -> Self {
        Self(VARIATION_MEAN)
    }
}

impl VariationSource for FixedVariation {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of draws
#[derive(Debug, Clone)]
pub struct ScriptedVariation {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedVariation {
    pub fn new(draws: Vec<f64>) -> Result<Self> {
        if draws.is_empty() {
            return Err(Error::Distribution("scripted variation needs at least one draw".to_string()));
        }
        Ok(Self { draws, next: 0 })
    }

    /// Number of draws taken so far
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl VariationSource for ScriptedVariation {
    fn draw(&mut self) -> f64 {
        let value = self.draws[self.next % self.draws.len()];
        self.next += 1;
        value
    }
}

impl<V: VariationSource + ?Sized> VariationSource for Box<V> {
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}
