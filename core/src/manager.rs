//! The roll manager: one generator, one history, one config.
//!
//! RULES:
//!   - Every draw is recorded in history unless recording is disabled.
//!   - Re-seeding always clears history.
//!   - State is private; callers only see accessor methods.

use crate::{
    config::RollConfig,
    error::{RollError, RollResult},
    gaussian::{GaussianMode, GaussianTransform},
    history::HistoryBuffer,
    number::RangedNumber,
    rng::UniformGenerator,
    seed::{Seed, MAX_SAFE_INTEGER},
    stats,
};

/// Seeded random number manager: MT19937 uniform draws, skewable gaussian
/// draws, n-sided dice, a bounded history and statistics over it.
///
/// # Concurrency
///
/// Draws mutate the generator, so they take `&mut self`. Use one manager
/// per thread, or wrap a shared one in a `Mutex`.
///
/// ```
/// use seedroll_core::RollManager;
///
/// let mut roller = RollManager::with_seed(42u64);
/// let value = roller.uniform();
/// assert!((0.0..1.0).contains(&value));
/// assert_eq!(roller.history(), vec![value]);
/// ```
#[derive(Debug, Clone)]
pub struct RollManager {
    uniform:        UniformGenerator,
    history:        HistoryBuffer,
    gaussian:       GaussianTransform,
    record_history: bool,
}

impl RollManager {
    /// Seed from `seed`, or from the entropy chain when `None`.
    pub fn new(seed: Option<Seed>) -> Self {
        Self::from_config(&RollConfig {
            seed,
            ..RollConfig::default()
        })
    }

    pub fn with_seed(seed: impl Into<Seed>) -> Self {
        Self::new(Some(seed.into()))
    }

    /// Crypto-seeded manager. Not reproducible.
    pub fn from_entropy() -> Self {
        Self::new(None)
    }

    pub fn from_config(config: &RollConfig) -> Self {
        Self {
            uniform:        UniformGenerator::new(config.seed.clone()),
            history:        HistoryBuffer::with_capacity(config.max_history),
            gaussian:       GaussianTransform::new(config.gaussian_mode),
            record_history: config.record_history,
        }
    }

    // ── Seed ──────────────────────────────────────

    /// The seed currently in effect.
    pub fn seed(&self) -> &Seed {
        self.uniform.seed()
    }

    /// Clear history and re-seed. Returns the seed actually applied, which
    /// is a fresh crypto seed when `seed` is invalid.
    pub fn set_seed(&mut self, seed: impl Into<Seed>) -> &Seed {
        self.reseed(Some(seed.into()))
    }

    /// Like [`set_seed`](Self::set_seed); `None` reseeds from the entropy
    /// chain.
    pub fn reseed(&mut self, seed: Option<Seed>) -> &Seed {
        self.clear_history();
        let applied = self.uniform.reseed(seed);
        log::debug!("Re-seeded with {applied}");
        applied
    }

    // ── History ───────────────────────────────────

    /// Independent copy of the recorded values, oldest first.
    pub fn history(&self) -> Vec<f64> {
        self.history.snapshot()
    }

    pub fn max_history(&self) -> usize {
        self.history.capacity()
    }

    /// Change the history capacity, trimming the oldest overflow now.
    pub fn set_max_history(&mut self, size: usize) -> usize {
        self.history.set_capacity(size);
        self.history.capacity()
    }

    /// Empty the history, keeping its capacity.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn records_history(&self) -> bool {
        self.record_history
    }

    pub fn gaussian_mode(&self) -> GaussianMode {
        self.gaussian.mode()
    }

    fn record(&mut self, value: f64) {
        if self.record_history {
            self.history.push(value);
        }
    }

    // ── Draws ─────────────────────────────────────

    /// 53-bit uniform real in [0, 1).
    pub fn uniform(&mut self) -> f64 {
        let value = self.uniform.random();
        self.record(value);
        value
    }

    /// Alias for [`uniform`](Self::uniform).
    pub fn random(&mut self) -> f64 {
        self.uniform()
    }

    /// Gaussian real in [0, 1] centred on 0.5.
    ///
    /// `skew` in [-1, 1]: negative skews right, positive skews left.
    pub fn gaussian(&mut self, skew: f64) -> RollResult<f64> {
        let value = self.gaussian.sample(&mut self.uniform, skew)?;
        self.record(value);
        Ok(value)
    }

    /// Roll an n-sided die: a uniform draw scaled into `[1, sides]` and
    /// rounded to the nearest whole number. Fractional `sides` are
    /// truncated.
    ///
    /// Non-finite `sides`, fewer than one side, or more than
    /// [`MAX_SAFE_INTEGER`] sides is logged and returned as
    /// [`RollError::InvalidSides`]; nothing is drawn or recorded.
    pub fn d(&mut self, sides: f64) -> RollResult<u64> {
        if !(1.0..=MAX_SAFE_INTEGER as f64).contains(&sides) {
            let err = RollError::InvalidSides { sides };
            log::error!("{err}");
            return Err(err);
        }
        let mut roll = RangedNumber::new(self.uniform.random());
        roll.scale_to(1.0, sides.trunc()).round(0);
        let value = roll.value();
        self.record(value);
        Ok(value as u64)
    }

    /// Pick one of `items` with a `d(len)` roll. `None` when empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let roll = self.d(items.len() as f64).ok()?;
        items.get(roll as usize - 1)
    }

    // ── Statistics ────────────────────────────────
    // Each works on `sample` when given, otherwise on the history.

    fn over<T>(
        &self,
        sample: Option<&[f64]>,
        f: impl FnOnce(&[f64]) -> RollResult<T>,
    ) -> RollResult<T> {
        match sample {
            Some(values) => f(values),
            None => f(&self.history.snapshot()),
        }
    }

    pub fn mean(&self, sample: Option<&[f64]>) -> RollResult<f64> {
        self.over(sample, stats::mean)
    }

    pub fn median(&self, sample: Option<&[f64]>) -> RollResult<f64> {
        self.over(sample, stats::median)
    }

    pub fn modes(&self, sample: Option<&[f64]>) -> RollResult<Vec<f64>> {
        self.over(sample, stats::modes)
    }

    /// Spread normalized into [0, 1]; see [`stats::std_dev`]. This is a
    /// display indicator, not the raw standard deviation.
    pub fn standard_deviation(&self, sample: Option<&[f64]>) -> RollResult<f64> {
        self.over(sample, stats::std_dev)
    }
}

impl Default for RollManager {
    fn default() -> Self { Self::from_entropy() }
}
