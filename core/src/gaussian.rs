//! Box-Muller gaussian draws, rescaled into [0, 1] and optionally skewed.
//!
//! A standard normal sample `z` is mapped with `z / 10 + 0.5`, which covers
//! about five standard deviations either side. `log`, `cos` and `pow` come
//! from `libm` rather than the platform math library, so seeded gaussian
//! streams are bit-identical on every target. Samples that still land
//! outside [0, 1] are redrawn. Where the redraw comes from is the
//! [`GaussianMode`]:
//!
//! - `Strict` redraws from the caller's own generator. The output stays a
//!   pure function of the seed.
//! - `Legacy` redraws from a brand-new crypto-seeded generator. Draws that
//!   hit this path (about 6 in 10 million) are NOT reproducible from the
//!   seed. Kept for callers that depend on the old stream.

use crate::{
    error::{RollError, RollResult},
    number::RangedNumber,
    rng::{UniformGenerator, UniformSource},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaussianMode {
    /// Out-of-range redraws use an independently seeded generator.
    Legacy,
    /// Out-of-range redraws use the caller's generator.
    #[default]
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GaussianTransform {
    mode: GaussianMode,
}

impl GaussianTransform {
    pub fn new(mode: GaussianMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> GaussianMode {
        self.mode
    }

    /// Draw one skewed sample in [0, 1].
    ///
    /// `skew` is in [-1, 1]: negative skews right, positive skews left,
    /// zero leaves the bell centred on 0.5.
    pub fn sample<S: UniformSource>(&self, source: &mut S, skew: f64) -> RollResult<f64> {
        let exponent = skew_exponent(skew)?;
        let mut value = rescaled_normal(source);
        while !(0.0..=1.0).contains(&value) {
            value = match self.mode {
                GaussianMode::Strict => {
                    log::debug!("Gaussian draw {value} outside [0,1]; redrawing");
                    rescaled_normal(source)
                }
                GaussianMode::Legacy => {
                    log::warn!(
                        "Gaussian draw {value} outside [0,1]; redrawing from an independently \
                         seeded generator, this draw is not reproducible from the seed"
                    );
                    rescaled_normal(&mut UniformGenerator::with_crypto())
                }
            };
        }
        Ok(libm::pow(value, exponent))
    }
}

/// Exponent applied to the rescaled sample for a given `skew`.
///
/// - `0` gives 1 (no skew).
/// - negative gives `1 - |skew|`, with `|skew|` clipped to [0, 1].
/// - positive is clipped to [0, 1] then scaled into [0, 4].
pub fn skew_exponent(skew: f64) -> RollResult<f64> {
    if !skew.is_finite() {
        return Err(RollError::InvalidSkew { skew });
    }
    let mut n = RangedNumber::new(skew.abs());
    n.clip(0.0, 1.0);
    let exponent = if skew == 0.0 {
        1.0
    } else if skew < 0.0 {
        1.0 - n.value()
    } else {
        n.scale_to(0.0, 4.0).value()
    };
    Ok(exponent)
}

/// One Box-Muller sample mapped by `z / 10 + 0.5`. May fall outside [0, 1].
pub fn rescaled_normal<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    let u = nonzero_uniform(source);
    let v = nonzero_uniform(source);
    let z = libm::sqrt(-2.0 * libm::log(u)) * libm::cos(2.0 * PI * v);
    z / 10.0 + 0.5
}

fn nonzero_uniform<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    loop {
        let u = source.next_uniform();
        if u != 0.0 {
            return u;
        }
    }
}
