//! Elementary statistics over a sample of reals.
//!
//! Every result is passed through [`fix`] so floating-point noise never
//! reaches a display.

use crate::{
    error::{RollError, RollResult},
    number::{clip, fix, scale},
};

fn check(sample: &[f64]) -> RollResult<()> {
    if sample.is_empty() {
        return Err(RollError::EmptySample);
    }
    match sample.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(RollError::NonFiniteSample { index }),
        None => Ok(()),
    }
}

fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut copy = sample.to_vec();
    copy.sort_by(f64::total_cmp);
    copy
}

pub fn mean(sample: &[f64]) -> RollResult<f64> {
    check(sample)?;
    let sum: f64 = sample.iter().sum();
    Ok(fix(sum / sample.len() as f64))
}

/// Middle value, or the average of the two middle values. Works on a
/// sorted copy; `sample` is left untouched.
pub fn median(sample: &[f64]) -> RollResult<f64> {
    check(sample)?;
    let sorted = sorted(sample);
    let n = sorted.len();
    Ok(fix((sorted[(n - 1) / 2] + sorted[n / 2]) / 2.0))
}

/// Every value tied for the highest frequency, distinct and ascending.
pub fn modes(sample: &[f64]) -> RollResult<Vec<f64>> {
    check(sample)?;
    let sorted = sorted(sample);

    let mut runs: Vec<(f64, usize)> = Vec::new();
    for value in sorted {
        match runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => runs.push((value, 1)),
        }
    }
    let max = runs.iter().map(|(_, count)| *count).max().unwrap_or(0);

    let mut modes: Vec<f64> = runs
        .into_iter()
        .filter(|(_, count)| *count == max)
        .map(|(value, _)| fix(value))
        .collect();
    modes.dedup();
    Ok(modes)
}

/// Spread of `sample`, normalized into [0, 1] against its maximum.
///
/// NOTE: this is NOT the raw standard deviation. The population standard
/// deviation is computed and then rescaled with
/// `scale(sd, [0, max(sample)], [0, 1])`, giving a unitless spread
/// indicator suitable for sliders and gauges. The result is clipped to
/// [0, 1], so a mixed-sign sample whose spread exceeds its maximum reads as
/// full scale. Samples whose maximum is not positive are rejected.
pub fn std_dev(sample: &[f64]) -> RollResult<f64> {
    let avg = mean(sample)?;
    let squared: Vec<f64> = sample
        .iter()
        .map(|value| {
            let diff = fix(value - avg);
            fix(diff * diff)
        })
        .collect();
    let root = fix(mean(&squared)?.sqrt());

    let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        return Err(RollError::NonPositiveMaximum { max });
    }
    Ok(clip(scale(root, [0.0, max], [0.0, 1.0]), [0.0, 1.0]))
}
