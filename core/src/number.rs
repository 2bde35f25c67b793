//! Floating-point-safe numeric helpers: fix, clip, scale, round.
//!
//! Every helper works on the shortest round-trip decimal rendering of an
//! `f64` (the same text a JavaScript engine prints) and trims representable
//! noise such as `0.30000000000000004`. The tolerance is a run of
//! `repeat` identical `9`s or `0`s in the fractional digits.
//!
//! A genuine value whose fractional digits contain such a run, for example
//! `1.0000001`, is also collapsed (to `1`). That is the tolerance, not a bug.

/// Default run length treated as floating-point noise.
pub const DEFAULT_REPEAT: usize = 6;

/// Remove floating-point noise using the default tolerance.
///
/// ```
/// use seedroll_core::number::fix;
/// assert_eq!(fix(0.1 + 0.2), 0.3);
/// assert_eq!(fix(0.3 - 0.1), 0.2);
/// ```
pub fn fix(value: f64) -> f64 {
    fix_with_repeat(value, DEFAULT_REPEAT)
}

/// Remove floating-point noise: find the leftmost run of at least `repeat`
/// identical `9`s or `0`s in the fractional digits and round to the place
/// just before it.
///
/// Zero, non-finite values, whole numbers and values rendered in exponent
/// notation (below 1e-6 or at/above 1e21) pass through unchanged.
pub fn fix_with_repeat(value: f64, repeat: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let repr = decimal_repr(value);
    if repr.contains('e') {
        return value;
    }
    let Some((_, decimals)) = repr.split_once('.') else {
        return value;
    };
    let Some(keep) = first_noise_run(decimals.as_bytes(), repeat) else {
        return value;
    };
    format!("{value:.keep$}").parse().unwrap_or(value)
}

/// Clamp `value` to `[min, max]`, then [`fix`] it.
pub fn clip(value: f64, range: [f64; 2]) -> f64 {
    if value.is_nan() {
        return value;
    }
    fix(value.max(range[0]).min(range[1]))
}

/// Rescale `value` from `from` to `to`.
///
/// Done as four corrected steps (shift, multiply, divide, shift) so drift
/// from one step never leaks into the next.
///
/// ```
/// use seedroll_core::number::scale;
/// assert_eq!(scale(5.0, [0.0, 10.0], [0.0, 100.0]), 50.0);
/// assert_eq!(scale(3.75, [0.0, 10.0], [0.0, 1.0]), 0.375);
/// ```
pub fn scale(value: f64, from: [f64; 2], to: [f64; 2]) -> f64 {
    let from_span = from[1] - from[0];
    let to_span = to[1] - to[0];
    let x = fix(value - from[0]);
    let y = fix(x * to_span);
    let z = fix(y / from_span);
    fix(z + to[0])
}

/// Round to `places` decimal places, halves toward +infinity.
///
/// The shift is done on the decimal text (`1.005e2` is exactly `100.5`), so
/// values like `1.005` round the way they read rather than the way they are
/// stored in binary.
///
/// ```
/// use seedroll_core::number::round;
/// assert_eq!(round(3.14159, 2), 3.14);
/// assert_eq!(round(1.005, 2), 1.01);
/// ```
pub fn round(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = places as i32;
    let shifted: f64 = shift_exponent(&decimal_repr(value), places)
        .parse()
        .unwrap_or(value);
    let rounded = round_half_up(shifted);
    let restored: f64 = shift_exponent(&format!("{rounded}"), -places)
        .parse()
        .unwrap_or(rounded);
    fix(restored)
}

/// Shortest round-trip text for `value`, switching to exponent notation in
/// the same ranges a JavaScript engine does.
fn decimal_repr(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

/// Index of the first run of `repeat` or more identical `9`/`0` digits.
fn first_noise_run(digits: &[u8], repeat: usize) -> Option<usize> {
    if repeat == 0 {
        return Some(0);
    }
    let mut run_start = 0;
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && *digit != digits[i - 1] {
            run_start = i;
        }
        if (*digit == b'9' || *digit == b'0') && i + 1 - run_start >= repeat {
            return Some(run_start);
        }
    }
    None
}

fn shift_exponent(repr: &str, places: i32) -> String {
    match repr.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            format!("{mantissa}e{}", exp + places)
        }
        None => format!("{repr}e{places}"),
    }
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// A value that remembers which range it currently lives in.
///
/// Chaining mirrors the way die rolls are built: a uniform draw starts in
/// `[0, 1]`, is scaled into `[1, sides]`, then rounded.
///
/// ```
/// use seedroll_core::number::RangedNumber;
/// let mut n = RangedNumber::new(0.5);
/// n.scale_to(0.0, 10.0).round(0);
/// assert_eq!(n.value(), 5.0);
/// assert_eq!(n.range(), [0.0, 10.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedNumber {
    value: f64,
    range: [f64; 2],
}

impl RangedNumber {
    /// Wrap a value in the unit range.
    pub fn new(value: f64) -> Self {
        Self::with_range(value, [0.0, 1.0])
    }

    pub fn with_range(value: f64, range: [f64; 2]) -> Self {
        Self { value, range }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Rescale from the current range into `[min, max]` and adopt it.
    pub fn scale_to(&mut self, min: f64, max: f64) -> &mut Self {
        self.value = scale(self.value, self.range, [min, max]);
        self.range = [min, max];
        self
    }

    pub fn clip(&mut self, min: f64, max: f64) -> &mut Self {
        self.value = clip(self.value, [min, max]);
        self
    }

    pub fn round(&mut self, places: u32) -> &mut Self {
        self.value = round(self.value, places);
        self
    }
}

impl From<RangedNumber> for f64 {
    fn from(n: RangedNumber) -> Self {
        n.value
    }
}
