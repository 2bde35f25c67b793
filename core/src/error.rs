use crate::seed::MAX_SAFE_INTEGER;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RollError {
    #[error("Seed integer {value} is unsafe (must be <= {MAX_SAFE_INTEGER})")]
    UnsafeSeedInteger { value: u64 },

    #[error("Seed array can not be empty")]
    EmptySeedArray,

    #[error("Seed array can not contain unsafe integers: element {index} is {value}")]
    UnsafeSeedElement { index: usize, value: u64 },

    #[error("Sides must be a number in [1, {MAX_SAFE_INTEGER}], got {sides}")]
    InvalidSides { sides: f64 },

    #[error("Skew must be a finite number, got {skew}")]
    InvalidSkew { skew: f64 },

    #[error("Statistics need at least one value")]
    EmptySample,

    #[error("Sample value at index {index} is not finite")]
    NonFiniteSample { index: usize },

    #[error("Standard deviation is normalized against the maximum, which must be > 0 (got {max})")]
    NonPositiveMaximum { max: f64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RollResult<T> = Result<T, RollError>;
