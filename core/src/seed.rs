//! Seed values accepted by the generator.
//!
//! A seed is either one non-negative safe integer or a non-empty sequence
//! of them. In JSON it is written as a bare integer or an array.

use crate::error::{RollError, RollResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Largest integer an IEEE-754 double holds exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Int(u64),
    Array(Vec<u64>),
}

impl Seed {
    /// Check the seed against the safe-integer rules without applying it.
    pub fn validate(&self) -> RollResult<()> {
        match self {
            Seed::Int(value) if *value > MAX_SAFE_INTEGER => {
                Err(RollError::UnsafeSeedInteger { value: *value })
            }
            Seed::Int(_) => Ok(()),
            Seed::Array(words) if words.is_empty() => Err(RollError::EmptySeedArray),
            Seed::Array(words) => match words.iter().position(|w| *w > MAX_SAFE_INTEGER) {
                Some(index) => Err(RollError::UnsafeSeedElement {
                    index,
                    value: words[index],
                }),
                None => Ok(()),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Deserialize an optional seed from a config file or a runner command.
///
/// Anything that is present but not a seed (negative, fractional, out of
/// range for `u64`, wrong type) is logged and read as `None`, which seeds
/// from the entropy chain. Only malformed JSON is an error.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<Seed>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match Seed::deserialize(&value) {
        Ok(seed) => Some(seed),
        Err(e) => {
            log::warn!("Seed {value} is not usable ({e}); generating a random seed array instead");
            None
        }
    }))
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed::Int(value)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Seed::Int(u64::from(value))
    }
}

impl From<Vec<u64>> for Seed {
    fn from(words: Vec<u64>) -> Self {
        Seed::Array(words)
    }
}

impl From<&[u64]> for Seed {
    fn from(words: &[u64]) -> Self {
        Seed::Array(words.to_vec())
    }
}

impl From<Vec<u32>> for Seed {
    fn from(words: Vec<u32>) -> Self {
        Seed::Array(words.into_iter().map(u64::from).collect())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Int(value) => write!(f, "{value}"),
            Seed::Array(words) => write!(f, "[{} words]", words.len()),
        }
    }
}
