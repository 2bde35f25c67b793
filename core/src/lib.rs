//! seedroll: seeded random number management.
//!
//! MT19937 uniform draws with scalar, array and crypto seeding; Box-Muller
//! gaussian draws with skew; n-sided dice; a bounded draw history;
//! elementary statistics; and floating-point-safe scale/clip/round helpers.
//! Everything is composed behind [`RollManager`].
//!
//! RULE: for a given seed every draw sequence is reproducible, with one
//! documented exception: [`GaussianMode::Legacy`].

pub mod config;
pub mod entropy;
pub mod error;
pub mod gaussian;
pub mod history;
pub mod manager;
pub mod number;
pub mod rng;
pub mod seed;
pub mod stats;

pub use config::RollConfig;
pub use entropy::create_random_seed;
pub use error::{RollError, RollResult};
pub use gaussian::{GaussianMode, GaussianTransform};
pub use history::HistoryBuffer;
pub use manager::RollManager;
pub use number::{clip, fix, round, scale, RangedNumber};
pub use rng::{UniformGenerator, UniformSource};
pub use seed::{Seed, MAX_SAFE_INTEGER};

/// One-off uniform draw from a throwaway crypto-seeded manager.
/// Not reproducible across calls.
pub fn random() -> f64 {
    RollManager::from_entropy().random()
}

/// One-off die roll from a throwaway crypto-seeded manager.
/// Not reproducible across calls.
pub fn d(sides: f64) -> RollResult<u64> {
    RollManager::from_entropy().d(sides)
}
