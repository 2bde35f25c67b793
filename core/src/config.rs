use crate::{
    error::RollResult,
    gaussian::GaussianMode,
    history::DEFAULT_CAPACITY,
    seed::Seed,
};
use serde::{Deserialize, Serialize};

/// Construction settings for a [`RollManager`](crate::manager::RollManager).
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollConfig {
    /// `None` means "seed from the entropy chain". An unusable value is
    /// logged and treated as `None`.
    #[serde(deserialize_with = "crate::seed::deserialize_lenient")]
    pub seed: Option<Seed>,
    pub max_history: usize,
    /// When false, draws are returned but never recorded.
    pub record_history: bool,
    pub gaussian_mode: GaussianMode,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            seed:           None,
            max_history:    DEFAULT_CAPACITY,
            record_history: true,
            gaussian_mode:  GaussianMode::Strict,
        }
    }
}

impl RollConfig {
    pub fn from_json(json: &str) -> RollResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file on disk.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content).map_err(|e| anyhow::anyhow!("Invalid config {path}: {e}"))
    }

    /// Fixed-seed config for tests.
    pub fn default_test() -> Self {
        Self {
            seed: Some(Seed::Int(42)),
            ..Self::default()
        }
    }
}
