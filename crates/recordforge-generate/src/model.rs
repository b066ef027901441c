use serde::{Deserialize, Serialize};

/// Default number of consecutive duplicate draws a deduplicating list tolerates.
pub const DEFAULT_MAX_DUPLICATE_DRAWS: u32 = 1000;

/// Options for a record factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for the factory RNG; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Consecutive duplicate draws before a deduplicating list gives up.
    #[serde(default = "default_max_duplicate_draws")]
    pub max_duplicate_draws: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_duplicate_draws: DEFAULT_MAX_DUPLICATE_DRAWS,
        }
    }
}

impl GenerateOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

fn default_max_duplicate_draws() -> u32 {
    DEFAULT_MAX_DUPLICATE_DRAWS
}
