use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Seed for a loader pass: the shuffle order and every sample's
/// augmentation draw derive from it.
///
/// In config files it is a plain integer, or `null`/absent for a fresh seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum ShuffleSeed {
    /// Drawn from the thread RNG at the start of every pass, so training
    /// epochs see a new order each time.
    #[default]
    Default,
    /// Every pass replays the same order and augmentations.
    Custom(u64),
}

impl ShuffleSeed {
    /// The generator for one pass over a loader.
    pub fn pass_rng(&self) -> StdRng {
        match self {
            ShuffleSeed::Default => StdRng::seed_from_u64(rand::rng().random::<u64>()),
            ShuffleSeed::Custom(seed) => StdRng::seed_from_u64(*seed),
        }
    }
}

impl From<Option<u64>> for ShuffleSeed {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(ShuffleSeed::Default, ShuffleSeed::Custom)
    }
}

impl From<ShuffleSeed> for Option<u64> {
    fn from(seed: ShuffleSeed) -> Self {
        match seed {
            ShuffleSeed::Default => None,
            ShuffleSeed::Custom(seed) => Some(seed),
        }
    }
}
