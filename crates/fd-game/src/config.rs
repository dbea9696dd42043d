//! Configuration for a match.

use rand::SeedableRng;
use rand::rngs::StdRng;

use fd_core::CoreError;

use crate::error::GameResult;

/// Configuration for a match.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// Seed for the computer's dice pick. `None` seeds from the OS.
    ///
    /// Only the non-cryptographic pick is affected; fair draws always use
    /// the secure source.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Set the seed for the computer's dice pick.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the generator used for the computer's dice pick.
    pub fn picker(&self) -> GameResult<StdRng> {
        match self.seed {
            Some(seed) => Ok(StdRng::seed_from_u64(seed)),
            None => StdRng::try_from_os_rng()
                .map_err(|e| CoreError::Entropy(e.to_string()).into()),
        }
    }
}
