//! Environment builder trait and construction errors
use super::Environment;
use crate::Prng;
use rand::SeedableRng;
use thiserror::Error;

/// Build an [`Environment`].
///
/// # Design Discussion
/// Environment is an associated type rather than a generic parameter to facilitate
/// reproducibility: a given environment configuration can construct exactly one environment type.
pub trait BuildEnv {
    /// Type of environment to build
    type Environment: Environment;

    /// Build an environment instance.
    ///
    /// # Args
    /// * `rng` - Random number generator for randomness in the environment structure.
    ///     The seed of the environment's own dynamics is also drawn from `rng`.
    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError>;

    /// Build an environment instance from a seed.
    ///
    /// The same seed produces the same environment structure and the same step outcomes.
    fn build_env_from_seed(&self, seed: u64) -> Result<Self::Environment, BuildEnvError> {
        self.build_env(&mut Prng::seed_from_u64(seed))
    }
}

/// Invalid environment configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildEnvError {
    #[error("a bandit must have at least one arm")]
    Empty,
    #[error(
        "payout probabilities ({probabilities}) and rewards ({rewards}) must be the same length"
    )]
    LengthMismatch { probabilities: usize, rewards: usize },
    #[error("arm {arm}: payout probability {value} is not in [0, 1]")]
    InvalidProbability { arm: usize, value: f64 },
    #[error("arm {arm}: reward standard deviation {value} must be greater than 0")]
    InvalidStdDev { arm: usize, value: f64 },
    #[error("arm {arm}: reward value {value} must be finite")]
    NonFiniteReward { arm: usize, value: f64 },
}
