//! Multi-armed bandit reinforcement learning environments.
//!
//! A [`BanditEnv`] has a fixed set of arms. Each step, the agent pulls one arm; the arm pays out
//! with some probability and, if it does, yields a constant or normally distributed reward.
//! Every episode is a single step.
//!
//! Named presets are listed in [`BanditPreset`].
#![warn(clippy::cast_lossless)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)] // also triggered by macro expansions
pub mod envs;
mod error;
pub mod logging;
pub mod simulation;
pub mod spaces;

pub use envs::{
    BanditConfig, BanditEnv, BanditPreset, BuildEnv, BuildEnvError, EnvStructure, Environment,
    InvalidActionError, RewardSpec,
};
pub use error::BanditsError;
pub use simulation::{run_random_actions, StepsSummary};

/// Pseudo-random number generator used by environments.
pub type Prng = rand_chacha::ChaCha8Rng;
