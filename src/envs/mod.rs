//! Reinforcement learning environments
mod bandits;
mod builder;
mod catalog;
mod info;
mod presets;
#[cfg(test)]
pub mod testing;

pub use bandits::{BanditConfig, BanditEnv, RewardSpec};
pub use builder::{BuildEnv, BuildEnvError};
pub use catalog::{BanditPreset, EnvDef, UnknownPresetError};
pub use info::{EnvInfo, InfoValue};
pub use presets::{
    DependentBanditConfig, DependentUniformBanditConfig, GaussianBanditConfig, IndexEncoding,
    IndexedBanditConfig, UniformBanditConfig,
};

use crate::spaces::Space;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The external structure of a reinforcement learning environment.
pub trait EnvStructure {
    type ObservationSpace: Space;
    type ActionSpace: Space;

    /// Space containing all possible observations.
    ///
    /// This is not required to be tight:
    /// the space may contain elements that can never be produced as a state observation.
    fn observation_space(&self) -> Self::ObservationSpace;

    /// The space of all possible actions.
    ///
    /// Every element in this space must be a valid action.
    fn action_space(&self) -> Self::ActionSpace;

    /// A lower and upper bound on possible reward values.
    ///
    /// These bounds are not required to be tight but ideally will be as tight as possible.
    fn reward_range(&self) -> (f64, f64);

    /// A discount factor applied to future rewards.
    ///
    /// A value between `0` and `1`, inclusive.
    fn discount_factor(&self) -> f64;
}

/// A reinforcement learning environment with internal state.
///
/// Follows the reset / step / render / seed interaction contract expected by generic
/// agent-environment loops.
pub trait Environment: EnvStructure {
    /// Reset the environment to an initial state.
    ///
    /// # Returns
    /// An observation of the initial state.
    fn reset(&mut self) -> <Self::ObservationSpace as Space>::Element;

    /// Take a step in the environment.
    ///
    /// # Errors
    /// If `action` is not an element of the action space.
    /// The environment is left untouched in that case.
    fn step(
        &mut self,
        action: &<Self::ActionSpace as Space>::Element,
    ) -> Result<Step<'_, <Self::ObservationSpace as Space>::Element>, InvalidActionError>;

    /// Render the environment.
    ///
    /// Environments without a visual representation do nothing.
    fn render(&self, _mode: RenderMode) {}

    /// Reseed the environment's internal random number generator.
    ///
    /// # Args
    /// * `seed` - Seed to use. If `None`, a seed is drawn from operating system entropy.
    ///
    /// # Returns
    /// The seed actually used.
    fn seed(&mut self, seed: Option<u64>) -> u64;
}

impl<E: EnvStructure + ?Sized> EnvStructure for Box<E> {
    type ObservationSpace = E::ObservationSpace;
    type ActionSpace = E::ActionSpace;

    fn observation_space(&self) -> Self::ObservationSpace {
        E::observation_space(self)
    }
    fn action_space(&self) -> Self::ActionSpace {
        E::action_space(self)
    }
    fn reward_range(&self) -> (f64, f64) {
        E::reward_range(self)
    }
    fn discount_factor(&self) -> f64 {
        E::discount_factor(self)
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn reset(&mut self) -> <Self::ObservationSpace as Space>::Element {
        E::reset(self)
    }

    fn step(
        &mut self,
        action: &<Self::ActionSpace as Space>::Element,
    ) -> Result<Step<'_, <Self::ObservationSpace as Space>::Element>, InvalidActionError> {
        E::step(self, action)
    }

    fn render(&self, mode: RenderMode) {
        E::render(self, mode)
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        E::seed(self, seed)
    }
}

/// The outcome of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<'a, O> {
    /// Observation of the resulting state.
    pub observation: O,
    /// Reward for this transition.
    pub reward: f64,
    /// Whether this step ends the episode.
    pub episode_done: bool,
    /// Experiment metadata that agents are not supposed to see.
    pub info: &'a EnvInfo,
}

/// Rendering mode
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    /// Render for a human viewer.
    #[default]
    Human,
    /// Render to a text representation.
    Ansi,
}

/// An action outside of the environment's action space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("invalid action {action}; must be less than the number of arms ({num_arms})")]
pub struct InvalidActionError {
    pub action: usize,
    pub num_arms: usize,
}
