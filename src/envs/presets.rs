//! Bandit environment presets.
//!
//! Each preset is a configuration that generates arm parameters by a fixed rule and builds a
//! [`BanditEnv`]. Randomized presets sample their parameters once, when the environment is
//! built; every step of that environment then shares the same hidden parameters.
use super::{BanditConfig, BanditEnv, BuildEnv, BuildEnvError, EnvInfo, RewardSpec};
use crate::Prng;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

const OPTIMAL_ARM: &str = "optimal_arm";

fn optimal_arm_info(arm: usize) -> EnvInfo {
    let mut info = EnvInfo::new();
    info.insert(
        OPTIMAL_ARM.into(),
        i64::try_from(arm).unwrap_or(i64::MAX).into(),
    );
    info
}

/// Fixed-parameter presets.
///
/// All arms pay a reward of 1.
/// The info map records the (0-based) index of the arm with the highest payout probability.
impl BanditConfig {
    /// One arm always pays out and the other never does.
    pub fn two_armed_deterministic_fixed() -> Self {
        Self::new(vec![1.0, 0.0], [1.0, 1.0], optimal_arm_info(0))
    }

    /// A large difference between the payout probabilities of the two arms.
    pub fn two_armed_high_low_fixed() -> Self {
        Self::new(vec![0.8, 0.2], [1.0, 1.0], optimal_arm_info(0))
    }

    /// A small difference between the payout probabilities of two likely arms.
    ///
    /// Bandit B of Figure 2.3 in Sutton & Barto's "Reinforcement Learning: An Introduction".
    pub fn two_armed_high_high_fixed() -> Self {
        Self::new(vec![0.8, 0.9], [1.0, 1.0], optimal_arm_info(1))
    }

    /// A small difference between the payout probabilities of two unlikely arms.
    ///
    /// Bandit A of Figure 2.3 in Sutton & Barto's "Reinforcement Learning: An Introduction".
    pub fn two_armed_low_low_fixed() -> Self {
        Self::new(vec![0.1, 0.2], [1.0, 1.0], optimal_arm_info(1))
    }
}

/// Bandit with independent uniformly random payout probabilities and/or rewards.
///
/// * If `random_probabilities`, each `p_i ~ U[0, 1)`, otherwise every arm always pays out.
/// * If `random_rewards`, each arm pays a constant reward `r_i ~ U[0, 1)`, otherwise 1.
///
/// Probabilities are sampled before rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniformBanditConfig {
    pub num_arms: usize,
    pub random_probabilities: bool,
    pub random_rewards: bool,
}

impl UniformBanditConfig {
    /// Two arms with independent probabilities `p_1, p_2 ~ U[0, 1]` paying a reward of 1.
    ///
    /// The "bandits with independent arms" experiment of [Wang et al. (2016)][wang2016].
    ///
    /// [wang2016]: https://arxiv.org/abs/1611.05763
    pub const fn two_armed_independent_uniform() -> Self {
        Self {
            num_arms: 2,
            random_probabilities: true,
            random_rewards: false,
        }
    }

    /// Ten arms with random payout probabilities that always reward 1.
    pub const fn ten_armed_random_fixed() -> Self {
        Self {
            num_arms: 10,
            random_probabilities: true,
            random_rewards: false,
        }
    }

    /// Ten arms that always pay out a reward chosen uniformly at random per arm.
    pub const fn ten_armed_uniform_distributed_reward() -> Self {
        Self {
            num_arms: 10,
            random_probabilities: false,
            random_rewards: true,
        }
    }

    /// Ten arms with random payout probabilities and random rewards.
    pub const fn ten_armed_random_random() -> Self {
        Self {
            num_arms: 10,
            random_probabilities: true,
            random_rewards: true,
        }
    }
}

impl Default for UniformBanditConfig {
    fn default() -> Self {
        Self::ten_armed_random_fixed()
    }
}

impl BuildEnv for UniformBanditConfig {
    type Environment = BanditEnv;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        let payout_probabilities: Vec<f64> = if self.random_probabilities {
            (0..self.num_arms).map(|_| rng.gen()).collect()
        } else {
            vec![1.0; self.num_arms]
        };
        let rewards = if self.random_rewards {
            (0..self.num_arms)
                .map(|_| RewardSpec::Constant(rng.gen()))
                .collect()
        } else {
            vec![RewardSpec::Constant(1.0); self.num_arms]
        };
        BanditEnv::new(payout_probabilities, rewards, EnvInfo::new(), rng.gen())
    }
}

/// Ten-armed Gaussian testbed from page 30 of Sutton & Barto's
/// "Reinforcement Learning: An Introduction".
///
/// Every arm always pays out. Each arm has a true mean reward `q_i ~ N(0, 1)` sampled when the
/// environment is built, and each payout is sampled from `N(q_i, reward_std_dev^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianBanditConfig {
    pub num_arms: usize,
    pub reward_std_dev: f64,
}

impl Default for GaussianBanditConfig {
    fn default() -> Self {
        Self {
            num_arms: 10,
            reward_std_dev: 1.0,
        }
    }
}

impl BuildEnv for GaussianBanditConfig {
    type Environment = BanditEnv;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        let std_dev = self.reward_std_dev;
        let rewards = (0..self.num_arms)
            .map(|_| RewardSpec::Gaussian {
                mean: rng.sample(StandardNormal),
                std_dev,
            })
            .collect();
        BanditEnv::new(
            vec![1.0; self.num_arms],
            rewards,
            EnvInfo::new(),
            rng.gen(),
        )
    }
}

/// Two arms paying 1 with dependent probabilities `p ~ U[0, 1]` and `1 - p`.
///
/// The info map records the sampled `p` under `"parameter"`.
///
/// The "bandits with dependent arms (I)" experiment of [Wang et al. (2016)][wang2016].
///
/// [wang2016]: https://arxiv.org/abs/1611.05763
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependentUniformBanditConfig;

impl BuildEnv for DependentUniformBanditConfig {
    type Environment = BanditEnv;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        let p: f64 = rng.gen();
        let mut info = EnvInfo::new();
        info.insert("parameter".into(), p.into());
        BanditEnv::new(
            vec![p, 1.0 - p],
            vec![RewardSpec::Constant(1.0); 2],
            info,
            rng.gen(),
        )
    }
}

/// Two arms paying 1 with probabilities `p` and `1 - p` where `p` is either `low` or `1 - low`
/// with equal chance.
///
/// The info map records the index of the arm with the higher probability under
/// `"optimal_arm"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DependentBanditConfig {
    pub low: f64,
}

impl DependentBanditConfig {
    /// `p` in `{0.1, 0.9}`
    pub const fn easy() -> Self {
        Self { low: 0.1 }
    }

    /// `p` in `{0.25, 0.75}`
    pub const fn medium() -> Self {
        Self { low: 0.25 }
    }

    /// `p` in `{0.4, 0.6}`
    pub const fn hard() -> Self {
        Self { low: 0.4 }
    }
}

impl Default for DependentBanditConfig {
    fn default() -> Self {
        Self::medium()
    }
}

impl BuildEnv for DependentBanditConfig {
    type Environment = BanditEnv;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        let p = if rng.gen() { self.low } else { 1.0 - self.low };
        let optimal_arm = if p < 0.5 { 1 } else { 0 };
        BanditEnv::new(
            vec![p, 1.0 - p],
            vec![RewardSpec::Constant(1.0); 2],
            optimal_arm_info(optimal_arm),
            rng.gen(),
        )
    }
}

/// How the [`IndexedBanditConfig`] bonus arm encodes the target index.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexEncoding {
    /// Bonus reward `0.1 * (index + 1)`, ranging over `0.1 ..= 1.0`.
    #[default]
    OneBased,
    /// Bonus reward `0.1 * index`, ranging over `0.0 ..= 0.9`.
    ///
    /// Cannot distinguish a target at index 0 from a bonus arm paying nothing.
    ZeroBased,
}

impl IndexEncoding {
    fn bonus_reward(self, index: usize) -> f64 {
        let position = match self {
            Self::OneBased => index + 1,
            Self::ZeroBased => index,
        };
        // position <= 10
        0.1 * position as f64
    }
}

/// Eleven-armed bandit where one arm reveals the location of the best one.
///
/// A target index `i` is sampled uniformly from `0..10`.
/// Arm `i` pays 5, the other nine of the first ten arms pay 1.1,
/// and arm 10 pays a reward that encodes `i` (see [`IndexEncoding`]).
/// Every arm always pays out.
/// The info map records `10 * i` under `"optimal_arm"`.
///
/// The "bandits with dependent arms (II)" experiment of [Wang et al. (2016)][wang2016].
///
/// [wang2016]: https://arxiv.org/abs/1611.05763
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexedBanditConfig {
    pub encoding: IndexEncoding,
}

impl IndexedBanditConfig {
    pub const NUM_TARGETS: usize = 10;
    pub const TARGET_REWARD: f64 = 5.0;
    pub const OTHER_REWARD: f64 = 1.1;
}

impl BuildEnv for IndexedBanditConfig {
    type Environment = BanditEnv;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        let index = rng.gen_range(0..Self::NUM_TARGETS);
        let mut rewards = vec![RewardSpec::Constant(Self::OTHER_REWARD); Self::NUM_TARGETS + 1];
        rewards[index] = RewardSpec::Constant(Self::TARGET_REWARD);
        rewards[Self::NUM_TARGETS] = RewardSpec::Constant(self.encoding.bonus_reward(index));
        BanditEnv::new(
            vec![1.0; Self::NUM_TARGETS + 1],
            rewards,
            optimal_arm_info(10 * index),
            rng.gen(),
        )
    }
}
