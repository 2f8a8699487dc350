//! Multi-armed bandit environment
use super::{
    BuildEnv, BuildEnvError, EnvInfo, EnvStructure, Environment, InvalidActionError, Step,
};
use crate::logging::{Event, LogError, Loggable, StatsLogger};
use crate::spaces::IndexSpace;
use crate::{BanditsError, Prng};
use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reward paid by a bandit arm when it pays out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RewardSpec {
    /// A fixed reward value.
    Constant(f64),
    /// A reward sampled from a normal distribution on each payout.
    Gaussian { mean: f64, std_dev: f64 },
}

impl RewardSpec {
    /// Mean reward of a payout.
    pub const fn mean(&self) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Gaussian { mean, .. } => *mean,
        }
    }

    /// Minimum and maximum payout reward (inclusive).
    fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Constant(value) => (*value, *value),
            Self::Gaussian { .. } => (f64::NEG_INFINITY, f64::INFINITY),
        }
    }

    fn distribution(&self, arm: usize) -> Result<RewardDistribution, BuildEnvError> {
        match *self {
            Self::Constant(value) if value.is_finite() => Ok(RewardDistribution::Constant(value)),
            Self::Constant(value) => Err(BuildEnvError::NonFiniteReward { arm, value }),
            Self::Gaussian { mean, .. } if !mean.is_finite() => {
                Err(BuildEnvError::NonFiniteReward { arm, value: mean })
            }
            // Written to also reject NaN
            Self::Gaussian { std_dev, .. } if !(std_dev > 0.0 && std_dev.is_finite()) => {
                Err(BuildEnvError::InvalidStdDev {
                    arm,
                    value: std_dev,
                })
            }
            Self::Gaussian { mean, std_dev } => Normal::new(mean, std_dev)
                .map(RewardDistribution::Gaussian)
                .map_err(|_| BuildEnvError::InvalidStdDev {
                    arm,
                    value: std_dev,
                }),
        }
    }
}

impl From<f64> for RewardSpec {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl fmt::Display for RewardSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{}", value),
            Self::Gaussian { mean, std_dev } => write!(f, "N({}, {})", mean, std_dev),
        }
    }
}

#[derive(Debug, Clone)]
enum RewardDistribution {
    Constant(f64),
    Gaussian(Normal<f64>),
}

impl Distribution<f64> for RewardDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Gaussian(normal) => normal.sample(rng),
        }
    }
}

/// Configuration of a [`BanditEnv`] with explicit arm parameters.
///
/// This is the format of custom bandit configuration files:
/// ```json
/// {
///     "payout_probabilities": [0.5, 1.0],
///     "rewards": [1.0, {"mean": 0.0, "std_dev": 1.0}],
///     "info": {"optimal_arm": 0}
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanditConfig {
    /// Probability that each arm pays out.
    pub payout_probabilities: Vec<f64>,
    /// Reward of each arm when it pays out.
    pub rewards: Vec<RewardSpec>,
    /// Metadata returned with each step.
    #[serde(default)]
    pub info: EnvInfo,
}

impl BanditConfig {
    pub fn new<R: Into<RewardSpec>>(
        payout_probabilities: Vec<f64>,
        rewards: impl IntoIterator<Item = R>,
        info: EnvInfo,
    ) -> Self {
        Self {
            payout_probabilities,
            rewards: rewards.into_iter().map(Into::into).collect(),
            info,
        }
    }
}

impl BuildEnv for BanditConfig {
    type Environment = BanditEnv;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        BanditEnv::new(
            self.payout_probabilities.clone(),
            self.rewards.clone(),
            self.info.clone(),
            rng.gen(),
        )
    }
}

/// A multi-armed bandit.
///
/// Each arm `i` pays out with probability `payout_probabilities[i]`.
/// A payout yields a reward sampled from `rewards[i]`, otherwise the reward is 0.
/// Every episode is a single step and the observation is always `0`.
///
/// The arm parameters are fixed at construction.
/// Only the internal random number generator changes as the environment is stepped.
#[derive(Debug, Clone)]
pub struct BanditEnv {
    payout_probabilities: Vec<f64>,
    rewards: Vec<RewardSpec>,
    reward_distributions: Vec<RewardDistribution>,
    info: EnvInfo,
    rng: Prng,
}

impl BanditEnv {
    /// Create a new bandit environment.
    ///
    /// # Args
    /// * `payout_probabilities` - Probability that each arm pays out. Must be in `[0, 1]`.
    /// * `rewards` - Reward of each arm when it pays out.
    ///     Must be the same length as `payout_probabilities`.
    /// * `info` - Metadata returned with each step.
    /// * `seed` - Seed for sampling step outcomes.
    ///
    /// # Errors
    /// If the arm parameters are invalid.
    pub fn new(
        payout_probabilities: Vec<f64>,
        rewards: Vec<RewardSpec>,
        info: EnvInfo,
        seed: u64,
    ) -> Result<Self, BuildEnvError> {
        if payout_probabilities.len() != rewards.len() {
            return Err(BuildEnvError::LengthMismatch {
                probabilities: payout_probabilities.len(),
                rewards: rewards.len(),
            });
        }
        if payout_probabilities.is_empty() {
            return Err(BuildEnvError::Empty);
        }
        if let Some((arm, &value)) = payout_probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(BuildEnvError::InvalidProbability { arm, value });
        }
        let reward_distributions = rewards
            .iter()
            .enumerate()
            .map(|(arm, spec)| spec.distribution(arm))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            payout_probabilities,
            rewards,
            reward_distributions,
            info,
            rng: Prng::seed_from_u64(seed),
        })
    }

    /// Number of arms.
    pub fn num_arms(&self) -> usize {
        self.payout_probabilities.len()
    }

    /// Probability that each arm pays out.
    pub fn payout_probabilities(&self) -> &[f64] {
        &self.payout_probabilities
    }

    /// Reward of each arm when it pays out.
    pub fn reward_specs(&self) -> &[RewardSpec] {
        &self.rewards
    }

    /// Environment metadata.
    pub const fn info(&self) -> &EnvInfo {
        &self.info
    }

    /// Expected reward of each arm.
    pub fn expected_rewards(&self) -> impl Iterator<Item = f64> + '_ {
        self.payout_probabilities
            .iter()
            .zip(&self.rewards)
            .map(|(p, r)| p * r.mean())
    }

    /// The arm with the greatest expected reward. The lowest index wins ties.
    pub fn optimal_arm(&self) -> usize {
        let mut best = (0, f64::NEG_INFINITY);
        for (arm, value) in self.expected_rewards().enumerate() {
            if value > best.1 {
                best = (arm, value);
            }
        }
        best.0
    }

    /// Take a step and log the chosen arm and whether it paid out.
    ///
    /// # Errors
    /// If `action` is not a valid arm or the logger rejects a value.
    /// The step has been taken when a logging error is returned.
    pub fn step_logged(
        &mut self,
        action: usize,
        logger: &mut dyn StatsLogger,
    ) -> Result<Step<'_, usize>, BanditsError> {
        let (reward, paid_out) = self.pull(action)?;
        log_pull(logger, action, self.num_arms(), paid_out)?;
        Ok(self.outcome(reward))
    }

    /// Sample an arm pull.
    ///
    /// # Returns
    /// The reward and whether the arm paid out.
    fn pull(&mut self, action: usize) -> Result<(f64, bool), InvalidActionError> {
        let num_arms = self.num_arms();
        let (p, reward_distribution) = match (
            self.payout_probabilities.get(action),
            self.reward_distributions.get(action),
        ) {
            (Some(p), Some(r)) => (*p, r),
            _ => return Err(InvalidActionError { action, num_arms }),
        };
        if self.rng.gen::<f64>() < p {
            Ok((reward_distribution.sample(&mut self.rng), true))
        } else {
            Ok((0.0, false))
        }
    }

    const fn outcome(&self, reward: f64) -> Step<'_, usize> {
        Step {
            observation: 0,
            reward,
            episode_done: true,
            info: &self.info,
        }
    }
}

fn log_pull(
    logger: &mut dyn StatsLogger,
    arm: usize,
    num_arms: usize,
    paid_out: bool,
) -> Result<(), LogError> {
    logger.log(
        Event::Step,
        "arm",
        Loggable::IndexSample {
            value: arm,
            size: num_arms,
        },
    )?;
    logger.log(Event::Step, "payout", f64::from(u8::from(paid_out)).into())
}

impl fmt::Display for BanditEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BanditEnv(")?;
        for (i, (p, r)) in self
            .payout_probabilities
            .iter()
            .zip(&self.rewards)
            .enumerate()
        {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}@{}", r, p)?;
        }
        write!(f, ")")
    }
}

impl EnvStructure for BanditEnv {
    type ObservationSpace = IndexSpace;
    type ActionSpace = IndexSpace;

    fn observation_space(&self) -> Self::ObservationSpace {
        IndexSpace::new(1)
    }

    fn action_space(&self) -> Self::ActionSpace {
        IndexSpace::new(self.num_arms())
    }

    fn reward_range(&self) -> (f64, f64) {
        let mut range = (f64::INFINITY, f64::NEG_INFINITY);
        let mut include = |(low, high): (f64, f64)| {
            range.0 = range.0.min(low);
            range.1 = range.1.max(high);
        };
        for (p, r) in self.payout_probabilities.iter().zip(&self.rewards) {
            if *p < 1.0 {
                include((0.0, 0.0));
            }
            if *p > 0.0 {
                include(r.bounds());
            }
        }
        range
    }

    fn discount_factor(&self) -> f64 {
        1.0
    }
}

impl Environment for BanditEnv {
    fn reset(&mut self) -> usize {
        0
    }

    fn step(&mut self, action: &usize) -> Result<Step<'_, usize>, InvalidActionError> {
        let (reward, _) = self.pull(*action)?;
        Ok(self.outcome(reward))
    }

    fn seed(&mut self, seed: Option<u64>) -> u64 {
        let seed = seed.unwrap_or_else(rand::random);
        self.rng = Prng::seed_from_u64(seed);
        seed
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use super::*;
    use crate::logging::CLILogger;
    use rstest::rstest;
    use std::time::Duration;

    fn constant_bandit(payout_probabilities: Vec<f64>, rewards: Vec<f64>) -> BanditEnv {
        BanditEnv::new(
            payout_probabilities,
            rewards.into_iter().map(RewardSpec::Constant).collect(),
            EnvInfo::new(),
            0,
        )
        .unwrap()
    }

    #[rstest]
    #[case(vec![0.5], vec![])]
    #[case(vec![0.5, 0.5], vec![1.0])]
    #[case(vec![], vec![1.0, 1.0, 1.0])]
    fn length_mismatch(#[case] probabilities: Vec<f64>, #[case] rewards: Vec<f64>) {
        let rewards = rewards.into_iter().map(RewardSpec::Constant).collect();
        assert!(matches!(
            BanditEnv::new(probabilities, rewards, EnvInfo::new(), 0),
            Err(BuildEnvError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn empty() {
        assert_eq!(
            BanditEnv::new(vec![], vec![], EnvInfo::new(), 0).unwrap_err(),
            BuildEnvError::Empty
        );
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.1)]
    #[case(-f64::INFINITY)]
    #[case(f64::NAN)]
    fn invalid_probability(#[case] p: f64) {
        let result = BanditEnv::new(
            vec![0.5, p],
            vec![1.0.into(), 1.0.into()],
            EnvInfo::new(),
            0,
        );
        assert!(matches!(
            result,
            Err(BuildEnvError::InvalidProbability { arm: 1, .. })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn invalid_std_dev(#[case] std_dev: f64) {
        let result = BanditEnv::new(
            vec![1.0, 1.0],
            vec![
                RewardSpec::Constant(1.0),
                RewardSpec::Gaussian { mean: 0.0, std_dev },
            ],
            EnvInfo::new(),
            0,
        );
        assert!(matches!(
            result,
            Err(BuildEnvError::InvalidStdDev { arm: 1, .. })
        ));
    }

    #[test]
    fn non_finite_reward() {
        let result = BanditEnv::new(
            vec![1.0],
            vec![RewardSpec::Constant(f64::INFINITY)],
            EnvInfo::new(),
            0,
        );
        assert!(matches!(
            result,
            Err(BuildEnvError::NonFiniteReward { arm: 0, .. })
        ));
    }

    #[test]
    fn boundary_probabilities_valid() {
        let env = constant_bandit(vec![0.0, 1.0], vec![1.0, 1.0]);
        assert_eq!(env.num_arms(), 2);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(10)]
    fn invalid_action(#[case] num_arms: usize) {
        let mut env = constant_bandit(vec![1.0; num_arms], vec![1.0; num_arms]);
        assert_eq!(
            env.step(&num_arms).unwrap_err(),
            InvalidActionError {
                action: num_arms,
                num_arms
            }
        );
        assert!(env.step(&usize::MAX).is_err());
    }

    #[test]
    fn invalid_action_consumes_no_randomness() {
        let mut env1 = constant_bandit(vec![0.5; 2], vec![1.0; 2]);
        let mut env2 = env1.clone();
        assert!(env1.step(&2).is_err());
        for _ in 0..100 {
            assert_eq!(env1.step(&0).unwrap().reward, env2.step(&0).unwrap().reward);
        }
    }

    #[test]
    fn deterministic_payouts() {
        let mut env = constant_bandit(vec![1.0, 0.0], vec![1.0, 1.0]);
        for _ in 0..100 {
            assert_eq!(env.step(&0).unwrap().reward, 1.0);
            assert_eq!(env.step(&1).unwrap().reward, 0.0);
        }
    }

    #[test]
    fn step_is_single_step_episode() {
        let mut info = EnvInfo::new();
        info.insert("optimal_arm".into(), 0.into());
        let mut env = BanditEnv::new(vec![0.5], vec![2.0.into()], info.clone(), 0).unwrap();
        for _ in 0..10 {
            let step = env.step(&0).unwrap();
            assert_eq!(step.observation, 0);
            assert!(step.episode_done);
            assert_eq!(step.info, &info);
            assert!(step.reward == 0.0 || step.reward == 2.0);
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut env = constant_bandit(vec![0.5], vec![1.0]);
        let mut other = env.clone();
        for _ in 0..5 {
            assert_eq!(env.reset(), 0);
        }
        // Reset consumes no randomness
        assert_eq!(env.step(&0).unwrap().reward, other.step(&0).unwrap().reward);
    }

    #[test]
    fn gaussian_reward_mean() {
        let mut env = BanditEnv::new(
            vec![1.0],
            vec![RewardSpec::Gaussian {
                mean: 2.0,
                std_dev: 1.0,
            }],
            EnvInfo::new(),
            3,
        )
        .unwrap();
        let num_samples = 10_000;
        let mean = (0..num_samples)
            .map(|_| env.step(&0).unwrap().reward)
            .sum::<f64>()
            / f64::from(num_samples);
        // Standard error is 0.01
        assert!((mean - 2.0).abs() < 0.05, "mean = {}", mean);
    }

    #[test]
    fn payout_frequency() {
        let mut env = constant_bandit(vec![0.3], vec![1.0]);
        let num_samples = 10_000;
        let payouts = (0..num_samples)
            .filter(|_| env.step(&0).unwrap().reward > 0.0)
            .count();
        let frequency = payouts as f64 / f64::from(num_samples);
        // Standard error is about 0.0046
        assert!((frequency - 0.3).abs() < 0.025, "frequency = {}", frequency);
    }

    #[test]
    fn seed_reproduces_stream() {
        let mut env = constant_bandit(vec![0.5; 3], vec![1.0; 3]);
        let used = env.seed(None);
        let first: Vec<f64> = (0..50).map(|i| env.step(&(i % 3)).unwrap().reward).collect();
        assert_eq!(env.seed(Some(used)), used);
        let second: Vec<f64> = (0..50).map(|i| env.step(&(i % 3)).unwrap().reward).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn reward_range_tight() {
        let env = constant_bandit(vec![1.0, 1.0], vec![1.1, 5.0]);
        assert_eq!(env.reward_range(), (1.1, 5.0));

        let env = constant_bandit(vec![0.5, 0.0], vec![2.0, 7.0]);
        assert_eq!(env.reward_range(), (0.0, 2.0));

        let env = BanditEnv::new(
            vec![1.0],
            vec![RewardSpec::Gaussian {
                mean: 0.0,
                std_dev: 1.0,
            }],
            EnvInfo::new(),
            0,
        )
        .unwrap();
        assert_eq!(env.reward_range(), (f64::NEG_INFINITY, f64::INFINITY));
    }

    #[test]
    fn optimal_arm() {
        let env = constant_bandit(vec![0.8, 0.9], vec![1.0, 1.0]);
        assert_eq!(env.optimal_arm(), 1);
        let env = constant_bandit(vec![0.5, 1.0, 0.25], vec![2.0, 1.0, 4.0]);
        // Tie between all arms
        assert_eq!(env.optimal_arm(), 0);
    }

    #[test]
    fn step_logged_matches_step() {
        let mut env = constant_bandit(vec![0.5; 2], vec![1.0; 2]);
        let mut other = env.clone();
        let mut logger = CLILogger::new(Duration::from_secs(3600));
        for i in 0..20 {
            let logged = env.step_logged(i % 2, &mut logger).unwrap().reward;
            logger.done(Event::Step);
            assert_eq!(logged, other.step(&(i % 2)).unwrap().reward);
        }
        let summary = logger.take_summary();
        assert!(summary.contains("arm"));
        assert!(summary.contains("payout"));
    }

    #[test]
    fn step_logged_errors() {
        let mut env = constant_bandit(vec![1.0; 2], vec![1.0; 2]);
        let mut logger = CLILogger::new(Duration::from_secs(3600));
        assert_eq!(
            env.step_logged(2, &mut logger).map(|step| step.reward),
            Err(BanditsError::InvalidAction(InvalidActionError {
                action: 2,
                num_arms: 2
            }))
        );

        logger.log(Event::Step, "arm", "left".into()).unwrap();
        logger.done(Event::Step);
        assert!(matches!(
            env.step_logged(0, &mut logger),
            Err(BanditsError::Log(_))
        ));
    }

    #[test]
    fn config_json() {
        let config: BanditConfig = serde_json::from_str(
            r#"{
                "payout_probabilities": [0.5, 1.0],
                "rewards": [1.0, {"mean": 0.0, "std_dev": 2.0}],
                "info": {"optimal_arm": 0}
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.rewards,
            vec![
                RewardSpec::Constant(1.0),
                RewardSpec::Gaussian {
                    mean: 0.0,
                    std_dev: 2.0
                }
            ]
        );
        let env = config.build_env_from_seed(0).unwrap();
        assert_eq!(env.num_arms(), 2);
        assert_eq!(env.info()["optimal_arm"].as_int(), Some(0));
    }

    #[test]
    fn config_invalid() {
        let config = BanditConfig::new(vec![0.5, 2.0], [1.0, 1.0], EnvInfo::new());
        assert!(config.build_env_from_seed(0).is_err());
    }

    #[test]
    fn run_gaussian() {
        let env = BanditEnv::new(
            vec![0.5, 1.0],
            vec![
                RewardSpec::Constant(1.0),
                RewardSpec::Gaussian {
                    mean: -1.0,
                    std_dev: 0.5,
                },
            ],
            EnvInfo::new(),
            0,
        )
        .unwrap();
        testing::check_env(env, 1000, 0);
    }

    #[test]
    fn display() {
        let env = constant_bandit(vec![1.0, 0.0], vec![1.0, 1.0]);
        assert_eq!(env.to_string(), "BanditEnv(1@1, 1@0)");
    }
}
