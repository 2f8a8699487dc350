//! Simulating bandit environments.
//!
//! There is no learning here: actions are chosen uniformly at random.
//! This is used to inspect an environment's empirical reward statistics.
use crate::envs::{BanditEnv, Environment, EnvStructure};
use crate::logging::{Event, StatsLogger};
use crate::spaces::{FiniteSpace, SampleSpace};
use crate::{BanditsError, Prng};
use std::fmt;

/// Summary statistics of simulation steps.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StepsSummary {
    pub num_steps: u64,
    pub num_episodes: u64,
    pub total_reward: f64,
    /// Number of times each arm was pulled.
    pub arm_pulls: Vec<u64>,
    /// Total reward received from each arm.
    pub arm_rewards: Vec<f64>,
}

impl StepsSummary {
    pub fn new(num_arms: usize) -> Self {
        Self {
            arm_pulls: vec![0; num_arms],
            arm_rewards: vec![0.0; num_arms],
            ..Self::default()
        }
    }

    pub fn update(&mut self, arm: usize, reward: f64, episode_done: bool) {
        self.num_steps += 1;
        self.total_reward += reward;
        if episode_done {
            self.num_episodes += 1;
        }
        if let (Some(pulls), Some(total)) =
            (self.arm_pulls.get_mut(arm), self.arm_rewards.get_mut(arm))
        {
            *pulls += 1;
            *total += reward;
        }
    }

    /// Mean reward per pull of each arm. `None` for arms that were never pulled.
    pub fn arm_mean_rewards(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.arm_pulls
            .iter()
            .zip(&self.arm_rewards)
            .map(|(n, r)| if *n == 0 { None } else { Some(r / *n as f64) })
    }
}

impl fmt::Display for StepsSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "num_steps: {}", self.num_steps)?;
        writeln!(f, "num_episodes: {}", self.num_episodes)?;
        writeln!(
            f,
            "step_reward_mean: {}",
            self.total_reward / self.num_steps as f64
        )?;
        writeln!(
            f,
            "ep_reward_mean:   {}",
            self.total_reward / self.num_episodes as f64
        )?;
        for (arm, mean) in self.arm_mean_rewards().enumerate() {
            match mean {
                Some(mean) => writeln!(
                    f,
                    "arm {:>2}: {} pulls, mean reward {:.4}",
                    arm, self.arm_pulls[arm], mean
                )?,
                None => writeln!(f, "arm {:>2}: never pulled", arm)?,
            }
        }
        Ok(())
    }
}

/// Run a bandit environment for a number of episodes with uniformly random actions.
///
/// # Args
/// * `env` - The environment to simulate.
/// * `num_episodes` - Number of episodes to run.
/// * `rng` - Random number generator for action selection.
/// * `logger` - Logs the chosen arm, payout and reward of each step,
///     and whether each episode pulled the optimal arm.
///
/// # Errors
/// If the environment rejects an action from its own action space
/// or the logger rejects a logged value.
pub fn run_random_actions(
    env: &mut BanditEnv,
    num_episodes: u64,
    rng: &mut Prng,
    logger: &mut dyn StatsLogger,
) -> Result<StepsSummary, BanditsError> {
    let action_space = env.action_space();
    let optimal_arm = env.optimal_arm();
    let mut summary = StepsSummary::new(action_space.size());
    let mut episodes = 0;
    while episodes < num_episodes {
        env.reset();
        let action = random_index(&action_space, rng);
        let step = env.step_logged(action, logger)?;
        let (reward, episode_done) = (step.reward, step.episode_done);

        logger.log(Event::Step, "reward", reward.into())?;
        logger.done(Event::Step);
        summary.update(action, reward, episode_done);
        if episode_done {
            logger.log(Event::Episode, "reward", reward.into())?;
            let pulled = if action == optimal_arm {
                "optimal"
            } else {
                "suboptimal"
            };
            logger.log(Event::Episode, "pulled", pulled.into())?;
            logger.done(Event::Episode);
            episodes += 1;
        }
    }
    Ok(summary)
}

/// Sample the index of a uniform random element of a finite space.
fn random_index<S: SampleSpace + FiniteSpace>(space: &S, rng: &mut Prng) -> usize {
    space.to_index(&space.sample(rng))
}
