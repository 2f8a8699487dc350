//! Environment testing utilities
use super::Environment;
use crate::spaces::{IndexSpace, Space};
use crate::Prng;
use rand::distributions::Distribution;
use rand::SeedableRng;

/// Run an environment with uniform random actions and check that invariants are satisfied.
pub fn check_env<E>(mut env: E, num_steps: u64, seed: u64)
where
    E: Environment<ObservationSpace = IndexSpace, ActionSpace = IndexSpace>,
{
    let observation_space = env.observation_space();
    let action_space = env.action_space();
    let (min_reward, max_reward) = env.reward_range();
    let discount_factor = env.discount_factor();
    assert!(discount_factor >= 0.0);
    assert!(discount_factor <= 1.0);
    assert!(min_reward <= max_reward);

    let mut rng = Prng::seed_from_u64(seed);
    let mut observation = env.reset();
    for _ in 0..num_steps {
        assert!(observation_space.contains(&observation));
        let action = action_space.sample(&mut rng);
        let step = env.step(&action).unwrap();
        let (next_observation, reward, episode_done) =
            (step.observation, step.reward, step.episode_done);
        assert!(reward >= min_reward);
        assert!(reward <= max_reward);
        assert!(observation_space.contains(&next_observation));
        observation = if episode_done {
            env.reset()
        } else {
            next_observation
        };
    }
}
