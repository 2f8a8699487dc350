use clap::Parser;
use rand::SeedableRng;
use relearn_bandits::envs::EnvDef;
use relearn_bandits::logging::CLILogger;
use relearn_bandits::{run_random_actions, BanditPreset, BuildEnv, Prng};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Simulate a multi-armed bandit environment with uniformly random actions.
#[derive(Parser, Debug)]
#[command(version, author, about)]
struct Opts {
    /// Bandit preset; for example `BanditTenArmedGaussian-v0`
    #[arg(
        value_parser = BanditPreset::from_str,
        required_unless_present_any = ["config", "list"],
    )]
    preset: Option<BanditPreset>,

    /// JSON environment definition file, used instead of a preset
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Number of arms; when configurable
    #[arg(long)]
    num_arms: Option<usize>,

    /// Random seed for the environment and the action sampling
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of episodes to simulate
    #[arg(long, default_value_t = 1000)]
    episodes: u64,

    /// Minimum time between displayed summaries, in milliseconds
    #[arg(long, default_value_t = 1000)]
    display_period_ms: u64,

    /// List the available presets and exit
    #[arg(long)]
    list: bool,
}

fn env_def(opts: &Opts) -> Result<EnvDef, Box<dyn Error>> {
    let mut env_def = match (&opts.config, opts.preset) {
        (Some(path), _) => serde_json::from_str(&fs::read_to_string(path)?)?,
        (None, Some(preset)) => preset.env_def(),
        (None, None) => return Err("either a preset or --config is required".into()),
    };
    if let Some(num_arms) = opts.num_arms {
        if !env_def.set_num_arms(num_arms) {
            return Err("the number of arms is not configurable for this environment".into());
        }
    }
    Ok(env_def)
}

fn main() -> Result<(), Box<dyn Error>> {
    let opts = Opts::parse();
    if opts.list {
        for preset in BanditPreset::all() {
            println!("{}", preset);
        }
        return Ok(());
    }

    let env_def = env_def(&opts)?;
    println!("Environment:\n{:#?}", env_def);

    let mut rng = Prng::seed_from_u64(opts.seed);
    let mut env = env_def.build_env(&mut rng)?;
    println!("{}", env);
    for (key, value) in env.info() {
        println!("info.{}: {}", key, value);
    }

    let mut logger = CLILogger::new(Duration::from_millis(opts.display_period_ms));
    let summary = run_random_actions(&mut env, opts.episodes, &mut rng, &mut logger)?;
    // Flush the remaining statistics before the final summary
    drop(logger);

    println!("\n{}", summary);
    println!("optimal arm: {}", env.optimal_arm());
    Ok(())
}
