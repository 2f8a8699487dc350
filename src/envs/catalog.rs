//! Catalog of named bandit presets
use super::{
    BanditConfig, BanditEnv, BuildEnv, BuildEnvError, DependentBanditConfig,
    DependentUniformBanditConfig, GaussianBanditConfig, IndexedBanditConfig, UniformBanditConfig,
};
use crate::Prng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Version suffix of every preset identifier.
const VERSION: &str = "v0";

/// A named bandit preset.
///
/// Each preset is identified by a string of the form `"Bandit<Name>-v0"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BanditPreset {
    TenArmedRandomFixed,
    TenArmedRandomRandom,
    TenArmedGaussian,
    TenArmedUniformDistributedReward,
    TwoArmedDeterministicFixed,
    TwoArmedHighHighFixed,
    TwoArmedHighLowFixed,
    TwoArmedLowLowFixed,
    TwoArmedIndependentUniform,
    TwoArmedDependentUniform,
    TwoArmedDependentEasy,
    TwoArmedDependentMedium,
    TwoArmedDependentHard,
    ElevenArmedWithIndex,
}

impl BanditPreset {
    /// All presets.
    pub const fn all() -> &'static [Self] {
        use BanditPreset::*;
        &[
            TenArmedRandomFixed,
            TenArmedRandomRandom,
            TenArmedGaussian,
            TenArmedUniformDistributedReward,
            TwoArmedDeterministicFixed,
            TwoArmedHighHighFixed,
            TwoArmedHighLowFixed,
            TwoArmedLowLowFixed,
            TwoArmedIndependentUniform,
            TwoArmedDependentUniform,
            TwoArmedDependentEasy,
            TwoArmedDependentMedium,
            TwoArmedDependentHard,
            ElevenArmedWithIndex,
        ]
    }

    /// Preset name without the `Bandit` prefix and version suffix.
    pub const fn name(self) -> &'static str {
        use BanditPreset::*;
        match self {
            TenArmedRandomFixed => "TenArmedRandomFixed",
            TenArmedRandomRandom => "TenArmedRandomRandom",
            TenArmedGaussian => "TenArmedGaussian",
            TenArmedUniformDistributedReward => "TenArmedUniformDistributedReward",
            TwoArmedDeterministicFixed => "TwoArmedDeterministicFixed",
            TwoArmedHighHighFixed => "TwoArmedHighHighFixed",
            TwoArmedHighLowFixed => "TwoArmedHighLowFixed",
            TwoArmedLowLowFixed => "TwoArmedLowLowFixed",
            TwoArmedIndependentUniform => "TwoArmedIndependentUniform",
            TwoArmedDependentUniform => "TwoArmedDependentUniform",
            TwoArmedDependentEasy => "TwoArmedDependentEasy",
            TwoArmedDependentMedium => "TwoArmedDependentMedium",
            TwoArmedDependentHard => "TwoArmedDependentHard",
            ElevenArmedWithIndex => "ElevenArmedWithIndex",
        }
    }

    /// Full preset identifier. For example, `"BanditTenArmedGaussian-v0"`.
    pub fn id(self) -> String {
        format!("Bandit{}-{}", self.name(), VERSION)
    }

    /// The environment definition built by this preset.
    pub fn env_def(self) -> EnvDef {
        use BanditPreset::*;
        match self {
            TenArmedRandomFixed => EnvDef::Uniform(UniformBanditConfig::ten_armed_random_fixed()),
            TenArmedRandomRandom => {
                EnvDef::Uniform(UniformBanditConfig::ten_armed_random_random())
            }
            TenArmedGaussian => EnvDef::Gaussian(GaussianBanditConfig::default()),
            TenArmedUniformDistributedReward => {
                EnvDef::Uniform(UniformBanditConfig::ten_armed_uniform_distributed_reward())
            }
            TwoArmedDeterministicFixed => {
                EnvDef::Fixed(BanditConfig::two_armed_deterministic_fixed())
            }
            TwoArmedHighHighFixed => EnvDef::Fixed(BanditConfig::two_armed_high_high_fixed()),
            TwoArmedHighLowFixed => EnvDef::Fixed(BanditConfig::two_armed_high_low_fixed()),
            TwoArmedLowLowFixed => EnvDef::Fixed(BanditConfig::two_armed_low_low_fixed()),
            TwoArmedIndependentUniform => {
                EnvDef::Uniform(UniformBanditConfig::two_armed_independent_uniform())
            }
            TwoArmedDependentUniform => EnvDef::DependentUniform(DependentUniformBanditConfig),
            TwoArmedDependentEasy => EnvDef::Dependent(DependentBanditConfig::easy()),
            TwoArmedDependentMedium => EnvDef::Dependent(DependentBanditConfig::medium()),
            TwoArmedDependentHard => EnvDef::Dependent(DependentBanditConfig::hard()),
            ElevenArmedWithIndex => EnvDef::Indexed(IndexedBanditConfig::default()),
        }
    }
}

impl fmt::Display for BanditPreset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bandit{}-{}", self.name(), VERSION)
    }
}

/// Unrecognized preset identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown bandit preset \"{0}\"")]
pub struct UnknownPresetError(pub String);

impl FromStr for BanditPreset {
    type Err = UnknownPresetError;

    /// Parse a preset identifier.
    ///
    /// The `Bandit` prefix and `-v0` suffix are optional.
    /// The "Independant" / "Dependant" spellings are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("Bandit").unwrap_or(s);
        let name = name
            .strip_suffix(VERSION)
            .and_then(|n| n.strip_suffix('-'))
            .unwrap_or(name);
        let name = name
            .replace("Independant", "Independent")
            .replace("Dependant", "Dependent");
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.name() == name)
            .ok_or_else(|| UnknownPresetError(s.into()))
    }
}

impl BuildEnv for BanditPreset {
    type Environment = BanditEnv;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        self.env_def().build_env(rng)
    }
}

/// Bandit environment definition: any preset configuration or a custom one.
///
/// Used as the configuration file format for the command-line interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnvDef {
    /// Explicit arm parameters
    Fixed(BanditConfig),
    Uniform(UniformBanditConfig),
    Gaussian(GaussianBanditConfig),
    DependentUniform(DependentUniformBanditConfig),
    Dependent(DependentBanditConfig),
    Indexed(IndexedBanditConfig),
}

impl EnvDef {
    /// Override the number of arms, where configurable.
    ///
    /// Returns whether the definition was updated.
    pub fn set_num_arms(&mut self, num_arms: usize) -> bool {
        match self {
            Self::Uniform(config) => config.num_arms = num_arms,
            Self::Gaussian(config) => config.num_arms = num_arms,
            _ => return false,
        }
        true
    }
}

impl From<BanditPreset> for EnvDef {
    fn from(preset: BanditPreset) -> Self {
        preset.env_def()
    }
}

impl BuildEnv for EnvDef {
    type Environment = BanditEnv;

    fn build_env(&self, rng: &mut Prng) -> Result<Self::Environment, BuildEnvError> {
        match self {
            Self::Fixed(config) => config.build_env(rng),
            Self::Uniform(config) => config.build_env(rng),
            Self::Gaussian(config) => config.build_env(rng),
            Self::DependentUniform(config) => config.build_env(rng),
            Self::Dependent(config) => config.build_env(rng),
            Self::Indexed(config) => config.build_env(rng),
        }
    }
}
