//! Error type
use crate::envs::{BuildEnvError, InvalidActionError, UnknownPresetError};
use crate::logging::LogError;
use thiserror::Error;

/// Error from the bandits crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditsError {
    #[error("error building environment")]
    BuildEnv(#[from] BuildEnvError),
    #[error(transparent)]
    InvalidAction(#[from] InvalidActionError),
    #[error(transparent)]
    UnknownPreset(#[from] UnknownPresetError),
    #[error("error logging statistics")]
    Log(#[from] LogError),
}
