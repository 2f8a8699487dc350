//! Environment info: metadata hidden from agents.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Information about an environment that agents are not supposed to know.
///
/// For instance, the index of the optimal arm or the value of a sampled prior parameter.
/// The environment only stores and returns it; it is meant for evaluating agent performance.
pub type EnvInfo = BTreeMap<String, InfoValue>;

/// An [`EnvInfo`] value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl InfoValue {
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(x) => Some(*x),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl From<i64> for InfoValue {
    fn from(x: i64) -> Self {
        Self::Int(x)
    }
}

impl From<f64> for InfoValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<String> for InfoValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for InfoValue {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(x) => write!(f, "{}", x),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}
