//! Error types for the simulation and its configuration layer.
//!
//! Configuration problems are caught before any value reaches the engine.
//! Running out of storage while growing the particle arena or the ring list is
//! the only failure the engine itself can produce, and it is not recoverable.

use std::collections::TryReserveError;
use std::fmt;

/// Exit code used when configuration input is rejected.
pub const EXIT_CONFIG: i32 = 1;
/// Exit code used when particle or ring storage cannot grow.
pub const EXIT_OUT_OF_MEMORY: i32 = 2;

/// Errors produced while building or changing a [`SimConfig`](crate::SimConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// `--name` does not match any configuration parameter.
    UnknownOption(String),
    /// `--name` was the last argument and has no value.
    MissingValue(String),
    /// The value for `name` is not an integer.
    InvalidValue { name: String, value: String },
    /// The value for `name` is below the parameter's minimum.
    BelowMinimum { name: &'static str, value: i32, minimum: i32 },
    /// A `*Maximum` parameter is smaller than its `*Minimum` partner.
    InvertedRange { minimum: &'static str, maximum: &'static str },
    /// A positional argument that is not an option.
    UnexpectedArgument(String),
    /// The JSON configuration could not be parsed.
    Json(serde_json::Error),
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        EXIT_CONFIG
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownOption(name) => write!(f, "unknown option '--{}'", name),
            ConfigError::MissingValue(name) => write!(f, "option '--{}' requires a value", name),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "failed to parse '{}' for '{}'", value, name)
            }
            ConfigError::BelowMinimum { name, value, minimum } => {
                write!(f, "{}={} is below the minimum of {}", name, value, minimum)
            }
            ConfigError::InvertedRange { minimum, maximum } => {
                write!(f, "{} must not be smaller than {}", maximum, minimum)
            }
            ConfigError::UnexpectedArgument(arg) => write!(f, "invalid argument: '{}'", arg),
            ConfigError::Json(e) => write!(f, "failed to parse configuration JSON: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors produced by the running simulation.
#[derive(Debug)]
pub enum SimError {
    /// Storage for a new particle or ring could not be reserved.
    OutOfMemory {
        what: &'static str,
        source: TryReserveError,
    },
}

impl SimError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SimError::OutOfMemory { .. } => EXIT_OUT_OF_MEMORY,
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::OutOfMemory { what, source } => {
                write!(f, "failed to allocate {}: {}", what, source)
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::OutOfMemory { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let config = ConfigError::UnknownOption("nope".into());
        let mut v: Vec<u8> = Vec::new();
        let source = v.try_reserve(usize::MAX).unwrap_err();
        let sim = SimError::OutOfMemory { what: "particle", source };
        assert_eq!(config.exit_code(), 1);
        assert_eq!(sim.exit_code(), 2);
    }

    #[test]
    fn display_names_the_option() {
        let e = ConfigError::BelowMinimum { name: "ringsMaximum", value: -3, minimum: 0 };
        assert_eq!(e.to_string(), "ringsMaximum=-3 is below the minimum of 0");
    }

    #[test]
    fn json_error_has_source() {
        let e: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(std::error::Error::source(&e).is_some());
    }
}
