use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning shape parameters into an airfoil outline or writing it out.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid shape parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid discretization: {0}")]
    InvalidConfig(String),

    #[error("malformed coordinate file at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        GeometryError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Errors raised while accumulating, scoring or persisting a polar.
#[derive(Debug, Error)]
pub enum PolarError {
    #[error("cannot score an empty polar")]
    EmptyPolar,

    #[error("invalid polar objective: {0}")]
    InvalidConfig(String),

    #[error("angle of attack must be finite, got {0}")]
    InvalidAngle(f64),

    #[error("angle label {0:?} is not a number")]
    InvalidLabel(String),

    #[error("malformed coefficient file {path:?} at line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConditionsError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("either the freestream velocity or the Mach number is required")]
    Underdetermined,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Errors raised while writing or reading the optimization log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("malformed optimization log at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
