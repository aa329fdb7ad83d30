//! Error types for descriptor construction and queries.

use thiserror::Error;
use crate::{
    level::Level,
    spin::{ SpinProj, SpinTotal },
};

/// Invalid or physically inconsistent input to a descriptor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("magnetic field must be non-negative, got {0} T")]
    NegativeField(f64),

    #[error("magnetic field must be finite, got {0} T")]
    NonFiniteField(f64),

    #[error("invalid level (n = {n}, S = {s}, L = {l}, J = {j}): {reason}")]
    InvalidLevel {
        n: u32,
        s: SpinTotal,
        l: u32,
        j: SpinTotal,
        reason: &'static str,
    },

    #[error("cannot parse level from {0:?}")]
    ParseLevel(String),

    #[error("level table is empty")]
    EmptyLevelTable,

    #[error("level filter admits no levels")]
    EmptyLevelFilter,

    #[error("transition {label:?} refers to unknown level {level}")]
    UnknownTransitionLevel { label: String, level: Level },

    #[error("transition {label:?} connects level {level} to itself")]
    DegenerateTransition { label: String, level: Level },

    #[error("transition {label:?} has invalid {what}: {value}")]
    InvalidTransitionRate {
        label: String,
        what: &'static str,
        value: f64,
    },

    #[error(
        "level {level} has nuclear g-factor {found}, expected {expected}"
    )]
    NuclearGFactorMismatch { level: Level, expected: f64, found: f64 },

    #[error("level {0} has J < 1 and cannot carry a quadrupole constant")]
    ForbiddenQuadrupole(Level),

    #[error("level {0} has J >= 1 and requires a quadrupole constant")]
    MissingQuadrupole(Level),

    #[error("level filter refers to unknown level {0}")]
    UnknownFilterLevel(Level),

    #[error("level {0} is not a J = 1/2 level")]
    NotSpinHalf(Level),

    #[error("no sublevel F = {f}, mF = {mf} in level {level}")]
    InvalidSublevel { level: Level, f: SpinTotal, mf: SpinProj },
}

/// Query for a level or transition outside the effective set of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("level {0} is not in the effective level set")]
    Level(Level),

    #[error("no transition labeled {0:?}")]
    Transition(String),
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum AtomError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type AtomResult<T> = Result<T, AtomError>;
