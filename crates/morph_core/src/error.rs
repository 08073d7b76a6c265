//! Error types for morph

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading [`MorphSettings`](crate::settings::MorphSettings)
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for the settings schema
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by an animation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// The scheduler backing the engine has been dropped
    #[error("animation scheduler is no longer alive")]
    SchedulerGone,

    /// The transition names an animation type the engine cannot drive
    #[error("unsupported transition type `{0}`")]
    InvalidTransition(String),

    /// Engine specific failure
    #[error("{0}")]
    Other(String),
}

/// Errors that can surface from morph to the host
#[derive(Error, Debug)]
pub enum MorphError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("motion failed to start: {0}")]
    Motion(#[from] MotionError),
}

/// Result type for morph operations
pub type Result<T> = std::result::Result<T, MorphError>;
