//! Morph settings
//!
//! Loaded from a `morph.toml` by the host, or built in code. Every section is
//! optional; missing values fall back to the defaults below.
//!
//! ```toml
//! [transition]
//! type = "spring"
//! stiffness = 400
//! damping = 30
//!
//! [scheduler]
//! target_fps = 60
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::transition::TransitionConfig;

/// Top-level settings for a hero scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphSettings {
    /// Ambient transition shared by every hero in the scope
    pub transition: Option<TransitionConfig>,
    /// Frame scheduler settings
    pub scheduler: SchedulerSettings,
}

/// Frame scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    /// Frame rate used for fixed-step ticking
    pub target_fps: u32,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self { target_fps: 120 }
    }
}

impl SchedulerSettings {
    /// Seconds per frame at the target rate
    pub fn frame_step(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}

impl MorphSettings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded morph settings");
        Ok(settings)
    }
}
