//! Transition configuration
//!
//! Transition options are an open map (`type`, `stiffness`, `damping`,
//! `duration`, per-property overrides, ...) whose meaning belongs to the
//! animation engine. A hero resolves its config by layering, highest priority
//! first:
//!
//! 1. the instance override
//! 2. the ambient default of its [`HeroContext`](crate::context::HeroContext)
//! 3. [`default_transition`]
//!
//! # Example
//!
//! ```rust
//! use morph_core::{default_transition, merge_transitions, TransitionConfig};
//!
//! let instance = TransitionConfig::new().with("damping", 20.0);
//! let resolved = merge_transitions(&[&instance, &default_transition()]);
//!
//! assert_eq!(resolved.get_text("type"), Some("spring"));
//! assert_eq!(resolved.get_number("stiffness"), Some(600.0));
//! assert_eq!(resolved.get_number("damping"), Some(20.0));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Stiffness of the library default spring
pub const DEFAULT_STIFFNESS: f32 = 600.0;
/// Damping of the library default spring
pub const DEFAULT_DAMPING: f32 = 35.0;

/// A single transition option value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f32),
    Text(String),
    List(Vec<ConfigValue>),
    Map(TransitionConfig),
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value as f32)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<TransitionConfig> for ConfigValue {
    fn from(value: TransitionConfig) -> Self {
        ConfigValue::Map(value)
    }
}

/// Open map of animation-engine options
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionConfig {
    options: IndexMap<String, ConfigValue>,
}

impl TransitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.options.get(key)
    }

    pub fn get_number(&self, key: &str) -> Option<f32> {
        match self.options.get(key) {
            Some(ConfigValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.options.get(key) {
            Some(ConfigValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_map(&self, key: &str) -> Option<&TransitionConfig> {
        match self.options.get(key) {
            Some(ConfigValue::Map(m)) => Some(m),
            _ => None,
        }
    }

    /// The `type` option (`"spring"`, `"tween"`, ...)
    pub fn kind(&self) -> Option<&str> {
        self.get_text("type")
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fill keys missing from `self` with values from `defaults`
    ///
    /// Keys already present in `self` win. Nested maps are filled
    /// recursively and lists are concatenated with `self`'s items first.
    fn fill_from(&mut self, defaults: &TransitionConfig) {
        for (key, fallback) in &defaults.options {
            match (self.options.get_mut(key), fallback) {
                (None, _) => {
                    self.options.insert(key.clone(), fallback.clone());
                }
                (Some(ConfigValue::Map(ours)), ConfigValue::Map(theirs)) => {
                    ours.fill_from(theirs);
                }
                (Some(ConfigValue::List(ours)), ConfigValue::List(theirs)) => {
                    ours.extend(theirs.iter().cloned());
                }
                (Some(_), _) => {}
            }
        }
    }
}

/// The library default: `{ type: "spring", stiffness: 600, damping: 35 }`
pub fn default_transition() -> TransitionConfig {
    TransitionConfig::new()
        .with("type", "spring")
        .with("stiffness", DEFAULT_STIFFNESS)
        .with("damping", DEFAULT_DAMPING)
}

/// Merge configs left to right; the first source defining a key wins
pub fn merge_transitions(sources: &[&TransitionConfig]) -> TransitionConfig {
    let mut merged = TransitionConfig::new();
    for source in sources {
        merged.fill_from(source);
    }
    merged
}
