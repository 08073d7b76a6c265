//! Hero context - the ambient scope of a transition group
//!
//! Every hero in a group shares the same [`LayoutRegistry`] and may share a
//! default transition. Cloning a context clones the handle, not the registry.

use std::sync::Arc;

use crate::registry::{LayoutRegistry, SharedRegistry};
use crate::settings::MorphSettings;
use crate::transition::{default_transition, merge_transitions, TransitionConfig};

#[derive(Clone, Debug, Default)]
pub struct HeroContext {
    registry: SharedRegistry,
    transition: Option<TransitionConfig>,
}

impl HeroContext {
    /// A fresh scope with its own empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope backed by an existing registry
    pub fn with_registry(registry: SharedRegistry) -> Self {
        Self {
            registry,
            transition: None,
        }
    }

    pub fn from_settings(settings: &MorphSettings) -> Self {
        Self {
            registry: Arc::new(LayoutRegistry::new()),
            transition: settings.transition.clone(),
        }
    }

    /// Set the ambient default transition
    pub fn with_transition(mut self, transition: TransitionConfig) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn transition(&self) -> Option<&TransitionConfig> {
        self.transition.as_ref()
    }

    /// Instance override, then the ambient default, then the library default
    pub fn resolve_transition(&self, instance: Option<&TransitionConfig>) -> TransitionConfig {
        let empty = TransitionConfig::new();
        merge_transitions(&[
            instance.unwrap_or(&empty),
            self.transition.as_ref().unwrap_or(&empty),
            &default_transition(),
        ])
    }
}
