//! Morph Core
//!
//! Foundational types for shared-element ("hero") transitions:
//!
//! - **Geometry**: element bounds, residual transforms and the bounding record
//! - **Property Sets**: ordered style/property maps handed to the animation engine
//! - **Snapshots**: persisted geometry + style for a layout identity
//! - **Transition Configs**: open option maps with first-wins deep merging
//! - **Layout Registry**: a scoped store of snapshots keyed by identity
//! - **Hero Context**: the ambient scope shared by every hero in a group
//!
//! # Example
//!
//! ```rust
//! use morph_core::{Geometry, HeroContext, Snapshot, Bounding, PropertySet};
//!
//! let ctx = HeroContext::new();
//!
//! // An element with identity "card-1" unmounts at (50, 80)
//! let bounding = Bounding::from(Geometry::new(50.0, 80.0, 120.0, 60.0));
//! let snapshot = Snapshot::compose(&PropertySet::new(), &bounding);
//! ctx.registry().write_snapshot(Some("card-1"), snapshot);
//!
//! // A later instance with the same identity finds it on mount
//! let prev = ctx.registry().read_snapshot(Some("card-1"));
//! assert_eq!(prev.x(), Some(50.0));
//! ```

pub mod context;
pub mod error;
pub mod geometry;
pub mod registry;
pub mod settings;
pub mod snapshot;
pub mod transition;
pub mod value;

pub use context::HeroContext;
pub use error::{ConfigError, MorphError, MotionError, Result};
pub use geometry::{Bounding, ElementId, Geometry, TransformOffset};
pub use registry::{LayoutRegistry, SharedRegistry};
pub use settings::{MorphSettings, SchedulerSettings};
pub use snapshot::Snapshot;
pub use transition::{
    default_transition, merge_transitions, ConfigValue, TransitionConfig, DEFAULT_DAMPING,
    DEFAULT_STIFFNESS,
};
pub use value::{PropValue, PropertySet};
