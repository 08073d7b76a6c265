//! Morph Layout
//!
//! Shared-element ("hero") transitions on top of a host's layout pass.
//!
//! - **Geometry Tracking**: the [`GeometryTracker`] contract and an in-memory map
//! - **Commit Queue**: work deferred until layout/paint has settled
//! - **Hero Controller**: mount/unmount orchestration between the layout
//!   registry and the motion engine
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use morph_layout::prelude::*;
//!
//! let scheduler = FrameScheduler::new();
//! let geometry = Rc::new(GeometryMap::new());
//! let commits = CommitQueue::new();
//! let env = HeroEnv::new(
//!     HeroContext::new(),
//!     geometry.clone(),
//!     Rc::new(SpringMotionEngine::new(scheduler.handle())),
//!     commits.clone(),
//! );
//!
//! // First instance lives at (50, 80) and goes away
//! let list_item = ElementId::new(1);
//! geometry.set_geometry(list_item, Geometry::new(50.0, 80.0, 120.0, 60.0));
//! let mut hero = Hero::new(list_item, HeroProps::new().with_layout_id("card"), env.clone());
//! hero.mount();
//! commits.flush().unwrap();
//! scheduler.run_until_settled(1_000);
//! hero.unmount();
//!
//! // Second instance appears at (10, 20) and starts 40px/60px away
//! let detail = ElementId::new(2);
//! geometry.set_geometry(detail, Geometry::new(10.0, 20.0, 100.0, 50.0));
//! let mut hero = Hero::new(detail, HeroProps::new().with_layout_id("card"), env);
//! hero.mount();
//! commits.flush().unwrap();
//!
//! let props = hero.current_properties().unwrap();
//! assert_eq!(props.get_number("x"), Some(40.0));
//! assert_eq!(props.get_number("y"), Some(60.0));
//! ```

pub mod commit;
pub mod geometry;
pub mod hero;

pub use commit::{CommitQueue, CommitTask};
pub use geometry::{GeometryMap, GeometryTracker};
pub use hero::{
    enter_properties, hero_variants, initial_properties, position_delta, Hero, HeroEnv,
    HeroPhase, HeroProps,
};

/// Everything a host needs to wire heroes up
pub mod prelude {
    pub use crate::commit::CommitQueue;
    pub use crate::geometry::{GeometryMap, GeometryTracker};
    pub use crate::hero::{Hero, HeroEnv, HeroPhase, HeroProps};

    pub use morph_animation::{
        FrameScheduler, MotionEngine, MotionHandle, MotionVariants, SpringMotionEngine,
    };
    pub use morph_core::{
        Bounding, ElementId, Geometry, HeroContext, MorphSettings, PropValue, PropertySet,
        Snapshot, TransformOffset, TransitionConfig,
    };
}
