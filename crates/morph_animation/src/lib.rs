//! Morph Animation Engine
//!
//! Drives hero transitions once the controller has decided where an element
//! starts and where it ends up.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Timed interpolation with easing curves
//! - **Per-Property Transitions**: Nested transition options per property name
//! - **Frame Scheduler**: Host-driven ticking, wall clock or fixed step
//! - **Motion Engine**: The `{initial, enter}` contract heroes animate through

pub mod driver;
pub mod easing;
pub mod motion;
pub mod scheduler;
pub mod spring;

pub use driver::{DriverSpec, PropertyDriver, Tween, DEFAULT_TWEEN_MS};
pub use easing::Easing;
pub use motion::{
    MotionEngine, MotionHandle, MotionVariants, SpringMotion, SpringMotionEngine, TRANSITION_KEY,
};
pub use scheduler::{DriverId, FrameScheduler, SchedulerHandle};
pub use spring::{Spring, SpringConfig};
