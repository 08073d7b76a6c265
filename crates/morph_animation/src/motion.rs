//! Motion engine contract and the scheduler-backed implementation
//!
//! An engine receives an element and a pair of property sets: `initial`, the
//! state the element appears in, and `enter`, the state it animates to. The
//! enter set may carry the transition options under the `transition` key.
//! The engine returns a [`MotionHandle`] whose live values can be read at any
//! time, including mid-flight.
//!
//! [`SpringMotionEngine`] interpolates every property that is numeric in both
//! sets and snaps everything else:
//!
//! - numeric in both: driven from initial to enter (spring or tween)
//! - only in `enter`, or non-numeric: holds the enter value
//! - only in `initial`: holds the initial value

use smallvec::SmallVec;

use morph_core::{
    default_transition, ElementId, MotionError, PropValue, PropertySet, TransitionConfig,
};

use crate::driver::DriverSpec;
use crate::scheduler::{DriverId, SchedulerHandle};

/// Property key carrying transition options inside an enter set
pub const TRANSITION_KEY: &str = "transition";

/// The `{initial, enter}` pair handed to an engine
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionVariants {
    pub initial: PropertySet,
    pub enter: PropertySet,
}

impl MotionVariants {
    pub fn new(initial: PropertySet, enter: PropertySet) -> Self {
        Self { initial, enter }
    }

    /// Transition options attached to the enter set, if any
    pub fn transition(&self) -> Option<&TransitionConfig> {
        self.enter.get(TRANSITION_KEY).and_then(PropValue::as_transition)
    }
}

/// A running animation
pub trait MotionHandle {
    /// Live property values at this instant
    fn current_properties(&self) -> PropertySet;

    /// True while any property is still moving
    fn is_animating(&self) -> bool;
}

/// Starts animations for elements
pub trait MotionEngine {
    fn start(
        &self,
        element: ElementId,
        variants: MotionVariants,
    ) -> Result<Box<dyn MotionHandle>, MotionError>;
}

enum Slot {
    Fixed(PropValue),
    Driven { id: DriverId, target: f32 },
}

/// Handle to a motion driven by a [`FrameScheduler`](crate::scheduler::FrameScheduler)
///
/// Dropping the handle abandons the motion and frees its drivers.
pub struct SpringMotion {
    element: ElementId,
    scheduler: SchedulerHandle,
    slots: SmallVec<[(String, Slot); 8]>,
}

impl SpringMotion {
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Number of properties being interpolated
    pub fn driven_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Driven { .. }))
            .count()
    }

    fn push_fixed(&mut self, key: &str, value: PropValue) {
        self.slots.push((key.to_string(), Slot::Fixed(value)));
    }
}

impl MotionHandle for SpringMotion {
    fn current_properties(&self) -> PropertySet {
        let mut props = PropertySet::new();
        for (key, slot) in &self.slots {
            let value = match slot {
                Slot::Fixed(value) => value.clone(),
                Slot::Driven { id, target } => {
                    PropValue::Number(self.scheduler.value(*id).unwrap_or(*target))
                }
            };
            props.insert(key.as_str(), value);
        }
        props
    }

    fn is_animating(&self) -> bool {
        self.slots.iter().any(|(_, slot)| match slot {
            Slot::Driven { id, .. } => !self.scheduler.is_settled(*id),
            Slot::Fixed(_) => false,
        })
    }
}

impl Drop for SpringMotion {
    fn drop(&mut self) {
        for (_, slot) in &self.slots {
            if let Slot::Driven { id, .. } = slot {
                self.scheduler.remove(*id);
            }
        }
    }
}

/// Engine that drives properties with springs and tweens on a frame scheduler
#[derive(Clone)]
pub struct SpringMotionEngine {
    scheduler: SchedulerHandle,
}

impl SpringMotionEngine {
    pub fn new(scheduler: SchedulerHandle) -> Self {
        Self { scheduler }
    }

    fn drive(
        &self,
        motion: &mut SpringMotion,
        transition: &TransitionConfig,
        key: &str,
        initial: &PropValue,
        target: &PropValue,
    ) -> Result<(), MotionError> {
        let (Some(from), Some(to)) = (initial.as_number(), target.as_number()) else {
            motion.push_fixed(key, target.clone());
            return Ok(());
        };

        let driver = DriverSpec::for_property(transition, key)?.build(from, to);
        let id = self
            .scheduler
            .register(driver)
            .ok_or(MotionError::SchedulerGone)?;
        motion
            .slots
            .push((key.to_string(), Slot::Driven { id, target: to }));
        Ok(())
    }
}

impl MotionEngine for SpringMotionEngine {
    fn start(
        &self,
        element: ElementId,
        variants: MotionVariants,
    ) -> Result<Box<dyn MotionHandle>, MotionError> {
        if !self.scheduler.is_alive() {
            return Err(MotionError::SchedulerGone);
        }

        let transition = variants
            .transition()
            .cloned()
            .unwrap_or_else(default_transition);

        // Built incrementally so an error drops (and unregisters) what exists so far
        let mut motion = SpringMotion {
            element,
            scheduler: self.scheduler.clone(),
            slots: SmallVec::new(),
        };

        for (key, initial) in variants.initial.iter() {
            if key == TRANSITION_KEY {
                continue;
            }
            match variants.enter.get(key) {
                Some(target) => self.drive(&mut motion, &transition, key, initial, target)?,
                None => motion.push_fixed(key, initial.clone()),
            }
        }
        for (key, target) in variants.enter.iter() {
            if key == TRANSITION_KEY || variants.initial.contains_key(key) {
                continue;
            }
            motion.push_fixed(key, target.clone());
        }

        tracing::debug!(
            element = element.to_raw(),
            driven = motion.driven_count(),
            total = motion.slots.len(),
            "motion started"
        );
        Ok(Box::new(motion))
    }
}
