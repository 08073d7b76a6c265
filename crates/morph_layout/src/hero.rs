//! Hero transition controller
//!
//! Makes an element that reappears with the same layout identity look like it
//! travelled from where the previous instance left off.
//!
//! # How It Works
//!
//! 1. **Mount**: capture the element's geometry, read the snapshot the
//!    previous instance left in the registry and compute the position delta
//! 2. **After layout**: start a motion from "previous position, expressed as
//!    an offset from the new one" to "zero offset, final size"
//! 3. **Unmount**: add the residual transform to the captured geometry, take
//!    the motion's live values (or the static style) and write the combined
//!    snapshot back under the same identity
//!
//! # Example
//!
//! ```ignore
//! use morph_layout::prelude::*;
//!
//! let env = HeroEnv::new(ctx.clone(), geometry.clone(), engine.clone(), commits.clone());
//!
//! let mut hero = Hero::new(
//!     card_element,
//!     HeroProps::new().with_layout_id("card-1").ignore(["background"]),
//!     env,
//! )
//! .with_style(card_style);
//!
//! hero.mount();
//! // host: layout, then commits.flush()?, then tick the scheduler per frame
//! hero.unmount();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use morph_animation::{MotionEngine, MotionHandle, MotionVariants, TRANSITION_KEY};
use morph_core::{
    Bounding, ElementId, Geometry, HeroContext, PropValue, PropertySet, Snapshot,
    TransitionConfig,
};

use crate::commit::CommitQueue;
use crate::geometry::GeometryTracker;

/// Caller-supplied hero options
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeroProps {
    /// Identity linking separate instances; `None` opts out of continuity
    pub layout_id: Option<String>,
    /// Instance-level transition override
    pub transition: Option<TransitionConfig>,
    /// Properties the hero must never animate
    pub ignore: Vec<String>,
}

impl HeroProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_id(mut self, layout_id: impl Into<String>) -> Self {
        self.layout_id = Some(layout_id.into());
        self
    }

    pub fn with_transition(mut self, transition: TransitionConfig) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Exclude properties from both the initial and enter sets
    pub fn ignore<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(keys.into_iter().map(Into::into));
        self
    }
}

/// Collaborators a hero works with
#[derive(Clone)]
pub struct HeroEnv {
    pub context: HeroContext,
    pub tracker: Rc<dyn GeometryTracker>,
    pub engine: Rc<dyn MotionEngine>,
    pub commit: CommitQueue,
}

impl HeroEnv {
    pub fn new(
        context: HeroContext,
        tracker: Rc<dyn GeometryTracker>,
        engine: Rc<dyn MotionEngine>,
        commit: CommitQueue,
    ) -> Self {
        Self {
            context,
            tracker,
            engine,
            commit,
        }
    }
}

/// Lifecycle phase of a hero
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroPhase {
    Created,
    Mounted,
    Unmounted,
}

struct HeroState {
    phase: HeroPhase,
    bounding: Bounding,
    style: PropertySet,
    motion: Option<Box<dyn MotionHandle>>,
}

/// A value recorded in a snapshot, treating zero and NaN as "not recorded"
fn recorded(value: Option<f32>) -> Option<f32> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Offset of the previous position from the current one, per axis
///
/// An axis without a recorded previous position (absent or zero) does not
/// move.
pub fn position_delta(prev: &Snapshot, current: &Geometry) -> (f32, f32) {
    let dx = recorded(prev.x()).map_or(0.0, |x| x - current.x);
    let dy = recorded(prev.y()).map_or(0.0, |y| y - current.y);
    (dx, dy)
}

/// Where the element appears: the previous snapshot, offset by `delta`
///
/// Width and height come from the snapshot and fall back to the current
/// size when it has none.
pub fn initial_properties(prev: &Snapshot, delta: (f32, f32), current: &Geometry) -> PropertySet {
    let mut props = prev.properties().clone();
    props.insert("x", PropValue::Px(delta.0));
    props.insert("y", PropValue::Px(delta.1));
    props.insert("width", prev.width().unwrap_or(current.width));
    props.insert("height", prev.height().unwrap_or(current.height));
    props
}

/// Where the element comes to rest: its own style at zero offset
pub fn enter_properties(
    style: &PropertySet,
    current: &Geometry,
    transition: TransitionConfig,
) -> PropertySet {
    let mut props = style.clone();
    props.insert("x", 0.0);
    props.insert("y", 0.0);
    props.insert("width", current.width);
    props.insert("height", current.height);
    props.insert(TRANSITION_KEY, transition);
    props
}

/// The `{initial, enter}` pair for a hero, with ignored keys removed
pub fn hero_variants(
    prev: &Snapshot,
    delta: (f32, f32),
    current: &Geometry,
    style: &PropertySet,
    transition: TransitionConfig,
    ignore: &[String],
) -> MotionVariants {
    let initial = initial_properties(prev, delta, current);
    let enter = enter_properties(style, current, transition);
    MotionVariants::new(initial.omit(ignore), enter.omit(ignore))
}

/// Hero transition controller for one element instance
pub struct Hero {
    element: ElementId,
    props: HeroProps,
    env: HeroEnv,
    state: Rc<RefCell<HeroState>>,
}

impl Hero {
    pub fn new(element: ElementId, props: HeroProps, env: HeroEnv) -> Self {
        Self {
            element,
            props,
            env,
            state: Rc::new(RefCell::new(HeroState {
                phase: HeroPhase::Created,
                bounding: Bounding::default(),
                style: PropertySet::new(),
                motion: None,
            })),
        }
    }

    /// Set the element's declared style attributes
    pub fn with_style(self, style: PropertySet) -> Self {
        self.set_style(style);
        self
    }

    /// Replace the declared style attributes
    ///
    /// Read when the motion starts and, if no motion ever started, at unmount.
    pub fn set_style(&self, style: PropertySet) {
        self.state.borrow_mut().style = style;
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The identity this hero participates under; an empty id counts as none
    pub fn layout_id(&self) -> Option<&str> {
        self.props.layout_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn props(&self) -> &HeroProps {
        &self.props
    }

    pub fn phase(&self) -> HeroPhase {
        self.state.borrow().phase
    }

    /// The geometry captured at mount (shifted by the transform after unmount)
    pub fn bounding(&self) -> Bounding {
        self.state.borrow().bounding
    }

    /// True once the deferred motion has started and while it is moving
    pub fn is_animating(&self) -> bool {
        self.state
            .borrow()
            .motion
            .as_ref()
            .is_some_and(|motion| motion.is_animating())
    }

    /// Live values of the running motion, if one has started
    pub fn current_properties(&self) -> Option<PropertySet> {
        self.state
            .borrow()
            .motion
            .as_ref()
            .map(|motion| motion.current_properties())
    }

    /// Capture geometry and schedule the motion for after layout
    ///
    /// Only the first call has any effect.
    pub fn mount(&mut self) {
        let current = {
            let mut state = self.state.borrow_mut();
            if state.phase != HeroPhase::Created {
                tracing::debug!(element = self.element.to_raw(), phase = ?state.phase, "hero already mounted");
                return;
            }
            let current = self.env.tracker.observe(self.element);
            state.bounding = Bounding::from(current);
            state.phase = HeroPhase::Mounted;
            current
        };

        if current.is_empty() {
            // Not laid out yet: zero offsets and zero enter size, no retry
            tracing::debug!(element = self.element.to_raw(), "hero mounted without layout");
        }

        let prev = self.env.context.registry().read_snapshot(self.layout_id());
        let delta = position_delta(&prev, &current);
        tracing::debug!(
            element = self.element.to_raw(),
            layout_id = self.layout_id(),
            x = current.x,
            y = current.y,
            width = current.width,
            height = current.height,
            dx = delta.0,
            dy = delta.1,
            "hero mounted"
        );

        let state = Rc::downgrade(&self.state);
        let engine = Rc::clone(&self.env.engine);
        let context = self.env.context.clone();
        let element = self.element;
        let instance_transition = self.props.transition.clone();
        let ignore = self.props.ignore.clone();

        self.env.commit.defer(move || {
            let Some(state) = state.upgrade() else {
                return Ok(());
            };
            if state.borrow().phase != HeroPhase::Mounted {
                tracing::trace!(element = element.to_raw(), "hero left before layout settled");
                return Ok(());
            }

            let transition = context.resolve_transition(instance_transition.as_ref());
            let variants = hero_variants(
                &prev,
                delta,
                &current,
                &state.borrow().style,
                transition,
                &ignore,
            );
            let motion = engine.start(element, variants)?;
            tracing::debug!(element = element.to_raw(), "hero motion started");
            state.borrow_mut().motion = Some(motion);
            Ok(())
        });
    }

    /// Persist the final geometry and live values for the next instance
    ///
    /// Any running motion is abandoned. Only a mounted hero writes.
    pub fn unmount(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.phase != HeroPhase::Mounted {
            return;
        }

        let transform = self.env.tracker.transform_of(self.element);
        state.bounding.offset_by(transform);

        let source = match &state.motion {
            Some(motion) => motion.current_properties(),
            None => state.style.clone(),
        };
        let snapshot = Snapshot::compose(&source, &state.bounding);
        tracing::debug!(
            element = self.element.to_raw(),
            layout_id = self.layout_id(),
            animated = state.motion.is_some(),
            x = state.bounding.x,
            y = state.bounding.y,
            "hero unmounted"
        );
        self.env
            .context
            .registry()
            .write_snapshot(self.layout_id(), snapshot);

        state.motion = None;
        state.phase = HeroPhase::Unmounted;
    }
}
