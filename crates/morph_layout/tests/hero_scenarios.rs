//! End-to-end hero scenarios: mount, deferred start, unmount, remount

use std::cell::RefCell;
use std::rc::Rc;

use morph_core::{default_transition, MotionError};
use morph_layout::prelude::*;

/// Engine that records what it was asked to animate and reports fixed values
#[derive(Default)]
struct RecordingEngine {
    started: RefCell<Vec<(ElementId, MotionVariants)>>,
    live: RefCell<PropertySet>,
    fail: RefCell<Option<MotionError>>,
}

struct FixedMotion(PropertySet);

impl MotionHandle for FixedMotion {
    fn current_properties(&self) -> PropertySet {
        self.0.clone()
    }

    fn is_animating(&self) -> bool {
        true
    }
}

impl MotionEngine for RecordingEngine {
    fn start(
        &self,
        element: ElementId,
        variants: MotionVariants,
    ) -> Result<Box<dyn MotionHandle>, MotionError> {
        if let Some(err) = self.fail.borrow().clone() {
            return Err(err);
        }
        self.started.borrow_mut().push((element, variants));
        Ok(Box::new(FixedMotion(self.live.borrow().clone())))
    }
}

struct Harness {
    ctx: HeroContext,
    geometry: Rc<GeometryMap>,
    engine: Rc<RecordingEngine>,
    commits: CommitQueue,
}

impl Harness {
    fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            ctx: HeroContext::new(),
            geometry: Rc::new(GeometryMap::new()),
            engine: Rc::new(RecordingEngine::default()),
            commits: CommitQueue::new(),
        }
    }

    fn env(&self) -> HeroEnv {
        HeroEnv::new(
            self.ctx.clone(),
            self.geometry.clone(),
            self.engine.clone(),
            self.commits.clone(),
        )
    }

    fn hero(&self, element: ElementId, at: Geometry, props: HeroProps) -> Hero {
        self.geometry.set_geometry(element, at);
        Hero::new(element, props, self.env())
    }

    fn last_started(&self) -> MotionVariants {
        self.engine
            .started
            .borrow()
            .last()
            .map(|(_, variants)| variants.clone())
            .expect("engine was never started")
    }
}

fn card() -> HeroProps {
    HeroProps::new().with_layout_id("card-1")
}

fn snapshot(x: f32, y: f32, width: f32, height: f32) -> Snapshot {
    Snapshot::from(
        PropertySet::new()
            .with("x", x)
            .with("y", y)
            .with("width", width)
            .with("height", height),
    )
}

#[test]
fn first_appearance_does_not_slide() {
    let h = Harness::new();
    let mut hero = h.hero(ElementId::new(1), Geometry::new(10.0, 20.0, 100.0, 50.0), card());

    hero.mount();
    assert!(
        h.engine.started.borrow().is_empty(),
        "motion must wait for the commit flush"
    );

    h.commits.flush().unwrap();
    let variants = h.last_started();

    let initial = PropertySet::new()
        .with("x", PropValue::Px(0.0))
        .with("y", PropValue::Px(0.0))
        .with("width", 100.0)
        .with("height", 50.0);
    let enter = PropertySet::new()
        .with("x", 0.0)
        .with("y", 0.0)
        .with("width", 100.0)
        .with("height", 50.0)
        .with("transition", default_transition());

    assert_eq!(variants.initial, initial);
    assert_eq!(variants.enter, enter);
    assert_eq!(hero.bounding(), Bounding::from(Geometry::new(10.0, 20.0, 100.0, 50.0)));
}

#[test]
fn returning_identity_starts_from_previous_geometry() {
    let h = Harness::new();
    h.ctx
        .registry()
        .write_snapshot(Some("card-1"), snapshot(50.0, 80.0, 120.0, 60.0));

    let mut hero = h.hero(ElementId::new(2), Geometry::new(10.0, 20.0, 100.0, 50.0), card());
    hero.mount();
    h.commits.flush().unwrap();

    let variants = h.last_started();
    assert_eq!(variants.initial.get("x"), Some(&PropValue::Px(40.0)));
    assert_eq!(variants.initial.get("y"), Some(&PropValue::Px(60.0)));
    assert_eq!(variants.initial.get_number("width"), Some(120.0));
    assert_eq!(variants.initial.get_number("height"), Some(60.0));

    assert_eq!(variants.enter.get_number("x"), Some(0.0));
    assert_eq!(variants.enter.get_number("y"), Some(0.0));
    assert_eq!(variants.enter.get_number("width"), Some(100.0));
    assert_eq!(variants.enter.get_number("height"), Some(50.0));
    assert!(variants.transition().is_some());

    // Mounting never writes
    assert_eq!(
        h.ctx.registry().get("card-1"),
        Some(snapshot(50.0, 80.0, 120.0, 60.0))
    );
}

#[test]
fn anonymous_hero_never_touches_registry() {
    let h = Harness::new();
    h.ctx
        .registry()
        .write_snapshot(Some("card-1"), snapshot(50.0, 80.0, 120.0, 60.0));

    let mut hero = h.hero(
        ElementId::new(3),
        Geometry::new(10.0, 20.0, 100.0, 50.0),
        HeroProps::new(),
    );
    hero.mount();
    h.commits.flush().unwrap();

    // No identity: no history, so no slide
    let variants = h.last_started();
    assert_eq!(variants.initial.get("x"), Some(&PropValue::Px(0.0)));
    assert_eq!(variants.initial.get_number("width"), Some(100.0));

    hero.unmount();
    assert_eq!(h.ctx.registry().len(), 1);
    assert_eq!(
        h.ctx.registry().get("card-1"),
        Some(snapshot(50.0, 80.0, 120.0, 60.0))
    );
}

#[test]
fn unmount_persists_live_values_under_bounding() {
    let h = Harness::new();
    *h.engine.live.borrow_mut() = PropertySet::new().with("opacity", 0.4).with("x", 12.0);

    let element = ElementId::new(4);
    let mut hero = h.hero(element, Geometry::new(10.0, 20.0, 100.0, 50.0), card());
    hero.mount();
    h.commits.flush().unwrap();

    h.geometry.set_transform(element, TransformOffset::new(3.0, 0.0, 0.0));
    hero.unmount();

    let expected = Snapshot::from(
        PropertySet::new()
            .with("opacity", 0.4)
            .with("x", 13.0)
            .with("y", 20.0)
            .with("width", 100.0)
            .with("height", 50.0),
    );
    assert_eq!(h.ctx.registry().get("card-1"), Some(expected));
    assert_eq!(hero.phase(), HeroPhase::Unmounted);
    assert!(!hero.is_animating());
}

#[test]
fn unmount_before_layout_uses_static_style() {
    let h = Harness::new();
    h.ctx
        .registry()
        .write_snapshot(Some("card-1"), snapshot(1.0, 1.0, 1.0, 1.0));

    let element = ElementId::new(5);
    let mut hero = h
        .hero(element, Geometry::new(10.0, 20.0, 100.0, 50.0), card())
        .with_style(PropertySet::new().with("background", "teal").with("width", 999.0));
    hero.mount();
    h.geometry.set_transform(element, TransformOffset::new(0.0, 0.0, 4.0));
    hero.unmount();

    // Deferred start sees the hero is gone
    h.commits.flush().unwrap();
    assert!(h.engine.started.borrow().is_empty());

    let stored = h.ctx.registry().get("card-1").unwrap();
    assert_eq!(stored.get("background"), Some(&PropValue::from("teal")));
    // Bounding wins over the style's width; z recorded because it moved
    assert_eq!(stored.width(), Some(100.0));
    assert_eq!(stored.z(), Some(4.0));
    // Overwritten, not merged with the earlier entry
    assert_eq!(stored.x(), Some(10.0));
}

#[test]
fn ignored_properties_never_reach_the_engine() {
    let h = Harness::new();
    h.ctx.registry().write_snapshot(
        Some("card-1"),
        Snapshot::from(
            PropertySet::new()
                .with("opacity", 0.3)
                .with("x", 50.0)
                .with("y", 80.0),
        ),
    );

    let mut hero = h
        .hero(
            ElementId::new(6),
            Geometry::new(10.0, 20.0, 100.0, 50.0),
            card().ignore(["opacity", "height"]),
        )
        .with_style(PropertySet::new().with("opacity", 1.0));
    hero.mount();
    h.commits.flush().unwrap();

    let variants = h.last_started();
    for key in ["opacity", "height"] {
        assert!(!variants.initial.contains_key(key));
        assert!(!variants.enter.contains_key(key));
    }
    assert_eq!(variants.initial.get("x"), Some(&PropValue::Px(40.0)));
}

#[test]
fn transition_resolution_layers_instance_context_default() {
    let mut h = Harness::new();
    h.ctx = HeroContext::new().with_transition(
        TransitionConfig::new()
            .with("stiffness", 300.0)
            .with("mass", 2.0),
    );

    let props = card().with_transition(TransitionConfig::new().with("mass", 0.5));
    let mut hero = h.hero(ElementId::new(7), Geometry::new(0.0, 0.0, 10.0, 10.0), props);
    hero.mount();
    h.commits.flush().unwrap();

    let variants = h.last_started();
    let transition = variants.transition().unwrap();
    assert_eq!(transition.kind(), Some("spring"));
    assert_eq!(transition.get_number("stiffness"), Some(300.0));
    assert_eq!(transition.get_number("damping"), Some(35.0));
    assert_eq!(transition.get_number("mass"), Some(0.5));
}

#[test]
fn engine_failure_propagates_from_flush() {
    let h = Harness::new();
    *h.engine.fail.borrow_mut() = Some(MotionError::SchedulerGone);

    let mut hero = h.hero(ElementId::new(8), Geometry::new(0.0, 0.0, 10.0, 10.0), card());
    hero.mount();

    let err = h.commits.flush().unwrap_err();
    assert!(matches!(
        err,
        morph_core::MorphError::Motion(MotionError::SchedulerGone)
    ));
    assert!(!hero.is_animating());

    // Still unmounts cleanly with the static style
    hero.unmount();
    assert!(h.ctx.registry().contains("card-1"));
}

#[test]
fn mount_and_unmount_are_single_shot() {
    let h = Harness::new();
    let element = ElementId::new(9);
    let mut hero = h.hero(element, Geometry::new(5.0, 5.0, 10.0, 10.0), card());

    // Unmount before mount does nothing
    hero.unmount();
    assert!(h.ctx.registry().is_empty());

    hero.mount();
    h.geometry.set_geometry(element, Geometry::new(99.0, 99.0, 10.0, 10.0));
    hero.mount();
    assert_eq!(h.commits.pending(), 1);
    assert_eq!(hero.bounding().x, 5.0);

    hero.unmount();
    h.geometry.set_transform(element, TransformOffset::new(7.0, 7.0, 0.0));
    hero.unmount();
    assert_eq!(h.ctx.registry().get("card-1").and_then(|s| s.x()), Some(5.0));
}

#[test]
fn spring_engine_round_trip() {
    let scheduler = FrameScheduler::new();
    let ctx = HeroContext::new();
    let geometry = Rc::new(GeometryMap::new());
    let commits = CommitQueue::new();
    let env = HeroEnv::new(
        ctx.clone(),
        geometry.clone(),
        Rc::new(SpringMotionEngine::new(scheduler.handle())),
        commits.clone(),
    );
    let style = PropertySet::new().with("opacity", 1.0);

    // List item at (50, 80)
    let item = ElementId::new(1);
    geometry.set_geometry(item, Geometry::new(50.0, 80.0, 120.0, 60.0));
    let mut hero = Hero::new(item, card(), env.clone()).with_style(style.clone());
    hero.mount();
    commits.flush().unwrap();
    scheduler.run_until_settled(2_000);
    hero.unmount();

    let stored = ctx.registry().get("card-1").unwrap();
    assert_eq!(stored.x(), Some(50.0));
    assert_eq!(stored.y(), Some(80.0));
    assert_eq!(stored.width(), Some(120.0));
    assert_eq!(stored.properties().get_number("opacity"), Some(1.0));

    // Detail view at (10, 20) picks up where the item left off
    let detail = ElementId::new(2);
    geometry.set_geometry(detail, Geometry::new(10.0, 20.0, 100.0, 50.0));
    let mut hero = Hero::new(detail, card(), env).with_style(style);
    hero.mount();
    commits.flush().unwrap();

    let start = hero.current_properties().unwrap();
    assert_eq!(start.get_number("x"), Some(40.0));
    assert_eq!(start.get_number("y"), Some(60.0));
    assert_eq!(start.get_number("width"), Some(120.0));
    assert!(hero.is_animating());

    // Interrupted halfway: the live (not target) values are persisted
    for _ in 0..3 {
        scheduler.tick_frame();
    }
    let mid = hero.current_properties().unwrap();
    let mid_width = mid.get_number("width").unwrap();
    assert!(mid_width < 120.0 && mid_width > 100.0);

    hero.unmount();
    assert_eq!(scheduler.driver_count(), 0);

    let stored = ctx.registry().get("card-1").unwrap();
    assert_eq!(stored.x(), Some(10.0));
    assert_eq!(stored.width(), Some(100.0));
}

#[test]
fn flat_unmount_drops_depth_from_earlier_instance() {
    let scheduler = FrameScheduler::new();
    let h = Harness::new();
    let env = HeroEnv::new(
        h.ctx.clone(),
        h.geometry.clone(),
        Rc::new(SpringMotionEngine::new(scheduler.handle())),
        h.commits.clone(),
    );
    h.ctx.registry().write_snapshot(
        Some("card-1"),
        Snapshot::from(PropertySet::new().with("x", 50.0).with("y", 80.0).with("z", 4.0)),
    );

    let element = ElementId::new(10);
    h.geometry.set_geometry(element, Geometry::new(10.0, 20.0, 100.0, 50.0));
    let mut hero = Hero::new(element, card(), env);
    hero.mount();
    h.commits.flush().unwrap();
    scheduler.run_until_settled(2_000);

    // The carried-over depth is still live on the motion
    let live = hero.current_properties().unwrap();
    assert_eq!(live.get_number("z"), Some(4.0));

    hero.unmount();
    assert_eq!(hero.bounding().z, 0.0);

    let stored = h.ctx.registry().get("card-1").unwrap();
    assert_eq!(stored.z(), None);
    assert_eq!(stored.x(), Some(10.0));
    assert_eq!(stored.y(), Some(20.0));
}

#[test]
fn empty_layout_id_does_not_link_heroes() {
    let h = Harness::new();
    let unnamed = || HeroProps::new().with_layout_id("");

    let mut first = h.hero(ElementId::new(11), Geometry::new(50.0, 80.0, 120.0, 60.0), unnamed());
    assert_eq!(first.layout_id(), None);
    first.mount();
    h.commits.flush().unwrap();
    first.unmount();
    assert!(h.ctx.registry().is_empty());

    let mut second = h.hero(ElementId::new(12), Geometry::new(10.0, 20.0, 100.0, 50.0), unnamed());
    second.mount();
    h.commits.flush().unwrap();

    let variants = h.last_started();
    assert_eq!(variants.initial.get("x"), Some(&PropValue::Px(0.0)));
    assert_eq!(variants.initial.get("y"), Some(&PropValue::Px(0.0)));
    assert_eq!(variants.initial.get_number("width"), Some(100.0));
}

#[test]
fn mount_before_layout_uses_zero_geometry() {
    let h = Harness::new();
    h.ctx
        .registry()
        .write_snapshot(Some("card-1"), snapshot(50.0, 80.0, 120.0, 60.0));

    // Never written to the geometry map
    let element = ElementId::new(13);
    let mut hero = Hero::new(element, card(), h.env());
    hero.mount();
    assert_eq!(hero.bounding(), Bounding::default());

    // A layout arriving later is not picked up
    h.geometry.set_geometry(element, Geometry::new(10.0, 20.0, 100.0, 50.0));
    h.commits.flush().unwrap();

    let variants = h.last_started();
    assert_eq!(variants.initial.get("x"), Some(&PropValue::Px(50.0)));
    assert_eq!(variants.initial.get("y"), Some(&PropValue::Px(80.0)));
    assert_eq!(variants.initial.get_number("width"), Some(120.0));
    assert_eq!(variants.initial.get_number("height"), Some(60.0));
    assert_eq!(variants.enter.get_number("width"), Some(0.0));
    assert_eq!(variants.enter.get_number("height"), Some(0.0));
}
