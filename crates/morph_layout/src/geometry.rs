//! Geometry tracking
//!
//! Heroes never measure elements themselves. A [`GeometryTracker`] reports the
//! live bounds of an element and the residual transform currently applied to
//! it. Hosts with their own layout engine implement the trait directly; others
//! can write each layout pass into a [`GeometryMap`].

use rustc_hash::FxHashMap;
use std::sync::{PoisonError, RwLock};

use morph_core::{ElementId, Geometry, TransformOffset};

/// Reports live element geometry
pub trait GeometryTracker {
    /// Current bounding box of `element`
    ///
    /// Elements that have not been laid out report a zero geometry.
    fn observe(&self, element: ElementId) -> Geometry;

    /// Residual transform offset currently applied to `element`
    fn transform_of(&self, element: ElementId) -> TransformOffset;
}

#[derive(Clone, Copy, Debug, Default)]
struct TrackedElement {
    geometry: Geometry,
    transform: TransformOffset,
}

/// In-memory tracker fed by the host's layout pass
#[derive(Debug, Default)]
pub struct GeometryMap {
    elements: RwLock<FxHashMap<ElementId, TrackedElement>>,
}

impl GeometryMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn update(&self, element: ElementId, f: impl FnOnce(&mut TrackedElement)) {
        let mut elements = self.elements.write().unwrap_or_else(PoisonError::into_inner);
        f(elements.entry(element).or_default());
    }

    fn tracked(&self, element: ElementId) -> TrackedElement {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&element)
            .copied()
            .unwrap_or_default()
    }

    /// Record the laid-out bounds of an element
    pub fn set_geometry(&self, element: ElementId, geometry: Geometry) {
        self.update(element, |tracked| tracked.geometry = geometry);
    }

    /// Record the transform currently applied to an element
    pub fn set_transform(&self, element: ElementId, transform: TransformOffset) {
        self.update(element, |tracked| tracked.transform = transform);
    }

    /// Stop tracking an element
    pub fn remove(&self, element: ElementId) {
        self.elements
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&element);
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.elements
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&element)
    }
}

impl GeometryTracker for GeometryMap {
    fn observe(&self, element: ElementId) -> Geometry {
        self.tracked(element).geometry
    }

    fn transform_of(&self, element: ElementId) -> TransformOffset {
        self.tracked(element).transform
    }
}
