//! Element geometry
//!
//! All values share one coordinate space (viewport-relative pixels).

use crate::value::{PropValue, PropertySet};

/// Host-assigned handle for a tracked element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// An element's position and size at a point in time
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Geometry {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the element has not been laid out yet (zero area)
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Residual transform displacement accumulated by animations or layout
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformOffset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl TransformOffset {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

/// The geometry a hero tracks between mount and unmount
///
/// Captured from the tracker at mount and shifted by the residual transform
/// at unmount, producing the best-known resting geometry at removal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounding {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub z: f32,
}

impl Bounding {
    /// Shift the position by a transform offset
    pub fn offset_by(&mut self, transform: TransformOffset) {
        self.x += transform.x;
        self.y += transform.y;
        self.z += transform.z;
    }

    /// Property form used when composing a snapshot
    ///
    /// `z` is only emitted when the element actually moved along it.
    pub fn to_properties(&self) -> PropertySet {
        let mut props = PropertySet::new();
        props.insert("x", PropValue::Number(self.x));
        props.insert("y", PropValue::Number(self.y));
        props.insert("width", PropValue::Number(self.width));
        props.insert("height", PropValue::Number(self.height));
        if self.z != 0.0 {
            props.insert("z", PropValue::Number(self.z));
        }
        props
    }
}

impl From<Geometry> for Bounding {
    fn from(geometry: Geometry) -> Self {
        Self {
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            z: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_offset() {
        let mut bounding = Bounding::from(Geometry::new(10.0, 20.0, 100.0, 50.0));
        bounding.offset_by(TransformOffset::new(3.0, -2.0, 0.0));

        assert_eq!(bounding.x, 13.0);
        assert_eq!(bounding.y, 18.0);
        assert_eq!(bounding.width, 100.0);
        assert_eq!(bounding.z, 0.0);
    }

    #[test]
    fn test_bounding_properties_skip_flat_z() {
        let mut bounding = Bounding::from(Geometry::new(1.0, 2.0, 3.0, 4.0));
        let props = bounding.to_properties();
        assert_eq!(props.len(), 4);
        assert!(!props.contains_key("z"));

        bounding.offset_by(TransformOffset::new(0.0, 0.0, 5.0));
        let props = bounding.to_properties();
        assert_eq!(props.get_number("z"), Some(5.0));
    }

    #[test]
    fn test_empty_geometry() {
        assert!(Geometry::default().is_empty());
        assert!(!Geometry::new(0.0, 0.0, 10.0, 10.0).is_empty());
    }
}
