//! Persisted hero state for a layout identity

use crate::geometry::Bounding;
use crate::value::{PropValue, PropertySet};

/// Everything needed to resume animating an identity later
///
/// A flat property set holding the geometry fields (`x`, `y`, `width`,
/// `height`, optionally `z`) next to whatever style values were live when
/// the previous instance unmounted. An empty snapshot means "no history".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    props: PropertySet,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties(props: PropertySet) -> Self {
        Self { props }
    }

    /// `{ ...source, ...bounding }`: bounding fields replace same-named properties
    ///
    /// `z` always comes from the bounding record. A flat bounding drops any `z`
    /// the source carried over from an earlier instance.
    pub fn compose(source: &PropertySet, bounding: &Bounding) -> Self {
        let mut props = source.omit(&["z"]);
        props.extend(&bounding.to_properties());
        Self { props }
    }

    pub fn x(&self) -> Option<f32> {
        self.props.get_number("x")
    }

    pub fn y(&self) -> Option<f32> {
        self.props.get_number("y")
    }

    pub fn z(&self) -> Option<f32> {
        self.props.get_number("z")
    }

    pub fn width(&self) -> Option<f32> {
        self.props.get_number("width")
    }

    pub fn height(&self) -> Option<f32> {
        self.props.get_number("height")
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn properties(&self) -> &PropertySet {
        &self.props
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl From<PropertySet> for Snapshot {
    fn from(props: PropertySet) -> Self {
        Self::from_properties(props)
    }
}
