//! Property values and property sets
//!
//! A [`PropertySet`] is what the animation engine consumes: an ordered map
//! from property name (`x`, `opacity`, `background`, ...) to a [`PropValue`].
//! Inserting an existing key replaces its value in place, so building a set
//! with `extend` behaves like an object spread where later sources win.

use std::fmt;

use indexmap::IndexMap;

use crate::transition::TransitionConfig;

/// A single animatable (or static) property value
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// Unitless number (opacity, scale, resolved pixel geometry)
    Number(f32),
    /// Pixel length, rendered as `"40px"`
    Px(f32),
    /// Any other value the engine treats as opaque (colors, keywords)
    Text(String),
    /// Transition options attached to an enter set
    Transition(TransitionConfig),
}

impl PropValue {
    /// Numeric value for `Number` and `Px`
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PropValue::Number(v) | PropValue::Px(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_transition(&self) -> Option<&TransitionConfig> {
        match self {
            PropValue::Transition(config) => Some(config),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Number(v) => write!(f, "{v}"),
            PropValue::Px(v) => write!(f, "{v}px"),
            PropValue::Text(s) => f.write_str(s),
            PropValue::Transition(config) => write!(f, "{config:?}"),
        }
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Number(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value as f32)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Text(value)
    }
}

impl From<TransitionConfig> for PropValue {
    fn from(value: TransitionConfig) -> Self {
        PropValue::Transition(value)
    }
}

/// Ordered map of property name to value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertySet {
    props: IndexMap<String, PropValue>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a property, keeping the original position of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        self.props.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    pub fn get_number(&self, key: &str) -> Option<f32> {
        self.props.get(key).and_then(PropValue::as_number)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.props.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every property of `other` into `self`; `other` wins on conflicts
    pub fn extend(&mut self, other: &PropertySet) {
        for (key, value) in &other.props {
            self.props.insert(key.clone(), value.clone());
        }
    }

    /// A copy of this set without the named keys
    pub fn omit<S: AsRef<str>>(&self, keys: &[S]) -> PropertySet {
        let props = self
            .props
            .iter()
            .filter(|(key, _)| !keys.iter().any(|k| k.as_ref() == key.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        PropertySet { props }
    }
}

impl<K: Into<String>> FromIterator<(K, PropValue)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (K, PropValue)>>(iter: I) -> Self {
        let mut set = PropertySet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

impl IntoIterator for PropertySet {
    type Item = (String, PropValue);
    type IntoIter = indexmap::map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.props.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut set = PropertySet::new().with("x", 1.0).with("opacity", 0.5);
        set.insert("x", PropValue::Px(40.0));

        let keys: Vec<_> = set.keys().collect();
        assert_eq!(keys, vec!["x", "opacity"]);
        assert_eq!(set.get("x"), Some(&PropValue::Px(40.0)));
    }

    #[test]
    fn test_extend_later_wins() {
        let mut base = PropertySet::new().with("opacity", 0.4).with("x", 12.0);
        let overlay = PropertySet::new().with("x", 13.0).with("y", 20.0);
        base.extend(&overlay);

        assert_eq!(base.get_number("opacity"), Some(0.4));
        assert_eq!(base.get_number("x"), Some(13.0));
        assert_eq!(base.get_number("y"), Some(20.0));
    }

    #[test]
    fn test_omit() {
        let set = PropertySet::new()
            .with("x", 1.0)
            .with("background", "red")
            .with("opacity", 1.0);

        let filtered = set.omit(&["background", "missing"]);
        assert_eq!(filtered.len(), 2);
        assert!(!filtered.contains_key("background"));
        // Source untouched
        assert!(set.contains_key("background"));

        let none: &[&str] = &[];
        assert_eq!(set.omit(none), set);
    }

    #[test]
    fn test_px_display() {
        assert_eq!(PropValue::Px(40.0).to_string(), "40px");
        assert_eq!(PropValue::Px(-2.5).to_string(), "-2.5px");
        assert_eq!(PropValue::Number(0.0).to_string(), "0");
        assert_eq!(PropValue::Px(12.0).as_number(), Some(12.0));
        assert_eq!(PropValue::from("red").as_number(), None);
        assert_eq!(PropValue::from("red").as_text(), Some("red"));
    }
}
