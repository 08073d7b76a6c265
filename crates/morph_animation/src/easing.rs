//! Easing curves for tweened transitions

/// Easing curve applied to tween progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Parse a transition `ease` name
    ///
    /// Accepts camelCase (`easeOut`) and kebab-case (`ease-out`) spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Easing::Linear),
            "easeIn" | "ease-in" => Some(Easing::EaseIn),
            "easeOut" | "ease-out" => Some(Easing::EaseOut),
            "easeInOut" | "ease-in-out" | "ease" => Some(Easing::EaseInOut),
            _ => None,
        }
    }

    /// Map linear progress `t` in `[0, 1]` onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let t1 = t - 1.0;
                t1 * t1 * t1 + 1.0
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t1 = 2.0 * t - 2.0;
                    0.5 * t1 * t1 * t1 + 1.0
                }
            }
        }
    }
}
