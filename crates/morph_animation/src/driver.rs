//! Per-property drivers
//!
//! A driver moves one numeric property from its initial value to its target,
//! either with spring physics or a timed tween. The kind of driver comes from
//! the transition config:
//!
//! | `type`                  | keys                                                       |
//! |-------------------------|------------------------------------------------------------|
//! | `spring` (default)      | `stiffness`, `damping`, `mass`, `restDelta`, `restSpeed`   |
//! | `tween`, `keyframes`    | `duration` (ms), `ease`                                    |
//!
//! Both accept `delay` (ms).

use morph_core::{MotionError, TransitionConfig};

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};

/// Tween duration when the config does not name one
pub const DEFAULT_TWEEN_MS: f32 = 300.0;

/// A timed interpolation between two values
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            easing,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).min(1.0)
        }
    }

    pub fn value(&self) -> f32 {
        let t = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    pub fn step(&mut self, dt_ms: f32) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
    }
}

#[derive(Clone, Copy, Debug)]
enum DriverKind {
    Spring(Spring),
    Tween(Tween),
}

/// Drives a single property towards its target
#[derive(Clone, Copy, Debug)]
pub struct PropertyDriver {
    kind: DriverKind,
    target: f32,
    delay_ms: f32,
}

impl PropertyDriver {
    pub fn spring(config: SpringConfig, from: f32, to: f32) -> Self {
        Self {
            kind: DriverKind::Spring(Spring::between(config, from, to)),
            target: to,
            delay_ms: 0.0,
        }
    }

    pub fn tween(from: f32, to: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            kind: DriverKind::Tween(Tween::new(from, to, duration_ms, easing)),
            target: to,
            delay_ms: 0.0,
        }
    }

    /// Hold the initial value for `delay_ms` before moving
    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn value(&self) -> f32 {
        match &self.kind {
            DriverKind::Spring(spring) => spring.value(),
            DriverKind::Tween(tween) => tween.value(),
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        if self.delay_ms > 0.0 {
            return false;
        }
        match &self.kind {
            DriverKind::Spring(spring) => spring.is_settled(),
            DriverKind::Tween(tween) => tween.is_finished(),
        }
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let mut dt_ms = dt * 1000.0;
        if self.delay_ms > 0.0 {
            if dt_ms <= self.delay_ms {
                self.delay_ms -= dt_ms;
                return;
            }
            dt_ms -= self.delay_ms;
            self.delay_ms = 0.0;
        }

        match &mut self.kind {
            DriverKind::Spring(spring) => spring.step(dt_ms / 1000.0),
            DriverKind::Tween(tween) => tween.step(dt_ms),
        }
    }
}

/// How a property should be driven, resolved from a transition config
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverSpec {
    Spring { config: SpringConfig, delay_ms: f32 },
    Tween { duration_ms: f32, easing: Easing, delay_ms: f32 },
}

impl DriverSpec {
    /// Resolve the driver for `property`
    ///
    /// A nested map under the property's name overrides the top-level options
    /// for that property only.
    pub fn for_property(config: &TransitionConfig, property: &str) -> Result<Self, MotionError> {
        match config.get_map(property) {
            Some(overrides) => {
                Self::from_transition(&morph_core::merge_transitions(&[overrides, config]))
            }
            None => Self::from_transition(config),
        }
    }

    pub fn from_transition(config: &TransitionConfig) -> Result<Self, MotionError> {
        let delay_ms = config.get_number("delay").unwrap_or(0.0).max(0.0);
        match config.kind().unwrap_or("spring") {
            "spring" => Ok(DriverSpec::Spring {
                config: SpringConfig::from_transition(config),
                delay_ms,
            }),
            "tween" | "keyframes" => {
                let easing = match config.get_text("ease") {
                    Some(name) => Easing::from_name(name).unwrap_or_else(|| {
                        tracing::warn!(ease = name, "unknown easing, using easeInOut");
                        Easing::default()
                    }),
                    None => Easing::default(),
                };
                Ok(DriverSpec::Tween {
                    duration_ms: config.get_number("duration").unwrap_or(DEFAULT_TWEEN_MS),
                    easing,
                    delay_ms,
                })
            }
            other => Err(MotionError::InvalidTransition(other.to_string())),
        }
    }

    pub fn build(&self, from: f32, to: f32) -> PropertyDriver {
        match *self {
            DriverSpec::Spring { config, delay_ms } => {
                PropertyDriver::spring(config, from, to).with_delay(delay_ms)
            }
            DriverSpec::Tween {
                duration_ms,
                easing,
                delay_ms,
            } => PropertyDriver::tween(from, to, duration_ms, easing).with_delay(delay_ms),
        }
    }
}
