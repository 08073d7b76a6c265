//! Spring physics animation
//!
//! RK4-integrated spring physics for smooth, natural animations.

use morph_core::{TransitionConfig, DEFAULT_DAMPING, DEFAULT_STIFFNESS};

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Distance from target under which the spring may settle
    pub rest_delta: f32,
    /// Speed under which the spring may settle
    pub rest_speed: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }

    /// The hero default: stiff with a little overshoot
    pub fn hero() -> Self {
        Self::new(DEFAULT_STIFFNESS, DEFAULT_DAMPING, 1.0)
    }

    /// Read spring options from a transition config
    ///
    /// Recognized keys: `stiffness`, `damping`, `mass`, `restDelta`,
    /// `restSpeed`. Missing or non-positive values keep the hero defaults.
    pub fn from_transition(config: &TransitionConfig) -> Self {
        let defaults = Self::hero();
        let positive = |key: &str, fallback: f32| {
            config
                .get_number(key)
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(fallback)
        };

        Self {
            stiffness: positive("stiffness", defaults.stiffness),
            damping: config
                .get_number("damping")
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.damping),
            mass: positive("mass", defaults.mass),
            rest_delta: positive("restDelta", defaults.rest_delta),
            rest_speed: positive("restSpeed", defaults.rest_speed),
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::hero()
    }
}

/// Displacement from the target and the rate it changes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Phase {
    offset: f32,
    velocity: f32,
}

impl Phase {
    /// Euler-advance by `dt` along `rate`
    fn advanced(self, rate: Phase, dt: f32) -> Phase {
        Phase {
            offset: self.offset + rate.offset * dt,
            velocity: self.velocity + rate.velocity * dt,
        }
    }
}

/// A spring pulling one property value towards its target
///
/// The state is kept relative to the target, so a settled spring reports the
/// target exactly.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    target: f32,
    phase: Phase,
}

impl Spring {
    /// A spring released at rest from `from`, heading to `to`
    pub fn between(config: SpringConfig, from: f32, to: f32) -> Self {
        Self {
            config,
            target: to,
            phase: Phase {
                offset: from - to,
                velocity: 0.0,
            },
        }
    }

    pub fn value(&self) -> f32 {
        self.target + self.phase.offset
    }

    /// Within the rest thresholds of the target
    pub fn is_settled(&self) -> bool {
        self.phase.offset.abs() < self.config.rest_delta
            && self.phase.velocity.abs() < self.config.rest_speed
    }

    /// Advance `dt` seconds with one RK4 step; a settled spring snaps to rest
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.phase = Phase::default();
            return;
        }

        let half = dt * 0.5;
        let k1 = self.rate(self.phase);
        let k2 = self.rate(self.phase.advanced(k1, half));
        let k3 = self.rate(self.phase.advanced(k2, half));
        let k4 = self.rate(self.phase.advanced(k3, dt));

        let slope = Phase {
            offset: (k1.offset + 2.0 * (k2.offset + k3.offset) + k4.offset) / 6.0,
            velocity: (k1.velocity + 2.0 * (k2.velocity + k3.velocity) + k4.velocity) / 6.0,
        };
        self.phase = self.phase.advanced(slope, dt);
    }

    /// Hooke's law with linear damping
    fn rate(&self, phase: Phase) -> Phase {
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        Phase {
            offset: phase.velocity,
            velocity: (-stiffness * phase.offset - damping * phase.velocity) / mass,
        }
    }
}
