//! Frame scheduler
//!
//! Owns every live property driver and advances them once per frame. Drivers
//! are registered through a [`SchedulerHandle`], which only holds a weak
//! reference: dropping the scheduler ends all motion, and handles simply stop
//! reporting values.
//!
//! The host drives time. Call [`FrameScheduler::tick`] once per frame with the
//! wall clock, or [`FrameScheduler::tick_by`] with an explicit step for
//! fixed-rate hosts and tests.
//!
//! ```ignore
//! let scheduler = FrameScheduler::new();
//! let engine = SpringMotionEngine::new(scheduler.handle());
//!
//! // every frame, after layout:
//! commit_queue.flush()?;
//! if scheduler.tick() {
//!     request_redraw();
//! }
//! ```

use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

use morph_core::SchedulerSettings;

use crate::driver::PropertyDriver;

new_key_type! {
    /// Handle to a registered property driver
    pub struct DriverId;
}

/// Internal state of the frame scheduler
struct SchedulerInner {
    drivers: SlotMap<DriverId, PropertyDriver>,
    last_frame: Instant,
}

impl SchedulerInner {
    fn step_all(&mut self, dt: f32) -> bool {
        for (_, driver) in self.drivers.iter_mut() {
            driver.step(dt);
        }
        // Settled drivers stay registered until their handle drops so the
        // final value remains readable.
        self.drivers.iter().any(|(_, d)| !d.is_settled())
    }
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The scheduler that ticks all active property drivers
pub struct FrameScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    settings: SchedulerSettings,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::with_settings(SchedulerSettings::default())
    }

    pub fn with_settings(settings: SchedulerSettings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                drivers: SlotMap::with_key(),
                last_frame: Instant::now(),
            })),
            settings,
        }
    }

    /// Get a handle to this scheduler for passing to engines
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// Advance every driver by the wall-clock time since the last frame
    ///
    /// Returns true if any driver is still moving (needs another tick).
    pub fn tick(&self) -> bool {
        let mut inner = lock(&self.inner);
        let now = Instant::now();
        let dt = (now - inner.last_frame).as_secs_f32();
        inner.last_frame = now;
        tracing::trace!(dt, drivers = inner.drivers.len(), "frame tick");
        inner.step_all(dt)
    }

    /// Advance every driver by an explicit step in seconds
    pub fn tick_by(&self, dt: f32) -> bool {
        let mut inner = lock(&self.inner);
        inner.last_frame = Instant::now();
        inner.step_all(dt)
    }

    /// Advance by one frame at the configured target rate
    pub fn tick_frame(&self) -> bool {
        self.tick_by(self.settings.frame_step())
    }

    /// Tick fixed frames until everything settles or `max_frames` elapse
    ///
    /// Returns the number of frames stepped.
    pub fn run_until_settled(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames {
            frames += 1;
            if !self.tick_frame() {
                break;
            }
        }
        frames
    }

    /// Check if any driver is still moving
    pub fn has_active_motion(&self) -> bool {
        lock(&self.inner).drivers.iter().any(|(_, d)| !d.is_settled())
    }

    /// Number of registered drivers (moving or settled)
    pub fn driver_count(&self) -> usize {
        lock(&self.inner).drivers.len()
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the frame scheduler
///
/// Engines and motion handles hold this. It won't keep the scheduler alive.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a driver and return its ID
    pub fn register(&self, driver: PropertyDriver) -> Option<DriverId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = lock(&inner);
            // Avoid a huge first dt for drivers registered between frames
            guard.last_frame = Instant::now();
            guard.drivers.insert(driver)
        })
    }

    /// Current value of a driver
    pub fn value(&self, id: DriverId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).drivers.get(id).map(|d| d.value()))
    }

    /// A driver that no longer exists counts as settled
    pub fn is_settled(&self, id: DriverId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).drivers.get(id).map(|d| d.is_settled()))
            .unwrap_or(true)
    }

    pub fn remove(&self, id: DriverId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).drivers.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
