//! Post-layout commit queue
//!
//! Work that must observe settled layout is deferred onto a [`CommitQueue`].
//! The host flushes the queue once per update, after its layout/paint pass.
//! Tasks queued while a flush is running belong to the next update and wait
//! for the next flush, so a task always runs strictly after the layout it was
//! queued in and before the update that follows.
//!
//! ```ignore
//! // host update loop
//! rebuild_tree();
//! compute_layout(&geometry_map);
//! for hero in &mut newly_attached {
//!     hero.mount();         // observes the geometry just written
//! }
//! commit_queue.flush()?;    // heroes start their motion here
//! scheduler.tick();
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use morph_core::MorphError;

/// A deferred unit of work
pub type CommitTask = Box<dyn FnOnce() -> Result<(), MorphError>>;

/// Queue of tasks to run after the current layout settles
///
/// Clones share the same queue.
#[derive(Clone, Default)]
pub struct CommitQueue {
    tasks: Rc<RefCell<VecDeque<CommitTask>>>,
}

impl CommitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer `task` until the next flush
    pub fn defer<F>(&self, task: F)
    where
        F: FnOnce() -> Result<(), MorphError> + 'static,
    {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Number of tasks waiting for the next flush
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run every task queued before this call, in order
    ///
    /// All tasks run even if one fails; the first error is returned.
    pub fn flush(&self) -> Result<(), MorphError> {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        let mut first_error = None;

        for task in tasks {
            if let Err(err) = task() {
                tracing::warn!(error = %err, "deferred commit task failed");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for CommitQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitQueue")
            .field("pending", &self.pending())
            .finish()
    }
}
