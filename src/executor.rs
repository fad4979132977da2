use std::thread;

use tracing::{debug, trace};

use crate::PerformingError;

/// A deferred, side-effecting step submitted to a [`TaskRunner`].
pub type Effect<T> = Box<dyn FnOnce() -> Result<T, PerformingError> + Send>;

/// Runs an ordered list of effects on behalf of an action plugin.
///
/// `submit` blocks the caller until every effect has completed and returns
/// their results in submission order. The first failing effect aborts the
/// remaining ones. There is no cancellation or timeout.
pub trait TaskRunner {
    /// # Errors
    ///
    /// Returns [`PerformingError::TaskFailed`] naming the first failing
    /// effect, or [`PerformingError::TaskPanicked`] if an effect panicked.
    fn submit<T: Send + 'static>(&self, effects: Vec<Effect<T>>) -> Result<Vec<T>, PerformingError>;
}

/// Runs each submission on a fresh worker thread named
/// `executor-<target>`, joining it before returning.
#[derive(Debug, Clone)]
pub struct ThreadExecutor {
    target: String,
}

impl ThreadExecutor {
    #[must_use]
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_owned(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    fn thread_name(&self) -> String {
        format!("executor-{}", self.target)
    }
}

impl TaskRunner for ThreadExecutor {
    fn submit<T: Send + 'static>(&self, effects: Vec<Effect<T>>) -> Result<Vec<T>, PerformingError> {
        let name = self.thread_name();
        debug!(thread = %name, tasks = effects.len(), "submitting procedure");

        let handle = thread::Builder::new()
            .name(name)
            .spawn(move || run_in_order(effects))
            .map_err(|e| PerformingError::failed("executor", e.to_string()))?;

        handle.join().map_err(|_| PerformingError::TaskPanicked)?
    }
}

/// Runs effects directly on the submitting thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExecutor;

impl TaskRunner for InlineExecutor {
    fn submit<T: Send + 'static>(&self, effects: Vec<Effect<T>>) -> Result<Vec<T>, PerformingError> {
        run_in_order(effects)
    }
}

fn run_in_order<T>(effects: Vec<Effect<T>>) -> Result<Vec<T>, PerformingError> {
    let mut results = Vec::with_capacity(effects.len());
    for (index, effect) in effects.into_iter().enumerate() {
        let result = effect().map_err(|error| PerformingError::TaskFailed {
            index,
            message: error.to_string(),
        })?;
        trace!(task = index, "task done");
        results.push(result);
    }
    Ok(results)
}
