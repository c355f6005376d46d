//! Invocation context shared by every stage of a discovery pass.

/// Who is running discovery and with which overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContext {
    /// Task name; scopes the execution record store and the run cache.
    pub task: String,
    /// Run-now override: bypasses interval gating for this pass.
    pub run_now: bool,
}

impl TaskContext {
    /// Create a context for `task` without overrides.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            run_now: false,
        }
    }

    /// Set the run-now override.
    #[must_use]
    pub fn with_run_now(mut self, run_now: bool) -> Self {
        self.run_now = run_now;
        self
    }
}
