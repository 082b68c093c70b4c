//! Shutdown hooks.

/// Run-once registry of cleanup callbacks invoked when the program is about
/// to terminate.
///
/// Hooks run in registration order, receive no arguments (in particular no
/// error information), and run at most once; registration after the hooks
/// have run is ignored.
#[derive(Default)]
pub struct ExitHooks {
    hooks: Vec<Box<dyn FnOnce()>>,
    has_run: bool,
}

impl ExitHooks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            hooks: Vec::new(),
            has_run: false,
        }
    }

    /// Registers a hook to run at shutdown.
    pub fn register<F>(&mut self, hook: F)
    where
        F: FnOnce() + 'static,
    {
        if !self.has_run {
            self.hooks.push(Box::new(hook));
        }
    }

    /// Runs all registered hooks, once.
    pub fn run(&mut self) {
        if self.has_run {
            return;
        }
        self.has_run = true;
        for hook in self.hooks.drain(..) {
            hook();
        }
    }

    /// Returns the number of registered hooks still waiting to run.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hooks are waiting to run.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for ExitHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExitHooks")
            .field("hooks", &self.hooks.len())
            .field("has_run", &self.has_run)
            .finish()
    }
}
