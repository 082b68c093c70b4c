//! Runtime orchestration for the demonstrations.
//!
//! The DemoRuntime struct wires the components together:
//! - RunLoop for scheduling and draining asynchronous work
//! - IoDriver for file and network operations
//! - Console for trace output
//! - ExitHooks for the shutdown goodbye

use crate::demos;
use crate::error::{CliError, CliResult};
use async_core::RunLoop;
use host_io::{Console, ExitHooks, Fetcher, FileReader, IoDriver};
use std::rc::Rc;

/// Inputs the demonstrations are parameterized over.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// File read by the file demonstration
    pub file: String,
    /// URL fetched by the network demonstrations
    pub url: String,
}

/// Runs demonstrations against a shared loop, driver and console.
pub struct DemoRuntime {
    run_loop: RunLoop,
    driver: IoDriver,
    console: Rc<Console>,
    exit_hooks: ExitHooks,
    options: DemoOptions,
}

impl DemoRuntime {
    /// Creates a runtime tracing to stdout.
    pub fn new(options: DemoOptions) -> CliResult<Self> {
        Self::with_console(options, Rc::new(Console::new()))
    }

    /// Creates a runtime tracing to the given console.
    pub fn with_console(options: DemoOptions, console: Rc<Console>) -> CliResult<Self> {
        let driver = IoDriver::new()?;
        let mut exit_hooks = ExitHooks::new();
        let c = console.clone();
        exit_hooks.register(move || c.print("Goodbye"));
        Ok(Self {
            run_loop: RunLoop::new(),
            driver,
            console,
            exit_hooks,
            options,
        })
    }

    /// Names of all demonstrations, in presentation order.
    pub fn demos() -> &'static [&'static str] {
        demos::DEMO_NAMES
    }

    /// Runs one demonstration and drains the loop.
    pub fn run_demo(&mut self, name: &str) -> CliResult<()> {
        let scheduler = self.run_loop.scheduler();
        match name {
            "events" => demos::events(&self.console)?,
            "ordering" => demos::ordering(&scheduler, &self.console)?,
            "chain" => demos::chain(&scheduler, &self.console)?,
            "handle" => demos::handle(&scheduler, &self.console)?,
            "files" => {
                let reader = FileReader::new(&self.driver, &scheduler);
                demos::files(&reader, &self.console, &self.options.file)?;
            }
            "fetch" => {
                let fetcher = Fetcher::new(&self.driver, &scheduler);
                demos::fetch(&fetcher, &self.console, &self.options.url)?;
            }
            "join" => {
                let fetcher = Fetcher::new(&self.driver, &scheduler);
                demos::join(&fetcher, &scheduler, &self.console, &self.options.url)?;
            }
            other => return Err(CliError::UnknownDemo(other.to_string())),
        }
        self.run_loop.run_until_done()?;
        Ok(())
    }

    /// Runs every demonstration in presentation order.
    pub fn run_all(&mut self) -> CliResult<()> {
        for name in Self::demos() {
            self.console.print(&format!("--- {name} ---"));
            self.run_demo(name)?;
        }
        Ok(())
    }

    /// Registers an additional shutdown hook.
    pub fn on_exit<F>(&mut self, hook: F)
    where
        F: FnOnce() + 'static,
    {
        self.exit_hooks.register(hook);
    }

    /// Runs the shutdown hooks; safe to call more than once.
    pub fn finish(&mut self) {
        self.exit_hooks.run();
    }
}

impl std::fmt::Debug for DemoRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoRuntime")
            .field("options", &self.options)
            .finish()
    }
}
