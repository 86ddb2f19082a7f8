use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::process;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use log::{debug, warn};

use crate::core::aggregator::RunState;
use crate::core::error::{ReportError, Result};
use crate::core::test::{Outcome, TestCase};
use crate::reporters::Reporter;

/// Runs test cases one after another and feeds their outcomes to a reporter.
pub struct SuiteRunner<R: Reporter> {
    reporter: R,
    failfast: bool,
    interrupted: Arc<AtomicBool>,
}

impl<R: Reporter> SuiteRunner<R> {
    /// Create a new suite runner
    pub fn new(reporter: R) -> Self {
        Self {
            reporter,
            failfast: false,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop after the first failure, error or unexpected success.
    pub fn failfast(mut self, failfast: bool) -> Self {
        self.failfast = failfast;
        self
    }

    /// Handle that stops the run when set.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    /// Set up interrupt handler
    ///
    /// The first Ctrl-C stops the run after the current test; the second
    /// exits the process immediately.
    pub fn install_interrupt_handler(&self) -> Result<()> {
        let handler = InterruptHandler::new(self.interrupted.clone());

        ctrlc::set_handler(move || match handler.on_signal() {
            InterruptAction::Stop => {
                eprintln!("\nInterrupted, finishing after the current test (Ctrl-C again to exit)");
            }
            InterruptAction::Exit => process::exit(INTERRUPT_EXIT_CODE),
        })
        .map_err(|e| ReportError::ConfigError(format!("Failed to set Ctrl-C handler: {}", e)))?;

        Ok(())
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Runs every case in order and returns the finished run state.
    pub fn run<I>(&mut self, cases: I) -> Result<RunState>
    where
        I: IntoIterator,
        I::Item: TestCase,
    {
        self.try_run(cases.into_iter().map(Ok))
    }

    /// Like [`SuiteRunner::run`], for case sources that can fail.
    ///
    /// A source error stops the run; the summary of what ran so far is still
    /// written before the error is returned.
    pub fn try_run<I, T>(&mut self, cases: I) -> Result<RunState>
    where
        I: IntoIterator<Item = Result<T>>,
        T: TestCase,
    {
        self.reporter.start_run()?;

        for case in cases {
            let case = match case {
                Ok(case) => case,
                Err(e) => {
                    self.reporter.stop();
                    self.reporter.finish()?;
                    return Err(e);
                }
            };

            if self.is_interrupted() {
                warn!("Run interrupted, skipping remaining tests");
                self.reporter.stop();
            }
            if self.reporter.should_stop() {
                break;
            }

            let id = case.id();
            self.reporter.start_test(&id)?;

            let outcome = run_guarded(&case);
            let stops = outcome.kind().stops_failfast();
            self.reporter.add_outcome(&id, outcome)?;

            if stops && self.failfast {
                debug!("Stopping after {} (failfast)", id);
                self.reporter.stop();
            }
        }

        self.reporter.finish()
    }
}

/// Exit code used when a second interrupt ends the process.
pub const INTERRUPT_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    Stop,
    Exit,
}

/// Two-stage Ctrl-C handling: stop gracefully first, exit on a repeat.
#[derive(Debug)]
pub struct InterruptHandler {
    interrupted: Arc<AtomicBool>,
    signals: AtomicUsize,
}

impl InterruptHandler {
    pub fn new(interrupted: Arc<AtomicBool>) -> Self {
        Self {
            interrupted,
            signals: AtomicUsize::new(0),
        }
    }

    pub fn on_signal(&self) -> InterruptAction {
        if self.signals.fetch_add(1, Ordering::SeqCst) == 0 {
            self.interrupted.store(true, Ordering::SeqCst);
            InterruptAction::Stop
        } else {
            InterruptAction::Exit
        }
    }
}

/// Runs one case, turning a panic into an `Error` outcome.
fn run_guarded<T: TestCase>(case: &T) -> Outcome {
    match panic::catch_unwind(AssertUnwindSafe(|| case.run())) {
        Ok(outcome) => outcome,
        Err(payload) => Outcome::error(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked with a non-string payload".to_string()
    }
}
