use std::time::{Duration, Instant};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Serialize, Deserialize};

use crate::core::error::{ReportError, Result};
use crate::core::test::{Outcome, TestId};

/// Accumulated state of one run.
///
/// Created fresh by [`OutcomeAggregator::start`] and handed out by
/// [`OutcomeAggregator::finish`]; rendering only ever reads it.
#[derive(Debug, Clone)]
pub struct RunState {
    pub errors: Vec<(TestId, String)>,
    pub failures: Vec<(TestId, String)>,
    pub skipped: Vec<(TestId, String)>,
    pub expected_failures: Vec<(TestId, String)>,
    pub unexpected_successes: Vec<TestId>,
    pub successes: usize,
    pub tests_run: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub interrupted: bool,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
            expected_failures: Vec::new(),
            unexpected_successes: Vec::new(),
            successes: 0,
            tests_run: 0,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            interrupted: false,
        }
    }

    pub fn counts(&self) -> RunCounts {
        RunCounts {
            tests_run: self.tests_run,
            passed: self.successes,
            failed: self.failures.len(),
            errors: self.errors.len(),
            skipped: self.skipped.len(),
            expected_failures: self.expected_failures.len(),
            unexpected_successes: self.unexpected_successes.len(),
        }
    }

    /// Returns `true` if no test failed or errored.
    pub fn was_successful(&self) -> bool {
        self.counts().was_successful()
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-kind totals of a run, handed back to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounts {
    pub tests_run: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub skipped: usize,
    pub expected_failures: usize,
    pub unexpected_successes: usize,
}

impl RunCounts {
    pub fn total(&self) -> usize {
        self.passed
            + self.failed
            + self.errors
            + self.skipped
            + self.expected_failures
            + self.unexpected_successes
    }

    pub fn was_successful(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

/// Classifies outcome notifications into a [`RunState`].
#[derive(Debug)]
pub struct OutcomeAggregator {
    state: RunState,
    started: Option<Instant>,
    should_stop: bool,
    finished: bool,
}

impl OutcomeAggregator {
    pub fn new() -> Self {
        Self {
            state: RunState::new(),
            started: None,
            should_stop: false,
            finished: false,
        }
    }

    /// Begins a run, discarding anything recorded before.
    pub fn start(&mut self) {
        self.state = RunState::new();
        self.started = Some(Instant::now());
        self.should_stop = false;
        self.finished = false;
        debug!("Run started at {}", self.state.started_at.to_rfc3339());
    }

    /// Records the outcome of one completed test.
    pub fn record(&mut self, id: &TestId, outcome: Outcome) -> Result<()> {
        if self.finished {
            return Err(ReportError::AlreadyFinished);
        }
        if self.started.is_none() {
            self.start();
        }

        let state = &mut self.state;
        state.tests_run += 1;
        match outcome {
            Outcome::Success => state.successes += 1,
            Outcome::Failure { diagnostic } => state.failures.push((id.clone(), diagnostic)),
            Outcome::Error { diagnostic } => state.errors.push((id.clone(), diagnostic)),
            Outcome::Skip { reason } => state.skipped.push((id.clone(), reason)),
            Outcome::ExpectedFailure { diagnostic } => {
                state.expected_failures.push((id.clone(), diagnostic))
            }
            Outcome::UnexpectedSuccess => state.unexpected_successes.push(id.clone()),
        }

        Ok(())
    }

    /// Marks the run as stopped early; the summary still renders.
    pub fn stop(&mut self) {
        if !self.should_stop {
            debug!("Run stopped after {} tests", self.state.tests_run);
        }
        self.should_stop = true;
        self.state.interrupted = true;
    }

    pub fn should_stop(&self) -> bool {
        self.should_stop
    }

    pub fn tests_run(&self) -> usize {
        self.state.tests_run
    }

    /// Ends the run and returns its snapshot. Can only be called once.
    pub fn finish(&mut self) -> Result<RunState> {
        if self.finished {
            return Err(ReportError::AlreadyFinished);
        }
        self.finished = true;
        self.state.elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        debug!(
            "Run finished: {} tests in {:.3}s",
            self.state.tests_run,
            self.state.elapsed.as_secs_f64()
        );
        Ok(self.state.clone())
    }
}

impl Default for OutcomeAggregator {
    fn default() -> Self {
        Self::new()
    }
}
