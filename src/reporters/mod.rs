pub mod palette;
pub mod sink;
pub mod summary;
pub mod text;

use crate::core::aggregator::RunState;
use crate::core::error::Result;
use crate::core::test::{Outcome, TestId};

/// Reporter trait for receiving test lifecycle notifications
pub trait Reporter {
    /// Report the start of a run
    fn start_run(&mut self) -> Result<()>;

    /// Report that a test is about to run
    fn start_test(&mut self, id: &TestId) -> Result<()>;

    /// Report the outcome of a completed test
    fn add_outcome(&mut self, id: &TestId, outcome: Outcome) -> Result<()>;

    /// Ask the driver to stop scheduling tests
    fn stop(&mut self);

    /// Whether [`Reporter::stop`] has been called
    fn should_stop(&self) -> bool;

    /// Report the end of the run and return its final state
    fn finish(&mut self) -> Result<RunState>;
}
