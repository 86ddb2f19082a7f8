use std::fmt;
use serde::{Serialize, Deserialize};

/// Display handle for one test invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestId {
    pub name: String,
    pub description: Option<String>,
}

impl TestId {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Attaches a description; only its first non-blank line is kept.
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = description
            .as_ref()
            .trim()
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string);
        self
    }

    /// Returns the string shown for this test.
    ///
    /// With `show_descriptions` set and a description present this is
    /// `"<name>\n<description>"`, otherwise just the name.
    pub fn display(&self, show_descriptions: bool) -> String {
        match (&self.description, show_descriptions) {
            (Some(description), true) => format!("{}\n{}", self.name, description),
            _ => self.name.clone(),
        }
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The outcome of a single test.
///
/// Diagnostics and reasons are opaque text; they are stored and printed
/// exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure { diagnostic: String },
    Error { diagnostic: String },
    Skip { reason: String },
    ExpectedFailure { diagnostic: String },
    UnexpectedSuccess,
}

impl Outcome {
    pub fn failure(diagnostic: impl Into<String>) -> Self {
        Outcome::Failure { diagnostic: diagnostic.into() }
    }

    pub fn error(diagnostic: impl Into<String>) -> Self {
        Outcome::Error { diagnostic: diagnostic.into() }
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Outcome::Skip { reason: reason.into() }
    }

    pub fn expected_failure(diagnostic: impl Into<String>) -> Self {
        Outcome::ExpectedFailure { diagnostic: diagnostic.into() }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success => OutcomeKind::Success,
            Outcome::Failure { .. } => OutcomeKind::Failure,
            Outcome::Error { .. } => OutcomeKind::Error,
            Outcome::Skip { .. } => OutcomeKind::Skip,
            Outcome::ExpectedFailure { .. } => OutcomeKind::ExpectedFailure,
            Outcome::UnexpectedSuccess => OutcomeKind::UnexpectedSuccess,
        }
    }
}

/// Field-less mirror of [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Failure,
    Error,
    Skip,
    ExpectedFailure,
    UnexpectedSuccess,
}

impl OutcomeKind {
    /// Returns `true` for outcomes that make the run unsuccessful.
    pub fn is_failure(&self) -> bool {
        matches!(self, OutcomeKind::Failure | OutcomeKind::Error)
    }

    /// Returns `true` for outcomes that end a failfast run.
    pub fn stops_failfast(&self) -> bool {
        matches!(
            self,
            OutcomeKind::Failure | OutcomeKind::Error | OutcomeKind::UnexpectedSuccess
        )
    }
}

/// A single runnable test.
pub trait TestCase {
    /// Returns the identifier used for display.
    fn id(&self) -> TestId;

    /// Executes the test.
    fn run(&self) -> Outcome;
}

/// A test case backed by a closure.
pub struct FnCase<F> {
    id: TestId,
    body: F,
}

impl<F> FnCase<F>
where
    F: Fn() -> Outcome,
{
    pub fn new(id: TestId, body: F) -> Self {
        Self { id, body }
    }
}

impl<F> TestCase for FnCase<F>
where
    F: Fn() -> Outcome,
{
    fn id(&self) -> TestId {
        self.id.clone()
    }

    fn run(&self) -> Outcome {
        (self.body)()
    }
}

impl<T: TestCase + ?Sized> TestCase for Box<T> {
    fn id(&self) -> TestId {
        (**self).id()
    }

    fn run(&self) -> Outcome {
        (**self).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_kind_is_failure() {
        assert!(OutcomeKind::Failure.is_failure());
        assert!(OutcomeKind::Error.is_failure());
        assert!(!OutcomeKind::Success.is_failure());
        assert!(!OutcomeKind::Skip.is_failure());
        assert!(!OutcomeKind::ExpectedFailure.is_failure());
        assert!(!OutcomeKind::UnexpectedSuccess.is_failure());
    }

    #[test]
    fn test_outcome_kind_stops_failfast() {
        assert!(OutcomeKind::Failure.stops_failfast());
        assert!(OutcomeKind::Error.stops_failfast());
        assert!(OutcomeKind::UnexpectedSuccess.stops_failfast());
        assert!(!OutcomeKind::Success.stops_failfast());
        assert!(!OutcomeKind::Skip.stops_failfast());
        assert!(!OutcomeKind::ExpectedFailure.stops_failfast());
    }

    #[test]
    fn test_docstring_style_description() {
        let id = TestId::new("test_add").with_description("\n    Adds two numbers.\n    More.\n    ");
        assert_eq!(id.description.as_deref(), Some("Adds two numbers."));
        assert_eq!(id.display(true), "test_add\nAdds two numbers.");
    }

    #[test]
    fn test_display_with_description() {
        let id = TestId::new("test_add").with_description("Adds two numbers.\nMore text.");
        assert_eq!(id.description.as_deref(), Some("Adds two numbers."));
        assert_eq!(id.display(true), "test_add\nAdds two numbers.");
        assert_eq!(id.display(false), "test_add");
        assert_eq!(id.to_string(), "test_add");
    }

    #[test]
    fn test_blank_description_is_dropped() {
        let id = TestId::new("test_blank").with_description("   ");
        assert!(id.description.is_none());
        assert_eq!(id.display(true), "test_blank");
    }

    #[test]
    fn test_outcome_deserialization() {
        let outcome: Outcome =
            serde_json::from_str(r#"{"kind": "skip", "reason": "requires network"}"#).unwrap();
        assert_eq!(outcome, Outcome::skip("requires network"));

        let outcome: Outcome = serde_json::from_str(r#"{"kind": "unexpected_success"}"#).unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::UnexpectedSuccess);
    }

    #[test]
    fn test_fn_case_runs_closure() {
        let case = FnCase::new(TestId::new("test_boom"), || Outcome::error("ValueError: boom"));
        assert_eq!(case.id().name, "test_boom");
        assert_eq!(case.run(), Outcome::error("ValueError: boom"));
    }
}
