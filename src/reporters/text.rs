use std::io;
use log::debug;

use crate::core::aggregator::{OutcomeAggregator, RunState};
use crate::core::config::{ReporterConfig, Verbosity};
use crate::core::error::Result;
use crate::core::test::{Outcome, OutcomeKind, TestId};
use crate::reporters::palette::{Color, Palette};
use crate::reporters::sink::TextSink;
use crate::reporters::summary::{format_summary, SummaryOptions};
use crate::reporters::Reporter;

pub const IN_LINE_SEPARATOR: &str = " ... ";
/// Width of the title field in verbose lines, in characters.
pub const TITLE_WIDTH: usize = 58;
const SOFT_TAB: &str = "  ";

/// Streams colored per-test output and prints the final summary.
pub struct TextReporter<S: TextSink> {
    sink: S,
    verbosity: Verbosity,
    show_descriptions: bool,
    palette: Palette,
    aggregator: OutcomeAggregator,
}

impl<S: TextSink> TextReporter<S> {
    /// Create a new text reporter writing to `sink`.
    ///
    /// The sink is not assumed to be a terminal, so `ColorChoice::Auto` only
    /// colors when forced through the environment; use
    /// [`TextReporter::with_palette`] for terminal streams.
    pub fn new(sink: S, config: &ReporterConfig) -> Self {
        Self::with_palette(sink, config, Palette::new(config.color, false))
    }

    pub fn with_palette(sink: S, config: &ReporterConfig, palette: Palette) -> Self {
        Self {
            sink,
            verbosity: config.verbosity(),
            show_descriptions: config.show_descriptions,
            palette,
            aggregator: OutcomeAggregator::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            verbosity: self.verbosity,
            show_descriptions: self.show_descriptions,
            palette: self.palette,
        }
    }

    /// Writes one aligned `title ... [FLAVOUR]` line.
    fn write_description_line(
        &mut self,
        title: &str,
        flavour: &str,
        color: Option<Color>,
    ) -> io::Result<()> {
        let title = fit_title(title);
        self.sink.write_str(SOFT_TAB)?;
        self.sink.write_str(&self.palette.paint_opt(&title, color))?;
        self.sink.write_str(IN_LINE_SEPARATOR)?;
        let flavour = self.palette.paint_opt(flavour, color);
        self.sink.write_line(Some(&flavour))
    }

    fn write_progress(&mut self, id: &TestId, outcome: &Outcome) -> io::Result<()> {
        let kind = outcome.kind();
        match self.verbosity {
            Verbosity::Quiet => Ok(()),
            Verbosity::Dots => {
                let glyph = self.palette.paint_opt(glyph(kind), color(kind));
                self.sink.write_str(&glyph)?;
                self.sink.flush_sink()
            }
            Verbosity::Verbose => {
                let title = id.display(self.show_descriptions);
                self.write_description_line(&title, &flavour(outcome), color(kind))
            }
        }
    }
}

impl<S: TextSink> Reporter for TextReporter<S> {
    fn start_run(&mut self) -> Result<()> {
        self.aggregator.start();
        Ok(())
    }

    fn start_test(&mut self, id: &TestId) -> Result<()> {
        debug!("Starting test: {}", id);
        Ok(())
    }

    fn add_outcome(&mut self, id: &TestId, outcome: Outcome) -> Result<()> {
        self.aggregator.record(id, outcome.clone())?;
        self.write_progress(id, &outcome)?;
        Ok(())
    }

    fn stop(&mut self) {
        self.aggregator.stop();
    }

    fn should_stop(&self) -> bool {
        self.aggregator.should_stop()
    }

    fn finish(&mut self) -> Result<RunState> {
        let state = self.aggregator.finish()?;
        let summary = format_summary(&state, &self.summary_options());
        self.sink.write_str(&summary)?;
        self.sink.flush_sink()?;
        Ok(state)
    }
}

/// Cuts `title` to [`TITLE_WIDTH`] characters or pads it with spaces.
pub fn fit_title(title: &str) -> String {
    let len = title.chars().count();
    if len > TITLE_WIDTH {
        title.chars().take(TITLE_WIDTH).collect()
    } else {
        format!("{}{}", title, " ".repeat(TITLE_WIDTH - len))
    }
}

/// Quotes `text` the way a Python `repr()` of a string does.
pub fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

/// The text after the separator in a verbose line.
pub fn flavour(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success => "[PASS]".to_string(),
        Outcome::Failure { .. } => "[FAIL]".to_string(),
        Outcome::Error { .. } => "[ERROR]".to_string(),
        Outcome::ExpectedFailure { .. } => "[EXPECTED]".to_string(),
        Outcome::UnexpectedSuccess => "[UNEXPECTED]".to_string(),
        Outcome::Skip { reason } => format!("skipped {}", quote(reason)),
    }
}

pub fn glyph(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Success => ".",
        OutcomeKind::Failure => "F",
        OutcomeKind::Error => "E",
        OutcomeKind::ExpectedFailure => "x",
        OutcomeKind::UnexpectedSuccess => "u",
        OutcomeKind::Skip => "s",
    }
}

pub fn color(kind: OutcomeKind) -> Option<Color> {
    match kind {
        OutcomeKind::Success | OutcomeKind::ExpectedFailure => Some(Color::Green),
        OutcomeKind::Failure | OutcomeKind::UnexpectedSuccess => Some(Color::Red),
        OutcomeKind::Error => Some(Color::RedBold),
        OutcomeKind::Skip => None,
    }
}
