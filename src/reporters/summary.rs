//! Final report rendering.
//!
//! Everything here is a pure function of a finished [`RunState`], so the
//! same snapshot always renders to the same text.

use std::fmt::Write as _;

use crate::core::aggregator::RunState;
use crate::core::config::Verbosity;
use crate::core::test::TestId;
use crate::reporters::palette::{Color, Palette};

pub const SEPARATOR_HEAVY: &str =
    "======================================================================";
pub const SEPARATOR_LIGHT: &str =
    "----------------------------------------------------------------------";

#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    pub verbosity: Verbosity,
    pub show_descriptions: bool,
    pub palette: Palette,
}

/// Renders the error/failure blocks, the timing line and the count table.
pub fn format_summary(state: &RunState, options: &SummaryOptions) -> String {
    let mut out = String::new();

    if options.verbosity != Verbosity::Quiet {
        out.push('\n');
    }

    write_error_list(&mut out, "ERROR", &state.errors, options);
    write_error_list(&mut out, "FAIL", &state.failures, options);

    let counts = state.counts();
    let palette = &options.palette;

    let _ = writeln!(out, "{}", SEPARATOR_LIGHT);
    let _ = writeln!(
        out,
        "Ran {} test{} in {:.3}s",
        counts.tests_run,
        if counts.tests_run == 1 { "" } else { "s" },
        state.elapsed.as_secs_f64()
    );
    out.push('\n');

    let _ = writeln!(out, "{} {}", palette.paint(" PASS:", Color::Green), counts.passed);
    let _ = writeln!(out, "{} {}", palette.paint(" FAIL:", Color::Red), counts.failed);
    let _ = writeln!(out, "{} {}", palette.paint("ERROR:", Color::RedBold), counts.errors);

    if counts.skipped > 0 {
        let _ = writeln!(out, "   SKIPPED:{}", counts.skipped);
    }
    if counts.expected_failures > 0 {
        let line = format!("  EXPECTED:{}", counts.expected_failures);
        let _ = writeln!(out, "{}", palette.paint(&line, Color::Green));
    }
    if counts.unexpected_successes > 0 {
        let line = format!("UNEXPECTED:{}", counts.unexpected_successes);
        let _ = writeln!(out, "{}", palette.paint(&line, Color::Red));
    }

    out.push('\n');
    out
}

fn write_error_list(
    out: &mut String,
    flavour: &str,
    entries: &[(TestId, String)],
    options: &SummaryOptions,
) {
    let palette = &options.palette;
    for (id, diagnostic) in entries {
        let _ = writeln!(out, "{}", SEPARATOR_HEAVY);
        let _ = writeln!(
            out,
            "{}: {}",
            palette.paint(&format!("[{}]", flavour), Color::RedBlink),
            palette.paint(&id.display(options.show_descriptions), Color::Cyan)
        );
        let _ = writeln!(out, "{}", SEPARATOR_LIGHT);
        let _ = writeln!(out, "{}", diagnostic);
    }
}
