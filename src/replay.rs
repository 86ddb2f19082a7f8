//! Replays recorded outcomes from a JSON-lines stream.
//!
//! Each non-blank line describes one completed test:
//!
//! ```json
//! {"test": "test_div", "description": "Divides.", "outcome": {"kind": "error", "diagnostic": "ZeroDivisionError"}}
//! ```

use std::io::{BufRead, ErrorKind};
use log::warn;
use serde::{Serialize, Deserialize};

use crate::core::error::{ReportError, Result};
use crate::core::test::{Outcome, TestCase, TestId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedCase {
    pub test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub outcome: Outcome,
}

impl RecordedCase {
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(|e| ReportError::ReplayError(e.to_string()))
    }
}

impl TestCase for RecordedCase {
    fn id(&self) -> TestId {
        let id = TestId::new(self.test.clone());
        match &self.description {
            Some(description) => id.with_description(description),
            None => id,
        }
    }

    fn run(&self) -> Outcome {
        self.outcome.clone()
    }
}

/// Lazily yields recorded cases from a JSON-lines reader.
///
/// Blank lines are ignored. Lines that are not UTF-8 or not a valid record
/// are logged and skipped. A read error is yielded once and ends the stream.
pub struct CaseReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl<R: BufRead> CaseReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for CaseReader<R> {
    type Item = Result<RecordedCase>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let text = match std::str::from_utf8(&self.buf) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!("Skipping line {}: not valid UTF-8 ({})", self.line, e);
                            continue;
                        }
                    };
                    if text.trim().is_empty() {
                        continue;
                    }
                    match RecordedCase::parse(text) {
                        Ok(case) => return Some(Ok(case)),
                        Err(e) => warn!("Skipping line {}: {}", self.line, e),
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(ReportError::IoError(e)));
                }
            }
        }
        None
    }
}

pub fn read_cases<R: BufRead>(reader: R) -> CaseReader<R> {
    CaseReader::new(reader)
}
