//! diagnostics.rs
//!
//! Non-fatal diagnostics raised while evaluating a rule: an unknown
//! identifier reference, or a date literal that cannot be converted to a
//! real calendar date. Both reduce the offending sub-expression to absence
//! and are reported through an injected [`DiagnosticSink`] rather than a
//! logging framework — no retrieved example repo depends on `log`/
//! `tracing`, and the teacher's own sole observed warning site (a
//! commented-out `println!` in its `date` module) is exactly this shape:
//! a message, printed, with no structured logging machinery behind it.

use std::fmt;

/// A single non-fatal warning, with an optional hint about how deep in the
/// rule's sub-expression tree it was raised (mirrors the "stack-depth
/// hint" mentioned in the spec's diagnostic sink contract).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub depth: usize,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, depth: usize) -> Self {
        Diagnostic {
            message: message.into(),
            depth,
        }
    }

    pub fn unknown_date_function(name: &str, depth: usize) -> Self {
        Diagnostic::new(format!("Unknown date function {name} referenced."), depth)
    }

    pub fn invalid_literal(year: i32, month: u32, day: u32, depth: usize) -> Self {
        Diagnostic::new(
            format!("Date literal cannot be converted: {year}/{month}/{day}"),
            depth,
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The collaborator interface diagnostics are reported through.
pub trait DiagnosticSink {
    fn warn(&mut self, diagnostic: Diagnostic);
}

/// The default sink: writes each diagnostic to the host's standard warning
/// channel (stderr).
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn warn(&mut self, diagnostic: Diagnostic) {
        eprintln!("{diagnostic}");
    }
}

/// A sink that collects diagnostics in memory instead of printing them;
/// useful for tests and for callers that want to surface warnings in their
/// own UI rather than on stderr.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink for CollectingSink {
    fn warn(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
