//! annual
//!
//! Evaluates human-readable recurrence rules ("second Sunday of May",
//! "49 days after easter", "Sunday after jun 1 if year is leap else
//! never") into a concrete calendar date for a given Gregorian year, or
//! into the absence of a date.
//!
//! The crate is organized leaves-first:
//!
//! - [`model`] / [`date`]: shared value types (`Month`, `WeekDay`,
//!   `Direction`, `Unit`, `Ordinal`, `Date`, `MaybeDate`).
//! - [`calendar`]: n-th/last weekday of month, weekday-relative-to-date.
//! - [`easter`]: Western, Orthodox-in-Gregorian, and Julian Easter.
//! - [`rule`]: the recurrence-rule language — lexer, AST, parser,
//!   evaluator.
//! - [`registry`]: the named-function registry producing a
//!   [`registry::NamedDateTable`] for a year.
//! - [`diagnostics`] / [`error`]: non-fatal diagnostics and fatal error
//!   types.
//!
//! No part of this crate touches the filesystem, the network, or a
//! clock; every operation is a pure function of its explicit inputs.

#![forbid(unsafe_code)]

pub mod calendar;
pub mod date;
pub mod diagnostics;
pub mod easter;
pub mod error;
pub mod model;
pub mod registry;
pub mod rule;

use diagnostics::StderrSink;
use registry::{FunctionRegistry, NamedDateTable, NoPlugins};
use rule::Parser;

/// Constructs a registry pre-populated with the built-in Easter
/// producers, optionally attempting plugin discovery.
///
/// Plugin discovery on the host platform is out of scope (`spec` §1);
/// `auto_plugins` is accepted for API parity with the source contract
/// but currently always resolves against [`registry::NoPlugins`]. Callers
/// who need real discovery should build their own [`registry::PluginSource`]
/// and call [`FunctionRegistry::add_from_plugins`] directly.
pub fn create_registry(auto_plugins: bool) -> FunctionRegistry {
    let mut registry = FunctionRegistry::with_builtins();
    if auto_plugins {
        let _ = registry.add_from_plugins(&NoPlugins, &[], &[]);
    }
    registry
}

/// Builds a [`Parser`] scoped to `year`, using the default stderr
/// diagnostic sink for any warnings raised while parsing rules later.
/// Equivalent to `make_parser(year, funcs)` from `spec` §6.
pub fn make_parser(year: i32, funcs: NamedDateTable) -> Parser {
    rule::make_parser(year, funcs)
}

/// Convenience wrapper combining `create_registry`, `evaluate`, and
/// `make_parser` for the common case of a single ad hoc rule
/// evaluation against the built-in producers.
pub fn evaluate_rule(year: i32, rule: &str) -> Result<date::MaybeDate, error::ParseError> {
    let registry = create_registry(false);
    let funcs = registry.evaluate(year);
    let parser = make_parser(year, funcs);
    let mut sink = StderrSink;
    parser.parse_with_sink(rule, &mut sink)
}
