//! rule
//!
//! The rule language: tokenizer (`lexer`), abstract syntax (`ast`),
//! recursive-descent parser (`parser`), and tree-fold evaluator
//! (`evaluator`). [`Parser`] is the public facade, preserving the
//! external `make_parser(year, funcs)` / `parser.parse(rule)` contract
//! from `spec` §6 while internally composing lex → parse → fold.

pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod token;

use crate::date::MaybeDate;
use crate::diagnostics::{DiagnosticSink, StderrSink};
use crate::error::ParseError;
use crate::registry::NamedDateTable;

use evaluator::Evaluator;

/// Builds a [`Parser`] scoped to `year` and `funcs`. Mirrors
/// `make_parser(year, funcs) -> Parser` from `spec` §6.
pub fn make_parser(year: i32, funcs: NamedDateTable) -> Parser {
    Parser { year, funcs }
}

/// A parser bound to a single year and a resolved [`NamedDateTable`].
/// Parsing a rule string is a pure function of these plus the rule text
/// (`spec` §5: "parsing is pure").
pub struct Parser {
    year: i32,
    funcs: NamedDateTable,
}

impl Parser {
    /// Parses and evaluates `rule`, reporting any non-fatal diagnostics
    /// to the default [`StderrSink`]. Fails with [`ParseError`] when
    /// `rule` does not match the grammar.
    pub fn parse(&self, rule: &str) -> Result<MaybeDate, ParseError> {
        let mut sink = StderrSink;
        self.parse_with_sink(rule, &mut sink)
    }

    /// As [`Parser::parse`], but routes diagnostics through a
    /// caller-supplied sink instead of stderr.
    pub fn parse_with_sink(
        &self,
        rule: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<MaybeDate, ParseError> {
        let tree = parser::parse(rule)?;
        let mut evaluator = Evaluator::new(self.year, &self.funcs, sink);
        Ok(evaluator.eval_rule(&tree, 0))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn funcs(&self) -> &NamedDateTable {
        &self.funcs
    }
}
