//! rule/evaluator.rs
//!
//! Folds a parsed [`Rule`] into a [`MaybeDate`] (`spec` §4.4). Holds a
//! borrowed year, `NamedDateTable`, and diagnostic sink — no mutation,
//! no I/O, deterministic given its inputs (`spec` §5).

use crate::calendar::{last_wd_of_month, wd_of_month, wd_relative_to};
use crate::date::{Date, MaybeDate};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::registry::NamedDateTable;

use super::ast::{Condition, Division, Recurrence, Rule, WeekdayOrNever, YearPredicate};

pub struct Evaluator<'a> {
    year: i32,
    funcs: &'a NamedDateTable,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Evaluator<'a> {
    pub fn new(year: i32, funcs: &'a NamedDateTable, sink: &'a mut dyn DiagnosticSink) -> Self {
        Evaluator { year, funcs, sink }
    }

    pub fn eval_rule(&mut self, rule: &Rule, depth: usize) -> MaybeDate {
        match rule {
            Rule::Plain(rec) => self.eval_recurrence(rec, depth),
            Rule::Conditional {
                recurrence,
                condition,
                else_rule,
            } => {
                if self.eval_condition(condition, depth + 1) {
                    self.eval_recurrence(recurrence, depth)
                } else {
                    self.eval_rule(else_rule, depth)
                }
            }
        }
    }

    fn eval_recurrence(&mut self, rec: &Recurrence, depth: usize) -> MaybeDate {
        match rec {
            Recurrence::Never => None,
            Recurrence::Name(name) => match self.funcs.get(name) {
                Some(value) => value,
                None => {
                    self.sink
                        .warn(Diagnostic::unknown_date_function(name, depth));
                    None
                }
            },
            Recurrence::Literal { month, day } => {
                match Date::new(self.year, *month, *day) {
                    Some(d) => Some(d),
                    None => {
                        self.sink.warn(Diagnostic::invalid_literal(
                            self.year,
                            month.number(),
                            *day,
                            depth,
                        ));
                        None
                    }
                }
            }
            Recurrence::Parenthesized(inner) => self.eval_rule(inner, depth),
            Recurrence::OwmRule {
                ordinal,
                weekday,
                month,
            } => wd_of_month(self.year, *month, ordinal.get(), *weekday),
            Recurrence::LwdRule { weekday, month } => {
                Some(last_wd_of_month(self.year, *month, *weekday))
            }
            Recurrence::Offset {
                amount,
                unit,
                direction,
                base,
            } => {
                let base_date = self.eval_recurrence(base, depth + 1)?;
                Some(base_date.add_days(*amount * unit.days() * direction.as_multiplier()))
            }
            Recurrence::WdRule {
                ordinal,
                weekday,
                not_present,
                direction,
                base,
            } => {
                let anchor = self.eval_recurrence(base, depth + 1)?;
                let include_start = *not_present;
                let effective_direction = if include_start {
                    direction.negate()
                } else {
                    *direction
                };
                let result = wd_relative_to(
                    anchor,
                    *weekday,
                    effective_direction.as_multiplier(),
                    include_start,
                );
                match ordinal {
                    Some(ord) => Some(result.add_days(
                        effective_direction.as_multiplier() * 7 * (ord.get() as i64 - 1),
                    )),
                    None => Some(result),
                }
            }
        }
    }

    fn eval_condition(&mut self, condition: &Condition, depth: usize) -> bool {
        match condition {
            Condition::True => true,
            Condition::False => false,
            Condition::Or(left, right) => {
                self.eval_condition(left, depth) || self.eval_condition(right, depth)
            }
            Condition::And(left, right) => {
                self.eval_condition(left, depth) && self.eval_condition(right, depth)
            }
            Condition::Exists(rec) => self.eval_recurrence(rec, depth).is_some(),
            Condition::MonthCond {
                recurrence,
                negate,
                month,
            } => {
                let actual = self.eval_recurrence(recurrence, depth);
                let matches = matches!(actual, Some(d) if d.year() == self.year && d.month() == *month);
                matches ^ negate
            }
            Condition::WeekdayCond {
                recurrence,
                negate,
                target,
            } => {
                let actual = self.eval_recurrence(recurrence, depth);
                let matches = match target {
                    WeekdayOrNever::Never => actual.is_none(),
                    WeekdayOrNever::Weekday(wd) => {
                        matches!(actual, Some(d) if d.weekday() == *wd)
                    }
                };
                matches ^ negate
            }
            Condition::SameAs { a, negate, b } => {
                let da = self.eval_recurrence(a, depth);
                let db = self.eval_recurrence(b, depth);
                let matches = matches!((da, db), (Some(x), Some(y)) if x == y);
                matches ^ negate
            }
            Condition::DayPrepCond {
                a,
                negate,
                direction,
                b,
            } => {
                let da = self.eval_recurrence(a, depth);
                let db = self.eval_recurrence(b, depth);
                let matches = match (da, db) {
                    (Some(x), Some(y)) => {
                        direction.as_multiplier() * x.diff_days(y) > 0
                    }
                    _ => false,
                };
                matches ^ negate
            }
            Condition::Year(predicate) => self.eval_year_predicate(predicate),
        }
    }

    fn eval_year_predicate(&self, predicate: &YearPredicate) -> bool {
        match predicate {
            YearPredicate::Division { negate, division } => {
                let matches = match division {
                    Division::Leap => is_leap_year(self.year),
                    Division::NumberMod { remainder, modulus } => match modulus {
                        Some(m) => (self.year as i64).rem_euclid(*m) == *remainder,
                        None => self.year as i64 == *remainder,
                    },
                };
                matches ^ negate
            }
            YearPredicate::Compare {
                negate,
                direction,
                number,
            } => {
                let matches = direction.as_multiplier() * (self.year as i64 - *number) > 0;
                matches ^ negate
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
