//! rule/ast.rs
//!
//! The parse tree (`spec` §3 "ParseTree", §4.3 grammar). Each grammar
//! production maps onto one variant; `rule::parser` builds this tree,
//! `rule::evaluator` folds it. Kept as a pure data structure (no year or
//! `NamedDateTable` baked in) so it can be fuzzed directly by property
//! tests, per the "evaluator as tree-fold, not streaming transformer"
//! design choice.

use crate::model::{Direction, Month, Ordinal, Unit, WeekDay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Plain(Recurrence),
    Conditional {
        recurrence: Recurrence,
        condition: Condition,
        else_rule: Box<Rule>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    Offset {
        amount: i64,
        unit: Unit,
        direction: Direction,
        base: Box<Recurrence>,
    },
    OwmRule {
        ordinal: Ordinal,
        weekday: WeekDay,
        month: Month,
    },
    WdRule {
        ordinal: Option<Ordinal>,
        weekday: WeekDay,
        not_present: bool,
        direction: Direction,
        base: Box<Recurrence>,
    },
    LwdRule {
        weekday: WeekDay,
        month: Month,
    },
    Parenthesized(Box<Rule>),
    Literal {
        month: Month,
        day: u32,
    },
    Never,
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Or(Box<Condition>, Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    True,
    False,
    Exists(Recurrence),
    MonthCond {
        recurrence: Recurrence,
        negate: bool,
        month: Month,
    },
    WeekdayCond {
        recurrence: Recurrence,
        negate: bool,
        target: WeekdayOrNever,
    },
    SameAs {
        a: Recurrence,
        negate: bool,
        b: Recurrence,
    },
    DayPrepCond {
        a: Recurrence,
        negate: bool,
        direction: Direction,
        b: Recurrence,
    },
    Year(YearPredicate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekdayOrNever {
    Weekday(WeekDay),
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearPredicate {
    Division {
        negate: bool,
        division: Division,
    },
    Compare {
        negate: bool,
        direction: Direction,
        number: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Division {
    Leap,
    NumberMod { remainder: i64, modulus: Option<i64> },
}
