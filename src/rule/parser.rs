//! rule/parser.rs
//!
//! Recursive-descent parser for the rule grammar (`spec` §4.3). The
//! grammar is LALR(1)-shaped but every production needs at most one
//! token of lookahead to pick a branch, so a hand-written descent with a
//! single `peek()` plays the same role a generated table would without
//! pulling in a parser-generator dependency the teacher never uses.
//!
//! Parsing here is a pure function from tokens to [`ast::Rule`]: no year,
//! no `NamedDateTable`. `rule::evaluator` performs the fold that needs
//! those, per the two-phase "parse then fold" design.

use crate::error::ParseError;
use crate::model::{Direction, Month, Ordinal, Unit, WeekDay};

use super::ast::{Condition, Division, Recurrence, Rule, WeekdayOrNever, YearPredicate};
use super::lexer::lex;
use super::token::{Token, TokenKind};

pub fn parse(input: &str) -> Result<Rule, ParseError> {
    let tokens = lex(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let rule = parser.parse_rule()?;
    parser.expect_eof()?;
    Ok(rule)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn peek_pos(&self) -> usize {
        self.tokens[self.pos].start
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.tokens[self.pos].kind.clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_expected(&kind.to_string()))
        }
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if matches!(self.peek(), TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.error_expected("end of input"))
        }
    }

    fn error_expected(&self, expected: &str) -> ParseError {
        ParseError::expected(self.peek_pos(), expected, self.peek())
    }

    fn expect_month(&mut self) -> Result<Month, ParseError> {
        match self.advance() {
            TokenKind::Month(m) => Ok(m),
            other => Err(ParseError::expected(
                self.tokens[self.pos.saturating_sub(1)].start,
                "a month",
                other,
            )),
        }
    }

    fn expect_weekday(&mut self) -> Result<WeekDay, ParseError> {
        match self.advance() {
            TokenKind::Weekday(w) => Ok(w),
            other => Err(ParseError::expected(
                self.tokens[self.pos.saturating_sub(1)].start,
                "a weekday",
                other,
            )),
        }
    }

    fn expect_number(&mut self) -> Result<i64, ParseError> {
        match self.advance() {
            TokenKind::Number(n) => Ok(n),
            other => Err(ParseError::expected(
                self.tokens[self.pos.saturating_sub(1)].start,
                "a number",
                other,
            )),
        }
    }

    fn expect_ordinal(&mut self) -> Result<Ordinal, ParseError> {
        match self.advance() {
            TokenKind::Ordinal(n) => Ok(Ordinal::new(n)
                .expect("lexer never produces ordinal 0")),
            other => Err(ParseError::expected(
                self.tokens[self.pos.saturating_sub(1)].start,
                "an ordinal",
                other,
            )),
        }
    }

    fn expect_preposition(&mut self) -> Result<Direction, ParseError> {
        let pos = self.peek_pos();
        match self.advance().preposition() {
            Some(d) => Ok(d),
            None => Err(ParseError::new(pos, "expected 'before' or 'after'")),
        }
    }

    fn expect_unit(&mut self) -> Result<Unit, ParseError> {
        let pos = self.peek_pos();
        match self.advance().unit() {
            Some(u) => Ok(u),
            None => Err(ParseError::new(pos, "expected 'days' or 'weeks'")),
        }
    }

    // rule := recurrence ( 'if' condition 'else' rule )?
    fn parse_rule(&mut self) -> Result<Rule, ParseError> {
        let recurrence = self.parse_recurrence()?;
        if self.eat(&TokenKind::If) {
            let condition = self.parse_condition()?;
            self.expect(&TokenKind::Else)?;
            let else_rule = self.parse_rule()?;
            Ok(Rule::Conditional {
                recurrence,
                condition,
                else_rule: Box::new(else_rule),
            })
        } else {
            Ok(Rule::Plain(recurrence))
        }
    }

    // recurrence := offset_rule | weekday_rule | '(' rule ')' | literal | 'never' | NAME
    fn parse_recurrence(&mut self) -> Result<Recurrence, ParseError> {
        match self.peek().clone() {
            TokenKind::Number(n) => {
                self.advance();
                let unit = self.expect_unit()?;
                let direction = self.expect_preposition()?;
                let base = self.parse_recurrence()?;
                Ok(Recurrence::Offset {
                    amount: n,
                    unit,
                    direction,
                    base: Box::new(base),
                })
            }
            TokenKind::The => {
                self.advance();
                self.parse_weekday_rule_body()
            }
            TokenKind::Last => self.parse_weekday_rule_body(),
            TokenKind::Ordinal(_) => self.parse_weekday_rule_body(),
            TokenKind::Weekday(_) => self.parse_weekday_rule_body(),
            TokenKind::Month(m) => {
                self.advance();
                let day = self.expect_number()?;
                Ok(Recurrence::Literal {
                    month: m,
                    day: day.try_into().map_err(|_| {
                        ParseError::new(self.peek_pos(), "day number out of range")
                    })?,
                })
            }
            TokenKind::Never => {
                self.advance();
                Ok(Recurrence::Never)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_rule()?;
                self.expect(&TokenKind::RParen)?;
                Ok(Recurrence::Parenthesized(Box::new(inner)))
            }
            TokenKind::Name(name) => {
                self.advance();
                Ok(Recurrence::Name(name))
            }
            _ => Err(self.error_expected("a recurrence")),
        }
    }

    /// Parses the shared tail of `owm_rule`, `wd_rule`, and `lwd_rule`
    /// after an optional leading `'the'` has already been consumed by the
    /// caller (or this function is entered directly on `'last'`/ordinal/
    /// weekday).
    fn parse_weekday_rule_body(&mut self) -> Result<Recurrence, ParseError> {
        if self.eat(&TokenKind::Last) {
            let weekday = self.expect_weekday()?;
            self.expect(&TokenKind::Of)?;
            let month = self.expect_month()?;
            return Ok(Recurrence::LwdRule { weekday, month });
        }

        let ordinal = if matches!(self.peek(), TokenKind::Ordinal(_)) {
            Some(self.expect_ordinal()?)
        } else {
            None
        };
        let weekday = self.expect_weekday()?;

        if ordinal.is_some() && self.check(&TokenKind::Of) {
            self.advance();
            let month = self.expect_month()?;
            return Ok(Recurrence::OwmRule {
                ordinal: ordinal.expect("checked is_some above"),
                weekday,
                month,
            });
        }

        let not_present = self.eat(&TokenKind::Not);
        let direction = self.expect_preposition()?;
        let base = self.parse_recurrence()?;
        Ok(Recurrence::WdRule {
            ordinal,
            weekday,
            not_present,
            direction,
            base: Box::new(base),
        })
    }

    // condition := or_condition
    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        self.parse_or_condition()
    }

    // or_condition := and_condition ( 'or' or_condition )?
    fn parse_or_condition(&mut self) -> Result<Condition, ParseError> {
        let left = self.parse_and_condition()?;
        if self.eat(&TokenKind::Or) {
            let right = self.parse_or_condition()?;
            Ok(Condition::Or(Box::new(left), Box::new(right)))
        } else {
            Ok(left)
        }
    }

    // and_condition := simple_condition ( 'and' and_condition )?
    fn parse_and_condition(&mut self) -> Result<Condition, ParseError> {
        let left = self.parse_simple_condition()?;
        if self.eat(&TokenKind::And) {
            let right = self.parse_and_condition()?;
            Ok(Condition::And(Box::new(left), Box::new(right)))
        } else {
            Ok(left)
        }
    }

    // simple_condition := rec_cond | year_cond | 'true' | 'false'
    fn parse_simple_condition(&mut self) -> Result<Condition, ParseError> {
        if self.eat(&TokenKind::True) {
            return Ok(Condition::True);
        }
        if self.eat(&TokenKind::False) {
            return Ok(Condition::False);
        }
        if self.eat(&TokenKind::Year) {
            let predicate = self.parse_year_predicate()?;
            return Ok(Condition::Year(predicate));
        }
        self.parse_rec_cond()
    }

    // rec_cond := recurrence 'exists'
    //           | recurrence 'not'? 'in' month
    //           | recurrence 'is' 'not'? (weekday | 'never')
    //           | recurrence 'is' 'not'? 'same' 'as' recurrence
    //           | recurrence 'is' 'not'? preposition recurrence
    fn parse_rec_cond(&mut self) -> Result<Condition, ParseError> {
        let recurrence = self.parse_recurrence()?;

        if self.eat(&TokenKind::Exists) {
            return Ok(Condition::Exists(recurrence));
        }

        if self.eat(&TokenKind::Not) {
            self.expect(&TokenKind::In)?;
            let month = self.expect_month()?;
            return Ok(Condition::MonthCond {
                recurrence,
                negate: true,
                month,
            });
        }

        if self.eat(&TokenKind::In) {
            let month = self.expect_month()?;
            return Ok(Condition::MonthCond {
                recurrence,
                negate: false,
                month,
            });
        }

        self.expect(&TokenKind::Is)?;
        let negate = self.eat(&TokenKind::Not);

        match self.peek().clone() {
            TokenKind::Weekday(w) => {
                self.advance();
                Ok(Condition::WeekdayCond {
                    recurrence,
                    negate,
                    target: WeekdayOrNever::Weekday(w),
                })
            }
            TokenKind::Never => {
                self.advance();
                Ok(Condition::WeekdayCond {
                    recurrence,
                    negate,
                    target: WeekdayOrNever::Never,
                })
            }
            TokenKind::Same => {
                self.advance();
                self.expect(&TokenKind::As)?;
                let other = self.parse_recurrence()?;
                Ok(Condition::SameAs {
                    a: recurrence,
                    negate,
                    b: other,
                })
            }
            _ => {
                let direction = self.expect_preposition()?;
                let other = self.parse_recurrence()?;
                Ok(Condition::DayPrepCond {
                    a: recurrence,
                    negate,
                    direction,
                    b: other,
                })
            }
        }
    }

    // year_predicate := 'is' 'not'? division
    //                 | 'is'? 'not'? preposition NUMBER
    fn parse_year_predicate(&mut self) -> Result<YearPredicate, ParseError> {
        let saw_is = self.eat(&TokenKind::Is);
        let negate = self.eat(&TokenKind::Not);

        if saw_is && matches!(self.peek(), TokenKind::Leap | TokenKind::Number(_)) {
            let division = self.parse_division()?;
            return Ok(YearPredicate::Division { negate, division });
        }

        let direction = self.expect_preposition()?;
        let number = self.expect_number()?;
        Ok(YearPredicate::Compare {
            negate,
            direction,
            number,
        })
    }

    // division := 'leap' | NUMBER ( 'mod' NUMBER )?
    fn parse_division(&mut self) -> Result<Division, ParseError> {
        if self.eat(&TokenKind::Leap) {
            return Ok(Division::Leap);
        }
        let remainder = self.expect_number()?;
        let modulus = if self.eat(&TokenKind::Mod) {
            Some(self.expect_number()?)
        } else {
            None
        };
        Ok(Division::NumberMod { remainder, modulus })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ordinal;

    #[test]
    fn parses_owm_rule() {
        let rule = parse("second Sunday of May").unwrap();
        assert_eq!(
            rule,
            Rule::Plain(Recurrence::OwmRule {
                ordinal: Ordinal::new(2).unwrap(),
                weekday: WeekDay::Sunday,
                month: Month::May,
            })
        );
    }

    #[test]
    fn parses_lwd_rule_with_the() {
        let rule = parse("the last sun of Dec").unwrap();
        assert_eq!(
            rule,
            Rule::Plain(Recurrence::LwdRule {
                weekday: WeekDay::Sunday,
                month: Month::December,
            })
        );
    }

    #[test]
    fn parses_wd_rule_not_before() {
        let rule = parse("friday not before June 30").unwrap();
        assert_eq!(
            rule,
            Rule::Plain(Recurrence::WdRule {
                ordinal: None,
                weekday: WeekDay::Friday,
                not_present: true,
                direction: Direction::Before,
                base: Box::new(Recurrence::Literal {
                    month: Month::June,
                    day: 30
                }),
            })
        );
    }

    #[test]
    fn parses_offset_rule() {
        let rule = parse("6 days after xmas").unwrap();
        assert_eq!(
            rule,
            Rule::Plain(Recurrence::Offset {
                amount: 6,
                unit: Unit::Days,
                direction: Direction::After,
                base: Box::new(Recurrence::Name("xmas".to_string())),
            })
        );
    }

    #[test]
    fn parses_conditional_rule() {
        let rule = parse("jun 1 if feb 29 exists else jul 5").unwrap();
        match rule {
            Rule::Conditional {
                recurrence,
                condition,
                else_rule,
            } => {
                assert_eq!(
                    recurrence,
                    Recurrence::Literal {
                        month: Month::June,
                        day: 1
                    }
                );
                assert_eq!(
                    condition,
                    Condition::Exists(Recurrence::Literal {
                        month: Month::February,
                        day: 29
                    })
                );
                assert_eq!(
                    *else_rule,
                    Rule::Plain(Recurrence::Literal {
                        month: Month::July,
                        day: 5
                    })
                );
            }
            other => panic!("expected Conditional, got {other:?}"),
        }
    }

    #[test]
    fn parses_year_leap_condition() {
        let rule = parse("jan 1 if year is leap else feb 2").unwrap();
        match rule {
            Rule::Conditional { condition, .. } => {
                assert_eq!(
                    condition,
                    Condition::Year(YearPredicate::Division {
                        negate: false,
                        division: Division::Leap
                    })
                );
            }
            other => panic!("expected Conditional, got {other:?}"),
        }
    }

    #[test]
    fn parses_year_before_condition() {
        let rule = parse("feb 2 if year before 2000 else jan 1").unwrap();
        match rule {
            Rule::Conditional { condition, .. } => {
                assert_eq!(
                    condition,
                    Condition::Year(YearPredicate::Compare {
                        negate: false,
                        direction: Direction::Before,
                        number: 2000
                    })
                );
            }
            other => panic!("expected Conditional, got {other:?}"),
        }
    }

    #[test]
    fn parses_and_or_with_and_binding_tighter() {
        let rule = parse("jan 1 if true and false or true else feb 2").unwrap();
        match rule {
            Rule::Conditional { condition, .. } => match condition {
                Condition::Or(left, right) => {
                    assert_eq!(*left, Condition::And(Box::new(Condition::True), Box::new(Condition::False)));
                    assert_eq!(*right, Condition::True);
                }
                other => panic!("expected top-level Or, got {other:?}"),
            },
            other => panic!("expected Conditional, got {other:?}"),
        }
    }

    #[test]
    fn parses_parenthesized_recurrence() {
        let rule = parse("(feb 2)").unwrap();
        assert_eq!(
            rule,
            Rule::Plain(Recurrence::Parenthesized(Box::new(Rule::Plain(
                Recurrence::Literal {
                    month: Month::February,
                    day: 2
                }
            ))))
        );
    }

    #[test]
    fn rejects_trailing_garbage() {
        let err = parse("jan 1 foo").unwrap_err();
        assert_eq!(err.position, 6);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse("").is_err());
    }

    #[test]
    fn parses_same_as_condition() {
        let rule = parse("jan 1 if jan 1 is same as jan 1 else feb 2").unwrap();
        match rule {
            Rule::Conditional { condition, .. } => {
                assert!(matches!(condition, Condition::SameAs { negate: false, .. }));
            }
            other => panic!("expected Conditional, got {other:?}"),
        }
    }

    #[test]
    fn parses_not_in_month_condition() {
        let rule = parse("jan 1 if easter not in may else feb 2").unwrap();
        match rule {
            Rule::Conditional { condition, .. } => {
                assert_eq!(
                    condition,
                    Condition::MonthCond {
                        recurrence: Recurrence::Name("easter".to_string()),
                        negate: true,
                        month: Month::May,
                    }
                );
            }
            other => panic!("expected Conditional, got {other:?}"),
        }
    }
}
