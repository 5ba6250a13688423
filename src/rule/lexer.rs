//! rule/lexer.rs
//!
//! Tokenizes a rule string (`spec` §4.3 "Token classes"). Keywords,
//! months, weekdays and ordinals all take priority over bare
//! identifiers/numbers, mirroring the terminal priorities of the source
//! grammar's Lark definition (keywords/month/weekday/ordinal at priority
//! 9, short ordinals at 8, NAME/NUMBER at 0). Rather than a PEG/parser
//! generator, this is a hand-written maximal-munch scan: at each
//! position we try categories in fixed priority order and, within a
//! category, alternatives are ordered longest-first so the regex crate's
//! leftmost-first matching reproduces maximal munch.
//!
//! Compiled patterns are cached the way the teacher caches its own
//! regexes (`once_cell::sync::Lazy`), since the registry is built once
//! per process and reused across many `parse` calls.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ParseError;
use crate::model::{Month, WeekDay};

use super::token::{Token, TokenKind};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t\r\n]+").unwrap());

static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(last|exists|of|if|else|never|is|in|leap|mod|same|as|the|before|after|year|days?|weeks?|not|true|false|and|or)\b",
    )
    .unwrap()
});

static LPAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\(").unwrap());
static RPAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\)").unwrap());

static MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec)\b",
    )
    .unwrap()
});

static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tue|wed|thu|fri|sat|sun|mo|tu|we|th|fr|sa|su)\b",
    )
    .unwrap()
});

static ORDINAL_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(first|second|third|fourth)\b").unwrap());

/// `spec`'s stated short-ordinal pattern (`[2-9]?(1st|2nd|3rd|([4-90]th))|1[0-9]th`)
/// has a typo in its `[4-90]th` branch; this is the corrected reading: a
/// "teens" branch (10th–19th, all irregular `th`) and a general branch
/// covering bare `0th`–`9th` and tens-prefixed `21st`/`32nd`/etc.
static SHORT_ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(([2-9]?(1st|2nd|3rd|[4-9]th|0th))|(1[0-9]th))\b").unwrap());

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").unwrap());

static NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]([-_.]?[a-zA-Z0-9])*").unwrap());

fn month_from_match(s: &str) -> Month {
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "january" | "jan" => Month::January,
        "february" | "feb" => Month::February,
        "march" | "mar" => Month::March,
        "april" | "apr" => Month::April,
        "may" => Month::May,
        "june" | "jun" => Month::June,
        "july" | "jul" => Month::July,
        "august" | "aug" => Month::August,
        "september" | "sep" => Month::September,
        "october" | "oct" => Month::October,
        "november" | "nov" => Month::November,
        "december" | "dec" => Month::December,
        _ => unreachable!("MONTH regex only matches recognized month spellings"),
    }
}

fn weekday_from_match(s: &str) -> WeekDay {
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "monday" | "mon" | "mo" => WeekDay::Monday,
        "tuesday" | "tue" | "tu" => WeekDay::Tuesday,
        "wednesday" | "wed" | "we" => WeekDay::Wednesday,
        "thursday" | "thu" | "th" => WeekDay::Thursday,
        "friday" | "fri" | "fr" => WeekDay::Friday,
        "saturday" | "sat" | "sa" => WeekDay::Saturday,
        "sunday" | "sun" | "su" => WeekDay::Sunday,
        _ => unreachable!("WEEKDAY regex only matches recognized weekday spellings"),
    }
}

fn ordinal_word_value(s: &str) -> u32 {
    match s.to_ascii_lowercase().as_str() {
        "first" => 1,
        "second" => 2,
        "third" => 3,
        "fourth" => 4,
        _ => unreachable!("ORDINAL_WORD regex only matches these four words"),
    }
}

fn short_ordinal_value(s: &str) -> u32 {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().expect("SHORT_ORDINAL regex guarantees a leading digit run")
}

fn keyword_kind(s: &str) -> TokenKind {
    match s.to_ascii_lowercase().as_str() {
        "last" => TokenKind::Last,
        "exists" => TokenKind::Exists,
        "of" => TokenKind::Of,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "never" => TokenKind::Never,
        "is" => TokenKind::Is,
        "in" => TokenKind::In,
        "leap" => TokenKind::Leap,
        "mod" => TokenKind::Mod,
        "same" => TokenKind::Same,
        "as" => TokenKind::As,
        "the" => TokenKind::The,
        "before" => TokenKind::Before,
        "after" => TokenKind::After,
        "year" => TokenKind::Year,
        "day" | "days" => TokenKind::Days,
        "week" | "weeks" => TokenKind::Weeks,
        "not" => TokenKind::Not,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        _ => unreachable!("KEYWORD regex only matches these spellings"),
    }
}

/// Tokenizes `input` into a token stream terminated by a single
/// [`TokenKind::Eof`]. Fails with [`ParseError`] on the first byte that
/// does not start any recognized token.
pub fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < input.len() {
        let rest = &input[pos..];

        if let Some(m) = WHITESPACE.find(rest) {
            pos += m.end();
            continue;
        }

        let (kind, matched_len) = if let Some(m) = KEYWORD.find(rest) {
            (keyword_kind(m.as_str()), m.end())
        } else if let Some(m) = LPAREN.find(rest) {
            (TokenKind::LParen, m.end())
        } else if let Some(m) = RPAREN.find(rest) {
            (TokenKind::RParen, m.end())
        } else if let Some(m) = MONTH.find(rest) {
            (TokenKind::Month(month_from_match(m.as_str())), m.end())
        } else if let Some(m) = WEEKDAY.find(rest) {
            (TokenKind::Weekday(weekday_from_match(m.as_str())), m.end())
        } else if let Some(m) = ORDINAL_WORD.find(rest) {
            (TokenKind::Ordinal(ordinal_word_value(m.as_str())), m.end())
        } else if let Some(m) = SHORT_ORDINAL.find(rest) {
            (TokenKind::Ordinal(short_ordinal_value(m.as_str())), m.end())
        } else if let Some(m) = NUMBER.find(rest) {
            let n: i64 = m
                .as_str()
                .parse()
                .map_err(|_| ParseError::new(pos, "number literal out of range"))?;
            (TokenKind::Number(n), m.end())
        } else if let Some(m) = NAME.find(rest) {
            (TokenKind::Name(m.as_str().to_string()), m.end())
        } else {
            let bad = rest.chars().next().unwrap();
            return Err(ParseError::new(
                pos,
                format!("unrecognized character {bad:?}"),
            ));
        };

        tokens.push(Token {
            kind,
            start: pos,
            end: pos + matched_len,
        });
        pos += matched_len;
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        start: input.len(),
        end: input.len(),
    });
    Ok(tokens)
}
