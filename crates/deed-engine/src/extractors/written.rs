//! Written-words amount parsing
//!
//! Turns the words form of a deed price ("One Million Two Hundred Thousand
//! Dollars") into an exact [`Amount`]. Parsing is strict: unknown words and
//! malformed word order are errors, never skipped, because a silently
//! mis-parsed price is worse than a rejected one.
//!
//! Grammar, per three-digit group: `[unit hundred] [tens] [unit | teen]`.
//! Groups are closed by a scale word, and scale words must strictly decrease
//! from left to right. Cents may follow as `NN/100` or `... dollars and
//! <group> cents`.

use crate::error::NumberParseError;
use crate::patterns::{
    lookup, CENTS_WORDS, CURRENCY_WORDS, FILLER_WORDS, HUNDRED, SCALES, TENS,
    UNITS, WORD_SEPARATORS, ZERO,
};
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Amount;

lazy_static! {
    static ref FRACTION: Regex = Regex::new(r"^(\d+)/(\d+)$").unwrap();
}

/// Largest value [`WrittenNumberParser::spell_out`] can express (exclusive)
pub const SPELL_OUT_LIMIT: u64 = 1_000_000_000_000_000;

/// What the last word of the current group was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupTail {
    Start,
    Unit(u64),
    Teen,
    Tens,
    Hundred,
}

pub struct WrittenNumberParser;

impl WrittenNumberParser {
    /// Parse a written amount into dollars and cents
    pub fn parse(text: &str) -> Result<Amount, NumberParseError> {
        let tokens = tokenize(text);
        let (whole_words, cents) = split_cents(&tokens, text)?;
        let dollars = parse_quantity(&whole_words, text)?;

        if dollars.is_none() && cents.is_none() {
            return Err(NumberParseError::NoNumberWords(text.to_string()));
        }

        let overflow = || NumberParseError::Overflow(text.to_string());
        Amount::from_dollars(dollars.unwrap_or(0))
            .ok_or_else(overflow)?
            .checked_add(Amount::from_cents(cents.unwrap_or(0)))
            .ok_or_else(overflow)
    }

    /// Spell out a whole-dollar value in the vocabulary `parse` accepts
    ///
    /// Returns `None` at or above [`SPELL_OUT_LIMIT`].
    pub fn spell_out(value: u64) -> Option<String> {
        if value >= SPELL_OUT_LIMIT {
            return None;
        }
        if value == 0 {
            return Some(title_case(ZERO));
        }

        let mut words: Vec<String> = Vec::new();
        let mut remainder = value;
        for (name, scale) in SCALES {
            let group = remainder / scale;
            if group > 0 {
                spell_group(group, &mut words);
                words.push(title_case(name));
            }
            remainder %= scale;
        }
        spell_group(remainder, &mut words);

        Some(words.join(" "))
    }
}

/// Lower-cased words; `/` separates words too, except inside an `NN/100` fraction
fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| c.is_whitespace() || c == '-' || WORD_SEPARATORS.contains(&c))
        .flat_map(|piece| {
            if FRACTION.is_match(piece) {
                vec![piece]
            } else {
                piece.split('/').collect()
            }
        })
        .filter(|token| !token.is_empty() && !FILLER_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Separate the cents portion (fraction token or "... cents" phrase) from the
/// whole-dollar words. Currency words are removed from the returned words.
fn split_cents<'a>(
    tokens: &'a [String],
    text: &str,
) -> Result<(Vec<&'a str>, Option<u64>), NumberParseError> {
    let invalid = || NumberParseError::InvalidCents(text.to_string());

    let mut cents = None;
    let mut words: Vec<&str> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(caps) = FRACTION.captures(token) {
            let numerator: u64 = caps[1].parse().map_err(|_| invalid())?;
            let denominator: u64 = caps[2].parse().map_err(|_| invalid())?;
            if cents.is_some() || denominator != 100 || numerator > 99 {
                return Err(invalid());
            }
            cents = Some(numerator);
        } else {
            words.push(token.as_str());
        }
    }

    if let Some(pos) = words.iter().position(|w| CENTS_WORDS.contains(w)) {
        if cents.is_some() || pos + 1 != words.len() {
            return Err(invalid());
        }
        let dollar_marker = words[..pos]
            .iter()
            .rposition(|w| CURRENCY_WORDS.contains(w));
        let (whole, cent_words) = match dollar_marker {
            Some(marker) => (&words[..marker], &words[marker + 1..pos]),
            None => (&words[..0], &words[..pos]),
        };
        let value = parse_quantity(cent_words, text)?.ok_or_else(invalid)?;
        if value > 99 {
            return Err(invalid());
        }
        cents = Some(value);
        words = whole.to_vec();
    }

    words.retain(|w| !CURRENCY_WORDS.contains(w));
    Ok((words, cents))
}

/// Accumulate number words into a value; `Ok(None)` when there are no words
fn parse_quantity(words: &[&str], text: &str) -> Result<Option<u64>, NumberParseError> {
    if words.is_empty() {
        return Ok(None);
    }

    let structure = |word: &str| NumberParseError::Structure {
        word: word.to_string(),
        text: text.to_string(),
    };
    let overflow = || NumberParseError::Overflow(text.to_string());

    if words.contains(&ZERO) {
        return if words.len() == 1 {
            Ok(Some(0))
        } else {
            Err(structure(ZERO))
        };
    }

    let mut total: u64 = 0;
    let mut group: u64 = 0;
    let mut tail = GroupTail::Start;
    let mut last_scale: Option<u64> = None;

    for (i, &word) in words.iter().enumerate() {
        if let Some(value) = lookup(UNITS, word) {
            let fits = match tail {
                GroupTail::Start | GroupTail::Hundred => true,
                GroupTail::Tens => value < 10,
                GroupTail::Unit(_) | GroupTail::Teen => false,
            };
            if !fits {
                return Err(structure(word));
            }
            group += value;
            tail = if value < 10 {
                GroupTail::Unit(value)
            } else {
                GroupTail::Teen
            };
        } else if let Some(value) = lookup(TENS, word) {
            if !matches!(tail, GroupTail::Start | GroupTail::Hundred) {
                return Err(structure(word));
            }
            group += value;
            tail = GroupTail::Tens;
        } else if word == HUNDRED {
            group = match tail {
                GroupTail::Unit(unit) if group == unit => unit * 100,
                // A bare leading "hundred" reads as one hundred
                GroupTail::Start if i == 0 => 100,
                _ => return Err(structure(word)),
            };
            tail = GroupTail::Hundred;
        } else if let Some(scale) = lookup(SCALES, word) {
            if tail == GroupTail::Start {
                return Err(structure(word));
            }
            if last_scale.is_some_and(|previous| scale >= previous) {
                return Err(NumberParseError::ScaleOrder {
                    word: word.to_string(),
                    text: text.to_string(),
                });
            }
            total = group
                .checked_mul(scale)
                .and_then(|value| total.checked_add(value))
                .ok_or_else(overflow)?;
            group = 0;
            tail = GroupTail::Start;
            last_scale = Some(scale);
        } else {
            return Err(NumberParseError::UnknownWord {
                word: word.to_string(),
                text: text.to_string(),
            });
        }
    }

    total.checked_add(group).map(Some).ok_or_else(overflow)
}

fn spell_group(group: u64, words: &mut Vec<String>) {
    let hundreds = group / 100;
    let rest = group % 100;

    if hundreds > 0 {
        words.push(title_case(word_for(UNITS, hundreds)));
        words.push(title_case(HUNDRED));
    }
    if rest >= 20 {
        words.push(title_case(word_for(TENS, rest - rest % 10)));
        if rest % 10 > 0 {
            words.push(title_case(word_for(UNITS, rest % 10)));
        }
    } else if rest > 0 {
        words.push(title_case(word_for(UNITS, rest)));
    }
}

fn word_for(table: &[(&'static str, u64)], value: u64) -> &'static str {
    table
        .iter()
        .find(|(_, v)| *v == value)
        .map_or("", |(name, _)| *name)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
