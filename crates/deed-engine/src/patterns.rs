//! Word tables used by the written-amount parser and the alias generator

/// Units and teens, each a complete group tail on its own
pub const UNITS: &[(&str, u64)] = &[
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

pub const TENS: &[(&str, u64)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

pub const ZERO: &str = "zero";
pub const HUNDRED: &str = "hundred";

/// Scale words, largest first
pub const SCALES: &[(&str, u64)] = &[
    ("trillion", 1_000_000_000_000),
    ("billion", 1_000_000_000),
    ("million", 1_000_000),
    ("thousand", 1_000),
];

/// Connectives dropped before parsing
pub const FILLER_WORDS: &[&str] = &["and", "only", "exactly"];

/// Currency unit words; the last one separates dollars from a cents phrase
pub const CURRENCY_WORDS: &[&str] = &["dollar", "dollars"];

pub const CENTS_WORDS: &[&str] = &["cent", "cents"];

/// Punctuation that separates written-amount words, wherever it appears
pub const WORD_SEPARATORS: &[char] = &['.', ',', ';', ':', '(', ')', '"', '\'', '!'];

/// "Saint"-class name prefixes and the abbreviations deeds use for them
pub const SAINT_PREFIXES: &[(&str, &[&str])] = &[
    ("santa", &["s", "sta"]),
    ("san", &["s"]),
    ("saint", &["s", "st"]),
    ("sainte", &["s", "ste"]),
    ("santo", &["s", "sto"]),
];

/// Look a word up in one of the tables above
pub fn lookup(table: &[(&str, u64)], word: &str) -> Option<u64> {
    table
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, value)| *value)
}

/// Abbreviations for a leading prefix word, if it is a "Saint"-class word
pub fn saint_abbreviations(prefix: &str) -> Option<&'static [&'static str]> {
    SAINT_PREFIXES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(prefix))
        .map(|(_, abbreviations)| *abbreviations)
}
