//! County name normalization
//!
//! Scanned deeds abbreviate county names ("S. Clara", "Sta Cruz"). Matching
//! happens in two steps:
//! - Exact lookup in an [`AliasTable`] generated once from the canonical names
//! - A containment fallback that only resolves when exactly one county matches
//!
//! Nothing here guesses: an input that could mean two counties is rejected.

use crate::error::NameNotFoundError;
use crate::patterns::saint_abbreviations;
use std::collections::{HashMap, HashSet};

/// Inputs shorter than this never resolve through the containment fallback
pub const MIN_SUBSTRING_LEN: usize = 3;

/// Lower-case and collapse whitespace
pub fn fold(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Abbreviated spellings of a canonical name, already folded
///
/// Only names whose first word is a "Saint"-class prefix produce aliases:
/// "Santa Clara" gives `s. clara`, `s.clara`, `s clara`, `sta. clara`,
/// `sta.clara` and `sta clara`.
pub fn generate_aliases(canonical: &str) -> Vec<String> {
    let folded = fold(canonical);
    let Some((prefix, rest)) = folded.split_once(' ') else {
        return Vec::new();
    };
    let Some(abbreviations) = saint_abbreviations(prefix) else {
        return Vec::new();
    };

    let mut aliases = Vec::with_capacity(abbreviations.len() * 3);
    for abbr in abbreviations {
        aliases.push(format!("{abbr}. {rest}"));
        aliases.push(format!("{abbr}.{rest}"));
        aliases.push(format!("{abbr} {rest}"));
    }
    aliases
}

/// Folded alias -> index of the canonical name it stands for
///
/// Every alias maps to exactly one canonical name. An abbreviation generated
/// for two different names is dropped and remembered as ambiguous, so it can
/// never resolve to either.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, usize>,
    ambiguous: HashSet<String>,
}

impl AliasTable {
    pub fn build<S: AsRef<str>>(canonical: &[S]) -> Self {
        let mut table = Self::default();

        // Full names first; they are never displaced by an abbreviation
        for (idx, name) in canonical.iter().enumerate() {
            table.aliases.entry(fold(name.as_ref())).or_insert(idx);
        }
        let full_names: HashSet<String> = table.aliases.keys().cloned().collect();

        for (idx, name) in canonical.iter().enumerate() {
            for alias in generate_aliases(name.as_ref()) {
                if full_names.contains(&alias) || table.ambiguous.contains(&alias) {
                    continue;
                }
                match table.aliases.get(&alias) {
                    Some(&owner) if owner != idx => {
                        table.aliases.remove(&alias);
                        table.ambiguous.insert(alias);
                    }
                    Some(_) => {}
                    None => {
                        table.aliases.insert(alias, idx);
                    }
                }
            }
        }

        table
    }

    /// Exact lookup of an already folded alias
    pub fn lookup(&self, folded: &str) -> Option<usize> {
        self.aliases.get(folded).copied()
    }

    pub fn is_ambiguous(&self, folded: &str) -> bool {
        self.ambiguous.contains(folded)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.aliases.iter().map(|(alias, &idx)| (alias.as_str(), idx))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Maps raw county text to one canonical name
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    canonical: Vec<String>,
    folded: Vec<String>,
    table: AliasTable,
}

impl NameNormalizer {
    pub fn new(canonical: Vec<String>) -> Self {
        let table = AliasTable::build(&canonical);
        let folded = canonical.iter().map(|name| fold(name)).collect();
        Self {
            canonical,
            folded,
            table,
        }
    }

    pub fn canonical_names(&self) -> &[String] {
        &self.canonical
    }

    pub fn alias_table(&self) -> &AliasTable {
        &self.table
    }

    /// Resolve raw text to the index of its canonical name
    pub fn resolve(&self, raw: &str) -> Result<usize, NameNotFoundError> {
        let needle = fold(raw);
        if needle.is_empty() {
            return Err(self.not_found(raw, Vec::new()));
        }

        if let Some(idx) = self.table.lookup(&needle) {
            return Ok(idx);
        }

        let matches: Vec<usize> = self
            .folded
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                (needle.len() >= MIN_SUBSTRING_LEN && name.contains(needle.as_str()))
                    || needle.contains(name.as_str())
            })
            .map(|(idx, _)| idx)
            .collect();

        match matches.as_slice() {
            [idx] => Ok(*idx),
            [] => Err(self.not_found(raw, Vec::new())),
            many => {
                let ambiguous = many.iter().map(|&idx| self.canonical[idx].clone()).collect();
                Err(self.not_found(raw, ambiguous))
            }
        }
    }

    /// Resolve raw text to its canonical name
    pub fn normalize(&self, raw: &str) -> Result<&str, NameNotFoundError> {
        self.resolve(raw).map(|idx| self.canonical[idx].as_str())
    }

    fn not_found(&self, raw: &str, ambiguous: Vec<String>) -> NameNotFoundError {
        NameNotFoundError {
            attempted: raw.to_string(),
            available: self.canonical.clone(),
            ambiguous,
        }
    }
}
