
//! Combined lookup from unit spellings to canonical units.
//!
//! Synonyms come in two disjoint flavors: case-insensitive spellings
//! (the common case) and a case-sensitive subset reserved for symbols
//! that collide case-insensitively with a unit of another kind. The
//! index buckets every spelling by its lowercase form, so a single
//! hash lookup serves both flavors.

use super::kind::{UnitKind, Units};

use itertools::Itertools;
use thiserror::Error;

use std::collections::HashMap;

/// One accepted spelling of a canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synonym {
  pub spelling: &'static str,
  pub case: CaseRule,
}

/// Whether a synonym matches regardless of letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseRule {
  Insensitive,
  Sensitive,
}

/// Immutable lookup from every accepted spelling in a set of quantity
/// kinds to its canonical unit. Built once per resolver configuration.
#[derive(Debug, Clone)]
pub struct SynonymIndex {
  buckets: HashMap<String, Vec<IndexEntry>>,
}

#[derive(Debug, Clone, Copy)]
struct IndexEntry {
  unit: Units,
  synonym: Synonym,
}

/// The outcome of looking up a raw unit token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
  Resolved(Units),
  /// The token maps to more than one canonical unit under the active
  /// configuration. Candidates are reported in table order.
  Ambiguous(Vec<Units>),
  Unrecognized,
}

/// A requested kind set contains synonyms that can no longer be told
/// apart, even by case. This is a configuration error raised at
/// construction time, never during `resolve`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SynonymConflict {
  #[error(
    "case-sensitive synonym {spelling:?} of {sensitive} is shadowed by a \
     case-insensitive spelling of {insensitive}"
  )]
  CaseShadowed {
    spelling: &'static str,
    sensitive: Units,
    insensitive: Units,
  },
  #[error("units {first} and {second} declare the same case-sensitive synonym {spelling:?}")]
  DuplicateSensitive {
    spelling: &'static str,
    first: Units,
    second: Units,
  },
}

impl SynonymIndex {
  /// Builds the combined index over every synonym of every unit in
  /// `kinds`. Fails if two kinds define spellings that cannot be
  /// resolved by case alone; two *case-insensitive* units sharing a
  /// spelling (meter and minute both accept `m`) are permitted and
  /// surface as [`Lookup::Ambiguous`] at lookup time instead.
  pub fn with_kinds(kinds: &[UnitKind]) -> Result<Self, SynonymConflict> {
    let mut buckets: HashMap<String, Vec<IndexEntry>> = HashMap::new();
    for &kind in kinds {
      for unit in kind.units() {
        for &synonym in unit.synonyms() {
          buckets
            .entry(synonym.spelling.to_lowercase())
            .or_default()
            .push(IndexEntry { unit, synonym });
        }
      }
    }
    for entries in buckets.values() {
      check_distinguishable(entries)?;
    }
    Ok(Self { buckets })
  }

  /// Looks up a raw token against the active synonym tables, honoring
  /// each synonym's case rule.
  pub fn lookup(&self, token: &str) -> Lookup {
    let Some(entries) = self.buckets.get(&token.to_lowercase()) else {
      return Lookup::Unrecognized;
    };
    let candidates: Vec<Units> = entries
      .iter()
      .filter(|entry| match entry.synonym.case {
        CaseRule::Insensitive => true,
        CaseRule::Sensitive => entry.synonym.spelling == token,
      })
      .map(|entry| entry.unit)
      .unique()
      .collect();
    match candidates.as_slice() {
      [] => Lookup::Unrecognized,
      [unit] => Lookup::Resolved(*unit),
      _ => Lookup::Ambiguous(candidates),
    }
  }
}

/// Rejects buckets in which a case-sensitive spelling has lost its
/// distinguishing power: either an insensitive spelling of another
/// unit swallows it, or another unit declares the identical sensitive
/// spelling.
fn check_distinguishable(entries: &[IndexEntry]) -> Result<(), SynonymConflict> {
  for (i, entry) in entries.iter().enumerate() {
    if entry.synonym.case != CaseRule::Sensitive {
      continue;
    }
    for other in &entries[i + 1..] {
      if other.unit == entry.unit {
        continue;
      }
      if other.synonym.case == CaseRule::Sensitive && other.synonym.spelling == entry.synonym.spelling {
        return Err(SynonymConflict::DuplicateSensitive {
          spelling: entry.synonym.spelling,
          first: entry.unit,
          second: other.unit,
        });
      }
    }
    if let Some(shadow) = entries
      .iter()
      .find(|other| other.unit != entry.unit && other.synonym.case == CaseRule::Insensitive)
    {
      return Err(SynonymConflict::CaseShadowed {
        spelling: entry.synonym.spelling,
        sensitive: entry.unit,
        insensitive: shadow.unit,
      });
    }
  }
  Ok(())
}
