
//! Resolution of free-form strings like `"15.0 ML"` or `"10±5g"` into
//! typed quantities.

use super::kind::{UnitKind, Units};
use super::quantity::Quantity;
use super::synonym::{Lookup, SynonymConflict, SynonymIndex};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Decimal or scientific-notation number, unsigned. A bare trailing
/// period is deliberately not part of the grammar, so `"15.0. ML"`
/// produces no match at all rather than a bogus `"0. ML"` match.
const NUMBER: &str = r"\d+(?:\.\d+)?(?:[eE][+-]?\d+)?";

/// `value [± precision] unit`, with optional sign, arbitrary internal
/// whitespace, and an optional trailing abbreviation period on the
/// unit token. The unit token is any maximal run of letters (plus the
/// degree sign), so unknown units still match and can be reported as
/// unrecognized rather than malformed.
static VALUE_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(
    r"([+-]?{n})(?:\s*(?:±|\+/-|\+-)\s*({n}))?\s*([\p{{L}}°]+)\.?",
    n = NUMBER,
  )).unwrap()
});

/// `low-high unit`. Only consulted when the caller allows ranges.
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(&format!(
    r"([+-]?{n})\s*-\s*({n})\s*([\p{{L}}°]+)\.?",
    n = NUMBER,
  )).unwrap()
});

/// Resolves strings containing exactly one value-with-units into
/// [`Quantity`] values.
///
/// A resolver is immutable once constructed and holds no per-call
/// state, so a single instance can serve any number of concurrent
/// `resolve` calls.
#[derive(Debug, Clone)]
pub struct UnitResolver {
  index: SynonymIndex,
}

/// Why a string could not be resolved into a quantity. Every failure
/// is reported to the caller; nothing is silently defaulted.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ResolveError {
  #[error("string does not contain a value with units: {0:?}")]
  NoQuantity(String),
  #[error("string contains more than one value with units: {0:?}")]
  MultipleQuantities(String),
  #[error("unrecognized units: {0:?}")]
  UnrecognizedUnits(String),
  #[error("ambiguous units {token:?}: could be any of {candidates:?}")]
  AmbiguousUnits { token: String, candidates: Vec<Units> },
  #[error("string contains a range, which is not allowed here: {0:?}")]
  RangeNotAllowed(String),
}

impl UnitResolver {
  /// A resolver over the default kind set (everything except
  /// concentration).
  pub fn new() -> Self {
    Self::with_kinds(&UnitKind::DEFAULT_KINDS)
      .expect("default unit kinds have no synonym conflicts")
  }

  /// A resolver over the concentration synonym table only. Kept
  /// separate from [`UnitResolver::new`] because the molar symbols
  /// cannot coexist with the default tables (`mM` vs `mm`).
  pub fn concentration() -> Self {
    Self::with_kinds(&[UnitKind::Concentration])
      .expect("concentration synonyms have no conflicts")
  }

  /// A resolver over an explicit set of quantity kinds. Fails if the
  /// combined synonym tables contain an unresolvable collision.
  pub fn with_kinds(kinds: &[UnitKind]) -> Result<Self, SynonymConflict> {
    Ok(Self { index: SynonymIndex::with_kinds(kinds)? })
  }

  /// A process-wide instance of the default configuration.
  pub fn shared() -> &'static UnitResolver {
    static RESOLVER: Lazy<UnitResolver> = Lazy::new(UnitResolver::new);
    &RESOLVER
  }

  /// A process-wide instance of the concentration configuration.
  pub fn shared_concentration() -> &'static UnitResolver {
    static RESOLVER: Lazy<UnitResolver> = Lazy::new(UnitResolver::concentration);
    &RESOLVER
  }

  /// Resolves a string containing exactly one value-with-units into a
  /// typed quantity. The quantity stays in the unit it was written in;
  /// it is not re-based (`"15.0 ML"` resolves to 15.0 milliliters, not
  /// 0.015 liters).
  pub fn resolve(&self, text: &str) -> Result<Quantity, ResolveError> {
    self.resolve_impl(text, false)
  }

  /// Like [`UnitResolver::resolve`], but additionally accepts the
  /// range form `"1-2 h"`, producing the midpoint as the value and
  /// half the span as the precision.
  pub fn resolve_allowing_range(&self, text: &str) -> Result<Quantity, ResolveError> {
    self.resolve_impl(text, true)
  }

  fn resolve_impl(&self, text: &str, allow_range: bool) -> Result<Quantity, ResolveError> {
    let text = text.trim();
    let ranges: Vec<Captures> = RANGE_RE.captures_iter(text).collect();
    if !ranges.is_empty() {
      if !allow_range {
        return Err(ResolveError::RangeNotAllowed(text.to_owned()));
      }
      return self.resolve_range(text, &ranges);
    }
    let matches: Vec<Captures> = VALUE_RE.captures_iter(text).collect();
    match matches.as_slice() {
      [] => Err(ResolveError::NoQuantity(text.to_owned())),
      [caps] => {
        let value: f64 = parse_number(&caps[1]);
        let precision = caps.get(2).map_or(0.0, |m| parse_number(m.as_str()));
        let units = self.lookup_token(&caps[3])?;
        Ok(Quantity::with_precision(value, precision, units))
      }
      _ => Err(ResolveError::MultipleQuantities(text.to_owned())),
    }
  }

  fn resolve_range(&self, text: &str, ranges: &[Captures]) -> Result<Quantity, ResolveError> {
    let [caps] = ranges else {
      return Err(ResolveError::MultipleQuantities(text.to_owned()));
    };
    let span = caps.get(0).expect("capture group 0 always participates").range();
    // A value match disjoint from the range means the string holds a
    // second quantity.
    for found in VALUE_RE.find_iter(text) {
      if found.end() <= span.start || found.start() >= span.end {
        return Err(ResolveError::MultipleQuantities(text.to_owned()));
      }
    }
    let low = parse_number(&caps[1]);
    let high = parse_number(&caps[2]);
    let units = self.lookup_token(&caps[3])?;
    let value = (low + high) / 2.0;
    let precision = ((high - low) / 2.0).abs();
    Ok(Quantity::with_precision(value, precision, units))
  }

  fn lookup_token(&self, token: &str) -> Result<Units, ResolveError> {
    match self.index.lookup(token) {
      Lookup::Resolved(units) => Ok(units),
      Lookup::Unrecognized => Err(ResolveError::UnrecognizedUnits(token.to_owned())),
      Lookup::Ambiguous(candidates) => Err(ResolveError::AmbiguousUnits {
        token: token.to_owned(),
        candidates,
      }),
    }
  }
}

impl Default for UnitResolver {
  fn default() -> Self {
    UnitResolver::new()
  }
}

fn parse_number(text: &str) -> f64 {
  text.parse().expect("matched number should parse as f64")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::kind::{
    ConcentrationUnit, LengthUnit, MassUnit, MolesUnit, TemperatureUnit, TimeUnit, VolumeUnit,
  };
  use crate::units::synonym::CaseRule;

  use approx::assert_abs_diff_eq;

  fn assert_resolves(resolver: &UnitResolver, text: &str, expected: Quantity) {
    let quantity = resolver.resolve(text).unwrap_or_else(|err| {
      panic!("failed to resolve {:?}: {}", text, err)
    });
    assert_eq!(quantity.units, expected.units, "wrong unit for {:?}", text);
    assert_abs_diff_eq!(quantity.value, expected.value, epsilon = 1e-12);
    assert_abs_diff_eq!(quantity.precision, expected.precision, epsilon = 1e-12);
  }

  #[test]
  fn test_resolve_capitalized() {
    assert_resolves(
      UnitResolver::shared(),
      "15.0 ML",
      Quantity::new(15.0, VolumeUnit::Milliliter),
    );
  }

  #[test]
  fn test_resolve_integer() {
    assert_resolves(UnitResolver::shared(), "24 H", Quantity::new(24.0, TimeUnit::Hour));
  }

  #[test]
  fn test_resolve_no_space() {
    assert_resolves(UnitResolver::shared(), "32.1g", Quantity::new(32.1, MassUnit::Gram));
  }

  #[test]
  fn test_resolve_extra_space() {
    assert_resolves(
      UnitResolver::shared(),
      "   32.1      \t   g  ",
      Quantity::new(32.1, MassUnit::Gram),
    );
  }

  #[test]
  fn test_resolve_abbreviated() {
    assert_resolves(UnitResolver::shared(), "10 min.", Quantity::new(10.0, TimeUnit::Minute));
  }

  #[test]
  fn test_resolve_negative() {
    assert_resolves(
      UnitResolver::shared(),
      "-78°C",
      Quantity::new(-78.0, TemperatureUnit::Celsius),
    );
  }

  #[test]
  fn test_resolve_precision() {
    assert_resolves(
      UnitResolver::shared(),
      "10±5g",
      Quantity::with_precision(10.0, 5.0, MassUnit::Gram),
    );
  }

  #[test]
  fn test_resolve_precision_spelled_out() {
    assert_resolves(
      UnitResolver::shared(),
      "10 +/- 5 g",
      Quantity::with_precision(10.0, 5.0, MassUnit::Gram),
    );
  }

  #[test]
  fn test_resolve_length() {
    assert_resolves(UnitResolver::shared(), " 10 meter", Quantity::new(10.0, LengthUnit::Meter));
  }

  #[test]
  fn test_resolve_scientific() {
    assert_resolves(UnitResolver::shared(), "1.2e-3g", Quantity::new(0.0012, MassUnit::Gram));
  }

  #[test]
  fn test_resolve_nanoliters() {
    assert_resolves(UnitResolver::shared(), "0.12 nL", Quantity::new(0.12, VolumeUnit::Nanoliter));
  }

  #[test]
  fn test_resolve_moles() {
    assert_resolves(UnitResolver::shared(), "1 mol", Quantity::new(1.0, MolesUnit::Mole));
    assert_resolves(
      UnitResolver::shared(),
      "300 micromoles",
      Quantity::new(300.0, MolesUnit::Micromole),
    );
  }

  #[test]
  fn test_resolve_concentration() {
    let resolver = UnitResolver::shared_concentration();
    assert_resolves(resolver, "1 molar", Quantity::new(1.0, ConcentrationUnit::Molar));
    assert_resolves(resolver, "0.1 M", Quantity::new(0.1, ConcentrationUnit::Molar));
    assert_resolves(resolver, "5 mM", Quantity::new(5.0, ConcentrationUnit::Millimolar));
    assert_resolves(resolver, "25 uM", Quantity::new(25.0, ConcentrationUnit::Micromolar));
  }

  #[test]
  fn test_resolve_concentration_wrong_case() {
    let resolver = UnitResolver::shared_concentration();
    assert!(matches!(
      resolver.resolve("1 m"),
      Err(ResolveError::UnrecognizedUnits(_)),
    ));
  }

  #[test]
  fn test_resolve_allow_range() {
    let quantity = UnitResolver::shared().resolve_allowing_range("1-2 h").unwrap();
    assert_eq!(quantity.units, TimeUnit::Hour.into());
    assert_abs_diff_eq!(quantity.value, 1.5);
    assert_abs_diff_eq!(quantity.precision, 0.5);
  }

  #[test]
  fn test_resolve_range_with_spaces() {
    let quantity = UnitResolver::shared().resolve_allowing_range("20 - 30 min").unwrap();
    assert_eq!(quantity.units, TimeUnit::Minute.into());
    assert_abs_diff_eq!(quantity.value, 25.0);
    assert_abs_diff_eq!(quantity.precision, 5.0);
  }

  #[test]
  fn test_resolve_range_not_allowed() {
    assert!(matches!(
      UnitResolver::shared().resolve("1-2 h"),
      Err(ResolveError::RangeNotAllowed(_)),
    ));
  }

  #[test]
  fn test_resolve_two_ranges() {
    assert!(matches!(
      UnitResolver::shared().resolve_allowing_range("1-2 h 3-4 d"),
      Err(ResolveError::MultipleQuantities(_)),
    ));
  }

  #[test]
  fn test_resolve_range_plus_extra_quantity() {
    assert!(matches!(
      UnitResolver::shared().resolve_allowing_range("1-2 h then 5 g"),
      Err(ResolveError::MultipleQuantities(_)),
    ));
  }

  #[test]
  fn test_resolve_bad_units() {
    assert_eq!(
      UnitResolver::shared().resolve("1.21 GW"),
      Err(ResolveError::UnrecognizedUnits("GW".to_owned())),
    );
  }

  #[test]
  fn test_resolve_multiple_matches() {
    assert!(matches!(
      UnitResolver::shared().resolve("15.0 ML 20.0 L"),
      Err(ResolveError::MultipleQuantities(_)),
    ));
  }

  #[test]
  fn test_resolve_extra_period() {
    assert!(matches!(
      UnitResolver::shared().resolve("15.0. ML"),
      Err(ResolveError::NoQuantity(_)),
    ));
  }

  #[test]
  fn test_resolve_no_quantity_at_all() {
    assert!(matches!(
      UnitResolver::shared().resolve("no numbers here"),
      Err(ResolveError::NoQuantity(_)),
    ));
    assert!(matches!(
      UnitResolver::shared().resolve(""),
      Err(ResolveError::NoQuantity(_)),
    ));
  }

  #[test]
  fn test_resolve_ambiguous_units() {
    let err = UnitResolver::shared().resolve("5.2 m").unwrap_err();
    let ResolveError::AmbiguousUnits { token, candidates } = err else {
      panic!("expected ambiguous units, got {:?}", err);
    };
    assert_eq!(token, "m");
    assert!(candidates.contains(&TimeUnit::Minute.into()));
    assert!(candidates.contains(&LengthUnit::Meter.into()));
  }

  #[test]
  fn test_round_trip_every_synonym() {
    // Resolve each synonym against a resolver restricted to its own
    // kind, so that deliberately shared spellings ("m") stay unique.
    for kind in UnitKind::ALL {
      let resolver = UnitResolver::with_kinds(&[kind]).unwrap();
      for unit in kind.units() {
        for synonym in unit.synonyms() {
          let text = format!("3.5 {}", synonym.spelling);
          assert_resolves(&resolver, &text, Quantity::new(3.5, unit));
          if synonym.case == CaseRule::Insensitive {
            let text = format!("3.5 {}", synonym.spelling.to_uppercase());
            assert_resolves(&resolver, &text, Quantity::new(3.5, unit));
          }
        }
      }
    }
  }

  #[test]
  fn test_resolve_display_round_trip() {
    let resolver = UnitResolver::shared();
    for text in ["15.0 ML", "10±5g", "24 H", "-78°C", "0.12 nL", "1.2e-3g"] {
      let quantity = resolver.resolve(text).unwrap();
      assert_eq!(resolver.resolve(&quantity.to_string()).unwrap(), quantity);
    }
    let ranged = resolver.resolve_allowing_range("1-2 h").unwrap();
    assert_eq!(resolver.resolve(&ranged.to_string()).unwrap(), ranged);
  }
}
