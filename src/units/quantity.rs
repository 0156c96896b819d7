
//! Typed quantities: a value, an optional precision, and a fully
//! resolved canonical unit.

use super::kind::{UnitKind, Units};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// A scalar quantity tagged with a canonical unit.
///
/// `precision` is zero when unspecified. For a range input the value
/// is the midpoint of the range and the precision is half its span.
/// Quantities are immutable value objects; derived computations
/// produce new quantities instead of mutating their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
  pub value: f64,
  pub precision: f64,
  pub units: Units,
}

impl Quantity {
  pub fn new(value: f64, units: impl Into<Units>) -> Self {
    Self::with_precision(value, 0.0, units)
  }

  pub fn with_precision(value: f64, precision: f64, units: impl Into<Units>) -> Self {
    debug_assert!(precision >= 0.0, "precision must be non-negative");
    Self { value, precision, units: units.into() }
  }

  pub fn kind(&self) -> UnitKind {
    self.units.kind()
  }

  /// The value expressed in the base unit of this quantity's kind.
  pub fn to_base(&self) -> f64 {
    self.value * self.units.scale()
  }
}

impl Display for Quantity {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.precision > 0.0 {
      write!(f, "{}±{} {}", self.value, self.precision, self.units)
    } else {
      write!(f, "{} {}", self.value, self.units)
    }
  }
}
