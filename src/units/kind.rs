
//! The closed set of quantity kinds and their canonical units.
//!
//! Every canonical unit belongs to exactly one [`UnitKind`] and
//! carries a multiplicative scale factor to that kind's base unit
//! (gram, liter, mole, second, meter, molar). The per-kind enums allow
//! exhaustive matching, and [`Units`] tags a unit with its kind so a
//! single value can travel through the resolver.

use super::synonym::{CaseRule, Synonym};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Display, Formatter};

/// A category of physical measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
  Mass,
  Volume,
  Moles,
  Time,
  Temperature,
  Length,
  Concentration,
}

/// A canonical unit of measure, tagged with its quantity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
  Mass(MassUnit),
  Volume(VolumeUnit),
  Moles(MolesUnit),
  Time(TimeUnit),
  Temperature(TemperatureUnit),
  Length(LengthUnit),
  Concentration(ConcentrationUnit),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
  Microgram,
  Milligram,
  Gram,
  Kilogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeUnit {
  Nanoliter,
  Microliter,
  Milliliter,
  Liter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MolesUnit {
  Nanomole,
  Micromole,
  Millimole,
  Mole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
  Second,
  Minute,
  Hour,
  Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
  Celsius,
  Fahrenheit,
  Kelvin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
  Millimeter,
  Centimeter,
  Meter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcentrationUnit {
  Micromolar,
  Millimolar,
  Molar,
}

/// Shorthand for the synonym tables below. A bare spelling is
/// case-insensitive; `sensitive` marks spellings that must match in
/// their declared case (reserved for symbols which collide
/// case-insensitively with a unit of another kind).
macro_rules! syn {
  ($spelling:literal) => {
    Synonym { spelling: $spelling, case: CaseRule::Insensitive }
  };
  ($spelling:literal, sensitive) => {
    Synonym { spelling: $spelling, case: CaseRule::Sensitive }
  };
}

impl UnitKind {
  pub const ALL: [UnitKind; 7] = [
    UnitKind::Mass,
    UnitKind::Volume,
    UnitKind::Moles,
    UnitKind::Time,
    UnitKind::Temperature,
    UnitKind::Length,
    UnitKind::Concentration,
  ];

  /// The kinds active in a default resolver. Concentration is
  /// deliberately absent; its `M` symbol cannot coexist with the `m`
  /// spellings of meter and minute, so callers opt into it with a
  /// separate resolver configuration.
  pub const DEFAULT_KINDS: [UnitKind; 6] = [
    UnitKind::Mass,
    UnitKind::Volume,
    UnitKind::Moles,
    UnitKind::Time,
    UnitKind::Temperature,
    UnitKind::Length,
  ];

  /// The unit all other units of this kind convert through.
  pub fn base_unit(self) -> Units {
    match self {
      UnitKind::Mass => Units::Mass(MassUnit::Gram),
      UnitKind::Volume => Units::Volume(VolumeUnit::Liter),
      UnitKind::Moles => Units::Moles(MolesUnit::Mole),
      UnitKind::Time => Units::Time(TimeUnit::Second),
      UnitKind::Temperature => Units::Temperature(TemperatureUnit::Kelvin),
      UnitKind::Length => Units::Length(LengthUnit::Meter),
      UnitKind::Concentration => Units::Concentration(ConcentrationUnit::Molar),
    }
  }

  /// All canonical units of this kind, ordered by ascending scale
  /// factor.
  pub fn units(self) -> Vec<Units> {
    match self {
      UnitKind::Mass => MassUnit::ALL.iter().map(|&u| Units::Mass(u)).collect(),
      UnitKind::Volume => VolumeUnit::ALL.iter().map(|&u| Units::Volume(u)).collect(),
      UnitKind::Moles => MolesUnit::ALL.iter().map(|&u| Units::Moles(u)).collect(),
      UnitKind::Time => TimeUnit::ALL.iter().map(|&u| Units::Time(u)).collect(),
      UnitKind::Temperature => TemperatureUnit::ALL.iter().map(|&u| Units::Temperature(u)).collect(),
      UnitKind::Length => LengthUnit::ALL.iter().map(|&u| Units::Length(u)).collect(),
      UnitKind::Concentration => {
        ConcentrationUnit::ALL.iter().map(|&u| Units::Concentration(u)).collect()
      }
    }
  }
}

impl Units {
  pub fn kind(self) -> UnitKind {
    match self {
      Units::Mass(_) => UnitKind::Mass,
      Units::Volume(_) => UnitKind::Volume,
      Units::Moles(_) => UnitKind::Moles,
      Units::Time(_) => UnitKind::Time,
      Units::Temperature(_) => UnitKind::Temperature,
      Units::Length(_) => UnitKind::Length,
      Units::Concentration(_) => UnitKind::Concentration,
    }
  }

  /// Multiplicative conversion factor to the base unit of this unit's
  /// kind.
  pub fn scale(self) -> f64 {
    match self {
      Units::Mass(unit) => unit.scale(),
      Units::Volume(unit) => unit.scale(),
      Units::Moles(unit) => unit.scale(),
      Units::Time(unit) => unit.scale(),
      Units::Temperature(unit) => unit.scale(),
      Units::Length(unit) => unit.scale(),
      Units::Concentration(unit) => unit.scale(),
    }
  }

  /// The canonical display spelling of this unit. Every symbol is also
  /// an accepted synonym, so a displayed quantity survives a round
  /// trip through the resolver.
  pub fn symbol(self) -> &'static str {
    match self {
      Units::Mass(unit) => unit.symbol(),
      Units::Volume(unit) => unit.symbol(),
      Units::Moles(unit) => unit.symbol(),
      Units::Time(unit) => unit.symbol(),
      Units::Temperature(unit) => unit.symbol(),
      Units::Length(unit) => unit.symbol(),
      Units::Concentration(unit) => unit.symbol(),
    }
  }

  /// The accepted textual spellings of this unit.
  pub fn synonyms(self) -> &'static [Synonym] {
    match self {
      Units::Mass(unit) => unit.synonyms(),
      Units::Volume(unit) => unit.synonyms(),
      Units::Moles(unit) => unit.synonyms(),
      Units::Time(unit) => unit.synonyms(),
      Units::Temperature(unit) => unit.synonyms(),
      Units::Length(unit) => unit.synonyms(),
      Units::Concentration(unit) => unit.synonyms(),
    }
  }
}

impl MassUnit {
  pub const ALL: [MassUnit; 4] = [
    MassUnit::Microgram,
    MassUnit::Milligram,
    MassUnit::Gram,
    MassUnit::Kilogram,
  ];

  pub fn scale(self) -> f64 {
    match self {
      MassUnit::Microgram => 1e-6,
      MassUnit::Milligram => 1e-3,
      MassUnit::Gram => 1.0,
      MassUnit::Kilogram => 1e3,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      MassUnit::Microgram => "µg",
      MassUnit::Milligram => "mg",
      MassUnit::Gram => "g",
      MassUnit::Kilogram => "kg",
    }
  }

  pub fn synonyms(self) -> &'static [Synonym] {
    match self {
      MassUnit::Microgram => &[
        syn!("ug"), syn!("µg"), syn!("μg"), syn!("microgram"), syn!("micrograms"),
      ],
      MassUnit::Milligram => &[syn!("mg"), syn!("milligram"), syn!("milligrams")],
      MassUnit::Gram => &[syn!("g"), syn!("gm"), syn!("gram"), syn!("grams")],
      MassUnit::Kilogram => &[syn!("kg"), syn!("kilogram"), syn!("kilograms")],
    }
  }
}

impl VolumeUnit {
  pub const ALL: [VolumeUnit; 4] = [
    VolumeUnit::Nanoliter,
    VolumeUnit::Microliter,
    VolumeUnit::Milliliter,
    VolumeUnit::Liter,
  ];

  pub fn scale(self) -> f64 {
    match self {
      VolumeUnit::Nanoliter => 1e-9,
      VolumeUnit::Microliter => 1e-6,
      VolumeUnit::Milliliter => 1e-3,
      VolumeUnit::Liter => 1.0,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      VolumeUnit::Nanoliter => "nL",
      VolumeUnit::Microliter => "µL",
      VolumeUnit::Milliliter => "mL",
      VolumeUnit::Liter => "L",
    }
  }

  pub fn synonyms(self) -> &'static [Synonym] {
    match self {
      VolumeUnit::Nanoliter => &[
        syn!("nl"), syn!("nanoliter"), syn!("nanoliters"), syn!("nanolitre"), syn!("nanolitres"),
      ],
      VolumeUnit::Microliter => &[
        syn!("ul"), syn!("µl"), syn!("μl"),
        syn!("microliter"), syn!("microliters"), syn!("microlitre"), syn!("microlitres"),
      ],
      VolumeUnit::Milliliter => &[
        syn!("ml"), syn!("cc"),
        syn!("milliliter"), syn!("milliliters"), syn!("millilitre"), syn!("millilitres"),
      ],
      VolumeUnit::Liter => &[
        syn!("l"), syn!("liter"), syn!("liters"), syn!("litre"), syn!("litres"),
      ],
    }
  }
}

impl MolesUnit {
  pub const ALL: [MolesUnit; 4] = [
    MolesUnit::Nanomole,
    MolesUnit::Micromole,
    MolesUnit::Millimole,
    MolesUnit::Mole,
  ];

  pub fn scale(self) -> f64 {
    match self {
      MolesUnit::Nanomole => 1e-9,
      MolesUnit::Micromole => 1e-6,
      MolesUnit::Millimole => 1e-3,
      MolesUnit::Mole => 1.0,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      MolesUnit::Nanomole => "nmol",
      MolesUnit::Micromole => "µmol",
      MolesUnit::Millimole => "mmol",
      MolesUnit::Mole => "mol",
    }
  }

  pub fn synonyms(self) -> &'static [Synonym] {
    match self {
      MolesUnit::Nanomole => &[
        syn!("nmol"), syn!("nmols"), syn!("nanomole"), syn!("nanomoles"),
      ],
      MolesUnit::Micromole => &[
        syn!("umol"), syn!("µmol"), syn!("μmol"), syn!("micromole"), syn!("micromoles"),
      ],
      MolesUnit::Millimole => &[
        syn!("mmol"), syn!("mmols"), syn!("millimole"), syn!("millimoles"),
      ],
      MolesUnit::Mole => &[syn!("mol"), syn!("mols"), syn!("mole"), syn!("moles")],
    }
  }
}

impl TimeUnit {
  pub const ALL: [TimeUnit; 4] = [
    TimeUnit::Second,
    TimeUnit::Minute,
    TimeUnit::Hour,
    TimeUnit::Day,
  ];

  pub fn scale(self) -> f64 {
    match self {
      TimeUnit::Second => 1.0,
      TimeUnit::Minute => 60.0,
      TimeUnit::Hour => 3600.0,
      TimeUnit::Day => 86400.0,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      TimeUnit::Second => "s",
      TimeUnit::Minute => "min",
      TimeUnit::Hour => "h",
      TimeUnit::Day => "d",
    }
  }

  pub fn synonyms(self) -> &'static [Synonym] {
    match self {
      TimeUnit::Second => &[
        syn!("s"), syn!("sec"), syn!("secs"), syn!("second"), syn!("seconds"),
      ],
      // "m" is shared with meter; under the default kind set the
      // resolver reports it as ambiguous rather than guessing.
      TimeUnit::Minute => &[
        syn!("m"), syn!("min"), syn!("mins"), syn!("minute"), syn!("minutes"),
      ],
      TimeUnit::Hour => &[syn!("h"), syn!("hr"), syn!("hrs"), syn!("hour"), syn!("hours")],
      TimeUnit::Day => &[syn!("d"), syn!("day"), syn!("days")],
    }
  }
}

impl TemperatureUnit {
  pub const ALL: [TemperatureUnit; 3] = [
    TemperatureUnit::Fahrenheit,
    TemperatureUnit::Celsius,
    TemperatureUnit::Kelvin,
  ];

  /// Relative degree size. Temperature quantities are never re-based
  /// by this crate (an affine conversion would also need an offset),
  /// so the factor only orders the units.
  pub fn scale(self) -> f64 {
    match self {
      TemperatureUnit::Celsius => 1.0,
      TemperatureUnit::Fahrenheit => 5.0 / 9.0,
      TemperatureUnit::Kelvin => 1.0,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      TemperatureUnit::Celsius => "°C",
      TemperatureUnit::Fahrenheit => "°F",
      TemperatureUnit::Kelvin => "K",
    }
  }

  pub fn synonyms(self) -> &'static [Synonym] {
    match self {
      TemperatureUnit::Celsius => &[syn!("c"), syn!("°c"), syn!("degc"), syn!("celsius")],
      TemperatureUnit::Fahrenheit => &[syn!("f"), syn!("°f"), syn!("degf"), syn!("fahrenheit")],
      TemperatureUnit::Kelvin => &[syn!("k"), syn!("kelvin")],
    }
  }
}

impl LengthUnit {
  pub const ALL: [LengthUnit; 3] = [
    LengthUnit::Millimeter,
    LengthUnit::Centimeter,
    LengthUnit::Meter,
  ];

  pub fn scale(self) -> f64 {
    match self {
      LengthUnit::Millimeter => 1e-3,
      LengthUnit::Centimeter => 1e-2,
      LengthUnit::Meter => 1.0,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      LengthUnit::Millimeter => "mm",
      LengthUnit::Centimeter => "cm",
      LengthUnit::Meter => "m",
    }
  }

  pub fn synonyms(self) -> &'static [Synonym] {
    match self {
      LengthUnit::Millimeter => &[
        syn!("mm"), syn!("millimeter"), syn!("millimeters"), syn!("millimetre"), syn!("millimetres"),
      ],
      LengthUnit::Centimeter => &[
        syn!("cm"), syn!("centimeter"), syn!("centimeters"), syn!("centimetre"), syn!("centimetres"),
      ],
      LengthUnit::Meter => &[
        syn!("m"), syn!("meter"), syn!("meters"), syn!("metre"), syn!("metres"),
      ],
    }
  }
}

impl ConcentrationUnit {
  pub const ALL: [ConcentrationUnit; 3] = [
    ConcentrationUnit::Micromolar,
    ConcentrationUnit::Millimolar,
    ConcentrationUnit::Molar,
  ];

  pub fn scale(self) -> f64 {
    match self {
      ConcentrationUnit::Micromolar => 1e-6,
      ConcentrationUnit::Millimolar => 1e-3,
      ConcentrationUnit::Molar => 1.0,
    }
  }

  pub fn symbol(self) -> &'static str {
    match self {
      ConcentrationUnit::Micromolar => "µM",
      ConcentrationUnit::Millimolar => "mM",
      ConcentrationUnit::Molar => "M",
    }
  }

  /// The molar symbols stay case-sensitive: `M` must remain
  /// distinguishable from `m`, and `mM` from `mm`.
  pub fn synonyms(self) -> &'static [Synonym] {
    match self {
      ConcentrationUnit::Micromolar => &[
        syn!("uM", sensitive), syn!("µM", sensitive), syn!("μM", sensitive),
        syn!("micromolar"),
      ],
      ConcentrationUnit::Millimolar => &[syn!("mM", sensitive), syn!("millimolar")],
      ConcentrationUnit::Molar => &[syn!("M", sensitive), syn!("molar")],
    }
  }
}

impl From<MassUnit> for Units {
  fn from(unit: MassUnit) -> Self {
    Units::Mass(unit)
  }
}

impl From<VolumeUnit> for Units {
  fn from(unit: VolumeUnit) -> Self {
    Units::Volume(unit)
  }
}

impl From<MolesUnit> for Units {
  fn from(unit: MolesUnit) -> Self {
    Units::Moles(unit)
  }
}

impl From<TimeUnit> for Units {
  fn from(unit: TimeUnit) -> Self {
    Units::Time(unit)
  }
}

impl From<TemperatureUnit> for Units {
  fn from(unit: TemperatureUnit) -> Self {
    Units::Temperature(unit)
  }
}

impl From<LengthUnit> for Units {
  fn from(unit: LengthUnit) -> Self {
    Units::Length(unit)
  }
}

impl From<ConcentrationUnit> for Units {
  fn from(unit: ConcentrationUnit) -> Self {
    Units::Concentration(unit)
  }
}

impl Display for UnitKind {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      UnitKind::Mass => write!(f, "mass"),
      UnitKind::Volume => write!(f, "volume"),
      UnitKind::Moles => write!(f, "moles"),
      UnitKind::Time => write!(f, "time"),
      UnitKind::Temperature => write!(f, "temperature"),
      UnitKind::Length => write!(f, "length"),
      UnitKind::Concentration => write!(f, "concentration"),
    }
  }
}

impl Display for Units {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.symbol())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_all_constants_are_sorted_by_scale() {
    for kind in UnitKind::ALL {
      let units = kind.units();
      for pair in units.windows(2) {
        assert!(
          pair[0].scale() <= pair[1].scale(),
          "units of {} are not sorted by scale",
          kind,
        );
      }
    }
  }

  #[test]
  fn test_base_units_have_unit_scale() {
    for kind in UnitKind::ALL {
      assert_eq!(kind.base_unit().scale(), 1.0);
      assert_eq!(kind.base_unit().kind(), kind);
    }
  }

  #[test]
  fn test_every_unit_knows_its_kind() {
    for kind in UnitKind::ALL {
      for unit in kind.units() {
        assert_eq!(unit.kind(), kind);
      }
    }
  }

  #[test]
  fn test_symbol_is_an_accepted_synonym() {
    for kind in UnitKind::ALL {
      for unit in kind.units() {
        let symbol = unit.symbol().to_lowercase();
        assert!(
          unit.synonyms().iter().any(|s| s.spelling.to_lowercase() == symbol),
          "symbol {:?} of {:?} is not in its own synonym table",
          unit.symbol(),
          unit,
        );
      }
    }
  }

  #[test]
  fn test_units_serde_round_trip() {
    let unit = Units::Volume(VolumeUnit::Milliliter);
    let json = serde_json::to_string(&unit).unwrap();
    assert_eq!(serde_json::from_str::<Units>(&json).unwrap(), unit);
  }
}
