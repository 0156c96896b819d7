
//! Subsystem for recognizing units of measure in free-form text and
//! representing the resulting typed quantities.

pub mod kind;
pub mod quantity;
pub mod resolver;
pub mod solute;
pub mod synonym;

pub use kind::{
  ConcentrationUnit, LengthUnit, MassUnit, MolesUnit, TemperatureUnit, TimeUnit, UnitKind, Units,
  VolumeUnit,
};
pub use quantity::Quantity;
pub use resolver::{ResolveError, UnitResolver};
pub use solute::{compute_solute_quantity, SoluteQuantityError};
pub use synonym::{CaseRule, Lookup, Synonym, SynonymConflict, SynonymIndex};
