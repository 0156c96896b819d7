
//! Derived computation of an amount of solute from a volume and a
//! molar concentration.

use super::kind::{MolesUnit, UnitKind};
use super::quantity::Quantity;

use thiserror::Error;

/// The calculator was handed a quantity of the wrong kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SoluteQuantityError {
  #[error("expected a volume quantity, got {0}")]
  NotAVolume(UnitKind),
  #[error("expected a concentration quantity, got {0}")]
  NotAConcentration(UnitKind),
}

/// Computes the amount of solute dissolved in `volume` of solution at
/// `concentration`, auto-scaled to the coarsest moles unit in which
/// the result has magnitude at least one.
///
/// 1 L of a 1 M solution holds 1 mol of solute; 3 mL at 0.1 M holds
/// 300 µmol, not 0.0003 mol.
pub fn compute_solute_quantity(
  volume: &Quantity,
  concentration: &Quantity,
) -> Result<Quantity, SoluteQuantityError> {
  if volume.kind() != UnitKind::Volume {
    return Err(SoluteQuantityError::NotAVolume(volume.kind()));
  }
  if concentration.kind() != UnitKind::Concentration {
    return Err(SoluteQuantityError::NotAConcentration(concentration.kind()));
  }
  let moles = volume.to_base() * concentration.to_base();
  let units = presentation_unit(moles);
  let value = moles / units.scale();
  let precision = value.abs() * (relative_precision(volume) + relative_precision(concentration));
  Ok(Quantity::with_precision(value, precision, units))
}

/// The coarsest moles unit representing `moles` with magnitude at
/// least one, falling back to the finest unit when even it stays below
/// one.
fn presentation_unit(moles: f64) -> MolesUnit {
  for &unit in MolesUnit::ALL.iter().rev() {
    if (moles / unit.scale()).abs() >= 1.0 {
      return unit;
    }
  }
  MolesUnit::ALL[0]
}

/// Relative precision of a quantity, treating an exact or zero-valued
/// quantity as error-free. Relative errors of the two inputs are
/// summed, so exact inputs yield an exact output.
fn relative_precision(quantity: &Quantity) -> f64 {
  if quantity.precision == 0.0 || quantity.value == 0.0 {
    0.0
  } else {
    (quantity.precision / quantity.value).abs()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::kind::{ConcentrationUnit, MassUnit, VolumeUnit};
  use crate::units::resolver::UnitResolver;

  use approx::assert_abs_diff_eq;

  fn assert_solute_quantity(volume: &str, concentration: &str, expected: &str) {
    let volume = UnitResolver::shared().resolve(volume).unwrap();
    let concentration = UnitResolver::shared_concentration().resolve(concentration).unwrap();
    let expected = UnitResolver::shared().resolve(expected).unwrap();
    let quantity = compute_solute_quantity(&volume, &concentration).unwrap();
    assert_eq!(quantity.units, expected.units);
    assert_abs_diff_eq!(quantity.value, expected.value, epsilon = 1e-9);
    assert_eq!(quantity.precision, 0.0);
  }

  #[test]
  fn test_liter_of_molar_is_a_mole() {
    assert_solute_quantity("1L", "1 molar", "1 mol");
  }

  #[test]
  fn test_small_volumes_scale_down_to_micromoles() {
    assert_solute_quantity("3mL", "0.1 molar", "300 micromoles");
  }

  #[test]
  fn test_intermediate_volumes_scale_to_millimoles() {
    assert_solute_quantity("100mL", "0.1 molar", "10 millimoles");
  }

  #[test]
  fn test_tiny_amounts_fall_back_to_nanomoles() {
    let volume = Quantity::new(1.0, VolumeUnit::Nanoliter);
    let concentration = Quantity::new(0.1, ConcentrationUnit::Micromolar);
    let quantity = compute_solute_quantity(&volume, &concentration).unwrap();
    assert_eq!(quantity.units, MolesUnit::Nanomole.into());
    assert_abs_diff_eq!(quantity.value, 1e-7, epsilon = 1e-18);
  }

  #[test]
  fn test_zero_volume_uses_finest_unit() {
    let volume = Quantity::new(0.0, VolumeUnit::Liter);
    let concentration = Quantity::new(1.0, ConcentrationUnit::Molar);
    let quantity = compute_solute_quantity(&volume, &concentration).unwrap();
    assert_eq!(quantity.units, MolesUnit::Nanomole.into());
    assert_eq!(quantity.value, 0.0);
  }

  #[test]
  fn test_precision_propagates_relative_errors() {
    let volume = Quantity::with_precision(1.0, 0.1, VolumeUnit::Liter);
    let concentration = Quantity::new(1.0, ConcentrationUnit::Molar);
    let quantity = compute_solute_quantity(&volume, &concentration).unwrap();
    assert_eq!(quantity.units, MolesUnit::Mole.into());
    assert_abs_diff_eq!(quantity.value, 1.0);
    assert_abs_diff_eq!(quantity.precision, 0.1, epsilon = 1e-12);

    let concentration = Quantity::with_precision(1.0, 0.2, ConcentrationUnit::Molar);
    let quantity = compute_solute_quantity(&volume, &concentration).unwrap();
    assert_abs_diff_eq!(quantity.precision, 0.3, epsilon = 1e-12);
  }

  #[test]
  fn test_wrong_kinds_are_rejected() {
    let mass = Quantity::new(1.0, MassUnit::Gram);
    let volume = Quantity::new(1.0, VolumeUnit::Liter);
    let concentration = Quantity::new(1.0, ConcentrationUnit::Molar);
    assert_eq!(
      compute_solute_quantity(&mass, &concentration),
      Err(SoluteQuantityError::NotAVolume(UnitKind::Mass)),
    );
    assert_eq!(
      compute_solute_quantity(&volume, &volume),
      Err(SoluteQuantityError::NotAConcentration(UnitKind::Volume)),
    );
  }
}
