
//! Extraction of typed physical quantities from short human-written
//! strings such as `"-78°C"`, `"10±5g"`, or `"1-2 h"`, plus unit-aware
//! arithmetic over the results.
//!
//! The crate's surface is deliberately small: a [`units::UnitResolver`]
//! turns a string into a [`units::Quantity`], and
//! [`units::compute_solute_quantity`] combines a volume with a molar
//! concentration into an amount of substance, auto-scaled to a
//! human-readable unit.

pub mod units;
