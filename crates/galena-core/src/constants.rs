//! CODATA 2018 physical constants.
//!
//! Values are taken from the 2018 CODATA recommended values published by
//! NIST (<https://physics.nist.gov/cuu/Constants/index.html>).
//!
//! The constants the device models consume on every evaluation (elementary
//! charge, Boltzmann constant) are exposed as compile-time `const`s; the
//! full set is also available through the name-keyed [`value`]/[`units`]
//! lookups for callers that want to browse or display them.

use crate::error::{Error, Result};

/// Elementary charge (C).
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// Boltzmann constant (J/K).
pub const BOLTZMANN_J_PER_K: f64 = 1.380649e-23;

/// Boltzmann constant (eV/K).
pub const BOLTZMANN_EV_PER_K: f64 = 8.617333262e-5;

/// The full constants table: `(name, value, unit)`.
///
/// Exact values (elementary charge, Boltzmann constant, Planck constant,
/// speed of light) are exact by SI definition; the rest carry CODATA 2018
/// uncertainties.
const CONSTANTS: &[(&str, f64, &str)] = &[
    ("Speed of light in vacuum", 299_792_458.0, "m/s"),
    ("Planck constant in J s", 6.62607015e-34, "J s"),
    ("Planck constant in eV s", 4.135667696e-15, "eV s"),
    ("Reduced Planck constant in J s", 1.054571817e-34, "J s"),
    ("Reduced Planck constant in eV s", 6.582119569e-16, "eV s"),
    ("Elementary charge", ELEMENTARY_CHARGE, "C"),
    ("Vacuum magnetic permeability", 1.25663706212e-6, "H/m"),
    ("Vacuum electric permittivity", 8.8541878128e-12, "F/m"),
    ("Boltzmann constant in eV/K", BOLTZMANN_EV_PER_K, "eV/K"),
    ("Boltzmann constant in J/K", BOLTZMANN_J_PER_K, "J/K"),
    ("Atomic mass constant", 1.66053906660e-27, "kg"),
    ("Fine structure constant", 7.2973525693e-3, ""),
    ("Electron mass", 9.1093837015e-31, "kg"),
    ("Stefan-Boltzmann constant", 5.670374419e-8, "W/(m^2 K^4)"),
    ("Rydberg constant", 10_973_731.568160, "1/m"),
    ("Rydberg constant times hc in eV", 13.605693122994, "eV"),
    ("Rydberg constant times hc in J", 2.1798723611035e-18, "J"),
    ("Rydberg constant times c in Hz", 3.2898419602508e15, "Hz"),
    ("Compton wavelength", 2.42631023867e-12, "m"),
    ("Classical electron radius", 2.8179403262e-15, "m"),
    ("Characteristic impedance of vacuum", 376.730313668, "ohm"),
    ("Bohr radius", 5.29177210903e-11, "m"),
    ("Electron volt in J", 1.602176634e-19, "J"),
    ("Proton mass", 1.67262192369e-27, "kg"),
    ("Neutron mass", 1.67492749804e-27, "kg"),
];

/// Look up a constant's value by its full name.
pub fn value(name: &str) -> Result<f64> {
    CONSTANTS
        .iter()
        .find(|(key, _, _)| *key == name)
        .map(|(_, v, _)| *v)
        .ok_or_else(|| Error::UnknownConstant(name.to_string()))
}

/// Look up a constant's unit string by its full name.
pub fn units(name: &str) -> Result<&'static str> {
    CONSTANTS
        .iter()
        .find(|(key, _, _)| *key == name)
        .map(|(_, _, u)| *u)
        .ok_or_else(|| Error::UnknownConstant(name.to_string()))
}

/// Names of all constants in the table, in table order.
pub fn list_constants() -> Vec<&'static str> {
    CONSTANTS.iter().map(|(key, _, _)| *key).collect()
}

/// Names of all constants whose name contains `term` (case-insensitive).
pub fn find_constants(term: &str) -> Vec<&'static str> {
    let term = term.to_lowercase();
    CONSTANTS
        .iter()
        .filter(|(key, _, _)| key.to_lowercase().contains(&term))
        .map(|(key, _, _)| *key)
        .collect()
}
