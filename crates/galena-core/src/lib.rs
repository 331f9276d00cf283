//! Physical constants and shared numeric utilities for Galena.
//!
//! This crate provides the fundamental building blocks consumed by the
//! device-model crates:
//! - CODATA 2018 physical constants, both as compile-time `const`s and
//!   through a name-keyed lookup table
//! - Numerical differentiation via central differences

pub mod constants;
pub mod error;
pub mod numeric;

pub use constants::{BOLTZMANN_EV_PER_K, BOLTZMANN_J_PER_K, ELEMENTARY_CHARGE};
pub use error::{Error, Result};
pub use numeric::{central_difference, DEFAULT_STEP};
