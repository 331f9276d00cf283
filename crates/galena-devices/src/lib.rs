//! Semiconductor device models for Galena.
//!
//! This crate provides the temperature-dependent Gummel-Poon BJT model and
//! the supporting current-gain formulas. All evaluations are pure,
//! closed-form expressions over the model parameters, junction voltages and
//! the operating temperature; there is no internal state, no caching and no
//! iterative solving, so models are freely shareable across threads and
//! sweep evaluations parallelize trivially on the caller's side.

pub mod bjt;
pub mod error;
pub mod gain;

pub use bjt::{thermal_voltage, BjtModel, BjtParams, BjtPolarity};
pub use error::{Error, Result};
pub use gain::{common_base_current_gain, common_emitter_current_gain, AlphaSpec, BetaSpec};
