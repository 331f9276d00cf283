//! # Galena
//!
//! Closed-form semiconductor device physics formulas in Rust.
//!
//! Galena evaluates SPICE-style device-model equations directly: each
//! function computes one physical quantity (a current, a capacitance, a
//! resistance, a junction potential) from an immutable parameter record, a
//! bias point and an operating temperature. There is no circuit solver and
//! no state; everything is a one-shot arithmetic evaluation.
//!
//! ## Quick start
//!
//! ```rust
//! use galena::prelude::*;
//!
//! let q = BjtModel::npn(BjtParams::default()).unwrap();
//!
//! // Forward-active operating point at 25 C
//! let ic = q.collector_current(0.65, -5.0, 298.15);
//! let ib = q.base_current(0.65, -5.0, 298.15);
//! assert!(ic > 0.0 && ib > 0.0);
//! ```
//!
//! ## Numeric contract
//!
//! Evaluation is IEEE-permissive: singular inputs (a bias at the Early
//! voltage, exp() overflow, zero knee currents) propagate `Inf`/`NaN`
//! rather than erroring. Errors are reserved for parameter validation at
//! model construction and for regime selections with no defined meaning
//! (see [`galena_devices::error::Error`]).

// Re-export member crates
pub use galena_core as core;
pub use galena_devices as devices;

// Convenient re-exports from galena-core
pub use galena_core::constants::{
    find_constants, list_constants, units, value, BOLTZMANN_EV_PER_K, BOLTZMANN_J_PER_K,
    ELEMENTARY_CHARGE,
};
pub use galena_core::numeric::{central_difference, DEFAULT_STEP};
pub use galena_core::Error as CoreError;

// Convenient re-exports from galena-devices
pub use galena_devices::bjt::{thermal_voltage, BjtModel, BjtParams, BjtPolarity};
pub use galena_devices::gain::{
    base_transport_factor, common_base_current_gain, common_emitter_current_gain,
    emitter_injection_efficiency, AlphaSpec, BetaSpec,
};
pub use galena_devices::Error as DeviceError;

/// Prelude module containing commonly used types and functions.
///
/// ```rust
/// use galena::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{thermal_voltage, BjtModel, BjtParams, BjtPolarity};
    pub use crate::{common_base_current_gain, common_emitter_current_gain, AlphaSpec, BetaSpec};
    pub use crate::{BOLTZMANN_J_PER_K, ELEMENTARY_CHARGE};
}
