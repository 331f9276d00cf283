//! Numerical differentiation.
//!
//! The device models derive small-signal conductances from their current
//! formulas by numerical rather than symbolic differentiation. The step
//! size is part of the model contract: changing it changes the computed
//! transit-time capacitances at the last few significant digits, so it is
//! fixed here and documented rather than adapted to the operating point.

/// Default differentiation step (V) used by the device models.
pub const DEFAULT_STEP: f64 = 1e-6;

/// Central-difference first derivative of `f` at `x` with step `dx`.
///
/// `f'(x) ≈ (f(x + dx) - f(x - dx)) / (2 dx)`
///
/// The error term is O(dx^2) for a twice-differentiable `f`. No guard is
/// placed on `dx`; a zero or non-finite step propagates through IEEE
/// arithmetic and yields NaN.
pub fn central_difference<F>(f: F, x: f64, dx: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(x + dx) - f(x - dx)) / (2.0 * dx)
}
