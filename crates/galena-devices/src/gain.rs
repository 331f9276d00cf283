//! Current-gain and carrier-component bookkeeping for bipolar transistors.
//!
//! These are the textbook relations between the electron/hole components of
//! the terminal currents and the common-base (alpha) and common-emitter
//! (beta) current gains. The gain functions take an explicit selector enum
//! rather than dispatching on a string flag, so choosing between the
//! current-ratio and gain-conversion forms is checked at compile time.

/// How to compute the common-base current gain (alpha).
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum AlphaSpec {
    /// From terminal currents: `alpha = Ic / Ie`.
    FromCurrents {
        /// Collector current (A).
        ic: f64,
        /// Emitter current (A).
        ie: f64,
    },
    /// From the common-emitter gain: `alpha = beta / (beta + 1)`.
    FromBeta(f64),
}

/// How to compute the common-emitter current gain (beta).
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum BetaSpec {
    /// From terminal currents: `beta = Ic / Ib`.
    FromCurrents {
        /// Collector current (A).
        ic: f64,
        /// Base current (A).
        ib: f64,
    },
    /// From the common-base gain: `beta = alpha / (1 - alpha)`.
    FromAlpha(f64),
}

/// Low-frequency common-base current gain.
pub fn common_base_current_gain(from: AlphaSpec) -> f64 {
    match from {
        AlphaSpec::FromCurrents { ic, ie } => ic / ie,
        AlphaSpec::FromBeta(beta) => beta / (beta + 1.0),
    }
}

/// Low-frequency common-emitter current gain.
pub fn common_emitter_current_gain(from: BetaSpec) -> f64 {
    match from {
        BetaSpec::FromCurrents { ic, ib } => ic / ib,
        BetaSpec::FromAlpha(alpha) => alpha / (1.0 - alpha),
    }
}

/// Fraction of the emitter current carried by the injected carriers
/// (electrons for NPN, holes for PNP): `gamma = Ien / Ie`.
pub fn emitter_injection_efficiency(i_en: f64, i_e: f64) -> f64 {
    i_en / i_e
}

/// Fraction of injected carriers that reach the collector:
/// `alpha_T = Icn / Ien`.
pub fn base_transport_factor(i_cn: f64, i_en: f64) -> f64 {
    i_cn / i_en
}

/// Emitter current from its electron and hole components.
pub fn emitter_current_from_components(i_en: f64, i_ep: f64) -> f64 {
    i_en + i_ep
}

/// Base current from the injected-hole, recombination and collected-hole
/// components.
pub fn base_current_from_components(i_ep: f64, i_br: f64, i_cp: f64) -> f64 {
    i_ep + i_br - i_cp
}

/// Collector current from its electron and hole components.
pub fn collector_current_from_components(i_cn: f64, i_cp: f64) -> f64 {
    i_cn + i_cp
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_alpha_from_currents() {
        let alpha = common_base_current_gain(AlphaSpec::FromCurrents { ic: 0.99, ie: 1.0 });
        assert_relative_eq!(alpha, 0.99, max_relative = 1e-15);
    }

    #[test]
    fn test_alpha_beta_round_trip() {
        let beta = 100.0;
        let alpha = common_base_current_gain(AlphaSpec::FromBeta(beta));
        assert_relative_eq!(alpha, 100.0 / 101.0, max_relative = 1e-15);

        let beta_back = common_emitter_current_gain(BetaSpec::FromAlpha(alpha));
        assert_relative_eq!(beta_back, beta, max_relative = 1e-12);
    }

    #[test]
    fn test_beta_from_currents() {
        let beta = common_emitter_current_gain(BetaSpec::FromCurrents { ic: 1e-3, ib: 1e-5 });
        assert_relative_eq!(beta, 100.0, max_relative = 1e-15);
    }

    #[test]
    fn test_component_composition() {
        // gamma and alpha_T compose into alpha
        let (i_en, i_ep, i_br, i_cp) = (0.98, 0.02, 0.01, 0.0);
        let i_cn = i_en - i_br;

        let i_e = emitter_current_from_components(i_en, i_ep);
        let i_c = collector_current_from_components(i_cn, i_cp);
        let i_b = base_current_from_components(i_ep, i_br, i_cp);

        assert_relative_eq!(i_e, i_c + i_b, max_relative = 1e-15);

        let gamma = emitter_injection_efficiency(i_en, i_e);
        let alpha_t = base_transport_factor(i_cn, i_en);
        let alpha = common_base_current_gain(AlphaSpec::FromCurrents { ic: i_c, ie: i_e });
        assert_relative_eq!(gamma * alpha_t, alpha, max_relative = 1e-12);
    }
}
