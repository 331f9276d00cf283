//! BJT (Bipolar Junction Transistor) device model.
//!
//! Gummel-Poon large-signal model with SPICE temperature scaling, following
//! the PSpice reference-guide equations. Every quantity is a closed-form
//! expression over the model parameters, the junction voltages `(Vbe, Vbc)`
//! and the operating temperature `T` in Kelvin; nothing is cached between
//! calls and no iterative solving takes place.
//!
//! Numeric contract: evaluation is deliberately IEEE-permissive. Singular
//! inputs (Vbc approaching VAF in the base-charge factor, exp() overflow at
//! extreme forward bias, a zero knee current) propagate as `Inf`/`NaN`
//! rather than returning errors. The only `Result`-returning paths are
//! parameter validation at construction and the base-resistance regime
//! check, where a finite non-positive IRB has no defined meaning.

use galena_core::constants::{BOLTZMANN_J_PER_K, ELEMENTARY_CHARGE};
use galena_core::numeric::{central_difference, DEFAULT_STEP};

use crate::error::{Error, Result};

/// BJT polarity (NPN or PNP).
///
/// The model equations are written per junction, so both polarities share
/// the same formulas; the tag records which device the parameters describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BjtPolarity {
    /// NPN transistor.
    Npn,
    /// PNP transistor.
    Pnp,
}

/// Gummel-Poon BJT model parameters.
///
/// Field names follow the SPICE .MODEL card. All values are fixed at model
/// construction; evaluation never mutates them.
#[derive(Debug, Clone)]
pub struct BjtParams {
    /// Nominal (parameter-measurement) temperature (K). Default: 300.
    pub tnom: f64,
    /// Junction area scale factor. Default: 1.0.
    pub area: f64,
    /// Flicker noise exponent. Default: 1.0.
    pub af: f64,
    /// Ideal maximum forward beta. Default: 100.
    pub bf: f64,
    /// Ideal maximum reverse beta. Default: 1.
    pub br: f64,
    /// Base-collector zero-bias depletion capacitance (F). Default: 0.
    pub cjc: f64,
    /// Base-emitter zero-bias depletion capacitance (F). Default: 0.
    pub cje: f64,
    /// Substrate zero-bias depletion capacitance (F). Default: 0.
    pub cjs: f64,
    /// Quasi-saturation temperature coefficient for hole mobility. Default: 2.42.
    pub cn: f64,
    /// Quasi-saturation temperature coefficient for scattering-limited
    /// hole carrier velocity. Default: 0.87.
    pub d: f64,
    /// Bandgap voltage (eV). Default: 1.11.
    pub eg: f64,
    /// Forward-bias depletion capacitance coefficient. Default: 0.5.
    pub fc: f64,
    /// Epitaxial-region doping factor. Must be positive. Default: 1e-11.
    pub gamma: f64,
    /// Corner for forward-beta high-current roll-off (A). Default: infinity.
    pub ikf: f64,
    /// Corner for reverse-beta high-current roll-off (A). Default: infinity.
    pub ikr: f64,
    /// Current at which base resistance falls halfway to its minimum (A).
    /// Default: infinity.
    pub irb: f64,
    /// Transport saturation current (A). Default: 1e-16.
    pub is: f64,
    /// Base-collector leakage saturation current. Values in [0, 1] are
    /// absolute currents (A); values above 1 are multipliers of `is`.
    /// Default: 0.
    pub isc: f64,
    /// Base-emitter leakage saturation current. Same convention as `isc`.
    /// Default: 0.
    pub ise: f64,
    /// Substrate p-n saturation current (A). Default: 0.
    pub iss: f64,
    /// Transit-time dependency on collector current (A). Default: 0.
    pub itf: f64,
    /// Flicker noise coefficient. Default: 0.
    pub kf: f64,
    /// Base-collector grading factor. Default: 0.33.
    pub mjc: f64,
    /// Base-emitter grading factor. Default: 0.33.
    pub mje: f64,
    /// Substrate grading factor. Default: 0.
    pub mjs: f64,
    /// Base-collector leakage emission coefficient. Default: 2.0.
    pub nc: f64,
    /// Base-emitter leakage emission coefficient. Default: 1.5.
    pub ne: f64,
    /// Forward current emission coefficient. Default: 1.0.
    pub nf: f64,
    /// High-current roll-off coefficient. Default: 0.5.
    pub nk: f64,
    /// Reverse current emission coefficient. Default: 1.0.
    pub nr: f64,
    /// Substrate emission coefficient. Default: 1.0.
    pub ns: f64,
    /// Excess phase at 1/(2*pi*TF) Hz (degrees). Default: 0.
    pub ptf: f64,
    /// Epitaxial-region charge factor (C). Default: 0.
    pub qco: f64,
    /// Quasi-saturation model flag. Default: 0.
    pub quasimod: u32,
    /// Zero-bias (maximum) base resistance (ohm). Default: 0.
    pub rb: f64,
    /// Minimum base resistance (ohm). Default: 0.
    pub rbm: f64,
    /// Collector ohmic resistance (ohm). Default: 0.
    pub rc: f64,
    /// Epitaxial-region resistance (ohm). Default: 0.
    pub rco: f64,
    /// Emitter ohmic resistance (ohm). Default: 0.
    pub re: f64,
    /// Ideal forward transit time (s). Default: 0.
    pub tf: f64,
    /// Ideal reverse transit time (s). Default: 0.
    pub tr: f64,
    /// RB linear temperature coefficient (1/K). Default: 0.
    pub trb1: f64,
    /// RB quadratic temperature coefficient (1/K^2). Default: 0.
    pub trb2: f64,
    /// RC linear temperature coefficient (1/K). Default: 0.
    pub trc1: f64,
    /// RC quadratic temperature coefficient (1/K^2). Default: 0.
    pub trc2: f64,
    /// RE linear temperature coefficient (1/K). Default: 0.
    pub tre1: f64,
    /// RE quadratic temperature coefficient (1/K^2). Default: 0.
    pub tre2: f64,
    /// RBM linear temperature coefficient (1/K). Default: 0.
    pub trm1: f64,
    /// RBM quadratic temperature coefficient (1/K^2). Default: 0.
    pub trm2: f64,
    /// Forward Early voltage (V). Default: infinity.
    pub vaf: f64,
    /// Reverse Early voltage (V). Default: infinity.
    pub var: f64,
    /// Quasi-saturation extrapolated bandgap voltage at 0 K (V). Default: 1.206.
    pub vg: f64,
    /// Base-collector built-in potential (V). Default: 0.75.
    pub vjc: f64,
    /// Base-emitter built-in potential (V). Default: 0.75.
    pub vje: f64,
    /// Substrate built-in potential (V). Default: 0.75.
    pub vjs: f64,
    /// Carrier mobility knee voltage (V). Default: 10.
    pub vo: f64,
    /// Transit-time dependency on Vbc (V). Default: infinity.
    pub vtf: f64,
    /// Fraction of CJC connected internally to RB. Default: 1.0.
    pub xcjc: f64,
    /// Fraction of CJC connected internally to RB (second region). Default: 1.0.
    pub xcjc2: f64,
    /// Fraction of CJS connected internally to RC. Default: 1.0.
    pub xcjs: f64,
    /// Forward/reverse beta temperature exponent. Default: 0.
    pub xtb: f64,
    /// Transit-time bias dependence coefficient. Default: 0.
    pub xtf: f64,
    /// Saturation-current temperature exponent. Default: 3.0.
    pub xti: f64,
}

impl Default for BjtParams {
    fn default() -> Self {
        Self {
            tnom: 300.0,
            area: 1.0,
            af: 1.0,
            bf: 100.0,
            br: 1.0,
            cjc: 0.0,
            cje: 0.0,
            cjs: 0.0,
            cn: 2.42,
            d: 0.87,
            eg: 1.11,
            fc: 0.5,
            gamma: 1.0e-11,
            ikf: f64::INFINITY,
            ikr: f64::INFINITY,
            irb: f64::INFINITY,
            is: 1.0e-16,
            isc: 0.0,
            ise: 0.0,
            iss: 0.0,
            itf: 0.0,
            kf: 0.0,
            mjc: 0.33,
            mje: 0.33,
            mjs: 0.0,
            nc: 2.0,
            ne: 1.5,
            nf: 1.0,
            nk: 0.5,
            nr: 1.0,
            ns: 1.0,
            ptf: 0.0,
            qco: 0.0,
            quasimod: 0,
            rb: 0.0,
            rbm: 0.0,
            rc: 0.0,
            rco: 0.0,
            re: 0.0,
            tf: 0.0,
            tr: 0.0,
            trb1: 0.0,
            trb2: 0.0,
            trc1: 0.0,
            trc2: 0.0,
            tre1: 0.0,
            tre2: 0.0,
            trm1: 0.0,
            trm2: 0.0,
            vaf: f64::INFINITY,
            var: f64::INFINITY,
            vg: 1.206,
            vjc: 0.75,
            vje: 0.75,
            vjs: 0.75,
            vo: 10.0,
            vtf: f64::INFINITY,
            xcjc: 1.0,
            xcjc2: 1.0,
            xcjs: 1.0,
            xtb: 0.0,
            xtf: 0.0,
            xti: 3.0,
        }
    }
}

/// Thermal voltage k*T/q at a given temperature (K).
pub fn thermal_voltage(temp_k: f64) -> f64 {
    BOLTZMANN_J_PER_K * temp_k / ELEMENTARY_CHARGE
}

/// Base-emitter junction voltage from terminal voltages.
pub fn vbe(vb: f64, ve: f64) -> f64 {
    vb - ve
}

/// Base-collector junction voltage from terminal voltages.
pub fn vbc(vb: f64, vc: f64) -> f64 {
    vb - vc
}

/// Collector-emitter voltage from terminal voltages.
pub fn vce(vc: f64, ve: f64) -> f64 {
    vc - ve
}

/// A validated Gummel-Poon BJT model.
///
/// Construction resolves the ISE/ISC ratio-versus-absolute convention and
/// rejects parameters outside their documented domains. All evaluation
/// methods are pure functions of `(self, bias, temperature)`.
#[derive(Debug, Clone)]
pub struct BjtModel {
    polarity: BjtPolarity,
    params: BjtParams,
    /// Resolved absolute base-emitter leakage saturation current (A).
    ise: f64,
    /// Resolved absolute base-collector leakage saturation current (A).
    isc: f64,
    /// Quasi-saturation model selected (set when RCO is given).
    quasisaturation: bool,
}

impl BjtModel {
    /// Create an NPN model from parameters.
    pub fn npn(params: BjtParams) -> Result<Self> {
        Self::new(BjtPolarity::Npn, params)
    }

    /// Create a PNP model from parameters.
    pub fn pnp(params: BjtParams) -> Result<Self> {
        Self::new(BjtPolarity::Pnp, params)
    }

    /// Create a model, validating the parameters.
    ///
    /// Fails if `ise` or `isc` is negative, or if the epitaxial doping
    /// floor `gamma` is not positive. Leakage saturation currents above 1
    /// are interpreted as multipliers of `is` and resolved to absolute
    /// currents here, so evaluation never re-branches on the convention.
    pub fn new(polarity: BjtPolarity, params: BjtParams) -> Result<Self> {
        let ise = resolve_leakage("ise", params.ise, params.is)?;
        let isc = resolve_leakage("isc", params.isc, params.is)?;

        if !(params.gamma > 0.0) {
            return Err(Error::InvalidParameter {
                name: "gamma",
                value: params.gamma,
            });
        }

        let quasisaturation = params.rco != 0.0 || params.quasimod != 0;

        Ok(Self {
            polarity,
            params,
            ise,
            isc,
            quasisaturation,
        })
    }

    /// The device polarity.
    pub fn polarity(&self) -> BjtPolarity {
        self.polarity
    }

    /// The model parameters as given at construction.
    pub fn params(&self) -> &BjtParams {
        &self.params
    }

    /// Whether the quasi-saturation extension is selected (RCO given or
    /// QUASIMOD set).
    pub fn quasisaturation(&self) -> bool {
        self.quasisaturation
    }

    /// Silicon bandgap energy (eV) from the empirical Varshni-style fit
    /// `Eg(T) = 1.17 - 7.02e-4 * T^2 / (T + 1108)`.
    ///
    /// This fit is used by all temperature-scaling formulas regardless of
    /// the `eg` model parameter, matching SPICE practice.
    fn bandgap(&self, temp: f64) -> f64 {
        1.17 - (7.02e-4 * temp * temp) / (temp + 1108.0)
    }

    /// Forward beta at temperature: `BF * (T/Tnom)^XTB`.
    pub fn forward_beta(&self, temp: f64) -> f64 {
        let t_ratio = temp / self.params.tnom;
        self.params.bf * t_ratio.powf(self.params.xtb)
    }

    /// Reverse beta at temperature: `BR * (T/Tnom)^XTB`.
    pub fn reverse_beta(&self, temp: f64) -> f64 {
        let t_ratio = temp / self.params.tnom;
        self.params.br * t_ratio.powf(self.params.xtb)
    }

    /// Transport saturation current at temperature.
    ///
    /// `IS * exp((T/Tnom - 1) * Eg(T) / Vt) * (T/Tnom)^XTI`
    pub fn saturation_current(&self, temp: f64) -> f64 {
        let t_ratio = temp / self.params.tnom;
        let vt = thermal_voltage(temp);
        self.params.is
            * ((t_ratio - 1.0) * self.bandgap(temp) / vt).exp()
            * t_ratio.powf(self.params.xti)
    }

    /// Forward diffusion current `Ibe1 = Is(T) * (exp(Vbe/(NF*Vt)) - 1)`.
    pub fn forward_diffusion_current(&self, vbe: f64, temp: f64) -> f64 {
        let vt = thermal_voltage(temp);
        self.saturation_current(temp) * ((vbe / (vt * self.params.nf)).exp() - 1.0)
    }

    /// Reverse diffusion current `Ibc1 = Is(T) * (exp(Vbc/(NR*Vt)) - 1)`.
    pub fn reverse_diffusion_current(&self, vbc: f64, temp: f64) -> f64 {
        let vt = thermal_voltage(temp);
        self.saturation_current(temp) * ((vbc / (vt * self.params.nr)).exp() - 1.0)
    }

    /// Base-emitter leakage saturation current at temperature.
    ///
    /// `(ISE / (T/Tnom)^XTB) * exp((T/Tnom - 1) * Eg(T) / (NE*Vt))
    ///  * (T/Tnom)^(XTI/NE)`
    pub fn base_emitter_leakage_current(&self, temp: f64) -> f64 {
        let t_ratio = temp / self.params.tnom;
        let vt = thermal_voltage(temp);
        (self.ise / t_ratio.powf(self.params.xtb))
            * ((t_ratio - 1.0) * self.bandgap(temp) / (vt * self.params.ne)).exp()
            * t_ratio.powf(self.params.xti / self.params.ne)
    }

    /// Base-collector leakage saturation current at temperature.
    ///
    /// Same scaling as [`base_emitter_leakage_current`](Self::base_emitter_leakage_current)
    /// with NC in place of NE.
    pub fn base_collector_leakage_current(&self, temp: f64) -> f64 {
        let t_ratio = temp / self.params.tnom;
        let vt = thermal_voltage(temp);
        (self.isc / t_ratio.powf(self.params.xtb))
            * ((t_ratio - 1.0) * self.bandgap(temp) / (vt * self.params.nc)).exp()
            * t_ratio.powf(self.params.xti / self.params.nc)
    }

    /// Non-ideal base-emitter current `Ibe2 = Ise(T) * (exp(Vbe/(NE*Vt)) - 1)`.
    pub fn non_ideal_base_emitter_current(&self, vbe: f64, temp: f64) -> f64 {
        let vt = thermal_voltage(temp);
        self.base_emitter_leakage_current(temp) * ((vbe / (vt * self.params.ne)).exp() - 1.0)
    }

    /// Non-ideal base-collector current `Ibc2 = Isc(T) * (exp(Vbc/(NC*Vt)) - 1)`.
    pub fn non_ideal_base_collector_current(&self, vbc: f64, temp: f64) -> f64 {
        let vt = thermal_voltage(temp);
        self.base_collector_leakage_current(temp) * ((vbc / (vt * self.params.nc)).exp() - 1.0)
    }

    /// Normalized base charge `q_b`.
    ///
    /// ```text
    /// q1  = 1 / (1 - Vbc/VAF - Vbe/VAR)
    /// q2  = Ibe1/IKF + Ibc1/IKR
    /// q_b = q1 * (1 + (1 + 4*q2)^NK) / 2
    /// ```
    ///
    /// Every consumer of collector current routes through this value; it is
    /// the invariant binding the diffusion currents to the collector
    /// current. Near `Vbc = VAF` the q1 denominator vanishes and the result
    /// diverges per the IEEE contract.
    pub fn base_charge_factor(&self, vbe: f64, vbc: f64, temp: f64) -> f64 {
        let q1 = 1.0 / (1.0 - vbc / self.params.vaf - vbe / self.params.var);
        let q2 = self.forward_diffusion_current(vbe, temp) / self.params.ikf
            + self.reverse_diffusion_current(vbc, temp) / self.params.ikr;

        q1 * (1.0 + (1.0 + 4.0 * q2).powf(self.params.nk)) / 2.0
    }

    /// Total DC base current.
    ///
    /// `Ib = area * (Ibe1/BF(T) + Ibe2 + Ibc1/BR(T) + Ibc2)`
    pub fn base_current(&self, vbe: f64, vbc: f64, temp: f64) -> f64 {
        let ibe1 = self.forward_diffusion_current(vbe, temp);
        let ibe2 = self.non_ideal_base_emitter_current(vbe, temp);
        let ibc1 = self.reverse_diffusion_current(vbc, temp);
        let ibc2 = self.non_ideal_base_collector_current(vbc, temp);

        self.params.area
            * (ibe1 / self.forward_beta(temp) + ibe2 + ibc1 / self.reverse_beta(temp) + ibc2)
    }

    /// Total DC collector current.
    ///
    /// `Ic = area * (Ibe1/q_b - Ibc1/q_b - Ibc1/BR(T) - Ibc2)`
    pub fn collector_current(&self, vbe: f64, vbc: f64, temp: f64) -> f64 {
        let ibe1 = self.forward_diffusion_current(vbe, temp);
        let ibc1 = self.reverse_diffusion_current(vbc, temp);
        let ibc2 = self.non_ideal_base_collector_current(vbc, temp);
        let qb = self.base_charge_factor(vbe, vbc, temp);

        self.params.area * (ibe1 / qb - ibc1 / qb - ibc1 / self.reverse_beta(temp) - ibc2)
    }

    /// Substrate p-n saturation current at temperature.
    pub fn substrate_saturation_current(&self, temp: f64) -> f64 {
        let t_ratio = temp / self.params.tnom;
        let vt = thermal_voltage(temp);
        (self.params.iss / t_ratio.powf(self.params.xtb))
            * ((t_ratio - 1.0) * self.bandgap(temp) / (vt * self.params.ns)).exp()
            * t_ratio.powf(self.params.xti / self.params.ns)
    }

    /// Substrate junction current at the intrinsic substrate voltage `vjs`.
    ///
    /// `area * Iss(T) * (exp(Vjs/(NS*Vt)) - 1)`
    pub fn substrate_current(&self, vjs: f64, temp: f64) -> f64 {
        let vt = thermal_voltage(temp);
        self.params.area
            * self.substrate_saturation_current(temp)
            * ((vjs / (self.params.ns * vt)).exp() - 1.0)
    }

    /// Bias-dependent base parasitic resistance.
    ///
    /// With IRB infinite, the resistance interpolates between the zero-bias
    /// maximum RB and the high-current minimum RBM weighted by `1/q_b`.
    /// With a finite positive IRB, the ngspice closed-form tan(x)
    /// correction is applied. A finite IRB that is not positive has no
    /// defined regime and is rejected.
    pub fn actual_base_parasitic_resistance(&self, vbe: f64, vbc: f64, temp: f64) -> Result<f64> {
        let rbm = self.minimum_base_resistance(temp);
        let rb = self.maximum_base_resistance(temp);

        if self.params.irb.is_infinite() && self.params.irb > 0.0 {
            let qb = self.base_charge_factor(vbe, vbc, temp);
            Ok((rbm + (rb - rbm) / qb) / self.params.area)
        } else if self.params.irb > 0.0 {
            let pi_sq = std::f64::consts::PI * std::f64::consts::PI;
            let ratio = self.base_current(vbe, vbc, temp) / (self.params.area * self.params.irb);
            let x = ((1.0 + (144.0 / pi_sq) * ratio).sqrt() - 1.0)
                / ((24.0 / pi_sq) * ratio.sqrt());
            let tan_x = x.tan();
            Ok((rbm + 3.0 * (rb - rbm) * ((tan_x - x) / (x * tan_x * tan_x))) / self.params.area)
        } else {
            Err(Error::OutOfDomain {
                name: "irb",
                value: self.params.irb,
            })
        }
    }

    /// Minimum base resistance at temperature:
    /// `RBM * (1 + TRM1*dT + TRM2*dT^2)`.
    pub fn minimum_base_resistance(&self, temp: f64) -> f64 {
        let dt = temp - self.params.tnom;
        self.params.rbm * (1.0 + self.params.trm1 * dt + self.params.trm2 * dt * dt)
    }

    /// Zero-bias maximum base resistance at temperature:
    /// `RB * (1 + TRB1*dT + TRB2*dT^2)`.
    pub fn maximum_base_resistance(&self, temp: f64) -> f64 {
        let dt = temp - self.params.tnom;
        self.params.rb * (1.0 + self.params.trb1 * dt + self.params.trb2 * dt * dt)
    }

    /// Collector ohmic resistance at temperature:
    /// `RC * (1 + TRC1*dT + TRC2*dT^2)`.
    pub fn collector_resistance(&self, temp: f64) -> f64 {
        let dt = temp - self.params.tnom;
        self.params.rc * (1.0 + self.params.trc1 * dt + self.params.trc2 * dt * dt)
    }

    /// Emitter ohmic resistance at temperature:
    /// `RE * (1 + TRE1*dT + TRE2*dT^2)`.
    pub fn emitter_resistance(&self, temp: f64) -> f64 {
        let dt = temp - self.params.tnom;
        self.params.re * (1.0 + self.params.tre1 * dt + self.params.tre2 * dt * dt)
    }

    /// Base-emitter built-in potential at temperature.
    ///
    /// `VJE*(T/Tnom) - 3*Vt*ln(T/Tnom) - Eg(Tnom)*(T/Tnom) + Eg(T)`
    pub fn base_emitter_potential(&self, temp: f64) -> f64 {
        self.scaled_potential(self.params.vje, temp)
    }

    /// Base-collector built-in potential at temperature.
    pub fn base_collector_potential(&self, temp: f64) -> f64 {
        self.scaled_potential(self.params.vjc, temp)
    }

    /// Substrate built-in potential at temperature.
    pub fn substrate_potential(&self, temp: f64) -> f64 {
        self.scaled_potential(self.params.vjs, temp)
    }

    fn scaled_potential(&self, vj: f64, temp: f64) -> f64 {
        let vt = thermal_voltage(temp);
        let t_ratio = temp / self.params.tnom;
        vj * t_ratio - 3.0 * vt * t_ratio.ln() - self.bandgap(self.params.tnom) * t_ratio
            + self.bandgap(temp)
    }

    /// Temperature-adjusted base-emitter zero-bias capacitance.
    ///
    /// `CJE * (1 + MJE * (4e-4*dT + (1 - Vje(T)/VJE)))`
    pub fn temp_dep_base_emitter_capacitance(&self, temp: f64) -> f64 {
        let dt = temp - self.params.tnom;
        let mje = self.params.mje;
        self.params.cje
            * (1.0 + mje * (4.0e-4 * dt + (1.0 - self.base_emitter_potential(temp) / self.params.vje)))
    }

    /// Temperature-adjusted base-collector zero-bias capacitance.
    pub fn temp_dep_base_collector_capacitance(&self, temp: f64) -> f64 {
        let dt = temp - self.params.tnom;
        let mjc = self.params.mjc;
        self.params.cjc
            * (1.0
                + mjc * (4.0e-4 * dt + (1.0 - self.base_collector_potential(temp) / self.params.vjc)))
    }

    /// Temperature-adjusted substrate zero-bias capacitance.
    pub fn temp_dep_substrate_capacitance(&self, temp: f64) -> f64 {
        let dt = temp - self.params.tnom;
        let mjs = self.params.mjs;
        self.params.cjs
            * (1.0 + mjs * (4.0e-4 * dt + (1.0 - self.substrate_potential(temp) / self.params.vjs)))
    }

    /// Base-emitter depletion (junction) capacitance.
    ///
    /// Below the forward-bias corner `FC * Vje(T)` the standard power law
    /// `Cje(T) * (1 - V/Vje)^-MJE` applies; at and above the corner the
    /// SPICE linearized continuation
    /// `Cje(T) * (1-FC)^-(1+MJE) * (1 - FC*(1+MJE) + MJE*V/Vje)` is used so
    /// the capacitance stays finite as V approaches Vje. The two branches
    /// agree at the corner.
    pub fn base_emitter_junction_capacitance(&self, vbe: f64, temp: f64) -> f64 {
        let fc = self.params.fc;
        let vje = self.base_emitter_potential(temp);
        let mje = self.params.mje;
        let cje = self.temp_dep_base_emitter_capacitance(temp);

        if fc * vje >= vbe {
            cje * (1.0 - vbe / vje).powf(-mje)
        } else {
            cje * (1.0 - fc).powf(-(1.0 + mje)) * (1.0 - fc * (1.0 + mje) + mje * vbe / vje)
        }
    }

    /// DC base-emitter junction current `Ibe1 + Ibe2`.
    pub fn base_emitter_current(&self, vbe: f64, temp: f64) -> f64 {
        self.forward_diffusion_current(vbe, temp) + self.non_ideal_base_emitter_current(vbe, temp)
    }

    /// DC base-collector junction current `Ibc1 + Ibc2`.
    pub fn base_collector_current(&self, vbc: f64, temp: f64) -> f64 {
        self.reverse_diffusion_current(vbc, temp) + self.non_ideal_base_collector_current(vbc, temp)
    }

    /// Transit-time (diffusion) component of the base-emitter capacitance.
    ///
    /// The effective forward transit time
    /// `TF * (1 + XTF * (Ibe1/(Ibe1 + area*ITF))^2 * exp(Vbc/(1.44*VTF)))`
    /// multiplies the small-signal conductance of the base-emitter current,
    /// obtained by numerical differentiation.
    pub fn transit_time_capacitance_be(&self, vbe: f64, vbc: f64, temp: f64) -> f64 {
        let vbc_comp = (vbc / (1.44 * self.params.vtf)).exp();
        let ibe1 = self.forward_diffusion_current(vbe, temp);
        let charge_ratio = ibe1 / (ibe1 + self.params.area * self.params.itf);
        let tf_eff = self.params.tf
            * (1.0 + self.params.xtf * charge_ratio * charge_ratio * vbc_comp);

        tf_eff * self.dc_conductance(|v| self.base_emitter_current(v, temp), vbe)
    }

    /// Total base-emitter capacitance: transit-time component plus the
    /// area-scaled depletion component.
    pub fn base_emitter_capacitance(&self, vbe: f64, vbc: f64, temp: f64) -> f64 {
        self.transit_time_capacitance_be(vbe, vbc, temp)
            + self.params.area * self.base_emitter_junction_capacitance(vbe, temp)
    }

    /// Small-signal conductance dI/dV of a current formula at `voltage`.
    ///
    /// Central difference with the fixed step
    /// [`DEFAULT_STEP`](galena_core::numeric::DEFAULT_STEP); the step is
    /// part of the model contract (see [`galena_core::numeric`]).
    pub fn dc_conductance<F>(&self, current: F, voltage: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        central_difference(current, voltage, DEFAULT_STEP)
    }
}

/// Resolve a leakage saturation parameter to an absolute current.
///
/// Values above 1 are multipliers of `is`; values in [0, 1] are already
/// absolute currents. Negative values are rejected.
fn resolve_leakage(name: &'static str, value: f64, is: f64) -> Result<f64> {
    if value > 1.0 {
        log::debug!("{name} = {value} interpreted as a multiplier of is");
        Ok(value * is)
    } else if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_npn() -> BjtModel {
        BjtModel::npn(BjtParams::default()).unwrap()
    }

    #[test]
    fn test_thermal_voltage() {
        // At room temperature, Vt ≈ 25.85 mV
        let vt = thermal_voltage(300.15);
        assert!(
            (vt - 0.02585).abs() < 0.001,
            "Vt = {} (expected ≈ 0.02585)",
            vt
        );
    }

    #[test]
    fn test_zero_bias_currents_are_zero() {
        let q = default_npn();
        let t = 300.0;

        assert_eq!(q.forward_diffusion_current(0.0, t), 0.0);
        assert_eq!(q.reverse_diffusion_current(0.0, t), 0.0);
        assert_eq!(q.base_current(0.0, 0.0, t), 0.0);
        assert_eq!(q.collector_current(0.0, 0.0, t), 0.0);
    }

    #[test]
    fn test_saturation_current_increases_with_temperature() {
        let q = default_npn();

        // At T = Tnom the scale factor is exactly 1
        assert_eq!(q.saturation_current(300.0), q.params().is);

        let is_hot = q.saturation_current(320.0);
        assert!(
            is_hot > q.params().is,
            "Is(320) = {} should exceed Is(300) = {}",
            is_hot,
            q.params().is
        );
    }

    #[test]
    fn test_base_charge_factor_unity_at_zero_bias() {
        // q2 = 0 at zero bias, so q_b = q1 = 1 independent of NK
        for nk in [0.25, 0.5, 1.0, 2.0] {
            let params = BjtParams {
                nk,
                ..BjtParams::default()
            };
            let q = BjtModel::npn(params).unwrap();
            assert_eq!(q.base_charge_factor(0.0, 0.0, 300.0), 1.0, "nk = {}", nk);
        }
    }

    #[test]
    fn test_base_charge_factor_early_effect() {
        let params = BjtParams {
            vaf: 100.0,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();

        // Reverse-biased collector junction (vbc < 0) pushes q1 below 1,
        // which raises Ic through the 1/q_b division
        let qb = q.base_charge_factor(0.6, -5.0, 300.0);
        assert!(qb < 1.0, "q_b = {} should sit below 1", qb);
        assert!(qb > 0.9, "q_b = {}", qb);
    }

    #[test]
    fn test_forward_active_beta_relationship() {
        let q = default_npn();
        let (vbe, vbc, t) = (0.65, -3.0, 300.0);

        let ic = q.collector_current(vbe, vbc, t);
        let ib = q.base_current(vbe, vbc, t);

        assert!(ic > 0.0, "Ic = {}", ic);
        assert!(ib > 0.0, "Ib = {}", ib);
        // Zero leakage and infinite knee currents: Ic/Ib tracks BF closely
        assert_relative_eq!(ic / ib, 100.0, max_relative = 1e-6);
    }

    #[test]
    fn test_beta_temperature_scaling() {
        let params = BjtParams {
            xtb: 1.5,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();

        assert_eq!(q.forward_beta(300.0), 100.0);
        assert_eq!(q.reverse_beta(300.0), 1.0);
        assert!(q.forward_beta(330.0) > q.forward_beta(300.0));
    }

    #[test]
    fn test_leakage_ratio_convention() {
        // ise > 1: multiplier of is
        let params = BjtParams {
            ise: 100.0,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();
        // At T = Tnom the leakage scale factor is 1, so the resolved
        // absolute current shows through directly
        assert_relative_eq!(
            q.base_emitter_leakage_current(300.0),
            100.0 * 1.0e-16,
            max_relative = 1e-12
        );

        // ise in [0, 1]: absolute current
        let params = BjtParams {
            ise: 1.0e-14,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();
        assert_relative_eq!(
            q.base_emitter_leakage_current(300.0),
            1.0e-14,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_negative_leakage_rejected() {
        let params = BjtParams {
            isc: -0.5,
            ..BjtParams::default()
        };
        let err = BjtModel::npn(params).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter { name: "isc", .. }
        ));
    }

    #[test]
    fn test_zero_gamma_rejected() {
        let params = BjtParams {
            gamma: 0.0,
            ..BjtParams::default()
        };
        assert!(BjtModel::npn(params).is_err());
    }

    #[test]
    fn test_resistances_exact_at_tnom() {
        let params = BjtParams {
            rb: 250.0,
            rbm: 25.0,
            rc: 10.0,
            re: 1.0,
            trb1: 1e-3,
            trb2: 1e-6,
            trm1: 2e-3,
            trc1: 3e-3,
            tre1: 4e-3,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();

        // dT = 0 means the quadratic scale factor is exactly 1
        assert_eq!(q.maximum_base_resistance(300.0), 250.0);
        assert_eq!(q.minimum_base_resistance(300.0), 25.0);
        assert_eq!(q.collector_resistance(300.0), 10.0);
        assert_eq!(q.emitter_resistance(300.0), 1.0);

        assert!(q.maximum_base_resistance(350.0) > 250.0);
    }

    #[test]
    fn test_base_resistance_interpolation_regime() {
        let params = BjtParams {
            rb: 100.0,
            rbm: 10.0,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();

        // q_b = 1 at zero bias: full interpolation back to RB
        let r = q.actual_base_parasitic_resistance(0.0, 0.0, 300.0).unwrap();
        assert_relative_eq!(r, 100.0, max_relative = 1e-12);

        // Deep forward bias drives q_b up and the resistance toward RBM
        let params = BjtParams {
            rb: 100.0,
            rbm: 10.0,
            ikf: 1e-3,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();
        let r_hi = q.actual_base_parasitic_resistance(0.8, 0.0, 300.0).unwrap();
        assert!(r_hi < 100.0, "r_hi = {}", r_hi);
        assert!(r_hi > 10.0 / q.params().area, "r_hi = {}", r_hi);
    }

    #[test]
    fn test_base_resistance_tan_regime() {
        let params = BjtParams {
            rb: 100.0,
            rbm: 10.0,
            irb: 1e-4,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();

        let r = q.actual_base_parasitic_resistance(0.7, 0.0, 300.0).unwrap();
        assert!(r.is_finite(), "r = {}", r);
        assert!(r > 10.0, "r = {}", r);
        assert!(r < 100.0, "r = {}", r);
    }

    #[test]
    fn test_base_resistance_invalid_irb() {
        let params = BjtParams {
            irb: -1.0,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();

        let err = q.actual_base_parasitic_resistance(0.0, 0.0, 300.0).unwrap_err();
        assert!(matches!(err, Error::OutOfDomain { name: "irb", .. }));
    }

    #[test]
    fn test_junction_potentials_at_tnom() {
        let q = default_npn();
        // At T = Tnom every term except the built-in potential cancels
        assert_relative_eq!(q.base_emitter_potential(300.0), 0.75, max_relative = 1e-12);
        assert_relative_eq!(q.base_collector_potential(300.0), 0.75, max_relative = 1e-12);
        assert_relative_eq!(q.substrate_potential(300.0), 0.75, max_relative = 1e-12);

        // Built-in potentials drop with temperature
        assert!(q.base_emitter_potential(350.0) < 0.75);
    }

    #[test]
    fn test_junction_capacitance_branch_continuity() {
        let params = BjtParams {
            cje: 1e-12,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();
        let t = 310.0;

        let corner = q.params().fc * q.base_emitter_potential(t);
        let below = q.base_emitter_junction_capacitance(corner - 1e-9, t);
        let above = q.base_emitter_junction_capacitance(corner + 1e-9, t);

        assert_relative_eq!(below, above, max_relative = 1e-6);

        // The corner itself lands on the power-law branch
        let at = q.base_emitter_junction_capacitance(corner, t);
        let cje = q.temp_dep_base_emitter_capacitance(t);
        let expected = cje * (1.0 - q.params().fc).powf(-q.params().mje);
        assert_relative_eq!(at, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_junction_capacitance_finite_past_potential() {
        let params = BjtParams {
            cje: 1e-12,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();
        let t = 300.0;

        // The power law alone would diverge at V = Vje; the linearized
        // branch keeps the value finite
        let vje = q.base_emitter_potential(t);
        let c = q.base_emitter_junction_capacitance(vje, t);
        assert!(c.is_finite(), "c = {}", c);
        assert!(c > 0.0, "c = {}", c);
    }

    #[test]
    fn test_transit_time_capacitance() {
        let params = BjtParams {
            tf: 1e-9,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();
        let t = 300.0;

        // With XTF = 0 the effective transit time is TF exactly, so the
        // capacitance is TF times the junction conductance
        let c = q.transit_time_capacitance_be(0.65, 0.0, t);
        let g = q.dc_conductance(|v| q.base_emitter_current(v, t), 0.65);
        assert_relative_eq!(c, 1e-9 * g, max_relative = 1e-12);
        assert!(c > 0.0, "c = {}", c);
    }

    #[test]
    fn test_total_base_emitter_capacitance() {
        let params = BjtParams {
            tf: 1e-9,
            cje: 2e-12,
            area: 2.0,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();
        let t = 300.0;

        let total = q.base_emitter_capacitance(0.3, 0.0, t);
        let expected = q.transit_time_capacitance_be(0.3, 0.0, t)
            + 2.0 * q.base_emitter_junction_capacitance(0.3, t);
        assert_relative_eq!(total, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_substrate_current() {
        let params = BjtParams {
            iss: 1e-15,
            ..BjtParams::default()
        };
        let q = BjtModel::npn(params).unwrap();

        assert_eq!(q.substrate_current(0.0, 300.0), 0.0);
        assert!(q.substrate_current(0.5, 300.0) > 0.0);
        assert!(q.substrate_current(-0.5, 300.0) < 0.0);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let q = default_npn();
        let (vbe, vbc, t) = (0.62, -1.7, 312.0);

        let first = q.collector_current(vbe, vbc, t);
        let second = q.collector_current(vbe, vbc, t);
        assert_eq!(first.to_bits(), second.to_bits());

        let first = q.base_emitter_capacitance(vbe, vbc, t);
        let second = q.base_emitter_capacitance(vbe, vbc, t);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_polarity_tag() {
        let npn = default_npn();
        let pnp = BjtModel::pnp(BjtParams::default()).unwrap();
        assert_eq!(npn.polarity(), BjtPolarity::Npn);
        assert_eq!(pnp.polarity(), BjtPolarity::Pnp);
    }

    #[test]
    fn test_quasisaturation_flag() {
        assert!(!default_npn().quasisaturation());

        let params = BjtParams {
            rco: 10.0,
            ..BjtParams::default()
        };
        assert!(BjtModel::npn(params).unwrap().quasisaturation());
    }

    #[test]
    fn test_junction_voltage_helpers() {
        assert_eq!(vbe(0.7, 0.0), 0.7);
        assert_eq!(vbc(0.7, 5.0), -4.3);
        assert_eq!(vce(5.0, 0.0), 5.0);
        // Vce = Vcb + Vbe
        assert_relative_eq!(
            vce(5.0, 0.0),
            -vbc(0.7, 5.0) + vbe(0.7, 0.0),
            max_relative = 1e-15
        );
    }
}
