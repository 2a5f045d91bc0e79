/*!
CLLC bidirectional resonant converter topology: the Infineon design
procedure (§4.9, worked example §8 scenario 4) plus the first-harmonic-
approximation (FHA) voltage-gain transfer function.
*/

use crate::error::{Error, Result};
use crate::mas::{DesignRequirements, ExcitationSignal, OperatingPoint, OperatingPointConditions, WindingExcitation};
use crate::waveform::{Waveform, WaveformLabel};
use crate::coil::IsolationSide;
use uom::si::f64::{Frequency, Inductance, ThermodynamicTemperature};
use uom::si::frequency::hertz;
use uom::si::inductance::henry;
use uom::si::thermodynamic_temperature::degree_celsius;

/// A CLLC resonant converter specification, per the Infineon design
/// procedure.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CllcSpec {
    /// Input (primary-side) DC voltage, in volts.
    pub input_voltage: f64,
    /// Output (secondary-side) DC voltage, in volts.
    pub output_voltage: f64,
    /// Output power, in watts.
    pub output_power: f64,
    /// Resonant frequency, in hertz.
    pub resonant_frequency: f64,
    /// Quality factor of the resonant tank.
    pub quality_factor: f64,
    /// Inductance ratio `k = Lm / L1`.
    pub inductance_ratio: f64,
    /// `false` for a symmetric tank (`a = b = 1`); `true` for the
    /// asymmetric tank (`a = 0.95`, `b = 1.052`).
    pub asymmetric: bool,
}

/// A complex number, `re + j*im`, used only for the FHA transfer function.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Complex {
    re: f64,
    im: f64,
}

impl Complex {
    fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
    fn magnitude(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }
}
impl std::ops::Add for Complex {
    type Output = Complex;
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}
impl std::ops::Mul for Complex {
    type Output = Complex;
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(self.re * rhs.re - self.im * rhs.im, self.re * rhs.im + self.im * rhs.re)
    }
}

/// Derived CLLC tank component values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CllcResult {
    /// Turns ratio `n = Vin / Vout`.
    pub turns_ratio: f64,
    /// Reflected load resistance.
    pub output_resistance: f64,
    /// Primary-side resonant capacitance.
    pub c1: f64,
    /// Primary-side resonant inductance.
    pub l1: f64,
    /// Magnetizing inductance.
    pub lm: f64,
    /// Secondary-side resonant inductance.
    pub l2: f64,
    /// Secondary-side resonant capacitance.
    pub c2: f64,
}

impl CllcSpec {
    fn validate(&self) -> Result<()> {
        if self.output_power <= 0.0 || self.resonant_frequency <= 0.0 || self.quality_factor <= 0.0 {
            return Err(Error::InvalidDesignRequirements(
                "CLLC output power, resonant frequency and quality factor must be positive".into(),
            ));
        }
        return Ok(());
    }

    /// Runs the Infineon design procedure, producing tank component values.
    pub fn design_tank(&self) -> Result<CllcResult> {
        self.validate()?;
        let n = self.input_voltage / self.output_voltage;
        let ro = 8.0 * n * n / (std::f64::consts::PI * std::f64::consts::PI) * self.output_voltage * self.output_voltage
            / self.output_power;
        let c1 = 1.0 / (2.0 * std::f64::consts::PI * self.quality_factor * self.resonant_frequency * ro);
        let omega_r = 2.0 * std::f64::consts::PI * self.resonant_frequency;
        let l1 = 1.0 / (omega_r * omega_r * c1);
        let lm = self.inductance_ratio * l1;
        let (a, b) = if self.asymmetric { (0.95, 1.052) } else { (1.0, 1.0) };
        let l2 = a * l1 / (n * n);
        let c2 = n * n * b * c1;

        return Ok(CllcResult {
            turns_ratio: n,
            output_resistance: ro,
            c1,
            l1,
            lm,
            l2,
            c2,
        });
    }

    /// First-harmonic-approximation voltage gain `|Vout/Vin|` at switching
    /// frequency `fs`:
    ///
    /// `|Zm*Ro / (Z1*Zm + Z1*Z2 + Z1*Ro + Zm*Z2 + Zm*Ro)|`
    pub fn fha_gain(&self, tank: &CllcResult, fs: f64) -> f64 {
        let w = 2.0 * std::f64::consts::PI * fs;
        let z1 = Complex::new(0.0, w * tank.l1 - 1.0 / (w * tank.c1));
        let zm = Complex::new(0.0, w * tank.lm);
        let z2 = Complex::new(0.0, w * tank.l2 - 1.0 / (w * tank.c2));
        let ro = Complex::new(tank.output_resistance, 0.0);

        let numerator = zm * ro;
        let denominator = z1 * zm + z1 * z2 + z1 * ro + zm * z2 + zm * ro;
        return numerator.magnitude() / denominator.magnitude();
    }

    /// Derives `DesignRequirements` and a single steady-state operating
    /// point: bipolar rectangular primary voltage with dead time, a
    /// sinusoidal resonant current plus triangular magnetizing current on
    /// the primary, and `n` times the resonant current on the secondary.
    pub fn design(&self) -> Result<(DesignRequirements, CllcResult, OperatingPoint)> {
        let tank = self.design_tank()?;

        let design_requirements = DesignRequirements {
            magnetizing_inductance: Inductance::new::<henry>(tank.lm),
            turns_ratios: vec![tank.turns_ratio],
            isolation_sides: vec![IsolationSide::Primary, IsolationSide::Secondary],
            topology: Some("cllc".to_string()),
        };

        let period = 1.0 / self.resonant_frequency;
        let n_samples = 64;
        let time: Vec<f64> = (0..=n_samples).map(|i| i as f64 * period / n_samples as f64).collect();

        let i_resonant_peak = self.output_power / (self.output_voltage * 0.9);
        let resonant_current: Vec<f64> = time
            .iter()
            .map(|t| i_resonant_peak * (2.0 * std::f64::consts::PI * t / period).sin())
            .collect();
        let magnetizing_peak = self.input_voltage / (4.0 * self.resonant_frequency * tank.lm);
        let magnetizing_current: Vec<f64> = time
            .iter()
            .map(|t| -magnetizing_peak + 2.0 * magnetizing_peak * (t / period))
            .collect();
        let primary_current: Vec<f64> = resonant_current
            .iter()
            .zip(magnetizing_current.iter())
            .map(|(r, m)| r + m)
            .collect();
        let secondary_current: Vec<f64> = resonant_current.iter().map(|i| i * tank.turns_ratio).collect();

        let primary_voltage: Vec<f64> = time
            .iter()
            .map(|t| if *t < period / 2.0 { self.input_voltage } else { -self.input_voltage })
            .collect();

        let operating_point = OperatingPoint {
            conditions: OperatingPointConditions {
                ambient_temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
                forced_cooling: false,
            },
            excitations: vec![
                WindingExcitation {
                    winding_name: "primary".into(),
                    frequency: Frequency::new::<hertz>(self.resonant_frequency),
                    voltage: ExcitationSignal::from_waveform(Waveform::new(
                        time.clone(),
                        primary_voltage,
                        WaveformLabel::RectangularWithDeadtime,
                    )),
                    current: ExcitationSignal::from_waveform(Waveform::new(
                        time.clone(),
                        primary_current,
                        WaveformLabel::Sinusoidal,
                    )),
                },
                WindingExcitation {
                    winding_name: "secondary".into(),
                    frequency: Frequency::new::<hertz>(self.resonant_frequency),
                    voltage: ExcitationSignal::from_waveform(Waveform::new(
                        time.clone(),
                        vec![self.output_voltage; time.len()],
                        WaveformLabel::SecondaryRectangular,
                    )),
                    current: ExcitationSignal::from_waveform(Waveform::new(
                        time.clone(),
                        secondary_current,
                        WaveformLabel::Sinusoidal,
                    )),
                },
            ],
        };

        return Ok((design_requirements, tank, operating_point));
    }
}
