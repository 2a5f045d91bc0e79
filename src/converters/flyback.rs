/*!
Flyback converter topology: turns ratio, magnetizing inductance and
per-winding waveform synthesis for CCM/DCM/QRM/BMO.
*/

use crate::error::{Error, Result};
use crate::mas::{DesignRequirements, ExcitationSignal, OperatingPoint, OperatingPointConditions, WindingExcitation};
use crate::waveform::{Waveform, WaveformLabel};
use crate::coil::IsolationSide;
use uom::si::f64::{Frequency, Inductance, ThermodynamicTemperature};
use uom::si::frequency::hertz;
use uom::si::inductance::henry;
use uom::si::thermodynamic_temperature::degree_celsius;

/// Conduction mode of a flyback design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlybackMode {
    /// Continuous conduction.
    Ccm,
    /// Discontinuous conduction.
    Dcm,
    /// Quasi-resonant (valley switching).
    Qrm,
    /// Boundary-mode operation.
    Bmo,
}

/// A flyback converter specification.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlybackSpec {
    /// Minimum input (DC bus) voltage, in volts.
    pub input_voltage_min: f64,
    /// Maximum input (DC bus) voltage, in volts.
    pub input_voltage_max: f64,
    /// Output voltage, in volts.
    pub output_voltage: f64,
    /// Output current, in amperes.
    pub output_current: f64,
    /// Switching frequency, in hertz.
    pub switching_frequency: f64,
    /// Estimated power-stage efficiency, `(0, 1]`.
    pub efficiency: f64,
    /// Maximum allowed duty cycle, `(0, 1)`.
    pub max_duty_cycle: f64,
    /// Secondary-side rectifier forward-voltage drop, in volts.
    pub rectifier_forward_voltage: f64,
    /// Ratio of current ripple to peak primary current, `(0, 1]`.
    pub current_ripple_ratio: f64,
    /// Desired conduction mode.
    pub mode: FlybackMode,
    /// Parasitic drain-source capacitance, used by [`Self::qrm_frequency`].
    pub drain_source_capacitance: f64,
}

/// Derived flyback design: `DesignRequirements` plus one CCM/DCM operating
/// point per input-voltage tier (min and max).
#[derive(Debug, Clone)]
pub struct FlybackResult {
    /// Converter-independent design requirements.
    pub design_requirements: DesignRequirements,
    /// One operating point per input-voltage tier.
    pub operating_points: Vec<OperatingPoint>,
}

impl FlybackSpec {
    fn validate(&self) -> Result<()> {
        if self.max_duty_cycle <= 0.0 || self.max_duty_cycle >= 1.0 {
            return Err(Error::InvalidDesignRequirements(format!(
                "max_duty_cycle must be in (0, 1), got {}",
                self.max_duty_cycle
            )));
        }
        if self.input_voltage_min <= 0.0 || self.input_voltage_max < self.input_voltage_min {
            return Err(Error::InvalidDesignRequirements(
                "input voltage range must be positive and non-decreasing".into(),
            ));
        }
        if self.efficiency <= 0.0 || self.efficiency > 1.0 {
            return Err(Error::InvalidDesignRequirements(format!(
                "efficiency must be in (0, 1], got {}",
                self.efficiency
            )));
        }
        return Ok(());
    }

    /// Turns ratio `n = Np/Ns` chosen from the maximum duty cycle and the
    /// minimum input voltage: `n = D_max/(1-D_max) * Vin_min/(Vout+Vf)`.
    pub fn turns_ratio(&self) -> f64 {
        let d = self.max_duty_cycle;
        return (d / (1.0 - d)) * (self.input_voltage_min / (self.output_voltage + self.rectifier_forward_voltage));
    }

    /// Output power, `Vout * Iout`.
    pub fn output_power(&self) -> f64 {
        self.output_voltage * self.output_current
    }

    /// Peak primary current at `input_voltage`, derived from power balance
    /// assuming a triangular primary current: `Ipk = 2 * Pin / (Vin * D_max)`.
    pub fn peak_primary_current(&self, input_voltage: f64) -> f64 {
        let pin = self.output_power() / self.efficiency;
        let average_primary_current = pin / input_voltage;
        return 2.0 * average_primary_current / self.max_duty_cycle;
    }

    /// Magnetizing inductance chosen from the current ripple ratio at the
    /// worst case (minimum input voltage): `Lm = Vin_min * D_max / (fs *
    /// ripple_ratio * Ipk)`.
    pub fn magnetizing_inductance(&self) -> f64 {
        let ipk = self.peak_primary_current(self.input_voltage_min);
        let ripple_current = self.current_ripple_ratio * ipk;
        return self.input_voltage_min * self.max_duty_cycle / (self.switching_frequency * ripple_current);
    }

    /// Quasi-resonant valley-switching frequency, solved from the resonance
    /// between the magnetizing inductance and `drain_source_capacitance`
    /// during the off-time: `f_qr = 1 / (2*pi*sqrt(Lm * Cds))`.
    pub fn qrm_frequency(&self) -> f64 {
        let lm = self.magnetizing_inductance();
        return 1.0 / (2.0 * std::f64::consts::PI * (lm * self.drain_source_capacitance).sqrt());
    }

    fn primary_waveform(&self, input_voltage: f64) -> Waveform {
        let period = 1.0 / self.switching_frequency;
        let on_time = self.max_duty_cycle * period;
        let ipk = self.peak_primary_current(input_voltage);
        let ripple = self.current_ripple_ratio * ipk;
        let valley = (ipk - ripple).max(0.0);

        match self.mode {
            FlybackMode::Ccm => Waveform::new(
                vec![0.0, on_time, period],
                vec![valley, ipk, valley],
                WaveformLabel::FlybackPrimary,
            ),
            FlybackMode::Dcm | FlybackMode::Qrm | FlybackMode::Bmo => {
                let dead_start = on_time * 1.05;
                Waveform::new(
                    vec![0.0, on_time, dead_start, period],
                    vec![0.0, ipk, 0.0, 0.0],
                    WaveformLabel::FlybackPrimary,
                )
            }
        }
    }

    fn secondary_waveform(&self, input_voltage: f64) -> Waveform {
        let n = self.turns_ratio();
        let ipk_primary = self.peak_primary_current(input_voltage);
        let ipk_secondary = ipk_primary * n;
        let period = 1.0 / self.switching_frequency;
        let on_time = self.max_duty_cycle * period;

        match self.mode {
            FlybackMode::Ccm => Waveform::new(
                vec![on_time, period],
                vec![ipk_secondary, ipk_secondary * 0.2],
                WaveformLabel::FlybackSecondary,
            ),
            FlybackMode::Dcm | FlybackMode::Qrm | FlybackMode::Bmo => {
                let off_end = on_time * 1.05;
                Waveform::new(
                    vec![on_time, off_end, period],
                    vec![ipk_secondary, 0.0, 0.0],
                    WaveformLabel::FlybackSecondaryWithDeadtime,
                )
            }
        }
    }

    /// Derives `DesignRequirements` and one operating point per
    /// input-voltage tier (minimum and maximum).
    pub fn design(&self) -> Result<FlybackResult> {
        self.validate()?;

        let design_requirements = DesignRequirements {
            magnetizing_inductance: Inductance::new::<henry>(self.magnetizing_inductance()),
            turns_ratios: vec![self.turns_ratio()],
            isolation_sides: vec![IsolationSide::Primary, IsolationSide::Secondary],
            topology: Some("flyback".to_string()),
        };

        let tiers = [self.input_voltage_min, self.input_voltage_max];
        let mut operating_points = Vec::with_capacity(tiers.len());
        for &vin in &tiers {
            let primary = self.primary_waveform(vin);
            let secondary = self.secondary_waveform(vin);
            operating_points.push(OperatingPoint {
                conditions: OperatingPointConditions {
                    ambient_temperature: ThermodynamicTemperature::new::<degree_celsius>(25.0),
                    forced_cooling: false,
                },
                excitations: vec![
                    WindingExcitation {
                        winding_name: "primary".into(),
                        frequency: Frequency::new::<hertz>(self.switching_frequency),
                        voltage: ExcitationSignal::from_waveform(Waveform::new(
                            primary.time.clone(),
                            vec![vin; primary.time.len()],
                            WaveformLabel::RectangularWithDeadtime,
                        )),
                        current: ExcitationSignal::from_waveform(primary),
                    },
                    WindingExcitation {
                        winding_name: "secondary".into(),
                        frequency: Frequency::new::<hertz>(self.switching_frequency),
                        voltage: ExcitationSignal::from_waveform(Waveform::new(
                            secondary.time.clone(),
                            vec![self.output_voltage; secondary.time.len()],
                            WaveformLabel::SecondaryRectangularWithDeadtime,
                        )),
                        current: ExcitationSignal::from_waveform(secondary),
                    },
                ],
            });
        }

        return Ok(FlybackResult {
            design_requirements,
            operating_points,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_spec() -> FlybackSpec {
        FlybackSpec {
            input_voltage_min: 80.0,
            input_voltage_max: 380.0,
            output_voltage: 12.0,
            output_current: 5.0,
            switching_frequency: 100_000.0,
            efficiency: 0.85,
            max_duty_cycle: 0.45,
            rectifier_forward_voltage: 0.7,
            current_ripple_ratio: 0.6,
            mode: FlybackMode::Ccm,
            drain_source_capacitance: 100e-12,
        }
    }

    #[test]
    fn turns_ratio_matches_worked_example() {
        let spec = example_spec();
        let n = spec.turns_ratio();
        approx::assert_relative_eq!(n, 5.1, max_relative = 0.05);
    }

    #[test]
    fn design_emits_one_operating_point_per_input_tier() {
        let spec = example_spec();
        let result = spec.design().unwrap();
        assert_eq!(result.operating_points.len(), 2);
        assert!(result.design_requirements.magnetizing_inductance.get::<henry>() > 0.0);
    }

    #[test]
    fn invalid_duty_cycle_is_rejected() {
        let mut spec = example_spec();
        spec.max_duty_cycle = 1.2;
        assert!(matches!(spec.design(), Err(Error::InvalidDesignRequirements(_))));
    }

    #[test]
    fn qrm_frequency_is_positive() {
        let mut spec = example_spec();
        spec.mode = FlybackMode::Qrm;
        assert!(spec.qrm_frequency() > 0.0);
    }
}
