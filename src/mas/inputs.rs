/*!
`Inputs`: design requirements plus the list of operating points a design
must be simulated against.
*/

use crate::coil::IsolationSide;
use crate::error::{Error, Result};
use crate::waveform::Waveform;
use uom::si::f64::{Frequency, Inductance, ThermodynamicTemperature};

/// Required magnetizing inductance, turns ratios and isolation sides - the
/// converter-independent requirements a topology module (§4.9) derives.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignRequirements {
    /// Required magnetizing inductance.
    pub magnetizing_inductance: Inductance,
    /// Turns ratios `N_primary / N_secondary_i`, one per non-primary
    /// winding, in winding order.
    pub turns_ratios: Vec<f64>,
    /// Isolation side of each winding, primary first.
    pub isolation_sides: Vec<IsolationSide>,
    /// Converter topology this design was derived from, if any.
    pub topology: Option<String>,
}

impl DesignRequirements {
    /// Validates the cross-field invariants §7 calls out as
    /// `InvalidDesignRequirements`: at least one isolation side
    /// (the primary), and turns ratios supplied for every non-primary
    /// winding.
    pub fn validate(&self) -> Result<()> {
        if self.isolation_sides.is_empty() {
            return Err(Error::InvalidDesignRequirements(
                "design requirements must name at least the primary isolation side".into(),
            ));
        }
        if self.turns_ratios.len() != self.isolation_sides.len() - 1 {
            return Err(Error::InvalidDesignRequirements(format!(
                "expected {} turns ratios for {} windings, got {}",
                self.isolation_sides.len() - 1,
                self.isolation_sides.len(),
                self.turns_ratios.len()
            )));
        }
        return Ok(());
    }
}

/// Ambient conditions under which one [`OperatingPoint`] is evaluated.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingPointConditions {
    /// Ambient temperature.
    pub ambient_temperature: ThermodynamicTemperature,
    /// `true` if forced-air cooling is present.
    pub forced_cooling: bool,
}

/// A fully decomposed voltage or current signal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExcitationSignal {
    /// Time-domain waveform.
    pub waveform: Waveform,
    /// Peak value, cached from `waveform` at construction time.
    pub peak: f64,
    /// RMS value, cached from `waveform` at construction time.
    pub rms: f64,
}

impl ExcitationSignal {
    /// Builds a signal from a waveform, caching its peak and RMS.
    pub fn from_waveform(waveform: Waveform) -> Self {
        let peak = waveform
            .data
            .iter()
            .cloned()
            .fold(0.0, |acc, v| acc.max(v.abs()));
        let rms = waveform.rms();
        return Self { waveform, peak, rms };
    }
}

/// One winding's excitation within an [`OperatingPoint`]: frequency,
/// voltage and current signals.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindingExcitation {
    /// Winding this excitation applies to, by name.
    pub winding_name: String,
    /// Switching/operating frequency.
    pub frequency: Frequency,
    /// Voltage signal across this winding.
    pub voltage: ExcitationSignal,
    /// Current signal through this winding.
    pub current: ExcitationSignal,
}

/// One operating point: ambient conditions plus an excitation per winding.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingPoint {
    /// Ambient conditions.
    pub conditions: OperatingPointConditions,
    /// Per-winding excitations, same winding count and order across every
    /// operating point of a given `Inputs` (§7 `InvalidDesignRequirements`).
    pub excitations: Vec<WindingExcitation>,
}

/// Design requirements plus the operating points a design must be simulated
/// against.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inputs {
    /// Converter-independent design requirements.
    pub design_requirements: DesignRequirements,
    /// Operating points to simulate.
    pub operating_points: Vec<OperatingPoint>,
}

impl Inputs {
    /// Validates the invariants §7 assigns to `InvalidDesignRequirements`:
    /// design requirements are internally consistent, the operating-point
    /// list is non-empty, and every operating point excites the same set of
    /// windings (by name and count). Per §9's open question, a mismatch is
    /// treated as a hard error.
    pub fn validate(&self) -> Result<()> {
        self.design_requirements.validate()?;
        if self.operating_points.is_empty() {
            return Err(Error::InvalidDesignRequirements(
                "operating-point list must not be empty".into(),
            ));
        }
        let first_windings: Vec<&str> = self.operating_points[0]
            .excitations
            .iter()
            .map(|e| e.winding_name.as_str())
            .collect();
        for (index, operating_point) in self.operating_points.iter().enumerate().skip(1) {
            let windings: Vec<&str> = operating_point
                .excitations
                .iter()
                .map(|e| e.winding_name.as_str())
                .collect();
            if windings != first_windings {
                return Err(Error::InvalidDesignRequirements(format!(
                    "operating point {index} excites a different set of windings than operating point 0"
                )));
            }
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::inductance::henry;

    fn bare_operating_point(windings: &[&str]) -> OperatingPoint {
        OperatingPoint {
            conditions: OperatingPointConditions {
                ambient_temperature: ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(25.0),
                forced_cooling: false,
            },
            excitations: windings
                .iter()
                .map(|name| WindingExcitation {
                    winding_name: (*name).to_string(),
                    frequency: Frequency::new::<uom::si::frequency::hertz>(100_000.0),
                    voltage: ExcitationSignal::from_waveform(crate::waveform::Waveform::new(
                        vec![0.0, 1.0],
                        vec![0.0, 0.0],
                        crate::waveform::WaveformLabel::Custom,
                    )),
                    current: ExcitationSignal::from_waveform(crate::waveform::Waveform::new(
                        vec![0.0, 1.0],
                        vec![0.0, 0.0],
                        crate::waveform::WaveformLabel::Custom,
                    )),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_operating_points_is_invalid() {
        let inputs = Inputs {
            design_requirements: DesignRequirements {
                magnetizing_inductance: Inductance::new::<henry>(1e-4),
                turns_ratios: vec![],
                isolation_sides: vec![IsolationSide::Primary],
                topology: None,
            },
            operating_points: vec![],
        };
        assert!(matches!(inputs.validate(), Err(Error::InvalidDesignRequirements(_))));
    }

    #[test]
    fn mismatched_winding_sets_across_operating_points_is_invalid() {
        let inputs = Inputs {
            design_requirements: DesignRequirements {
                magnetizing_inductance: Inductance::new::<henry>(1e-4),
                turns_ratios: vec![0.5],
                isolation_sides: vec![IsolationSide::Primary, IsolationSide::Secondary],
                topology: None,
            },
            operating_points: vec![
                bare_operating_point(&["primary", "secondary"]),
                bare_operating_point(&["primary"]),
            ],
        };
        assert!(matches!(inputs.validate(), Err(Error::InvalidDesignRequirements(_))));
    }

    #[test]
    fn consistent_inputs_validate() {
        let inputs = Inputs {
            design_requirements: DesignRequirements {
                magnetizing_inductance: Inductance::new::<henry>(1e-4),
                turns_ratios: vec![0.5],
                isolation_sides: vec![IsolationSide::Primary, IsolationSide::Secondary],
                topology: None,
            },
            operating_points: vec![bare_operating_point(&["primary", "secondary"])],
        };
        assert!(inputs.validate().is_ok());
    }
}
