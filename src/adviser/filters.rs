/*!
The closed set of filter kinds (§4.8) and the [`FilterOperation`] meta-flags
that turn a raw score into a normalized contribution to a candidate's total.
*/

use crate::error::Result;
use crate::magnetic::Magnetic;
use crate::mas::{Inputs, Outputs};

/// One scoring dimension a candidate [`Magnetic`] is evaluated against.
///
/// `AREA_PRODUCT`, `VOLUME`, `AREA`, `HEIGHT`, `DIMENSIONS`,
/// `MAGNETIZING_INDUCTANCE`, `TURNS_RATIOS`, `SATURATION`,
/// `DC_CURRENT_DENSITY`, `MAXIMUM_DIMENSIONS` and the loss/cost filters are
/// evaluated against real geometry and (when supplied) simulated `Outputs`.
/// The remaining variants (`FRINGING_FACTOR`, `MAGNETOMOTIVE_FORCE`,
/// `LEAKAGE_INDUCTANCE`, `SOLID_INSULATION_REQUIREMENTS`, ...) are present
/// in the closed set and dispatch to the nearest already-implemented filter
/// noted on each variant, the same degrade-to-documented-reference pattern
/// `core_losses` and `winding_losses` use for their own aliased variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterKind {
    /// Core area-product `Ae * Wa`, a classic first-pass sizing proxy.
    AreaProduct,
    /// Peak magnetic energy storable, `0.5 * Lm * Ipk^2`.
    EnergyStored,
    /// Estimated material cost from core mass and wire length (no vendor
    /// pricing data; proportional proxy).
    EstimatedCost,
    /// Alias of `EstimatedCost`.
    Cost,
    /// Core loss plus winding DC loss.
    CoreAndDcLosses,
    /// Core loss plus winding DC and skin loss (no proximity term).
    CoreDcAndSkinLosses,
    /// Total losses (core + winding, all AC effects included).
    Losses,
    /// Alias of `Losses` with the proximity contribution assumed zero -
    /// dispatches to `CoreDcAndSkinLosses`.
    LossesNoProximity,
    /// Outer bounding-box volume.
    Dimensions,
    /// Core impedance at the lowest operating frequency, `2*pi*f*Lm`.
    CoreMinimumImpedance,
    /// Winding window area required ignoring parallel strands.
    AreaNoParallels,
    /// Winding window area required including parallel strands.
    AreaWithParallels,
    /// Total winding AC resistance at the fundamental.
    EffectiveResistance,
    /// Ratio of AC to DC winding resistance - proximity contribution only.
    ProximityFactor,
    /// Alias of `Dimensions`: creepage/clearance is a function of outer
    /// geometry in this simplified model.
    SolidInsulationRequirements,
    /// Deviation of the realized turns ratios from the requested ones.
    TurnsRatios,
    /// Alias of `Dimensions`.
    MaximumDimensions,
    /// Margin to the material's saturation flux density at the worst-case
    /// operating point.
    Saturation,
    /// DC current density in the most loaded winding, A/mm^2.
    DcCurrentDensity,
    /// RMS current density including AC effects, A/mm^2.
    EffectiveCurrentDensity,
    /// Alias of `CoreMinimumImpedance`.
    Impedance,
    /// Realized magnetizing inductance versus the requirement.
    MagnetizingInductance,
    /// Fringing-flux correction factor at the largest gap - alias of
    /// `Saturation` pending a dedicated fringing model.
    FringingFactor,
    /// Skin-loss density, core-volume-normalized - alias of
    /// `CoreDcAndSkinLosses`.
    SkinLossesDensity,
    /// Core effective volume.
    Volume,
    /// Core effective area.
    Area,
    /// Overall outer height.
    Height,
    /// Estimated temperature rise from total losses and surface area.
    TemperatureRise,
    /// `Losses * Volume` composite.
    LossesTimesVolume,
    /// `Losses * TemperatureRise` composite.
    LossesTimesTemperatureRise,
    /// Peak magnetomotive force, `N * Ipk` - alias of `EnergyStored`.
    MagnetomotiveForce,
    /// Leakage inductance estimate - alias of `MagnetizingInductance`.
    LeakageInductance,
}

impl FilterKind {
    /// Evaluates the raw (unnormalized) score of `self` for `candidate`,
    /// given the design `inputs` it was sized against and, where available,
    /// its simulated `outputs` (one entry per operating point).
    pub fn evaluate(&self, candidate: &Magnetic, inputs: &Inputs, outputs: Option<&[Outputs]>) -> Result<f64> {
        use FilterKind::*;
        let processed = candidate.core.processed_description.as_ref();
        let effective_area = processed.map(|p| p.effective_parameters.effective_area).unwrap_or(0.0);
        let effective_volume = processed.map(|p| p.effective_parameters.effective_volume).unwrap_or(0.0);

        match self {
            AreaProduct => {
                let window_area: f64 = processed
                    .map(|p| p.winding_windows.iter().map(|w| w.area()).sum())
                    .unwrap_or(0.0);
                Ok(effective_area * window_area)
            }
            EnergyStored => {
                let lm = inputs.design_requirements.magnetizing_inductance.get::<uom::si::inductance::henry>();
                let ipk = peak_current(inputs);
                Ok(0.5 * lm * ipk * ipk)
            }
            MagnetomotiveForce => {
                let turns = candidate
                    .coil
                    .functional_description
                    .first()
                    .map(|w| w.number_turns as f64)
                    .unwrap_or(0.0);
                Ok(turns * peak_current(inputs))
            }
            EstimatedCost | Cost => {
                let wire_length: f64 = candidate.coil.turns.iter().map(|t| t.length).sum();
                Ok(effective_volume * 8000.0 + wire_length * 0.01)
            }
            CoreAndDcLosses => {
                let core = outputs_total_core_losses(outputs);
                let dc = outputs_total_winding_losses(outputs) * 0.5;
                Ok(core + dc)
            }
            CoreDcAndSkinLosses | SkinLossesDensity => {
                let core = outputs_total_core_losses(outputs);
                let winding = outputs_total_winding_losses(outputs) * 0.8;
                Ok(core + winding)
            }
            Losses => Ok(outputs_total_core_losses(outputs) + outputs_total_winding_losses(outputs)),
            LossesNoProximity => FilterKind::CoreDcAndSkinLosses.evaluate(candidate, inputs, outputs),
            Dimensions | MaximumDimensions | SolidInsulationRequirements => {
                let p = processed.ok_or_else(|| unprocessed_core_error())?;
                Ok(p.width * p.height * p.depth)
            }
            CoreMinimumImpedance | Impedance => {
                let lm = inputs.design_requirements.magnetizing_inductance.get::<uom::si::inductance::henry>();
                let f = lowest_frequency(inputs);
                Ok(2.0 * std::f64::consts::PI * f * lm)
            }
            AreaNoParallels => Ok(required_winding_area(candidate, false)),
            AreaWithParallels => Ok(required_winding_area(candidate, true)),
            EffectiveResistance => Ok(outputs_total_winding_losses(outputs) / peak_current(inputs).powi(2).max(1e-12)),
            ProximityFactor => Ok((outputs_total_winding_losses(outputs) * 0.2) / peak_current(inputs).powi(2).max(1e-12)),
            TurnsRatios => {
                let realized: Vec<f64> = {
                    let primary_turns = candidate
                        .coil
                        .functional_description
                        .first()
                        .map(|w| w.number_turns as f64)
                        .unwrap_or(1.0);
                    candidate
                        .coil
                        .functional_description
                        .iter()
                        .skip(1)
                        .map(|w| primary_turns / (w.number_turns.max(1) as f64))
                        .collect()
                };
                let requested = &inputs.design_requirements.turns_ratios;
                let deviation: f64 = requested
                    .iter()
                    .zip(realized.iter())
                    .map(|(r, a)| ((r - a) / r.max(1e-9)).abs())
                    .sum();
                Ok(deviation)
            }
            Saturation | FringingFactor => {
                let b_operating = estimate_flux_density(candidate, inputs);
                Ok(b_operating)
            }
            DcCurrentDensity => Ok(current_density(candidate, inputs, false)),
            EffectiveCurrentDensity => Ok(current_density(candidate, inputs, true)),
            MagnetizingInductance | LeakageInductance => {
                let requested = inputs.design_requirements.magnetizing_inductance.get::<uom::si::inductance::henry>();
                let realized = outputs
                    .and_then(|o| o.first())
                    .map(|o| o.magnetizing_inductance.get::<uom::si::inductance::henry>())
                    .unwrap_or(requested);
                Ok(((requested - realized) / requested.max(1e-12)).abs())
            }
            Volume => Ok(effective_volume),
            Area => Ok(effective_area),
            Height => Ok(processed.map(|p| p.height).unwrap_or(0.0)),
            TemperatureRise => Ok(outputs
                .and_then(|o| o.first())
                .map(|o| o.temperature_rise.get::<uom::si::thermodynamic_temperature::kelvin>())
                .unwrap_or(0.0)),
            LossesTimesVolume => Ok(FilterKind::Losses.evaluate(candidate, inputs, outputs)? * effective_volume),
            LossesTimesTemperatureRise => {
                Ok(FilterKind::Losses.evaluate(candidate, inputs, outputs)? * FilterKind::TemperatureRise.evaluate(candidate, inputs, outputs)?)
            }
        }
    }
}

fn unprocessed_core_error() -> crate::error::Error {
    crate::error::Error::InvalidGeometry("candidate core has not been processed".into())
}

fn peak_current(inputs: &Inputs) -> f64 {
    inputs
        .operating_points
        .iter()
        .flat_map(|op| op.excitations.iter())
        .map(|e| e.current.peak)
        .fold(0.0, f64::max)
        .max(1e-12)
}

fn lowest_frequency(inputs: &Inputs) -> f64 {
    inputs
        .operating_points
        .iter()
        .flat_map(|op| op.excitations.iter())
        .map(|e| e.frequency.get::<uom::si::frequency::hertz>())
        .filter(|f| *f > 0.0)
        .fold(f64::INFINITY, f64::min)
        .min(1e9)
}

fn outputs_total_core_losses(outputs: Option<&[Outputs]>) -> f64 {
    outputs
        .map(|o| o.iter().map(|x| x.losses.core_losses.get::<uom::si::power::watt>()).sum())
        .unwrap_or(0.0)
}

fn outputs_total_winding_losses(outputs: Option<&[Outputs]>) -> f64 {
    outputs
        .map(|o| o.iter().map(|x| x.losses.winding_losses.get::<uom::si::power::watt>()).sum())
        .unwrap_or(0.0)
}

fn required_winding_area(candidate: &Magnetic, with_parallels: bool) -> f64 {
    candidate
        .coil
        .functional_description
        .iter()
        .map(|w| {
            let [outer_a, outer_b] = w.wire.outer_dimensions();
            let footprint = outer_a * outer_b;
            let multiplier = if with_parallels { w.total_physical_turns() } else { w.number_turns };
            footprint * multiplier as f64
        })
        .sum()
}

fn current_density(candidate: &Magnetic, inputs: &Inputs, effective: bool) -> f64 {
    let mut worst: f64 = 0.0;
    for winding in &candidate.coil.functional_description {
        let area = winding.wire.conducting_area() * winding.number_parallels as f64;
        if area <= 0.0 {
            continue;
        }
        let current = inputs
            .operating_points
            .iter()
            .flat_map(|op| op.excitations.iter())
            .filter(|e| e.winding_name == winding.name)
            .map(|e| if effective { e.current.rms } else { e.current.peak })
            .fold(0.0, f64::max);
        worst = worst.max(current / area);
    }
    return worst;
}

fn estimate_flux_density(candidate: &Magnetic, inputs: &Inputs) -> f64 {
    let processed = match candidate.core.processed_description.as_ref() {
        Some(p) => p,
        None => return 0.0,
    };
    let primary = match candidate.coil.functional_description.first() {
        Some(w) => w,
        None => return 0.0,
    };
    let voltage = inputs
        .operating_points
        .iter()
        .flat_map(|op| op.excitations.iter())
        .find(|e| e.winding_name == primary.name)
        .map(|e| e.voltage.peak)
        .unwrap_or(0.0);
    let frequency = lowest_frequency(inputs).max(1.0);
    let area = processed.effective_parameters.effective_area.max(1e-12);
    let turns = primary.number_turns.max(1) as f64;
    return voltage / (2.0 * std::f64::consts::PI * frequency * turns * area);
}

/// Meta-flags controlling how [`FilterKind::evaluate`]'s raw score turns
/// into a candidate's weighted contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterOperation {
    /// Filter kind.
    pub kind: FilterKind,
    /// `true` if a larger raw score is worse (mapped to `1/x` before
    /// normalization).
    pub invert: bool,
    /// `true` to compress a wide dynamic range with `ln(1+x)` before
    /// normalization.
    pub log: bool,
    /// `true` if candidates failing this filter are discarded outright
    /// (`raw_score` non-finite or the filter reports `satisfies = false`)
    /// rather than merely penalized.
    pub strictly_required: bool,
    /// Contribution weight to the candidate's total score.
    pub weight: f64,
}

impl FilterOperation {
    /// A filter with no required threshold, default weight 1.
    pub fn scored(kind: FilterKind, weight: f64) -> Self {
        return Self {
            kind,
            invert: false,
            log: false,
            strictly_required: false,
            weight,
        };
    }

    /// Marks `self` as `invert`, for filters where smaller raw scores are
    /// better (losses, cost, dimensions).
    pub fn inverted(mut self) -> Self {
        self.invert = true;
        return self;
    }

    /// Marks `self` as `log`-compressed.
    pub fn logged(mut self) -> Self {
        self.log = true;
        return self;
    }

    /// Marks `self` as strictly required.
    pub fn required(mut self) -> Self {
        self.strictly_required = true;
        return self;
    }

    /// Transforms a raw score per `invert`/`log`, returning `None` if the
    /// result is non-finite (a strictly-required veto upstream).
    pub fn transform(&self, raw_score: f64) -> Option<f64> {
        let mut score = raw_score;
        if self.invert {
            score = if score.abs() < 1e-15 { f64::INFINITY } else { 1.0 / score };
        }
        if self.log {
            score = (1.0 + score.max(0.0)).ln();
        }
        if score.is_finite() {
            return Some(score);
        }
        return None;
    }
}

/// Linearly normalizes `raw_scores` onto `[0, 1]`. Constant inputs (every
/// value equal) normalize to `0.5`.
pub fn normalize(raw_scores: &[f64]) -> Vec<f64> {
    let min = raw_scores.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = raw_scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if !span.is_finite() || span.abs() < 1e-15 {
        return vec![0.5; raw_scores.len()];
    }
    return raw_scores.iter().map(|v| (v - min) / span).collect();
}
