/*!
Winding losses: ohmic, skin-effect and proximity-effect.

Grounded on §4.6. Dowell (skin) and Rossmanith (proximity) are implemented
with the full per-harmonic loop; the remaining enum variants dispatch to
these two pending their own closed forms, the same degrade-to-a-reference-
model pattern [`crate::core_losses`] uses.
*/

pub mod field_strength;
pub mod proximity;
pub mod skin;

pub use field_strength::FieldStrengthModel;
pub use proximity::ProximityModel;
pub use skin::SkinEffectModel;

use crate::waveform::Waveform;
use uom::si::f64::{ElectricalResistivity, Frequency, Length};
use uom::si::frequency::hertz;

/// Fraction of the fundamental's amplitude above which a harmonic is
/// included in the per-harmonic AC-loss sum (§4.6, default 1%).
pub const DEFAULT_HARMONIC_THRESHOLD: f64 = 0.01;

/// DC (ohmic) resistance of a single conductor: `R = rho * l / A`.
pub fn dc_resistance(resistivity: ElectricalResistivity, length: Length, conducting_area: f64) -> f64 {
    return resistivity.get::<uom::si::electrical_resistivity::ohm_meter>() * length.get::<uom::si::length::meter>()
        / conducting_area;
}

/// Skin depth at `frequency` in a conductor of resistivity `resistivity`,
/// assuming relative permeability 1: `delta = sqrt(rho / (pi * f * mu0))`.
pub fn skin_depth(resistivity: ElectricalResistivity, frequency: Frequency) -> f64 {
    let rho = resistivity.get::<uom::si::electrical_resistivity::ohm_meter>();
    let f = frequency.get::<hertz>().max(1e-12);
    return (rho / (std::f64::consts::PI * f * crate::material::VACUUM_PERMEABILITY_UNITLESS)).sqrt();
}

/// Total ohmic + AC loss of one winding, in watts, summed over every
/// harmonic of `current` whose amplitude exceeds `DEFAULT_HARMONIC_THRESHOLD`
/// of the fundamental.
///
/// `num_layers` is the number of layers the winding occupies in its section,
/// used by the skin/proximity resistance-factor models.
pub fn winding_losses(
    skin_model: SkinEffectModel,
    dc_resistance_ohm: f64,
    conductor_diameter: Length,
    resistivity: ElectricalResistivity,
    num_layers: usize,
    current: &Waveform,
    max_harmonics: usize,
) -> f64 {
    let harmonics = current.harmonics(max_harmonics);
    if harmonics.is_empty() {
        return 0.0;
    }
    let fundamental_amplitude = harmonics.get(1).map(|h| h.amplitude).unwrap_or(0.0).max(1e-12);
    let fundamental_frequency = if current.period() > 0.0 {
        1.0 / current.period()
    } else {
        0.0
    };

    let mut total = 0.0;
    for (k, harmonic) in harmonics.iter().enumerate() {
        if k == 0 {
            total += dc_resistance_ohm * harmonic.amplitude * harmonic.amplitude;
            continue;
        }
        if harmonic.amplitude < DEFAULT_HARMONIC_THRESHOLD * fundamental_amplitude {
            continue;
        }
        let harmonic_frequency = Frequency::new::<hertz>(fundamental_frequency * k as f64);
        let delta = skin_depth(resistivity, harmonic_frequency);
        let h = conductor_diameter.get::<uom::si::length::meter>() / delta;
        let factor = skin_model.resistance_factor(h, num_layers);
        let rms_amplitude = harmonic.amplitude / 2.0f64.sqrt();
        total += dc_resistance_ohm * factor * rms_amplitude * rms_amplitude;
    }
    return total;
}
