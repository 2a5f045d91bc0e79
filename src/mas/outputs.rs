/*!
`Outputs`: the computed electrical behavior of a `Magnetic` at one operating
point.
*/

use uom::si::f64::{Capacitance, Inductance, MagneticFluxDensity, Power, ThermodynamicTemperature};

/// Core and winding losses broken out, in watts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LossesBreakdown {
    /// Core (hysteresis + eddy-current) losses.
    pub core_losses: Power,
    /// Sum of all windings' ohmic + AC losses.
    pub winding_losses: Power,
}

impl LossesBreakdown {
    /// Total losses, core plus winding.
    pub fn total(&self) -> Power {
        self.core_losses + self.winding_losses
    }
}

/// Computed behavior of a `Magnetic` at one operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outputs {
    /// Core and winding losses.
    pub losses: LossesBreakdown,
    /// Magnetizing inductance realized by this design.
    pub magnetizing_inductance: Inductance,
    /// Leakage inductance, referred to the primary.
    pub leakage_inductance: Inductance,
    /// Peak flux density reached in the core.
    pub flux_density: MagneticFluxDensity,
    /// Temperature rise above ambient.
    pub temperature_rise: ThermodynamicTemperature,
    /// Stray (interwinding) capacitance.
    pub stray_capacitance: Capacitance,
    /// Output power divided by output power plus total losses.
    pub efficiency: f64,
}

impl Outputs {
    /// Computes `efficiency = output_power / (output_power + losses)`.
    pub fn efficiency_from_output_power(output_power: Power, losses: Power) -> f64 {
        let output = output_power.get::<uom::si::power::watt>();
        let loss = losses.get::<uom::si::power::watt>();
        if output + loss <= 0.0 {
            return 0.0;
        }
        return output / (output + loss);
    }
}
