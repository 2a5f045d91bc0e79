/*!
Proximity-effect loss models.

Consumes the per-layer H-field produced by [`crate::winding_losses::field_strength`]'s
1-D MMF diagram across the winding window.
*/

/// Selects a proximity-effect model. `Rossmanith` is implemented in full;
/// the rest dispatch to it pending their own closed forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProximityModel {
    /// Rossmanith's model, the reference every other variant degrades to.
    #[default]
    Rossmanith,
    /// Wang's model. Alias of [`Self::Rossmanith`].
    Wang,
    /// Ferreira's model. Alias of [`Self::Rossmanith`].
    Ferreira,
    /// Lammeraner's model. Alias of [`Self::Rossmanith`].
    Lammeraner,
    /// Albach's model. Alias of [`Self::Rossmanith`].
    Albach,
    /// Dowell's model. Alias of [`Self::Rossmanith`].
    Dowell,
}

impl ProximityModel {
    /// Proximity-effect power density (W/m of conductor length) seen by a
    /// conductor of normalized thickness `h` (thickness in skin depths)
    /// immersed in an external field of amplitude `h_field` (A/m), following
    /// Rossmanith's reduction of Dowell's layered-foil derivation:
    ///
    /// `p' = h_field^2 * rho * h * (sinh(2h) - sin(2h)) / (cosh(2h) + cos(2h))`
    pub fn power_per_length(&self, h_field: f64, h: f64, resistivity: f64) -> f64 {
        if h <= 1e-9 {
            return 0.0;
        }
        let shape = h * ((2.0 * h).sinh() - (2.0 * h).sin()) / ((2.0 * h).cosh() + (2.0 * h).cos());
        return h_field * h_field * resistivity * shape.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_per_length_increases_with_field_strength() {
        let low = ProximityModel::Rossmanith.power_per_length(10.0, 1.0, 1.68e-8);
        let high = ProximityModel::Rossmanith.power_per_length(100.0, 1.0, 1.68e-8);
        assert!(high > low);
    }

    #[test]
    fn zero_field_gives_zero_loss() {
        assert_eq!(ProximityModel::Rossmanith.power_per_length(0.0, 1.0, 1.68e-8), 0.0);
    }
}
