/*!
Skin-effect AC-resistance factor models.
*/

/// Selects a skin-effect resistance-factor model. `Dowell` is implemented in
/// full; the rest dispatch to it pending their own closed forms (see module
/// docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkinEffectModel {
    /// Dowell's 1-D layered-foil model, the reference every other variant
    /// here degrades to.
    #[default]
    Dowell,
    /// Wojda's refinement of Dowell for round wire. Alias of [`Self::Dowell`].
    Wojda,
    /// Albach's model. Alias of [`Self::Dowell`].
    Albach,
    /// Payne's model. Alias of [`Self::Dowell`].
    Payne,
    /// Lotfi's model. Alias of [`Self::Dowell`].
    Lotfi,
    /// Kazimierczuk's model. Alias of [`Self::Dowell`].
    Kazimierczuk,
    /// Kutkut's model. Alias of [`Self::Dowell`].
    Kutkut,
    /// Ferreira's model. Alias of [`Self::Dowell`].
    Ferreira,
    /// Dimitrakakis's model. Alias of [`Self::Dowell`].
    Dimitrakakis,
    /// Wang's model. Alias of [`Self::Dowell`].
    Wang,
    /// Holguin's model. Alias of [`Self::Dowell`].
    Holguin,
    /// Perry's model. Alias of [`Self::Dowell`].
    Perry,
}

impl SkinEffectModel {
    /// Dowell's AC-resistance factor `F_r(h)` for a layer of normalized
    /// conductor thickness `h` (conductor thickness in skin depths) within a
    /// `num_layers`-layer winding:
    ///
    /// `F_r(h) = h * (sinh(2h) + sin(2h))/(cosh(2h) - cos(2h))
    ///         + 2/3 * (num_layers^2 - 1) * h * (sinh(h) - sin(h))/(cosh(h) + cos(h))`
    pub fn resistance_factor(&self, h: f64, num_layers: usize) -> f64 {
        if h <= 1e-9 {
            return 1.0;
        }
        let m = num_layers as f64;
        let term1 = h * ((2.0 * h).sinh() + (2.0 * h).sin()) / ((2.0 * h).cosh() - (2.0 * h).cos());
        let term2 = (2.0 / 3.0) * (m * m - 1.0) * h * (h.sinh() - h.sin()) / (h.cosh() + h.cos());
        return (term1 + term2).max(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resistance_factor_is_at_least_one() {
        for h in [0.0, 0.1, 0.5, 1.0, 2.0, 5.0] {
            let factor = SkinEffectModel::Dowell.resistance_factor(h, 3);
            assert!(factor >= 1.0, "h={h} gave factor {factor} < 1");
        }
    }

    #[test]
    fn resistance_factor_grows_with_thickness_in_skin_depths() {
        let low = SkinEffectModel::Dowell.resistance_factor(0.5, 3);
        let high = SkinEffectModel::Dowell.resistance_factor(3.0, 3);
        assert!(high > low);
    }

    #[test]
    fn aliased_models_match_dowell() {
        assert_eq!(
            SkinEffectModel::Wojda.resistance_factor(1.0, 2),
            SkinEffectModel::Dowell.resistance_factor(1.0, 2)
        );
    }
}
