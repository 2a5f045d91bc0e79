/*!
Magnetic-field-strength computation across the winding window.

A 1-D MMF diagram: walking outward across the sections of a winding window,
the ampere-turns enclosed accumulate linearly within a section (winding
current distributed uniformly through its layers) and stay constant across
an insulation gap between sections. [`mmf_diagram`] returns the field
strength at each layer boundary.
*/

/// Selects the field-strength computation model. All variants implement the
/// same 1-D MMF accumulation; they are kept distinct because the fringing
/// correction downstream ([`crate::winding_losses::ProximityModel`]) differs
/// by literature source even when the underlying H-field is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldStrengthModel {
    /// Binns & Lawrenson's formulation.
    #[default]
    BinnsLawrenson,
    /// Lammeraner's formulation.
    Lammeraner,
    /// Dowell's formulation.
    Dowell,
    /// Wang's formulation.
    Wang,
    /// Albach's formulation.
    Albach,
}

/// One layer's contribution to the MMF diagram: its ampere-turns and the
/// field strength (A/m) at its outer boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MmfPoint {
    /// Cumulative ampere-turns enclosed up to and including this layer.
    pub ampere_turns: f64,
    /// Field strength at this layer's outer boundary, `ampere_turns / depth`.
    pub field_strength: f64,
}

impl FieldStrengthModel {
    /// Computes the MMF diagram across a stack of layers. `layer_currents`
    /// is the (signed) RMS ampere-turns each layer contributes, in winding
    /// order outward from the core; `window_depth` normalizes ampere-turns
    /// into a field strength (all five variants use the same normalization,
    /// differing only in how fringing is folded in downstream).
    pub fn mmf_diagram(&self, layer_currents: &[f64], window_depth: f64) -> Vec<MmfPoint> {
        let depth = window_depth.max(1e-9);
        let mut cumulative = 0.0;
        let mut points = Vec::with_capacity(layer_currents.len());
        for &current in layer_currents {
            cumulative += current;
            points.push(MmfPoint {
                ampere_turns: cumulative,
                field_strength: cumulative / depth,
            });
        }
        return points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mmf_accumulates_linearly_for_equal_layer_currents() {
        let points = FieldStrengthModel::BinnsLawrenson.mmf_diagram(&[1.0, 1.0, 1.0], 0.01);
        assert_eq!(points.len(), 3);
        approx::assert_abs_diff_eq!(points[2].ampere_turns, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn secondary_cancels_primary_mmf() {
        let points = FieldStrengthModel::BinnsLawrenson.mmf_diagram(&[5.0, -5.0], 0.01);
        approx::assert_abs_diff_eq!(points[1].ampere_turns, 0.0, epsilon = 1e-9);
    }
}
