/*!
Gap reluctance models, core reluctance and magnetizing inductance.

The magnetic circuit of an assembled [`crate::core::Core`] is a series of
reluctances: one for the ungapped core material plus one per
[`crate::gap::CoreGap`]. [`GapReluctanceModel`] selects which closed-form
fringing correction to apply to each gap; [`GapReluctanceModel::ZHANG`] is the
default per §4.4.
*/

use crate::error::Result;
use crate::gap::CoreGap;
use crate::geometry::ColumnElement;
use crate::material::VACUUM_PERMEABILITY_UNITLESS;

/// Selects a gap-reluctance closed form. See §4.4 for the model names this
/// mirrors one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GapReluctanceModel {
    /// `l / (mu0 * A)`, no fringing correction.
    Classic,
    /// Classic formula with an effective area enlarged to absorb fringing.
    EffectiveArea,
    /// Classic formula with an effective length shortened to absorb fringing.
    EffectiveLength,
    /// Partridge's closed-form fringing factor.
    Partridge,
    /// Zhang's fringing factor (the default).
    #[default]
    Zhang,
    /// Muehlethaler's fringing factor.
    Muehlethaler,
    /// Stenglein's fringing factor.
    Stenglein,
    /// Balakrishnan's fringing factor.
    Balakrishnan,
}

/// Result of evaluating a [`GapReluctanceModel`] against one gap: the
/// reluctance itself plus the fringing factor (always `>= 1`) that was
/// applied to reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapReluctanceResult {
    /// Reluctance of the gap, in A/Wb (H^-1).
    pub reluctance: f64,
    /// Fringing factor applied, always `>= 1`.
    pub fringing_factor: f64,
}

fn equivalent_radius(area: f64) -> f64 {
    (area / std::f64::consts::PI).sqrt()
}

impl GapReluctanceModel {
    /// Computes the reluctance of `gap`, given the `column` it sits in.
    /// `material_relative_permeability` and the operating `frequency` /
    /// `temperature` are accepted for models that need them (none of the
    /// eight listed here do at present; they are threaded through so a
    /// future model can use them without an interface change).
    pub fn reluctance(
        &self,
        gap: &CoreGap,
        column: &ColumnElement,
        _material_relative_permeability: f64,
        _frequency: f64,
        _temperature: f64,
    ) -> Result<GapReluctanceResult> {
        let area = gap.area.unwrap_or(column.area);
        let length = gap.length;
        let mu0 = VACUUM_PERMEABILITY_UNITLESS;

        let fringing_factor = match self {
            GapReluctanceModel::Classic => 1.0,
            GapReluctanceModel::EffectiveArea | GapReluctanceModel::EffectiveLength => {
                let r = equivalent_radius(area);
                1.0 + (length / (2.0 * r)) * (1.0 + (2.0 * r / length).ln().max(0.0))
            }
            GapReluctanceModel::Partridge => {
                let r = equivalent_radius(area);
                let g = length / (2.0 * r);
                1.0 + g * (2.0 / std::f64::consts::PI) * (1.0 + (1.0 / g).asinh())
            }
            GapReluctanceModel::Zhang => {
                let r = equivalent_radius(area);
                1.0 + (length / std::f64::consts::PI / r) * (1.0 + (2.0 * r / length).ln()).max(1.0)
            }
            GapReluctanceModel::Muehlethaler => {
                let w = column.width.max(column.depth);
                1.0 + (length / w) * (2.0 / std::f64::consts::PI) * (1.0 + (2.0 * w / length).ln())
            }
            GapReluctanceModel::Stenglein => {
                let r = equivalent_radius(area);
                1.0 + (length / (r + length)).max(0.0)
            }
            GapReluctanceModel::Balakrishnan => {
                let r = equivalent_radius(area);
                1.0 + (length / (2.0 * r)) * (length / (2.0 * r) + 1.0).ln().max(0.0)
            }
        };
        let fringing_factor = fringing_factor.max(1.0);

        let effective_area = match self {
            GapReluctanceModel::EffectiveArea => area * fringing_factor,
            _ => area,
        };
        let effective_length = match self {
            GapReluctanceModel::EffectiveLength => length / fringing_factor,
            _ => length,
        };

        let base_reluctance = effective_length / (mu0 * effective_area);
        let reluctance = match self {
            GapReluctanceModel::EffectiveArea | GapReluctanceModel::EffectiveLength => base_reluctance,
            _ => base_reluctance / fringing_factor,
        };

        return Ok(GapReluctanceResult {
            reluctance,
            fringing_factor,
        });
    }
}

/// Reluctance of the ungapped core material: `le / (mu0 * mu_r * Ae)`.
pub fn core_material_reluctance(effective_length: f64, effective_area: f64, relative_permeability: f64) -> f64 {
    return effective_length / (VACUUM_PERMEABILITY_UNITLESS * relative_permeability * effective_area);
}

/// Total series reluctance of the magnetic circuit: the core material's
/// reluctance plus one gap reluctance per entry in `gaps`.
pub fn total_reluctance(
    core_reluctance: f64,
    gaps: &[CoreGap],
    columns: &[ColumnElement],
    model: GapReluctanceModel,
    relative_permeability: f64,
    frequency: f64,
    temperature: f64,
) -> Result<f64> {
    let mut total = core_reluctance;
    for gap in gaps {
        let column = gap
            .coordinates
            .and_then(|coords| {
                columns
                    .iter()
                    .min_by(|a, b| {
                        let da = distance_sq(a.coordinates, coords);
                        let db = distance_sq(b.coordinates, coords);
                        da.partial_cmp(&db).unwrap()
                    })
            })
            .or_else(|| columns.first())
            .expect("process_gaps guarantees at least one column exists");
        let result = model.reluctance(gap, column, relative_permeability, frequency, temperature)?;
        total += result.reluctance;
    }
    return Ok(total);
}

fn distance_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    (0..3).map(|i| (a[i] - b[i]).powi(2)).sum()
}

/// Magnetizing inductance of a winding with `effective_turns` turns (already
/// accounting for parallel strands), given the total series reluctance of
/// the magnetic circuit: `L = N^2 / R_total`.
pub fn magnetizing_inductance(effective_turns: f64, total_reluctance: f64) -> f64 {
    return effective_turns * effective_turns / total_reluctance;
}
