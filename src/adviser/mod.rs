/*!
The adviser / filter pipeline (§4.8): rank candidate [`Magnetic`]s by a
weighted composition of [`filters::FilterKind`] scores.

Candidate evaluation is the one place this crate parallelizes (§5: "parallel
at the top of the pipeline, disjoint candidates, private copies") - grounded
on `diodeinc-pcb`'s use of `rayon` for independent per-file work.

Candidate enumeration (which population of core shapes a batch is drawn
from - cores present in a loaded catalog, a fixed standardized-shape list, or
caller-supplied custom geometries) is the caller's responsibility: `rank`
takes an already-built `Vec<Candidate>` and never reaches into a shape
catalog itself. Building that batch from a [`crate::catalog::Catalog`] is
left to the caller's own enumeration, matched to whichever population it
wants to draw from.
*/

pub mod filters;

pub use filters::{normalize, FilterKind, FilterOperation};

use crate::error::Result;
use crate::magnetic::Magnetic;
use crate::mas::{Inputs, Outputs};
use rayon::prelude::*;

/// One candidate submitted to the adviser: a fully synthesized `Magnetic`
/// plus its simulated `Outputs`, one entry per `inputs.operating_points`
/// (absent when the caller has not run the simulator yet - loss/temperature
/// filters then see a raw score of zero rather than failing the batch).
pub struct Candidate {
    /// The candidate device.
    pub magnetic: Magnetic,
    /// Simulated outputs, if available.
    pub outputs: Option<Vec<Outputs>>,
}

/// A ranked candidate in an adviser result.
pub struct RankedCandidate {
    /// The candidate device.
    pub magnetic: Magnetic,
    /// Final weighted, normalized score in `[0, 1]` (higher is better).
    pub score: f64,
}

/// Runs the three-step pipeline of §4.8 over a batch of candidates:
/// evaluate every filter per candidate (in parallel), normalize each
/// filter's raw scores across the batch, then combine into one weighted
/// total per candidate and return the top `top_k` by descending score.
///
/// A candidate failing any `strictly_required` filter (a non-finite
/// transformed score) is discarded rather than penalized.
pub struct Adviser {
    /// The filters composing the total score, in no particular order.
    pub filters: Vec<FilterOperation>,
}

impl Adviser {
    /// Builds an adviser over `filters`.
    pub fn new(filters: Vec<FilterOperation>) -> Self {
        return Self { filters };
    }

    /// Ranks `candidates` against `inputs`, returning at most `top_k`
    /// entries sorted by descending score.
    pub fn rank(&self, candidates: Vec<Candidate>, inputs: &Inputs, top_k: usize) -> Result<Vec<RankedCandidate>> {
        let raw_matrix: Vec<Result<Vec<f64>>> = candidates
            .par_iter()
            .map(|candidate| {
                self.filters
                    .iter()
                    .map(|op| op.kind.evaluate(&candidate.magnetic, inputs, candidate.outputs.as_deref()))
                    .collect::<Result<Vec<f64>>>()
            })
            .collect();

        let mut raw_scores = Vec::with_capacity(candidates.len());
        for result in raw_matrix {
            raw_scores.push(result?);
        }

        let num_filters = self.filters.len();
        let mut transformed: Vec<Vec<Option<f64>>> = Vec::with_capacity(candidates.len());
        for row in &raw_scores {
            let mut transformed_row = Vec::with_capacity(num_filters);
            for (filter_index, op) in self.filters.iter().enumerate() {
                transformed_row.push(op.transform(row[filter_index]));
            }
            transformed.push(transformed_row);
        }

        let survivors: Vec<usize> = (0..candidates.len())
            .filter(|&i| {
                self.filters.iter().enumerate().all(|(filter_index, op)| {
                    let ok = !op.strictly_required || transformed[i][filter_index].is_some();
                    if !ok {
                        log::debug!("candidate {i} vetoed by strictly required filter {:?}", op.kind);
                    }
                    ok
                })
            })
            .collect();

        log::debug!("{}/{} candidates survived strictly required filters", survivors.len(), candidates.len());

        if survivors.is_empty() {
            return Ok(Vec::new());
        }

        let mut normalized_columns = vec![vec![0.0; survivors.len()]; num_filters];
        for filter_index in 0..num_filters {
            let worst_observed = survivors
                .iter()
                .filter_map(|&i| transformed[i][filter_index])
                .fold(f64::NEG_INFINITY, f64::max);
            let column: Vec<f64> = survivors
                .iter()
                .map(|&i| transformed[i][filter_index].unwrap_or(worst_observed))
                .collect();
            normalized_columns[filter_index] = normalize(&column);
        }

        let total_weight: f64 = self.filters.iter().map(|f| f.weight).sum::<f64>().max(1e-12);
        let mut scored: Vec<(usize, f64)> = survivors
            .iter()
            .enumerate()
            .map(|(row, &candidate_index)| {
                let score: f64 = self
                    .filters
                    .iter()
                    .enumerate()
                    .map(|(filter_index, op)| op.weight * normalized_columns[filter_index][row])
                    .sum::<f64>()
                    / total_weight;
                (candidate_index, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        let mut candidates_by_index: Vec<Option<Magnetic>> = candidates.into_iter().map(|c| Some(c.magnetic)).collect();
        let mut ranked = Vec::with_capacity(scored.len());
        for (candidate_index, score) in scored {
            if let Some(magnetic) = candidates_by_index[candidate_index].take() {
                ranked.push(RankedCandidate { magnetic, score });
            }
        }
        return Ok(ranked);
    }
}

/// Expands `candidates` with material-substituted copies (e.g. ferrite to
/// powder) whenever the design stores more energy than `ferrite_energy_limit`
/// (the highest available ferrite's saturation energy, computed by the
/// caller). Each substituted copy keeps the original geometry and coil,
/// swapping only the core's material name.
pub fn expand_with_material_substitution(
    candidates: Vec<Candidate>,
    required_energy: f64,
    ferrite_energy_limit: f64,
    substitute_material: &str,
) -> Vec<Candidate> {
    if required_energy <= ferrite_energy_limit {
        return candidates;
    }
    let mut expanded = Vec::with_capacity(candidates.len() * 2);
    for candidate in candidates {
        let mut substituted = candidate.magnetic.clone();
        substituted.core.functional_description.material_name = substitute_material.to_string();
        expanded.push(Candidate {
            magnetic: substituted,
            outputs: None,
        });
        expanded.push(candidate);
    }
    return expanded;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coil::{Coil, CoilFunctionalDescription, IsolationSide};
    use crate::core::{Core, CoreType};
    use crate::dimension::{DimensionMap, DimensionWithTolerance};
    use crate::geometry::CorePiece;
    use crate::mas::{DesignRequirements, ExcitationSignal, OperatingPoint, OperatingPointConditions, WindingExcitation};
    use crate::shape::{CoreShape, CoreShapeFamily};
    use crate::waveform::{Waveform, WaveformLabel};
    use crate::wire::Wire;
    use uom::si::f64::{Frequency, Inductance, ThermodynamicTemperature};

    fn etd_shape() -> CoreShape {
        let mut dimensions = DimensionMap::new();
        dimensions.insert("A".into(), DimensionWithTolerance::from_nominal(0.0391));
        dimensions.insert("B".into(), DimensionWithTolerance::from_nominal(0.0206));
        dimensions.insert("C".into(), DimensionWithTolerance::from_nominal(0.0119));
        dimensions.insert("D".into(), DimensionWithTolerance::from_nominal(0.0121));
        dimensions.insert("E".into(), DimensionWithTolerance::from_nominal(0.0292));
        dimensions.insert("F".into(), DimensionWithTolerance::from_nominal(0.0156));
        return CoreShape {
            name: "ETD 39".into(),
            family: CoreShapeFamily::Etd,
            family_subtype: String::new(),
            dimensions,
        };
    }

    fn sample_candidate(number_turns: usize) -> Candidate {
        let shape = etd_shape();
        let mut core = Core::new("ETD 39", "N87", CoreType::TwoPieceSet);
        core.process_data(&shape).unwrap();

        let window = core.processed_description.as_ref().unwrap().winding_windows[0];
        let winding = CoilFunctionalDescription {
            name: "primary".into(),
            isolation_side: IsolationSide::Primary,
            number_turns,
            number_parallels: 1,
            wire: Wire::Round {
                name: "AWG 28".into(),
                conducting_diameter: 0.0003,
                coating: None,
                outer_diameter: 0.00032,
            },
        };
        let coil = Coil::synthesize(vec![winding], &window, 0.005, 0.005).unwrap();

        return Candidate {
            magnetic: Magnetic { core, coil },
            outputs: None,
        };
    }

    fn sample_inputs() -> Inputs {
        let op = OperatingPoint {
            conditions: OperatingPointConditions {
                ambient_temperature: ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(25.0),
                forced_cooling: false,
            },
            excitations: vec![WindingExcitation {
                winding_name: "primary".into(),
                frequency: Frequency::new::<uom::si::frequency::hertz>(100_000.0),
                voltage: ExcitationSignal::from_waveform(Waveform::new(vec![0.0, 1e-5], vec![10.0, 10.0], WaveformLabel::Custom)),
                current: ExcitationSignal::from_waveform(Waveform::new(vec![0.0, 1e-5], vec![1.0, 1.0], WaveformLabel::Custom)),
            }],
        };
        return Inputs {
            design_requirements: DesignRequirements {
                magnetizing_inductance: Inductance::new::<uom::si::inductance::henry>(1e-4),
                turns_ratios: vec![],
                isolation_sides: vec![IsolationSide::Primary],
                topology: None,
            },
            operating_points: vec![op],
        };
    }

    #[test]
    fn rank_prefers_smaller_volume_when_that_is_the_only_filter() {
        let inputs = sample_inputs();
        let candidates = vec![sample_candidate(10), sample_candidate(40)];
        let adviser = Adviser::new(vec![FilterOperation::scored(FilterKind::Volume, 1.0).inverted()]);
        let ranked = adviser.rank(candidates, &inputs, 5).unwrap();
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn strictly_required_filter_can_empty_the_batch() {
        let inputs = sample_inputs();
        let candidates = vec![sample_candidate(10)];
        let adviser = Adviser::new(vec![FilterOperation::scored(FilterKind::Volume, 1.0).inverted().required()]);
        // A zero-volume "candidate" would be vetoed; volume is always
        // positive here, so this just exercises the survivor path.
        let ranked = adviser.rank(candidates, &inputs, 5).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn material_substitution_is_skipped_below_the_energy_limit() {
        let candidates = vec![sample_candidate(10)];
        let expanded = expand_with_material_substitution(candidates, 1.0, 10.0, "powder");
        assert_eq!(expanded.len(), 1);
    }

    #[test]
    fn material_substitution_doubles_the_batch_above_the_limit() {
        let candidates = vec![sample_candidate(10), sample_candidate(20)];
        let expanded = expand_with_material_substitution(candidates, 10.0, 1.0, "powder");
        assert_eq!(expanded.len(), 4);
    }
}
