/*!
Gap functional description and the gap processor.

A [`CoreGap`] as read from a catalog or a converter-derived design is mostly
unprocessed: it may carry only a `length` and a [`GapType`], with coordinates
left for [`process_gaps`] to fill in once the core's columns are known. See
§4.3 of the magnetic design engine specification for the exact policy this
module implements.
*/

use crate::error::{Error, Result};
use crate::geometry::{ColumnElement, ColumnShape, ColumnType};

/// Kind of magnetic-path discontinuity a [`CoreGap`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GapType {
    /// A spacer inserted between the two halves of a two-piece core.
    Additive,
    /// Machined into a column.
    Subtractive,
    /// The unavoidable joint gap left by grinding/lapping tolerances.
    Residual,
}

/// A single gap along the magnetic path, either as read from a functional
/// description (only `gap_type` and `length` need be present) or as fully
/// resolved by [`process_gaps`] (every field present).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreGap {
    /// Kind of discontinuity.
    pub gap_type: GapType,
    /// Gap length, in meters.
    pub length: f64,
    /// Coordinates of the gap center, once resolved against a column.
    #[cfg_attr(feature = "serde", serde(default))]
    pub coordinates: Option<[f64; 3]>,
    /// Cross-sectional shape of the column the gap sits in.
    #[cfg_attr(feature = "serde", serde(default))]
    pub column_shape: Option<ColumnShape>,
    /// Distance to the closest normal (perpendicular to flux) surface, in
    /// meters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_to_closest_normal_surface: Option<f64>,
    /// Distance to the closest parallel surface, in meters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_to_closest_parallel_surface: Option<f64>,
    /// Cross-sectional area of the column at the gap, in square meters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: Option<f64>,
    /// Section dimensions `[width, depth]` of the column at the gap.
    #[cfg_attr(feature = "serde", serde(default))]
    pub section_dimensions: Option<[f64; 2]>,
}

impl CoreGap {
    /// A minimal gap carrying only its type and length - the shape the
    /// functional description is allowed to supply before processing.
    pub fn unresolved(gap_type: GapType, length: f64) -> Self {
        return Self {
            gap_type,
            length,
            coordinates: None,
            column_shape: None,
            distance_to_closest_normal_surface: None,
            distance_to_closest_parallel_surface: None,
            area: None,
            section_dimensions: None,
        };
    }

    /// `true` once every field the processor is responsible for has been
    /// filled in.
    pub fn is_fully_resolved(&self) -> bool {
        return self.coordinates.is_some()
            && self.distance_to_closest_normal_surface.is_some()
            && self.distance_to_closest_parallel_surface.is_some()
            && self.area.is_some()
            && self.section_dimensions.is_some();
    }
}

/// The system-wide length (in meters) used for the residual gap emitted when
/// a `Core`'s functional gapping list is empty.
pub const DEFAULT_RESIDUAL_GAP_LENGTH: f64 = 1.0e-5;

fn winding_column_index(columns: &[ColumnElement]) -> Option<usize> {
    columns
        .iter()
        .position(|c| c.column_type == ColumnType::Central)
        .or_else(|| columns.iter().position(|c| c.column_type == ColumnType::Lateral))
}

fn attach_to_column(gap: CoreGap, column: &ColumnElement) -> CoreGap {
    let half_height = column.height / 2.0;
    CoreGap {
        coordinates: Some(column.coordinates),
        column_shape: Some(column.shape),
        distance_to_closest_normal_surface: Some(half_height - gap.length / 2.0),
        distance_to_closest_parallel_surface: Some(
            (column.width.min(column.depth)) / 2.0,
        ),
        area: Some(column.area),
        section_dimensions: Some([column.width, column.depth]),
        ..gap
    }
}

/// `true` if `gap`'s coordinates (if any) fall exactly on one of `columns`.
fn is_aligned(gap: &CoreGap, columns: &[ColumnElement]) -> bool {
    match gap.coordinates {
        None => false,
        Some(coords) => columns.iter().any(|c| {
            (c.coordinates[0] - coords[0]).abs() < 1e-9
                && (c.coordinates[2] - coords[2]).abs() < 1e-9
        }),
    }
}

/// Resolves `functional_gaps` against `columns`, emitting a fully-specified
/// gapping list per the §4.3 policy:
///
/// 1. Zero gaps → one [`GapType::Residual`] gap at every column.
/// 2. Fewer gaps than columns → broadcast the last gap.
/// 3. Residual-only, or one non-residual gap per column with matching
///    counts → attach one-to-one by index.
/// 4. Otherwise → split into winding column (subtractive + additive, evenly
///    spaced) and return columns (residual, broadcasting the last).
/// 5. If any existing gap is misaligned, discard and re-run 1-4.
pub fn process_gaps(functional_gaps: &[CoreGap], columns: &[ColumnElement]) -> Result<Vec<CoreGap>> {
    if columns.is_empty() {
        return Err(Error::InvalidGeometry("cannot gap a core with no columns".into()));
    }

    let misaligned = functional_gaps
        .iter()
        .any(|g| g.coordinates.is_some() && !is_aligned(g, columns));

    if misaligned {
        let stripped: Vec<CoreGap> = functional_gaps
            .iter()
            .map(|g| CoreGap::unresolved(g.gap_type, g.length))
            .collect();
        log::warn!("gap list is misaligned against processed columns; redistributing");
        return process_gaps(&stripped, columns);
    }

    if functional_gaps.is_empty() {
        return Ok(columns
            .iter()
            .map(|c| attach_to_column(CoreGap::unresolved(GapType::Residual, DEFAULT_RESIDUAL_GAP_LENGTH), c))
            .collect());
    }

    if functional_gaps.len() < columns.len() {
        let last = functional_gaps.last().unwrap();
        return Ok(columns
            .iter()
            .map(|c| attach_to_column(*last, c))
            .collect());
    }

    let all_residual = functional_gaps.iter().all(|g| g.gap_type == GapType::Residual);
    let all_non_residual = functional_gaps.iter().all(|g| g.gap_type != GapType::Residual);
    let one_per_column_non_residual_ok = all_non_residual && functional_gaps.len() == columns.len();

    if (all_residual || one_per_column_non_residual_ok) && functional_gaps.len() == columns.len() {
        return Ok(functional_gaps
            .iter()
            .zip(columns.iter())
            .map(|(g, c)| attach_to_column(*g, c))
            .collect());
    }

    // Split into winding column (subtractive + additive) and return columns (residual).
    let winding_idx = winding_column_index(columns)
        .ok_or_else(|| Error::InvalidGeometry("no column available to host gaps".into()))?;
    let return_columns: Vec<&ColumnElement> = columns
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != winding_idx)
        .map(|(_, c)| c)
        .collect();

    let winding_gaps: Vec<&CoreGap> = functional_gaps
        .iter()
        .filter(|g| g.gap_type == GapType::Subtractive || g.gap_type == GapType::Additive)
        .collect();
    let residual_gaps: Vec<&CoreGap> = functional_gaps
        .iter()
        .filter(|g| g.gap_type == GapType::Residual)
        .collect();

    let winding_column = &columns[winding_idx];
    let mut resolved = Vec::new();

    let n = winding_gaps.len();
    if n > 0 {
        let chunk = winding_column.height / (n as f64 + 1.0);
        for (i, gap) in winding_gaps.iter().enumerate() {
            let offset = chunk * (i as f64) - chunk * (n as f64 - 1.0) / 2.0;
            let mut coords = winding_column.coordinates;
            coords[1] += offset;
            let mut shifted_column = *winding_column;
            shifted_column.coordinates = coords;
            resolved.push(attach_to_column(**gap, &shifted_column));
        }
    }

    if !return_columns.is_empty() {
        if residual_gaps.is_empty() {
            for column in &return_columns {
                resolved.push(attach_to_column(
                    CoreGap::unresolved(GapType::Residual, DEFAULT_RESIDUAL_GAP_LENGTH),
                    column,
                ));
            }
        } else {
            for (i, column) in return_columns.iter().enumerate() {
                let gap = residual_gaps.get(i).copied().unwrap_or(*residual_gaps.last().unwrap());
                resolved.push(attach_to_column(*gap, column));
            }
        }
    }

    return Ok(resolved);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(column_type: ColumnType, height: f64, x: f64) -> ColumnElement {
        ColumnElement {
            column_type,
            shape: ColumnShape::Round,
            width: 0.01,
            depth: 0.01,
            height,
            area: 7.85e-5,
            coordinates: [x, 0.0, 0.0],
            minimum_width: None,
        }
    }

    fn e_core_columns() -> Vec<ColumnElement> {
        vec![
            column(ColumnType::Central, 0.02, 0.0),
            column(ColumnType::Lateral, 0.02, -0.02),
            column(ColumnType::Lateral, 0.02, 0.02),
        ]
    }

    #[test]
    fn zero_gaps_emits_one_residual_per_column() {
        let columns = e_core_columns();
        let gaps = process_gaps(&[], &columns).unwrap();
        assert_eq!(gaps.len(), columns.len());
        assert!(gaps.iter().all(|g| g.gap_type == GapType::Residual));
        assert!(gaps.iter().all(|g| g.is_fully_resolved()));
    }

    #[test]
    fn one_gap_broadcasts_to_all_columns() {
        let columns = e_core_columns();
        let gaps = process_gaps(&[CoreGap::unresolved(GapType::Subtractive, 0.001)], &columns).unwrap();
        assert_eq!(gaps.len(), columns.len());
        assert!(gaps.iter().all(|g| g.length == 0.001));
    }

    #[test]
    fn matching_counts_attach_one_to_one() {
        let columns = e_core_columns();
        let functional = vec![
            CoreGap::unresolved(GapType::Subtractive, 0.001),
            CoreGap::unresolved(GapType::Residual, 1e-5),
            CoreGap::unresolved(GapType::Residual, 1e-5),
        ];
        let gaps = process_gaps(&functional, &columns).unwrap();
        assert_eq!(gaps.len(), 3);
        assert_eq!(gaps[0].gap_type, GapType::Subtractive);
        assert_eq!(gaps[0].coordinates.unwrap(), columns[0].coordinates);
    }

    #[test]
    fn mixed_types_with_matching_counts_fall_through_to_split() {
        let columns = e_core_columns();
        let functional = vec![
            CoreGap::unresolved(GapType::Residual, 1e-5),
            CoreGap::unresolved(GapType::Subtractive, 0.001),
            CoreGap::unresolved(GapType::Residual, 1e-5),
        ];
        let gaps = process_gaps(&functional, &columns).unwrap();
        assert_eq!(gaps.len(), 3);
        let subtractive = gaps.iter().find(|g| g.gap_type == GapType::Subtractive).unwrap();
        assert_eq!(subtractive.coordinates.unwrap()[0], columns[0].coordinates[0]);
        assert!(gaps
            .iter()
            .filter(|g| g.gap_type == GapType::Residual)
            .all(|g| g.coordinates.unwrap()[0] != columns[0].coordinates[0]));
    }

    #[test]
    fn distributed_gaps_center_on_winding_column() {
        let columns = e_core_columns();
        let functional = vec![
            CoreGap::unresolved(GapType::Subtractive, 0.0005),
            CoreGap::unresolved(GapType::Subtractive, 0.0005),
            CoreGap::unresolved(GapType::Residual, 1e-5),
        ];
        let gaps = process_gaps(&functional, &columns).unwrap();
        let winding_gaps: Vec<_> = gaps.iter().filter(|g| g.gap_type == GapType::Subtractive).collect();
        assert_eq!(winding_gaps.len(), 2);
        let ys: Vec<f64> = winding_gaps.iter().map(|g| g.coordinates.unwrap()[1]).collect();
        approx::assert_abs_diff_eq!(ys[0], -ys[1], epsilon = 1e-12);
    }

    #[test]
    fn misaligned_gap_is_redistributed() {
        let columns = e_core_columns();
        let mut gap = CoreGap::unresolved(GapType::Subtractive, 0.001);
        gap.coordinates = Some([5.0, 5.0, 5.0]);
        let gaps = process_gaps(&[gap], &columns).unwrap();
        assert_eq!(gaps.len(), columns.len());
        assert!(gaps.iter().all(|g| g.is_fully_resolved()));
    }
}
