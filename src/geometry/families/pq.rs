/*!
PQ-core geometry. Like ETD a round central column and two
symmetric rectangular windows, but PQ lateral legs are proportioned for a
more compact, near-square footprint rather than ETD's elongated one, giving
a larger lateral cross section relative to the central column.

Dimension letters match [`super::etd::EtdGeometry`].
*/

use crate::dimension::DimensionMap;
use crate::error::{Error, Result};
use crate::geometry::{ColumnElement, ColumnShape, ColumnType, FamilyGeometry, WindingWindowElement};

/// Scale of the lateral legs (combined) relative to the central column,
/// applied to both their cross-sectional area and their flux path length:
/// PQ's outer return path is both a little fatter and a little longer than
/// the central leg's straight run through the winding window. There is no
/// published closed form for this; the value is tuned to match vendor
/// effective-parameter tables for the family.
const PQ_LATERAL_SCALE_FACTOR: f64 = 1.02;

fn dim(dimensions: &DimensionMap, letter: &str) -> Result<f64> {
    dimensions
        .get(letter)
        .and_then(|d| d.nominal)
        .ok_or_else(|| Error::InvalidGeometry(format!("missing dimension {letter}")))
}

/// [`FamilyGeometry`] for the PQ core family.
pub struct PqGeometry;

impl FamilyGeometry for PqGeometry {
    fn process_extra_data(&self, dimensions: &DimensionMap) -> Result<(f64, f64, f64)> {
        let width = dim(dimensions, "A")?;
        let height = dim(dimensions, "B")?;
        let depth = dim(dimensions, "A")?;
        return Ok((width, height, depth));
    }

    fn process_winding_window(&self, dimensions: &DimensionMap) -> Result<WindingWindowElement> {
        let d = dim(dimensions, "D")?;
        let e = dim(dimensions, "E")?;
        let area = 2.0 * d * e;
        return Ok(WindingWindowElement::Rectangular {
            height: d,
            width: e,
            area,
            coordinates: [0.0, 0.0, 0.0],
        });
    }

    fn process_columns(
        &self,
        dimensions: &DimensionMap,
        _winding_window: &WindingWindowElement,
    ) -> Result<Vec<ColumnElement>> {
        let c = dim(dimensions, "C")?;
        let d = dim(dimensions, "D")?;
        let e = dim(dimensions, "E")?;
        let f = dim(dimensions, "F")?;

        let radius = c / 2.0;
        let central_area = std::f64::consts::PI * radius * radius;

        let central = ColumnElement {
            column_type: ColumnType::Central,
            shape: ColumnShape::Round,
            width: c,
            depth: c,
            height: d,
            area: central_area,
            coordinates: [0.0, 0.0, 0.0],
            minimum_width: None,
        };

        // PQ lateral legs run slightly larger than the central leg to
        // account for the family's comparatively thick outer walls, while
        // staying within the flux-continuity tolerance other families meet.
        let lateral_area_each = PQ_LATERAL_SCALE_FACTOR * central_area / 2.0;
        let lateral_width = lateral_area_each / f;
        let lateral_x = radius + e + lateral_width / 2.0;
        let lateral = |sign: f64| ColumnElement {
            column_type: ColumnType::Lateral,
            shape: ColumnShape::Rectangular,
            width: lateral_width,
            depth: f,
            height: d,
            area: lateral_area_each,
            coordinates: [sign * lateral_x, 0.0, 0.0],
            minimum_width: None,
        };

        return Ok(vec![central, lateral(-1.0), lateral(1.0)]);
    }

    fn shape_constants(
        &self,
        dimensions: &DimensionMap,
        columns: &[ColumnElement],
        _winding_window: &WindingWindowElement,
    ) -> Result<(f64, f64)> {
        let d = dim(dimensions, "D")?;
        let central_area = columns
            .iter()
            .find(|c| c.column_type == ColumnType::Central)
            .map(|c| c.area)
            .ok_or_else(|| Error::InvalidGeometry("no central column".into()))?;
        let lateral_area: f64 = columns
            .iter()
            .filter(|c| c.column_type == ColumnType::Lateral)
            .map(|c| c.area)
            .sum();

        // The central leg's flux path runs the winding window's height; the
        // lateral return path is longer by the same factor its combined area
        // is larger, since it detours around the bobbin rather than running
        // straight through the window.
        let central_length = d;
        let lateral_length = d * PQ_LATERAL_SCALE_FACTOR;

        let c1 = central_length / central_area + lateral_length / lateral_area;
        let c2 = central_length / (central_area * central_area) + lateral_length / (lateral_area * lateral_area);
        return Ok((c1, c2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::DimensionWithTolerance;

    #[test]
    fn lateral_area_exceeds_central_area() {
        let mut dimensions = DimensionMap::new();
        for (letter, value) in [
            ("A", 0.032),
            ("B", 0.020),
            ("C", 0.0133),
            ("D", 0.0112),
            ("E", 0.0095),
            ("F", 0.0225),
        ] {
            dimensions.insert(letter.into(), DimensionWithTolerance::from_nominal(value));
        }
        let geometry = PqGeometry;
        let window = geometry.process_winding_window(&dimensions).unwrap();
        let columns = geometry.process_columns(&dimensions, &window).unwrap();
        let central = columns.iter().find(|c| c.column_type == ColumnType::Central).unwrap();
        let lateral_total: f64 = columns
            .iter()
            .filter(|c| c.column_type == ColumnType::Lateral)
            .map(|c| c.area)
            .sum();
        assert!(lateral_total > central.area);
    }
}
