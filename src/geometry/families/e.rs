/*!
E-core geometry. Also serves `PLANAR_E`, which is geometrically
identical to `E` at a lower aspect ratio and needs no separate procedure.

Dimension letters, following the vendor-datasheet convention this crate
standardizes on:

- `A`: overall width of a piece.
- `B`: overall height of a piece.
- `C`: central column width.
- `D`: winding window height.
- `E`: winding window width, one side of the central column.
- `F`: central column depth.
*/

use crate::dimension::DimensionMap;
use crate::error::{Error, Result};
use crate::geometry::{ColumnElement, ColumnShape, ColumnType, FamilyGeometry, WindingWindowElement};

fn dim(dimensions: &DimensionMap, letter: &str) -> Result<f64> {
    dimensions
        .get(letter)
        .and_then(|d| d.nominal)
        .ok_or_else(|| Error::InvalidGeometry(format!("missing dimension {letter}")))
}

/// [`FamilyGeometry`] for the E core family (and `PLANAR_E` by delegation).
pub struct EGeometry;

impl FamilyGeometry for EGeometry {
    fn process_extra_data(&self, dimensions: &DimensionMap) -> Result<(f64, f64, f64)> {
        let width = dim(dimensions, "A")?;
        let height = dim(dimensions, "B")?;
        let depth = dim(dimensions, "F")?;
        return Ok((width, height, depth));
    }

    fn process_winding_window(&self, dimensions: &DimensionMap) -> Result<WindingWindowElement> {
        let d = dim(dimensions, "D")?;
        let e = dim(dimensions, "E")?;
        // Two symmetric windows, one on either side of the central column.
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

        let central = ColumnElement {
            column_type: ColumnType::Central,
            shape: ColumnShape::Rectangular,
            width: c,
            depth: f,
            height: d,
            area: c * f,
            coordinates: [0.0, 0.0, 0.0],
            minimum_width: None,
        };

        let lateral_width = c / 2.0;
        let lateral_x = c / 2.0 + e + lateral_width / 2.0;
        let lateral = |sign: f64| ColumnElement {
            column_type: ColumnType::Lateral,
            shape: ColumnShape::Rectangular,
            width: lateral_width,
            depth: f,
            height: d,
            area: lateral_width * f,
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

        let c1 = d / central_area + d / lateral_area;
        let c2 = d / (central_area * central_area) + d / (lateral_area * lateral_area);
        return Ok((c1, c2));
    }
}
