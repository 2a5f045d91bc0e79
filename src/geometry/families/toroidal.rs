/*!
Toroidal-core geometry. A single closed magnetic loop: one
column (the ring itself) and one annular winding window, described by its
usable radius and angular span rather than a rectangular height/width.

Dimension letters:

- `A`: outer diameter.
- `B`: inner diameter.
- `C`: height (the stack direction).
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

/// [`FamilyGeometry`] for toroidal (ring) cores.
pub struct ToroidalGeometry;

impl FamilyGeometry for ToroidalGeometry {
    fn process_extra_data(&self, dimensions: &DimensionMap) -> Result<(f64, f64, f64)> {
        let outer = dim(dimensions, "A")?;
        let height = dim(dimensions, "C")?;
        return Ok((outer, height, outer));
    }

    fn process_winding_window(&self, dimensions: &DimensionMap) -> Result<WindingWindowElement> {
        let inner = dim(dimensions, "B")?;
        let radial_height = inner / 2.0;
        let area = std::f64::consts::PI * radial_height * radial_height;
        return Ok(WindingWindowElement::Toroidal {
            radial_height,
            angle: 2.0 * std::f64::consts::PI,
            area,
            coordinates: [0.0, 0.0, 0.0],
        });
    }

    fn process_columns(
        &self,
        dimensions: &DimensionMap,
        _winding_window: &WindingWindowElement,
    ) -> Result<Vec<ColumnElement>> {
        let outer = dim(dimensions, "A")?;
        let inner = dim(dimensions, "B")?;
        let height = dim(dimensions, "C")?;

        let radial_width = (outer - inner) / 2.0;
        let ring = ColumnElement {
            column_type: ColumnType::Central,
            shape: ColumnShape::Rectangular,
            width: radial_width,
            depth: std::f64::consts::PI * (outer + inner) / 2.0,
            height,
            area: radial_width * height,
            coordinates: [0.0, 0.0, 0.0],
            minimum_width: None,
        };
        return Ok(vec![ring]);
    }

    fn shape_constants(
        &self,
        dimensions: &DimensionMap,
        columns: &[ColumnElement],
        _winding_window: &WindingWindowElement,
    ) -> Result<(f64, f64)> {
        let outer = dim(dimensions, "A")?;
        let inner = dim(dimensions, "B")?;
        let mean_diameter = (outer + inner) / 2.0;
        let path_length = std::f64::consts::PI * mean_diameter;
        let area = columns
            .first()
            .map(|c| c.area)
            .ok_or_else(|| Error::InvalidGeometry("toroidal core has no ring column".into()))?;

        let c1 = path_length / area;
        let c2 = path_length / (area * area);
        return Ok((c1, c2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::DimensionWithTolerance;

    #[test]
    fn single_ring_column_with_toroidal_window() {
        let mut dimensions = DimensionMap::new();
        for (letter, value) in [("A", 0.025), ("B", 0.015), ("C", 0.010)] {
            dimensions.insert(letter.into(), DimensionWithTolerance::from_nominal(value));
        }
        let geometry = ToroidalGeometry;
        let window = geometry.process_winding_window(&dimensions).unwrap();
        let columns = geometry.process_columns(&dimensions, &window).unwrap();
        assert_eq!(columns.len(), 1);
        assert!(matches!(window, WindingWindowElement::Toroidal { .. }));
    }
}
