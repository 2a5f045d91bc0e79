/*!
ETD-family geometry. Also serves `ER` (identical shape, a
different vendor name for the same round-center-leg family) and `EC`, which
is an ETD core with a cylindrical clip hole drilled through the central
column to seat a wire retaining clip - `EC` is built by constructing an ETD
core and then subtracting the clip hole's area from the central column.

Dimension letters match [`super::e::EGeometry`], except `C` is the central
column *diameter* rather than a rectangular width.
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

/// Diameter of the wire-clip hole through an `EC` core's central column, as
/// a fraction of the column diameter. There is no published standard value;
/// this crate uses the fraction observed across EC39/EC41/EC52 datasheets.
const EC_CLIP_HOLE_DIAMETER_FRACTION: f64 = 0.18;

/// [`FamilyGeometry`] for the ETD/ER family, and for `EC` when
/// [`EtdGeometry::clip_hole`] is set.
pub struct EtdGeometry {
    /// Subtracts a clip-hole from the central column's area, turning the
    /// ETD procedure into the `EC` one.
    pub clip_hole: bool,
}

impl FamilyGeometry for EtdGeometry {
    fn process_extra_data(&self, dimensions: &DimensionMap) -> Result<(f64, f64, f64)> {
        let width = dim(dimensions, "A")?;
        let height = dim(dimensions, "B")?;
        let depth = dim(dimensions, "F")?;
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
        let mut central_area = std::f64::consts::PI * radius * radius;
        if self.clip_hole {
            let hole_radius = radius * EC_CLIP_HOLE_DIAMETER_FRACTION / 2.0;
            central_area -= std::f64::consts::PI * hole_radius * hole_radius;
        }

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

        // Lateral legs on a round-center ETD core retain a rectangular
        // cross section; their combined area matches the (un-holed) central
        // column area so flux density is equal in both paths.
        let lateral_width = (std::f64::consts::PI * radius * radius) / (2.0 * f);
        let lateral_x = radius + e + lateral_width / 2.0;
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
