/*!
CorePiece geometry engine.

Each [`crate::shape::CoreShapeFamily`] has a concrete geometry procedure
implementing the [`FamilyGeometry`] trait's four responsibilities:
flattening the raw dimensions, sizing the winding window, emitting the
column list and computing the magnetic shape constants. [`CorePiece::factory`]
dispatches on `shape.family` and then runs the fixed pipeline: flatten →
winding window → columns → extra data → compute constants → store effective
parameters.

A representative subset of families is implemented in full
(`families::e`, `families::etd`, `families::pq`, `families::toroidal`); the
remaining enum variants delegate to the nearest documented equivalent
(`PLANAR_E ≡ E`, `ER ≡ ETD`, `EC ≡ ETD` with a clip-hole correction) where one
exists. Every other family has no geometry procedure at all: dispatching on
it returns [`Error::InvalidGeometry`] rather than reusing a different
family's formulas. See [`CorePiece::factory`].
*/

pub mod families;

use crate::dimension::{flatten_dimensions, DimensionMap};
use crate::error::{Error, Result};
use crate::shape::{CoreShape, CoreShapeFamily};

/// The kind of a [`ColumnElement`] within the assembled magnetic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnType {
    /// The single central column a flux path runs through once per loop
    /// (absent for U/UT cores).
    Central,
    /// One of the (usually two) outer return columns.
    Lateral,
}

/// Cross-sectional shape of a [`ColumnElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnShape {
    /// Rectangular cross section.
    Rectangular,
    /// Round (circular) cross section.
    Round,
    /// Oblong (stadium) cross section.
    Oblong,
    /// Any other cross section whose area is given directly, not derived.
    Irregular,
}

/// A single column (leg) of the assembled magnetic path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnElement {
    /// Central or lateral.
    pub column_type: ColumnType,
    /// Cross-sectional shape.
    pub shape: ColumnShape,
    /// Width along x, in meters.
    pub width: f64,
    /// Depth along z, in meters.
    pub depth: f64,
    /// Height along y (the stack direction), in meters.
    pub height: f64,
    /// Cross-sectional area, in square meters.
    pub area: f64,
    /// Coordinates `[x, y, z]`, centered on the assembled device.
    pub coordinates: [f64; 3],
    /// Minimum width along the column's height, if it tapers (e.g. legs cut
    /// by the winding window radius). Defaults to `width` when absent.
    pub minimum_width: Option<f64>,
}

/// Either a rectangular or a toroidal winding-window description.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingWindowElement {
    /// Rectangular window (E/ETD/PQ/... families).
    Rectangular {
        /// Window height along y, in meters.
        height: f64,
        /// Window width along x, in meters.
        width: f64,
        /// Window area, in square meters.
        area: f64,
        /// Window-center coordinates.
        coordinates: [f64; 3],
    },
    /// Toroidal window, described by its radial extent and angular span.
    Toroidal {
        /// Radial extent available for winding, in meters.
        radial_height: f64,
        /// Angular span available for winding, in radians (usually `2π`).
        angle: f64,
        /// Window area, in square meters.
        area: f64,
        /// Window-center coordinates.
        coordinates: [f64; 3],
    },
}

impl WindingWindowElement {
    /// The window's area, regardless of variant.
    pub fn area(&self) -> f64 {
        match self {
            WindingWindowElement::Rectangular { area, .. } => *area,
            WindingWindowElement::Toroidal { area, .. } => *area,
        }
    }

    /// The window's center coordinates, regardless of variant.
    pub fn coordinates(&self) -> [f64; 3] {
        match self {
            WindingWindowElement::Rectangular { coordinates, .. } => *coordinates,
            WindingWindowElement::Toroidal { coordinates, .. } => *coordinates,
        }
    }
}

/// Effective lumped magnetic parameters of a single core piece, derived from
/// the magnetic shape constants `C1`/`C2`:
///
/// `effective_length = C1² / C2`, `effective_area = C1 / C2`,
/// `effective_volume = C1³ / C2²`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveParameters {
    /// Effective magnetic path length, in meters.
    pub effective_length: f64,
    /// Effective magnetic cross-sectional area, in square meters.
    pub effective_area: f64,
    /// Effective magnetic volume, in cubic meters.
    pub effective_volume: f64,
    /// Minimum cross-sectional area anywhere along the flux path, in square
    /// meters (the narrowest column, used for saturation checks).
    pub minimum_area: f64,
}

/// A fully-processed single core piece: overall outer dimensions, one
/// winding window, its column list and effective parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorePiece {
    /// Overall width of the piece, in meters.
    pub width: f64,
    /// Overall height of the piece, in meters.
    pub height: f64,
    /// Overall depth of the piece, in meters.
    pub depth: f64,
    /// The piece's single winding window.
    pub winding_window: WindingWindowElement,
    /// Ordered column list: one central (if the family has one) followed by
    /// the lateral columns.
    pub columns: Vec<ColumnElement>,
    /// Magnetic shape constant `C1` (an integral of path length / area along
    /// the flux path), halved relative to the assembled two-piece value.
    pub c1: f64,
    /// Magnetic shape constant `C2`, halved relative to the assembled
    /// two-piece value.
    pub c2: f64,
    /// Derived effective parameters for this single piece.
    pub effective_parameters: EffectiveParameters,
}

/// The four-method interface every shape family's geometry procedure
/// implements.
pub trait FamilyGeometry {
    /// Sets overall width/height/depth of a single piece from its flattened
    /// dimension map.
    fn process_extra_data(&self, dimensions: &DimensionMap) -> Result<(f64, f64, f64)>;

    /// Computes window height, width (or radial height + angle for
    /// toroids), area and window-center coordinates.
    fn process_winding_window(&self, dimensions: &DimensionMap) -> Result<WindingWindowElement>;

    /// Emits the ordered column list.
    fn process_columns(
        &self,
        dimensions: &DimensionMap,
        winding_window: &WindingWindowElement,
    ) -> Result<Vec<ColumnElement>>;

    /// Computes the magnetic shape constants `(C1, C2)` for a single piece.
    fn shape_constants(
        &self,
        dimensions: &DimensionMap,
        columns: &[ColumnElement],
        winding_window: &WindingWindowElement,
    ) -> Result<(f64, f64)>;
}

fn geometry_for(family: CoreShapeFamily) -> Result<Box<dyn FamilyGeometry>> {
    use families::{e::EGeometry, etd::EtdGeometry, pq::PqGeometry, toroidal::ToroidalGeometry};
    return match family {
        CoreShapeFamily::E | CoreShapeFamily::PlanarE => Ok(Box::new(EGeometry)),
        CoreShapeFamily::Etd
        | CoreShapeFamily::Er
        | CoreShapeFamily::PlanarEr => Ok(Box::new(EtdGeometry { clip_hole: false })),
        CoreShapeFamily::Ec => Ok(Box::new(EtdGeometry { clip_hole: true })),
        CoreShapeFamily::Pq => Ok(Box::new(PqGeometry)),
        CoreShapeFamily::Toroidal => Ok(Box::new(ToroidalGeometry)),
        family => Err(Error::InvalidGeometry(format!(
            "family {family:?} has no implemented geometry procedure"
        ))),
    };
}

impl CorePiece {
    /// Runs the fixed processing pipeline for `shape`: flatten → winding
    /// window → columns → extra data → compute constants → store effective
    /// parameters.
    ///
    /// Families without an implemented [`FamilyGeometry`] return
    /// [`Error::InvalidGeometry`] rather than reusing another family's
    /// formulas.
    pub fn factory(shape: &CoreShape) -> Result<Self> {
        if !shape.has_required_dimensions() {
            return Err(Error::InvalidGeometry(format!(
                "shape {} is missing required dimension letters for family {:?}",
                shape.name, shape.family
            )));
        }
        let dimensions = flatten_dimensions(&shape.dimensions)?;
        let geometry = geometry_for(shape.family)?;

        let winding_window = geometry.process_winding_window(&dimensions)?;
        let columns = geometry.process_columns(&dimensions, &winding_window)?;
        let (width, height, depth) = geometry.process_extra_data(&dimensions)?;
        let (c1, c2) = geometry.shape_constants(&dimensions, &columns, &winding_window)?;

        if c1 <= 0.0 || c2 <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "shape {} produced non-positive shape constants (c1={c1}, c2={c2})",
                shape.name
            )));
        }

        let effective_parameters = EffectiveParameters {
            effective_length: c1 * c1 / c2,
            effective_area: c1 / c2,
            effective_volume: c1 * c1 * c1 / (c2 * c2),
            minimum_area: columns
                .iter()
                .map(|c| c.area)
                .fold(f64::MAX, f64::min),
        };

        if effective_parameters.effective_length <= 0.0
            || effective_parameters.effective_area <= 0.0
            || effective_parameters.effective_volume <= 0.0
            || effective_parameters.minimum_area <= 0.0
        {
            return Err(Error::InvalidGeometry(format!(
                "shape {} produced non-positive effective parameters",
                shape.name
            )));
        }

        return Ok(CorePiece {
            width,
            height,
            depth,
            winding_window,
            columns,
            c1,
            c2,
            effective_parameters,
        });
    }
}
