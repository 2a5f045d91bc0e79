/*!
Core shape catalog entry.
*/

use crate::dimension::DimensionMap;

/// Geometric family tag for a [`CoreShape`]. Families that reuse
/// another's geometry procedure by delegation rather than reimplementation
/// are documented on [`crate::geometry::CorePiece::factory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreShapeFamily {
    /// E core.
    E,
    /// EC core (ETD with a clip-hole correction).
    Ec,
    /// ETD core.
    Etd,
    /// ER core (delegates to ETD).
    Er,
    /// EFD core.
    Efd,
    /// EL core.
    El,
    /// EP core.
    Ep,
    /// EPX core.
    Epx,
    /// LP core.
    Lp,
    /// EQ core.
    Eq,
    /// Pot (P) core.
    P,
    /// Planar E core (delegates to E).
    PlanarE,
    /// Planar EL core (delegates to El).
    PlanarEl,
    /// Planar ER core (delegates to Er/Etd).
    PlanarEr,
    /// PM core.
    Pm,
    /// PQ core.
    Pq,
    /// RM core.
    Rm,
    /// U core.
    U,
    /// UR core.
    Ur,
    /// UT core.
    Ut,
    /// Toroidal (ring) core.
    Toroidal,
    /// C core.
    C,
}

impl CoreShapeFamily {
    /// Returns the dimension letters this family requires to be present in
    /// a [`CoreShape::dimensions`] map before geometry processing. Families
    /// with no implemented geometry procedure still name their real-world
    /// dimension letters here so [`CoreShape::has_required_dimensions`]
    /// reflects the shape's actual data; [`crate::geometry::CorePiece::factory`]
    /// is what actually rejects them, via [`Error::InvalidGeometry`] from the
    /// geometry procedure lookup, not this method.
    pub fn required_dimension_letters(&self) -> &'static [&'static str] {
        match self {
            CoreShapeFamily::E | CoreShapeFamily::PlanarE => &["A", "B", "C", "D", "E", "F"],
            CoreShapeFamily::Etd | CoreShapeFamily::Er | CoreShapeFamily::Ec | CoreShapeFamily::PlanarEr => {
                &["A", "B", "C", "D", "E", "F"]
            }
            CoreShapeFamily::Pq => &["A", "B", "C", "D", "E", "F"],
            CoreShapeFamily::Toroidal => &["A", "B", "C"],
            CoreShapeFamily::Efd | CoreShapeFamily::Epx => &["A", "B", "C", "D", "E", "F", "K"],
            CoreShapeFamily::El | CoreShapeFamily::PlanarEl => &["A", "B", "C", "D", "E", "F"],
            CoreShapeFamily::Ep | CoreShapeFamily::Pm => &["A", "B", "C", "D", "E"],
            CoreShapeFamily::Lp => &["A", "B", "C", "D", "E", "F"],
            CoreShapeFamily::Eq => &["A", "B", "C", "D", "E", "F"],
            CoreShapeFamily::P => &["A", "B", "C", "D", "E"],
            CoreShapeFamily::Rm => &["A", "B", "C", "D", "E"],
            CoreShapeFamily::U | CoreShapeFamily::Ur | CoreShapeFamily::Ut => &["A", "B", "C", "D", "F"],
            CoreShapeFamily::C => &["A", "B", "C", "D"],
        }
    }
}

/// A named core shape from the catalog: a geometric family, an optional
/// manufacturer-specific subtype, and the raw dimension map.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreShape {
    /// Catalog name, e.g. "PQ 32/20".
    pub name: String,
    /// Geometric family.
    pub family: CoreShapeFamily,
    /// Family subtype, e.g. a manufacturer-specific variant string. Empty
    /// if the family has no subtypes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub family_subtype: String,
    /// Dimension letter to dimension-with-tolerance map.
    pub dimensions: DimensionMap,
}

impl CoreShape {
    /// Checks that every dimension letter [`CoreShapeFamily::required_dimension_letters`]
    /// demands is present in `self.dimensions`.
    pub fn has_required_dimensions(&self) -> bool {
        return self
            .family
            .required_dimension_letters()
            .iter()
            .all(|letter| self.dimensions.contains_key(*letter));
    }
}
