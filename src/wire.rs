/*!
Conductor catalog entries: round, rectangular, foil and litz wire.
*/

#[cfg(feature = "serde")]
use serde_mosaic::{DatabaseEntry, serde::{Deserialize, Serialize}};
#[cfg(feature = "serde")]
use std::ffi::OsStr;

/// Insulating coating applied to a bare conductor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coating {
    /// Coating thickness, in meters.
    pub thickness: f64,
    /// Manufacturer grade, e.g. a IEC 60317 "grade 2" designation encoded as
    /// a small integer.
    pub grade: u8,
    /// Coating material family.
    pub material: CoatingMaterial,
}

/// Insulating coating material family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoatingMaterial {
    /// Polyurethane enamel.
    Polyurethane,
    /// Polyester-imide enamel.
    PolyesterImide,
    /// Triple-insulated (reinforced) coating.
    TripleInsulated,
    /// Served (textile/film wrap) insulation, typical of litz bundles.
    Served,
}

/// A tagged variant over the four conductor geometries the catalog carries.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Wire {
    /// Solid round conductor.
    Round {
        /// Name, as it appears in the wire catalog.
        name: String,
        /// Bare conductor diameter, in meters.
        conducting_diameter: f64,
        /// Coating, if any.
        coating: Option<Coating>,
        /// Outer diameter including coating, in meters.
        outer_diameter: f64,
    },
    /// Solid rectangular conductor.
    Rectangular {
        /// Name, as it appears in the wire catalog.
        name: String,
        /// Bare conductor width, in meters.
        conducting_width: f64,
        /// Bare conductor height, in meters.
        conducting_height: f64,
        /// Coating, if any.
        coating: Option<Coating>,
        /// Outer width including coating, in meters.
        outer_width: f64,
        /// Outer height including coating, in meters.
        outer_height: f64,
    },
    /// Thin rectangular foil conductor, typically run the full winding depth.
    Foil {
        /// Name, as it appears in the wire catalog.
        name: String,
        /// Bare conductor thickness, in meters.
        conducting_thickness: f64,
        /// Bare conductor width (the winding-window dimension the foil runs
        /// across), in meters.
        conducting_width: f64,
        /// Coating, if any.
        coating: Option<Coating>,
        /// Outer thickness including coating, in meters.
        outer_thickness: f64,
        /// Outer width including coating, in meters.
        outer_width: f64,
    },
    /// A bundle of individually-insulated strands, served together.
    /// `strand_wire` is exactly one level deep - a litz of litz is not
    /// representable.
    Litz {
        /// Name, as it appears in the wire catalog.
        name: String,
        /// Number of individual strands in the bundle.
        number_strands: usize,
        /// The (round) wire used for each strand.
        strand_wire: Box<Wire>,
        /// Outer serving thickness, in meters.
        serving_thickness: f64,
        /// Outer diameter of the whole bundle including serving, in meters.
        outer_diameter: f64,
    },
}

impl Wire {
    /// Catalog name of `self`.
    pub fn name(&self) -> &str {
        match self {
            Wire::Round { name, .. }
            | Wire::Rectangular { name, .. }
            | Wire::Foil { name, .. }
            | Wire::Litz { name, .. } => name,
        }
    }

    /// Total conducting (bare, current-carrying) cross-sectional area, in
    /// square meters. For litz, this is the strand area times strand count.
    pub fn conducting_area(&self) -> f64 {
        match self {
            Wire::Round { conducting_diameter, .. } => {
                std::f64::consts::PI * (conducting_diameter / 2.0).powi(2)
            }
            Wire::Rectangular {
                conducting_width,
                conducting_height,
                ..
            } => conducting_width * conducting_height,
            Wire::Foil {
                conducting_thickness,
                conducting_width,
                ..
            } => conducting_thickness * conducting_width,
            Wire::Litz {
                number_strands,
                strand_wire,
                ..
            } => *number_strands as f64 * strand_wire.conducting_area(),
        }
    }

    /// Outer footprint `[width, height]` used for layering/turn-pitch
    /// computations, in meters. For round and litz wires both entries equal
    /// the outer diameter.
    pub fn outer_dimensions(&self) -> [f64; 2] {
        match self {
            Wire::Round { outer_diameter, .. } => [*outer_diameter, *outer_diameter],
            Wire::Rectangular {
                outer_width,
                outer_height,
                ..
            } => [*outer_width, *outer_height],
            Wire::Foil {
                outer_thickness,
                outer_width,
                ..
            } => [*outer_thickness, *outer_width],
            Wire::Litz { outer_diameter, .. } => [*outer_diameter, *outer_diameter],
        }
    }

    /// Conducting diameter of a single strand, for skin-depth calculations.
    /// Round/litz return the (strand) conductor diameter directly;
    /// rectangular/foil return an equivalent diameter of the same area,
    /// which is what the Dowell-family skin models are parameterized on.
    pub fn effective_conducting_diameter(&self) -> f64 {
        match self {
            Wire::Round { conducting_diameter, .. } => *conducting_diameter,
            Wire::Litz { strand_wire, .. } => strand_wire.effective_conducting_diameter(),
            _ => 2.0 * (self.conducting_area() / std::f64::consts::PI).sqrt(),
        }
    }

    /// Number of individually-insulated strands making up one parallel of
    /// this wire (1 for everything but litz).
    pub fn number_strands(&self) -> usize {
        match self {
            Wire::Litz { number_strands, .. } => *number_strands,
            _ => 1,
        }
    }
}

#[cfg(feature = "serde")]
#[typetag::serde]
impl DatabaseEntry for Wire {
    fn name(&self) -> &OsStr {
        self.name().as_ref()
    }
}
