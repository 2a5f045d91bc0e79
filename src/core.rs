/*!
The assembled magnetic core: functional description, processed description
and (optionally) a geometrical description of the finished, gapped piece
pair.

The method names below (`find_columns_by_type`, `scale_to_stacks`,
`get_magnetic_flux_density_saturation`, ...) follow a conventional magnetic
core model's public interface, reimplemented over this crate's
geometry/gap/material types.
*/

use crate::error::{Error, Result};
use crate::gap::{process_gaps, CoreGap, GapType};
use crate::geometry::{ColumnElement, ColumnType, CorePiece, EffectiveParameters, WindingWindowElement};
use crate::material::Material;
use crate::shape::CoreShape;
use uom::si::f64::ThermodynamicTemperature;

/// Assembly topology of a [`Core`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoreType {
    /// A single toroidal ring, no gapping possible by machining (only
    /// residual/additive).
    Toroidal,
    /// Two identical (or mirror-image) pieces joined at a parting plane.
    TwoPieceSet,
    /// A piece joined against a flat plate.
    PieceAndPlate,
    /// A closed shape with no assembly joint (e.g. a cast toroid).
    ClosedShape,
}

/// Functional (as-specified) description of a [`Core`]: what the user asked
/// for, before any geometry is resolved.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreFunctionalDescription {
    /// Name of the shape in the catalog.
    pub shape_name: String,
    /// Name of the material in the catalog.
    pub material_name: String,
    /// Number of stacked pieces (side by side in the depth direction).
    #[cfg_attr(feature = "serde", serde(default = "default_number_stacks"))]
    pub number_stacks: u32,
    /// Gapping list, as specified (may be empty, partial, or fully aligned).
    #[cfg_attr(feature = "serde", serde(default))]
    pub gapping: Vec<CoreGap>,
    /// Assembly topology.
    pub core_type: CoreType,
}

fn default_number_stacks() -> u32 {
    1
}

/// Geometrically-resolved description produced by [`Core::process_data`]:
/// columns, winding windows and the effective lumped parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreProcessedDescription {
    /// Ordered column list of the assembled (stacked, gapped) core.
    pub columns: Vec<ColumnElement>,
    /// Winding windows of the assembled core (one per stack for TOROIDAL,
    /// one shared window otherwise).
    pub winding_windows: Vec<WindingWindowElement>,
    /// Effective lumped parameters of the assembled core.
    pub effective_parameters: EffectiveParameters,
    /// Overall outer width, in meters.
    pub width: f64,
    /// Overall outer height, in meters.
    pub height: f64,
    /// Overall outer depth, in meters.
    pub depth: f64,
}

/// A subtractive machining operation on one piece of a [`CoreType::TwoPieceSet`]
/// assembly: the half of a ground gap that piece's column must be cut to.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MachiningOperation {
    /// Coordinates of the cut, recentered within this piece's half.
    pub coordinates: [f64; 3],
    /// Depth of material removed, in meters (half the original gap length).
    pub length: f64,
}

/// Physical realization of an ADDITIVE gap: a non-magnetic spacer plate
/// inserted between the two pieces at the gap's column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spacer {
    /// Coordinates of the spacer's center, on the y=0 parting plane.
    pub coordinates: [f64; 3],
    /// Spacer thickness, in meters (equal to the additive gap's length).
    pub length: f64,
    /// Footprint `[width, depth]`, protruding beyond the column's own
    /// section dimensions by [`SPACER_PROTRUDING_MARGIN_FACTOR`].
    pub footprint: [f64; 2],
}

/// Margin by which a spacer's footprint protrudes beyond the column section
/// it sits on, so it physically bridges the parting plane instead of being
/// flush with (and liable to slip off) the column's own cross section.
pub const SPACER_PROTRUDING_MARGIN_FACTOR: f64 = 1.1;

/// Placement of one physical piece within a [`CoreType::TwoPieceSet`]
/// assembly, plus the machining operations cut into its columns.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceDescription {
    /// Coordinates of the piece's origin in the assembly frame.
    pub coordinates: [f64; 3],
    /// Rotation about the depth axis, in degrees (0 for the piece above the
    /// parting plane, 180 for the piece below it).
    pub rotation: f64,
    /// SUBTRACTIVE gaps split onto this piece's half.
    pub machined_gaps: Vec<MachiningOperation>,
}

/// Geometrical description of a finished, gapped [`Core`]: the two pieces'
/// placement plus the spacers realizing its ADDITIVE gaps. Populated by
/// [`Core::process_data`] only for [`CoreType::TwoPieceSet`] assemblies; all
/// other assembly topologies leave [`Core::geometrical_description`] `None`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometricalDescription {
    /// The two pieces, in `[top, bottom]` order (top sits at `y >= 0`).
    pub pieces: [PieceDescription; 2],
    /// Spacers realizing every ADDITIVE gap.
    pub spacers: Vec<Spacer>,
}

/// A fully assembled magnetic core: shape + material + gapping, walked
/// through [`Core::process_data`] into effective lumped parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Core {
    /// As-specified description.
    pub functional_description: CoreFunctionalDescription,
    /// Resolved once [`Core::process_data`] has run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub processed_description: Option<CoreProcessedDescription>,
    /// The fully-resolved gapping list (every field populated), distinct
    /// from `functional_description.gapping` which may be partial.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resolved_gapping: Vec<CoreGap>,
    /// Per-piece placement, machining and spacers, resolved alongside
    /// `resolved_gapping` by [`Core::process_data`]. Only present for
    /// [`CoreType::TwoPieceSet`] assemblies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub geometrical_description: Option<GeometricalDescription>,
}

impl Core {
    /// Builds an unprocessed `Core` from a catalog shape/material by name.
    pub fn new(shape_name: impl Into<String>, material_name: impl Into<String>, core_type: CoreType) -> Self {
        return Self {
            functional_description: CoreFunctionalDescription {
                shape_name: shape_name.into(),
                material_name: material_name.into(),
                number_stacks: 1,
                gapping: Vec::new(),
                core_type,
            },
            processed_description: None,
            resolved_gapping: Vec::new(),
            geometrical_description: None,
        };
    }

    /// Runs the single-piece geometry engine on `shape`, doubles its shape
    /// constants for [`CoreType::TwoPieceSet`] assemblies per §4.2 ("for
    /// TWO_PIECE_SET assemblies C1 and C2 are halved per piece; the assembled
    /// core doubles them"), scales to `number_stacks`, and resolves the
    /// gapping list against the resulting columns.
    pub fn process_data(&mut self, shape: &CoreShape) -> Result<()> {
        let piece = CorePiece::factory(shape)?;

        let is_two_piece = self.functional_description.core_type == CoreType::TwoPieceSet;
        let (c1, c2) = if is_two_piece {
            (piece.c1 * 2.0, piece.c2 * 2.0)
        } else {
            (piece.c1, piece.c2)
        };

        let stacks = self.functional_description.number_stacks as f64;
        let effective_length = c1 * c1 / c2;
        let effective_area = piece.effective_parameters.effective_area;
        let effective_volume = c1 * c1 * c1 / (c2 * c2) * stacks;
        let minimum_area = piece.effective_parameters.minimum_area * stacks;

        let mut columns = piece.columns.clone();
        for column in &mut columns {
            column.area *= stacks;
            if let Some(w) = column.minimum_width.as_mut() {
                *w *= 1.0;
            }
        }

        self.processed_description = Some(CoreProcessedDescription {
            columns: columns.clone(),
            winding_windows: vec![piece.winding_window],
            effective_parameters: EffectiveParameters {
                effective_length,
                effective_area,
                effective_volume,
                minimum_area,
            },
            width: piece.width,
            height: piece.height,
            depth: piece.depth * stacks,
        });

        self.resolved_gapping = process_gaps(&self.functional_description.gapping, &columns)?;
        self.geometrical_description = if is_two_piece {
            Some(self.split_two_piece_set_geometry())
        } else {
            None
        };
        return Ok(());
    }

    /// Splits `self.resolved_gapping` across the y=0 parting plane of a
    /// [`CoreType::TwoPieceSet`] assembly: every SUBTRACTIVE gap becomes one
    /// [`MachiningOperation`] per piece, recentered within that piece's half
    /// at half the original gap length; every ADDITIVE gap becomes one
    /// [`Spacer`] sitting on the plane itself, footprint inflated by
    /// [`SPACER_PROTRUDING_MARGIN_FACTOR`]. RESIDUAL gaps need no machining
    /// or spacer and are skipped.
    fn split_two_piece_set_geometry(&self) -> GeometricalDescription {
        let mut top = PieceDescription {
            coordinates: [0.0, 0.0, 0.0],
            rotation: 0.0,
            machined_gaps: Vec::new(),
        };
        let mut bottom = PieceDescription {
            coordinates: [0.0, 0.0, 0.0],
            rotation: 180.0,
            machined_gaps: Vec::new(),
        };
        let mut spacers = Vec::new();

        for gap in &self.resolved_gapping {
            let coordinates = gap.coordinates.unwrap_or([0.0, 0.0, 0.0]);
            match gap.gap_type {
                GapType::Subtractive => {
                    let half_length = gap.length / 2.0;
                    let half_offset = gap.length / 4.0;
                    top.machined_gaps.push(MachiningOperation {
                        coordinates: [coordinates[0], coordinates[1] + half_offset, coordinates[2]],
                        length: half_length,
                    });
                    bottom.machined_gaps.push(MachiningOperation {
                        coordinates: [coordinates[0], coordinates[1] - half_offset, coordinates[2]],
                        length: half_length,
                    });
                }
                GapType::Additive => {
                    let [width, depth] = gap.section_dimensions.unwrap_or([0.0, 0.0]);
                    spacers.push(Spacer {
                        coordinates: [coordinates[0], 0.0, coordinates[2]],
                        length: gap.length,
                        footprint: [width * SPACER_PROTRUDING_MARGIN_FACTOR, depth * SPACER_PROTRUDING_MARGIN_FACTOR],
                    });
                }
                GapType::Residual => {}
            }
        }

        return GeometricalDescription {
            pieces: [top, bottom],
            spacers,
        };
    }

    /// `true` once [`Core::process_data`] has run.
    pub fn is_processed(&self) -> bool {
        self.processed_description.is_some()
    }

    /// Returns all columns whose [`ColumnType`] equals `column_type`.
    pub fn find_columns_by_type(&self, column_type: ColumnType) -> Vec<&ColumnElement> {
        self.processed_description
            .iter()
            .flat_map(|p| p.columns.iter())
            .filter(|c| c.column_type == column_type)
            .collect()
    }

    /// Returns the column whose coordinates are closest to `coordinates`.
    pub fn find_closest_column_by_coordinates(&self, coordinates: [f64; 3]) -> Option<&ColumnElement> {
        self.processed_description.as_ref().and_then(|p| {
            p.columns.iter().min_by(|a, b| {
                let da: f64 = (0..3).map(|i| (a.coordinates[i] - coordinates[i]).powi(2)).sum();
                let db: f64 = (0..3).map(|i| (b.coordinates[i] - coordinates[i]).powi(2)).sum();
                da.partial_cmp(&db).unwrap()
            })
        })
    }

    /// Returns all resolved gaps whose `gap_type` equals `gap_type`.
    pub fn find_gaps_by_type(&self, gap_type: GapType) -> Vec<&CoreGap> {
        self.resolved_gapping.iter().filter(|g| g.gap_type == gap_type).collect()
    }

    /// Returns all resolved gaps attached to `column`.
    pub fn find_gaps_by_column(&self, column: &ColumnElement) -> Vec<&CoreGap> {
        self.resolved_gapping
            .iter()
            .filter(|g| g.coordinates == Some(column.coordinates))
            .collect()
    }

    /// Rescales the already-processed core to a new stack count, in place.
    /// Column areas and effective volume/minimum-area scale linearly;
    /// effective length/area do not.
    pub fn scale_to_stacks(&mut self, number_stacks: u32) -> Result<()> {
        let Some(processed) = self.processed_description.as_mut() else {
            return Err(Error::InvalidGeometry("cannot scale an unprocessed core".into()));
        };
        let ratio = number_stacks as f64 / self.functional_description.number_stacks as f64;
        for column in processed.columns.iter_mut() {
            column.area *= ratio;
        }
        processed.effective_parameters.effective_volume *= ratio;
        processed.effective_parameters.minimum_area *= ratio;
        processed.depth *= ratio;
        self.functional_description.number_stacks = number_stacks;
        return Ok(());
    }

    /// Mass of the core, in kilograms: effective volume times `material`'s
    /// density at `temperature`.
    pub fn mass(&self, material: &Material, temperature: ThermodynamicTemperature) -> Result<f64> {
        let processed = self
            .processed_description
            .as_ref()
            .ok_or_else(|| Error::InvalidGeometry("core is not processed".into()))?;
        let density = material
            .mass_density()
            .get(&[temperature.into()])
            .get::<uom::si::mass_density::kilogram_per_cubic_meter>();
        return Ok(processed.effective_parameters.effective_volume * density);
    }

    /// Saturation flux density of `material` at `temperature`, a core-level
    /// convenience wrapper exposed directly on `Core`.
    pub fn magnetic_flux_density_saturation(
        &self,
        material: &Material,
        temperature: ThermodynamicTemperature,
    ) -> uom::si::f64::MagneticFluxDensity {
        material.magnetic_flux_density_saturation(temperature)
    }

    /// Curie temperature of `material`.
    pub fn curie_temperature(&self, material: &Material) -> ThermodynamicTemperature {
        material.curie_temperature
    }

    /// `true` if the core's overall outer dimensions fit within
    /// `maximum_dimensions` `[width, height, depth]`, optionally allowing a
    /// 90-degree rotation about the depth axis.
    pub fn fits(&self, maximum_dimensions: [f64; 3], allow_rotation: bool) -> bool {
        let Some(processed) = self.processed_description.as_ref() else {
            return false;
        };
        let fits_direct = processed.width <= maximum_dimensions[0]
            && processed.height <= maximum_dimensions[1]
            && processed.depth <= maximum_dimensions[2];
        if fits_direct {
            return true;
        }
        if allow_rotation {
            return processed.height <= maximum_dimensions[0]
                && processed.width <= maximum_dimensions[1]
                && processed.depth <= maximum_dimensions[2];
        }
        return false;
    }
}
