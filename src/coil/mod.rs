/*!
Coil synthesis: sections → layers → turns.

Given a winding window, a bobbin and a list of [`CoilFunctionalDescription`]s,
[`Coil::synthesize`] partitions the window into sections, packs layers within
each section, places turns within each layer and finally runs the collision
check of §4.7 step 4. See [`crate::error::Error::FitFailure`] for the
recoverable failure mode when a winding cannot fit.
*/

use crate::error::{Error, Result};
use crate::geometry::WindingWindowElement;
use crate::wire::Wire;

/// Which side of the transformer's isolation barrier a winding sits on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsolationSide {
    /// Primary side.
    Primary,
    /// Secondary side.
    Secondary,
    /// Tertiary side.
    Tertiary,
    /// Any further side, named explicitly (quaternary, quinary, ...).
    Named(String),
}

/// A bobbin constrains the usable winding window: a margin is reserved on
/// every side for the former's wall thickness and creepage/clearance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bobbin {
    /// Wall thickness reserved on every side of the winding window, in
    /// meters.
    pub wall_thickness: f64,
}

impl Bobbin {
    /// Returns the usable window after subtracting `self.wall_thickness`
    /// from every side of `window`.
    pub fn usable_window(&self, window: &WindingWindowElement) -> WindingWindowElement {
        match *window {
            WindingWindowElement::Rectangular {
                height,
                width,
                coordinates,
                ..
            } => {
                let usable_height = (height - 2.0 * self.wall_thickness).max(0.0);
                let usable_width = (width - 2.0 * self.wall_thickness).max(0.0);
                WindingWindowElement::Rectangular {
                    height: usable_height,
                    width: usable_width,
                    area: usable_height * usable_width,
                    coordinates,
                }
            }
            WindingWindowElement::Toroidal {
                radial_height,
                angle,
                coordinates,
                ..
            } => {
                let usable_radial_height = (radial_height - self.wall_thickness).max(0.0);
                WindingWindowElement::Toroidal {
                    radial_height: usable_radial_height,
                    angle,
                    area: usable_radial_height * angle,
                    coordinates,
                }
            }
        }
    }
}

/// Functional (pre-synthesis) description of one winding.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoilFunctionalDescription {
    /// Winding name, e.g. "primary".
    pub name: String,
    /// Isolation side.
    pub isolation_side: IsolationSide,
    /// Number of turns.
    pub number_turns: usize,
    /// Number of parallel strands per turn.
    pub number_parallels: usize,
    /// Conductor.
    pub wire: Wire,
}

impl CoilFunctionalDescription {
    /// `number_turns * number_parallels`, the number of physical wire turns
    /// to place.
    pub fn total_physical_turns(&self) -> usize {
        self.number_turns * self.number_parallels
    }
}

/// One axial/radial slice of the winding window, owning an ordered list of
/// layer indices (back-references, never owning pointers, per §9).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Name of the winding this section belongs to, `functional_description.name`.
    pub winding_name: String,
    /// Rectangular footprint of the section within the winding window.
    pub coordinates: [f64; 3],
    /// Section extent `[height_or_radial, width_or_angle]`.
    pub dimensions: [f64; 2],
}

/// One layer within a [`Section`], packed parallel to the bobbin leg.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    /// Index of the owning section in [`Coil::sections`].
    pub section_index: usize,
    /// Layer thickness, in meters (the wire's outer dimension along the
    /// stacking axis).
    pub thickness: f64,
    /// Coordinates of the layer's center.
    pub coordinates: [f64; 3],
}

/// A single physical turn.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    /// Index of the owning layer in [`Coil::layers`].
    pub layer_index: usize,
    /// Index of the owning section in [`Coil::sections`].
    pub section_index: usize,
    /// Absolute coordinates of the turn center.
    pub coordinates: [f64; 3],
    /// Wound length of this turn (its perimeter around the core), in meters.
    pub length: f64,
}

/// The assembled winding: functional description plus sections, layers and
/// turns produced by [`Coil::synthesize`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coil {
    /// Per-winding functional description, in the order windings were
    /// requested.
    pub functional_description: Vec<CoilFunctionalDescription>,
    /// Ordered sections.
    pub sections: Vec<Section>,
    /// Layers, across all sections.
    pub layers: Vec<Layer>,
    /// Turns, across all layers.
    pub turns: Vec<Turn>,
}

fn turn_wound_length(window_center_x: f64, turn_x: f64, column_depth: f64, column_width: f64) -> f64 {
    // Perimeter of the rectangular loop the turn makes around the column it
    // is wound on: 2*(effective_width + effective_depth), both grown by the
    // turn's radial offset from the column's outer surface.
    let radial_offset = (turn_x - window_center_x).abs();
    let effective_width = column_width + 2.0 * radial_offset;
    let effective_depth = column_depth + 2.0 * radial_offset;
    return 2.0 * (effective_width + effective_depth);
}

impl Coil {
    /// Synthesizes sections/layers/turns of `windings` inside `window`
    /// (already reduced to its bobbin-usable extent), winding around a
    /// column of cross section `column_width` x `column_depth`.
    ///
    /// Horizontal sectioning (rectangular windows): sections are stacked
    /// along the window's width, one per winding, each given the full
    /// window height. Toroidal sectioning: the angular span is divided
    /// proportionally to each winding's turn count, turns placed on
    /// concentric arcs.
    pub fn synthesize(
        windings: Vec<CoilFunctionalDescription>,
        window: &WindingWindowElement,
        column_width: f64,
        column_depth: f64,
    ) -> Result<Self> {
        match window {
            WindingWindowElement::Rectangular { .. } => {
                Self::synthesize_rectangular(windings, window, column_width, column_depth)
            }
            WindingWindowElement::Toroidal { .. } => Self::synthesize_toroidal(windings, window, column_depth),
        }
    }

    fn synthesize_rectangular(
        windings: Vec<CoilFunctionalDescription>,
        window: &WindingWindowElement,
        column_width: f64,
        column_depth: f64,
    ) -> Result<Self> {
        let WindingWindowElement::Rectangular {
            height,
            width,
            coordinates: window_center,
            ..
        } = *window
        else {
            unreachable!()
        };

        let left_edge = window_center[0] - width / 2.0;
        let mut sections = Vec::with_capacity(windings.len());
        let mut layers = Vec::new();
        let mut turns = Vec::new();

        let section_width = width / windings.len().max(1) as f64;

        for (winding_index, winding) in windings.iter().enumerate() {
            let section_left = left_edge + section_width * winding_index as f64;
            let section_center_x = section_left + section_width / 2.0;
            let section_index = sections.len();
            sections.push(Section {
                winding_name: winding.name.clone(),
                coordinates: [section_center_x, window_center[1], window_center[2]],
                dimensions: [height, section_width],
            });

            let outer = winding.wire.outer_dimensions();
            let pitch_y = outer[0].max(1e-9);
            let pitch_x = outer[1].max(1e-9);
            let turns_per_layer = (height / pitch_y).floor().max(1.0) as usize;
            let required = winding.total_physical_turns();
            let number_layers = required.div_ceil(turns_per_layer);

            if (number_layers as f64) * pitch_x > section_width + 1e-9 {
                return Err(Error::FitFailure(format!(
                    "winding {} does not fit in its section: needs {number_layers} layers of width {pitch_x} in a {section_width}m section",
                    winding.name
                )));
            }

            let mut placed = 0usize;
            for layer_index_in_winding in 0..number_layers {
                let layer_center_x = section_left + pitch_x * (layer_index_in_winding as f64 + 0.5);
                let layer_index = layers.len();
                layers.push(Layer {
                    section_index,
                    thickness: pitch_x,
                    coordinates: [layer_center_x, window_center[1], window_center[2]],
                });

                let remaining = required - placed;
                let this_layer_turns = remaining.min(turns_per_layer);
                let top = window_center[1] + height / 2.0;
                for t in 0..this_layer_turns {
                    let turn_y = top - pitch_y * (t as f64 + 0.5);
                    let turn_x = layer_center_x;
                    turns.push(Turn {
                        layer_index,
                        section_index,
                        coordinates: [turn_x, turn_y, window_center[2]],
                        length: turn_wound_length(window_center[0], turn_x, column_depth, column_width),
                    });
                }
                placed += this_layer_turns;
            }

            if placed < required {
                return Err(Error::FitFailure(format!(
                    "winding {} could only place {placed} of {required} required turns",
                    winding.name
                )));
            }
        }

        let coil = Coil {
            functional_description: windings,
            sections,
            layers,
            turns,
        };
        coil.check_no_collisions(window)?;
        return Ok(coil);
    }

    fn synthesize_toroidal(
        windings: Vec<CoilFunctionalDescription>,
        window: &WindingWindowElement,
        core_radius: f64,
    ) -> Result<Self> {
        let WindingWindowElement::Toroidal {
            radial_height,
            angle: total_angle,
            coordinates: window_center,
            ..
        } = *window
        else {
            unreachable!()
        };

        let total_turns: usize = windings.iter().map(|w| w.total_physical_turns()).sum::<usize>().max(1);
        let mut sections = Vec::with_capacity(windings.len());
        let mut layers = Vec::new();
        let mut turns = Vec::new();
        let mut angle_cursor = 0.0;

        for winding in &windings {
            let required = winding.total_physical_turns();
            let section_angle = total_angle * required as f64 / total_turns as f64;
            let section_index = sections.len();
            sections.push(Section {
                winding_name: winding.name.clone(),
                coordinates: window_center,
                dimensions: [radial_height, section_angle],
            });

            let outer = winding.wire.outer_dimensions();
            let pitch = outer[0].max(1e-9);
            let layer_index = layers.len();
            layers.push(Layer {
                section_index,
                thickness: pitch,
                coordinates: window_center,
            });

            let radius = core_radius + radial_height / 2.0;
            for t in 0..required {
                let angle = angle_cursor + section_angle * (t as f64 + 0.5) / required as f64;
                let distance_along_arc = pitch * t as f64;
                let wound_angle = distance_along_arc / radius.max(1e-9);
                let turn_angle = angle_cursor + wound_angle.min(section_angle);
                turns.push(Turn {
                    layer_index,
                    section_index,
                    coordinates: [radius * turn_angle.cos(), radius * turn_angle.sin(), window_center[2]],
                    length: 2.0 * std::f64::consts::PI * radius,
                });
                let _ = angle;
            }
            angle_cursor += section_angle;
        }

        let coil = Coil {
            functional_description: windings,
            sections,
            layers,
            turns,
        };
        coil.check_no_collisions(window)?;
        return Ok(coil);
    }

    /// Verifies that every turn center lies inside `window` and that no two
    /// turns' bounding shapes overlap (§4.7 step 4 / §8 invariant).
    fn check_no_collisions(&self, window: &WindingWindowElement) -> Result<()> {
        for turn in &self.turns {
            if !point_in_window(turn.coordinates, window) {
                return Err(Error::FitFailure(format!(
                    "turn at {:?} lies outside the winding window",
                    turn.coordinates
                )));
            }
        }
        for i in 0..self.turns.len() {
            for j in (i + 1)..self.turns.len() {
                let a = self.turns[i].coordinates;
                let b = self.turns[j].coordinates;
                let required = self.turn_conductor_radius(&self.turns[i]) + self.turn_conductor_radius(&self.turns[j]);
                let distance = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt();
                if distance < required - 1e-9 {
                    return Err(Error::FitFailure(format!(
                        "turns {i} and {j} overlap (distance {distance} < {required})"
                    )));
                }
            }
        }
        return Ok(());
    }

    /// Radius of the conductor `turn` is wound with, via
    /// `turns -> section -> winding_name -> functional_description`. Used
    /// pairwise so that two turns of differently-sized wire are required to
    /// clear the sum of their own radii, not one global minimum.
    fn turn_conductor_radius(&self, turn: &Turn) -> f64 {
        let winding_name = &self.sections[turn.section_index].winding_name;
        self.functional_description
            .iter()
            .find(|w| &w.name == winding_name)
            .map(|w| w.wire.outer_dimensions()[0] / 2.0)
            .unwrap_or(0.0)
    }
}

fn point_in_window(point: [f64; 3], window: &WindingWindowElement) -> bool {
    match *window {
        WindingWindowElement::Rectangular {
            height,
            width,
            coordinates,
            ..
        } => {
            (point[0] - coordinates[0]).abs() <= width / 2.0 + 1e-9
                && (point[1] - coordinates[1]).abs() <= height / 2.0 + 1e-9
        }
        WindingWindowElement::Toroidal { .. } => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Wire;

    fn round_wire(diameter: f64) -> Wire {
        Wire::Round {
            name: "1mm".into(),
            conducting_diameter: diameter,
            coating: None,
            outer_diameter: diameter,
        }
    }

    #[test]
    fn four_round_turns_fit_single_layer_with_expected_pitch() {
        let window = WindingWindowElement::Rectangular {
            height: 0.005,
            width: 0.010,
            area: 0.00005,
            coordinates: [0.0, 0.0, 0.0],
        };
        let winding = CoilFunctionalDescription {
            name: "primary".into(),
            isolation_side: IsolationSide::Primary,
            number_turns: 4,
            number_parallels: 1,
            wire: round_wire(0.001),
        };
        let coil = Coil::synthesize(vec![winding], &window, 0.005, 0.005).unwrap();
        assert_eq!(coil.turns.len(), 4);
        let mut xs: Vec<f64> = coil.turns.iter().map(|t| t.coordinates[0]).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        approx::assert_abs_diff_eq!(xs[0], -0.0005, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(xs[3], 0.0015, epsilon = 1e-9);
    }

    #[test]
    fn oversized_winding_is_a_fit_failure() {
        let window = WindingWindowElement::Rectangular {
            height: 0.002,
            width: 0.010,
            area: 0.00002,
            coordinates: [0.0, 0.0, 0.0],
        };
        let winding = CoilFunctionalDescription {
            name: "primary".into(),
            isolation_side: IsolationSide::Primary,
            number_turns: 100,
            number_parallels: 1,
            wire: round_wire(0.001),
        };
        assert!(matches!(
            Coil::synthesize(vec![winding], &window, 0.005, 0.005),
            Err(Error::FitFailure(_))
        ));
    }

    #[test]
    fn toroidal_sectioning_splits_angle_proportionally() {
        let window = WindingWindowElement::Toroidal {
            radial_height: 0.003,
            angle: 2.0 * std::f64::consts::PI,
            area: 0.001,
            coordinates: [0.0, 0.0, 0.0],
        };
        let primary = CoilFunctionalDescription {
            name: "primary".into(),
            isolation_side: IsolationSide::Primary,
            number_turns: 10,
            number_parallels: 1,
            wire: round_wire(0.0005),
        };
        let secondary = CoilFunctionalDescription {
            name: "secondary".into(),
            isolation_side: IsolationSide::Secondary,
            number_turns: 30,
            number_parallels: 1,
            wire: round_wire(0.0005),
        };
        let coil = Coil::synthesize(vec![primary, secondary], &window, 0.0, 0.010).unwrap();
        approx::assert_relative_eq!(
            coil.sections[0].dimensions[1] / coil.sections[1].dimensions[1],
            10.0 / 30.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn collision_check_uses_each_turns_own_conductor_radius() {
        let window = WindingWindowElement::Rectangular {
            height: 0.010,
            width: 0.010,
            area: 0.0001,
            coordinates: [0.0, 0.0, 0.0],
        };
        let primary = CoilFunctionalDescription {
            name: "primary".into(),
            isolation_side: IsolationSide::Primary,
            number_turns: 1,
            number_parallels: 1,
            wire: round_wire(0.004),
        };
        let secondary = CoilFunctionalDescription {
            name: "secondary".into(),
            isolation_side: IsolationSide::Secondary,
            number_turns: 1,
            number_parallels: 1,
            wire: round_wire(0.001),
        };
        let coil = Coil {
            functional_description: vec![primary, secondary],
            sections: vec![
                Section {
                    winding_name: "primary".into(),
                    coordinates: [0.0, 0.0, 0.0],
                    dimensions: [0.010, 0.005],
                },
                Section {
                    winding_name: "secondary".into(),
                    coordinates: [0.0025, 0.0, 0.0],
                    dimensions: [0.010, 0.005],
                },
            ],
            layers: vec![
                Layer {
                    section_index: 0,
                    thickness: 0.004,
                    coordinates: [0.0, 0.0, 0.0],
                },
                Layer {
                    section_index: 1,
                    thickness: 0.001,
                    coordinates: [0.0025, 0.0, 0.0],
                },
            ],
            turns: vec![
                Turn {
                    layer_index: 0,
                    section_index: 0,
                    coordinates: [0.0, 0.0, 0.0],
                    length: 0.0,
                },
                Turn {
                    layer_index: 1,
                    section_index: 1,
                    coordinates: [0.002, 0.0, 0.0],
                    length: 0.0,
                },
            ],
        };

        // primary radius 0.002 + secondary radius 0.0005 = 0.0025 required
        // separation, but these turns are only 0.002 apart: a global
        // minimum-radius threshold (the smaller wire's 0.0005) would miss
        // this collision entirely.
        assert!(matches!(coil.check_no_collisions(&window), Err(Error::FitFailure(_))));
    }
}
