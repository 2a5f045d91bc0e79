/*!
[`Magnetic`]: a processed [`Core`] paired with a synthesized [`Coil`].
*/

use crate::coil::Coil;
use crate::core::Core;

/// A fully assembled magnetic device: a gapped [`Core`] plus its wound
/// [`Coil`]. The derived invariant (§3) - every winding's `numberTurns *
/// numberParallels` turns placed, inside the winding window, no overlaps -
/// is upheld by construction: [`Coil::synthesize`] is the only way to build
/// a `Coil`, and it runs the collision check before returning.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Magnetic {
    /// The processed, gapped core.
    pub core: Core,
    /// The synthesized coil.
    pub coil: Coil,
}

impl Magnetic {
    /// A reference string uniquely identifying this `Magnetic` for caching
    /// purposes: shape/material/gapping summarized via the core's functional
    /// description, plus the coil's winding names and turn counts.
    pub fn reference(&self) -> String {
        let windings: String = self
            .coil
            .functional_description
            .iter()
            .map(|w| format!("{}:{}x{}", w.name, w.number_turns, w.number_parallels))
            .collect::<Vec<_>>()
            .join(",");
        return format!(
            "{}|{}|stacks={}|{}",
            self.core.functional_description.shape_name,
            self.core.functional_description.material_name,
            self.core.functional_description.number_stacks,
            windings
        );
    }
}
