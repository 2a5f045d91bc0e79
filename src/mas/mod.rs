/*!
The Magnetics Application Specification (MAS): `{inputs, magnetic, outputs}`,
the unit of persistence and exchange (§3, §6).

A thin aggregate of exactly these three fields.
*/

pub mod inputs;
pub mod outputs;

pub use inputs::{DesignRequirements, ExcitationSignal, Inputs, OperatingPoint, OperatingPointConditions, WindingExcitation};
pub use outputs::{LossesBreakdown, Outputs};

use crate::magnetic::Magnetic;

/// The triple `{Inputs, Magnetic, Outputs[]}` - the canonical JSON document
/// describing a full design, one `Outputs` entry per `Inputs::operating_points`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mas {
    /// Converter requirements and per-operating-point excitations.
    pub inputs: Inputs,
    /// The designed magnetic device.
    pub magnetic: Magnetic,
    /// Simulated outputs, append-only, one entry per operating point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub outputs: Vec<Outputs>,
}

impl Mas {
    /// Builds a new `Mas` with no outputs yet computed.
    pub fn new(inputs: Inputs, magnetic: Magnetic) -> Self {
        return Self {
            inputs,
            magnetic,
            outputs: Vec::new(),
        };
    }

    /// Appends one `Outputs` entry. `Outputs` is append-only per §3.
    pub fn push_outputs(&mut self, outputs: Outputs) {
        self.outputs.push(outputs);
    }
}
