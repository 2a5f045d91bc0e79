/*!
Converter-topology modules: each derives [`crate::mas::DesignRequirements`]
and per-winding waveforms from an abstract converter specification (§4.9).
*/

pub mod cllc;
pub mod flyback;
pub mod inverter;

pub use cllc::{CllcResult, CllcSpec};
pub use flyback::{FlybackMode, FlybackResult, FlybackSpec};
pub use inverter::{InverterFilterTopology, InverterModulation, InverterResult, InverterSpec};
