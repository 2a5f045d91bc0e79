#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

mod relative_permeability;
pub mod iron_losses;
mod material;

pub mod adviser;
pub mod cache;
pub mod catalog;
pub mod coil;
pub mod converters;
pub mod core;
pub mod core_losses;
pub mod dimension;
pub mod error;
pub mod gap;
pub mod geometry;
pub mod magnetic;
pub mod mas;
pub mod reluctance;
pub mod settings;
pub mod shape;
pub mod solver;
pub mod waveform;
pub mod winding_losses;
pub mod wire;

pub use adviser::{Adviser, Candidate, RankedCandidate};
pub use cache::{Cache, MagneticsCache};
pub use catalog::Catalog;
pub use coil::{Bobbin, Coil, CoilFunctionalDescription, IsolationSide, Layer, Section, Turn};
pub use core::{Core, CoreFunctionalDescription, CoreProcessedDescription, CoreType};
pub use error::{Error, Result};
pub use magnetic::Magnetic;
pub use mas::{
    DesignRequirements, ExcitationSignal, Inputs, LossesBreakdown, Mas, OperatingPoint,
    OperatingPointConditions, Outputs, WindingExcitation,
};
pub use material::*;
pub use relative_permeability::*;
pub use settings::Settings;
pub use var_quantity::*;
pub use wire::{Coating, CoatingMaterial, Wire};
