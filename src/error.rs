/*!
Domain error taxonomy for the magnetic design engine.

A hand-written `Display`/`Error` impl makes sense for a handful of error
variants, but this crate's taxonomy spans parsing, geometry, solver
convergence and external-process failures; [`thiserror`] carries that
shape of information with far less boilerplate. See `DESIGN.md`.
*/

use crate::iron_losses::jordan_model::FailedCoefficientCalculation;

/// Top-level error type returned by fallible operations across the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog JSON does not match the expected schema, or an enum string is
    /// unrecognized.
    #[error("failed to parse catalog entry: {0}")]
    Parse(String),

    /// A reference by name to a core/material/wire/bobbin/insulation is not
    /// present in the catalog.
    #[error("unknown {kind} referenced by name: {name}")]
    UnknownEntity {
        /// Kind of catalog entry that was looked up (`"shape"`, `"material"`, ...).
        kind: &'static str,
        /// The name that failed to resolve.
        name: String,
    },

    /// A computed shape constant is non-positive, or a family is missing a
    /// required dimension letter.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// An inconsistent converter specification (e.g. `maxDutyCycle > 1`, no
    /// input voltage, empty operating-point list, mismatched winding counts
    /// across operating points).
    #[error("invalid design requirements: {0}")]
    InvalidDesignRequirements(String),

    /// Coil synthesis could not place all turns. Recoverable: the adviser
    /// records this as a filter veto and proceeds to the next candidate.
    #[error("coil synthesis could not fit all turns: {0}")]
    FitFailure(String),

    /// The nonlinear solver did not converge within its evaluation budget.
    /// Recoverable: the affected filter returns an infinite penalty.
    #[error("nonlinear solver failed to converge: {0}")]
    SolverFailure(String),

    /// Coefficient fitting for an iron-loss or permeability model failed.
    #[error("model coefficient fit failed: {0}")]
    FitCoefficients(#[from] FailedCoefficientCalculation),

    /// The external circuit simulator is not available in this environment.
    #[error("external circuit simulator is unavailable: {0}")]
    SimulatorUnavailable(String),

    /// The external circuit simulator returned a nonzero status or
    /// unparsable output.
    #[error("external circuit simulator failed: {0}")]
    SimulatorFailure(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
