/*!
Trait contracts for the two external collaborators §9 calls out: the
embedded nonlinear-equation solver (Powell hybrid with dogleg step) used for
backward-Euler / BDF2 / trapezoidal ODE residuals during transient inverter
simulation, and the external SPICE-class circuit simulator invoked as a
subprocess over a generated netlist.

Neither is implemented here as a full numerical routine or subprocess
manager (§2 Non-goals: "the embedded Powell solver, the external SPICE
engine ... remain external collaborators: this crate defines the
traits/contracts they must satisfy"). What this module ships is:

- [`NonlinearSolver`], the residual-function contract any Powell-hybrid
  implementation must satisfy, plus [`LeastSquaresSolver`], an `argmin`-backed
  implementation generalized from [`crate::iron_losses::jordan_model::IronLossData::solve_for_coefficients`]
  so that fitting machinery is reusable for any `Vec<f64> -> f64` cost
  function, not just the Jordan coefficients.
- [`CircuitSimulator`], the subprocess contract for the external netlist
  runner, plus [`UnavailableSimulator`], a documented stub that always
  returns [`Error::SimulatorUnavailable`].
*/

use crate::error::{Error, Result};
use argmin::core::{CostFunction, Executor, OptimizationResult, State};
use argmin::solver::neldermead::NelderMead;

/// A residual function for the Powell-hybrid nonlinear solver: `n` unknowns
/// in, `n` residuals out. Implementations must be pure (§9: "each evaluation
/// is pure and bounded") - no shared mutable state, no I/O.
pub trait ResidualFunction {
    /// Number of unknowns (and residuals).
    fn len(&self) -> usize;

    /// Evaluates the residual vector at `x`. `x.len()` and the returned
    /// vector's length must both equal [`ResidualFunction::len`].
    fn residuals(&self, x: &[f64]) -> Vec<f64>;
}

/// Contract for a Powell-hybrid / dogleg nonlinear-equation solver (§9): a
/// pure function of `(residual_fn, x0, tol)` bounded to `maxfev =
/// 200*(n+1)` residual evaluations (§8). Implementations treat a call as
/// blocking and time-bounded; callers must not assume cancellation mid-call.
pub trait NonlinearSolver {
    /// Solves `residual_fn.residuals(x) == 0` starting from `x0`, stopping
    /// once the residual norm drops below `tol` or `maxfev` evaluations are
    /// spent. Returns [`Error::SolverFailure`] on non-convergence.
    fn solve(&self, residual_fn: &dyn ResidualFunction, x0: &[f64], tol: f64) -> Result<Vec<f64>>;
}

/// Upper bound on residual evaluations per solve, `maxfev = 200*(n+1)` (§8).
pub fn max_function_evaluations(n: usize) -> usize {
    return 200 * (n + 1);
}

/// A cost function for least-squares fitting: `n` parameters in, one scalar
/// cost out. This is the `Vec<f64> -> f64` shape
/// [`crate::iron_losses::jordan_model::FitLossCurve`] already implements for
/// the Jordan model; [`LeastSquaresSolver`] generalizes that fitting path to
/// any cost function of this shape.
pub trait ScalarCostFunction {
    /// Evaluates the scalar cost at `params`.
    fn cost(&self, params: &[f64]) -> f64;
}

struct ArgminCost<'a>(&'a dyn ScalarCostFunction);

impl CostFunction for ArgminCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, p: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
        return Ok(self.0.cost(p));
    }
}

/// An `argmin` Nelder-Mead least-squares fitter, generalized from
/// [`crate::iron_losses::jordan_model::IronLossData::solve_for_coefficients`]:
/// same solver, same simplex-from-multiple-start-points construction, now
/// parameterized over any [`ScalarCostFunction`] instead of being hardwired
/// to the Jordan coefficients.
pub struct LeastSquaresSolver {
    /// Simplex start points, one `Vec<f64>` per vertex (`n + 1` vertices for
    /// `n` parameters, as Nelder-Mead requires).
    pub start_values: Vec<Vec<f64>>,
    /// Standard-deviation convergence tolerance.
    pub sd_tolerance: f64,
    /// Maximum solver iterations (distinct from `maxfev`: this bounds
    /// Nelder-Mead simplex steps, not residual-function calls).
    pub max_iters: u64,
}

impl LeastSquaresSolver {
    /// Fits `cost_fn`, returning the best parameter vector found.
    pub fn fit(&self, cost_fn: &dyn ScalarCostFunction) -> Result<Vec<f64>> {
        let problem = ArgminCost(cost_fn);
        let solver = NelderMead::new(self.start_values.clone())
            .with_sd_tolerance(self.sd_tolerance)
            .map_err(|error| {
                log::warn!("least-squares solver setup failed: {error}");
                Error::SolverFailure(error.to_string())
            })?;

        let result: OptimizationResult<_, _, _> = Executor::new(problem, solver)
            .configure(|state| state.max_iters(self.max_iters))
            .run()
            .map_err(|error| {
                log::warn!("least-squares solver did not converge: {error}");
                Error::SolverFailure(error.to_string())
            })?;

        return result.state.get_best_param().cloned().ok_or_else(|| {
            log::warn!("least-squares solver produced no best parameter");
            Error::SolverFailure("optimizer produced no best parameter".to_string())
        });
    }
}

/// Output of an [external simulator](CircuitSimulator) run: time-domain
/// samples folded back into `OperatingPoint` excitations (§9).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationTrace {
    /// Uniform time step between samples, seconds.
    pub time_step: f64,
    /// Node voltages, keyed by netlist node name.
    pub node_voltages: Vec<(String, Vec<f64>)>,
    /// Branch currents, keyed by netlist element name (e.g. `"Lpri"`).
    pub branch_currents: Vec<(String, Vec<f64>)>,
}

/// Contract for the external SPICE-class circuit simulator (§6, §9):
/// invoked as a subprocess over a generated netlist (fixed element naming:
/// `Vin`, `S1..S4`, `C_res1`, `L_res1`, `Lpri`, `Lsec`, `L_res2`, `C_res2`,
/// `Ds1..Ds4`, `Cout`, `Rload`, `.tran`, `.end`), its standard output parsed
/// back into node voltages and branch currents. Implementations are
/// responsible for subprocess cancellation (kill the PID) and temp-file
/// cleanup on every exit path - neither is this trait's concern.
pub trait CircuitSimulator {
    /// Runs `netlist` and returns the parsed trace, or
    /// [`Error::SimulatorUnavailable`] / [`Error::SimulatorFailure`].
    fn run(&self, netlist: &str) -> Result<SimulationTrace>;
}

/// A [`CircuitSimulator`] that is always absent. This is the production
/// default referenced by every converter topology's `emit_netlist` /
/// simulate path until a real ngspice subprocess runner is wired in -
/// callers get a typed, recoverable error rather than a silent no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSimulator;

impl CircuitSimulator for UnavailableSimulator {
    fn run(&self, _netlist: &str) -> Result<SimulationTrace> {
        return Err(Error::SimulatorUnavailable(
            "no external circuit simulator is configured".to_string(),
        ));
    }
}
