// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Evolve a cooling electron population with the Chang & Cooper scheme.

Electrons are injected with a power-law spectrum and lose energy to
synchrotron radiation at the rate `gdot = cool * gamma^2`, with `cool =
1.29234e-9 B^2`. The continuity equation for the distribution is stepped
implicitly in time following Chang & Cooper (1970;
DOI:[10.1016/0021-9991(70)90001-X](https://dx.doi.org/10.1016/0021-9991(70)90001-X)).
Because cooling only ever moves electrons down in energy, the implicit system
couples each point to its upper neighbor alone, and a single backward sweep
from the top of the grid solves it exactly. No forward elimination is
needed.

After every step the photon spectrum radiated by the current distribution is
integrated over the grid and added to a running total, so the result is the
time-integrated emission over `steps + 1` steps.

The cooling rate depends only on the field and the grid, so the update
coefficients are computed once up front.

*/

use slog::Logger;

use crate::errors::{check_photon_energies, require_finite, require_positive, Error, Result};
use crate::grid::ElectronGrid;
use crate::response::ResponseMatrix;
use crate::COOLING_CONSTANT;

/// The fewest grid points for which there is an interior to update.
pub const MIN_GRID_POINTS: usize = 3;

/// The implicit-update coefficients for the interior grid points.
///
/// Entries `0` and `n - 1` are unused and left at zero; the boundaries are
/// handled separately.
#[derive(Clone, Debug, PartialEq)]
pub struct TridiagonalCoefficients {
    /// Coupling to the already-updated point above, `dt * gdot(j+1) / dgamma`.
    pub upper: Vec<f64>,

    /// The diagonal, `1 + dt * gdot(j) / dgamma`.
    pub diag: Vec<f64>,
}

impl TridiagonalCoefficients {
    /// Compute the coefficients for the cooling rate constant `cool` and time
    /// step `dt`.
    pub fn new(grid: &ElectronGrid, cool: f64, dt: f64) -> Self {
        let n = grid.len();
        let half = grid.half_grid();
        let gamma2 = grid.gamma2();

        let mut upper = vec![0.; n];
        let mut diag = vec![0.; n];

        for j in (1..n - 1).rev() {
            // The half steps are at j + 1/2 and j - 1/2.
            let delta_gamma = 0.5 * (half[j] - half[j - 1]);

            let gdot_plus = cool * gamma2[j + 1];
            let gdot_minus = cool * gamma2[j];

            upper[j] = (dt * gdot_plus) / delta_gamma;
            diag[j] = 1. + (dt * gdot_minus) / delta_gamma;
        }

        TridiagonalCoefficients { upper, diag }
    }
}

/// Inputs to `cool_and_radiate`.
///
/// These are plain numbers with no units attached; see the crate-level
/// constants for the conventions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoolingParameters {
    /// Normalization of the injected electron spectrum.
    pub ne: f64,

    /// Magnetic field strength, in Gauss.
    pub b_field: f64,

    /// Bulk Lorentz factor of the emitting region.
    pub bulk_lorentz_factor: f64,

    /// Lower edge of the injected power law.
    pub gamma_min: f64,

    /// Upper edge of the injected power law.
    pub gamma_max: f64,

    /// Power-law index `p` of the injection, `dN/dgamma ~ gamma^-p`.
    pub index: f64,

    /// The time step.
    pub dt: f64,

    /// Number of points in the electron grid.
    pub n_grid_points: usize,

    /// Number of time steps; `steps + 1` updates are performed.
    pub steps: usize,
}

impl CoolingParameters {
    /// Check that these parameters put us inside the domain of the scheme.
    pub fn validate(&self) -> Result<()> {
        if self.n_grid_points < MIN_GRID_POINTS {
            return Err(Error::TooFewGridPoints(self.n_grid_points));
        }

        require_positive("ne", self.ne)?;
        require_positive("B", self.b_field)?;
        require_positive("bulk_gamma", self.bulk_lorentz_factor)?;
        require_positive("gamma_min", self.gamma_min)?;
        require_positive("gamma_max", self.gamma_max)?;
        require_positive("dt", self.dt)?;
        require_finite("index", self.index)?;

        if self.gamma_max <= self.gamma_min {
            return Err(Error::InvalidParameter {
                name: "gamma_max",
                value: self.gamma_max,
                reason: "must exceed gamma_min",
            });
        }

        if self.gamma_max * 1.1 <= 1. {
            return Err(Error::InvalidParameter {
                name: "gamma_max",
                value: self.gamma_max,
                reason: "grid would not extend past gamma = 1",
            });
        }

        if self.index == 1. {
            return Err(Error::InvalidParameter {
                name: "index",
                value: self.index,
                reason: "power-law normalization is undefined at index 1",
            });
        }

        Ok(())
    }
}

/// The time-stepping state of one cooling run.
///
/// The distribution starts out empty; electrons only appear through the
/// source term.
#[derive(Clone, Debug)]
pub struct ChangCooperSolver<'a> {
    grid: &'a ElectronGrid,
    source: &'a [f64],
    coeffs: TridiagonalCoefficients,
    cool: f64,
    dt: f64,
    delta_top: f64,
    delta_bottom: f64,
    state: Vec<f64>,
    next: Vec<f64>,
}

impl<'a> ChangCooperSolver<'a> {
    /// Set up a solver on `grid` with injection profile `source`.
    ///
    /// # Panics
    ///
    /// Panics if the grid has fewer than `MIN_GRID_POINTS` points or if
    /// `source` is not the same length as the grid. `cool_and_radiate` checks
    /// both before getting here.
    pub fn new(grid: &'a ElectronGrid, source: &'a [f64], b_field: f64, dt: f64) -> Self {
        let n = grid.len();

        assert!(
            n >= MIN_GRID_POINTS,
            "Chang-Cooper grid needs at least {} points, got {}",
            MIN_GRID_POINTS,
            n
        );
        assert_eq!(source.len(), n, "source profile does not match the grid");

        let cool = COOLING_CONSTANT * b_field * b_field;

        ChangCooperSolver {
            grid,
            source,
            coeffs: TridiagonalCoefficients::new(grid, cool, dt),
            cool,
            dt,
            delta_top: grid.delta_top(),
            delta_bottom: grid.delta_bottom(),
            state: vec![0.; n],
            next: vec![0.; n],
        }
    }

    /// The current electron distribution.
    #[inline]
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// The update coefficients.
    #[inline]
    pub fn coefficients(&self) -> &TridiagonalCoefficients {
        &self.coeffs
    }

    /// Advance the distribution by one time step.
    pub fn step(&mut self) {
        let n = self.grid.len();
        let gamma = self.grid.gamma();
        let dt_cool = self.dt * self.cool;

        // The top point only decays; nothing is injected or cools into it.

        self.next[n - 1] = self.state[n - 1]
            / (1. + (dt_cool * gamma[n - 1] * gamma[n - 1]) / self.delta_top);

        // Sweep down through the interior. Each point only needs the freshly
        // updated value just above it.

        for j in (1..n - 1).rev() {
            self.next[j] = (self.state[j] + self.source[j] + self.coeffs.upper[j] * self.next[j + 1])
                / self.coeffs.diag[j];
            self.state[j] = self.next[j];
        }

        // The bottom point collects whatever cools out of the grid.

        self.next[0] = self.state[0]
            + (dt_cool * gamma[1] * gamma[1] * self.next[1]) / self.delta_bottom;
        self.state[0] = self.next[0];
        self.state[n - 1] = self.next[n - 1];
    }

    /// Add the photon spectrum radiated by the current distribution into
    /// `emission`.
    ///
    /// `widths` are the grid cell widths from `ElectronGrid::widths`.
    pub fn accumulate_emission(
        &self,
        response: &ResponseMatrix,
        energies: &[f64],
        widths: &[f64],
        emission: &mut [f64],
    ) {
        let n = self.grid.len();

        for (i, &energy) in energies.iter().enumerate() {
            let row = response.row(i);
            let mut sum = 0_f64;

            for j in 1..n {
                sum += row[j] * self.state[j] * widths[j];
            }

            emission[i] += sum / (2. * energy);
        }
    }
}

/// Inject, cool and radiate a population of electrons.
///
/// The return value is the photon emission accumulated over `steps + 1` time
/// steps, sampled at `energies`. Everything is allocated fresh on every call,
/// so identical inputs give bit-identical outputs.
pub fn cool_and_radiate(energies: &[f64], params: &CoolingParameters, logger: &Logger) -> Result<Vec<f64>> {
    params.validate()?;
    check_photon_energies(energies)?;

    let grid = ElectronGrid::new(params.gamma_max, params.n_grid_points);
    let source = grid.source(params.ne, params.gamma_min, params.gamma_max, params.index);
    let widths = grid.widths();
    let response = ResponseMatrix::new(energies, grid.gamma2(), params.b_field, params.bulk_lorentz_factor);

    let mut solver = ChangCooperSolver::new(&grid, &source, params.b_field, params.dt);
    let mut emission = vec![0.; energies.len()];

    debug!(logger, "beginning cooling run";
           "n_grid" => grid.len(),
           "n_energies" => energies.len(),
           "steps" => params.steps,
           "dt" => params.dt,
           "grid_step" => grid.step(),
           "delta_top" => solver.delta_top,
           "delta_bottom" => solver.delta_bottom,
    );

    for k in 0..=params.steps {
        solver.step();
        solver.accumulate_emission(&response, energies, &widths, &mut emission);

        trace!(logger, "cooling step";
               "k" => k,
               "f_bottom" => solver.state()[0],
               "f_top" => solver.state()[grid.len() - 1],
        );
    }

    Ok(emission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slog::Discard;

    fn quiet() -> Logger {
        Logger::root(Discard, o!())
    }

    fn params() -> CoolingParameters {
        CoolingParameters {
            ne: 1.,
            b_field: 100.,
            bulk_lorentz_factor: 1.,
            gamma_min: 5e5,
            gamma_max: 1e8,
            index: 3.5,
            dt: 1. / (100. * 100. * COOLING_CONSTANT) / 1e8,
            n_grid_points: 300,
            steps: 1,
        }
    }

    #[test]
    fn coefficients_interior_only() {
        let grid = ElectronGrid::new(1e4, 10);
        let c = TridiagonalCoefficients::new(&grid, 1e-3, 0.5);
        let half = grid.half_grid();

        assert_eq!(c.upper[0], 0.);
        assert_eq!(c.diag[0], 0.);
        assert_eq!(c.upper[9], 0.);
        assert_eq!(c.diag[9], 0.);

        for j in 1..9 {
            let dg = 0.5 * (half[j] - half[j - 1]);
            assert_eq!(c.upper[j], 0.5 * (1e-3 * grid.gamma2()[j + 1]) / dg);
            assert_eq!(c.diag[j], 1. + 0.5 * (1e-3 * grid.gamma2()[j]) / dg);
            assert!(c.diag[j] > 1.);
        }
    }

    /// With no cooling, the interior just accumulates the source every step
    /// and the boundaries stay empty.
    #[test]
    fn no_cooling_accumulates_source() {
        let grid = ElectronGrid::new(1e3, 12);
        let source = grid.source(1., 3., 500., 2.5);
        let mut solver = ChangCooperSolver::new(&grid, &source, 0., 1.);

        for _ in 0..4 {
            solver.step();
        }

        assert_eq!(solver.state()[0], 0.);
        assert_eq!(solver.state()[11], 0.);

        for j in 1..11 {
            assert_approx_eq!(solver.state()[j], 4. * source[j], 1e-12 * source[j] + 1e-300);
        }
    }

    /// Cooling keeps the distribution nonnegative and pushes electrons into
    /// the bottom bin.
    #[test]
    fn positivity_and_pileup() {
        let grid = ElectronGrid::new(1e4, 40);
        let source = grid.source(1., 10., 1e4, 2.2);
        let mut solver = ChangCooperSolver::new(&grid, &source, 10., 1e3);

        let mut bottom = 0.;

        for _ in 0..20 {
            solver.step();
            assert!(solver.state().iter().all(|&f| f >= 0. && f.is_finite()));
            assert!(solver.state()[0] >= bottom);
            bottom = solver.state()[0];
        }

        assert!(bottom > 0.);
    }

    /// A single step by hand on the smallest possible grid.
    #[test]
    fn three_point_step() {
        let grid = ElectronGrid::new(10., 3);
        let source = vec![0., 2., 0.];
        let (b, dt) = (1e4, 0.25);
        let mut solver = ChangCooperSolver::new(&grid, &source, b, dt);
        solver.step();

        let cool = COOLING_CONSTANT * b * b;
        let g = grid.gamma();
        let half = grid.half_grid();
        let dg = 0.5 * (half[1] - half[0]);
        let diag = 1. + (dt * cool * g[1] * g[1]) / dg;
        let mid = 2. / diag;
        let bottom = (dt * cool * g[1] * g[1] * mid) / grid.delta_bottom();

        assert_eq!(solver.state()[2], 0.);
        assert_approx_eq!(solver.state()[1], mid, 1e-14);
        assert_approx_eq!(solver.state()[0], bottom, 1e-14);
    }

    #[test]
    #[should_panic(expected = "at least 3 points")]
    fn solver_needs_an_interior() {
        let grid = ElectronGrid::new(10., 2);
        let source = vec![0.; 2];
        ChangCooperSolver::new(&grid, &source, 1., 1.);
    }

    #[test]
    #[should_panic(expected = "does not match the grid")]
    fn solver_needs_matching_source() {
        let grid = ElectronGrid::new(10., 5);
        let source = vec![1.; 4];
        ChangCooperSolver::new(&grid, &source, 1., 1.);
    }

    #[test]
    fn emission_is_finite_and_nonnegative() {
        let energies: Vec<f64> = (0..100).map(|i| 10_f64.powf(1. + 4. * i as f64 / 99.)).collect();
        let e = cool_and_radiate(&energies, &params(), &quiet()).unwrap();

        assert_eq!(e.len(), 100);
        assert!(e.iter().all(|v| v.is_finite() && *v >= 0.));
        assert!(e.iter().any(|v| *v > 0.));
    }

    #[test]
    fn repeatable() {
        let energies = [1., 10., 100., 1000.];
        let a = cool_and_radiate(&energies, &params(), &quiet()).unwrap();
        let b = cool_and_radiate(&energies, &params(), &quiet()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn linear_in_ne() {
        let energies = [1., 10., 100., 1000.];
        let one = cool_and_radiate(&energies, &params(), &quiet()).unwrap();

        let mut p = params();
        p.ne = 2.;
        let two = cool_and_radiate(&energies, &p, &quiet()).unwrap();

        for (a, b) in one.iter().zip(two.iter()) {
            assert_approx_eq!(*b, 2. * a, 1e-12 * a.abs());
        }
    }

    /// More time steps means more accumulated emission.
    #[test]
    fn emission_accumulates() {
        let energies = [1., 10., 100.];
        let mut p = params();
        p.n_grid_points = 60;
        let short = cool_and_radiate(&energies, &p, &quiet()).unwrap();

        p.steps = 5;
        let long = cool_and_radiate(&energies, &p, &quiet()).unwrap();

        for (s, l) in short.iter().zip(long.iter()) {
            assert!(l > s);
        }
    }

    #[test]
    fn rejects_bad_inputs() {
        let log = quiet();
        let e = [1., 2.];

        let mut p = params();
        p.n_grid_points = 2;
        assert_eq!(cool_and_radiate(&e, &p, &log), Err(Error::TooFewGridPoints(2)));

        let mut p = params();
        p.gamma_max = p.gamma_min;
        assert!(cool_and_radiate(&e, &p, &log).is_err());

        let mut p = params();
        p.b_field = -1.;
        assert!(cool_and_radiate(&e, &p, &log).is_err());

        let mut p = params();
        p.index = 1.;
        assert!(cool_and_radiate(&e, &p, &log).is_err());

        let mut p = params();
        p.gamma_min = 0.1;
        p.gamma_max = 0.5;
        assert!(cool_and_radiate(&e, &p, &log).is_err());

        match cool_and_radiate(&[1., f64::NAN], &params(), &log) {
            Err(Error::InvalidPhotonEnergy { index: 1, value }) => assert!(value.is_nan()),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
