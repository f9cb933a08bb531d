// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The electron Lorentz-factor grid and the injected power law.

The grid is geometric, starting at `gamma = 1`. Its ratio is chosen so that
the top point lands at `1.1 * gamma_max`, a bit above the nominal maximum, so
that the injected power law isn't truncated by the edge of the grid.

The half-step grid holds the midpoints used for the flux differencing. It has
`n + 1` slots but only the first `n` are meaningful: slot `j` is the midpoint
between `gamma[j]` and `gamma[j] * step`, and the last slot stays zero. The
solver only ever reads up to index `n - 1`.

*/

/// The (immutable) electron Lorentz-factor grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ElectronGrid {
    step: f64,
    gamma: Vec<f64>,
    gamma2: Vec<f64>,
    half_grid: Vec<f64>,
}

impl ElectronGrid {
    /// Build a grid of `n` points reaching slightly past `gamma_max`.
    ///
    /// The caller is responsible for checking that `n >= 3` and `gamma_max` is
    /// big enough for the ratio to exceed unity; `cool_and_radiate` does so.
    pub fn new(gamma_max: f64, n: usize) -> Self {
        let step = (1. / n as f64 * (gamma_max * 1.1).ln()).exp();

        let mut gamma = vec![0.; n];
        let mut gamma2 = vec![0.; n];
        let mut half_grid = vec![0.; n + 1];

        for j in 0..n {
            gamma[j] = step.powf(j as f64);
            gamma2[j] = gamma[j] * gamma[j];
            half_grid[j] = 0.5 * (gamma[j] + gamma[j] * step);
        }

        ElectronGrid {
            step,
            gamma,
            gamma2,
            half_grid,
        }
    }

    /// The number of grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.gamma.len()
    }

    /// Whether the grid has no points at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gamma.is_empty()
    }

    /// The ratio between consecutive grid points.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The Lorentz factors.
    #[inline]
    pub fn gamma(&self) -> &[f64] {
        &self.gamma
    }

    /// The squared Lorentz factors.
    #[inline]
    pub fn gamma2(&self) -> &[f64] {
        &self.gamma2
    }

    /// The half-step midpoints; see the module docs for the index convention.
    #[inline]
    pub fn half_grid(&self) -> &[f64] {
        &self.half_grid
    }

    /// The width of the top cell, `G[n-1] - G[n-2]`.
    ///
    /// # Panics
    ///
    /// Panics if the grid has fewer than two points.
    pub fn delta_top(&self) -> f64 {
        let n = self.len();
        self.half_grid[n - 1] - self.half_grid[n - 2]
    }

    /// The width of the bottom cell, `G[1] - G[0]`.
    ///
    /// # Panics
    ///
    /// Panics if the grid has no points.
    pub fn delta_bottom(&self) -> f64 {
        self.half_grid[1] - self.half_grid[0]
    }

    /// The widths `gamma[j] - gamma[j-1]` used in the emission integral.
    /// Entry zero is zero since the sum starts at `j = 1`.
    pub fn widths(&self) -> Vec<f64> {
        let mut w = vec![0.; self.len()];

        for j in 1..self.len() {
            w[j] = self.gamma[j] - self.gamma[j - 1];
        }

        w
    }

    /// Compute the power-law injection profile over this grid.
    ///
    /// Points strictly between `gamma_min` and `gamma_max` receive
    /// `ne * gamma^-index * (1 - index) / (gamma_max^(1-index) -
    /// gamma_min^(1-index))`; everything else, including points sitting
    /// exactly on either bound, gets zero.
    pub fn source(&self, ne: f64, gamma_min: f64, gamma_max: f64, index: f64) -> Vec<f64> {
        let pm1 = 1. - index;
        let denom = gamma_max.powf(pm1) - gamma_min.powf(pm1);

        self.gamma
            .iter()
            .map(|&g| {
                if g > gamma_min && g < gamma_max {
                    ne * g.powf(-index) * pm1 * 1. / denom
                } else {
                    0.
                }
            })
            .collect()
    }
}
