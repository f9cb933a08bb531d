// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The photon-energy × electron-grid emission response.

Evaluating the synchrotron kernel is the expensive part of the inner loop, and
its argument doesn't change as the electrons cool, so we tabulate it once for
every pair of photon energy and grid point.

*/

use crate::kernel::synchrotron_kernel;
use crate::CHARACTERISTIC_ENERGY;

/// A dense table of kernel values, one row per photon energy and one column
/// per electron grid point. Rows are stored contiguously.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseMatrix {
    n_grid: usize,
    data: Vec<f64>,
}

impl ResponseMatrix {
    /// Tabulate `F(energy[i] / (ec * gamma2[j]))`, where the characteristic
    /// energy is `ec = b_field * bulk_lorentz_factor * 1.7365145e-11`.
    pub fn new(energies: &[f64], gamma2: &[f64], b_field: f64, bulk_lorentz_factor: f64) -> Self {
        let n_grid = gamma2.len();
        let mut data = Vec::with_capacity(energies.len() * n_grid);

        let ec = b_field * bulk_lorentz_factor * CHARACTERISTIC_ENERGY;

        for &energy in energies {
            let arg1 = energy / ec;

            for &g2 in gamma2 {
                data.push(synchrotron_kernel(arg1 / g2));
            }
        }

        ResponseMatrix { n_grid, data }
    }

    /// The number of photon energies (rows).
    #[inline]
    pub fn n_energies(&self) -> usize {
        if self.n_grid == 0 {
            0
        } else {
            self.data.len() / self.n_grid
        }
    }

    /// The number of electron grid points (columns).
    #[inline]
    pub fn n_grid(&self) -> usize {
        self.n_grid
    }

    /// The kernel values for photon energy `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_grid..(i + 1) * self.n_grid]
    }

    /// The kernel value for photon energy `i` and grid point `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.row(i)[j]
    }
}
