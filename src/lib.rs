// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Synchrotron emission from a cooling population of relativistic electrons.

Electrons are injected continuously with a power-law energy spectrum into a
region with a fixed magnetic field. They lose energy to synchrotron radiation,
and we track their energy distribution in time with the implicit
finite-difference scheme of Chang & Cooper. At each time step the photon
spectrum radiated by the current population is integrated over the electron
distribution and added to the total, so the result is a time-integrated
spectrum.

The pieces, from the bottom up:

- `chebyshev` evaluates truncated Chebyshev series.
- `kernel` computes the single-electron synchrotron kernel `F(x)` from three
  fixed Chebyshev fits.
- `grid` builds the logarithmic Lorentz-factor grid and the injection profile.
- `response` tabulates the kernel for every photon energy and grid point.
- `chang_cooper` steps the distribution in time and accumulates the emission.
- `model` maps the physical parameters of a spectral fit onto all of the
  above.

Everything here is a pure function of its inputs: there is no global state and
nothing is cached between calls. All quantities are plain `f64`s; photon
energies are in keV, the field in Gauss.

*/

#![deny(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;
#[macro_use]
extern crate slog;

pub mod chang_cooper;
pub mod chebyshev;
pub mod errors;
pub mod grid;
pub mod kernel;
pub mod model;
pub mod response;

pub use chang_cooper::{cool_and_radiate, ChangCooperSolver, CoolingParameters, TridiagonalCoefficients};
pub use errors::{Error, Result};
pub use grid::ElectronGrid;
pub use kernel::synchrotron_kernel;
pub use model::{ParameterSpec, SynchrotronModel, DEFAULT_GRID_POINTS, MAX_STEPS, PARAMETERS};
pub use response::ResponseMatrix;

/// The synchrotron cooling constant: `gamma_dot = COOLING_CONSTANT * B^2 *
/// gamma^2`, with *B* in Gauss and time in seconds.
pub const COOLING_CONSTANT: f64 = 1.29234e-9;

/// The characteristic synchrotron energy of an electron with unit Lorentz
/// factor, in keV per Gauss.
pub const CHARACTERISTIC_ENERGY: f64 = 1.7365145e-11;

/// The single-electron emission normalization per Gauss,
/// `sqrt(3) e^3 / (m_e c^2)` in cgs.
pub const EMISSION_NORM: f64 = 3.7797251e-22;

/// Ergs to keV.
pub const ERG_TO_KEV: f64 = 6.242e8;

/// The fixed overall scaling of the model output.
pub const OUTPUT_SCALE: f64 = 1e11;
