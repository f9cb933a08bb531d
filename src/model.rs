// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The numerical synchrotron spectral model.

This turns the physical parameters a fitting framework knows about into the
inputs of the cooling calculation, runs it, and scales the result into the
flux convention the model is fit with.

The number of time steps is the ratio of `gamma_max` to `gamma_cool`, rounded
to the nearest integer with ties going to even. The time step is the
synchrotron cooling time of an electron with unit Lorentz factor divided by
`gamma_max`, so that the run lasts as long as it takes an electron at
`gamma_cool` to cool.

*/

use slog::{Discard, Logger};

use crate::chang_cooper::{cool_and_radiate, CoolingParameters};
use crate::errors::{check_photon_energies, require_positive, Error, Result};
use crate::{COOLING_CONSTANT, EMISSION_NORM, ERG_TO_KEV, OUTPUT_SCALE};

/// The default number of electron grid points.
pub const DEFAULT_GRID_POINTS: usize = 300;

/// The largest `gamma_max / gamma_cool` ratio, and so the most time steps, a
/// model will run.
pub const MAX_STEPS: f64 = u32::MAX as f64;

/// Metadata about one of the model's fittable parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParameterSpec {
    /// The parameter name.
    pub name: &'static str,

    /// A short description.
    pub description: &'static str,

    /// The value a new model starts out with.
    pub initial: f64,

    /// The lower bound a fitter should respect, if any.
    pub min: Option<f64>,

    /// The upper bound a fitter should respect, if any.
    pub max: Option<f64>,

    /// Whether the parameter is held fixed by default.
    pub fixed: bool,
}

impl ParameterSpec {
    /// Find the parameter called `name`.
    pub fn lookup(name: &str) -> Option<&'static ParameterSpec> {
        PARAMETERS.iter().find(|p| p.name == name)
    }

    /// Whether `value` is inside this parameter's fitting bounds.
    pub fn admits(&self, value: f64) -> bool {
        self.min.map_or(true, |m| value >= m) && self.max.map_or(true, |m| value <= m)
    }
}

/// The model's parameters, in the order the spectral function takes them.
pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        name: "K",
        description: "normalization",
        initial: 1.,
        min: Some(0.),
        max: None,
        fixed: false,
    },
    ParameterSpec {
        name: "B",
        description: "magnetic field strength",
        initial: 1e2,
        min: Some(0.01),
        max: None,
        fixed: false,
    },
    ParameterSpec {
        name: "index",
        description: "spectral index of the injected electrons",
        initial: 3.5,
        min: Some(2.),
        max: Some(6.),
        fixed: false,
    },
    ParameterSpec {
        name: "gamma_min",
        description: "minimum injected electron Lorentz factor",
        initial: 5e5,
        min: Some(1.),
        max: None,
        fixed: true,
    },
    ParameterSpec {
        name: "gamma_cool",
        description: "Lorentz factor electrons cool down to in the emission time",
        initial: 9e7,
        min: Some(5e2),
        max: None,
        fixed: false,
    },
    ParameterSpec {
        name: "gamma_max",
        description: "maximum injected electron Lorentz factor",
        initial: 1e8,
        min: Some(1e6),
        max: None,
        fixed: true,
    },
    ParameterSpec {
        name: "bulk_gamma",
        description: "bulk Lorentz factor",
        initial: 1.,
        min: Some(1.),
        max: None,
        fixed: true,
    },
];

fn initial(name: &str) -> f64 {
    ParameterSpec::lookup(name).map_or(f64::NAN, |p| p.initial)
}

/// Synchrotron emission from a continuously injected, cooling population of
/// electrons.
///
/// Start from `SynchrotronModel::new()`, which uses the default parameter
/// values, and override what you need:
///
/// ```
/// use rynchrotron::SynchrotronModel;
///
/// let flux = SynchrotronModel::new()
///     .b_field(50.)
///     .gamma_limits(1e5, 3e7, 1e8)
///     .evaluate(&[10., 100., 1000.])
///     .unwrap();
/// assert_eq!(flux.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct SynchrotronModel {
    k: f64,
    b_field: f64,
    index: f64,
    gamma_min: f64,
    gamma_cool: f64,
    gamma_max: f64,
    bulk_gamma: f64,
    n_grid_points: usize,
    logger: Logger,
}

impl Default for SynchrotronModel {
    fn default() -> Self {
        SynchrotronModel::new()
    }
}

impl SynchrotronModel {
    /// Create a model with every parameter at its initial value.
    pub fn new() -> Self {
        SynchrotronModel {
            k: initial("K"),
            b_field: initial("B"),
            index: initial("index"),
            gamma_min: initial("gamma_min"),
            gamma_cool: initial("gamma_cool"),
            gamma_max: initial("gamma_max"),
            bulk_gamma: initial("bulk_gamma"),
            n_grid_points: DEFAULT_GRID_POINTS,
            logger: Logger::root(Discard, o!()),
        }
    }

    /// Set the normalization `K`.
    pub fn k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    /// Set the magnetic field strength, in Gauss.
    pub fn b_field(mut self, b_field: f64) -> Self {
        self.b_field = b_field;
        self
    }

    /// Set the power-law index of the injected electrons.
    pub fn index(mut self, index: f64) -> Self {
        self.index = index;
        self
    }

    /// Set the injection limits and the cooling Lorentz factor.
    pub fn gamma_limits(mut self, gamma_min: f64, gamma_cool: f64, gamma_max: f64) -> Self {
        self.gamma_min = gamma_min;
        self.gamma_cool = gamma_cool;
        self.gamma_max = gamma_max;
        self
    }

    /// Set the bulk Lorentz factor of the emitting region.
    pub fn bulk_gamma(mut self, bulk_gamma: f64) -> Self {
        self.bulk_gamma = bulk_gamma;
        self
    }

    /// Set the number of electron grid points.
    pub fn grid_points(mut self, n: usize) -> Self {
        self.n_grid_points = n;
        self
    }

    /// Log the calculation to `logger`.
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// The synchrotron cooling time, `1 / (1.29234e-9 B^2)`.
    pub fn cooling_time(&self) -> f64 {
        1. / (self.b_field * self.b_field * COOLING_CONSTANT)
    }

    /// The time step handed to the solver.
    pub fn time_step(&self) -> f64 {
        self.cooling_time() / self.gamma_max
    }

    /// The number of time steps, `gamma_max / gamma_cool` rounded to the
    /// nearest integer with ties to even.
    pub fn steps(&self) -> usize {
        (self.gamma_max / self.gamma_cool).round_ties_even() as usize
    }

    /// The parameters that will be handed to the cooling calculation.
    pub fn cooling_parameters(&self) -> CoolingParameters {
        CoolingParameters {
            ne: 1.,
            b_field: self.b_field,
            bulk_lorentz_factor: self.bulk_gamma,
            gamma_min: self.gamma_min,
            gamma_max: self.gamma_max,
            index: self.index,
            dt: self.time_step(),
            n_grid_points: self.n_grid_points,
            steps: self.steps(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.k.is_finite() && self.k >= 0.) {
            return Err(Error::InvalidParameter {
                name: "K",
                value: self.k,
                reason: "must be finite and nonnegative",
            });
        }

        require_positive("gamma_cool", self.gamma_cool)?;

        let ratio = self.gamma_max / self.gamma_cool;

        if !(ratio <= MAX_STEPS) {
            return Err(Error::InvalidParameter {
                name: "gamma_cool",
                value: self.gamma_cool,
                reason: "too small relative to gamma_max; the run would never finish",
            });
        }

        self.cooling_parameters().validate()
    }

    /// Evaluate the spectrum at the photon energies `energies`, in keV.
    pub fn evaluate(&self, energies: &[f64]) -> Result<Vec<f64>> {
        self.validate()?;
        check_photon_energies(energies)?;

        let params = self.cooling_parameters();

        debug!(self.logger, "evaluating synchrotron model";
               "K" => self.k,
               "B" => self.b_field,
               "index" => self.index,
               "gamma_min" => self.gamma_min,
               "gamma_cool" => self.gamma_cool,
               "gamma_max" => self.gamma_max,
               "bulk_gamma" => self.bulk_gamma,
               "steps" => params.steps,
        );

        if params.steps == 0 {
            return Ok(vec![0.; energies.len()]);
        }

        let emission = cool_and_radiate(energies, &params, &self.logger)?;

        let norm = self.bulk_gamma * self.b_field * EMISSION_NORM;
        let prefactor = self.k * ERG_TO_KEV * norm;
        let cool_factor = self.gamma_cool.powf(1.5);

        Ok(emission
            .into_iter()
            .map(|e| prefactor * e * OUTPUT_SCALE * cool_factor / self.gamma_max)
            .collect())
    }

    /// Evaluate the spectrum at a single photon energy, in keV.
    pub fn evaluate_at(&self, energy: f64) -> Result<f64> {
        Ok(self.evaluate(&[energy])?[0])
    }
}
