// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Error types.
//!
//! The numerics themselves can't fail once their inputs are sane, so all of
//! these come out of the parameter checks at the entry points.

use thiserror::Error;

/// Something about the inputs puts the calculation outside of its domain.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// A physical or numerical parameter is out of bounds.
    #[error("invalid parameter {name} = {value:e}: {reason}")]
    InvalidParameter {
        /// The parameter's name, as used in `PARAMETERS`.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// What the value should have been.
        reason: &'static str,
    },

    /// The Chang-Cooper update needs at least one interior grid point.
    #[error("need at least 3 electron grid points, got {0}")]
    TooFewGridPoints(usize),

    /// A photon energy that isn't finite and positive.
    #[error("photon energy #{index} = {value:e} must be finite and positive")]
    InvalidPhotonEnergy {
        /// Position of the energy in the input slice.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

/// The usual result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Require that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}

/// Require that `value` is finite.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

/// Require that every photon energy is finite and strictly positive.
pub(crate) fn check_photon_energies(energies: &[f64]) -> Result<()> {
    match energies
        .iter()
        .position(|e| !(e.is_finite() && *e > 0.))
    {
        Some(index) => Err(Error::InvalidPhotonEnergy {
            index,
            value: energies[index],
        }),
        None => Ok(()),
    }
}
