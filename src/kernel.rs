// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The synchrotron kernel function.

This is `F(x) = x ∫_x^∞ K_{5/3}(t) dt`, the spectral shape of the emission
from a single electron, computed the same way as GSL's
`gsl_sf_synchrotron_1`. There are four regimes: a two-term asymptotic form at
tiny *x*, a pair of Chebyshev fits up to *x* = 4, a third Chebyshev fit
multiplied by the exponential tail beyond that, and zero once the exponential
would underflow.

The coefficient tables are GSL's and must not be touched.

*/

use std::f64;

use crate::chebyshev::ChebyshevSeries;

const SQRT_DBL_EPSILON: f64 = 1.4901161193847656e-08;
const LOG_DBL_MIN: f64 = -7.0839641853226408e02;

/// Below this, the small-argument expansion is used.
pub const COND1: f64 = 2. * f64::consts::SQRT_2 * SQRT_DBL_EPSILON;

/// At and above this, the kernel is identically zero.
pub const COND3: f64 = -8. * LOG_DBL_MIN / 7.;

/// The coefficient of the linear term subtracted in the middle regime,
/// `π / √3`.
const C0: f64 = f64::consts::PI / 1.7320508075688772935274463;

const C01: f64 = 0.2257913526447274323630976;

/// Leading coefficient of the small-argument form, `4π / (√3 Γ(1/3) 2^(1/3))`.
const SMALL_X_SCALE: f64 = 2.14952824153447863671;

/// Coefficient of the `x^(2/3)` correction in the small-argument form.
const SMALL_X_CORRECTION: f64 = 8.43812762813205e-01;

/// GSL's `synchrotron1_data`, used for `COND1 <= x <= 4`.
pub const SYNCHROTRON1: ChebyshevSeries = ChebyshevSeries {
    coeffs: &[
        30.364682982501076273,
        17.079395277408394574,
        4.560132133545072889,
        0.549281246730419979,
        0.372976075069301172e-01,
        0.161362430201041242e-02,
        0.481916772120371e-04,
        0.10512425288938e-05,
        0.174638504670e-07,
        0.22815486544e-09,
        0.240443082e-11,
        0.2086588e-13,
        0.15167e-15,
    ],
    order: 12,
    a: -1.,
    b: 1.,
};

/// GSL's `synchrotron2_data`, the `x^(11/3)` companion of `SYNCHROTRON1`.
pub const SYNCHROTRON2: ChebyshevSeries = ChebyshevSeries {
    coeffs: &[
        0.4490721623532660844,
        0.898353677994187218e-01,
        0.81044573772151290e-02,
        0.4261716991089162e-03,
        0.147609631270746e-04,
        0.3628633615300e-06,
        0.66634807498e-08,
        0.949077166e-10,
        0.1079125e-11,
        0.10022e-13,
        0.77e-16,
        0.5e-18,
    ],
    order: 11,
    a: -1.,
    b: 1.,
};

/// GSL's `synchrotron1a_data`, used for `4 < x < COND3`.
pub const SYNCHROTRON1A: ChebyshevSeries = ChebyshevSeries {
    coeffs: &[
        2.1329305161355000985,
        0.741352864954200240e-01,
        0.86968099909964198e-02,
        0.11703826248775692e-02,
        0.1645105798619192e-03,
        0.240201021420640e-04,
        0.35827756389389e-05,
        0.5447747626984e-06,
        0.838802856196e-07,
        0.13069882684e-07,
        0.2053099071e-08,
        0.325187537e-09,
        0.517914041e-10,
        0.83002988e-11,
        0.13352728e-11,
        0.2159150e-12,
        0.349967e-13,
        0.56994e-14,
        0.9291e-15,
        0.152e-15,
        0.249e-16,
        0.41e-17,
        0.7e-18,
    ],
    order: 22,
    a: -1.,
    b: 1.,
};

/// Evaluate the synchrotron kernel `F(x)`.
///
/// *x* must be nonnegative; callers get that for free since it is always a
/// ratio of an energy to a squared Lorentz factor.
pub fn synchrotron_kernel(x: f64) -> f64 {
    if x < COND1 {
        let z = x.powf(1. / 3.);
        let cf = 1. - SMALL_X_CORRECTION * z * z;
        SMALL_X_SCALE * z * cf
    } else if x <= 4. {
        let px = x.powf(1. / 3.);
        let px11 = px.powf(11.);
        let t = x * x / 8. - 1.;
        let c1 = SYNCHROTRON1.eval(t);
        let c2 = SYNCHROTRON2.eval(t);
        px * c1 - px11 * c2 - C0 * x
    } else if x < COND3 {
        let t = (12. - x) / (x + 4.);
        let c1 = SYNCHROTRON1A.eval(t);
        x.sqrt() * c1 * (C01 - x).exp()
    } else {
        0.
    }
}
