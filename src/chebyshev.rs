// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Evaluation of truncated Chebyshev series.

This follows GSL's `cheb_eval_e`: the argument is mapped from `[a, b]` onto
`[-1, 1]` and the series is summed with the Clenshaw recurrence. The leading
coefficient enters with a weight of one half, which is the GSL convention for
its tabulated fits.

*/

/// A fixed Chebyshev expansion on the interval `[a, b]`.
///
/// The coefficient tables we use are literal constants, so the coefficients
/// are borrowed with a static lifetime.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChebyshevSeries {
    /// The expansion coefficients, lowest order first.
    pub coeffs: &'static [f64],

    /// The highest-order term to include. This is one less than the length of
    /// `coeffs` for all of the tables in this crate.
    pub order: usize,

    /// The lower edge of the expansion interval.
    pub a: f64,

    /// The upper edge of the expansion interval.
    pub b: f64,
}

impl ChebyshevSeries {
    /// Evaluate the series at *x*.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        cheb_eval(self.coeffs, self.order, self.a, self.b, x)
    }
}

/// Evaluate the Chebyshev series `coeffs` of order `order` on `[a, b]` at *x*.
///
/// `coeffs` must have at least `order + 1` entries. There's no error path; *x*
/// outside of `[a, b]` is extrapolated.
pub fn cheb_eval(coeffs: &[f64], order: usize, a: f64, b: f64, x: f64) -> f64 {
    let mut d = 0_f64;
    let mut dd = 0_f64;

    let y = (2. * x - a - b) / (b - a);
    let y2 = 2. * y;

    for j in (1..=order).rev() {
        let temp = d;
        d = y2 * d - dd + coeffs[j];
        dd = temp;
    }

    y * d - dd + 0.5 * coeffs[0]
}
