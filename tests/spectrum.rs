//! End-to-end checks of the cooled synchrotron spectrum.

#[macro_use]
extern crate assert_approx_eq;

use rynchrotron::{cool_and_radiate, CoolingParameters, Error, SynchrotronModel, COOLING_CONSTANT};
use rynchrotron_test_support::{default_log, logspace, quiet_log, Sampler};

fn assert_rel(ours: f64, theirs: f64, rtol: f64) {
    let rel_err = ((ours - theirs) / theirs).abs();

    if rel_err > rtol {
        panic!("disagree with reference: they have {:.6e}, we have {:.6e}", theirs, ours);
    }
}

/// The default model over 10 keV – 100 MeV.
#[test]
fn default_spectrum() {
    let energies = logspace(1., 5., 100);
    let flux = SynchrotronModel::new().evaluate(&energies).unwrap();

    assert_eq!(flux.len(), 100);
    assert!(flux.iter().all(|f| f.is_finite() && *f >= 0.));

    assert_rel(flux[0], 1390.12620168931, 1e-8);
    assert_rel(flux[50], 14.540655755127958, 1e-8);
    assert_rel(flux[99], 0.0004828440044600048, 1e-8);
}

/// Five time steps, a boosted source and a coarser grid.
#[test]
fn boosted_spectrum() {
    let flux = SynchrotronModel::new()
        .k(2.)
        .b_field(50.)
        .index(2.5)
        .gamma_limits(1e5, 2e7, 1e8)
        .bulk_gamma(3.)
        .grid_points(150)
        .evaluate(&[1., 30., 1000.])
        .unwrap();

    assert_rel(flux[0], 27917.98874260439, 1e-8);
    assert_rel(flux[1], 1562.7805323495725, 1e-8);
    assert_rel(flux[2], 5.156753651196396, 1e-8);
}

#[test]
fn logging_does_not_change_results() {
    let energies = logspace(0., 3., 12);
    let quiet = SynchrotronModel::new().grid_points(100);
    let loud = quiet.clone().logger(default_log());

    assert_eq!(quiet.evaluate(&energies).unwrap(), loud.evaluate(&energies).unwrap());
}

#[test]
fn repeated_calls_are_identical() {
    let energies = logspace(1., 5., 40);
    let model = SynchrotronModel::new().gamma_limits(5e5, 2e7, 1e8).grid_points(120);
    let first = model.evaluate(&energies).unwrap();

    for _ in 0..3 {
        assert_eq!(model.evaluate(&energies).unwrap(), first);
    }
}

#[test]
fn cooled_past_zero_steps() {
    let energies = logspace(1., 5., 17);
    let flux = SynchrotronModel::new().gamma_limits(5e5, 5e8, 1e8).evaluate(&energies).unwrap();
    assert_eq!(flux, vec![0.; 17]);
}

/// The kernel entry point is linear in the injection normalization for random
/// physical parameters and run lengths.
#[test]
fn linear_in_ne() {
    let b_sampler = Sampler::new(true, 1., 1e3);
    let index_sampler = Sampler::new(false, 2., 6.);
    let gmin_sampler = Sampler::new(true, 10., 1e5);
    let ne_sampler = Sampler::new(true, 0.1, 100.);
    let energies = logspace(-1., 4., 8);
    let log = quiet_log();

    for _ in 0..10 {
        let b = b_sampler.get();
        let gamma_max = 1e6;
        let steps = 1 + (rand::random::<f64>() * 4.) as usize;
        let params = CoolingParameters {
            ne: 1.,
            b_field: b,
            bulk_lorentz_factor: 1.,
            gamma_min: gmin_sampler.get(),
            gamma_max,
            index: index_sampler.get(),
            dt: 1. / (b * b * COOLING_CONSTANT) / gamma_max,
            n_grid_points: 80,
            steps,
        };
        let scale = ne_sampler.get();

        let one = cool_and_radiate(&energies, &params, &log).unwrap();
        let scaled = cool_and_radiate(&energies, &CoolingParameters { ne: scale, ..params }, &log).unwrap();

        for (a, s) in one.iter().zip(scaled.iter()) {
            assert!(a.is_finite() && *a >= 0.);
            assert_approx_eq!(*s, scale * a, 1e-10 * (scale * a).abs() + 1e-300);
        }
    }
}

#[test]
fn invalid_inputs_are_rejected() {
    let energies = [1., 10.];

    match SynchrotronModel::new().gamma_limits(1e8, 9e7, 1e6).evaluate(&energies) {
        Err(Error::InvalidParameter { name: "gamma_max", .. }) => {}
        other => panic!("unexpected result {:?}", other),
    }

    assert_eq!(
        SynchrotronModel::new().grid_points(1).evaluate(&energies),
        Err(Error::TooFewGridPoints(1))
    );

    assert_eq!(
        SynchrotronModel::new().evaluate(&[1., 0.]),
        Err(Error::InvalidPhotonEnergy { index: 1, value: 0. })
    );
}
