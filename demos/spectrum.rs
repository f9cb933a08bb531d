// Copyright 2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Compute a cooled synchrotron spectrum for one set of physical parameters
//! and print it as a table of energy (keV) and flux.

#[macro_use]
extern crate clap;

use clap::{value_parser, Arg, ArgAction, Command};
use rynchrotron::SynchrotronModel;
use std::process;

fn positional(name: &'static str, help: &'static str, index: usize) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(index)
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
}

fn main() {
    let matches = Command::new(crate_name!())
        .version(crate_version!())
        .about("Compute the spectrum of a cooling, synchrotron-emitting electron population")
        .arg(positional("K", "The normalization", 1))
        .arg(positional("B", "The magnetic field (Gauss)", 2))
        .arg(positional("INDEX", "The power-law index of the injected electrons", 3))
        .arg(positional("GAMMA_MIN", "The minimum injected Lorentz factor", 4))
        .arg(positional("GAMMA_COOL", "The Lorentz factor electrons cool down to", 5))
        .arg(positional("GAMMA_MAX", "The maximum injected Lorentz factor", 6))
        .arg(positional("BULK_GAMMA", "The bulk Lorentz factor", 7))
        .arg(Arg::new("LOG_EMIN")
             .long("log-emin")
             .help("log10 of the lowest photon energy (keV)")
             .default_value("1")
             .value_parser(value_parser!(f64))
             .allow_negative_numbers(true))
        .arg(Arg::new("LOG_EMAX")
             .long("log-emax")
             .help("log10 of the highest photon energy (keV)")
             .default_value("5")
             .value_parser(value_parser!(f64))
             .allow_negative_numbers(true))
        .arg(Arg::new("N_ENERGIES")
             .long("n-energies")
             .help("How many photon energies to compute")
             .default_value("100")
             .value_parser(value_parser!(usize)))
        .arg(Arg::new("GRID")
             .long("grid")
             .help("The number of electron grid points")
             .default_value("300")
             .value_parser(value_parser!(usize)))
        .arg(Arg::new("VERBOSE")
             .short('v')
             .long("verbose")
             .help("Log the calculation to the terminal")
             .action(ArgAction::SetTrue))
        .get_matches();

    let num = |name: &str| *matches.get_one::<f64>(name).unwrap();
    let count = |name: &str| *matches.get_one::<usize>(name).unwrap();

    let mut model = SynchrotronModel::new()
        .k(num("K"))
        .b_field(num("B"))
        .index(num("INDEX"))
        .gamma_limits(num("GAMMA_MIN"), num("GAMMA_COOL"), num("GAMMA_MAX"))
        .bulk_gamma(num("BULK_GAMMA"))
        .grid_points(count("GRID"));

    if matches.get_flag("VERBOSE") {
        model = model.logger(rynchrotron_test_support::default_log());
    }

    let energies = rynchrotron_test_support::logspace(num("LOG_EMIN"), num("LOG_EMAX"), count("N_ENERGIES"));

    let flux = match model.evaluate(&energies) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    println!("energy_kev\tflux");

    for (e, f) in energies.iter().zip(flux.iter()) {
        println!("{:.16e}\t{:.16e}", e, f);
    }
}
