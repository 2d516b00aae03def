use appointment_booking::config::ClinicConfig;
use appointment_booking::log::CONFIG;
use appointment_booking::{cli, log, Args, Clinic, VERSION};
use clap::Parser;
use tracing::{error, info, warn};

fn main() {
    let args = Args::parse();

    let config = match ClinicConfig::load(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration Error: {}", err);
            std::process::exit(exitcode::CONFIG);
        }
    };

    log::init(config.log.clone());

    info!(target: CONFIG, msg = "Appointment Booking", version = VERSION);
    if !ClinicConfig::config_file_exists(&args.config_file_path) {
        info!(target: CONFIG, msg = "No configuration file, using defaults and environment", path = %args.config_file_path);
    }
    if !config.booking.validate_dates {
        warn!(target: CONFIG, msg = "Date validation is disabled, past slots can be booked");
    }

    let mut clinic = Clinic::from_config(&config);

    if let Err(err) = cli::run(&args, &mut clinic) {
        error!(msg = "Appointment Booking stopped", error = err.to_string());
        std::process::exit(exitcode::IOERR);
    }

    std::process::exit(exitcode::OK);
}
