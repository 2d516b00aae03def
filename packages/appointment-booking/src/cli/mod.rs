use crate::{
    config::{LogConfig, LogFormat, LogLevel, DEFAULT_CONFIG_FILE_PATH},
    error::Error,
    log::SHELL,
    service::Clinic,
    shell::{display, Shell},
};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use tracing::debug;

#[derive(Clone, Debug, Parser)]
#[command(version, about, verbatim_doc_comment)]
///
/// Appointment Booking
///
/// Patients and doctors register, log in and book appointment slots from the console.
///
pub struct Args {
    /// Optional path to a configuration file.
    ///
    /// Default is "appointment-booking.toml".
    /// Configuration is loaded from this file, if present.
    /// Environment variables are used instead of the file or to override any values defined in the file.
    #[arg(short = 'p', long, default_value = DEFAULT_CONFIG_FILE_PATH, verbatim_doc_comment, global = true)]
    pub config_file_path: String,

    ///
    /// Optional log level.
    ///
    #[arg(short, long, value_enum, default_value_t = LogConfig::default_log_level(), env = "APPT_LOG__LEVEL", global = true)]
    pub log_level: LogLevel,

    ///
    /// Optional log format. Default level is "pretty" if running in a terminal session, otherwise "structured".
    ///
    #[arg(short='f', long, value_enum, default_value_t = LogConfig::default_log_format(), env = "APPT_LOG__FORMAT", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List every doctor with the slots still open
    Doctors,

    /// List every appointment ever booked
    Appointments,
}

///
/// Runs the command given on the command line, or the interactive shell when there is none
///
pub fn run(args: &Args, clinic: &mut Clinic) -> Result<(), Error> {
    debug!(target: SHELL, command = ?args.command);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Some(Commands::Doctors) => display::doctors(&mut out, clinic.doctors())?,
        Some(Commands::Appointments) => {
            let appointments = clinic.appointments().iter().collect::<Vec<_>>();
            display::appointments(
                &mut out,
                "ALL APPOINTMENTS",
                &appointments,
                "No appointments found.",
            )?;
        }
        None => {
            let stdin = io::stdin();
            Shell::new(clinic, stdin.lock(), &mut out).run()?;
        }
    }

    out.flush()?;
    Ok(())
}
